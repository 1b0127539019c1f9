use std::sync::Arc;

use crate::models::error::MediaError;
use crate::models::media_kinds::{TrackKind, TrackState};

/// Shared handle to a host track.
pub type TrackHandle = Arc<dyn MediaStreamTrack>;

/// A single audio or video channel owned by the host.
pub trait MediaStreamTrack: Send + Sync {
    /// Host-assigned unique identifier.
    fn id(&self) -> &str;

    fn kind(&self) -> TrackKind;

    /// Human-readable label (device name), may be empty.
    fn label(&self) -> &str;

    fn state(&self) -> TrackState;

    /// Stop the track and release its source.
    ///
    /// Stopping an already-ended track must succeed without effect.
    fn stop(&self) -> Result<(), MediaError>;
}
