use std::sync::Arc;

use crate::models::media_kinds::TrackKind;
use crate::traits::media_track::TrackHandle;

/// Shared handle to a host stream.
pub type StreamHandle = Arc<dyn MediaStream>;

/// An ordered set of tracks borrowed from the host.
pub trait MediaStream: Send + Sync {
    fn id(&self) -> &str;

    /// All tracks in insertion order.
    fn tracks(&self) -> Vec<TrackHandle>;

    /// Audio tracks, in stream order.
    fn audio_tracks(&self) -> Vec<TrackHandle> {
        self.tracks_of_kind(TrackKind::Audio)
    }

    /// Video tracks, in stream order.
    fn video_tracks(&self) -> Vec<TrackHandle> {
        self.tracks_of_kind(TrackKind::Video)
    }

    fn tracks_of_kind(&self, kind: TrackKind) -> Vec<TrackHandle> {
        self.tracks()
            .into_iter()
            .filter(|track| track.kind() == kind)
            .collect()
    }

    fn has_audio(&self) -> bool {
        self.tracks().iter().any(|track| track.kind() == TrackKind::Audio)
    }
}
