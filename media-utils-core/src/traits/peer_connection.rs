use std::sync::Arc;

use crate::models::error::MediaError;
use crate::models::media_kinds::PeerConnectionState;
use crate::traits::media_track::TrackHandle;

/// Shared handle to a sender of a peer connection.
pub type SenderHandle = Arc<dyn RtpSender>;

/// Binding between a local outbound track and the transport.
pub trait RtpSender: Send + Sync {
    fn id(&self) -> &str;

    /// The attached track, or `None` once it has been removed.
    fn track(&self) -> Option<TrackHandle>;
}

/// A host-managed real-time transport session.
pub trait PeerConnection: Send + Sync {
    /// Current outbound senders, in creation order.
    fn senders(&self) -> Vec<SenderHandle>;

    /// Detach `sender`'s track from transmission.
    ///
    /// Does not stop the track itself.
    fn remove_track(&self, sender: &SenderHandle) -> Result<(), MediaError>;

    fn connection_state(&self) -> PeerConnectionState;
}
