use std::sync::Arc;

use parking_lot::Mutex;

use media_utils_core::{MediaError, PeerConnection, PeerConnectionState, RtpSender, SenderHandle, TrackHandle};

/// Outbound sender of a `MemoryPeerConnection`.
///
/// Removing its track leaves the sender listed with no track attached.
pub struct MemorySender {
    id: String,
    track: Mutex<Option<TrackHandle>>,
}

impl RtpSender for MemorySender {
    fn id(&self) -> &str {
        &self.id
    }

    fn track(&self) -> Option<TrackHandle> {
        self.track.lock().clone()
    }
}

/// In-memory peer connection tracking outbound senders.
///
/// No transport is involved; the connection state is set by the caller.
pub struct MemoryPeerConnection {
    id: String,
    state: Mutex<PeerConnectionState>,
    senders: Mutex<Vec<Arc<MemorySender>>>,
    removed: Mutex<Vec<String>>,
}

impl MemoryPeerConnection {
    pub fn new() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            state: Mutex::new(PeerConnectionState::New),
            senders: Mutex::new(Vec::new()),
            removed: Mutex::new(Vec::new()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Start sending `track`. A track may only be attached to one sender.
    pub fn add_track(&self, track: TrackHandle) -> Result<SenderHandle, MediaError> {
        self.ensure_open()?;

        let mut senders = self.senders.lock();
        let already_sent = senders
            .iter()
            .any(|s| s.track().is_some_and(|t| t.id() == track.id()));
        if already_sent {
            return Err(MediaError::InvalidAccess(format!(
                "track {} is already sent on connection {}",
                track.id(),
                self.id
            )));
        }

        let kind = track.kind();
        let sender = Arc::new(MemorySender {
            id: uuid::Uuid::new_v4().to_string(),
            track: Mutex::new(Some(track)),
        });
        senders.push(Arc::clone(&sender));
        log::debug!("Added {} sender {} to connection {}", kind, sender.id, self.id);
        Ok(sender)
    }

    pub fn set_connection_state(&self, state: PeerConnectionState) {
        *self.state.lock() = state;
    }

    /// Close the connection. Senders stay listed; further changes fail.
    pub fn close(&self) {
        *self.state.lock() = PeerConnectionState::Closed;
        log::debug!("Closed connection {}", self.id);
    }

    /// Ids of senders whose track was detached, in removal order.
    pub fn removed_sender_ids(&self) -> Vec<String> {
        self.removed.lock().clone()
    }

    /// Senders that still carry a track.
    pub fn active_senders(&self) -> Vec<SenderHandle> {
        self.senders()
            .into_iter()
            .filter(|s| s.track().is_some())
            .collect()
    }

    fn ensure_open(&self) -> Result<(), MediaError> {
        if *self.state.lock() == PeerConnectionState::Closed {
            return Err(MediaError::InvalidState(format!("connection {} is closed", self.id)));
        }
        Ok(())
    }
}

impl Default for MemoryPeerConnection {
    fn default() -> Self {
        Self::new()
    }
}

impl PeerConnection for MemoryPeerConnection {
    fn senders(&self) -> Vec<SenderHandle> {
        self.senders
            .lock()
            .iter()
            .map(|s| Arc::clone(s) as SenderHandle)
            .collect()
    }

    fn remove_track(&self, sender: &SenderHandle) -> Result<(), MediaError> {
        self.ensure_open()?;

        let senders = self.senders.lock();
        let Some(own) = senders.iter().find(|s| s.id == sender.id()) else {
            return Err(MediaError::InvalidAccess(format!(
                "sender {} was not created by connection {}",
                sender.id(),
                self.id
            )));
        };

        if own.track.lock().take().is_some() {
            self.removed.lock().push(own.id.clone());
            log::debug!("Detached track from sender {} on connection {}", own.id, self.id);
        }
        Ok(())
    }

    fn connection_state(&self) -> PeerConnectionState {
        *self.state.lock()
    }
}
