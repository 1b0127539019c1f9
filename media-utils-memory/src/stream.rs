use parking_lot::RwLock;

use media_utils_core::{MediaStream, TrackHandle};

/// In-memory stream with a mutable, ordered track set.
pub struct MemoryStream {
    id: String,
    tracks: RwLock<Vec<TrackHandle>>,
}

impl MemoryStream {
    pub fn new(tracks: Vec<TrackHandle>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            tracks: RwLock::new(tracks),
        }
    }

    /// Append `track` unless a track with the same id is already present.
    pub fn add_track(&self, track: TrackHandle) {
        let mut tracks = self.tracks.write();
        if !tracks.iter().any(|t| t.id() == track.id()) {
            tracks.push(track);
        }
    }

    /// Remove the track with `track_id`. Returns whether it was present.
    pub fn remove_track(&self, track_id: &str) -> bool {
        let mut tracks = self.tracks.write();
        let before = tracks.len();
        tracks.retain(|t| t.id() != track_id);
        tracks.len() != before
    }

    /// Whether any track is still live.
    pub fn is_active(&self) -> bool {
        self.tracks.read().iter().any(|t| t.state().is_live())
    }
}

impl MediaStream for MemoryStream {
    fn id(&self) -> &str {
        &self.id
    }

    fn tracks(&self) -> Vec<TrackHandle> {
        self.tracks.read().clone()
    }
}
