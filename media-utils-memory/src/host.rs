use std::collections::HashMap;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use media_utils_core::{MediaStreamTrack, TrackHandle, TrackKind};

use crate::audio_context::MemoryAudioContextFactory;
use crate::peer::MemoryPeerConnection;
use crate::stream::MemoryStream;
use crate::track::MemoryTrack;

/// Lookup from track id to the in-memory track behind it.
///
/// Audio contexts only see `TrackHandle`s through streams; they resolve
/// the ids here to pull samples. Tracks created elsewhere render as silence.
#[derive(Default)]
pub struct TrackRegistry {
    tracks: Mutex<HashMap<String, Weak<MemoryTrack>>>,
}

impl TrackRegistry {
    pub fn register(&self, track: &Arc<MemoryTrack>) {
        let mut tracks = self.tracks.lock();
        tracks.retain(|_, weak| weak.strong_count() > 0);
        tracks.insert(track.id().to_string(), Arc::downgrade(track));
    }

    pub fn resolve(&self, track_id: &str) -> Option<Arc<MemoryTrack>> {
        self.tracks.lock().get(track_id).and_then(Weak::upgrade)
    }
}

/// An in-process media host: the source of every track, stream, audio
/// context and peer connection used together.
///
/// ## Usage
/// ```
/// use media_utils_core::{StreamMixer, StreamHandle, MediaStream};
/// use media_utils_memory::MemoryHost;
///
/// let host = MemoryHost::new();
/// let mic = host.audio_track("mic");
/// let stream: StreamHandle = host.stream(vec![mic]);
/// let mixer = StreamMixer::with_defaults(host.context_factory());
/// let mixed = mixer.combine(&[stream]).unwrap();
/// assert_eq!(mixed.stream().audio_tracks().len(), 1);
/// ```
#[derive(Clone)]
pub struct MemoryHost {
    registry: Arc<TrackRegistry>,
    factory: Arc<MemoryAudioContextFactory>,
}

impl MemoryHost {
    pub fn new() -> Self {
        let registry = Arc::new(TrackRegistry::default());
        Self {
            factory: Arc::new(MemoryAudioContextFactory::new(Arc::clone(&registry), None)),
            registry,
        }
    }

    /// A host that refuses to hold more than `max_contexts` open audio contexts.
    pub fn with_max_contexts(max_contexts: usize) -> Self {
        let registry = Arc::new(TrackRegistry::default());
        Self {
            factory: Arc::new(MemoryAudioContextFactory::new(Arc::clone(&registry), Some(max_contexts))),
            registry,
        }
    }

    pub fn track(&self, kind: TrackKind, label: &str) -> Arc<MemoryTrack> {
        let track = Arc::new(MemoryTrack::new(kind, label));
        self.registry.register(&track);
        track
    }

    pub fn audio_track(&self, label: &str) -> Arc<MemoryTrack> {
        self.track(TrackKind::Audio, label)
    }

    pub fn video_track(&self, label: &str) -> Arc<MemoryTrack> {
        self.track(TrackKind::Video, label)
    }

    pub fn stream(&self, tracks: Vec<Arc<MemoryTrack>>) -> Arc<MemoryStream> {
        Arc::new(MemoryStream::new(
            tracks.into_iter().map(|t| t as TrackHandle).collect(),
        ))
    }

    pub fn context_factory(&self) -> Arc<MemoryAudioContextFactory> {
        Arc::clone(&self.factory)
    }

    pub fn peer_connection(&self) -> MemoryPeerConnection {
        MemoryPeerConnection::new()
    }

    pub fn registry(&self) -> &Arc<TrackRegistry> {
        &self.registry
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}
