//! Minimal host fakes for unit tests.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::models::config::MixerConfiguration;
use crate::models::error::MediaError;
use crate::models::media_kinds::{AudioContextState, NodeId, PeerConnectionState, TrackKind, TrackState};
use crate::traits::audio_graph::{AudioContext, AudioContextFactory, AudioNode, AudioSourceNode, MediaStreamDestinationNode};
use crate::traits::media_stream::{MediaStream, StreamHandle};
use crate::traits::media_track::{MediaStreamTrack, TrackHandle};
use crate::traits::peer_connection::{PeerConnection, RtpSender, SenderHandle};

pub struct FakeTrack {
    id: String,
    kind: TrackKind,
    state: Mutex<TrackState>,
    fail_stop: bool,
}

impl FakeTrack {
    pub fn handle(id: &str, kind: TrackKind) -> TrackHandle {
        Arc::new(Self {
            id: id.to_string(),
            kind,
            state: Mutex::new(TrackState::Live),
            fail_stop: false,
        })
    }

    pub fn failing_handle(id: &str, kind: TrackKind) -> TrackHandle {
        Arc::new(Self {
            id: id.to_string(),
            kind,
            state: Mutex::new(TrackState::Live),
            fail_stop: true,
        })
    }
}

impl MediaStreamTrack for FakeTrack {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> TrackKind {
        self.kind
    }

    fn label(&self) -> &str {
        ""
    }

    fn state(&self) -> TrackState {
        *self.state.lock()
    }

    fn stop(&self) -> Result<(), MediaError> {
        if self.fail_stop {
            return Err(MediaError::Unknown(format!("cannot stop {}", self.id)));
        }
        *self.state.lock() = TrackState::Ended;
        Ok(())
    }
}

pub struct FakeStream {
    id: String,
    tracks: Vec<TrackHandle>,
}

impl FakeStream {
    pub fn new(id: &str, tracks: Vec<TrackHandle>) -> Self {
        Self {
            id: id.to_string(),
            tracks,
        }
    }

    pub fn handle(id: &str, tracks: Vec<TrackHandle>) -> StreamHandle {
        Arc::new(Self::new(id, tracks))
    }
}

impl MediaStream for FakeStream {
    fn id(&self) -> &str {
        &self.id
    }

    fn tracks(&self) -> Vec<TrackHandle> {
        self.tracks.clone()
    }
}

/// Records what a fake context was asked to build.
#[derive(Default)]
pub struct FakeGraph {
    next_node: AtomicU64,
    destinations: Mutex<Vec<NodeId>>,
    sources: Mutex<Vec<String>>,
    connections: Mutex<Vec<(NodeId, NodeId)>>,
    closed: AtomicBool,
}

impl FakeGraph {
    fn allocate(&self) -> NodeId {
        NodeId(self.next_node.fetch_add(1, Ordering::SeqCst))
    }

    pub fn source_stream_ids(&self) -> Vec<String> {
        self.sources.lock().clone()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    pub fn destination_count(&self) -> usize {
        self.destinations.lock().len()
    }
}

#[derive(Default)]
pub struct FakeContextFactory {
    graphs: Mutex<Vec<Arc<FakeGraph>>>,
    created: AtomicUsize,
    fail: bool,
}

impl FakeContextFactory {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    pub fn last_graph(&self) -> Option<Arc<FakeGraph>> {
        self.graphs.lock().last().cloned()
    }
}

impl AudioContextFactory for FakeContextFactory {
    fn create_context(&self, config: &MixerConfiguration) -> Result<Box<dyn AudioContext>, MediaError> {
        if self.fail {
            return Err(MediaError::AudioContextUnavailable("no audio device".into()));
        }
        self.created.fetch_add(1, Ordering::SeqCst);
        let graph = Arc::new(FakeGraph::default());
        self.graphs.lock().push(Arc::clone(&graph));
        Ok(Box::new(FakeContext {
            graph,
            sample_rate: config.sample_rate,
        }))
    }
}

struct FakeContext {
    graph: Arc<FakeGraph>,
    sample_rate: f64,
}

impl AudioContext for FakeContext {
    fn state(&self) -> AudioContextState {
        if self.graph.closed.load(Ordering::SeqCst) {
            AudioContextState::Closed
        } else {
            AudioContextState::Running
        }
    }

    fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    fn create_media_stream_destination(&self) -> Result<Box<dyn MediaStreamDestinationNode>, MediaError> {
        let id = self.graph.allocate();
        self.graph.destinations.lock().push(id);
        let output = FakeStream::handle(
            &format!("mix-{}", id.0),
            vec![FakeTrack::handle(&format!("mix-{}-audio", id.0), TrackKind::Audio)],
        );
        Ok(Box::new(FakeDestination { id, output }))
    }

    fn create_media_stream_source(&self, stream: &StreamHandle) -> Result<Box<dyn AudioSourceNode>, MediaError> {
        let id = self.graph.allocate();
        self.graph.sources.lock().push(stream.id().to_string());
        Ok(Box::new(FakeSource {
            id,
            stream: Arc::clone(stream),
            graph: Arc::clone(&self.graph),
        }))
    }

    fn close(&self) -> Result<(), MediaError> {
        self.graph.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

struct FakeSource {
    id: NodeId,
    stream: StreamHandle,
    graph: Arc<FakeGraph>,
}

impl AudioNode for FakeSource {
    fn node_id(&self) -> NodeId {
        self.id
    }
}

impl AudioSourceNode for FakeSource {
    fn media_stream(&self) -> StreamHandle {
        Arc::clone(&self.stream)
    }

    fn connect(&self, destination: &dyn MediaStreamDestinationNode) -> Result<(), MediaError> {
        self.graph.connections.lock().push((self.id, destination.node_id()));
        Ok(())
    }
}

struct FakeDestination {
    id: NodeId,
    output: StreamHandle,
}

impl AudioNode for FakeDestination {
    fn node_id(&self) -> NodeId {
        self.id
    }
}

impl MediaStreamDestinationNode for FakeDestination {
    fn stream(&self) -> StreamHandle {
        Arc::clone(&self.output)
    }
}

pub struct FakeSender {
    id: String,
    track: Mutex<Option<TrackHandle>>,
}

impl RtpSender for FakeSender {
    fn id(&self) -> &str {
        &self.id
    }

    fn track(&self) -> Option<TrackHandle> {
        self.track.lock().clone()
    }
}

/// Senders are named `sender-{index}` in the order given.
pub struct FakePeer {
    senders: Vec<Arc<FakeSender>>,
    removed: Mutex<Vec<String>>,
    remove_error: Option<MediaError>,
}

impl FakePeer {
    pub fn new(tracks: Vec<Option<TrackHandle>>) -> Self {
        let senders = tracks
            .into_iter()
            .enumerate()
            .map(|(i, track)| {
                Arc::new(FakeSender {
                    id: format!("sender-{i}"),
                    track: Mutex::new(track),
                })
            })
            .collect();
        Self {
            senders,
            removed: Mutex::new(Vec::new()),
            remove_error: None,
        }
    }

    pub fn failing_with(mut self, error: MediaError) -> Self {
        self.remove_error = Some(error);
        self
    }

    pub fn removed(&self) -> Vec<String> {
        self.removed.lock().clone()
    }
}

impl PeerConnection for FakePeer {
    fn senders(&self) -> Vec<SenderHandle> {
        self.senders
            .iter()
            .map(|sender| Arc::clone(sender) as SenderHandle)
            .collect()
    }

    fn remove_track(&self, sender: &SenderHandle) -> Result<(), MediaError> {
        if let Some(error) = &self.remove_error {
            return Err(error.clone());
        }
        if let Some(own) = self.senders.iter().find(|s| s.id == sender.id()) {
            own.track.lock().take();
            self.removed.lock().push(own.id.clone());
        }
        Ok(())
    }

    fn connection_state(&self) -> PeerConnectionState {
        PeerConnectionState::Connected
    }
}
