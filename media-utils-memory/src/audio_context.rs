use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use media_utils_core::{
    AudioContext, AudioContextFactory, AudioContextState, AudioNode, AudioSourceNode, MediaError,
    MediaStreamDestinationNode, MediaStreamTrack, MixerConfiguration, NodeId, StreamHandle, TrackHandle,
    TrackKind,
};

use crate::host::TrackRegistry;
use crate::render::{self, RenderStats};
use crate::stream::MemoryStream;
use crate::track::MemoryTrack;

/// Creates `MemoryAudioContext`s, optionally capping how many may be open.
pub struct MemoryAudioContextFactory {
    registry: Arc<TrackRegistry>,
    max_contexts: Option<usize>,
    open_contexts: Arc<AtomicUsize>,
    created: AtomicUsize,
    graphs: Mutex<Vec<Weak<Mutex<Graph>>>>,
}

impl MemoryAudioContextFactory {
    pub fn new(registry: Arc<TrackRegistry>, max_contexts: Option<usize>) -> Self {
        Self {
            registry,
            max_contexts,
            open_contexts: Arc::new(AtomicUsize::new(0)),
            created: AtomicUsize::new(0),
            graphs: Mutex::new(Vec::new()),
        }
    }

    /// Total contexts ever created by this factory.
    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    /// Contexts created and not yet closed.
    pub fn open_contexts(&self) -> usize {
        self.open_contexts.load(Ordering::SeqCst)
    }

    /// Create a context with its concrete type, for callers that render.
    pub fn create_memory_context(&self, config: &MixerConfiguration) -> Result<MemoryAudioContext, MediaError> {
        config.validate().map_err(MediaError::ConfigurationFailed)?;

        let open = self.open_contexts.fetch_add(1, Ordering::SeqCst);
        if let Some(max) = self.max_contexts {
            if open >= max {
                self.open_contexts.fetch_sub(1, Ordering::SeqCst);
                return Err(MediaError::AudioContextUnavailable(format!(
                    "limit of {} open audio contexts reached",
                    max
                )));
            }
        }
        self.created.fetch_add(1, Ordering::SeqCst);

        let graph = Arc::new(Mutex::new(Graph::new(config.sample_rate)));
        self.graphs.lock().push(Arc::downgrade(&graph));

        log::debug!("Created audio context at {} Hz ({} open)", config.sample_rate, open + 1);
        Ok(MemoryAudioContext {
            graph,
            registry: Arc::clone(&self.registry),
            open_contexts: Arc::clone(&self.open_contexts),
        })
    }

    /// Render `frames` samples in every running context this factory created,
    /// in creation order.
    ///
    /// This drives contexts handed out as `Box<dyn AudioContext>`, such as the
    /// ones behind `StreamMixer::combine`. Dropped and closed contexts are
    /// skipped.
    pub fn render_open_contexts(&self, frames: usize) -> Result<Vec<RenderStats>, MediaError> {
        let live: Vec<Arc<Mutex<Graph>>> = {
            let mut graphs = self.graphs.lock();
            graphs.retain(|weak| weak.strong_count() > 0);
            graphs.iter().filter_map(Weak::upgrade).collect()
        };

        let mut stats = Vec::new();
        for shared in live {
            let mut graph = shared.lock();
            if graph.state == AudioContextState::Running {
                stats.extend(graph.render(&self.registry, frames)?);
            }
        }
        Ok(stats)
    }
}

impl AudioContextFactory for MemoryAudioContextFactory {
    fn create_context(&self, config: &MixerConfiguration) -> Result<Box<dyn AudioContext>, MediaError> {
        Ok(Box::new(self.create_memory_context(config)?))
    }
}

/// Node table and wiring of one context.
struct Graph {
    id: String,
    sample_rate: f64,
    state: AudioContextState,
    next_node: u64,
    sources: BTreeMap<NodeId, StreamHandle>,
    destinations: BTreeMap<NodeId, Arc<MemoryTrack>>,
    connections: Vec<(NodeId, NodeId)>,
    // Read position of each source node in each of its input tracks.
    cursors: HashMap<(NodeId, String), u64>,
}

impl Graph {
    fn new(sample_rate: f64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            sample_rate,
            state: AudioContextState::Running,
            next_node: 0,
            sources: BTreeMap::new(),
            destinations: BTreeMap::new(),
            connections: Vec::new(),
            cursors: HashMap::new(),
        }
    }

    fn allocate(&mut self) -> Result<NodeId, MediaError> {
        if self.state.is_closed() {
            return Err(MediaError::InvalidState(format!("audio context {} is closed", self.id)));
        }
        let id = NodeId(self.next_node);
        self.next_node += 1;
        Ok(id)
    }

    /// Sum each destination's inputs for one block and queue it on the output.
    ///
    /// Each source node reads its tracks from its own position, so inputs
    /// shared with other nodes or contexts are not consumed.
    fn render(&mut self, registry: &TrackRegistry, frames: usize) -> Result<Vec<RenderStats>, MediaError> {
        let mut stats = Vec::with_capacity(self.destinations.len());
        for (destination_id, output) in &self.destinations {
            let mut block = vec![0.0f32; frames];
            let mut inputs = 0;

            for (source_id, _) in self.connections.iter().filter(|(_, dst)| dst == destination_id) {
                let Some(stream) = self.sources.get(source_id) else {
                    continue;
                };
                for track in stream.audio_tracks() {
                    let Some(memory_track) = registry.resolve(track.id()) else {
                        log::debug!("Track {} is not known to this host, rendering silence", track.id());
                        continue;
                    };
                    let cursor = self.cursors.entry((*source_id, track.id().to_string())).or_insert(0);
                    let (samples, next) = memory_track.read_at(*cursor, frames);
                    *cursor = next;
                    render::accumulate(&mut block, &samples);
                    inputs += 1;
                }
            }

            render::clamp_block(&mut block);
            if output.state().is_live() {
                output.push_samples(&block)?;
            }
            stats.push(RenderStats {
                destination: *destination_id,
                frames,
                inputs,
            });
        }
        Ok(stats)
    }
}

/// In-memory audio graph.
///
/// `render` advances the graph by a block of frames: every destination sums
/// the live audio tracks of the streams connected to it and queues the
/// clamped block on its output track. Input samples stay available to other
/// nodes and contexts reading the same tracks.
pub struct MemoryAudioContext {
    graph: Arc<Mutex<Graph>>,
    registry: Arc<TrackRegistry>,
    open_contexts: Arc<AtomicUsize>,
}

impl MemoryAudioContext {
    pub fn id(&self) -> String {
        self.graph.lock().id.clone()
    }

    pub fn suspend(&self) -> Result<(), MediaError> {
        self.transition(AudioContextState::Suspended)
    }

    pub fn resume(&self) -> Result<(), MediaError> {
        self.transition(AudioContextState::Running)
    }

    fn transition(&self, next: AudioContextState) -> Result<(), MediaError> {
        let mut graph = self.graph.lock();
        if graph.state.is_closed() {
            return Err(MediaError::InvalidState(format!("audio context {} is closed", graph.id)));
        }
        graph.state = next;
        Ok(())
    }

    /// Number of source → destination connections.
    pub fn connection_count(&self) -> usize {
        self.graph.lock().connections.len()
    }

    /// Render `frames` samples into every destination.
    ///
    /// A suspended context renders nothing and returns no stats.
    pub fn render(&self, frames: usize) -> Result<Vec<RenderStats>, MediaError> {
        let mut graph = self.graph.lock();
        match graph.state {
            AudioContextState::Closed => {
                Err(MediaError::InvalidState(format!("audio context {} is closed", graph.id)))
            }
            AudioContextState::Suspended => Ok(Vec::new()),
            AudioContextState::Running => graph.render(&self.registry, frames),
        }
    }
}

impl AudioContext for MemoryAudioContext {
    fn state(&self) -> AudioContextState {
        self.graph.lock().state
    }

    fn sample_rate(&self) -> f64 {
        self.graph.lock().sample_rate
    }

    fn create_media_stream_destination(&self) -> Result<Box<dyn MediaStreamDestinationNode>, MediaError> {
        let mut graph = self.graph.lock();
        let id = graph.allocate()?;

        let output = Arc::new(MemoryTrack::new(TrackKind::Audio, "MediaStreamAudioDestinationNode"));
        self.registry.register(&output);
        graph.destinations.insert(id, Arc::clone(&output));

        let stream: StreamHandle = Arc::new(MemoryStream::new(vec![output as TrackHandle]));
        Ok(Box::new(MemoryDestinationNode {
            id,
            context_id: graph.id.clone(),
            stream,
        }))
    }

    fn create_media_stream_source(&self, stream: &StreamHandle) -> Result<Box<dyn AudioSourceNode>, MediaError> {
        if !stream.has_audio() {
            return Err(MediaError::InvalidState(format!("stream {} has no audio track", stream.id())));
        }

        let mut graph = self.graph.lock();
        let id = graph.allocate()?;
        graph.sources.insert(id, Arc::clone(stream));

        Ok(Box::new(MemorySourceNode {
            id,
            stream: Arc::clone(stream),
            graph: Arc::clone(&self.graph),
        }))
    }

    fn close(&self) -> Result<(), MediaError> {
        let mut graph = self.graph.lock();
        if graph.state.is_closed() {
            return Err(MediaError::InvalidState(format!("audio context {} is already closed", graph.id)));
        }
        graph.state = AudioContextState::Closed;
        self.open_contexts.fetch_sub(1, Ordering::SeqCst);
        log::debug!("Closed audio context {}", graph.id);
        for output in graph.destinations.values() {
            output.stop()?;
        }
        Ok(())
    }
}

/// Source node bound to one stream.
pub struct MemorySourceNode {
    id: NodeId,
    stream: StreamHandle,
    graph: Arc<Mutex<Graph>>,
}

impl AudioNode for MemorySourceNode {
    fn node_id(&self) -> NodeId {
        self.id
    }
}

impl AudioSourceNode for MemorySourceNode {
    fn media_stream(&self) -> StreamHandle {
        Arc::clone(&self.stream)
    }

    fn connect(&self, destination: &dyn MediaStreamDestinationNode) -> Result<(), MediaError> {
        let mut graph = self.graph.lock();
        if graph.state.is_closed() {
            return Err(MediaError::InvalidState(format!("audio context {} is closed", graph.id)));
        }

        let target = destination.node_id();
        let owns_target = graph
            .destinations
            .get(&target)
            .is_some_and(|output| destination.stream().tracks().iter().any(|t| t.id() == output.id()));
        if !owns_target {
            return Err(MediaError::InvalidAccess(format!(
                "{} does not belong to audio context {}",
                target, graph.id
            )));
        }

        if !graph.connections.contains(&(self.id, target)) {
            graph.connections.push((self.id, target));
        }
        Ok(())
    }
}

/// Sink node exposing the mixed output as an audio-only stream.
pub struct MemoryDestinationNode {
    id: NodeId,
    context_id: String,
    stream: StreamHandle,
}

impl MemoryDestinationNode {
    pub fn context_id(&self) -> &str {
        &self.context_id
    }
}

impl AudioNode for MemoryDestinationNode {
    fn node_id(&self) -> NodeId {
        self.id
    }
}

impl MediaStreamDestinationNode for MemoryDestinationNode {
    fn stream(&self) -> StreamHandle {
        Arc::clone(&self.stream)
    }
}
