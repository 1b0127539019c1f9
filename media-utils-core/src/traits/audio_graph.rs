use crate::models::config::MixerConfiguration;
use crate::models::error::MediaError;
use crate::models::media_kinds::{AudioContextState, NodeId};
use crate::traits::media_stream::StreamHandle;

/// Creates audio-processing contexts on the host.
///
/// Every call must return a fresh, independent context.
pub trait AudioContextFactory: Send + Sync {
    fn create_context(&self, config: &MixerConfiguration) -> Result<Box<dyn AudioContext>, MediaError>;
}

/// A host audio graph. Owns every node created through it.
pub trait AudioContext: Send + Sync {
    fn state(&self) -> AudioContextState;

    fn sample_rate(&self) -> f64;

    /// Create the sink node whose output is exposed as a stream.
    fn create_media_stream_destination(&self) -> Result<Box<dyn MediaStreamDestinationNode>, MediaError>;

    /// Create a source node reading the audio tracks of `stream`.
    fn create_media_stream_source(&self, stream: &StreamHandle) -> Result<Box<dyn AudioSourceNode>, MediaError>;

    /// Release the context and everything it owns.
    fn close(&self) -> Result<(), MediaError>;
}

/// Common surface of every node in a context.
pub trait AudioNode: Send + Sync {
    fn node_id(&self) -> NodeId;
}

/// A node fed by a host stream.
pub trait AudioSourceNode: AudioNode {
    fn media_stream(&self) -> StreamHandle;

    /// Route this node's output into `destination`.
    ///
    /// Hosts reject destinations that belong to a different context with
    /// `MediaError::InvalidAccess`.
    fn connect(&self, destination: &dyn MediaStreamDestinationNode) -> Result<(), MediaError>;
}

/// The sink of a mixing graph.
pub trait MediaStreamDestinationNode: AudioNode {
    /// The audio-only stream carrying everything connected to this node.
    fn stream(&self) -> StreamHandle;
}
