//! # media-utils-memory
//!
//! In-process host backend for media-utils.
//!
//! Provides:
//! - `MemoryHost`: factory for every object below, sharing one track registry
//! - `MemoryTrack` / `MemoryStream`: tracks with a live/ended lifecycle and sample buffers
//! - `MemoryAudioContextFactory` / `MemoryAudioContext`: audio graph that renders by summing inputs
//! - `MemoryPeerConnection` / `MemorySender`: outbound sender bookkeeping without a transport
//!
//! ## Usage
//! ```
//! use media_utils_core::teardown;
//! use media_utils_memory::MemoryHost;
//!
//! let host = MemoryHost::new();
//! let cam = host.video_track("camera");
//! let mic = host.audio_track("microphone");
//! let local = host.stream(vec![cam.clone(), mic]);
//! let peer = host.peer_connection();
//! peer.add_track(cam).unwrap();
//!
//! teardown(Some(&peer), Some(&*local)).unwrap();
//! assert!(peer.active_senders().is_empty());
//! assert!(!local.is_active());
//! ```

pub mod audio_context;
pub mod host;
pub mod peer;
pub mod render;
pub mod sample_buffer;
pub mod stream;
pub mod track;

pub use audio_context::{MemoryAudioContext, MemoryAudioContextFactory, MemoryDestinationNode, MemorySourceNode};
pub use host::{MemoryHost, TrackRegistry};
pub use peer::{MemoryPeerConnection, MemorySender};
pub use render::RenderStats;
pub use sample_buffer::SampleBuffer;
pub use stream::MemoryStream;
pub use track::MemoryTrack;
