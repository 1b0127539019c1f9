//! # media-utils-core
//!
//! Host-agnostic WebRTC media helpers.
//!
//! Two stateless operations over host-provided media objects:
//! - `StreamMixer::combine` mixes the audio of several streams into one
//!   audio-only stream through a fresh audio context.
//! - `teardown` removes a peer connection's outgoing video sender and stops
//!   every track of the local stream.
//!
//! Hosts (a browser binding, a native WebRTC stack, the in-memory backend in
//! `media-utils-memory`) implement the traits in `traits/`.
//!
//! ## Architecture
//!
//! ```text
//! media-utils-core (this crate)
//! ├── traits/     ← MediaStreamTrack, MediaStream, AudioContext(Factory), audio nodes, PeerConnection, RtpSender
//! ├── models/     ← MediaError, MixerConfiguration, TrackKind, TrackState, etc.
//! ├── mixer/      ← StreamMixer, MixedStream
//! └── teardown/   ← teardown
//! ```

pub mod mixer;
pub mod models;
pub mod teardown;
pub mod traits;

#[cfg(test)]
mod test_support;

// Re-export key types at crate root for convenience.
pub use mixer::stream_mixer::{combine_audio_streams, MixedStream, StreamMixer};
pub use models::config::{LatencyHint, MixerConfiguration};
pub use models::error::MediaError;
pub use models::media_kinds::{AudioContextState, NodeId, PeerConnectionState, TrackKind, TrackState};
pub use teardown::connection::teardown;
pub use traits::audio_graph::{AudioContext, AudioContextFactory, AudioNode, AudioSourceNode, MediaStreamDestinationNode};
pub use traits::media_stream::{MediaStream, StreamHandle};
pub use traits::media_track::{MediaStreamTrack, TrackHandle};
pub use traits::peer_connection::{PeerConnection, RtpSender, SenderHandle};
