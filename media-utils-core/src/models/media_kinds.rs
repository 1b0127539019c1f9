use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of media carried by a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    Audio,
    Video,
}

impl TrackKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Audio => "audio",
            Self::Video => "video",
        }
    }
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of a track. Once `Ended`, a track never returns to `Live`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackState {
    Live,
    Ended,
}

impl TrackState {
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live)
    }

    pub fn is_ended(&self) -> bool {
        matches!(self, Self::Ended)
    }
}

/// State of an audio-processing context.
///
/// ```text
/// running ↔ suspended
///    ↓          ↓
///       closed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioContextState {
    Running,
    Suspended,
    Closed,
}

impl AudioContextState {
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

/// Identifier of an audio node, unique within the context that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Connection state of a peer connection, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeerConnectionState {
    New,
    Connecting,
    Connected,
    Disconnected,
    Failed,
    Closed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&TrackKind::Video).unwrap(), "\"video\"");
        let kind: TrackKind = serde_json::from_str("\"audio\"").unwrap();
        assert_eq!(kind, TrackKind::Audio);
    }

    #[test]
    fn track_kind_display_matches_wire_name() {
        assert_eq!(TrackKind::Audio.to_string(), "audio");
        assert_eq!(TrackKind::Video.to_string(), "video");
    }

    #[test]
    fn track_state_predicates() {
        assert!(TrackState::Live.is_live());
        assert!(!TrackState::Live.is_ended());
        assert!(TrackState::Ended.is_ended());
    }
}
