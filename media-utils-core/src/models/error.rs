use thiserror::Error;

/// Failures reported by the host media subsystem.
///
/// The helpers in this crate never raise these themselves for missing
/// inputs; they only pass host failures through to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MediaError {
    #[error("audio context unavailable: {0}")]
    AudioContextUnavailable(String),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("invalid access: {0}")]
    InvalidAccess(String),

    #[error("not supported: {0}")]
    NotSupported(String),

    #[error("configuration failed: {0}")]
    ConfigurationFailed(String),

    #[error("unknown error: {0}")]
    Unknown(String),
}
