//! Error types for the dictation module

/// Errors surfaced when starting or running a dictation session.
#[derive(Debug, thiserror::Error)]
pub enum DictationError {
    /// The environment has no speech recognition capability. Reported
    /// synchronously from start; not retryable without user action.
    #[error("voice recording is not supported in this environment")]
    CapabilityUnavailable,

    /// A session is already active for this editor instance.
    #[error("a voice recording session is already active")]
    SessionActive,

    /// The provider failed to open a session.
    #[error("failed to start voice recording: {0}")]
    StartFailed(String),
}

impl From<crate::speech::SpeechError> for DictationError {
    fn from(err: crate::speech::SpeechError) -> Self {
        match err {
            crate::speech::SpeechError::Unavailable => DictationError::CapabilityUnavailable,
            crate::speech::SpeechError::SessionFailed(reason) => DictationError::StartFailed(reason),
        }
    }
}
