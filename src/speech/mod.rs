//! Speech recognition capability abstraction
//!
//! The host environment (browser engine, OS dictation service, remote STT)
//! is modeled as a [`SpeechProvider`] that can report availability and open
//! recognition sessions. Events flow back through a [`RecognitionObserver`]
//! registered at session start. Providers guarantee in-order delivery and
//! non-decreasing result indices within one session; consumers build on that
//! contract without re-checking it.

/// One recognition result within an event.
///
/// The `index` is the result's position in the session's overall result
/// stream. Indices are never reused within a session; a final result at an
/// index supersedes any interim results previously reported for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionResult {
    pub index: usize,
    pub text: String,
    pub is_final: bool,
}

impl RecognitionResult {
    /// Convenience constructor for a final result.
    pub fn final_at(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
            is_final: true,
        }
    }

    /// Convenience constructor for an interim result.
    pub fn interim_at(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
            is_final: false,
        }
    }
}

/// A batch of recognition results delivered at one point in time.
#[derive(Debug, Clone, Default)]
pub struct RecognitionEvent {
    /// Results in ascending index order.
    pub results: Vec<RecognitionResult>,
}

impl RecognitionEvent {
    pub fn new(results: Vec<RecognitionResult>) -> Self {
        Self { results }
    }
}

/// Receiver for the event stream of one recognition session.
///
/// Providers call these methods synchronously on the session's execution
/// context; each call runs to completion before the next is delivered.
pub trait RecognitionObserver: Send {
    /// A batch of results arrived.
    fn on_event(&mut self, event: RecognitionEvent);

    /// The session failed mid-flight (no audio, permission revoked, ...).
    /// No further events follow.
    fn on_error(&mut self, reason: String);

    /// The session ended on its own (silence timeout or explicit stop
    /// confirmation). No further events follow.
    fn on_end(&mut self);
}

/// Handle to an open recognition session.
pub trait SpeechSession: Send {
    /// Signal the provider to cease producing events. Idempotent and
    /// best-effort: one event already dispatched may still be delivered
    /// before the provider confirms the end of the session.
    fn stop(&mut self);
}

/// A speech recognition capability the host environment may or may not have.
pub trait SpeechProvider: Send + Sync {
    /// Whether recognition can be started at all in this environment.
    fn is_available(&self) -> bool;

    /// Open a session, delivering events to `observer` until stop/error/end.
    fn start_session(
        &self,
        observer: Box<dyn RecognitionObserver>,
    ) -> Result<Box<dyn SpeechSession>, SpeechError>;
}

/// Errors reported by a speech provider.
#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("speech recognition is not available in this environment")]
    Unavailable,

    #[error("failed to open recognition session: {0}")]
    SessionFailed(String),
}
