//! Voice dictation for the journal editor
//!
//! Wires a [`SpeechProvider`](crate::speech::SpeechProvider) session to the
//! transcript accumulator and exposes the result to the editor as a pair of
//! callbacks: `on_append` with each newly committed segment, `on_error` when
//! the session fails mid-flight. Interim results are surfaced through the
//! optional `on_preview` callback and never reach the committed buffer.
//!
//! # Lifecycle
//! [`DictationController::start`] checks availability, creates fresh session
//! state, and subscribes to the provider. It returns a [`DictationHandle`]
//! the caller threads back into [`DictationHandle::stop`]; there is no global
//! session, so two editors cannot interfere with each other. Stop is
//! idempotent and best-effort: one event already dispatched by the provider
//! may still be delivered and produce a final append.

mod accumulator;
mod error;
mod session;

pub use accumulator::{merge_committed, TranscriptAccumulator};
pub use error::DictationError;

use crate::speech::{RecognitionEvent, RecognitionObserver, SpeechProvider, SpeechSession};
use session::SessionState;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

/// Callbacks the editor registers for one dictation session.
#[derive(Clone)]
pub struct DictationCallbacks {
    /// Invoked with each newly committed transcript segment. The receiver
    /// merges it into its buffer with [`merge_committed`].
    pub on_append: Arc<dyn Fn(String) + Send + Sync>,
    /// Invoked with interim text for live feedback. Never committed.
    pub on_preview: Option<Arc<dyn Fn(String) + Send + Sync>>,
    /// Invoked when the session fails mid-flight. The session is already
    /// stopped when this fires; the receiver clears its recording indicator
    /// and shows the message.
    pub on_error: Arc<dyn Fn(String) + Send + Sync>,
}

/// Handle to an active dictation session.
pub struct DictationHandle {
    session: Option<Box<dyn SpeechSession>>,
    state: Arc<Mutex<SessionState>>,
}

impl DictationHandle {
    /// Whether the session is still producing events.
    pub fn is_recording(&self) -> bool {
        self.state.lock().map(|s| s.recording).unwrap_or(false)
    }

    /// Stop the session. Idempotent; safe to call after the provider has
    /// already ended the session on its own.
    pub fn stop(&mut self) {
        let was_recording = self
            .state
            .lock()
            .map(|mut state| {
                let was_recording = state.recording;
                state.recording = false;
                state.manually_stopped = true;
                was_recording
            })
            .unwrap_or(false);
        if let Some(mut session) = self.session.take() {
            session.stop();
        }
        // A drop after the provider already ended the session is not a
        // user action; only log the transition.
        if was_recording {
            info!("Dictation session stopped by user");
        }
    }
}

impl Drop for DictationHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Starts dictation sessions against an injected speech provider.
pub struct DictationController {
    provider: Arc<dyn SpeechProvider>,
}

impl DictationController {
    pub fn new(provider: Arc<dyn SpeechProvider>) -> Self {
        Self { provider }
    }

    /// Start a dictation session.
    ///
    /// Fails with [`DictationError::CapabilityUnavailable`] before any side
    /// effect when the provider reports the capability missing. The returned
    /// handle is the only way to stop the session.
    pub fn start(&self, callbacks: DictationCallbacks) -> Result<DictationHandle, DictationError> {
        if !self.provider.is_available() {
            return Err(DictationError::CapabilityUnavailable);
        }

        let state = Arc::new(Mutex::new(SessionState::started()));
        let observer = Box::new(SessionObserver {
            accumulator: TranscriptAccumulator::new(),
            state: state.clone(),
            callbacks,
        });

        let session = self.provider.start_session(observer)?;
        info!("Dictation session started");

        Ok(DictationHandle {
            session: Some(session),
            state,
        })
    }
}

/// Observer bridging provider events to the accumulator and callbacks.
struct SessionObserver {
    accumulator: TranscriptAccumulator,
    state: Arc<Mutex<SessionState>>,
    callbacks: DictationCallbacks,
}

impl RecognitionObserver for SessionObserver {
    fn on_event(&mut self, event: RecognitionEvent) {
        // An event dispatched before stop took effect is still honored,
        // so a trailing final result is not lost.
        if let Some(segment) = self.accumulator.commit(&event) {
            (self.callbacks.on_append)(segment);
        }
        // Interims in the same event still surface as live preview.
        if let Some(on_preview) = &self.callbacks.on_preview {
            if let Some(preview) = TranscriptAccumulator::live_preview(&event) {
                (on_preview)(preview);
            }
        }
    }

    fn on_error(&mut self, reason: String) {
        warn!("Speech recognition error: {}", reason);
        if let Ok(mut state) = self.state.lock() {
            state.recording = false;
        }
        (self.callbacks.on_error)(reason);
    }

    fn on_end(&mut self) {
        let manually_stopped = self
            .state
            .lock()
            .map(|mut state| {
                let was_manual = state.manually_stopped;
                state.recording = false;
                was_manual
            })
            .unwrap_or(false);
        if !manually_stopped {
            info!("Dictation session ended by recognition service");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::testing::ScriptedProvider;
    use crate::speech::{RecognitionEvent, RecognitionResult};
    use std::sync::Mutex as StdMutex;

    struct Recorded {
        appends: Arc<StdMutex<Vec<String>>>,
        previews: Arc<StdMutex<Vec<String>>>,
        errors: Arc<StdMutex<Vec<String>>>,
    }

    fn callbacks() -> (DictationCallbacks, Recorded) {
        let appends = Arc::new(StdMutex::new(Vec::new()));
        let previews = Arc::new(StdMutex::new(Vec::new()));
        let errors = Arc::new(StdMutex::new(Vec::new()));

        let appends_cb = appends.clone();
        let previews_cb = previews.clone();
        let errors_cb = errors.clone();

        let callbacks = DictationCallbacks {
            on_append: Arc::new(move |segment| appends_cb.lock().unwrap().push(segment)),
            on_preview: Some(Arc::new(move |text| previews_cb.lock().unwrap().push(text))),
            on_error: Arc::new(move |reason| errors_cb.lock().unwrap().push(reason)),
        };

        (
            callbacks,
            Recorded {
                appends,
                previews,
                errors,
            },
        )
    }

    fn final_event(index: usize, text: &str) -> RecognitionEvent {
        RecognitionEvent::new(vec![RecognitionResult::final_at(index, text)])
    }

    #[test]
    fn test_unavailable_capability_fails_without_side_effects() {
        let provider = ScriptedProvider::unavailable();
        let controller = DictationController::new(Arc::new(provider));
        let (cbs, recorded) = callbacks();

        let result = controller.start(cbs);
        assert!(matches!(result, Err(DictationError::CapabilityUnavailable)));
        assert!(recorded.appends.lock().unwrap().is_empty());
    }

    #[test]
    fn test_interim_then_final_appends_once() {
        let provider = ScriptedProvider::available();
        let controller = DictationController::new(Arc::new(provider.clone()));
        let (cbs, recorded) = callbacks();
        let _handle = controller.start(cbs).unwrap();

        provider.deliver(RecognitionEvent::new(vec![RecognitionResult::interim_at(
            0, "hello",
        )]));
        provider.deliver(final_event(0, "hello world"));

        assert_eq!(*recorded.appends.lock().unwrap(), vec!["hello world"]);
        assert_eq!(*recorded.previews.lock().unwrap(), vec!["hello"]);
    }

    #[test]
    fn test_redelivered_event_appends_nothing() {
        let provider = ScriptedProvider::available();
        let controller = DictationController::new(Arc::new(provider.clone()));
        let (cbs, recorded) = callbacks();
        let _handle = controller.start(cbs).unwrap();

        provider.deliver(final_event(0, "a"));
        provider.deliver(final_event(0, "a"));

        assert_eq!(recorded.appends.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_one_late_event_after_stop_is_honored() {
        let provider = ScriptedProvider::available();
        let controller = DictationController::new(Arc::new(provider.clone()));
        let (cbs, recorded) = callbacks();
        let mut handle = controller.start(cbs).unwrap();

        provider.deliver(final_event(0, "before stop"));
        handle.stop();
        assert!(!handle.is_recording());

        // In-flight event delivered after stop was requested.
        provider.deliver(final_event(1, "late"));
        provider.end();

        assert_eq!(
            *recorded.appends.lock().unwrap(),
            vec!["before stop", "late"]
        );
    }

    #[test]
    fn test_mixed_event_commits_and_previews() {
        let provider = ScriptedProvider::available();
        let controller = DictationController::new(Arc::new(provider.clone()));
        let (cbs, recorded) = callbacks();
        let _handle = controller.start(cbs).unwrap();

        provider.deliver(RecognitionEvent::new(vec![
            RecognitionResult::final_at(0, "done"),
            RecognitionResult::interim_at(1, "trailing"),
        ]));

        assert_eq!(*recorded.appends.lock().unwrap(), vec!["done"]);
        assert_eq!(*recorded.previews.lock().unwrap(), vec!["trailing"]);
    }

    #[test]
    fn test_stop_after_provider_end_is_clean() {
        let provider = ScriptedProvider::available();
        let controller = DictationController::new(Arc::new(provider.clone()));
        let (cbs, recorded) = callbacks();
        let mut handle = controller.start(cbs).unwrap();

        provider.end();
        assert!(!handle.is_recording());

        // Stop (and the eventual drop) after the provider already ended
        // the session is a quiet no-op.
        handle.stop();
        assert!(!handle.is_recording());
        assert!(recorded.errors.lock().unwrap().is_empty());
    }

    #[test]
    fn test_stop_is_idempotent() {
        let provider = ScriptedProvider::available();
        let controller = DictationController::new(Arc::new(provider));
        let (cbs, _recorded) = callbacks();
        let mut handle = controller.start(cbs).unwrap();

        handle.stop();
        handle.stop();
        assert!(!handle.is_recording());
    }

    #[test]
    fn test_new_session_resets_index_watermark() {
        let provider = ScriptedProvider::available();
        let controller = DictationController::new(Arc::new(provider.clone()));

        let (cbs, first) = callbacks();
        let mut handle = controller.start(cbs).unwrap();
        provider.deliver(final_event(5, "first session"));
        handle.stop();
        provider.end();

        let (cbs, second) = callbacks();
        let _handle = controller.start(cbs).unwrap();
        provider.deliver(final_event(0, "second session"));

        assert_eq!(*first.appends.lock().unwrap(), vec!["first session"]);
        assert_eq!(*second.appends.lock().unwrap(), vec!["second session"]);
    }

    #[test]
    fn test_recognition_failure_stops_session_and_reports() {
        let provider = ScriptedProvider::available();
        let controller = DictationController::new(Arc::new(provider.clone()));
        let (cbs, recorded) = callbacks();
        let handle = controller.start(cbs).unwrap();

        provider.fail("no audio");

        assert!(!handle.is_recording());
        assert_eq!(*recorded.errors.lock().unwrap(), vec!["no audio"]);
    }

    #[test]
    fn test_spontaneous_end_clears_recording_silently() {
        let provider = ScriptedProvider::available();
        let controller = DictationController::new(Arc::new(provider.clone()));
        let (cbs, recorded) = callbacks();
        let handle = controller.start(cbs).unwrap();

        provider.end();

        assert!(!handle.is_recording());
        assert!(recorded.errors.lock().unwrap().is_empty());
    }
}
