//! Journal entry editor state
//!
//! The state behind the entry-writing screen: the content buffer, optional
//! mood, and the voice recording wiring. Manual typing and dictation share
//! the same buffer — dictation only ever appends committed segments, so
//! edits made between recognition events are never clobbered.
//!
//! Draft state lives behind an `Arc<Mutex<...>>` shared with the dictation
//! callbacks, mirroring how the rest of the app shares session data.

use crate::api::{ApiClient, JournalEntry, JournalEntryCreate, MoodLevel};
use crate::dictation::{
    merge_committed, DictationCallbacks, DictationController, DictationError, DictationHandle,
};
use crate::error::ApiError;
use crate::preferences;
use crate::speech::SpeechProvider;
use crate::storage::{self, StorageError};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::info;

/// Errors surfaced by editor operations.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("cannot submit an empty entry")]
    EmptyDraft,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Mutable draft fields shared with dictation callbacks.
#[derive(Debug, Default)]
struct DraftState {
    content: String,
    mood: Option<MoodLevel>,
    /// Set once any dictation contributed to this draft.
    is_voice: bool,
    /// Transient interim text shown while recording; never committed.
    live_preview: Option<String>,
    /// User-visible message from the last recording failure.
    last_error: Option<String>,
}

/// Editor for one journal entry.
pub struct JournalEditor {
    state: Arc<Mutex<DraftState>>,
    controller: DictationController,
    handle: Option<DictationHandle>,
}

impl JournalEditor {
    pub fn new(provider: Arc<dyn SpeechProvider>) -> Self {
        Self {
            state: Arc::new(Mutex::new(DraftState::default())),
            controller: DictationController::new(provider),
            handle: None,
        }
    }

    /// Current draft content.
    pub fn content(&self) -> String {
        self.state
            .lock()
            .map(|s| s.content.clone())
            .unwrap_or_default()
    }

    /// Replace the draft content (manual typing). Safe while recording;
    /// the next committed segment appends to whatever is here.
    pub fn set_content(&self, content: &str) {
        if let Ok(mut state) = self.state.lock() {
            state.content = content.to_string();
        }
    }

    /// Character count shown under the text area.
    pub fn char_count(&self) -> usize {
        self.state
            .lock()
            .map(|s| s.content.chars().count())
            .unwrap_or(0)
    }

    pub fn mood(&self) -> Option<MoodLevel> {
        self.state.lock().map(|s| s.mood).unwrap_or(None)
    }

    pub fn set_mood(&self, mood: Option<MoodLevel>) {
        if let Ok(mut state) = self.state.lock() {
            state.mood = mood;
        }
    }

    /// Interim recognition text for live display, if any.
    pub fn live_preview(&self) -> Option<String> {
        self.state
            .lock()
            .map(|s| s.live_preview.clone())
            .unwrap_or(None)
    }

    /// User-visible message from the last recording failure, if any.
    pub fn last_error(&self) -> Option<String> {
        self.state
            .lock()
            .map(|s| s.last_error.clone())
            .unwrap_or(None)
    }

    /// Whether a recording session is currently active.
    pub fn is_recording(&self) -> bool {
        self.handle
            .as_ref()
            .map(DictationHandle::is_recording)
            .unwrap_or(false)
    }

    /// Start voice input for this draft.
    ///
    /// Refuses a second concurrent session. On `CapabilityUnavailable` the
    /// error message is also recorded on the draft so the UI can show it.
    pub fn start_voice(&mut self) -> Result<(), DictationError> {
        if let Some(handle) = &self.handle {
            if handle.is_recording() {
                return Err(DictationError::SessionActive);
            }
            // The provider ended or failed that session on its own;
            // retrying is allowed, so the stale handle is discarded.
            self.handle = None;
        }

        let append_state = self.state.clone();
        let error_state = self.state.clone();
        let on_preview = preferences::get_show_live_preview().then(|| {
            let preview_state = self.state.clone();
            Arc::new(move |text: String| {
                if let Ok(mut draft) = preview_state.lock() {
                    draft.live_preview = Some(text);
                }
            }) as Arc<dyn Fn(String) + Send + Sync>
        });

        let callbacks = DictationCallbacks {
            on_append: Arc::new(move |segment| {
                if let Ok(mut draft) = append_state.lock() {
                    draft.content = merge_committed(&draft.content, &segment);
                    draft.live_preview = None;
                }
            }),
            on_preview,
            on_error: Arc::new(move |reason| {
                if let Ok(mut draft) = error_state.lock() {
                    draft.last_error = Some(format!("Voice recording error: {}", reason));
                    draft.live_preview = None;
                }
            }),
        };

        match self.controller.start(callbacks) {
            Ok(handle) => {
                self.handle = Some(handle);
                if let Ok(mut state) = self.state.lock() {
                    state.is_voice = true;
                    state.last_error = None;
                }
                Ok(())
            }
            Err(e) => {
                if let Ok(mut state) = self.state.lock() {
                    state.last_error = Some(e.to_string());
                }
                Err(e)
            }
        }
    }

    /// Stop voice input. Safe to call when not recording.
    pub fn stop_voice(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            handle.stop();
        }
        if let Ok(mut state) = self.state.lock() {
            state.live_preview = None;
        }
    }

    /// Save the draft locally so it can be recovered later.
    pub fn save_draft(&self) -> Result<PathBuf, StorageError> {
        storage::save_draft(&self.content())
    }

    /// Replace the draft content with the most recently saved local
    /// draft. Returns whether one was found.
    pub fn restore_latest_draft(&self) -> Result<bool, StorageError> {
        match storage::latest_draft()? {
            Some((_, content)) => {
                self.set_content(&content);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Submit the trimmed draft to the backend.
    pub async fn submit(&self, api: &ApiClient) -> Result<JournalEntry, EditorError> {
        let payload = {
            let state = match self.state.lock() {
                Ok(state) => state,
                Err(poisoned) => poisoned.into_inner(),
            };
            let content = state.content.trim();
            if content.is_empty() {
                return Err(EditorError::EmptyDraft);
            }
            JournalEntryCreate {
                content: content.to_string(),
                mood: state.mood,
                tags: None,
                is_voice: state.is_voice,
            }
        };

        let entry = api.create_entry(&payload).await?;
        info!("Journal entry saved: {}", entry.id);
        Ok(entry)
    }
}

impl Drop for JournalEditor {
    fn drop(&mut self) {
        self.stop_voice();
    }
}
