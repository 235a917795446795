#![deny(clippy::all)]

//! Client core for the Mindscribe voice journaling app.
//!
//! This crate is the headless half of the journaling client: dictation
//! accumulation, journal draft state, the backend API client, auth session
//! persistence, preferences, and local draft storage. A UI shell embeds it
//! and renders on top.

pub mod api;
pub mod config;
pub mod dictation;
pub mod editor;
pub mod error;
pub mod history;
pub mod preferences;
pub mod session;
pub mod speech;
pub mod storage;

pub use api::ApiClient;
pub use dictation::{DictationCallbacks, DictationController, DictationHandle};
pub use editor::JournalEditor;
pub use error::ApiError;
pub use speech::{RecognitionEvent, RecognitionResult, SpeechProvider};
