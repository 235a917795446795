//! User preferences storage
//!
//! Handles saving and loading user preferences to a JSON file
//! in the application support directory.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::{error, info};

/// User preferences
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Preferences {
    /// Language code for speech recognition (e.g., "en", "no", "de")
    /// Defaults to "en" (English) if not set
    pub language_code: Option<String>,
    /// Custom draft storage location (None = use default)
    pub draft_location: Option<PathBuf>,
    /// Whether to surface interim recognition text as a live preview
    /// while recording (defaults to true)
    pub show_live_preview: Option<bool>,
}

/// Get the preferences file path
fn preferences_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("Mindscribe").join("preferences.json"))
}

/// Load preferences from disk
///
/// Returns default preferences if the file doesn't exist or can't be read
pub fn load_preferences() -> Preferences {
    let Some(path) = preferences_path() else {
        return Preferences::default();
    };

    if !path.exists() {
        return Preferences::default();
    }

    match fs::read_to_string(&path) {
        Ok(contents) => match serde_json::from_str(&contents) {
            Ok(prefs) => prefs,
            Err(e) => {
                error!("Failed to parse preferences: {}", e);
                Preferences::default()
            }
        },
        Err(e) => {
            error!("Failed to read preferences file: {}", e);
            Preferences::default()
        }
    }
}

/// Save preferences to disk
pub fn save_preferences(prefs: &Preferences) -> Result<(), PreferencesError> {
    let path = preferences_path().ok_or(PreferencesError::NoConfigDir)?;

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
            info!("Created preferences directory: {:?}", parent);
        }
    }

    let json = serde_json::to_string_pretty(prefs)?;
    fs::write(&path, json)?;
    info!("Saved preferences to: {:?}", path);

    Ok(())
}

/// Get the language code for speech recognition
/// Returns "en" (English) if not set
pub fn get_language_code() -> String {
    load_preferences()
        .language_code
        .unwrap_or_else(|| "en".to_string())
}

/// Set the language code for speech recognition
pub fn set_language_code(code: &str) -> Result<(), PreferencesError> {
    let mut prefs = load_preferences();
    prefs.language_code = Some(code.to_string());
    save_preferences(&prefs)
}

/// Get the custom draft location, if set
pub fn get_draft_location() -> Option<PathBuf> {
    load_preferences().draft_location
}

/// Set a custom draft location
pub fn set_draft_location(path: Option<PathBuf>) -> Result<(), PreferencesError> {
    let mut prefs = load_preferences();
    prefs.draft_location = path;
    save_preferences(&prefs)
}

/// Drafts directory under a documents root
pub(crate) fn draft_location_under(base: PathBuf) -> PathBuf {
    base.join("Mindscribe").join("drafts")
}

/// Get the default draft location path for display
///
/// None when the platform reports no Documents directory.
pub fn default_draft_location() -> Option<PathBuf> {
    dirs::document_dir().map(draft_location_under)
}

/// Default live preview setting (enabled)
const DEFAULT_SHOW_LIVE_PREVIEW: bool = true;

/// Get the live preview setting
pub fn get_show_live_preview() -> bool {
    load_preferences()
        .show_live_preview
        .unwrap_or(DEFAULT_SHOW_LIVE_PREVIEW)
}

/// Set the live preview setting
pub fn set_show_live_preview(enabled: bool) -> Result<(), PreferencesError> {
    let mut prefs = load_preferences();
    prefs.show_live_preview = Some(enabled);
    save_preferences(&prefs)
}

/// Preferences errors
#[derive(Debug, thiserror::Error)]
pub enum PreferencesError {
    #[error("Could not find config directory")]
    NoConfigDir,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
