//! Local storage module for journal drafts
//!
//! Saves unsubmitted drafts to the user's Documents folder (or a custom
//! location from preferences) and reloads them later, so an entry written
//! while offline can be recovered into the editor instead of being lost.

use crate::preferences;
use chrono::Local;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Filename prefix distinguishing drafts from anything else a user drops
/// into the directory.
const DRAFT_PREFIX: &str = "draft-";

/// Get the Mindscribe drafts directory
///
/// Returns the custom location from preferences if set,
/// otherwise returns the default location in Documents.
pub fn drafts_dir() -> Option<PathBuf> {
    // Check for custom location in preferences first
    if let Some(custom) = preferences::get_draft_location() {
        return Some(custom);
    }
    // Fall back to default location
    preferences::default_draft_location()
}

/// Ensure the drafts directory exists
pub fn ensure_drafts_dir() -> Result<PathBuf, StorageError> {
    let dir = drafts_dir().ok_or(StorageError::NoDocumentsDir)?;

    if !dir.exists() {
        fs::create_dir_all(&dir).map_err(|e| StorageError::CreateDirectory {
            path: dir.clone(),
            source: e,
        })?;
        info!("Created drafts directory: {:?}", dir);
    }

    Ok(dir)
}

/// Save a draft to a file
///
/// Returns the path to the saved file
pub fn save_draft(content: &str) -> Result<PathBuf, StorageError> {
    if content.trim().is_empty() {
        return Err(StorageError::EmptyDraft);
    }

    let dir = ensure_drafts_dir()?;

    // Generate filename with timestamp
    let timestamp = Local::now().format("%Y-%m-%d-%H-%M-%S");
    let filename = format!("{}{}.md", DRAFT_PREFIX, timestamp);
    let filepath = dir.join(&filename);

    let mut file = fs::File::create(&filepath).map_err(|e| StorageError::CreateFile {
        path: filepath.clone(),
        source: e,
    })?;

    file.write_all(content.as_bytes())
        .map_err(|e| StorageError::WriteFile {
            path: filepath.clone(),
            source: e,
        })?;

    file.flush().map_err(|e| StorageError::WriteFile {
        path: filepath.clone(),
        source: e,
    })?;

    info!("Saved draft to: {:?}", filepath);
    Ok(filepath)
}

/// List saved drafts, newest first
///
/// An absent drafts directory means no drafts, not an error.
pub fn list_drafts() -> Result<Vec<PathBuf>, StorageError> {
    let dir = drafts_dir().ok_or(StorageError::NoDocumentsDir)?;
    list_drafts_in(&dir)
}

fn list_drafts_in(dir: &Path) -> Result<Vec<PathBuf>, StorageError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(dir).map_err(|e| StorageError::ReadDirectory {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut drafts: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            let is_markdown = path.extension().is_some_and(|ext| ext == "md");
            let is_draft = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(DRAFT_PREFIX));
            is_markdown && is_draft
        })
        .collect();

    // Timestamped filenames sort chronologically.
    drafts.sort();
    drafts.reverse();
    Ok(drafts)
}

/// Load a saved draft's content
pub fn load_draft(path: &Path) -> Result<String, StorageError> {
    fs::read_to_string(path).map_err(|e| StorageError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load the most recently saved draft, if any
pub fn latest_draft() -> Result<Option<(PathBuf, String)>, StorageError> {
    let Some(path) = list_drafts()?.into_iter().next() else {
        return Ok(None);
    };
    let content = load_draft(&path)?;
    Ok(Some((path, content)))
}

/// Storage errors with contextual information
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Could not find Documents directory")]
    NoDocumentsDir,

    #[error("Draft is empty")]
    EmptyDraft,

    #[error("Failed to create directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read directory {path}: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create file {path}: {source}")]
    CreateFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write to file {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
