//! Auth session persistence
//!
//! Stores the signed-in user's access token and profile as JSON in the
//! platform config directory, so the app stays signed in across launches.
//! Token bytes are zeroized when the session is dropped.

use crate::api::User;
use crate::error::SessionStoreError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::{error, info};
use zeroize::Zeroize;

/// A persisted sign-in: token plus the profile it belongs to.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthSession {
    access_token: String,
    pub user: User,
}

impl AuthSession {
    pub fn new(access_token: &str, user: User) -> Self {
        Self {
            access_token: access_token.to_string(),
            user,
        }
    }

    pub fn token(&self) -> &str {
        &self.access_token
    }
}

impl Drop for AuthSession {
    fn drop(&mut self) {
        self.access_token.zeroize();
    }
}

/// Get the session file path
fn session_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("Mindscribe").join("session.json"))
}

/// Load the persisted session from disk, if one exists.
pub fn load_session() -> Option<AuthSession> {
    let path = session_path()?;
    if !path.exists() {
        return None;
    }

    match fs::read_to_string(&path) {
        Ok(contents) => match serde_json::from_str(&contents) {
            Ok(session) => Some(session),
            Err(e) => {
                error!("Failed to parse stored session: {}", e);
                None
            }
        },
        Err(e) => {
            error!("Failed to read session file: {}", e);
            None
        }
    }
}

/// Persist the session to disk.
pub fn save_session(session: &AuthSession) -> Result<(), SessionStoreError> {
    let path = session_path().ok_or(SessionStoreError::NoConfigDir)?;

    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
            info!("Created session directory: {:?}", parent);
        }
    }

    let json = serde_json::to_string_pretty(session)?;
    fs::write(&path, json)?;
    info!("Saved session for {}", session.user.email);

    Ok(())
}

/// Remove the persisted session (sign out).
pub fn clear_session() -> Result<(), SessionStoreError> {
    let Some(path) = session_path() else {
        return Ok(());
    };
    if path.exists() {
        fs::remove_file(&path)?;
        info!("Cleared stored session");
    }
    Ok(())
}
