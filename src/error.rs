use thiserror::Error;

/// Backend API errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    #[error("Server error ({status}): {detail}")]
    Server { status: u16, detail: String },

    #[error("Not signed in")]
    NotAuthenticated,
}

/// Auth session persistence errors
#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("Could not find config directory")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid session data: {0}")]
    InvalidData(#[from] serde_json::Error),
}
