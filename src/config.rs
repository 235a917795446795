//! Application configuration
//!
//! Configuration ships embedded in `config.toml` and can be overridden at
//! runtime through the environment (a `.env` file is honored). Loaded once
//! and cached for the lifetime of the process.

use anyhow::Context;
use once_cell::sync::OnceCell;
use serde::Deserialize;
use tracing::info;

static CONFIG: OnceCell<Config> = OnceCell::new();

/// Environment variable overriding the API base URL.
const API_URL_ENV: &str = "MINDSCRIBE_API_URL";

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
}

/// Backend API settings
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Config {
    /// Load configuration from the embedded `config.toml`, applying any
    /// environment overrides.
    pub fn load() -> anyhow::Result<Config> {
        const CONFIG_TOML: &str = include_str!("../config.toml");
        let mut config: Config =
            toml::from_str(CONFIG_TOML).context("failed to parse embedded config.toml")?;

        // .env is optional; absence is not an error.
        let _ = dotenvy::dotenv();

        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.is_empty() {
                info!("API base URL overridden from environment: {}", url);
                config.api.base_url = url;
            }
        }

        Ok(config)
    }

    /// Global accessor, loading on first use.
    pub fn get() -> anyhow::Result<&'static Config> {
        CONFIG.get_or_try_init(Config::load)
    }
}
