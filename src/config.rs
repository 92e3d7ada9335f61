//! Client configuration
//!
//! Sources, lowest to highest priority:
//! 1. Defaults
//! 2. JSON config file (optional)
//! 3. `.env` files in the working directory and the home directory (via dotenvy)
//! 4. Process environment
//!
//! Command-line flags are applied on top by the CLI.

use crate::error::{Error, Result, ResultExt};
use crate::http::{default_user_agent, HttpClientConfig};
use crate::types::OptionStringExt;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Production API endpoint
pub const DEFAULT_BASE_URL: &str = "https://monitoringapi.solaredge.com";

/// API key variable
pub const API_KEY_VAR: &str = "SOLAREDGE_API_KEY";
/// API key variable read by older deployments
pub const LEGACY_API_KEY_VAR: &str = "solaredge_apikey";
pub const BASE_URL_VAR: &str = "SOLAREDGE_BASE_URL";
pub const TIMEOUT_VAR: &str = "SOLAREDGE_TIMEOUT_SECS";

/// Settings needed to open an API session
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Account API key; a missing key is reported when the session starts
    pub api_key: Option<String>,

    /// Base URL of the monitoring API
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// User agent string
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 60,
            user_agent: default_user_agent(),
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ClientConfig {
    /// Config with only an API key set
    pub fn with_api_key(key: impl Into<String>) -> Self {
        Self {
            api_key: Some(key.into()),
            ..Self::default()
        }
    }

    /// Read a JSON config file; absent keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&content)
            .map_err(|e| Error::config(format!("Invalid config file {}: {e}", path.display())))
    }

    /// Load from every source: file (if given), `.env` files, environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                tracing::info!("Loading configuration from: {}", path.display());
                Self::from_file(path)?
            }
            None => Self::default(),
        };

        // Missing .env files are fine; variables already set are kept
        let _ = dotenvy::dotenv();
        if let Some(home_env) = home_env_file() {
            let _ = dotenvy::from_path(home_env);
        }

        config.apply_env(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Overlay values from an environment lookup
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).none_if_blank();

        if let Some(key) = non_empty(API_KEY_VAR).or_else(|| non_empty(LEGACY_API_KEY_VAR)) {
            self.api_key = Some(key);
        }
        if let Some(url) = non_empty(BASE_URL_VAR) {
            self.base_url = url;
        }
        if let Some(secs) = non_empty(TIMEOUT_VAR) {
            self.timeout_secs = secs
                .parse()
                .map_err(|_| Error::config(format!("{TIMEOUT_VAR} must be a whole number of seconds, got '{secs}'")))?;
        }
        Ok(())
    }

    /// Parsed base URL
    pub fn base_url(&self) -> Result<Url> {
        Url::parse(&self.base_url)
            .map_err(|e| Error::config(format!("Invalid base URL '{}': {e}", self.base_url)))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Transport settings derived from this config
    pub fn http_config(&self) -> HttpClientConfig {
        HttpClientConfig::builder()
            .timeout(self.timeout())
            .user_agent(self.user_agent.clone())
            .build()
    }
}

fn home_env_file() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".env"))
}
