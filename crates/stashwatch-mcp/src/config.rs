//! Server configuration.
//!
//! Layering, lowest to highest precedence: built-in defaults, a TOML file,
//! then the URL override (the `--url` flag or `LOGSTASH_API_BASE`, resolved
//! by the binary).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use stashwatch_client::{DEFAULT_LOGSTASH_URL, validate_base_url};
use stashwatch_core::{Error, Result};
use stashwatch_diag::Thresholds;

/// Application directory under the platform config dir.
pub const CONFIG_DIR_NAME: &str = "stashwatch";

/// Config file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Everything the server needs to start.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the Logstash monitoring API.
    pub logstash_url: String,
    /// Connectivity probe timeout, seconds.
    pub probe_timeout_secs: u64,
    /// Timeout for every other upstream call, seconds.
    pub request_timeout_secs: u64,
    /// Diagnostic cut-offs.
    pub thresholds: Thresholds,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            logstash_url: DEFAULT_LOGSTASH_URL.to_string(),
            probe_timeout_secs: 5,
            request_timeout_secs: 30,
            thresholds: Thresholds::default(),
        }
    }
}

impl ServerConfig {
    /// `<config dir>/stashwatch/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, the default path is read
    /// when present and built-in defaults are used otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(path) => Self::from_file(&path),
                None => Ok(Self::default()),
            },
        }
    }

    /// Parse a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("cannot read {}: {e}", path.display()))
        })?;
        tracing::debug!(path = %path.display(), "Loaded config file");
        Self::from_toml_str(&content)
    }

    /// Parse TOML text. Missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(e.to_string()))
    }

    /// Replace the URL when an override is given.
    pub fn with_url_override(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            self.logstash_url = url;
        }
        self
    }

    /// Check the URL scheme, timeouts and thresholds.
    pub fn validate(&self) -> Result<()> {
        validate_base_url(&self.logstash_url)?;
        if self.probe_timeout_secs == 0 {
            return Err(Error::config("probe_timeout_secs must be greater than 0"));
        }
        if self.request_timeout_secs == 0 {
            return Err(Error::config("request_timeout_secs must be greater than 0"));
        }
        self.thresholds.validate()
    }
}
