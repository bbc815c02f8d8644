//! Push configuration with YAML support
//!
//! The configuration holds the shared secret and API version used by every
//! push. It is read-only once built: either hand an `Arc<Configuration>` to
//! each [`PushClient`](crate::PushClient), or [`install`](Configuration::install)
//! one process-wide configuration at startup.
//!
//! ```yaml
//! api_key: "secret"
//! api_version: "v1"                         # optional
//! base_url: "https://push.geckoboard.com"   # optional
//! ```

use std::fmt;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Result;

/// Default push API version
pub const DEFAULT_API_VERSION: &str = "v1";
/// Default push endpoint
pub const DEFAULT_BASE_URL: &str = "https://push.geckoboard.com";

static INSTALLED: OnceLock<Arc<Configuration>> = OnceLock::new();

/// Push configuration
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// Shared secret sent with every push
    #[serde(default)]
    pub api_key: String,

    /// API version path segment (default: v1)
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Base URL of the push service
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_version: default_api_version(),
            base_url: default_base_url(),
        }
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let api_key = if self.api_key.is_empty() {
            "<unset>"
        } else {
            "<redacted>"
        };
        f.debug_struct("Configuration")
            .field("api_key", &api_key)
            .field("api_version", &self.api_version)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Configuration {
    /// Create a configuration with the default version and endpoint
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Create a builder for programmatic configuration
    pub fn builder(api_key: impl Into<String>) -> ConfigurationBuilder {
        ConfigurationBuilder::new(api_key)
    }

    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> std::result::Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string
    pub fn from_yaml(yaml: &str) -> std::result::Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Parse configuration from JSON string
    pub fn from_json(json: &str) -> std::result::Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Serialize configuration to YAML
    pub fn to_yaml(&self) -> std::result::Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::SerializeError(e.to_string()))
    }

    /// Whether a non-empty API key is present
    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// API version, falling back to [`DEFAULT_API_VERSION`] when empty
    pub fn api_version(&self) -> &str {
        if self.api_version.is_empty() {
            DEFAULT_API_VERSION
        } else {
            &self.api_version
        }
    }

    /// Resolve the push URL for a widget: `{base_url}/{api_version}/send/{widget_key}`
    ///
    /// The widget key is encoded as a single path segment.
    pub fn send_url(&self, widget_key: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend([self.api_version(), "send", widget_key]);
        Ok(url)
    }

    /// Install this configuration as the process-wide default
    ///
    /// May be called once; later calls fail with [`ConfigError::AlreadySet`].
    pub fn install(self) -> std::result::Result<Arc<Configuration>, ConfigError> {
        let config = Arc::new(self);
        INSTALLED
            .set(Arc::clone(&config))
            .map_err(|_| ConfigError::AlreadySet)?;
        Ok(config)
    }

    /// The process-wide configuration, if one was installed
    pub fn installed() -> Option<Arc<Configuration>> {
        INSTALLED.get().cloned()
    }
}

/// Builder for Configuration
pub struct ConfigurationBuilder {
    config: Configuration,
}

impl ConfigurationBuilder {
    /// Create a new builder with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            config: Configuration::new(api_key),
        }
    }

    /// Set the API version path segment
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.config.api_version = version.into();
        self
    }

    /// Set the base URL of the push service
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Build the configuration
    pub fn build(self) -> Configuration {
        self.config
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),

    #[error("Configuration already installed")]
    AlreadySet,
}
