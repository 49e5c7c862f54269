//! Widget Configuration
//!
//! Where the widget sends its messages. Values are layered, later layers
//! winning:
//!
//! 1. Built-in default ([`DEFAULT_ENDPOINT`])
//! 2. TOML file (`$XDG_CONFIG_HOME/chat-widget/config.toml`, or an explicit path)
//! 3. Environment (`CHAT_WIDGET_ENDPOINT`)
//! 4. Command-line overrides
//!
//! ```toml
//! endpoint = "http://localhost:8000/chat"
//! ```

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

/// Endpoint used when nothing else is configured
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/chat";

/// Environment variable overriding the endpoint
pub const ENDPOINT_ENV_VAR: &str = "CHAT_WIDGET_ENDPOINT";

/// Errors while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file exists but could not be read
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// The config file is not valid TOML for this schema
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: toml::de::Error,
    },

    /// The endpoint is not an absolute http(s) URL
    #[error("invalid endpoint {endpoint:?} (from {source_layer}): {reason}")]
    InvalidEndpoint {
        /// The rejected value
        endpoint: String,
        /// Which layer supplied it
        source_layer: ConfigSource,
        /// Why it was rejected
        reason: String,
    },
}

/// Which configuration layer supplied a value
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Built-in default
    #[default]
    Default,
    /// A TOML file
    File(PathBuf),
    /// An environment variable
    Environment,
    /// A command-line flag
    CommandLine,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File(path) => write!(f, "file {}", path.display()),
            ConfigSource::Environment => write!(f, "${ENDPOINT_ENV_VAR}"),
            ConfigSource::CommandLine => write!(f, "command line"),
        }
    }
}

/// On-disk shape of the config file; every key optional
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    endpoint: Option<String>,
}

/// Overrides supplied by the caller (typically parsed CLI flags)
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// Explicit config file; must exist when set
    pub config_path: Option<PathBuf>,
    /// Endpoint taking precedence over every other layer
    pub endpoint: Option<String>,
}

/// Resolved widget configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WidgetConfig {
    /// Full URL of the chat endpoint
    pub endpoint: String,
    /// Layer that supplied `endpoint`
    pub endpoint_source: ConfigSource,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            endpoint_source: ConfigSource::Default,
        }
    }
}

impl WidgetConfig {
    /// Apply the environment layer
    #[must_use]
    pub fn with_env(self) -> Self {
        self.with_env_value(std::env::var(ENDPOINT_ENV_VAR).ok())
    }

    fn with_env_value(mut self, value: Option<String>) -> Self {
        if let Some(endpoint) = value.filter(|v| !v.trim().is_empty()) {
            self.endpoint = endpoint.trim().to_string();
            self.endpoint_source = ConfigSource::Environment;
        }
        self
    }

    /// Apply command-line overrides
    #[must_use]
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(ref endpoint) = overrides.endpoint {
            self.endpoint = endpoint.trim().to_string();
            self.endpoint_source = ConfigSource::CommandLine;
        }
        self
    }

    /// Check that the endpoint is an absolute http(s) URL with a host
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEndpoint`] naming the offending layer.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidEndpoint {
            endpoint: self.endpoint.clone(),
            source_layer: self.endpoint_source.clone(),
            reason,
        };

        let url = reqwest::Url::parse(&self.endpoint)
            .map_err(|e| invalid(format!("not a valid URL: {e}")))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!(
                "scheme must be http or https, not {}",
                url.scheme()
            )));
        }
        if url.host_str().map_or(true, str::is_empty) {
            return Err(invalid("missing host".to_string()));
        }
        Ok(())
    }
}

/// Default config file location (`$XDG_CONFIG_HOME/chat-widget/config.toml`)
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("chat-widget").join("config.toml"))
}

/// Load the file layer from `path` on top of the defaults
///
/// # Errors
///
/// Fails if the file cannot be read or parsed.
pub fn load_config_from_path(path: &Path) -> Result<WidgetConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let file: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let mut config = WidgetConfig::default();
    if let Some(endpoint) = file.endpoint {
        config.endpoint = endpoint.trim().to_string();
        config.endpoint_source = ConfigSource::File(path.to_path_buf());
    }
    debug!(path = %path.display(), "Loaded config file");
    Ok(config)
}

/// Resolve the full configuration: defaults, file, environment, overrides
///
/// A missing default config file is skipped; a missing explicit
/// `config_path` is an error.
///
/// # Errors
///
/// Fails on unreadable or malformed files, or an invalid final endpoint.
pub fn load_config(overrides: &ConfigOverrides) -> Result<WidgetConfig, ConfigError> {
    let base = match (&overrides.config_path, default_config_path()) {
        (Some(path), _) => load_config_from_path(path)?,
        (None, Some(path)) if path.exists() => load_config_from_path(&path)?,
        _ => WidgetConfig::default(),
    };

    let config = base.with_env().with_overrides(overrides);
    config.validate()?;

    info!(endpoint = %config.endpoint, source = %config.endpoint_source, "Configuration resolved");
    Ok(config)
}
