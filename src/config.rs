//! Service URL resolution.
//!
//! The base URL comes from, in order: an explicit value, the `DKG_REST_URL`
//! environment variable, then the `rest_url` key of the config file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{DkgError, Result};

/// Environment variable holding the service base URL
pub const REST_URL_ENV: &str = "DKG_REST_URL";

/// Environment variable overriding the config file location
pub const CONFIG_PATH_ENV: &str = "DKG_CONFIG";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Persisted configuration file contents
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ConfigFile {
    /// Base URL of the knowledge graph REST service
    pub rest_url: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,
}

impl ConfigFile {
    /// Load a config file, returning `None` if it does not exist
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| DkgError::ConfigurationInvalid {
            origin: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config = toml::from_str(&content).map_err(|e| DkgError::ConfigurationInvalid {
            origin: path.display().to_string(),
            message: e.to_string(),
        })?;

        Ok(Some(config))
    }
}

/// Default location of the config file: `<config dir>/dkg/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("dkg")
        .join("config.toml")
}

/// Pick the base URL from the three sources, first non-blank value wins
pub fn resolve_base_url(
    explicit: Option<&str>,
    env: Option<&str>,
    file: Option<&str>,
) -> Option<String> {
    [explicit, env, file]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|url| !url.is_empty())
        .map(|url| url.trim_end_matches('/').to_string())
}

/// Raw values gathered from the environment and config file
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    pub env_url: Option<String>,
    pub file: Option<ConfigFile>,
    pub config_path: PathBuf,
}

impl ConfigSources {
    /// Read `DKG_REST_URL` and the config file (`DKG_CONFIG` or the default path)
    pub fn from_environment() -> Result<Self> {
        let config_path = std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(default_config_path);

        Ok(Self {
            env_url: std::env::var(REST_URL_ENV).ok(),
            file: ConfigFile::load(&config_path)?,
            config_path,
        })
    }

    /// Build a client configuration with an optional explicit URL taking precedence
    pub fn resolve(&self, explicit: Option<&str>) -> Result<ClientConfig> {
        let file_url = self.file.as_ref().and_then(|f| f.rest_url.as_deref());
        let base_url = resolve_base_url(explicit, self.env_url.as_deref(), file_url).ok_or_else(
            || DkgError::ConfigurationMissing {
                env_var: REST_URL_ENV,
                config_path: self.config_path.display().to_string(),
            },
        )?;

        Ok(ClientConfig {
            base_url,
            timeout: self.timeout(),
        })
    }

    /// Timeout from the config file, or the default
    pub fn timeout(&self) -> Duration {
        self.file
            .as_ref()
            .and_then(|f| f.timeout_secs)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT)
    }
}

/// Configuration for a `WebClient`
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Service base URL without a trailing slash
    pub base_url: String,
    /// Upper bound on each request
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolve from an explicit URL, the environment, then the config file.
    /// A non-blank explicit URL is used as is; the config file is not read.
    pub fn resolve(explicit: Option<&str>) -> Result<Self> {
        match resolve_base_url(explicit, None, None) {
            Some(base_url) => Ok(Self::new(base_url)),
            None => ConfigSources::from_environment()?.resolve(None),
        }
    }
}

/// Serialises tests that set `DKG_REST_URL` and `DKG_CONFIG`
#[cfg(test)]
pub(crate) fn lock_env(
    rest_url: Option<&str>,
    config_path: &Path,
) -> std::sync::MutexGuard<'static, ()> {
    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    let guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    match rest_url {
        Some(url) => std::env::set_var(REST_URL_ENV, url),
        None => std::env::remove_var(REST_URL_ENV),
    }
    std::env::set_var(CONFIG_PATH_ENV, config_path);
    guard
}
