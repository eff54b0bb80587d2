//! Settings loading for `~/.seadog/config.yaml` and credential resolution.

use std::fmt;
use std::path::{Path, PathBuf};

/// Base URL of the hosted API. Endpoint names are appended to it.
pub const DEFAULT_BASE_URL: &str = "https://api.mendable.ai/v0";

/// API section (api_key, base_url).
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct ApiSection {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

/// Full settings file.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiSection,
}

/// Opaque API key. Never printed in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wraps a key; blank input yields `None`.
    pub fn new(key: impl Into<String>) -> Option<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            None
        } else {
            Some(Self(key))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Everything the core needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: ApiKey,
    pub base_url: String,
}

impl Settings {
    /// Merge explicit values (flags or environment) over the file.
    /// Explicit values win; a missing key from every source is an error.
    pub fn resolve(
        config: &Config,
        api_key: Option<String>,
        base_url: Option<String>,
    ) -> Result<Self, ConfigError> {
        let api_key = api_key
            .and_then(ApiKey::new)
            .or_else(|| config.api.api_key.clone().and_then(ApiKey::new))
            .ok_or(ConfigError::MissingApiKey)?;
        let base_url = base_url
            .filter(|u| !u.trim().is_empty())
            .or_else(|| config.api.base_url.clone())
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Ok(Self { api_key, base_url })
    }
}

/// Returns the default settings path: `~/.seadog/config.yaml` (platform-specific).
pub fn default_config_path() -> Option<PathBuf> {
    let home = home_dir()?;
    Some(home.join(".seadog").join("config.yaml"))
}

#[cfg(unix)]
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

#[cfg(windows)]
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("USERPROFILE").map(PathBuf::from)
}

#[cfg(not(any(unix, windows)))]
fn home_dir() -> Option<PathBuf> {
    None
}

/// Load settings from a YAML file.
pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&contents)?)
}

/// Like [`load`], but a missing file yields the default settings.
pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
    match load(path) {
        Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            Ok(Config::default())
        }
        other => other,
    }
}

/// Settings load or resolution error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("no API key: set MENDABLE_API_KEY (environment or .env) or api.api_key in the settings file")]
    MissingApiKey,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(api_key: Option<&str>, base_url: Option<&str>) -> Config {
        Config {
            api: ApiSection {
                api_key: api_key.map(String::from),
                base_url: base_url.map(String::from),
            },
        }
    }

    #[test]
    fn explicit_key_wins_over_file() {
        let cfg = config_with(Some("file-key"), None);
        let settings = Settings::resolve(&cfg, Some("env-key".into()), None).unwrap();
        assert_eq!(settings.api_key.expose(), "env-key");
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn blank_explicit_key_falls_back_to_file() {
        let cfg = config_with(Some("file-key"), Some("http://localhost:9"));
        let settings = Settings::resolve(&cfg, Some("  ".into()), None).unwrap();
        assert_eq!(settings.api_key.expose(), "file-key");
        assert_eq!(settings.base_url, "http://localhost:9");
    }

    #[test]
    fn blank_base_url_in_file_uses_default() {
        let cfg = config_with(Some("file-key"), Some(""));
        let settings = Settings::resolve(&cfg, None, None).unwrap();
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn missing_key_is_an_error() {
        let err = Settings::resolve(&Config::default(), None, None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
    }

    #[test]
    fn debug_output_hides_key() {
        let key = ApiKey::new("secret").unwrap();
        assert_eq!(format!("{:?}", key), "ApiKey(***)");
    }
}
