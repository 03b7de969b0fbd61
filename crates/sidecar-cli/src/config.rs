use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sidecar_client::Format;

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default = "default_beacon_url")]
    pub beacon_url: String,
    /// Only needed by `compare`.
    #[serde(default)]
    pub archiver_url: Option<String>,
    #[serde(default)]
    pub format: Format,
    /// Transport timeout; `0` disables it.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            beacon_url: default_beacon_url(),
            archiver_url: None,
            format: Format::default(),
            timeout_secs: default_timeout_secs(),
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Build the shared HTTP transport. Every client made from it inherits
    /// the configured timeout.
    pub fn http_client(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder().user_agent("blob-sidecar-fetcher");
        if self.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(self.timeout_secs));
        }
        builder.build().context("failed to build HTTP client")
    }
}

fn default_beacon_url() -> String {
    "http://localhost:5052".into()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".into()
}

/// Config file path: `~/.config/blob-sidecar-fetcher/config.toml`
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("blob-sidecar-fetcher").join("config.toml"))
}

pub fn parse_config(contents: &str) -> Result<AppConfig> {
    toml::from_str(contents).context("invalid config")
}

/// Load config from an explicit path, or from the default location.
///
/// An explicit path must exist and parse. The default location falls back
/// to built-in defaults when missing or unparsable.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig> {
    if let Some(path) = explicit {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        return parse_config(&contents).with_context(|| format!("in {}", path.display()));
    }

    if let Some(path) = config_path()
        && let Ok(contents) = std::fs::read_to_string(&path)
    {
        if let Ok(config) = parse_config(&contents) {
            return Ok(config);
        }
        // Logging is not up yet; this runs before the subscriber exists.
        eprintln!(
            "warning: failed to parse config at {}, using defaults",
            path.display()
        );
    }

    Ok(AppConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.beacon_url, "http://localhost:5052");
        assert_eq!(config.format, Format::Json);
        assert_eq!(config.timeout_secs, 30);
        assert!(config.archiver_url.is_none());
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
beacon_url = "http://beacon:5052"
archiver_url = "http://archiver:8000"
format = "ssz"
timeout_secs = 5
log_level = "debug"
"#;
        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.beacon_url, "http://beacon:5052");
        assert_eq!(config.archiver_url.as_deref(), Some("http://archiver:8000"));
        assert_eq!(config.format, Format::Ssz);
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(parse_config(r#"format = "xml""#).is_err());
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let result = load_config(Some(Path::new("/nonexistent/blob-sidecar-fetcher.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn zero_timeout_still_builds_client() {
        let config = AppConfig {
            timeout_secs: 0,
            ..AppConfig::default()
        };
        assert!(config.http_client().is_ok());
    }
}
