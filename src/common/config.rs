//! Configuration file handling

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use super::{Error, Result};

/// Default configuration file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "harness.toml";

/// Main configuration structure
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Logical service name -> base URL
    #[serde(default = "default_base_urls")]
    pub base_urls: HashMap<String, String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Whole-scenario budget in seconds; teardown runs outside it
    #[serde(default = "default_scenario_timeout")]
    pub scenario_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_urls: default_base_urls(),
            timeout_secs: default_timeout(),
            scenario_timeout_secs: default_scenario_timeout(),
        }
    }
}

fn default_base_urls() -> HashMap<String, String> {
    let mut urls = HashMap::new();
    urls.insert("bookstore".to_string(), "https://demoqa.com".to_string());
    urls
}

fn default_timeout() -> u64 {
    100
}

fn default_scenario_timeout() -> u64 {
    300
}

impl Config {
    /// Load configuration from `harness.toml` in the working directory
    ///
    /// Returns default configuration if the file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(DEFAULT_CONFIG_FILE))
    }

    /// Load configuration from an explicit path
    ///
    /// A missing default file falls back to defaults; an explicitly named
    /// file that can't be read is an error surfaced to the caller.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            if path == Path::new(DEFAULT_CONFIG_FILE) {
                return Ok(Self::default());
            }
            return Err(Error::Config(format!(
                "Configuration file '{}' not found",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| Error::ConfigParse(e.to_string()))
    }

    /// Resolve the base URL for a logical service name
    pub fn base_url(&self, service: &str) -> Result<&str> {
        self.base_urls
            .get(service)
            .map(String::as_str)
            .ok_or_else(|| Error::UnknownService(service.to_string()))
    }

    /// Per-request timeout as a `Duration`
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Whole-scenario timeout as a `Duration`
    pub fn scenario_timeout(&self) -> Duration {
        Duration::from_secs(self.scenario_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_resolve_bookstore() {
        let config = Config::default();
        assert_eq!(config.base_url("bookstore").unwrap(), "https://demoqa.com");
        assert_eq!(config.timeout_secs, 100);
    }

    #[test]
    fn unknown_service_is_an_error() {
        let config = Config::default();
        assert!(matches!(
            config.base_url("petstore"),
            Err(Error::UnknownService(_))
        ));
    }

    #[test]
    fn parses_partial_config() {
        let config: Config = toml::from_str(
            r#"
            timeout_secs = 10

            [base_urls]
            bookstore = "http://localhost:8080"
            "#,
        )
        .unwrap();

        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.scenario_timeout_secs, 300);
        assert_eq!(
            config.base_url("bookstore").unwrap(),
            "http://localhost:8080"
        );
    }
}
