use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context};
use log::LevelFilter;
use scout_core::{SearchDefaults, DEFAULT_COUNTRY, FALLBACK_TERM};
use scout_engine::{SearchSettings, DEFAULT_API_HOST};
use scout_logging::{parse_level, scout_info};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::logging::LogDestination;

pub const DEFAULT_CONFIG_FILE: &str = "scout.ron";
pub const API_KEY_ENV: &str = "RAPIDAPI_KEY";

/// Settings read from `scout.ron`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub api_host: String,
    pub base_url: String,
    pub country: String,
    pub fallback_term: String,
    pub data_dir: PathBuf,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_response_bytes: u64,
    pub log_level: String,
    pub log_destination: LogDestination,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_host: DEFAULT_API_HOST.to_string(),
            base_url: format!("https://{DEFAULT_API_HOST}"),
            country: DEFAULT_COUNTRY.to_string(),
            fallback_term: FALLBACK_TERM.to_string(),
            data_dir: PathBuf::from(".scout"),
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
            max_response_bytes: 5 * 1024 * 1024,
            log_level: "info".to_string(),
            log_destination: LogDestination::File,
        }
    }
}

impl AppConfig {
    /// Reads `path`. A missing file yields the defaults; a malformed one is an error.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("reading config {}", path.display()));
            }
        };
        ron::from_str(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup(API_KEY_ENV).filter(|key| !key.trim().is_empty()) {
            self.api_key = Some(key.trim().to_string());
        }
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(country) = &cli.country {
            self.country = country.clone();
        }
        if let Some(dir) = &cli.data_dir {
            self.data_dir = dir.clone();
        }
        if let Some(level) = &cli.log_level {
            self.log_level = level.clone();
        }
    }

    pub fn level_filter(&self) -> anyhow::Result<LevelFilter> {
        parse_level(&self.log_level).ok_or_else(|| anyhow!("unknown log level {:?}", self.log_level))
    }

    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            base_url: self.base_url.clone(),
            api_host: self.api_host.clone(),
            api_key: self.api_key.clone().unwrap_or_default(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_response_bytes,
        }
    }

    pub fn search_defaults(&self) -> SearchDefaults {
        SearchDefaults {
            fallback_term: self.fallback_term.clone(),
            country: self.country.trim().to_ascii_lowercase(),
        }
    }

    /// Longest a caller should wait for a single remote answer.
    pub fn response_deadline(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs + self.request_timeout_secs)
    }

    pub fn log_summary(&self) {
        scout_info!(
            "Config: base_url={} country={} data_dir={:?} api_key_set={}",
            self.base_url,
            self.country,
            self.data_dir,
            self.api_key.is_some()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = AppConfig::load(&temp.path().join("absent.ron")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_CONFIG_FILE);
        fs::write(
            &path,
            r#"(country: "US", request_timeout_secs: 5, log_destination: terminal)"#,
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.country, "US");
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.log_destination, LogDestination::Terminal);
        assert_eq!(config.fallback_term, FALLBACK_TERM);
        assert_eq!(config.search_defaults().country, "us");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, "(country: ").unwrap();
        assert!(AppConfig::load(&path).is_err());
    }

    #[test]
    fn env_and_flags_override_the_file() {
        let mut config = AppConfig::default();
        config.apply_env(|name| (name == API_KEY_ENV).then(|| " secret ".to_string()));
        let cli = Cli::parse_from([
            "scout",
            "--country",
            "de",
            "--data-dir",
            "/tmp/scout-data",
            "--log-level",
            "debug",
            "shell",
        ]);
        config.apply_cli(&cli);

        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.country, "de");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/scout-data"));
        assert_eq!(config.level_filter().unwrap(), LevelFilter::Debug);
        assert_eq!(config.search_settings().api_key, "secret");
    }

    #[test]
    fn blank_env_key_is_ignored() {
        let mut config = AppConfig {
            api_key: Some("from-file".to_string()),
            ..AppConfig::default()
        };
        config.apply_env(|_| Some("   ".to_string()));
        assert_eq!(config.api_key.as_deref(), Some("from-file"));
    }

    #[test]
    fn unknown_level_is_rejected() {
        let config = AppConfig {
            log_level: "loud".to_string(),
            ..AppConfig::default()
        };
        assert!(config.level_filter().is_err());
    }
}
