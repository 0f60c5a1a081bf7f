
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;

use crate::rates::DEFAULT_BASE_URL;

/// Service configuration, read from environment variables such as `PORT` or `DEBUG_ERRORS`.
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    #[serde(default = "defaults::host")]
    pub host: String,
    #[serde(default = "defaults::port")]
    pub port: u16,
    #[serde(default = "defaults::rates_api_url")]
    pub rates_api_url: String,
    #[serde(default = "defaults::rates_timeout_secs")]
    pub rates_timeout_secs: u64,
    #[serde(default = "defaults::upload_dir")]
    pub upload_dir: PathBuf,
    #[serde(default = "defaults::public_dir")]
    pub public_dir: PathBuf,
    #[serde(default = "defaults::max_upload_bytes")]
    pub max_upload_bytes: usize,
    #[serde(default)]
    pub csv_has_headers: bool,
    /// Adds error details to JSON error responses.
    #[serde(default)]
    pub debug_errors: bool,
    #[serde(default = "defaults::log_level")]
    pub log_level: String,
    /// When set, `access.log` and `debug.log` are written here as well.
    #[serde(default)]
    pub log_dir: Option<PathBuf>
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(std::env::vars())
    }

    pub fn from_vars<I: IntoIterator<Item = (String, String)>>(vars: I) -> Result<Self> {
        envy::from_iter::<_, Config>(vars).context("unable to parse env variables")
    }

    pub fn address(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port).parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }

    pub fn rates_timeout(&self) -> Duration {
        Duration::from_secs(self.rates_timeout_secs)
    }

    pub fn log_level(&self) -> LevelFilter {
        parse_log_level(&self.log_level)
    }
}

pub fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'info'", level);
            LevelFilter::INFO
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    pub fn host() -> String {
        "0.0.0.0".to_string()
    }

    pub fn port() -> u16 {
        8000
    }

    pub fn rates_api_url() -> String {
        super::DEFAULT_BASE_URL.to_string()
    }

    pub fn rates_timeout_secs() -> u64 {
        10
    }

    pub fn upload_dir() -> PathBuf {
        PathBuf::from("uploads")
    }

    pub fn public_dir() -> PathBuf {
        PathBuf::from("public")
    }

    pub fn max_upload_bytes() -> usize {
        10 * 1024 * 1024
    }

    pub fn log_level() -> String {
        "info".to_string()
    }
}
