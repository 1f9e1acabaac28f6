//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::infrastructure::discord::cdn::{CDN_BASE_URL, CdnUrl, DEFAULT_EXTENSION, DEFAULT_SIZE};

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    Info,
    /// Warning level.
    #[default]
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration loaded from `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Log file path. Logging to a file only happens when this is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// CDN defaults.
    #[serde(default)]
    pub cdn: CdnConfig,
}

/// CDN URL defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CdnConfig {
    /// CDN host, without trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Image extension used when none is requested.
    #[serde(default = "default_extension")]
    pub default_extension: String,

    /// Image size used when none is requested.
    #[serde(default = "default_size")]
    pub default_size: u32,
}

impl CdnConfig {
    /// Starts a CDN URL seeded with these defaults.
    #[must_use]
    pub fn url(&self, route: impl Into<String>, image_hash: impl Into<String>) -> CdnUrl {
        CdnUrl::new(route, image_hash)
            .base_url(self.base_url.clone())
            .extension(self.default_extension.clone())
            .size(self.default_size)
    }
}

impl Default for CdnConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            default_extension: default_extension(),
            default_size: DEFAULT_SIZE,
        }
    }
}

fn default_base_url() -> String {
    CDN_BASE_URL.to_string()
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

const fn default_size() -> u32 {
    DEFAULT_SIZE
}

use super::args::CliArgs;

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(base_url) = &args.cdn_base_url {
            self.cdn.base_url.clone_from(base_url);
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_path: None,
            log_level: LogLevel::default(),
            cdn: CdnConfig::default(),
        }
    }
}
