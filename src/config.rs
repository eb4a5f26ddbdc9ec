use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::{DEFAULT_MAX_DISTANCE_KM, DEFAULT_PAGE_SIZE};

/// Standalone variable shared with the web front-end
const API_BASE_URL_VAR: &str = "TECHNOTRAC_API_BASE_URL";

/// Service settings, every field optional in the sources
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub backend: BackendSettings,
    pub cache: CacheSettings,
    pub matching: MatchingSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Defaults to the number of physical cores when unset
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            workers: None,
        }
    }
}

/// Marketplace backend the service reads listings from
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendSettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Without Redis only the in-process tier is used
    pub redis_url: Option<String>,
    pub ttl_secs: u64,
    pub capacity: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            redis_url: None,
            ttl_secs: 300,
            capacity: 1000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MatchingSettings {
    pub max_distance_km: f64,
    pub page_size: usize,
    pub max_page_size: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            max_distance_km: DEFAULT_MAX_DISTANCE_KM,
            page_size: DEFAULT_PAGE_SIZE,
            max_page_size: 100,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Fallback filter when `RUST_LOG` is unset
    pub level: String,
    /// `pretty` or `compact`
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

impl Settings {
    /// Layered load, later sources win:
    /// `config/default.*`, `config/local.*`, `TECHNOTRAC__SECTION__KEY`
    /// variables, then `TECHNOTRAC_API_BASE_URL`.
    pub fn load() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false));

        finish(builder)
    }

    /// Load a single settings file plus the environment
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        finish(Config::builder().add_source(File::from(path.as_ref())))
    }
}

fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Settings, ConfigError> {
    let mut builder = builder.add_source(
        Environment::with_prefix("TECHNOTRAC")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );

    if let Some(base_url) = std::env::var(API_BASE_URL_VAR)
        .ok()
        .filter(|url| !url.trim().is_empty())
    {
        builder = builder.set_override("backend.base_url", base_url)?;
    }

    builder.build()?.try_deserialize()
}
