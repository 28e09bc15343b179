//! Configuration types for burrow.
//!
//! [`Config::load`] reads `~/.config/burrow/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist, then applies `BURROW__*`
//! environment overrides (`BURROW__BACKEND__BASE_URL=http://10.0.0.5:3000`).
//! [`Config::defaults`] returns the same defaults without touching the
//! filesystem or the environment (useful in tests).

use anyhow::bail;
use chrono::format::{Item, StrftimeItems};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[backend]
base_url     = "http://127.0.0.1:3000"
logs_path    = "/api/requestlogs"
timeout_secs = 10

[elastic]
url   = "http://localhost:9200"
index = "attacker_logs"
size  = 100

[display]
page_size          = 10
utc_offset_minutes = -300
top_countries      = 5

[ui]
show_timestamps  = true
timestamp_format = "%Y-%m-%d %H:%M:%S"
chart_height     = 10
"#;

const ENV_PREFIX: &str = "BURROW";

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/burrow/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub elastic: ElasticConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// `[backend]` — the proxy serving `{ "message": [...] }`.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_logs_path")]
    pub logs_path: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String { "http://127.0.0.1:3000".to_string() }
fn default_logs_path() -> String { "/api/requestlogs".to_string() }
fn default_timeout_secs() -> u64 { 10 }

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            logs_path: default_logs_path(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// `[elastic]` — direct Elasticsearch access.
#[derive(Debug, Clone, Deserialize)]
pub struct ElasticConfig {
    #[serde(default = "default_elastic_url")]
    pub url: String,
    #[serde(default = "default_elastic_index")]
    pub index: String,
    #[serde(default = "default_elastic_size")]
    pub size: usize,
}

fn default_elastic_url() -> String { "http://localhost:9200".to_string() }
fn default_elastic_index() -> String { "attacker_logs".to_string() }
fn default_elastic_size() -> usize { 100 }

impl Default for ElasticConfig {
    fn default() -> Self {
        Self {
            url: default_elastic_url(),
            index: default_elastic_index(),
            size: default_elastic_size(),
        }
    }
}

/// `[display]` — pipeline parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Display shift for chart labels and table timestamps, within ±1439.
    #[serde(default = "default_utc_offset_minutes")]
    pub utc_offset_minutes: i32,
    #[serde(default = "default_top_countries")]
    pub top_countries: usize,
}

fn default_page_size() -> usize { crate::paginate::DEFAULT_PAGE_SIZE }
fn default_utc_offset_minutes() -> i32 { crate::bucket::DEFAULT_UTC_OFFSET_MINUTES }
fn default_top_countries() -> usize { crate::chart::DEFAULT_TOP_COUNTRIES }

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            utc_offset_minutes: default_utc_offset_minutes(),
            top_countries: default_top_countries(),
        }
    }
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_show_timestamps")]
    pub show_timestamps: bool,
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
    #[serde(default = "default_chart_height")]
    pub chart_height: u16,
}

fn default_show_timestamps() -> bool { true }
fn default_timestamp_format() -> String { "%Y-%m-%d %H:%M:%S".to_string() }
fn default_chart_height() -> u16 { 10 }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_timestamps: default_show_timestamps(),
            timestamp_format: default_timestamp_format(),
            chart_height: default_chart_height(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/burrow/config.toml`, layered on top of the
    /// built-in defaults, then `BURROW__*` environment variables. Creates the
    /// file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
            tracing::debug!(path = %path.display(), "config: wrote defaults");
        }

        let cfg: Self = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path.as_path()).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// Parse a TOML document layered over the defaults.
    pub fn from_toml(toml: &str) -> anyhow::Result<Self> {
        let cfg: Self = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.display.page_size == 0 {
            bail!("display.page_size must be at least 1");
        }
        let max_offset = crate::bucket::MINUTES_PER_DAY - 1;
        if !(-max_offset..=max_offset).contains(&self.display.utc_offset_minutes) {
            bail!(
                "display.utc_offset_minutes must be within -{max_offset}..={max_offset}, got {}",
                self.display.utc_offset_minutes
            );
        }
        if self.backend.timeout_secs == 0 {
            bail!("backend.timeout_secs must be at least 1");
        }
        if !self.backend.logs_path.is_empty() && !self.backend.logs_path.starts_with('/') {
            bail!("backend.logs_path must start with '/'");
        }
        if StrftimeItems::new(&self.ui.timestamp_format).any(|item| matches!(item, Item::Error)) {
            bail!("ui.timestamp_format {:?} is not a valid strftime format", self.ui.timestamp_format);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("burrow")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
