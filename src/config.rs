//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::adapter::SiteAdapter;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Page visits running at once
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Budget for one whole page visit, variants included
    #[serde(default = "default_page_timeout_ms")]
    pub page_timeout_ms: u64,

    /// Option combinations visited per run
    #[serde(default = "default_variants_per_run")]
    pub variants_per_run: usize,

    /// Lower bound of the random pause before each visit
    #[serde(default = "default_min_delay_ms")]
    pub min_delay_ms: u64,

    /// Upper bound of the random pause before each visit
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// How long to wait for the load-complete marker
    #[serde(default = "default_load_wait_ms")]
    pub load_wait_ms: u64,

    #[serde(default = "default_post_load_settle_ms")]
    pub post_load_settle_ms: u64,

    /// Pause between consecutive option clicks
    #[serde(default = "default_option_click_delay_ms")]
    pub option_click_delay_ms: u64,

    /// Random settle after selecting a variant, lower bound
    #[serde(default = "default_settle_min_ms")]
    pub settle_min_ms: u64,

    /// Random settle after selecting a variant, upper bound
    #[serde(default = "default_settle_max_ms")]
    pub settle_max_ms: u64,

    /// Site adapter (defaults to the Coupang preset)
    #[serde(default)]
    pub adapter: SiteAdapter,
}

fn default_concurrency() -> usize {
    3
}

fn default_page_timeout_ms() -> u64 {
    20_000
}

fn default_variants_per_run() -> usize {
    15
}

fn default_min_delay_ms() -> u64 {
    2000
}

fn default_max_delay_ms() -> u64 {
    5000
}

fn default_load_wait_ms() -> u64 {
    5000
}

fn default_post_load_settle_ms() -> u64 {
    1000
}

fn default_option_click_delay_ms() -> u64 {
    200
}

fn default_settle_min_ms() -> u64 {
    300
}

fn default_settle_max_ms() -> u64 {
    800
}

impl Default for Config {
    fn default() -> Self {
        Self {
            proxy: None,
            format: OutputFormat::Table,
            concurrency: default_concurrency(),
            page_timeout_ms: default_page_timeout_ms(),
            variants_per_run: default_variants_per_run(),
            min_delay_ms: default_min_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            load_wait_ms: default_load_wait_ms(),
            post_load_settle_ms: default_post_load_settle_ms(),
            option_click_delay_ms: default_option_click_delay_ms(),
            settle_min_ms: default_settle_min_ms(),
            settle_max_ms: default_settle_max_ms(),
            adapter: SiteAdapter::default(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        // 1. Explicit path takes precedence
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        // 2. Try current directory
        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        // 3. Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("price-watch").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Some(n) = env_parse("SCRAPER_CONCURRENCY") {
            self.concurrency = n;
        }

        if let Some(ms) = env_parse("PAGE_TIMEOUT_MS") {
            self.page_timeout_ms = ms;
        }

        if let Some(n) = env_parse("DEFAULT_VARIANT_PER_RUN") {
            self.variants_per_run = n;
        }

        if let Some(ms) = env_parse("SCRAPER_MIN_DELAY") {
            self.min_delay_ms = ms;
        }

        if let Some(ms) = env_parse("SCRAPER_MAX_DELAY") {
            self.max_delay_ms = ms;
        }

        if let Ok(proxy) = std::env::var("SCRAPER_PROXY") {
            self.proxy = Some(proxy);
        }

        self
    }

    pub fn page_timeout(&self) -> Duration {
        Duration::from_millis(self.page_timeout_ms)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use: table, json, markdown, csv", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}
