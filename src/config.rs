//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::filters::FilterConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// JSON catalog file to load instead of the built-in catalog
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    /// Storefront base URL serving `/api/products`
    #[serde(default)]
    pub catalog_url: Option<String>,

    /// HTTP timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Maximum number of products to print
    #[serde(default)]
    pub limit: Option<usize>,

    /// Default filters applied before CLI flags
    #[serde(default)]
    pub filters: FilterConfig,
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: None,
            catalog_url: None,
            timeout_secs: default_timeout_secs(),
            format: OutputFormat::Table,
            limit: None,
            filters: FilterConfig::default(),
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

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(config)
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let local_config = Path::new("gearshop.toml");
        if local_config.exists() {
            debug!("Found gearshop.toml in current directory");
            return Self::from_file(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("gearshop").join("config.toml");
            if user_config.exists() {
                debug!("Found config in user config directory");
                return Self::from_file(user_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(path) = std::env::var("GEARSHOP_CATALOG") {
            if !path.is_empty() {
                self.use_catalog_file(path);
            }
        }

        if let Ok(url) = std::env::var("GEARSHOP_CATALOG_URL") {
            if !url.is_empty() {
                self.use_catalog_url(url);
            }
        }

        if let Ok(format) = std::env::var("GEARSHOP_FORMAT") {
            if let Ok(f) = format.parse() {
                self.format = f;
            }
        }

        self
    }

    /// Points at a JSON catalog file. A storefront URL from a lower layer is
    /// dropped so the file is what gets loaded.
    pub fn use_catalog_file(&mut self, path: impl Into<PathBuf>) {
        self.catalog_path = Some(path.into());
        self.catalog_url = None;
    }

    /// Points at a storefront URL, which takes precedence over any file.
    pub fn use_catalog_url(&mut self, url: impl Into<String>) {
        self.catalog_url = Some(url.into());
    }

    /// Checks values that deserialization accepts but the app cannot use.
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be at least 1");
        }
        if self.limit == Some(0) {
            anyhow::bail!("limit must be at least 1 when set");
        }
        self.filters.validate().context("Invalid [filters] section")?;
        Ok(())
    }
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
