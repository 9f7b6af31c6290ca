//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub columns: ColumnConfig,

    #[serde(default)]
    pub table: TableConfig,

    #[serde(default)]
    pub chart: ChartConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Names of the CSV columns the extended variant decodes
///
/// Matching is exact and case-sensitive.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnConfig {
    #[serde(default = "default_date_column")]
    pub date: String,

    #[serde(default = "default_category_column")]
    pub category: String,

    #[serde(default = "default_count_column")]
    pub count: String,
}

fn default_date_column() -> String {
    "Date".to_string()
}

fn default_category_column() -> String {
    "Project Slug".to_string()
}

fn default_count_column() -> String {
    "Total Errors".to_string()
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            date: default_date_column(),
            category: default_category_column(),
            count: default_count_column(),
        }
    }
}

/// Table rendering configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TableConfig {
    /// Header labels for the extended variant, independent of the CSV spelling
    #[serde(default = "default_labels")]
    pub labels: [String; 3],
}

fn default_labels() -> [String; 3] {
    [
        "Date".to_string(),
        "Project slug".to_string(),
        "Total errors".to_string(),
    ]
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            labels: default_labels(),
        }
    }
}

/// Chart rendering configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_aspect_width")]
    pub aspect_width: u32,

    #[serde(default = "default_aspect_height")]
    pub aspect_height: u32,

    /// Plot only the categories with the largest totals
    #[serde(default)]
    pub max_series: Option<usize>,

    /// Title drawn above the chart; axis titles come from `table.labels`
    #[serde(default = "default_caption")]
    pub caption: String,

    /// Viewport width used when there is no browser window (CLI)
    #[serde(default = "default_chart_width")]
    pub default_width: u32,
}

fn default_aspect_width() -> u32 {
    16
}

fn default_aspect_height() -> u32 {
    9
}

fn default_caption() -> String {
    "Error breakdown".to_string()
}

fn default_chart_width() -> u32 {
    1280
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            aspect_width: default_aspect_width(),
            aspect_height: default_aspect_height(),
            max_series: None,
            caption: default_caption(),
            default_width: default_chart_width(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::from_toml(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    #[cfg(feature = "cli")]
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("csvchart").join("config.toml")),
            Some(PathBuf::from("./csvchart.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply `CSVCHART_*` overrides from a lookup function
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(level) = lookup("CSVCHART_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("CSVCHART_LOG_FORMAT") {
            self.logging.format = format;
        }
        if let Some(max) = lookup("CSVCHART_MAX_SERIES") {
            if let Ok(n) = max.parse() {
                self.chart.max_series = Some(n);
            }
        }
        if let Some(width) = lookup("CSVCHART_CHART_WIDTH") {
            if let Ok(w) = width.parse() {
                self.chart.default_width = w;
            }
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# csvchart Configuration
#
# Environment variables override these settings:
# - CSVCHART_LOG_LEVEL
# - CSVCHART_LOG_FORMAT
# - CSVCHART_MAX_SERIES
# - CSVCHART_CHART_WIDTH

[columns]
# CSV header names decoded by the extended view (exact, case-sensitive)
date = "Date"
category = "Project Slug"
count = "Total Errors"

[table]
# Header labels shown in the extended table; the first and last also title
# the chart's axes
labels = ["Date", "Project slug", "Total errors"]

[chart]
# Chart aspect ratio (height = width * aspect_height / aspect_width)
aspect_width = 16
aspect_height = 9

# Plot only the N categories with the largest totals
# max_series = 50

# Title above the chart
caption = "Error breakdown"

# Chart width in pixels when rendering outside a browser
default_width = 1280

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
