//! Configuration loading and first-run bootstrap
//!
//! Settings come from a single TOML file. When the file is missing, the
//! bundled `<file>.example` next to it is copied into place once and then
//! loaded like any other config.
//!
//! Config path priority:
//! 1. Command-line argument (highest priority)
//! 2. `QUARRY_CONFIG` environment variable
//! 3. `config.toml` in the working directory

use crate::rewrite::RegexRewrite;
use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming the config file
pub const CONFIG_ENV_VAR: &str = "QUARRY_CONFIG";

/// Config file used when neither CLI nor environment name one
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Placeholder for the percent-encoded query term
pub const QUERY_PLACEHOLDER: &str = "{{query}}";
/// Placeholder for the row count (page size)
pub const ROWS_PLACEHOLDER: &str = "{{rows}}";
/// Placeholder for the zero-based start offset
pub const START_PLACEHOLDER: &str = "{{start}}";

/// Smallest window that still fits first, ellipsis, current, ellipsis, last
pub const MIN_PAGINATION_STEPS: u64 = 5;

/// Raw configuration as it appears in the TOML file
#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    /// Path prefix for the search route and generated links
    #[serde(default)]
    pub base: String,

    /// Documents per page
    #[serde(default = "default_page_size")]
    pub page_size: u64,

    /// Maximum number of page-link slots before compression
    #[serde(default = "default_pagination_steps")]
    pub pagination_steps: u64,

    /// Edge-detection margin for window compression
    #[serde(default = "default_pagination_bubble")]
    pub pagination_bubble: u64,

    /// Backend request template with `{{query}}`, `{{rows}}`, `{{start}}`
    pub query: String,

    /// Document id rewrite rule
    pub replace: ReplaceConfig,

    /// HTTP server settings (optional)
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// `[replace]` section: id → URL rewrite rule
#[derive(Debug, Clone, Deserialize)]
pub struct ReplaceConfig {
    pub regex: String,
    #[serde(default)]
    pub with: String,
}

/// `[server]` section
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory served verbatim under `<base>/static` (optional)
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
        }
    }
}

/// `[logging]` section
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_page_size() -> u64 {
    10
}

fn default_pagination_steps() -> u64 {
    9
}

fn default_pagination_bubble() -> u64 {
    1
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Validated, immutable search configuration
///
/// Built once at startup and shared read-only by every request.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Normalised base path: empty, or `/segment` without trailing slash
    pub base: String,
    pub page_size: u64,
    pub pagination_steps: u64,
    pub pagination_bubble: u64,
    pub query_template: String,
    pub rewrite: RegexRewrite,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

impl SearchConfig {
    /// Parse and validate configuration from TOML text
    pub fn parse(toml_str: &str) -> Result<Self> {
        let raw: TomlConfig = toml::from_str(toml_str)
            .map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))?;
        Self::from_toml(raw)
    }

    /// Validate raw configuration
    ///
    /// # Errors
    /// - `page_size` is 0
    /// - `pagination_steps` is below [`MIN_PAGINATION_STEPS`]
    /// - `replace.regex` does not compile
    pub fn from_toml(raw: TomlConfig) -> Result<Self> {
        if raw.page_size == 0 {
            return Err(Error::Config("page_size must be at least 1".to_string()));
        }

        if raw.pagination_steps < MIN_PAGINATION_STEPS {
            return Err(Error::Config(format!(
                "pagination_steps must be at least {} (got {})",
                MIN_PAGINATION_STEPS, raw.pagination_steps
            )));
        }

        for placeholder in [QUERY_PLACEHOLDER, ROWS_PLACEHOLDER, START_PLACEHOLDER] {
            if !raw.query.contains(placeholder) {
                warn!("Query template has no {} placeholder", placeholder);
            }
        }

        let rewrite = RegexRewrite::new(&raw.replace.regex, raw.replace.with)
            .map_err(|e| Error::Config(e.to_string()))?;

        Ok(Self {
            base: normalize_base(&raw.base),
            page_size: raw.page_size,
            pagination_steps: raw.pagination_steps,
            pagination_bubble: raw.pagination_bubble,
            query_template: raw.query,
            rewrite,
            server: raw.server,
            logging: raw.logging,
        })
    }

    /// Route path the search page is mounted on
    pub fn route_path(&self) -> String {
        if self.base.is_empty() {
            "/".to_string()
        } else {
            self.base.clone()
        }
    }
}

/// Normalise a base path to `""` or `/a/b` (leading slash, no trailing slash)
pub fn normalize_base(base: &str) -> String {
    let trimmed = base.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

/// Resolve the config file path (CLI > environment > default)
pub fn resolve_config_path(cli_arg: Option<&Path>) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    PathBuf::from(DEFAULT_CONFIG_FILE)
}

/// Path of the bundled example for a config file (`config.toml.example`)
pub fn example_path(config_path: &Path) -> PathBuf {
    let mut name = config_path.as_os_str().to_os_string();
    name.push(".example");
    PathBuf::from(name)
}

/// Materialise the config file from its example if it does not exist
///
/// Returns `true` if the file was created.
pub fn bootstrap_config(config_path: &Path) -> Result<bool> {
    if config_path.exists() {
        return Ok(false);
    }

    let example = example_path(config_path);
    if !example.exists() {
        return Err(Error::Config(format!(
            "Config file {} not found and no example at {}",
            config_path.display(),
            example.display()
        )));
    }

    std::fs::copy(&example, config_path)?;
    info!(
        "Created {} from {}",
        config_path.display(),
        example.display()
    );
    Ok(true)
}

/// Load configuration, bootstrapping it from the example on first run
pub fn load_config(config_path: &Path) -> Result<SearchConfig> {
    bootstrap_config(config_path)?;

    let toml_str = std::fs::read_to_string(config_path).map_err(|e| {
        Error::Config(format!(
            "Failed to read config file {}: {}",
            config_path.display(),
            e
        ))
    })?;

    let config = SearchConfig::parse(&toml_str)?;
    info!("Loaded configuration from {}", config_path.display());
    Ok(config)
}
