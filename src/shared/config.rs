use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::Deserialize;

use crate::infra::instagram::{
    Credentials, DEFAULT_MAX_PAGES, DEFAULT_PAGE_SIZE, DEFAULT_REQUEST_DELAY_MS,
};

/// Top-level configuration for gramexport.
#[derive(Debug, Default, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Pagination and throttling settings.
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Instagram session cookies, copied from a logged-in browser session.
    #[serde(default)]
    pub credentials: Credentials,
}

/// Pagination and throttling settings.
#[derive(Debug, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FetchConfig {
    /// Comments requested per page (default: 100).
    #[serde(default = "default_page_size")]
    #[schemars(default = "default_page_size")]
    pub page_size: u32,

    /// Minimum delay between page requests in milliseconds (default: 500).
    /// Instagram rate-limits aggressively; do not lower this casually.
    #[serde(default = "default_request_delay_ms")]
    #[schemars(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    /// Abort a fetch whose pagination has not terminated after this many
    /// pages (default: 1000).
    #[serde(default = "default_max_pages")]
    #[schemars(default = "default_max_pages")]
    pub max_pages: u32,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            request_delay_ms: default_request_delay_ms(),
            max_pages: default_max_pages(),
        }
    }
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_request_delay_ms() -> u64 {
    DEFAULT_REQUEST_DELAY_MS
}

fn default_max_pages() -> u32 {
    DEFAULT_MAX_PAGES
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read config file (permission error, etc.)
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// YAML parse error
    #[error("Invalid config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },
}

/// Load configuration from ~/.config/gramexport/config.ya?ml.
/// Returns Config::default() if no config file exists.
pub fn load_config() -> anyhow::Result<Config> {
    let Some(dir) = dirs::config_dir() else {
        return Ok(Config::default());
    };
    load_config_from_dir(&dir.join("gramexport"))
}

/// Load configuration from a specific directory.
/// Searches for config.yaml, then config.yml in the given directory.
/// Returns Config::default() if neither file exists.
pub fn load_config_from_dir(dir: &Path) -> anyhow::Result<Config> {
    for filename in &["config.yaml", "config.yml"] {
        let path = dir.join(filename);
        match std::fs::read_to_string(&path) {
            Ok(content) => return parse_config(&content, &path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => return Err(ConfigError::ReadError { path, source: e }.into()),
        }
    }

    Ok(Config::default())
}

fn parse_config(content: &str, path: &Path) -> anyhow::Result<Config> {
    serde_yaml::from_str(content)
        .map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
        .map_err(Into::into)
}

/// Generate JSON Schema for the Config struct.
pub fn generate_schema() -> schemars::Schema {
    schemars::schema_for!(Config)
}
