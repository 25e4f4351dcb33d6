//! Configuration for greg

use crate::GregError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default configuration as TOML
pub const DEFAULT_CONFIG: &str = r#"# Greg Configuration

[fetch]
# GraphQL endpoint for tree queries
api_url = "https://api.github.com/graphql"
# Timeout applied to every remote query (e.g., "30s", "2m")
query_timeout = "30s"
# Maximum number of directories waiting to be expanded
work_queue_capacity = 50000
# Files buffered between the fetcher and the matcher
result_queue_capacity = 100

[search]
# Allowed file extensions; empty means every extension
filetypes = []
# Compare pattern and text lower-cased
ignore_case = false
"#;

/// Greg configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_query_timeout")]
    pub query_timeout: String,
    #[serde(default = "default_work_queue_capacity")]
    pub work_queue_capacity: usize,
    #[serde(default = "default_result_queue_capacity")]
    pub result_queue_capacity: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub filetypes: Vec<String>,
    #[serde(default)]
    pub ignore_case: bool,
}

// Default value functions
fn default_api_url() -> String {
    crate::fetch::github::GITHUB_API_URL.to_string()
}
fn default_query_timeout() -> String {
    "30s".to_string()
}
fn default_work_queue_capacity() -> usize {
    crate::fetch::DEFAULT_WORK_QUEUE_CAPACITY
}
fn default_result_queue_capacity() -> usize {
    crate::fetch::DEFAULT_RESULT_QUEUE_CAPACITY
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            query_timeout: default_query_timeout(),
            work_queue_capacity: default_work_queue_capacity(),
            result_queue_capacity: default_result_queue_capacity(),
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse config from TOML string
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| GregError::ConfigParse(e.to_string()))?;
        if config.fetch.work_queue_capacity == 0 || config.fetch.result_queue_capacity == 0 {
            return Err(GregError::ConfigParse(
                "queue capacities must be greater than zero".to_string(),
            ));
        }
        if parse_duration(&config.fetch.query_timeout).is_none() {
            return Err(GregError::ConfigParse(format!(
                "invalid query_timeout {:?}; expected e.g. \"30s\", \"2m\" or \"1h\"",
                config.fetch.query_timeout
            )));
        }
        Ok(config)
    }

    /// Get the query timeout as Duration
    pub fn query_timeout(&self) -> Duration {
        parse_duration(&self.fetch.query_timeout).unwrap_or(Duration::from_secs(30))
    }
}

/// Parse duration string (e.g., "30s", "2m", "1h")
fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let (split, _) = s.char_indices().last()?;
    let (num_str, unit) = s.split_at(split);
    let num: u64 = num_str.parse().ok()?;

    match unit {
        "s" => Some(Duration::from_secs(num)),
        "m" => num.checked_mul(60).map(Duration::from_secs),
        "h" => num.checked_mul(3600).map(Duration::from_secs),
        _ => None,
    }
}
