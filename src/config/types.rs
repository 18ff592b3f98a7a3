use crate::dashboard::loader::DEFAULT_URL_TEMPLATE;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub output: OutputConfig,
}

/// Where `fetch` downloads the dashboard from
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// URL with a `{ref}` placeholder for the commit id or branch
    pub url_template: String,
    pub default_ref: String,
    pub timeout_secs: u64,
}

/// Default file locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub fetch_path: PathBuf,
    pub convert_input: PathBuf,
    pub convert_output: PathBuf,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url_template: DEFAULT_URL_TEMPLATE.to_string(),
            default_ref: "main".to_string(),
            timeout_secs: 30,
        }
    }
}

impl SourceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            fetch_path: PathBuf::from("./risingwave-dashboard.json"),
            convert_input: PathBuf::from("risingwave-dashboard.json"),
            convert_output: PathBuf::from("risingwave-dashboard_new.json"),
        }
    }
}
