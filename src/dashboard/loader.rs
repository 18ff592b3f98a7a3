//! Loading dashboard JSON from disk or from the RisingWave repository.

use crate::error::{DashboardError, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Raw dashboard location in the RisingWave repository; `{ref}` is a commit
/// id or branch name
pub const DEFAULT_URL_TEMPLATE: &str =
    "https://raw.githubusercontent.com/risingwavelabs/risingwave/{ref}/grafana/risingwave-dashboard.json";

/// User agent for dashboard downloads
const USER_AGENT: &str = concat!("rwdash-cli/", env!("CARGO_PKG_VERSION"));

/// Parse dashboard JSON text
pub fn parse_dashboard(text: &str) -> Result<Value> {
    Ok(serde_json::from_str(text)?)
}

/// Read and parse a dashboard file
pub fn load_local(path: &Path) -> Result<Value> {
    log::info!("Reading dashboard from {}", path.display());

    let content = fs::read_to_string(path).map_err(|source| DashboardError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    parse_dashboard(&content)
}

/// Remote dashboard source keyed by git ref
#[derive(Debug, Clone)]
pub struct RemoteSource {
    url_template: String,
    timeout: Duration,
}

impl RemoteSource {
    pub fn new(url_template: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url_template: url_template.into(),
            timeout,
        }
    }

    /// URL of the dashboard at `git_ref`
    pub fn url_for(&self, git_ref: &str) -> String {
        self.url_template.replace("{ref}", git_ref)
    }

    /// Download and parse the dashboard at `git_ref`
    pub fn fetch(&self, git_ref: &str) -> Result<Value> {
        let url = self.url_for(git_ref);
        log::info!("Fetching dashboard from {}", url);

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .build()?;

        let response = client.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(DashboardError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.text()?;
        log::debug!("Downloaded {} bytes", body.len());
        parse_dashboard(&body)
    }
}

impl Default for RemoteSource {
    fn default() -> Self {
        Self::new(DEFAULT_URL_TEMPLATE, Duration::from_secs(30))
    }
}
