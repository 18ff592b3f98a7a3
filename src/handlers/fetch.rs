use super::utils::{RewriteReport, rewrite_to_file};
use crate::config::Config;
use crate::dashboard::{ExprProfile, RemoteSource};
use crate::error::DashboardError;
use std::path::PathBuf;

pub const FETCH_USAGE: &str = "Usage: rwdash-ctl fetch {commit id or branch name, optional, default: main} {output file, optional, default: ./risingwave-dashboard.json}";

/// Download the dashboard at `git_ref` and rewrite it.
///
/// Surplus positional arguments are a usage error, reported before any
/// request is made.
pub fn handle_fetch(
    config: &Config,
    git_ref: Option<String>,
    output: Option<PathBuf>,
    extra: Vec<String>,
    profile: ExprProfile,
) -> crate::Result<RewriteReport> {
    if !extra.is_empty() {
        log::debug!("Unexpected arguments: {:?}", extra);
        return Err(DashboardError::Usage(FETCH_USAGE.to_string()));
    }

    let git_ref = git_ref.unwrap_or_else(|| config.source.default_ref.clone());
    let output = output.unwrap_or_else(|| config.output.fetch_path.clone());

    let source = RemoteSource::new(config.source.url_template.clone(), config.source.timeout());
    let doc = source.fetch(&git_ref)?;
    rewrite_to_file(doc, profile, &output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_surplus_arguments_are_a_usage_error() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("out.json");

        let err = handle_fetch(
            &Config::default(),
            Some("main".to_string()),
            Some(output.clone()),
            vec!["extra".to_string()],
            ExprProfile::Scoped,
        )
        .unwrap_err();

        assert!(err.is_usage());
        assert_eq!(err.to_string(), FETCH_USAGE);
        assert!(!output.exists());
    }

    #[test]
    fn test_fetch_failure_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("out.json");
        let mut config = Config::default();
        config.source.url_template = "http://127.0.0.1:1/{ref}.json".to_string();
        config.source.timeout_secs = 2;

        let err = handle_fetch(&config, None, Some(output.clone()), Vec::new(), ExprProfile::Scoped)
            .unwrap_err();

        assert!(matches!(err, DashboardError::Http(_)));
        assert!(!output.exists());
    }
}
