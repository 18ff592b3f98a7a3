pub mod types;

use crate::error::{DashboardError, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub use types::{Config, OutputConfig, SourceConfig};

const CONFIG_FILE_NAME: &str = ".rwdash.toml";

/// Get the global config file path (~/.rwdash.toml)
pub fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(CONFIG_FILE_NAME))
}

/// Get the local config file path (./.rwdash.toml)
pub fn local_config_path() -> PathBuf {
    PathBuf::from(CONFIG_FILE_NAME)
}

/// Load configuration.
///
/// An explicit path must exist and parse. Otherwise the local config is
/// tried first, then the global one, then defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return read_config(path);
    }

    let candidates = std::iter::once(local_config_path()).chain(global_config_path());
    for path in candidates {
        if !path.exists() {
            continue;
        }
        match read_config(&path) {
            Ok(config) => {
                log::debug!("Loaded configuration from {}", path.display());
                return Ok(config);
            }
            Err(e) => log::warn!("Ignoring {}: {}", path.display(), e),
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .map_err(|e| DashboardError::Config(format!("{}: {}", path.display(), e)))?;
    parse_config(&content)
}

/// Parse and validate TOML configuration text
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config =
        toml::from_str(content).map_err(|e| DashboardError::Config(e.to_string()))?;

    if !config.source.url_template.contains("{ref}") {
        return Err(DashboardError::Config(format!(
            "source.url_template must contain a {{ref}} placeholder: {}",
            config.source.url_template
        )));
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.source.default_ref, "main");
        assert_eq!(config.source.timeout_secs, 30);
        assert_eq!(
            config.output.convert_output,
            PathBuf::from("risingwave-dashboard_new.json")
        );
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = parse_config(
            r#"
            [source]
            default_ref = "release-1.9"
            "#,
        )
        .unwrap();

        assert_eq!(config.source.default_ref, "release-1.9");
        assert!(config.source.url_template.contains("risingwavelabs/risingwave"));
        assert_eq!(config.output.fetch_path, PathBuf::from("./risingwave-dashboard.json"));
    }

    #[test]
    fn test_template_without_placeholder_is_rejected() {
        let err = parse_config(
            r#"
            [source]
            url_template = "https://example.com/dashboard.json"
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("{ref}"));
    }

    #[test]
    fn test_explicit_missing_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = load_config(Some(&dir.path().join("nope.toml")));
        assert!(matches!(result, Err(DashboardError::Config(_))));
    }

    #[test]
    fn test_explicit_config_is_loaded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rwdash.toml");
        fs::write(&path, "[output]\nconvert_input = \"in.json\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.output.convert_input, PathBuf::from("in.json"));
    }
}
