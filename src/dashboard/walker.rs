//! Recursive walk over the panel tree.
//!
//! Rows and library panels nest their children under `panels`, so the walk
//! descends into every panel's own `panels` array as well as its `targets`.

use super::document::prometheus_datasource;
use super::rules::{ExprProfile, rewrite_expr, rewrite_legend};
use crate::error::{DashboardError, Result};
use serde_json::{Map, Value};

const PANELS_KEY: &str = "panels";
const TARGETS_KEY: &str = "targets";
const DATASOURCE_KEY: &str = "datasource";
const EXPR_KEY: &str = "expr";
const LEGEND_FORMAT_KEY: &str = "legendFormat";

/// Counters collected while walking the panel tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteStats {
    pub panels: usize,
    pub targets: usize,
    pub exprs_changed: usize,
    pub legends_changed: usize,
}

/// Points every panel and target at the Prometheus datasource and rewrites
/// target queries
pub struct PanelWalker {
    profile: ExprProfile,
    datasource: Value,
    stats: RewriteStats,
}

impl PanelWalker {
    pub fn new(profile: ExprProfile) -> Self {
        Self {
            profile,
            datasource: prometheus_datasource(),
            stats: RewriteStats::default(),
        }
    }

    /// Walk the dashboard's top-level `panels` array
    pub fn walk_dashboard(mut self, doc: &mut Value) -> Result<RewriteStats> {
        let panels = doc
            .get_mut(PANELS_KEY)
            .ok_or_else(|| DashboardError::MissingKey(PANELS_KEY.to_string()))?;

        self.walk_panels(panels, PANELS_KEY)?;
        log::debug!("Panel walk finished: {:?}", self.stats);
        Ok(self.stats)
    }

    fn walk_panels(&mut self, panels: &mut Value, path: &str) -> Result<()> {
        let panels = as_array(panels, path)?;
        for (index, panel) in panels.iter_mut().enumerate() {
            let path = format!("{path}[{index}]");
            self.rewrite_panel(panel, &path)?;
        }
        Ok(())
    }

    fn rewrite_panel(&mut self, panel: &mut Value, path: &str) -> Result<()> {
        let panel = as_object(panel, path)?;
        self.stats.panels += 1;
        panel.insert(DATASOURCE_KEY.to_string(), self.datasource.clone());

        if let Some(targets) = panel.get_mut(TARGETS_KEY) {
            let targets_path = format!("{path}.{TARGETS_KEY}");
            for (index, target) in as_array(targets, &targets_path)?.iter_mut().enumerate() {
                self.rewrite_target(target, &format!("{targets_path}[{index}]"))?;
            }
        }

        if let Some(children) = panel.get_mut(PANELS_KEY) {
            self.walk_panels(children, &format!("{path}.{PANELS_KEY}"))?;
        }

        Ok(())
    }

    fn rewrite_target(&mut self, target: &mut Value, path: &str) -> Result<()> {
        let target = as_object(target, path)?;
        self.stats.targets += 1;
        target.insert(DATASOURCE_KEY.to_string(), self.datasource.clone());

        let profile = self.profile;
        if rewrite_string(target, EXPR_KEY, path, |expr| rewrite_expr(expr, profile))? {
            self.stats.exprs_changed += 1;
        }
        if rewrite_string(target, LEGEND_FORMAT_KEY, path, rewrite_legend)? {
            self.stats.legends_changed += 1;
        }

        Ok(())
    }
}

/// Apply `rewrite` to a string field if present; returns whether it changed
fn rewrite_string(
    target: &mut Map<String, Value>,
    key: &str,
    path: &str,
    rewrite: impl Fn(&str) -> String,
) -> Result<bool> {
    let Some(value) = target.get_mut(key) else {
        return Ok(false);
    };

    let Value::String(current) = value else {
        return Err(DashboardError::UnexpectedType {
            path: format!("{path}.{key}"),
            expected: "a string",
        });
    };

    let rewritten = rewrite(current.as_str());
    if rewritten == *current {
        return Ok(false);
    }

    log::trace!("{path}.{key}: {current} -> {rewritten}");
    *current = rewritten;
    Ok(true)
}

fn as_array<'a>(value: &'a mut Value, path: &str) -> Result<&'a mut Vec<Value>> {
    value.as_array_mut().ok_or_else(|| DashboardError::UnexpectedType {
        path: path.to_string(),
        expected: "an array",
    })
}

fn as_object<'a>(value: &'a mut Value, path: &str) -> Result<&'a mut Map<String, Value>> {
    value.as_object_mut().ok_or_else(|| DashboardError::UnexpectedType {
        path: path.to_string(),
        expected: "an object",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn walk(doc: &mut Value, profile: ExprProfile) -> Result<RewriteStats> {
        PanelWalker::new(profile).walk_dashboard(doc)
    }

    #[test]
    fn test_local_scenario() {
        let mut doc = json!({
            "panels": [{
                "targets": [{
                    "expr": "rate(x{job=\"a\"}[$__rate_interval])",
                    "legendFormat": "{{job}}"
                }]
            }]
        });

        let stats = walk(&mut doc, ExprProfile::Relabel).unwrap();

        let target = &doc["panels"][0]["targets"][0];
        assert_eq!(
            target["expr"],
            "rate(x{risingwave_component=\"a\"}[$__rate_interval])"
        );
        assert_eq!(target["legendFormat"], "{{risingwave_component}}");
        assert_eq!(target["datasource"], json!({"type": "prometheus", "uid": "prometheus"}));
        assert_eq!(doc["panels"][0]["datasource"], prometheus_datasource());
        assert_eq!(
            stats,
            RewriteStats { panels: 1, targets: 1, exprs_changed: 1, legends_changed: 1 }
        );
    }

    #[test]
    fn test_nested_panels_get_datasource() {
        let mut doc = json!({
            "panels": [{
                "type": "row",
                "datasource": {"type": "prometheus", "uid": "${DS_PROMETHEUS}"},
                "panels": [{
                    "panels": [{"targets": [{"expr": "up"}]}]
                }]
            }]
        });

        let stats = walk(&mut doc, ExprProfile::Relabel).unwrap();

        assert_eq!(doc["panels"][0]["datasource"], prometheus_datasource());
        assert_eq!(doc["panels"][0]["panels"][0]["datasource"], prometheus_datasource());
        let leaf = &doc["panels"][0]["panels"][0]["panels"][0];
        assert_eq!(leaf["datasource"], prometheus_datasource());
        assert_eq!(leaf["targets"][0]["datasource"], prometheus_datasource());
        assert_eq!(leaf["targets"][0]["expr"], "up");
        assert_eq!(stats.panels, 3);
        assert_eq!(stats.exprs_changed, 0);
    }

    #[test]
    fn test_scoped_profile() {
        let mut doc = json!({
            "panels": [{
                "targets": [
                    {"expr": "foo[$__rate_interval]"},
                    {"expr": "sum(x) by (le)"}
                ]
            }]
        });

        walk(&mut doc, ExprProfile::Scoped).unwrap();

        let targets = &doc["panels"][0]["targets"];
        assert_eq!(
            targets[0]["expr"],
            "foo{namespace=\"$namespace\", risingwave_name=\"$instance\"}[$__rate_interval]"
        );
        assert_eq!(
            targets[1]["expr"],
            "sum(x{namespace=\"$namespace\", risingwave_name=\"$instance\"}) by (le)"
        );
    }

    #[test]
    fn test_datasource_is_idempotent() {
        let mut doc = json!({"panels": [{"targets": [{"refId": "A"}]}]});
        walk(&mut doc, ExprProfile::Relabel).unwrap();
        let once = doc.clone();
        walk(&mut doc, ExprProfile::Relabel).unwrap();
        assert_eq!(doc, once);
    }

    #[test]
    fn test_non_string_expr_reports_path() {
        let mut doc = json!({
            "panels": [{}, {"targets": [{"expr": "up"}, {"expr": 42}]}]
        });

        let err = walk(&mut doc, ExprProfile::Relabel).unwrap_err();
        match err {
            DashboardError::UnexpectedType { path, expected } => {
                assert_eq!(path, "panels[1].targets[1].expr");
                assert_eq!(expected, "a string");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_array_targets_reports_path() {
        let mut doc = json!({"panels": [{"targets": {"expr": "up"}}]});
        let err = walk(&mut doc, ExprProfile::Relabel).unwrap_err();
        assert!(matches!(err, DashboardError::UnexpectedType { ref path, .. } if path == "panels[0].targets"));
    }

    #[test]
    fn test_missing_panels_is_reported() {
        let mut doc = json!({"title": "empty"});
        let err = walk(&mut doc, ExprProfile::Relabel).unwrap_err();
        assert!(matches!(err, DashboardError::MissingKey(ref key) if key == "panels"));
    }
}
