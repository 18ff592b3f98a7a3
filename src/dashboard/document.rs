//! Top-level dashboard edits: annotations, template variables, title and
//! time range.

use crate::error::{DashboardError, Result};
use serde_json::{Map, Value, json};

pub const DASHBOARD_TITLE: &str = "RisingWave Dashboard";
pub const TIME_FROM: &str = "now-5m";

/// Datasource every panel and target is pointed at
pub fn prometheus_datasource() -> Value {
    json!({
        "type": "prometheus",
        "uid": "prometheus"
    })
}

/// Grafana's built-in "Annotations & Alerts" entry
pub fn annotations_list() -> Value {
    json!([{
        "builtIn": 1,
        "datasource": {
            "type": "grafana",
            "uid": "-- Grafana --"
        },
        "enable": true,
        "hide": true,
        "iconColor": "rgba(0, 211, 255, 1)",
        "name": "Annotations & Alerts",
        "target": {
            "limit": 100,
            "matchAny": false,
            "tags": [],
            "type": "dashboard"
        },
        "type": "dashboard"
    }])
}

/// `namespace` and `instance` variables, resolved from the `up` series the
/// operator's PodMonitors label with `risingwave_name`
pub fn templating_list() -> Value {
    json!([
        {
            "current": {
                "selected": false,
                "text": "default",
                "value": "default"
            },
            "datasource": prometheus_datasource(),
            "definition": "label_values(up{risingwave_name=~\".+\"}, namespace)",
            "description": "Kubernetes namespace.",
            "hide": 0,
            "includeAll": false,
            "label": "Namespace",
            "multi": false,
            "name": "namespace",
            "options": [],
            "query": {
                "query": "label_values(up{risingwave_name=~\".+\"}, namespace)",
                "refId": "StandardVariableQuery"
            },
            "refresh": 1,
            "regex": "",
            "skipUrlSync": false,
            "sort": 1,
            "type": "query"
        },
        {
            "datasource": prometheus_datasource(),
            "definition": "label_values(up{namespace=\"$namespace\", risingwave_name=~\".+\"}, risingwave_name)",
            "description": "RisingWave pod.",
            "hide": 0,
            "includeAll": false,
            "label": "RisingWave",
            "multi": false,
            "name": "instance",
            "options": [],
            "query": {
                "query": "label_values(up{namespace=\"$namespace\", risingwave_name=~\".+\"}, risingwave_name)",
                "refId": "StandardVariableQuery"
            },
            "refresh": 1,
            "regex": "",
            "skipUrlSync": false,
            "sort": 5,
            "type": "query"
        }
    ])
}

/// Replace the fixed top-level fields and drop `__inputs`.
///
/// `annotations`, `templating` and `time` must already be objects; their
/// absence means the input is not a dashboard export.
pub fn rewrite_document(doc: &mut Value) -> Result<()> {
    let root = doc.as_object_mut().ok_or_else(|| DashboardError::UnexpectedType {
        path: "$".to_string(),
        expected: "an object",
    })?;

    child_object(root, "annotations")?.insert("list".to_string(), annotations_list());
    child_object(root, "templating")?.insert("list".to_string(), templating_list());
    root.insert("title".to_string(), Value::String(DASHBOARD_TITLE.to_string()));
    child_object(root, "time")?.insert("from".to_string(), Value::String(TIME_FROM.to_string()));

    if root.shift_remove("__inputs").is_none() {
        log::warn!("Dashboard has no `__inputs` section; was it already rewritten?");
    }

    Ok(())
}

fn child_object<'a>(parent: &'a mut Map<String, Value>, key: &str) -> Result<&'a mut Map<String, Value>> {
    parent
        .get_mut(key)
        .ok_or_else(|| DashboardError::MissingKey(key.to_string()))?
        .as_object_mut()
        .ok_or_else(|| DashboardError::UnexpectedType {
            path: key.to_string(),
            expected: "an object",
        })
}
