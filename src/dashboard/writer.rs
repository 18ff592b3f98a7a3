//! Compact JSON output.

use crate::error::{DashboardError, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Serialize without whitespace (`,` and `:` separators only)
pub fn to_compact_json(doc: &Value) -> Result<String> {
    Ok(serde_json::to_string(doc)?)
}

/// Write the dashboard to `path`, replacing any existing file
pub fn write_dashboard(path: &Path, doc: &Value) -> Result<()> {
    let output = to_compact_json(doc)?;
    fs::write(path, &output).map_err(|source| DashboardError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    log::info!("Wrote {} bytes to {}", output.len(), path.display());
    Ok(())
}
