use crate::dashboard::{self, ExprProfile, RewriteStats};
use colored::Colorize;
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};

/// Outcome of a successful rewrite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteReport {
    pub output: PathBuf,
    pub stats: RewriteStats,
}

impl fmt::Display for RewriteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Wrote {} ({} panels, {} targets, {} expressions and {} legends rewritten)",
            "✔".green(),
            self.output.display().to_string().bold(),
            self.stats.panels,
            self.stats.targets,
            self.stats.exprs_changed,
            self.stats.legends_changed,
        )
    }
}

/// Rewrite a parsed dashboard and write it to `output`
pub fn rewrite_to_file(
    mut doc: Value,
    profile: ExprProfile,
    output: &Path,
) -> crate::Result<RewriteReport> {
    log::info!("Rewriting dashboard with {:?} expression rules", profile);
    let stats = dashboard::rewrite_dashboard(&mut doc, profile)?;
    dashboard::write_dashboard(output, &doc)?;

    Ok(RewriteReport {
        output: output.to_path_buf(),
        stats,
    })
}
