use super::utils::{RewriteReport, rewrite_to_file};
use crate::config::Config;
use crate::dashboard::{ExprProfile, load_local};
use std::path::PathBuf;

/// Rewrite a local copy of the dashboard
pub fn handle_convert(
    config: &Config,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    profile: ExprProfile,
) -> crate::Result<RewriteReport> {
    let input = input.unwrap_or_else(|| config.output.convert_input.clone());
    let output = output.unwrap_or_else(|| config.output.convert_output.clone());

    let doc = load_local(&input)?;
    rewrite_to_file(doc, profile, &output)
}
