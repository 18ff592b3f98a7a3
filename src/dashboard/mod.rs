//! Dashboard rewrite pipeline: load, rewrite top-level fields, walk panels,
//! write.

pub mod document;
pub mod loader;
pub mod rules;
pub mod walker;
pub mod writer;

pub use document::rewrite_document;
pub use loader::{RemoteSource, load_local};
pub use rules::ExprProfile;
pub use walker::{PanelWalker, RewriteStats};
pub use writer::write_dashboard;

use crate::error::Result;
use serde_json::Value;

/// Apply all dashboard edits in place
pub fn rewrite_dashboard(doc: &mut Value, profile: ExprProfile) -> Result<RewriteStats> {
    rewrite_document(doc)?;
    PanelWalker::new(profile).walk_dashboard(doc)
}
