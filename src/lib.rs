//! # RisingWave dashboard rewriter
//!
//! Rewrites the Grafana dashboard shipped in the RisingWave repository so it
//! can be provisioned next to the RisingWave operator's Prometheus setup.
//!
//! ## Features
//!
//! - **Fetch or convert**: download the dashboard at any commit or branch, or rewrite a local copy
//! - **Datasource pinning**: every panel and query target points at the `prometheus` datasource
//! - **Label mapping**: `job`/`instance` become `risingwave_component`/`pod` in queries and legends
//! - **Query scoping**: selectors are filtered by the `$namespace` and `$instance` variables
//!
//! ## Example
//!
//! ```rust,no_run
//! use rwdash_cli::dashboard::{self, ExprProfile};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut doc = dashboard::load_local(Path::new("risingwave-dashboard.json"))?;
//! let stats = dashboard::rewrite_dashboard(&mut doc, ExprProfile::Relabel)?;
//! dashboard::write_dashboard(Path::new("risingwave-dashboard_new.json"), &doc)?;
//! println!("{} targets rewritten", stats.targets);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod handlers;

// Re-export commonly used types and functions
pub use dashboard::{ExprProfile, RewriteStats, rewrite_dashboard};
pub use error::{DashboardError, Result};
pub use handlers::*;
use cli::Commands;
use config::Config;

/// The current version of the CLI tool
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn run_command(command: Commands, config: &Config) -> Result<RewriteReport> {
    match command {
        Commands::Fetch { git_ref, output, extra, profile } => {
            handlers::handle_fetch(config, git_ref, output, extra, profile)
        }
        Commands::Convert { input, output, profile } => {
            handlers::handle_convert(config, input, output, profile)
        }
    }
}
