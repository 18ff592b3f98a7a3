use crate::dashboard::ExprProfile;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rwdash-ctl")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Rewrite the RisingWave Grafana dashboard for Kubernetes")]
#[command(long_about = "Rewrites the upstream RisingWave Grafana dashboard so it works against the Prometheus scraping set up by the RisingWave operator: datasources point at `prometheus`, `job`/`instance` labels become `risingwave_component`/`pod`, and queries are scoped by namespace and RisingWave instance.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download the dashboard from the RisingWave repository and rewrite it
    Fetch {
        /// Commit id or branch name [default: main]
        #[arg(value_name = "REF")]
        git_ref: Option<String>,

        /// Output file [default: ./risingwave-dashboard.json]
        #[arg(value_name = "OUTPUT")]
        output: Option<PathBuf>,

        #[arg(hide = true)]
        extra: Vec<String>,

        /// Expression rewrite rules
        #[arg(long, value_enum, default_value = "scoped")]
        profile: ExprProfile,
    },

    /// Rewrite a local copy of the dashboard
    Convert {
        /// Input file [default: risingwave-dashboard.json]
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Output file [default: risingwave-dashboard_new.json]
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Expression rewrite rules
        #[arg(long, value_enum, default_value = "relabel")]
        profile: ExprProfile,
    },
}

impl Cli {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let level = match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };

        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_fetch_positionals() {
        let cli = Cli::parse_from(["rwdash-ctl", "fetch", "v1.9.1", "out.json"]);
        match cli.command {
            Commands::Fetch { git_ref, output, extra, profile } => {
                assert_eq!(git_ref.as_deref(), Some("v1.9.1"));
                assert_eq!(output, Some(PathBuf::from("out.json")));
                assert!(extra.is_empty());
                assert_eq!(profile, ExprProfile::Scoped);
            }
            _ => panic!("expected fetch"),
        }
    }

    #[test]
    fn test_fetch_collects_surplus_arguments() {
        let cli = Cli::parse_from(["rwdash-ctl", "fetch", "a", "b", "c"]);
        match cli.command {
            Commands::Fetch { extra, .. } => assert_eq!(extra, vec!["c".to_string()]),
            _ => panic!("expected fetch"),
        }
    }

    #[test]
    fn test_convert_defaults() {
        let cli = Cli::parse_from(["rwdash-ctl", "-vv", "convert"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Convert { input, output, profile } => {
                assert!(input.is_none());
                assert!(output.is_none());
                assert_eq!(profile, ExprProfile::Relabel);
            }
            _ => panic!("expected convert"),
        }
    }
}
