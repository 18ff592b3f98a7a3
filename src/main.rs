use clap::Parser;
use rwdash_cli::{cli::Cli, config};
use std::process;

fn main() {
    if let Err(e) = run() {
        if e.is_usage() {
            println!("{}", e);
        } else {
            eprintln!("Error: {}", e);
        }
        process::exit(1);
    }
}

fn run() -> rwdash_cli::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    cli.init_logging();

    // Load configuration
    let config = config::load_config(cli.config.as_deref())?;

    // Execute command
    let report = rwdash_cli::run_command(cli.command, &config)?;
    if !cli.quiet {
        println!("{}", report);
    }

    Ok(())
}
