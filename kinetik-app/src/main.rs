use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use crate::cli::{Cli, Commands};
use crate::config::RunConfig;

mod cli;
mod config;
mod logging;
mod plotting;
mod workflow;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone()) {
        eprintln!("Failed to initialize logging: {:#}", e);
        std::process::exit(1);
    }

    if let Err(e) = dispatch(cli.command) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Run(args) => {
            let config = RunConfig::load(&args)?;
            info!("Running network from '{}'", args.network.display());
            let summary = workflow::run_simulation(&config)?;
            workflow::print_summary_report(&summary, &config.output_dir);
        }
        Commands::Check(args) => {
            workflow::check_network(&args.network)?;
            println!("\nNetwork '{}' is valid.", args.network.display());
        }
    }
    Ok(())
}
