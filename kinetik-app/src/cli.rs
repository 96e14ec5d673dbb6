use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "kinetik",
    version,
    about = "Simulate chemical reaction networks with explicit mass-action kinetics."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a reaction network and export its trajectory.
    Run(RunArgs),
    /// Load and validate a reaction network without running it.
    Check(CheckArgs),
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Network definition file (YAML, or JSON with a .json extension).
    #[arg(value_name = "NETWORK")]
    pub network: PathBuf,

    /// Number of recorded cycles. Replaces the file's run plan; requires --time-step.
    #[arg(short = 'n', long, value_name = "NUM", requires = "time_step")]
    pub cycles: Option<usize>,

    /// Time covered by one cycle. Requires --cycles.
    #[arg(short = 't', long, value_name = "FLOAT", requires = "cycles")]
    pub time_step: Option<f64>,

    /// Micro-steps per recorded cycle.
    #[arg(short, long, value_name = "NUM")]
    pub steps_per_cycle: Option<usize>,

    /// Reject steps whose consumption exceeds the stability criterion.
    #[arg(long)]
    pub check: bool,

    /// Stability criterion; implies --check.
    #[arg(long, value_name = "FLOAT")]
    pub criterion: Option<f64>,

    /// Output directory. Defaults to ./runs/<network>_<timestamp>.
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Species to plot, comma separated. Defaults to all species.
    #[arg(short, long, value_name = "NAMES", value_delimiter = ',')]
    pub plot: Vec<String>,

    /// Skip chart generation.
    #[arg(long, conflicts_with = "plot")]
    pub no_plot: bool,
}

/// Arguments for the `check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Network definition file (YAML, or JSON with a .json extension).
    #[arg(value_name = "NETWORK")]
    pub network: PathBuf,
}
