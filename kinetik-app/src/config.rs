use crate::cli::RunArgs;
use anyhow::{bail, Context, Result};
use kinetik_core::loader;
use kinetik_schemas::{
    file_formats::NetworkFile,
    settings::{IntegrationSettings, RunStep, SimulationSettings},
};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Everything a `run` invocation needs, after layering command-line overrides
/// over the network file's `simulation` block.
#[derive(Debug, Clone, Serialize)]
pub struct RunConfig {
    pub network: NetworkFile,
    pub output_dir: PathBuf,
    /// Empty means every species.
    pub plot_species: Vec<String>,
    pub plot: bool,
}

impl RunConfig {
    /// Loads the network named in `args` and resolves the effective settings.
    pub fn load(args: &RunArgs) -> Result<Self> {
        let network = loader::load_network(&args.network)
            .with_context(|| format!("Failed to load network from {}", args.network.display()))?;
        Self::resolve(args, network)
    }

    pub fn resolve(args: &RunArgs, mut network: NetworkFile) -> Result<Self> {
        network.simulation = resolve_simulation(args, network.simulation)?;

        let output_dir = match &args.output {
            Some(dir) => dir.clone(),
            None => default_output_dir(&network, &args.network),
        };

        Ok(Self {
            network,
            output_dir,
            plot_species: args.plot.clone(),
            plot: !args.no_plot,
        })
    }

    pub fn integration(&self) -> &IntegrationSettings {
        &self.network.simulation.integration
    }

    pub fn runs(&self) -> &[RunStep] {
        &self.network.simulation.runs
    }
}

fn resolve_simulation(args: &RunArgs, mut simulation: SimulationSettings) -> Result<SimulationSettings> {
    if let Some(steps) = args.steps_per_cycle {
        simulation.integration.steps_per_cycle = steps;
    }
    if let Some(criterion) = args.criterion {
        simulation.integration.stability_criterion = Some(criterion);
        simulation.integration.check_enabled = true;
    }
    if args.check {
        simulation.integration.check_enabled = true;
    }

    match (args.cycles, args.time_step) {
        (Some(cycles), Some(time_step)) => simulation.runs = vec![RunStep { cycles, time_step }],
        (None, None) => {}
        _ => bail!("--cycles and --time-step must be given together"),
    }
    if simulation.runs.is_empty() {
        bail!("No run plan: add a `simulation.runs` list to the network file or pass --cycles and --time-step");
    }

    Ok(simulation)
}

fn default_output_dir(network: &NetworkFile, network_path: &Path) -> PathBuf {
    let stem = network
        .name
        .clone()
        .or_else(|| network_path.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "network".to_string());
    PathBuf::from("./runs").join(format!("{}_{}", stem, chrono::Utc::now().format("%Y%m%d_%H%M%S")))
}
