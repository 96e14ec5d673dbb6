use crate::config::RunConfig;
use crate::plotting;
use anyhow::{Context, Result};
use kinetik_core::{
    analysis::{self, RunSummary},
    export, loader, KineticBuilder, KineticEngine,
};
use std::{fs, path::Path};
use tracing::{debug, info, warn};

/// Builds the engine for `config`, executes its run plan and writes the
/// trajectory, summary, resolved configuration and chart to the output
/// directory.
///
/// If a run step fails, whatever was integrated before the failure is still
/// written out before the error is returned.
pub fn run_simulation(config: &RunConfig) -> Result<RunSummary> {
    let mut engine = KineticBuilder::from_network_file(&config.network)?
        .build()
        .context("Failed to initialize the reaction network")?;
    info!(
        species = engine.species().len(),
        reactions = engine.reactions().len(),
        steps_per_cycle = engine.settings().steps_per_cycle,
        "Network initialized"
    );

    let outcome = execute_runs(&mut engine, config);
    if let Err(e) = &outcome {
        warn!("Run stopped early, writing partial results: {:#}", e);
    }

    let summary = write_outputs(&engine, config)?;
    outcome?;
    Ok(summary)
}

fn execute_runs(engine: &mut KineticEngine, config: &RunConfig) -> Result<()> {
    for (i, step) in config.runs().iter().enumerate() {
        info!(run = i + 1, cycles = step.cycles, time_step = step.time_step, "Running");
        engine
            .run(step.cycles, step.time_step)
            .with_context(|| format!("Run {} of {} failed", i + 1, config.runs().len()))?;
        debug!(rows = engine.trajectory().len(), time = engine.trajectory().last_time(), "Run complete");
    }
    Ok(())
}

fn write_outputs(engine: &KineticEngine, config: &RunConfig) -> Result<RunSummary> {
    let output_dir = &config.output_dir;
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;

    // Keep the resolved settings next to the results for traceability.
    let manifest = serde_yaml::to_string(config).context("Failed to serialize run configuration")?;
    fs::write(output_dir.join("run.yaml"), manifest)?;

    let trajectory = engine.export_trajectory()?;
    let csv_path = output_dir.join("trajectory.csv");
    export::export_csv(&trajectory, &csv_path)?;
    info!("Trajectory written to {}", csv_path.display());

    let summary = analysis::summarize(engine)?;
    analysis::write_summary_json(&summary, &output_dir.join("summary.json"))?;

    if config.plot {
        let selection = engine
            .select_trajectory(config.plot_species.as_slice())
            .context("Cannot plot the requested species")?;
        let title = config.network.name.as_deref().unwrap_or("Concentration over time");
        let png_path = output_dir.join("concentrations.png");
        plotting::plot_concentrations(&png_path, &selection, title)?;
        info!("Chart written to {}", png_path.display());
    }

    Ok(summary)
}

/// Loads and initializes a network, printing its species and reactions.
pub fn check_network(path: &Path) -> Result<KineticEngine> {
    let file = loader::load_network(path)
        .with_context(|| format!("Failed to load network from {}", path.display()))?;
    let engine = KineticBuilder::from_network_file(&file)?
        .build()
        .context("Network is invalid")?;

    println!("\n--- Species ---");
    for species in engine.species() {
        let marker = if species.stable { " (stable)" } else { "" };
        println!("{:<16} {:>12}{}", species.name, species.initial_concentration, marker);
    }
    println!("\n--- Reactions ---");
    for reaction in engine.reactions() {
        println!("{} {}", reaction, reaction.rate_constant);
    }
    println!("\n--- Run plan ---");
    if file.simulation.runs.is_empty() {
        println!("(none; pass --cycles and --time-step to `run`)");
    }
    for step in &file.simulation.runs {
        println!("{} cycles x {}", step.cycles, step.time_step);
    }
    Ok(engine)
}

pub fn print_summary_report(summary: &RunSummary, output_dir: &Path) {
    println!("\n--- Simulation Summary ---");
    println!("Rows recorded: {}", summary.rows);
    println!("End time:      {}", summary.end_time);
    println!("{:<16} {:>12} {:>12} {:>12} {:>12}", "species", "initial", "final", "min", "max");
    for s in &summary.species {
        println!(
            "{:<16} {:>12.6} {:>12.6} {:>12.6} {:>12.6}",
            s.name, s.initial, s.final_value, s.min, s.max
        );
    }
    println!("\nResults are in '{}'", output_dir.display());
}
