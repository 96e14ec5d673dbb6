use crate::{error::KineticError, simulation::engine::KineticEngine};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesSummary {
    pub name: String,
    pub stable: bool,
    pub initial: f64,
    #[serde(rename = "final")]
    pub final_value: f64,
    pub min: f64,
    pub max: f64,
}

/// Snapshot of a trajectory: row count, end time and per-species extremes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub rows: usize,
    pub end_time: f64,
    pub species: Vec<SpeciesSummary>,
}

pub fn summarize(engine: &KineticEngine) -> Result<RunSummary, KineticError> {
    let selection = engine.export_trajectory()?;

    let species = engine
        .species()
        .iter()
        .zip(&selection.series)
        .map(|(def, series)| {
            let initial = series.values.first().copied().unwrap_or(def.initial_concentration);
            let final_value = series.values.last().copied().unwrap_or(initial);
            SpeciesSummary {
                name: def.name.clone(),
                stable: def.stable,
                initial,
                final_value,
                min: series.values.iter().copied().fold(f64::INFINITY, f64::min),
                max: series.values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            }
        })
        .collect();

    Ok(RunSummary {
        rows: selection.times.len(),
        end_time: selection.times.last().copied().unwrap_or(0.0),
        species,
    })
}

/// Weighted sum of one concentration row, e.g. total atoms of an element.
pub fn weighted_total(row: &[f64], weights: &[f64]) -> f64 {
    row.iter().zip(weights).map(|(c, w)| c * w).sum()
}

/// Largest absolute deviation of `weighted_total` from its value at row 0.
pub fn conservation_drift(engine: &KineticEngine, weights: &[f64]) -> f64 {
    let rows = engine.trajectory().rows();
    let Some(first) = rows.first() else {
        return 0.0;
    };
    let reference = weighted_total(first, weights);
    rows.iter()
        .map(|row| (weighted_total(row, weights) - reference).abs())
        .fold(0.0, f64::max)
}

pub fn write_summary_json(summary: &RunSummary, path: &Path) -> Result<(), KineticError> {
    let display = path.display().to_string();
    let json = serde_json::to_string_pretty(summary).map_err(|e| KineticError::Json(display.clone(), e))?;
    fs::write(path, json).map_err(|e| KineticError::FileIO(display, e))
}
