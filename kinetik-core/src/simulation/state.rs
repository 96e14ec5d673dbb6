use serde::{Deserialize, Serialize};
use std::fmt;

/// Build stage of a `KineticEngine`.
///
/// Stages only move forward, except `reset` which returns `Ran` to
/// `Initialized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Empty,
    DeclaringSpecies,
    DeclaringReactions,
    Initialized,
    Ran,
}

/// Public engine entry points, as seen by the stage transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    AddSpecies,
    AddReaction,
    Initialize,
    Run,
    Reset,
    /// Read-only trajectory access (export, selection for plotting).
    Inspect,
}

impl Stage {
    pub fn permits(self, operation: Operation) -> bool {
        use Operation::*;
        use Stage::*;
        matches!(
            (self, operation),
            (Empty | DeclaringSpecies, AddSpecies)
                | (DeclaringSpecies | DeclaringReactions, AddReaction)
                | (DeclaringReactions, Initialize)
                | (Initialized | Ran, Run | Reset | Inspect)
        )
    }

    /// Stage reached once `operation` has succeeded from `self`.
    pub fn after(self, operation: Operation) -> Stage {
        match operation {
            Operation::AddSpecies => Stage::DeclaringSpecies,
            Operation::AddReaction => Stage::DeclaringReactions,
            Operation::Initialize | Operation::Reset => Stage::Initialized,
            Operation::Run => Stage::Ran,
            Operation::Inspect => self,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::Empty => "empty",
            Stage::DeclaringSpecies => "declaring species",
            Stage::DeclaringReactions => "declaring reactions",
            Stage::Initialized => "initialized",
            Stage::Ran => "ran",
        };
        f.write_str(label)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Operation::AddSpecies => "add species",
            Operation::AddReaction => "add reaction",
            Operation::Initialize => "initialize",
            Operation::Run => "run",
            Operation::Reset => "reset",
            Operation::Inspect => "read trajectory",
        };
        f.write_str(label)
    }
}

/// Concentration history, one row per recorded time point.
///
/// Columns follow species declaration order. Rows are only appended, except
/// through `collapse_to_last`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    times: Vec<f64>,
    rows: Vec<Vec<f64>>,
}

impl Trajectory {
    pub fn seeded(initial: Vec<f64>) -> Self {
        Self {
            times: vec![0.0],
            rows: vec![initial],
        }
    }

    pub fn push(&mut self, time: f64, row: Vec<f64>) {
        debug_assert!(self.rows.last().map_or(true, |last| last.len() == row.len()));
        self.times.push(time);
        self.rows.push(row);
    }

    /// Keeps only the latest row, which becomes the new seed at time zero.
    pub fn collapse_to_last(&mut self) {
        if let Some(last) = self.rows.pop() {
            self.rows = vec![last];
            self.times = vec![0.0];
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn last_row(&self) -> Option<&[f64]> {
        self.rows.last().map(Vec::as_slice)
    }

    pub fn last_time(&self) -> f64 {
        self.times.last().copied().unwrap_or(0.0)
    }

    pub fn column(&self, index: usize) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(move |row| row[index])
    }
}

/// Time series of one species, ready for plotting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeciesSeries {
    pub name: String,
    pub values: Vec<f64>,
}

/// Parallel arrays of time coordinates and per-species concentrations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrajectorySelection {
    pub times: Vec<f64>,
    pub series: Vec<SpeciesSeries>,
}

impl TrajectorySelection {
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.series.iter().map(|s| s.name.as_str())
    }

    /// Values of every selected species at time index `index`.
    pub fn row(&self, index: usize) -> Vec<f64> {
        self.series.iter().map(|s| s.values[index]).collect()
    }

    pub fn max_value(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .fold(0.0, f64::max)
    }
}
