use crate::simulation::state::{Operation, Stage};
use kinetik_schemas::reaction::ReactionParseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KineticError {
    #[error("Species '{0}' is already declared")]
    DuplicateName(String),

    #[error("Species '{0}' is not declared")]
    UnknownSpecies(String),

    #[error("Cannot {operation}: engine stage is '{stage}'")]
    InvalidState { operation: Operation, stage: Stage },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(
        "The change in one step is too large at cycle {cycle}: species '{species}' would lose \
         {ratio:.4} of its concentration (criterion {criterion}); decrease the time step or \
         increase the steps per cycle"
    )]
    StepTooLarge {
        species: String,
        ratio: f64,
        criterion: f64,
        cycle: usize,
    },

    #[error("Invalid reaction: {0}")]
    ReactionParse(#[from] ReactionParseError),

    #[error("I/O error for file '{0}': {1}")]
    FileIO(String, #[source] std::io::Error),

    #[error("Failed to parse YAML from '{0}': {1}")]
    YamlParsing(String, #[source] serde_yaml::Error),

    #[error("JSON error for '{0}': {1}")]
    Json(String, #[source] serde_json::Error),

    #[error("Failed to write CSV file '{0}': {1}")]
    CsvError(String, #[source] csv::Error),
}
