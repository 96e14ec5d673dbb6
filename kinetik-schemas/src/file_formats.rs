use crate::{
    reaction::{Reaction, ReactionParseError},
    settings::SimulationSettings,
    species::Species,
};
use serde::{Deserialize, Serialize};

/// A reaction as written in a network file: either an equation string or
/// explicit reactant/product lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionEntry {
    #[serde(flatten)]
    pub terms: ReactionTerms,
    pub rate_constant: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReactionTerms {
    Equation {
        equation: String,
    },
    Explicit {
        #[serde(default)]
        inputs: Vec<String>,
        #[serde(default)]
        outputs: Vec<String>,
    },
}

impl ReactionEntry {
    pub fn to_reaction(&self) -> Result<Reaction, ReactionParseError> {
        match &self.terms {
            ReactionTerms::Equation { equation } => Reaction::from_equation(equation, self.rate_constant),
            // A misspelled `equation` key also lands here with both lists empty.
            ReactionTerms::Explicit { inputs, outputs } if inputs.is_empty() && outputs.is_empty() => {
                Err(ReactionParseError::NoTerms(format!(
                    "with rate constant {} (no `equation`, `inputs` or `outputs`)",
                    self.rate_constant
                )))
            }
            ReactionTerms::Explicit { inputs, outputs } => {
                Ok(Reaction::new(inputs.clone(), outputs.clone(), self.rate_constant))
            }
        }
    }
}

/// Top-level layout of a reaction network file (YAML or JSON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkFile {
    pub schema_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub species: Vec<Species>,
    #[serde(default)]
    pub reactions: Vec<ReactionEntry>,
    #[serde(default)]
    pub simulation: SimulationSettings,
}

impl NetworkFile {
    /// Resolves every entry to a `Reaction`, stopping at the first bad equation.
    pub fn reactions(&self) -> Result<Vec<Reaction>, ReactionParseError> {
        self.reactions.iter().map(ReactionEntry::to_reaction).collect()
    }
}
