use serde::{Deserialize, Serialize};

/// A named chemical entity and its starting concentration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    pub name: String,
    #[serde(rename = "concentration")]
    pub initial_concentration: f64,
    /// Held constant for the whole simulation (buffers, solvents, feeds).
    #[serde(default)]
    pub stable: bool,
}

impl Species {
    pub fn new(name: impl Into<String>, initial_concentration: f64) -> Self {
        Self {
            name: name.into(),
            initial_concentration,
            stable: false,
        }
    }

    pub fn stable(name: impl Into<String>, initial_concentration: f64) -> Self {
        Self {
            stable: true,
            ..Self::new(name, initial_concentration)
        }
    }
}
