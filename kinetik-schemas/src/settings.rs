use serde::{Deserialize, Serialize};

fn default_steps_per_cycle() -> usize {
    1
}

/// Integration parameters fixed at initialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationSettings {
    /// Micro-steps taken per recorded trajectory row.
    #[serde(default = "default_steps_per_cycle")]
    pub steps_per_cycle: usize,
    #[serde(default)]
    pub check_enabled: bool,
    /// Largest tolerated ratio of single-step consumption to concentration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stability_criterion: Option<f64>,
}

impl Default for IntegrationSettings {
    fn default() -> Self {
        Self {
            steps_per_cycle: default_steps_per_cycle(),
            check_enabled: false,
            stability_criterion: None,
        }
    }
}

impl IntegrationSettings {
    pub fn with_steps_per_cycle(mut self, steps_per_cycle: usize) -> Self {
        self.steps_per_cycle = steps_per_cycle;
        self
    }

    /// Enables the step-size guard with the given criterion.
    pub fn with_stability_check(mut self, criterion: f64) -> Self {
        self.check_enabled = true;
        self.stability_criterion = Some(criterion);
        self
    }
}

/// One `run` call: `cycles` recorded rows spaced `time_step` apart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunStep {
    pub cycles: usize,
    pub time_step: f64,
}

/// The optional `simulation` block of a network file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationSettings {
    #[serde(flatten)]
    pub integration: IntegrationSettings,
    /// Executed in order; each entry appends to the same trajectory.
    #[serde(default)]
    pub runs: Vec<RunStep>,
}
