use super::{
    network::Network,
    state::{Operation, SpeciesSeries, Stage, Trajectory, TrajectorySelection},
};
use crate::error::KineticError;
use kinetik_schemas::{reaction::Reaction, settings::IntegrationSettings, species::Species};
use std::collections::HashMap;

/// Explicit mass-action kinetics engine.
///
/// Built in stages: species first, then reactions, then `initialize`, after
/// which `run` may be called any number of times. Every call appends rows to
/// the trajectory. Out-of-order calls fail with `KineticError::InvalidState`
/// and leave the engine untouched.
#[derive(Debug, Clone)]
pub struct KineticEngine {
    stage: Stage,
    species: Vec<Species>,
    species_index: HashMap<String, usize>,
    reactions: Vec<Reaction>,
    settings: IntegrationSettings,
    network: Option<Network>,
    trajectory: Trajectory,
}

impl Default for KineticEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl KineticEngine {
    pub fn new() -> Self {
        Self {
            stage: Stage::Empty,
            species: Vec::new(),
            species_index: HashMap::new(),
            reactions: Vec::new(),
            settings: IntegrationSettings::default(),
            network: None,
            trajectory: Trajectory::default(),
        }
    }

    fn ensure(&self, operation: Operation) -> Result<(), KineticError> {
        if self.stage.permits(operation) {
            Ok(())
        } else {
            Err(KineticError::InvalidState {
                operation,
                stage: self.stage,
            })
        }
    }

    fn advance(&mut self, operation: Operation) {
        self.stage = self.stage.after(operation);
    }

    pub fn add_species(&mut self, name: &str, initial_concentration: f64) -> Result<(), KineticError> {
        self.declare_species(Species::new(name, initial_concentration))
    }

    /// Adds a species whose concentration never changes.
    pub fn add_stable_species(&mut self, name: &str, initial_concentration: f64) -> Result<(), KineticError> {
        self.declare_species(Species::stable(name, initial_concentration))
    }

    pub fn declare_species(&mut self, species: Species) -> Result<(), KineticError> {
        self.ensure(Operation::AddSpecies)?;
        if self.species_index.contains_key(&species.name) {
            return Err(KineticError::DuplicateName(species.name));
        }
        if !species.initial_concentration.is_finite() || species.initial_concentration < 0.0 {
            return Err(KineticError::ConfigError(format!(
                "initial concentration of '{}' must be a non-negative number, got {}",
                species.name, species.initial_concentration
            )));
        }

        self.species_index.insert(species.name.clone(), self.species.len());
        self.species.push(species);
        self.advance(Operation::AddSpecies);
        Ok(())
    }

    /// Adds `inputs -> outputs` with the given rate constant. Repeated names
    /// raise the stoichiometric count, e.g. `&["A", "A"]` for `2A`.
    pub fn add_reaction(&mut self, inputs: &[&str], outputs: &[&str], rate_constant: f64) -> Result<(), KineticError> {
        self.declare_reaction(Reaction::new(inputs.iter().copied(), outputs.iter().copied(), rate_constant))
    }

    pub fn declare_reaction(&mut self, reaction: Reaction) -> Result<(), KineticError> {
        self.ensure(Operation::AddReaction)?;
        if let Some(unknown) = reaction.species_names().find(|name| !self.species_index.contains_key(*name)) {
            return Err(KineticError::UnknownSpecies(unknown.to_string()));
        }
        if !reaction.rate_constant.is_finite() || reaction.rate_constant <= 0.0 {
            return Err(KineticError::ConfigError(format!(
                "rate constant of '{}' must be positive, got {}",
                reaction.equation(),
                reaction.rate_constant
            )));
        }

        self.reactions.push(reaction);
        self.advance(Operation::AddReaction);
        Ok(())
    }

    /// Freezes the network, builds the stoichiometry matrices and seeds the
    /// trajectory with the declared initial concentrations.
    pub fn initialize(&mut self, settings: IntegrationSettings) -> Result<(), KineticError> {
        self.ensure(Operation::Initialize)?;
        if settings.steps_per_cycle == 0 {
            return Err(KineticError::ConfigError("steps per cycle must be at least 1".to_string()));
        }
        match (settings.check_enabled, settings.stability_criterion) {
            (true, None) => {
                return Err(KineticError::ConfigError(
                    "stability check enabled without a stability criterion".to_string(),
                ));
            }
            (_, Some(criterion)) if !criterion.is_finite() || criterion <= 0.0 => {
                return Err(KineticError::ConfigError(format!(
                    "stability criterion must be positive, got {}",
                    criterion
                )));
            }
            _ => {}
        }

        let network = Network::build(&self.species, &self.reactions, &self.species_index)?;
        self.trajectory = Trajectory::seeded(self.species.iter().map(|s| s.initial_concentration).collect());
        self.network = Some(network);
        self.settings = settings;
        self.advance(Operation::Initialize);
        Ok(())
    }

    /// Integrates `cycles` recorded steps of length `time_step`.
    ///
    /// Each cycle is split into `steps_per_cycle` micro-steps; only the state
    /// at the end of a cycle becomes a trajectory row. On `StepTooLarge` the
    /// rows of already completed cycles are kept and the failing cycle is
    /// discarded. The stage moves to `Ran` once a cycle has been recorded.
    pub fn run(&mut self, cycles: usize, time_step: f64) -> Result<(), KineticError> {
        self.ensure(Operation::Run)?;
        if !time_step.is_finite() || time_step <= 0.0 {
            return Err(KineticError::ConfigError(format!(
                "time step must be positive, got {}",
                time_step
            )));
        }
        let (Some(network), Some(seed)) = (self.network.as_ref(), self.trajectory.last_row()) else {
            return Err(KineticError::InvalidState {
                operation: Operation::Run,
                stage: self.stage,
            });
        };

        let micro_steps = self.settings.steps_per_cycle;
        let scale = time_step / micro_steps as f64;
        let criterion = self
            .settings
            .stability_criterion
            .filter(|_| self.settings.check_enabled);
        let start_time = self.trajectory.last_time();
        let mut state = seed.to_vec();

        for cycle in 1..=cycles {
            for _ in 0..micro_steps {
                let step = network.evaluate(&state, scale);
                if let Some(criterion) = criterion {
                    if let Some((s, ratio)) = network.max_depletion_ratio(&state, &step) {
                        if ratio > criterion {
                            return Err(KineticError::StepTooLarge {
                                species: self.species[s].name.clone(),
                                ratio,
                                criterion,
                                cycle,
                            });
                        }
                    }
                }
                network.commit(&mut state, &step);
            }
            self.trajectory.push(start_time + cycle as f64 * time_step, state.clone());
            self.stage = self.stage.after(Operation::Run);
        }

        self.stage = self.stage.after(Operation::Run);
        Ok(())
    }

    /// Discards the history, keeping the latest state as the new initial row.
    pub fn reset(&mut self) -> Result<(), KineticError> {
        self.ensure(Operation::Reset)?;
        self.trajectory.collapse_to_last();
        self.advance(Operation::Reset);
        Ok(())
    }

    /// Time coordinates and series for the named species, in the order
    /// requested. An empty list selects every species in declaration order.
    pub fn select_trajectory<S: AsRef<str>>(&self, names: &[S]) -> Result<TrajectorySelection, KineticError> {
        self.ensure(Operation::Inspect)?;
        let indices = if names.is_empty() {
            (0..self.species.len()).collect()
        } else {
            names
                .iter()
                .map(|name| self.index_of(name.as_ref()))
                .collect::<Result<Vec<_>, _>>()?
        };

        Ok(TrajectorySelection {
            times: self.trajectory.times().to_vec(),
            series: indices
                .into_iter()
                .map(|s| SpeciesSeries {
                    name: self.species[s].name.clone(),
                    values: self.trajectory.column(s).collect(),
                })
                .collect(),
        })
    }

    /// Every species in declaration order.
    pub fn export_trajectory(&self) -> Result<TrajectorySelection, KineticError> {
        self.select_trajectory::<&str>(&[])
    }

    pub fn index_of(&self, name: &str) -> Result<usize, KineticError> {
        self.species_index
            .get(name)
            .copied()
            .ok_or_else(|| KineticError::UnknownSpecies(name.to_string()))
    }

    /// Latest concentration of `name`, once the engine is initialized.
    pub fn concentration(&self, name: &str) -> Result<f64, KineticError> {
        self.ensure(Operation::Inspect)?;
        let s = self.index_of(name)?;
        Ok(self.trajectory.last_row().map_or(self.species[s].initial_concentration, |row| row[s]))
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn species(&self) -> &[Species] {
        &self.species
    }

    pub fn reactions(&self) -> &[Reaction] {
        &self.reactions
    }

    pub fn settings(&self) -> &IntegrationSettings {
        &self.settings
    }

    pub fn network(&self) -> Option<&Network> {
        self.network.as_ref()
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }
}
