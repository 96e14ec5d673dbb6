use crate::{error::KineticError, simulation::engine::KineticEngine};
use kinetik_schemas::{
    file_formats::NetworkFile, reaction::Reaction, settings::IntegrationSettings, species::Species,
};

/// A fluent builder for constructing an initialized `KineticEngine`.
///
/// Collects species, reactions and integration settings, then replays them
/// through the engine's staged API in the required order.
#[derive(Debug, Default)]
pub struct KineticBuilder {
    species: Vec<Species>,
    reactions: Vec<Reaction>,
    settings: IntegrationSettings,
}

impl KineticBuilder {
    /// Creates a new, empty `KineticBuilder`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a builder from a parsed network file, including its integration
    /// settings. The file's run plan is left to the caller.
    ///
    /// # Errors
    ///
    /// Returns `KineticError::ReactionParse` if a reaction equation is malformed.
    pub fn from_network_file(file: &NetworkFile) -> Result<Self, KineticError> {
        Ok(Self {
            species: file.species.clone(),
            reactions: file.reactions()?,
            settings: file.simulation.integration.clone(),
        })
    }

    pub fn with_species(mut self, species: Species) -> Self {
        self.species.push(species);
        self
    }

    pub fn with_reaction(mut self, reaction: Reaction) -> Self {
        self.reactions.push(reaction);
        self
    }

    pub fn with_reactions(mut self, reactions: impl IntoIterator<Item = Reaction>) -> Self {
        self.reactions.extend(reactions);
        self
    }

    pub fn with_settings(mut self, settings: IntegrationSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Consumes the builder and returns an engine in the `Initialized` stage.
    ///
    /// # Errors
    ///
    /// Propagates the first error raised by the staged API: duplicate or
    /// unknown species, an empty reaction list, or invalid settings.
    pub fn build(self) -> Result<KineticEngine, KineticError> {
        let mut engine = KineticEngine::new();
        for species in self.species {
            engine.declare_species(species)?;
        }
        for reaction in self.reactions {
            engine.declare_reaction(reaction)?;
        }
        engine.initialize(self.settings)?;
        Ok(engine)
    }
}
