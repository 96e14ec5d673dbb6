//! Shared fixtures for the engine integration tests.

use kinetik_core::KineticEngine;
use kinetik_schemas::settings::IntegrationSettings;

/// A(1.0) -> B(0.0) with k = 1.
pub fn first_order(settings: IntegrationSettings) -> KineticEngine {
    let mut engine = KineticEngine::new();
    engine.add_species("A", 1.0).unwrap();
    engine.add_species("B", 0.0).unwrap();
    engine.add_reaction(&["A"], &["B"], 1.0).unwrap();
    engine.initialize(settings).unwrap();
    engine
}

/// H2 + Cl2 <-> 2HCl with a stable catalyst `M` taking part in both directions.
pub fn hydrogen_chloride(settings: IntegrationSettings) -> KineticEngine {
    let mut engine = KineticEngine::new();
    engine.add_species("H2", 1.0).unwrap();
    engine.add_species("Cl2", 0.8).unwrap();
    engine.add_species("HCl", 0.0).unwrap();
    engine.add_stable_species("M", 0.3).unwrap();
    engine.add_reaction(&["H2", "Cl2", "M"], &["HCl", "HCl", "M"], 2.0).unwrap();
    engine.add_reaction(&["HCl", "HCl", "M"], &["H2", "Cl2", "M"], 0.4).unwrap();
    engine.initialize(settings).unwrap();
    engine
}
