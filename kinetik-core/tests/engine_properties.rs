//! Behavioural properties of the kinetics engine: stage ordering, numerical
//! update rules, the stability guard and trajectory bookkeeping.

use kinetik_core::{
    analysis::conservation_drift,
    simulation::state::{Operation, Stage},
    KineticBuilder, KineticEngine, KineticError,
};
use kinetik_schemas::{reaction::Reaction, settings::IntegrationSettings, species::Species};

mod common;
use common::{first_order, hydrogen_chloride};

// =================================================================================================
// Stage ordering
// =================================================================================================

#[test]
fn reaction_before_species_is_invalid() {
    let mut engine = KineticEngine::new();
    let err = engine.add_reaction(&["A"], &["B"], 1.0).unwrap_err();
    assert!(matches!(
        err,
        KineticError::InvalidState {
            operation: Operation::AddReaction,
            stage: Stage::Empty
        }
    ));
    assert_eq!(engine.stage(), Stage::Empty);
}

#[test]
fn species_after_reaction_is_invalid() {
    let mut engine = KineticEngine::new();
    engine.add_species("A", 1.0).unwrap();
    engine.add_reaction(&["A"], &[], 1.0).unwrap();
    assert!(matches!(
        engine.add_species("B", 1.0),
        Err(KineticError::InvalidState { operation: Operation::AddSpecies, .. })
    ));
    assert_eq!(engine.species().len(), 1);
}

#[test]
fn initialize_twice_is_invalid() {
    let mut engine = first_order(IntegrationSettings::default());
    let err = engine.initialize(IntegrationSettings::default()).unwrap_err();
    assert!(matches!(
        err,
        KineticError::InvalidState {
            operation: Operation::Initialize,
            stage: Stage::Initialized
        }
    ));
}

#[test]
fn run_before_initialize_is_invalid() {
    let mut engine = KineticEngine::new();
    engine.add_species("A", 1.0).unwrap();
    engine.add_reaction(&["A"], &[], 1.0).unwrap();
    assert!(matches!(
        engine.run(1, 0.1),
        Err(KineticError::InvalidState { operation: Operation::Run, .. })
    ));
    assert!(engine.trajectory().is_empty());
}

#[test]
fn network_is_frozen_after_initialize() {
    let mut engine = first_order(IntegrationSettings::default());
    assert!(matches!(engine.add_species("C", 1.0), Err(KineticError::InvalidState { .. })));
    assert!(matches!(
        engine.add_reaction(&["B"], &["A"], 1.0),
        Err(KineticError::InvalidState { .. })
    ));
    assert_eq!(engine.network().unwrap().n_reactions(), 1);
}

#[test]
fn reset_before_initialize_is_invalid() {
    let mut engine = KineticEngine::new();
    assert!(matches!(engine.reset(), Err(KineticError::InvalidState { .. })));
}

// =================================================================================================
// Declarations
// =================================================================================================

#[test]
fn duplicate_species_is_rejected() {
    let mut engine = KineticEngine::new();
    engine.add_species("A", 1.0).unwrap();
    assert!(matches!(engine.add_species("A", 2.0), Err(KineticError::DuplicateName(name)) if name == "A"));
    assert_eq!(engine.species(), &[Species::new("A", 1.0)]);
}

#[test]
fn undeclared_reactant_is_rejected() {
    let mut engine = KineticEngine::new();
    engine.add_species("A", 1.0).unwrap();
    assert!(matches!(
        engine.add_reaction(&["X"], &["A"], 1.0),
        Err(KineticError::UnknownSpecies(name)) if name == "X"
    ));
    assert!(matches!(
        engine.add_reaction(&["A"], &["Y"], 1.0),
        Err(KineticError::UnknownSpecies(name)) if name == "Y"
    ));
    assert_eq!(engine.stage(), Stage::DeclaringSpecies);
}

// =================================================================================================
// Integration
// =================================================================================================

#[test]
fn zero_cycles_appends_nothing() {
    let mut engine = first_order(IntegrationSettings::default());
    engine.run(3, 0.1).unwrap();
    let before = engine.trajectory().clone();

    engine.run(0, 0.1).unwrap();

    assert_eq!(engine.trajectory(), &before);
}

#[test]
fn first_order_step() {
    let mut engine = first_order(IntegrationSettings::default());
    engine.run(1, 0.1).unwrap();

    let row = engine.trajectory().row(1).unwrap();
    assert!((row[0] - 0.9).abs() < 1e-12);
    assert!((row[1] - 0.1).abs() < 1e-12);
}

#[test]
fn second_order_uses_squared_concentration() {
    let mut engine = KineticEngine::new();
    engine.add_species("A", 2.0).unwrap();
    engine.add_species("B", 0.0).unwrap();
    engine.add_reaction(&["A", "A"], &["B"], 0.5).unwrap();
    engine.initialize(IntegrationSettings::default()).unwrap();

    engine.run(1, 0.1).unwrap();

    // rate = 0.5 * 0.1 * 2^2 = 0.2; A consumes twice the rate
    assert!((engine.concentration("A").unwrap() - 1.6).abs() < 1e-12);
    assert!((engine.concentration("B").unwrap() - 0.2).abs() < 1e-12);
}

#[test]
fn updates_are_simultaneous() {
    // A -> B and B -> C evaluated from the same snapshot: C stays at 0 after
    // one step because B was 0 when the step started.
    let mut engine = KineticEngine::new();
    engine.add_species("A", 1.0).unwrap();
    engine.add_species("B", 0.0).unwrap();
    engine.add_species("C", 0.0).unwrap();
    engine.add_reaction(&["A"], &["B"], 1.0).unwrap();
    engine.add_reaction(&["B"], &["C"], 1.0).unwrap();
    engine.initialize(IntegrationSettings::default()).unwrap();

    engine.run(1, 0.1).unwrap();

    assert_eq!(engine.concentration("C").unwrap(), 0.0);
}

#[test]
fn reaction_order_does_not_change_result() {
    let species = [Species::new("A", 1.0), Species::new("B", 0.5), Species::new("C", 0.0)];
    let reactions = [
        Reaction::new(["A", "B"], ["C"], 1.5),
        Reaction::new(["C"], ["A"], 0.2),
        Reaction::new(["B"], ["C", "C"], 0.7),
    ];

    let build = |order: &[usize]| {
        let mut builder = KineticBuilder::new();
        for s in &species {
            builder = builder.with_species(s.clone());
        }
        for &r in order {
            builder = builder.with_reaction(reactions[r].clone());
        }
        let mut engine = builder.build().unwrap();
        engine.run(50, 0.01).unwrap();
        engine.export_trajectory().unwrap()
    };

    let forward = build(&[0, 1, 2]);
    let shuffled = build(&[2, 0, 1]);
    for (a, b) in forward.series.iter().zip(&shuffled.series) {
        for (x, y) in a.values.iter().zip(&b.values) {
            assert!((x - y).abs() < 1e-12);
        }
    }
}

#[test]
fn stable_species_never_change() {
    let mut engine = hydrogen_chloride(IntegrationSettings::default().with_steps_per_cycle(5));
    engine.run(40, 0.05).unwrap();
    engine.run(10, 0.1).unwrap();

    let m = engine.index_of("M").unwrap();
    let initial = 0.3f64.to_bits();
    assert!(engine.trajectory().column(m).all(|c| c.to_bits() == initial));
}

#[test]
fn element_totals_are_conserved() {
    let mut engine = hydrogen_chloride(IntegrationSettings::default().with_steps_per_cycle(4));
    engine.run(100, 0.02).unwrap();

    // hydrogen: 2*H2 + HCl, chlorine: 2*Cl2 + HCl
    assert!(conservation_drift(&engine, &[2.0, 0.0, 1.0, 0.0]) < 1e-12);
    assert!(conservation_drift(&engine, &[0.0, 2.0, 1.0, 0.0]) < 1e-12);
}

#[test]
fn identical_call_sequences_are_bit_identical() {
    let run = || {
        let mut engine = hydrogen_chloride(IntegrationSettings::default().with_steps_per_cycle(3));
        engine.run(25, 0.04).unwrap();
        engine.run(5, 0.2).unwrap();
        engine.trajectory().clone()
    };
    let first = run();
    let second = run();

    assert_eq!(first.len(), second.len());
    for (a, b) in first.rows().iter().zip(second.rows()) {
        assert!(a.iter().zip(b).all(|(x, y)| x.to_bits() == y.to_bits()));
    }
}

#[test]
fn time_accumulates_across_runs() {
    let mut engine = first_order(IntegrationSettings::default());
    engine.run(2, 0.5).unwrap();
    engine.run(2, 0.25).unwrap();

    assert_eq!(engine.trajectory().times(), &[0.0, 0.5, 1.0, 1.25, 1.5]);
}

// =================================================================================================
// Stability guard
// =================================================================================================

#[test]
fn large_step_is_rejected_by_criterion() {
    let mut engine = first_order(IntegrationSettings::default().with_stability_check(0.05));
    assert!(matches!(engine.run(1, 0.1), Err(KineticError::StepTooLarge { .. })));
    assert_eq!(engine.trajectory().len(), 1);
}

#[test]
fn sub_stepping_satisfies_criterion() {
    let mut engine = first_order(
        IntegrationSettings::default()
            .with_steps_per_cycle(4)
            .with_stability_check(0.05),
    );
    engine.run(10, 0.1).unwrap();
    assert_eq!(engine.trajectory().len(), 11);
}

#[test]
fn guard_is_disabled_without_check() {
    let settings = IntegrationSettings {
        stability_criterion: Some(0.05),
        ..Default::default()
    };
    let mut engine = first_order(settings);
    engine.run(1, 0.1).unwrap();
    assert_eq!(engine.trajectory().len(), 2);
}

#[test]
fn guard_ignores_production() {
    // B grows from 0.1 to 0.2 in one step, a 100% relative increase, which
    // the consumption-only guard does not count.
    let mut engine = KineticEngine::new();
    engine.add_stable_species("S", 1.0).unwrap();
    engine.add_species("B", 0.1).unwrap();
    engine.add_reaction(&["S"], &["S", "B"], 1.0).unwrap();
    engine
        .initialize(IntegrationSettings::default().with_stability_check(0.05))
        .unwrap();

    engine.run(1, 0.1).unwrap();
    assert!((engine.concentration("B").unwrap() - 0.2).abs() < 1e-12);
}

#[test]
fn failure_keeps_only_completed_cycles() {
    // B accumulates from a stable source and destroys A, so A's depletion
    // ratio (0.1 * B per step) grows every cycle until it crosses 0.2.
    let mut engine = KineticEngine::new();
    engine.add_stable_species("S", 1.0).unwrap();
    engine.add_species("A", 1.0).unwrap();
    engine.add_species("B", 0.0).unwrap();
    engine.add_reaction(&["S"], &["S", "B"], 1.0).unwrap();
    engine.add_reaction(&["A", "B"], &["B"], 1.0).unwrap();
    engine
        .initialize(IntegrationSettings::default().with_stability_check(0.2))
        .unwrap();

    let cycle = match engine.run(1000, 0.1) {
        Err(KineticError::StepTooLarge { species, cycle, .. }) => {
            assert_eq!(species, "A");
            cycle
        }
        other => panic!("expected StepTooLarge, got {other:?}"),
    };
    assert!(cycle > 20);
    assert_eq!(engine.trajectory().len(), cycle);
    assert_eq!(engine.stage(), Stage::Ran);
}

// =================================================================================================
// Reset
// =================================================================================================

#[test]
fn reset_keeps_last_row_and_allows_running_again() {
    let mut engine = first_order(IntegrationSettings::default());
    engine.run(2, 0.1).unwrap();
    engine.run(2, 0.1).unwrap();
    assert_eq!(engine.trajectory().len(), 5);
    let last = engine.trajectory().last_row().unwrap().to_vec();

    engine.reset().unwrap();

    assert_eq!(engine.trajectory().len(), 1);
    assert_eq!(engine.trajectory().row(0).unwrap(), last.as_slice());
    assert_eq!(engine.stage(), Stage::Initialized);

    engine.run(1, 0.1).unwrap();
    assert_eq!(engine.trajectory().len(), 2);
    assert_eq!(engine.trajectory().times(), &[0.0, 0.1]);
}
