//! Explicit mass-action kinetics.
//!
//! The [`simulation::engine::KineticEngine`] owns a reaction network and its
//! concentration trajectory; everything else in this crate reads from it.

pub mod analysis;
pub mod error;
pub mod export;
pub mod loader;
pub mod simulation;

pub use error::KineticError;
pub use simulation::{builder::KineticBuilder, engine::KineticEngine};
