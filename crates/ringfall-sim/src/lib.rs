//! Simulation engine for RINGFALL.
//!
//! Owns the authoritative match state, runs systems at a fixed tick rate,
//! and produces `MatchSnapshot`s for the host. Completely headless,
//! enabling deterministic testing.

pub mod engine;
pub mod scheduler;
pub mod store;
pub mod systems;
pub mod world_setup;

pub use ringfall_core as core;

pub use engine::{CombatEngine, SimConfig};
pub use store::{GameStore, Mutation};
