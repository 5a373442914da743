//! Per-tick simulation systems, run in dependency order by the engine.

pub mod containment;
pub mod hazard;
pub mod movement;
pub mod progression;
pub mod projectiles;
pub mod respawn;
pub mod weapons;
