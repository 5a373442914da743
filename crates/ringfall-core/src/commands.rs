//! Player commands sent from the host to the simulation.
//!
//! Commands are validated and queued for processing at the next tick boundary.
//! Invalid requests (unknown weapon, stat at cap) are silent no-ops.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Discrete movement/fire intent for the current tick onward.
/// The latest intent persists until replaced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputIntent {
    /// Desired movement direction, East component (normalized by the engine).
    pub move_x: f64,
    /// Desired movement direction, North component.
    pub move_y: f64,
    /// Hold fire: mounts keep tracking targets but do not discharge.
    pub suppress_fire: bool,
}

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Command {
    /// Reset the match to fixed defaults and begin again.
    Restart,
    /// Toggle between Active and Paused. Ignored after game-over.
    TogglePause,
    /// Replace the current movement/fire intent.
    ApplyInput { intent: InputIntent },
    /// Spend the pending upgrade offer on one stat axis.
    UpgradeStat { stat: StatId },
    /// Equip a weapon mount of the given kind.
    SelectWeapon { weapon: WeaponKind },
}
