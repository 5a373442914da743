//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Marks the player's unit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player;

/// Marks an entity as a hostile unit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hostile;

/// Current and maximum health.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: f64,
    pub max: f64,
}

impl Health {
    pub fn full(max: f64) -> Self {
        Self { current: max, max }
    }
}

/// Identity and behavior profile of a hostile unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostileInfo {
    /// Unique, monotonically assigned id.
    pub id: u64,
    pub archetype: HostileArchetype,
    /// Per-unit movement speed multiplier.
    pub speed_factor: f64,
}

/// Attack pacing for a hostile (contact hits or sentry shots).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AttackClock {
    pub cooldown_remaining: f64,
}

/// A terrain obstacle. Immutable for the match lifetime; only a
/// collision/clearance/line-of-sight constraint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Obstacle {
    pub radius: f64,
}

/// Mutable player stats, adjusted by rank-ups and upgrade picks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerStats {
    pub move_speed: f64,
    pub turret_damage: f64,
    pub fire_interval: f64,
    pub bullet_speed: f64,
    pub regen_per_sec: f64,
    pub sensor_range: f64,
    /// Multiplier applied to every mount's base damage.
    pub damage_multiplier: f64,
}

impl Default for PlayerStats {
    fn default() -> Self {
        use crate::constants::*;
        Self {
            move_speed: PLAYER_MOVE_SPEED,
            turret_damage: PLAYER_TURRET_DAMAGE,
            fire_interval: PLAYER_FIRE_INTERVAL,
            bullet_speed: PLAYER_BULLET_SPEED,
            regen_per_sec: PLAYER_REGEN_PER_SEC,
            sensor_range: PLAYER_SENSOR_RANGE,
            damage_multiplier: 1.0,
        }
    }
}

/// One equipped weapon mount.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponMount {
    pub kind: WeaponKind,
    pub cooldown_remaining: f64,
    /// Hostile id currently tracked, revalidated every tick.
    pub target: Option<u64>,
}

impl WeaponMount {
    pub fn new(kind: WeaponKind) -> Self {
        Self {
            kind,
            cooldown_remaining: 0.0,
            target: None,
        }
    }
}

/// The player's ordered weapon loadout (at most `MAX_WEAPON_MOUNTS`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Armament {
    pub mounts: Vec<WeaponMount>,
}
