//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Match running, systems advance each tick.
    #[default]
    Active,
    /// Sim time frozen; wall-clock timers keep aging.
    Paused,
    /// Player destroyed. All scheduled mutations become no-ops.
    GameOver,
}

/// Hostile archetype category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HostileArchetype {
    /// Ground chaser that closes on the player for contact damage.
    Grunt,
    /// Stationary turret with a ranged, line-of-sight shot.
    Sentry,
    /// Aerial unit attacking from a fixed altitude.
    Bomber,
}

/// Weapon mount kind. At most one mount of each kind may be equipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    /// The base turret: single-target direct hits.
    #[default]
    Cannon,
    /// Homing rocket with splash damage on impact.
    RocketPod,
    /// Fast bolt that chains between nearby hostiles.
    ArcCoil,
    /// Slow-firing, long-range direct shot.
    Lance,
}

/// Player stat axes eligible for upgrade offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatId {
    Damage,
    FireRate,
    MoveSpeed,
    MaxHealth,
    Regen,
    BulletSpeed,
    SensorRange,
}

impl StatId {
    /// All upgradeable axes, in offer order.
    pub const ALL: [StatId; 7] = [
        StatId::Damage,
        StatId::FireRate,
        StatId::MoveSpeed,
        StatId::MaxHealth,
        StatId::Regen,
        StatId::BulletSpeed,
        StatId::SensorRange,
    ];
}

/// Containment boundary lifecycle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContainmentPhase {
    /// Not yet activated (early ranks).
    #[default]
    Dormant,
    /// Radius decreasing toward the target each tick.
    Shrinking,
    /// Radius reached the target; waiting for the next milestone re-anchor.
    Holding,
}

/// Hazard bombardment lifecycle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardPhase {
    #[default]
    Inactive,
    /// Claimed by a rank; warning flag raised, no damage yet.
    Warning,
    /// Bombs spawning and detonating inside the hazard circle.
    Bombarding,
    /// Sequence finished; brief quiet period before Inactive.
    Cooldown,
}
