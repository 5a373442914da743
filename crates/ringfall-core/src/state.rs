//! Match snapshot: the complete visible state handed to collaborators
//! (presentation, audio sink) after each tick or store commit.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::AudioEvent;
use crate::types::{Position, SimTime};

/// Complete match state. Every `Vec` is freshly allocated per build so
/// identity-based change detection in collaborators is reliable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub player: PlayerView,
    pub hostiles: Vec<HostileView>,
    pub obstacles: Vec<ObstacleView>,
    pub projectiles: Vec<ProjectileView>,
    pub containment: ContainmentView,
    pub hazard: HazardView,
    pub progression: ProgressionView,
    pub audio_events: Vec<AudioEvent>,
}

/// Player unit for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Position,
    pub health: f64,
    pub max_health: f64,
    pub move_speed: f64,
    pub damage_multiplier: f64,
    /// Equipped mounts in slot order.
    pub weapons: Vec<WeaponKind>,
}

impl Default for PlayerView {
    fn default() -> Self {
        Self {
            position: Position::default(),
            health: crate::constants::PLAYER_MAX_HEALTH,
            max_health: crate::constants::PLAYER_MAX_HEALTH,
            move_speed: crate::constants::PLAYER_MOVE_SPEED,
            damage_multiplier: 1.0,
            weapons: Vec::new(),
        }
    }
}

/// A hostile unit for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostileView {
    pub id: u64,
    pub position: Position,
    pub health: f64,
    pub max_health: f64,
    pub archetype: HostileArchetype,
}

/// A terrain obstacle for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleView {
    pub position: Position,
    pub radius: f64,
}

/// An in-flight projectile for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub kind: WeaponKind,
    pub position: Position,
    /// Heading in radians (0 = North, clockwise).
    pub heading: f64,
}

/// Containment boundary status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainmentView {
    pub phase: ContainmentPhase,
    pub center: Position,
    pub current_radius: f64,
    pub target_radius: f64,
    pub shrink_rate: f64,
    /// True once the boundary has activated (phase != Dormant).
    pub active: bool,
}

impl Default for ContainmentView {
    fn default() -> Self {
        Self {
            phase: ContainmentPhase::Dormant,
            center: Position::default(),
            current_radius: crate::constants::CONTAINMENT_INITIAL_RADIUS,
            target_radius: crate::constants::CONTAINMENT_INITIAL_RADIUS,
            shrink_rate: 0.0,
            active: false,
        }
    }
}

/// Hazard bombardment status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HazardView {
    pub phase: HazardPhase,
    pub center: Position,
    pub radius: f64,
    pub owner_rank: Option<u32>,
    /// Warning flag for the HUD (phase == Warning).
    pub warning: bool,
    /// Active flag (phase is Warning or Bombarding).
    pub active: bool,
    pub bombs: Vec<BombView>,
}

/// A falling bomb awaiting detonation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BombView {
    pub position: Position,
    pub fuse_remaining: f64,
}

/// Progression status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionView {
    pub rank: u32,
    pub score: u32,
    pub kills_this_rank: u32,
    pub kills_required: u32,
    pub offered_upgrades: Vec<StatId>,
    pub pending_rank_up: bool,
}

impl Default for ProgressionView {
    fn default() -> Self {
        Self {
            rank: 1,
            score: 0,
            kills_this_rank: 0,
            kills_required: 1,
            offered_upgrades: Vec::new(),
            pending_rank_up: false,
        }
    }
}
