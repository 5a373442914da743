//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- World bounds ---

/// Half-extent of the square arena (meters). World spans ±this on x and y.
pub const WORLD_HALF_EXTENT: f64 = 100.0;

/// Placement keeps new entities at least this far inside the world edge.
pub const EDGE_BUFFER: f64 = 4.0;

// --- Player ---

pub const PLAYER_MAX_HEALTH: f64 = 100.0;

/// Base movement speed (m/s).
pub const PLAYER_MOVE_SPEED: f64 = 14.0;

/// Base turret damage per shot.
pub const PLAYER_TURRET_DAMAGE: f64 = 12.0;

/// Base turret fire interval (seconds).
pub const PLAYER_FIRE_INTERVAL: f64 = 0.5;

/// Base turret projectile speed (m/s).
pub const PLAYER_BULLET_SPEED: f64 = 60.0;

/// Passive health regeneration (per second).
pub const PLAYER_REGEN_PER_SEC: f64 = 1.5;

/// Sensor range bounding target acquisition (meters).
pub const PLAYER_SENSOR_RANGE: f64 = 55.0;

/// Collision radius of the player body.
pub const PLAYER_BODY_RADIUS: f64 = 1.6;

/// Maximum equipped weapon mounts.
pub const MAX_WEAPON_MOUNTS: usize = 4;

// --- Hostiles ---

/// Grunt health at rank 1 (before rank scaling).
pub const GRUNT_HEALTH: f64 = 85.0;
pub const SENTRY_HEALTH: f64 = 120.0;
pub const BOMBER_HEALTH: f64 = 60.0;

/// Ground chaser speed (m/s).
pub const GRUNT_SPEED: f64 = 7.0;
/// Aerial unit speed (m/s).
pub const BOMBER_SPEED: f64 = 9.0;
/// Cruise altitude for bombers (meters).
pub const BOMBER_ALTITUDE: f64 = 6.0;

/// Hostile health growth per rank (fractional).
pub const HOSTILE_HEALTH_GROWTH: f64 = 0.12;

/// Contact damage dealt when a hostile reaches the player.
pub const HOSTILE_CONTACT_DAMAGE: f64 = 8.0;
/// Minimum seconds between contact hits from one hostile.
pub const HOSTILE_CONTACT_INTERVAL: f64 = 0.8;
/// Planar range at which contact damage applies.
pub const HOSTILE_CONTACT_RANGE: f64 = 2.2;

/// Sentry ranged shot parameters.
pub const SENTRY_FIRE_INTERVAL: f64 = 2.5;
pub const SENTRY_SHOT_DAMAGE: f64 = 6.0;
pub const SENTRY_FIRE_RANGE: f64 = 30.0;

/// Score awarded per archetype kill.
pub const SCORE_GRUNT: u32 = 10;
pub const SCORE_SENTRY: u32 = 25;
pub const SCORE_BOMBER: u32 = 15;

// --- Spawning & placement ---

/// Hostiles alive at match start.
pub const INITIAL_HOSTILE_COUNT: usize = 6;

/// Terrain obstacles generated at match start.
pub const OBSTACLE_COUNT: usize = 10;
pub const OBSTACLE_RADIUS_MIN: f64 = 2.0;
pub const OBSTACLE_RADIUS_MAX: f64 = 5.0;

/// Obstacle clearance required of placements: radius * mult + clearance.
pub const OBSTACLE_CLEARANCE_MULT: f64 = 1.25;
pub const MIN_OBSTACLE_CLEARANCE: f64 = 1.0;

/// Minimum separation between hostile spawn points.
pub const HOSTILE_MIN_SEPARATION: f64 = 6.0;
/// Minimum separation between generated obstacles.
pub const OBSTACLE_MIN_SEPARATION: f64 = 8.0;

/// Spawn keep-out radius around the player.
pub const SPAWN_PLAYER_CLEARANCE: f64 = 18.0;

// --- Respawn ---

/// Replacement spawn delay at rank 1 (wall-clock seconds).
pub const RESPAWN_DELAY_BASE: f64 = 3.0;
/// Delay reduction per rank beyond 1.
pub const RESPAWN_DELAY_STEP: f64 = 0.15;
/// Delay floor.
pub const RESPAWN_DELAY_MIN: f64 = 0.8;

// --- Containment zone ---

/// Rank at which the containment boundary activates.
pub const CONTAINMENT_START_RANK: u32 = 3;

/// Boundary radius before the first shrink.
pub const CONTAINMENT_INITIAL_RADIUS: f64 = 95.0;

/// Boundary-change milestones: (rank, target radius). The shrink rate is
/// recomputed at every rank-up so the current target is reached before the
/// next milestone rank. Tuned values, not a curve.
pub const CONTAINMENT_MILESTONES: &[(u32, f64)] =
    &[(3, 80.0), (6, 62.0), (9, 46.0), (12, 34.0), (15, 26.0)];

/// Damage applied to each unit outside the boundary, once per interval.
pub const OUTSIDE_DAMAGE: f64 = 4.0;
/// Interval between outside-damage applications (sim seconds).
pub const CONTAINMENT_DAMAGE_INTERVAL: f64 = 1.0;

/// Shrink rate over-provisioning so shrink completes slightly early.
pub const SHRINK_SAFETY_MARGIN: f64 = 1.15;
/// Estimated seconds the player needs per kill (shrink pacing input).
pub const EST_SECS_PER_KILL: f64 = 6.0;

// --- Hazard bombardment ---

/// First rank eligible to claim a hazard sequence.
pub const HAZARD_START_RANK: u32 = 4;
/// Hazard ranks repeat every this many ranks after the first.
pub const HAZARD_RANK_INTERVAL: u32 = 3;

pub const HAZARD_WARNING_SECS: f64 = 3.0;
pub const HAZARD_BOMBARD_SECS: f64 = 8.0;
pub const HAZARD_COOLDOWN_SECS: f64 = 5.0;

/// Radius of the bombarded circle.
pub const HAZARD_RADIUS: f64 = 22.0;

/// Seconds between bomb spawns while Bombarding.
pub const BOMB_SPAWN_INTERVAL: f64 = 0.35;
/// Maximum bombs spawned in one sequence.
pub const BOMB_CAP: u32 = 20;
/// Seconds between a bomb appearing and detonating.
pub const BOMB_FUSE_SECS: f64 = 0.9;
/// Blast radius of one bomb.
pub const BOMB_BLAST_RADIUS: f64 = 7.0;
/// Damage at the center of a bomb blast (linear falloff to the edge).
pub const BOMB_DAMAGE: f64 = 22.0;

// --- Weapons ---

/// Rocket pod: splash payload, homing.
pub const ROCKET_DAMAGE: f64 = 18.0;
pub const ROCKET_FIRE_INTERVAL: f64 = 1.6;
pub const ROCKET_SPEED: f64 = 34.0;
pub const ROCKET_RANGE: f64 = 55.0;
pub const ROCKET_BLAST_RADIUS: f64 = 6.0;

/// Arc coil: chain payload.
pub const ARC_DAMAGE: f64 = 10.0;
pub const ARC_FIRE_INTERVAL: f64 = 1.1;
pub const ARC_SPEED: f64 = 80.0;
pub const ARC_RANGE: f64 = 36.0;

/// Lance: long-range direct shot.
pub const LANCE_DAMAGE: f64 = 30.0;
pub const LANCE_FIRE_INTERVAL: f64 = 2.2;
pub const LANCE_SPEED: f64 = 120.0;
pub const LANCE_RANGE: f64 = 80.0;

/// Chain hops search this far from the last hit point.
pub const CHAIN_RANGE: f64 = 9.0;
/// Per-hop damage multiplier, compounded.
pub const CHAIN_FALLOFF: f64 = 0.65;
/// Maximum hops after the primary hit.
pub const CHAIN_MAX_HOPS: u32 = 4;

/// Homing steering blend limits. Strength ramps from min at
/// `HOMING_FULL_RANGE` (and beyond) up to max at point blank.
pub const HOMING_MIN_STRENGTH: f64 = 0.05;
pub const HOMING_MAX_STRENGTH: f64 = 0.35;
pub const HOMING_FULL_RANGE: f64 = 30.0;

/// Projectiles expire silently past this age (seconds).
pub const PROJECTILE_MAX_AGE: f64 = 3.0;
/// Collision radius for projectile-hostile hits.
pub const PROJECTILE_HIT_RADIUS: f64 = 1.2;

// --- Progression ---

/// Rank tier boundaries for the kill-threshold formula.
pub const RANK_TIER_EARLY_MAX: u32 = 3;
pub const RANK_TIER_MID_MAX: u32 = 9;

/// Extra kills required per rank inside the mid and late tiers.
pub const MID_TIER_KILL_STEP: u32 = 2;
pub const LATE_TIER_KILL_STEP: u32 = 3;

/// No upgrade offers once rank exceeds this.
pub const UPGRADE_CEILING_RANK: u32 = 12;
/// Upgrade options offered per rank-up.
pub const UPGRADE_OFFER_COUNT: usize = 3;
/// Maximum picks per stat axis.
pub const MAX_STAT_LEVEL: u32 = 5;
/// Multiplier applied to a stat per upgrade pick.
pub const STAT_UPGRADE_MULT: f64 = 0.15;

/// Fraction of hostile health scaling granted to base offense per rank-up,
/// further divided by sqrt(rank) so growth diminishes.
pub const OFFENSE_GROWTH_COUPLING: f64 = 0.6;
