//! Weapon mounts: target validation, acquisition, and firing.
//!
//! Each mount revalidates its tracked target every tick (alive, in range,
//! clear line of sight) before considering a shot. A target destroyed
//! between acquisition and fire is simply dropped; the mount reselects
//! next tick.

use ringfall_core::commands::InputIntent;
use ringfall_core::components::{Armament, Player, PlayerStats};
use ringfall_core::constants::*;
use ringfall_core::enums::WeaponKind;
use ringfall_core::events::AudioEvent;
use ringfall_core::types::Position;
use ringfall_spatial::{segment_clear, Circle};

use crate::store::GameStore;
use crate::systems::projectiles::{Payload, Projectile};

/// Cannon reach as a fraction of sensor range.
const CANNON_RANGE_SENSOR_FRACTION: f64 = 0.85;

/// Resolved firing parameters for one mount kind.
pub struct WeaponProfile {
    pub damage: f64,
    pub fire_interval: f64,
    pub speed: f64,
    pub range: f64,
    pub payload: Payload,
    pub homing: bool,
}

/// Profile for a mount, derived from the player's current stats. The
/// cannon scales with every offensive stat; the specialty mounts have
/// fixed ballistics and scale through the damage multiplier alone.
pub fn profile_for(kind: WeaponKind, stats: &PlayerStats) -> WeaponProfile {
    match kind {
        WeaponKind::Cannon => WeaponProfile {
            damage: stats.turret_damage,
            fire_interval: stats.fire_interval,
            speed: stats.bullet_speed,
            range: stats.sensor_range * CANNON_RANGE_SENSOR_FRACTION,
            payload: Payload::Direct,
            homing: false,
        },
        WeaponKind::RocketPod => WeaponProfile {
            damage: ROCKET_DAMAGE,
            fire_interval: ROCKET_FIRE_INTERVAL,
            speed: ROCKET_SPEED,
            range: ROCKET_RANGE,
            payload: Payload::Splash {
                blast_radius: ROCKET_BLAST_RADIUS,
            },
            homing: true,
        },
        WeaponKind::ArcCoil => WeaponProfile {
            damage: ARC_DAMAGE,
            fire_interval: ARC_FIRE_INTERVAL,
            speed: ARC_SPEED,
            range: ARC_RANGE,
            payload: Payload::Chain {
                range: CHAIN_RANGE,
                falloff: CHAIN_FALLOFF,
                max_hops: CHAIN_MAX_HOPS,
            },
            homing: false,
        },
        WeaponKind::Lance => WeaponProfile {
            damage: LANCE_DAMAGE,
            fire_interval: LANCE_FIRE_INTERVAL,
            speed: LANCE_SPEED,
            range: LANCE_RANGE,
            payload: Payload::Direct,
            homing: false,
        },
    }
}

pub fn run(store: &mut GameStore, projectiles: &mut Vec<Projectile>, input: &InputIntent, dt: f64) {
    let player_pos = match store.player_position() {
        Some(pos) => pos,
        None => return,
    };
    let stats = match store.player_stats() {
        Some(stats) => stats,
        None => return,
    };
    let hostiles = store.hostile_positions();
    let obstacles = store.obstacle_circles();

    let mut fired: Vec<AudioEvent> = Vec::new();
    for (_, (_, armament)) in store.world_mut().query_mut::<(&Player, &mut Armament)>() {
        for mount in armament.mounts.iter_mut() {
            mount.cooldown_remaining = (mount.cooldown_remaining - dt).max(0.0);
            let profile = profile_for(mount.kind, &stats);
            let range = profile.range.min(stats.sensor_range);

            mount.target = validate_or_acquire(
                mount.target,
                &player_pos,
                range,
                &hostiles,
                &obstacles,
            );

            if mount.cooldown_remaining > 0.0 || input.suppress_fire {
                continue;
            }
            let Some(target_id) = mount.target else {
                continue;
            };
            let Some((_, target_pos)) = hostiles.iter().find(|(id, _)| *id == target_id) else {
                continue;
            };

            projectiles.push(Projectile {
                kind: mount.kind,
                position: player_pos,
                heading: player_pos.bearing_to(target_pos),
                speed: profile.speed,
                damage: profile.damage * stats.damage_multiplier,
                payload: profile.payload,
                homing_target: if profile.homing { Some(target_id) } else { None },
                traveled: 0.0,
                age: 0.0,
                max_travel: profile.range,
            });
            mount.cooldown_remaining = profile.fire_interval;
            fired.push(AudioEvent::WeaponFired { kind: mount.kind });
        }
    }

    for event in fired {
        store.push_audio(event);
    }
}

/// Keep the current target while it is alive, in range, and visible;
/// otherwise acquire the nearest hostile satisfying the same checks.
fn validate_or_acquire(
    current: Option<u64>,
    player_pos: &Position,
    range: f64,
    hostiles: &[(u64, Position)],
    obstacles: &[Circle],
) -> Option<u64> {
    let eligible = |pos: &Position| {
        player_pos.planar_distance_to(pos) <= range
            && segment_clear(player_pos, pos, obstacles)
    };

    if let Some(id) = current {
        if let Some((_, pos)) = hostiles.iter().find(|(hid, _)| *hid == id) {
            if eligible(pos) {
                return Some(id);
            }
        }
    }

    hostiles
        .iter()
        .filter(|(_, pos)| eligible(pos))
        .min_by(|(_, a), (_, b)| {
            player_pos
                .planar_distance_to(a)
                .partial_cmp(&player_pos.planar_distance_to(b))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(id, _)| *id)
}
