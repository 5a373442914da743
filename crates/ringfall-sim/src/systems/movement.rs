//! Movement and close-range combat: player intent, hostile steering,
//! passive regen, contact damage, and sentry shots.

use ringfall_core::components::{AttackClock, Health, Hostile, HostileInfo, Player, PlayerStats};
use ringfall_core::constants::*;
use ringfall_core::enums::HostileArchetype;
use ringfall_core::types::{Position, Velocity};
use ringfall_spatial::segment_clear;

use crate::store::{GameStore, Mutation};
use ringfall_core::commands::InputIntent;

/// Bombers approach on a skewed heading instead of a straight chase.
const BOMBER_ORBIT_BIAS: f64 = 0.35;

pub fn run(store: &mut GameStore, input: &InputIntent, dt: f64) {
    move_player(store, input, dt);

    let player_pos = match store.player_position() {
        Some(pos) => pos,
        None => return,
    };

    steer_hostiles(store, &player_pos, dt);

    let obstacles = store.obstacle_circles();
    let mut player_damage = 0.0;
    for (_, (_, info, pos, clock)) in store
        .world_mut()
        .query_mut::<(&Hostile, &HostileInfo, &Position, &mut AttackClock)>()
    {
        clock.cooldown_remaining = (clock.cooldown_remaining - dt).max(0.0);
        if clock.cooldown_remaining > 0.0 {
            continue;
        }
        match info.archetype {
            HostileArchetype::Sentry => {
                if pos.planar_distance_to(&player_pos) <= SENTRY_FIRE_RANGE
                    && segment_clear(pos, &player_pos, &obstacles)
                {
                    player_damage += SENTRY_SHOT_DAMAGE;
                    clock.cooldown_remaining = SENTRY_FIRE_INTERVAL;
                }
            }
            HostileArchetype::Grunt | HostileArchetype::Bomber => {
                if pos.planar_distance_to(&player_pos) <= HOSTILE_CONTACT_RANGE {
                    player_damage += HOSTILE_CONTACT_DAMAGE;
                    clock.cooldown_remaining = HOSTILE_CONTACT_INTERVAL;
                }
            }
        }
    }

    if player_damage > 0.0 {
        store.apply(Mutation::DamagePlayer {
            amount: player_damage,
        });
    }
}

fn move_player(store: &mut GameStore, input: &InputIntent, dt: f64) {
    let bound = WORLD_HALF_EXTENT - PLAYER_BODY_RADIUS;
    for (_, (_, pos, health, stats)) in store
        .world_mut()
        .query_mut::<(&Player, &mut Position, &mut Health, &PlayerStats)>()
    {
        let len = (input.move_x * input.move_x + input.move_y * input.move_y).sqrt();
        if len > f64::EPSILON {
            // Normalize only when the intent exceeds unit length so analog
            // part-way deflection still scales speed.
            let scale = if len > 1.0 { 1.0 / len } else { 1.0 };
            pos.x += input.move_x * scale * stats.move_speed * dt;
            pos.y += input.move_y * scale * stats.move_speed * dt;
            pos.clamp_planar(bound);
        }

        if health.current > 0.0 {
            health.current = (health.current + stats.regen_per_sec * dt).min(health.max);
        }
    }
}

fn steer_hostiles(store: &mut GameStore, player_pos: &Position, dt: f64) {
    let bound = WORLD_HALF_EXTENT;
    for (_, (_, info, pos, vel)) in store
        .world_mut()
        .query_mut::<(&Hostile, &HostileInfo, &mut Position, &mut Velocity)>()
    {
        let dx = player_pos.x - pos.x;
        let dy = player_pos.y - pos.y;
        let dist = (dx * dx + dy * dy).sqrt();

        match info.archetype {
            HostileArchetype::Sentry => {
                *vel = Velocity::default();
                continue;
            }
            HostileArchetype::Grunt => {
                if dist > f64::EPSILON {
                    let speed = GRUNT_SPEED * info.speed_factor;
                    vel.x = dx / dist * speed;
                    vel.y = dy / dist * speed;
                    vel.z = 0.0;
                }
            }
            HostileArchetype::Bomber => {
                if dist > f64::EPSILON {
                    let speed = BOMBER_SPEED * info.speed_factor;
                    let (sin_b, cos_b) = BOMBER_ORBIT_BIAS.sin_cos();
                    let ox = (dx * cos_b - dy * sin_b) / dist;
                    let oy = (dx * sin_b + dy * cos_b) / dist;
                    vel.x = ox * speed;
                    vel.y = oy * speed;
                    vel.z = 0.0;
                }
                pos.z = BOMBER_ALTITUDE;
            }
        }

        pos.x += vel.x * dt;
        pos.y += vel.y * dt;
        pos.clamp_planar(bound);
    }
}
