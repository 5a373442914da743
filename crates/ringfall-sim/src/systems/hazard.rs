//! Hazard bombardment: bomb spawn cadence, fuse countdown, detonations,
//! and the sim-time cooldown back to Inactive.
//!
//! Phase transitions in and out of Warning/Bombarding are driven by the
//! engine's deferred timers; this system runs the per-tick mechanics of
//! whatever phase the FSM is in.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use ringfall_core::constants::*;
use ringfall_core::enums::HazardPhase;
use ringfall_core::types::Position;

use crate::store::{Bomb, GameStore, Mutation};
use crate::systems::projectiles::splash_damage;

pub fn run(store: &mut GameStore, rng: &mut ChaCha8Rng, dt: f64) {
    match store.hazard().phase {
        HazardPhase::Inactive | HazardPhase::Warning => {}
        HazardPhase::Bombarding => {
            spawn_bombs(store, rng, dt);
            tick_fuses(store, dt);
        }
        HazardPhase::Cooldown => {
            let hazard = store.hazard_mut();
            hazard.cooldown_clock += dt;
            if hazard.cooldown_clock >= HAZARD_COOLDOWN_SECS {
                store.apply(Mutation::HazardReset);
            }
        }
    }
}

fn spawn_bombs(store: &mut GameStore, rng: &mut ChaCha8Rng, dt: f64) {
    let hazard = store.hazard_mut();
    hazard.spawn_clock += dt;
    while hazard.spawn_clock >= BOMB_SPAWN_INTERVAL && hazard.bombs_spawned < BOMB_CAP {
        hazard.spawn_clock -= BOMB_SPAWN_INTERVAL;
        // Uniform over the hazard disc.
        let r = HAZARD_RADIUS * rng.gen_range(0.0f64..1.0).sqrt();
        let angle = rng.gen_range(0.0..std::f64::consts::TAU);
        let position = Position::ground(
            hazard.center.x + r * angle.sin(),
            hazard.center.y + r * angle.cos(),
        );
        hazard.bombs.push(Bomb {
            position,
            fuse_remaining: BOMB_FUSE_SECS,
        });
        hazard.bombs_spawned += 1;
    }
}

fn tick_fuses(store: &mut GameStore, dt: f64) {
    let hazard = store.hazard_mut();
    let mut detonations: Vec<Position> = Vec::new();
    hazard.bombs.retain_mut(|bomb| {
        bomb.fuse_remaining -= dt;
        if bomb.fuse_remaining <= 0.0 {
            detonations.push(bomb.position);
            false
        } else {
            true
        }
    });

    for blast in detonations {
        detonate(store, &blast);
    }
}

/// Linear-falloff area damage to player and hostiles alike.
fn detonate(store: &mut GameStore, blast: &Position) {
    let player_damage = store
        .player_position()
        .map(|pos| splash_damage(BOMB_DAMAGE, pos.planar_distance_to(blast), BOMB_BLAST_RADIUS))
        .unwrap_or(0.0);

    let hostile_damage: Vec<(u64, f64)> = store
        .hostile_positions()
        .into_iter()
        .map(|(id, pos)| {
            (
                id,
                splash_damage(BOMB_DAMAGE, pos.planar_distance_to(blast), BOMB_BLAST_RADIUS),
            )
        })
        .filter(|(_, amount)| *amount > 0.0)
        .collect();

    if player_damage > 0.0 {
        store.apply(Mutation::DamagePlayer {
            amount: player_damage,
        });
    }
    for (id, amount) in hostile_damage {
        store.apply(Mutation::DamageHostile { id, amount });
    }
}
