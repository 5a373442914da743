//! Containment boundary: shrink integration and periodic outside damage.
//!
//! Re-anchoring (new target and rate at rank milestones) happens inside the
//! store's rank-up commit; this system only integrates and applies damage.

use ringfall_core::constants::*;
use ringfall_core::enums::ContainmentPhase;
use ringfall_core::types::Position;

use crate::store::{GameStore, Mutation};

pub fn run(store: &mut GameStore, dt: f64) {
    if store.containment().phase == ContainmentPhase::Dormant {
        return;
    }

    if store.containment().phase == ContainmentPhase::Shrinking {
        let containment = store.containment_mut();
        containment.current_radius -= containment.shrink_rate * dt;
        if containment.current_radius <= containment.target_radius {
            containment.current_radius = containment.target_radius;
            containment.phase = ContainmentPhase::Holding;
            log::info!(
                "containment holding at {:.0}m",
                containment.current_radius
            );
        }
    }

    // Outside damage applies on a fixed interval, not per tick.
    let containment = store.containment_mut();
    containment.damage_clock += dt;
    if containment.damage_clock < CONTAINMENT_DAMAGE_INTERVAL {
        return;
    }
    containment.damage_clock -= CONTAINMENT_DAMAGE_INTERVAL;
    let radius = containment.current_radius;

    apply_outside_damage(store, radius);
}

fn apply_outside_damage(store: &mut GameStore, radius: f64) {
    let center = Position::ground(0.0, 0.0);

    let player_outside = store
        .player_position()
        .map(|pos| pos.planar_distance_to(&center) > radius)
        .unwrap_or(false);

    let outside_hostiles: Vec<u64> = store
        .hostile_positions()
        .into_iter()
        .filter(|(_, pos)| pos.planar_distance_to(&center) > radius)
        .map(|(id, _)| id)
        .collect();

    if player_outside {
        store.apply(Mutation::DamagePlayer {
            amount: OUTSIDE_DAMAGE,
        });
    }
    for id in outside_hostiles {
        store.apply(Mutation::DamageHostile {
            id,
            amount: OUTSIDE_DAMAGE,
        });
    }
}
