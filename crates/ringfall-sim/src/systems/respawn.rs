//! Respawn coordination.
//!
//! Each tick the live hostile id set is diffed against the previous tick's;
//! every vanished id gets a delayed replacement spawn scheduled, whatever
//! destroyed it (weapons, containment, hazard bombs). The spawn timer
//! re-checks the game phase at fire time.

use std::collections::HashSet;

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use ringfall_core::constants::*;
use ringfall_core::enums::HostileArchetype;
use ringfall_core::types::Position;
use ringfall_spatial::{find_position, Circle, PlacementQuery};

use crate::scheduler::{ScheduledAction, Scheduler};
use crate::store::GameStore;

/// Per-unit speed variation bounds.
const SPEED_FACTOR_MIN: f64 = 0.85;
const SPEED_FACTOR_MAX: f64 = 1.15;

/// Weighted archetype pick, shifting toward sentries and bombers as rank
/// climbs. Early ranks are all grunts.
pub fn pick_archetype(rng: &mut ChaCha8Rng, rank: u32) -> HostileArchetype {
    let grunt = 6;
    let sentry = if rank >= 2 { 1 + rank / 3 } else { 0 };
    let bomber = if rank >= 3 { 1 + rank / 4 } else { 0 };

    let roll = rng.gen_range(0..grunt + sentry + bomber);
    if roll < grunt {
        HostileArchetype::Grunt
    } else if roll < grunt + sentry {
        HostileArchetype::Sentry
    } else {
        HostileArchetype::Bomber
    }
}

pub fn roll_speed_factor(rng: &mut ChaCha8Rng) -> f64 {
    rng.gen_range(SPEED_FACTOR_MIN..=SPEED_FACTOR_MAX)
}

/// Replacement delay shrinks with rank down to a floor.
pub fn respawn_delay(rank: u32) -> f64 {
    (RESPAWN_DELAY_BASE - RESPAWN_DELAY_STEP * rank.saturating_sub(1) as f64)
        .max(RESPAWN_DELAY_MIN)
}

pub fn run(
    store: &mut GameStore,
    rng: &mut ChaCha8Rng,
    scheduler: &mut Scheduler,
    seen: &mut HashSet<u64>,
    wall_clock_secs: f64,
) {
    let live = store.hostile_positions();
    let current: HashSet<u64> = live.iter().map(|(id, _)| *id).collect();

    // Sorted diff keeps RNG consumption deterministic.
    let mut vanished: Vec<u64> = seen.difference(&current).copied().collect();
    vanished.sort_unstable();
    *seen = current;

    if vanished.is_empty() {
        return;
    }

    let rank = store.progression().rank;
    let obstacles = store.obstacle_circles();
    let existing: Vec<Position> = live.iter().map(|(_, pos)| *pos).collect();
    let keep_out: Vec<Circle> = store
        .player_position()
        .map(|pos| vec![Circle::at(&pos, SPAWN_PLAYER_CLEARANCE)])
        .unwrap_or_default();

    for _ in vanished {
        let archetype = pick_archetype(rng, rank);
        let query = PlacementQuery {
            area_half_extent: WORLD_HALF_EXTENT,
            existing: &existing,
            obstacles: &obstacles,
            keep_out: &keep_out,
            min_separation: HOSTILE_MIN_SEPARATION,
        };
        let position = find_position(rng, &query);
        let speed_factor = roll_speed_factor(rng);
        scheduler.schedule_in(
            wall_clock_secs,
            respawn_delay(rank),
            ScheduledAction::RespawnHostile {
                archetype,
                position,
                speed_factor,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_shrinks_with_rank_to_floor() {
        assert_eq!(respawn_delay(1), RESPAWN_DELAY_BASE);
        assert!(respawn_delay(5) < respawn_delay(2));
        assert_eq!(respawn_delay(100), RESPAWN_DELAY_MIN);
    }

    #[test]
    fn test_rank_one_spawns_only_grunts() {
        use rand::SeedableRng;
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..50 {
            assert_eq!(pick_archetype(&mut rng, 1), HostileArchetype::Grunt);
        }
    }

    #[test]
    fn test_higher_ranks_mix_archetypes() {
        use rand::SeedableRng;
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let picks: Vec<HostileArchetype> = (0..200).map(|_| pick_archetype(&mut rng, 8)).collect();
        assert!(picks.contains(&HostileArchetype::Grunt));
        assert!(picks.contains(&HostileArchetype::Sentry));
        assert!(picks.contains(&HostileArchetype::Bomber));
    }
}
