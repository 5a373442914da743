//! Match initialization: player, obstacle field, opening hostile wave.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use ringfall_core::components::{Armament, Health, Obstacle, Player, PlayerStats, WeaponMount};
use ringfall_core::constants::*;
use ringfall_core::enums::WeaponKind;
use ringfall_core::types::Position;
use ringfall_spatial::{find_position, Circle, PlacementQuery};

use crate::store::{GameStore, Mutation};
use crate::systems::respawn;

/// Obstacles keep at least this far from the player spawn.
const OBSTACLE_PLAYER_CLEARANCE: f64 = 10.0;

/// Build a fresh match into a reset store: player at the origin, a
/// procedural obstacle field, and the opening hostile wave.
pub fn setup_match(store: &mut GameStore, rng: &mut ChaCha8Rng) {
    store.world_mut().spawn((
        Player,
        Position::ground(0.0, 0.0),
        Health::full(PLAYER_MAX_HEALTH),
        PlayerStats::default(),
        Armament {
            mounts: vec![WeaponMount::new(WeaponKind::Cannon)],
        },
    ));

    spawn_obstacles(store, rng);
    spawn_opening_wave(store, rng);
}

fn spawn_obstacles(store: &mut GameStore, rng: &mut ChaCha8Rng) {
    let keep_out = [Circle::new(0.0, 0.0, OBSTACLE_PLAYER_CLEARANCE)];
    let mut placed: Vec<Position> = Vec::with_capacity(OBSTACLE_COUNT);
    let mut circles: Vec<Circle> = Vec::with_capacity(OBSTACLE_COUNT);

    for _ in 0..OBSTACLE_COUNT {
        let query = PlacementQuery {
            area_half_extent: WORLD_HALF_EXTENT,
            existing: &placed,
            obstacles: &circles,
            keep_out: &keep_out,
            min_separation: OBSTACLE_MIN_SEPARATION,
        };
        let position = find_position(rng, &query);
        let radius = rng.gen_range(OBSTACLE_RADIUS_MIN..=OBSTACLE_RADIUS_MAX);
        store.world_mut().spawn((Obstacle { radius }, position));
        circles.push(Circle::at(&position, radius));
        placed.push(position);
    }
}

fn spawn_opening_wave(store: &mut GameStore, rng: &mut ChaCha8Rng) {
    let obstacles = store.obstacle_circles();
    let keep_out = [Circle::new(0.0, 0.0, SPAWN_PLAYER_CLEARANCE)];
    let mut placed: Vec<Position> = Vec::with_capacity(INITIAL_HOSTILE_COUNT);

    for _ in 0..INITIAL_HOSTILE_COUNT {
        let query = PlacementQuery {
            area_half_extent: WORLD_HALF_EXTENT,
            existing: &placed,
            obstacles: &obstacles,
            keep_out: &keep_out,
            min_separation: HOSTILE_MIN_SEPARATION,
        };
        let position = find_position(rng, &query);
        let archetype = respawn::pick_archetype(rng, store.progression().rank);
        let speed_factor = respawn::roll_speed_factor(rng);
        store.apply(Mutation::SpawnHostile {
            archetype,
            position,
            speed_factor,
        });
        placed.push(position);
    }
}
