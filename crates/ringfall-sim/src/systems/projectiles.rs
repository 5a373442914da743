//! Projectile flight and payload resolution.
//!
//! Projectiles are transient engine state, never authoritative store
//! entities: they expire silently on max age or max travel, and their
//! damage lands through store mutations.

use ringfall_core::constants::*;
use ringfall_core::enums::WeaponKind;
use ringfall_core::state::ProjectileView;
use ringfall_core::types::Position;
use ringfall_spatial::segment_distance;

use crate::store::{GameStore, Mutation};

/// What happens when a projectile connects.
#[derive(Debug, Clone, Copy)]
pub enum Payload {
    /// Full damage to the struck hostile only.
    Direct,
    /// Linear-falloff damage to everything within the blast radius.
    Splash { blast_radius: f64 },
    /// Damage hops to nearby hostiles, compounding falloff per hop.
    Chain {
        range: f64,
        falloff: f64,
        max_hops: u32,
    },
}

/// An in-flight projectile.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub kind: WeaponKind,
    pub position: Position,
    /// Heading in radians (0 = North, clockwise).
    pub heading: f64,
    pub speed: f64,
    pub damage: f64,
    pub payload: Payload,
    /// Hostile id steered toward; dropped when the target dies mid-flight.
    pub homing_target: Option<u64>,
    pub traveled: f64,
    pub age: f64,
    pub max_travel: f64,
}

/// Splash damage at distance `d` from the blast center: linear falloff,
/// full at the center, exactly zero at radius `r`.
pub fn splash_damage(base: f64, d: f64, r: f64) -> f64 {
    if d >= r {
        0.0
    } else {
        base * (1.0 - d / r)
    }
}

pub fn build_views(projectiles: &[Projectile]) -> Vec<ProjectileView> {
    projectiles
        .iter()
        .map(|p| ProjectileView {
            kind: p.kind,
            position: p.position,
            heading: p.heading,
        })
        .collect()
}

pub fn run(store: &mut GameStore, projectiles: &mut Vec<Projectile>, dt: f64) {
    let hostiles = store.hostile_positions();
    let mut damage: Vec<(u64, f64)> = Vec::new();

    projectiles.retain_mut(|projectile| {
        projectile.age += dt;

        if let Some(target_id) = projectile.homing_target {
            match hostiles.iter().find(|(id, _)| *id == target_id) {
                Some((_, target_pos)) => steer_toward(projectile, target_pos),
                None => projectile.homing_target = None,
            }
        }

        let from = projectile.position;
        let step = projectile.speed * dt;
        projectile.position.x += projectile.heading.sin() * step;
        projectile.position.y += projectile.heading.cos() * step;
        projectile.traveled += step;

        if let Some((id, pos)) = nearest_struck(&from, &projectile.position, &hostiles) {
            resolve_impact(projectile, id, pos, &hostiles, &mut damage);
            return false;
        }

        // Silent expiry: no impact, no event.
        projectile.age <= PROJECTILE_MAX_AGE && projectile.traveled <= projectile.max_travel
    });

    for (id, amount) in damage {
        store.apply(Mutation::DamageHostile { id, amount });
    }
}

/// Blend the heading toward the live target's bearing. Strength rises as
/// the range closes so distant shots track gently instead of snapping.
fn steer_toward(projectile: &mut Projectile, target_pos: &Position) {
    let bearing = projectile.position.bearing_to(target_pos);
    let distance = projectile.position.planar_distance_to(target_pos);
    let closeness = (1.0 - distance / HOMING_FULL_RANGE).clamp(0.0, 1.0);
    let strength = HOMING_MIN_STRENGTH + (HOMING_MAX_STRENGTH - HOMING_MIN_STRENGTH) * closeness;

    let mut delta = (bearing - projectile.heading).rem_euclid(std::f64::consts::TAU);
    if delta > std::f64::consts::PI {
        delta -= std::f64::consts::TAU;
    }
    projectile.heading = (projectile.heading + delta * strength).rem_euclid(std::f64::consts::TAU);
}

/// First hostile whose body the tick's travel segment passes within the
/// hit radius, taken nearest the segment start. Fast projectiles cover
/// several metres per tick, so a point sample at the end position would
/// let them cross a body between samples.
fn nearest_struck<'a>(
    from: &Position,
    to: &Position,
    hostiles: &'a [(u64, Position)],
) -> Option<(u64, &'a Position)> {
    hostiles
        .iter()
        .filter(|(_, pos)| segment_distance(from, to, pos) <= PROJECTILE_HIT_RADIUS)
        .min_by(|(_, a), (_, b)| {
            from.planar_distance_to(a)
                .partial_cmp(&from.planar_distance_to(b))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(id, pos)| (*id, pos))
}

fn resolve_impact(
    projectile: &Projectile,
    struck_id: u64,
    struck_pos: &Position,
    hostiles: &[(u64, Position)],
    damage: &mut Vec<(u64, f64)>,
) {
    match projectile.payload {
        Payload::Direct => {
            damage.push((struck_id, projectile.damage));
        }
        Payload::Splash { blast_radius } => {
            for (id, pos) in hostiles {
                let amount = splash_damage(
                    projectile.damage,
                    struck_pos.planar_distance_to(pos),
                    blast_radius,
                );
                if amount > 0.0 {
                    damage.push((*id, amount));
                }
            }
        }
        Payload::Chain {
            range,
            falloff,
            max_hops,
        } => {
            resolve_chain(
                projectile.damage,
                struck_id,
                struck_pos,
                hostiles,
                range,
                falloff,
                max_hops,
                damage,
            );
        }
    }
}

/// Chain resolution: full damage to the primary, then repeated hops to the
/// nearest not-yet-hit hostile within `range` of the last hit point, damage
/// compounding by `falloff` per hop. A hostile is never hit twice within
/// one chain event.
#[allow(clippy::too_many_arguments)]
fn resolve_chain(
    base_damage: f64,
    primary_id: u64,
    primary_pos: &Position,
    hostiles: &[(u64, Position)],
    range: f64,
    falloff: f64,
    max_hops: u32,
    damage: &mut Vec<(u64, f64)>,
) {
    let mut hit: Vec<u64> = vec![primary_id];
    damage.push((primary_id, base_damage));

    let mut last_pos = *primary_pos;
    let mut hop_damage = base_damage;
    for _ in 0..max_hops {
        hop_damage *= falloff;
        let next = hostiles
            .iter()
            .filter(|(id, pos)| !hit.contains(id) && last_pos.planar_distance_to(pos) <= range)
            .min_by(|(_, a), (_, b)| {
                last_pos
                    .planar_distance_to(a)
                    .partial_cmp(&last_pos.planar_distance_to(b))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        match next {
            Some((id, pos)) => {
                hit.push(*id);
                damage.push((*id, hop_damage));
                last_pos = *pos;
            }
            None => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splash_full_at_center_zero_at_edge() {
        assert_eq!(splash_damage(20.0, 0.0, 5.0), 20.0);
        assert_eq!(splash_damage(20.0, 5.0, 5.0), 0.0);
        assert_eq!(splash_damage(20.0, 7.0, 5.0), 0.0);
        assert!((splash_damage(20.0, 2.5, 5.0) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_chain_compounds_falloff_and_never_rehits() {
        let hostiles = vec![
            (1, Position::ground(0.0, 0.0)),
            (2, Position::ground(5.0, 0.0)),
            (3, Position::ground(10.0, 0.0)),
            (4, Position::ground(100.0, 0.0)),
        ];
        let mut damage = Vec::new();
        resolve_chain(
            10.0,
            1,
            &Position::ground(0.0, 0.0),
            &hostiles,
            6.0,
            0.5,
            4,
            &mut damage,
        );

        assert_eq!(damage.len(), 3, "hostile 4 is out of hop range");
        assert_eq!(damage[0], (1, 10.0));
        assert_eq!(damage[1], (2, 5.0));
        assert_eq!(damage[2], (3, 2.5));
        let ids: Vec<u64> = damage.iter().map(|(id, _)| *id).collect();
        let mut deduped = ids.clone();
        deduped.dedup();
        assert_eq!(ids, deduped, "chain re-hit a hostile");
    }

    #[test]
    fn test_chain_respects_max_hops() {
        let hostiles: Vec<(u64, Position)> = (0..10)
            .map(|i| (i as u64 + 1, Position::ground(i as f64 * 3.0, 0.0)))
            .collect();
        let mut damage = Vec::new();
        resolve_chain(
            8.0,
            1,
            &Position::ground(0.0, 0.0),
            &hostiles,
            5.0,
            0.65,
            2,
            &mut damage,
        );
        assert_eq!(damage.len(), 3, "primary plus two hops");
    }

    #[test]
    fn test_homing_strengthens_as_range_closes() {
        // Both shots head north with the target due east; the bearing
        // correction is PI/2 in each case, so the turn taken per step
        // exposes the blend strength directly.
        let make = |target_distance: f64| Projectile {
            kind: WeaponKind::RocketPod,
            position: Position::ground(-target_distance, 0.0),
            heading: 0.0,
            speed: 30.0,
            damage: 1.0,
            payload: Payload::Direct,
            homing_target: Some(1),
            traveled: 0.0,
            age: 0.0,
            max_travel: 100.0,
        };
        let target = Position::ground(0.0, 0.0);

        let mut far = make(40.0);
        let mut near = make(5.0);
        steer_toward(&mut far, &target);
        steer_toward(&mut near, &target);

        assert!(far.heading > 0.0, "even distant shots track a little");
        assert!(
            near.heading > far.heading,
            "homing must strengthen as range closes"
        );
        assert!(
            near.heading < std::f64::consts::FRAC_PI_2,
            "blend must never hard-snap to the bearing"
        );
    }

    #[test]
    fn test_fast_projectile_connects_across_tick_step() {
        use ringfall_core::enums::HostileArchetype;

        // The lance covers 4 m per tick, well past the hit radius; a
        // dead-on shot at a stationary sentry must still connect.
        let mut store = GameStore::new();
        store.apply(Mutation::SpawnHostile {
            archetype: HostileArchetype::Sentry,
            position: Position::ground(0.0, 18.0),
            speed_factor: 1.0,
        });
        let before = store.get().hostiles[0].health;

        let mut projectiles = vec![Projectile {
            kind: WeaponKind::Lance,
            position: Position::ground(0.0, 0.0),
            heading: 0.0,
            speed: LANCE_SPEED,
            damage: LANCE_DAMAGE,
            payload: Payload::Direct,
            homing_target: None,
            traveled: 0.0,
            age: 0.0,
            max_travel: LANCE_RANGE,
        }];
        for _ in 0..60 {
            run(&mut store, &mut projectiles, DT);
            if projectiles.is_empty() {
                break;
            }
        }

        assert!(projectiles.is_empty(), "shot must end on impact");
        let after = store.get().hostiles[0].health;
        assert!(
            (before - after - LANCE_DAMAGE).abs() < 1e-9,
            "dead-on shot must land full damage, lost {}",
            before - after
        );
    }

    #[test]
    fn test_expiry_on_age_and_travel() {
        let mut store = GameStore::new();
        let mut projectiles = vec![Projectile {
            kind: WeaponKind::Cannon,
            position: Position::ground(0.0, 0.0),
            heading: 0.0,
            speed: 10.0,
            damage: 1.0,
            payload: Payload::Direct,
            homing_target: None,
            traveled: 0.0,
            age: PROJECTILE_MAX_AGE + 1.0,
            max_travel: 1000.0,
        }];
        run(&mut store, &mut projectiles, DT);
        assert!(projectiles.is_empty(), "aged-out projectile must vanish");

        let mut projectiles = vec![Projectile {
            kind: WeaponKind::Cannon,
            position: Position::ground(0.0, 0.0),
            heading: 0.0,
            speed: 10.0,
            damage: 1.0,
            payload: Payload::Direct,
            homing_target: None,
            traveled: 99.9,
            age: 0.0,
            max_travel: 100.0,
        }];
        run(&mut store, &mut projectiles, DT);
        assert!(
            projectiles.is_empty(),
            "projectile past max travel must vanish"
        );
    }
}
