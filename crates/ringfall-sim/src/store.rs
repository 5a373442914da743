//! Authoritative match state.
//!
//! `GameStore` owns the hecs world plus the resource blocks (containment,
//! hazard, progression, phase, time). Discrete semantic changes go through
//! `apply`, which commits atomically and then notifies subscribers with the
//! post-commit snapshot. Continuous per-tick integration (movement, clocks)
//! writes the world and resource blocks directly; the engine publishes one
//! snapshot per tick.

use hecs::World;

use ringfall_core::components::{
    Armament, AttackClock, Health, Hostile, HostileInfo, Obstacle, Player, PlayerStats,
    WeaponMount,
};
use ringfall_core::constants::*;
use ringfall_core::enums::{
    ContainmentPhase, GamePhase, HazardPhase, HostileArchetype, StatId, WeaponKind,
};
use ringfall_core::events::AudioEvent;
use ringfall_core::state::{
    BombView, ContainmentView, HazardView, HostileView, MatchSnapshot, ObstacleView, PlayerView,
    ProjectileView,
};
use ringfall_core::types::{Position, SimTime, Velocity};
use ringfall_spatial::Circle;

/// Containment boundary resource block.
#[derive(Debug, Clone)]
pub struct ContainmentState {
    pub phase: ContainmentPhase,
    pub current_radius: f64,
    pub target_radius: f64,
    pub shrink_rate: f64,
    /// Accumulator for the periodic outside-damage application.
    pub damage_clock: f64,
}

impl Default for ContainmentState {
    fn default() -> Self {
        Self {
            phase: ContainmentPhase::Dormant,
            current_radius: CONTAINMENT_INITIAL_RADIUS,
            target_radius: CONTAINMENT_INITIAL_RADIUS,
            shrink_rate: 0.0,
            damage_clock: 0.0,
        }
    }
}

/// A falling bomb spawned during a hazard bombardment.
#[derive(Debug, Clone)]
pub struct Bomb {
    pub position: Position,
    pub fuse_remaining: f64,
}

/// Hazard bombardment resource block.
///
/// `generation` is the ownership token carried by deferred transitions: a
/// transition whose token no longer matches is stale and must not run.
#[derive(Debug, Clone, Default)]
pub struct HazardState {
    pub phase: HazardPhase,
    pub generation: u64,
    pub owner_rank: Option<u32>,
    pub center: Position,
    pub bombs: Vec<Bomb>,
    pub spawn_clock: f64,
    pub bombs_spawned: u32,
    pub cooldown_clock: f64,
}

/// Rank, score, and upgrade-offer resource block.
#[derive(Debug, Clone)]
pub struct ProgressionState {
    pub rank: u32,
    pub score: u32,
    pub kills_this_rank: u32,
    pub pending_rank_up: bool,
    pub offered_upgrades: Vec<StatId>,
    /// Picks taken per stat axis, capped at `MAX_STAT_LEVEL`.
    pub stat_levels: std::collections::HashMap<StatId, u32>,
}

impl Default for ProgressionState {
    fn default() -> Self {
        Self {
            rank: 1,
            score: 0,
            kills_this_rank: 0,
            pending_rank_up: false,
            offered_upgrades: Vec::new(),
            stat_levels: std::collections::HashMap::new(),
        }
    }
}

/// Named state mutations. Invalid mutations (unknown hostile id, stat at
/// cap, duplicate weapon) are silent no-ops.
#[derive(Debug, Clone)]
pub enum Mutation {
    SpawnHostile {
        archetype: HostileArchetype,
        position: Position,
        speed_factor: f64,
    },
    DamageHostile {
        id: u64,
        amount: f64,
    },
    RemoveHostile {
        id: u64,
    },
    DamagePlayer {
        amount: f64,
    },
    HealPlayer {
        amount: f64,
    },
    /// Teleport the player, clamped to the arena bounds.
    MovePlayer {
        x: f64,
        y: f64,
    },
    EquipWeapon {
        kind: WeaponKind,
    },
    UpgradeStat {
        stat: StatId,
    },
    /// Kill threshold met; rank-up scheduled but not yet applied.
    FlagRankUpPending,
    /// Apply the deferred rank-up. `offered` is the upgrade offer rolled by
    /// the engine's RNG.
    RankUp {
        offered: Vec<StatId>,
    },
    /// A rank claims the hazard sequence: Inactive -> Warning, fresh token.
    HazardClaim {
        owner_rank: u32,
    },
    HazardBeginBombard {
        center: Position,
    },
    HazardEnterCooldown,
    HazardReset,
    /// Tear down whatever hazard sequence is running and release ownership.
    HazardAbort,
    SetPhase {
        phase: GamePhase,
    },
}

/// Subscription handle returned by `subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&MatchSnapshot)>;

/// The authoritative match state store.
pub struct GameStore {
    world: World,
    time: SimTime,
    phase: GamePhase,
    containment: ContainmentState,
    hazard: HazardState,
    progression: ProgressionState,
    audio_events: Vec<AudioEvent>,
    next_hostile_id: u64,
    /// Views of in-flight projectiles, refreshed by the engine each tick.
    projectile_views: Vec<ProjectileView>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription_id: u64,
}

impl Default for GameStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStore {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            containment: ContainmentState::default(),
            hazard: HazardState::default(),
            progression: ProgressionState::default(),
            audio_events: Vec::new(),
            next_hostile_id: 1,
            projectile_views: Vec::new(),
            subscribers: Vec::new(),
            next_subscription_id: 0,
        }
    }

    /// Reset everything to match-start defaults. The caller rebuilds the
    /// entity sets through `world_setup` afterwards. Subscriptions survive.
    pub fn reset(&mut self) {
        self.world.clear();
        self.time = SimTime::default();
        self.phase = GamePhase::Active;
        self.containment = ContainmentState::default();
        self.hazard = HazardState::default();
        self.progression = ProgressionState::default();
        self.audio_events.clear();
        self.next_hostile_id = 1;
        self.projectile_views.clear();
    }

    // --- Accessors ---

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn advance_time(&mut self) {
        self.time.advance();
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn containment(&self) -> &ContainmentState {
        &self.containment
    }

    pub fn containment_mut(&mut self) -> &mut ContainmentState {
        &mut self.containment
    }

    pub fn hazard(&self) -> &HazardState {
        &self.hazard
    }

    pub fn hazard_mut(&mut self) -> &mut HazardState {
        &mut self.hazard
    }

    pub fn progression(&self) -> &ProgressionState {
        &self.progression
    }

    pub fn push_audio(&mut self, event: AudioEvent) {
        self.audio_events.push(event);
    }

    /// Drain buffered audio events (called once per tick by the engine).
    pub fn take_audio_events(&mut self) -> Vec<AudioEvent> {
        std::mem::take(&mut self.audio_events)
    }

    pub fn set_projectile_views(&mut self, views: Vec<ProjectileView>) {
        self.projectile_views = views;
    }

    /// Current player position, if the player entity exists.
    pub fn player_position(&self) -> Option<Position> {
        self.world
            .query::<(&Player, &Position)>()
            .iter()
            .next()
            .map(|(_, (_, pos))| *pos)
    }

    /// Current player stats, if the player entity exists.
    pub fn player_stats(&self) -> Option<PlayerStats> {
        self.world
            .query::<(&Player, &PlayerStats)>()
            .iter()
            .next()
            .map(|(_, (_, stats))| stats.clone())
    }

    /// (id, position) of every live hostile.
    pub fn hostile_positions(&self) -> Vec<(u64, Position)> {
        self.world
            .query::<(&Hostile, &HostileInfo, &Position)>()
            .iter()
            .map(|(_, (_, info, pos))| (info.id, *pos))
            .collect()
    }

    /// Obstacle footprints as clearance circles.
    pub fn obstacle_circles(&self) -> Vec<Circle> {
        self.world
            .query::<(&Obstacle, &Position)>()
            .iter()
            .map(|(_, (obstacle, pos))| Circle::at(pos, obstacle.radius))
            .collect()
    }

    // --- Subscriptions ---

    /// Register a callback invoked with the post-commit snapshot after every
    /// `apply`, in subscription order.
    pub fn subscribe(&mut self, callback: impl FnMut(&MatchSnapshot) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription_id);
        self.next_subscription_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
    }

    // --- Mutations ---

    /// Apply a mutation atomically, then notify subscribers with the
    /// post-commit snapshot.
    pub fn apply(&mut self, mutation: Mutation) -> MatchSnapshot {
        self.commit(mutation);
        let snapshot = self.get();
        let mut subscribers = std::mem::take(&mut self.subscribers);
        for (_, callback) in subscribers.iter_mut() {
            callback(&snapshot);
        }
        self.subscribers = subscribers;
        snapshot
    }

    fn commit(&mut self, mutation: Mutation) {
        match mutation {
            Mutation::SpawnHostile {
                archetype,
                position,
                speed_factor,
            } => {
                self.spawn_hostile(archetype, position, speed_factor);
            }
            Mutation::DamageHostile { id, amount } => {
                self.damage_hostile(id, amount);
            }
            Mutation::RemoveHostile { id } => {
                // Removal without credit still goes through the destroy
                // path so kill counters and score stay consistent.
                self.damage_hostile(id, f64::INFINITY);
            }
            Mutation::DamagePlayer { amount } => {
                self.damage_player(amount);
            }
            Mutation::HealPlayer { amount } => {
                for (_, (_, health)) in self.world.query_mut::<(&Player, &mut Health)>() {
                    health.current = (health.current + amount).min(health.max);
                }
            }
            Mutation::MovePlayer { x, y } => {
                let bound = WORLD_HALF_EXTENT - PLAYER_BODY_RADIUS;
                for (_, (_, pos)) in self.world.query_mut::<(&Player, &mut Position)>() {
                    pos.x = x;
                    pos.y = y;
                    pos.clamp_planar(bound);
                }
            }
            Mutation::EquipWeapon { kind } => {
                self.equip_weapon(kind);
            }
            Mutation::UpgradeStat { stat } => {
                self.upgrade_stat(stat);
            }
            Mutation::FlagRankUpPending => {
                self.progression.pending_rank_up = true;
            }
            Mutation::RankUp { offered } => {
                self.rank_up(offered);
            }
            Mutation::HazardClaim { owner_rank } => {
                if self.hazard.phase == HazardPhase::Inactive {
                    self.hazard.generation += 1;
                    self.hazard.phase = HazardPhase::Warning;
                    self.hazard.owner_rank = Some(owner_rank);
                    self.hazard.bombs.clear();
                    self.hazard.bombs_spawned = 0;
                    self.hazard.spawn_clock = 0.0;
                    self.hazard.cooldown_clock = 0.0;
                    self.audio_events
                        .push(AudioEvent::HazardWarning { owner_rank });
                    log::info!("hazard sequence claimed by rank {owner_rank}");
                }
            }
            Mutation::HazardBeginBombard { center } => {
                if self.hazard.phase == HazardPhase::Warning {
                    self.hazard.phase = HazardPhase::Bombarding;
                    self.hazard.center = center;
                    self.audio_events.push(AudioEvent::HazardBombarding);
                    log::info!(
                        "hazard bombarding at ({:.1}, {:.1})",
                        center.x,
                        center.y
                    );
                }
            }
            Mutation::HazardEnterCooldown => {
                if self.hazard.phase == HazardPhase::Bombarding {
                    self.hazard.phase = HazardPhase::Cooldown;
                    self.hazard.owner_rank = None;
                    self.hazard.bombs.clear();
                    self.hazard.cooldown_clock = 0.0;
                    self.audio_events.push(AudioEvent::HazardCleared);
                }
            }
            Mutation::HazardReset => {
                if self.hazard.phase == HazardPhase::Cooldown {
                    self.hazard.phase = HazardPhase::Inactive;
                }
            }
            Mutation::HazardAbort => {
                if self.hazard.phase != HazardPhase::Inactive {
                    self.hazard.phase = HazardPhase::Inactive;
                    self.hazard.owner_rank = None;
                    self.hazard.bombs.clear();
                    self.hazard.generation += 1;
                    self.audio_events.push(AudioEvent::HazardCleared);
                    log::info!("hazard sequence aborted");
                }
            }
            Mutation::SetPhase { phase } => {
                self.phase = phase;
            }
        }
    }

    fn spawn_hostile(&mut self, archetype: HostileArchetype, position: Position, speed_factor: f64) {
        let id = self.next_hostile_id;
        self.next_hostile_id += 1;

        let scale = 1.0 + HOSTILE_HEALTH_GROWTH * (self.progression.rank.saturating_sub(1)) as f64;
        let (base_health, altitude) = match archetype {
            HostileArchetype::Grunt => (GRUNT_HEALTH, 0.0),
            HostileArchetype::Sentry => (SENTRY_HEALTH, 0.0),
            HostileArchetype::Bomber => (BOMBER_HEALTH, BOMBER_ALTITUDE),
        };

        let position = Position::new(position.x, position.y, altitude);
        self.world.spawn((
            Hostile,
            HostileInfo {
                id,
                archetype,
                speed_factor,
            },
            position,
            Velocity::default(),
            Health::full(base_health * scale),
            AttackClock::default(),
        ));
    }

    /// Damage a hostile by id, destroying it inline when health hits zero.
    /// Destroying increments the kill counter, awards archetype score, and
    /// emits the audio event, keeping "health > 0 while present" atomic.
    fn damage_hostile(&mut self, id: u64, amount: f64) {
        let mut destroyed: Option<(hecs::Entity, HostileArchetype)> = None;
        for (entity, (_, info, health)) in self
            .world
            .query_mut::<(&Hostile, &HostileInfo, &mut Health)>()
        {
            if info.id == id {
                health.current -= amount;
                if health.current <= 0.0 {
                    destroyed = Some((entity, info.archetype));
                }
                break;
            }
        }

        if let Some((entity, archetype)) = destroyed {
            let _ = self.world.despawn(entity);
            self.progression.kills_this_rank += 1;
            self.progression.score += match archetype {
                HostileArchetype::Grunt => SCORE_GRUNT,
                HostileArchetype::Sentry => SCORE_SENTRY,
                HostileArchetype::Bomber => SCORE_BOMBER,
            };
            self.audio_events
                .push(AudioEvent::HostileDestroyed { archetype });
        }
    }

    fn damage_player(&mut self, amount: f64) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        let mut dead = false;
        for (_, (_, health)) in self.world.query_mut::<(&Player, &mut Health)>() {
            health.current -= amount;
            if health.current <= 0.0 {
                health.current = 0.0;
                dead = true;
            }
        }
        if dead {
            self.phase = GamePhase::GameOver;
            self.audio_events.push(AudioEvent::GameOver);
            log::info!(
                "player destroyed at rank {} with score {}",
                self.progression.rank,
                self.progression.score
            );
        }
    }

    fn equip_weapon(&mut self, kind: WeaponKind) {
        for (_, (_, armament)) in self.world.query_mut::<(&Player, &mut Armament)>() {
            let duplicate = armament.mounts.iter().any(|m| m.kind == kind);
            if duplicate || armament.mounts.len() >= MAX_WEAPON_MOUNTS {
                return;
            }
            armament.mounts.push(WeaponMount::new(kind));
        }
    }

    fn upgrade_stat(&mut self, stat: StatId) {
        if !self.progression.offered_upgrades.contains(&stat) {
            return;
        }
        let level = self.progression.stat_levels.entry(stat).or_insert(0);
        if *level >= MAX_STAT_LEVEL {
            return;
        }
        *level += 1;
        // One pick consumes the whole offer.
        self.progression.offered_upgrades.clear();

        let boost = 1.0 + STAT_UPGRADE_MULT;
        for (_, (_, stats, health)) in self
            .world
            .query_mut::<(&Player, &mut PlayerStats, &mut Health)>()
        {
            match stat {
                StatId::Damage => stats.damage_multiplier *= boost,
                StatId::FireRate => stats.fire_interval /= boost,
                StatId::MoveSpeed => stats.move_speed *= boost,
                StatId::MaxHealth => {
                    let gained = health.max * STAT_UPGRADE_MULT;
                    health.max += gained;
                    health.current += gained;
                }
                StatId::Regen => stats.regen_per_sec *= boost,
                StatId::BulletSpeed => stats.bullet_speed *= boost,
                StatId::SensorRange => stats.sensor_range *= boost,
            }
        }
    }

    fn rank_up(&mut self, offered: Vec<StatId>) {
        self.progression.rank += 1;
        self.progression.kills_this_rank = 0;
        self.progression.pending_rank_up = false;
        self.progression.offered_upgrades = offered;
        let rank = self.progression.rank;

        // Base offense tracks a diminishing share of hostile health growth.
        let growth =
            1.0 + HOSTILE_HEALTH_GROWTH * OFFENSE_GROWTH_COUPLING / (rank as f64).sqrt();
        for (_, (_, stats)) in self.world.query_mut::<(&Player, &mut PlayerStats)>() {
            stats.turret_damage *= growth;
        }

        self.retarget_containment(rank);
        self.audio_events.push(AudioEvent::RankUp { rank });
        log::info!("rank up to {rank}");
    }

    /// Re-anchor the containment boundary at a rank-up: pick the milestone
    /// target for this rank and a shrink rate sized to finish slightly
    /// before the next milestone rank.
    fn retarget_containment(&mut self, rank: u32) {
        if rank < CONTAINMENT_START_RANK {
            return;
        }

        let target = CONTAINMENT_MILESTONES
            .iter()
            .filter(|(milestone_rank, _)| *milestone_rank <= rank)
            .map(|(_, radius)| *radius)
            .last()
            .unwrap_or(CONTAINMENT_INITIAL_RADIUS);

        let next_milestone_rank = CONTAINMENT_MILESTONES
            .iter()
            .map(|(milestone_rank, _)| *milestone_rank)
            .find(|milestone_rank| *milestone_rank > rank);

        let containment = &mut self.containment;
        if containment.phase == ContainmentPhase::Dormant {
            containment.current_radius = CONTAINMENT_INITIAL_RADIUS;
        }

        if target < containment.current_radius {
            // Estimate the kill work between here and the next milestone and
            // size the rate to land early by the safety margin.
            let kills_to_next: u32 = match next_milestone_rank {
                Some(next) => (rank..next).map(crate::systems::progression::kills_required_for).sum(),
                None => crate::systems::progression::kills_required_for(rank),
            };
            let est_secs = (kills_to_next.max(1) as f64) * EST_SECS_PER_KILL;
            containment.target_radius = target;
            containment.shrink_rate =
                (containment.current_radius - target) * SHRINK_SAFETY_MARGIN / est_secs;
            containment.phase = ContainmentPhase::Shrinking;
            self.audio_events.push(AudioEvent::ContainmentShrinking {
                target_radius: target,
            });
            log::info!(
                "containment shrinking to {:.0}m at {:.2} m/s",
                target,
                self.containment.shrink_rate
            );
        } else if containment.phase == ContainmentPhase::Dormant {
            containment.target_radius = target;
            containment.phase = ContainmentPhase::Holding;
        }
    }

    // --- Snapshot ---

    /// Build a complete snapshot. Every `Vec` is freshly allocated so
    /// identity-based change detection downstream is reliable.
    pub fn get(&self) -> MatchSnapshot {
        let player = self
            .world
            .query::<(&Player, &Position, &Health, &PlayerStats, &Armament)>()
            .iter()
            .next()
            .map(|(_, (_, pos, health, stats, armament))| PlayerView {
                position: *pos,
                health: health.current,
                max_health: health.max,
                move_speed: stats.move_speed,
                damage_multiplier: stats.damage_multiplier,
                weapons: armament.mounts.iter().map(|m| m.kind).collect(),
            })
            .unwrap_or_default();

        let mut hostiles: Vec<HostileView> = self
            .world
            .query::<(&Hostile, &HostileInfo, &Position, &Health)>()
            .iter()
            .map(|(_, (_, info, pos, health))| HostileView {
                id: info.id,
                position: *pos,
                health: health.current,
                max_health: health.max,
                archetype: info.archetype,
            })
            .collect();
        hostiles.sort_by_key(|h| h.id);

        let obstacles: Vec<ObstacleView> = self
            .world
            .query::<(&Obstacle, &Position)>()
            .iter()
            .map(|(_, (obstacle, pos))| ObstacleView {
                position: *pos,
                radius: obstacle.radius,
            })
            .collect();

        let containment = ContainmentView {
            phase: self.containment.phase,
            center: Position::default(),
            current_radius: self.containment.current_radius,
            target_radius: self.containment.target_radius,
            shrink_rate: self.containment.shrink_rate,
            active: self.containment.phase != ContainmentPhase::Dormant,
        };

        let hazard = HazardView {
            phase: self.hazard.phase,
            center: self.hazard.center,
            radius: HAZARD_RADIUS,
            owner_rank: self.hazard.owner_rank,
            warning: self.hazard.phase == HazardPhase::Warning,
            active: matches!(
                self.hazard.phase,
                HazardPhase::Warning | HazardPhase::Bombarding
            ),
            bombs: self
                .hazard
                .bombs
                .iter()
                .map(|b| BombView {
                    position: b.position,
                    fuse_remaining: b.fuse_remaining,
                })
                .collect(),
        };

        let progression = ringfall_core::state::ProgressionView {
            rank: self.progression.rank,
            score: self.progression.score,
            kills_this_rank: self.progression.kills_this_rank,
            kills_required: crate::systems::progression::kills_required_for(self.progression.rank),
            offered_upgrades: self.progression.offered_upgrades.clone(),
            pending_rank_up: self.progression.pending_rank_up,
        };

        MatchSnapshot {
            time: self.time,
            phase: self.phase,
            player,
            hostiles,
            obstacles,
            projectiles: self.projectile_views.clone(),
            containment,
            hazard,
            progression,
            audio_events: self.audio_events.clone(),
        }
    }
}
