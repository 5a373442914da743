//! Combat engine, the headless core of the game.
//!
//! `CombatEngine` owns the state store, processes player commands, drives
//! the deferred-timer scheduler, runs all systems, and produces
//! `MatchSnapshot`s. Completely headless, enabling deterministic testing.

use std::collections::VecDeque;
use std::time::Instant;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use ringfall_core::commands::{Command, InputIntent};
use ringfall_core::constants::*;
use ringfall_core::enums::{GamePhase, HazardPhase, StatId};
use ringfall_core::state::MatchSnapshot;
use ringfall_core::types::Position;

use crate::scheduler::{ScheduledAction, Scheduler};
use crate::store::{GameStore, Mutation};
use crate::systems;
use crate::systems::projectiles::Projectile;
use crate::world_setup;

/// Configuration for starting a new simulation.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

/// The combat engine. Owns the store and all transient sim state.
pub struct CombatEngine {
    store: GameStore,
    rng: ChaCha8Rng,
    command_queue: VecDeque<Command>,
    scheduler: Scheduler,
    projectiles: Vec<Projectile>,
    input: InputIntent,
    /// Wall clock driving deferred timers. Advances by real elapsed time
    /// every tick, including while paused.
    wall_clock_secs: f64,
    last_instant: Option<Instant>,
    /// Hostile ids seen last tick; diffed to detect removals.
    seen_hostiles: std::collections::HashSet<u64>,
}

impl CombatEngine {
    /// Create a new engine with a fully set-up match.
    pub fn new(config: SimConfig) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut store = GameStore::new();
        world_setup::setup_match(&mut store, &mut rng);
        let seen_hostiles = store.hostile_positions().iter().map(|(id, _)| *id).collect();

        Self {
            store,
            rng,
            command_queue: VecDeque::new(),
            scheduler: Scheduler::default(),
            projectiles: Vec::new(),
            input: InputIntent::default(),
            wall_clock_secs: 0.0,
            last_instant: None,
            seen_hostiles,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: Command) {
        self.command_queue.push_back(command);
    }

    /// Advance the simulation by one tick, measuring real elapsed time for
    /// the wall clock, and return the resulting snapshot.
    pub fn tick(&mut self) -> MatchSnapshot {
        let now = Instant::now();
        let elapsed = match self.last_instant.replace(now) {
            Some(prev) => now.duration_since(prev).as_secs_f64(),
            None => DT,
        };
        self.tick_with_elapsed(elapsed)
    }

    /// Advance one tick with an explicit wall-clock delta. Tests drive this
    /// directly for a deterministic wall clock.
    pub fn tick_with_elapsed(&mut self, real_elapsed_secs: f64) -> MatchSnapshot {
        self.wall_clock_secs += real_elapsed_secs.max(0.0);

        self.process_commands();
        self.dispatch_due_timers();

        if self.store.phase() == GamePhase::Active {
            self.run_systems();
            self.store.advance_time();
        }

        let views = systems::projectiles::build_views(&self.projectiles);
        self.store.set_projectile_views(views);
        let snapshot = self.store.get();
        self.store.take_audio_events();
        snapshot
    }

    /// Read access to the store (and through it, the current state).
    pub fn store(&self) -> &GameStore {
        &self.store
    }

    pub fn phase(&self) -> GamePhase {
        self.store.phase()
    }

    /// Wall-clock seconds accumulated so far.
    pub fn wall_clock_secs(&self) -> f64 {
        self.wall_clock_secs
    }

    #[cfg(test)]
    pub fn store_mut(&mut self) -> &mut GameStore {
        &mut self.store
    }

    #[cfg(test)]
    pub fn projectile_count(&self) -> usize {
        self.projectiles.len()
    }

    #[cfg(test)]
    pub fn pending_timers(&self) -> usize {
        self.scheduler.len()
    }

    // --- Commands ---

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Restart => {
                self.store.reset();
                world_setup::setup_match(&mut self.store, &mut self.rng);
                self.scheduler.clear();
                self.projectiles.clear();
                self.input = InputIntent::default();
                self.seen_hostiles = self
                    .store
                    .hostile_positions()
                    .iter()
                    .map(|(id, _)| *id)
                    .collect();
                log::info!("match restarted");
            }
            Command::TogglePause => match self.store.phase() {
                GamePhase::Active => {
                    self.store.apply(Mutation::SetPhase {
                        phase: GamePhase::Paused,
                    });
                }
                GamePhase::Paused => {
                    self.store.apply(Mutation::SetPhase {
                        phase: GamePhase::Active,
                    });
                }
                GamePhase::GameOver => {}
            },
            Command::ApplyInput { intent } => {
                self.input = intent;
            }
            Command::UpgradeStat { stat } => {
                self.store.apply(Mutation::UpgradeStat { stat });
            }
            Command::SelectWeapon { weapon } => {
                self.store.apply(Mutation::EquipWeapon { kind: weapon });
            }
        }
    }

    // --- Deferred timers ---

    fn dispatch_due_timers(&mut self) {
        for action in self.scheduler.drain_due(self.wall_clock_secs) {
            self.dispatch(action);
        }
    }

    fn dispatch(&mut self, action: ScheduledAction) {
        match action {
            ScheduledAction::RankUp => self.dispatch_rank_up(),
            ScheduledAction::HazardTransition { to, generation } => {
                self.dispatch_hazard_transition(to, generation);
            }
            ScheduledAction::RespawnHostile {
                archetype,
                position,
                speed_factor,
            } => {
                if self.store.phase() != GamePhase::Active {
                    log::debug!("respawn timer fired while not active; skipped");
                    return;
                }
                self.store.apply(Mutation::SpawnHostile {
                    archetype,
                    position,
                    speed_factor,
                });
            }
        }
    }

    fn dispatch_rank_up(&mut self) {
        match self.store.phase() {
            GamePhase::GameOver => {
                log::debug!("rank-up timer fired after game over; skipped");
                return;
            }
            GamePhase::Paused => {
                // Keep deferring until the match resumes.
                self.scheduler
                    .schedule_in(self.wall_clock_secs, 0.0, ScheduledAction::RankUp);
                return;
            }
            GamePhase::Active => {}
        }
        if !self.store.progression().pending_rank_up {
            log::debug!("rank-up timer fired with no pending rank-up; skipped");
            return;
        }

        let new_rank = self.store.progression().rank + 1;
        let offered = self.roll_upgrade_offer(new_rank);
        self.store.apply(Mutation::RankUp { offered });

        if hazard_rank(new_rank) && self.store.hazard().phase == HazardPhase::Inactive {
            self.store.apply(Mutation::HazardClaim {
                owner_rank: new_rank,
            });
            let generation = self.store.hazard().generation;
            self.scheduler.schedule_in(
                self.wall_clock_secs,
                HAZARD_WARNING_SECS,
                ScheduledAction::HazardTransition {
                    to: HazardPhase::Bombarding,
                    generation,
                },
            );
        }
    }

    fn dispatch_hazard_transition(&mut self, to: HazardPhase, generation: u64) {
        if generation != self.store.hazard().generation {
            log::debug!("hazard transition carries stale token; skipped");
            return;
        }
        if self.store.phase() != GamePhase::Active {
            self.store.apply(Mutation::HazardAbort);
            return;
        }
        match to {
            HazardPhase::Bombarding => {
                let center = self.roll_hazard_center();
                self.store.apply(Mutation::HazardBeginBombard { center });
                self.scheduler.schedule_in(
                    self.wall_clock_secs,
                    HAZARD_BOMBARD_SECS,
                    ScheduledAction::HazardTransition {
                        to: HazardPhase::Cooldown,
                        generation,
                    },
                );
            }
            HazardPhase::Cooldown => {
                self.store.apply(Mutation::HazardEnterCooldown);
            }
            HazardPhase::Inactive | HazardPhase::Warning => {
                // Entered directly through mutations, never by timer.
                log::debug!("unexpected hazard transition target {to:?}; skipped");
            }
        }
    }

    /// Random subset of upgradeable stat axes, empty past the ceiling rank.
    fn roll_upgrade_offer(&mut self, new_rank: u32) -> Vec<StatId> {
        if new_rank > UPGRADE_CEILING_RANK {
            return Vec::new();
        }
        let progression = self.store.progression();
        let mut eligible: Vec<StatId> = StatId::ALL
            .iter()
            .copied()
            .filter(|stat| {
                progression.stat_levels.get(stat).copied().unwrap_or(0) < MAX_STAT_LEVEL
            })
            .collect();
        eligible.shuffle(&mut self.rng);
        eligible.truncate(UPGRADE_OFFER_COUNT);
        eligible
    }

    /// Random bombardment center well inside the containment boundary.
    fn roll_hazard_center(&mut self) -> Position {
        let max_r = (self.store.containment().current_radius - HAZARD_RADIUS).max(10.0);
        let r = self.rng.gen_range(0.0..max_r);
        let angle = self.rng.gen_range(0.0..std::f64::consts::TAU);
        Position::ground(r * angle.sin(), r * angle.cos())
    }

    // --- Systems ---

    /// Run all systems in order.
    fn run_systems(&mut self) {
        // 1. Movement: player intent, hostile steering, regen, contact
        //    damage, sentry shots.
        systems::movement::run(&mut self.store, &self.input, DT);
        // 2. Containment boundary: shrink, clamp, outside damage.
        systems::containment::run(&mut self.store, DT);
        // 3. Hazard bombardment: bomb cadence, fuses, detonations, cooldown.
        systems::hazard::run(&mut self.store, &mut self.rng, DT);
        // 4. Weapon mounts: target validation/acquisition, firing.
        systems::weapons::run(&mut self.store, &mut self.projectiles, &self.input, DT);
        // 5. Projectiles: homing, integration, payload resolution, expiry.
        systems::projectiles::run(&mut self.store, &mut self.projectiles, DT);
        // 6. Progression: kill-threshold check, rank-up scheduling.
        systems::progression::run(&mut self.store, &mut self.scheduler, self.wall_clock_secs);
        // 7. Respawn: id-set diff, delayed replacement scheduling.
        systems::respawn::run(
            &mut self.store,
            &mut self.rng,
            &mut self.scheduler,
            &mut self.seen_hostiles,
            self.wall_clock_secs,
        );
    }
}

/// Ranks that claim a hazard sequence: the start rank and every
/// `HAZARD_RANK_INTERVAL` ranks after it.
pub fn hazard_rank(rank: u32) -> bool {
    rank >= HAZARD_START_RANK && (rank - HAZARD_START_RANK) % HAZARD_RANK_INTERVAL == 0
}
