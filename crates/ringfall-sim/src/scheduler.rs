//! Deferred wall-clock timers.
//!
//! The engine advances a wall clock by real elapsed time every tick,
//! including while paused, and drains due actions at the tick boundary.
//! Entries carry the ownership token valid at scheduling time; validation
//! happens at dispatch, not here. There is no cancellation API: stale
//! entries fire and are skipped.

use ringfall_core::enums::{HazardPhase, HostileArchetype};
use ringfall_core::types::Position;

/// An action deferred to a later wall-clock instant.
#[derive(Debug, Clone)]
pub enum ScheduledAction {
    /// Apply the pending rank-up.
    RankUp,
    /// Advance the hazard FSM. Skipped when `generation` no longer matches
    /// the store's token.
    HazardTransition { to: HazardPhase, generation: u64 },
    /// Spawn the replacement for a destroyed hostile.
    RespawnHostile {
        archetype: HostileArchetype,
        position: Position,
        speed_factor: f64,
    },
}

#[derive(Debug, Clone)]
struct Entry {
    due_at: f64,
    action: ScheduledAction,
}

/// Queue of deferred actions, drained by due time each tick.
#[derive(Debug, Default)]
pub struct Scheduler {
    queue: Vec<Entry>,
}

impl Scheduler {
    /// Schedule `action` to run `delay` seconds from `now` on the wall clock.
    pub fn schedule_in(&mut self, now: f64, delay: f64, action: ScheduledAction) {
        self.queue.push(Entry {
            due_at: now + delay.max(0.0),
            action,
        });
    }

    /// Remove and return every action due at or before `now`, ordered by
    /// due time (insertion order breaks ties).
    pub fn drain_due(&mut self, now: f64) -> Vec<ScheduledAction> {
        let mut due = Vec::new();
        let mut remaining = Vec::with_capacity(self.queue.len());
        for entry in self.queue.drain(..) {
            if entry.due_at <= now {
                due.push(entry);
            } else {
                remaining.push(entry);
            }
        }
        self.queue = remaining;
        // Stable sort keeps insertion order for entries due at the same
        // instant.
        due.sort_by(|a, b| {
            a.due_at
                .partial_cmp(&b.due_at)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        due.into_iter().map(|e| e.action).collect()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_returns_only_due_entries() {
        let mut scheduler = Scheduler::default();
        scheduler.schedule_in(0.0, 1.0, ScheduledAction::RankUp);
        scheduler.schedule_in(0.0, 5.0, ScheduledAction::RankUp);

        assert!(scheduler.drain_due(0.5).is_empty());
        assert_eq!(scheduler.drain_due(1.0).len(), 1);
        assert_eq!(scheduler.len(), 1);
        assert_eq!(scheduler.drain_due(10.0).len(), 1);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_drain_orders_by_due_time() {
        let mut scheduler = Scheduler::default();
        scheduler.schedule_in(0.0, 3.0, ScheduledAction::RankUp);
        scheduler.schedule_in(
            0.0,
            1.0,
            ScheduledAction::HazardTransition {
                to: HazardPhase::Bombarding,
                generation: 1,
            },
        );

        let actions = scheduler.drain_due(5.0);
        assert!(matches!(
            actions[0],
            ScheduledAction::HazardTransition { .. }
        ));
        assert!(matches!(actions[1], ScheduledAction::RankUp));
    }

    #[test]
    fn test_negative_delay_clamps_to_now() {
        let mut scheduler = Scheduler::default();
        scheduler.schedule_in(10.0, -2.0, ScheduledAction::RankUp);
        assert_eq!(scheduler.drain_due(10.0).len(), 1);
    }
}
