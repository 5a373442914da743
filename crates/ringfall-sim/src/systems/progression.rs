//! Rank progression: kill-threshold checks and rank-up scheduling.
//!
//! A met threshold never applies the rank-up inline: it flags the store and
//! queues the rank-up for the next tick, keeping kill accounting and rank
//! mutation out of the same pass.

use ringfall_core::constants::*;

use crate::scheduler::{ScheduledAction, Scheduler};
use crate::store::{GameStore, Mutation};

/// Kills required to clear the given rank: linear early, then two steeper
/// tiers.
pub fn kills_required_for(rank: u32) -> u32 {
    if rank <= RANK_TIER_EARLY_MAX {
        rank
    } else if rank <= RANK_TIER_MID_MAX {
        RANK_TIER_EARLY_MAX + MID_TIER_KILL_STEP * (rank - RANK_TIER_EARLY_MAX)
    } else {
        RANK_TIER_EARLY_MAX
            + MID_TIER_KILL_STEP * (RANK_TIER_MID_MAX - RANK_TIER_EARLY_MAX)
            + LATE_TIER_KILL_STEP * (rank - RANK_TIER_MID_MAX)
    }
}

pub fn run(store: &mut GameStore, scheduler: &mut Scheduler, wall_clock_secs: f64) {
    let progression = store.progression();
    // An unconsumed upgrade offer holds the next rank-up; advancing would
    // replace the offer and cost the player the pick. Kills keep
    // accumulating, so the rank-up lands once the offer is resolved.
    if progression.pending_rank_up || !progression.offered_upgrades.is_empty() {
        return;
    }
    if progression.kills_this_rank < kills_required_for(progression.rank) {
        return;
    }

    store.apply(Mutation::FlagRankUpPending);
    scheduler.schedule_in(wall_clock_secs, 0.0, ScheduledAction::RankUp);
    log::debug!("rank-up threshold met; scheduled for next tick");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kill_threshold_tiers() {
        assert_eq!(kills_required_for(1), 1);
        assert_eq!(kills_required_for(2), 2);
        assert_eq!(kills_required_for(3), 3);
        // Mid tier steps by 2.
        assert_eq!(kills_required_for(4), 5);
        assert_eq!(kills_required_for(9), 15);
        // Late tier steps by 3.
        assert_eq!(kills_required_for(10), 18);
        assert_eq!(kills_required_for(12), 24);
    }

    #[test]
    fn test_threshold_is_monotonic() {
        let mut prev = 0;
        for rank in 1..=30 {
            let required = kills_required_for(rank);
            assert!(required > prev, "threshold must grow with rank");
            prev = required;
        }
    }
}
