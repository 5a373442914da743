//! Events emitted by the simulation for the host's audio layer.
//!
//! Fire-and-forget effect triggers: the core never manages playback state.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Audio events carried in each snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioEvent {
    /// A weapon mount discharged.
    WeaponFired { kind: WeaponKind },
    /// A hostile was destroyed.
    HostileDestroyed { archetype: HostileArchetype },
    /// The player advanced a rank.
    RankUp { rank: u32 },
    /// Hazard sequence entered Warning.
    HazardWarning { owner_rank: u32 },
    /// Hazard sequence started bombarding.
    HazardBombarding,
    /// Hazard sequence finished or aborted.
    HazardCleared,
    /// The containment boundary started (or re-anchored) a shrink.
    ContainmentShrinking { target_radius: f64 },
    /// Player destroyed.
    GameOver,
}
