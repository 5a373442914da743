//! Spatial queries for the RINGFALL arena: procedural placement and
//! line-of-sight checks against obstacle circles.
//!
//! Everything here is a pure function of its inputs (plus a caller-owned
//! seeded RNG), with no internal state.

pub mod los;
pub mod placement;

pub use los::{segment_clear, segment_distance};
pub use placement::{find_position, Circle, PlacementQuery};
