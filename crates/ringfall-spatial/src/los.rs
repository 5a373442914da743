//! Line-of-sight checks against obstacle circles.
//!
//! Sight lines are evaluated on the ground plane: obstacles block fire
//! between two points when the planar segment between them passes through
//! an obstacle footprint.

use glam::DVec2;

use ringfall_core::types::Position;

use crate::placement::Circle;

/// Returns true when the planar segment from `from` to `to` clears every
/// obstacle circle.
pub fn segment_clear(from: &Position, to: &Position, obstacles: &[Circle]) -> bool {
    let a = DVec2::new(from.x, from.y);
    let b = DVec2::new(to.x, to.y);
    obstacles
        .iter()
        .all(|c| segment_circle_distance(a, b, c.center) >= c.radius)
}

/// Minimum planar distance from `point` to the segment `from`..`to`.
/// Collision sweeps use this to catch bodies crossed between samples.
pub fn segment_distance(from: &Position, to: &Position, point: &Position) -> f64 {
    segment_circle_distance(
        DVec2::new(from.x, from.y),
        DVec2::new(to.x, to.y),
        DVec2::new(point.x, point.y),
    )
}

/// Minimum distance from `point` to the segment `a`..`b`.
fn segment_circle_distance(a: DVec2, b: DVec2, point: DVec2) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f64::EPSILON {
        return point.distance(a);
    }
    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    point.distance(a + ab * t)
}
