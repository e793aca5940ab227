//! Plane geometry around the sun
//!
//! All checks are against the sun's *danger radius*: its physical radius
//! plus a ship's radius plus a safety margin.

use glam::Vec2;

use crate::game::bodies::Sun;

/// Squared segment length below which a segment is treated as a point
const DEGENERATE_LENGTH_SQ: f32 = 1e-8;

/// Slack on every arrival and range check
///
/// Stopping points land a rounding error past the requested distance, so a
/// unit that stopped at a leg's stop distance must also count as in range.
pub const ARRIVAL_TOLERANCE: f32 = 1e-2;

/// Euclidean distance between two points
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Whether `a` is within `range` of `b`, allowing [`ARRIVAL_TOLERANCE`]
pub fn within_range(a: Vec2, b: Vec2, range: f32) -> bool {
    distance(a, b) <= range + ARRIVAL_TOLERANCE
}

/// The point on the ray from `target` toward `from` at `stop_distance`
/// from `target`
///
/// If the two points coincide there is no ray; `target` itself is returned.
pub fn point_at_distance(target: Vec2, from: Vec2, stop_distance: f32) -> Vec2 {
    let offset = from - target;
    let length = offset.length();
    if length <= f32::EPSILON {
        return target;
    }
    target + offset * (stop_distance.min(length) / length)
}

/// Move from `from` toward `to` by at most `max_step`
pub fn step_toward(from: Vec2, to: Vec2, max_step: f32) -> Vec2 {
    let offset = to - from;
    let length = offset.length();
    if length <= max_step || length <= f32::EPSILON {
        return to;
    }
    from + offset * (max_step.max(0.0) / length)
}

/// A circular no-fly zone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub center: Vec2,
    pub danger_radius: f32,
}

impl Obstacle {
    pub fn new(center: Vec2, danger_radius: f32) -> Self {
        Self {
            center,
            danger_radius,
        }
    }

    /// The sun's danger zone for ships of `ship_radius`
    pub fn from_sun(sun: &Sun, ship_radius: f32, margin: f32) -> Self {
        Self::new(sun.position, sun.radius + ship_radius + margin)
    }

    /// Whether `point` is outside the danger radius
    pub fn is_safe_point(&self, point: Vec2) -> bool {
        distance(self.center, point) >= self.danger_radius
    }

    /// Whether the straight segment `p1 -> p2` enters the danger radius
    ///
    /// A zero-length segment never counts as blocked.
    pub fn segment_blocked(&self, p1: Vec2, p2: Vec2) -> bool {
        let segment = p2 - p1;
        let length_sq = segment.length_squared();
        if length_sq < DEGENERATE_LENGTH_SQ {
            return false;
        }

        if !self.is_safe_point(p1) || !self.is_safe_point(p2) {
            return true;
        }

        // Perpendicular foot must fall on the segment
        let t = (self.center - p1).dot(segment) / length_sq;
        if !(0.0..=1.0).contains(&t) {
            return false;
        }

        let perpendicular = segment.perp_dot(self.center - p1).abs() / length_sq.sqrt();
        perpendicular < self.danger_radius
    }

    /// Pick the waypoint closest to `target` that `from` can reach in a
    /// straight line
    ///
    /// Waypoints the unit is already sitting on are skipped. Ties keep the
    /// earliest waypoint in `waypoints`.
    pub fn select_waypoint(&self, waypoints: &[Vec2], from: Vec2, target: Vec2) -> Option<Vec2> {
        let mut best: Option<(Vec2, f32)> = None;
        for &waypoint in waypoints {
            if from.distance(waypoint) <= f32::EPSILON * 16.0 {
                continue;
            }
            if !self.is_safe_point(waypoint) || self.segment_blocked(from, waypoint) {
                continue;
            }
            let d = distance(waypoint, target);
            if best.map_or(true, |(_, best_d)| d < best_d) {
                best = Some((waypoint, d));
            }
        }
        best.map(|(waypoint, _)| waypoint)
    }
}
