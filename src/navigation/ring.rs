//! The asteroid ring around the sun and the routing waypoints on it

use glam::Vec2;
use tracing::warn;

use crate::game::snapshot::Snapshot;
use crate::navigation::geometry::Obstacle;

/// Radii of the mineral asteroid belt, measured from the sun's center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourceRing {
    pub center: Vec2,
    pub inner: f32,
    pub mean: f32,
    pub outer: f32,
}

impl ResourceRing {
    /// Measure the belt from the mineral bodies in a snapshot
    ///
    /// Returns `None` when the map has no mineral bodies.
    pub fn observe(snapshot: &Snapshot) -> Option<Self> {
        let center = snapshot.sun.position;
        let distances: Vec<f32> = snapshot
            .mineral_bodies()
            .map(|b| b.position.distance(center))
            .collect();
        if distances.is_empty() {
            return None;
        }

        let inner = distances.iter().copied().fold(f32::INFINITY, f32::min);
        let outer = distances.iter().copied().fold(0.0, f32::max);
        let mean = distances.iter().sum::<f32>() / distances.len() as f32;
        Some(Self {
            center,
            inner,
            mean,
            outer,
        })
    }

    /// A stand-in ring at twice the danger radius, for maps with no minerals
    pub fn around(obstacle: &Obstacle) -> Self {
        let radius = obstacle.danger_radius * 2.0;
        Self {
            center: obstacle.center,
            inner: radius,
            mean: radius,
            outer: radius,
        }
    }

    /// Observe the ring, falling back to [`ResourceRing::around`]
    pub fn observe_or_default(snapshot: &Snapshot, obstacle: &Obstacle) -> Self {
        Self::observe(snapshot).unwrap_or_else(|| {
            warn!("No mineral bodies on the map; routing around the sun at a fixed radius");
            Self::around(obstacle)
        })
    }

    /// Four compass points on the outer edge of the belt: north, east,
    /// south, west
    pub fn waypoints(&self) -> [Vec2; 4] {
        let r = self.outer;
        [
            self.center + Vec2::new(0.0, r),
            self.center + Vec2::new(r, 0.0),
            self.center + Vec2::new(0.0, -r),
            self.center + Vec2::new(-r, 0.0),
        ]
    }
}
