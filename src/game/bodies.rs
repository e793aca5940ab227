//! Celestial bodies, home bases and projectiles

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::types::{BodyId, Material, PlayerId, ProjectileId, UnitId};

/// The sun at the center of the map. Nothing may fly through it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Sun {
    pub position: Vec2,
    pub radius: f32,
}

/// A mineable asteroid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceBody {
    pub id: BodyId,
    pub position: Vec2,
    pub radius: f32,
    pub material: Material,
    /// Remaining amount; mutated by the game between turns
    pub amount: f32,
    /// The single high-value asteroid both players fight over
    #[serde(default)]
    pub contested: bool,
}

impl ResourceBody {
    pub fn is_depleted(&self) -> bool {
        self.amount <= 0.0
    }
}

/// A player's spawn point and drop-off zone
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HomeBase {
    pub position: Vec2,
    pub radius: f32,
}

impl HomeBase {
    pub fn contains(&self, point: Vec2) -> bool {
        self.position.distance(point) <= self.radius
    }
}

/// A missile in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: ProjectileId,
    pub owner: PlayerId,
    pub position: Vec2,
    #[serde(default)]
    pub target: Option<UnitId>,
}
