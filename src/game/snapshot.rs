//! Turn snapshot - the full game state as seen at the start of a turn
//!
//! The engine reads this and never edits it directly. Only an
//! [`Arbiter`](crate::game::arbiter::Arbiter) applies intents to it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::error::{EngineError, Result};
use crate::core::types::{BodyId, PlayerId, ProjectileId, Role, Turn, UnitId};
use crate::game::bodies::{Projectile, ResourceBody, Sun};
use crate::game::player::Player;
use crate::game::units::{RoleStats, RoleTable, Unit};

/// Global rule constants reported by the game
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConstants {
    /// Energy spent per `dash_distance` travelled while dashing
    pub dash_cost: f32,
    /// Distance normalizer for dash cost
    pub dash_distance: f32,
    /// Collision radius of every ship
    pub ship_radius: f32,
    /// Turns during which the contested asteroid cannot be mined
    pub protected_turns: u32,
}

impl Default for GameConstants {
    fn default() -> Self {
        Self {
            dash_cost: 10.0,
            dash_distance: 50.0,
            ship_radius: 10.0,
            protected_turns: 12,
        }
    }
}

impl GameConstants {
    /// Energy a dash over `distance` costs
    pub fn dash_energy(&self, distance: f32) -> f32 {
        if self.dash_distance <= 0.0 {
            return f32::INFINITY;
        }
        distance / self.dash_distance * self.dash_cost
    }
}

/// Complete state for one turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub turn: Turn,
    /// The player this engine controls
    pub me: PlayerId,
    #[serde(default)]
    pub constants: GameConstants,
    #[serde(default)]
    pub roles: RoleTable,
    pub sun: Sun,
    #[serde(default)]
    pub bodies: Vec<ResourceBody>,
    pub players: Vec<Player>,
    #[serde(default)]
    pub units: Vec<Unit>,
    #[serde(default)]
    pub projectiles: Vec<Projectile>,
}

impl Snapshot {
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        if snapshot.player(snapshot.me).is_none() {
            return Err(EngineError::UnknownPlayer(snapshot.me));
        }
        Ok(snapshot)
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// The controlled player
    pub fn me(&self) -> Option<&Player> {
        self.player(self.me)
    }

    /// The controlled player's opponent
    pub fn opponent(&self) -> Option<&Player> {
        self.me().and_then(|p| self.player(p.opponent))
    }

    pub fn stats(&self, role: Role) -> &RoleStats {
        self.roles.get(role)
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.iter_mut().find(|u| u.id == id)
    }

    /// Living units owned by `owner`
    pub fn units_of(&self, owner: PlayerId) -> impl Iterator<Item = &Unit> + '_ {
        self.units
            .iter()
            .filter(move |u| u.owner == owner && u.is_alive())
    }

    pub fn body(&self, id: BodyId) -> Option<&ResourceBody> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut ResourceBody> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    /// The shared high-value asteroid, if the map has one
    pub fn contested_body(&self) -> Option<&ResourceBody> {
        self.bodies.iter().find(|b| b.contested)
    }

    /// Ordinary mineral asteroids (everything but the contested one)
    pub fn mineral_bodies(&self) -> impl Iterator<Item = &ResourceBody> + '_ {
        self.bodies.iter().filter(|b| !b.contested)
    }

    pub fn projectile(&self, id: ProjectileId) -> Option<&Projectile> {
        self.projectiles.iter().find(|p| p.id == id)
    }

    /// Position of the controlled player's home base
    pub fn home_position(&self) -> Option<Vec2> {
        self.me().map(|p| p.home.position)
    }
}
