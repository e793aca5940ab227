//! Units, their cargo holds and per-role stats

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::types::{Material, PlayerId, Role, UnitId};

/// Carried material amounts
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cargo {
    pub genarium: f32,
    pub rarium: f32,
    pub legendarium: f32,
    pub mythicite: f32,
}

impl Cargo {
    pub fn get(&self, material: Material) -> f32 {
        match material {
            Material::Genarium => self.genarium,
            Material::Rarium => self.rarium,
            Material::Legendarium => self.legendarium,
            Material::Mythicite => self.mythicite,
        }
    }

    fn slot(&mut self, material: Material) -> &mut f32 {
        match material {
            Material::Genarium => &mut self.genarium,
            Material::Rarium => &mut self.rarium,
            Material::Legendarium => &mut self.legendarium,
            Material::Mythicite => &mut self.mythicite,
        }
    }

    /// Add material; negative amounts are ignored
    pub fn add(&mut self, material: Material, amount: f32) {
        *self.slot(material) += amount.max(0.0);
    }

    /// Remove up to `amount`, returning what was actually removed
    pub fn take(&mut self, material: Material, amount: f32) -> f32 {
        let slot = self.slot(material);
        let taken = amount.clamp(0.0, *slot);
        *slot -= taken;
        taken
    }

    pub fn total(&self) -> f32 {
        Material::ALL.iter().map(|&m| self.get(m)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() <= 0.0
    }

    pub fn clear(&mut self) {
        *self = Cargo::default();
    }
}

/// Stats shared by every unit of one role
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoleStats {
    /// Funds needed to spawn one unit
    pub cost: f32,
    /// Interaction range for mining, attacking and transfers
    pub range: f32,
    /// Distance the unit may move per turn without dashing
    pub moves: f32,
    /// Maximum energy
    pub energy: f32,
    /// Total cargo the unit can hold
    pub carry_limit: f32,
    /// Energy removed from a target per attack
    pub damage: f32,
}

/// Stats for every role
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleTable {
    pub corvette: RoleStats,
    pub missile_boat: RoleStats,
    pub martyr: RoleStats,
    pub transport: RoleStats,
    pub miner: RoleStats,
}

impl RoleTable {
    pub fn get(&self, role: Role) -> &RoleStats {
        match role {
            Role::Corvette => &self.corvette,
            Role::MissileBoat => &self.missile_boat,
            Role::Martyr => &self.martyr,
            Role::Transport => &self.transport,
            Role::Miner => &self.miner,
        }
    }
}

impl Default for RoleTable {
    fn default() -> Self {
        Self {
            corvette: RoleStats {
                cost: 75.0,
                range: 100.0,
                moves: 200.0,
                energy: 100.0,
                carry_limit: 0.0,
                damage: 25.0,
            },
            missile_boat: RoleStats {
                cost: 100.0,
                range: 300.0,
                moves: 150.0,
                energy: 100.0,
                carry_limit: 0.0,
                damage: 50.0,
            },
            martyr: RoleStats {
                cost: 50.0,
                range: 50.0,
                moves: 200.0,
                energy: 150.0,
                carry_limit: 0.0,
                damage: 0.0,
            },
            transport: RoleStats {
                cost: 75.0,
                range: 50.0,
                moves: 150.0,
                energy: 100.0,
                carry_limit: 100.0,
                damage: 0.0,
            },
            miner: RoleStats {
                cost: 50.0,
                range: 25.0,
                moves: 100.0,
                energy: 100.0,
                carry_limit: 50.0,
                damage: 0.0,
            },
        }
    }
}

/// A ship on the map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub owner: PlayerId,
    pub role: Role,
    pub position: Vec2,
    /// Movement budget left this turn
    pub moves: f32,
    pub energy: f32,
    #[serde(default)]
    pub cargo: Cargo,
}

impl Unit {
    pub fn new(id: UnitId, owner: PlayerId, role: Role, position: Vec2) -> Self {
        Self {
            id,
            owner,
            role,
            position,
            moves: 0.0,
            energy: 0.0,
            cargo: Cargo::default(),
        }
    }

    /// Fill movement and energy from the role stats
    pub fn with_stats(mut self, stats: &RoleStats) -> Self {
        self.moves = stats.moves;
        self.energy = stats.energy;
        self
    }

    pub fn is_alive(&self) -> bool {
        self.energy > 0.0
    }
}
