//! Core type definitions used throughout the codebase

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a unit (ship) as reported by the game server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(pub u32);

/// Identifier of a resource body (asteroid)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub u32);

/// Identifier of a projectile in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileId(pub u32);

/// Identifier of a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unit#{}", self.0)
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "body#{}", self.0)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player#{}", self.0)
    }
}

/// Game turn counter
pub type Turn = u32;

/// Unit specializations
///
/// Declaration order is the role index used for deterministic tie-breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Corvette,
    MissileBoat,
    Martyr,
    Transport,
    Miner,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Corvette,
        Role::MissileBoat,
        Role::Martyr,
        Role::Transport,
        Role::Miner,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Position of this role in [`Role::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Name the game server expects in a spawn call
    pub fn job_name(self) -> &'static str {
        match self {
            Role::Corvette => "corvette",
            Role::MissileBoat => "missileboat",
            Role::Martyr => "martyr",
            Role::Transport => "transport",
            Role::Miner => "miner",
        }
    }

    /// Whether the role fights enemy units
    pub fn is_combat(self) -> bool {
        matches!(self, Role::Corvette | Role::MissileBoat)
    }

    /// Only corvettes can shoot projectiles out of the sky
    pub fn can_shoot_down(self) -> bool {
        matches!(self, Role::Corvette)
    }
}

/// Mineable materials
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    Genarium,
    Rarium,
    Legendarium,
    Mythicite,
}

impl Material {
    pub const ALL: [Material; 4] = [
        Material::Genarium,
        Material::Rarium,
        Material::Legendarium,
        Material::Mythicite,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Material::Genarium => "genarium",
            Material::Rarium => "rarium",
            Material::Legendarium => "legendarium",
            Material::Mythicite => "mythicite",
        };
        f.write_str(name)
    }
}
