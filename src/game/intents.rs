//! Intents - the only way the engine affects the game
//!
//! Intents are requests. The game validates and applies them; a refused
//! intent is simply not retried this turn.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::types::{BodyId, Material, PlayerId, ProjectileId, Role, UnitId};

/// How much to move in a transfer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "f32", from = "f32")]
pub enum TransferAmount {
    /// Everything available of the material (`-1` on the wire)
    All,
    Exact(f32),
}

impl From<TransferAmount> for f32 {
    fn from(amount: TransferAmount) -> Self {
        match amount {
            TransferAmount::All => -1.0,
            TransferAmount::Exact(value) => value,
        }
    }
}

impl From<f32> for TransferAmount {
    fn from(value: f32) -> Self {
        if value < 0.0 {
            TransferAmount::All
        } else {
            TransferAmount::Exact(value)
        }
    }
}

/// Budget category an intent draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntentClass {
    /// Move or dash; one per unit per turn
    Movement,
    /// Mine, attack, shootdown or transfer; one per unit per turn
    Action,
    /// Issued against the home base, not a unit
    Spawn,
}

/// A single request to the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Intent {
    Move {
        unit: UnitId,
        to: Vec2,
    },
    Dash {
        unit: UnitId,
        to: Vec2,
    },
    Mine {
        unit: UnitId,
        body: BodyId,
    },
    Attack {
        unit: UnitId,
        target: UnitId,
    },
    Shootdown {
        unit: UnitId,
        projectile: ProjectileId,
    },
    Transfer {
        unit: UnitId,
        from: UnitId,
        amount: TransferAmount,
        material: Material,
    },
    Spawn {
        player: PlayerId,
        at: Vec2,
        role: Role,
    },
}

impl Intent {
    pub fn class(&self) -> IntentClass {
        match self {
            Intent::Move { .. } | Intent::Dash { .. } => IntentClass::Movement,
            Intent::Mine { .. }
            | Intent::Attack { .. }
            | Intent::Shootdown { .. }
            | Intent::Transfer { .. } => IntentClass::Action,
            Intent::Spawn { .. } => IntentClass::Spawn,
        }
    }

    /// Unit issuing the intent; `None` for spawns
    pub fn actor(&self) -> Option<UnitId> {
        match self {
            Intent::Move { unit, .. }
            | Intent::Dash { unit, .. }
            | Intent::Mine { unit, .. }
            | Intent::Attack { unit, .. }
            | Intent::Shootdown { unit, .. }
            | Intent::Transfer { unit, .. } => Some(*unit),
            Intent::Spawn { .. } => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Intent::Move { .. } => "move",
            Intent::Dash { .. } => "dash",
            Intent::Mine { .. } => "mine",
            Intent::Attack { .. } => "attack",
            Intent::Shootdown { .. } => "shootdown",
            Intent::Transfer { .. } => "transfer",
            Intent::Spawn { .. } => "spawn",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Intent::Move { unit, to } => write!(f, "{unit} move ({:.1}, {:.1})", to.x, to.y),
            Intent::Dash { unit, to } => write!(f, "{unit} dash ({:.1}, {:.1})", to.x, to.y),
            Intent::Mine { unit, body } => write!(f, "{unit} mine {body}"),
            Intent::Attack { unit, target } => write!(f, "{unit} attack {target}"),
            Intent::Shootdown { unit, projectile } => {
                write!(f, "{unit} shootdown projectile#{}", projectile.0)
            }
            Intent::Transfer {
                unit,
                from,
                amount,
                material,
            } => match amount {
                TransferAmount::All => write!(f, "{unit} take all {material} from {from}"),
                TransferAmount::Exact(n) => write!(f, "{unit} take {n:.1} {material} from {from}"),
            },
            Intent::Spawn { player, at, role } => write!(
                f,
                "{player} spawn {} at ({:.1}, {:.1})",
                role.job_name(),
                at.x,
                at.y
            ),
        }
    }
}
