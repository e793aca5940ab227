//! The boundary between the engine and the authoritative game
//!
//! The engine hands every intent to an [`Arbiter`], which decides whether it
//! is legal and applies it to the snapshot before the next intent is
//! planned. [`LocalArbiter`] is a small rule-checking stand-in for the match
//! server, used by tests, benches and the headless runner.

use thiserror::Error;

use crate::core::types::{PlayerId, Role, UnitId};
use crate::game::intents::{Intent, TransferAmount};
use crate::game::snapshot::Snapshot;
use crate::navigation::geometry::{Obstacle, ARRIVAL_TOLERANCE};

/// Distance slack for range and budget checks; never tighter than the
/// planner's arrival check
const TOLERANCE: f32 = 2.0 * ARRIVAL_TOLERANCE;

/// Why the game refused an intent
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{kind} rejected: {reason}")]
pub struct IntentRejected {
    pub kind: &'static str,
    pub reason: String,
}

impl IntentRejected {
    pub fn new(intent: &Intent, reason: impl Into<String>) -> Self {
        Self {
            kind: intent.kind(),
            reason: reason.into(),
        }
    }
}

/// Validates and applies intents to the authoritative state
pub trait Arbiter {
    /// Apply `intent` to `state` or explain why it was refused
    fn submit(&mut self, state: &mut Snapshot, intent: &Intent) -> Result<(), IntentRejected>;
}

/// Reference arbiter applying simplified game rules
#[derive(Debug, Clone)]
pub struct LocalArbiter {
    /// Material gained per successful mine
    pub mining_yield: f32,
    accepted: Vec<Intent>,
    spawned: Vec<(PlayerId, Role)>,
}

impl Default for LocalArbiter {
    fn default() -> Self {
        Self::new(10.0)
    }
}

impl LocalArbiter {
    pub fn new(mining_yield: f32) -> Self {
        Self {
            mining_yield,
            accepted: Vec::new(),
            spawned: Vec::new(),
        }
    }

    /// Intents applied so far, in submission order
    pub fn accepted(&self) -> &[Intent] {
        &self.accepted
    }

    /// Spawns paid for this turn; they join the roster next snapshot
    pub fn spawned(&self) -> &[(PlayerId, Role)] {
        &self.spawned
    }

    pub fn clear(&mut self) {
        self.accepted.clear();
        self.spawned.clear();
    }

    fn apply(&mut self, state: &mut Snapshot, intent: &Intent) -> Result<(), IntentRejected> {
        let reject = |reason: &str| Err(IntentRejected::new(intent, reason));
        let sun = Obstacle::from_sun(&state.sun, state.constants.ship_radius, 0.0);

        match intent {
            Intent::Move { unit, to } => {
                let Some(u) = state.unit(*unit) else {
                    return reject("unknown unit");
                };
                let distance = u.position.distance(*to);
                if distance > u.moves + TOLERANCE {
                    return reject("destination beyond movement budget");
                }
                if sun.segment_blocked(u.position, *to) || !sun.is_safe_point(*to) {
                    return reject("path crosses the sun");
                }
                let owner = u.owner;
                if let Some(u) = state.unit_mut(*unit) {
                    u.position = *to;
                    u.moves = (u.moves - distance).max(0.0);
                }
                unload_at_home(state, *unit, owner);
            }
            Intent::Dash { unit, to } => {
                let Some(u) = state.unit(*unit) else {
                    return reject("unknown unit");
                };
                let cost = state.constants.dash_energy(u.position.distance(*to));
                if cost > u.energy {
                    return reject("not enough energy to dash");
                }
                if sun.segment_blocked(u.position, *to) || !sun.is_safe_point(*to) {
                    return reject("dash crosses the sun");
                }
                let owner = u.owner;
                if let Some(u) = state.unit_mut(*unit) {
                    u.position = *to;
                    u.energy -= cost;
                    u.moves = 0.0;
                }
                unload_at_home(state, *unit, owner);
            }
            Intent::Mine { unit, body } => {
                let Some(u) = state.unit(*unit) else {
                    return reject("unknown unit");
                };
                let Some(b) = state.body(*body) else {
                    return reject("unknown body");
                };
                if u.role != Role::Miner {
                    return reject("only miners can mine");
                }
                if b.is_depleted() {
                    return reject("body is depleted");
                }
                if b.contested && state.turn < state.constants.protected_turns {
                    return reject("contested asteroid is still protected");
                }
                if u.position.distance(b.position) > state.stats(u.role).range + TOLERANCE {
                    return reject("body out of range");
                }
                let room = state.stats(u.role).carry_limit - u.cargo.total();
                let mined = self.mining_yield.min(b.amount).min(room);
                if mined <= 0.0 {
                    return reject("cargo hold is full");
                }
                let material = b.material;
                if let Some(b) = state.body_mut(*body) {
                    b.amount -= mined;
                }
                if let Some(u) = state.unit_mut(*unit) {
                    u.cargo.add(material, mined);
                }
            }
            Intent::Attack { unit, target } => {
                let (Some(u), Some(t)) = (state.unit(*unit), state.unit(*target)) else {
                    return reject("unknown unit");
                };
                if u.owner == t.owner {
                    return reject("cannot attack a friendly unit");
                }
                let stats = state.stats(u.role);
                if stats.damage <= 0.0 {
                    return reject("unit has no weapon");
                }
                if u.position.distance(t.position) > stats.range + TOLERANCE {
                    return reject("target out of range");
                }
                let damage = stats.damage;
                if let Some(t) = state.unit_mut(*target) {
                    t.energy = (t.energy - damage).max(0.0);
                }
            }
            Intent::Shootdown { unit, projectile } => {
                let Some(u) = state.unit(*unit) else {
                    return reject("unknown unit");
                };
                let Some(p) = state.projectile(*projectile) else {
                    return reject("unknown projectile");
                };
                if !u.role.can_shoot_down() {
                    return reject("unit cannot shoot down projectiles");
                }
                if p.owner == u.owner {
                    return reject("cannot shoot down a friendly projectile");
                }
                if u.position.distance(p.position) > state.stats(u.role).range + TOLERANCE {
                    return reject("projectile out of range");
                }
                state.projectiles.retain(|p| p.id != *projectile);
            }
            Intent::Transfer {
                unit,
                from,
                amount,
                material,
            } => {
                let (Some(u), Some(src)) = (state.unit(*unit), state.unit(*from)) else {
                    return reject("unknown unit");
                };
                if u.owner != src.owner {
                    return reject("cannot take from an enemy unit");
                }
                let stats = state.stats(u.role);
                if u.position.distance(src.position) > stats.range + TOLERANCE {
                    return reject("source out of range");
                }
                let available = src.cargo.get(*material);
                let room = stats.carry_limit - u.cargo.total();
                let wanted = match amount {
                    TransferAmount::All => available,
                    TransferAmount::Exact(n) => *n,
                };
                let moved = wanted.min(available).min(room);
                if moved <= 0.0 {
                    return reject("nothing to transfer");
                }
                if let Some(src) = state.unit_mut(*from) {
                    src.cargo.take(*material, moved);
                }
                if let Some(u) = state.unit_mut(*unit) {
                    u.cargo.add(*material, moved);
                }
            }
            Intent::Spawn { player, role, .. } => {
                let cost = state.stats(*role).cost;
                let Some(p) = state.player_mut(*player) else {
                    return reject("unknown player");
                };
                if p.funds < cost {
                    return reject("insufficient funds");
                }
                p.funds -= cost;
                self.spawned.push((*player, *role));
            }
        }
        Ok(())
    }
}

/// Units inside their home base drop their cargo for funds
fn unload_at_home(state: &mut Snapshot, unit: UnitId, owner: PlayerId) {
    let Some(home) = state.player(owner).map(|p| p.home) else {
        return;
    };
    let mut delivered = 0.0;
    if let Some(u) = state.unit_mut(unit) {
        if home.contains(u.position) {
            delivered = u.cargo.total();
            u.cargo.clear();
        }
    }
    if delivered > 0.0 {
        if let Some(p) = state.player_mut(owner) {
            p.funds += delivered;
        }
    }
}

impl Arbiter for LocalArbiter {
    fn submit(&mut self, state: &mut Snapshot, intent: &Intent) -> Result<(), IntentRejected> {
        self.apply(state, intent)?;
        self.accepted.push(intent.clone());
        Ok(())
    }
}
