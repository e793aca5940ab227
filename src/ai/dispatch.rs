//! Shared planning inputs and the relay executor used by every carrier role

use tracing::debug;

use crate::ai::{mining, transport};
use crate::core::config::StrategyConfig;
use crate::core::types::{BodyId, UnitId};
use crate::game::snapshot::Snapshot;
use crate::game::turn::TurnContext;
use crate::navigation::movement::Navigator;
use crate::relay::{Carrier, Leg, RelayExecutor};

/// Read-only inputs every coordinator plans with
#[derive(Debug, Clone, Copy)]
pub struct Planner<'p> {
    pub nav: &'p Navigator,
    pub config: &'p StrategyConfig,
}

impl Planner<'_> {
    /// Reserve fraction for ordinary trips
    pub fn travel_reserve(&self) -> f32 {
        self.config.movement.travel_reserve
    }
}

/// What a unit does on arriving at a relay leg
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayAction {
    /// Mine the best mineral body within reach
    MineRing,
    /// Mine one specific body
    MineBody(BodyId),
    /// Take cargo from a friendly unit
    TakeFrom(UnitId),
    /// Drop cargo off at home; the game unloads on arrival
    Unload,
}

pub type RelayLeg = Leg<RelayAction>;

/// Relay view of a unit: position, load and capacity
pub fn carrier(state: &Snapshot, id: UnitId) -> Option<Carrier> {
    let unit = state.unit(id)?;
    Some(Carrier {
        id,
        position: unit.position,
        carried: unit.cargo.total(),
        capacity: state.stats(unit.role).carry_limit,
    })
}

/// Executes relay legs against the live turn
pub struct Dispatcher<'c, 'a, 'p> {
    pub ctx: &'c mut TurnContext<'a>,
    pub planner: Planner<'p>,
    /// Energy reserve used while travelling
    pub reserve: f32,
}

impl<'c, 'a, 'p> Dispatcher<'c, 'a, 'p> {
    pub fn new(ctx: &'c mut TurnContext<'a>, planner: Planner<'p>) -> Self {
        let reserve = planner.travel_reserve();
        Self {
            ctx,
            planner,
            reserve,
        }
    }
}

impl RelayExecutor<RelayAction> for Dispatcher<'_, '_, '_> {
    fn travel(&mut self, unit: UnitId, leg: &RelayLeg) -> bool {
        self.planner
            .nav
            .plan_safe_move(self.ctx, unit, leg.target, leg.stop_distance, self.reserve)
            .reached
    }

    fn perform(&mut self, unit: UnitId, action: &RelayAction) {
        match *action {
            RelayAction::MineRing => mining::mine_best_in_reach(self.ctx, &self.planner, unit),
            RelayAction::MineBody(body) => mining::mine_body(self.ctx, unit, body),
            RelayAction::TakeFrom(source) => {
                transport::take_cargo(self.ctx, &self.planner, unit, source)
            }
            RelayAction::Unload => debug!("{} unloading at home", unit),
        }
    }
}
