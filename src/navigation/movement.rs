//! Movement planner - turns a desired destination into one move or dash
//!
//! A unit gets at most one movement intent per turn. When the ordinary
//! movement budget falls short, the planner dashes the whole way if the
//! unit can afford it without dipping under its energy reserve.

use glam::Vec2;
use tracing::debug;

use crate::core::types::UnitId;
use crate::game::intents::Intent;
use crate::game::turn::TurnContext;
use crate::navigation::geometry::{point_at_distance, step_toward, within_range, Obstacle};
use crate::navigation::ring::ResourceRing;

/// Result of a movement plan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    /// A movement intent was accepted this call
    pub advanced: bool,
    /// The unit ends within the stop distance of the target
    pub reached: bool,
}

impl MoveOutcome {
    const ARRIVED: MoveOutcome = MoveOutcome {
        advanced: false,
        reached: true,
    };
}

/// Obstacle-aware movement planning for one turn
#[derive(Debug, Clone)]
pub struct Navigator {
    pub obstacle: Obstacle,
    pub ring: ResourceRing,
    waypoints: [Vec2; 4],
}

impl Navigator {
    pub fn new(obstacle: Obstacle, ring: ResourceRing) -> Self {
        Self {
            obstacle,
            ring,
            waypoints: ring.waypoints(),
        }
    }

    pub fn waypoints(&self) -> &[Vec2; 4] {
        &self.waypoints
    }

    /// Move `unit` toward `target`, stopping `stop_distance` short of it
    ///
    /// Dashes when the movement budget cannot close the gap and the dash
    /// leaves more than `reserve_fraction` of max energy. Otherwise moves as
    /// far as the budget allows. Nothing is issued when the destination is
    /// inside the sun's danger radius.
    pub fn plan_move(
        &self,
        ctx: &mut TurnContext<'_>,
        unit_id: UnitId,
        target: Vec2,
        stop_distance: f32,
        reserve_fraction: f32,
    ) -> MoveOutcome {
        let Some(unit) = ctx.state.unit(unit_id) else {
            return MoveOutcome::default();
        };
        let from = unit.position;
        let distance = from.distance(target);
        if within_range(from, target, stop_distance) {
            return MoveOutcome::ARRIVED;
        }
        if ctx.has_moved(unit_id) {
            return MoveOutcome::default();
        }

        let max_energy = ctx.state.stats(unit.role).energy;
        let destination = point_at_distance(target, from, stop_distance);
        let travel = distance - stop_distance;

        let intent = if travel > unit.moves {
            let cost = ctx.state.constants.dash_energy(travel);
            if unit.energy - cost > reserve_fraction * max_energy {
                Intent::Dash {
                    unit: unit_id,
                    to: destination,
                }
            } else {
                Intent::Move {
                    unit: unit_id,
                    to: step_toward(from, destination, unit.moves),
                }
            }
        } else {
            Intent::Move {
                unit: unit_id,
                to: destination,
            }
        };

        let to = match intent {
            Intent::Move { to, .. } | Intent::Dash { to, .. } => to,
            _ => destination,
        };
        if from.distance(to) <= f32::EPSILON {
            return MoveOutcome::default();
        }
        if !self.obstacle.is_safe_point(to) {
            debug!(
                "Withholding {}: destination ({:.1}, {:.1}) is inside the sun's danger radius",
                unit_id, to.x, to.y
            );
            return MoveOutcome::default();
        }

        let advanced = ctx.submit(intent);
        let reached = ctx
            .state
            .unit(unit_id)
            .is_some_and(|u| within_range(u.position, target, stop_distance));
        MoveOutcome { advanced, reached }
    }

    /// Like [`Navigator::plan_move`], but routes around the sun
    ///
    /// When the straight line to the stop point crosses the danger radius,
    /// the unit heads for the reachable waypoint nearest the target instead
    /// and never reports arrival this turn.
    pub fn plan_safe_move(
        &self,
        ctx: &mut TurnContext<'_>,
        unit_id: UnitId,
        target: Vec2,
        stop_distance: f32,
        reserve_fraction: f32,
    ) -> MoveOutcome {
        let Some(from) = ctx.state.unit(unit_id).map(|u| u.position) else {
            return MoveOutcome::default();
        };
        if within_range(from, target, stop_distance) {
            return MoveOutcome::ARRIVED;
        }

        let stop_point = point_at_distance(target, from, stop_distance);
        if !self.obstacle.segment_blocked(from, stop_point) {
            return self.plan_move(ctx, unit_id, target, stop_distance, reserve_fraction);
        }

        match self.obstacle.select_waypoint(&self.waypoints, from, target) {
            Some(waypoint) => {
                debug!(
                    "{} routing via waypoint ({:.1}, {:.1})",
                    unit_id, waypoint.x, waypoint.y
                );
                let outcome = self.plan_move(ctx, unit_id, waypoint, 0.0, reserve_fraction);
                MoveOutcome {
                    advanced: outcome.advanced,
                    reached: false,
                }
            }
            None => {
                debug!("{} has no clear waypoint toward its target", unit_id);
                MoveOutcome::default()
            }
        }
    }
}
