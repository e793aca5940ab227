//! Support coordinator - martyrs escort the weakest friendly unit

use std::cmp::Reverse;

use glam::Vec2;
use ordered_float::OrderedFloat;
use tracing::debug;

use crate::ai::dispatch::Planner;
use crate::core::types::{Role, UnitId};
use crate::game::turn::TurnContext;

/// The living ally with the least energy; the first one on a tie
pub fn lowest_energy_ally(allies: &[(UnitId, f32)]) -> Option<UnitId> {
    allies
        .iter()
        .filter(|(_, energy)| *energy > 0.0)
        .min_by_key(|(_, energy)| OrderedFloat(*energy))
        .map(|(id, _)| *id)
}

/// Martyrs with the most movement left go first, then the ones closest to
/// the target
pub fn martyr_order(martyrs: &[(UnitId, Vec2, f32)], target: Vec2) -> Vec<UnitId> {
    let mut order = martyrs.to_vec();
    order.sort_by_key(|(_, pos, moves)| (Reverse(OrderedFloat(*moves)), OrderedFloat(pos.distance(target))));
    order.into_iter().map(|(id, _, _)| id).collect()
}

/// The living non-martyr ally with the least energy
///
/// Martyrs never escort each other; they are the escort.
fn weakest_ally(ctx: &TurnContext<'_>) -> Option<(UnitId, Vec2)> {
    let me = ctx.state.me()?.id;
    let allies: Vec<(UnitId, f32)> = ctx
        .state
        .units_of(me)
        .filter(|u| u.role != Role::Martyr)
        .map(|u| (u.id, u.energy))
        .collect();
    let id = lowest_energy_ally(&allies)?;
    ctx.state.unit(id).map(|u| (id, u.position))
}

/// Plan every martyr's turn
pub fn run_support(ctx: &mut TurnContext<'_>, planner: &Planner<'_>, martyrs: &[UnitId]) {
    if martyrs.is_empty() {
        return;
    }
    let Some((_, first_target)) = weakest_ally(ctx) else {
        debug!("No ally for {} martyrs to escort", martyrs.len());
        return;
    };

    let candidates: Vec<(UnitId, Vec2, f32)> = martyrs
        .iter()
        .filter_map(|&id| ctx.state.unit(id).map(|u| (id, u.position, u.moves)))
        .collect();

    for id in martyr_order(&candidates, first_target) {
        // Recomputed for every martyr, so they tend to converge on one ally
        let Some((ally, at)) = weakest_ally(ctx) else {
            return;
        };
        let Some(range) = ctx.state.unit(id).map(|u| ctx.state.stats(u.role).range) else {
            continue;
        };
        debug!("{} escorting {}", id, ally);
        planner
            .nav
            .plan_safe_move(ctx, id, at, range, planner.travel_reserve());
    }
}
