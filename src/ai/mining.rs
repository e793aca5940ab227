//! Mining coordinator
//!
//! Miners split into a mineral crew working the asteroid ring and a crew on
//! the contested asteroid. While the contested asteroid is protected, the
//! whole workforce stays on minerals.

use std::cmp::Reverse;

use glam::Vec2;
use ordered_float::OrderedFloat;
use tracing::debug;

use crate::ai::dispatch::{carrier, Dispatcher, Planner, RelayAction, RelayLeg};
use crate::core::types::{BodyId, UnitId};
use crate::game::intents::Intent;
use crate::game::turn::TurnContext;
use crate::navigation::geometry::within_range;
use crate::relay::relay_step;

/// Miners assigned to each crew
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MiningCrews {
    pub mineral: Vec<UnitId>,
    pub contested: Vec<UnitId>,
}

/// Split miners between the ring and the contested asteroid
///
/// The mineral crew gets `ceil(n * mineral_share)` miners. The miners
/// closest to the contested asteroid take the contested shifts. With no
/// contested asteroid, or while it is protected, everyone mines minerals.
pub fn split_miners(
    miners: &[(UnitId, Vec2)],
    mineral_share: f32,
    contested_at: Option<Vec2>,
    protected: bool,
) -> MiningCrews {
    let Some(asteroid) = contested_at.filter(|_| !protected) else {
        return MiningCrews {
            mineral: miners.iter().map(|(id, _)| *id).collect(),
            contested: Vec::new(),
        };
    };

    let mineral_count = ((miners.len() as f32 * mineral_share).ceil() as usize).min(miners.len());
    let contested_count = miners.len() - mineral_count;

    let mut by_distance: Vec<&(UnitId, Vec2)> = miners.iter().collect();
    by_distance.sort_by_key(|(_, pos)| OrderedFloat(pos.distance(asteroid)));

    let contested: Vec<UnitId> = by_distance
        .iter()
        .take(contested_count)
        .map(|(id, _)| *id)
        .collect();
    let mineral = miners
        .iter()
        .map(|(id, _)| *id)
        .filter(|id| !contested.contains(id))
        .collect();

    MiningCrews { mineral, contested }
}

/// Plan every miner's turn
pub fn run_mining(ctx: &mut TurnContext<'_>, planner: &Planner<'_>, miners: &[UnitId]) {
    if miners.is_empty() {
        return;
    }
    let Some(home) = ctx.state.me().map(|p| p.home) else {
        return;
    };

    let mining = &planner.config.mining;
    let protected_turns = mining
        .protected_turns
        .unwrap_or(ctx.state.constants.protected_turns);
    let protected = ctx.state.turn < protected_turns;
    let contested = ctx.state.contested_body().map(|b| (b.id, b.position));

    let positions: Vec<(UnitId, Vec2)> = miners
        .iter()
        .filter_map(|&id| ctx.state.unit(id).map(|u| (id, u.position)))
        .collect();
    let crews = split_miners(
        &positions,
        mining.mineral_share,
        contested.map(|(_, pos)| pos),
        protected,
    );
    debug!(
        "Mining crews: {} mineral, {} contested{}",
        crews.mineral.len(),
        crews.contested.len(),
        if protected { " (protected window)" } else { "" }
    );

    let ring = planner.nav.ring;
    let sink = RelayLeg::new(home.position, home.radius * 0.5, RelayAction::Unload);
    let ring_source = RelayLeg::new(ring.center, ring.mean, RelayAction::MineRing);

    for &id in &crews.mineral {
        let Some(c) = carrier(ctx.state, id) else {
            continue;
        };
        relay_step(&mut Dispatcher::new(ctx, *planner), &c, &ring_source, &sink);
    }

    let Some((asteroid_id, asteroid_at)) = contested else {
        return;
    };
    for &id in &crews.contested {
        let Some(unit) = ctx.state.unit(id) else {
            continue;
        };
        let stats = ctx.state.stats(unit.role);
        let range = stats.range;
        if unit.energy < mining.retreat_energy_fraction * stats.energy {
            debug!("{} low on energy; withdrawing from the contested asteroid", id);
            planner.nav.plan_safe_move(
                ctx,
                id,
                home.position,
                home.radius * 0.5,
                mining.withdraw_reserve,
            );
            continue;
        }

        let Some(c) = carrier(ctx.state, id) else {
            continue;
        };
        let source = RelayLeg::new(asteroid_at, range, RelayAction::MineBody(asteroid_id));
        relay_step(&mut Dispatcher::new(ctx, *planner), &c, &source, &sink);
    }
}

/// Mine the best mineral body the unit can reach this turn
///
/// Bodies within range plus the unit's remaining movement are ranked by
/// rarity, rarest first, then by distance. The unit moves onto the winner
/// and mines it if it ends up in range.
pub fn mine_best_in_reach(ctx: &mut TurnContext<'_>, planner: &Planner<'_>, id: UnitId) {
    let Some(unit) = ctx.state.unit(id) else {
        return;
    };
    let from = unit.position;
    let range = ctx.state.stats(unit.role).range;
    let reach = range + if ctx.has_moved(id) { 0.0 } else { unit.moves };
    let rarity = &planner.config.rarity;

    let best = ctx
        .state
        .mineral_bodies()
        .filter(|b| !b.is_depleted() && b.position.distance(from) <= reach)
        .min_by_key(|b| {
            (
                Reverse(rarity.rank(b.material)),
                OrderedFloat(b.position.distance(from)),
            )
        })
        .map(|b| (b.id, b.position));

    let Some((body, at)) = best else {
        debug!("{} found no mineable body in reach", id);
        return;
    };

    planner
        .nav
        .plan_move(ctx, id, at, 0.0, planner.travel_reserve());
    mine_body(ctx, id, body);
}

/// Mine `body` if it is in range
pub fn mine_body(ctx: &mut TurnContext<'_>, id: UnitId, body: BodyId) {
    let (Some(unit), Some(target)) = (ctx.state.unit(id), ctx.state.body(body)) else {
        return;
    };
    let range = ctx.state.stats(unit.role).range;
    if !within_range(unit.position, target.position, range) {
        debug!(
            "{} is {:.1} from {}, out of mining range {:.1}",
            id,
            unit.position.distance(target.position),
            body,
            range
        );
        return;
    }
    ctx.submit(Intent::Mine { unit: id, body });
}
