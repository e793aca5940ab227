//! Transport scheduler
//!
//! Transports ferry cargo from miners back to the home base so miners can
//! stay on their asteroids.

use glam::Vec2;
use ordered_float::OrderedFloat;
use tracing::debug;

use crate::ai::dispatch::{carrier, Dispatcher, Planner, RelayAction, RelayLeg};
use crate::core::types::{Role, UnitId};
use crate::game::intents::{Intent, TransferAmount};
use crate::game::turn::TurnContext;
use crate::navigation::geometry::within_range;
use crate::relay::relay_step;

/// Pair every transport with a miner
///
/// Transports farthest from their nearest miner choose first. Each picks the
/// miner with the fewest transports so far, the closer one on a tie.
/// Returns `(transport, miner)` pairs in decision order.
pub fn assign_transports(
    transports: &[(UnitId, Vec2)],
    miners: &[(UnitId, Vec2)],
) -> Vec<(UnitId, UnitId)> {
    if miners.is_empty() {
        return Vec::new();
    }

    let nearest_miner = |pos: Vec2| {
        miners
            .iter()
            .map(|(_, m)| OrderedFloat(m.distance(pos)))
            .min()
            .unwrap_or(OrderedFloat(f32::INFINITY))
    };

    let mut order: Vec<&(UnitId, Vec2)> = transports.iter().collect();
    order.sort_by_key(|(_, pos)| std::cmp::Reverse(nearest_miner(*pos)));

    let mut load = vec![0usize; miners.len()];
    let mut pairs = Vec::with_capacity(transports.len());
    for &(transport, pos) in order {
        let Some(pick) = (0..miners.len())
            .min_by_key(|&i| (load[i], OrderedFloat(miners[i].1.distance(pos))))
        else {
            continue;
        };
        load[pick] += 1;
        pairs.push((transport, miners[pick].0));
    }
    pairs
}

/// Plan every transport's turn
pub fn run_transport(
    ctx: &mut TurnContext<'_>,
    planner: &Planner<'_>,
    transports: &[UnitId],
    miners: &[UnitId],
) {
    if transports.is_empty() {
        return;
    }
    let Some(home) = ctx.state.me().map(|p| p.home) else {
        return;
    };

    let locate = |ids: &[UnitId]| -> Vec<(UnitId, Vec2)> {
        ids.iter()
            .filter_map(|&id| ctx.state.unit(id).map(|u| (id, u.position)))
            .collect()
    };
    let transport_positions = locate(transports);
    let miner_positions = locate(miners);
    if miner_positions.is_empty() {
        debug!("No miners to serve; {} transports idle", transports.len());
        return;
    }

    let sink = RelayLeg::new(home.position, home.radius * 0.5, RelayAction::Unload);
    for (transport, miner) in assign_transports(&transport_positions, &miner_positions) {
        let (Some(c), Some(unit)) = (carrier(ctx.state, transport), ctx.state.unit(miner)) else {
            continue;
        };
        let range = ctx.state.stats(Role::Transport).range;
        let source = RelayLeg::new(unit.position, range, RelayAction::TakeFrom(miner));
        debug!("{} serving miner {}", transport, miner);
        relay_step(&mut Dispatcher::new(ctx, *planner), &c, &source, &sink);
    }
}

/// Take the rarest material the miner holds, as much as fits
pub fn take_cargo(ctx: &mut TurnContext<'_>, planner: &Planner<'_>, id: UnitId, from: UnitId) {
    let (Some(unit), Some(source)) = (ctx.state.unit(id), ctx.state.unit(from)) else {
        return;
    };
    let stats = ctx.state.stats(unit.role);
    if !within_range(unit.position, source.position, stats.range) {
        debug!("{} is out of transfer range of {}", id, from);
        return;
    }
    let room = stats.carry_limit - unit.cargo.total();
    if room <= 0.0 {
        return;
    }

    let Some((material, available)) = planner
        .config
        .rarity
        .rarest_first()
        .map(|m| (m, source.cargo.get(m)))
        .find(|(_, amount)| *amount > 0.0)
    else {
        debug!("{} has nothing for {} to take", from, id);
        return;
    };

    let amount = if available <= room {
        TransferAmount::All
    } else {
        TransferAmount::Exact(room)
    };
    ctx.submit(Intent::Transfer {
        unit: id,
        from,
        amount,
        material,
    });
}
