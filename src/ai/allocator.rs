//! Role allocator - spends funds on spawns to approach the target fleet mix

use tracing::debug;

use crate::ai::roster::Roster;
use crate::core::config::SpawnConfig;
use crate::core::types::Role;
use crate::game::intents::Intent;
use crate::game::turn::TurnContext;

/// Choose the spawns for this turn
///
/// Each pick is the affordable role furthest below its target fraction
/// (ties go to the lower role index). Roles with a zero target are never
/// picked. Stops at the unit cap or when nothing is affordable.
pub fn plan_spawns(
    mut counts: [usize; Role::COUNT],
    mut funds: f32,
    costs: [f32; Role::COUNT],
    targets: [f32; Role::COUNT],
    unit_cap: usize,
) -> Vec<Role> {
    let mut spawns = Vec::new();

    loop {
        let total: usize = counts.iter().sum();
        if total >= unit_cap {
            break;
        }

        let mut best: Option<(Role, f32)> = None;
        for role in Role::ALL {
            let i = role.index();
            if targets[i] <= 0.0 || costs[i] > funds {
                continue;
            }
            let current = if total == 0 {
                0.0
            } else {
                counts[i] as f32 / total as f32
            };
            let deficit = targets[i] - current;
            if best.map_or(true, |(_, d)| deficit > d) {
                best = Some((role, deficit));
            }
        }

        let Some((role, _)) = best else {
            break;
        };
        spawns.push(role);
        counts[role.index()] += 1;
        funds -= costs[role.index()];
    }

    spawns
}

/// Plan and issue this turn's spawns at the home base
///
/// Returns how many spawn intents were accepted.
pub fn run_allocator(ctx: &mut TurnContext<'_>, config: &SpawnConfig, roster: &Roster) -> usize {
    let Some(me) = ctx.state.me() else {
        return 0;
    };
    let (player, home, funds) = (me.id, me.home.position, me.funds);

    let mut costs = [0.0; Role::COUNT];
    for role in Role::ALL {
        costs[role.index()] = ctx.state.stats(role).cost;
    }

    let plan = plan_spawns(
        roster.counts(),
        funds,
        costs,
        config.ratios.normalized(),
        config.unit_cap,
    );

    let mut accepted = 0;
    for role in plan {
        if !ctx.submit(Intent::Spawn {
            player,
            at: home,
            role,
        }) {
            debug!("Spawn of {:?} refused; no more spawns this turn", role);
            break;
        }
        accepted += 1;
    }
    accepted
}

/// Per-role unit counts, for logging
pub fn describe(roster: &Roster) -> String {
    Role::ALL
        .iter()
        .map(|&r| format!("{}={}", r.job_name(), roster.of(r).len()))
        .collect::<Vec<_>>()
        .join(" ")
}
