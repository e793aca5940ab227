//! Combat coordinator
//!
//! Corvettes and missile boats guard the contested asteroid. Each unit
//! shoots down incoming missiles first (corvettes only), then attacks the
//! weakest enemy it can reach, and otherwise holds near the anchor.

use std::cmp::Reverse;

use glam::Vec2;
use ordered_float::OrderedFloat;
use tracing::debug;

use crate::ai::dispatch::Planner;
use crate::core::types::{PlayerId, ProjectileId, UnitId};
use crate::game::intents::Intent;
use crate::game::turn::TurnContext;

/// What a combat unit decided to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engagement {
    Intercept(ProjectileId),
    Attack(UnitId),
    Hold,
}

/// Farthest from the anchor first, stable on ties
pub fn engagement_order(units: &[(UnitId, Vec2)], anchor: Vec2) -> Vec<UnitId> {
    let mut order = units.to_vec();
    order.sort_by_key(|(_, pos)| Reverse(OrderedFloat(pos.distance(anchor))));
    order.into_iter().map(|(id, _)| id).collect()
}

/// The nearest projectile to `from`
pub fn nearest_projectile(from: Vec2, projectiles: &[(ProjectileId, Vec2)]) -> Option<ProjectileId> {
    projectiles
        .iter()
        .min_by_key(|(_, pos)| OrderedFloat(pos.distance(from)))
        .map(|(id, _)| *id)
}

/// Pick an enemy to attack among those within `reach`
///
/// Lowest energy wins; among equals the farther one is preferred.
pub fn pick_target(from: Vec2, reach: f32, enemies: &[(UnitId, Vec2, f32)]) -> Option<UnitId> {
    enemies
        .iter()
        .filter(|(_, pos, _)| pos.distance(from) <= reach)
        .min_by_key(|(_, pos, energy)| (OrderedFloat(*energy), Reverse(OrderedFloat(pos.distance(from)))))
        .map(|(id, _, _)| *id)
}

/// Plan every combat unit's turn
pub fn run_combat(ctx: &mut TurnContext<'_>, planner: &Planner<'_>, units: &[UnitId]) {
    if units.is_empty() {
        return;
    }
    let Some(me) = ctx.state.me().map(|p| p.id) else {
        return;
    };
    let Some(anchor) = ctx
        .state
        .contested_body()
        .map(|b| b.position)
        .or_else(|| ctx.state.home_position())
    else {
        return;
    };

    let positions: Vec<(UnitId, Vec2)> = units
        .iter()
        .filter_map(|&id| ctx.state.unit(id).map(|u| (id, u.position)))
        .collect();

    for id in engagement_order(&positions, anchor) {
        let engagement = choose_engagement(ctx, me, id);
        debug!("{} engagement: {:?}", id, engagement);
        execute(ctx, planner, id, engagement, anchor);
    }
}

fn choose_engagement(ctx: &TurnContext<'_>, me: PlayerId, id: UnitId) -> Engagement {
    let Some(unit) = ctx.state.unit(id) else {
        return Engagement::Hold;
    };
    let from = unit.position;

    if unit.role.can_shoot_down() {
        let incoming: Vec<(ProjectileId, Vec2)> = ctx
            .state
            .projectiles
            .iter()
            .filter(|p| p.owner != me)
            .map(|p| (p.id, p.position))
            .collect();
        if let Some(projectile) = nearest_projectile(from, &incoming) {
            return Engagement::Intercept(projectile);
        }
    }

    let reach = ctx.state.stats(unit.role).range + unit.moves;
    let enemies: Vec<(UnitId, Vec2, f32)> = ctx
        .state
        .units
        .iter()
        .filter(|u| u.owner != me && u.is_alive())
        .map(|u| (u.id, u.position, u.energy))
        .collect();
    match pick_target(from, reach, &enemies) {
        Some(target) => Engagement::Attack(target),
        None => Engagement::Hold,
    }
}

fn execute(ctx: &mut TurnContext<'_>, planner: &Planner<'_>, id: UnitId, engagement: Engagement, anchor: Vec2) {
    let Some(range) = ctx.state.unit(id).map(|u| ctx.state.stats(u.role).range) else {
        return;
    };
    let reserve = planner.travel_reserve();

    match engagement {
        Engagement::Intercept(projectile) => {
            let Some(at) = ctx.state.projectile(projectile).map(|p| p.position) else {
                return;
            };
            if planner.nav.plan_safe_move(ctx, id, at, range, reserve).reached {
                ctx.submit(Intent::Shootdown { unit: id, projectile });
            }
        }
        Engagement::Attack(target) => {
            let Some(at) = ctx.state.unit(target).map(|u| u.position) else {
                return;
            };
            if planner.nav.plan_safe_move(ctx, id, at, range, reserve).reached {
                ctx.submit(Intent::Attack { unit: id, target });
            }
        }
        Engagement::Hold => {
            let guard = planner.config.combat.guard_distance.unwrap_or(range);
            planner.nav.plan_safe_move(ctx, id, anchor, guard, reserve);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::StrategyConfig;
    use crate::core::types::Role;
    use crate::game::arbiter::LocalArbiter;
    use crate::game::snapshot::Snapshot;
    use crate::navigation::geometry::Obstacle;
    use crate::navigation::movement::Navigator;
    use crate::navigation::ring::ResourceRing;
    use crate::scenario::SnapshotBuilder;

    fn navigator(state: &Snapshot) -> Navigator {
        let obstacle = Obstacle::from_sun(&state.sun, state.constants.ship_radius, 1.0);
        Navigator::new(obstacle, ResourceRing::around(&obstacle))
    }

    #[test]
    fn test_engagement_order_farthest_first() {
        let units = vec![
            (UnitId(1), Vec2::new(10.0, 0.0)),
            (UnitId(2), Vec2::new(300.0, 0.0)),
            (UnitId(3), Vec2::new(50.0, 0.0)),
        ];
        assert_eq!(
            engagement_order(&units, Vec2::ZERO),
            vec![UnitId(2), UnitId(3), UnitId(1)]
        );
    }

    #[test]
    fn test_pick_target_prefers_weakest_then_farthest() {
        let enemies = vec![
            (UnitId(1), Vec2::new(10.0, 0.0), 50.0),
            (UnitId(2), Vec2::new(20.0, 0.0), 20.0),
            (UnitId(3), Vec2::new(40.0, 0.0), 20.0),
            (UnitId(4), Vec2::new(400.0, 0.0), 1.0),
        ];
        assert_eq!(pick_target(Vec2::ZERO, 100.0, &enemies), Some(UnitId(3)));
    }

    #[test]
    fn test_pick_target_out_of_reach() {
        let enemies = vec![(UnitId(1), Vec2::new(500.0, 0.0), 1.0)];
        assert_eq!(pick_target(Vec2::ZERO, 100.0, &enemies), None);
    }

    #[test]
    fn test_nearest_projectile() {
        let projectiles = vec![
            (ProjectileId(1), Vec2::new(100.0, 0.0)),
            (ProjectileId(2), Vec2::new(0.0, 30.0)),
        ];
        assert_eq!(nearest_projectile(Vec2::ZERO, &projectiles), Some(ProjectileId(2)));
        assert_eq!(nearest_projectile(Vec2::ZERO, &[]), None);
    }

    #[test]
    fn test_corvette_intercepts_before_attacking() {
        let mut builder = SnapshotBuilder::new(20.0);
        builder.contested(Vec2::new(0.0, 400.0), 500.0);
        let corvette = builder.own_unit(Role::Corvette, Vec2::new(0.0, 300.0));
        builder.enemy_unit(Role::Miner, Vec2::new(50.0, 300.0));
        let missile = builder.projectile(Vec2::new(0.0, 350.0));
        let mut state = builder.build();
        let nav = navigator(&state);
        let config = StrategyConfig::default();
        let planner = Planner {
            nav: &nav,
            config: &config,
        };
        let mut arbiter = LocalArbiter::default();
        let mut ctx = TurnContext::new(&mut state, &mut arbiter);

        run_combat(&mut ctx, &planner, &[corvette]);
        drop(ctx);
        assert_eq!(
            arbiter.accepted(),
            &[Intent::Shootdown {
                unit: corvette,
                projectile: missile,
            }]
        );
    }

    #[test]
    fn test_missile_boat_ignores_projectiles_and_attacks() {
        let mut builder = SnapshotBuilder::new(20.0);
        builder.contested(Vec2::new(0.0, 400.0), 500.0);
        let boat = builder.own_unit(Role::MissileBoat, Vec2::new(0.0, 300.0));
        let enemy = builder.enemy_unit(Role::Miner, Vec2::new(50.0, 300.0));
        builder.projectile(Vec2::new(0.0, 350.0));
        let mut state = builder.build();
        let nav = navigator(&state);
        let config = StrategyConfig::default();
        let planner = Planner {
            nav: &nav,
            config: &config,
        };
        let mut arbiter = LocalArbiter::default();
        let mut ctx = TurnContext::new(&mut state, &mut arbiter);

        run_combat(&mut ctx, &planner, &[boat]);
        drop(ctx);
        assert_eq!(
            arbiter.accepted(),
            &[Intent::Attack {
                unit: boat,
                target: enemy,
            }]
        );
    }

    #[test]
    fn test_idle_units_hold_near_anchor() {
        let mut builder = SnapshotBuilder::new(20.0);
        let asteroid = Vec2::new(0.0, 400.0);
        builder.contested(asteroid, 500.0);
        let corvette = builder.own_unit(Role::Corvette, Vec2::new(0.0, 150.0));
        let mut state = builder.build();
        let nav = navigator(&state);
        let config = StrategyConfig::default();
        let planner = Planner {
            nav: &nav,
            config: &config,
        };
        let mut arbiter = LocalArbiter::default();
        let mut ctx = TurnContext::new(&mut state, &mut arbiter);

        run_combat(&mut ctx, &planner, &[corvette]);
        let pos = ctx.state.unit(corvette).unwrap().position;
        let range = ctx.state.stats(Role::Corvette).range;
        assert!((pos.distance(asteroid) - range).abs() < 1e-2);
    }
}
