//! End-to-end turn planning tests

use std::collections::HashMap;

use glam::Vec2;
use stardash_commander::ai::dispatch::Planner;
use stardash_commander::ai::mining::run_mining;
use stardash_commander::ai::transport::{assign_transports, run_transport};
use stardash_commander::ai::{Commander, TurnAI};
use stardash_commander::core::config::StrategyConfig;
use stardash_commander::core::types::{Material, Role, UnitId};
use stardash_commander::game::{Intent, IntentClass, LocalArbiter, Snapshot, TurnContext};
use stardash_commander::navigation::{Navigator, Obstacle, ResourceRing};
use stardash_commander::scenario::{demo_snapshot, SnapshotBuilder, HOME};

/// Approach angles that avoid the axes
fn approach_angles() -> impl Iterator<Item = f32> {
    (0..24).map(|i| 0.3 + i as f32 * 0.261)
}

fn navigator(state: &Snapshot) -> Navigator {
    let obstacle = Obstacle::from_sun(&state.sun, state.constants.ship_radius, 1.0);
    Navigator::new(obstacle, ResourceRing::observe_or_default(state, &obstacle))
}

/// Restore every unit's movement budget, as a new turn does
fn refill_moves(state: &mut Snapshot) {
    let roles = state.roles.clone();
    for unit in &mut state.units {
        unit.moves = roles.get(unit.role).moves;
    }
}

#[test]
fn test_blocked_route_goes_via_waypoint() {
    let mut builder = SnapshotBuilder::new(5.0);
    let id = builder.own_unit(Role::Corvette, Vec2::new(-20.0, 0.0));
    let mut state = builder.build();
    state.unit_mut(id).unwrap().moves = 100.0;

    let obstacle = Obstacle::from_sun(&state.sun, state.constants.ship_radius, 1.0);
    let ring = ResourceRing {
        center: Vec2::ZERO,
        inner: 15.0,
        mean: 20.0,
        outer: 25.0,
    };
    let nav = Navigator::new(obstacle, ring);
    let target = Vec2::new(20.0, 0.0);
    assert!(obstacle.segment_blocked(Vec2::new(-20.0, 0.0), target));

    let mut arbiter = LocalArbiter::default();
    let mut ctx = TurnContext::new(&mut state, &mut arbiter);
    let outcome = nav.plan_safe_move(&mut ctx, id, target, 0.0, 0.5);
    assert!(outcome.advanced);
    assert!(!outcome.reached);

    let pos = ctx.state.unit(id).unwrap().position;
    let waypoint = Vec2::new(0.0, 25.0);
    assert!(pos.distance(waypoint) < pos.distance(target));
    assert!(pos.distance(waypoint) < 1e-3);
}

#[test]
fn test_three_miners_two_transports() {
    let miners = vec![
        (UnitId(1), Vec2::new(0.0, 0.0)),
        (UnitId(2), Vec2::new(100.0, 0.0)),
        (UnitId(3), Vec2::new(200.0, 0.0)),
    ];
    // Distances to the nearest miner: 10 and 50
    let transports = vec![
        (UnitId(10), Vec2::new(0.0, 10.0)),
        (UnitId(11), Vec2::new(200.0, 50.0)),
    ];

    let pairs = assign_transports(&transports, &miners);
    assert_eq!(pairs[0], (UnitId(11), UnitId(3)));

    let mut load: HashMap<UnitId, usize> = miners.iter().map(|(id, _)| (*id, 0)).collect();
    for (_, miner) in &pairs {
        *load.get_mut(miner).unwrap() += 1;
    }
    let max = load.values().max().unwrap();
    let min = load.values().min().unwrap();
    assert!(max - min <= 1);
}

#[test]
fn test_full_miner_delivers_at_home() {
    let mut builder = SnapshotBuilder::new(100.0);
    builder.funds(0.0);
    builder.mineral(Material::Genarium, Vec2::new(0.0, 300.0), 100.0);
    let miner = builder.own_unit(Role::Miner, HOME + Vec2::new(0.0, 90.0));
    let mut state = builder.build();
    state.unit_mut(miner).unwrap().cargo.add(Material::Rarium, 50.0);

    let mut commander = Commander::new(StrategyConfig::default());
    let mut arbiter = LocalArbiter::default();
    commander.run_turn(&mut state, &mut arbiter);

    let unit = state.unit(miner).unwrap();
    assert!(unit.cargo.is_empty());
    assert!(unit.position.distance(HOME) <= 30.0 + 1e-2);
    assert_eq!(state.me().unwrap().funds, 50.0);
}

#[test]
fn test_transport_loads_after_approaching_from_any_angle() {
    for angle in approach_angles() {
        let mut builder = SnapshotBuilder::new(100.0);
        builder.mineral(Material::Genarium, Vec2::new(0.0, -300.0), 100.0);
        let miner_at = Vec2::new(-500.0, 300.0);
        let miner = builder.own_unit(Role::Miner, miner_at);
        let transport = builder.own_unit(Role::Transport, miner_at + Vec2::from_angle(angle) * 123.456);
        let mut state = builder.build();
        state.unit_mut(miner).unwrap().cargo.add(Material::Rarium, 20.0);

        let nav = navigator(&state);
        let config = StrategyConfig::default();
        let planner = Planner {
            nav: &nav,
            config: &config,
        };
        let mut arbiter = LocalArbiter::default();
        let mut loaded_on = None;
        for turn in 0..6 {
            refill_moves(&mut state);
            let mut ctx = TurnContext::new(&mut state, &mut arbiter);
            run_transport(&mut ctx, &planner, &[transport], &[miner]);
            drop(ctx);
            if state.unit(transport).unwrap().cargo.rarium > 0.0 {
                loaded_on = Some(turn);
                break;
            }
        }

        let gap = state.unit(transport).unwrap().position.distance(miner_at);
        assert_eq!(loaded_on, Some(0), "angle {angle}: never loaded, parked {gap} from the miner");
    }
}

#[test]
fn test_contested_miner_mines_after_approaching_from_any_angle() {
    for angle in approach_angles() {
        let mut builder = SnapshotBuilder::new(100.0);
        builder.mineral(Material::Genarium, Vec2::new(0.0, -300.0), 100.0);
        let asteroid_at = Vec2::new(0.0, 600.0);
        let asteroid = builder.contested(asteroid_at, 1000.0);
        let miner = builder.own_unit(Role::Miner, asteroid_at + Vec2::from_angle(angle) * 77.77);
        let mut state = builder.build();

        let nav = navigator(&state);
        let mut config = StrategyConfig::default();
        config.mining.mineral_share = 0.0;
        let planner = Planner {
            nav: &nav,
            config: &config,
        };
        let mut arbiter = LocalArbiter::default();
        for _ in 0..6 {
            refill_moves(&mut state);
            let mut ctx = TurnContext::new(&mut state, &mut arbiter);
            run_mining(&mut ctx, &planner, &[miner]);
        }

        let mines = arbiter
            .accepted()
            .iter()
            .filter(|i| matches!(i, Intent::Mine { body, .. } if *body == asteroid))
            .count();
        let gap = state.unit(miner).unwrap().position.distance(asteroid_at);
        assert!(mines >= 5, "angle {angle}: mined {mines} times, parked {gap} from the asteroid");
    }
}

#[test]
fn test_contested_asteroid_untouched_while_protected() {
    let mut builder = SnapshotBuilder::new(100.0);
    builder.funds(0.0).turn(3);
    builder.mineral(Material::Genarium, Vec2::new(0.0, -300.0), 100.0);
    let asteroid = builder.contested(Vec2::new(0.0, 500.0), 1000.0);
    for i in 0..4 {
        builder.own_unit(Role::Miner, Vec2::new(i as f32 * 10.0, 510.0));
    }
    let mut state = builder.build();

    let mut commander = Commander::new(StrategyConfig::default());
    let mut arbiter = LocalArbiter::default();
    let report = commander.run_turn(&mut state, &mut arbiter);

    assert_eq!(report.miners, 4);
    assert!(!arbiter
        .accepted()
        .iter()
        .any(|i| matches!(i, Intent::Mine { body, .. } if *body == asteroid)));
}

#[test]
fn test_contested_crew_mines_after_protection() {
    let mut builder = SnapshotBuilder::new(100.0);
    builder.funds(0.0).turn(50);
    builder.mineral(Material::Genarium, Vec2::new(0.0, -300.0), 100.0);
    let asteroid = builder.contested(Vec2::new(0.0, 500.0), 1000.0);
    for i in 0..4 {
        builder.own_unit(Role::Miner, Vec2::new(i as f32 * 10.0, 510.0));
    }
    let mut state = builder.build();

    let mut commander = Commander::new(StrategyConfig::default());
    let mut arbiter = LocalArbiter::default();
    commander.run_turn(&mut state, &mut arbiter);

    let contested_mines = arbiter
        .accepted()
        .iter()
        .filter(|i| matches!(i, Intent::Mine { body, .. } if *body == asteroid))
        .count();
    // ceil(4 * 0.75) = 3 on minerals, 1 on the contested asteroid
    assert_eq!(contested_mines, 1);
}

#[test]
fn test_demo_turns_respect_the_intent_budget() {
    for seed in [1, 2, 3, 42, 1337] {
        let mut state = demo_snapshot(seed);
        let mut commander = Commander::new(StrategyConfig::default());
        let mut arbiter = LocalArbiter::default();
        let report = commander.run_turn(&mut state, &mut arbiter);

        assert_eq!(report.issued, arbiter.accepted().len());
        let mut moved = HashMap::new();
        let mut acted = HashMap::new();
        for intent in arbiter.accepted() {
            let Some(unit) = intent.actor() else {
                continue;
            };
            let counter = match intent.class() {
                IntentClass::Movement => &mut moved,
                _ => &mut acted,
            };
            *counter.entry(unit).or_insert(0) += 1;
        }
        assert!(moved.values().all(|&n| n == 1), "seed {seed}: unit moved twice");
        assert!(acted.values().all(|&n| n == 1), "seed {seed}: unit acted twice");

        // No one ends inside the sun
        let sun = state.sun;
        for unit in &state.units {
            assert!(unit.position.distance(sun.position) > sun.radius);
        }
    }
}
