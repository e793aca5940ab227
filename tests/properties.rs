//! Property-based tests for geometry, the relay protocol and scheduling.

use glam::Vec2;
use proptest::prelude::*;

use stardash_commander::ai::allocator::plan_spawns;
use stardash_commander::ai::transport::assign_transports;
use stardash_commander::core::types::UnitId;
use stardash_commander::navigation::Obstacle;
use stardash_commander::relay::{choose_leg, LegChoice};

fn point() -> impl Strategy<Value = Vec2> {
    (-1000.0f32..1000.0, -1000.0f32..1000.0).prop_map(|(x, y)| Vec2::new(x, y))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2000))]

    /// A segment entirely on one side of the danger zone is never blocked.
    #[test]
    fn prop_clear_segment_not_blocked(
        radius in 1.0f32..200.0,
        x1 in -1000.0f32..1000.0,
        x2 in -1000.0f32..1000.0,
        y1 in 0.0f32..500.0,
        y2 in 0.0f32..500.0,
    ) {
        let obstacle = Obstacle::new(Vec2::ZERO, radius);
        let p1 = Vec2::new(x1, radius + 1.0 + y1);
        let p2 = Vec2::new(x2, radius + 1.0 + y2);
        prop_assert!(!obstacle.segment_blocked(p1, p2));
    }

    /// A segment centred on the obstacle is always blocked.
    #[test]
    fn prop_segment_through_center_blocked(
        radius in 1.0f32..200.0,
        half in point(),
    ) {
        prop_assume!(half.length() > 1.0);
        let obstacle = Obstacle::new(Vec2::ZERO, radius);
        prop_assert!(obstacle.segment_blocked(half, -half));
    }

    /// Zero-length segments are never blocked, wherever they are.
    #[test]
    fn prop_degenerate_segment_never_blocked(p in point()) {
        let obstacle = Obstacle::new(Vec2::ZERO, 100.0);
        prop_assert!(!obstacle.segment_blocked(p, p));
    }

    /// An empty carrier always heads for the source.
    #[test]
    fn prop_empty_carrier_goes_to_source(
        capacity in 0.0f32..500.0,
        source in -1000.0f32..1000.0,
        sink in -1000.0f32..1000.0,
    ) {
        prop_assert_eq!(choose_leg(0.0, capacity, source, sink), LegChoice::Source);
    }

    /// A full carrier with something aboard never heads for the source.
    #[test]
    fn prop_full_carrier_never_goes_to_source(
        capacity in 0.0f32..500.0,
        extra in 0.0f32..100.0,
        source in -1000.0f32..1000.0,
        sink in -1000.0f32..1000.0,
    ) {
        prop_assume!(capacity + extra > 0.0);
        prop_assert_eq!(choose_leg(capacity + extra, capacity, source, sink), LegChoice::Sink);
    }

    /// Transport load never differs by more than one between miners.
    #[test]
    fn prop_transport_load_balanced(
        miners in prop::collection::vec(point(), 1..12),
        transports in prop::collection::vec(point(), 0..12),
    ) {
        let miners: Vec<_> = miners.into_iter().enumerate().map(|(i, p)| (UnitId(i as u32), p)).collect();
        let transports: Vec<_> = transports
            .into_iter()
            .enumerate()
            .map(|(i, p)| (UnitId(100 + i as u32), p))
            .collect();

        let pairs = assign_transports(&transports, &miners);
        prop_assert_eq!(pairs.len(), transports.len());

        let mut load = vec![0usize; miners.len()];
        for (_, miner) in &pairs {
            load[miner.0 as usize] += 1;
        }
        let max = *load.iter().max().unwrap();
        let min = *load.iter().min().unwrap();
        prop_assert!(max - min <= 1);

        // Same input, same answer
        prop_assert_eq!(assign_transports(&transports, &miners), pairs);
    }

    /// Spawning never exceeds funds or the unit cap.
    #[test]
    fn prop_spawns_bounded(
        counts in prop::array::uniform5(0usize..10),
        funds in 0.0f32..2000.0,
        cap in 0usize..60,
        weights in prop::array::uniform5(0.0f32..1.0),
    ) {
        let costs = [75.0, 100.0, 50.0, 75.0, 50.0];
        let spawns = plan_spawns(counts, funds, costs, weights, cap);

        let spent: f32 = spawns.iter().map(|r| costs[r.index()]).sum();
        prop_assert!(spent <= funds + 1e-3);
        let total: usize = counts.iter().sum();
        prop_assert!(spawns.is_empty() || total + spawns.len() <= cap);
        for role in &spawns {
            prop_assert!(weights[role.index()] > 0.0);
        }
    }
}
