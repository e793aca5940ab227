//! Commander - drives one full turn of planning
//!
//! Phases run in a fixed order: spawns, mining, transport, combat, support.
//! Units are partitioned by role once, before the first phase.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::ai::allocator::{describe, run_allocator};
use crate::ai::combat::run_combat;
use crate::ai::dispatch::Planner;
use crate::ai::mining::run_mining;
use crate::ai::roster::Roster;
use crate::ai::support::run_support;
use crate::ai::transport::run_transport;
use crate::ai::TurnAI;
use crate::core::config::StrategyConfig;
use crate::core::types::{Role, Turn};
use crate::game::arbiter::Arbiter;
use crate::game::snapshot::Snapshot;
use crate::game::turn::TurnContext;
use crate::navigation::geometry::Obstacle;
use crate::navigation::movement::Navigator;
use crate::navigation::ring::ResourceRing;

/// Summary of one planned turn
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TurnReport {
    pub turn: Turn,
    pub issued: usize,
    pub rejected: usize,
    pub dropped: usize,
    pub spawns: usize,
    pub miners: usize,
    pub transports: usize,
    pub combat: usize,
    pub martyrs: usize,
}

/// Turn-based commander for one player
pub struct Commander {
    config: StrategyConfig,
    /// Set up on the first turn of a game
    navigator: Option<Navigator>,
}

impl Commander {
    pub fn new(config: StrategyConfig) -> Self {
        Self {
            config,
            navigator: None,
        }
    }

    pub fn navigator(&self) -> Option<&Navigator> {
        self.navigator.as_ref()
    }
}

impl TurnAI for Commander {
    fn start(&mut self, snapshot: &Snapshot) {
        let obstacle = Obstacle::from_sun(
            &snapshot.sun,
            snapshot.constants.ship_radius,
            self.config.movement.safety_margin,
        );
        let ring = ResourceRing::observe_or_default(snapshot, &obstacle);
        if snapshot.contested_body().is_none() {
            warn!("Map has no contested asteroid; combat units will guard home");
        }
        info!(
            "Game start with strategy '{}': ring {:.1}..{:.1}, danger radius {:.1}",
            self.config.name, ring.inner, ring.outer, obstacle.danger_radius
        );
        self.navigator = Some(Navigator::new(obstacle, ring));
    }

    fn run_turn(&mut self, state: &mut Snapshot, arbiter: &mut dyn Arbiter) -> TurnReport {
        if self.navigator.is_none() {
            self.start(state);
        }
        let mut report = TurnReport {
            turn: state.turn,
            ..TurnReport::default()
        };
        let Some(nav) = self.navigator.as_ref() else {
            return report;
        };
        if state.me().is_none() {
            warn!("Player {} is missing from the snapshot; skipping turn", state.me);
            return report;
        }

        let roster = Roster::from_snapshot(state, state.me);
        debug!("Turn {} roster: {}", state.turn, describe(&roster));
        report.miners = roster.of(Role::Miner).len();
        report.transports = roster.of(Role::Transport).len();
        report.martyrs = roster.of(Role::Martyr).len();
        let combat_units = roster.combat_units();
        report.combat = combat_units.len();

        let planner = Planner {
            nav,
            config: &self.config,
        };
        let mut ctx = TurnContext::new(state, arbiter);

        run_allocator(&mut ctx, &self.config.spawn, &roster);
        run_mining(&mut ctx, &planner, roster.of(Role::Miner));
        run_transport(
            &mut ctx,
            &planner,
            roster.of(Role::Transport),
            roster.of(Role::Miner),
        );
        run_combat(&mut ctx, &planner, &combat_units);
        run_support(&mut ctx, &planner, roster.of(Role::Martyr));

        let ledger = ctx.into_ledger();
        report.issued = ledger.issued;
        report.rejected = ledger.rejected;
        report.dropped = ledger.dropped;
        report.spawns = ledger.spawns;
        info!(
            "Turn {}: {} intents issued, {} rejected, {} spawns",
            report.turn, report.issued, report.rejected, report.spawns
        );
        report
    }

    fn end(&mut self, won: bool, reason: &str) {
        info!(
            "Game over ({}): {}",
            if won { "won" } else { "lost" },
            reason
        );
        self.navigator = None;
    }

    fn strategy(&self) -> &StrategyConfig {
        &self.config
    }
}
