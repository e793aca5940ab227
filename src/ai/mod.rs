//! Turn AI for one player
//!
//! Architecture: Trait + Data hybrid
//! - TurnAI trait defines the interface the turn loop drives
//! - StrategyConfig holds TOML-loaded ratios and thresholds
//! - TurnContext carries the live snapshot and the intent ledger
//!
//! Each coordinator plans one partition of the roster and issues its intents
//! through the shared [`TurnContext`](crate::game::turn::TurnContext).

pub mod allocator;
pub mod combat;
pub mod commander;
pub mod dispatch;
pub mod mining;
pub mod roster;
pub mod support;
pub mod transport;

pub use commander::{Commander, TurnReport};
pub use roster::Roster;

use crate::core::config::StrategyConfig;
use crate::game::arbiter::Arbiter;
use crate::game::snapshot::Snapshot;

/// Trait for turn AI implementations
pub trait TurnAI {
    /// Called once with the first snapshot of a game
    fn start(&mut self, snapshot: &Snapshot);

    /// Plan one turn, handing every intent to `arbiter` as it is decided
    fn run_turn(&mut self, state: &mut Snapshot, arbiter: &mut dyn Arbiter) -> TurnReport;

    /// Called once when the game is decided
    fn end(&mut self, won: bool, reason: &str);

    /// Get the strategy configuration
    fn strategy(&self) -> &StrategyConfig;
}
