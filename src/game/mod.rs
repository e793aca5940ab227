//! Game model as seen by the engine
//!
//! The snapshot is produced by the match server each turn. Intents flow the
//! other way, through an [`Arbiter`](arbiter::Arbiter).

pub mod arbiter;
pub mod bodies;
pub mod intents;
pub mod player;
pub mod snapshot;
pub mod turn;
pub mod units;

pub use arbiter::{Arbiter, IntentRejected, LocalArbiter};
pub use intents::{Intent, IntentClass, TransferAmount};
pub use snapshot::{GameConstants, Snapshot};
pub use turn::{TurnContext, TurnLedger};
