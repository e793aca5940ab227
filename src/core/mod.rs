pub mod config;
pub mod error;
pub mod types;

pub use config::{load_strategy, load_strategy_file, StrategyConfig};
pub use error::{EngineError, Result};
