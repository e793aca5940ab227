use thiserror::Error;

use crate::core::types::PlayerId;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Strategy parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid strategy config: {0}")]
    InvalidConfig(String),

    #[error("Player not present in snapshot: {0}")]
    UnknownPlayer(PlayerId),
}

pub type Result<T> = std::result::Result<T, EngineError>;
