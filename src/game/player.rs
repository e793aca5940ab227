use serde::{Deserialize, Serialize};

use crate::core::types::PlayerId;
use crate::game::bodies::HomeBase;

/// A participant in the match
///
/// Units are not stored here; they live in the snapshot's flat unit list
/// and are looked up by owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    #[serde(default)]
    pub name: String,
    pub funds: f32,
    #[serde(default)]
    pub victory_points: u32,
    pub home: HomeBase,
    pub opponent: PlayerId,
}
