//! Strategy configuration loaded from TOML
//!
//! Every tunable number the commander uses lives here. A strategy file only
//! needs to name the values it changes; each section falls back to its
//! defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::error::{EngineError, Result};
use crate::core::types::{Material, Role};

/// Relative spawn weight for each role
///
/// Weights are normalized at use, so `[1, 1, 0, 2, 4]` and
/// `[0.125, 0.125, 0, 0.25, 0.5]` describe the same fleet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleRatios {
    pub corvette: f32,
    pub missile_boat: f32,
    pub martyr: f32,
    pub transport: f32,
    pub miner: f32,
}

impl Default for RoleRatios {
    fn default() -> Self {
        Self {
            corvette: 0.15,
            missile_boat: 0.05,
            martyr: 0.05,
            transport: 0.25,
            miner: 0.5,
        }
    }
}

impl RoleRatios {
    pub fn weight(&self, role: Role) -> f32 {
        match role {
            Role::Corvette => self.corvette,
            Role::MissileBoat => self.missile_boat,
            Role::Martyr => self.martyr,
            Role::Transport => self.transport,
            Role::Miner => self.miner,
        }
    }

    /// Target fractions indexed by [`Role::index`], summing to 1
    pub fn normalized(&self) -> [f32; Role::COUNT] {
        let total: f32 = Role::ALL.iter().map(|&r| self.weight(r).max(0.0)).sum();
        let mut out = [0.0; Role::COUNT];
        if total <= 0.0 {
            return out;
        }
        for role in Role::ALL {
            out[role.index()] = self.weight(role).max(0.0) / total;
        }
        out
    }
}

/// Spawn policy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Maximum number of living units the allocator will build up to
    pub unit_cap: usize,
    pub ratios: RoleRatios,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            unit_cap: 40,
            ratios: RoleRatios::default(),
        }
    }
}

/// Miner behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MiningConfig {
    /// Fraction of miners working the mineral ring (rest go to the contested asteroid)
    pub mineral_share: f32,
    /// Contested-asteroid miners below this fraction of max energy withdraw home
    pub retreat_energy_fraction: f32,
    /// Energy reserve fraction kept while withdrawing
    pub withdraw_reserve: f32,
    /// Overrides the game's protected-turn count when set
    pub protected_turns: Option<u32>,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            mineral_share: 0.75,
            retreat_energy_fraction: 0.6,
            withdraw_reserve: 0.9,
            protected_turns: None,
        }
    }
}

/// Movement tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Energy reserve fraction respected by ordinary trips
    pub travel_reserve: f32,
    /// Extra clearance added around the sun on top of the ship radius
    pub safety_margin: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            travel_reserve: 0.5,
            safety_margin: 1.0,
        }
    }
}

/// Defender behavior
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Hold distance around the contested asteroid; unit range when unset
    pub guard_distance: Option<f32>,
}

/// Material ranking, most common first
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RarityConfig {
    pub order: Vec<Material>,
}

impl Default for RarityConfig {
    fn default() -> Self {
        Self {
            order: Material::ALL.to_vec(),
        }
    }
}

impl RarityConfig {
    /// Higher is rarer. Unlisted materials rank below everything.
    pub fn rank(&self, material: Material) -> usize {
        self.order
            .iter()
            .position(|&m| m == material)
            .map_or(0, |i| i + 1)
    }

    /// Materials from rarest to most common
    pub fn rarest_first(&self) -> impl Iterator<Item = Material> + '_ {
        self.order.iter().rev().copied()
    }
}

/// Complete strategy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// Name of this strategy (set from filename)
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub spawn: SpawnConfig,
    #[serde(default)]
    pub mining: MiningConfig,
    #[serde(default)]
    pub movement: MovementConfig,
    #[serde(default)]
    pub combat: CombatConfig,
    #[serde(default)]
    pub rarity: RarityConfig,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            spawn: SpawnConfig::default(),
            mining: MiningConfig::default(),
            movement: MovementConfig::default(),
            combat: CombatConfig::default(),
            rarity: RarityConfig::default(),
        }
    }
}

impl StrategyConfig {
    /// Parse a strategy from TOML text and validate it
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: StrategyConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let ratios = &self.spawn.ratios;
        if Role::ALL.iter().any(|&r| ratios.weight(r) < 0.0) {
            return Err(EngineError::InvalidConfig(
                "spawn ratios must be non-negative".into(),
            ));
        }
        if Role::ALL.iter().all(|&r| ratios.weight(r) <= 0.0) {
            return Err(EngineError::InvalidConfig(
                "at least one spawn ratio must be positive".into(),
            ));
        }

        let unit_fraction = |name: &str, value: f32| {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(EngineError::InvalidConfig(format!(
                    "{name} ({value}) must be within 0..=1"
                )))
            }
        };
        unit_fraction("mining.mineral_share", self.mining.mineral_share)?;
        unit_fraction(
            "mining.retreat_energy_fraction",
            self.mining.retreat_energy_fraction,
        )?;
        unit_fraction("mining.withdraw_reserve", self.mining.withdraw_reserve)?;
        unit_fraction("movement.travel_reserve", self.movement.travel_reserve)?;

        if self.movement.safety_margin < 0.0 {
            return Err(EngineError::InvalidConfig(
                "movement.safety_margin must be non-negative".into(),
            ));
        }

        let order = &self.rarity.order;
        let complete = Material::ALL
            .iter()
            .all(|m| order.iter().filter(|&o| o == m).count() == 1);
        if !complete || order.len() != Material::COUNT {
            return Err(EngineError::InvalidConfig(format!(
                "rarity.order must list each material exactly once, got {order:?}"
            )));
        }

        Ok(())
    }
}

/// Load a strategy by name from `data/strategies/{name}.toml`
pub fn load_strategy(name: &str) -> Result<StrategyConfig> {
    let mut config = load_strategy_file(&strategy_path(name))?;
    config.name = name.to_string();
    Ok(config)
}

/// Load a strategy from an explicit path
pub fn load_strategy_file(path: &Path) -> Result<StrategyConfig> {
    let contents = fs::read_to_string(path)?;
    let mut config = StrategyConfig::from_toml_str(&contents)?;
    if config.name.is_empty() {
        config.name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
    }
    Ok(config)
}

fn strategy_path(name: &str) -> PathBuf {
    PathBuf::from("data/strategies").join(format!("{}.toml", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(StrategyConfig::default().validate().is_ok());
    }

    #[test]
    fn test_normalized_ratios_sum_to_one() {
        let fractions = RoleRatios::default().normalized();
        let sum: f32 = fractions.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = StrategyConfig::from_toml_str(
            r#"
            [spawn]
            unit_cap = 12

            [spawn.ratios]
            miner = 3.0
            transport = 1.0
            corvette = 0.0
            missile_boat = 0.0
            martyr = 0.0
            "#,
        )
        .unwrap();
        assert_eq!(config.spawn.unit_cap, 12);
        assert_eq!(config.mining.mineral_share, 0.75);
        let fractions = config.spawn.ratios.normalized();
        assert!((fractions[Role::Miner.index()] - 0.75).abs() < 1e-6);
        assert_eq!(fractions[Role::Corvette.index()], 0.0);
    }

    #[test]
    fn test_rejects_all_zero_ratios() {
        let result = StrategyConfig::from_toml_str(
            r#"
            [spawn.ratios]
            corvette = 0.0
            missile_boat = 0.0
            martyr = 0.0
            transport = 0.0
            miner = 0.0
            "#,
        );
        assert!(matches!(result, Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_incomplete_rarity_order() {
        let result = StrategyConfig::from_toml_str(
            r#"
            [rarity]
            order = ["genarium", "genarium", "rarium", "mythicite"]
            "#,
        );
        assert!(matches!(result, Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_rarity_rank_follows_order() {
        let rarity = RarityConfig::default();
        assert!(rarity.rank(Material::Mythicite) > rarity.rank(Material::Legendarium));
        assert!(rarity.rank(Material::Rarium) > rarity.rank(Material::Genarium));
        let rarest: Vec<_> = rarity.rarest_first().collect();
        assert_eq!(rarest[0], Material::Mythicite);
        assert_eq!(rarest[3], Material::Genarium);
    }

    #[test]
    fn test_load_default_strategy() {
        let config = load_strategy("default").expect("Should load default strategy");
        assert_eq!(config.name, "default");
        assert!(config.spawn.unit_cap > 0);
    }

    #[test]
    fn test_load_missing_strategy_is_io_error() {
        let result = load_strategy("does_not_exist");
        assert!(matches!(result, Err(EngineError::Io(_))));
    }
}
