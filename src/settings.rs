//! Driver settings with persistence
//!
//! Settings are saved to `~/.config/delve/settings.toml`

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use delve_game::{GameConfig, ProgressionConfig, StatGrowth};
use serde::{Deserialize, Serialize};
use tracing::{info, Level};

/// All driver settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Maximum log level: trace, debug, info, warn or error
    pub log_level: String,
    /// Fixed RNG seed for reproducible runs; entropy when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rng_seed: Option<u64>,
    pub progression: ProgressionConfig,
    pub growth: StatGrowth,
    pub simulation: SimulationSettings,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            rng_seed: None,
            progression: ProgressionConfig::default(),
            growth: StatGrowth::default(),
            simulation: SimulationSettings::default(),
        }
    }
}

impl GameSettings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("delve"))
    }

    /// Get the settings file path
    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from disk. `Ok(None)` when there is no settings file.
    pub fn load() -> anyhow::Result<Option<Self>> {
        let Some(path) = Self::settings_path() else {
            anyhow::bail!("Could not determine config directory");
        };
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings file {:?}", path))?;
        let settings = Self::parse(&content)
            .with_context(|| format!("Failed to parse settings file {:?}", path))?;
        Ok(Some(settings))
    }

    fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Save settings to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let Some(dir) = Self::config_dir() else {
            anyhow::bail!("Could not determine config directory");
        };

        let path = dir.join("settings.toml");

        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }

    /// Log level, `INFO` when the configured name is not recognised
    pub fn tracing_level(&self) -> Level {
        self.log_level.parse().unwrap_or(Level::INFO)
    }

    /// Game rules for new and loaded characters. Unusable progression
    /// values are replaced with a warning.
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            progression: self.progression.sanitized(),
            growth: self.growth.clone(),
        }
    }
}

/// Balance simulation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Floors cleared in the leveling simulation
    pub floors: u32,
    pub kills_per_floor: u32,
    pub exp_per_kill: u64,
    /// Weapons put through the shrine simulation
    pub shrine_iterations: u32,
    /// Max durability of each simulated weapon
    pub shrine_durability: u32,
    /// Attempts after which a run is abandoned
    pub shrine_max_attempts: u32,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            floors: 24,
            kills_per_floor: 48,
            exp_per_kill: 15,
            shrine_iterations: 10_000,
            shrine_durability: 100,
            shrine_max_attempts: 1_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let settings = GameSettings::parse("").unwrap();
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.rng_seed, None);
        assert_eq!(settings.progression.base_exp_to_next, 100);
        assert_eq!(settings.simulation.kills_per_floor, 48);
    }

    #[test]
    fn test_partial_file() {
        let settings = GameSettings::parse(
            r#"
            log_level = "debug"
            rng_seed = 42

            [progression]
            growth_factor = 2.0

            [simulation]
            shrine_iterations = 50
            "#,
        )
        .unwrap();
        assert_eq!(settings.tracing_level(), Level::DEBUG);
        assert_eq!(settings.rng_seed, Some(42));
        assert_eq!(settings.progression.growth_factor, 2.0);
        assert_eq!(settings.progression.base_exp_to_next, 100);
        assert_eq!(settings.simulation.shrine_iterations, 50);
        assert_eq!(settings.game_config().progression.growth_factor, 2.0);
    }

    #[test]
    fn test_shrinking_growth_factor_is_clamped() {
        let settings = GameSettings::parse(
            r#"
            [progression]
            growth_factor = 0.5
            "#,
        )
        .unwrap();
        let config = settings.game_config().progression;
        assert_eq!(config.growth_factor, 1.0);
        assert_eq!(config.base_exp_to_next, 100);
    }

    #[test]
    fn test_zero_base_threshold_is_clamped() {
        let settings = GameSettings::parse(
            r#"
            [progression]
            base_exp_to_next = 0
            "#,
        )
        .unwrap();
        let config = settings.game_config().progression;
        assert_eq!(config.base_exp_to_next, 1);
        assert_eq!(config.growth_factor, 1.5);
    }

    #[test]
    fn test_malformed_file() {
        assert!(GameSettings::parse("log_level = [").is_err());
    }

    #[test]
    fn test_unknown_level_falls_back() {
        let settings = GameSettings {
            log_level: "loud".to_string(),
            ..Default::default()
        };
        assert_eq!(settings.tracing_level(), Level::INFO);
    }

    #[test]
    fn test_toml_roundtrip() {
        let settings = GameSettings {
            rng_seed: Some(7),
            ..Default::default()
        };
        let text = toml::to_string_pretty(&settings).unwrap();
        let back = GameSettings::parse(&text).unwrap();
        assert_eq!(back.rng_seed, Some(7));
        assert_eq!(back.growth, settings.growth);
    }
}
