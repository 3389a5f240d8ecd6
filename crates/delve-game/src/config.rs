//! Tunable game rules

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::player::StatGrowth;

/// Experience curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConfig {
    /// Experience needed to go from level 1 to level 2
    pub base_exp_to_next: u64,
    /// Multiplier applied to the threshold after each level
    pub growth_factor: f64,
    /// Level cap
    pub max_level: u32,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            base_exp_to_next: 100,
            growth_factor: 1.5,
            max_level: 99,
        }
    }
}

impl ProgressionConfig {
    /// Copy with unusable values replaced so thresholds never shrink: the
    /// base threshold is at least 1 and the growth factor at least 1.0
    pub fn sanitized(&self) -> Self {
        let mut config = self.clone();
        if config.base_exp_to_next == 0 {
            warn!("base_exp_to_next must be at least 1, using 1");
            config.base_exp_to_next = 1;
        }
        if config.growth_factor.is_nan() || config.growth_factor < 1.0 {
            warn!(
                "growth_factor {} must be at least 1.0, using 1.0",
                config.growth_factor
            );
            config.growth_factor = 1.0;
        }
        config
    }

    /// Threshold following `previous`
    pub fn next_threshold(&self, previous: u64) -> u64 {
        (previous as f64 * self.growth_factor).floor() as u64
    }
}

/// Rules applied to a character
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub progression: ProgressionConfig,
    pub growth: StatGrowth,
}
