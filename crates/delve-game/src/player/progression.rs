//! Level and experience tracking

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ProgressionConfig;

/// One level gained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUp {
    /// Level reached
    pub level: u32,
    /// Experience needed for the level after it
    pub exp_to_next: u64,
}

/// Level, experience toward the next level and lifetime experience
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    /// Current level (starts at 1)
    pub level: u32,
    /// Experience earned toward the next level
    pub exp: u64,
    /// Experience required for the next level
    pub exp_to_next: u64,
    /// Experience earned across all levels
    pub total_exp: u64,
}

impl Default for Progression {
    fn default() -> Self {
        Self::new(&ProgressionConfig::default())
    }
}

impl Progression {
    /// Level 1 with no experience
    pub fn new(config: &ProgressionConfig) -> Self {
        Self {
            level: 1,
            exp: 0,
            exp_to_next: config.base_exp_to_next,
            total_exp: 0,
        }
    }

    pub fn is_max_level(&self, config: &ProgressionConfig) -> bool {
        self.level >= config.max_level
    }

    /// Add experience and return the levels gained, in order. At the level
    /// cap experience keeps accumulating without further level-ups.
    pub fn add_experience(&mut self, amount: u64, config: &ProgressionConfig) -> Vec<LevelUp> {
        self.exp = self.exp.saturating_add(amount);
        self.total_exp = self.total_exp.saturating_add(amount);

        let mut gained = Vec::new();
        while self.exp >= self.exp_to_next && self.level < config.max_level {
            self.exp -= self.exp_to_next;
            self.level += 1;
            self.exp_to_next = config.next_threshold(self.exp_to_next);
            debug!("Reached level {} (next at {})", self.level, self.exp_to_next);
            gained.push(LevelUp {
                level: self.level,
                exp_to_next: self.exp_to_next,
            });
        }
        gained
    }

    /// Progress toward the next level as a 0.0-1.0 fraction
    pub fn exp_fraction(&self) -> f32 {
        if self.exp_to_next == 0 {
            return 1.0;
        }
        (self.exp as f32 / self.exp_to_next as f32).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_progression() {
        let prog = Progression::default();
        assert_eq!(prog.level, 1);
        assert_eq!(prog.exp, 0);
        assert_eq!(prog.exp_to_next, 100);
        assert_eq!(prog.exp_fraction(), 0.0);
    }

    #[test]
    fn test_add_250_from_level_one() {
        let config = ProgressionConfig::default();
        let mut prog = Progression::new(&config);
        let levels = prog.add_experience(250, &config);

        // 250 - 100 = 150 at level 2, 150 - 150 = 0 at level 3
        assert_eq!(prog.level, 3);
        assert_eq!(prog.exp, 0);
        assert_eq!(prog.exp_to_next, 225);
        assert_eq!(
            levels,
            vec![
                LevelUp {
                    level: 2,
                    exp_to_next: 150
                },
                LevelUp {
                    level: 3,
                    exp_to_next: 225
                },
            ]
        );
    }

    #[test]
    fn test_partial_experience() {
        let config = ProgressionConfig::default();
        let mut prog = Progression::new(&config);
        assert!(prog.add_experience(50, &config).is_empty());
        assert_eq!(prog.exp, 50);
        assert_eq!(prog.exp_fraction(), 0.5);
    }

    #[test]
    fn test_level_cap_retains_experience() {
        let config = ProgressionConfig {
            max_level: 3,
            ..ProgressionConfig::default()
        };
        let mut prog = Progression::new(&config);
        let levels = prog.add_experience(10_000, &config);
        assert_eq!(levels.len(), 2);
        assert_eq!(prog.level, 3);
        assert_eq!(prog.exp, 10_000 - 250);
        assert!(prog.is_max_level(&config));

        assert!(prog.add_experience(500, &config).is_empty());
        assert_eq!(prog.exp, 10_250);
        assert_eq!(prog.total_exp, 10_500);
    }

    #[test]
    fn test_monotonic() {
        let config = ProgressionConfig::default();
        let mut prog = Progression::new(&config);
        let mut last = (prog.level, prog.total_exp);
        for amount in [0, 7, 99, 1, 400, 12_345, 0, 3] {
            prog.add_experience(amount, &config);
            assert!(prog.level >= last.0);
            assert!(prog.total_exp >= last.1);
            assert!(prog.level <= config.max_level);
            last = (prog.level, prog.total_exp);
        }
    }

    #[test]
    fn test_custom_curve() {
        let config = ProgressionConfig {
            base_exp_to_next: 10,
            growth_factor: 2.0,
            max_level: 99,
        };
        let mut prog = Progression::new(&config);
        prog.add_experience(30, &config);
        assert_eq!(prog.level, 3);
        assert_eq!(prog.exp_to_next, 40);
    }
}
