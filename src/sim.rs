//! Balance simulations
//!
//! Headless runs of the leveling curve and of repeated shrine enhancement,
//! used to tune the progression and enhancement tables.

use std::collections::BTreeMap;

use anyhow::Result;
use delve_game::items::starter;
use delve_game::{
    Character, EnhanceOutcome, EquipSlot, GameConfig, GameEvent, Inventory, MAX_ENHANCE_LEVEL,
};
use delve_game::{attempt_enhance, Durability};
use rand::Rng;
use tracing::{debug, info};

use crate::settings::SimulationSettings;

/// Level reached on arrival at each floor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelReport {
    /// `(floor, level on arrival)`, starting with floor 1
    pub arrivals: Vec<(u32, u32)>,
    pub final_level: u32,
    pub total_exp: u64,
}

/// Clear `floors` floors, killing `kills_per_floor` monsters worth
/// `exp_per_kill` each, and record the level on arrival at each floor
pub fn run_level_simulation(config: &GameConfig, sim: &SimulationSettings) -> LevelReport {
    let mut hero = Character::new("Simulated Delver", config.clone());
    let mut events: Vec<GameEvent> = Vec::new();
    let mut arrivals = Vec::with_capacity(sim.floors as usize + 1);

    for floor in 1..=sim.floors {
        arrivals.push((floor, hero.level()));
        for _ in 0..sim.kills_per_floor {
            for level_up in hero.record_kill(sim.exp_per_kill, &mut events) {
                info!(
                    "Floor {}: level {} (next at {} exp)",
                    floor, level_up.level, level_up.exp_to_next
                );
            }
        }
    }
    arrivals.push((sim.floors + 1, hero.level()));
    info!(
        "Arrived at floor {} at level {} with {} total exp",
        sim.floors + 1,
        hero.level(),
        hero.progression.total_exp
    );

    LevelReport {
        arrivals,
        final_level: hero.level(),
        total_exp: hero.progression.total_exp,
    }
}

/// Outcome counts for attempts started from one level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelTally {
    pub attempts: u64,
    pub successes: u64,
    pub durability_lost: u64,
    pub broken: u64,
    pub destroyed: u64,
}

impl LevelTally {
    fn record(&mut self, outcome: &EnhanceOutcome) {
        self.attempts += 1;
        match outcome {
            EnhanceOutcome::Success { .. } => self.successes += 1,
            EnhanceOutcome::DurabilityLost { .. } => self.durability_lost += 1,
            EnhanceOutcome::Broken => self.broken += 1,
            EnhanceOutcome::Destroyed { .. } => self.destroyed += 1,
        }
    }

    fn share(&self, count: u64) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            count as f64 / self.attempts as f64 * 100.0
        }
    }
}

/// Aggregate of a shrine simulation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShrineReport {
    pub runs: u32,
    /// Runs whose weapon reached the top enhancement level
    pub reached_max: u32,
    pub by_level: BTreeMap<u8, LevelTally>,
}

impl ShrineReport {
    /// Share of runs that reached the top level, in percent
    pub fn max_rate(&self) -> f64 {
        if self.runs == 0 {
            0.0
        } else {
            f64::from(self.reached_max) / f64::from(self.runs) * 100.0
        }
    }

    pub fn log(&self) {
        for (level, tally) in &self.by_level {
            info!(
                "+{:<2} attempts {:>7}  success {:>5.1}%  durability {:>5.1}%  broken {:>5.1}%  destroyed {:>5.1}%",
                level,
                tally.attempts,
                tally.share(tally.successes),
                tally.share(tally.durability_lost),
                tally.share(tally.broken),
                tally.share(tally.destroyed),
            );
        }
        info!(
            "{} of {} weapons reached +{} ({:.2}%)",
            self.reached_max,
            self.runs,
            MAX_ENHANCE_LEVEL,
            self.max_rate()
        );
    }
}

/// Push `iterations` fresh weapons through repeated enhancement. A run ends
/// when the weapon reaches the top level, breaks, is destroyed or uses up
/// its attempts; lost durability is repaired and the run continues.
pub fn run_shrine_simulation<R: Rng + ?Sized>(
    sim: &SimulationSettings,
    rng: &mut R,
) -> Result<ShrineReport> {
    let catalog = starter::starter_catalog();
    let mut template = starter::create_starter_kit(&catalog)?
        .into_iter()
        .map(|(item, _)| item)
        .find(|item| item.definition_id == starter::SHORT_SWORD)
        .ok_or_else(|| anyhow::anyhow!("starter kit has no weapon"))?;
    template.durability = Durability::full(sim.shrine_durability);

    let mut report = ShrineReport::default();
    for run in 0..sim.shrine_iterations {
        let mut inventory = Inventory::new();
        inventory.store.add(template.clone(), 1)?;
        inventory.equip(template.definition_id)?;
        report.runs += 1;

        let mut attempts = 0;
        while let Some(level) = inventory
            .equipment
            .get(EquipSlot::Weapon)
            .map(|item| item.enhancement_level)
        {
            if level >= MAX_ENHANCE_LEVEL {
                report.reached_max += 1;
                break;
            }
            if attempts >= sim.shrine_max_attempts {
                debug!("Run {} abandoned at +{}", run, level);
                break;
            }
            attempts += 1;
            let attempt = attempt_enhance(&mut inventory.equipment, EquipSlot::Weapon, rng)?;
            report
                .by_level
                .entry(level)
                .or_default()
                .record(&attempt.outcome);
            match attempt.outcome {
                EnhanceOutcome::Success { .. } => {}
                EnhanceOutcome::DurabilityLost { .. } => inventory.equipment.restore_durability(),
                EnhanceOutcome::Broken | EnhanceOutcome::Destroyed { .. } => break,
            }
        }
        debug!("Run {} finished", run);
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_level_simulation_defaults() {
        let report = run_level_simulation(&GameConfig::default(), &SimulationSettings::default());
        assert_eq!(report.arrivals.len(), 25);
        assert_eq!(report.arrivals[0], (1, 1));
        assert_eq!(report.total_exp, 24 * 48 * 15);
        assert_eq!(report.arrivals.last(), Some(&(25, report.final_level)));
        assert!(report.final_level > 1 && report.final_level < 99);
        assert!(report.arrivals.windows(2).all(|w| w[0].1 <= w[1].1));
    }

    #[test]
    fn test_shrine_simulation_always_success() {
        let sim = SimulationSettings {
            shrine_iterations: 3,
            ..Default::default()
        };
        let report = run_shrine_simulation(&sim, &mut StepRng::new(0, 0)).unwrap();
        assert_eq!(report.runs, 3);
        assert_eq!(report.reached_max, 3);
        assert_eq!(report.by_level.len(), usize::from(MAX_ENHANCE_LEVEL));
        assert!(report.by_level.values().all(|t| t.successes == 3));
        assert_eq!(report.max_rate(), 100.0);
    }

    #[test]
    fn test_shrine_simulation_always_failure() {
        let sim = SimulationSettings {
            shrine_iterations: 2,
            shrine_durability: 8,
            shrine_max_attempts: 5,
            ..Default::default()
        };
        let report = run_shrine_simulation(&sim, &mut StepRng::new(u64::MAX, 0)).unwrap();
        assert_eq!(report.reached_max, 0);
        assert_eq!(report.by_level.keys().copied().collect::<Vec<_>>(), vec![0]);
        assert_eq!(
            report.by_level[&0],
            LevelTally {
                attempts: 10,
                durability_lost: 10,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_shrine_simulation_counts_add_up() {
        let sim = SimulationSettings {
            shrine_iterations: 200,
            ..Default::default()
        };
        let report = run_shrine_simulation(&sim, &mut StdRng::seed_from_u64(11)).unwrap();
        for tally in report.by_level.values() {
            assert_eq!(
                tally.attempts,
                tally.successes + tally.durability_lost + tally.broken + tally.destroyed
            );
        }
        assert!(report.reached_max <= report.runs);
    }
}
