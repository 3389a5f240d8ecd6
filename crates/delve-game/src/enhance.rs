//! Equipment enhancement
//!
//! An attempt rolls against a level-dependent success rate. Success raises
//! the enhancement level and boosts one rolled affix stat; failure costs
//! durability or, at high levels, the item itself.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::EnhanceError;
use crate::events::{GameEvent, MessageKey, SoundCue};
use crate::inventory::{EquipSlot, EquipmentSlots};
use crate::items::{AffixFamily, AffixStat};

/// Highest level an attempt may start from. A success here produces the
/// terminal level, which cannot be enhanced further.
pub const MAX_ENHANCE_LEVEL: u8 = 10;
/// Level reached by a success at `MAX_ENHANCE_LEVEL`; nothing goes higher
pub const TERMINAL_ENHANCE_LEVEL: u8 = MAX_ENHANCE_LEVEL + 1;

/// Smallest boost applied to an affix stat on success
pub const BOOST_MIN: f64 = 0.05;
/// Largest boost applied to an affix stat on success
pub const BOOST_MAX: f64 = 0.10;

/// Chance that an attempt from `level` succeeds
pub fn success_rate(level: u8) -> Result<f64, EnhanceError> {
    let l = f64::from(level);
    match level {
        0..=3 => Ok(0.9 - 0.1 * l),
        4..=6 => Ok(0.5 - 0.1 * (l - 4.0)),
        7..=9 => Ok(0.2 - 0.05 * (l - 7.0)),
        10 => Ok(0.05),
        _ => Err(EnhanceError::MaxLevelReached(level)),
    }
}

/// Penalty band for a failed attempt, by level before the attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureTier {
    /// Durability halved
    Safe,
    /// Durability zeroed
    Risky,
    /// Item destroyed
    Destruction,
}

impl FailureTier {
    pub fn for_level(level: u8) -> Self {
        match level {
            0..=3 => Self::Safe,
            4..=6 => Self::Risky,
            _ => Self::Destruction,
        }
    }
}

/// The random inputs of one attempt
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnhanceRoll {
    /// Success when below the success rate, in [0, 1)
    pub draw: f64,
    /// Boost fraction, in [BOOST_MIN, BOOST_MAX]
    pub boost_pct: f64,
    /// Selects the boosted stat among the eligible ones, in [0, 1)
    pub pick: f64,
}

impl EnhanceRoll {
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            draw: rng.gen::<f64>(),
            boost_pct: rng.gen_range(BOOST_MIN..=BOOST_MAX),
            pick: rng.gen::<f64>(),
        }
    }
}

/// Stat raised by a successful attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBoost {
    pub family: AffixFamily,
    pub stat: AffixStat,
    pub amount: i32,
    pub new_value: i32,
}

/// What an attempt did to the item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnhanceOutcome {
    Success {
        level: u8,
        name: String,
        /// `None` when the item had no eligible affix stat
        boost: Option<StatBoost>,
    },
    DurabilityLost {
        durability: u32,
    },
    Broken,
    Destroyed {
        name: String,
    },
}

impl EnhanceOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Result of one attempt, with the notifications to dispatch
#[derive(Debug, Clone, PartialEq)]
pub struct EnhanceReport {
    pub slot: EquipSlot,
    pub previous_level: u8,
    pub outcome: EnhanceOutcome,
    pub events: Vec<GameEvent>,
}

/// Attempt to enhance the item in `slot`. Nothing is drawn from `rng` when
/// the slot is empty or the item is at the terminal level.
pub fn attempt_enhance<R: Rng + ?Sized>(
    equipment: &mut EquipmentSlots,
    slot: EquipSlot,
    rng: &mut R,
) -> Result<EnhanceReport, EnhanceError> {
    let item = equipment.get(slot).ok_or(EnhanceError::EmptySlot(slot))?;
    success_rate(item.enhancement_level)?;
    let roll = EnhanceRoll::sample(rng);
    apply_roll(equipment, slot, roll)
}

/// Resolve an attempt with the given random inputs
pub fn apply_roll(
    equipment: &mut EquipmentSlots,
    slot: EquipSlot,
    roll: EnhanceRoll,
) -> Result<EnhanceReport, EnhanceError> {
    let item = equipment
        .get_mut(slot)
        .ok_or(EnhanceError::EmptySlot(slot))?;
    let previous_level = item.enhancement_level;
    let rate = success_rate(previous_level)?;

    let mut events = Vec::with_capacity(2);
    let outcome = if roll.draw < rate {
        item.enhancement_level += 1;

        let candidates = item.boostable_stats();
        let boost = if candidates.is_empty() {
            None
        } else {
            let index = ((roll.pick * candidates.len() as f64) as usize).min(candidates.len() - 1);
            let (family, stat) = candidates[index];
            let pct = roll.boost_pct.clamp(BOOST_MIN, BOOST_MAX);
            item.affix_stat_mut(family, stat).map(|value| {
                let wanted = ((f64::from(*value) * pct).floor() as i32).max(1);
                let old = *value;
                *value = old.saturating_add(wanted);
                StatBoost {
                    family,
                    stat,
                    amount: *value - old,
                    new_value: *value,
                }
            })
        };

        item.refresh_enhanced_name();
        let level = item.enhancement_level;
        let name = item.name.clone();
        info!("Enhanced {} to +{} ({:?})", name, level, boost);
        events.push(GameEvent::message(
            MessageKey::EnhanceSucceeded,
            [name.clone(), level.to_string()],
        ));
        events.push(GameEvent::sound(SoundCue::LevelUp));
        EnhanceOutcome::Success { level, name, boost }
    } else {
        match FailureTier::for_level(previous_level) {
            FailureTier::Safe => {
                item.durability.halve();
                let durability = item.durability.current;
                info!("Enhancement of {} failed, durability now {}", item.name, durability);
                events.push(GameEvent::message(
                    MessageKey::EnhanceDurabilityLost,
                    [item.name.clone(), durability.to_string()],
                ));
                EnhanceOutcome::DurabilityLost { durability }
            }
            FailureTier::Risky => {
                item.durability.zero();
                info!("Enhancement of {} failed, item broken", item.name);
                events.push(GameEvent::message(
                    MessageKey::EnhanceBroken,
                    [item.name.as_str()],
                ));
                EnhanceOutcome::Broken
            }
            FailureTier::Destruction => {
                let name = equipment
                    .take(slot)
                    .map(|destroyed| destroyed.name)
                    .unwrap_or_default();
                info!("Enhancement of {} failed, item destroyed", name);
                events.push(GameEvent::message(
                    MessageKey::EnhanceShattered,
                    [name.as_str()],
                ));
                EnhanceOutcome::Destroyed { name }
            }
        }
    };
    if !outcome.is_success() {
        events.push(GameEvent::sound(SoundCue::Break));
    }

    Ok(EnhanceReport {
        slot,
        previous_level,
        outcome,
        events,
    })
}
