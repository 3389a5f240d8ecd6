//! Item instances
//!
//! A concrete copy of a catalog entry with durability, enhancement level and
//! rolled prefix/suffix affixes.

use std::collections::BTreeMap;

use delve_core::ItemId;
use serde::{Deserialize, Serialize};

use super::catalog::{BaseStats, ItemCategory, ItemKind, SlotType};
use crate::enhance::TERMINAL_ENHANCE_LEVEL;
use crate::error::InventoryError;

/// Which half of an item name an affix belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AffixFamily {
    Prefix,
    Suffix,
}

/// A numeric field an affix can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AffixStat {
    // Prefix family: damage, to-hit, resistances
    DamagePercent,
    ToHit,
    ResistFire,
    ResistIce,
    ResistLightning,
    ResistPoison,
    ResistAll,
    // Suffix family: attributes, resources, leech, speed
    Strength,
    Dexterity,
    Magic,
    Vitality,
    Hp,
    Mp,
    DamageMax,
    LifeLeech,
    AttackSpeed,
}

impl AffixStat {
    /// The family whose affixes roll this stat
    pub fn family(self) -> AffixFamily {
        match self {
            Self::DamagePercent
            | Self::ToHit
            | Self::ResistFire
            | Self::ResistIce
            | Self::ResistLightning
            | Self::ResistPoison
            | Self::ResistAll => AffixFamily::Prefix,
            _ => AffixFamily::Suffix,
        }
    }
}

/// A named bonus with independent numeric magnitudes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Affix {
    /// Affix id from the affix tables
    pub id: String,
    /// Name fragment shown on the item ("Keen", "of the Bear")
    pub name: String,
    pub stats: BTreeMap<AffixStat, i32>,
}

impl Affix {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            stats: BTreeMap::new(),
        }
    }

    /// Builder: set a stat magnitude
    pub fn with(mut self, stat: AffixStat, value: i32) -> Self {
        self.stats.insert(stat, value);
        self
    }

    /// Magnitude of a stat, 0 when absent
    pub fn get(&self, stat: AffixStat) -> i32 {
        self.stats.get(&stat).copied().unwrap_or(0)
    }
}

/// Current and maximum durability. A maximum of 0 means durability does not
/// apply to the item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Durability {
    pub current: u32,
    pub max: u32,
}

impl Durability {
    pub fn full(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn applies(&self) -> bool {
        self.max > 0
    }

    /// Worn down to nothing; unusable until repaired
    pub fn is_broken(&self) -> bool {
        self.applies() && self.current == 0
    }

    pub fn halve(&mut self) {
        self.current /= 2;
    }

    pub fn zero(&mut self) {
        self.current = 0;
    }

    pub fn restore(&mut self) {
        self.current = self.max;
    }
}

/// A concrete item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemInstance {
    pub definition_id: ItemId,
    pub kind: ItemKind,
    /// Definition name, without affixes or enhancement marker
    pub base_name: String,
    /// Display name
    pub name: String,
    pub durability: Durability,
    pub enhancement_level: u8,
    pub prefix: Option<Affix>,
    pub suffix: Option<Affix>,
}

impl ItemInstance {
    pub fn category(&self) -> ItemCategory {
        self.kind.category()
    }

    pub fn slot(&self) -> Option<SlotType> {
        self.kind.slot()
    }

    pub fn base_stats(&self) -> BaseStats {
        self.kind.base_stats().unwrap_or_default()
    }

    pub fn is_broken(&self) -> bool {
        self.durability.is_broken()
    }

    /// Sum of a stat across both affixes
    pub fn affix_total(&self, stat: AffixStat) -> i32 {
        self.affixes().map(|affix| affix.get(stat)).sum()
    }

    fn affixes(&self) -> impl Iterator<Item = &Affix> {
        self.prefix.iter().chain(self.suffix.iter())
    }

    /// Stats an enhancement may boost: fields of the prefix's family on the
    /// prefix and of the suffix's family on the suffix, with a positive value.
    pub fn boostable_stats(&self) -> Vec<(AffixFamily, AffixStat)> {
        let mut out = Vec::new();
        for (family, affix) in [
            (AffixFamily::Prefix, &self.prefix),
            (AffixFamily::Suffix, &self.suffix),
        ] {
            if let Some(affix) = affix {
                out.extend(
                    affix
                        .stats
                        .iter()
                        .filter(|(stat, value)| stat.family() == family && **value > 0)
                        .map(|(stat, _)| (family, *stat)),
                );
            }
        }
        out
    }

    /// Mutable access to one affix stat
    pub fn affix_stat_mut(&mut self, family: AffixFamily, stat: AffixStat) -> Option<&mut i32> {
        let affix = match family {
            AffixFamily::Prefix => self.prefix.as_mut(),
            AffixFamily::Suffix => self.suffix.as_mut(),
        }?;
        affix.stats.get_mut(&stat)
    }

    /// "<prefix> <base> <suffix>" with absent parts left out
    pub fn affixed_name(&self) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(3);
        if let Some(prefix) = &self.prefix {
            parts.push(&prefix.name);
        }
        parts.push(&self.base_name);
        if let Some(suffix) = &self.suffix {
            parts.push(&suffix.name);
        }
        parts.join(" ")
    }

    /// Check the fields a snapshot may have corrupted: durability within
    /// `0..=max` and an enhancement level no higher than the terminal one
    pub fn validate(&self) -> Result<(), InventoryError> {
        let invalid = |reason: String| InventoryError::InvalidItemState {
            id: self.definition_id,
            reason,
        };
        if self.durability.current > self.durability.max {
            return Err(invalid(format!(
                "durability {}/{}",
                self.durability.current, self.durability.max
            )));
        }
        if self.enhancement_level > TERMINAL_ENHANCE_LEVEL {
            return Err(invalid(format!(
                "enhancement level +{} above +{}",
                self.enhancement_level, TERMINAL_ENHANCE_LEVEL
            )));
        }
        Ok(())
    }

    /// Replace any "+N " marker on the display name with the current level
    pub fn refresh_enhanced_name(&mut self) {
        self.name = format!(
            "+{} {}",
            self.enhancement_level,
            strip_enhancement_marker(&self.name)
        );
    }
}

/// Strip a leading "+<digits> " marker from a display name
pub fn strip_enhancement_marker(name: &str) -> &str {
    if let Some(rest) = name.strip_prefix('+') {
        let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
        if digits > 0 {
            if let Some(tail) = rest[digits..].strip_prefix(' ') {
                return tail;
            }
        }
    }
    name
}
