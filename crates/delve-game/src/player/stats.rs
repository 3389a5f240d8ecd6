//! Character stats
//!
//! Vitals and base attributes, plus the combat stats derived from them and
//! the worn equipment.

use serde::{Deserialize, Serialize};

use crate::inventory::EquipmentSlots;
use crate::items::AffixStat;

/// Primary attributes before equipment bonuses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseAttributes {
    pub strength: u32,
    pub dexterity: u32,
    pub magic: u32,
    pub vitality: u32,
}

impl Default for BaseAttributes {
    fn default() -> Self {
        Self {
            strength: 10,
            dexterity: 10,
            magic: 10,
            vitality: 10,
        }
    }
}

/// Combat stats after equipment is applied. Broken items contribute nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedStats {
    pub strength: i32,
    pub dexterity: i32,
    pub magic: i32,
    pub vitality: i32,
    pub max_hp: u32,
    pub max_mp: u32,
    pub damage_min: u32,
    pub damage_max: u32,
    pub armor: u32,
    pub to_hit: i32,
    pub resist_fire: i32,
    pub resist_ice: i32,
    pub resist_lightning: i32,
    pub resist_poison: i32,
    /// Percent of damage dealt returned as HP
    pub life_leech: i32,
    pub attack_speed: i32,
}

/// Vitals and attributes of a character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterStats {
    /// Maximum HP before equipment bonuses
    pub base_max_hp: u32,
    pub current_hp: u32,
    /// Maximum MP before equipment bonuses
    pub base_max_mp: u32,
    pub current_mp: u32,
    pub max_stamina: f32,
    pub current_stamina: f32,
    pub attributes: BaseAttributes,
    /// Rebuilt by `recalculate`, never persisted
    #[serde(skip)]
    pub derived: DerivedStats,
}

impl Default for CharacterStats {
    fn default() -> Self {
        Self::new(100, 50, 100.0)
    }
}

impl CharacterStats {
    /// Create stats with full vitals and no equipment applied
    pub fn new(max_hp: u32, max_mp: u32, max_stamina: f32) -> Self {
        let mut stats = Self {
            base_max_hp: max_hp,
            current_hp: max_hp,
            base_max_mp: max_mp,
            current_mp: max_mp,
            max_stamina,
            current_stamina: max_stamina,
            attributes: BaseAttributes::default(),
            derived: DerivedStats::default(),
        };
        stats.recalculate(&EquipmentSlots::new());
        stats
    }

    /// Effective maximum HP
    pub fn max_hp(&self) -> u32 {
        self.derived.max_hp
    }

    /// Effective maximum MP
    pub fn max_mp(&self) -> u32 {
        self.derived.max_mp
    }

    /// Rebuild derived stats from base values and equipment. Current HP and
    /// MP are clamped to the new maxima.
    pub fn recalculate(&mut self, equipment: &EquipmentSlots) {
        let mut damage_min = 0u32;
        let mut damage_max = 0u32;
        let mut armor = 0u32;
        let bonus = |stat: AffixStat| -> i32 {
            equipment
                .iter_equipped()
                .filter(|(_, item)| !item.is_broken())
                .map(|(_, item)| item.affix_total(stat))
                .sum()
        };

        let strength = add_signed(self.attributes.strength, bonus(AffixStat::Strength));
        let dexterity = add_signed(self.attributes.dexterity, bonus(AffixStat::Dexterity));
        let magic = add_signed(self.attributes.magic, bonus(AffixStat::Magic));
        let vitality = add_signed(self.attributes.vitality, bonus(AffixStat::Vitality));
        let hp_bonus = bonus(AffixStat::Hp);
        let mp_bonus = bonus(AffixStat::Mp);
        let damage_bonus = bonus(AffixStat::DamageMax);
        let damage_pct = bonus(AffixStat::DamagePercent);
        let resist_all = bonus(AffixStat::ResistAll);
        let to_hit = bonus(AffixStat::ToHit);
        let resist_fire = bonus(AffixStat::ResistFire);
        let resist_ice = bonus(AffixStat::ResistIce);
        let resist_lightning = bonus(AffixStat::ResistLightning);
        let resist_poison = bonus(AffixStat::ResistPoison);
        let life_leech = bonus(AffixStat::LifeLeech);
        let attack_speed = bonus(AffixStat::AttackSpeed);

        for (_, item) in equipment.iter_equipped().filter(|(_, item)| !item.is_broken()) {
            let base = item.base_stats();
            damage_min += base.damage_min;
            damage_max += base.damage_max;
            armor += base.armor;
        }
        let damage_max = add_signed(damage_max, damage_bonus).max(0) as u32;

        self.derived = DerivedStats {
            strength,
            dexterity,
            magic,
            vitality,
            max_hp: add_signed(self.base_max_hp, hp_bonus).max(1) as u32,
            max_mp: add_signed(self.base_max_mp, mp_bonus).max(0) as u32,
            damage_min: scale_percent(damage_min, damage_pct),
            damage_max: scale_percent(damage_max, damage_pct),
            armor,
            to_hit,
            resist_fire: resist_fire + resist_all,
            resist_ice: resist_ice + resist_all,
            resist_lightning: resist_lightning + resist_all,
            resist_poison: resist_poison + resist_all,
            life_leech,
            attack_speed,
        };

        self.current_hp = self.current_hp.min(self.derived.max_hp);
        self.current_mp = self.current_mp.min(self.derived.max_mp);
    }

    /// Refill HP, MP and stamina
    pub fn restore_full(&mut self) {
        self.refill_vitals();
        self.current_stamina = self.max_stamina;
    }

    /// Refill HP and MP
    pub fn refill_vitals(&mut self) {
        self.current_hp = self.max_hp();
        self.current_mp = self.max_mp();
    }

    /// Apply one level of growth to the base values. Call `recalculate`
    /// afterwards to update the derived stats.
    pub fn apply_growth(&mut self, growth: &StatGrowth) {
        self.base_max_hp = self.base_max_hp.saturating_add(growth.hp_per_level);
        self.base_max_mp = self.base_max_mp.saturating_add(growth.mp_per_level);
        let a = &mut self.attributes;
        for attr in [&mut a.strength, &mut a.dexterity, &mut a.magic, &mut a.vitality] {
            *attr = attr.saturating_add(growth.attribute_per_level);
        }
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }
}

fn add_signed(base: u32, bonus: i32) -> i32 {
    (i64::from(base) + i64::from(bonus)).clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

fn scale_percent(value: u32, percent: i32) -> u32 {
    let factor = (100 + i64::from(percent)).max(0);
    (i64::from(value) * factor / 100).clamp(0, i64::from(u32::MAX)) as u32
}

/// Per-level stat growth
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatGrowth {
    /// Max HP gained per level
    pub hp_per_level: u32,
    /// Max MP gained per level
    pub mp_per_level: u32,
    /// Added to every base attribute per level
    pub attribute_per_level: u32,
}

impl Default for StatGrowth {
    fn default() -> Self {
        Self {
            hp_per_level: 10,
            mp_per_level: 5,
            attribute_per_level: 1,
        }
    }
}
