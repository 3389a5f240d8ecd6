//! Item catalog
//!
//! Immutable item archetypes looked up by id. Instances are stamped out of a
//! definition with `ItemCatalog::instantiate`.

use std::collections::BTreeMap;
use std::str::FromStr;

use delve_core::ItemId;
use serde::{Deserialize, Serialize};

use super::item::{Affix, Durability, ItemInstance};
use crate::error::InventoryError;

/// Item category. Each category has its own inventory partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ItemCategory {
    Equipment,
    Consumable,
    Scroll,
    SkillBook,
}

/// Number of item categories
pub const CATEGORY_COUNT: usize = 4;

impl ItemCategory {
    /// All categories in partition order
    pub fn all() -> &'static [ItemCategory] {
        &[
            Self::Equipment,
            Self::Consumable,
            Self::Scroll,
            Self::SkillBook,
        ]
    }

    /// Partition index
    pub fn index(self) -> usize {
        match self {
            Self::Equipment => 0,
            Self::Consumable => 1,
            Self::Scroll => 2,
            Self::SkillBook => 3,
        }
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Self::Equipment => "Equipment",
            Self::Consumable => "Consumable",
            Self::Scroll => "Scroll",
            Self::SkillBook => "Skill Book",
        }
    }
}

/// Body location an equipment definition is worn on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotType {
    Helmet,
    Armor,
    Weapon,
    Shield,
    Gloves,
    Boots,
    Necklace,
    Ring,
}

impl SlotType {
    /// All slot types
    pub fn all() -> &'static [SlotType] {
        &[
            Self::Helmet,
            Self::Armor,
            Self::Weapon,
            Self::Shield,
            Self::Gloves,
            Self::Boots,
            Self::Necklace,
            Self::Ring,
        ]
    }

    /// Label used in item data files
    pub fn label(self) -> &'static str {
        match self {
            Self::Helmet => "HELMET",
            Self::Armor => "ARMOR",
            Self::Weapon => "WEAPON",
            Self::Shield => "SHIELD",
            Self::Gloves => "GLOVES",
            Self::Boots => "BOOTS",
            Self::Necklace => "NECKLACE",
            Self::Ring => "RING",
        }
    }
}

impl FromStr for SlotType {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|slot| slot.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| InventoryError::UnknownSlot(s.to_string()))
    }
}

/// Base numeric stat block of an equipment definition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    /// Minimum weapon damage
    pub damage_min: u32,
    /// Maximum weapon damage
    pub damage_max: u32,
    /// Armor class
    pub armor: u32,
}

/// What an item is. Closed over the four categories; the variant decides
/// which inventory partition holds the item and whether it can be worn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ItemKind {
    Equipment {
        slot: SlotType,
        base: BaseStats,
        max_durability: u32,
    },
    Consumable {
        effect: String,
        value: i32,
    },
    Scroll {
        effect: String,
        value: i32,
    },
    SkillBook {
        skill_id: String,
    },
}

impl ItemKind {
    pub fn category(&self) -> ItemCategory {
        match self {
            Self::Equipment { .. } => ItemCategory::Equipment,
            Self::Consumable { .. } => ItemCategory::Consumable,
            Self::Scroll { .. } => ItemCategory::Scroll,
            Self::SkillBook { .. } => ItemCategory::SkillBook,
        }
    }

    /// Slot type, for equipment
    pub fn slot(&self) -> Option<SlotType> {
        match self {
            Self::Equipment { slot, .. } => Some(*slot),
            _ => None,
        }
    }

    /// Base stats, for equipment
    pub fn base_stats(&self) -> Option<BaseStats> {
        match self {
            Self::Equipment { base, .. } => Some(*base),
            _ => None,
        }
    }

    /// Maximum durability (0 when durability does not apply)
    pub fn max_durability(&self) -> u32 {
        match self {
            Self::Equipment { max_durability, .. } => *max_durability,
            _ => 0,
        }
    }
}

/// An item archetype
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDefinition {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub kind: ItemKind,
    /// Required player level to use
    pub required_level: u32,
}

impl ItemDefinition {
    pub fn category(&self) -> ItemCategory {
        self.kind.category()
    }

    /// Create a fresh instance: full durability, +0, no affixes
    pub fn instantiate(&self) -> ItemInstance {
        ItemInstance {
            definition_id: self.id,
            kind: self.kind.clone(),
            base_name: self.name.clone(),
            name: self.name.clone(),
            durability: Durability::full(self.kind.max_durability()),
            enhancement_level: 0,
            prefix: None,
            suffix: None,
        }
    }
}

/// All known item definitions, keyed by id
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    definitions: BTreeMap<ItemId, ItemDefinition>,
}

impl ItemCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition, returning the one it replaced (if any)
    pub fn insert(&mut self, definition: ItemDefinition) -> Option<ItemDefinition> {
        self.definitions.insert(definition.id, definition)
    }

    /// Look up a definition
    pub fn get(&self, id: ItemId) -> Result<&ItemDefinition, InventoryError> {
        self.definitions
            .get(&id)
            .ok_or(InventoryError::ItemNotFound(id))
    }

    /// Create a plain instance of a definition
    pub fn instantiate(&self, id: ItemId) -> Result<ItemInstance, InventoryError> {
        Ok(self.get(id)?.instantiate())
    }

    /// Create an instance carrying rolled affixes. The display name becomes
    /// "<prefix> <base> <suffix>" with absent parts left out.
    pub fn instantiate_with_affixes(
        &self,
        id: ItemId,
        prefix: Option<Affix>,
        suffix: Option<Affix>,
    ) -> Result<ItemInstance, InventoryError> {
        let mut instance = self.instantiate(id)?;
        instance.prefix = prefix;
        instance.suffix = suffix;
        instance.name = instance.affixed_name();
        Ok(instance)
    }

    /// Definitions of one category, in id order
    pub fn by_category(&self, category: ItemCategory) -> Vec<&ItemDefinition> {
        self.definitions
            .values()
            .filter(|def| def.category() == category)
            .collect()
    }

    /// Number of definitions
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether the catalog has no definitions
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::item::AffixStat;

    fn make_catalog() -> ItemCatalog {
        let mut catalog = ItemCatalog::new();
        catalog.insert(ItemDefinition {
            id: ItemId(1),
            name: "Short Sword".to_string(),
            description: "A plain blade".to_string(),
            kind: ItemKind::Equipment {
                slot: SlotType::Weapon,
                base: BaseStats {
                    damage_min: 2,
                    damage_max: 6,
                    armor: 0,
                },
                max_durability: 24,
            },
            required_level: 1,
        });
        catalog.insert(ItemDefinition {
            id: ItemId(2),
            name: "Potion of Healing".to_string(),
            description: "Restores health".to_string(),
            kind: ItemKind::Consumable {
                effect: "HEAL".to_string(),
                value: 30,
            },
            required_level: 1,
        });
        catalog
    }

    #[test]
    fn test_category_indices_are_distinct() {
        let mut seen = [false; CATEGORY_COUNT];
        for cat in ItemCategory::all() {
            assert!(!seen[cat.index()]);
            seen[cat.index()] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_slot_type_parse() {
        assert_eq!("RING".parse::<SlotType>().unwrap(), SlotType::Ring);
        assert_eq!("helmet".parse::<SlotType>().unwrap(), SlotType::Helmet);
        assert!(matches!(
            "CAPE".parse::<SlotType>(),
            Err(InventoryError::UnknownSlot(label)) if label == "CAPE"
        ));
    }

    #[test]
    fn test_instantiate_fresh() {
        let catalog = make_catalog();
        let sword = catalog.instantiate(ItemId(1)).unwrap();
        assert_eq!(sword.name, "Short Sword");
        assert_eq!(sword.enhancement_level, 0);
        assert_eq!(sword.durability, Durability { current: 24, max: 24 });
        assert_eq!(sword.slot(), Some(SlotType::Weapon));
    }

    #[test]
    fn test_consumable_has_no_durability() {
        let catalog = make_catalog();
        let potion = catalog.instantiate(ItemId(2)).unwrap();
        assert_eq!(potion.category(), ItemCategory::Consumable);
        assert!(!potion.durability.applies());
    }

    #[test]
    fn test_unknown_id() {
        let catalog = make_catalog();
        assert_eq!(
            catalog.instantiate(ItemId(99)).unwrap_err(),
            InventoryError::ItemNotFound(ItemId(99))
        );
    }

    #[test]
    fn test_instantiate_with_affixes_names_item() {
        let catalog = make_catalog();
        let prefix = Affix::new("KEEN", "Keen").with(AffixStat::ToHit, 5);
        let suffix = Affix::new("OF_THE_BEAR", "of the Bear").with(AffixStat::Strength, 3);
        let sword = catalog
            .instantiate_with_affixes(ItemId(1), Some(prefix), Some(suffix))
            .unwrap();
        assert_eq!(sword.name, "Keen Short Sword of the Bear");
        assert_eq!(sword.base_name, "Short Sword");
    }

    #[test]
    fn test_by_category() {
        let catalog = make_catalog();
        assert_eq!(catalog.by_category(ItemCategory::Equipment).len(), 1);
        assert_eq!(catalog.by_category(ItemCategory::Scroll).len(), 0);
        assert_eq!(catalog.len(), 2);
    }
}
