//! Starting gear
//!
//! A small built-in catalog and the kit a new character begins with.

use delve_core::ItemId;

use super::catalog::{BaseStats, ItemCatalog, ItemDefinition, ItemKind, SlotType};
use super::item::{Affix, AffixStat, ItemInstance};
use crate::error::InventoryError;

pub const SHORT_SWORD: ItemId = ItemId(1000);
pub const LEATHER_ARMOR: ItemId = ItemId(2000);
pub const LEATHER_CAP: ItemId = ItemId(2001);
pub const BUCKLER: ItemId = ItemId(2002);
pub const COPPER_RING: ItemId = ItemId(2100);
pub const HEALING_POTION: ItemId = ItemId(3000);
pub const IDENTIFY_SCROLL: ItemId = ItemId(3100);
pub const FIREBOLT_BOOK: ItemId = ItemId(3200);

fn equipment(
    id: ItemId,
    name: &str,
    slot: SlotType,
    base: BaseStats,
    max_durability: u32,
) -> ItemDefinition {
    ItemDefinition {
        id,
        name: name.to_string(),
        description: format!("Plain {} for a new delver.", slot.label().to_lowercase()),
        kind: ItemKind::Equipment {
            slot,
            base,
            max_durability,
        },
        required_level: 1,
    }
}

/// Catalog holding the starting gear
pub fn starter_catalog() -> ItemCatalog {
    let mut catalog = ItemCatalog::new();
    catalog.insert(equipment(
        SHORT_SWORD,
        "Short Sword",
        SlotType::Weapon,
        BaseStats {
            damage_min: 2,
            damage_max: 6,
            armor: 0,
        },
        24,
    ));
    catalog.insert(equipment(
        LEATHER_ARMOR,
        "Leather Armor",
        SlotType::Armor,
        BaseStats {
            armor: 8,
            ..Default::default()
        },
        30,
    ));
    catalog.insert(equipment(
        LEATHER_CAP,
        "Leather Cap",
        SlotType::Helmet,
        BaseStats {
            armor: 3,
            ..Default::default()
        },
        15,
    ));
    catalog.insert(equipment(
        BUCKLER,
        "Buckler",
        SlotType::Shield,
        BaseStats {
            armor: 4,
            ..Default::default()
        },
        16,
    ));
    catalog.insert(equipment(
        COPPER_RING,
        "Copper Ring",
        SlotType::Ring,
        BaseStats::default(),
        0,
    ));
    catalog.insert(ItemDefinition {
        id: HEALING_POTION,
        name: "Potion of Healing".to_string(),
        description: "Restores some health.".to_string(),
        kind: ItemKind::Consumable {
            effect: "HEAL".to_string(),
            value: 30,
        },
        required_level: 1,
    });
    catalog.insert(ItemDefinition {
        id: IDENTIFY_SCROLL,
        name: "Scroll of Identify".to_string(),
        description: "Reveals the nature of an item.".to_string(),
        kind: ItemKind::Scroll {
            effect: "IDENTIFY".to_string(),
            value: 0,
        },
        required_level: 1,
    });
    catalog.insert(ItemDefinition {
        id: FIREBOLT_BOOK,
        name: "Book of Firebolt".to_string(),
        description: "Teaches the Firebolt spell.".to_string(),
        kind: ItemKind::SkillBook {
            skill_id: "FIREBOLT".to_string(),
        },
        required_level: 1,
    });
    catalog
}

/// Items a new character starts with, and how many of each. The weapon
/// and the ring carry rolled affixes.
pub fn create_starter_kit(catalog: &ItemCatalog) -> Result<Vec<(ItemInstance, u32)>, InventoryError> {
    let sword = catalog.instantiate_with_affixes(
        SHORT_SWORD,
        Some(
            Affix::new("KEEN", "Keen")
                .with(AffixStat::ToHit, 10)
                .with(AffixStat::DamagePercent, 20),
        ),
        Some(Affix::new("OF_THE_BEAR", "of the Bear").with(AffixStat::Strength, 5)),
    )?;
    let ring = catalog.instantiate_with_affixes(
        COPPER_RING,
        None,
        Some(Affix::new("OF_VIGOR", "of Vigor").with(AffixStat::Vitality, 3)),
    )?;

    Ok(vec![
        (sword, 1),
        (catalog.instantiate(LEATHER_ARMOR)?, 1),
        (catalog.instantiate(LEATHER_CAP)?, 1),
        (ring, 1),
        (catalog.instantiate(HEALING_POTION)?, 3),
        (catalog.instantiate(IDENTIFY_SCROLL)?, 2),
    ])
}
