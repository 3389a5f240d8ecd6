//! Delve Game - Dungeon crawler rules
//!
//! Provides the item catalog, inventory and equipment, shrine enhancement,
//! character stats and level progression.

pub mod character;
pub mod config;
pub mod enhance;
pub mod error;
pub mod events;
pub mod inventory;
pub mod items;
pub mod player;
pub mod shrine;
pub mod world;

pub use character::{Character, CharacterHandle, CharacterSnapshot};
pub use config::{GameConfig, ProgressionConfig};
pub use enhance::{
    apply_roll, attempt_enhance, success_rate, EnhanceOutcome, EnhanceReport, EnhanceRoll,
    FailureTier, StatBoost, MAX_ENHANCE_LEVEL, TERMINAL_ENHANCE_LEVEL,
};
pub use error::{EnhanceError, InventoryError};
pub use events::{EventSink, GameEvent, MessageKey, SoundCue};
pub use inventory::{
    EquipResult, EquipSlot, EquipmentSlots, Inventory, InventorySnapshot, InventoryStore,
    ListFilter, StoredItem,
};
pub use items::{
    Affix, AffixFamily, AffixStat, BaseStats, Durability, ItemCatalog, ItemCategory,
    ItemDefinition, ItemInstance, ItemKind, SlotType,
};
pub use player::{CharacterStats, DerivedStats, LevelUp, Progression, StatGrowth};
pub use shrine::{ShrineChoice, ShrineInput, ShrineOutcome, ShrineSession, ShrineState};
pub use world::{Shrine, SoloWorld, WorldDirectory};
