//! Item data model
//!
//! Immutable catalog definitions and the mutable instances created from them.

pub mod catalog;
pub mod item;
pub mod starter;

pub use catalog::{BaseStats, ItemCatalog, ItemCategory, ItemDefinition, ItemKind, SlotType};
pub use item::{Affix, AffixFamily, AffixStat, Durability, ItemInstance};
pub use starter::{create_starter_kit, starter_catalog};
