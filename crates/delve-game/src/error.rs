//! Recoverable error kinds for inventory, equipment and enhancement

use delve_core::ItemId;
use thiserror::Error;

use crate::inventory::equipment::EquipSlot;

/// Errors from the inventory store, the equipment slots and the catalog
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    #[error("item {0} is not equipment")]
    NotEquippable(ItemId),

    #[error("unknown equipment slot: {0}")]
    UnknownSlot(String),

    #[error("cannot remove {requested} of item {id}: only {held} held")]
    InsufficientQuantity { id: ItemId, requested: u32, held: u32 },

    #[error("item {0} not found")]
    ItemNotFound(ItemId),

    #[error("quantity must be at least 1")]
    InvalidQuantity,

    #[error("item {id} has invalid state: {reason}")]
    InvalidItemState { id: ItemId, reason: String },
}

/// Errors from an enhancement attempt. Neither mutates the item.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnhanceError {
    #[error("enhancement level +{0} is already at the maximum")]
    MaxLevelReached(u8),

    #[error("nothing equipped in {}", .0.name())]
    EmptySlot(EquipSlot),
}
