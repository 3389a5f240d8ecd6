//! Inventory and equipment
//!
//! `Inventory` pairs the store with the equipment slots and is the only
//! place instances move between the two. An instance is always owned by
//! exactly one of them.

pub mod equipment;
pub mod store;

pub use equipment::{EquipSlot, EquipmentSlots};
pub use store::{InventoryStore, ListFilter, StoredItem};

use std::num::NonZeroU32;

use delve_core::ItemId;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::InventoryError;
use crate::events::{GameEvent, MessageKey};
use crate::items::ItemInstance;

/// Result of a successful equip
#[derive(Debug, Clone, PartialEq)]
pub struct EquipResult {
    /// Slot the item went into
    pub slot: EquipSlot,
    /// Display name of the equipped item
    pub equipped_name: String,
    /// Copy of the item that was displaced back into the store, if any
    pub displaced: Option<ItemInstance>,
}

impl EquipResult {
    /// Confirmation notification for the event sink
    pub fn confirmation(&self) -> GameEvent {
        GameEvent::message(MessageKey::Equipped, [self.equipped_name.as_str()])
    }
}

/// Store plus worn equipment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inventory {
    pub store: InventoryStore,
    pub equipment: EquipmentSlots,
}

impl Inventory {
    /// Create an empty inventory
    pub fn new() -> Self {
        Self::default()
    }

    /// Equip one unit of a stored item. Whatever occupied the target slot
    /// goes back to the store.
    pub fn equip(&mut self, id: ItemId) -> Result<EquipResult, InventoryError> {
        let stored = self.store.find(id).ok_or(InventoryError::ItemNotFound(id))?;
        let slot_type = stored.slot().ok_or(InventoryError::NotEquippable(id))?;
        let slot = self.equipment.target_slot(slot_type);

        let item = self.store.remove(id, 1)?;
        let displaced = self.unequip(slot);
        let equipped_name = item.name.clone();
        self.equipment.place(slot, item);

        info!("Equipped {} in {}", equipped_name, slot.name());
        Ok(EquipResult {
            slot,
            equipped_name,
            displaced,
        })
    }

    /// Move the item in `slot` back to the store. Returns a copy of it, or
    /// `None` when there was nothing to unequip.
    pub fn unequip(&mut self, slot: EquipSlot) -> Option<ItemInstance> {
        let item = self.equipment.take(slot)?;
        let copy = item.clone();
        self.store.stack(item, NonZeroU32::MIN);
        debug!("Unequipped {} from {}", copy.name, slot.name());
        Some(copy)
    }

    /// Serializable copy of every stored entry and every occupied slot
    pub fn snapshot(&self) -> InventorySnapshot {
        InventorySnapshot {
            stored: self.store.iter().cloned().collect(),
            equipped: self
                .equipment
                .iter_equipped()
                .map(|(slot, item)| EquippedEntry {
                    slot,
                    item: item.clone(),
                })
                .collect(),
        }
    }

    /// Rebuild an inventory from a snapshot, validating quantities, item
    /// state (durability, enhancement level) and slot occupancy
    pub fn from_snapshot(snapshot: InventorySnapshot) -> Result<Self, InventoryError> {
        let mut inventory = Self::new();
        for entry in snapshot.stored {
            entry.item.validate()?;
            inventory.store.add(entry.item, entry.quantity)?;
        }
        for EquippedEntry { slot, item } in snapshot.equipped {
            item.validate()?;
            let slot_type = item
                .slot()
                .ok_or(InventoryError::NotEquippable(item.definition_id))?;
            if slot.slot_type() != slot_type {
                return Err(InventoryError::UnknownSlot(format!(
                    "{} item in {} slot",
                    slot_type.label(),
                    slot.name()
                )));
            }
            if inventory.equipment.is_occupied(slot) {
                return Err(InventoryError::UnknownSlot(format!(
                    "{} occupied twice",
                    slot.name()
                )));
            }
            inventory.equipment.place(slot, item);
        }
        debug!(
            "Restored inventory: {} stored entries, {} equipped",
            inventory.store.len(),
            inventory.equipment.equipped_count()
        );
        Ok(inventory)
    }
}

/// One occupied slot in a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquippedEntry {
    pub slot: EquipSlot,
    pub item: ItemInstance,
}

/// Persisted form of an `Inventory`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    pub stored: Vec<StoredItem>,
    pub equipped: Vec<EquippedEntry>,
}
