//! Inventory store
//!
//! Quantities of stored item instances, partitioned by category and keyed by
//! definition id.

use std::collections::BTreeMap;
use std::num::NonZeroU32;

use delve_core::ItemId;
use serde::{Deserialize, Serialize};

use crate::error::InventoryError;
use crate::items::catalog::CATEGORY_COUNT;
use crate::items::{ItemCategory, ItemInstance};

/// An instance and how many identical copies of it are stored together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredItem {
    pub item: ItemInstance,
    pub quantity: u32,
}

/// Which partition(s) to list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFilter {
    All,
    Category(ItemCategory),
}

/// Stored (not equipped) items
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryStore {
    partitions: [BTreeMap<ItemId, StoredItem>; CATEGORY_COUNT],
}

impl InventoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` copies. Stacks onto an existing entry with the same
    /// definition id; the stored instance of that entry is kept.
    pub fn add(&mut self, item: ItemInstance, quantity: u32) -> Result<(), InventoryError> {
        let quantity = NonZeroU32::new(quantity).ok_or(InventoryError::InvalidQuantity)?;
        self.stack(item, quantity);
        Ok(())
    }

    /// `add` for a quantity already known to be non-zero
    pub(crate) fn stack(&mut self, item: ItemInstance, quantity: NonZeroU32) {
        let quantity = quantity.get();
        let partition = &mut self.partitions[item.category().index()];
        match partition.get_mut(&item.definition_id) {
            Some(entry) => entry.quantity = entry.quantity.saturating_add(quantity),
            None => {
                partition.insert(item.definition_id, StoredItem { item, quantity });
            }
        }
    }

    /// Remove `quantity` copies and return the instance they were copies of.
    /// The entry is deleted when its quantity reaches zero.
    pub fn remove(&mut self, id: ItemId, quantity: u32) -> Result<ItemInstance, InventoryError> {
        if quantity == 0 {
            return Err(InventoryError::InvalidQuantity);
        }
        let partition = self
            .partitions
            .iter_mut()
            .find(|p| p.contains_key(&id))
            .ok_or(InventoryError::ItemNotFound(id))?;

        let held = partition[&id].quantity;
        if quantity > held {
            return Err(InventoryError::InsufficientQuantity {
                id,
                requested: quantity,
                held,
            });
        }
        if quantity == held {
            // Entry was found above
            return partition
                .remove(&id)
                .map(|entry| entry.item)
                .ok_or(InventoryError::ItemNotFound(id));
        }
        let entry = partition
            .get_mut(&id)
            .ok_or(InventoryError::ItemNotFound(id))?;
        entry.quantity -= quantity;
        Ok(entry.item.clone())
    }

    /// Throw away copies of an item
    pub fn drop_item(&mut self, id: ItemId, quantity: u32) -> Result<(), InventoryError> {
        self.remove(id, quantity).map(|_| ())
    }

    /// Quantity held across all partitions, 0 when absent
    pub fn quantity_of(&self, id: ItemId) -> u32 {
        self.entry(id).map_or(0, |entry| entry.quantity)
    }

    /// Stored instance for a definition id
    pub fn find(&self, id: ItemId) -> Option<&ItemInstance> {
        self.entry(id).map(|entry| &entry.item)
    }

    fn entry(&self, id: ItemId) -> Option<&StoredItem> {
        self.partitions.iter().find_map(|p| p.get(&id))
    }

    /// Entries sorted by display name, then definition id
    pub fn list(&self, filter: ListFilter) -> Vec<&StoredItem> {
        let mut items: Vec<&StoredItem> = match filter {
            ListFilter::All => self.iter().collect(),
            ListFilter::Category(cat) => self.partitions[cat.index()].values().collect(),
        };
        items.sort_by(|a, b| {
            a.item
                .name
                .cmp(&b.item.name)
                .then(a.item.definition_id.cmp(&b.item.definition_id))
        });
        items
    }

    /// All entries in partition order
    pub fn iter(&self) -> impl Iterator<Item = &StoredItem> {
        self.partitions.iter().flat_map(|p| p.values())
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.partitions.iter().map(BTreeMap::len).sum()
    }

    /// Whether nothing is stored
    pub fn is_empty(&self) -> bool {
        self.partitions.iter().all(BTreeMap::is_empty)
    }

    /// Sum of all quantities
    pub fn total_quantity(&self) -> u64 {
        self.iter().map(|entry| u64::from(entry.quantity)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{BaseStats, Durability, ItemKind, SlotType};

    fn make_item(id: u64, name: &str, kind: ItemKind) -> ItemInstance {
        ItemInstance {
            definition_id: ItemId(id),
            durability: Durability::full(kind.max_durability()),
            kind,
            base_name: name.to_string(),
            name: name.to_string(),
            enhancement_level: 0,
            prefix: None,
            suffix: None,
        }
    }

    fn make_sword(id: u64, name: &str) -> ItemInstance {
        make_item(
            id,
            name,
            ItemKind::Equipment {
                slot: SlotType::Weapon,
                base: BaseStats::default(),
                max_durability: 20,
            },
        )
    }

    fn make_potion(id: u64) -> ItemInstance {
        make_item(
            id,
            "Potion of Healing",
            ItemKind::Consumable {
                effect: "HEAL".to_string(),
                value: 30,
            },
        )
    }

    fn make_scroll(id: u64, name: &str) -> ItemInstance {
        make_item(
            id,
            name,
            ItemKind::Scroll {
                effect: "IDENTIFY".to_string(),
                value: 0,
            },
        )
    }

    #[test]
    fn test_new_store_empty() {
        let store = InventoryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert_eq!(store.quantity_of(ItemId(1)), 0);
        assert!(store.find(ItemId(1)).is_none());
    }

    #[test]
    fn test_add_stacks_by_definition() {
        let mut store = InventoryStore::new();
        store.add(make_potion(100), 3).unwrap();
        store.add(make_potion(100), 2).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.quantity_of(ItemId(100)), 5);
    }

    #[test]
    fn test_add_zero_rejected() {
        let mut store = InventoryStore::new();
        assert_eq!(
            store.add(make_potion(100), 0),
            Err(InventoryError::InvalidQuantity)
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_partial_and_all() {
        let mut store = InventoryStore::new();
        store.add(make_potion(100), 5).unwrap();
        let removed = store.remove(ItemId(100), 2).unwrap();
        assert_eq!(removed.definition_id, ItemId(100));
        assert_eq!(store.quantity_of(ItemId(100)), 3);
        store.remove(ItemId(100), 3).unwrap();
        assert!(store.is_empty());
        assert!(store.find(ItemId(100)).is_none());
    }

    #[test]
    fn test_remove_more_than_held() {
        let mut store = InventoryStore::new();
        store.add(make_potion(100), 2).unwrap();
        assert_eq!(
            store.remove(ItemId(100), 3),
            Err(InventoryError::InsufficientQuantity {
                id: ItemId(100),
                requested: 3,
                held: 2
            })
        );
        assert_eq!(store.quantity_of(ItemId(100)), 2);
    }

    #[test]
    fn test_remove_missing() {
        let mut store = InventoryStore::new();
        assert_eq!(
            store.remove(ItemId(5), 1),
            Err(InventoryError::ItemNotFound(ItemId(5)))
        );
    }

    #[test]
    fn test_lookup_scans_all_partitions() {
        let mut store = InventoryStore::new();
        store.add(make_sword(1, "Sword"), 1).unwrap();
        store.add(make_scroll(7, "Scroll of Identify"), 4).unwrap();
        assert_eq!(store.quantity_of(ItemId(7)), 4);
        assert_eq!(store.find(ItemId(1)).unwrap().name, "Sword");
        assert_eq!(store.total_quantity(), 5);
    }

    #[test]
    fn test_list_sorted_by_name_then_id() {
        let mut store = InventoryStore::new();
        store.add(make_sword(3, "Sword"), 1).unwrap();
        store.add(make_sword(2, "Axe"), 1).unwrap();
        store.add(make_sword(1, "Sword"), 1).unwrap();
        store.add(make_potion(100), 1).unwrap();

        let all: Vec<(String, u64)> = store
            .list(ListFilter::All)
            .iter()
            .map(|e| (e.item.name.clone(), e.item.definition_id.0))
            .collect();
        assert_eq!(
            all,
            vec![
                ("Axe".to_string(), 2),
                ("Potion of Healing".to_string(), 100),
                ("Sword".to_string(), 1),
                ("Sword".to_string(), 3),
            ]
        );

        let consumables = store.list(ListFilter::Category(ItemCategory::Consumable));
        assert_eq!(consumables.len(), 1);
        assert!(store
            .list(ListFilter::Category(ItemCategory::SkillBook))
            .is_empty());
    }

    #[test]
    fn test_drop_item() {
        let mut store = InventoryStore::new();
        store.add(make_potion(100), 2).unwrap();
        store.drop_item(ItemId(100), 1).unwrap();
        assert_eq!(store.quantity_of(ItemId(100)), 1);
    }
}
