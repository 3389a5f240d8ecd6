//! Equipment slots
//!
//! Nine fixed slots, each holding at most one instance. Rings have two
//! interchangeable slots.

use serde::{Deserialize, Serialize};

use crate::items::{ItemInstance, SlotType};

/// Concrete equipment slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipSlot {
    Helmet,
    Armor,
    Weapon,
    Shield,
    Gloves,
    Boots,
    Necklace,
    Ring1,
    Ring2,
}

impl EquipSlot {
    /// All slots in display order
    pub fn all() -> &'static [EquipSlot] {
        &[
            Self::Helmet,
            Self::Armor,
            Self::Weapon,
            Self::Shield,
            Self::Gloves,
            Self::Boots,
            Self::Necklace,
            Self::Ring1,
            Self::Ring2,
        ]
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Self::Helmet => "Helmet",
            Self::Armor => "Armor",
            Self::Weapon => "Weapon",
            Self::Shield => "Shield",
            Self::Gloves => "Gloves",
            Self::Boots => "Boots",
            Self::Necklace => "Necklace",
            Self::Ring1 => "Ring 1",
            Self::Ring2 => "Ring 2",
        }
    }

    /// The slot type this slot holds
    pub fn slot_type(self) -> SlotType {
        match self {
            Self::Helmet => SlotType::Helmet,
            Self::Armor => SlotType::Armor,
            Self::Weapon => SlotType::Weapon,
            Self::Shield => SlotType::Shield,
            Self::Gloves => SlotType::Gloves,
            Self::Boots => SlotType::Boots,
            Self::Necklace => SlotType::Necklace,
            Self::Ring1 | Self::Ring2 => SlotType::Ring,
        }
    }
}

/// Items currently worn
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EquipmentSlots {
    helmet: Option<ItemInstance>,
    armor: Option<ItemInstance>,
    weapon: Option<ItemInstance>,
    shield: Option<ItemInstance>,
    gloves: Option<ItemInstance>,
    boots: Option<ItemInstance>,
    necklace: Option<ItemInstance>,
    ring1: Option<ItemInstance>,
    ring2: Option<ItemInstance>,
}

impl EquipmentSlots {
    /// Create an empty equipment set
    pub fn new() -> Self {
        Self::default()
    }

    fn slot_ref(&self, slot: EquipSlot) -> &Option<ItemInstance> {
        match slot {
            EquipSlot::Helmet => &self.helmet,
            EquipSlot::Armor => &self.armor,
            EquipSlot::Weapon => &self.weapon,
            EquipSlot::Shield => &self.shield,
            EquipSlot::Gloves => &self.gloves,
            EquipSlot::Boots => &self.boots,
            EquipSlot::Necklace => &self.necklace,
            EquipSlot::Ring1 => &self.ring1,
            EquipSlot::Ring2 => &self.ring2,
        }
    }

    fn slot_mut(&mut self, slot: EquipSlot) -> &mut Option<ItemInstance> {
        match slot {
            EquipSlot::Helmet => &mut self.helmet,
            EquipSlot::Armor => &mut self.armor,
            EquipSlot::Weapon => &mut self.weapon,
            EquipSlot::Shield => &mut self.shield,
            EquipSlot::Gloves => &mut self.gloves,
            EquipSlot::Boots => &mut self.boots,
            EquipSlot::Necklace => &mut self.necklace,
            EquipSlot::Ring1 => &mut self.ring1,
            EquipSlot::Ring2 => &mut self.ring2,
        }
    }

    /// Item in a slot
    pub fn get(&self, slot: EquipSlot) -> Option<&ItemInstance> {
        self.slot_ref(slot).as_ref()
    }

    /// Mutable item in a slot
    pub fn get_mut(&mut self, slot: EquipSlot) -> Option<&mut ItemInstance> {
        self.slot_mut(slot).as_mut()
    }

    pub fn is_occupied(&self, slot: EquipSlot) -> bool {
        self.slot_ref(slot).is_some()
    }

    /// Slot an item of this type goes into. Rings take the first empty ring
    /// slot, or displace ring 1 when both are full.
    pub fn target_slot(&self, slot_type: SlotType) -> EquipSlot {
        match slot_type {
            SlotType::Helmet => EquipSlot::Helmet,
            SlotType::Armor => EquipSlot::Armor,
            SlotType::Weapon => EquipSlot::Weapon,
            SlotType::Shield => EquipSlot::Shield,
            SlotType::Gloves => EquipSlot::Gloves,
            SlotType::Boots => EquipSlot::Boots,
            SlotType::Necklace => EquipSlot::Necklace,
            SlotType::Ring => {
                if self.ring1.is_none() {
                    EquipSlot::Ring1
                } else if self.ring2.is_none() {
                    EquipSlot::Ring2
                } else {
                    EquipSlot::Ring1
                }
            }
        }
    }

    /// Put an item into an empty slot
    pub(crate) fn place(&mut self, slot: EquipSlot, item: ItemInstance) {
        let target = self.slot_mut(slot);
        debug_assert!(
            target.is_none(),
            "{} already holds an item; it must be taken out first",
            slot.name()
        );
        *target = Some(item);
    }

    /// Take the item out of a slot
    pub(crate) fn take(&mut self, slot: EquipSlot) -> Option<ItemInstance> {
        self.slot_mut(slot).take()
    }

    /// Occupied slots with their items, in slot order
    pub fn iter_equipped(&self) -> impl Iterator<Item = (EquipSlot, &ItemInstance)> {
        EquipSlot::all()
            .iter()
            .filter_map(move |&slot| self.get(slot).map(|item| (slot, item)))
    }

    /// Occupied slots, in slot order
    pub fn occupied_slots(&self) -> Vec<EquipSlot> {
        self.iter_equipped().map(|(slot, _)| slot).collect()
    }

    pub fn equipped_count(&self) -> usize {
        self.iter_equipped().count()
    }

    /// Bring every equipped item back to full durability
    pub fn restore_durability(&mut self) {
        for &slot in EquipSlot::all() {
            if let Some(item) = self.get_mut(slot) {
                item.durability.restore();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{BaseStats, Durability, ItemKind};
    use delve_core::ItemId;

    fn make_gear(id: u64, slot: SlotType) -> ItemInstance {
        ItemInstance {
            definition_id: ItemId(id),
            kind: ItemKind::Equipment {
                slot,
                base: BaseStats::default(),
                max_durability: 30,
            },
            base_name: format!("Gear {}", id),
            name: format!("Gear {}", id),
            durability: Durability { current: 5, max: 30 },
            enhancement_level: 0,
            prefix: None,
            suffix: None,
        }
    }

    #[test]
    fn test_slot_count() {
        assert_eq!(EquipSlot::all().len(), 9);
    }

    #[test]
    fn test_target_slot_fixed_types() {
        let set = EquipmentSlots::new();
        assert_eq!(set.target_slot(SlotType::Weapon), EquipSlot::Weapon);
        assert_eq!(set.target_slot(SlotType::Necklace), EquipSlot::Necklace);
        for &slot in EquipSlot::all() {
            if slot != EquipSlot::Ring2 {
                assert_eq!(set.target_slot(slot.slot_type()), slot);
            }
        }
    }

    #[test]
    fn test_ring_slot_selection() {
        let mut set = EquipmentSlots::new();
        assert_eq!(set.target_slot(SlotType::Ring), EquipSlot::Ring1);
        set.place(EquipSlot::Ring1, make_gear(1, SlotType::Ring));
        assert_eq!(set.target_slot(SlotType::Ring), EquipSlot::Ring2);
        set.place(EquipSlot::Ring2, make_gear(2, SlotType::Ring));
        assert_eq!(set.target_slot(SlotType::Ring), EquipSlot::Ring1);
    }

    #[test]
    fn test_ring2_filled_first_then_ring1() {
        let mut set = EquipmentSlots::new();
        set.place(EquipSlot::Ring2, make_gear(2, SlotType::Ring));
        assert_eq!(set.target_slot(SlotType::Ring), EquipSlot::Ring1);
    }

    #[test]
    fn test_place_and_take() {
        let mut set = EquipmentSlots::new();
        set.place(EquipSlot::Helmet, make_gear(3, SlotType::Helmet));
        assert!(set.is_occupied(EquipSlot::Helmet));
        let taken = set.take(EquipSlot::Helmet).unwrap();
        assert_eq!(taken.definition_id, ItemId(3));
        assert!(!set.is_occupied(EquipSlot::Helmet));
        assert!(set.take(EquipSlot::Helmet).is_none());
    }

    #[test]
    fn test_iter_equipped_in_slot_order() {
        let mut set = EquipmentSlots::new();
        set.place(EquipSlot::Ring2, make_gear(9, SlotType::Ring));
        set.place(EquipSlot::Helmet, make_gear(1, SlotType::Helmet));
        set.place(EquipSlot::Weapon, make_gear(2, SlotType::Weapon));
        assert_eq!(
            set.occupied_slots(),
            vec![EquipSlot::Helmet, EquipSlot::Weapon, EquipSlot::Ring2]
        );
        assert_eq!(set.equipped_count(), 3);
    }

    #[test]
    fn test_restore_durability() {
        let mut set = EquipmentSlots::new();
        set.place(EquipSlot::Boots, make_gear(4, SlotType::Boots));
        set.restore_durability();
        assert_eq!(set.get(EquipSlot::Boots).unwrap().durability.current, 30);
    }
}
