//! Character aggregate
//!
//! A character owns its inventory, stats and progression. Every action that
//! changes equipment recalculates derived stats before returning.

use std::sync::Arc;

use delve_core::{EntityId, ItemId};
use parking_lot::Mutex;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::GameConfig;
use crate::enhance::{self, EnhanceReport};
use crate::error::{EnhanceError, InventoryError};
use crate::events::{EventSink, GameEvent, MessageKey, SoundCue};
use crate::inventory::{EquipResult, EquipSlot, Inventory, InventorySnapshot};
use crate::items::ItemInstance;
use crate::player::{CharacterStats, LevelUp, Progression};

/// A player character
#[derive(Debug, Clone)]
pub struct Character {
    pub id: EntityId,
    pub name: String,
    pub inventory: Inventory,
    pub stats: CharacterStats,
    pub progression: Progression,
    pub config: GameConfig,
}

impl Character {
    /// Level 1 character with default stats and an empty inventory
    pub fn new(name: impl Into<String>, config: GameConfig) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            inventory: Inventory::new(),
            stats: CharacterStats::default(),
            progression: Progression::new(&config.progression),
            config,
        }
    }

    pub fn level(&self) -> u32 {
        self.progression.level
    }

    /// Rebuild derived stats from the current equipment
    pub fn recalculate(&mut self) {
        self.stats.recalculate(&self.inventory.equipment);
    }

    pub fn equip(&mut self, id: ItemId) -> Result<EquipResult, InventoryError> {
        let result = self.inventory.equip(id)?;
        self.recalculate();
        Ok(result)
    }

    /// Move the item in `slot` back to the store. An `Unequipped` message
    /// goes to `sink` when something was removed.
    pub fn unequip(&mut self, slot: EquipSlot, sink: &mut dyn EventSink) -> Option<ItemInstance> {
        let item = self.inventory.unequip(slot)?;
        self.recalculate();
        sink.push(GameEvent::message(MessageKey::Unequipped, [item.name.as_str()]));
        Some(item)
    }

    /// Attempt to enhance the item in `slot`. Derived stats are recalculated
    /// whatever the outcome.
    pub fn enhance<R: Rng + ?Sized>(
        &mut self,
        slot: EquipSlot,
        rng: &mut R,
    ) -> Result<EnhanceReport, EnhanceError> {
        let result = enhance::attempt_enhance(&mut self.inventory.equipment, slot, rng);
        self.recalculate();
        result
    }

    /// Repair all equipment and refill HP, MP and stamina
    pub fn restore_all(&mut self) {
        self.inventory.equipment.restore_durability();
        self.recalculate();
        self.stats.restore_full();
        info!("{} fully restored", self.name);
    }

    /// Add experience, applying stat growth for each level gained. One
    /// level-up message and sound go to `sink` when any level was gained.
    pub fn gain_experience(&mut self, amount: u64, sink: &mut dyn EventSink) -> Vec<LevelUp> {
        let levels = self
            .progression
            .add_experience(amount, &self.config.progression);
        if levels.is_empty() {
            return levels;
        }

        for _ in &levels {
            self.stats.apply_growth(&self.config.growth);
        }
        self.recalculate();
        self.stats.refill_vitals();

        let level = self.progression.level;
        info!("{} reached level {}", self.name, level);
        sink.push(GameEvent::message(MessageKey::LevelUp, [level.to_string()]));
        sink.push(GameEvent::sound(SoundCue::LevelUp));
        levels
    }

    /// Award the experience for a defeated monster
    pub fn record_kill(&mut self, monster_exp: u64, sink: &mut dyn EventSink) -> Vec<LevelUp> {
        self.gain_experience(monster_exp, sink)
    }

    pub fn snapshot(&self) -> CharacterSnapshot {
        CharacterSnapshot {
            id: self.id,
            name: self.name.clone(),
            inventory: self.inventory.snapshot(),
            stats: self.stats.clone(),
            progression: self.progression.clone(),
        }
    }

    /// Rebuild a character from a snapshot, recalculating derived stats
    pub fn from_snapshot(
        snapshot: CharacterSnapshot,
        config: GameConfig,
    ) -> Result<Self, InventoryError> {
        let mut character = Self {
            id: snapshot.id,
            name: snapshot.name,
            inventory: Inventory::from_snapshot(snapshot.inventory)?,
            stats: snapshot.stats,
            progression: snapshot.progression,
            config,
        };
        character.recalculate();
        Ok(character)
    }
}

/// Persisted form of a `Character`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterSnapshot {
    pub id: EntityId,
    pub name: String,
    pub inventory: InventorySnapshot,
    pub stats: CharacterStats,
    pub progression: Progression,
}

/// Shared character with one exclusive section per action
#[derive(Debug, Clone)]
pub struct CharacterHandle(Arc<Mutex<Character>>);

impl CharacterHandle {
    pub fn new(character: Character) -> Self {
        Self(Arc::new(Mutex::new(character)))
    }

    /// Run one action with exclusive access to the character
    pub fn with_exclusive<T>(&self, action: impl FnOnce(&mut Character) -> T) -> T {
        let mut guard = self.0.lock();
        action(&mut guard)
    }

    pub fn snapshot(&self) -> CharacterSnapshot {
        self.0.lock().snapshot()
    }
}
