//! World directory
//!
//! The slice of the world the core needs: the acting character and removal
//! of consumed objects.

use std::collections::HashMap;

use delve_core::EntityId;
use tracing::{debug, info};

use crate::character::Character;

/// Lookup and removal of world objects
pub trait WorldDirectory {
    /// The character performing the current action, if any
    fn acting_character_mut(&mut self) -> Option<&mut Character>;

    /// Permanently remove a consumed object. Returns false when no such
    /// object exists.
    fn consume_object(&mut self, id: EntityId) -> bool;
}

/// A one-time-use shrine
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Shrine {
    pub used: bool,
}

/// Single-player world: one character plus the shrines on the floor
#[derive(Debug, Default)]
pub struct SoloWorld {
    pub player: Option<Character>,
    shrines: HashMap<EntityId, Shrine>,
}

impl SoloWorld {
    pub fn new(player: Character) -> Self {
        Self {
            player: Some(player),
            shrines: HashMap::new(),
        }
    }

    /// Place a fresh shrine and return its id
    pub fn spawn_shrine(&mut self) -> EntityId {
        let id = EntityId::new();
        self.shrines.insert(id, Shrine::default());
        debug!("Spawned shrine {}", id);
        id
    }

    pub fn shrine(&self, id: EntityId) -> Option<&Shrine> {
        self.shrines.get(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.shrines.contains_key(&id)
    }

    pub fn shrine_count(&self) -> usize {
        self.shrines.len()
    }
}

impl WorldDirectory for SoloWorld {
    fn acting_character_mut(&mut self) -> Option<&mut Character> {
        self.player.as_mut()
    }

    fn consume_object(&mut self, id: EntityId) -> bool {
        match self.shrines.get_mut(&id) {
            Some(shrine) => {
                shrine.used = true;
                self.shrines.remove(&id);
                info!("Shrine {} consumed", id);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    #[test]
    fn test_spawn_and_consume() {
        let mut world = SoloWorld::new(Character::new("Hero", GameConfig::default()));
        let a = world.spawn_shrine();
        let b = world.spawn_shrine();
        assert_eq!(world.shrine_count(), 2);
        assert_eq!(world.shrine(a), Some(&Shrine { used: false }));

        assert!(world.consume_object(a));
        assert!(!world.contains(a));
        assert!(world.contains(b));
        assert!(!world.consume_object(a));
    }

    #[test]
    fn test_acting_character() {
        let mut world = SoloWorld::default();
        assert!(world.acting_character_mut().is_none());
        world.player = Some(Character::new("Hero", GameConfig::default()));
        assert_eq!(world.acting_character_mut().unwrap().name, "Hero");
    }
}
