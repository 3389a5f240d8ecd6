//! Save/load system with named save slots
//!
//! Persists a character snapshot (inventory, equipment, stats, progression)
//! to JSON files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use delve_game::{Character, CharacterSnapshot, GameConfig};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Current save format version
pub const SAVE_VERSION: u32 = 1;

/// Top-level save data structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveData {
    /// Save format version (for future migration)
    pub version: u32,
    /// When the save was written
    pub timestamp: DateTime<Utc>,
    /// Name of the save slot
    #[serde(default)]
    pub slot_name: String,
    pub character: CharacterSnapshot,
}

impl SaveData {
    pub fn new(slot_name: &str, character: &Character) -> Self {
        Self {
            version: SAVE_VERSION,
            timestamp: Utc::now(),
            slot_name: slot_name.to_string(),
            character: character.snapshot(),
        }
    }

    /// Rebuild the saved character under the given rules
    pub fn into_character(self, config: GameConfig) -> Result<Character> {
        if self.version > SAVE_VERSION {
            anyhow::bail!(
                "Save version {} is newer than supported version {}",
                self.version,
                SAVE_VERSION
            );
        }
        Character::from_snapshot(self.character, config).context("Invalid character snapshot")
    }
}

/// Get the save directory path, creating it if it doesn't exist
fn save_dir() -> Result<PathBuf> {
    let dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("delve")
        .join("saves");
    fs::create_dir_all(&dir).context("Failed to create save directory")?;
    Ok(dir)
}

/// Get the path for a named save slot
fn slot_path(slot_name: &str) -> Result<PathBuf> {
    Ok(save_dir()?.join(format!("{}.json", sanitize_filename(slot_name))))
}

/// Sanitize a slot name into a valid filename
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Save to a named slot
pub fn save_to_slot(slot_name: &str, data: &SaveData) -> Result<PathBuf> {
    let path = slot_path(slot_name)?;
    write_save(&path, data)?;
    info!("Saved {} to {:?}", data.character.name, path);
    Ok(path)
}

/// Load from a named slot
pub fn load_from_slot(slot_name: &str) -> Result<SaveData> {
    let path = slot_path(slot_name)?;
    read_save(&path).with_context(|| format!("Failed to load slot '{}'", slot_name))
}

// --- Internal helpers ---

fn write_save(path: &Path, data: &SaveData) -> Result<()> {
    let json = serde_json::to_string_pretty(data).context("Failed to serialize save data")?;
    fs::write(path, json).context("Failed to write save file")?;
    Ok(())
}

fn read_save(path: &Path) -> Result<SaveData> {
    let json = fs::read_to_string(path).context("Failed to read save file")?;
    let data: SaveData = serde_json::from_str(&json).context("Failed to deserialize save data")?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_game::items::starter;
    use delve_game::EquipSlot;

    fn test_character() -> Character {
        let catalog = starter::starter_catalog();
        let mut hero = Character::new("TestPlayer", GameConfig::default());
        for (item, qty) in starter::create_starter_kit(&catalog).unwrap() {
            hero.inventory.store.add(item, qty).unwrap();
        }
        hero.equip(starter::SHORT_SWORD).unwrap();
        hero
    }

    #[test]
    fn test_round_trip_serialize() {
        let hero = test_character();
        let data = SaveData::new("Slot 1", &hero);
        let json = serde_json::to_string(&data).unwrap();
        let loaded: SaveData = serde_json::from_str(&json).unwrap();

        assert_eq!(loaded.version, SAVE_VERSION);
        assert_eq!(loaded.timestamp, data.timestamp);
        assert_eq!(loaded.slot_name, "Slot 1");
        let restored = loaded.into_character(GameConfig::default()).unwrap();
        assert_eq!(restored.inventory, hero.inventory);
        assert_eq!(restored.stats, hero.stats);
        assert!(restored.inventory.equipment.is_occupied(EquipSlot::Weapon));
    }

    #[test]
    fn test_write_and_read_file() {
        let hero = test_character();
        let data = SaveData::new("file-test", &hero);
        let path = std::env::temp_dir().join(format!("delve-save-{}.json", hero.id));

        write_save(&path, &data).unwrap();
        let loaded = read_save(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(loaded.character.inventory, data.character.inventory);
        assert_eq!(loaded.character.progression, data.character.progression);
    }

    #[test]
    fn test_newer_version_rejected() {
        let mut data = SaveData::new("future", &test_character());
        data.version = SAVE_VERSION + 1;
        assert!(data.into_character(GameConfig::default()).is_err());
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("My Save!"), "my_save_");
        assert_eq!(sanitize_filename("save-01_test"), "save-01_test");
        assert_eq!(sanitize_filename("a b c"), "a_b_c");
    }
}
