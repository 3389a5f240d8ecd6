//! Delve - headless dungeon crawler driver
//!
//! Runs the balance simulations and reads and writes character saves.

mod save;
mod settings;
mod sim;

use anyhow::{Context, Result};
use delve_game::items::starter;
use delve_game::{Character, EquipSlot, GameConfig, GameEvent, ListFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

use settings::GameSettings;

const USAGE: &str = "usage: delve <level | shrine [iterations] | save <slot> | load <slot>>";

fn main() -> Result<()> {
    let loaded = GameSettings::load();
    let settings = match &loaded {
        Ok(Some(settings)) => settings.clone(),
        _ => GameSettings::default(),
    };

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(settings.tracing_level())
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    match loaded {
        Ok(Some(_)) => info!("Loaded settings"),
        Ok(None) => {
            info!("No settings file found, using defaults");
            if let Err(e) = settings.save() {
                warn!("Could not write default settings: {:#}", e);
            }
        }
        Err(e) => warn!("{:#}, using defaults", e),
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = args.first().map(String::as_str);
    match command {
        Some("level") => {
            let report = sim::run_level_simulation(&settings.game_config(), &settings.simulation);
            for (floor, level) in &report.arrivals {
                info!("Floor {:>2}: level {}", floor, level);
            }
            info!(
                "Final level {} after {} exp",
                report.final_level, report.total_exp
            );
        }
        Some("shrine") => {
            let mut sim_settings = settings.simulation.clone();
            if let Some(count) = args.get(1) {
                sim_settings.shrine_iterations = count
                    .parse()
                    .with_context(|| format!("Invalid iteration count '{}'", count))?;
            }
            let mut rng = make_rng(&settings);
            info!(
                "Simulating {} weapons (durability {})",
                sim_settings.shrine_iterations, sim_settings.shrine_durability
            );
            sim::run_shrine_simulation(&sim_settings, &mut rng)?.log();
        }
        Some("save") => {
            let slot = args.get(1).context(USAGE)?;
            let hero = demo_character(settings.game_config())?;
            save::save_to_slot(slot, &save::SaveData::new(slot, &hero))?;
        }
        Some("load") => {
            let slot = args.get(1).context(USAGE)?;
            let data = save::load_from_slot(slot)?;
            info!("Slot '{}' written {}", data.slot_name, data.timestamp);
            let hero = data.into_character(settings.game_config())?;
            log_character(&hero);
        }
        _ => info!("{}", USAGE),
    }

    Ok(())
}

fn make_rng(settings: &GameSettings) -> StdRng {
    match settings.rng_seed {
        Some(seed) => {
            info!("Using RNG seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    }
}

/// A level 3 character wearing the starter kit
fn demo_character(config: GameConfig) -> Result<Character> {
    let catalog = starter::starter_catalog();
    let mut hero = Character::new("Delver", config);
    for (item, quantity) in starter::create_starter_kit(&catalog)? {
        hero.inventory.store.add(item, quantity)?;
    }
    let mut events: Vec<GameEvent> = Vec::new();
    for id in [
        starter::SHORT_SWORD,
        starter::LEATHER_ARMOR,
        starter::LEATHER_CAP,
        starter::COPPER_RING,
    ] {
        events.push(hero.equip(id)?.confirmation());
    }
    hero.gain_experience(250, &mut events);
    for event in &events {
        info!("{:?}", event);
    }
    Ok(hero)
}

fn log_character(hero: &Character) {
    info!(
        "{} level {} ({} / {} exp), HP {}/{}, MP {}/{}",
        hero.name,
        hero.level(),
        hero.progression.exp,
        hero.progression.exp_to_next,
        hero.stats.current_hp,
        hero.stats.max_hp(),
        hero.stats.current_mp,
        hero.stats.max_mp()
    );
    for &slot in EquipSlot::all() {
        if let Some(item) = hero.inventory.equipment.get(slot) {
            info!(
                "  {:<8} {} ({}/{})",
                slot.name(),
                item.name,
                item.durability.current,
                item.durability.max
            );
        }
    }
    for entry in hero.inventory.store.list(ListFilter::All) {
        info!("  {} x{}", entry.item.name, entry.quantity);
    }
}
