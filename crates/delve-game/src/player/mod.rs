//! Player stats and progression

pub mod progression;
pub mod stats;

pub use progression::{LevelUp, Progression};
pub use stats::{BaseAttributes, CharacterStats, DerivedStats, StatGrowth};
