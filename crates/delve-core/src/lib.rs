//! Delve Core - Shared types for the Delve crates
//!
//! This crate provides the identifier types used throughout the game:
//! - Entity identifiers for world objects (characters, shrines)
//! - Item definition identifiers

pub mod types;

pub use types::{EntityId, ItemId};
