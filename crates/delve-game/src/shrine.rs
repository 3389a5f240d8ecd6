//! Shrine interaction
//!
//! A shrine offers one of two services, full restoration or an enhancement
//! attempt on a worn item, and is consumed once either has been performed.
//! Input arrives as discrete symbols; symbols with no meaning in the current
//! state are ignored.

use delve_core::EntityId;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::enhance::EnhanceReport;
use crate::error::EnhanceError;
use crate::events::{EventSink, GameEvent, MessageKey, SoundCue};
use crate::world::WorldDirectory;

/// Input symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShrineInput {
    Up,
    Down,
    Confirm,
    Cancel,
}

/// Main menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShrineChoice {
    Restore,
    Enhance,
}

/// Where the interaction is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShrineState {
    #[default]
    Idle,
    Menu {
        shrine: EntityId,
        choice: ShrineChoice,
    },
    /// Browsing worn items; `cursor` indexes the occupied slots in slot order
    SelectEquipment { shrine: EntityId, cursor: usize },
}

/// Terminal result of an interaction
#[derive(Debug, Clone, PartialEq)]
pub enum ShrineOutcome {
    Restored,
    Enhanced(EnhanceReport),
    /// The attempt was refused; the shrine is still consumed
    EnhanceRejected(EnhanceError),
    /// No acting character; the shrine is left in place
    Abandoned,
}

/// Drives one shrine interaction at a time
#[derive(Debug, Clone, Default)]
pub struct ShrineSession {
    state: ShrineState,
}

impl ShrineSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ShrineState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state != ShrineState::Idle
    }

    /// Start interacting with a shrine at its main menu
    pub fn open(&mut self, shrine: EntityId) {
        debug!("Opened shrine {}", shrine);
        self.state = ShrineState::Menu {
            shrine,
            choice: ShrineChoice::Restore,
        };
    }

    /// Feed one input symbol. Returns the outcome when a terminal action ran.
    pub fn handle_input<W, R>(
        &mut self,
        input: ShrineInput,
        world: &mut W,
        rng: &mut R,
        sink: &mut dyn EventSink,
    ) -> Option<ShrineOutcome>
    where
        W: WorldDirectory + ?Sized,
        R: Rng + ?Sized,
    {
        match self.state {
            ShrineState::Idle => None,
            ShrineState::Menu { shrine, choice } => match input {
                ShrineInput::Up => {
                    self.state = ShrineState::Menu {
                        shrine,
                        choice: ShrineChoice::Restore,
                    };
                    None
                }
                ShrineInput::Down => {
                    self.state = ShrineState::Menu {
                        shrine,
                        choice: ShrineChoice::Enhance,
                    };
                    None
                }
                ShrineInput::Confirm => match choice {
                    ShrineChoice::Restore => Some(self.restore(shrine, world, sink)),
                    ShrineChoice::Enhance => {
                        self.state = ShrineState::SelectEquipment { shrine, cursor: 0 };
                        None
                    }
                },
                ShrineInput::Cancel => None,
            },
            ShrineState::SelectEquipment { shrine, cursor } => {
                let Some(character) = world.acting_character_mut() else {
                    return Some(self.abandon());
                };
                let slots = character.inventory.equipment.occupied_slots();
                match input {
                    ShrineInput::Up => {
                        self.state = ShrineState::SelectEquipment {
                            shrine,
                            cursor: cursor.saturating_sub(1),
                        };
                        None
                    }
                    ShrineInput::Down => {
                        let last = slots.len().saturating_sub(1);
                        self.state = ShrineState::SelectEquipment {
                            shrine,
                            cursor: (cursor + 1).min(last),
                        };
                        None
                    }
                    ShrineInput::Confirm => {
                        let slot = *slots.get(cursor)?;
                        let item_name = character
                            .inventory
                            .equipment
                            .get(slot)
                            .map(|item| item.name.clone())
                            .unwrap_or_default();
                        let outcome = match character.enhance(slot, rng) {
                            Ok(report) => {
                                for event in &report.events {
                                    sink.push(event.clone());
                                }
                                ShrineOutcome::Enhanced(report)
                            }
                            Err(err) => {
                                warn!("Enhancement refused: {}", err);
                                if let EnhanceError::MaxLevelReached(_) = err {
                                    sink.push(GameEvent::message(
                                        MessageKey::EnhanceMaxLevel,
                                        [item_name],
                                    ));
                                }
                                ShrineOutcome::EnhanceRejected(err)
                            }
                        };
                        self.finish(shrine, world);
                        Some(outcome)
                    }
                    ShrineInput::Cancel => {
                        self.state = ShrineState::Menu {
                            shrine,
                            choice: ShrineChoice::Enhance,
                        };
                        None
                    }
                }
            }
        }
    }

    fn restore<W: WorldDirectory + ?Sized>(
        &mut self,
        shrine: EntityId,
        world: &mut W,
        sink: &mut dyn EventSink,
    ) -> ShrineOutcome {
        let Some(character) = world.acting_character_mut() else {
            return self.abandon();
        };
        character.restore_all();
        sink.push(GameEvent::bare(MessageKey::ShrineRestored));
        sink.push(GameEvent::sound(SoundCue::LevelUp));
        self.finish(shrine, world);
        ShrineOutcome::Restored
    }

    fn finish<W: WorldDirectory + ?Sized>(&mut self, shrine: EntityId, world: &mut W) {
        if !world.consume_object(shrine) {
            warn!("Shrine {} was already gone", shrine);
        }
        self.state = ShrineState::Idle;
    }

    fn abandon(&mut self) -> ShrineOutcome {
        debug!("No acting character, closing shrine");
        self.state = ShrineState::Idle;
        ShrineOutcome::Abandoned
    }
}
