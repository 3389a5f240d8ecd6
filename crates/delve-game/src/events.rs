//! Game events
//!
//! Structured notifications produced by the core. Text formatting and audio
//! playback belong to whoever drains the sink.

use serde::{Deserialize, Serialize};

/// Identifier of a narrative message template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageKey {
    /// HP, MP, stamina and equipment durability restored
    ShrineRestored,
    /// Args: new item name, new level
    EnhanceSucceeded,
    /// Args: item name, remaining durability
    EnhanceDurabilityLost,
    /// Args: item name
    EnhanceBroken,
    /// Args: item name
    EnhanceShattered,
    /// Args: item name
    EnhanceMaxLevel,
    /// Args: new level
    LevelUp,
    /// Args: item name
    Equipped,
    /// Args: item name
    Unequipped,
}

/// Sound cue identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    LevelUp,
    Break,
}

/// A notification for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Message { key: MessageKey, args: Vec<String> },
    Sound(SoundCue),
}

impl GameEvent {
    /// Message with interpolation arguments
    pub fn message<I, S>(key: MessageKey, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Message {
            key,
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Message without arguments
    pub fn bare(key: MessageKey) -> Self {
        Self::Message {
            key,
            args: Vec::new(),
        }
    }

    pub fn sound(cue: SoundCue) -> Self {
        Self::Sound(cue)
    }

    /// Message key, if this is a message
    pub fn key(&self) -> Option<MessageKey> {
        match self {
            Self::Message { key, .. } => Some(*key),
            Self::Sound(_) => None,
        }
    }
}

/// Receiver of game events
pub trait EventSink {
    fn push(&mut self, event: GameEvent);

    fn extend_events<I: IntoIterator<Item = GameEvent>>(&mut self, events: I)
    where
        Self: Sized,
    {
        for event in events {
            self.push(event);
        }
    }
}

impl EventSink for Vec<GameEvent> {
    fn push(&mut self, event: GameEvent) {
        Vec::push(self, event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_args() {
        let event = GameEvent::message(MessageKey::LevelUp, [7.to_string()]);
        assert_eq!(
            event,
            GameEvent::Message {
                key: MessageKey::LevelUp,
                args: vec!["7".to_string()],
            }
        );
        assert_eq!(event.key(), Some(MessageKey::LevelUp));
        assert_eq!(GameEvent::sound(SoundCue::Break).key(), None);
    }

    #[test]
    fn test_vec_sink() {
        let mut sink: Vec<GameEvent> = Vec::new();
        EventSink::push(&mut sink, GameEvent::bare(MessageKey::ShrineRestored));
        sink.extend_events([GameEvent::sound(SoundCue::LevelUp)]);
        assert_eq!(sink.len(), 2);
    }
}
