//! Speaker resolution
//!
//! Speaker ids in the dialogue table map to actor slots; the host's actor
//! directory turns a slot into the object that speech is played from.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use super::audio::PlaybackTarget;

/// Actors that can voice dialogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActorSlot {
    Player,
    Iris,
    SecurityDroid1,
    SecurityDroid2,
}

impl ActorSlot {
    pub const ALL: [ActorSlot; 4] = [
        ActorSlot::Player,
        ActorSlot::Iris,
        ActorSlot::SecurityDroid1,
        ActorSlot::SecurityDroid2,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ActorSlot::Player => "player",
            ActorSlot::Iris => "iris",
            ActorSlot::SecurityDroid1 => "security_droid_1",
            ActorSlot::SecurityDroid2 => "security_droid_2",
        }
    }
}

impl fmt::Display for ActorSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ActorSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ActorSlot::ALL
            .into_iter()
            .find(|slot| slot.name() == wanted)
            .ok_or_else(|| format!("unknown actor slot '{}'", s.trim()))
    }
}

/// Host lookup from actor slot to playback target
pub trait ActorDirectory: Send + Sync {
    /// Whether the directory itself has finished loading
    fn is_ready(&self) -> bool {
        true
    }

    /// Target for `slot`, `None` while the actor does not exist yet
    fn target(&self, slot: ActorSlot) -> Option<PlaybackTarget>;
}

/// Maps speaker ids to actor slots
#[derive(Debug, Clone, Default)]
pub struct SpeakerTable {
    slots: HashMap<String, ActorSlot>,
}

impl SpeakerTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with the speakers of the shipped dialogue
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        table.insert("Seru", ActorSlot::Player);
        table.insert("Unknown", ActorSlot::Player);
        table.insert("The Core", ActorSlot::Player);
        table.insert("Iris", ActorSlot::Iris);
        table.insert("Security Droid 1", ActorSlot::SecurityDroid1);
        table.insert("Security Droid 2", ActorSlot::SecurityDroid2);
        table
    }

    /// Add or replace a speaker mapping
    pub fn insert(&mut self, speaker: &str, slot: ActorSlot) {
        self.slots.insert(speaker.to_string(), slot);
    }

    /// Slot voicing `speaker`
    pub fn slot(&self, speaker: &str) -> Option<ActorSlot> {
        self.slots.get(speaker).copied()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
