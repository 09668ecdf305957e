//! Core domain: shared pause and collaborator-facing resources.

use bevy::prelude::*;
use std::collections::HashSet;

/// Resource tracking whether gameplay should be halted.
/// Gameplay is halted while any source holds a claim.
#[derive(Resource, Debug, Default)]
pub struct GameplayPaused {
    sources: HashSet<String>,
}

impl GameplayPaused {
    pub fn is_paused(&self) -> bool {
        !self.sources.is_empty()
    }

    pub fn pause(&mut self, source: impl Into<String>) {
        self.sources.insert(source.into());
    }

    pub fn unpause(&mut self, source: &str) {
        self.sources.remove(source);
    }
}

/// Mirror of the dialogue collaborator: true while a conversation owns input.
/// The core only reads this; the dialogue presenter owns writing it.
#[derive(Resource, Debug, Default)]
pub struct DialogueActive(pub bool);

/// Run condition: true only when neither a pause source nor dialogue is active.
pub fn gameplay_active(paused: Res<GameplayPaused>, dialogue: Res<DialogueActive>) -> bool {
    !paused.is_paused() && !dialogue.0
}
