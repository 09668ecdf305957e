//! Core domain: game state definitions for the session flow.

use bevy::prelude::*;

#[derive(States, Debug, Hash, Eq, PartialEq, Clone, Default)]
pub enum GameState {
    /// Loading content and spawning the world
    #[default]
    Boot,
    /// Active gameplay
    InGame,
    /// Pause overlay; only core-tagged actions pass the input gate
    Paused,
}
