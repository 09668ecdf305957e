//! Core domain: session flow wiring and shared services.

mod resources;
mod sequence;
mod state;
mod systems;


pub use resources::{DialogueActive, GameplayPaused, gameplay_active};
pub use sequence::{ActiveGates, GateEffect, GateFinished, TimedGate};
pub use state::GameState;
pub use systems::{GameReceiver, MainCamera};

use bevy::prelude::*;

use crate::input::{InputSet, ReceiverAppExt};

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<GameplayPaused>()
            .init_resource::<DialogueActive>()
            .init_resource::<ActiveGates>()
            .add_message::<GateFinished>()
            .add_key_action_receiver::<GameReceiver>()
            .add_systems(
                Startup,
                (systems::setup_camera, systems::spawn_game_receiver),
            )
            .add_systems(
                Update,
                systems::finish_boot.run_if(in_state(GameState::Boot)),
            )
            .add_systems(Update, systems::apply_pause_toggle.in_set(InputSet::Apply))
            .add_systems(
                Update,
                (sequence::activate_gates, sequence::tick_gates)
                    .chain()
                    .run_if(in_state(GameState::InGame)),
            )
            // Release runs unconditionally so cancellation restores state
            // even when the gate died outside active gameplay.
            .add_systems(Update, sequence::release_dropped_gates)
            .add_systems(
                Update,
                systems::follow_player.run_if(in_state(GameState::InGame)),
            );
    }
}
