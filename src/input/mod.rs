//! Input domain: action routing plugin wiring and public exports.

mod actions;
mod bindings;
mod receiver;
mod registry;
mod router;
mod systems;

#[cfg(test)]
mod tests;

pub use actions::{Action, ActionContext, ActionMap};
pub use bindings::{BindingError, BindingPath, BindingTable, DeviceClass};
pub use receiver::{ActionBinding, KeyActionReceiver, ReceiverAppExt, ReceiverRoster};
pub use registry::{ActionRegistry, RoutedAction};
pub use router::InputRouter;

use bevy::prelude::*;

use crate::core::GameState;

/// Frame phases for the input pipeline. Chained, so every routed action is
/// fanned out to its receivers before the apply phase of the same frame.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSet {
    /// Roster maintenance and dispatcher (un)registration
    Track,
    /// Device sampling into the router and registry
    Sample,
    /// Per-kind fan-out to live receivers
    FanOut,
    /// Receivers' recorded intent applied to game state
    Apply,
}

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActionRegistry>()
            .init_resource::<InputRouter>()
            .configure_sets(
                Update,
                (
                    InputSet::Track,
                    InputSet::Sample,
                    InputSet::FanOut,
                    InputSet::Apply,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                systems::sample_devices
                    .in_set(InputSet::Sample)
                    .run_if(not(in_state(GameState::Boot))),
            );
    }
}
