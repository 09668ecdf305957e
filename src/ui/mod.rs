//! UI domain: HUD, pause overlay, and wheel plugin wiring.

mod hud_charges;
mod pause;
mod wheel;

pub use wheel::WheelReceiver;

use bevy::prelude::*;

use crate::core::GameState;
use crate::input::{InputSet, ReceiverAppExt};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_key_action_receiver::<WheelReceiver>()
            .add_systems(
                Startup,
                (wheel::spawn_wheel, hud_charges::spawn_charge_hud),
            )
            .add_systems(
                Update,
                wheel::apply_wheel_selection
                    .in_set(InputSet::Apply)
                    .before(crate::player::apply_transform_requests)
                    .run_if(in_state(GameState::InGame)),
            )
            .add_systems(
                Update,
                (
                    hud_charges::update_charge_pips,
                    hud_charges::update_terry_lock_indicator,
                ),
            )
            .add_systems(OnEnter(GameState::Paused), pause::spawn_pause_overlay)
            .add_systems(OnExit(GameState::Paused), pause::despawn_pause_overlay);
    }
}
