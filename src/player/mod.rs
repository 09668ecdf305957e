//! Player domain: actor plugin wiring and public exports.

mod components;
mod movement;
mod save;
mod spawn;
mod transformation;

#[cfg(test)]
mod tests;

pub use components::{Facing, GameLayer, Player, PlayerReceiver, PlayerState};
pub use movement::MovementConfig;
pub use save::SaveSnapshot;
pub use spawn::PlayerHandle;
pub use transformation::{
    FormBinding, FormRig, SwapOutcome, TransformCue, TransformRequest, Transformation,
};

pub(crate) use spawn::PLAYER_BASE_MASS;
pub(crate) use transformation::apply_transform_requests;

use bevy::prelude::*;

use crate::core::{GameState, gameplay_active};
use crate::input::{InputSet, ReceiverAppExt};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementConfig>()
            .init_resource::<PlayerHandle>()
            .add_message::<TransformRequest>()
            .add_message::<TransformCue>()
            .add_key_action_receiver::<PlayerReceiver>()
            .add_systems(OnEnter(GameState::InGame), spawn::spawn_player)
            .add_systems(
                Update,
                (
                    movement::tick_player_timers,
                    movement::update_movement_intent.in_set(InputSet::Apply),
                    transformation::apply_transform_requests
                        .in_set(InputSet::Apply)
                        .after(movement::update_movement_intent),
                )
                    .run_if(in_state(GameState::InGame)),
            )
            .add_systems(Update, spawn::reconcile_duplicate_players)
            .add_systems(
                FixedUpdate,
                (movement::poll_grounded, movement::apply_planar_movement)
                    .chain()
                    .run_if(in_state(GameState::InGame).and(gameplay_active)),
            );

        #[cfg(feature = "dev-tools")]
        app.add_systems(Update, debug_log_transformation);
    }
}

#[cfg(feature = "dev-tools")]
fn debug_log_transformation(players: Query<&FormRig, Changed<FormRig>>) {
    for rig in &players {
        debug!(
            "[PLAYER] form={:?} previous={:?}",
            rig.current(),
            rig.previous()
        );
    }
}
