//! Core domain: session flow, pause toggling, and the follow camera.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::core::resources::GameplayPaused;
use crate::core::state::GameState;
use crate::input::{
    Action, ActionBinding, ActionContext, ActionMap, InputRouter, KeyActionReceiver,
};
use crate::player::Player;

pub(crate) const PAUSE_SOURCE: &str = "pause-menu";

/// Receiver for the Game action map. Handlers record intent; the apply
/// phase consumes it.
#[derive(Component, Debug, Default)]
pub struct GameReceiver {
    pub pause_requested: bool,
}

fn on_pause(receiver: &mut GameReceiver, ctx: &ActionContext) {
    if ctx.pressed {
        receiver.pause_requested = true;
    }
}

impl KeyActionReceiver for GameReceiver {
    const MAP: ActionMap = ActionMap::Game;

    fn bindings() -> &'static [ActionBinding<Self>] {
        &[(Action::Pause, on_pause)]
    }
}

pub(crate) fn spawn_game_receiver(mut commands: Commands) {
    commands.spawn((GameReceiver::default(), Name::new("GameController")));
}

/// Boot is a single content-load frame; flip into gameplay right after.
pub(crate) fn finish_boot(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::InGame);
}

/// Pause closes the router's listening gate, so while paused only
/// core-tagged actions (Pause itself among them) still arrive here.
pub(crate) fn apply_pause_toggle(
    mut receivers: Query<&mut GameReceiver>,
    state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
    mut router: ResMut<InputRouter>,
    mut paused: ResMut<GameplayPaused>,
    mut physics_time: ResMut<Time<Physics>>,
) {
    for mut receiver in &mut receivers {
        if !receiver.pause_requested {
            continue;
        }
        receiver.pause_requested = false;

        match state.get() {
            GameState::InGame => {
                next_state.set(GameState::Paused);
                router.set_listening(false);
                paused.pause(PAUSE_SOURCE);
                physics_time.pause();
                info!("[PAUSE] paused");
            }
            GameState::Paused => {
                next_state.set(GameState::InGame);
                router.set_listening(true);
                paused.unpause(PAUSE_SOURCE);
                physics_time.unpause();
                info!("[PAUSE] resumed");
            }
            GameState::Boot => {}
        }
    }
}

/// Fixed-yaw 2.5D chase camera; movement resolves its intent against this
/// camera's yaw.
#[derive(Component, Debug)]
pub struct MainCamera;

const CAMERA_OFFSET: Vec3 = Vec3::new(0.0, 10.0, 12.0);
const CAMERA_LERP: f32 = 5.0;

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn((
        MainCamera,
        Camera3d::default(),
        Transform::from_translation(CAMERA_OFFSET).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

pub(crate) fn follow_player(
    time: Res<Time>,
    players: Query<&Transform, (With<Player>, Without<MainCamera>)>,
    mut cameras: Query<&mut Transform, With<MainCamera>>,
) {
    let Ok(player) = players.single() else {
        return;
    };

    for mut camera in &mut cameras {
        let target = player.translation + CAMERA_OFFSET;
        let t = (CAMERA_LERP * time.delta_secs()).min(1.0);
        camera.translation = camera.translation.lerp(target, t);
    }
}
