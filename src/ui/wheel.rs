//! UI domain: the transformation select wheel receiver.

use bevy::prelude::*;

use crate::audio::CueRequest;
use crate::input::{Action, ActionBinding, ActionContext, ActionMap, KeyActionReceiver};
use crate::lockout::LockoutCharges;
use crate::player::{TransformRequest, Transformation};

/// Receiver for the Wheel action map; records the picked form.
#[derive(Component, Debug, Default)]
pub struct WheelReceiver {
    pub selected: Option<Transformation>,
}

fn on_select_terry(receiver: &mut WheelReceiver, ctx: &ActionContext) {
    if ctx.pressed {
        receiver.selected = Some(Transformation::Terry);
    }
}

fn on_select_frog(receiver: &mut WheelReceiver, ctx: &ActionContext) {
    if ctx.pressed {
        receiver.selected = Some(Transformation::Frog);
    }
}

fn on_select_bulldozer(receiver: &mut WheelReceiver, ctx: &ActionContext) {
    if ctx.pressed {
        receiver.selected = Some(Transformation::Bulldozer);
    }
}

fn on_select_ball(receiver: &mut WheelReceiver, ctx: &ActionContext) {
    if ctx.pressed {
        receiver.selected = Some(Transformation::Ball);
    }
}

impl KeyActionReceiver for WheelReceiver {
    const MAP: ActionMap = ActionMap::Wheel;

    fn bindings() -> &'static [ActionBinding<Self>] {
        &[
            (Action::SelectTerry, on_select_terry),
            (Action::SelectFrog, on_select_frog),
            (Action::SelectBulldozer, on_select_bulldozer),
            (Action::SelectBall, on_select_ball),
        ]
    }
}

pub(crate) fn spawn_wheel(mut commands: Commands) {
    commands.spawn((WheelReceiver::default(), Name::new("TransformWheel")));
}

/// A selection only becomes a transform request when the lockout model
/// still allows that form.
pub(crate) fn apply_wheel_selection(
    charges: Res<LockoutCharges>,
    mut audio: MessageWriter<CueRequest>,
    mut requests: MessageWriter<TransformRequest>,
    mut wheels: Query<&mut WheelReceiver>,
) {
    for mut wheel in &mut wheels {
        let Some(target) = wheel.selected.take() else {
            continue;
        };

        if charges.is_selectable(target) {
            requests.write(TransformRequest { target });
        } else {
            info!("[WHEEL] {} is locked out", target.display_name());
            audio.write(CueRequest {
                id: "select_locked",
            });
        }
    }
}
