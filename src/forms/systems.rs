//! Forms domain: ability dispatch and per-kit upkeep systems.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::audio::CueRequest;
use crate::forms::{AbilityContext, FormKit};
use crate::player::{
    FormRig, GameLayer, PLAYER_BASE_MASS, Player, PlayerReceiver, PlayerState, Transformation,
};
use crate::world::{HookTarget, select_hook_target};

const HOOK_RANGE: f32 = 8.0;

/// Forwards pending ability presses to the active kit. The hook target is
/// resolved up front from the anim facing so kits stay world-query free.
pub(crate) fn apply_form_abilities(
    mut audio: MessageWriter<CueRequest>,
    hook_targets: Query<(Entity, &GlobalTransform), With<HookTarget>>,
    mut players: Query<
        (
            &Transform,
            &mut PlayerReceiver,
            &mut FormRig,
            &mut PlayerState,
            &mut LinearVelocity,
        ),
        With<Player>,
    >,
) {
    for (transform, mut receiver, mut rig, mut state, mut velocity) in &mut players {
        let pressed = (receiver.ability1, receiver.ability2, receiver.ability3);
        receiver.ability1 = false;
        receiver.ability2 = false;
        receiver.ability3 = false;
        if !(pressed.0 || pressed.1 || pressed.2) {
            continue;
        }

        let position = transform.translation;
        let facing = state.anim_facing;
        let hook_target = select_hook_target(
            position,
            Vec3::new(facing.x, 0.0, -facing.y),
            hook_targets
                .iter()
                .map(|(entity, global)| (entity, global.translation())),
            HOOK_RANGE,
        )
        .map(|(_, target)| target);

        let Some(kit) = rig.active_kit_mut() else {
            continue;
        };

        let mut cues = Vec::new();
        let mut ctx = AbilityContext {
            state: &mut *state,
            velocity: &mut *velocity,
            position,
            hook_target,
            cues: &mut cues,
        };
        if pressed.0 {
            kit.ability1(&mut ctx);
        }
        if pressed.1 {
            kit.ability2(&mut ctx);
        }
        if pressed.2 {
            kit.ability3(&mut ctx);
        }

        for id in cues {
            audio.write(CueRequest { id });
        }
    }
}

/// Advances the active kit's timers (the Ball's jump windows).
pub(crate) fn tick_form_kits(time: Res<Time>, mut players: Query<(&mut FormRig, &PlayerState)>) {
    let dt = time.delta_secs();
    for (mut rig, state) in &mut players {
        let grounded = state.is_grounded();
        if let Some(kit) = rig.active_kit_mut() {
            kit.tick(dt, grounded);
        }
    }
}

/// Mirrors the Bulldozer's pushing stance onto the physics body: mass is
/// multiplied and the barrier layer drops out of the collision filter while
/// engaged.
pub(crate) fn sync_pushing_state(
    mut players: Query<(&FormRig, &mut Mass), With<Player>>,
    mut layer_query: Query<&mut CollisionLayers>,
) {
    for (rig, mut mass) in &mut players {
        let Some(binding) = rig.binding(Transformation::Bulldozer) else {
            continue;
        };
        let FormKit::Bulldozer(kit) = &binding.kit else {
            continue;
        };

        let engaged = kit.pushing && rig.current() == Transformation::Bulldozer;
        mass.0 = if engaged {
            PLAYER_BASE_MASS * kit.mass_factor
        } else {
            PLAYER_BASE_MASS
        };

        if let Ok(mut layers) = layer_query.get_mut(binding.group) {
            layers.filters = if engaged {
                [GameLayer::Ground, GameLayer::Pushable, GameLayer::Sensor].into()
            } else {
                [
                    GameLayer::Ground,
                    GameLayer::Pushable,
                    GameLayer::Barrier,
                    GameLayer::Sensor,
                ]
                .into()
            };
        }
    }
}
