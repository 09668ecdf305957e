//! Player domain: locomotion, facing, and ground detection systems.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::core::MainCamera;
use crate::player::components::{GameLayer, Player, PlayerReceiver, PlayerState};

#[derive(Resource, Debug, Clone)]
pub struct MovementConfig {
    /// Intent below this magnitude per axis reads as zero
    pub deadzone: f32,
    /// Ground ray origin offset above the actor's base
    pub ground_ray_offset: f32,
    pub ground_ray_length: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            deadzone: 0.2,
            ground_ray_offset: 0.2,
            ground_ray_length: 0.5,
        }
    }
}

pub(crate) fn tick_player_timers(time: Res<Time>, mut players: Query<&mut PlayerState>) {
    let dt = time.delta_secs();
    for mut state in &mut players {
        state.tick_grace(dt);
    }
}

/// Moves the receiver's recorded axis into the actor state, deadzone-zeroed
/// per axis, and updates facing from the raw axis.
pub(crate) fn update_movement_intent(
    config: Res<MovementConfig>,
    mut players: Query<(&PlayerReceiver, &mut PlayerState)>,
) {
    for (receiver, mut state) in &mut players {
        let raw = receiver.move_axis;
        state.update_facing(raw, config.deadzone);

        let mut intent = raw;
        if intent.x.abs() <= config.deadzone {
            intent.x = 0.0;
        }
        if intent.y.abs() <= config.deadzone {
            intent.y = 0.0;
        }
        state.move_intent = intent;
    }
}

/// Applies the planar intent camera-relative, preserving vertical velocity.
pub(crate) fn apply_planar_movement(
    cameras: Query<&Transform, (With<MainCamera>, Without<Player>)>,
    mut players: Query<(&PlayerState, &mut LinearVelocity), With<Player>>,
) {
    let (flat_forward, flat_right) = match cameras.single() {
        Ok(camera) => {
            let forward = camera.forward();
            let flat = Vec3::new(forward.x, 0.0, forward.z).normalize_or(Vec3::NEG_Z);
            (flat, flat.cross(Vec3::Y).normalize_or(Vec3::X))
        }
        // No camera yet this frame: fall back to world axes
        Err(_) => (Vec3::NEG_Z, Vec3::X),
    };

    for (state, mut velocity) in &mut players {
        if !state.can_move() {
            velocity.x = 0.0;
            velocity.z = 0.0;
            continue;
        }

        let world = flat_right * state.move_intent.x + flat_forward * state.move_intent.y;
        velocity.x = world.x * state.move_speed;
        velocity.z = world.z * state.move_speed;
        // velocity.y is left to gravity and launches
    }
}

/// Polls the grounded state with a short downward ray once per physics step.
/// The grace gating inside `set_grounded` keeps a fresh launch from being
/// cancelled by a same-step contact.
pub(crate) fn poll_grounded(
    spatial_query: SpatialQuery,
    config: Res<MovementConfig>,
    mut players: Query<(&Transform, &mut PlayerState), With<Player>>,
) {
    let ground_filter = SpatialQueryFilter::from_mask(GameLayer::Ground);

    for (transform, mut state) in &mut players {
        let origin = transform.translation + Vec3::Y * config.ground_ray_offset;
        let hit = spatial_query.cast_ray(
            origin,
            Dir3::NEG_Y,
            config.ground_ray_offset + config.ground_ray_length,
            true,
            &ground_filter,
        );

        let was_grounded = state.is_grounded();
        state.set_grounded(hit.is_some());
        if state.is_grounded() && !was_grounded {
            debug!("[PLAYER] landed");
        }
    }
}
