//! Player domain: actor spawn, per-form sub-hierarchies, and the duplicate
//! reconcile rule.

use avian3d::prelude::*;
use bevy::prelude::*;
use std::collections::HashMap;

use crate::anim::{AnimationController, AnimatorParams};
use crate::content::FormTuning;
use crate::forms::FormKit;
use crate::player::components::{GameLayer, Player, PlayerReceiver, PlayerState};
use crate::player::transformation::{FormBinding, FormRig, Transformation};

pub(crate) const PLAYER_BASE_MASS: f32 = 70.0;

/// The surviving player across scene loads. A later duplicate reconciles
/// its position into this one and despawns itself.
#[derive(Resource, Debug, Default)]
pub struct PlayerHandle(pub Option<Entity>);

pub(crate) fn spawn_player(
    mut commands: Commands,
    tuning: Res<FormTuning>,
    mut handle: ResMut<PlayerHandle>,
    existing: Query<Entity, With<Player>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if !existing.is_empty() {
        info!("[PLAYER] player already exists, skipping spawn");
        return;
    }

    // The actor starts neutral; carry the neutral kit's speed from the off.
    let base_speed = FormKit::from_tuning(Transformation::Terry, &tuning).base_speed();

    let root = commands
        .spawn((
            Player,
            PlayerState::with_speed(base_speed),
            PlayerReceiver::default(),
            Name::new("Terry"),
            Transform::from_xyz(0.0, 2.0, 0.0),
            Visibility::default(),
            (
                RigidBody::Dynamic,
                LockedAxes::ROTATION_LOCKED,
                LinearVelocity::default(),
                Friction::new(0.0),
                Mass(PLAYER_BASE_MASS),
                CollisionEventsEnabled,
            ),
        ))
        .id();

    let mut bindings = HashMap::new();
    for transformation in Transformation::ALL {
        let kit = FormKit::from_tuning(transformation, &tuning);
        let binding = spawn_form_group(
            &mut commands,
            &mut meshes,
            &mut materials,
            root,
            transformation,
            kit,
        );
        bindings.insert(transformation, binding);
    }

    commands.entity(root).insert(FormRig::new(bindings));
    handle.0 = Some(root);
    info!("[PLAYER] spawned with {} forms", Transformation::ALL.len());
}

/// Spawns one form's sub-hierarchy: the group entity carrying the collider
/// and animator, with the visual as a named child. Only the neutral form
/// starts active.
fn spawn_form_group(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    root: Entity,
    transformation: Transformation,
    kit: FormKit,
) -> FormBinding {
    let active = transformation.is_neutral();

    let (collider, mesh, color) = match transformation {
        Transformation::Terry => (
            Collider::capsule(0.35, 1.0),
            meshes.add(Capsule3d::new(0.35, 1.0)),
            Color::srgb(0.9, 0.85, 0.7),
        ),
        Transformation::Frog => (
            Collider::capsule(0.3, 0.5),
            meshes.add(Capsule3d::new(0.3, 0.5)),
            Color::srgb(0.3, 0.8, 0.4),
        ),
        Transformation::Bulldozer => (
            Collider::cuboid(1.2, 1.0, 1.2),
            meshes.add(Cuboid::new(1.2, 1.0, 1.2)),
            Color::srgb(0.85, 0.6, 0.2),
        ),
        Transformation::Ball => (
            Collider::sphere(0.5),
            meshes.add(Sphere::new(0.5)),
            Color::srgb(0.4, 0.5, 0.95),
        ),
    };

    let group = commands
        .spawn((
            Name::new(format!("{}Form", transformation.display_name())),
            ChildOf(root),
            Transform::IDENTITY,
            if active {
                Visibility::Inherited
            } else {
                Visibility::Hidden
            },
            collider,
            CollisionLayers::new(
                GameLayer::Player,
                [
                    GameLayer::Ground,
                    GameLayer::Pushable,
                    GameLayer::Barrier,
                    GameLayer::Sensor,
                ],
            ),
            AnimationController::new(&format!(
                "terry.{}",
                transformation.display_name().to_lowercase()
            )),
            AnimatorParams::default(),
        ))
        .id();
    if !active {
        commands.entity(group).insert(ColliderDisabled);
    }

    let sprite = commands
        .spawn((
            Name::new("Visual"),
            ChildOf(group),
            Mesh3d(mesh),
            MeshMaterial3d(materials.add(StandardMaterial::from(color))),
            Transform::IDENTITY,
        ))
        .id();

    FormBinding {
        group,
        sprite,
        animator: group,
        kit,
    }
}

/// Explicit factory rule for persist-across-scene semantics: at most one
/// live player; a freshly spawned duplicate hands its position to the
/// survivor and despawns.
pub(crate) fn reconcile_duplicate_players(
    mut commands: Commands,
    mut handle: ResMut<PlayerHandle>,
    mut players: Query<(Entity, &mut Transform), With<Player>>,
) {
    let survivor = match handle.0 {
        Some(entity) if players.contains(entity) => entity,
        _ => {
            handle.0 = players.iter().next().map(|(entity, _)| entity);
            return;
        }
    };

    let mut carried: Option<Vec3> = None;
    for (entity, transform) in players.iter() {
        if entity != survivor {
            carried = Some(transform.translation);
            commands.entity(entity).despawn();
            warn!("[PLAYER] duplicate player reconciled into survivor");
        }
    }

    if let Some(position) = carried
        && let Ok((_, mut transform)) = players.get_mut(survivor)
    {
        transform.translation = position;
    }
}
