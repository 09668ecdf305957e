//! World domain: level geometry, interactables, and hookable targeting.


use avian3d::prelude::*;
use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::GameState;
use crate::lockout::RechargeStation;
use crate::player::{GameLayer, Transformation};

/// A point the Frog's tongue can latch onto. Targeting runs against the
/// player's 8-direction anim facing.
#[derive(Component, Debug)]
pub struct HookTarget;

/// Seed for world scatter, rolled once per session.
#[derive(Resource, Debug)]
pub struct WorldSeed(pub u64);

impl Default for WorldSeed {
    fn default() -> Self {
        Self(rand::rng().random())
    }
}

/// Picks the nearest hookable inside a cone around the facing direction.
pub fn select_hook_target(
    origin: Vec3,
    facing: Vec3,
    targets: impl Iterator<Item = (Entity, Vec3)>,
    max_range: f32,
) -> Option<(Entity, Vec3)> {
    // Roughly a 60 degree half-angle
    const CONE_COS: f32 = 0.5;

    let Some(facing) = facing.try_normalize() else {
        return None;
    };

    targets
        .filter_map(|(entity, position)| {
            let to_target = position - origin;
            let distance = to_target.length();
            if distance <= f32::EPSILON || distance > max_range {
                return None;
            }
            if (to_target / distance).dot(facing) < CONE_COS {
                return None;
            }
            Some((entity, position, distance))
        })
        .min_by(|a, b| a.2.total_cmp(&b.2))
        .map(|(entity, position, _)| (entity, position))
}

pub(crate) fn spawn_level(
    mut commands: Commands,
    seed: Res<WorldSeed>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed.0);

    commands.spawn((
        Name::new("Sun"),
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, -0.9, 0.4, 0.0)),
    ));

    // Ground slab
    commands.spawn((
        Name::new("Ground"),
        RigidBody::Static,
        Collider::cuboid(60.0, 1.0, 60.0),
        CollisionLayers::new(GameLayer::Ground, LayerMask::ALL),
        Mesh3d(meshes.add(Cuboid::new(60.0, 1.0, 60.0))),
        MeshMaterial3d(materials.add(StandardMaterial::from(Color::srgb(0.35, 0.4, 0.3)))),
        Transform::from_xyz(0.0, -0.5, 0.0),
    ));

    // A few raised platforms for jump-form traversal
    for (index, position) in [
        Vec3::new(6.0, 1.0, -4.0),
        Vec3::new(10.0, 2.2, -8.0),
        Vec3::new(-8.0, 1.6, 5.0),
    ]
    .into_iter()
    .enumerate()
    {
        commands.spawn((
            Name::new(format!("Platform{}", index)),
            RigidBody::Static,
            Collider::cuboid(3.0, 0.5, 3.0),
            CollisionLayers::new(GameLayer::Ground, LayerMask::ALL),
            Mesh3d(meshes.add(Cuboid::new(3.0, 0.5, 3.0))),
            MeshMaterial3d(materials.add(StandardMaterial::from(Color::srgb(0.45, 0.45, 0.4)))),
            Transform::from_translation(position),
        ));
    }

    // Barrier gate: blocks everything except a pushing Bulldozer
    commands.spawn((
        Name::new("BarrierGate"),
        RigidBody::Static,
        Collider::cuboid(0.6, 3.0, 6.0),
        CollisionLayers::new(GameLayer::Barrier, [GameLayer::Player, GameLayer::Pushable]),
        Mesh3d(meshes.add(Cuboid::new(0.6, 3.0, 6.0))),
        MeshMaterial3d(materials.add(StandardMaterial::from(Color::srgb(0.55, 0.3, 0.3)))),
        Transform::from_xyz(14.0, 1.5, 0.0),
    ));

    // Pushable blocks: heavy enough that only the pushing stance shoves them
    for index in 0..3 {
        let jitter = rng.random_range(-1.5..1.5);
        commands.spawn((
            Name::new(format!("PushBlock{}", index)),
            RigidBody::Dynamic,
            Collider::cuboid(1.5, 1.5, 1.5),
            Mass(220.0),
            CollisionLayers::new(
                GameLayer::Pushable,
                [
                    GameLayer::Ground,
                    GameLayer::Player,
                    GameLayer::Pushable,
                    GameLayer::Barrier,
                ],
            ),
            Mesh3d(meshes.add(Cuboid::new(1.5, 1.5, 1.5))),
            MeshMaterial3d(materials.add(StandardMaterial::from(Color::srgb(0.5, 0.5, 0.6)))),
            Transform::from_xyz(-5.0 + index as f32 * 4.0, 0.75, -6.0 + jitter),
        ));
    }

    // Recharge stations, one per form plus a wildcard
    let stations = [
        (Some(Transformation::Frog), Vec3::new(-12.0, 0.5, -2.0)),
        (Some(Transformation::Bulldozer), Vec3::new(12.0, 0.5, 6.0)),
        (Some(Transformation::Ball), Vec3::new(2.0, 0.5, 12.0)),
        (None, Vec3::new(0.0, 0.5, -12.0)),
    ];
    for (affinity, position) in stations {
        let jitter = Vec3::new(rng.random_range(-0.8..0.8), 0.0, rng.random_range(-0.8..0.8));
        let color = match affinity {
            Some(Transformation::Frog) => Color::srgb(0.3, 0.8, 0.4),
            Some(Transformation::Bulldozer) => Color::srgb(0.85, 0.6, 0.2),
            Some(Transformation::Ball) => Color::srgb(0.4, 0.5, 0.95),
            _ => Color::srgb(0.9, 0.9, 0.5),
        };
        commands.spawn((
            Name::new("RechargeStation"),
            RechargeStation::new(affinity),
            RigidBody::Static,
            Collider::cylinder(1.2, 0.4),
            Sensor,
            CollisionEventsEnabled,
            CollisionLayers::new(GameLayer::Sensor, [GameLayer::Player]),
            Mesh3d(meshes.add(Cylinder::new(1.2, 0.4))),
            MeshMaterial3d(materials.add(StandardMaterial::from(color))),
            Transform::from_translation(position + jitter),
        ));
    }

    // Hook anchors for the Frog's tongue
    for (index, position) in [
        Vec3::new(8.0, 4.0, -6.0),
        Vec3::new(-6.0, 3.5, 8.0),
        Vec3::new(0.0, 5.0, -10.0),
    ]
    .into_iter()
    .enumerate()
    {
        commands.spawn((
            Name::new(format!("HookAnchor{}", index)),
            HookTarget,
            Mesh3d(meshes.add(Sphere::new(0.25))),
            MeshMaterial3d(materials.add(StandardMaterial::from(Color::srgb(0.9, 0.8, 0.2)))),
            Transform::from_translation(position),
        ));
    }

    info!("[WORLD] level spawned");
}

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WorldSeed>()
            .add_systems(OnEnter(GameState::InGame), spawn_level);
    }
}
