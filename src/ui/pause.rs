//! UI domain: pause overlay.

use bevy::prelude::*;

#[derive(Component)]
pub struct PauseOverlay;

pub(crate) fn spawn_pause_overlay(mut commands: Commands) {
    commands
        .spawn((
            PauseOverlay,
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Paused"),
                TextFont {
                    font_size: 48.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

pub(crate) fn despawn_pause_overlay(
    mut commands: Commands,
    overlays: Query<Entity, With<PauseOverlay>>,
) {
    for overlay in &overlays {
        commands.entity(overlay).despawn();
    }
}
