//! UI domain: lockout charge HUD.

use bevy::prelude::*;

use crate::lockout::{ChargeChanged, LockoutCharges};
use crate::player::Transformation;

pub(crate) const HUD_PADDING: f32 = 16.0;
pub(crate) const PIP_SIZE: f32 = 14.0;
pub(crate) const PIP_GAP: f32 = 4.0;

/// Marker for the charge HUD root container
#[derive(Component)]
pub struct ChargeHudRoot;

/// One form's pip row
#[derive(Component)]
pub struct ChargePipRow {
    pub transformation: Transformation,
}

/// Terry's "everything else is spent" indicator
#[derive(Component)]
pub struct TerryLockIndicator;

fn form_color(transformation: Transformation) -> Color {
    match transformation {
        Transformation::Terry => Color::srgb(0.9, 0.85, 0.7),
        Transformation::Frog => Color::srgb(0.3, 0.8, 0.4),
        Transformation::Bulldozer => Color::srgb(0.85, 0.6, 0.2),
        Transformation::Ball => Color::srgb(0.4, 0.5, 0.95),
    }
}

pub(crate) fn spawn_charge_hud(mut commands: Commands) {
    commands
        .spawn((
            ChargeHudRoot,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(HUD_PADDING),
                bottom: Val::Px(HUD_PADDING),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(PIP_GAP),
                ..default()
            },
        ))
        .with_children(|parent| {
            // Terry's slot is an availability light, not a counter
            parent.spawn((
                TerryLockIndicator,
                Node {
                    width: Val::Px(PIP_SIZE),
                    height: Val::Px(PIP_SIZE),
                    ..default()
                },
                BackgroundColor(form_color(Transformation::Terry)),
            ));

            for transformation in Transformation::ALL {
                if transformation.is_neutral() {
                    continue;
                }
                parent.spawn((
                    ChargePipRow { transformation },
                    Node {
                        flex_direction: FlexDirection::Row,
                        column_gap: Val::Px(PIP_GAP),
                        ..default()
                    },
                ));
            }
        });
}

/// Rebuilds a form's pip row whenever its counter changes.
pub(crate) fn update_charge_pips(
    mut commands: Commands,
    mut changes: MessageReader<ChargeChanged>,
    rows: Query<(Entity, &ChargePipRow)>,
) {
    for change in changes.read() {
        for (row_entity, row) in &rows {
            if row.transformation != change.transformation {
                continue;
            }

            commands.entity(row_entity).despawn_related::<Children>();
            let color = form_color(row.transformation);
            commands.entity(row_entity).with_children(|parent| {
                for index in 0..change.max {
                    let filled = index < change.current;
                    parent.spawn((
                        Node {
                            width: Val::Px(PIP_SIZE),
                            height: Val::Px(PIP_SIZE),
                            ..default()
                        },
                        BackgroundColor(if filled {
                            color
                        } else {
                            Color::srgba(0.2, 0.2, 0.2, 0.8)
                        }),
                    ));
                }
            });
        }
    }
}

/// Dims Terry's slot while every other form is exhausted.
pub(crate) fn update_terry_lock_indicator(
    charges: Res<LockoutCharges>,
    mut indicators: Query<&mut BackgroundColor, With<TerryLockIndicator>>,
) {
    if !charges.is_changed() {
        return;
    }

    let color = if charges.is_any_locked_out() {
        Color::srgb(0.8, 0.2, 0.2)
    } else {
        form_color(Transformation::Terry)
    };
    for mut background in &mut indicators {
        background.0 = color;
    }
}
