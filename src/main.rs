mod anim;
mod audio;
mod content;
mod core;
mod forms;
mod input;
mod lockout;
mod player;
mod ui;
mod world;

use avian3d::prelude::*;
use bevy::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Terry".to_string(),
                resolution: (1280, 720).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(PhysicsPlugins::default())
        .add_plugins((
            core::CorePlugin,
            content::ContentPlugin,
            input::InputPlugin,
            player::PlayerPlugin,
            forms::FormsPlugin,
            lockout::LockoutPlugin,
            anim::AnimPlugin,
            audio::AudioPlugin,
            ui::UiPlugin,
            world::WorldPlugin,
        ))
        .run();
}
