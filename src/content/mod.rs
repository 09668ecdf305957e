//! Content domain: data-driven tuning plugin wiring.

mod data;
mod loader;
mod registry;

pub use data::{DataFile, FormDef};
pub use loader::{ContentLoadError, load_forms};
pub use registry::FormTuning;

use bevy::prelude::*;
use std::path::Path;

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreStartup, load_form_tuning);
    }
}

/// Loads form tuning before anything spawns. Broken or missing content is
/// a warning and a fallback, never a crash.
fn load_form_tuning(mut commands: Commands) {
    match load_forms(Path::new("assets/data")) {
        Ok(defs) => {
            info!("[CONTENT] loaded {} form definitions", defs.len());
            commands.insert_resource(FormTuning::from_defs(defs));
        }
        Err(error) => {
            warn!("[CONTENT] {}; using compiled defaults", error);
            commands.insert_resource(FormTuning::fallback());
        }
    }
}
