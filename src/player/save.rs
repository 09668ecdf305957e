//! Player domain: serializable view for the persistence collaborator.

use bevy::prelude::*;
use serde::Serialize;

use crate::player::transformation::{FormRig, Transformation};

/// What the save system stores for the player. The core exposes the data;
/// it performs no I/O.
#[derive(Debug, Clone, Serialize)]
pub struct SaveSnapshot {
    pub transformation: Transformation,
    pub position: [f32; 3],
}

impl SaveSnapshot {
    pub fn capture(rig: &FormRig, transform: &Transform) -> Self {
        Self {
            transformation: rig.current(),
            position: transform.translation.to_array(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
