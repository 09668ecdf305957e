//! Content domain: definitions deserialized from RON data files.

use serde::Deserialize;

use crate::player::Transformation;

/// Wrapper for list-shaped data files.
#[derive(Debug, Deserialize)]
pub struct DataFile<T> {
    pub items: Vec<T>,
}

/// Tuning for one transformation, loaded from `forms.ron`. Zeroed or
/// missing optional fields fall back to compiled defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct FormDef {
    pub transformation: Transformation,
    pub base_speed: f32,
    #[serde(default)]
    pub jump_speed: f32,
    #[serde(default)]
    pub double_jump_speed: f32,
    #[serde(default)]
    pub double_window: f32,
    #[serde(default)]
    pub forgiveness: f32,
    #[serde(default)]
    pub mass_factor: f32,
    #[serde(default)]
    pub hook_pull_speed: f32,
    #[serde(default)]
    pub max_charge: u32,
}
