//! Content domain: the loaded tuning registry.

use bevy::prelude::*;
use std::collections::HashMap;

use super::data::FormDef;
use crate::player::Transformation;

/// Loaded per-form tuning, keyed by transformation.
#[derive(Resource, Debug, Default)]
pub struct FormTuning {
    defs: HashMap<Transformation, FormDef>,
}

impl FormTuning {
    pub fn from_defs(defs: Vec<FormDef>) -> Self {
        let mut map = HashMap::new();
        for def in defs {
            let key = def.transformation;
            if map.insert(key, def).is_some() {
                warn!("[CONTENT] duplicate form definition for {:?}", key);
            }
        }
        Self { defs: map }
    }

    /// An empty registry: every kit constructor falls back to its compiled
    /// defaults per field.
    pub fn fallback() -> Self {
        Self::default()
    }

    pub fn def(&self, transformation: Transformation) -> Option<&FormDef> {
        self.defs.get(&transformation)
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}
