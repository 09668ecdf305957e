//! Lockout domain: the per-form charge model gating transformation
//! availability.

mod systems;

#[cfg(test)]
mod tests;

pub use systems::{ActiveMeditation, RechargeStation};

use bevy::ecs::message::Message;
use bevy::prelude::*;
use std::collections::HashMap;

use crate::core::GameState;
use crate::input::InputSet;
use crate::player::Transformation;

pub const DEFAULT_MAX_CHARGE: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChargeRecord {
    pub current: u32,
    pub max: u32,
}

/// Per-form charge counters in `[0, max]`. Terry is exempt: leaving it
/// costs nothing and it is always selectable.
#[derive(Resource, Debug)]
pub struct LockoutCharges {
    charges: HashMap<Transformation, ChargeRecord>,
}

impl Default for LockoutCharges {
    fn default() -> Self {
        Self::with_max(|_| DEFAULT_MAX_CHARGE)
    }
}

impl LockoutCharges {
    /// Builds full counters for every non-neutral form.
    pub fn with_max(max_for: impl Fn(Transformation) -> u32) -> Self {
        let mut charges = HashMap::new();
        for transformation in Transformation::ALL {
            if transformation.is_neutral() {
                continue;
            }
            let max = max_for(transformation);
            charges.insert(transformation, ChargeRecord { current: max, max });
        }
        Self { charges }
    }

    pub fn charge(&self, transformation: Transformation) -> Option<ChargeRecord> {
        self.charges.get(&transformation).copied()
    }

    /// Consumes one charge when leaving the form. No-op for Terry; floors
    /// at zero. Returns true when the counter changed.
    pub fn subtract(&mut self, transformation: Transformation) -> bool {
        if transformation.is_neutral() {
            return false;
        }
        match self.charges.get_mut(&transformation) {
            Some(record) if record.current > 0 => {
                record.current -= 1;
                true
            }
            _ => false,
        }
    }

    /// Restores one charge, clamped to the form's max. Returns true when
    /// the counter changed.
    pub fn add(&mut self, transformation: Transformation) -> bool {
        match self.charges.get_mut(&transformation) {
            Some(record) if record.current < record.max => {
                record.current += 1;
                true
            }
            _ => false,
        }
    }

    /// Refills every counter; returns the forms whose counters changed.
    pub fn reset_to_max(&mut self) -> Vec<Transformation> {
        let mut restored = Vec::new();
        for (transformation, record) in &mut self.charges {
            if record.current < record.max {
                record.current = record.max;
                restored.push(*transformation);
            }
        }
        restored
    }

    /// Terry is always selectable; other forms need charge left.
    pub fn is_selectable(&self, transformation: Transformation) -> bool {
        transformation.is_neutral()
            || self
                .charges
                .get(&transformation)
                .is_some_and(|record| record.current > 0)
    }

    /// True when every non-neutral form is exhausted. Terry costs nothing,
    /// but its own "locked" indicator lights up when nothing else is left
    /// to select; restoring any single charge clears it.
    pub fn is_any_locked_out(&self) -> bool {
        !self.charges.is_empty() && self.charges.values().all(|record| record.current == 0)
    }
}

/// Pushed to the UI observer on every counter change.
#[derive(Debug)]
pub struct ChargeChanged {
    pub transformation: Transformation,
    pub current: u32,
    pub max: u32,
}

impl Message for ChargeChanged {}

pub struct LockoutPlugin;

impl Plugin for LockoutPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LockoutCharges>()
            .init_resource::<ActiveMeditation>()
            .add_message::<ChargeChanged>()
            .add_systems(OnEnter(GameState::InGame), systems::configure_charges)
            .add_systems(
                Update,
                (
                    systems::consume_on_transform_out
                        .in_set(InputSet::Apply)
                        .after(crate::player::apply_transform_requests),
                    (systems::cancel_meditation, systems::start_meditation)
                        .chain()
                        .in_set(InputSet::Apply)
                        .before(crate::forms::apply_form_abilities),
                    systems::complete_meditation,
                    systems::handle_recharge_stations,
                    systems::tick_station_cooldowns,
                )
                    .run_if(in_state(GameState::InGame)),
            );
    }
}
