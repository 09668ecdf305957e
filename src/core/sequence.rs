//! Core domain: cancellation-safe timed gates.
//!
//! A gate entity holds acquired state (paused gameplay, a player move lock)
//! for a fixed duration. Release runs when the timer completes or when the
//! gate entity is despawned early, so every exit path restores what was
//! acquired.

use bevy::ecs::message::Message;
use bevy::prelude::*;
use std::collections::HashMap;

use crate::core::resources::GameplayPaused;
use crate::player::PlayerState;

/// Countdown driving a gate entity. Despawning the entity before the timer
/// completes is the cancellation path.
#[derive(Component, Debug)]
pub struct TimedGate {
    pub timer: Timer,
}

impl TimedGate {
    pub fn new(duration_secs: f32) -> Self {
        Self {
            timer: Timer::from_seconds(duration_secs, TimerMode::Once),
        }
    }
}

/// State a gate acquires on activation and releases on any exit.
#[derive(Component, Debug, Clone, Default)]
pub struct GateEffect {
    pub pause_source: Option<String>,
    pub move_lock: Option<String>,
}

/// Effects applied per live gate. Consulted on removal, since the component
/// data is already gone by the time `RemovedComponents` reports it.
#[derive(Resource, Debug, Default)]
pub struct ActiveGates {
    applied: HashMap<Entity, GateEffect>,
}

/// Message: a gate ran its full duration (cancelled gates never send this).
#[derive(Debug)]
pub struct GateFinished {
    pub gate: Entity,
}

impl Message for GateFinished {}

pub(crate) fn activate_gates(
    mut active: ResMut<ActiveGates>,
    mut paused: ResMut<GameplayPaused>,
    mut players: Query<&mut PlayerState>,
    gates: Query<(Entity, &GateEffect), Added<GateEffect>>,
) {
    for (entity, effect) in &gates {
        if let Some(source) = &effect.pause_source {
            paused.pause(source.clone());
        }
        if let Some(lock) = &effect.move_lock {
            for mut state in &mut players {
                state.lock_movement(lock.clone());
            }
        }
        active.applied.insert(entity, effect.clone());
    }
}

pub(crate) fn tick_gates(
    time: Res<Time>,
    mut commands: Commands,
    mut finished: MessageWriter<GateFinished>,
    mut gates: Query<(Entity, &mut TimedGate)>,
) {
    for (entity, mut gate) in &mut gates {
        gate.timer.tick(time.delta());
        if gate.timer.is_finished() {
            finished.write(GateFinished { gate: entity });
            commands.entity(entity).despawn();
        }
    }
}

pub(crate) fn release_dropped_gates(
    mut removed: RemovedComponents<GateEffect>,
    mut active: ResMut<ActiveGates>,
    mut paused: ResMut<GameplayPaused>,
    mut players: Query<&mut PlayerState>,
) {
    for entity in removed.read() {
        let Some(effect) = active.applied.remove(&entity) else {
            continue;
        };
        if let Some(source) = &effect.pause_source {
            paused.unpause(source);
        }
        if let Some(lock) = &effect.move_lock {
            for mut state in &mut players {
                state.unlock_movement(lock);
            }
        }
    }
}
