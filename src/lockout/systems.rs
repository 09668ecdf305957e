//! Lockout domain: charge consumption, recharge stations, and meditation.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::audio::CueRequest;
use crate::content::FormTuning;
use crate::core::{GateEffect, GateFinished, TimedGate};
use crate::lockout::{ChargeChanged, DEFAULT_MAX_CHARGE, LockoutCharges};
use crate::player::{Player, PlayerReceiver, PlayerState, TransformCue, Transformation};

const MEDITATION_SECS: f32 = 2.5;
const MEDITATION_LOCK: &str = "meditation";
const STATION_COOLDOWN_SECS: f32 = 3.0;

/// World trigger restoring charge on player contact, with a per-station
/// form affinity (None recharges every form).
#[derive(Component, Debug)]
pub struct RechargeStation {
    pub affinity: Option<Transformation>,
    pub cooldown: Timer,
}

impl RechargeStation {
    pub fn new(affinity: Option<Transformation>) -> Self {
        let mut cooldown = Timer::from_seconds(STATION_COOLDOWN_SECS, TimerMode::Once);
        // Stations start ready
        let full = cooldown.duration();
        cooldown.tick(full);
        Self { affinity, cooldown }
    }
}

/// The in-flight meditation channel's gate entity, if any.
#[derive(Resource, Debug, Default)]
pub struct ActiveMeditation(pub Option<Entity>);

/// Rebuilds the counters from loaded tuning and pushes the initial values
/// to the UI observer.
pub(crate) fn configure_charges(
    tuning: Res<FormTuning>,
    mut charges: ResMut<LockoutCharges>,
    mut changed: MessageWriter<ChargeChanged>,
) {
    *charges = LockoutCharges::with_max(|transformation| {
        tuning
            .def(transformation)
            .map(|def| def.max_charge)
            .filter(|max| *max > 0)
            .unwrap_or(DEFAULT_MAX_CHARGE)
    });

    for transformation in Transformation::ALL {
        if let Some(record) = charges.charge(transformation) {
            changed.write(ChargeChanged {
                transformation,
                current: record.current,
                max: record.max,
            });
        }
    }
}

/// Leaving a form costs one of its charges; the neutral form is exempt.
pub(crate) fn consume_on_transform_out(
    mut cues: MessageReader<TransformCue>,
    mut charges: ResMut<LockoutCharges>,
    mut changed: MessageWriter<ChargeChanged>,
) {
    for cue in cues.read() {
        if !charges.subtract(cue.from) {
            continue;
        }
        if let Some(record) = charges.charge(cue.from) {
            info!(
                "[LOCKOUT] {} charge now {}/{}",
                cue.from.display_name(),
                record.current,
                record.max
            );
            changed.write(ChargeChanged {
                transformation: cue.from,
                current: record.current,
                max: record.max,
            });
        }
    }
}

pub(crate) fn tick_station_cooldowns(time: Res<Time>, mut stations: Query<&mut RechargeStation>) {
    for mut station in &mut stations {
        station.cooldown.tick(time.delta());
    }
}

/// Restores charge when the player touches a ready station. Collisions are
/// reported against the active form group, so the player is matched through
/// the parent link as well.
pub(crate) fn handle_recharge_stations(
    mut collision_start_events: MessageReader<CollisionStart>,
    mut charges: ResMut<LockoutCharges>,
    mut changed: MessageWriter<ChargeChanged>,
    mut audio: MessageWriter<CueRequest>,
    mut stations: Query<&mut RechargeStation>,
    players: Query<Entity, With<Player>>,
    parents: Query<&ChildOf>,
) {
    let Ok(player) = players.single() else {
        for _ in collision_start_events.read() {}
        return;
    };

    for event in collision_start_events.read() {
        let (station_entity, other) = if stations.contains(event.collider1) {
            (event.collider1, event.collider2)
        } else if stations.contains(event.collider2) {
            (event.collider2, event.collider1)
        } else {
            continue;
        };

        let touched_player = other == player
            || parents
                .get(other)
                .is_ok_and(|child_of| child_of.parent() == player);
        if !touched_player {
            continue;
        }

        let Ok(mut station) = stations.get_mut(station_entity) else {
            continue;
        };
        if !station.cooldown.is_finished() {
            continue;
        }
        station.cooldown.reset();

        let targets: Vec<Transformation> = match station.affinity {
            Some(transformation) => vec![transformation],
            None => Transformation::ALL
                .iter()
                .copied()
                .filter(|transformation| !transformation.is_neutral())
                .collect(),
        };

        let mut restored = false;
        for transformation in targets {
            if !charges.add(transformation) {
                continue;
            }
            restored = true;
            if let Some(record) = charges.charge(transformation) {
                changed.write(ChargeChanged {
                    transformation,
                    current: record.current,
                    max: record.max,
                });
            }
        }

        if restored {
            audio.write(CueRequest { id: "recharge" });
            info!("[LOCKOUT] recharge station used");
        }
    }
}

/// Starts a meditation channel: a cancellation-safe gate locking movement
/// for the channel duration.
pub(crate) fn start_meditation(
    mut commands: Commands,
    mut active: ResMut<ActiveMeditation>,
    mut audio: MessageWriter<CueRequest>,
    mut players: Query<(&mut PlayerReceiver, &PlayerState), With<Player>>,
) {
    for (mut receiver, state) in &mut players {
        if !receiver.meditate_pressed {
            continue;
        }
        receiver.meditate_pressed = false;

        if active.0.is_some() || !state.is_grounded() {
            continue;
        }

        let gate = commands
            .spawn((
                Name::new("MeditationChannel"),
                TimedGate::new(MEDITATION_SECS),
                GateEffect {
                    pause_source: None,
                    move_lock: Some(MEDITATION_LOCK.to_string()),
                },
            ))
            .id();
        active.0 = Some(gate);
        audio.write(CueRequest { id: "meditate_start" });
        info!("[MEDITATE] channel started");
    }
}

/// Any interruption (release, movement, an ability press, leaving the
/// ground) despawns the gate early; the gate release path restores the
/// movement lock.
pub(crate) fn cancel_meditation(
    mut commands: Commands,
    mut active: ResMut<ActiveMeditation>,
    mut players: Query<(&mut PlayerReceiver, &PlayerState), With<Player>>,
) {
    let Some(gate) = active.0 else {
        for (mut receiver, _) in &mut players {
            receiver.meditate_released = false;
        }
        return;
    };

    for (mut receiver, state) in &mut players {
        let released = receiver.meditate_released;
        receiver.meditate_released = false;

        let interrupted = released
            || receiver.move_axis.length_squared() > 0.04
            || receiver.ability1
            || receiver.ability2
            || receiver.ability3
            || !state.is_grounded();
        if interrupted {
            commands.entity(gate).despawn();
            active.0 = None;
            info!("[MEDITATE] channel cancelled");
        }
    }
}

/// A gate that ran its full duration refills every counter.
pub(crate) fn complete_meditation(
    mut finished: MessageReader<GateFinished>,
    mut active: ResMut<ActiveMeditation>,
    mut charges: ResMut<LockoutCharges>,
    mut changed: MessageWriter<ChargeChanged>,
    mut audio: MessageWriter<CueRequest>,
) {
    for message in finished.read() {
        if active.0 != Some(message.gate) {
            continue;
        }
        active.0 = None;

        for transformation in charges.reset_to_max() {
            if let Some(record) = charges.charge(transformation) {
                changed.write(ChargeChanged {
                    transformation,
                    current: record.current,
                    max: record.max,
                });
            }
        }
        audio.write(CueRequest {
            id: "meditate_complete",
        });
        info!("[MEDITATE] charges restored");
    }
}
