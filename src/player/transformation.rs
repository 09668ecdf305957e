//! Player domain: transformation identity, form bindings, and the swap
//! protocol.

use avian3d::prelude::*;
use bevy::ecs::message::Message;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::audio::CueRequest;
use crate::forms::FormKit;
use crate::player::components::PlayerState;

/// One of the player's selectable bodies. `Terry` is the neutral form:
/// the initial state, the debuff/reset target, and the fallback when a
/// requested form has no binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Transformation {
    #[default]
    Terry,
    Frog,
    Bulldozer,
    Ball,
}

impl Transformation {
    pub const ALL: [Transformation; 4] = [
        Transformation::Terry,
        Transformation::Frog,
        Transformation::Bulldozer,
        Transformation::Ball,
    ];

    /// The neutral form is exempt from charge costs.
    pub fn is_neutral(self) -> bool {
        matches!(self, Transformation::Terry)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Transformation::Terry => "Terry",
            Transformation::Frog => "Frog",
            Transformation::Bulldozer => "Bulldozer",
            Transformation::Ball => "Ball",
        }
    }
}

/// Resolved runtime handles for one form: the visual/collider sub-hierarchy
/// root, the visual child, the animator root, and the owned ability kit.
/// Built once at actor spawn; only the kit's runtime state mutates after.
#[derive(Debug)]
pub struct FormBinding {
    pub group: Entity,
    pub sprite: Entity,
    pub animator: Entity,
    pub kit: FormKit,
}

/// Message: the actor changed shape. Fired only on an actual change, so
/// re-selecting the current form never triggers the transform cue.
#[derive(Debug)]
pub struct TransformCue {
    pub from: Transformation,
    pub to: Transformation,
}

impl Message for TransformCue {}

/// Request to change the player's shape (wheel selection, debuffs, resets).
#[derive(Debug)]
pub struct TransformRequest {
    pub target: Transformation,
}

impl Message for TransformRequest {}

/// Outcome of the pure half of the swap protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapOutcome {
    pub from: Transformation,
    pub to: Transformation,
    /// True only on an actual change; gates the transform cue
    pub changed: bool,
    /// True when the requested target had no binding and Terry was used
    pub fell_back: bool,
}

/// The player's transformation state machine plus its resolved bindings.
#[derive(Component, Debug)]
pub struct FormRig {
    bindings: HashMap<Transformation, FormBinding>,
    current: Transformation,
    previous: Transformation,
}

impl FormRig {
    pub fn new(bindings: HashMap<Transformation, FormBinding>) -> Self {
        if !bindings.contains_key(&Transformation::Terry) {
            warn!("[TRANSFORM] rig built without a Terry binding; swaps cannot fall back");
        }
        Self {
            bindings,
            current: Transformation::Terry,
            previous: Transformation::Terry,
        }
    }

    pub fn current(&self) -> Transformation {
        self.current
    }

    pub fn previous(&self) -> Transformation {
        self.previous
    }

    pub fn binding(&self, transformation: Transformation) -> Option<&FormBinding> {
        self.bindings.get(&transformation)
    }

    pub fn active(&self) -> Option<&FormBinding> {
        self.bindings.get(&self.current)
    }

    pub fn active_kit_mut(&mut self) -> Option<&mut FormKit> {
        self.bindings.get_mut(&self.current).map(|binding| &mut binding.kit)
    }

    pub fn bindings(&self) -> impl Iterator<Item = (Transformation, &FormBinding)> {
        self.bindings.iter().map(|(t, binding)| (*t, binding))
    }

    /// Pure half of the swap protocol: resolves the target (warning and
    /// falling back to Terry when unbound), records previous/current, and
    /// reports whether the cue should fire. Side effects (group toggling,
    /// handle re-cache, speed carry-over) are applied by the swap system in
    /// the same frame, so the whole transition is atomic for later handlers.
    pub fn begin_swap(&mut self, target: Transformation) -> SwapOutcome {
        let resolved = if self.bindings.contains_key(&target) {
            target
        } else {
            warn!(
                "[TRANSFORM] no binding for {:?}, falling back to Terry",
                target
            );
            Transformation::Terry
        };

        let changed = resolved != self.current;
        self.previous = self.current;
        self.current = resolved;

        SwapOutcome {
            from: self.previous,
            to: resolved,
            changed,
            fell_back: resolved != target,
        }
    }
}

/// Applies pending transform requests: runs the swap state machine, toggles
/// every form group so exactly the target's is active, carries the kit's
/// speed onto the actor, and requests the transform cue.
pub(crate) fn apply_transform_requests(
    mut requests: MessageReader<TransformRequest>,
    mut transform_cues: MessageWriter<TransformCue>,
    mut audio_cues: MessageWriter<CueRequest>,
    mut players: Query<(&mut FormRig, &mut PlayerState)>,
    mut groups: Query<&mut Visibility>,
    mut commands: Commands,
) {
    for request in requests.read() {
        for (mut rig, mut state) in &mut players {
            let outcome = rig.begin_swap(request.target);
            if outcome.changed {
                transform_cues.write(TransformCue {
                    from: outcome.from,
                    to: outcome.to,
                });
                audio_cues.write(CueRequest { id: "morph" });
                info!(
                    "[TRANSFORM] {} -> {}",
                    outcome.from.display_name(),
                    outcome.to.display_name()
                );
            }

            // Deactivate every group, then activate the target's. All of it
            // lands inside this one system run.
            for (transformation, binding) in rig.bindings() {
                let active = transformation == outcome.to;
                if let Ok(mut visibility) = groups.get_mut(binding.group) {
                    *visibility = if active {
                        Visibility::Inherited
                    } else {
                        Visibility::Hidden
                    };
                }
                if active {
                    commands.entity(binding.group).remove::<ColliderDisabled>();
                } else {
                    commands.entity(binding.group).insert(ColliderDisabled);
                }
            }

            match rig.active_kit_mut() {
                Some(kit) => {
                    if outcome.changed {
                        kit.on_activate();
                        audio_cues.write(CueRequest {
                            id: kit.activation_cue(),
                        });
                    }
                    state.move_speed = kit.base_speed();
                }
                None => warn!("[TRANSFORM] active form has no binding; speed unchanged"),
            }
        }
    }
}
