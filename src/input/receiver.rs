//! Input domain: the key-action receiver base behavior.

use bevy::ecs::component::Mutable;
use bevy::prelude::*;
use std::marker::PhantomData;

use crate::input::actions::{Action, ActionContext, ActionMap};
use crate::input::registry::ActionRegistry;
use crate::input::InputSet;

/// Declarative (action, handler) pair for one receiver type.
pub type ActionBinding<R> = (Action, fn(&mut R, &ActionContext));

/// A component type that receives routed actions for one action map.
/// Concrete types declare a static binding table; roster tracking and
/// fan-out are generic.
///
/// Handlers are expected to be total over their declared input domain;
/// nothing here catches a handler failure.
pub trait KeyActionReceiver: Component<Mutability = Mutable> + Sized {
    const MAP: ActionMap;

    fn bindings() -> &'static [ActionBinding<Self>];

    /// Table lookup. A receiver listening to only a subset of its map is
    /// normal, so a miss is debug-logged and ignored.
    fn handle(&mut self, action: Action, ctx: &ActionContext) {
        match Self::bindings().iter().find(|(bound, _)| *bound == action) {
            Some((_, handler)) => handler(self, ctx),
            None => debug!("[INPUT] unhandled action {:?} on {:?}", action, Self::MAP),
        }
    }
}

/// Live instances of one receiver kind, in registration order.
#[derive(Resource)]
pub struct ReceiverRoster<R: KeyActionReceiver> {
    live: Vec<Entity>,
    _marker: PhantomData<R>,
}

impl<R: KeyActionReceiver> Default for ReceiverRoster<R> {
    fn default() -> Self {
        Self {
            live: Vec::new(),
            _marker: PhantomData,
        }
    }
}

impl<R: KeyActionReceiver> ReceiverRoster<R> {
    /// Registers the kind's dispatcher on the 0 -> 1 live-count edge.
    pub fn note_enabled(&mut self, entity: Entity, registry: &mut ActionRegistry) {
        if self.live.contains(&entity) {
            return;
        }
        if self.live.is_empty() {
            registry.register(R::MAP);
        }
        self.live.push(entity);
    }

    /// Unregisters the kind's dispatcher on the 1 -> 0 live-count edge.
    pub fn note_disabled(&mut self, entity: Entity, registry: &mut ActionRegistry) {
        let before = self.live.len();
        self.live.retain(|&live| live != entity);
        if before > 0 && self.live.is_empty() {
            registry.unregister(R::MAP);
        }
    }

    pub fn live(&self) -> &[Entity] {
        &self.live
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

pub(crate) fn track_receivers<R: KeyActionReceiver>(
    mut roster: ResMut<ReceiverRoster<R>>,
    mut registry: ResMut<ActionRegistry>,
    added: Query<Entity, Added<R>>,
    mut removed: RemovedComponents<R>,
) {
    for entity in &added {
        roster.note_enabled(entity, &mut registry);
    }
    for entity in removed.read() {
        roster.note_disabled(entity, &mut registry);
    }
}

pub(crate) fn fan_out_actions<R: KeyActionReceiver>(
    mut registry: ResMut<ActionRegistry>,
    roster: Res<ReceiverRoster<R>>,
    mut receivers: Query<&mut R>,
) {
    let routed = registry.drain(R::MAP);
    for event in routed {
        for &entity in roster.live() {
            // An instance despawned earlier in the frame just misses the query.
            if let Ok(mut receiver) = receivers.get_mut(entity) {
                receiver.handle(event.action, &event.ctx);
            }
        }
    }
}

/// App extension wiring a receiver kind's roster and generic systems.
pub trait ReceiverAppExt {
    fn add_key_action_receiver<R: KeyActionReceiver>(&mut self) -> &mut Self;
}

impl ReceiverAppExt for App {
    fn add_key_action_receiver<R: KeyActionReceiver>(&mut self) -> &mut Self {
        self.init_resource::<ReceiverRoster<R>>().add_systems(
            Update,
            (
                track_receivers::<R>.in_set(InputSet::Track),
                fan_out_actions::<R>.in_set(InputSet::FanOut),
            ),
        )
    }
}
