//! Input domain: the action registry and its per-kind dispatch slots.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::input::actions::{Action, ActionContext, ActionMap};

/// One routed action awaiting fan-out to a kind's live receivers.
#[derive(Debug, Clone, Copy)]
pub struct RoutedAction {
    pub action: Action,
    pub ctx: ActionContext,
}

#[derive(Debug, Default)]
struct DispatchSlot {
    queue: Vec<RoutedAction>,
}

/// Maps each receiver kind to its dispatch slot. A slot exists iff at least
/// one receiver of that kind is live. The slot is a mailbox: dispatch pushes
/// into it, and the kind's fan-out system drains it later in the same frame,
/// before the apply phase runs.
#[derive(Resource, Debug, Default)]
pub struct ActionRegistry {
    slots: HashMap<ActionMap, DispatchSlot>,
}

impl ActionRegistry {
    /// Adds a dispatch slot for the kind. Double registration is guarded
    /// and only warns.
    pub fn register(&mut self, map: ActionMap) {
        if self.slots.contains_key(&map) {
            warn!("[INPUT] dispatcher for {:?} already registered", map);
            return;
        }
        self.slots.insert(map, DispatchSlot::default());
    }

    /// Removes the kind's slot; no-op when absent. Undelivered events in
    /// the slot are dropped with it.
    pub fn unregister(&mut self, map: ActionMap) {
        self.slots.remove(&map);
    }

    pub fn is_registered(&self, map: ActionMap) -> bool {
        self.slots.contains_key(&map)
    }

    /// Routes one action to the kind's slot, or logs and drops it when no
    /// dispatcher is registered. Action sets grow independently of receiver
    /// code, so a miss is never fatal.
    pub fn dispatch(&mut self, map: ActionMap, action: Action, ctx: ActionContext) {
        match self.slots.get_mut(&map) {
            Some(slot) => slot.queue.push(RoutedAction { action, ctx }),
            None => warn!("[INPUT] no dispatcher for {:?}, dropping {:?}", map, action),
        }
    }

    /// Snapshot-drains the kind's queue for this frame's fan-out. Receivers
    /// that disable themselves mid-fan-out are removed next frame; the
    /// snapshot keeps iteration stable.
    pub fn drain(&mut self, map: ActionMap) -> Vec<RoutedAction> {
        self.slots
            .get_mut(&map)
            .map(|slot| std::mem::take(&mut slot.queue))
            .unwrap_or_default()
    }

    /// Pending event count for a kind, for introspection and tests.
    pub fn pending(&self, map: ActionMap) -> usize {
        self.slots.get(&map).map(|slot| slot.queue.len()).unwrap_or(0)
    }
}
