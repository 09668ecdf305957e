//! Player domain: actor components, physics layers, and movement state.

use avian3d::prelude::*;
use bevy::prelude::*;
use std::collections::HashSet;

use crate::input::{Action, ActionBinding, ActionContext, ActionMap, KeyActionReceiver};

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Walkable surfaces (floors, platforms)
    Ground,
    /// The player character
    Player,
    /// Dynamic obstacles only a pushing Bulldozer can shove
    Pushable,
    /// Static gates a pushing Bulldozer plows through
    Barrier,
    /// Trigger volumes (recharge stations etc.)
    Sensor,
}

#[derive(Component, Debug)]
pub struct Player;

/// Cardinal facing on the movement plane (Up is away from the camera).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum MoveAxis {
    #[default]
    Horizontal,
    Vertical,
}

/// Movement-facing state for the player actor. Grounded transitions are
/// gated by the airborne-grace timer so a launch impulse cannot be cancelled
/// by a same-frame ground contact.
#[derive(Component, Debug)]
pub struct PlayerState {
    /// Deadzone-filtered 2-axis intent, applied camera-relative each step
    pub move_intent: Vec2,
    /// Carried over from the active form's kit on every swap
    pub move_speed: f32,
    pub jumping: bool,
    pub facing: Facing,
    /// Discretized 8-direction facing consumed by hookable targeting
    pub anim_facing: Vec2,
    grounded: bool,
    airborne_grace: f32,
    last_crossed: MoveAxis,
    was_above_x: bool,
    was_above_y: bool,
    move_locks: HashSet<String>,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            move_intent: Vec2::ZERO,
            move_speed: 0.0,
            jumping: false,
            facing: Facing::default(),
            anim_facing: Vec2::X,
            grounded: false,
            airborne_grace: 0.0,
            last_crossed: MoveAxis::default(),
            was_above_x: false,
            was_above_y: false,
            move_locks: HashSet::new(),
        }
    }
}

impl PlayerState {
    pub fn with_speed(move_speed: f32) -> Self {
        Self {
            move_speed,
            ..Self::default()
        }
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn airborne_grace(&self) -> f32 {
        self.airborne_grace
    }

    /// Ignored while the airborne-grace timer is still counting down.
    /// Landing clears the jumping flag and whatever grace remains.
    pub fn set_grounded(&mut self, grounded: bool) {
        if self.airborne_grace > 0.0 {
            return;
        }
        if grounded && !self.grounded {
            self.jumping = false;
        }
        self.grounded = grounded;
    }

    /// Arms the grace window after a launch impulse; ground contact reported
    /// during the window is discarded.
    pub fn register_airborne_impulse(&mut self, grace_secs: f32) {
        self.airborne_grace = self.airborne_grace.max(grace_secs);
        self.grounded = false;
        self.jumping = true;
    }

    pub fn tick_grace(&mut self, dt: f32) {
        self.airborne_grace = (self.airborne_grace - dt).max(0.0);
    }

    pub fn can_move(&self) -> bool {
        self.move_locks.is_empty()
    }

    pub fn lock_movement(&mut self, source: impl Into<String>) {
        self.move_locks.insert(source.into());
    }

    pub fn unlock_movement(&mut self, source: &str) {
        self.move_locks.remove(source);
    }

    /// Updates facing from the raw axis. The dominant axis wins; an exact
    /// tie goes to the axis that most recently crossed the deadzone from
    /// below. Also refreshes the 8-direction anim facing while the stick
    /// is deflected.
    pub fn update_facing(&mut self, axis: Vec2, deadzone: f32) {
        let above_x = axis.x.abs() > deadzone;
        let above_y = axis.y.abs() > deadzone;

        if above_x && !self.was_above_x {
            self.last_crossed = MoveAxis::Horizontal;
        }
        if above_y && !self.was_above_y {
            self.last_crossed = MoveAxis::Vertical;
        }
        self.was_above_x = above_x;
        self.was_above_y = above_y;

        let dominant = if axis.x.abs() > axis.y.abs() {
            MoveAxis::Horizontal
        } else if axis.y.abs() > axis.x.abs() {
            MoveAxis::Vertical
        } else {
            self.last_crossed
        };

        match dominant {
            MoveAxis::Horizontal if above_x => {
                self.facing = if axis.x >= 0.0 {
                    Facing::Right
                } else {
                    Facing::Left
                };
            }
            MoveAxis::Vertical if above_y => {
                self.facing = if axis.y >= 0.0 { Facing::Up } else { Facing::Down };
            }
            _ => {}
        }

        if above_x || above_y {
            self.anim_facing = snap_to_octant(axis);
        }
    }
}

/// Snaps a deflected axis to the nearest of 8 unit directions.
fn snap_to_octant(axis: Vec2) -> Vec2 {
    const DIAG: f32 = std::f32::consts::FRAC_1_SQRT_2;
    const OCTANTS: [Vec2; 8] = [
        Vec2::new(1.0, 0.0),
        Vec2::new(DIAG, DIAG),
        Vec2::new(0.0, 1.0),
        Vec2::new(-DIAG, DIAG),
        Vec2::new(-1.0, 0.0),
        Vec2::new(-DIAG, -DIAG),
        Vec2::new(0.0, -1.0),
        Vec2::new(DIAG, -DIAG),
    ];

    let angle = axis.y.atan2(axis.x);
    let index = (angle / std::f32::consts::FRAC_PI_4).round() as i32;
    OCTANTS[index.rem_euclid(8) as usize]
}

/// Receiver for the Player action map. Handlers record intent; the apply
/// phase and the form-ability system consume it.
#[derive(Component, Debug, Default)]
pub struct PlayerReceiver {
    pub move_axis: Vec2,
    pub ability1: bool,
    pub ability2: bool,
    pub ability3: bool,
    pub meditate_pressed: bool,
    pub meditate_released: bool,
}

fn on_move(receiver: &mut PlayerReceiver, ctx: &ActionContext) {
    receiver.move_axis = ctx.axis;
}

fn on_ability1(receiver: &mut PlayerReceiver, ctx: &ActionContext) {
    if ctx.pressed {
        receiver.ability1 = true;
    }
}

fn on_ability2(receiver: &mut PlayerReceiver, ctx: &ActionContext) {
    if ctx.pressed {
        receiver.ability2 = true;
    }
}

fn on_ability3(receiver: &mut PlayerReceiver, ctx: &ActionContext) {
    if ctx.pressed {
        receiver.ability3 = true;
    }
}

fn on_meditate(receiver: &mut PlayerReceiver, ctx: &ActionContext) {
    if ctx.pressed {
        receiver.meditate_pressed = true;
    } else {
        receiver.meditate_released = true;
    }
}

impl KeyActionReceiver for PlayerReceiver {
    const MAP: ActionMap = ActionMap::Player;

    // Interact stays on the action map for NPC/world receivers; the player
    // listening to a subset of its map is the expected case.
    fn bindings() -> &'static [ActionBinding<Self>] {
        &[
            (Action::Move, on_move),
            (Action::Ability1, on_ability1),
            (Action::Ability2, on_ability2),
            (Action::Ability3, on_ability3),
            (Action::Meditate, on_meditate),
        ]
    }
}
