//! Forms domain: the Ball kit.

use crate::forms::{AbilityContext, launch};

/// Ball: a jump with a time-windowed double jump, plus a short forgiveness
/// grace so a first jump still counts just after rolling off an edge.
#[derive(Debug, Clone, PartialEq)]
pub struct BallKit {
    pub base_speed: f32,
    pub jump_speed: f32,
    pub double_jump_speed: f32,
    /// Second press accepted within this window after the first jump
    pub double_window: f32,
    /// First jump still accepted this long after leaving the ground
    pub forgiveness: f32,
    jumps_used: u8,
    window_timer: f32,
    off_ground_timer: f32,
}

impl BallKit {
    pub fn new(
        base_speed: f32,
        jump_speed: f32,
        double_jump_speed: f32,
        double_window: f32,
        forgiveness: f32,
    ) -> Self {
        Self {
            base_speed,
            jump_speed,
            double_jump_speed,
            double_window,
            forgiveness,
            jumps_used: 0,
            window_timer: 0.0,
            off_ground_timer: 0.0,
        }
    }

    pub fn jump(&mut self, ctx: &mut AbilityContext) {
        let first_allowed = ctx.state.is_grounded()
            || (self.jumps_used == 0 && self.off_ground_timer < self.forgiveness);

        if first_allowed {
            launch(ctx, self.jump_speed);
            self.jumps_used = 1;
            self.window_timer = 0.0;
            ctx.cues.push("ball_jump");
        } else if self.jumps_used == 1 && self.window_timer < self.double_window {
            launch(ctx, self.double_jump_speed);
            self.jumps_used = 2;
            ctx.cues.push("ball_double_jump");
        }
        // Exhausted presses are dropped silently
    }

    pub fn tick(&mut self, dt: f32, grounded: bool) {
        if grounded {
            self.reset();
        } else {
            self.off_ground_timer += dt;
            if self.jumps_used == 1 {
                self.window_timer += dt;
            }
        }
    }

    pub(crate) fn reset(&mut self) {
        self.jumps_used = 0;
        self.window_timer = 0.0;
        self.off_ground_timer = 0.0;
    }

    pub fn jumps_used(&self) -> u8 {
        self.jumps_used
    }
}
