//! Forms domain: the Frog kit.

use crate::forms::{AbilityContext, launch};

/// Frog: a single jump gated by the polled grounded state, plus a tongue
/// hook that pulls toward the targeted hookable.
#[derive(Debug, Clone, PartialEq)]
pub struct FrogKit {
    pub base_speed: f32,
    pub jump_speed: f32,
    pub hook_pull_speed: f32,
}

impl FrogKit {
    pub fn jump(&mut self, ctx: &mut AbilityContext) {
        // Ungrounded presses are dropped, not reported
        if !ctx.state.is_grounded() {
            return;
        }
        launch(ctx, self.jump_speed);
        ctx.cues.push("frog_jump");
    }

    pub fn tongue_hook(&mut self, ctx: &mut AbilityContext) {
        let Some(target) = ctx.hook_target else {
            return;
        };
        let Some(direction) = (target - ctx.position).try_normalize() else {
            return;
        };

        ctx.velocity.0 = direction * self.hook_pull_speed;
        ctx.state.register_airborne_impulse(super::AIRBORNE_GRACE);
        ctx.cues.push("frog_tongue");
    }
}
