//! Forms domain: the Bulldozer kit.

use crate::forms::AbilityContext;

const PUSHING_SPEED_FACTOR: f32 = 0.6;

/// Bulldozer: a pushing stance that plows barrier gates and shoves dynamic
/// obstacles through a mass multiplier. Slower while engaged.
#[derive(Debug, Clone, PartialEq)]
pub struct BulldozerKit {
    pub base_speed: f32,
    pub mass_factor: f32,
    pub pushing: bool,
}

impl BulldozerKit {
    pub fn toggle_pushing(&mut self, ctx: &mut AbilityContext) {
        self.pushing = !self.pushing;
        // The stance modulates the carried movement speed as well
        ctx.state.move_speed = self.current_speed();
        ctx.cues.push(if self.pushing {
            "dozer_engage"
        } else {
            "dozer_release"
        });
    }

    pub fn current_speed(&self) -> f32 {
        if self.pushing {
            self.base_speed * PUSHING_SPEED_FACTOR
        } else {
            self.base_speed
        }
    }
}
