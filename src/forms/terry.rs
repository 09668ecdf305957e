//! Forms domain: the neutral kit.

/// Terry has no abilities; the neutral form only carries its walk speed
/// and is always available.
#[derive(Debug, Clone, PartialEq)]
pub struct TerryKit {
    pub base_speed: f32,
}
