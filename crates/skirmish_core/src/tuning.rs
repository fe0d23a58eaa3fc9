//! Local movement tuning.

/// Base horizontal acceleration.
pub const BASE_SPEED: f32 = 150.0;

/// Base vertical impulse applied on jump.
pub const BASE_JUMP_IMPULSE: f32 = 150.0;

/// Movement constants the shop can upgrade.
///
/// Local only: these values are never reported to the peer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MovementTuning {
    /// Horizontal acceleration per unit of input.
    pub speed: f32,
    /// Vertical velocity added by a jump.
    pub jump_impulse: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            speed: BASE_SPEED,
            jump_impulse: BASE_JUMP_IMPULSE,
        }
    }
}
