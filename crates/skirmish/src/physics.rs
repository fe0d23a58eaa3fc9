//! # Local Player Physics
//!
//! Kinematic controller for the local player only. Remote players are never
//! simulated; their avatars glide between reported positions.
//!
//! Per tick, in this order:
//! 1. horizontal damping
//! 2. gravity
//! 3. directional input
//! 4. ground probe against obstacles (only while descending)
//! 5. integrate along the facing's right/back axes, vertical kept separate
//! 6. floor clamp at eye height

use std::f32::consts::FRAC_PI_2;

use skirmish_core::{MovementTuning, Player};
use skirmish_shared::math::{Euler, Vec3};

use crate::config::PhysicsConfig;

/// Held movement keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MovementInput {
    /// Forward
    pub forward: bool,
    /// Backward
    pub backward: bool,
    /// Strafe left
    pub left: bool,
    /// Strafe right
    pub right: bool,
}

/// Velocity of the local player, persistent across frames.
///
/// `velocity.x` and `velocity.z` are in the facing's local frame
/// (right and back); `velocity.y` is world-vertical.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct KinematicState {
    /// Current velocity
    pub velocity: Vec3,
    /// Standing on the floor or a crate
    pub grounded: bool,
}

impl KinematicState {
    /// Advances `player` by `dt` seconds.
    ///
    /// `ground_probe(eye, length)` reports whether a downward segment of
    /// `length` from `eye` touches an obstacle.
    pub fn integrate(
        &mut self,
        player: &mut Player,
        input: &MovementInput,
        tuning: &MovementTuning,
        config: &PhysicsConfig,
        dt: f32,
        ground_probe: impl FnOnce(Vec3, f32) -> bool,
    ) {
        let v = &mut self.velocity;

        v.x -= v.x * config.damping * dt;
        v.z -= v.z * config.damping * dt;
        v.y -= config.gravity * config.mass * dt;

        let step = tuning.speed * dt;
        if input.forward {
            v.z -= step;
        }
        if input.backward {
            v.z += step;
        }
        if input.left {
            v.x -= step;
        }
        if input.right {
            v.x += step;
        }

        if v.y < 0.0
            && ground_probe(
                player.position,
                config.player_height + config.ground_probe_epsilon,
            )
        {
            v.y = 0.0;
            self.grounded = true;
        }

        let old_y = player.position.y;
        let mut position = player.position
            + player.rotation.right() * (v.x * dt)
            + player.rotation.back() * (v.z * dt);
        position.y = old_y + v.y * dt;

        if position.y < config.player_height {
            v.y = 0.0;
            position.y = config.player_height;
            self.grounded = true;
        }

        player.position = position;
    }

    /// Jumps if standing. Returns true if the jump happened.
    pub fn jump(&mut self, tuning: &MovementTuning) -> bool {
        if !self.grounded {
            return false;
        }
        self.grounded = false;
        self.velocity.y += tuning.jump_impulse;
        true
    }

    /// Stops all motion.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Rotates the view by a mouse delta. Pitch stays within straight up/down.
pub fn look(rotation: &mut Euler, dx: f32, dy: f32, sensitivity: f32) {
    rotation.y -= dx * sensitivity;
    rotation.x -= dy * sensitivity;
    rotation.x = rotation.x.clamp(-FRAC_PI_2, FRAC_PI_2);
}
