//! Motion domain: per-step horizontal control and gravity integration.

use bevy::prelude::*;

use super::{JumpType, MoveInput, TieBreak};

/// Horizontal acceleration for the held directions.
pub fn horizontal_acceleration(
    input: MoveInput,
    max_acceleration: f32,
    tie_break: TieBreak,
) -> f32 {
    match (input.left, input.right, tie_break) {
        (true, true, TieBreak::RightWins) => max_acceleration,
        (true, true, TieBreak::Neutral) => 0.0,
        (true, false, _) => -max_acceleration,
        (false, true, _) => max_acceleration,
        (false, false, _) => 0.0,
    }
}

/// Scales gravity by vertical phase: heavier while falling, heavier while
/// rising after an early release of a ground jump.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityPolicy {
    pub falling: f32,
    pub release: f32,
}

impl GravityPolicy {
    pub fn multiplier(
        &self,
        velocity_y: f32,
        gravity: f32,
        holding_jump: bool,
        jump_type: JumpType,
    ) -> f32 {
        let along_gravity = velocity_y * sign(gravity);
        if along_gravity > 0.0 {
            self.falling
        } else if along_gravity < 0.0 && !holding_jump && jump_type != JumpType::Air {
            self.release
        } else {
            1.0
        }
    }
}

/// Exponential-style decay; never flips the sign of `velocity_x`.
pub fn apply_friction(velocity_x: f32, friction: f32, dt: f32) -> f32 {
    velocity_x / (1.0 + dt * friction)
}

/// Friction first, then acceleration.
pub fn integrate(velocity: Vec2, acceleration: Vec2, friction: f32, dt: f32) -> Vec2 {
    Vec2::new(apply_friction(velocity.x, friction, dt), velocity.y) + acceleration * dt
}

// f32::signum maps 0.0 to 1.0; gravity of zero must not pick a side.
fn sign(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}
