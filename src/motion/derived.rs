//! Motion domain: physical constants derived from the tuning parameters.

use bevy::prelude::*;

use super::ControllerParams;

/// Gravity that brings a jump launched at `jump_velocity(height, duration)`
/// to rest exactly `height` above its start after `duration` seconds.
pub fn gravity(height: f32, duration: f32) -> f32 {
    2.0 * height / (duration * duration)
}

pub fn jump_velocity(height: f32, duration: f32) -> f32 {
    2.0 * height / duration
}

/// Launch speed reaching `height` under an already known `gravity`.
pub fn jump_velocity_for_gravity(height: f32, gravity: f32) -> f32 {
    (2.0 * gravity * height).abs().sqrt() * height.signum()
}

/// Gravity scale that caps a jump launched at `jump_velocity` at `min_height`.
pub fn release_gravity_multiplier(jump_velocity: f32, min_height: f32, gravity: f32) -> f32 {
    let release_gravity = jump_velocity * jump_velocity / (2.0 * min_height);
    release_gravity / gravity
}

#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct DerivedConstants {
    /// Sign gives the "down" direction.
    pub default_gravity: f32,
    pub jump_velocity: f32,
    pub double_jump_velocity: f32,
    pub release_gravity_multiplier: f32,
}

impl DerivedConstants {
    pub fn from_params(params: &ControllerParams) -> Self {
        let default_gravity = gravity(params.max_jump_height, params.jump_duration);
        let jump_velocity = jump_velocity(params.max_jump_height, params.jump_duration);

        Self {
            default_gravity,
            jump_velocity,
            double_jump_velocity: jump_velocity_for_gravity(
                params.double_jump_height,
                default_gravity,
            ),
            release_gravity_multiplier: release_gravity_multiplier(
                jump_velocity,
                params.min_jump_height,
                default_gravity,
            ),
        }
    }
}
