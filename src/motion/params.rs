//! Motion domain: designer-tunable controller parameters.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_JUMP_HEIGHT: f32 = 150.0;
pub const DEFAULT_MIN_JUMP_HEIGHT: f32 = 60.0;
pub const DEFAULT_DOUBLE_JUMP_HEIGHT: f32 = 100.0;
pub const DEFAULT_JUMP_DURATION: f32 = 0.3;

/// Which way horizontal input resolves when left and right are both held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, Reflect)]
pub enum TieBreak {
    /// Right overrides left.
    #[default]
    RightWins,
    /// Opposing inputs cancel out.
    Neutral,
}

/// Tuning for jump arcs, air jumps, grace windows and horizontal control.
///
/// Heights are measured against the gravity direction: positive heights give
/// downward (+y) gravity, negative heights invert it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Reflect)]
#[serde(default)]
pub struct ControllerParams {
    /// Apex height of a ground jump while the button stays held.
    pub max_jump_height: f32,
    /// Apex height of a ground jump released immediately.
    pub min_jump_height: f32,
    /// Apex height of an air jump.
    pub double_jump_height: f32,
    /// Seconds to reach `max_jump_height`.
    pub jump_duration: f32,
    pub falling_gravity_multiplier: f32,
    /// Air jumps granted per airborne phase (0 = none).
    pub double_jumps: u32,
    pub max_acceleration: f32,
    pub friction: f32,
    /// Seconds after leaving the ground during which a ground jump is still allowed.
    pub coyote_time: f32,
    /// Seconds a jump press is remembered before landing.
    pub jump_buffer: f32,
    pub tie_break: TieBreak,
}

impl Default for ControllerParams {
    fn default() -> Self {
        Self {
            max_jump_height: DEFAULT_MAX_JUMP_HEIGHT,
            min_jump_height: DEFAULT_MIN_JUMP_HEIGHT,
            double_jump_height: DEFAULT_DOUBLE_JUMP_HEIGHT,
            jump_duration: DEFAULT_JUMP_DURATION,
            falling_gravity_multiplier: 1.5,
            double_jumps: 1,
            max_acceleration: 10_000.0,
            friction: 20.0,
            coyote_time: 0.1,
            jump_buffer: 0.1,
            tie_break: TieBreak::RightWins,
        }
    }
}

impl ControllerParams {
    pub fn coyote_enabled(&self) -> bool {
        self.coyote_time > 0.0
    }

    pub fn jump_buffer_enabled(&self) -> bool {
        self.jump_buffer > 0.0
    }

    /// Check the invariants the derived constants rely on.
    pub fn validate(&self) -> Result<(), ParamsError> {
        let floats = [
            ("max_jump_height", self.max_jump_height),
            ("min_jump_height", self.min_jump_height),
            ("double_jump_height", self.double_jump_height),
            ("jump_duration", self.jump_duration),
            ("falling_gravity_multiplier", self.falling_gravity_multiplier),
            ("max_acceleration", self.max_acceleration),
            ("friction", self.friction),
            ("coyote_time", self.coyote_time),
            ("jump_buffer", self.jump_buffer),
        ];
        for (field, value) in floats {
            if !value.is_finite() {
                return Err(ParamsError::NonFinite { field, value });
            }
        }

        if self.jump_duration <= 0.0 {
            return Err(ParamsError::NonPositiveDuration(self.jump_duration));
        }
        if self.max_jump_height == 0.0 {
            return Err(ParamsError::ZeroHeight {
                field: "max_jump_height",
            });
        }
        if self.min_jump_height == 0.0 {
            return Err(ParamsError::ZeroHeight {
                field: "min_jump_height",
            });
        }
        if self.min_jump_height.signum() != self.max_jump_height.signum() {
            return Err(ParamsError::MixedGravityDirection {
                min: self.min_jump_height,
                max: self.max_jump_height,
            });
        }
        if self.min_jump_height.abs() > self.max_jump_height.abs() {
            return Err(ParamsError::MinAboveMax {
                min: self.min_jump_height,
                max: self.max_jump_height,
            });
        }
        if self.friction < 0.0 {
            return Err(ParamsError::Negative {
                field: "friction",
                value: self.friction,
            });
        }
        if self.max_acceleration < 0.0 {
            return Err(ParamsError::Negative {
                field: "max_acceleration",
                value: self.max_acceleration,
            });
        }

        Ok(())
    }
}

/// Parameter combinations that would produce NaN/Inf or nonsensical motion.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamsError {
    NonFinite { field: &'static str, value: f32 },
    NonPositiveDuration(f32),
    ZeroHeight { field: &'static str },
    MixedGravityDirection { min: f32, max: f32 },
    MinAboveMax { min: f32, max: f32 },
    Negative { field: &'static str, value: f32 },
}

impl std::fmt::Display for ParamsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonFinite { field, value } => {
                write!(f, "{} must be finite, got {}", field, value)
            }
            Self::NonPositiveDuration(value) => {
                write!(f, "jump_duration must be positive, got {}", value)
            }
            Self::ZeroHeight { field } => write!(f, "{} must not be zero", field),
            Self::MixedGravityDirection { min, max } => write!(
                f,
                "min_jump_height ({}) and max_jump_height ({}) point in different gravity directions",
                min, max
            ),
            Self::MinAboveMax { min, max } => write!(
                f,
                "min_jump_height ({}) exceeds max_jump_height ({})",
                min, max
            ),
            Self::Negative { field, value } => {
                write!(f, "{} must not be negative, got {}", field, value)
            }
        }
    }
}

impl std::error::Error for ParamsError {}
