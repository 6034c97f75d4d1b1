//! Motion domain: engine-agnostic jump/gravity state machine and velocity integrator.

mod body;
mod controller;
mod derived;
mod events;
mod grace;
mod integrator;
mod jump;
mod params;
#[cfg(test)]
mod tests;

pub use body::{KinematicBody, PlaneBody, SlideResult, SurfaceContacts};
pub use controller::{MotionState, MoveInput, PlatformerController};
pub use derived::{
    DerivedConstants, gravity, jump_velocity, jump_velocity_for_gravity,
    release_gravity_multiplier,
};
pub use events::{ControllerEvent, Observer, ObserverId, Observers};
pub use grace::{Countdown, GraceTimer, GraceWindows};
pub use integrator::{GravityPolicy, apply_friction, horizontal_acceleration, integrate};
pub use jump::{JumpOutcome, JumpType};
pub use params::{
    ControllerParams, DEFAULT_DOUBLE_JUMP_HEIGHT, DEFAULT_JUMP_DURATION, DEFAULT_MAX_JUMP_HEIGHT,
    DEFAULT_MIN_JUMP_HEIGHT, ParamsError, TieBreak,
};
