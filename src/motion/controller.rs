//! Motion domain: the platformer controller and its per-step update.

use bevy::prelude::*;

use super::{
    ControllerEvent, ControllerParams, DerivedConstants, GraceWindows, GravityPolicy, JumpType,
    KinematicBody, ObserverId, Observers, ParamsError, SlideResult, horizontal_acceleration,
    integrate,
};

/// Directional input polled once per physics step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveInput {
    pub left: bool,
    pub right: bool,
}

/// Mutable motion state, updated every physics step.
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub struct MotionState {
    pub velocity: Vec2,
    /// Recomputed every step.
    pub acceleration: Vec2,
    pub jumps_left: u32,
    pub jump_type: JumpType,
    pub holding_jump: bool,
    pub was_on_ground: bool,
}

/// Turns directional and jump input into a velocity for a single body.
///
/// Jump presses and releases arrive between steps through [`press_jump`] and
/// [`release_jump`]; [`step`] then integrates one fixed timestep and hands the
/// result to the body for collision resolution.
///
/// [`press_jump`]: Self::press_jump
/// [`release_jump`]: Self::release_jump
/// [`step`]: Self::step
#[derive(Component, Debug)]
pub struct PlatformerController {
    pub(super) params: ControllerParams,
    pub(super) derived: DerivedConstants,
    pub(super) state: MotionState,
    pub(super) grace: GraceWindows,
    pub(super) observers: Observers,
    /// A jump executed since the last step.
    pub(super) jumped_since_step: bool,
}

impl PlatformerController {
    pub fn new(params: ControllerParams) -> Result<Self, ParamsError> {
        params.validate()?;
        let derived = DerivedConstants::from_params(&params);

        debug!(
            "Controller built: gravity={:.1}, jump_velocity={:.1}, double_jump_velocity={:.1}, release_multiplier={:.3}",
            derived.default_gravity,
            derived.jump_velocity,
            derived.double_jump_velocity,
            derived.release_gravity_multiplier
        );

        Ok(Self {
            grace: GraceWindows::new(params.coyote_time, params.jump_buffer),
            state: MotionState {
                jumps_left: params.double_jumps,
                ..default()
            },
            params,
            derived,
            observers: Observers::default(),
            jumped_since_step: false,
        })
    }

    pub fn params(&self) -> &ControllerParams {
        &self.params
    }

    pub fn derived(&self) -> &DerivedConstants {
        &self.derived
    }

    pub fn state(&self) -> &MotionState {
        &self.state
    }

    pub fn grace(&self) -> &GraceWindows {
        &self.grace
    }

    pub fn velocity(&self) -> Vec2 {
        self.state.velocity
    }

    /// Overwrite the velocity, e.g. after the host's solver changed it.
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.state.velocity = velocity;
    }

    pub fn subscribe(
        &mut self,
        observer: impl FnMut(&ControllerEvent) + Send + Sync + 'static,
    ) -> ObserverId {
        self.observers.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Touching the surface gravity pulls toward.
    pub fn is_on_ground<B: KinematicBody + ?Sized>(&self, body: &B) -> bool {
        let contacts = body.contacts();
        contacts.touches_ground_side(self.derived.default_gravity)
    }

    /// Advance one fixed physics step of length `dt`.
    pub fn step<B: KinematicBody + ?Sized>(
        &mut self,
        input: MoveInput,
        body: &mut B,
        dt: f32,
    ) -> SlideResult {
        if !(dt.is_finite() && dt > 0.0) {
            warn!("Ignoring physics step with dt={}", dt);
            return body.move_and_slide(self.state.velocity, 0.0);
        }

        self.grace.advance(dt);
        let on_ground = self.is_on_ground(body);

        self.state.acceleration.x = horizontal_acceleration(
            input,
            self.params.max_acceleration,
            self.params.tie_break,
        );

        if on_ground && !self.state.was_on_ground {
            self.land();
        }

        if on_ground && self.state.jump_type == JumpType::None {
            self.grace.start_coyote();
            self.state.jumps_left = self.params.double_jumps;
        }

        let policy = GravityPolicy {
            falling: self.params.falling_gravity_multiplier,
            release: self.derived.release_gravity_multiplier,
        };
        let gravity = self.derived.default_gravity;
        self.state.acceleration.y = gravity
            * policy.multiplier(
                self.state.velocity.y,
                gravity,
                self.state.holding_jump,
                self.state.jump_type,
            );

        self.state.velocity = integrate(
            self.state.velocity,
            self.state.acceleration,
            self.params.friction,
            dt,
        );

        self.state.was_on_ground = on_ground;
        self.jumped_since_step = false;

        let result = body.move_and_slide(self.state.velocity, dt);
        self.state.velocity = result.velocity;
        result
    }
}
