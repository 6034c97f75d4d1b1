//! Motion domain: jump requests, ground/air jumps and landing.

use bevy::prelude::*;

use super::{ControllerEvent, KinematicBody, PlatformerController};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum JumpType {
    /// Grounded, no jump in progress.
    #[default]
    None,
    /// Airborne from a ground jump.
    Ground,
    /// Airborne from an air jump.
    Air,
}

/// What a jump press turned into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpOutcome {
    Ground,
    Air,
    /// Remembered in the jump buffer for the next landing.
    Buffered,
    /// Nothing possible and buffering is disabled.
    Ignored,
}

impl PlatformerController {
    /// Handle the press edge of the jump action.
    pub fn press_jump<B: KinematicBody + ?Sized>(&mut self, body: &B) -> JumpOutcome {
        self.state.holding_jump = true;
        let on_ground = self.is_on_ground(body);

        if self.ground_jump_allowed(on_ground) {
            self.ground_jump();
            JumpOutcome::Ground
        } else if self.air_jump_allowed(on_ground) {
            self.air_jump();
            JumpOutcome::Air
        } else if self.grace.start_jump_buffer() {
            debug!("Jump buffered");
            JumpOutcome::Buffered
        } else {
            JumpOutcome::Ignored
        }
    }

    /// Handle the release edge of the jump action.
    pub fn release_jump(&mut self) {
        self.state.holding_jump = false;
    }

    pub fn can_ground_jump<B: KinematicBody + ?Sized>(&self, body: &B) -> bool {
        self.ground_jump_allowed(self.is_on_ground(body))
    }

    pub fn can_double_jump<B: KinematicBody + ?Sized>(&self, body: &B) -> bool {
        self.air_jump_allowed(self.is_on_ground(body))
    }

    fn ground_jump_allowed(&self, on_ground: bool) -> bool {
        self.grace.is_coyote_active() || on_ground
    }

    fn air_jump_allowed(&self, on_ground: bool) -> bool {
        self.state.jumps_left > 0 && !self.ground_jump_allowed(on_ground)
    }

    pub(super) fn ground_jump(&mut self) {
        self.state.velocity.y = -self.derived.jump_velocity;
        self.state.jump_type = JumpType::Ground;
        self.state.jumps_left = self.params.double_jumps;
        self.grace.stop_coyote();
        self.jumped_since_step = true;

        debug!("Ground jump: air_jumps_remaining={}", self.state.jumps_left);
        self.observers.emit(ControllerEvent::Jumped { ground: true });
    }

    /// Spend one air jump. With none left this logs and changes nothing.
    pub fn air_jump(&mut self) -> bool {
        if self.state.jumps_left == 0 {
            warn!("Air jump requested with no air jumps left");
            return false;
        }

        self.state.jumps_left -= 1;
        self.state.velocity.y = -self.derived.double_jump_velocity;
        self.state.jump_type = JumpType::Air;
        self.jumped_since_step = true;

        debug!("Air jump: air_jumps_remaining={}", self.state.jumps_left);
        self.observers.emit(ControllerEvent::Jumped { ground: false });
        true
    }

    /// Airborne-to-grounded edge.
    pub(super) fn land(&mut self) {
        debug!(
            "Landed: jump_type={:?}, air_jumps_remaining={}",
            self.state.jump_type, self.state.jumps_left
        );
        self.observers.emit(ControllerEvent::HitGround);

        // A press between touchdown and this step already jumped off the ground.
        if self.jumped_since_step {
            return;
        }

        self.state.jump_type = JumpType::None;
        if self.grace.is_buffer_active() {
            self.grace.stop_jump_buffer();
            self.ground_jump();
        }
    }
}
