//! Motion domain: the collision collaborator the controller drives each step.
//!
//! The controller works in screen space: +y points down, so positive gravity
//! pulls toward the floor and a negative vertical velocity rises.

use bevy::prelude::*;

/// Which surfaces the body touched after its last move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub struct SurfaceContacts {
    pub floor: bool,
    pub ceiling: bool,
}

impl SurfaceContacts {
    pub const NONE: Self = Self {
        floor: false,
        ceiling: false,
    };

    /// Touching the surface `gravity` pulls toward: the floor for positive
    /// gravity, the ceiling for negative gravity.
    pub fn touches_ground_side(&self, gravity: f32) -> bool {
        (self.floor && gravity >= 0.0) || (self.ceiling && gravity <= 0.0)
    }
}

/// Outcome of one sweep-and-slide move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideResult {
    pub position: Vec2,
    /// Velocity after contact clamping.
    pub velocity: Vec2,
    pub contacts: SurfaceContacts,
}

/// Host-provided body that resolves movement against level geometry.
pub trait KinematicBody {
    fn is_on_floor(&self) -> bool;

    fn is_on_ceiling(&self) -> bool;

    /// Move by `velocity * dt`, sliding along whatever is hit. Must return
    /// within the same step.
    fn move_and_slide(&mut self, velocity: Vec2, dt: f32) -> SlideResult;

    fn contacts(&self) -> SurfaceContacts {
        SurfaceContacts {
            floor: self.is_on_floor(),
            ceiling: self.is_on_ceiling(),
        }
    }
}

/// A point body between an optional floor plane and an optional ceiling plane.
///
/// Useful headless, without any physics engine in the loop.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneBody {
    pub position: Vec2,
    pub floor: Option<f32>,
    pub ceiling: Option<f32>,
    contacts: SurfaceContacts,
}

impl PlaneBody {
    pub fn new(position: Vec2, floor: Option<f32>, ceiling: Option<f32>) -> Self {
        Self {
            position,
            floor,
            ceiling,
            contacts: SurfaceContacts::NONE,
        }
    }

    /// A body already standing on a floor at `floor_y`.
    pub fn on_floor(x: f32, floor_y: f32) -> Self {
        Self {
            position: Vec2::new(x, floor_y),
            floor: Some(floor_y),
            ceiling: None,
            contacts: SurfaceContacts {
                floor: true,
                ceiling: false,
            },
        }
    }
}

impl KinematicBody for PlaneBody {
    fn is_on_floor(&self) -> bool {
        self.contacts.floor
    }

    fn is_on_ceiling(&self) -> bool {
        self.contacts.ceiling
    }

    fn move_and_slide(&mut self, velocity: Vec2, dt: f32) -> SlideResult {
        let mut velocity = velocity;
        let mut position = self.position + velocity * dt;
        let mut contacts = SurfaceContacts::NONE;

        if let Some(floor) = self.floor.filter(|floor| position.y >= *floor) {
            position.y = floor;
            velocity.y = velocity.y.min(0.0);
            contacts.floor = true;
        }
        if let Some(ceiling) = self.ceiling.filter(|ceiling| position.y <= *ceiling) {
            position.y = ceiling;
            velocity.y = velocity.y.max(0.0);
            contacts.ceiling = true;
        }

        self.position = position;
        self.contacts = contacts;

        SlideResult {
            position,
            velocity,
            contacts,
        }
    }
}
