//! Movement domain: fixed-step controller driving on top of avian2d.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::motion::{
    ControllerEvent, KinematicBody, MoveInput, PlatformerController, SlideResult,
    SurfaceContacts,
};
use crate::movement::{
    ControllerMailbox, HitGroundEvent, JumpedEvent, MovementInput, Player, SensedContacts,
};

/// Controllers work in screen space (+y down); avian's world is y-up.
pub fn flip_y(v: Vec2) -> Vec2 {
    Vec2::new(v.x, -v.y)
}

/// [`KinematicBody`] over an avian2d rigid body.
///
/// Movement is handed to avian through `LinearVelocity` and resolved by its
/// solver later in the same fixed step; contacts come from the raycasts taken
/// after the previous physics step.
pub struct AvianBody<'a> {
    position: Vec2,
    contacts: SurfaceContacts,
    velocity: &'a mut LinearVelocity,
}

impl<'a> AvianBody<'a> {
    pub fn new(
        transform: &Transform,
        contacts: SurfaceContacts,
        velocity: &'a mut LinearVelocity,
    ) -> Self {
        Self {
            position: transform.translation.truncate(),
            contacts,
            velocity,
        }
    }
}

impl KinematicBody for AvianBody<'_> {
    fn is_on_floor(&self) -> bool {
        self.contacts.floor
    }

    fn is_on_ceiling(&self) -> bool {
        self.contacts.ceiling
    }

    fn move_and_slide(&mut self, velocity: Vec2, _dt: f32) -> SlideResult {
        self.velocity.0 = flip_y(velocity);
        SlideResult {
            position: flip_y(self.position),
            velocity,
            contacts: self.contacts,
        }
    }
}

/// Pull the solver's post-contact velocity back into each controller.
pub(crate) fn sync_controller_velocity(
    mut query: Query<(&LinearVelocity, &mut PlatformerController), With<Player>>,
) {
    for (velocity, mut controller) in &mut query {
        controller.set_velocity(flip_y(velocity.0));
    }
}

pub(crate) fn step_controllers(
    time: Res<Time>,
    input: Res<MovementInput>,
    mut query: Query<
        (
            &Transform,
            &SensedContacts,
            &mut PlatformerController,
            &mut LinearVelocity,
        ),
        With<Player>,
    >,
) {
    let dt = time.delta_secs();
    let move_input = MoveInput {
        left: input.left,
        right: input.right,
    };

    for (transform, contacts, mut controller, mut velocity) in &mut query {
        let mut body = AvianBody::new(transform, contacts.0, &mut *velocity);
        controller.step(move_input, &mut body, dt);
    }
}

pub(crate) fn forward_controller_events(
    query: Query<(Entity, &ControllerMailbox)>,
    mut jumped: MessageWriter<JumpedEvent>,
    mut landed: MessageWriter<HitGroundEvent>,
) {
    for (entity, mailbox) in &query {
        for event in mailbox.take() {
            match event {
                ControllerEvent::Jumped { ground } => {
                    jumped.write(JumpedEvent { entity, ground });
                }
                ControllerEvent::HitGround => {
                    landed.write(HitGroundEvent { entity });
                }
            }
        }
    }
}
