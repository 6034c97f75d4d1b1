//! Movement domain: components and physics layers for controlled bodies.

use std::sync::{Arc, Mutex, PoisonError};

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::motion::{ControllerEvent, PlatformerController, SurfaceContacts};

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Level geometry the controller can stand on (floors, ceilings, platforms)
    Ground,
    /// Player character
    Player,
}

#[derive(Component, Debug)]
pub struct Player;

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Floor/ceiling contacts sensed by raycasts after the last physics step.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct SensedContacts(pub SurfaceContacts);

/// Collects controller notifications until they are forwarded as messages.
#[derive(Component, Debug, Default, Clone)]
pub struct ControllerMailbox(Arc<Mutex<Vec<ControllerEvent>>>);

impl ControllerMailbox {
    /// Subscribe this mailbox to `controller`.
    pub fn attach(&self, controller: &mut PlatformerController) {
        let inbox = Arc::clone(&self.0);
        controller.subscribe(move |event| {
            inbox
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(*event);
        });
    }

    pub fn take(&self) -> Vec<ControllerEvent> {
        std::mem::take(&mut *self.0.lock().unwrap_or_else(PoisonError::into_inner))
    }
}
