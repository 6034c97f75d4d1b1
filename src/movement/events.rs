//! Movement domain: messages forwarded from controller notifications.

use bevy::ecs::message::Message;
use bevy::prelude::*;

/// Fired on every executed jump
#[derive(Debug, Clone, Copy)]
pub struct JumpedEvent {
    pub entity: Entity,
    /// False for air jumps
    pub ground: bool,
}

impl Message for JumpedEvent {}

/// Fired when a controlled body lands after being airborne
#[derive(Debug, Clone, Copy)]
pub struct HitGroundEvent {
    pub entity: Entity,
}

impl Message for HitGroundEvent {}
