//! Movement domain: system modules for controller updates.

pub(crate) mod collisions;
pub(crate) mod input;
pub(crate) mod movement;

pub(crate) use collisions::detect_contacts;
pub(crate) use input::{apply_jump_input, read_input};
pub(crate) use movement::{forward_controller_events, step_controllers, sync_controller_velocity};
pub use movement::{AvianBody, flip_y};
