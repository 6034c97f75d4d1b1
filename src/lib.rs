//! A 2D platformer movement controller: jump/gravity state machine, grace
//! windows and velocity integration, with a Bevy + avian2d integration layer.

pub mod config;
#[cfg(feature = "dev-tools")]
pub mod debug;
pub mod motion;
pub mod movement;
