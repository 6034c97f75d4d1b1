//! Movement domain: Bevy integration for platformer controllers.

mod bootstrap;
mod components;
mod events;
mod resources;
mod systems;

pub use bootstrap::{spawn_player, spawn_test_room};
pub use components::{ControllerMailbox, GameLayer, Ground, Player, SensedContacts};
pub use events::{HitGroundEvent, JumpedEvent};
pub use resources::{ActionBindings, JumpEdge, MovementInput, MovementTuning};
pub use systems::{AvianBody, flip_y};

use bevy::prelude::*;
use std::path::PathBuf;

use crate::config::{ControllerConfig, InputActions, load_config};
use crate::motion::{ControllerParams, TieBreak};
use crate::movement::systems::{
    apply_jump_input, detect_contacts, forward_controller_events, read_input, step_controllers,
    sync_controller_velocity,
};

/// Drives every [`Player`] controller from keyboard input on the fixed
/// timestep, ahead of avian's physics step.
#[derive(Debug, Clone, Default)]
pub struct PlatformerPlugin {
    /// RON or JSON config; defaults are used when unset or unreadable.
    pub config_path: Option<PathBuf>,
}

impl PlatformerPlugin {
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: Some(path.into()),
        }
    }

    fn load_tuning(&self) -> MovementTuning {
        let Some(path) = &self.config_path else {
            return MovementTuning::default();
        };

        match load_config(path) {
            Ok(config) => {
                info!("Loaded controller config from {}", path.display());
                MovementTuning(config)
            }
            Err(e) => {
                warn!("{}; using default controller config", e);
                MovementTuning(ControllerConfig::default())
            }
        }
    }
}

impl Plugin for PlatformerPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.load_tuning())
            .init_resource::<ActionBindings>()
            .init_resource::<MovementInput>()
            .register_type::<ControllerConfig>()
            .register_type::<ControllerParams>()
            .register_type::<InputActions>()
            .register_type::<TieBreak>()
            .add_message::<JumpedEvent>()
            .add_message::<HitGroundEvent>()
            .add_systems(Update, read_input)
            .add_systems(
                FixedUpdate,
                (
                    detect_contacts,
                    sync_controller_velocity,
                    apply_jump_input,
                    step_controllers,
                    forward_controller_events,
                )
                    .chain(),
            );
    }
}
