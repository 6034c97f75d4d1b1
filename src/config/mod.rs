//! Config domain: controller configuration files and input action identifiers.

mod loader;

pub use loader::{ConfigLoadError, load_config, parse_json, parse_ron};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::motion::ControllerParams;

/// Names of the input actions driving the controller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Reflect)]
#[serde(default)]
pub struct InputActions {
    pub left: String,
    pub right: String,
    pub jump: String,
}

impl Default for InputActions {
    fn default() -> Self {
        Self {
            left: "ui_left".to_string(),
            right: "ui_right".to_string(),
            jump: "ui_up".to_string(),
        }
    }
}

/// Everything a designer tunes for one controller.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize, Reflect)]
#[serde(default)]
pub struct ControllerConfig {
    pub input: InputActions,
    pub controller: ControllerParams,
}
