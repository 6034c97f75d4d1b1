//! Movement domain: tuning, key bindings and sampled input resources.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::config::ControllerConfig;

/// Active controller configuration.
#[derive(Resource, Debug, Clone, Default)]
pub struct MovementTuning(pub ControllerConfig);

/// Maps action identifiers to the keys that trigger them.
#[derive(Resource, Debug, Clone)]
pub struct ActionBindings {
    bindings: HashMap<String, Vec<KeyCode>>,
}

impl Default for ActionBindings {
    fn default() -> Self {
        let mut bindings = Self {
            bindings: HashMap::new(),
        };
        bindings.bind("ui_left", [KeyCode::ArrowLeft, KeyCode::KeyA]);
        bindings.bind("ui_right", [KeyCode::ArrowRight, KeyCode::KeyD]);
        bindings.bind("ui_up", [KeyCode::ArrowUp, KeyCode::KeyW, KeyCode::Space]);
        bindings
    }
}

impl ActionBindings {
    /// Replace the keys bound to `action`.
    pub fn bind(&mut self, action: &str, keys: impl IntoIterator<Item = KeyCode>) {
        self.bindings
            .insert(action.to_string(), keys.into_iter().collect());
    }

    pub fn keys(&self, action: &str) -> &[KeyCode] {
        self.bindings.get(action).map_or(&[], Vec::as_slice)
    }

    pub fn pressed(&self, action: &str, keyboard: &ButtonInput<KeyCode>) -> bool {
        keyboard.any_pressed(self.keys(action).iter().copied())
    }

    pub fn just_pressed(&self, action: &str, keyboard: &ButtonInput<KeyCode>) -> bool {
        keyboard.any_just_pressed(self.keys(action).iter().copied())
    }

    pub fn just_released(&self, action: &str, keyboard: &ButtonInput<KeyCode>) -> bool {
        keyboard.any_just_released(self.keys(action).iter().copied())
    }
}

/// Edge of the jump action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpEdge {
    Pressed,
    Released,
}

/// Input sampled each frame, consumed by the next fixed step.
#[derive(Resource, Debug, Default)]
pub struct MovementInput {
    pub left: bool,
    pub right: bool,
    /// Jump edges in arrival order since the last fixed step.
    pub jump_edges: Vec<JumpEdge>,
}
