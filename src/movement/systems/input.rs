//! Movement domain: input sampling and jump edge delivery.

use avian2d::prelude::*;
use bevy::prelude::*;

use super::movement::AvianBody;
use crate::motion::PlatformerController;
use crate::movement::{
    ActionBindings, JumpEdge, MovementInput, MovementTuning, Player, SensedContacts,
};

/// Order the jump edges seen this frame. When both edges arrived in one frame
/// the current held state tells which came last.
pub(crate) fn order_jump_edges(
    just_pressed: bool,
    just_released: bool,
    held: bool,
) -> Vec<JumpEdge> {
    match (just_pressed, just_released) {
        (true, true) if held => vec![JumpEdge::Released, JumpEdge::Pressed],
        (true, true) => vec![JumpEdge::Pressed, JumpEdge::Released],
        (true, false) => vec![JumpEdge::Pressed],
        (false, true) => vec![JumpEdge::Released],
        (false, false) => Vec::new(),
    }
}

pub(crate) fn read_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    tuning: Res<MovementTuning>,
    bindings: Res<ActionBindings>,
    mut input: ResMut<MovementInput>,
) {
    let actions = &tuning.0.input;

    input.left = bindings.pressed(&actions.left, &keyboard);
    input.right = bindings.pressed(&actions.right, &keyboard);

    let edges = order_jump_edges(
        bindings.just_pressed(&actions.jump, &keyboard),
        bindings.just_released(&actions.jump, &keyboard),
        bindings.pressed(&actions.jump, &keyboard),
    );
    input.jump_edges.extend(edges);
}

/// Deliver queued jump edges to every player before the physics step.
pub(crate) fn apply_jump_input(
    mut input: ResMut<MovementInput>,
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
    if input.jump_edges.is_empty() {
        return;
    }
    let edges = std::mem::take(&mut input.jump_edges);

    for (transform, contacts, mut controller, mut velocity) in &mut query {
        let body = AvianBody::new(transform, contacts.0, &mut *velocity);
        for edge in &edges {
            match edge {
                JumpEdge::Pressed => {
                    let outcome = controller.press_jump(&body);
                    debug!("Jump pressed: {:?}", outcome);
                }
                JumpEdge::Released => controller.release_jump(),
            }
        }
    }
}
