//! Debug overlay for tuning the controller at runtime.
//!
//! Hotkeys:
//! - F1: toggle the controller state overlay
//! - F2: toggle velocity gizmos

use avian2d::prelude::LinearVelocity;
use bevy::prelude::*;

use crate::motion::PlatformerController;
use crate::movement::{HitGroundEvent, JumpedEvent, Player};

/// Seconds of velocity drawn by the gizmo arrow.
const VELOCITY_ARROW_SCALE: f32 = 0.1;

#[derive(Resource, Debug, Default)]
pub struct DebugState {
    pub show_info: bool,
    pub show_velocity: bool,
}

/// Marker for the controller state overlay
#[derive(Component, Debug)]
pub struct DebugInfoOverlay;

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>()
            .add_systems(Update, (handle_debug_hotkeys, update_debug_info_overlay).chain())
            .add_systems(
                Update,
                draw_velocity_gizmos.run_if(|state: Res<DebugState>| state.show_velocity),
            )
            .add_systems(Update, log_controller_messages);
    }
}

fn handle_debug_hotkeys(keyboard: Res<ButtonInput<KeyCode>>, mut state: ResMut<DebugState>) {
    if keyboard.just_pressed(KeyCode::F1) {
        state.show_info = !state.show_info;
        info!("Debug overlay: {}", state.show_info);
    }
    if keyboard.just_pressed(KeyCode::F2) {
        state.show_velocity = !state.show_velocity;
        info!("Velocity gizmos: {}", state.show_velocity);
    }
}

fn update_debug_info_overlay(
    mut commands: Commands,
    state: Res<DebugState>,
    player_query: Query<(&Transform, &PlatformerController), With<Player>>,
    mut overlay_query: Query<&mut Text, With<DebugInfoOverlay>>,
    existing_overlay: Query<Entity, With<DebugInfoOverlay>>,
) {
    if !state.show_info {
        for entity in &existing_overlay {
            commands.entity(entity).despawn();
        }
        return;
    }

    if existing_overlay.is_empty() {
        spawn_debug_info_overlay(&mut commands);
        return;
    }

    if let (Some((transform, controller)), Ok(mut text)) =
        (player_query.iter().next(), overlay_query.single_mut())
    {
        let pos = transform.translation;
        let motion = controller.state();
        let grace = controller.grace();
        **text = format!(
            "Pos: ({:.0}, {:.0})\nVel: ({:.0}, {:.0})\nAccel: ({:.0}, {:.0})\nJump: {:?}\nAir jumps: {}\nHolding: {}\nCoyote: {}\nBuffer: {}",
            pos.x,
            pos.y,
            motion.velocity.x,
            motion.velocity.y,
            motion.acceleration.x,
            motion.acceleration.y,
            motion.jump_type,
            motion.jumps_left,
            motion.holding_jump,
            grace.is_coyote_active(),
            grace.is_buffer_active(),
        );
    }
}

fn spawn_debug_info_overlay(commands: &mut Commands) {
    commands.spawn((
        DebugInfoOverlay,
        Text::new("Loading..."),
        TextFont {
            font_size: 12.0,
            ..default()
        },
        TextColor(Color::srgb(0.8, 0.9, 0.8)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(20.0),
            bottom: Val::Px(20.0),
            padding: UiRect::all(Val::Px(8.0)),
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
        ZIndex(500),
    ));
}

fn draw_velocity_gizmos(
    mut gizmos: Gizmos,
    query: Query<(&Transform, &LinearVelocity), With<Player>>,
) {
    for (transform, velocity) in &query {
        let start = transform.translation.truncate();
        gizmos.arrow_2d(
            start,
            start + velocity.0 * VELOCITY_ARROW_SCALE,
            Color::srgb(0.9, 0.7, 0.3),
        );
    }
}

fn log_controller_messages(
    mut jumped: MessageReader<JumpedEvent>,
    mut landed: MessageReader<HitGroundEvent>,
) {
    for event in jumped.read() {
        info!(
            "{:?} jumped ({})",
            event.entity,
            if event.ground { "ground" } else { "air" }
        );
    }
    for event in landed.read() {
        info!("{:?} hit the ground", event.entity);
    }
}
