//! Movement domain: player and test-room spawning.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::motion::PlatformerController;
use crate::movement::{ControllerMailbox, GameLayer, Ground, MovementTuning, Player, SensedContacts};

const PLAYER_SIZE: Vec2 = Vec2::new(24.0, 48.0);

/// Spawn the controlled player from the active tuning.
pub fn spawn_player(
    mut commands: Commands,
    tuning: Res<MovementTuning>,
    existing_player: Query<Entity, With<Player>>,
) {
    // Don't spawn if player already exists
    if !existing_player.is_empty() {
        info!("Player already exists, skipping spawn");
        return;
    }

    let params = tuning.0.controller.clone();
    let mut controller = match PlatformerController::new(params) {
        Ok(controller) => controller,
        Err(e) => {
            error!("Cannot build player controller: {}", e);
            return;
        }
    };

    let mailbox = ControllerMailbox::default();
    mailbox.attach(&mut controller);

    info!(
        "Spawning player: gravity={:.1}, jump_velocity={:.1}, air_jumps={}",
        controller.derived().default_gravity,
        controller.derived().jump_velocity,
        controller.params().double_jumps
    );

    commands.spawn((
        // Identity & control
        (Player, controller, mailbox, SensedContacts::default()),
        // Rendering
        Sprite {
            color: Color::srgb(0.9, 0.9, 0.9),
            custom_size: Some(PLAYER_SIZE),
            ..default()
        },
        Transform::from_xyz(0.0, 100.0, 0.0),
        // Physics
        (
            RigidBody::Dynamic,
            Collider::rectangle(PLAYER_SIZE.x, PLAYER_SIZE.y),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            GravityScale(0.0), // Gravity comes from the controller
            Friction::new(0.0),
            CollisionLayers::new(GameLayer::Player, [GameLayer::Ground]),
        ),
    ));
}

/// A small enclosed room with stepped platforms.
pub fn spawn_test_room(mut commands: Commands) {
    let wall_color = Color::srgb(0.3, 0.3, 0.4);
    let ground_color = Color::srgb(0.4, 0.5, 0.4);
    let platform_color = Color::srgb(0.5, 0.4, 0.3);

    let ground_layers = CollisionLayers::new(GameLayer::Ground, [GameLayer::Player]);

    let blocks = [
        // Floor and ceiling
        (Vec2::new(0.0, -200.0), Vec2::new(800.0, 40.0), ground_color),
        (Vec2::new(0.0, 320.0), Vec2::new(800.0, 40.0), wall_color),
        // Side walls
        (Vec2::new(-420.0, 60.0), Vec2::new(40.0, 560.0), wall_color),
        (Vec2::new(420.0, 60.0), Vec2::new(40.0, 560.0), wall_color),
        // Platforms, each reachable from the one before
        (Vec2::new(-250.0, -50.0), Vec2::new(150.0, 20.0), platform_color),
        (Vec2::new(250.0, 50.0), Vec2::new(150.0, 20.0), platform_color),
        (Vec2::new(0.0, 150.0), Vec2::new(120.0, 20.0), platform_color),
    ];

    for (position, size, color) in blocks {
        commands.spawn((
            Ground,
            Sprite {
                color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_xyz(position.x, position.y, 0.0),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            ground_layers,
        ));
    }
}
