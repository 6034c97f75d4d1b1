use avian2d::prelude::*;
use bevy::prelude::*;

use platformer_controller::movement::{self, PlatformerPlugin};

fn main() {
    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Platformer Controller".to_string(),
            resolution: (1280, 720).into(),
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    .add_plugins(PhysicsPlugins::default())
    .add_plugins(PlatformerPlugin::from_file("assets/data/controller.ron"))
    .add_systems(
        Startup,
        (spawn_camera, movement::spawn_test_room, movement::spawn_player),
    );

    #[cfg(feature = "dev-tools")]
    app.add_plugins(platformer_controller::debug::DebugPlugin);

    app.run();
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
