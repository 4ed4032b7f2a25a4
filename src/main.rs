// Support configuring Bevy lints within code.
#![cfg_attr(bevy_lint, feature(register_tool), register_tool(bevy))]
// Disable console on Windows for non-dev builds.
#![cfg_attr(not(feature = "dev"), windows_subsystem = "windows")]

mod config;
mod game;

use bevy::{
    input::common_conditions::input_just_pressed,
    prelude::*,
    window::WindowResolution,
};

use crate::config::GameConfig;

fn main() -> AppExit {
    App::new().add_plugins(AppPlugin).run()
}

pub struct AppPlugin;

impl Plugin for AppPlugin {
    fn build(&self, app: &mut App) {
        let game_config = GameConfig::default();
        game_config.debug_validate();

        // Add Bevy plugins.
        app.add_plugins(
            DefaultPlugins.set(WindowPlugin {
                primary_window: Window {
                    title: "Bubble Shooter".to_string(),
                    resolution: WindowResolution::new(
                        game_config.playfield_width,
                        game_config.playfield_height,
                    ),
                    resizable: false,
                    fit_canvas_to_parent: true,
                    ..default()
                }
                .into(),
                ..default()
            }),
        );

        // One simulation tick per fixed step.
        app.insert_resource(Time::<Fixed>::from_hz(game_config.tick_hz));
        app.insert_resource(ClearColor(Color::BLACK));
        app.insert_resource(game_config);

        // Add other plugins.
        app.add_plugins((config::plugin, game::plugin));

        // Order new `AppSystems` variants by adding them here:
        app.configure_sets(
            Update,
            (AppSystems::RecordInput, AppSystems::Update).chain(),
        );

        // Set up the `Pause` state.
        app.init_state::<Pause>();
        app.configure_sets(Update, PausableSystems.run_if(in_state(Pause(false))));
        app.configure_sets(FixedUpdate, PausableSystems.run_if(in_state(Pause(false))));

        app.add_systems(Startup, spawn_camera);
        app.add_systems(
            Update,
            (
                toggle_pause.run_if(input_just_pressed(KeyCode::KeyP)),
                exit_app.run_if(input_just_pressed(KeyCode::Escape)),
            )
                .in_set(AppSystems::RecordInput),
        );
    }
}

/// High-level groupings of systems for the app in the `Update` schedule.
/// When adding a new variant, make sure to order it in the `configure_sets`
/// call above.
#[derive(SystemSet, Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
enum AppSystems {
    /// Record player input.
    RecordInput,
    /// Do everything else (consider splitting this into further variants).
    Update,
}

/// Whether or not the game is paused.
#[derive(States, Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
struct Pause(pub bool);

/// A system set for systems that shouldn't run while the game is paused.
#[derive(SystemSet, Copy, Clone, Eq, PartialEq, Hash, Debug)]
struct PausableSystems;

fn spawn_camera(mut commands: Commands) {
    commands.spawn((Name::new("Camera"), Camera2d));
}

fn toggle_pause(pause: Res<State<Pause>>, mut next_pause: ResMut<NextState<Pause>>) {
    let paused = !pause.get().0;
    next_pause.set(Pause(paused));
    info!("Paused: {}", paused);
}

fn exit_app(mut app_exit: MessageWriter<AppExit>) {
    app_exit.write(AppExit::Success);
}
