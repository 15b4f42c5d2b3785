#![warn(missing_docs)]
//! Interactive hexagram mosaic viewer.
//!
//! Renders a six-pointed star of hex cells colored by one of several patterns,
//! with an egui control panel, pan/zoom navigation and PNG export.

mod mosaic;
mod viewer;

use bevy::app::AppExit;
use bevy::prelude::*;
use bevy_inspector_egui::quick::WorldInspectorPlugin;
use hexagram_mosaic::HexagramConfig;

/// Application-wide state, used for system scheduling.
#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash, Reflect)]
pub enum AppState {
    /// Normal viewing.
    #[default]
    Running,
    /// World inspector open (Tab to toggle).
    Inspecting,
}

fn main() -> AppExit {
    let config = match initial_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("hexagram-mosaic: {err}");
            return AppExit::error();
        }
    };

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Hexagram Mosaic".into(),
            ..default()
        }),
        ..default()
    }))
    .register_type::<AppState>()
    .init_state::<AppState>()
    .add_plugins(bevy_egui::EguiPlugin::default())
    .add_plugins(mosaic::MosaicPlugin(config))
    .add_plugins(viewer::ViewerPlugin(viewer::ViewerConfig::default()))
    .add_systems(Update, exit_on_esc)
    .add_systems(Update, toggle_inspector)
    .add_plugins(WorldInspectorPlugin::new().run_if(in_state(AppState::Inspecting)));

    app.run()
}

/// Defaults overridden by command-line flags, validated.
#[cfg(feature = "native")]
fn initial_config() -> Result<HexagramConfig, hexagram_mosaic::ConfigError> {
    use clap::Parser;
    hexagram_mosaic::config::CliArgs::parse().into_config()
}

#[cfg(not(feature = "native"))]
fn initial_config() -> Result<HexagramConfig, hexagram_mosaic::ConfigError> {
    let config = HexagramConfig::default();
    config.validate()?;
    Ok(config)
}

fn toggle_inspector(
    keys: Res<ButtonInput<KeyCode>>,
    state: Res<State<AppState>>,
    mut next: ResMut<NextState<AppState>>,
) {
    if keys.just_pressed(KeyCode::Tab) {
        next.set(match state.get() {
            AppState::Running => AppState::Inspecting,
            AppState::Inspecting => AppState::Running,
        });
    }
}

fn exit_on_esc(keys: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}
