//! Orthographic top-down camera with pan, zoom, reset and screenshots.
//!
//! Left-drag pans, the wheel zooms about the cursor, a double-click or `R`
//! resets the view and `P` saves a PNG. The camera mirrors the
//! [`ViewBox`] resource every frame. While a screenshot is pending the view
//! is fitted to the hexagram and [`capturing`] holds, so other plugins can
//! hide their UI for the captured frame.

mod entities;
mod systems;

pub use entities::{Capture, ViewerCamera, ViewerCommand};
pub use systems::capturing;

use bevy::prelude::*;
use hexagram_mosaic::view::ViewBox;

/// Per-plugin configuration for the viewer.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct ViewerConfig {
    /// Two clicks closer than this (seconds) reset the view.
    pub double_click_secs: f32,
    /// Camera height above the drawing plane.
    pub camera_height: f32,
    /// Background color, also the PNG background.
    pub clear_color: Color,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            double_click_secs: 0.3,
            camera_height: 100.0,
            clear_color: Color::WHITE,
        }
    }
}

/// Pipeline ordering for viewer update systems.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ViewerSet {
    /// Input, commands and camera sync. Reads the mosaic's render model.
    Navigate,
}

/// Camera, navigation input and screenshot export.
pub struct ViewerPlugin(pub ViewerConfig);

impl Plugin for ViewerPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<ViewerCamera>()
            .register_type::<ViewerConfig>()
            .register_type::<ViewBox>()
            .insert_resource(self.0.clone())
            .insert_resource(ClearColor(self.0.clear_color))
            .init_resource::<ViewBox>()
            .init_resource::<Capture>()
            .add_message::<ViewerCommand>()
            .add_systems(Startup, (systems::spawn_camera, systems::fit_view))
            .add_systems(
                Update,
                (
                    systems::finish_capture,
                    systems::navigate,
                    systems::shortcuts,
                    systems::handle_commands,
                    systems::sync_camera,
                )
                    .chain()
                    .in_set(ViewerSet::Navigate),
            );
    }
}
