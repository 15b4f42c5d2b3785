//! Hexagram rendering: cell meshes, borders, labels, and the control panel.
//!
//! Everything here is derived from [`HexagramConfig`]: whenever the resource
//! changes and validates, the [`RenderModel`] is regenerated and the cell
//! entities are respawned. Drawing reads the model's own copy of the
//! configuration, so a rejected edit never reaches the screen. Borders are
//! immediate-mode gizmos, labels are egui text.

mod entities;
mod panel;
mod systems;

pub use entities::{CellGrid, HexCell, RenderModel};

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;
use hexagram_mosaic::HexagramConfig;

use crate::viewer::{ViewerSet, capturing};

/// Fixed drawing proportions, all relative to the configured hex size.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct MosaicStyle {
    /// Filled cell radius and outer border radius.
    pub fill_scale: f32,
    /// Inner ring radius for [`BorderStyle::Double`](hexagram_mosaic::BorderStyle).
    pub inner_scale: f32,
    /// Dash length for dashed borders.
    pub dash: f32,
    /// Gap between dashes.
    pub gap: f32,
    /// Label font height.
    pub label_scale: f32,
    /// Labels smaller than this many pixels are skipped.
    pub min_label_px: f32,
    /// Height of border gizmos above the cell meshes.
    pub border_lift: f32,
}

impl Default for MosaicStyle {
    fn default() -> Self {
        Self {
            fill_scale: 0.95,
            inner_scale: 0.75,
            dash: 0.3,
            gap: 0.15,
            label_scale: 0.35,
            min_label_px: 5.0,
            border_lift: 0.5,
        }
    }
}

/// Renders the hexagram described by the wrapped configuration.
pub struct MosaicPlugin(pub HexagramConfig);

impl Plugin for MosaicPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<HexagramConfig>()
            .register_type::<MosaicStyle>()
            .register_type::<HexCell>()
            .register_type::<CellGrid>()
            .insert_resource(self.0.clone())
            .insert_resource(RenderModel::build(&self.0))
            .init_resource::<MosaicStyle>()
            .add_systems(Startup, systems::log_startup)
            .add_systems(
                Update,
                (
                    systems::rebuild_model.run_if(resource_changed::<HexagramConfig>),
                    systems::spawn_cells.run_if(resource_changed::<RenderModel>),
                )
                    .chain()
                    .before(ViewerSet::Navigate),
            )
            .add_systems(Update, systems::draw_borders.after(systems::spawn_cells))
            .add_systems(
                EguiPrimaryContextPass,
                (
                    panel::control_panel.run_if(not(capturing)),
                    systems::draw_labels,
                )
                    .chain(),
            );
    }
}
