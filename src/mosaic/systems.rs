use bevy::asset::RenderAssetUsages;
use bevy::color::{ColorToPacked, Srgba};
use bevy::mesh::Indices;
use bevy::platform::collections::HashMap;
use bevy::prelude::*;
use bevy::render::render_resource::PrimitiveTopology;
use bevy::window::PrimaryWindow;
use bevy_egui::egui;

use hexagram_mosaic::config::color_to_rgb8;
use hexagram_mosaic::math;
use hexagram_mosaic::view::ViewBox;
use hexagram_mosaic::{BorderStyle, HexagramConfig};

use super::MosaicStyle;
use super::entities::{CellGrid, HexCell, RenderModel};

// ── Startup ─────────────────────────────────────────────────────────

pub fn log_startup(config: Res<HexagramConfig>) {
    info!(
        "hexagram mosaic: {} layers, pattern {}, hex size {}, {} borders",
        config.star_layers,
        config.pattern.label(),
        config.hex_size,
        config.border_style.label(),
    );
}

// ── Rebuild ─────────────────────────────────────────────────────────

/// Regenerates the [`RenderModel`] from the current configuration.
///
/// An invalid configuration leaves the previous model untouched, so nothing
/// downstream sees a change.
pub fn rebuild_model(config: Res<HexagramConfig>, mut model: ResMut<RenderModel>) {
    if let Err(err) = config.validate() {
        error!("rejected configuration: {err}");
        return;
    }
    *model = RenderModel::build(&config);
    info!(
        "rebuilt {} layers: {} cells, {} on perimeter, pattern {}",
        config.star_layers,
        model.hexagram.len(),
        model.perimeter.len(),
        config.pattern.label(),
    );
    debug!("pattern stats: {:?}", model.pattern.stats);
}

/// Replaces the [`CellGrid`] with one entity per cell. Filled borders get an
/// unlit hexagon mesh per cell; outline styles are drawn by [`draw_borders`].
pub fn spawn_cells(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    model: Res<RenderModel>,
    style: Res<MosaicStyle>,
    grids: Query<Entity, With<CellGrid>>,
) {
    for grid in &grids {
        commands.entity(grid).despawn();
    }

    let grid = commands
        .spawn((
            Name::new("CellGrid"),
            CellGrid,
            Transform::default(),
            Visibility::default(),
        ))
        .id();

    let config = &model.config;
    let filled = config.border_style == BorderStyle::Filled;
    let mesh = meshes.add(hexagon_mesh(config.hex_size * style.fill_scale));
    let mut palette: HashMap<[u8; 4], Handle<StandardMaterial>> = HashMap::new();

    for cell in &model.hexagram {
        let center = math::axial_to_pixel(cell.q(), cell.r(), config.hex_size);
        let mut entity = commands.spawn((
            Name::new(format!("Hex {}", cell.id)),
            HexCell {
                hex: cell.hex,
                id: cell.id,
            },
            Transform::from_translation(math::plane_to_world(center, 0.0)),
            Visibility::default(),
        ));
        if filled {
            let color = model.fill(cell.hex);
            let material = palette
                .entry(Srgba::from(color).to_u8_array())
                .or_insert_with(|| {
                    materials.add(StandardMaterial {
                        base_color: color,
                        unlit: true,
                        cull_mode: None,
                        ..default()
                    })
                })
                .clone();
            entity.insert((Mesh3d(mesh.clone()), MeshMaterial3d(material)));
        }
        let id = entity.id();
        commands.entity(grid).add_child(id);
    }

    debug!(
        "spawned {} cells with {} materials",
        model.hexagram.len(),
        palette.len()
    );
}

/// Flat pointy-top hexagon in the XZ plane, centered on the origin.
fn hexagon_mesh(radius: f32) -> Mesh {
    let corners = math::hexagon_corners(Vec2::ZERO, radius);
    let mut positions = vec![[0.0, 0.0, 0.0]];
    positions.extend(corners.iter().map(|c| [c.x, 0.0, c.y]));
    let normals = vec![[0.0, 1.0, 0.0]; positions.len()];
    let uvs: Vec<[f32; 2]> = positions
        .iter()
        .map(|p| [p[0] / (2.0 * radius) + 0.5, p[2] / (2.0 * radius) + 0.5])
        .collect();
    let indices: Vec<u16> = (0..6u16)
        .flat_map(|i| [0, i + 1, (i + 1) % 6 + 1])
        .collect();

    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
    .with_inserted_indices(Indices::U16(indices))
}

// ── Per-frame drawing ───────────────────────────────────────────────

/// Cell outlines as gizmos, in the style chosen by `border_style`.
pub fn draw_borders(mut gizmos: Gizmos, model: Res<RenderModel>, style: Res<MosaicStyle>) {
    let config = &model.config;
    let size = config.hex_size;
    let lift = style.border_lift;

    for cell in &model.hexagram {
        let center = math::axial_to_pixel(cell.q(), cell.r(), size);
        let outer = math::hexagon_corners(center, size * style.fill_scale);
        let fill = model.fill(cell.hex);

        match config.border_style {
            BorderStyle::Filled => outline(&mut gizmos, &outer, config.edge_color, lift),
            BorderStyle::Single => outline(&mut gizmos, &outer, fill, lift),
            BorderStyle::Double => {
                let inner = math::hexagon_corners(center, size * style.inner_scale);
                outline(&mut gizmos, &outer, fill, lift);
                outline(&mut gizmos, &inner, fill, lift);
            }
            BorderStyle::Dashed => {
                for (i, &a) in outer.iter().enumerate() {
                    let b = outer[(i + 1) % 6];
                    for (from, to) in
                        math::dash_segments(a, b, size * style.dash, size * style.gap)
                    {
                        gizmos.line(
                            math::plane_to_world(from, lift),
                            math::plane_to_world(to, lift),
                            fill,
                        );
                    }
                }
            }
        }
    }
}

fn outline(gizmos: &mut Gizmos, corners: &[Vec2; 6], color: Color, lift: f32) {
    gizmos.linestrip(
        corners
            .iter()
            .chain(std::iter::once(&corners[0]))
            .map(|&c| math::plane_to_world(c, lift)),
        color,
    );
}

/// Paints each cell's display id at its screen position.
pub fn draw_labels(
    mut egui_ctx: Query<&mut bevy_egui::EguiContext>,
    windows: Query<&Window, With<PrimaryWindow>>,
    model: Res<RenderModel>,
    style: Res<MosaicStyle>,
    view: Res<ViewBox>,
) {
    let config = &model.config;
    if !config.show_labels {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    let Ok(mut ctx) = egui_ctx.single_mut() else {
        return;
    };

    let viewport = Vec2::new(window.width(), window.height());
    let font_px = config.hex_size * style.label_scale / view.units_per_pixel(viewport);
    if font_px < style.min_label_px {
        return;
    }

    let filled = config.border_style == BorderStyle::Filled;
    let painter = ctx.get_mut().layer_painter(egui::LayerId::background());

    for cell in &model.hexagram {
        let center = math::axial_to_pixel(cell.q(), cell.r(), config.hex_size);
        let screen = view.plane_to_screen(center, viewport);
        if screen.x < -font_px
            || screen.y < -font_px
            || screen.x > viewport.x + font_px
            || screen.y > viewport.y + font_px
        {
            continue;
        }
        let fill = model.fill(cell.hex);
        let text = if filled { math::label_color(fill) } else { fill };
        let [r, g, b] = color_to_rgb8(text);
        painter.text(
            egui::pos2(screen.x, screen.y),
            egui::Align2::CENTER_CENTER,
            cell.id.to_string(),
            egui::FontId::proportional(font_px),
            egui::Color32::from_rgb(r, g, b),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The rebuild half of the mosaic plugin, without rendering.
    fn rebuild_app(config: HexagramConfig) -> App {
        let mut app = App::new();
        app.insert_resource(RenderModel::build(&config))
            .insert_resource(config)
            .init_resource::<MosaicStyle>()
            .init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .add_systems(
                Update,
                (
                    rebuild_model.run_if(resource_changed::<HexagramConfig>),
                    spawn_cells.run_if(resource_changed::<RenderModel>),
                )
                    .chain(),
            );
        app
    }

    fn grid(app: &mut App) -> Option<Entity> {
        let world = app.world_mut();
        let mut query = world.query_filtered::<Entity, With<CellGrid>>();
        query.iter(world).next()
    }

    fn cell_count(app: &mut App) -> usize {
        let world = app.world_mut();
        let mut query = world.query::<&HexCell>();
        query.iter(world).count()
    }

    fn edit(app: &mut App, f: impl FnOnce(&mut HexagramConfig)) {
        f(&mut app.world_mut().resource_mut::<HexagramConfig>());
    }

    // ── rebuild_model / spawn_cells ─────────────────────────────────

    #[test]
    fn first_frame_spawns_the_grid() {
        let mut app = rebuild_app(HexagramConfig {
            star_layers: 2,
            ..default()
        });
        app.update();
        assert!(grid(&mut app).is_some());
        assert_eq!(cell_count(&mut app), 37);
    }

    #[test]
    fn accepted_config_respawns_the_grid() {
        let mut app = rebuild_app(HexagramConfig {
            star_layers: 2,
            ..default()
        });
        app.update();
        let before = grid(&mut app);

        edit(&mut app, |c| c.star_layers = 3);
        app.update();

        assert_ne!(grid(&mut app), before);
        assert_eq!(cell_count(&mut app), 73);
        assert_eq!(app.world().resource::<RenderModel>().config.star_layers, 3);
    }

    #[test]
    fn rejected_config_leaves_model_and_grid_alone() {
        let mut app = rebuild_app(HexagramConfig {
            star_layers: 2,
            ..default()
        });
        app.update();
        let before = grid(&mut app);

        edit(&mut app, |c| {
            c.hex_size = 0.0;
            c.star_layers = 5;
        });
        app.update();

        let model = app.world().resource::<RenderModel>();
        assert_eq!(model.config.hex_size, 25.0);
        assert_eq!(model.config.star_layers, 2);
        assert_eq!(model.hexagram.len(), 37);
        assert_eq!(grid(&mut app), before);
        assert_eq!(cell_count(&mut app), 37);
    }

    #[test]
    fn rejected_layers_leave_model_alone() {
        let mut app = rebuild_app(HexagramConfig {
            star_layers: 2,
            ..default()
        });
        app.update();

        edit(&mut app, |c| c.star_layers = 500);
        app.update();

        assert_eq!(app.world().resource::<RenderModel>().hexagram.len(), 37);
        assert_eq!(cell_count(&mut app), 37);
    }

    // ── hexagon_mesh ────────────────────────────────────────────────

    #[test]
    fn hexagon_mesh_is_a_six_triangle_fan() {
        let mesh = hexagon_mesh(10.0);
        assert_eq!(mesh.count_vertices(), 7);
        assert_eq!(mesh.indices().map(|i| i.len()), Some(18));
    }

    #[test]
    fn hexagon_mesh_lies_flat() {
        let mesh = hexagon_mesh(3.0);
        let Some(positions) = mesh
            .attribute(Mesh::ATTRIBUTE_POSITION)
            .and_then(|a| a.as_float3())
        else {
            panic!("mesh has no float3 positions");
        };
        assert!(positions.iter().all(|p| p[1] == 0.0));
        for p in &positions[1..] {
            let r = (p[0] * p[0] + p[2] * p[2]).sqrt();
            assert!((r - 3.0).abs() < 1e-4);
        }
    }
}
