//! Side panel editing every [`HexagramConfig`] field.
//!
//! Widgets edit a clone; the resource is only written when something actually
//! changed, so an idle panel never triggers a rebuild.

use bevy::prelude::*;
use bevy_egui::egui;

use hexagram_mosaic::config::{HEX_SIZE_RANGE, MAX_LAYERS, MAX_SPACING, color_to_hex, color_to_rgb8};
use hexagram_mosaic::pattern::MosaicDirection;
use hexagram_mosaic::shape::expected_cell_count;
use hexagram_mosaic::{BorderStyle, HexagramConfig, PatternKind};

use super::entities::RenderModel;
use crate::viewer::ViewerCommand;

pub fn control_panel(
    mut egui_ctx: Query<&mut bevy_egui::EguiContext>,
    mut config: ResMut<HexagramConfig>,
    model: Res<RenderModel>,
    mut commands: MessageWriter<ViewerCommand>,
) {
    let Ok(mut ctx) = egui_ctx.single_mut() else {
        return;
    };

    let mut edited = config.clone();
    let mut reset = false;
    let mut save = false;

    egui::SidePanel::left("hexagram_controls")
        .resizable(false)
        .default_width(240.0)
        .show(ctx.get_mut(), |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Hexagram Mosaic");
                ui.separator();

                shape_section(ui, &mut edited);
                ui.separator();
                pattern_section(ui, &mut edited);
                ui.separator();
                appearance_section(ui, &mut edited);
                ui.separator();

                ui.label(egui::RichText::new("Statistics").strong());
                for line in model.stats_lines() {
                    ui.label(line);
                }
                ui.separator();

                ui.horizontal(|ui| {
                    reset = ui.button("Reset").clicked();
                    save = ui.button("Save PNG").clicked();
                });
            });
        });

    if reset {
        edited = HexagramConfig::default();
        commands.write(ViewerCommand::ResetView);
    }
    if save {
        commands.write(ViewerCommand::SaveScreenshot);
    }
    if config.set_if_neq(edited) {
        debug!("configuration edited in panel");
    }
}

fn shape_section(ui: &mut egui::Ui, config: &mut HexagramConfig) {
    ui.add(egui::Slider::new(&mut config.star_layers, 0..=MAX_LAYERS).text("Star layers"));
    ui.label(format!(
        "{} rings, {} cells",
        config.star_layers + 1,
        expected_cell_count(config.star_layers)
    ));
}

fn pattern_section(ui: &mut egui::Ui, config: &mut HexagramConfig) {
    ui.label(egui::RichText::new("Pattern").strong());
    for kind in PatternKind::ALL {
        ui.radio_value(&mut config.pattern, kind, kind.label());
    }
    ui.add_space(4.0);

    match config.pattern {
        PatternKind::Flower => {
            ui.add(
                egui::Slider::new(&mut config.flower.spacing, 1..=MAX_SPACING)
                    .text("Flower spacing"),
            );
            let colors = &mut config.flower.colors;
            color_row(ui, "Center", &mut colors.center);
            color_row(ui, "Petal", &mut colors.petal);
            color_row(ui, "Background", &mut colors.background);
        }
        PatternKind::Perimeter => {
            color_row(ui, "Perimeter", &mut config.perimeter.perimeter);
            color_row(ui, "Interior", &mut config.perimeter.interior);
        }
        PatternKind::Mosaic => {
            egui::ComboBox::from_label("Direction")
                .selected_text(config.mosaic.direction.label())
                .show_ui(ui, |ui| {
                    for direction in MosaicDirection::ALL {
                        ui.selectable_value(
                            &mut config.mosaic.direction,
                            direction,
                            direction.label(),
                        );
                    }
                });
            color_row(ui, "First", &mut config.mosaic.colors.first);
            color_row(ui, "Second", &mut config.mosaic.colors.second);
        }
        PatternKind::Triangles => {
            color_row(ui, "Outline", &mut config.mosaic.colors.first);
            color_row(ui, "Interior", &mut config.mosaic.colors.second);
        }
        PatternKind::CenterHighlight => {
            color_row(ui, "Center", &mut config.center_highlight.center);
            color_row(ui, "Outer", &mut config.center_highlight.outer);
        }
        PatternKind::SixSides => {
            color_row(ui, "Arms", &mut config.six_sides.arm);
            color_row(ui, "Center region", &mut config.six_sides.center);
            color_row(ui, "Center hex", &mut config.six_sides.center_hex);
        }
    }
}

fn appearance_section(ui: &mut egui::Ui, config: &mut HexagramConfig) {
    ui.label(egui::RichText::new("Appearance").strong());
    ui.add(egui::Slider::new(&mut config.hex_size, HEX_SIZE_RANGE).text("Hex size"));
    egui::ComboBox::from_label("Border")
        .selected_text(config.border_style.label())
        .show_ui(ui, |ui| {
            for style in BorderStyle::ALL {
                ui.selectable_value(&mut config.border_style, style, style.label());
            }
        });
    if config.border_style == BorderStyle::Filled {
        color_row(ui, "Edge", &mut config.edge_color);
    }
    ui.checkbox(&mut config.show_labels, "Show labels");
}

/// Label, sRGB picker and hex readout for one color field.
fn color_row(ui: &mut egui::Ui, label: &str, color: &mut Color) {
    ui.horizontal(|ui| {
        let mut rgb = color_to_rgb8(*color);
        if ui.color_edit_button_srgb(&mut rgb).changed() {
            *color = Color::srgb_u8(rgb[0], rgb[1], rgb[2]);
        }
        ui.label(label);
        ui.weak(color_to_hex(*color));
    });
}
