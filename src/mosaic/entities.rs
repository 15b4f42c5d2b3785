use bevy::platform::collections::HashSet;
use bevy::prelude::*;
use hexx::Hex;

use hexagram_mosaic::pattern::render_pattern;
use hexagram_mosaic::perimeter::find_perimeter;
use hexagram_mosaic::{HexagramConfig, Hexagram, PatternOutput, PatternStats, generate_hexagram};

/// Root entity parenting every spawned [`HexCell`]. Despawned on rebuild.
#[derive(Component, Reflect)]
pub struct CellGrid;

/// One hexagram cell in the scene.
#[derive(Component, Reflect)]
pub struct HexCell {
    /// Axial coordinate of the cell.
    pub hex: Hex,
    /// 1-based row-major id.
    pub id: u32,
}

/// Everything drawn for the last accepted configuration: the shape, its
/// boundary, the pattern's colors, and the configuration itself.
///
/// Rendering systems read only from here, never from the live
/// [`HexagramConfig`] resource, which may hold values that failed validation.
#[derive(Resource, Clone, Debug)]
pub struct RenderModel {
    /// Configuration the model was built from.
    pub config: HexagramConfig,
    pub hexagram: Hexagram,
    pub perimeter: HashSet<Hex>,
    pub pattern: PatternOutput,
}

impl RenderModel {
    /// Generates the shape for `config.star_layers` and colors it.
    pub fn build(config: &HexagramConfig) -> Self {
        let hexagram = generate_hexagram(config.star_layers);
        let perimeter = find_perimeter(hexagram.hexes());
        let pattern = render_pattern(&hexagram, &perimeter, config);
        Self {
            config: config.clone(),
            hexagram,
            perimeter,
            pattern,
        }
    }

    /// Fill color of `hex`. Every cell of the model has one.
    pub fn fill(&self, hex: Hex) -> Color {
        self.pattern.colors.color(hex)
    }

    /// Human-readable counts for the control panel.
    pub fn stats_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Total hexagons: {}", self.hexagram.len()),
            format!("Perimeter: {}", self.perimeter.len()),
        ];
        match self.pattern.stats {
            PatternStats::None => {}
            PatternStats::Flower { centers } => {
                lines.push(format!("Flower centers: {centers}"));
            }
            PatternStats::Triangles { outline, interior } => {
                lines.push(format!("Outline: {outline}"));
                lines.push(format!("Interior: {interior}"));
            }
            PatternStats::CenterHighlight { center, outer } => {
                lines.push(format!("Center: {center}"));
                lines.push(format!("Outer: {outer}"));
            }
            PatternStats::SixSides {
                arm,
                center,
                center_hex,
            } => {
                lines.push(format!("Arms: {arm}"));
                lines.push(format!("Center region: {center}"));
                lines.push(format!("Center hex: {center_hex}"));
            }
        }
        lines
    }
}
