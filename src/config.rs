//! The single source of truth for what gets generated and how it is drawn.
//!
//! [`HexagramConfig`] is replaced wholesale on reset and field-mutated on
//! single-parameter edits. Values are validated here, before they can reach
//! the geometry code.

use bevy::color::{ColorToPacked, HexColorError, Srgba};
use bevy::prelude::*;
use thiserror::Error;

use crate::pattern::{
    CenterHighlightColors, FlowerColors, MosaicColors, MosaicDirection, PatternKind,
    PerimeterColors, SixSidesColors,
};

/// Largest accepted radius (~9,800 cells).
pub const MAX_LAYERS: u32 = 40;
/// Accepted on-screen cell size range, in pixels.
pub const HEX_SIZE_RANGE: std::ops::RangeInclusive<f32> = 4.0..=120.0;
/// Largest accepted flower spacing.
pub const MAX_SPACING: u32 = 40;

/// Rejected configuration values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Radius above [`MAX_LAYERS`].
    #[error("star layers must be at most {max}, got {got}")]
    LayersOutOfRange { got: u32, max: u32 },

    /// Flower spacing of zero (the lattice would never advance).
    #[error("flower spacing must be at least 1")]
    ZeroSpacing,

    /// Spacing above [`MAX_SPACING`].
    #[error("flower spacing must be at most {max}, got {got}")]
    SpacingOutOfRange { got: u32, max: u32 },

    /// Cell size outside [`HEX_SIZE_RANGE`] or not finite.
    #[error("hex size must be within {min}..={max}, got {got}")]
    HexSizeOutOfRange { got: f32, min: f32, max: f32 },

    /// A color string that is not `#rgb`, `#rrggbb` or `#rrggbbaa`.
    #[error("invalid color {input:?}: {reason}")]
    InvalidColor { input: String, reason: String },
}

/// How each cell is outlined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Reflect)]
#[cfg_attr(feature = "native", derive(clap::ValueEnum))]
pub enum BorderStyle {
    /// Solid fill in the cell color, thin edge in the edge color.
    #[default]
    Filled,
    /// One outline in the cell color.
    Single,
    /// Two concentric outlines in the cell color.
    Double,
    /// Dashed outline in the cell color.
    Dashed,
}

impl BorderStyle {
    pub const ALL: [BorderStyle; 4] = [
        BorderStyle::Filled,
        BorderStyle::Single,
        BorderStyle::Double,
        BorderStyle::Dashed,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BorderStyle::Filled => "Filled",
            BorderStyle::Single => "Single line",
            BorderStyle::Double => "Double line",
            BorderStyle::Dashed => "Dashed",
        }
    }
}

/// Flower pattern parameters.
#[derive(Clone, Copy, Debug, PartialEq, Reflect)]
pub struct FlowerSettings {
    /// Lattice step between candidate centers (>= 1).
    pub spacing: u32,
    pub colors: FlowerColors,
}

/// Mosaic parameters; the colors double as the triangles outline palette.
#[derive(Clone, Copy, Debug, PartialEq, Reflect)]
pub struct MosaicSettings {
    pub direction: MosaicDirection,
    pub colors: MosaicColors,
}

/// Everything the generator, pattern engine and renderer read.
#[derive(Resource, Clone, Debug, PartialEq, Reflect)]
pub struct HexagramConfig {
    /// Hexagram radius `N`; the shape has `6N² + 6N + 1` cells.
    pub star_layers: u32,
    pub pattern: PatternKind,
    pub flower: FlowerSettings,
    pub perimeter: PerimeterColors,
    pub mosaic: MosaicSettings,
    pub center_highlight: CenterHighlightColors,
    pub six_sides: SixSidesColors,
    /// Stroke color for [`BorderStyle::Filled`] edges.
    pub edge_color: Color,
    /// Center-to-corner cell size in pixels.
    pub hex_size: f32,
    pub show_labels: bool,
    pub border_style: BorderStyle,
}

impl Default for HexagramConfig {
    fn default() -> Self {
        Self {
            star_layers: 9,
            pattern: PatternKind::Flower,
            flower: FlowerSettings {
                spacing: 3,
                colors: FlowerColors {
                    center: Color::srgb_u8(0x00, 0x33, 0x66),
                    petal: Color::srgb_u8(0xff, 0xff, 0xff),
                    background: Color::srgb_u8(0x80, 0x80, 0x80),
                },
            },
            perimeter: PerimeterColors {
                perimeter: Color::srgb_u8(0x00, 0x33, 0x66),
                interior: Color::srgb_u8(0xa9, 0xa9, 0xa9),
            },
            mosaic: MosaicSettings {
                direction: MosaicDirection::Diagonal,
                colors: MosaicColors {
                    first: Color::srgb_u8(0x00, 0x64, 0x00),
                    second: Color::srgb_u8(0xff, 0xff, 0xff),
                },
            },
            center_highlight: CenterHighlightColors {
                center: Color::srgb_u8(0xff, 0xd7, 0x00),
                outer: Color::srgb_u8(0x41, 0x69, 0xe1),
            },
            six_sides: SixSidesColors {
                arm: Color::srgb_u8(0x1f, 0x77, 0xb4),
                center: Color::srgb_u8(0x00, 0x80, 0x00),
                center_hex: Color::srgb_u8(0xff, 0xd7, 0x00),
            },
            edge_color: Color::srgb_u8(0x33, 0x33, 0x33),
            hex_size: 25.0,
            show_labels: true,
            border_style: BorderStyle::Filled,
        }
    }
}

impl HexagramConfig {
    /// Checks every numeric field against its accepted range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.star_layers > MAX_LAYERS {
            return Err(ConfigError::LayersOutOfRange {
                got: self.star_layers,
                max: MAX_LAYERS,
            });
        }
        if self.flower.spacing == 0 {
            return Err(ConfigError::ZeroSpacing);
        }
        if self.flower.spacing > MAX_SPACING {
            return Err(ConfigError::SpacingOutOfRange {
                got: self.flower.spacing,
                max: MAX_SPACING,
            });
        }
        if !self.hex_size.is_finite() || !HEX_SIZE_RANGE.contains(&self.hex_size) {
            return Err(ConfigError::HexSizeOutOfRange {
                got: self.hex_size,
                min: *HEX_SIZE_RANGE.start(),
                max: *HEX_SIZE_RANGE.end(),
            });
        }
        Ok(())
    }

    /// Screenshot file name, e.g. `hexagram-mosaic-flower-layers9.png`.
    pub fn screenshot_file_name(&self) -> String {
        format!(
            "hexagram-mosaic-{}-layers{}.png",
            self.pattern.slug(),
            self.star_layers
        )
    }
}

/// Parses `#rgb`, `#rrggbb` or `#rrggbbaa` (leading `#` optional).
pub fn parse_color(input: &str) -> Result<Color, ConfigError> {
    Srgba::hex(input.trim())
        .map(Color::from)
        .map_err(|e: HexColorError| ConfigError::InvalidColor {
            input: input.to_string(),
            reason: e.to_string(),
        })
}

/// `#rrggbb` form of `color`, alpha dropped.
pub fn color_to_hex(color: Color) -> String {
    let [r, g, b] = color_to_rgb8(color);
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// 8-bit sRGB channels of `color`, alpha dropped.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    Srgba::from(color).to_u8_array_no_alpha()
}

/// Command-line overrides applied on top of [`HexagramConfig::default`].
#[cfg(feature = "native")]
#[derive(clap::Parser, Debug, Default)]
#[command(name = "hexagram-mosaic", version, about = "Interactive hexagram mosaic viewer")]
pub struct CliArgs {
    /// Hexagram radius (0..=40); 9 gives 541 cells.
    #[arg(long)]
    pub layers: Option<u32>,

    /// Initial coloring pattern.
    #[arg(long, value_enum)]
    pub pattern: Option<PatternKind>,

    /// Flower lattice spacing (1..=40).
    #[arg(long)]
    pub spacing: Option<u32>,

    /// Stripe direction for the mosaic pattern.
    #[arg(long, value_enum)]
    pub mosaic_direction: Option<MosaicDirection>,

    /// Cell size in pixels.
    #[arg(long)]
    pub hex_size: Option<f32>,

    /// Cell outline style.
    #[arg(long, value_enum)]
    pub border_style: Option<BorderStyle>,

    /// Edge color for the filled style, as `#rrggbb`.
    #[arg(long)]
    pub edge_color: Option<String>,

    /// Hide display-ID labels.
    #[arg(long)]
    pub no_labels: bool,
}

#[cfg(feature = "native")]
impl CliArgs {
    /// Applies the overrides to the defaults and validates the result.
    pub fn into_config(self) -> Result<HexagramConfig, ConfigError> {
        let mut config = HexagramConfig::default();
        if let Some(layers) = self.layers {
            config.star_layers = layers;
        }
        if let Some(pattern) = self.pattern {
            config.pattern = pattern;
        }
        if let Some(spacing) = self.spacing {
            config.flower.spacing = spacing;
        }
        if let Some(direction) = self.mosaic_direction {
            config.mosaic.direction = direction;
        }
        if let Some(size) = self.hex_size {
            config.hex_size = size;
        }
        if let Some(style) = self.border_style {
            config.border_style = style;
        }
        if let Some(edge) = self.edge_color.as_deref() {
            config.edge_color = parse_color(edge)?;
        }
        config.show_labels = !self.no_labels;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── defaults / validation ───────────────────────────────────────

    #[test]
    fn defaults_are_valid() {
        assert_eq!(HexagramConfig::default().validate(), Ok(()));
    }

    #[test]
    fn defaults_match_reference_palette() {
        let c = HexagramConfig::default();
        assert_eq!(c.star_layers, 9);
        assert_eq!(c.flower.spacing, 3);
        assert_eq!(color_to_hex(c.flower.colors.center), "#003366");
        assert_eq!(color_to_hex(c.perimeter.interior), "#a9a9a9");
        assert_eq!(color_to_hex(c.six_sides.arm), "#1f77b4");
        assert_eq!(color_to_hex(c.edge_color), "#333333");
    }

    #[test]
    fn zero_spacing_rejected() {
        let mut c = HexagramConfig::default();
        c.flower.spacing = 0;
        assert_eq!(c.validate(), Err(ConfigError::ZeroSpacing));
    }

    #[test]
    fn too_many_layers_rejected() {
        let c = HexagramConfig {
            star_layers: MAX_LAYERS + 1,
            ..default()
        };
        assert!(matches!(
            c.validate(),
            Err(ConfigError::LayersOutOfRange { got: 41, .. })
        ));
    }

    #[test]
    fn max_layers_accepted() {
        let c = HexagramConfig {
            star_layers: MAX_LAYERS,
            ..default()
        };
        assert_eq!(c.validate(), Ok(()));
    }

    #[test]
    fn max_spacing_accepted() {
        let mut c = HexagramConfig::default();
        c.flower.spacing = MAX_SPACING;
        assert_eq!(c.validate(), Ok(()));
        c.flower.spacing = 1;
        assert_eq!(c.validate(), Ok(()));
    }

    #[test]
    fn hex_size_bounds_accepted() {
        for hex_size in [*HEX_SIZE_RANGE.start(), *HEX_SIZE_RANGE.end()] {
            let c = HexagramConfig {
                hex_size,
                ..default()
            };
            assert_eq!(c.validate(), Ok(()), "hex size {hex_size}");
        }
    }

    #[test]
    fn hex_size_just_outside_bounds_rejected() {
        for hex_size in [3.99, 120.01, 0.0] {
            let c = HexagramConfig {
                hex_size,
                ..default()
            };
            assert!(
                matches!(c.validate(), Err(ConfigError::HexSizeOutOfRange { .. })),
                "hex size {hex_size}"
            );
        }
    }

    #[test]
    fn zero_layers_accepted() {
        let c = HexagramConfig {
            star_layers: 0,
            ..default()
        };
        assert!(c.validate().is_ok());
    }

    #[test]
    fn non_finite_hex_size_rejected() {
        let c = HexagramConfig {
            hex_size: f32::NAN,
            ..default()
        };
        assert!(matches!(
            c.validate(),
            Err(ConfigError::HexSizeOutOfRange { .. })
        ));
    }

    #[test]
    fn oversized_spacing_rejected() {
        let mut c = HexagramConfig::default();
        c.flower.spacing = MAX_SPACING + 1;
        assert!(c.validate().is_err());
    }

    // ── colors ──────────────────────────────────────────────────────

    #[test]
    fn parse_color_accepts_hex_forms() {
        assert_eq!(color_to_hex(parse_color("#FFD700").unwrap()), "#ffd700");
        assert_eq!(color_to_hex(parse_color("fff").unwrap()), "#ffffff");
        assert_eq!(color_to_rgb8(parse_color("#4169e1").unwrap()), [0x41, 0x69, 0xe1]);
    }

    #[test]
    fn parse_color_rejects_garbage() {
        let err = parse_color("#12345").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidColor { .. }));
        assert!(parse_color("not a color").is_err());
    }

    #[test]
    fn error_messages_name_the_value() {
        let err = ConfigError::LayersOutOfRange { got: 99, max: 40 };
        assert_eq!(err.to_string(), "star layers must be at most 40, got 99");
    }

    #[test]
    fn screenshot_name_includes_pattern_and_layers() {
        let c = HexagramConfig {
            pattern: PatternKind::SixSides,
            star_layers: 4,
            ..default()
        };
        assert_eq!(c.screenshot_file_name(), "hexagram-mosaic-sixSides-layers4.png");
    }

    // ── cli ─────────────────────────────────────────────────────────

    #[cfg(feature = "native")]
    mod cli {
        use super::super::*;
        use clap::Parser;

        #[test]
        fn no_arguments_gives_defaults() {
            let args = CliArgs::try_parse_from(["hexagram-mosaic"]).unwrap();
            assert_eq!(args.into_config().unwrap(), HexagramConfig::default());
        }

        #[test]
        fn overrides_are_applied() {
            let args = CliArgs::try_parse_from([
                "hexagram-mosaic",
                "--layers",
                "4",
                "--pattern",
                "six-sides",
                "--mosaic-direction",
                "vertical",
                "--border-style",
                "dashed",
                "--edge-color",
                "#ff0000",
                "--no-labels",
            ])
            .unwrap();
            let config = args.into_config().unwrap();
            assert_eq!(config.star_layers, 4);
            assert_eq!(config.pattern, PatternKind::SixSides);
            assert_eq!(config.mosaic.direction, MosaicDirection::Vertical);
            assert_eq!(config.border_style, BorderStyle::Dashed);
            assert_eq!(color_to_hex(config.edge_color), "#ff0000");
            assert!(!config.show_labels);
        }

        #[test]
        fn invalid_overrides_are_rejected() {
            let args =
                CliArgs::try_parse_from(["hexagram-mosaic", "--spacing", "0"]).unwrap();
            assert_eq!(args.into_config(), Err(ConfigError::ZeroSpacing));

            let args =
                CliArgs::try_parse_from(["hexagram-mosaic", "--edge-color", "#zz"]).unwrap();
            assert!(args.into_config().is_err());
        }
    }
}
