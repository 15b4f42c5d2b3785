//! Pattern engine: deterministic color assignments over a hexagram.
//!
//! Every pattern is a pure function of the cell set and its inputs, and every
//! pattern is total: each cell of the input receives exactly one color, and no
//! other coordinate is keyed.

use bevy::platform::collections::{HashMap, HashSet};
use bevy::prelude::*;
use hexx::Hex;

use crate::axial::{self, neighbors};
use crate::config::HexagramConfig;
use crate::shape::{Hexagram, core_hexagon};

/// Which pattern is active. Exactly one at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Reflect)]
#[cfg_attr(feature = "native", derive(clap::ValueEnum))]
pub enum PatternKind {
    /// Flower centers on a lattice, ringed by petals.
    #[default]
    Flower,
    /// Boundary cells vs. interior cells.
    Perimeter,
    /// Two-color stripes.
    Mosaic,
    /// Axes, the disk boundary, and the perimeter outlined.
    Triangles,
    /// The origin cell alone.
    CenterHighlight,
    /// Core disk vs. the six arms.
    SixSides,
}

impl PatternKind {
    pub const ALL: [PatternKind; 6] = [
        PatternKind::Flower,
        PatternKind::Perimeter,
        PatternKind::Mosaic,
        PatternKind::Triangles,
        PatternKind::CenterHighlight,
        PatternKind::SixSides,
    ];

    /// Human-readable name for UI labels.
    pub fn label(self) -> &'static str {
        match self {
            PatternKind::Flower => "Flower",
            PatternKind::Perimeter => "Perimeter",
            PatternKind::Mosaic => "Mosaic",
            PatternKind::Triangles => "Triangles",
            PatternKind::CenterHighlight => "Center Highlight",
            PatternKind::SixSides => "Six Sides",
        }
    }

    /// Short lowercase name used in file names.
    pub fn slug(self) -> &'static str {
        match self {
            PatternKind::Flower => "flower",
            PatternKind::Perimeter => "perimeter",
            PatternKind::Mosaic => "mosaic",
            PatternKind::Triangles => "triangles",
            PatternKind::CenterHighlight => "centerHighlight",
            PatternKind::SixSides => "sixSides",
        }
    }
}

/// Stripe direction for [`mosaic_pattern`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Reflect)]
#[cfg_attr(feature = "native", derive(clap::ValueEnum))]
pub enum MosaicDirection {
    /// Key `q + r`.
    #[default]
    Diagonal,
    /// Key `q + floor(r / 2)`.
    Vertical,
    /// Key `r`.
    Horizontal,
}

impl MosaicDirection {
    pub const ALL: [MosaicDirection; 3] = [
        MosaicDirection::Diagonal,
        MosaicDirection::Vertical,
        MosaicDirection::Horizontal,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MosaicDirection::Diagonal => "Diagonal",
            MosaicDirection::Vertical => "Vertical",
            MosaicDirection::Horizontal => "Horizontal",
        }
    }

    /// Integer stripe key for `hex`.
    pub fn key(self, hex: Hex) -> i32 {
        match self {
            MosaicDirection::Diagonal => hex.x + hex.y,
            MosaicDirection::Vertical => hex.x + hex.y.div_euclid(2),
            MosaicDirection::Horizontal => hex.y,
        }
    }
}

// ── Palettes ────────────────────────────────────────────────────────

/// Colors for [`flower_pattern`].
#[derive(Clone, Copy, Debug, PartialEq, Reflect)]
pub struct FlowerColors {
    pub center: Color,
    pub petal: Color,
    pub background: Color,
}

/// Colors for [`perimeter_pattern`].
#[derive(Clone, Copy, Debug, PartialEq, Reflect)]
pub struct PerimeterColors {
    pub perimeter: Color,
    pub interior: Color,
}

/// Two-color palette shared by [`mosaic_pattern`] and [`triangles_pattern`].
#[derive(Clone, Copy, Debug, PartialEq, Reflect)]
pub struct MosaicColors {
    /// Even stripes; outline cells in the triangles pattern.
    pub first: Color,
    /// Odd stripes; interior cells in the triangles pattern.
    pub second: Color,
}

/// Colors for [`center_highlight_pattern`].
#[derive(Clone, Copy, Debug, PartialEq, Reflect)]
pub struct CenterHighlightColors {
    pub center: Color,
    pub outer: Color,
}

/// Colors for [`six_sides_pattern`].
#[derive(Clone, Copy, Debug, PartialEq, Reflect)]
pub struct SixSidesColors {
    pub arm: Color,
    pub center: Color,
    pub center_hex: Color,
}

// ── Output ──────────────────────────────────────────────────────────

/// Total mapping from cell coordinate to color.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColorAssignment {
    colors: HashMap<Hex, Color>,
}

impl ColorAssignment {
    fn filled<I>(cells: I, color: Color) -> Self
    where
        I: IntoIterator<Item = Hex>,
    {
        Self {
            colors: cells.into_iter().map(|h| (h, color)).collect(),
        }
    }

    /// Color of `hex`.
    ///
    /// # Panics
    ///
    /// If `hex` is not keyed. Every assignment is total over the cell set it
    /// was built from, so a miss means the caller paired a stale cell set with
    /// a fresh assignment (or the reverse).
    pub fn color(&self, hex: Hex) -> Color {
        match self.colors.get(&hex) {
            Some(&c) => c,
            None => panic!(
                "color lookup for ({}, {}, {}) outside the colored cell set",
                hex.x,
                hex.y,
                hex.z()
            ),
        }
    }

    pub fn get(&self, hex: Hex) -> Option<Color> {
        self.colors.get(&hex).copied()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &Hex> {
        self.colors.keys()
    }

    fn set(&mut self, hex: Hex, color: Color) {
        self.colors.insert(hex, color);
    }
}

/// Counts a pattern reports alongside its colors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PatternStats {
    #[default]
    None,
    Flower {
        centers: usize,
    },
    Triangles {
        outline: usize,
        interior: usize,
    },
    CenterHighlight {
        center: usize,
        outer: usize,
    },
    SixSides {
        arm: usize,
        center: usize,
        center_hex: usize,
    },
}

/// Colors plus reported counts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PatternOutput {
    pub colors: ColorAssignment,
    pub stats: PatternStats,
}

/// Result of [`flower_pattern`]: colors and the centers found, in lattice order.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowerOutput {
    pub colors: ColorAssignment,
    pub centers: Vec<Hex>,
}

// ── Patterns ────────────────────────────────────────────────────────

/// Flowers on a lattice of step `spacing` in `q` and `r`.
///
/// Candidates run from `-max_norm` upward in steps of `spacing` while
/// `<= max_norm`; only candidates inside the shape become centers. When
/// `spacing` does not divide the extent evenly, the lattice misses the
/// origin and some valid centers are skipped. Petals never overwrite a center.
///
/// `spacing` must be at least 1.
pub fn flower_pattern(hexagram: &Hexagram, spacing: u32, colors: &FlowerColors) -> FlowerOutput {
    debug_assert!(spacing >= 1, "flower spacing must be positive");
    let step = spacing.max(1) as usize;
    let lookup = hexagram.hex_set();
    let mut assignment = ColorAssignment::filled(hexagram.hexes(), colors.background);

    let max = hexagram.max_norm() as i32;
    let centers: Vec<Hex> = (-max..=max)
        .step_by(step)
        .flat_map(|q| (-max..=max).step_by(step).map(move |r| Hex::new(q, r)))
        .filter(|h| lookup.contains(h))
        .collect();
    let center_set: HashSet<Hex> = centers.iter().copied().collect();

    for &center in &centers {
        assignment.set(center, colors.center);
    }
    for &center in &centers {
        for petal in neighbors(center) {
            if lookup.contains(&petal) && !center_set.contains(&petal) {
                assignment.set(petal, colors.petal);
            }
        }
    }

    FlowerOutput {
        colors: assignment,
        centers,
    }
}

/// Perimeter cells in one color, everything else in the other.
pub fn perimeter_pattern(
    hexagram: &Hexagram,
    perimeter: &HashSet<Hex>,
    colors: &PerimeterColors,
) -> ColorAssignment {
    ColorAssignment {
        colors: hexagram
            .hexes()
            .map(|h| {
                let c = if perimeter.contains(&h) {
                    colors.perimeter
                } else {
                    colors.interior
                };
                (h, c)
            })
            .collect(),
    }
}

/// Alternating stripes: palette index `|key| mod 2` for the direction's key.
pub fn mosaic_pattern(
    hexagram: &Hexagram,
    direction: MosaicDirection,
    colors: &MosaicColors,
) -> ColorAssignment {
    let palette = [colors.first, colors.second];
    ColorAssignment {
        colors: hexagram
            .hexes()
            .map(|h| (h, palette[direction.key(h).rem_euclid(2) as usize]))
            .collect(),
    }
}

/// Structural outline: a cell is outline when it is on an axis, exactly
/// `layers` from the origin, or on the perimeter. Outline cells take the first
/// color, the rest the second.
pub fn triangles_pattern(
    hexagram: &Hexagram,
    layers: u32,
    perimeter: &HashSet<Hex>,
    colors: &MosaicColors,
) -> PatternOutput {
    let mut assignment = ColorAssignment::default();
    let (mut outline, mut interior) = (0, 0);

    for hex in hexagram.hexes() {
        let is_outline =
            axial::on_axis(hex) || axial::cube_norm(hex) == layers || perimeter.contains(&hex);
        if is_outline {
            assignment.set(hex, colors.first);
            outline += 1;
        } else {
            assignment.set(hex, colors.second);
            interior += 1;
        }
    }

    PatternOutput {
        colors: assignment,
        stats: PatternStats::Triangles { outline, interior },
    }
}

/// The origin in the center color, every other cell in the outer color.
pub fn center_highlight_pattern(
    hexagram: &Hexagram,
    colors: &CenterHighlightColors,
) -> PatternOutput {
    let mut assignment = ColorAssignment::filled(hexagram.hexes(), colors.outer);
    let mut center = 0;
    if hexagram.contains(Hex::ZERO) {
        assignment.set(Hex::ZERO, colors.center);
        center = 1;
    }

    PatternOutput {
        colors: assignment,
        stats: PatternStats::CenterHighlight {
            center,
            outer: hexagram.len() - center,
        },
    }
}

/// Origin, the rest of the radius-`layers` disk, and the six arms.
pub fn six_sides_pattern(
    hexagram: &Hexagram,
    layers: u32,
    colors: &SixSidesColors,
) -> PatternOutput {
    let core: HashSet<Hex> = core_hexagon(layers).collect();
    let mut assignment = ColorAssignment::default();
    let (mut arm, mut center, mut center_hex) = (0, 0, 0);

    for hex in hexagram.hexes() {
        if axial::is_origin(hex) {
            assignment.set(hex, colors.center_hex);
            center_hex += 1;
        } else if core.contains(&hex) {
            assignment.set(hex, colors.center);
            center += 1;
        } else {
            assignment.set(hex, colors.arm);
            arm += 1;
        }
    }

    PatternOutput {
        colors: assignment,
        stats: PatternStats::SixSides {
            arm,
            center,
            center_hex,
        },
    }
}

/// Runs the pattern selected in `config` over `hexagram`.
pub fn render_pattern(
    hexagram: &Hexagram,
    perimeter: &HashSet<Hex>,
    config: &HexagramConfig,
) -> PatternOutput {
    let layers = hexagram.layers();
    match config.pattern {
        PatternKind::Flower => {
            let out = flower_pattern(hexagram, config.flower.spacing, &config.flower.colors);
            PatternOutput {
                stats: PatternStats::Flower {
                    centers: out.centers.len(),
                },
                colors: out.colors,
            }
        }
        PatternKind::Perimeter => PatternOutput {
            colors: perimeter_pattern(hexagram, perimeter, &config.perimeter),
            stats: PatternStats::None,
        },
        PatternKind::Mosaic => PatternOutput {
            colors: mosaic_pattern(hexagram, config.mosaic.direction, &config.mosaic.colors),
            stats: PatternStats::None,
        },
        PatternKind::Triangles => {
            triangles_pattern(hexagram, layers, perimeter, &config.mosaic.colors)
        }
        PatternKind::CenterHighlight => {
            center_highlight_pattern(hexagram, &config.center_highlight)
        }
        PatternKind::SixSides => six_sides_pattern(hexagram, layers, &config.six_sides),
    }
}
