//! Property-based tests for hexagram generation and pattern coloring.
//!
//! This module uses proptest to verify structural properties that must hold
//! for every star radius, including:
//! - Cell count matches the closed form `6N² + 6N + 1`
//! - Every cell satisfies `q + r + s = 0`
//! - Display ids are a row-major permutation of `1..=len`
//! - Generation is deterministic
//! - The perimeter is a subset of the cells with `12N` members
//! - Every pattern colors every cell exactly once

use hexagram_mosaic::config::HexagramConfig;
use hexagram_mosaic::pattern::{
    MosaicDirection, PatternKind, PatternStats, flower_pattern, render_pattern,
};
use hexagram_mosaic::perimeter::find_perimeter;
use hexagram_mosaic::shape::{expected_cell_count, generate_hexagram};
use proptest::prelude::*;

// =============================================================================
// TEST CONFIGURATION
// =============================================================================

/// Star radii small enough to keep each case fast.
fn layers() -> impl Strategy<Value = u32> {
    0u32..=20
}

fn pattern_kind() -> impl Strategy<Value = PatternKind> {
    prop::sample::select(PatternKind::ALL.to_vec())
}

fn mosaic_direction() -> impl Strategy<Value = MosaicDirection> {
    prop::sample::select(MosaicDirection::ALL.to_vec())
}

// =============================================================================
// SHAPE PROPERTIES
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: cell count follows the closed form.
    #[test]
    fn prop_cell_count_closed_form(n in layers()) {
        let hexagram = generate_hexagram(n);
        let n = n as usize;
        prop_assert_eq!(hexagram.len(), 6 * n * n + 6 * n + 1);
        prop_assert_eq!(hexagram.len(), expected_cell_count(n as u32));
    }

    /// Property: every cell is a valid cube coordinate.
    #[test]
    fn prop_cube_constraint(n in layers()) {
        for cell in &generate_hexagram(n) {
            prop_assert_eq!(cell.q() + cell.r() + cell.s(), 0);
        }
    }

    /// Property: ids are 1..=len in (r, q) order with no gaps.
    #[test]
    fn prop_ids_are_row_major_permutation(n in layers()) {
        let hexagram = generate_hexagram(n);
        for (i, cell) in hexagram.iter().enumerate() {
            prop_assert_eq!(cell.id as usize, i + 1);
            prop_assert_eq!(hexagram.id_of(cell.hex), Some(cell.id));
        }
        for pair in hexagram.cells().windows(2) {
            prop_assert!((pair[0].r(), pair[0].q()) < (pair[1].r(), pair[1].q()));
        }
    }

    /// Property: two generations with the same radius are identical.
    #[test]
    fn prop_generation_is_deterministic(n in layers()) {
        prop_assert_eq!(generate_hexagram(n), generate_hexagram(n));
    }

    /// Property: the star reaches exactly `2N` from the origin.
    #[test]
    fn prop_max_norm_is_twice_layers(n in layers()) {
        prop_assert_eq!(generate_hexagram(n).max_norm(), 2 * n);
    }

    /// Property: the perimeter is a subset of the cells, `12N` strong.
    #[test]
    fn prop_perimeter_subset(n in layers()) {
        let hexagram = generate_hexagram(n);
        let perimeter = find_perimeter(hexagram.hexes());
        for hex in &perimeter {
            prop_assert!(hexagram.contains(*hex));
        }
        let expected = if n == 0 { 1 } else { 12 * n as usize };
        prop_assert_eq!(perimeter.len(), expected);
    }
}

// =============================================================================
// PATTERN PROPERTIES
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Property: every pattern assigns a color to every cell and nothing else.
    #[test]
    fn prop_patterns_are_total(
        n in layers(),
        pattern in pattern_kind(),
        direction in mosaic_direction(),
        spacing in 1u32..=12,
    ) {
        let mut config = HexagramConfig {
            pattern,
            ..HexagramConfig::default()
        };
        config.mosaic.direction = direction;
        config.flower.spacing = spacing;

        let hexagram = generate_hexagram(n);
        let perimeter = find_perimeter(hexagram.hexes());
        let out = render_pattern(&hexagram, &perimeter, &config);

        prop_assert_eq!(out.colors.len(), hexagram.len());
        for hex in hexagram.hexes() {
            prop_assert!(out.colors.get(hex).is_some());
        }
    }

    /// Property: reported region counts partition the shape.
    #[test]
    fn prop_stats_partition_cells(n in layers(), pattern in pattern_kind()) {
        let config = HexagramConfig {
            pattern,
            ..HexagramConfig::default()
        };
        let hexagram = generate_hexagram(n);
        let perimeter = find_perimeter(hexagram.hexes());
        let total = hexagram.len();

        match render_pattern(&hexagram, &perimeter, &config).stats {
            PatternStats::Triangles { outline, interior } => {
                prop_assert_eq!(outline + interior, total);
            }
            PatternStats::CenterHighlight { center, outer } => {
                prop_assert_eq!(center + outer, total);
            }
            PatternStats::SixSides { arm, center, center_hex } => {
                prop_assert_eq!(arm + center + center_hex, total);
                prop_assert_eq!(center_hex, 1);
            }
            PatternStats::Flower { centers } => {
                prop_assert!(centers <= total);
            }
            PatternStats::None => {}
        }
    }

    /// Property: flower centers lie inside the shape and keep the center color.
    #[test]
    fn prop_flower_centers_inside(n in layers(), spacing in 1u32..=12) {
        let config = HexagramConfig::default();
        let colors = &config.flower.colors;
        let hexagram = generate_hexagram(n);
        let out = flower_pattern(&hexagram, spacing, colors);

        for center in &out.centers {
            prop_assert!(hexagram.contains(*center));
            prop_assert_eq!(out.colors.color(*center), colors.center);
        }
    }
}
