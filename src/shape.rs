//! Hexagram cell-set generation.
//!
//! A hexagram of radius `N` is the hex disk of radius `N` plus six triangular
//! fans, one grown outward from each corner of the disk. The merged set is
//! sorted top-to-bottom (`r`, then `q`) and numbered from 1.

use bevy::platform::collections::HashSet;
use hexx::{Hex, shapes};

use crate::axial::{self, direction};

/// One generated cell: its coordinate and display ID.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Axial coordinate (`x = q`, `y = r`).
    pub hex: Hex,
    /// 1-based label, unique within one [`Hexagram`].
    pub id: u32,
}

impl Cell {
    pub fn q(&self) -> i32 {
        self.hex.x
    }

    pub fn r(&self) -> i32 {
        self.hex.y
    }

    pub fn s(&self) -> i32 {
        self.hex.z()
    }
}

/// The ordered cell set of one generated hexagram.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hexagram {
    layers: u32,
    cells: Vec<Cell>,
}

impl Hexagram {
    /// Radius the shape was generated for.
    pub fn layers(&self) -> u32 {
        self.layers
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false for a generated shape; the origin is always present.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells in display order (IDs ascending).
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Coordinates in display order.
    pub fn hexes(&self) -> impl ExactSizeIterator<Item = Hex> + '_ {
        self.cells.iter().map(|c| c.hex)
    }

    /// Lookup set of every coordinate in the shape.
    pub fn hex_set(&self) -> HashSet<Hex> {
        self.hexes().collect()
    }

    /// Display ID of `hex`, found by binary search on the `(r, q)` order.
    pub fn id_of(&self, hex: Hex) -> Option<u32> {
        self.cells
            .binary_search_by_key(&(hex.y, hex.x), |c| (c.hex.y, c.hex.x))
            .ok()
            .map(|i| self.cells[i].id)
    }

    pub fn contains(&self, hex: Hex) -> bool {
        self.id_of(hex).is_some()
    }

    /// Largest cube norm over the set (`2 * layers` for a full hexagram).
    pub fn max_norm(&self) -> u32 {
        self.hexes().map(axial::cube_norm).max().unwrap_or(0)
    }
}

impl<'a> IntoIterator for &'a Hexagram {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

/// Hex disk of radius `layers`: every cell with cube norm `<= layers`.
pub fn core_hexagon(layers: u32) -> impl ExactSizeIterator<Item = Hex> {
    shapes::hexagon(Hex::ZERO, layers)
}

/// `layers` as a signed axial offset.
fn signed(layers: u32) -> i32 {
    i32::try_from(layers).unwrap_or_else(|_| panic!("star radius {layers} exceeds i32::MAX"))
}

/// Corner of the disk that anchors the fan grown along direction `d`.
///
/// Each base sits exactly `layers` from the origin on two axes.
///
/// # Panics
///
/// Panics if `layers` exceeds `i32::MAX`.
pub fn fan_base(d: usize, layers: u32) -> Hex {
    let n = signed(layers);
    match d % 6 {
        0 => Hex::new(0, n),
        1 => Hex::new(n, 0),
        2 => Hex::new(n, -n),
        3 => Hex::new(0, -n),
        4 => Hex::new(-n, 0),
        _ => Hex::new(-n, n),
    }
}

/// Triangular fan of cells grown from `base` along direction `d`.
///
/// Row `layer` (1..=layers) holds `layer + 1` cells stepping along direction
/// `d + 2`. Cells on the fan's inner edge repeat disk cells; callers dedupe.
///
/// # Panics
///
/// Panics if `layers` exceeds `i32::MAX`.
pub fn triangle_fan(base: Hex, d: usize, layers: u32) -> impl Iterator<Item = Hex> {
    let dir1 = direction(d);
    let dir2 = direction(d + 2);
    (1..=signed(layers))
        .flat_map(move |layer| (0..=layer).map(move |i| base + dir1 * layer + dir2 * i))
}

/// Builds the full hexagram for `layers`: disk plus six fans, deduplicated,
/// sorted by `(r, q)` and numbered `1..=len`.
///
/// Callers are expected to bound `layers` first, as
/// [`HexagramConfig::validate`](crate::HexagramConfig::validate) does.
///
/// # Panics
///
/// Panics if `layers` exceeds `i32::MAX`, before any cell is generated.
pub fn generate_hexagram(layers: u32) -> Hexagram {
    assert!(
        i32::try_from(layers).is_ok(),
        "star radius {layers} exceeds i32::MAX"
    );
    let mut seen: HashSet<Hex> = HashSet::new();
    let mut hexes: Vec<Hex> = Vec::new();

    let fans = (0..6).flat_map(|d| triangle_fan(fan_base(d, layers), d, layers));
    for hex in core_hexagon(layers).chain(fans) {
        if seen.insert(hex) {
            hexes.push(hex);
        }
    }

    hexes.sort_unstable_by_key(|h| (h.y, h.x));

    let cells = hexes
        .into_iter()
        .zip(1u32..)
        .map(|(hex, id)| Cell { hex, id })
        .collect();

    Hexagram { layers, cells }
}

/// Closed-form cell count of [`generate_hexagram`]: `6N² + 6N + 1`.
pub fn expected_cell_count(layers: u32) -> usize {
    let n = layers as usize;
    6 * n * n + 6 * n + 1
}
