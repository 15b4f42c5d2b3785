//! Cube/axial coordinate helpers.
//!
//! Cells are stored as [`hexx::Hex`] with `x = q`, `y = r` and `s = z() = -q - r`,
//! so coordinate identity is structural over the two stored integers.
//!
//! The direction table below has its own fixed order (east first, then
//! counterclockwise in 60° steps), not that of [`hexx::EdgeDirection`]; the
//! hexagram's triangle fans are defined by index into it.

use hexx::Hex;

/// The six unit vectors, index 0..5, as `(q, r)` with `s` implied.
///
/// `(1,0,-1) (1,-1,0) (0,-1,1) (-1,0,1) (-1,1,0) (0,1,-1)`
pub const DIRECTIONS: [Hex; 6] = [
    Hex::new(1, 0),
    Hex::new(1, -1),
    Hex::new(0, -1),
    Hex::new(-1, 0),
    Hex::new(-1, 1),
    Hex::new(0, 1),
];

/// Unit vector for direction `i`, wrapping modulo 6.
pub fn direction(i: usize) -> Hex {
    DIRECTIONS[i % 6]
}

/// The six neighbors of `hex`, in direction order.
pub fn neighbors(hex: Hex) -> [Hex; 6] {
    DIRECTIONS.map(|d| hex + d)
}

/// Cube norm `max(|q|, |r|, |s|)`: hex distance from the origin.
pub fn cube_norm(hex: Hex) -> u32 {
    hex.x
        .unsigned_abs()
        .max(hex.y.unsigned_abs())
        .max(hex.z().unsigned_abs())
}

/// True for the single cell at `(0, 0, 0)`.
pub fn is_origin(hex: Hex) -> bool {
    hex == Hex::ZERO
}

/// True when the cell lies on one of the three axes (`q`, `r` or `s` is zero).
pub fn on_axis(hex: Hex) -> bool {
    hex.x == 0 || hex.y == 0 || hex.z() == 0
}
