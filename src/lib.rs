//! Hexagram mosaic: geometry and coloring for a six-pointed star of hex cells.
//!
//! The core is pure: [`shape::generate_hexagram`] builds the cell set,
//! [`perimeter::find_perimeter`] finds its boundary, and the functions in
//! [`pattern`] color it. [`config`] holds the validated parameters and
//! [`view`] the pan/zoom state consumed by the viewer binary.

pub mod axial;
pub mod config;
pub mod math;
pub mod pattern;
pub mod perimeter;
pub mod shape;
pub mod view;

pub use config::{BorderStyle, ConfigError, HexagramConfig};
pub use pattern::{PatternKind, PatternOutput, PatternStats};
pub use shape::{Cell, Hexagram, generate_hexagram};
