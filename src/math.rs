//! Pure computation helpers extracted for testability.
//!
//! All functions in this module are free of Bevy ECS dependencies and operate
//! on plain numeric / `Vec2` / `Color` inputs. Positions are in the 2D drawing
//! plane: `+x` right, `+y` down, one unit per pixel at zoom 1.

use bevy::color::{ColorToPacked, Srgba};
use bevy::prelude::{Color, Vec2, Vec3};

const SQRT_3: f32 = 1.732_050_8;

/// Projects axial `(q, r)` to the drawing plane for a pointy-top layout.
///
/// `x = size·√3·(q + r/2)`, `y = size·3/2·r`; `size` is the center-to-corner
/// distance.
///
/// # Examples
/// ```
/// # use hexagram_mosaic::math::axial_to_pixel;
/// # use bevy::prelude::Vec2;
/// assert_eq!(axial_to_pixel(0, 0, 25.0), Vec2::ZERO);
/// assert_eq!(axial_to_pixel(0, 2, 10.0).y, 30.0);
/// assert!((axial_to_pixel(1, 0, 10.0).x - 17.320_51).abs() < 1e-3);
/// assert_eq!(axial_to_pixel(-1, 2, 10.0).x, 0.0);
/// ```
pub fn axial_to_pixel(q: i32, r: i32, size: f32) -> Vec2 {
    let (q, r) = (q as f32, r as f32);
    Vec2::new(size * SQRT_3 * (q + r / 2.0), size * 1.5 * r)
}

/// The six corners of a pointy-top hexagon, at `60°·i + 30°`.
pub fn hexagon_corners(center: Vec2, size: f32) -> [Vec2; 6] {
    std::array::from_fn(|i| {
        let angle = (60.0 * i as f32 + 30.0).to_radians();
        center + Vec2::new(angle.cos(), angle.sin()) * size
    })
}

/// Splits the segment `a → b` into dashes of length `dash` separated by `gap`.
///
/// The last dash is clipped at `b`. A non-positive `dash` yields the whole
/// segment as one piece.
pub fn dash_segments(a: Vec2, b: Vec2, dash: f32, gap: f32) -> Vec<(Vec2, Vec2)> {
    let length = a.distance(b);
    if dash <= 0.0 || length <= dash {
        return vec![(a, b)];
    }
    let dir = (b - a) / length;
    let period = dash + gap.max(0.0);

    let mut out = Vec::new();
    let mut t = 0.0;
    while t < length {
        let end = (t + dash).min(length);
        out.push((a + dir * t, a + dir * end));
        t += period;
    }
    out
}

/// Black or white, whichever reads better on `background`.
///
/// Perceived brightness `(299·R + 587·G + 114·B) / 1000` over 8-bit sRGB
/// channels; above 128 picks black.
///
/// # Examples
/// ```
/// # use hexagram_mosaic::math::label_color;
/// # use bevy::prelude::Color;
/// assert_eq!(label_color(Color::WHITE), Color::BLACK);
/// assert_eq!(label_color(Color::BLACK), Color::WHITE);
/// assert_eq!(label_color(Color::srgb_u8(0x1e, 0x3a, 0x8a)), Color::WHITE);
/// assert_eq!(label_color(Color::srgb_u8(0xfb, 0xbf, 0x24)), Color::BLACK);
/// ```
pub fn label_color(background: Color) -> Color {
    let [r, g, b] = Srgba::from(background).to_u8_array_no_alpha();
    let brightness = (r as u32 * 299 + g as u32 * 587 + b as u32 * 114) as f32 / 1000.0;
    if brightness > 128.0 {
        Color::BLACK
    } else {
        Color::WHITE
    }
}

/// Lifts a drawing-plane point into the world: plane `(x, y)` becomes world
/// `(x, lift, y)`, so the plane lies flat under a camera looking down `-Y`.
pub fn plane_to_world(p: Vec2, lift: f32) -> Vec3 {
    Vec3::new(p.x, lift, p.y)
}

/// Half-width of the initial square view for a hexagram: `layers·size·4.5`.
///
/// Covers the star's tips (`2·layers` cells out) with margin. Never zero, so a
/// single-cell shape still gets a usable view.
pub fn view_extent(layers: u32, size: f32) -> f32 {
    (layers.max(1) as f32) * size * 4.5
}
