//! Camera view box: the visible rectangle of the drawing plane.
//!
//! Kept apart from [`HexagramConfig`](crate::config::HexagramConfig): the
//! configuration says what to draw, the view box says where the user is
//! looking. Screen-space inputs are in logical pixels relative to the
//! viewport's top-left corner.

use bevy::prelude::*;

use crate::math::view_extent;

/// Zoom factor per wheel notch away from the user (zoom out).
pub const ZOOM_OUT_STEP: f32 = 1.1;
/// Zoom factor per wheel notch toward the user (zoom in).
pub const ZOOM_IN_STEP: f32 = 0.9;

/// Visible rectangle in drawing-plane units.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Reflect)]
pub struct ViewBox {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for ViewBox {
    fn default() -> Self {
        Self::fitted(9, 25.0)
    }
}

impl ViewBox {
    /// Square view centered on the origin, large enough for a `layers` star.
    pub fn fitted(layers: u32, hex_size: f32) -> Self {
        let half = view_extent(layers, hex_size);
        Self {
            x: -half,
            y: -half,
            width: half * 2.0,
            height: half * 2.0,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Plane units per logical pixel when shown in `viewport`, preserving the
    /// aspect ratio so the whole box stays visible.
    pub fn units_per_pixel(&self, viewport: Vec2) -> f32 {
        if viewport.x <= 0.0 || viewport.y <= 0.0 {
            return 1.0;
        }
        (self.width / viewport.x).max(self.height / viewport.y)
    }

    /// Plane position under the screen point `cursor`.
    pub fn screen_to_plane(&self, cursor: Vec2, viewport: Vec2) -> Vec2 {
        let k = self.units_per_pixel(viewport);
        self.center() + (cursor - viewport / 2.0) * k
    }

    /// Screen point showing the plane position `p`; inverse of
    /// [`screen_to_plane`](Self::screen_to_plane).
    pub fn plane_to_screen(&self, p: Vec2, viewport: Vec2) -> Vec2 {
        let k = self.units_per_pixel(viewport);
        (p - self.center()) / k + viewport / 2.0
    }

    /// Scales the box by `factor` about the screen point `cursor`, keeping the
    /// plane point under the cursor fixed.
    pub fn zoom_at(&mut self, cursor: Vec2, viewport: Vec2, factor: f32) {
        if !(factor.is_finite() && factor > 0.0) {
            return;
        }
        let anchor = self.screen_to_plane(cursor, viewport);
        let center = self.center();
        let new_center = anchor + (center - anchor) * factor;
        self.width *= factor;
        self.height *= factor;
        self.x = new_center.x - self.width / 2.0;
        self.y = new_center.y - self.height / 2.0;
    }

    /// Moves the box so the content follows a drag of `delta` screen pixels.
    pub fn pan(&mut self, delta: Vec2, viewport: Vec2) {
        let k = self.units_per_pixel(viewport);
        self.x -= delta.x * k;
        self.y -= delta.y * k;
    }

    /// Wheel zoom factor for a scroll of `lines` (positive scrolls away).
    pub fn wheel_factor(lines: f32) -> f32 {
        if lines > 0.0 {
            ZOOM_IN_STEP.powf(lines)
        } else if lines < 0.0 {
            ZOOM_OUT_STEP.powf(-lines)
        } else {
            1.0
        }
    }
}
