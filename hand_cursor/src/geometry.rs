//! Screen-space geometry and the camera → screen mapping.

use crate::config::ScreenConfig;
use crate::landmark::LandmarkPoint;

/// A position on the pointing surface, in screen units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }
}

/// Axis-aligned rectangle; `x`/`y` is the top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect { x, y, w, h }
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.w && p.y >= self.y && p.y < self.y + self.h
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ScreenMapping
// ════════════════════════════════════════════════════════════════════════════

/// Maps normalized camera coordinates onto the pointing surface.
///
/// With `mirror` set the x axis is flipped so that moving the hand to the
/// user's right moves the cursor right, as in a selfie view.
#[derive(Clone, Debug, PartialEq)]
pub struct ScreenMapping {
    width:  f32,
    height: f32,
    mirror: bool,
}

impl ScreenMapping {
    pub fn new(width: f32, height: f32, mirror: bool) -> Self {
        ScreenMapping { width, height, mirror }
    }

    pub fn from_config(screen: &ScreenConfig) -> Self {
        Self::new(screen.width as f32, screen.height as f32, screen.mirror)
    }

    pub fn to_screen(&self, p: &LandmarkPoint) -> Point {
        let nx = if self.mirror { 1.0 - p.x } else { p.x };
        Point::new(nx * self.width, p.y * self.height)
    }

    /// Inverse of [`to_screen`](Self::to_screen) for the x/y plane.
    pub fn to_normalized(&self, p: Point) -> (f32, f32) {
        let nx = p.x / self.width;
        let nx = if self.mirror { 1.0 - nx } else { nx };
        (nx, p.y / self.height)
    }

    /// Window resize.  Filter state elsewhere is left alone.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn is_mirrored(&self) -> bool {
        self.mirror
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn mirrored_mapping_flips_x() {
        let m = ScreenMapping::new(1000.0, 500.0, true);
        let p = m.to_screen(&LandmarkPoint::new(0.25, 0.5, 0.0));
        assert_relative_eq!(p.x, 750.0);
        assert_relative_eq!(p.y, 250.0);
    }

    #[test]
    fn unmirrored_mapping_scales() {
        let m = ScreenMapping::new(1000.0, 500.0, false);
        let p = m.to_screen(&LandmarkPoint::new(0.25, 0.5, 0.0));
        assert_relative_eq!(p.x, 250.0);
    }

    #[test]
    fn normalized_inverts_screen() {
        let m = ScreenMapping::new(640.0, 480.0, true);
        let (nx, ny) = m.to_normalized(Point::new(160.0, 120.0));
        let back = m.to_screen(&LandmarkPoint::new(nx, ny, 0.0));
        assert_relative_eq!(back.x, 160.0, epsilon = 1e-3);
        assert_relative_eq!(back.y, 120.0, epsilon = 1e-3);
    }

    #[test]
    fn rect_edges_are_half_open() {
        let r = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(r.contains(Point::new(10.0, 10.0)));
        assert!(!r.contains(Point::new(30.0, 15.0)));
        assert!(!r.contains(Point::new(15.0, 30.0)));
    }
}
