#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_ZOOM, MIN_ZOOM};

/// A point in either screen or diagram space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Vector from `self` to `other`.
    #[must_use]
    pub fn to(self, other: Point) -> Point {
        Point::new(other.x - self.x, other.y - self.y)
    }
}

/// Axis-aligned rectangle in diagram space. `x`/`y` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Edge midpoints in the order top, right, bottom, left.
    #[must_use]
    pub fn midpoints(&self) -> [Point; 4] {
        let c = self.center();
        [
            Point::new(c.x, self.y),
            Point::new(self.right(), c.y),
            Point::new(c.x, self.bottom()),
            Point::new(self.x, c.y),
        ]
    }

    /// Corners in the order top-left, top-right, bottom-right, bottom-left.
    #[must_use]
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x, self.y),
            Point::new(self.right(), self.y),
            Point::new(self.right(), self.bottom()),
            Point::new(self.x, self.bottom()),
        ]
    }

    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Smallest bounds covering both.
    #[must_use]
    pub fn union(&self, other: &Bounds) -> Bounds {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Bounds::new(x, y, self.right().max(other.right()) - x, self.bottom().max(other.bottom()) - y)
    }
}

/// Pan/zoom state of the canvas.
///
/// A diagram point `p` appears on screen at `p * zoom + (x, y)`; `x`/`y` are
/// CSS pixels and `zoom` always lies in `[MIN_ZOOM, MAX_ZOOM]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0, zoom: 1.0 }
    }
}

impl Viewport {
    /// Convert a screen-space point (CSS pixels) to diagram coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.x) / self.zoom,
            y: (screen.y - self.y) / self.zoom,
        }
    }

    /// Convert a diagram point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.zoom + self.x,
            y: world.y * self.zoom + self.y,
        }
    }

    /// Scale by `factor` while keeping the diagram point under `anchor` fixed.
    pub fn zoom_at(&mut self, anchor: Point, factor: f64) {
        let world = self.screen_to_world(anchor);
        self.zoom = clamp_zoom(self.zoom * factor);
        self.x = anchor.x - world.x * self.zoom;
        self.y = anchor.y - world.y * self.zoom;
    }

    /// Fit `content` into a `width` x `height` canvas with `padding` pixels of
    /// margin, centered, never magnifying past 1:1. No content resets to the
    /// identity view.
    #[must_use]
    pub fn fit(content: Option<Bounds>, width: f64, height: f64, padding: f64) -> Viewport {
        let Some(b) = content else {
            return Viewport::default();
        };
        let scale_x = (width - padding * 2.0) / b.width;
        let scale_y = (height - padding * 2.0) / b.height;
        let zoom = clamp_zoom(scale_x.min(scale_y).min(1.0));
        Viewport {
            x: (width - b.width * zoom) / 2.0 - b.x * zoom,
            y: (height - b.height * zoom) / 2.0 - b.y * zoom,
            zoom,
        }
    }
}

/// Whether `v` can be a canvas or shape extent: finite and strictly positive.
#[must_use]
pub fn is_valid_extent(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

/// Clamp a zoom factor into the allowed range; non-finite values fall back to 1.
#[must_use]
pub fn clamp_zoom(zoom: f64) -> f64 {
    if zoom.is_finite() { zoom.clamp(MIN_ZOOM, MAX_ZOOM) } else { 1.0 }
}
