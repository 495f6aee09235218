//! Geometric outline of each shape kind.
//!
//! Drawing, SVG export and hit-testing all go through [`outline`], so a new
//! kind only needs one match arm here.

use flowchart::ShapeKind;

use crate::camera::{Bounds, Point};
use crate::doc::ShapeInstance;

/// Horizontal inset of a hexagon's side vertices, as a fraction of width.
const HEXAGON_INSET: f64 = 0.2;

#[derive(Debug, Clone, PartialEq)]
pub enum Outline {
    Rect(Bounds),
    Ellipse { center: Point, rx: f64, ry: f64 },
    Polygon(Vec<Point>),
}

/// Outline of a shape in diagram coordinates.
#[must_use]
pub fn outline(shape: &ShapeInstance) -> Outline {
    let b = shape.bounds();
    let c = b.center();
    match shape.kind {
        ShapeKind::Rect => Outline::Rect(b),
        ShapeKind::Circle => {
            let r = b.width.min(b.height) / 2.0;
            Outline::Ellipse { center: c, rx: r, ry: r }
        }
        ShapeKind::Ellipse => Outline::Ellipse { center: c, rx: b.width / 2.0, ry: b.height / 2.0 },
        ShapeKind::Diamond => Outline::Polygon(b.midpoints().to_vec()),
        ShapeKind::Hexagon => {
            let inset = b.width * HEXAGON_INSET;
            Outline::Polygon(vec![
                Point::new(b.x + inset, b.y),
                Point::new(b.right() - inset, b.y),
                Point::new(b.right(), c.y),
                Point::new(b.right() - inset, b.bottom()),
                Point::new(b.x + inset, b.bottom()),
                Point::new(b.x, c.y),
            ])
        }
        ShapeKind::Triangle => {
            Outline::Polygon(vec![Point::new(c.x, b.y), Point::new(b.right(), b.bottom()), Point::new(b.x, b.bottom())])
        }
    }
}

impl Outline {
    /// Whether `p` lies inside or on the outline.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        match self {
            Outline::Rect(b) => b.contains(p),
            Outline::Ellipse { center, rx, ry } => {
                if *rx <= 0.0 || *ry <= 0.0 {
                    return false;
                }
                let nx = (p.x - center.x) / rx;
                let ny = (p.y - center.y) / ry;
                nx * nx + ny * ny <= 1.0
            }
            Outline::Polygon(points) => polygon_contains(points, p),
        }
    }
}

/// Even-odd ray cast.
fn polygon_contains(points: &[Point], p: Point) -> bool {
    let mut inside = false;
    let mut j = points.len().wrapping_sub(1);
    for (i, a) in points.iter().enumerate() {
        let b = points[j];
        if (a.y > p.y) != (b.y > p.y) {
            let cross_x = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
            if p.x < cross_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
