//! Text-driven shape dimensions.

use serde::{Deserialize, Serialize};

use super::ast::ShapeKind;

/// Width contributed by each character of label text.
const CHAR_WIDTH: f64 = 8.0;
/// Horizontal padding added to the text width.
const TEXT_PADDING: f64 = 20.0;
/// Narrowest base width before the shape ratio is applied.
const MIN_BASE_WIDTH: f64 = 80.0;
/// Widest any non-circle shape may grow.
const MAX_WIDTH: f64 = 250.0;
const BASE_HEIGHT: f64 = 40.0;
const CIRCLE_BASE_HEIGHT: f64 = 60.0;

/// Width/height of a shape in diagram units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Per-kind scale applied to the base dimensions.
#[must_use]
pub fn size_ratio(kind: ShapeKind) -> (f64, f64) {
    match kind {
        ShapeKind::Diamond => (1.56, 1.56),
        ShapeKind::Rect | ShapeKind::Circle | ShapeKind::Ellipse | ShapeKind::Hexagon | ShapeKind::Triangle => {
            (1.3, 1.3)
        }
    }
}

/// Size a shape for its label.
///
/// Width grows with the character count from a floor of 80 units, is scaled by
/// the kind's ratio, and is capped at 250 for everything but circles.
#[must_use]
pub fn shape_size(text: &str, kind: ShapeKind) -> Size {
    let (rw, rh) = size_ratio(kind);
    #[allow(clippy::cast_precision_loss)]
    let chars = text.chars().count() as f64;
    let base = (chars * CHAR_WIDTH + TEXT_PADDING).max(MIN_BASE_WIDTH);
    let mut width = base * rw;
    if kind != ShapeKind::Circle {
        width = width.min(MAX_WIDTH);
    }
    let base_height = if kind == ShapeKind::Circle { CIRCLE_BASE_HEIGHT } else { BASE_HEIGHT };
    Size { width, height: base_height * rh }
}

#[cfg(test)]
#[path = "size_test.rs"]
mod size_test;
