//! Shared numeric constants for the canvas crate.

use std::f64::consts::PI;

// ── Viewport ────────────────────────────────────────────────────

/// Smallest allowed zoom factor.
pub const MIN_ZOOM: f64 = 0.1;

/// Largest allowed zoom factor.
pub const MAX_ZOOM: f64 = 5.0;

/// Zoom multiplier for one wheel notch toward the user (deltaY < 0).
pub const WHEEL_ZOOM_IN: f64 = 1.1;

/// Zoom multiplier for one wheel notch away from the user (deltaY > 0).
pub const WHEEL_ZOOM_OUT: f64 = 0.9;

/// Toolbar zoom-in step.
pub const BUTTON_ZOOM_IN: f64 = 1.2;

/// Toolbar zoom-out step.
pub const BUTTON_ZOOM_OUT: f64 = 0.8;

/// Screen-space margin kept around the diagram by reset-view.
pub const FIT_PADDING_PX: f64 = 50.0;

/// Canvas size assumed until the host reports one.
pub const DEFAULT_CANVAS_WIDTH: f64 = 800.0;
pub const DEFAULT_CANVAS_HEIGHT: f64 = 600.0;

// ── Anchors ─────────────────────────────────────────────────────

/// Perimeter sample spacing for minimal anchors on straight connectors.
pub const PERIMETER_STEP: f64 = 10.0;

/// Score reduction for axis-aligned anchor pairs on orthogonal connectors.
pub const ALIGNMENT_BONUS: f64 = 100.0;

/// Score reduction when an anchor faces the other shape.
pub const FACING_BONUS: f64 = 50.0;

/// Score reduction per endpoint that is an edge midpoint.
pub const MIDPOINT_BONUS: f64 = 30.0;

// ── Connectors ──────────────────────────────────────────────────

/// Arrowhead side length.
pub const ARROW_LENGTH: f64 = 12.0;

/// Half-angle between the arrowhead sides and the shaft (30°).
pub const ARROW_SPREAD: f64 = PI / 6.0;

/// Distance the arrow tip is pulled back from the anchor.
pub const ARROW_INSET: f64 = 2.0;

/// Corner radius for rounded connectors.
pub const CORNER_RADIUS: f64 = 10.0;

/// Minimum vertical travel before rounded connectors bend.
pub const ROUNDED_MIN_RISE: f64 = 20.0;

/// Dash pattern for dashed connectors.
pub const DASH_PATTERN: [f64; 2] = [5.0, 5.0];

/// Tolerance for treating two coordinates as aligned.
pub const ALIGN_EPSILON: f64 = 1e-6;

// ── Labels ──────────────────────────────────────────────────────

pub const LABEL_CHIP_WIDTH: f64 = 40.0;
pub const LABEL_CHIP_HEIGHT: f64 = 16.0;
pub const LABEL_FONT_SIZE: f64 = 12.0;
pub const LABEL_BORDER: &str = "#cccccc";

// ── Shapes ──────────────────────────────────────────────────────

pub const SHAPE_STROKE_WIDTH: f64 = 2.0;
pub const SHAPE_FONT_SIZE: f64 = 14.0;
pub const FONT_FAMILY: &str = "Arial";

/// Connector widths for normal and thick (`==>`) links.
pub const CONNECTOR_WIDTH: f64 = 2.0;
pub const THICK_CONNECTOR_WIDTH: f64 = 3.0;

/// Outline color of the selected shape.
pub const SELECTION_STROKE: &str = "#f59e0b";
