//! Rendering: draws the diagram to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It reads the engine state and produces pixels; it does not mutate any
//! application state.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::camera::Point;
use crate::consts::{DASH_PATTERN, FONT_FAMILY, LABEL_BORDER, LABEL_CHIP_HEIGHT, LABEL_CHIP_WIDTH, LABEL_FONT_SIZE, SELECTION_STROKE};
use crate::doc::{ConnectionInstance, ShapeInstance};
use crate::engine::EngineCore;
use crate::route::{PathSink, Route, replay};
use crate::shape::{Outline, outline};

/// Extra stroke width on the selected shape, in diagram units.
const SELECTION_EXTRA_WIDTH: f64 = 1.0;
/// Zoom readout inset from the bottom-right corner, in CSS pixels.
const ZOOM_LABEL_INSET_PX: f64 = 12.0;
const ERROR_COLOR: &str = "#dc2626";

/// Draw the full scene: background, connectors, labels, shapes, overlay.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(ctx: &CanvasRenderingContext2d, core: &EngineCore) -> Result<(), JsValue> {
    let (w, h, dpr) = (core.viewport_width, core.viewport_height, core.dpr);
    let colors = core.ui.theme.colors();

    // Layer 1: background in screen space.
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, w, h);
    ctx.set_fill_style_str(colors.background);
    ctx.fill_rect(0.0, 0.0, w, h);

    if let Some(message) = &core.error {
        return draw_error(ctx, message, w, h);
    }

    // Layer 2: diagram in world space.
    let vp = core.viewport;
    ctx.set_transform(dpr * vp.zoom, 0.0, 0.0, dpr * vp.zoom, dpr * vp.x, dpr * vp.y)?;

    let routes = core.routes();
    for (conn, r) in &routes {
        draw_connector(ctx, conn, r)?;
    }
    for (conn, r) in &routes {
        if let Some(label) = &conn.label {
            draw_label(ctx, label, r.label_at)?;
        }
    }
    for shape in core.store.shapes() {
        let selected = core.ui.selected_id.as_deref() == Some(shape.id.as_str());
        draw_shape(ctx, shape, selected)?;
    }

    // Layer 3: overlay in screen space.
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    draw_zoom_readout(ctx, vp.zoom, w, h)
}

// =============================================================
// Connectors
// =============================================================

/// Adapter that replays route segments onto the context's current path.
struct CanvasPath<'a>(&'a CanvasRenderingContext2d);

impl PathSink for CanvasPath<'_> {
    type Error = JsValue;

    fn move_to(&mut self, p: Point) -> Result<(), JsValue> {
        self.0.move_to(p.x, p.y);
        Ok(())
    }

    fn line_to(&mut self, p: Point) -> Result<(), JsValue> {
        self.0.line_to(p.x, p.y);
        Ok(())
    }

    fn bezier_curve_to(&mut self, cp1: Point, cp2: Point, end: Point) -> Result<(), JsValue> {
        self.0.bezier_curve_to(cp1.x, cp1.y, cp2.x, cp2.y, end.x, end.y);
        Ok(())
    }

    fn arc_to(&mut self, corner: Point, toward: Point, radius: f64) -> Result<(), JsValue> {
        self.0.arc_to(corner.x, corner.y, toward.x, toward.y, radius)
    }
}

fn draw_connector(ctx: &CanvasRenderingContext2d, conn: &ConnectionInstance, r: &Route) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_stroke_style_str(&conn.stroke);
    ctx.set_line_width(conn.stroke_width);

    let dash = js_sys::Array::new();
    if conn.dashed {
        for seg in DASH_PATTERN {
            dash.push(&JsValue::from_f64(seg));
        }
    }
    ctx.set_line_dash(&dash)?;

    ctx.begin_path();
    replay(&mut CanvasPath(ctx), &r.segments)?;
    ctx.stroke();

    // Arrowheads are always solid.
    if let Some(head) = r.arrow {
        ctx.set_line_dash(&js_sys::Array::new())?;
        ctx.set_fill_style_str(&conn.stroke);
        ctx.begin_path();
        ctx.move_to(head.tip.x, head.tip.y);
        ctx.line_to(head.left.x, head.left.y);
        ctx.line_to(head.right.x, head.right.y);
        ctx.close_path();
        ctx.fill();
    }

    ctx.restore();
    Ok(())
}

fn draw_label(ctx: &CanvasRenderingContext2d, label: &str, at: Point) -> Result<(), JsValue> {
    let x = at.x - LABEL_CHIP_WIDTH / 2.0;
    let y = at.y - LABEL_CHIP_HEIGHT / 2.0;

    ctx.save();
    ctx.set_fill_style_str("white");
    ctx.fill_rect(x, y, LABEL_CHIP_WIDTH, LABEL_CHIP_HEIGHT);
    ctx.set_stroke_style_str(LABEL_BORDER);
    ctx.set_line_width(1.0);
    ctx.stroke_rect(x, y, LABEL_CHIP_WIDTH, LABEL_CHIP_HEIGHT);

    ctx.set_fill_style_str("black");
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_font(&format!("{LABEL_FONT_SIZE}px {FONT_FAMILY}"));
    ctx.fill_text(label, at.x, at.y)?;
    ctx.restore();
    Ok(())
}

// =============================================================
// Shapes
// =============================================================

fn draw_shape(ctx: &CanvasRenderingContext2d, shape: &ShapeInstance, selected: bool) -> Result<(), JsValue> {
    let style = &shape.style;
    ctx.save();

    ctx.begin_path();
    match outline(shape) {
        Outline::Rect(b) => ctx.rect(b.x, b.y, b.width, b.height),
        Outline::Ellipse { center, rx, ry } => {
            if rx <= 0.0 || ry <= 0.0 {
                ctx.restore();
                return Ok(());
            }
            ctx.ellipse(center.x, center.y, rx, ry, 0.0, 0.0, 2.0 * PI)?;
        }
        Outline::Polygon(points) => {
            for (i, p) in points.iter().enumerate() {
                if i == 0 {
                    ctx.move_to(p.x, p.y);
                } else {
                    ctx.line_to(p.x, p.y);
                }
            }
            ctx.close_path();
        }
    }

    ctx.set_fill_style_str(&style.fill);
    ctx.fill();
    if selected {
        ctx.set_stroke_style_str(SELECTION_STROKE);
        ctx.set_line_width(style.stroke_width + SELECTION_EXTRA_WIDTH);
    } else {
        ctx.set_stroke_style_str(&style.stroke);
        ctx.set_line_width(style.stroke_width);
    }
    ctx.stroke();

    let c = shape.bounds().center();
    ctx.set_fill_style_str(&style.text_color);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_font(&format!("{}px {}", style.font_size, style.font_family));
    ctx.fill_text(&shape.text, c.x, c.y)?;

    ctx.restore();
    Ok(())
}

// =============================================================
// Overlays
// =============================================================

fn draw_zoom_readout(ctx: &CanvasRenderingContext2d, zoom: f64, w: f64, h: f64) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_fill_style_str("rgba(0, 0, 0, 0.45)");
    ctx.set_text_align("right");
    ctx.set_text_baseline("bottom");
    ctx.set_font(&format!("12px {FONT_FAMILY}"));
    ctx.fill_text(&format!("{:.0}%", zoom * 100.0), w - ZOOM_LABEL_INSET_PX, h - ZOOM_LABEL_INSET_PX)?;
    ctx.restore();
    Ok(())
}

fn draw_error(ctx: &CanvasRenderingContext2d, message: &str, w: f64, h: f64) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_fill_style_str(ERROR_COLOR);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_font(&format!("16px {FONT_FAMILY}"));
    ctx.fill_text(&format!("Error: {message}"), w / 2.0, h / 2.0)?;
    ctx.restore();
    Ok(())
}
