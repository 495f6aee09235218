//! SVG export of the current arena, independent of the browser surface.
//!
//! Uses the same outlines and routes as the Canvas2D renderer, framed by the
//! content bounds plus padding so the result does not depend on pan or zoom.

use std::convert::Infallible;

use svg::Document;
use svg::node::element as svg_element;

use crate::camera::{Bounds, Point};
use crate::consts::{
    DASH_PATTERN, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, FIT_PADDING_PX, FONT_FAMILY, LABEL_BORDER,
    LABEL_CHIP_HEIGHT, LABEL_CHIP_WIDTH, LABEL_FONT_SIZE,
};
use crate::doc::{ConnectionInstance, ShapeInstance, ShapeStore};
use crate::input::UiState;
use crate::route::{PathSink, Route, replay, route};
use crate::shape::{Outline, outline};

/// Builds SVG path data (`d` attribute) from path commands.
///
/// Canvas-style `arc_to` is converted to a line to the first tangent point
/// followed by an elliptical arc to the second.
#[derive(Debug, Default)]
pub struct SvgPathBuilder {
    data: String,
    current: Point,
}

impl SvgPathBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn finish(self) -> String {
        self.data.trim_end().to_owned()
    }

    fn push(&mut self, cmd: &str, points: &[Point]) {
        self.data.push_str(cmd);
        for p in points {
            self.data.push_str(&format!(" {} {}", p.x, p.y));
        }
        self.data.push(' ');
    }
}

impl PathSink for SvgPathBuilder {
    type Error = Infallible;

    fn move_to(&mut self, p: Point) -> Result<(), Infallible> {
        self.push("M", &[p]);
        self.current = p;
        Ok(())
    }

    fn line_to(&mut self, p: Point) -> Result<(), Infallible> {
        self.push("L", &[p]);
        self.current = p;
        Ok(())
    }

    fn bezier_curve_to(&mut self, cp1: Point, cp2: Point, end: Point) -> Result<(), Infallible> {
        self.push("C", &[cp1, cp2, end]);
        self.current = end;
        Ok(())
    }

    fn arc_to(&mut self, corner: Point, toward: Point, radius: f64) -> Result<(), Infallible> {
        let Some(arc) = tangent_arc(self.current, corner, toward, radius) else {
            return self.line_to(corner);
        };
        self.push("L", &[arc.from]);
        self.data.push_str(&format!("A {radius} {radius} 0 0 {} {} {} ", u8::from(arc.clockwise), arc.to.x, arc.to.y));
        self.current = arc.to;
        Ok(())
    }
}

struct TangentArc {
    from: Point,
    to: Point,
    clockwise: bool,
}

/// Tangent points of a circle of `radius` inscribed in the corner
/// `prev → corner → next`. `None` when the corner is degenerate.
fn tangent_arc(prev: Point, corner: Point, next: Point, radius: f64) -> Option<TangentArc> {
    let a = corner.to(prev);
    let b = corner.to(next);
    let (la, lb) = (a.x.hypot(a.y), b.x.hypot(b.y));
    if radius <= 0.0 || la == 0.0 || lb == 0.0 {
        return None;
    }
    let (ua, ub) = (Point::new(a.x / la, a.y / la), Point::new(b.x / lb, b.y / lb));
    let cos = (ua.x * ub.x + ua.y * ub.y).clamp(-1.0, 1.0);
    if 1.0 - cos < f64::EPSILON || 1.0 + cos < f64::EPSILON {
        return None;
    }
    // radius / tan(angle / 2)
    let t = radius * ((1.0 + cos) / (1.0 - cos)).sqrt();
    // Turning direction of prev → corner → next in y-down coordinates.
    let cross = (-a.x) * b.y - (-a.y) * b.x;
    Some(TangentArc {
        from: Point::new(corner.x + ua.x * t, corner.y + ua.y * t),
        to: Point::new(corner.x + ub.x * t, corner.y + ub.y * t),
        clockwise: cross > 0.0,
    })
}

/// Serialize the arena as a standalone SVG document.
#[must_use]
pub fn to_svg(store: &ShapeStore, ui: &UiState) -> String {
    let frame = store.bounds().map_or(
        Bounds::new(0.0, 0.0, DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT),
        |b| {
            Bounds::new(
                b.x - FIT_PADDING_PX,
                b.y - FIT_PADDING_PX,
                b.width + FIT_PADDING_PX * 2.0,
                b.height + FIT_PADDING_PX * 2.0,
            )
        },
    );

    let mut doc = Document::new()
        .set("viewBox", format!("{} {} {} {}", frame.x, frame.y, frame.width, frame.height))
        .set("width", frame.width)
        .set("height", frame.height)
        .add(
            svg_element::Rectangle::new()
                .set("x", frame.x)
                .set("y", frame.y)
                .set("width", frame.width)
                .set("height", frame.height)
                .set("fill", ui.theme.colors().background),
        );

    let mut labels = svg_element::Group::new();
    let mut edges = svg_element::Group::new();
    for conn in store.connections() {
        let Some((from, to)) = store.endpoints(conn) else {
            continue;
        };
        let r = route(&from.bounds(), &to.bounds(), ui.anchor_mode, ui.connection_style, conn.arrowed);
        edges = edges.add(render_connection(conn, &r));
        if let Some(label) = &conn.label {
            labels = labels.add(render_label(label, r.label_at));
        }
    }

    let mut shapes = svg_element::Group::new();
    for shape in store.shapes() {
        shapes = shapes.add(render_shape(shape));
    }

    doc = doc.add(edges).add(labels).add(shapes);
    log::debug!("exported svg with {} shapes, {} connections", store.len(), store.connections().len());
    doc.to_string()
}

fn render_connection(conn: &ConnectionInstance, r: &Route) -> svg_element::Group {
    let mut builder = SvgPathBuilder::new();
    let Ok(()) = replay(&mut builder, &r.segments);

    let mut path = svg_element::Path::new()
        .set("d", builder.finish())
        .set("fill", "none")
        .set("stroke", conn.stroke.as_str())
        .set("stroke-width", conn.stroke_width);
    if conn.dashed {
        path = path.set("stroke-dasharray", format!("{},{}", DASH_PATTERN[0], DASH_PATTERN[1]));
    }

    let mut group = svg_element::Group::new().set("id", conn.id.as_str()).add(path);
    if let Some(head) = r.arrow {
        let points = head.points().iter().map(|p| format!("{},{}", p.x, p.y)).collect::<Vec<_>>().join(" ");
        group = group.add(svg_element::Polygon::new().set("points", points).set("fill", conn.stroke.as_str()));
    }
    group
}

fn render_label(label: &str, at: Point) -> svg_element::Group {
    let chip = svg_element::Rectangle::new()
        .set("x", at.x - LABEL_CHIP_WIDTH / 2.0)
        .set("y", at.y - LABEL_CHIP_HEIGHT / 2.0)
        .set("width", LABEL_CHIP_WIDTH)
        .set("height", LABEL_CHIP_HEIGHT)
        .set("fill", "white")
        .set("stroke", LABEL_BORDER);
    let text = svg_element::Text::new(label)
        .set("x", at.x)
        .set("y", at.y)
        .set("text-anchor", "middle")
        .set("dominant-baseline", "middle")
        .set("font-family", FONT_FAMILY)
        .set("font-size", LABEL_FONT_SIZE)
        .set("fill", "black");
    svg_element::Group::new().add(chip).add(text)
}

fn render_shape(shape: &ShapeInstance) -> svg_element::Group {
    let style = &shape.style;
    let body: Box<dyn svg::Node> = match outline(shape) {
        Outline::Rect(b) => svg_element::Rectangle::new()
            .set("x", b.x)
            .set("y", b.y)
            .set("width", b.width)
            .set("height", b.height)
            .into(),
        Outline::Ellipse { center, rx, ry } => svg_element::Ellipse::new()
            .set("cx", center.x)
            .set("cy", center.y)
            .set("rx", rx)
            .set("ry", ry)
            .into(),
        Outline::Polygon(points) => {
            let points = points.iter().map(|p| format!("{},{}", p.x, p.y)).collect::<Vec<_>>().join(" ");
            svg_element::Polygon::new().set("points", points).into()
        }
    };

    let c = shape.bounds().center();
    let text = svg_element::Text::new(shape.text.as_str())
        .set("x", c.x)
        .set("y", c.y)
        .set("text-anchor", "middle")
        .set("dominant-baseline", "middle")
        .set("font-family", style.font_family.as_str())
        .set("font-size", style.font_size)
        .set("fill", style.text_color.as_str())
        .set("stroke", "none");

    svg_element::Group::new()
        .set("id", shape.id.as_str())
        .set("fill", style.fill.as_str())
        .set("stroke", style.stroke.as_str())
        .set("stroke-width", style.stroke_width)
        .add(body)
        .add(text)
}

#[cfg(test)]
#[path = "svg_test.rs"]
mod svg_test;
