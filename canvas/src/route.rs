//! Connector geometry: path segments per style, the tangent angle at the
//! target end, arrowheads and label placement.
//!
//! Geometry is computed once as a list of [`PathSegment`]s and replayed into
//! any [`PathSink`], so the Canvas2D surface and the SVG exporter draw the
//! same curve and the arrowhead always matches the final tangent.

use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::anchor::{AnchorMode, AnchorPair, resolve};
use crate::camera::{Bounds, Point};
use crate::consts::{ALIGN_EPSILON, ARROW_INSET, ARROW_LENGTH, ARROW_SPREAD, CORNER_RADIUS, ROUNDED_MIN_RISE};

/// How a connector travels between its anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStyle {
    #[default]
    Straight,
    Curved,
    Orthogonal,
    Rounded,
}

impl ConnectionStyle {
    pub const ALL: [ConnectionStyle; 4] = [Self::Straight, Self::Curved, Self::Orthogonal, Self::Rounded];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Straight => "straight",
            Self::Curved => "curved",
            Self::Orthogonal => "orthogonal",
            Self::Rounded => "rounded",
        }
    }
}

impl fmt::Display for ConnectionStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConnectionStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "straight" => Ok(Self::Straight),
            "curved" => Ok(Self::Curved),
            "orthogonal" => Ok(Self::Orthogonal),
            "rounded" => Ok(Self::Rounded),
            other => Err(format!("unknown connection style: {other}")),
        }
    }
}

// =============================================================================
// PATH SINK
// =============================================================================

/// Receiver of path drawing commands, mirroring the Canvas2D path API.
pub trait PathSink {
    type Error;

    fn move_to(&mut self, p: Point) -> Result<(), Self::Error>;
    fn line_to(&mut self, p: Point) -> Result<(), Self::Error>;
    fn bezier_curve_to(&mut self, cp1: Point, cp2: Point, end: Point) -> Result<(), Self::Error>;
    /// Line toward `corner`, then an arc of `radius` tangent to both
    /// `current → corner` and `corner → toward`.
    fn arc_to(&mut self, corner: Point, toward: Point, radius: f64) -> Result<(), Self::Error>;
}

/// One drawing command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo(Point),
    LineTo(Point),
    CubicTo { cp1: Point, cp2: Point, end: Point },
    ArcTo { corner: Point, toward: Point, radius: f64 },
}

/// Replay segments into a sink.
///
/// # Errors
///
/// Propagates the first error the sink reports.
pub fn replay<S: PathSink>(sink: &mut S, segments: &[PathSegment]) -> Result<(), S::Error> {
    for seg in segments {
        match *seg {
            PathSegment::MoveTo(p) => sink.move_to(p)?,
            PathSegment::LineTo(p) => sink.line_to(p)?,
            PathSegment::CubicTo { cp1, cp2, end } => sink.bezier_curve_to(cp1, cp2, end)?,
            PathSegment::ArcTo { corner, toward, radius } => sink.arc_to(corner, toward, radius)?,
        }
    }
    Ok(())
}

/// Draw the connector path for `style` into `sink`.
///
/// # Errors
///
/// Propagates the first error the sink reports.
pub fn render_path<S: PathSink>(sink: &mut S, start: Point, end: Point, style: ConnectionStyle) -> Result<(), S::Error> {
    replay(sink, &path_segments(start, end, style))
}

// =============================================================================
// GEOMETRY
// =============================================================================

/// Drawing commands for a connector from `start` to `end`.
#[must_use]
pub fn path_segments(start: Point, end: Point, style: ConnectionStyle) -> Vec<PathSegment> {
    match style {
        ConnectionStyle::Straight => vec![PathSegment::MoveTo(start), PathSegment::LineTo(end)],
        ConnectionStyle::Curved => {
            let (cp1, cp2) = curve_controls(start, end);
            vec![PathSegment::MoveTo(start), PathSegment::CubicTo { cp1, cp2, end }]
        }
        ConnectionStyle::Orthogonal => {
            let [_, a, b, _] = orthogonal_waypoints(start, end);
            vec![PathSegment::MoveTo(start), PathSegment::LineTo(a), PathSegment::LineTo(b), PathSegment::LineTo(end)]
        }
        ConnectionStyle::Rounded => {
            if !rounded_bends(start, end) {
                return vec![PathSegment::MoveTo(start), PathSegment::LineTo(end)];
            }
            let [_, a, b, _] = orthogonal_waypoints(start, end);
            let radius = CORNER_RADIUS.min((a.x - start.x).abs()).min((end.y - start.y).abs() / 2.0);
            vec![
                PathSegment::MoveTo(start),
                PathSegment::ArcTo { corner: a, toward: b, radius },
                PathSegment::ArcTo { corner: b, toward: end, radius },
                PathSegment::LineTo(end),
            ]
        }
    }
}

/// Bézier control points for a curved connector.
///
/// Near-vertical (aspect > 3) and near-horizontal (aspect < 0.3) runs get a
/// small sideways wave; diagonal runs leave along the major axis and arrive
/// from a control point offset far enough that the approach is never shallow.
#[must_use]
pub fn curve_controls(start: Point, end: Point) -> (Point, Point) {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let aspect = dy.abs() / dx.abs();
    let sign = |v: f64| if v < 0.0 { -1.0 } else { 1.0 };

    if aspect > 3.0 {
        let wave = (dx.abs() * 0.5).min(20.0);
        (Point::new(start.x + sign(dx) * wave, start.y + dy * 0.2), Point::new(end.x, end.y - dy * 0.1))
    } else if aspect < 0.3 {
        let wave = (dy.abs() * 0.5).min(20.0);
        (Point::new(start.x + dx * 0.2, start.y + sign(dy) * wave), Point::new(end.x - dx * 0.1, end.y))
    } else if dy.abs() > dx.abs() {
        let off = (dy.abs() * 0.2).max(dx.abs() * 1.5);
        let cp2_x = if dx > 0.0 { end.x - off } else { end.x + off };
        (Point::new(start.x, start.y + dy * 0.3), Point::new(cp2_x, end.y - dy * 0.15))
    } else {
        let off = (dx.abs() * 0.2).max(dy.abs() * 1.5);
        let cp2_y = if dy > 0.0 { end.y - off } else { end.y + off };
        (Point::new(start.x + dx * 0.3, start.y), Point::new(end.x - dx * 0.15, cp2_y))
    }
}

/// `start → (mid_x, start.y) → (mid_x, end.y) → end`.
#[must_use]
pub fn orthogonal_waypoints(start: Point, end: Point) -> [Point; 4] {
    let mid_x = (start.x + end.x) / 2.0;
    [start, Point::new(mid_x, start.y), Point::new(mid_x, end.y), end]
}

fn rounded_bends(start: Point, end: Point) -> bool {
    (end.y - start.y).abs() > ROUNDED_MIN_RISE
}

/// Direction of travel at `end`, in radians, for the path `style` draws.
#[must_use]
pub fn arrow_angle(start: Point, end: Point, style: ConnectionStyle) -> f64 {
    match style {
        ConnectionStyle::Straight => chord_angle(start, end),
        ConnectionStyle::Curved => {
            let (_, cp2) = curve_controls(start, end);
            if cp2.distance(end) < ALIGN_EPSILON { chord_angle(start, end) } else { chord_angle(cp2, end) }
        }
        ConnectionStyle::Orthogonal => orthogonal_angle(start, end),
        ConnectionStyle::Rounded => {
            if rounded_bends(start, end) {
                orthogonal_angle(start, end)
            } else {
                chord_angle(start, end)
            }
        }
    }
}

fn chord_angle(from: Point, to: Point) -> f64 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// The last leg is horizontal unless the route collapses onto a vertical line.
fn orthogonal_angle(start: Point, end: Point) -> f64 {
    let mid_x = (start.x + end.x) / 2.0;
    if (end.x - mid_x).abs() < ALIGN_EPSILON {
        if (end.y - start.y).abs() < ALIGN_EPSILON {
            return 0.0;
        }
        return if end.y > start.y { FRAC_PI_2 } else { -FRAC_PI_2 };
    }
    if end.x > mid_x { 0.0 } else { PI }
}

/// Filled triangle at the end of a connector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrowhead {
    pub tip: Point,
    pub left: Point,
    pub right: Point,
}

impl Arrowhead {
    #[must_use]
    pub fn points(&self) -> [Point; 3] {
        [self.tip, self.left, self.right]
    }
}

/// Arrowhead pointing along `angle`, its tip pulled back slightly from `end`
/// so it does not overdraw the target's outline.
#[must_use]
pub fn arrowhead(end: Point, angle: f64) -> Arrowhead {
    let tip = Point::new(end.x - ARROW_INSET * angle.cos(), end.y - ARROW_INSET * angle.sin());
    let side = |a: f64| Point::new(tip.x - ARROW_LENGTH * a.cos(), tip.y - ARROW_LENGTH * a.sin());
    Arrowhead { tip, left: side(angle - ARROW_SPREAD), right: side(angle + ARROW_SPREAD) }
}

/// Label chip center: the midpoint of the anchors.
#[must_use]
pub fn label_anchor(start: Point, end: Point) -> Point {
    Point::new((start.x + end.x) / 2.0, (start.y + end.y) / 2.0)
}

// =============================================================================
// ROUTE
// =============================================================================

/// Everything needed to draw one connector.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub anchors: AnchorPair,
    pub segments: Vec<PathSegment>,
    pub angle: f64,
    pub arrow: Option<Arrowhead>,
    pub label_at: Point,
}

/// Resolve anchors and build the full geometry for one connector.
#[must_use]
pub fn route(from: &Bounds, to: &Bounds, mode: AnchorMode, style: ConnectionStyle, arrowed: bool) -> Route {
    let anchors = resolve(from, to, mode, style);
    let AnchorPair { start, end } = anchors;
    let angle = arrow_angle(start, end, style);
    Route {
        anchors,
        segments: path_segments(start, end, style),
        angle,
        arrow: arrowed.then(|| arrowhead(end, angle)),
        label_at: label_anchor(start, end),
    }
}

#[cfg(test)]
#[path = "route_test.rs"]
mod route_test;
