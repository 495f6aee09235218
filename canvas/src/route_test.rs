#![allow(clippy::float_cmp)]

use std::convert::Infallible;

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// Records every command it receives.
#[derive(Default)]
struct Recorder {
    ops: Vec<PathSegment>,
}

impl PathSink for Recorder {
    type Error = Infallible;

    fn move_to(&mut self, p: Point) -> Result<(), Infallible> {
        self.ops.push(PathSegment::MoveTo(p));
        Ok(())
    }

    fn line_to(&mut self, p: Point) -> Result<(), Infallible> {
        self.ops.push(PathSegment::LineTo(p));
        Ok(())
    }

    fn bezier_curve_to(&mut self, cp1: Point, cp2: Point, end: Point) -> Result<(), Infallible> {
        self.ops.push(PathSegment::CubicTo { cp1, cp2, end });
        Ok(())
    }

    fn arc_to(&mut self, corner: Point, toward: Point, radius: f64) -> Result<(), Infallible> {
        self.ops.push(PathSegment::ArcTo { corner, toward, radius });
        Ok(())
    }
}

/// Fails on the first line segment.
struct Broken;

impl PathSink for Broken {
    type Error = &'static str;

    fn move_to(&mut self, _: Point) -> Result<(), Self::Error> {
        Ok(())
    }

    fn line_to(&mut self, _: Point) -> Result<(), Self::Error> {
        Err("surface lost")
    }

    fn bezier_curve_to(&mut self, _: Point, _: Point, _: Point) -> Result<(), Self::Error> {
        Ok(())
    }

    fn arc_to(&mut self, _: Point, _: Point, _: f64) -> Result<(), Self::Error> {
        Ok(())
    }
}

// =============================================================
// Sink replay
// =============================================================

#[test]
fn render_path_replays_segments() {
    let mut rec = Recorder::default();
    render_path(&mut rec, pt(0.0, 0.0), pt(100.0, 100.0), ConnectionStyle::Orthogonal).unwrap();
    assert_eq!(rec.ops, path_segments(pt(0.0, 0.0), pt(100.0, 100.0), ConnectionStyle::Orthogonal));
    assert_eq!(rec.ops.len(), 4);
}

#[test]
fn render_path_propagates_sink_errors() {
    let err = render_path(&mut Broken, pt(0.0, 0.0), pt(10.0, 0.0), ConnectionStyle::Straight).unwrap_err();
    assert_eq!(err, "surface lost");
}

// =============================================================
// straight
// =============================================================

#[test]
fn straight_is_a_single_line() {
    let segs = path_segments(pt(0.0, 0.0), pt(50.0, 20.0), ConnectionStyle::Straight);
    assert_eq!(segs, vec![PathSegment::MoveTo(pt(0.0, 0.0)), PathSegment::LineTo(pt(50.0, 20.0))]);
}

#[test]
fn straight_angle_is_chord() {
    assert!(approx_eq(arrow_angle(pt(0.0, 0.0), pt(100.0, 0.0), ConnectionStyle::Straight), 0.0));
    assert!(approx_eq(arrow_angle(pt(0.0, 0.0), pt(0.0, 100.0), ConnectionStyle::Straight), FRAC_PI_2));
}

// =============================================================
// curved
// =============================================================

#[test]
fn curved_angle_matches_final_control_point() {
    let cases = [
        (pt(0.0, 0.0), pt(100.0, 50.0)),
        (pt(0.0, 0.0), pt(50.0, 100.0)),
        (pt(10.0, 10.0), pt(20.0, 210.0)),
        (pt(300.0, 40.0), pt(20.0, 60.0)),
        (pt(0.0, 0.0), pt(-80.0, -90.0)),
    ];
    for (start, end) in cases {
        let (_, cp2) = curve_controls(start, end);
        let expected = (end.y - cp2.y).atan2(end.x - cp2.x);
        assert!(approx_eq(arrow_angle(start, end, ConnectionStyle::Curved), expected), "{start:?} -> {end:?}");
    }
}

#[test]
fn curved_diagonal_controls() {
    let (cp1, cp2) = curve_controls(pt(0.0, 0.0), pt(100.0, 50.0));
    assert_eq!(cp1, pt(30.0, 0.0));
    assert_eq!(cp2, pt(85.0, -25.0));
}

#[test]
fn curved_near_vertical_wave() {
    let (cp1, cp2) = curve_controls(pt(0.0, 0.0), pt(10.0, 200.0));
    assert_eq!(cp1, pt(5.0, 40.0));
    assert_eq!(cp2, pt(10.0, 180.0));
    assert!(approx_eq(arrow_angle(pt(0.0, 0.0), pt(10.0, 200.0), ConnectionStyle::Curved), FRAC_PI_2));
}

#[test]
fn curved_near_horizontal_wave() {
    let (cp1, cp2) = curve_controls(pt(0.0, 0.0), pt(200.0, -10.0));
    assert_eq!(cp1, pt(40.0, -5.0));
    assert_eq!(cp2, pt(180.0, -10.0));
}

#[test]
fn curved_wave_is_capped() {
    let (cp1, _) = curve_controls(pt(0.0, 0.0), pt(100.0, 1000.0));
    assert_eq!(cp1.x, 20.0);
}

#[test]
fn curved_coincident_points_do_not_produce_nan() {
    let angle = arrow_angle(pt(5.0, 5.0), pt(5.0, 5.0), ConnectionStyle::Curved);
    assert!(angle.is_finite());
}

// =============================================================
// orthogonal
// =============================================================

#[test]
fn orthogonal_waypoints_bend_at_mid_x() {
    assert_eq!(
        orthogonal_waypoints(pt(0.0, 0.0), pt(100.0, 60.0)),
        [pt(0.0, 0.0), pt(50.0, 0.0), pt(50.0, 60.0), pt(100.0, 60.0)]
    );
}

#[test]
fn orthogonal_angle_by_side() {
    assert_eq!(arrow_angle(pt(0.0, 0.0), pt(100.0, 100.0), ConnectionStyle::Orthogonal), 0.0);
    assert_eq!(arrow_angle(pt(100.0, 0.0), pt(0.0, 100.0), ConnectionStyle::Orthogonal), PI);
}

#[test]
fn orthogonal_vertical_degenerates_to_vertical_tangent() {
    assert_eq!(arrow_angle(pt(50.0, 0.0), pt(50.0, 100.0), ConnectionStyle::Orthogonal), FRAC_PI_2);
    assert_eq!(arrow_angle(pt(50.0, 100.0), pt(50.0, 0.0), ConnectionStyle::Orthogonal), -FRAC_PI_2);
}

// =============================================================
// rounded
// =============================================================

#[test]
fn rounded_small_rise_is_straight() {
    let segs = path_segments(pt(0.0, 0.0), pt(100.0, 20.0), ConnectionStyle::Rounded);
    assert_eq!(segs.len(), 2);
    let angle = arrow_angle(pt(0.0, 0.0), pt(100.0, 20.0), ConnectionStyle::Rounded);
    assert!(approx_eq(angle, 20.0_f64.atan2(100.0)));
}

#[test]
fn rounded_large_rise_uses_two_arcs() {
    let segs = path_segments(pt(0.0, 0.0), pt(100.0, 100.0), ConnectionStyle::Rounded);
    assert_eq!(
        segs,
        vec![
            PathSegment::MoveTo(pt(0.0, 0.0)),
            PathSegment::ArcTo { corner: pt(50.0, 0.0), toward: pt(50.0, 100.0), radius: 10.0 },
            PathSegment::ArcTo { corner: pt(50.0, 100.0), toward: pt(100.0, 100.0), radius: 10.0 },
            PathSegment::LineTo(pt(100.0, 100.0)),
        ]
    );
    assert_eq!(arrow_angle(pt(0.0, 0.0), pt(100.0, 100.0), ConnectionStyle::Rounded), 0.0);
}

#[test]
fn rounded_radius_shrinks_for_narrow_runs() {
    let segs = path_segments(pt(0.0, 0.0), pt(8.0, 100.0), ConnectionStyle::Rounded);
    let PathSegment::ArcTo { radius, .. } = segs[1] else {
        panic!("expected arc");
    };
    assert_eq!(radius, 4.0);
}

// =============================================================
// arrowhead / label / route
// =============================================================

#[test]
fn arrowhead_points_back_along_angle() {
    let head = arrowhead(pt(100.0, 0.0), 0.0);
    assert!(approx_eq(head.tip.x, 98.0) && approx_eq(head.tip.y, 0.0));
    let back = 12.0 * (PI / 6.0).cos();
    assert!(approx_eq(head.left.x, 98.0 - back) && approx_eq(head.left.y, 6.0));
    assert!(approx_eq(head.right.x, 98.0 - back) && approx_eq(head.right.y, -6.0));
}

#[test]
fn label_sits_at_anchor_midpoint() {
    assert_eq!(label_anchor(pt(0.0, 0.0), pt(100.0, 50.0)), pt(50.0, 25.0));
}

#[test]
fn route_builds_arrow_only_when_arrowed() {
    let from = Bounds::new(0.0, 0.0, 100.0, 50.0);
    let to = Bounds::new(0.0, 150.0, 100.0, 50.0);
    let with = route(&from, &to, AnchorMode::Center, ConnectionStyle::Straight, true);
    assert_eq!(with.anchors.start, pt(50.0, 50.0));
    assert_eq!(with.anchors.end, pt(50.0, 150.0));
    assert!(approx_eq(with.angle, FRAC_PI_2));
    assert!(with.arrow.is_some());
    assert_eq!(with.label_at, pt(50.0, 100.0));
    let without = route(&from, &to, AnchorMode::Center, ConnectionStyle::Straight, false);
    assert!(without.arrow.is_none());
}

#[test]
fn style_names_parse() {
    for style in ConnectionStyle::ALL {
        assert_eq!(style.as_str().parse::<ConnectionStyle>().unwrap(), style);
    }
    assert!("zigzag".parse::<ConnectionStyle>().is_err());
}
