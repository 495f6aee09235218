use flowchart::parse;

use super::*;
use crate::route::ConnectionStyle;
use crate::scene::build_scene;
use crate::theme::Theme;

fn store(src: &str) -> ShapeStore {
    let mut s = ShapeStore::new();
    s.load_snapshot(build_scene(&parse(src), Theme::Default));
    s
}

// =============================================================
// Path builder
// =============================================================

#[test]
fn path_builder_lines_and_curves() {
    let mut b = SvgPathBuilder::new();
    let Ok(()) = b.move_to(Point::new(0.0, 0.0));
    let Ok(()) = b.line_to(Point::new(100.0, 0.0));
    let Ok(()) = b.bezier_curve_to(Point::new(1.0, 2.0), Point::new(3.0, 4.0), Point::new(5.0, 6.0));
    assert_eq!(b.finish(), "M 0 0 L 100 0 C 1 2 3 4 5 6");
}

#[test]
fn path_builder_converts_arc_to() {
    let mut b = SvgPathBuilder::new();
    let Ok(()) = b.move_to(Point::new(0.0, 0.0));
    let Ok(()) = b.arc_to(Point::new(50.0, 0.0), Point::new(50.0, 100.0), 10.0);
    assert_eq!(b.finish(), "M 0 0 L 40 0 A 10 10 0 0 1 50 10");
}

#[test]
fn path_builder_counter_clockwise_turn() {
    let mut b = SvgPathBuilder::new();
    let Ok(()) = b.move_to(Point::new(0.0, 100.0));
    let Ok(()) = b.arc_to(Point::new(50.0, 100.0), Point::new(50.0, 0.0), 10.0);
    assert_eq!(b.finish(), "M 0 100 L 40 100 A 10 10 0 0 0 50 90");
}

#[test]
fn path_builder_zero_radius_is_a_corner() {
    let mut b = SvgPathBuilder::new();
    let Ok(()) = b.move_to(Point::new(0.0, 0.0));
    let Ok(()) = b.arc_to(Point::new(0.0, 0.0), Point::new(0.0, 100.0), 0.0);
    assert_eq!(b.finish(), "M 0 0 L 0 0");
}

// =============================================================
// Document
// =============================================================

#[test]
fn export_contains_shapes_connections_and_labels() {
    let s = store("graph TD\nA[Start] -->|yes| B{Choice}\nB -.-> C((End))");
    let out = to_svg(&s, &UiState::default());
    assert!(out.starts_with("<svg"));
    for id in ["id=\"A\"", "id=\"B\"", "id=\"C\"", "id=\"conn-0\"", "id=\"conn-1\""] {
        assert!(out.contains(id), "missing {id}");
    }
    assert!(out.contains("Start"));
    assert!(out.contains("yes"));
    assert!(out.contains("<ellipse"));
    assert!(out.contains("<polygon"));
    assert!(out.contains("stroke-dasharray=\"5,5\""));
}

#[test]
fn export_frames_content_with_padding() {
    let s = store("A[Only]");
    let b = s.bounds().unwrap();
    let out = to_svg(&s, &UiState::default());
    let view_box = format!("viewBox=\"{} {} {} {}\"", b.x - 50.0, b.y - 50.0, b.width + 100.0, b.height + 100.0);
    assert!(out.contains(&view_box), "{out}");
}

#[test]
fn export_empty_store_uses_default_canvas() {
    let out = to_svg(&ShapeStore::new(), &UiState::default());
    assert!(out.contains("viewBox=\"0 0 800 600\""));
}

#[test]
fn export_uses_theme_background() {
    let s = store("A-->B");
    let ui = UiState { theme: Theme::Dark, ..UiState::default() };
    assert!(to_svg(&s, &ui).contains("#111827"));
}

#[test]
fn export_follows_connection_style() {
    let s = store("graph LR\nA-->B\nA-->C");
    let curved = UiState { connection_style: ConnectionStyle::Curved, ..UiState::default() };
    assert!(to_svg(&s, &curved).contains(" C "));
    let rounded = UiState { connection_style: ConnectionStyle::Rounded, ..UiState::default() };
    assert!(to_svg(&s, &rounded).contains(" A 10 10 "));
}

#[test]
fn unarrowed_links_have_no_arrowhead() {
    let s = store("A---B");
    assert!(!to_svg(&s, &UiState::default()).contains("<polygon"));
}
