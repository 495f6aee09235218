#![allow(clippy::float_cmp)]

use super::*;
use crate::parse;

fn positions(src: &str) -> HashMap<String, Position> {
    let d = parse(src);
    layout(&d.nodes, &d.edges, d.direction)
}

fn at(map: &HashMap<String, Position>, id: &str) -> (f64, f64) {
    let p = map[id];
    (p.x, p.y)
}

// =============================================================================
// DIRECTIONS
// =============================================================================

#[test]
fn td_fan_out() {
    let p = positions("graph TD\nA[Start] --> B{Choice}\nB --> C\nB --> D");
    assert_eq!(at(&p, "A"), (400.0, 100.0));
    assert_eq!(at(&p, "B"), (400.0, 250.0));
    assert_eq!(at(&p, "C"), (300.0, 400.0));
    assert_eq!(at(&p, "D"), (500.0, 400.0));
}

#[test]
fn lr_chain() {
    let p = positions("graph LR\nA-->B-->C");
    assert_eq!(at(&p, "A"), (100.0, 300.0));
    assert_eq!(at(&p, "B"), (300.0, 300.0));
    assert_eq!(at(&p, "C"), (500.0, 300.0));
}

#[test]
fn lr_siblings_spread_vertically() {
    let p = positions("graph LR\nA-->B\nA-->C");
    assert_eq!(at(&p, "B"), (300.0, 225.0));
    assert_eq!(at(&p, "C"), (300.0, 375.0));
}

#[test]
fn bt_inverts_main_axis() {
    let p = positions("graph BT\nA-->B");
    assert_eq!(at(&p, "A"), (400.0, 500.0));
    assert_eq!(at(&p, "B"), (400.0, 350.0));
}

#[test]
fn rl_inverts_main_axis() {
    let p = positions("graph RL\nA-->B");
    assert_eq!(at(&p, "A"), (700.0, 300.0));
    assert_eq!(at(&p, "B"), (500.0, 300.0));
}

// =============================================================================
// EDGE CASES
// =============================================================================

#[test]
fn empty_input_yields_empty_layout() {
    assert!(layout(&[], &[], Direction::TD).is_empty());
}

#[test]
fn single_node_sits_at_origin() {
    let nodes = vec![NodeRecord::implicit("Only")];
    let p = layout(&nodes, &[], Direction::TD);
    assert_eq!(at(&p, "Only"), (400.0, 100.0));
}

#[test]
fn every_node_is_positioned() {
    let p = positions("A-->B\nB-->A\nC[Lone]\nD-->E");
    for id in ["A", "B", "C", "D", "E"] {
        assert!(p.contains_key(id), "{id} missing");
    }
}

#[test]
fn layout_is_deterministic() {
    let src = "graph TD\nA-->B\nA-->C\nC-->D\nB-->D\nX-->Y";
    assert_eq!(positions(src), positions(src));
}

#[test]
fn spacing_depends_on_axis() {
    assert_eq!(spacing(Direction::TD), (150.0, 200.0));
    assert_eq!(spacing(Direction::BT), (150.0, 200.0));
    assert_eq!(spacing(Direction::LR), (200.0, 150.0));
    assert_eq!(spacing(Direction::RL), (200.0, 150.0));
}

#[test]
fn decision_flow_with_orphan() {
    let src = "graph TD\nA[Start]-->B{Decide}\nB--Yes-->C[End]\nD[Orphan]";
    let p = positions(src);
    let (ya, yb, yc) = (at(&p, "A").1, at(&p, "B").1, at(&p, "C").1);
    assert!(ya < yb && yb < yc);

    let d = parse(src);
    let levels = FlowGraph::new(&d.nodes, &d.edges).levels();
    assert_eq!(levels.get("D"), Some(0));
    assert_eq!(at(&p, "D").1, ya);
    // A and D share level 0 and are centered around the origin.
    assert_eq!(at(&p, "A"), (300.0, 100.0));
    assert_eq!(at(&p, "D"), (500.0, 100.0));
}
