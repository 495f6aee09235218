use super::*;
use crate::parse;

fn graph(src: &str) -> FlowGraph {
    let d = parse(src);
    FlowGraph::new(&d.nodes, &d.edges)
}

#[test]
fn roots_are_nodes_without_incoming_edges() {
    let g = graph("A-->B\nC-->B\nB-->D");
    assert_eq!(g.roots(), vec!["A", "C"]);
}

#[test]
fn children_follow_edge_order() {
    let g = graph("A-->C\nA-->B\nA-->D");
    assert_eq!(g.children("A"), vec!["C", "B", "D"]);
    assert!(g.children("missing").is_empty());
}

#[test]
fn edges_with_unknown_endpoints_are_dropped() {
    let nodes = vec![NodeRecord::implicit("A")];
    let edges = vec![EdgeRecord::new("A", "Z", "-->", None)];
    let g = FlowGraph::new(&nodes, &edges);
    assert_eq!(g.node_count(), 1);
    assert!(g.children("A").is_empty());
}

#[test]
fn chain_levels() {
    let levels = graph("A-->B-->C").levels();
    assert_eq!(levels.get("A"), Some(0));
    assert_eq!(levels.get("B"), Some(1));
    assert_eq!(levels.get("C"), Some(2));
}

#[test]
fn fan_out_shares_a_level() {
    let levels = graph("A-->B\nA-->C").levels();
    assert_eq!(levels.groups(), vec![vec!["A"], vec!["B", "C"]]);
}

#[test]
fn longer_path_raises_level() {
    // A->C is discovered at level 1, then raised to 2 through B.
    let levels = graph("A-->C\nA-->B\nB-->C").levels();
    assert_eq!(levels.get("C"), Some(2));
    assert_eq!(levels.groups(), vec![vec!["A"], vec!["B"], vec!["C"]]);
}

#[test]
fn first_settle_does_not_reexpand_children() {
    // D is expanded at level 1 (giving E level 2) before the A->B->C->D path
    // raises D to 3; E keeps level 2.
    let levels = graph("A-->D\nA-->B\nB-->C\nD-->E\nC-->D").levels();
    assert_eq!(levels.get("D"), Some(3));
    assert_eq!(levels.get("E"), Some(2));
}

#[test]
fn cycle_terminates() {
    let levels = graph("A-->B\nB-->C\nC-->A\nR-->A").levels();
    assert_eq!(levels.len(), 4);
    assert_eq!(levels.get("R"), Some(0));
    assert_eq!(levels.get("B"), Some(2));
    assert_eq!(levels.get("C"), Some(3));
    // The back edge C->A raises A once, after A was already expanded.
    assert_eq!(levels.get("A"), Some(4));
}

#[test]
fn rootless_cycle_defaults_to_level_zero() {
    let levels = graph("A-->B\nB-->A").levels();
    assert_eq!(levels.get("A"), Some(0));
    assert_eq!(levels.get("B"), Some(0));
    assert_eq!(levels.groups(), vec![vec!["A", "B"]]);
}

#[test]
fn unreached_nodes_trail_level_zero() {
    let levels = graph("X[Solo]\nA-->B\nP-->Q\nQ-->P").levels();
    // Roots X and A first, then the unreachable P/Q cycle.
    assert_eq!(levels.groups()[0], vec!["X", "A", "P", "Q"]);
}

#[test]
fn empty_graph_has_no_levels() {
    let levels = FlowGraph::new(&[], &[]).levels();
    assert!(levels.is_empty());
    assert!(levels.groups().is_empty());
}
