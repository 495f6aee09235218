use super::*;

fn ids(diagram: &Diagram) -> Vec<&str> {
    diagram.nodes.iter().map(|n| n.id.as_str()).collect()
}

// =============================================================================
// HEADER / DIRECTION
// =============================================================================

#[test]
fn header_sets_direction() {
    assert_eq!(parse("graph LR\nA-->B").direction, Direction::LR);
    assert_eq!(parse("flowchart BT\nA-->B").direction, Direction::BT);
    assert_eq!(parse("flowchart rl\nA-->B").direction, Direction::RL);
}

#[test]
fn tb_normalizes_to_td() {
    assert_eq!(parse("graph TB\nA-->B").direction, Direction::TD);
}

#[test]
fn missing_header_defaults_to_td() {
    let d = parse("A-->B");
    assert_eq!(d.direction, Direction::TD);
    assert_eq!(ids(&d), vec!["A", "B"]);
}

#[test]
fn bare_header_keeps_default() {
    let d = parse("flowchart\nA-->B");
    assert_eq!(d.direction, Direction::TD);
    assert_eq!(d.edges.len(), 1);
}

#[test]
fn header_with_trailing_statement() {
    let d = parse("graph LR; A-->B");
    assert_eq!(d.direction, Direction::LR);
    assert_eq!(d.edges.len(), 1);
}

// =============================================================================
// NODES
// =============================================================================

#[test]
fn bracket_forms_map_to_shapes() {
    let d = parse("graph TD\nA[Box]\nB(Round)\nC{Choice}\nD((Oval))\nE{{Hex}}");
    let kinds: Vec<ShapeKind> = d.nodes.iter().map(|n| n.kind).collect();
    assert_eq!(
        kinds,
        vec![ShapeKind::Rect, ShapeKind::Circle, ShapeKind::Diamond, ShapeKind::Ellipse, ShapeKind::Hexagon]
    );
    assert_eq!(d.nodes[3].text, "Oval");
    assert_eq!(d.nodes[4].text, "Hex");
}

#[test]
fn subroutine_and_stadium_forms_are_accepted() {
    let d = parse("A[[Sub]]\nB([Stadium])");
    assert_eq!(d.nodes[0].kind, ShapeKind::Rect);
    assert_eq!(d.nodes[0].text, "Sub");
    assert_eq!(d.nodes[1].kind, ShapeKind::Circle);
    assert_eq!(d.nodes[1].text, "Stadium");
}

#[test]
fn unclosed_double_opener_falls_back_to_single() {
    let d = parse("A((x) --> B");
    assert_eq!(ids(&d), vec!["A", "B"]);
    assert_eq!(d.nodes[0].kind, ShapeKind::Circle);
    assert_eq!(d.nodes[0].text, "(x");
    assert_eq!((d.edges[0].from.as_str(), d.edges[0].to.as_str()), ("A", "B"));
}

#[test]
fn quotes_are_stripped_from_text() {
    let d = parse(r#"A["Hello world"]"#);
    assert_eq!(d.nodes[0].text, "Hello world");
}

#[test]
fn empty_text_falls_back_to_id() {
    let d = parse(r#"A[""]"#);
    assert_eq!(d.nodes[0].text, "A");
}

#[test]
fn undeclared_endpoints_become_rect_nodes() {
    let d = parse("A[Start] --> B");
    assert_eq!(ids(&d), vec!["A", "B"]);
    assert_eq!(d.nodes[1].kind, ShapeKind::Rect);
    assert_eq!(d.nodes[1].text, "B");
}

#[test]
fn redeclaration_is_last_write_wins() {
    let d = parse("A[First]\nB-->A\nA{Second}");
    assert_eq!(ids(&d), vec!["A", "B"]);
    assert_eq!(d.nodes[0].kind, ShapeKind::Diamond);
    assert_eq!(d.nodes[0].text, "Second");
}

#[test]
fn bare_ids_are_not_registered() {
    let d = parse("graph TD\nlonely\nstyle A fill:#f9f\nclassDef hot fill:#f00");
    assert!(d.nodes.is_empty());
}

#[test]
fn source_node_precedes_declared_target() {
    let d = parse("A --> B[Target]");
    assert_eq!(ids(&d), vec!["A", "B"]);
}

// =============================================================================
// CONNECTORS
// =============================================================================

#[test]
fn connector_flags() {
    let d = parse("A-->B\nA---C\nA-.->D\nA==>E\nA-.-F\nA===G");
    let flags: Vec<(bool, bool, bool)> = d.edges.iter().map(|e| (e.dashed, e.arrowed, e.thick)).collect();
    assert_eq!(
        flags,
        vec![
            (false, true, false),
            (false, false, false),
            (true, true, false),
            (false, true, true),
            (true, false, false),
            (false, false, true),
        ]
    );
    assert_eq!(d.edges[2].connector, "-.->");
}

#[test]
fn longer_connectors_are_accepted() {
    let d = parse("A--->B\nB====>C");
    assert_eq!(d.edges.len(), 2);
    assert!(d.edges[1].thick);
    assert!(d.edges[1].arrowed);
}

#[test]
fn pipe_label() {
    let d = parse("A-->|Yes|B\nA --> |No| C");
    assert_eq!(d.edges[0].label.as_deref(), Some("Yes"));
    assert_eq!(d.edges[1].label.as_deref(), Some("No"));
    assert_eq!(d.edges[1].to, "C");
}

#[test]
fn inline_label_forms() {
    let d = parse("B--Yes-->C\nA -- maybe --- D\nA -. later .-> E\nA == loud ==> F");
    assert_eq!(d.edges.len(), 4);
    assert_eq!(d.edges[0].label.as_deref(), Some("Yes"));
    assert_eq!(d.edges[0].connector, "-->");
    assert_eq!(d.edges[1].connector, "---");
    assert_eq!(d.edges[2].connector, "-.->");
    assert!(d.edges[2].dashed);
    assert_eq!(d.edges[3].connector, "==>");
    assert_eq!(d.edges[3].label.as_deref(), Some("loud"));
}

#[test]
fn chained_connectors() {
    let d = parse("A --> B --> C");
    assert_eq!(d.edges.len(), 2);
    assert_eq!((d.edges[0].from.as_str(), d.edges[0].to.as_str()), ("A", "B"));
    assert_eq!((d.edges[1].from.as_str(), d.edges[1].to.as_str()), ("B", "C"));
}

#[test]
fn semicolon_ends_statement() {
    let d = parse("A-->B; C-->D");
    assert_eq!(d.edges.len(), 2);
    assert_eq!(d.edges[1].from, "C");
}

#[test]
fn dangling_connector_is_ignored() {
    let d = parse("A -->\n--> B");
    assert!(d.edges.is_empty());
}

// =============================================================================
// NOISE
// =============================================================================

#[test]
fn comments_and_fences_are_ignored() {
    let input = "```mermaid\ngraph TD\n%% a comment\nA-->B %% trailing\n```";
    let d = parse(input);
    assert_eq!(ids(&d), vec!["A", "B"]);
    assert_eq!(d.edges.len(), 1);
}

#[test]
fn percent_signs_inside_text_are_kept() {
    let d = parse("graph TD\nA[50%% done]-->B");
    assert_eq!(ids(&d), vec!["A", "B"]);
    assert_eq!(d.nodes[0].text, "50%% done");
    assert_eq!(d.edges.len(), 1);
}

#[test]
fn indented_comment_line_is_skipped() {
    let d = parse("graph TD\n    %% A-->Z\nA-->B");
    assert_eq!(ids(&d), vec!["A", "B"]);
}

#[test]
fn parsing_is_deterministic() {
    let src = "flowchart LR\nA[Start] --> B{Is it?}\nB -->|Yes| C((Done))\nB -.-> D{{Retry}}\nD ==> A";
    assert_eq!(parse(src), parse(src));
}

#[test]
fn empty_input_yields_empty_diagram() {
    let d = parse("");
    assert!(d.is_empty());
    assert!(d.edges.is_empty());
}

#[test]
fn unrecognized_text_is_skipped() {
    let d = parse("graph TD\n@@ ?? !!\nA[Ok] --> B\n<<>>");
    assert_eq!(ids(&d), vec!["A", "B"]);
}

#[test]
fn decision_diagram() {
    let d = parse("flowchart TD\nA[Start] --> B{Is it?}\nB -->|Yes| C[OK]\nB -->|No| D[Rethink]\nD --> B");
    assert_eq!(ids(&d), vec!["A", "B", "C", "D"]);
    assert_eq!(d.edges.len(), 4);
    assert_eq!(d.node("B").map(|n| n.kind), Some(ShapeKind::Diamond));
    assert_eq!(d.node("B").map(|n| n.text.as_str()), Some("Is it?"));
}
