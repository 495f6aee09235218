//! Turns a compiled diagram into arena contents, and restyles an arena when
//! the palette changes.

use flowchart::{Diagram, layout, shape_size};

use crate::consts::{CONNECTOR_WIDTH, FONT_FAMILY, SHAPE_FONT_SIZE, SHAPE_STROKE_WIDTH, THICK_CONNECTOR_WIDTH};
use crate::doc::{ConnectionInstance, ShapeInstance, ShapeStore, ShapeStyle, Snapshot};
use crate::theme::Theme;

/// Shape style for a palette.
#[must_use]
pub fn shape_style(theme: Theme) -> ShapeStyle {
    let colors = theme.colors();
    ShapeStyle {
        fill: colors.node_fill.to_owned(),
        stroke: colors.node_stroke.to_owned(),
        stroke_width: SHAPE_STROKE_WIDTH,
        font_size: SHAPE_FONT_SIZE,
        font_family: FONT_FAMILY.to_owned(),
        text_color: colors.node_text.to_owned(),
    }
}

/// Lay out the diagram and size every node.
#[must_use]
pub fn build_scene(diagram: &Diagram, theme: Theme) -> Snapshot {
    let positions = layout(&diagram.nodes, &diagram.edges, diagram.direction);
    let style = shape_style(theme);

    let shapes = diagram
        .nodes
        .iter()
        .filter_map(|node| {
            let Some(pos) = positions.get(&node.id) else {
                log::warn!("node {} has no layout position", node.id);
                return None;
            };
            let size = shape_size(&node.text, node.kind);
            Some(ShapeInstance {
                id: node.id.clone(),
                kind: node.kind,
                x: pos.x,
                y: pos.y,
                width: size.width,
                height: size.height,
                text: node.text.clone(),
                style: style.clone(),
            })
        })
        .collect();

    let edge_stroke = theme.colors().edge_stroke;
    let connections = diagram
        .edges
        .iter()
        .enumerate()
        .map(|(i, edge)| ConnectionInstance {
            id: format!("conn-{i}"),
            from_id: edge.from.clone(),
            to_id: edge.to.clone(),
            stroke: edge_stroke.to_owned(),
            stroke_width: if edge.thick { THICK_CONNECTOR_WIDTH } else { CONNECTOR_WIDTH },
            dashed: edge.dashed,
            arrowed: edge.arrowed,
            label: edge.label.clone(),
        })
        .collect();

    Snapshot { shapes, connections }
}

/// Swap palette colors without touching geometry.
pub fn apply_theme(store: &mut ShapeStore, theme: Theme) {
    let colors = theme.colors();
    store.restyle(
        |style| {
            style.fill = colors.node_fill.to_owned();
            style.stroke = colors.node_stroke.to_owned();
            style.text_color = colors.node_text.to_owned();
        },
        |conn| conn.stroke = colors.edge_stroke.to_owned(),
    );
}

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;
