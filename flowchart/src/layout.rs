//! Layered layout: converts leveled nodes into top-left shape positions.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::ast::{Direction, EdgeRecord, NodeRecord};
use super::graph::FlowGraph;

// Layout constants (diagram units).
const MAIN_SPACING_VERTICAL: f64 = 150.0;
const MAIN_SPACING_HORIZONTAL: f64 = 200.0;
const CROSS_SPACING_VERTICAL: f64 = 200.0;
const CROSS_SPACING_HORIZONTAL: f64 = 150.0;
const ORIGIN_TD: (f64, f64) = (400.0, 100.0);
const ORIGIN_BT: (f64, f64) = (400.0, 500.0);
const ORIGIN_LR: (f64, f64) = (100.0, 300.0);
const ORIGIN_RL: (f64, f64) = (700.0, 300.0);

/// Top-left corner of a node's shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Distance between levels along the flow axis and between siblings across it.
#[must_use]
pub fn spacing(direction: Direction) -> (f64, f64) {
    if direction.is_horizontal() {
        (MAIN_SPACING_HORIZONTAL, CROSS_SPACING_HORIZONTAL)
    } else {
        (MAIN_SPACING_VERTICAL, CROSS_SPACING_VERTICAL)
    }
}

/// Position every node by level and by index within its level.
///
/// Each level is centered on the cross axis around a fixed origin; levels
/// advance along the main axis (inverted for `BT` and `RL`).
#[must_use]
pub fn layout(nodes: &[NodeRecord], edges: &[EdgeRecord], direction: Direction) -> HashMap<String, Position> {
    let graph = FlowGraph::new(nodes, edges);
    let levels = graph.levels();
    let (main, cross) = spacing(direction);

    let mut positions = HashMap::with_capacity(levels.len());
    for (level, group) in levels.groups().iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let offset = group.len().saturating_sub(1) as f64 * cross / 2.0;
        #[allow(clippy::cast_precision_loss)]
        let along = level as f64 * main;

        for (i, id) in group.iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let across = i as f64 * cross - offset;
            let (x, y) = match direction {
                Direction::TD => (ORIGIN_TD.0 + across, ORIGIN_TD.1 + along),
                Direction::BT => (ORIGIN_BT.0 + across, ORIGIN_BT.1 - along),
                Direction::LR => (ORIGIN_LR.0 + along, ORIGIN_LR.1 + across),
                Direction::RL => (ORIGIN_RL.0 - along, ORIGIN_RL.1 + across),
            };
            positions.insert((*id).to_owned(), Position { x, y });
        }
    }

    tracing::debug!(nodes = positions.len(), ?direction, "layout complete");
    positions
}

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;
