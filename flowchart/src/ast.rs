//! Records produced by the flowchart parser.

use serde::{Deserialize, Serialize};

/// A parsed flowchart: nodes in first-appearance order, edges in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagram {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
    pub direction: Direction,
}

impl Diagram {
    /// Look up a node by id.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&NodeRecord> {
        self.nodes.iter().find(|n| n.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// A declared (or synthesized) node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    pub text: String,
    pub kind: ShapeKind,
}

impl NodeRecord {
    /// Default node for an id that only appears as an edge endpoint.
    #[must_use]
    pub fn implicit(id: &str) -> Self {
        Self { id: id.to_owned(), text: id.to_owned(), kind: ShapeKind::Rect }
    }
}

/// A directed connection between two node ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub from: String,
    pub to: String,
    /// Connector token as written, e.g. `-->` or `-.->`.
    pub connector: String,
    pub label: Option<String>,
    pub dashed: bool,
    pub arrowed: bool,
    pub thick: bool,
}

impl EdgeRecord {
    /// Build an edge, deriving the style flags from the connector token.
    #[must_use]
    pub fn new(from: &str, to: &str, connector: &str, label: Option<String>) -> Self {
        Self {
            from: from.to_owned(),
            to: to.to_owned(),
            connector: connector.to_owned(),
            label,
            dashed: connector.contains('.'),
            arrowed: connector.contains('>'),
            thick: connector.contains('='),
        }
    }
}

/// Node shape family.
///
/// `Triangle` has no bracket syntax; hosts reach it through the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Rect,
    Circle,
    Diamond,
    Ellipse,
    Hexagon,
    Triangle,
}

impl ShapeKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rect => "rect",
            Self::Circle => "circle",
            Self::Diamond => "diamond",
            Self::Ellipse => "ellipse",
            Self::Hexagon => "hexagon",
            Self::Triangle => "triangle",
        }
    }
}

/// Main flow axis of the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Top to bottom.
    #[default]
    TD,
    /// Left to right.
    LR,
    /// Bottom to top.
    BT,
    /// Right to left.
    RL,
}

impl Direction {
    /// Parse a direction token, case-insensitive. `TB` is an alias of `TD`.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        match token.to_ascii_uppercase().as_str() {
            "TD" | "TB" => Some(Self::TD),
            "LR" => Some(Self::LR),
            "BT" => Some(Self::BT),
            "RL" => Some(Self::RL),
            _ => None,
        }
    }

    /// Whether levels advance along the x axis.
    #[must_use]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::LR | Self::RL)
    }
}
