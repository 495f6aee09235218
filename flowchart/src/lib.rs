//! Flowchart DSL front end: parsing, graph leveling, layout and shape sizing.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`ast`] | Node, edge and diagram records |
//! | [`parse`] | Line scanner for `graph` / `flowchart` text |
//! | [`graph`] | Directed graph and BFS level assignment |
//! | [`layout`] | Level-and-index positioning per direction |
//! | [`size`] | Text-driven shape dimensions |
//! | [`error`] | Whole-diagram errors and error codes |

pub mod ast;
pub mod error;
pub mod graph;
pub mod layout;
pub mod parse;
pub mod size;

use std::fmt;
use std::str::FromStr;

pub use ast::{Diagram, Direction, EdgeRecord, NodeRecord, ShapeKind};
pub use error::{DiagramError, ErrorCode};
pub use layout::{Position, layout};
pub use parse::parse;
pub use size::{Size, shape_size};

/// Diagram engine requested by the host.
///
/// Only the built-in flowchart engine is available; other names are rejected
/// instead of being silently rendered with the wrong grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineKind {
    #[default]
    Mermaid,
}

impl FromStr for EngineKind {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mermaid" | "flowchart" => Ok(Self::Mermaid),
            other => Err(DiagramError::UnsupportedEngine(other.to_owned())),
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mermaid => f.write_str("mermaid"),
        }
    }
}

/// Check the engine, parse, and reject diagrams with no nodes.
///
/// # Errors
///
/// Returns [`DiagramError::UnsupportedEngine`] for an unknown engine name and
/// [`DiagramError::EmptyGraph`] when the text contains no nodes.
pub fn compile(text: &str, engine: &str) -> Result<Diagram, DiagramError> {
    let engine: EngineKind = engine.parse()?;
    let diagram = parse(text);
    tracing::debug!(%engine, nodes = diagram.nodes.len(), "compiled diagram");
    if diagram.is_empty() {
        tracing::warn!(chars = text.len(), "diagram text produced no nodes");
        return Err(DiagramError::EmptyGraph);
    }
    Ok(diagram)
}
