//! Document model: laid-out shapes, their connections, and the arena that
//! owns them.
//!
//! The arena is filled in one step from a compiled diagram (see
//! [`crate::scene`]) and afterwards mutated only through update-by-id calls
//! from the interaction controller. Connections refer to shapes by id and
//! carry no geometry; anchor points are resolved on every render.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashMap;

use flowchart::ShapeKind;
use serde::{Deserialize, Serialize};

use crate::camera::{Bounds, is_valid_extent};

/// Shape identifier; the node id from the diagram source.
pub type ShapeId = String;

/// Visual attributes of a shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
    pub font_size: f64,
    pub font_family: String,
    pub text_color: String,
}

/// A node placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeInstance {
    pub id: ShapeId,
    pub kind: ShapeKind,
    /// Left edge of the bounding box in diagram coordinates.
    pub x: f64,
    /// Top edge of the bounding box in diagram coordinates.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub text: String,
    pub style: ShapeStyle,
}

impl ShapeInstance {
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }
}

/// A directed link between two shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionInstance {
    /// `conn-<edge index>`.
    pub id: String,
    pub from_id: ShapeId,
    pub to_id: ShapeId,
    pub stroke: String,
    pub stroke_width: f64,
    pub dashed: bool,
    pub arrowed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Serializable copy of the arena contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub shapes: Vec<ShapeInstance>,
    pub connections: Vec<ConnectionInstance>,
}

/// Id-keyed arena of shapes plus the connection list.
///
/// Shapes keep their insertion order, which is also draw order.
#[derive(Debug, Default)]
pub struct ShapeStore {
    shapes: Vec<ShapeInstance>,
    index: HashMap<ShapeId, usize>,
    connections: Vec<ConnectionInstance>,
}

impl ShapeStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole contents. A later shape with a duplicate id replaces
    /// the earlier one in place; connections naming unknown shapes are dropped.
    pub fn load(&mut self, shapes: Vec<ShapeInstance>, connections: Vec<ConnectionInstance>) {
        let mut next = ShapeStore::new();
        for shape in shapes {
            if !(is_valid_extent(shape.width) && is_valid_extent(shape.height)) {
                log::debug!("dropping shape {} with non-positive size {}x{}", shape.id, shape.width, shape.height);
                continue;
            }
            if let Some(&i) = next.index.get(&shape.id) {
                next.shapes[i] = shape;
            } else {
                next.index.insert(shape.id.clone(), next.shapes.len());
                next.shapes.push(shape);
            }
        }
        next.connections = connections
            .into_iter()
            .filter(|c| {
                let known = next.index.contains_key(&c.from_id) && next.index.contains_key(&c.to_id);
                if !known {
                    log::debug!("dropping connection {} with unknown endpoint", c.id);
                }
                known
            })
            .collect();
        *self = next;
    }

    /// Replace the contents from a snapshot.
    pub fn load_snapshot(&mut self, snapshot: Snapshot) {
        self.load(snapshot.shapes, snapshot.connections);
    }

    pub fn clear(&mut self) {
        *self = ShapeStore::new();
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ShapeInstance> {
        self.index.get(id).map(|&i| &self.shapes[i])
    }

    /// Move a shape's top-left corner. Returns false for an unknown id.
    pub fn move_to(&mut self, id: &str, x: f64, y: f64) -> bool {
        let Some(&i) = self.index.get(id) else {
            return false;
        };
        let shape = &mut self.shapes[i];
        shape.x = x;
        shape.y = y;
        true
    }

    /// Shapes in draw order.
    #[must_use]
    pub fn shapes(&self) -> &[ShapeInstance] {
        &self.shapes
    }

    #[must_use]
    pub fn connections(&self) -> &[ConnectionInstance] {
        &self.connections
    }

    /// Both endpoint shapes of a connection.
    #[must_use]
    pub fn endpoints(&self, conn: &ConnectionInstance) -> Option<(&ShapeInstance, &ShapeInstance)> {
        Some((self.get(&conn.from_id)?, self.get(&conn.to_id)?))
    }

    /// Rewrite style fields in place; geometry is untouched.
    pub fn restyle(&mut self, mut shape: impl FnMut(&mut ShapeStyle), mut conn: impl FnMut(&mut ConnectionInstance)) {
        for s in &mut self.shapes {
            shape(&mut s.style);
        }
        for c in &mut self.connections {
            conn(c);
        }
    }

    /// Bounding box of all shapes, or `None` when empty.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        self.shapes.iter().map(ShapeInstance::bounds).reduce(|acc, b| acc.union(&b))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot { shapes: self.shapes.clone(), connections: self.connections.clone() }
    }

    /// Snapshot as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns the serializer error if a value cannot be represented.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.snapshot())
    }
}
