#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::Point;
use crate::doc::{ShapeId, ShapeStore};
use crate::shape::outline;

/// Topmost shape whose outline contains `world`, or `None` over empty canvas.
///
/// Shapes are tested in reverse draw order so the one painted last wins.
#[must_use]
pub fn hit_test(store: &ShapeStore, world: Point) -> Option<ShapeId> {
    store
        .shapes()
        .iter()
        .rev()
        .find(|shape| outline(shape).contains(world))
        .map(|shape| shape.id.clone())
}
