use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::geometry::PointId;
use crate::shape::ShapeId;

/// Selected shapes and points
///
/// Selecting a shape also selects its points; a point picked on its own is
/// only in `points`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub shapes: HashSet<ShapeId>,
    pub points: HashSet<PointId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_point(&mut self, point: PointId) {
        self.points.insert(point);
    }

    pub fn contains_shape(&self, id: ShapeId) -> bool {
        self.shapes.contains(&id)
    }

    pub fn contains_point(&self, point: PointId) -> bool {
        self.points.contains(&point)
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty() && self.points.is_empty()
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
        self.points.clear();
    }
}
