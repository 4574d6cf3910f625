use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::{PointId, PointStore};
use crate::render::ShapeRenderer;
use crate::shape::{Shape, ShapeId};

/// Which of a container's layers an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerKind {
    /// The persistent layer new shapes are committed to
    Current,
    /// Transient layer holding shapes being drawn
    Working,
    /// Transient layer holding selection and snap decorations
    Helper,
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerKind::Current => write!(f, "current"),
            LayerKind::Working => write!(f, "working"),
            LayerKind::Helper => write!(f, "helper"),
        }
    }
}

/// Represents a single layer in the document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Layer {
    /// Unique identifier for the layer
    pub id: Uuid,
    /// Display name of the layer
    pub name: String,
    /// Whether the layer is currently visible
    pub visible: bool,
    /// Shapes in drawing order
    shapes: Vec<Shape>,
    /// Bumped on every invalidation so renderers can skip unchanged layers
    #[serde(skip)]
    version: u64,
}

impl Layer {
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            visible: true,
            shapes: Vec::new(),
            version: 0,
        }
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Adds a shape on top of the layer
    pub fn add_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Insert a shape right after the top-level shape `after`, or on top
    pub fn insert_after(&mut self, after: ShapeId, shape: Shape) {
        match self.shapes.iter().position(|s| s.id() == after) {
            Some(index) => self.shapes.insert(index + 1, shape),
            None => self.shapes.push(shape),
        }
    }

    /// Removes a top-level shape and returns it
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Shape> {
        let index = self.shapes.iter().position(|s| s.id() == id)?;
        Some(self.shapes.remove(index))
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    /// Find a shape by id, searching inside groups
    pub fn find_shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find_map(|s| s.find(id))
    }

    pub fn find_shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find_map(|s| s.find_mut(id))
    }

    /// Mark every shape referencing `point` dirty; returns how many top-level shapes matched
    pub fn touch_point(&mut self, point: PointId) -> usize {
        self.shapes
            .iter_mut()
            .map(|s| s.touch_point(point))
            .filter(|&hit| hit)
            .count()
    }

    /// Draw the layer and clear the dirty flags, returning how many shapes had changed
    pub fn redraw(&mut self, renderer: &mut dyn ShapeRenderer, points: &PointStore) -> usize {
        let mut changed = 0;
        for shape in &mut self.shapes {
            shape.draw(renderer, points, 0.0, 0.0, None);
            if shape.take_dirty() {
                changed += 1;
            }
        }
        changed
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.find_shape(id).is_some()
    }

    /// Mark the layer for repaint; returns the new version
    pub fn invalidate(&mut self) -> u64 {
        self.version += 1;
        self.version
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}

/// A page: persistent layers plus the transient working and helper layers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Container {
    layers: Vec<Layer>,
    current: usize,
    #[serde(skip, default = "working_layer")]
    working: Layer,
    #[serde(skip, default = "helper_layer")]
    helper: Layer,
}

fn working_layer() -> Layer {
    Layer::new("Working")
}

fn helper_layer() -> Layer {
    Layer::new("Helper")
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl Container {
    /// Creates a container with one persistent layer
    pub fn new() -> Self {
        Self {
            layers: vec![Layer::new("Layer1")],
            current: 0,
            working: working_layer(),
            helper: helper_layer(),
        }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Adds a persistent layer and returns its index
    pub fn add_layer(&mut self, name: &str) -> usize {
        self.layers.push(Layer::new(name));
        self.layers.len() - 1
    }

    /// Make the layer at `index` the current one
    pub fn set_current_layer(&mut self, index: usize) -> bool {
        if index < self.layers.len() {
            self.current = index;
            true
        } else {
            false
        }
    }

    pub fn current_layer_index(&self) -> usize {
        self.current
    }

    pub fn layer(&self, kind: LayerKind) -> &Layer {
        match kind {
            LayerKind::Current => &self.layers[self.current],
            LayerKind::Working => &self.working,
            LayerKind::Helper => &self.helper,
        }
    }

    pub fn layer_mut(&mut self, kind: LayerKind) -> &mut Layer {
        match kind {
            LayerKind::Current => &mut self.layers[self.current],
            LayerKind::Working => &mut self.working,
            LayerKind::Helper => &mut self.helper,
        }
    }

    /// Find a shape in any persistent layer or the working layer
    pub fn find_shape(&self, id: ShapeId) -> Option<&Shape> {
        self.layers
            .iter()
            .chain(std::iter::once(&self.working))
            .find_map(|layer| layer.find_shape(id))
    }

    pub fn find_shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.layers
            .iter_mut()
            .chain(std::iter::once(&mut self.working))
            .find_map(|layer| layer.find_shape_mut(id))
    }

    /// Mark the owners of `point` dirty in the persistent and working layers
    pub fn touch_point(&mut self, point: PointId) {
        for layer in self.layers.iter_mut().chain(std::iter::once(&mut self.working)) {
            layer.touch_point(point);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorOptions;
    use crate::geometry::PointStore;
    use crate::shape::factory;

    #[test]
    fn test_find_shape_inside_group() {
        let options = EditorOptions::default();
        let mut store = PointStore::new();
        let line = factory::create_line(&options, store.create(0.0, 0.0), store.create(1.0, 1.0));
        let line_id = line.id();
        let group = factory::create_group("Group", vec![line]);
        let group_id = group.id();

        let mut container = Container::new();
        container.layer_mut(LayerKind::Current).add_shape(group);

        assert_eq!(container.find_shape(line_id).unwrap().base.owner, Some(group_id));
        // Only top-level shapes can be removed directly
        assert!(container.layer_mut(LayerKind::Current).remove_shape(line_id).is_none());
        assert!(container.layer(LayerKind::Working).is_empty());
    }

    #[test]
    fn test_current_layer_switch() {
        let mut container = Container::new();
        let index = container.add_layer("Layer2");
        assert!(container.set_current_layer(index));
        assert!(!container.set_current_layer(42));
        assert_eq!(container.layer(LayerKind::Current).name, "Layer2");
    }
}
