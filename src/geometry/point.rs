use std::fmt;
use std::ops::{Index, IndexMut};

use kurbo::Point;
use serde::{Deserialize, Serialize};

use super::ShapeState;
use crate::shape::{Shape, ShapeId};
use crate::style::ShapeStyle;

/// Stable handle to a point in a [`PointStore`]
///
/// Shapes hold handles instead of owning their points, so several shapes can
/// reference the same point: moving it moves every shape that uses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PointId(pub usize);

impl PointId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointAlignment {
    #[default]
    None,
    Horizontal,
    Vertical,
}

/// A positioned point that shapes reference by [`PointId`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointShape {
    pub x: f64,
    pub y: f64,
    pub alignment: PointAlignment,
    /// Decorative marker drawn at this point, offset by its position
    pub template: Option<Box<Shape>>,
    pub state: ShapeState,
    pub style: Option<ShapeStyle>,
    /// Shape that owns this point when it acts as a connector
    pub owner: Option<ShapeId>,
}

impl PointShape {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            alignment: PointAlignment::None,
            template: None,
            state: ShapeState::default(),
            style: None,
            owner: None,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn is_connector(&self) -> bool {
        self.state.contains(ShapeState::CONNECTOR)
    }

    pub fn is_locked(&self) -> bool {
        self.state.contains(ShapeState::LOCKED)
    }
}

/// Arena owning every point of a project
///
/// Slots are append-only: a handle stays valid for the lifetime of the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointStore {
    points: Vec<PointShape>,
}

impl PointStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, point: PointShape) -> PointId {
        self.points.push(point);
        PointId(self.points.len() - 1)
    }

    /// Allocate a fresh point at the given position
    pub fn create(&mut self, x: f64, y: f64) -> PointId {
        self.add(PointShape::new(x, y))
    }

    pub fn get(&self, id: PointId) -> Option<&PointShape> {
        self.points.get(id.0)
    }

    pub fn get_mut(&mut self, id: PointId) -> Option<&mut PointShape> {
        self.points.get_mut(id.0)
    }

    pub fn position(&self, id: PointId) -> Point {
        self[id].position()
    }

    pub fn set_position(&mut self, id: PointId, x: f64, y: f64) {
        let point = &mut self[id];
        point.x = x;
        point.y = y;
    }

    pub fn translate(&mut self, id: PointId, dx: f64, dy: f64) {
        let point = &mut self[id];
        point.x += dx;
        point.y += dy;
    }

    /// Copy a point into a new slot
    ///
    /// The copy keeps position, alignment, style and template, but is no
    /// longer a connector and has no owner.
    pub fn duplicate(&mut self, id: PointId) -> PointId {
        let mut copy = self[id].clone();
        copy.state.remove(ShapeState::CONNECTOR);
        copy.owner = None;
        self.add(copy)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PointId, &PointShape)> {
        self.points
            .iter()
            .enumerate()
            .map(|(index, point)| (PointId(index), point))
    }
}

impl Index<PointId> for PointStore {
    type Output = PointShape;

    fn index(&self, id: PointId) -> &PointShape {
        &self.points[id.0]
    }
}

impl IndexMut<PointId> for PointStore {
    fn index_mut(&mut self, id: PointId) -> &mut PointShape {
        &mut self.points[id.0]
    }
}
