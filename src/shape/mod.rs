//! Shape graph: shapes reference points in a [`PointStore`] by handle.
//!
//! Every shape is a [`BaseShape`] plus a [`ShapeKind`] variant. Capabilities
//! shared by the variants live in three small traits:
//!
//! - [`HasPoints`]: enumerate and rebind the point handles a shape references
//! - [`Connectable`]: swap a referenced point for another (connect) or for a
//!   private copy (disconnect)
//! - [`Movable`]: translate the referenced points, honoring connector ownership

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::{MatrixObject, PointId, PointStore, ShapeState};
use crate::id_generator::generate_id;
use crate::selection::Selection;
use crate::style::ShapeStyle;

mod box_shape;
mod curve;
pub mod factory;
mod group;
mod line;
mod path;

pub use box_shape::{BoxShape, ImageShape, TextShape};
pub use curve::{ArcShape, CubicBezierShape, QuadraticBezierShape};
pub use group::{FigureShape, GroupShape};
pub use line::LineShape;
pub use path::PathShape;

/// Unique identifier of a shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShapeId(pub usize);

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Properties common to every shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseShape {
    pub id: ShapeId,
    pub name: String,
    /// Containing group, if any
    pub owner: Option<ShapeId>,
    pub state: ShapeState,
    pub style: ShapeStyle,
    pub transform: MatrixObject,
    pub is_stroked: bool,
    pub is_filled: bool,
    /// Data-binding properties, looked up by text shapes
    pub data: BTreeMap<String, String>,
    #[serde(skip)]
    dirty: bool,
}

impl BaseShape {
    pub fn new(name: &str, style: ShapeStyle, is_stroked: bool, is_filled: bool) -> Self {
        Self {
            id: generate_id(),
            name: name.to_string(),
            owner: None,
            state: ShapeState::default(),
            style,
            transform: MatrixObject::IDENTITY,
            is_stroked,
            is_filled,
            data: BTreeMap::new(),
            dirty: true,
        }
    }

    /// Flag the shape's geometry as changed since the last redraw
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }
}

/// Enumeration of all shape kinds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShapeKind {
    /// A standalone point
    Point(PointId),
    Line(LineShape),
    Arc(ArcShape),
    CubicBezier(CubicBezierShape),
    QuadraticBezier(QuadraticBezierShape),
    Rectangle(BoxShape),
    Ellipse(BoxShape),
    Text(TextShape),
    Image(ImageShape),
    Path(PathShape),
    Group(GroupShape),
    Figure(FigureShape),
}

/// Shapes that reference points
pub trait HasPoints {
    /// Every point this shape references, nested shapes included.
    /// A point shared by two segments is yielded once per reference.
    fn points(&self) -> Box<dyn Iterator<Item = PointId> + '_>;

    /// Every point reference, for rebinding handles
    fn point_refs_mut(&mut self) -> Vec<&mut PointId>;

    fn contains_point(&self, point: PointId) -> bool {
        self.points().any(|p| p == point)
    }
}

/// Shapes whose point references can be swapped
pub trait Connectable: HasPoints {
    /// Whether `point` may replace one of this shape's references.
    /// A shape never connects to a point it already uses.
    fn can_connect(&self, point: PointId) -> bool {
        !self.contains_point(point)
    }

    /// Replace every reference to `target` with `point`
    ///
    /// Returns false when `point` is already used by this shape or `target`
    /// is not one of its references.
    fn connect(&mut self, point: PointId, target: PointId) -> bool {
        if !self.can_connect(point) {
            return false;
        }
        let mut connected = false;
        for slot in self.point_refs_mut() {
            if *slot == target {
                *slot = point;
                connected = true;
            }
        }
        connected
    }

    /// Replace every reference to `point` with a fresh copy of it
    ///
    /// Other shapes still referencing `point` are unaffected. Returns the copy.
    fn disconnect(&mut self, point: PointId, store: &mut PointStore) -> Option<PointId> {
        if !self.contains_point(point) {
            return None;
        }
        let copy = store.duplicate(point);
        for slot in self.point_refs_mut() {
            if *slot == point {
                *slot = copy;
            }
        }
        Some(copy)
    }

    /// Disconnect every referenced point; returns true if any was replaced
    fn disconnect_all(&mut self, store: &mut PointStore) -> bool {
        let mut distinct: Vec<PointId> = Vec::new();
        for p in self.points() {
            if !distinct.contains(&p) {
                distinct.push(p);
            }
        }
        let mut disconnected = false;
        for p in distinct {
            disconnected |= self.disconnect(p, store).is_some();
        }
        disconnected
    }
}

/// Shapes that can be translated
pub trait Movable {
    /// Translate this shape's points by (dx, dy)
    ///
    /// Points already in `moved` are skipped and every point moved here is
    /// added to it, so a point shared by several moved shapes is displaced
    /// once. Connector points are only moved by the shape that owns them.
    fn move_by(&mut self, store: &mut PointStore, moved: &mut HashSet<PointId>, dx: f64, dy: f64);
}

impl HasPoints for ShapeKind {
    fn points(&self) -> Box<dyn Iterator<Item = PointId> + '_> {
        match self {
            ShapeKind::Point(p) => Box::new(std::iter::once(*p)),
            ShapeKind::Line(s) => s.points(),
            ShapeKind::Arc(s) => s.points(),
            ShapeKind::CubicBezier(s) => s.points(),
            ShapeKind::QuadraticBezier(s) => s.points(),
            ShapeKind::Rectangle(s) | ShapeKind::Ellipse(s) => s.points(),
            ShapeKind::Text(s) => s.points(),
            ShapeKind::Image(s) => s.points(),
            ShapeKind::Path(s) => s.points(),
            ShapeKind::Group(s) => s.points(),
            ShapeKind::Figure(s) => s.points(),
        }
    }

    fn point_refs_mut(&mut self) -> Vec<&mut PointId> {
        match self {
            ShapeKind::Point(p) => vec![p],
            ShapeKind::Line(s) => s.point_refs_mut(),
            ShapeKind::Arc(s) => s.point_refs_mut(),
            ShapeKind::CubicBezier(s) => s.point_refs_mut(),
            ShapeKind::QuadraticBezier(s) => s.point_refs_mut(),
            ShapeKind::Rectangle(s) | ShapeKind::Ellipse(s) => s.point_refs_mut(),
            ShapeKind::Text(s) => s.point_refs_mut(),
            ShapeKind::Image(s) => s.point_refs_mut(),
            ShapeKind::Path(s) => s.point_refs_mut(),
            ShapeKind::Group(s) => s.point_refs_mut(),
            ShapeKind::Figure(s) => s.point_refs_mut(),
        }
    }
}

impl ShapeKind {
    /// The connectable view of this kind; standalone points are not connectable
    fn as_connectable(&self) -> Option<&dyn Connectable> {
        match self {
            ShapeKind::Point(_) => None,
            ShapeKind::Line(s) => Some(s),
            ShapeKind::Arc(s) => Some(s),
            ShapeKind::CubicBezier(s) => Some(s),
            ShapeKind::QuadraticBezier(s) => Some(s),
            ShapeKind::Rectangle(s) | ShapeKind::Ellipse(s) => Some(s),
            ShapeKind::Text(s) => Some(s),
            ShapeKind::Image(s) => Some(s),
            ShapeKind::Path(s) => Some(s),
            ShapeKind::Group(s) => Some(s),
            ShapeKind::Figure(s) => Some(s),
        }
    }

    fn as_connectable_mut(&mut self) -> Option<&mut dyn Connectable> {
        match self {
            ShapeKind::Point(_) => None,
            ShapeKind::Line(s) => Some(s),
            ShapeKind::Arc(s) => Some(s),
            ShapeKind::CubicBezier(s) => Some(s),
            ShapeKind::QuadraticBezier(s) => Some(s),
            ShapeKind::Rectangle(s) | ShapeKind::Ellipse(s) => Some(s),
            ShapeKind::Text(s) => Some(s),
            ShapeKind::Image(s) => Some(s),
            ShapeKind::Path(s) => Some(s),
            ShapeKind::Group(s) => Some(s),
            ShapeKind::Figure(s) => Some(s),
        }
    }
}

/// A shape in a layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub base: BaseShape,
    pub kind: ShapeKind,
}

impl Shape {
    pub fn new(base: BaseShape, kind: ShapeKind) -> Self {
        Self { base, kind }
    }

    pub fn id(&self) -> ShapeId {
        self.base.id
    }

    pub fn name(&self) -> &str {
        &self.base.name
    }

    /// Get the shape kind as a string
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            ShapeKind::Point(_) => "point",
            ShapeKind::Line(_) => "line",
            ShapeKind::Arc(_) => "arc",
            ShapeKind::CubicBezier(_) => "cubic bezier",
            ShapeKind::QuadraticBezier(_) => "quadratic bezier",
            ShapeKind::Rectangle(_) => "rectangle",
            ShapeKind::Ellipse(_) => "ellipse",
            ShapeKind::Text(_) => "text",
            ShapeKind::Image(_) => "image",
            ShapeKind::Path(_) => "path",
            ShapeKind::Group(_) => "group",
            ShapeKind::Figure(_) => "figure",
        }
    }

    pub fn is_visible(&self) -> bool {
        self.base.state.contains(ShapeState::VISIBLE)
    }

    pub fn is_locked(&self) -> bool {
        self.base.state.contains(ShapeState::LOCKED)
    }

    /// Nested shapes of a group or figure
    pub fn children(&self) -> &[Shape] {
        match &self.kind {
            ShapeKind::Group(g) => &g.shapes,
            ShapeKind::Figure(f) => &f.shapes,
            _ => &[],
        }
    }

    fn children_mut(&mut self) -> &mut [Shape] {
        match &mut self.kind {
            ShapeKind::Group(g) => &mut g.shapes,
            ShapeKind::Figure(f) => &mut f.shapes,
            _ => &mut [],
        }
    }

    /// Find this shape or a nested one by id
    pub fn find(&self, id: ShapeId) -> Option<&Shape> {
        if self.id() == id {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(id))
    }

    pub fn find_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        if self.id() == id {
            return Some(self);
        }
        self.children_mut()
            .iter_mut()
            .find_map(|child| child.find_mut(id))
    }

    /// Flag this shape and every nested shape that references `point` as dirty
    pub fn touch_point(&mut self, point: PointId) -> bool {
        if !self.contains_point(point) {
            return false;
        }
        self.base.mark_dirty();
        for child in self.children_mut() {
            child.touch_point(point);
        }
        true
    }

    /// Clear the dirty flag here and in nested shapes; true if any was set
    pub fn take_dirty(&mut self) -> bool {
        let mut dirty = self.base.is_dirty();
        self.base.clear_dirty();
        for child in self.children_mut() {
            dirty |= child.take_dirty();
        }
        dirty
    }

    /// Add this shape and all its points to the selection
    pub fn select(&self, selection: &mut Selection) {
        selection.shapes.insert(self.id());
        for p in self.points() {
            selection.points.insert(p);
        }
        for child in self.children() {
            child.select(selection);
        }
    }

    /// Remove this shape and all its points from the selection
    pub fn deselect(&self, selection: &mut Selection) {
        selection.shapes.remove(&self.id());
        for p in self.points() {
            selection.points.remove(&p);
        }
        for child in self.children() {
            child.deselect(selection);
        }
    }

    pub fn as_line(&self) -> Option<&LineShape> {
        match &self.kind {
            ShapeKind::Line(line) => Some(line),
            _ => None,
        }
    }

    pub fn as_line_mut(&mut self) -> Option<&mut LineShape> {
        match &mut self.kind {
            ShapeKind::Line(line) => Some(line),
            _ => None,
        }
    }

    /// Bounds of any box-derived shape
    pub fn as_box(&self) -> Option<&BoxShape> {
        match &self.kind {
            ShapeKind::Rectangle(b) | ShapeKind::Ellipse(b) => Some(b),
            ShapeKind::Text(t) => Some(&t.bounds),
            ShapeKind::Image(i) => Some(&i.bounds),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&PathShape> {
        match &self.kind {
            ShapeKind::Path(path) => Some(path),
            _ => None,
        }
    }

    pub fn as_path_mut(&mut self) -> Option<&mut PathShape> {
        match &mut self.kind {
            ShapeKind::Path(path) => Some(path),
            _ => None,
        }
    }

    pub fn as_group_mut(&mut self) -> Option<&mut GroupShape> {
        match &mut self.kind {
            ShapeKind::Group(group) => Some(group),
            _ => None,
        }
    }
}

impl HasPoints for Shape {
    fn points(&self) -> Box<dyn Iterator<Item = PointId> + '_> {
        self.kind.points()
    }

    fn point_refs_mut(&mut self) -> Vec<&mut PointId> {
        self.kind.point_refs_mut()
    }
}

impl Connectable for Shape {
    fn can_connect(&self, point: PointId) -> bool {
        self.kind
            .as_connectable()
            .is_some_and(|c| c.can_connect(point))
    }

    fn connect(&mut self, point: PointId, target: PointId) -> bool {
        let connected = self
            .kind
            .as_connectable_mut()
            .is_some_and(|c| c.connect(point, target));
        if connected {
            self.base.mark_dirty();
        }
        connected
    }

    fn disconnect(&mut self, point: PointId, store: &mut PointStore) -> Option<PointId> {
        let copy = self
            .kind
            .as_connectable_mut()
            .and_then(|c| c.disconnect(point, store));
        if copy.is_some() {
            self.base.mark_dirty();
        }
        copy
    }

    fn disconnect_all(&mut self, store: &mut PointStore) -> bool {
        let disconnected = self
            .kind
            .as_connectable_mut()
            .is_some_and(|c| c.disconnect_all(store));
        if disconnected {
            self.base.mark_dirty();
        }
        disconnected
    }
}

impl Movable for Shape {
    fn move_by(&mut self, store: &mut PointStore, moved: &mut HashSet<PointId>, dx: f64, dy: f64) {
        if self.is_locked() {
            return;
        }
        let owner = self.id();
        match &mut self.kind {
            ShapeKind::Group(group) => {
                for child in &mut group.shapes {
                    child.move_by(store, moved, dx, dy);
                }
                for &p in &group.connectors {
                    move_point(owner, store, moved, p, dx, dy);
                }
            }
            ShapeKind::Figure(figure) => {
                for child in &mut figure.shapes {
                    child.move_by(store, moved, dx, dy);
                }
            }
            kind => {
                let points: Vec<PointId> = kind.points().collect();
                for p in points {
                    move_point(owner, store, moved, p, dx, dy);
                }
            }
        }
        self.base.mark_dirty();
    }
}

fn move_point(
    owner: ShapeId,
    store: &mut PointStore,
    moved: &mut HashSet<PointId>,
    p: PointId,
    dx: f64,
    dy: f64,
) {
    if moved.contains(&p) {
        return;
    }
    let point = &store[p];
    if point.is_connector() && point.owner != Some(owner) {
        return;
    }
    store.translate(p, dx, dy);
    moved.insert(p);
}
