//! Helper-layer decorations that follow a shape while it is being drawn.
//!
//! Each adorner owns private helper points that mirror the positions of the
//! shape's points. `sync` copies the positions over; `reset` removes the
//! decorations from the helper layer.

use crate::editor::Editor;
use crate::geometry::PointId;
use crate::layer::LayerKind;
use crate::shape::{factory, Shape, ShapeId};
use crate::style::ShapeStyle;

mod arc;
mod bezier;
mod box_selection;
mod line;

pub use arc::ToolArcSelection;
pub use bezier::{ToolCubicBezierSelection, ToolQuadraticBezierSelection};
pub use box_selection::ToolBoxSelection;
pub use line::ToolLineSelection;

/// Helper points tracking source points, plus the helper shapes drawn with them
#[derive(Debug, Default)]
struct Decorations {
    /// (source point, helper point)
    tracked: Vec<(PointId, PointId)>,
    shapes: Vec<ShapeId>,
}

impl Decorations {
    /// A helper point mirroring `source`, without a marker
    fn mirror(&mut self, editor: &mut dyn Editor, source: PointId) -> PointId {
        let points = &mut editor.project_mut().points;
        let position = points.position(source);
        let helper = points.create(position.x, position.y);
        self.tracked.push((source, helper));
        helper
    }

    /// A helper point mirroring `source`, drawn as a handle
    fn handle(&mut self, editor: &mut dyn Editor, source: PointId) -> PointId {
        let helper = self.mirror(editor, source);
        self.add(editor, factory::create_point_shape(helper));
        helper
    }

    /// A thin guide line between two helper points
    fn guide_line(&mut self, editor: &mut dyn Editor, start: PointId, end: PointId) {
        let line = factory::create_line(editor.options(), start, end);
        self.add(editor, line);
    }

    fn add(&mut self, editor: &mut dyn Editor, mut shape: Shape) {
        shape.base.style = ShapeStyle::helper();
        self.shapes.push(shape.id());
        editor
            .project_mut()
            .container
            .layer_mut(LayerKind::Helper)
            .add_shape(shape);
    }

    fn sync(&self, editor: &mut dyn Editor) {
        let project = editor.project_mut();
        for &(source, helper) in &self.tracked {
            let position = project.points.position(source);
            project.points.set_position(helper, position.x, position.y);
        }
        project.invalidate(LayerKind::Helper);
    }

    fn clear(&mut self, editor: &mut dyn Editor) {
        let project = editor.project_mut();
        let layer = project.container.layer_mut(LayerKind::Helper);
        for id in self.shapes.drain(..) {
            layer.remove_shape(id);
        }
        self.tracked.clear();
        project.invalidate(LayerKind::Helper);
    }
}
