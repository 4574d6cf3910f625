//! Steps shared by the drawing tools.

use log::{info, warn};

use super::ToolStatus;
use crate::editor::Editor;
use crate::geometry::PointId;
use crate::layer::LayerKind;
use crate::shape::{Connectable, Shape, ShapeId};

/// Reuse a point of the current layer under (x, y), or create one there
pub(crate) fn point_at(editor: &mut dyn Editor, x: f64, y: f64) -> PointId {
    if editor.options().try_to_connect {
        if let Some(point) = editor.try_to_get_connection_point(x, y) {
            return point;
        }
    }
    editor.project_mut().points.create(x, y)
}

/// A fresh point at (x, y) that nothing else references
pub(crate) fn new_point(editor: &mut dyn Editor, x: f64, y: f64) -> PointId {
    editor.project_mut().points.create(x, y)
}

/// Swap `target` for an existing point under (x, y), if there is one
pub(crate) fn connect_at(
    editor: &mut dyn Editor,
    shape: ShapeId,
    target: PointId,
    x: f64,
    y: f64,
) -> bool {
    if !editor.options().try_to_connect {
        return false;
    }
    let Some(point) = editor.try_to_get_connection_point(x, y) else {
        return false;
    };
    if point == target {
        return false;
    }
    editor
        .project_mut()
        .find_shape_mut(shape)
        .is_some_and(|s| s.connect(point, target))
}

pub(crate) fn set_position(editor: &mut dyn Editor, point: PointId, x: f64, y: f64) {
    editor.project_mut().points.set_position(point, x, y);
}

/// Highlight the shape the next click would connect to
pub(crate) fn hover(editor: &mut dyn Editor, x: f64, y: f64) {
    if editor.options().try_to_connect {
        editor.try_to_hover_shape(x, y);
    }
}

pub(crate) fn add_working(editor: &mut dyn Editor, shape: Shape) {
    editor.project_mut().add_shape(LayerKind::Working, shape);
}

pub(crate) fn working_contains(editor: &dyn Editor, id: ShapeId) -> bool {
    editor
        .project()
        .container
        .layer(LayerKind::Working)
        .contains(id)
}

pub(crate) fn invalidate_working(editor: &mut dyn Editor) {
    editor.project_mut().invalidate(LayerKind::Working);
}

/// Drop an in-progress shape without committing it
pub(crate) fn discard_working(editor: &mut dyn Editor, id: ShapeId) {
    if editor
        .project_mut()
        .remove_shape(LayerKind::Working, id)
        .is_some()
    {
        info!("discard shape {id}");
    }
}

/// Move a finished shape into the current layer
pub(crate) fn commit(editor: &mut dyn Editor, id: ShapeId) -> ToolStatus {
    editor.dehover(LayerKind::Current);
    if !editor.project_mut().commit_working_shape(id) {
        warn!("shape {id} left the working layer before commit, nothing committed");
    }
    ToolStatus::Idle
}

/// Log and swallow a terminal click that finds no shape to finish
pub(crate) fn missing_shape(tool: &str, id: Option<ShapeId>) -> ToolStatus {
    match id {
        Some(id) => warn!("{tool} tool: shape {id} is no longer in the working layer"),
        None => warn!("{tool} tool: no shape in progress"),
    }
    ToolStatus::Idle
}
