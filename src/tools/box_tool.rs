//! Two-click bounding-box drawing shared by the rectangle, ellipse, text and
//! image tools.

use log::debug;

use super::adorners::ToolBoxSelection;
use super::helpers;
use super::ToolStatus;
use crate::config::EditorOptions;
use crate::editor::Editor;
use crate::geometry::PointId;
use crate::layer::LayerKind;
use crate::shape::{Shape, ShapeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoxState {
    #[default]
    TopLeft,
    BottomRight,
}

impl BoxState {
    pub fn name(&self) -> &'static str {
        match self {
            BoxState::TopLeft => "TopLeft",
            BoxState::BottomRight => "BottomRight",
        }
    }
}

/// Square bounds centered on (cx, cy) reaching the cursor along its dominant axis
///
/// Returns the top-left and bottom-right corners.
pub fn circle_bounds(cx: f64, cy: f64, px: f64, py: f64) -> ((f64, f64), (f64, f64)) {
    let radius = (cx - px).abs().max((cy - py).abs());
    ((cx - radius, cy - radius), (cx + radius, cy + radius))
}

#[derive(Debug)]
struct BoxDraft {
    shape: ShapeId,
    top_left: PointId,
    bottom_right: PointId,
    /// Fixed center when the box is kept square around the first click
    center: Option<(f64, f64)>,
    adorner: ToolBoxSelection,
}

impl BoxDraft {
    fn update(&self, editor: &mut dyn Editor, x: f64, y: f64) {
        match self.center {
            Some((cx, cy)) => {
                let ((x0, y0), (x1, y1)) = circle_bounds(cx, cy, x, y);
                helpers::set_position(editor, self.top_left, x0, y0);
                helpers::set_position(editor, self.bottom_right, x1, y1);
            }
            None => helpers::set_position(editor, self.bottom_right, x, y),
        }
        self.adorner.sync(editor);
        helpers::invalidate_working(editor);
    }
}

/// State and in-progress shape of a box tool
#[derive(Debug, Default)]
pub(crate) struct BoxToolCore {
    state: BoxState,
    draft: Option<BoxDraft>,
}

impl BoxToolCore {
    pub fn state(&self) -> BoxState {
        self.state
    }

    pub fn shape(&self) -> Option<ShapeId> {
        self.draft.as_ref().map(|d| d.shape)
    }

    pub fn status(&self) -> ToolStatus {
        match self.state {
            BoxState::TopLeft => ToolStatus::Idle,
            BoxState::BottomRight => ToolStatus::Cancelable,
        }
    }

    /// Anchor a zero-size shape at (x, y)
    ///
    /// With `circle` set, (x, y) is the center and both corners follow the cursor.
    pub fn begin(
        &mut self,
        editor: &mut dyn Editor,
        x: f64,
        y: f64,
        circle: bool,
        create: impl FnOnce(&EditorOptions, PointId, PointId) -> Shape,
    ) -> ToolStatus {
        let top_left = if circle {
            helpers::new_point(editor, x, y)
        } else {
            helpers::point_at(editor, x, y)
        };
        let bottom_right = helpers::new_point(editor, x, y);
        let shape = create(editor.options(), top_left, bottom_right);
        let id = shape.id();
        debug!("{} {id} started at ({x}, {y})", shape.kind_name());
        helpers::add_working(editor, shape);
        let adorner = ToolBoxSelection::new(editor, top_left, bottom_right);

        self.draft = Some(BoxDraft {
            shape: id,
            top_left,
            bottom_right,
            center: circle.then_some((x, y)),
            adorner,
        });
        self.state = BoxState::BottomRight;
        ToolStatus::Cancelable
    }

    /// Fix the free corner at (x, y) and commit
    pub fn finish(&mut self, editor: &mut dyn Editor, name: &str, x: f64, y: f64) -> ToolStatus {
        self.state = BoxState::TopLeft;
        let Some(mut draft) = self.draft.take() else {
            return helpers::missing_shape(name, None);
        };
        draft.adorner.reset(editor);
        if !helpers::working_contains(editor, draft.shape) {
            return helpers::missing_shape(name, Some(draft.shape));
        }

        draft.update(editor, x, y);
        if draft.center.is_none() {
            helpers::connect_at(editor, draft.shape, draft.bottom_right, x, y);
        }
        helpers::commit(editor, draft.shape)
    }

    pub fn left_down(
        &mut self,
        editor: &mut dyn Editor,
        name: &str,
        x: f64,
        y: f64,
        circle: bool,
        create: impl FnOnce(&EditorOptions, PointId, PointId) -> Shape,
    ) -> ToolStatus {
        match self.state {
            BoxState::TopLeft => self.begin(editor, x, y, circle, create),
            BoxState::BottomRight => self.finish(editor, name, x, y),
        }
    }

    pub fn pointer_move(&mut self, editor: &mut dyn Editor, x: f64, y: f64) -> ToolStatus {
        match (&self.state, &self.draft) {
            (BoxState::BottomRight, Some(draft)) => {
                helpers::hover(editor, x, y);
                draft.update(editor, x, y);
            }
            _ => helpers::hover(editor, x, y),
        }
        self.status()
    }

    pub fn reset(&mut self, editor: &mut dyn Editor) {
        if let Some(mut draft) = self.draft.take() {
            draft.adorner.reset(editor);
            helpers::discard_working(editor, draft.shape);
        }
        editor.dehover(LayerKind::Current);
        self.state = BoxState::TopLeft;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_bounds_use_dominant_axis() {
        assert_eq!(
            circle_bounds(100.0, 100.0, 130.0, 115.0),
            ((70.0, 70.0), (130.0, 130.0))
        );
        assert_eq!(
            circle_bounds(100.0, 100.0, 85.0, 70.0),
            ((70.0, 70.0), (130.0, 130.0))
        );
    }
}
