use log::debug;

use super::adorners::ToolQuadraticBezierSelection;
use super::helpers;
use super::{InputArgs, Tool, ToolStatus};
use crate::editor::Editor;
use crate::error::ToolResult;
use crate::geometry::PointId;
use crate::layer::LayerKind;
use crate::shape::{factory, ShapeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuadraticBezierState {
    #[default]
    Point1,
    Point3,
    Point2,
}

#[derive(Debug)]
struct QuadDraft {
    shape: ShapeId,
    point2: PointId,
    point3: PointId,
    adorner: ToolQuadraticBezierSelection,
}

/// Three clicks: start, end, control point
#[derive(Debug, Default)]
pub struct QuadraticBezierTool {
    state: QuadraticBezierState,
    draft: Option<QuadDraft>,
}

impl QuadraticBezierTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> QuadraticBezierState {
        self.state
    }

    pub fn shape(&self) -> Option<ShapeId> {
        self.draft.as_ref().map(|d| d.shape)
    }

    fn begin(&mut self, editor: &mut dyn Editor, x: f64, y: f64) -> ToolStatus {
        let point1 = helpers::point_at(editor, x, y);
        let point2 = helpers::new_point(editor, x, y);
        let point3 = helpers::new_point(editor, x, y);
        let curve = factory::create_quadratic_bezier(editor.options(), point1, point2, point3);
        let shape = curve.id();
        helpers::add_working(editor, curve);
        let adorner = ToolQuadraticBezierSelection::new(editor, point1, point2, point3);

        debug!("quadratic bezier {shape} started at ({x}, {y})");
        self.draft = Some(QuadDraft {
            shape,
            point2,
            point3,
            adorner,
        });
        self.state = QuadraticBezierState::Point3;
        ToolStatus::Cancelable
    }

    fn free_point(&self) -> Option<PointId> {
        let draft = self.draft.as_ref()?;
        match self.state {
            QuadraticBezierState::Point1 => None,
            QuadraticBezierState::Point3 => Some(draft.point3),
            QuadraticBezierState::Point2 => Some(draft.point2),
        }
    }
}

impl Tool for QuadraticBezierTool {
    fn name(&self) -> &'static str {
        "QuadraticBezier"
    }

    fn current_state_name(&self) -> &'static str {
        match self.state {
            QuadraticBezierState::Point1 => "Point1",
            QuadraticBezierState::Point3 => "Point3",
            QuadraticBezierState::Point2 => "Point2",
        }
    }

    fn status(&self) -> ToolStatus {
        match self.state {
            QuadraticBezierState::Point1 => ToolStatus::Idle,
            _ => ToolStatus::Cancelable,
        }
    }

    fn left_down(&mut self, editor: &mut dyn Editor, args: InputArgs) -> ToolResult {
        let (x, y) = editor.try_to_snap(&args);
        if self.state == QuadraticBezierState::Point1 {
            return Ok(self.begin(editor, x, y));
        }

        let shape = self.shape();
        let (Some(id), Some(free)) = (shape, self.free_point()) else {
            self.reset(editor);
            return Ok(helpers::missing_shape(self.name(), shape));
        };
        if !helpers::working_contains(editor, id) {
            self.reset(editor);
            return Ok(helpers::missing_shape(self.name(), Some(id)));
        }
        helpers::set_position(editor, free, x, y);

        if self.state == QuadraticBezierState::Point3 {
            helpers::connect_at(editor, id, free, x, y);
            self.state = QuadraticBezierState::Point2;
            if let Some(draft) = &self.draft {
                draft.adorner.sync(editor);
            }
            helpers::invalidate_working(editor);
            return Ok(ToolStatus::Cancelable);
        }

        if let Some(mut draft) = self.draft.take() {
            draft.adorner.reset(editor);
        }
        self.state = QuadraticBezierState::Point1;
        Ok(helpers::commit(editor, id))
    }

    fn right_down(&mut self, editor: &mut dyn Editor, _args: InputArgs) -> ToolResult {
        self.reset(editor);
        Ok(ToolStatus::Idle)
    }

    fn pointer_move(&mut self, editor: &mut dyn Editor, args: InputArgs) -> ToolResult {
        let (x, y) = editor.try_to_snap(&args);
        helpers::hover(editor, x, y);
        if let (Some(free), Some(draft)) = (self.free_point(), &self.draft) {
            helpers::set_position(editor, free, x, y);
            draft.adorner.sync(editor);
            helpers::invalidate_working(editor);
        }
        Ok(self.status())
    }

    fn reset(&mut self, editor: &mut dyn Editor) {
        if let Some(mut draft) = self.draft.take() {
            draft.adorner.reset(editor);
            helpers::discard_working(editor, draft.shape);
        }
        editor.dehover(LayerKind::Current);
        self.state = QuadraticBezierState::Point1;
    }
}
