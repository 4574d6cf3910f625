use log::debug;

use super::adorners::ToolCubicBezierSelection;
use super::helpers;
use super::{InputArgs, Tool, ToolStatus};
use crate::editor::Editor;
use crate::error::ToolResult;
use crate::geometry::PointId;
use crate::layer::LayerKind;
use crate::shape::{factory, ShapeId};

/// Which curve point the next click fixes: end points first, then controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CubicBezierState {
    #[default]
    Point1,
    Point4,
    Point2,
    Point3,
}

#[derive(Debug)]
struct CubicDraft {
    shape: ShapeId,
    point2: PointId,
    point3: PointId,
    point4: PointId,
    adorner: ToolCubicBezierSelection,
}

/// Four clicks: start, end, first control, second control
#[derive(Debug, Default)]
pub struct CubicBezierTool {
    state: CubicBezierState,
    draft: Option<CubicDraft>,
}

impl CubicBezierTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CubicBezierState {
        self.state
    }

    pub fn shape(&self) -> Option<ShapeId> {
        self.draft.as_ref().map(|d| d.shape)
    }

    fn begin(&mut self, editor: &mut dyn Editor, x: f64, y: f64) -> ToolStatus {
        let point1 = helpers::point_at(editor, x, y);
        let point2 = helpers::new_point(editor, x, y);
        let point3 = helpers::new_point(editor, x, y);
        let point4 = helpers::new_point(editor, x, y);
        let curve = factory::create_cubic_bezier(editor.options(), point1, point2, point3, point4);
        let shape = curve.id();
        helpers::add_working(editor, curve);
        let adorner = ToolCubicBezierSelection::new(editor, point1, point2, point3, point4);

        debug!("cubic bezier {shape} started at ({x}, {y})");
        self.draft = Some(CubicDraft {
            shape,
            point2,
            point3,
            point4,
            adorner,
        });
        self.state = CubicBezierState::Point4;
        ToolStatus::Cancelable
    }

    fn free_point(&self) -> Option<PointId> {
        let draft = self.draft.as_ref()?;
        match self.state {
            CubicBezierState::Point1 => None,
            CubicBezierState::Point4 => Some(draft.point4),
            CubicBezierState::Point2 => Some(draft.point2),
            CubicBezierState::Point3 => Some(draft.point3),
        }
    }
}

impl Tool for CubicBezierTool {
    fn name(&self) -> &'static str {
        "CubicBezier"
    }

    fn current_state_name(&self) -> &'static str {
        match self.state {
            CubicBezierState::Point1 => "Point1",
            CubicBezierState::Point4 => "Point4",
            CubicBezierState::Point2 => "Point2",
            CubicBezierState::Point3 => "Point3",
        }
    }

    fn status(&self) -> ToolStatus {
        match self.state {
            CubicBezierState::Point1 => ToolStatus::Idle,
            _ => ToolStatus::Cancelable,
        }
    }

    fn left_down(&mut self, editor: &mut dyn Editor, args: InputArgs) -> ToolResult {
        let (x, y) = editor.try_to_snap(&args);
        if self.state == CubicBezierState::Point1 {
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

        match self.state {
            CubicBezierState::Point4 => {
                helpers::connect_at(editor, id, free, x, y);
                self.state = CubicBezierState::Point2;
            }
            CubicBezierState::Point2 => self.state = CubicBezierState::Point3,
            CubicBezierState::Point1 | CubicBezierState::Point3 => {
                if let Some(mut draft) = self.draft.take() {
                    draft.adorner.reset(editor);
                }
                self.state = CubicBezierState::Point1;
                return Ok(helpers::commit(editor, id));
            }
        }
        if let Some(draft) = &self.draft {
            draft.adorner.sync(editor);
        }
        helpers::invalidate_working(editor);
        Ok(ToolStatus::Cancelable)
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
        self.state = CubicBezierState::Point1;
    }
}
