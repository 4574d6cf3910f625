use log::debug;

use super::adorners::ToolArcSelection;
use super::helpers;
use super::{InputArgs, Tool, ToolStatus};
use crate::editor::Editor;
use crate::error::ToolResult;
use crate::geometry::PointId;
use crate::layer::LayerKind;
use crate::shape::{factory, ShapeId};

/// Which arc point the next click fixes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArcState {
    #[default]
    Point1,
    Point2,
    Point3,
    Point4,
}

#[derive(Debug)]
struct ArcDraft {
    shape: ShapeId,
    point2: PointId,
    point3: PointId,
    point4: PointId,
    adorner: ToolArcSelection,
}

/// Four clicks: two bounding-box corners, then the start and end rays
#[derive(Debug, Default)]
pub struct ArcTool {
    state: ArcState,
    draft: Option<ArcDraft>,
}

impl ArcTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ArcState {
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
        let arc = factory::create_arc(editor.options(), point1, point2, point3, point4);
        let shape = arc.id();
        helpers::add_working(editor, arc);
        let adorner = ToolArcSelection::new(editor, point1, point2, point3, point4);

        debug!("arc {shape} started at ({x}, {y})");
        self.draft = Some(ArcDraft {
            shape,
            point2,
            point3,
            point4,
            adorner,
        });
        self.state = ArcState::Point2;
        ToolStatus::Cancelable
    }

    /// The point that currently follows the cursor
    fn free_point(&self) -> Option<PointId> {
        let draft = self.draft.as_ref()?;
        match self.state {
            ArcState::Point1 => None,
            ArcState::Point2 => Some(draft.point2),
            ArcState::Point3 => Some(draft.point3),
            ArcState::Point4 => Some(draft.point4),
        }
    }
}

impl Tool for ArcTool {
    fn name(&self) -> &'static str {
        "Arc"
    }

    fn current_state_name(&self) -> &'static str {
        match self.state {
            ArcState::Point1 => "Point1",
            ArcState::Point2 => "Point2",
            ArcState::Point3 => "Point3",
            ArcState::Point4 => "Point4",
        }
    }

    fn status(&self) -> ToolStatus {
        match self.state {
            ArcState::Point1 => ToolStatus::Idle,
            _ => ToolStatus::Cancelable,
        }
    }

    fn left_down(&mut self, editor: &mut dyn Editor, args: InputArgs) -> ToolResult {
        let (x, y) = editor.try_to_snap(&args);
        if self.state == ArcState::Point1 {
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
            ArcState::Point2 => {
                helpers::connect_at(editor, id, free, x, y);
                self.state = ArcState::Point3;
            }
            ArcState::Point3 => {
                // The end ray starts where the start ray was fixed
                if let Some(draft) = &self.draft {
                    helpers::set_position(editor, draft.point4, x, y);
                }
                self.state = ArcState::Point4;
            }
            ArcState::Point1 | ArcState::Point4 => {
                if let Some(mut draft) = self.draft.take() {
                    draft.adorner.reset(editor);
                }
                self.state = ArcState::Point1;
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
        self.state = ArcState::Point1;
    }
}
