use log::debug;

use super::adorners::ToolLineSelection;
use super::helpers;
use super::{InputArgs, Tool, ToolStatus};
use crate::editor::Editor;
use crate::error::ToolResult;
use crate::geometry::PointId;
use crate::layer::LayerKind;
use crate::shape::{factory, ShapeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineState {
    #[default]
    Start,
    End,
}

#[derive(Debug)]
struct LineDraft {
    shape: ShapeId,
    end: PointId,
    adorner: ToolLineSelection,
}

/// Two clicks: start point, then end point
#[derive(Debug, Default)]
pub struct LineTool {
    state: LineState,
    draft: Option<LineDraft>,
}

impl LineTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LineState {
        self.state
    }

    /// The line being drawn, if any
    pub fn shape(&self) -> Option<ShapeId> {
        self.draft.as_ref().map(|d| d.shape)
    }

    fn finish(&mut self, editor: &mut dyn Editor, x: f64, y: f64) -> ToolStatus {
        self.state = LineState::Start;
        let Some(mut draft) = self.draft.take() else {
            return helpers::missing_shape(self.name(), None);
        };
        draft.adorner.reset(editor);
        if !helpers::working_contains(editor, draft.shape) {
            return helpers::missing_shape(self.name(), Some(draft.shape));
        }

        helpers::set_position(editor, draft.end, x, y);
        helpers::connect_at(editor, draft.shape, draft.end, x, y);
        helpers::commit(editor, draft.shape)
    }
}

impl Tool for LineTool {
    fn name(&self) -> &'static str {
        "Line"
    }

    fn current_state_name(&self) -> &'static str {
        match self.state {
            LineState::Start => "Start",
            LineState::End => "End",
        }
    }

    fn status(&self) -> ToolStatus {
        match self.state {
            LineState::Start => ToolStatus::Idle,
            LineState::End => ToolStatus::Cancelable,
        }
    }

    fn left_down(&mut self, editor: &mut dyn Editor, args: InputArgs) -> ToolResult {
        let (x, y) = editor.try_to_snap(&args);
        match self.state {
            LineState::Start => {
                let start = helpers::point_at(editor, x, y);
                let end = helpers::new_point(editor, x, y);
                let line = factory::create_line(editor.options(), start, end);
                let shape = line.id();
                helpers::add_working(editor, line);
                let adorner = ToolLineSelection::new(editor, start, end);

                debug!("line {shape} started at ({x}, {y})");
                self.draft = Some(LineDraft {
                    shape,
                    end,
                    adorner,
                });
                self.state = LineState::End;
                Ok(ToolStatus::Cancelable)
            }
            LineState::End => Ok(self.finish(editor, x, y)),
        }
    }

    fn right_down(&mut self, editor: &mut dyn Editor, _args: InputArgs) -> ToolResult {
        self.reset(editor);
        Ok(ToolStatus::Idle)
    }

    fn pointer_move(&mut self, editor: &mut dyn Editor, args: InputArgs) -> ToolResult {
        let (x, y) = editor.try_to_snap(&args);
        match (&self.state, &self.draft) {
            (LineState::End, Some(draft)) => {
                helpers::hover(editor, x, y);
                helpers::set_position(editor, draft.end, x, y);
                draft.adorner.sync(editor);
                helpers::invalidate_working(editor);
            }
            _ => helpers::hover(editor, x, y),
        }
        Ok(self.status())
    }

    fn reset(&mut self, editor: &mut dyn Editor) {
        if let Some(mut draft) = self.draft.take() {
            draft.adorner.reset(editor);
            helpers::discard_working(editor, draft.shape);
        }
        editor.dehover(LayerKind::Current);
        self.state = LineState::Start;
    }
}
