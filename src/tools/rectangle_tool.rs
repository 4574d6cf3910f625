use super::box_tool::{BoxState, BoxToolCore};
use super::{InputArgs, Tool, ToolStatus};
use crate::editor::Editor;
use crate::error::ToolResult;
use crate::shape::{factory, ShapeId};

#[derive(Debug, Default)]
pub struct RectangleTool {
    core: BoxToolCore,
}

impl RectangleTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> BoxState {
        self.core.state()
    }

    pub fn shape(&self) -> Option<ShapeId> {
        self.core.shape()
    }
}

impl Tool for RectangleTool {
    fn name(&self) -> &'static str {
        "Rectangle"
    }

    fn current_state_name(&self) -> &'static str {
        self.core.state().name()
    }

    fn status(&self) -> ToolStatus {
        self.core.status()
    }

    fn left_down(&mut self, editor: &mut dyn Editor, args: InputArgs) -> ToolResult {
        let (x, y) = editor.try_to_snap(&args);
        Ok(self
            .core
            .left_down(editor, "Rectangle", x, y, false, factory::create_rectangle))
    }

    fn right_down(&mut self, editor: &mut dyn Editor, _args: InputArgs) -> ToolResult {
        self.core.reset(editor);
        Ok(ToolStatus::Idle)
    }

    fn pointer_move(&mut self, editor: &mut dyn Editor, args: InputArgs) -> ToolResult {
        let (x, y) = editor.try_to_snap(&args);
        Ok(self.core.pointer_move(editor, x, y))
    }

    fn reset(&mut self, editor: &mut dyn Editor) {
        self.core.reset(editor);
    }
}
