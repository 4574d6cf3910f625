use super::box_tool::{BoxState, BoxToolCore};
use super::{InputArgs, Tool, ToolStatus};
use crate::config::EllipseMode;
use crate::editor::Editor;
use crate::error::ToolResult;
use crate::shape::{factory, ShapeId};

/// Two clicks spanning the bounding box, or center then radius in circle mode
#[derive(Debug, Default)]
pub struct EllipseTool {
    core: BoxToolCore,
}

impl EllipseTool {
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

impl Tool for EllipseTool {
    fn name(&self) -> &'static str {
        "Ellipse"
    }

    fn current_state_name(&self) -> &'static str {
        self.core.state().name()
    }

    fn status(&self) -> ToolStatus {
        self.core.status()
    }

    fn left_down(&mut self, editor: &mut dyn Editor, args: InputArgs) -> ToolResult {
        let (x, y) = editor.try_to_snap(&args);
        // The mode is read when the shape starts and kept until it is finished
        let circle = editor.options().ellipse_mode == EllipseMode::Circle;
        Ok(self
            .core
            .left_down(editor, "Ellipse", x, y, circle, factory::create_ellipse))
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
