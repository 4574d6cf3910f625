use super::box_tool::{BoxState, BoxToolCore};
use super::{InputArgs, Tool, ToolStatus};
use crate::editor::Editor;
use crate::error::ToolResult;
use crate::shape::{factory, ShapeId};

/// Two-click text box filled with the default text
#[derive(Debug, Default)]
pub struct TextTool {
    core: BoxToolCore,
}

impl TextTool {
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

impl Tool for TextTool {
    fn name(&self) -> &'static str {
        "Text"
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
            .left_down(editor, "Text", x, y, false, |options, top_left, bottom_right| {
                factory::create_text(options, top_left, bottom_right, &options.default_text)
            }))
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
