use super::{InputArgs, Tool, ToolStatus};
use crate::editor::Editor;
use crate::error::ToolResult;

/// Ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoneTool;

impl Tool for NoneTool {
    fn name(&self) -> &'static str {
        "None"
    }

    fn current_state_name(&self) -> &'static str {
        "None"
    }

    fn status(&self) -> ToolStatus {
        ToolStatus::Idle
    }

    fn left_down(&mut self, _editor: &mut dyn Editor, _args: InputArgs) -> ToolResult {
        Ok(ToolStatus::Idle)
    }

    fn right_down(&mut self, _editor: &mut dyn Editor, _args: InputArgs) -> ToolResult {
        Ok(ToolStatus::Idle)
    }

    fn pointer_move(&mut self, _editor: &mut dyn Editor, _args: InputArgs) -> ToolResult {
        Ok(ToolStatus::Idle)
    }

    fn reset(&mut self, _editor: &mut dyn Editor) {}
}
