use log::{debug, error};

use super::{Editor, ProjectEditor};
use crate::error::ToolResult;
use crate::tools::{new_tool, InputArgs, Tool, ToolStatus, ToolType};

/// An editor plus the single active tool
///
/// Every pointer event goes through here. A tool error is logged, the tool is
/// reset and the event reports [`ToolStatus::Idle`], so a broken invariant
/// never leaves a half-drawn shape behind.
#[derive(Debug)]
pub struct EditorSession<E: Editor = ProjectEditor> {
    pub editor: E,
    tool: ToolType,
    is_tool_idle: bool,
    cancel_available: bool,
}

impl<E: Editor> EditorSession<E> {
    pub fn new(editor: E) -> Self {
        Self {
            editor,
            tool: ToolType::default(),
            is_tool_idle: true,
            cancel_available: false,
        }
    }

    pub fn tool(&self) -> &ToolType {
        &self.tool
    }

    pub fn tool_mut(&mut self) -> &mut ToolType {
        &mut self.tool
    }

    /// Switch to the named tool, discarding anything the old tool had in progress
    pub fn set_tool(&mut self, name: &str) -> bool {
        let Some(tool) = new_tool(name) else {
            return false;
        };
        self.tool.reset(&mut self.editor);
        debug!("switch tool {} -> {}", self.tool.name(), name);
        self.tool = tool;
        self.update_flags(&ToolStatus::Idle);
        true
    }

    pub fn is_tool_idle(&self) -> bool {
        self.is_tool_idle
    }

    pub fn cancel_available(&self) -> bool {
        self.cancel_available
    }

    pub fn left_down(&mut self, x: f64, y: f64) -> ToolStatus {
        self.dispatch(InputArgs::new(x, y), |tool, editor, args| tool.left_down(editor, args))
    }

    pub fn left_up(&mut self, x: f64, y: f64) -> ToolStatus {
        self.dispatch(InputArgs::new(x, y), |tool, editor, args| tool.left_up(editor, args))
    }

    pub fn right_down(&mut self, x: f64, y: f64) -> ToolStatus {
        self.dispatch(InputArgs::new(x, y), |tool, editor, args| tool.right_down(editor, args))
    }

    pub fn right_up(&mut self, x: f64, y: f64) -> ToolStatus {
        self.dispatch(InputArgs::new(x, y), |tool, editor, args| tool.right_up(editor, args))
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> ToolStatus {
        self.dispatch(InputArgs::new(x, y), |tool, editor, args| tool.pointer_move(editor, args))
    }

    /// Dispatch an event that carries keyboard modifiers
    pub fn handle(
        &mut self,
        args: InputArgs,
        event: impl FnOnce(&mut ToolType, &mut dyn Editor, InputArgs) -> ToolResult,
    ) -> ToolStatus {
        self.dispatch(args, event)
    }

    /// Resume a suspended transition, such as a resolved image pick
    pub fn poll(&mut self) -> ToolStatus {
        self.dispatch(InputArgs::default(), |tool, editor, _| tool.poll(editor))
    }

    /// Abandon whatever the active tool has in progress
    pub fn cancel(&mut self) {
        self.tool.reset(&mut self.editor);
        self.update_flags(&ToolStatus::Idle);
    }

    fn dispatch(
        &mut self,
        args: InputArgs,
        event: impl FnOnce(&mut ToolType, &mut dyn Editor, InputArgs) -> ToolResult,
    ) -> ToolStatus {
        let status = match event(&mut self.tool, &mut self.editor, args) {
            Ok(status) => status,
            Err(err) => {
                error!(
                    "{} tool failed in state {}: {err}",
                    self.tool.name(),
                    self.tool.current_state_name()
                );
                self.tool.reset(&mut self.editor);
                ToolStatus::Idle
            }
        };
        self.update_flags(&status);
        status
    }

    fn update_flags(&mut self, status: &ToolStatus) {
        self.is_tool_idle = status.is_idle();
        self.cancel_available = status.cancel_available();
    }
}
