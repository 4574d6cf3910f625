use bitflags::bitflags;
use futures::channel::oneshot;

use crate::editor::Editor;
use crate::error::ToolResult;

pub mod adorners;
mod arc_tool;
mod box_tool;
mod cubic_bezier_tool;
mod ellipse_tool;
mod helpers;
mod image_tool;
mod line_tool;
mod none_tool;
pub mod path;
mod point_tool;
mod quadratic_bezier_tool;
mod rectangle_tool;
mod selection_tool;
mod text_tool;

pub use arc_tool::{ArcState, ArcTool};
pub use cubic_bezier_tool::{CubicBezierState, CubicBezierTool};
pub use box_tool::{circle_bounds, BoxState};
pub use ellipse_tool::EllipseTool;
pub use image_tool::ImageTool;
pub use line_tool::{LineState, LineTool};
pub use none_tool::NoneTool;
pub use path::{PathSubTool, PathTool};
pub use point_tool::PointTool;
pub use quadratic_bezier_tool::{QuadraticBezierState, QuadraticBezierTool};
pub use rectangle_tool::RectangleTool;
pub use selection_tool::{SelectionState, SelectionTool};
pub use text_tool::TextTool;

bitflags! {
    /// Keyboard modifiers held during a pointer event
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ModifierFlags: u8 {
        const SHIFT = 1;
        const CONTROL = 1 << 1;
        const ALT = 1 << 2;
    }
}

/// A pointer event in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputArgs {
    pub x: f64,
    pub y: f64,
    pub modifier: ModifierFlags,
}

impl InputArgs {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            modifier: ModifierFlags::empty(),
        }
    }

    pub fn with_modifier(mut self, modifier: ModifierFlags) -> Self {
        self.modifier = modifier;
        self
    }
}

/// Suspended image pick: resolve it with an image key, or drop it to cancel
#[derive(Debug)]
pub struct ImagePick {
    sender: oneshot::Sender<String>,
}

impl ImagePick {
    pub(crate) fn new(sender: oneshot::Sender<String>) -> Self {
        Self { sender }
    }

    /// Hand the picked image key back to the waiting tool
    ///
    /// Returns false when the tool stopped waiting in the meantime.
    pub fn resolve(self, key: impl Into<String>) -> bool {
        self.sender.send(key.into()).is_ok()
    }

    /// Abandon the pick; the tool stays in its initial state
    pub fn cancel(self) {}
}

/// What the host should know about the active tool after a transition
#[derive(Debug)]
pub enum ToolStatus {
    /// Nothing in progress
    Idle,
    /// A gesture is in progress and cannot be cancelled
    Busy,
    /// A shape is in progress; a right click discards it
    Cancelable,
    /// The tool waits for an image key before continuing
    Pending(ImagePick),
}

impl ToolStatus {
    pub fn is_idle(&self) -> bool {
        matches!(self, ToolStatus::Idle)
    }

    pub fn cancel_available(&self) -> bool {
        matches!(self, ToolStatus::Cancelable | ToolStatus::Pending(_))
    }
}

/// Tool trait defines the interface for all drawing tools
///
/// Every transition returns the tool's status afterwards. Errors are reserved
/// for broken invariants; the host resets the tool when one is returned.
pub trait Tool {
    /// Return the name of the tool
    fn name(&self) -> &'static str;

    /// Name of the current state, for diagnostics
    fn current_state_name(&self) -> &'static str;

    /// Status of the tool between events
    fn status(&self) -> ToolStatus;

    fn left_down(&mut self, editor: &mut dyn Editor, args: InputArgs) -> ToolResult;

    fn left_up(&mut self, _editor: &mut dyn Editor, _args: InputArgs) -> ToolResult {
        Ok(self.status())
    }

    fn right_down(&mut self, editor: &mut dyn Editor, args: InputArgs) -> ToolResult;

    fn right_up(&mut self, _editor: &mut dyn Editor, _args: InputArgs) -> ToolResult {
        Ok(self.status())
    }

    fn pointer_move(&mut self, editor: &mut dyn Editor, args: InputArgs) -> ToolResult;

    /// Resume a suspended transition; only the image tool suspends
    fn poll(&mut self, _editor: &mut dyn Editor) -> ToolResult {
        Ok(self.status())
    }

    /// Drop any in-progress shape and decorations and return to the initial state
    fn reset(&mut self, editor: &mut dyn Editor);
}

/// Enum representing all available tool types
/// This allows us to avoid using Box<dyn Tool> and keeps dispatch static
#[derive(Debug)]
pub enum ToolType {
    None(NoneTool),
    Selection(SelectionTool),
    Point(PointTool),
    Line(LineTool),
    Arc(ArcTool),
    CubicBezier(CubicBezierTool),
    QuadraticBezier(QuadraticBezierTool),
    Path(PathTool),
    Rectangle(RectangleTool),
    Ellipse(EllipseTool),
    Text(TextTool),
    Image(ImageTool),
}

macro_rules! dispatch {
    ($self:ident, $tool:ident => $body:expr) => {
        match $self {
            ToolType::None($tool) => $body,
            ToolType::Selection($tool) => $body,
            ToolType::Point($tool) => $body,
            ToolType::Line($tool) => $body,
            ToolType::Arc($tool) => $body,
            ToolType::CubicBezier($tool) => $body,
            ToolType::QuadraticBezier($tool) => $body,
            ToolType::Path($tool) => $body,
            ToolType::Rectangle($tool) => $body,
            ToolType::Ellipse($tool) => $body,
            ToolType::Text($tool) => $body,
            ToolType::Image($tool) => $body,
        }
    };
}

impl Tool for ToolType {
    fn name(&self) -> &'static str {
        dispatch!(self, tool => tool.name())
    }

    fn current_state_name(&self) -> &'static str {
        dispatch!(self, tool => tool.current_state_name())
    }

    fn status(&self) -> ToolStatus {
        dispatch!(self, tool => tool.status())
    }

    fn left_down(&mut self, editor: &mut dyn Editor, args: InputArgs) -> ToolResult {
        dispatch!(self, tool => tool.left_down(editor, args))
    }

    fn left_up(&mut self, editor: &mut dyn Editor, args: InputArgs) -> ToolResult {
        dispatch!(self, tool => tool.left_up(editor, args))
    }

    fn right_down(&mut self, editor: &mut dyn Editor, args: InputArgs) -> ToolResult {
        dispatch!(self, tool => tool.right_down(editor, args))
    }

    fn right_up(&mut self, editor: &mut dyn Editor, args: InputArgs) -> ToolResult {
        dispatch!(self, tool => tool.right_up(editor, args))
    }

    fn pointer_move(&mut self, editor: &mut dyn Editor, args: InputArgs) -> ToolResult {
        dispatch!(self, tool => tool.pointer_move(editor, args))
    }

    fn poll(&mut self, editor: &mut dyn Editor) -> ToolResult {
        dispatch!(self, tool => tool.poll(editor))
    }

    fn reset(&mut self, editor: &mut dyn Editor) {
        dispatch!(self, tool => tool.reset(editor))
    }
}

impl Default for ToolType {
    fn default() -> Self {
        ToolType::None(NoneTool)
    }
}

// Factory function to create a new tool of the specified type
pub fn new_tool(tool_type: &str) -> Option<ToolType> {
    match tool_type {
        "None" => Some(ToolType::None(NoneTool)),
        "Selection" => Some(ToolType::Selection(SelectionTool::new())),
        "Point" => Some(ToolType::Point(PointTool)),
        "Line" => Some(ToolType::Line(LineTool::new())),
        "Arc" => Some(ToolType::Arc(ArcTool::new())),
        "CubicBezier" => Some(ToolType::CubicBezier(CubicBezierTool::new())),
        "QuadraticBezier" => Some(ToolType::QuadraticBezier(QuadraticBezierTool::new())),
        "Path" => Some(ToolType::Path(PathTool::new())),
        "Rectangle" => Some(ToolType::Rectangle(RectangleTool::new())),
        "Ellipse" => Some(ToolType::Ellipse(EllipseTool::new())),
        "Text" => Some(ToolType::Text(TextTool::new())),
        "Image" => Some(ToolType::Image(ImageTool::new())),
        _ => None,
    }
}

// Helper methods for ToolType
impl ToolType {
    pub fn as_path_tool_mut(&mut self) -> Option<&mut PathTool> {
        match self {
            Self::Path(tool) => Some(tool),
            _ => None,
        }
    }

    pub fn as_selection_tool(&self) -> Option<&SelectionTool> {
        match self {
            Self::Selection(tool) => Some(tool),
            _ => None,
        }
    }

    pub fn is_selection_tool(&self) -> bool {
        matches!(self, Self::Selection(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tool_by_name() {
        for name in [
            "None",
            "Selection",
            "Point",
            "Line",
            "Arc",
            "CubicBezier",
            "QuadraticBezier",
            "Path",
            "Rectangle",
            "Ellipse",
            "Text",
            "Image",
        ] {
            let tool = new_tool(name).unwrap();
            assert_eq!(tool.name(), name);
            assert!(tool.status().is_idle());
        }
        assert!(new_tool("Brush").is_none());
    }
}
