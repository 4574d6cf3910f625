use log::debug;

use super::{InputArgs, Tool, ToolStatus};
use crate::editor::Editor;
use crate::error::ToolResult;
use crate::layer::LayerKind;
use crate::shape::factory;

/// Single click: split the line under the cursor, or drop a standalone point
#[derive(Debug, Clone, Copy, Default)]
pub struct PointTool;

impl Tool for PointTool {
    fn name(&self) -> &'static str {
        "Point"
    }

    fn current_state_name(&self) -> &'static str {
        "Point"
    }

    fn status(&self) -> ToolStatus {
        ToolStatus::Idle
    }

    fn left_down(&mut self, editor: &mut dyn Editor, args: InputArgs) -> ToolResult {
        let (x, y) = editor.try_to_snap(&args);
        let point = editor.project_mut().points.create(x, y);

        if editor.options().try_to_connect && editor.try_to_split_line(x, y, point, false) {
            debug!("point {point} split a line at ({x}, {y})");
        } else {
            editor
                .project_mut()
                .add_shape(LayerKind::Current, factory::create_point_shape(point));
        }
        Ok(ToolStatus::Idle)
    }

    fn right_down(&mut self, editor: &mut dyn Editor, _args: InputArgs) -> ToolResult {
        editor.dehover(LayerKind::Current);
        Ok(ToolStatus::Idle)
    }

    fn pointer_move(&mut self, editor: &mut dyn Editor, args: InputArgs) -> ToolResult {
        if editor.options().try_to_connect {
            let (x, y) = editor.try_to_snap(&args);
            editor.try_to_hover_shape(x, y);
        }
        Ok(ToolStatus::Idle)
    }

    fn reset(&mut self, editor: &mut dyn Editor) {
        editor.dehover(LayerKind::Current);
    }
}
