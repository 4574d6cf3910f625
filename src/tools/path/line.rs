use log::debug;

use super::{with_geometry, SegmentTool};
use crate::editor::Editor;
use crate::error::ToolResult;
use crate::geometry::PointId;
use crate::path::LineSegment;
use crate::shape::ShapeId;
use crate::tools::adorners::ToolLineSelection;
use crate::tools::helpers;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathLineState {
    #[default]
    Start,
    End,
}

#[derive(Debug)]
struct Provisional {
    end: PointId,
    adorner: ToolLineSelection,
}

/// Line segments: every click fixes the end and starts the next segment
#[derive(Debug, Default)]
pub struct PathLineTool {
    state: PathLineState,
    segment: Option<Provisional>,
}

impl PathLineTool {
    pub fn state(&self) -> PathLineState {
        self.state
    }
}

impl SegmentTool for PathLineTool {
    fn state_name(&self) -> &'static str {
        match self.state {
            PathLineState::Start => "Start",
            PathLineState::End => "End",
        }
    }

    fn is_drawing(&self) -> bool {
        self.state == PathLineState::End
    }

    fn begin(&mut self, editor: &mut dyn Editor, path: ShapeId, x: f64, y: f64) -> ToolResult<()> {
        let end = helpers::new_point(editor, x, y);
        let is_stroked = editor.options().default_is_stroked;
        let pen = with_geometry(editor, path, |ctx| {
            let pen = ctx.last_path_point()?;
            ctx.line_to(end, is_stroked, false)?;
            Ok(pen)
        })?;
        let adorner = ToolLineSelection::new(editor, pen, end);
        self.segment = Some(Provisional { end, adorner });
        self.state = PathLineState::End;
        Ok(())
    }

    fn click(&mut self, editor: &mut dyn Editor, path: ShapeId, x: f64, y: f64) -> ToolResult<()> {
        if let (PathLineState::End, Some(mut segment)) = (self.state, self.segment.take()) {
            segment.adorner.reset(editor);
            helpers::set_position(editor, segment.end, x, y);
            helpers::connect_at(editor, path, segment.end, x, y);
            debug!("path {path} line to ({x}, {y})");
        }
        self.begin(editor, path, x, y)
    }

    fn drag(&mut self, editor: &mut dyn Editor, _path: ShapeId, x: f64, y: f64) -> ToolResult<()> {
        if let Some(segment) = &self.segment {
            helpers::set_position(editor, segment.end, x, y);
            segment.adorner.sync(editor);
        }
        Ok(())
    }

    fn remove(&mut self, editor: &mut dyn Editor, path: ShapeId) -> ToolResult<bool> {
        let drawing = self.is_drawing();
        self.clear(editor);
        if !drawing {
            return Ok(false);
        }
        with_geometry(editor, path, |ctx| {
            Ok(ctx.remove_last_segment::<LineSegment>().is_some())
        })
    }

    fn clear(&mut self, editor: &mut dyn Editor) {
        if let Some(mut segment) = self.segment.take() {
            segment.adorner.reset(editor);
        }
        self.state = PathLineState::Start;
    }
}
