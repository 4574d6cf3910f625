use log::debug;

use super::{with_geometry, SegmentTool};
use crate::editor::Editor;
use crate::error::ToolResult;
use crate::geometry::{PathSize, PointId};
use crate::path::{ArcSegment, PathSegment, SweepDirection};
use crate::shape::ShapeId;
use crate::tools::adorners::ToolArcSelection;
use crate::tools::helpers;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathArcState {
    #[default]
    Start,
    End,
}

#[derive(Debug)]
struct Provisional {
    pen: PointId,
    end: PointId,
    adorner: ToolArcSelection,
}

/// Clockwise arcs sized by the box between the pen and the cursor
#[derive(Debug, Default)]
pub struct PathArcTool {
    state: PathArcState,
    segment: Option<Provisional>,
}

impl PathArcTool {
    pub fn state(&self) -> PathArcState {
        self.state
    }

    /// Keep the arc radii in step with its end point
    fn resize(editor: &mut dyn Editor, path: ShapeId, pen: PointId, end: PointId) -> ToolResult<()> {
        let points = &editor.project().points;
        let (from, to) = (points.position(pen), points.position(end));
        let size = PathSize::between(from.x, from.y, to.x, to.y);
        with_geometry(editor, path, |ctx| {
            if let Some(PathSegment::Arc(arc)) = ctx.last_segment_mut() {
                arc.size = size;
            }
            Ok(())
        })
    }
}

impl SegmentTool for PathArcTool {
    fn state_name(&self) -> &'static str {
        match self.state {
            PathArcState::Start => "Start",
            PathArcState::End => "End",
        }
    }

    fn is_drawing(&self) -> bool {
        self.state == PathArcState::End
    }

    fn begin(&mut self, editor: &mut dyn Editor, path: ShapeId, x: f64, y: f64) -> ToolResult<()> {
        let end = helpers::new_point(editor, x, y);
        let is_stroked = editor.options().default_is_stroked;
        let pen = with_geometry(editor, path, |ctx| {
            let pen = ctx.last_path_point()?;
            ctx.arc_to(
                end,
                PathSize::default(),
                0.0,
                false,
                SweepDirection::Clockwise,
                is_stroked,
                false,
            )?;
            Ok(pen)
        })?;
        Self::resize(editor, path, pen, end)?;
        let adorner = ToolArcSelection::new(editor, pen, end, pen, end);
        self.segment = Some(Provisional { pen, end, adorner });
        self.state = PathArcState::End;
        Ok(())
    }

    fn click(&mut self, editor: &mut dyn Editor, path: ShapeId, x: f64, y: f64) -> ToolResult<()> {
        if let (PathArcState::End, Some(mut segment)) = (self.state, self.segment.take()) {
            segment.adorner.reset(editor);
            helpers::set_position(editor, segment.end, x, y);
            Self::resize(editor, path, segment.pen, segment.end)?;
            helpers::connect_at(editor, path, segment.end, x, y);
            debug!("path {path} arc to ({x}, {y})");
        }
        self.begin(editor, path, x, y)
    }

    fn drag(&mut self, editor: &mut dyn Editor, path: ShapeId, x: f64, y: f64) -> ToolResult<()> {
        if let Some(segment) = &self.segment {
            helpers::set_position(editor, segment.end, x, y);
            Self::resize(editor, path, segment.pen, segment.end)?;
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
            Ok(ctx.remove_last_segment::<ArcSegment>().is_some())
        })
    }

    fn clear(&mut self, editor: &mut dyn Editor) {
        if let Some(mut segment) = self.segment.take() {
            segment.adorner.reset(editor);
        }
        self.state = PathArcState::Start;
    }
}
