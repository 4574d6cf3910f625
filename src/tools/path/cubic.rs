use log::debug;

use super::{with_geometry, SegmentTool};
use crate::editor::Editor;
use crate::error::ToolResult;
use crate::geometry::PointId;
use crate::path::CubicBezierSegment;
use crate::shape::ShapeId;
use crate::tools::adorners::ToolCubicBezierSelection;
use crate::tools::helpers;

/// Which point of the segment follows the cursor: the end, then each control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathCubicBezierState {
    #[default]
    Start,
    Point4,
    Point2,
    Point3,
}

#[derive(Debug)]
struct Provisional {
    control1: PointId,
    control2: PointId,
    end: PointId,
    adorner: ToolCubicBezierSelection,
}

#[derive(Debug, Default)]
pub struct PathCubicBezierTool {
    state: PathCubicBezierState,
    segment: Option<Provisional>,
}

impl PathCubicBezierTool {
    pub fn state(&self) -> PathCubicBezierState {
        self.state
    }

    fn free_point(&self) -> Option<PointId> {
        let segment = self.segment.as_ref()?;
        match self.state {
            PathCubicBezierState::Start => None,
            PathCubicBezierState::Point4 => Some(segment.end),
            PathCubicBezierState::Point2 => Some(segment.control1),
            PathCubicBezierState::Point3 => Some(segment.control2),
        }
    }
}

impl SegmentTool for PathCubicBezierTool {
    fn state_name(&self) -> &'static str {
        match self.state {
            PathCubicBezierState::Start => "Start",
            PathCubicBezierState::Point4 => "Point4",
            PathCubicBezierState::Point2 => "Point2",
            PathCubicBezierState::Point3 => "Point3",
        }
    }

    fn is_drawing(&self) -> bool {
        self.state != PathCubicBezierState::Start
    }

    fn begin(&mut self, editor: &mut dyn Editor, path: ShapeId, x: f64, y: f64) -> ToolResult<()> {
        let control1 = helpers::new_point(editor, x, y);
        let control2 = helpers::new_point(editor, x, y);
        let end = helpers::new_point(editor, x, y);
        let is_stroked = editor.options().default_is_stroked;
        let pen = with_geometry(editor, path, |ctx| {
            let pen = ctx.last_path_point()?;
            ctx.cubic_bezier_to(control1, control2, end, is_stroked, false)?;
            Ok(pen)
        })?;
        let adorner = ToolCubicBezierSelection::new(editor, pen, control1, control2, end);
        self.segment = Some(Provisional {
            control1,
            control2,
            end,
            adorner,
        });
        self.state = PathCubicBezierState::Point4;
        Ok(())
    }

    fn click(&mut self, editor: &mut dyn Editor, path: ShapeId, x: f64, y: f64) -> ToolResult<()> {
        let Some(free) = self.free_point() else {
            return self.begin(editor, path, x, y);
        };
        helpers::set_position(editor, free, x, y);
        match self.state {
            PathCubicBezierState::Point4 => {
                helpers::connect_at(editor, path, free, x, y);
                self.state = PathCubicBezierState::Point2;
            }
            PathCubicBezierState::Point2 => self.state = PathCubicBezierState::Point3,
            PathCubicBezierState::Start | PathCubicBezierState::Point3 => {
                debug!("path {path} cubic bezier fixed at ({x}, {y})");
                self.clear(editor);
                return self.begin(editor, path, x, y);
            }
        }
        if let Some(segment) = &self.segment {
            segment.adorner.sync(editor);
        }
        Ok(())
    }

    fn drag(&mut self, editor: &mut dyn Editor, _path: ShapeId, x: f64, y: f64) -> ToolResult<()> {
        if let (Some(free), Some(segment)) = (self.free_point(), &self.segment) {
            helpers::set_position(editor, free, x, y);
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
            Ok(ctx.remove_last_segment::<CubicBezierSegment>().is_some())
        })
    }

    fn clear(&mut self, editor: &mut dyn Editor) {
        if let Some(mut segment) = self.segment.take() {
            segment.adorner.reset(editor);
        }
        self.state = PathCubicBezierState::Start;
    }
}
