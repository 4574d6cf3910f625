use log::debug;

use super::{with_geometry, SegmentTool};
use crate::editor::Editor;
use crate::error::ToolResult;
use crate::geometry::PointId;
use crate::path::QuadraticBezierSegment;
use crate::shape::ShapeId;
use crate::tools::adorners::ToolQuadraticBezierSelection;
use crate::tools::helpers;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathQuadraticBezierState {
    #[default]
    Start,
    Point3,
    Point2,
}

#[derive(Debug)]
struct Provisional {
    control: PointId,
    end: PointId,
    adorner: ToolQuadraticBezierSelection,
}

/// End point first, then the control point
#[derive(Debug, Default)]
pub struct PathQuadraticBezierTool {
    state: PathQuadraticBezierState,
    segment: Option<Provisional>,
}

impl PathQuadraticBezierTool {
    pub fn state(&self) -> PathQuadraticBezierState {
        self.state
    }

    fn free_point(&self) -> Option<PointId> {
        let segment = self.segment.as_ref()?;
        match self.state {
            PathQuadraticBezierState::Start => None,
            PathQuadraticBezierState::Point3 => Some(segment.end),
            PathQuadraticBezierState::Point2 => Some(segment.control),
        }
    }
}

impl SegmentTool for PathQuadraticBezierTool {
    fn state_name(&self) -> &'static str {
        match self.state {
            PathQuadraticBezierState::Start => "Start",
            PathQuadraticBezierState::Point3 => "Point3",
            PathQuadraticBezierState::Point2 => "Point2",
        }
    }

    fn is_drawing(&self) -> bool {
        self.state != PathQuadraticBezierState::Start
    }

    fn begin(&mut self, editor: &mut dyn Editor, path: ShapeId, x: f64, y: f64) -> ToolResult<()> {
        let control = helpers::new_point(editor, x, y);
        let end = helpers::new_point(editor, x, y);
        let is_stroked = editor.options().default_is_stroked;
        let pen = with_geometry(editor, path, |ctx| {
            let pen = ctx.last_path_point()?;
            ctx.quadratic_bezier_to(control, end, is_stroked, false)?;
            Ok(pen)
        })?;
        let adorner = ToolQuadraticBezierSelection::new(editor, pen, control, end);
        self.segment = Some(Provisional {
            control,
            end,
            adorner,
        });
        self.state = PathQuadraticBezierState::Point3;
        Ok(())
    }

    fn click(&mut self, editor: &mut dyn Editor, path: ShapeId, x: f64, y: f64) -> ToolResult<()> {
        let Some(free) = self.free_point() else {
            return self.begin(editor, path, x, y);
        };
        helpers::set_position(editor, free, x, y);
        match self.state {
            PathQuadraticBezierState::Point3 => {
                helpers::connect_at(editor, path, free, x, y);
                self.state = PathQuadraticBezierState::Point2;
            }
            PathQuadraticBezierState::Start | PathQuadraticBezierState::Point2 => {
                debug!("path {path} quadratic bezier fixed at ({x}, {y})");
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
            Ok(ctx.remove_last_segment::<QuadraticBezierSegment>().is_some())
        })
    }

    fn clear(&mut self, editor: &mut dyn Editor) {
        if let Some(mut segment) = self.segment.take() {
            segment.adorner.reset(editor);
        }
        self.state = PathQuadraticBezierState::Start;
    }
}
