//! Path tool: draws one path shape through a set of segment sub-tools.
//!
//! The outer state is the active [`PathSubTool`]; each segment sub-tool keeps
//! its own inner state for the segment it is placing. Only [`PathTool`]
//! creates the path shape, begins figures and tears the path down.

mod arc;
mod cubic;
mod line;
mod quadratic;

use log::{debug, info};

use super::helpers;
use super::{InputArgs, Tool, ToolStatus};
use crate::editor::Editor;
use crate::error::{GeometryError, ToolError, ToolResult};
use crate::layer::LayerKind;
use crate::path::{GeometryContext, PathGeometry};
use crate::shape::{factory, ShapeId};

pub use arc::{PathArcState, PathArcTool};
pub use cubic::{PathCubicBezierState, PathCubicBezierTool};
pub use line::{PathLineState, PathLineTool};
pub use quadratic::{PathQuadraticBezierState, PathQuadraticBezierTool};

/// Which sub-tool receives the path tool's pointer events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathSubTool {
    #[default]
    Line,
    Arc,
    CubicBezier,
    QuadraticBezier,
    /// Start a new figure at the next click, then go back to the previous sub-tool
    Move,
}

impl PathSubTool {
    pub fn name(&self) -> &'static str {
        match self {
            PathSubTool::Line => "Line",
            PathSubTool::Arc => "Arc",
            PathSubTool::CubicBezier => "CubicBezier",
            PathSubTool::QuadraticBezier => "QuadraticBezier",
            PathSubTool::Move => "Move",
        }
    }
}

/// Run `f` against the geometry of the path `id` in the working layer
pub(crate) fn with_geometry<R>(
    editor: &mut dyn Editor,
    id: ShapeId,
    f: impl FnOnce(&mut GeometryContext<'_>) -> Result<R, GeometryError>,
) -> ToolResult<R> {
    let shape = editor
        .project_mut()
        .container
        .layer_mut(LayerKind::Working)
        .find_shape_mut(id)
        .ok_or(ToolError::MissingShape(id))?;
    let path = shape.as_path_mut().ok_or(ToolError::UnexpectedKind {
        id,
        expected: "Path",
    })?;
    let result = f(&mut GeometryContext::new(&mut path.geometry))?;
    shape.base.mark_dirty();
    Ok(result)
}

/// A sub-tool that places one kind of segment at the end of the path
pub(crate) trait SegmentTool {
    fn state_name(&self) -> &'static str;

    /// Whether a provisional segment is in the path
    fn is_drawing(&self) -> bool;

    /// Append a provisional segment from the pen to (x, y)
    fn begin(&mut self, editor: &mut dyn Editor, path: ShapeId, x: f64, y: f64) -> ToolResult<()>;

    /// Fix the point under the cursor; may start the next segment
    fn click(&mut self, editor: &mut dyn Editor, path: ShapeId, x: f64, y: f64) -> ToolResult<()>;

    /// Drag the free point of the provisional segment
    fn drag(&mut self, editor: &mut dyn Editor, path: ShapeId, x: f64, y: f64) -> ToolResult<()>;

    /// Take the provisional segment back out of the path
    ///
    /// Returns whether a segment was removed. The sub-tool is back in its
    /// initial state either way.
    fn remove(&mut self, editor: &mut dyn Editor, path: ShapeId) -> ToolResult<bool>;

    /// Forget the provisional segment without touching the path
    fn clear(&mut self, editor: &mut dyn Editor);
}

/// Click-by-click path drawing; right click finishes the path
#[derive(Debug, Default)]
pub struct PathTool {
    sub_tool: PathSubTool,
    previous_sub_tool: PathSubTool,
    path: Option<ShapeId>,
    line: PathLineTool,
    arc: PathArcTool,
    cubic_bezier: PathCubicBezierTool,
    quadratic_bezier: PathQuadraticBezierTool,
}

impl PathTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sub_tool(&self) -> PathSubTool {
        self.sub_tool
    }

    pub fn previous_sub_tool(&self) -> PathSubTool {
        self.previous_sub_tool
    }

    /// The path being drawn, if any
    pub fn shape(&self) -> Option<ShapeId> {
        self.path
    }

    fn segment_tool(&mut self, sub_tool: PathSubTool) -> Option<&mut dyn SegmentTool> {
        match sub_tool {
            PathSubTool::Line => Some(&mut self.line),
            PathSubTool::Arc => Some(&mut self.arc),
            PathSubTool::CubicBezier => Some(&mut self.cubic_bezier),
            PathSubTool::QuadraticBezier => Some(&mut self.quadratic_bezier),
            PathSubTool::Move => None,
        }
    }

    fn active(&self) -> Option<&dyn SegmentTool> {
        match self.sub_tool {
            PathSubTool::Line => Some(&self.line),
            PathSubTool::Arc => Some(&self.arc),
            PathSubTool::CubicBezier => Some(&self.cubic_bezier),
            PathSubTool::QuadraticBezier => Some(&self.quadratic_bezier),
            PathSubTool::Move => None,
        }
    }

    /// Create the path with its first figure at (x, y) if nothing is drawn yet
    fn ensure_started(&mut self, editor: &mut dyn Editor, x: f64, y: f64) -> ShapeId {
        if let Some(id) = self.path {
            return id;
        }
        let start = helpers::point_at(editor, x, y);
        let options = editor.options();
        let mut geometry = PathGeometry::new(options.default_fill_rule);
        GeometryContext::new(&mut geometry).begin_figure(
            start,
            options.default_is_filled,
            options.default_is_closed,
        );
        let path = factory::create_path(options, geometry);
        let id = path.id();
        helpers::add_working(editor, path);
        debug!("path {id} started at ({x}, {y})");
        self.path = Some(id);
        id
    }

    fn begin_figure(&mut self, editor: &mut dyn Editor, x: f64, y: f64) -> ToolResult<ShapeId> {
        let Some(id) = self.path else {
            return Ok(self.ensure_started(editor, x, y));
        };
        let start = helpers::point_at(editor, x, y);
        let (is_filled, is_closed) = {
            let options = editor.options();
            (options.default_is_filled, options.default_is_closed)
        };
        with_geometry(editor, id, |ctx| {
            ctx.begin_figure(start, is_filled, is_closed);
            Ok(())
        })?;
        debug!("path {id} new figure at ({x}, {y})");
        helpers::invalidate_working(editor);
        Ok(id)
    }

    /// Change the active sub-tool
    ///
    /// The old sub-tool's provisional segment is removed. While a path is in
    /// progress the new sub-tool continues from the pen position.
    pub fn set_sub_tool(&mut self, editor: &mut dyn Editor, sub_tool: PathSubTool) -> ToolResult<()> {
        if sub_tool == self.sub_tool {
            return Ok(());
        }
        let current = self.sub_tool;
        if let (Some(path), Some(tool)) = (self.path, self.segment_tool(current)) {
            tool.remove(editor, path)?;
        }
        debug!("path sub-tool {} -> {}", current.name(), sub_tool.name());
        self.previous_sub_tool = current;
        self.sub_tool = sub_tool;

        if let Some(path) = self.path {
            let pen = with_geometry(editor, path, |ctx| ctx.last_path_point())?;
            let position = editor.project().points.position(pen);
            if let Some(tool) = self.segment_tool(sub_tool) {
                tool.begin(editor, path, position.x, position.y)?;
            }
        }
        helpers::invalidate_working(editor);
        Ok(())
    }

    /// Remove the segment being placed and roll the active sub-tool back
    ///
    /// Returns false when no provisional segment was in the path.
    pub fn undo_last_segment(&mut self, editor: &mut dyn Editor) -> ToolResult<bool> {
        let Some(path) = self.path else {
            return Ok(false);
        };
        let sub_tool = match self.sub_tool {
            PathSubTool::Move => self.previous_sub_tool,
            other => other,
        };
        let removed = match self.segment_tool(sub_tool) {
            Some(tool) => tool.remove(editor, path)?,
            None => false,
        };
        helpers::invalidate_working(editor);
        Ok(removed)
    }

    fn finish(&mut self, editor: &mut dyn Editor) -> ToolResult {
        let Some(path) = self.path else {
            return Ok(ToolStatus::Idle);
        };
        if let Some(tool) = self.segment_tool(self.sub_tool) {
            tool.remove(editor, path)?;
        }
        let segments = with_geometry(editor, path, |ctx| {
            ctx.remove_empty_figures();
            Ok(ctx.geometry().segment_count())
        })?;
        self.path = None;
        if self.sub_tool == PathSubTool::Move {
            self.sub_tool = self.previous_sub_tool;
        }

        if segments == 0 {
            helpers::discard_working(editor, path);
            editor.dehover(LayerKind::Current);
            return Ok(ToolStatus::Idle);
        }
        info!("path {path} finished with {segments} segments");
        Ok(helpers::commit(editor, path))
    }
}

impl Tool for PathTool {
    fn name(&self) -> &'static str {
        "Path"
    }

    fn current_state_name(&self) -> &'static str {
        match self.active() {
            Some(tool) => tool.state_name(),
            None => "Move",
        }
    }

    fn status(&self) -> ToolStatus {
        match self.path {
            Some(_) => ToolStatus::Cancelable,
            None => ToolStatus::Idle,
        }
    }

    fn left_down(&mut self, editor: &mut dyn Editor, args: InputArgs) -> ToolResult {
        let (x, y) = editor.try_to_snap(&args);
        let path = if self.sub_tool == PathSubTool::Move {
            let path = self.begin_figure(editor, x, y)?;
            self.sub_tool = self.previous_sub_tool;
            self.previous_sub_tool = PathSubTool::Move;
            path
        } else {
            self.ensure_started(editor, x, y)
        };

        if let Some(tool) = self.segment_tool(self.sub_tool) {
            tool.click(editor, path, x, y)?;
        }
        helpers::invalidate_working(editor);
        Ok(self.status())
    }

    fn right_down(&mut self, editor: &mut dyn Editor, _args: InputArgs) -> ToolResult {
        self.finish(editor)
    }

    fn pointer_move(&mut self, editor: &mut dyn Editor, args: InputArgs) -> ToolResult {
        let (x, y) = editor.try_to_snap(&args);
        helpers::hover(editor, x, y);
        if let Some(path) = self.path {
            if let Some(tool) = self.segment_tool(self.sub_tool) {
                if tool.is_drawing() {
                    tool.drag(editor, path, x, y)?;
                    helpers::invalidate_working(editor);
                }
            }
        }
        Ok(self.status())
    }

    fn reset(&mut self, editor: &mut dyn Editor) {
        self.line.clear(editor);
        self.arc.clear(editor);
        self.cubic_bezier.clear(editor);
        self.quadratic_bezier.clear(editor);
        if let Some(path) = self.path.take() {
            helpers::discard_working(editor, path);
        }
        if self.sub_tool == PathSubTool::Move {
            self.sub_tool = self.previous_sub_tool;
        }
        editor.dehover(LayerKind::Current);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorOptions;
    use crate::editor::ProjectEditor;
    use crate::geometry::PathSize;
    use crate::path::{PathGeometry, PathSegment, SegmentKind};
    use kurbo::Point;

    fn editor() -> ProjectEditor {
        ProjectEditor::new(EditorOptions {
            snap_to_grid: false,
            ..EditorOptions::default()
        })
    }

    fn click(tool: &mut PathTool, editor: &mut ProjectEditor, x: f64, y: f64) {
        tool.left_down(editor, InputArgs::new(x, y)).unwrap();
    }

    fn finish(tool: &mut PathTool, editor: &mut ProjectEditor) -> ToolStatus {
        tool.right_down(editor, InputArgs::default()).unwrap()
    }

    fn committed(editor: &ProjectEditor) -> &PathGeometry {
        let shapes = editor.project.container.layer(LayerKind::Current).shapes();
        &shapes.last().unwrap().as_path().unwrap().geometry
    }

    fn kinds(geometry: &PathGeometry) -> Vec<SegmentKind> {
        geometry
            .figures
            .iter()
            .flat_map(|f| f.segments.iter().map(PathSegment::kind))
            .collect()
    }

    #[test]
    fn test_clicks_build_line_segments() {
        let mut editor = editor();
        let mut tool = PathTool::new();

        click(&mut tool, &mut editor, 0.0, 0.0);
        assert!(matches!(tool.status(), ToolStatus::Cancelable));
        tool.pointer_move(&mut editor, InputArgs::new(50.0, 0.0)).unwrap();
        click(&mut tool, &mut editor, 50.0, 0.0);
        click(&mut tool, &mut editor, 50.0, 50.0);
        assert_eq!(tool.current_state_name(), "End");

        assert!(finish(&mut tool, &mut editor).is_idle());
        let geometry = committed(&editor);
        assert_eq!(kinds(geometry), vec![SegmentKind::Line, SegmentKind::Line]);
        let points = &editor.project.points;
        assert_eq!(points.position(geometry.figures[0].start_point), Point::new(0.0, 0.0));
        assert_eq!(
            points.position(geometry.last_path_point().unwrap()),
            Point::new(50.0, 50.0)
        );
        assert!(editor.project.container.layer(LayerKind::Working).is_empty());
        assert!(editor.project.container.layer(LayerKind::Helper).is_empty());
    }

    #[test]
    fn test_single_click_path_is_discarded() {
        let mut editor = editor();
        let mut tool = PathTool::new();

        click(&mut tool, &mut editor, 10.0, 10.0);
        assert!(finish(&mut tool, &mut editor).is_idle());
        assert!(editor.project.container.layer(LayerKind::Working).is_empty());
        assert!(editor.project.container.layer(LayerKind::Current).is_empty());
        assert_eq!(tool.shape(), None);
    }

    #[test]
    fn test_switch_sub_tool_continues_from_pen() {
        let mut editor = editor();
        let mut tool = PathTool::new();

        click(&mut tool, &mut editor, 0.0, 0.0);
        click(&mut tool, &mut editor, 50.0, 0.0);
        tool.set_sub_tool(&mut editor, PathSubTool::Arc).unwrap();
        assert_eq!(tool.previous_sub_tool(), PathSubTool::Line);

        tool.pointer_move(&mut editor, InputArgs::new(100.0, 50.0)).unwrap();
        click(&mut tool, &mut editor, 100.0, 50.0);
        finish(&mut tool, &mut editor);

        let geometry = committed(&editor);
        assert_eq!(kinds(geometry), vec![SegmentKind::Line, SegmentKind::Arc]);
        let PathSegment::Arc(arc) = &geometry.figures[0].segments[1] else {
            panic!("expected an arc segment");
        };
        assert_eq!(arc.size, PathSize::new(50.0, 50.0));
        assert_eq!(editor.project.points.position(arc.point), Point::new(100.0, 50.0));
    }

    #[test]
    fn test_curve_sub_tools_place_end_before_controls() {
        let mut editor = editor();
        let mut tool = PathTool::new();
        tool.set_sub_tool(&mut editor, PathSubTool::QuadraticBezier).unwrap();

        click(&mut tool, &mut editor, 0.0, 0.0);
        click(&mut tool, &mut editor, 100.0, 0.0);
        assert_eq!(tool.current_state_name(), "Point2");
        click(&mut tool, &mut editor, 50.0, 40.0);

        tool.set_sub_tool(&mut editor, PathSubTool::CubicBezier).unwrap();
        click(&mut tool, &mut editor, 200.0, 0.0);
        click(&mut tool, &mut editor, 130.0, 40.0);
        click(&mut tool, &mut editor, 170.0, 40.0);
        finish(&mut tool, &mut editor);

        let geometry = committed(&editor);
        assert_eq!(
            kinds(geometry),
            vec![SegmentKind::QuadraticBezier, SegmentKind::CubicBezier]
        );
        let points = &editor.project.points;
        let PathSegment::QuadraticBezier(quad) = &geometry.figures[0].segments[0] else {
            panic!("expected a quadratic segment");
        };
        assert_eq!(points.position(quad.point1), Point::new(50.0, 40.0));
        assert_eq!(points.position(quad.point2), Point::new(100.0, 0.0));
        let PathSegment::CubicBezier(cubic) = &geometry.figures[0].segments[1] else {
            panic!("expected a cubic segment");
        };
        assert_eq!(points.position(cubic.point1), Point::new(130.0, 40.0));
        assert_eq!(points.position(cubic.point2), Point::new(170.0, 40.0));
        assert_eq!(points.position(cubic.point3), Point::new(200.0, 0.0));
    }

    #[test]
    fn test_move_sub_tool_starts_new_figure() {
        let mut editor = editor();
        let mut tool = PathTool::new();

        click(&mut tool, &mut editor, 0.0, 0.0);
        click(&mut tool, &mut editor, 50.0, 0.0);
        tool.set_sub_tool(&mut editor, PathSubTool::Move).unwrap();
        assert_eq!(tool.current_state_name(), "Move");

        click(&mut tool, &mut editor, 100.0, 100.0);
        assert_eq!(tool.sub_tool(), PathSubTool::Line);
        assert_eq!(tool.previous_sub_tool(), PathSubTool::Move);
        click(&mut tool, &mut editor, 150.0, 100.0);
        finish(&mut tool, &mut editor);

        let geometry = committed(&editor);
        assert_eq!(geometry.figures.len(), 2);
        assert_eq!(geometry.figures[0].segments.len(), 1);
        assert_eq!(geometry.figures[1].segments.len(), 1);
        assert_eq!(
            editor.project.points.position(geometry.figures[1].start_point),
            Point::new(100.0, 100.0)
        );
    }

    #[test]
    fn test_undo_last_segment_rolls_back_sub_tool() {
        let mut editor = editor();
        let mut tool = PathTool::new();

        click(&mut tool, &mut editor, 0.0, 0.0);
        click(&mut tool, &mut editor, 50.0, 0.0);
        assert!(tool.undo_last_segment(&mut editor).unwrap());
        assert_eq!(tool.current_state_name(), "Start");
        assert!(!tool.undo_last_segment(&mut editor).unwrap());
        assert!(editor.project.container.layer(LayerKind::Helper).is_empty());

        // The next click continues from the pen
        click(&mut tool, &mut editor, 50.0, 50.0);
        click(&mut tool, &mut editor, 0.0, 50.0);
        finish(&mut tool, &mut editor);
        assert_eq!(committed(&editor).segment_count(), 2);
    }

    #[test]
    fn test_first_click_connects_to_existing_point() {
        let mut editor = editor();
        let a = editor.project.points.create(0.0, 0.0);
        let b = editor.project.points.create(60.0, 0.0);
        let line = factory::create_line(&editor.options, a, b);
        editor.project.add_shape(LayerKind::Current, line);

        let mut tool = PathTool::new();
        click(&mut tool, &mut editor, 62.0, 3.0);
        click(&mut tool, &mut editor, 60.0, 60.0);
        finish(&mut tool, &mut editor);

        assert_eq!(committed(&editor).figures[0].start_point, b);
    }

    #[test]
    fn test_reset_discards_path() {
        let mut editor = editor();
        let mut tool = PathTool::new();
        click(&mut tool, &mut editor, 0.0, 0.0);
        click(&mut tool, &mut editor, 50.0, 0.0);

        tool.reset(&mut editor);
        assert!(tool.status().is_idle());
        assert!(editor.project.container.layer(LayerKind::Working).is_empty());
        assert!(editor.project.container.layer(LayerKind::Helper).is_empty());
    }
}
