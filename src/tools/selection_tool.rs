use kurbo::{Point, Rect};
use log::{debug, info, warn};

use super::helpers;
use super::{InputArgs, Tool, ToolStatus};
use crate::command::{Command, MoveTarget};
use crate::config::MoveMode;
use crate::editor::Editor;
use crate::error::ToolResult;
use crate::geometry::{hit_testing, PointId};
use crate::layer::LayerKind;
use crate::project::Project;
use crate::selection::Selection;
use crate::shape::{factory, ShapeId};
use crate::style::ShapeStyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    None,
    Selected,
}

/// The gesture in progress while the button is held
#[derive(Debug)]
enum Drag {
    Move {
        target: MoveTarget,
        start: (f64, f64),
        last: (f64, f64),
    },
    Rectangle {
        shape: ShapeId,
        top_left: PointId,
        bottom_right: PointId,
    },
}

/// Click to select and drag to move; drag on empty space for a rubber band
#[derive(Debug, Default)]
pub struct SelectionTool {
    state: SelectionState,
    drag: Option<Drag>,
}

/// Whether a drag may move `point` directly
///
/// Locked points never move. A connector only moves with its owner, so it is
/// skipped when shapes are selected and its owner is not one of them.
fn is_movable(project: &Project, selection: &Selection, point: PointId) -> bool {
    let Some(p) = project.points.get(point) else {
        return false;
    };
    if p.is_locked() {
        return false;
    }
    match p.owner {
        Some(owner) if p.is_connector() => {
            selection.shapes.is_empty() || selection.contains_shape(owner)
        }
        _ => true,
    }
}

/// The exact set a drag will translate, fixed when the drag starts
fn movable_target(editor: &dyn Editor) -> MoveTarget {
    let selection = editor.selection();
    let project = editor.project();

    let mut points: Vec<PointId> = selection
        .points
        .iter()
        .copied()
        .filter(|&p| is_movable(project, selection, p))
        .collect();
    points.sort();

    match editor.options().move_mode {
        MoveMode::Point => MoveTarget::points(points),
        MoveMode::Shape => {
            let mut shapes: Vec<ShapeId> = selection
                .shapes
                .iter()
                .copied()
                .filter(|&id| project.find_shape(id).is_some_and(|s| !s.is_locked()))
                .collect();
            shapes.sort();
            // A point picked on its own has no shape to move it
            let points = if shapes.is_empty() { points } else { Vec::new() };
            MoveTarget { shapes, points }
        }
    }
}

impl SelectionTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn is_moving(&self) -> bool {
        matches!(self.drag, Some(Drag::Move { .. }))
    }

    /// Whether (x, y) lands on something already selected
    fn hits_selection(editor: &dyn Editor, x: f64, y: f64) -> bool {
        let selection = editor.selection();
        if selection.is_empty() {
            return false;
        }
        let project = editor.project();
        let shapes = project.container.layer(LayerKind::Current).shapes();
        let position = Point::new(x, y);
        let threshold = editor.options().hit_threshold;

        hit_testing::find_point(shapes, &project.points, position, threshold)
            .is_some_and(|p| selection.contains_point(p))
            || hit_testing::find_shape(shapes, &project.points, position, threshold)
                .is_some_and(|s| selection.contains_shape(s.id()))
    }

    fn begin_rectangle(&mut self, editor: &mut dyn Editor, x: f64, y: f64) {
        let top_left = helpers::new_point(editor, x, y);
        let bottom_right = helpers::new_point(editor, x, y);
        let mut rect = factory::create_rectangle(editor.options(), top_left, bottom_right);
        rect.base.style = ShapeStyle::helper();
        rect.base.is_filled = false;
        let shape = rect.id();
        editor.project_mut().add_shape(LayerKind::Helper, rect);
        self.drag = Some(Drag::Rectangle {
            shape,
            top_left,
            bottom_right,
        });
    }

    /// Drop the gesture, putting moved points back where they started
    fn abort(&mut self, editor: &mut dyn Editor) -> ToolResult<()> {
        self.state = SelectionState::None;
        match self.drag.take() {
            Some(Drag::Move {
                target,
                start,
                last,
            }) => {
                let (dx, dy) = (start.0 - last.0, start.1 - last.1);
                if dx != 0.0 || dy != 0.0 {
                    target.apply(editor.project_mut(), dx, dy)?;
                    editor.project_mut().invalidate(LayerKind::Current);
                }
            }
            Some(Drag::Rectangle { shape, .. }) => {
                editor.project_mut().remove_shape(LayerKind::Helper, shape);
            }
            None => {}
        }
        Ok(())
    }
}

impl Tool for SelectionTool {
    fn name(&self) -> &'static str {
        "Selection"
    }

    fn current_state_name(&self) -> &'static str {
        match self.state {
            SelectionState::None => "None",
            SelectionState::Selected => "Selected",
        }
    }

    fn status(&self) -> ToolStatus {
        match self.state {
            SelectionState::None => ToolStatus::Idle,
            SelectionState::Selected => ToolStatus::Busy,
        }
    }

    fn left_down(&mut self, editor: &mut dyn Editor, args: InputArgs) -> ToolResult {
        if self.state == SelectionState::Selected {
            return Ok(ToolStatus::Busy);
        }
        let (x, y) = editor.try_to_snap(&args);
        editor.dehover(LayerKind::Current);

        // Drag the existing selection, else select under the cursor, else rubber band
        if Self::hits_selection(editor, x, y)
            || editor.try_to_select_shape(LayerKind::Current, x, y)
        {
            let target = movable_target(editor);
            debug!(
                "drag {} shapes and {} points",
                target.shapes.len(),
                target.points.len()
            );
            self.drag = Some(Drag::Move {
                target,
                start: (x, y),
                last: (x, y),
            });
        } else {
            self.begin_rectangle(editor, x, y);
        }
        self.state = SelectionState::Selected;
        Ok(ToolStatus::Busy)
    }

    fn left_up(&mut self, editor: &mut dyn Editor, args: InputArgs) -> ToolResult {
        if self.state != SelectionState::Selected {
            return Ok(ToolStatus::Idle);
        }
        self.state = SelectionState::None;
        let (x, y) = editor.try_to_snap(&args);

        match self.drag.take() {
            Some(Drag::Move { target, start, last }) => {
                let (dx, dy) = (last.0 - start.0, last.1 - start.1);
                if (dx != 0.0 || dy != 0.0) && !target.is_empty() {
                    info!("moved selection by ({dx}, {dy})");
                    let next = Command::Move { target, dx, dy };
                    editor.project_mut().snapshot(next.inverse(), next);
                }
            }
            Some(Drag::Rectangle {
                shape,
                top_left,
                bottom_right,
            }) => {
                helpers::set_position(editor, bottom_right, x, y);
                let points = &editor.project().points;
                let rect =
                    Rect::from_points(points.position(top_left), points.position(bottom_right));
                editor.project_mut().remove_shape(LayerKind::Helper, shape);
                editor.try_to_select_shapes(LayerKind::Current, rect);
            }
            None => {}
        }
        Ok(ToolStatus::Idle)
    }

    fn right_down(&mut self, editor: &mut dyn Editor, _args: InputArgs) -> ToolResult {
        match self.state {
            SelectionState::None => editor.dehover(LayerKind::Current),
            SelectionState::Selected => self.abort(editor)?,
        }
        Ok(ToolStatus::Idle)
    }

    fn pointer_move(&mut self, editor: &mut dyn Editor, args: InputArgs) -> ToolResult {
        let (x, y) = editor.try_to_snap(&args);
        match &mut self.drag {
            Some(Drag::Move { target, last, .. }) => {
                let (dx, dy) = (x - last.0, y - last.1);
                if dx != 0.0 || dy != 0.0 {
                    target.apply(editor.project_mut(), dx, dy)?;
                    *last = (x, y);
                    editor.project_mut().invalidate(LayerKind::Current);
                }
            }
            Some(Drag::Rectangle { bottom_right, .. }) => {
                helpers::set_position(editor, *bottom_right, x, y);
                editor.project_mut().invalidate(LayerKind::Helper);
            }
            None => {
                editor.try_to_hover_shape(x, y);
            }
        }
        Ok(self.status())
    }

    fn reset(&mut self, editor: &mut dyn Editor) {
        if let Err(err) = self.abort(editor) {
            warn!("selection drag could not be reverted: {err}");
        }
        editor.dehover(LayerKind::Current);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorOptions;
    use crate::editor::ProjectEditor;
    use crate::geometry::ShapeState;
    use kurbo::Point;

    fn editor(move_mode: MoveMode) -> ProjectEditor {
        ProjectEditor::new(EditorOptions {
            snap_to_grid: false,
            move_mode,
            ..EditorOptions::default()
        })
    }

    fn add_line(editor: &mut ProjectEditor, a: PointId, b: PointId) -> ShapeId {
        let line = factory::create_line(&editor.options, a, b);
        let id = line.id();
        editor.project.add_shape(LayerKind::Current, line);
        id
    }

    #[test]
    fn test_connector_stays_with_unselected_owner() {
        let mut editor = editor(MoveMode::Point);
        let a = editor.project.points.create(0.0, 0.0);
        let joint = editor.project.points.create(50.0, 0.0);
        let c = editor.project.points.create(100.0, 0.0);
        let owner = add_line(&mut editor, a, joint);
        add_line(&mut editor, joint, c);
        editor.project.points[joint].state.insert(ShapeState::CONNECTOR);
        editor.project.points[joint].owner = Some(owner);

        let mut tool = SelectionTool::new();
        tool.left_down(&mut editor, InputArgs::new(80.0, 0.0)).unwrap();
        assert!(tool.is_moving());
        tool.pointer_move(&mut editor, InputArgs::new(80.0, 20.0)).unwrap();
        tool.left_up(&mut editor, InputArgs::new(80.0, 20.0)).unwrap();

        assert_eq!(editor.project.points.position(joint), Point::new(50.0, 0.0));
        assert_eq!(editor.project.points.position(c), Point::new(100.0, 20.0));
        assert_eq!(tool.state(), SelectionState::None);
    }

    #[test]
    fn test_shape_mode_moves_shared_point_once() {
        let mut editor = editor(MoveMode::Shape);
        let a = editor.project.points.create(0.0, 0.0);
        let shared = editor.project.points.create(50.0, 0.0);
        let c = editor.project.points.create(100.0, 50.0);
        let first = add_line(&mut editor, a, shared);
        let second = add_line(&mut editor, shared, c);

        let mut tool = SelectionTool::new();
        // Rubber band around both lines
        tool.left_down(&mut editor, InputArgs::new(-10.0, -10.0)).unwrap();
        tool.left_up(&mut editor, InputArgs::new(110.0, 60.0)).unwrap();
        assert!(editor.selection.contains_shape(first));
        assert!(editor.selection.contains_shape(second));

        tool.left_down(&mut editor, InputArgs::new(25.0, 0.0)).unwrap();
        tool.pointer_move(&mut editor, InputArgs::new(35.0, 5.0)).unwrap();
        tool.left_up(&mut editor, InputArgs::new(35.0, 5.0)).unwrap();

        assert_eq!(editor.project.points.position(shared), Point::new(60.0, 5.0));
        assert_eq!(editor.project.points.position(a), Point::new(10.0, 5.0));
        assert_eq!(editor.project.history.undo_len(), 1);
    }

    #[test]
    fn test_click_without_drag_records_nothing() {
        let mut editor = editor(MoveMode::Point);
        let a = editor.project.points.create(0.0, 0.0);
        let b = editor.project.points.create(100.0, 0.0);
        add_line(&mut editor, a, b);

        let mut tool = SelectionTool::new();
        tool.left_down(&mut editor, InputArgs::new(50.0, 0.0)).unwrap();
        assert!(tool.left_up(&mut editor, InputArgs::new(50.0, 0.0)).unwrap().is_idle());
        assert!(!editor.project.history.can_undo());
        assert!(editor.selection.contains_point(a));
    }
}
