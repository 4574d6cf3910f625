use kurbo::{Point, Rect};
use log::debug;

use super::Editor;
use crate::config::EditorOptions;
use crate::geometry::{hit_testing, PointId, ShapeState};
use crate::layer::LayerKind;
use crate::project::Project;
use crate::selection::Selection;
use crate::shape::{factory, Connectable, ShapeId};

/// Reference host: a project plus the editor-wide options and selection
#[derive(Debug, Default)]
pub struct ProjectEditor {
    pub project: Project,
    pub options: EditorOptions,
    pub selection: Selection,
    hovered: Option<ShapeId>,
}

impl ProjectEditor {
    pub fn new(options: EditorOptions) -> Self {
        Self {
            project: Project::new(),
            options,
            selection: Selection::new(),
            hovered: None,
        }
    }

    pub fn hovered(&self) -> Option<ShapeId> {
        self.hovered
    }
}

impl Editor for ProjectEditor {
    fn project(&self) -> &Project {
        &self.project
    }

    fn project_mut(&mut self) -> &mut Project {
        &mut self.project
    }

    fn options(&self) -> &EditorOptions {
        &self.options
    }

    fn selection(&self) -> &Selection {
        &self.selection
    }

    fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }

    fn try_to_get_connection_point(&self, x: f64, y: f64) -> Option<PointId> {
        let shapes = self.project.container.layer(LayerKind::Current).shapes();
        hit_testing::find_point(
            shapes,
            &self.project.points,
            Point::new(x, y),
            self.options.hit_threshold,
        )
        .filter(|&p| !self.project.points[p].is_locked())
    }

    fn try_to_hover_shape(&mut self, x: f64, y: f64) -> bool {
        let shapes = self.project.container.layer(LayerKind::Current).shapes();
        let hit = hit_testing::find_shape(
            shapes,
            &self.project.points,
            Point::new(x, y),
            self.options.hit_threshold,
        )
        .map(|s| s.id());

        match hit {
            Some(id) => {
                if self.hovered != Some(id) {
                    self.hovered = Some(id);
                    self.project.invalidate(LayerKind::Current);
                }
                true
            }
            None => {
                self.dehover(LayerKind::Current);
                false
            }
        }
    }

    fn dehover(&mut self, layer: LayerKind) {
        if self.hovered.take().is_some() {
            self.project.invalidate(layer);
        }
    }

    fn try_to_split_line(
        &mut self,
        x: f64,
        y: f64,
        point: PointId,
        add_if_no_split: bool,
    ) -> bool {
        let position = Point::new(x, y);
        let threshold = self.options.hit_threshold;
        let project = &mut self.project;

        let hit = project
            .container
            .layer(LayerKind::Current)
            .shapes()
            .iter()
            .rev()
            .filter(|s| s.is_visible() && !s.is_locked())
            .filter_map(|s| s.as_line().map(|line| (s, line)))
            .find(|(s, line)| {
                line.start != point
                    && line.end != point
                    && hit_testing::contains(s, &project.points, position, threshold)
            })
            .map(|(s, line)| (s.id(), line.end, s.base.clone()));

        let Some((line_id, old_end, base)) = hit else {
            if add_if_no_split {
                project.add_shape(LayerKind::Current, factory::create_point_shape(point));
            }
            return false;
        };

        debug!("split line {line_id} at {point}");
        // The new point becomes a junction owned by the split line
        let junction = &mut project.points[point];
        junction.state.insert(ShapeState::CONNECTOR);
        junction.owner = Some(line_id);

        let layer = project.container.layer_mut(LayerKind::Current);
        if let Some(line) = layer.find_shape_mut(line_id) {
            line.connect(point, old_end);
        }
        let mut tail = factory::create_line(&self.options, point, old_end);
        tail.base.style = base.style;
        tail.base.is_stroked = base.is_stroked;
        tail.base.owner = base.owner;
        layer.insert_after(line_id, tail);

        project.invalidate(LayerKind::Current);
        true
    }

    fn try_to_select_shape(&mut self, layer: LayerKind, x: f64, y: f64) -> bool {
        let position = Point::new(x, y);
        let threshold = self.options.hit_threshold;
        let shapes = self.project.container.layer(layer).shapes();
        let points = &self.project.points;

        self.selection.clear();
        let selected = if let Some(point) = hit_testing::find_point(shapes, points, position, threshold)
        {
            self.selection.select_point(point);
            true
        } else if let Some(shape) = hit_testing::find_shape(shapes, points, position, threshold) {
            shape.select(&mut self.selection);
            true
        } else {
            false
        };

        self.project.invalidate(layer);
        selected
    }

    fn try_to_select_shapes(&mut self, layer: LayerKind, rect: Rect) {
        let shapes = self.project.container.layer(layer).shapes();
        let ids = hit_testing::find_shapes_in_rect(shapes, &self.project.points, rect);

        self.selection.clear();
        for shape in shapes.iter().filter(|s| ids.contains(&s.id())) {
            shape.select(&mut self.selection);
        }
        debug!("rectangle selected {} shapes", ids.len());
        self.project.invalidate(layer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::HasPoints;

    fn editor_with_line() -> (ProjectEditor, ShapeId, PointId, PointId) {
        let mut editor = ProjectEditor::new(EditorOptions::default());
        let a = editor.project.points.create(0.0, 0.0);
        let b = editor.project.points.create(100.0, 0.0);
        let line = factory::create_line(&editor.options, a, b);
        let id = line.id();
        editor.project.add_shape(LayerKind::Current, line);
        (editor, id, a, b)
    }

    #[test]
    fn test_split_line_inserts_connector() {
        let (mut editor, id, a, b) = editor_with_line();
        let p = editor.project.points.create(45.0, 0.0);

        assert!(editor.try_to_split_line(45.0, 0.0, p, false));
        let shapes = editor.project.container.layer(LayerKind::Current).shapes();
        assert_eq!(shapes.len(), 2);
        let first = shapes[0].as_line().unwrap();
        let second = shapes[1].as_line().unwrap();
        assert_eq!((first.start, first.end), (a, p));
        assert_eq!((second.start, second.end), (p, b));
        assert!(editor.project.points[p].is_connector());
        assert_eq!(editor.project.points[p].owner, Some(id));
    }

    #[test]
    fn test_split_miss_adds_point_when_asked() {
        let (mut editor, _, _, _) = editor_with_line();
        let p = editor.project.points.create(50.0, 50.0);

        assert!(!editor.try_to_split_line(50.0, 50.0, p, false));
        assert_eq!(editor.project.container.layer(LayerKind::Current).len(), 1);

        assert!(!editor.try_to_split_line(50.0, 50.0, p, true));
        let shapes = editor.project.container.layer(LayerKind::Current).shapes();
        assert_eq!(shapes.len(), 2);
        assert!(shapes[1].contains_point(p));
    }

    #[test]
    fn test_select_point_before_shape() {
        let (mut editor, id, a, _) = editor_with_line();

        assert!(editor.try_to_select_shape(LayerKind::Current, 1.0, 1.0));
        assert!(editor.selection.contains_point(a));
        assert!(!editor.selection.contains_shape(id));

        assert!(editor.try_to_select_shape(LayerKind::Current, 50.0, 2.0));
        assert!(editor.selection.contains_shape(id));

        assert!(!editor.try_to_select_shape(LayerKind::Current, 50.0, 60.0));
        assert!(editor.selection.is_empty());
    }

    #[test]
    fn test_connection_point_and_hover() {
        let (mut editor, id, _, b) = editor_with_line();
        assert_eq!(editor.try_to_get_connection_point(98.0, 3.0), Some(b));
        assert_eq!(editor.try_to_get_connection_point(50.0, 30.0), None);

        assert!(editor.try_to_hover_shape(50.0, 0.0));
        assert_eq!(editor.hovered(), Some(id));
        assert!(!editor.try_to_hover_shape(50.0, 50.0));
        assert_eq!(editor.hovered(), None);
    }
}
