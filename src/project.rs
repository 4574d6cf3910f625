use log::{debug, info};

use crate::command::{Command, History};
use crate::error::{CommandError, CommandResult};
use crate::event::{EditorEvent, EventBus, EventHandler};
use crate::geometry::PointStore;
use crate::layer::{Container, LayerKind};
use crate::shape::{Shape, ShapeId};

/// Everything the tools edit: the point arena, the layers and the history
#[derive(Debug, Default)]
pub struct Project {
    pub points: PointStore,
    pub container: Container,
    pub history: History,
    events: EventBus,
}

impl Project {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for layer invalidation and history events
    pub fn subscribe(&self, handler: impl EventHandler + 'static) {
        self.events.subscribe(Box::new(handler));
    }

    /// Bump the layer's version and notify subscribers
    ///
    /// Redundant calls are harmless: each one just produces a new version.
    pub fn invalidate(&mut self, layer: LayerKind) {
        let version = self.container.layer_mut(layer).invalidate();
        self.events
            .emit(EditorEvent::LayerInvalidated { layer, version });
    }

    /// Add a shape on top of a layer
    pub fn add_shape(&mut self, layer: LayerKind, shape: Shape) {
        let id = shape.id();
        debug!("add {} {} to {} layer", shape.kind_name(), id, layer);
        self.container.layer_mut(layer).add_shape(shape);
        self.invalidate(layer);
        if layer == LayerKind::Current {
            self.events.emit(EditorEvent::ShapeCommitted { shape: id });
        }
    }

    /// Remove a top-level shape from a layer
    pub fn remove_shape(&mut self, layer: LayerKind, id: ShapeId) -> Option<Shape> {
        let shape = self.container.layer_mut(layer).remove_shape(id)?;
        self.invalidate(layer);
        Some(shape)
    }

    /// Move a shape from the working layer into the current layer
    ///
    /// Returns false when the shape is no longer in the working layer.
    pub fn commit_working_shape(&mut self, id: ShapeId) -> bool {
        let Some(shape) = self.remove_shape(LayerKind::Working, id) else {
            return false;
        };
        info!("commit {} {}", shape.kind_name(), id);
        self.add_shape(LayerKind::Current, shape);
        true
    }

    pub fn find_shape(&self, id: ShapeId) -> Option<&Shape> {
        self.container.find_shape(id)
    }

    pub fn find_shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.container.find_shape_mut(id)
    }

    /// Record one undo/redo unit; the change itself is already applied
    pub fn snapshot(&mut self, previous: Command, next: Command) {
        self.history.snapshot(previous, next);
        self.history_changed();
    }

    /// Re-apply the previous state of the most recent snapshot
    pub fn undo(&mut self) -> CommandResult {
        let snapshot = self.history.pop_undo().ok_or(CommandError::NothingToUndo)?;
        let result = snapshot.previous.execute(self);
        self.history.push_undone(snapshot);
        self.after_history_step();
        result
    }

    /// Re-apply the next state of the most recently undone snapshot
    pub fn redo(&mut self) -> CommandResult {
        let snapshot = self.history.pop_redo().ok_or(CommandError::NothingToRedo)?;
        let result = snapshot.next.execute(self);
        self.history.push_redone(snapshot);
        self.after_history_step();
        result
    }

    fn after_history_step(&mut self) {
        self.invalidate(LayerKind::Current);
        self.invalidate(LayerKind::Working);
        self.history_changed();
    }

    fn history_changed(&self) {
        self.events.emit(EditorEvent::HistoryChanged {
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
        });
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::command::MoveTarget;
    use crate::config::EditorOptions;
    use crate::shape::factory;

    #[test]
    fn test_commit_moves_shape_between_layers() {
        let mut project = Project::new();
        let options = EditorOptions::default();
        let a = project.points.create(0.0, 0.0);
        let b = project.points.create(5.0, 5.0);
        let line = factory::create_line(&options, a, b);
        let id = line.id();

        project.add_shape(LayerKind::Working, line);
        assert!(project.commit_working_shape(id));
        assert!(!project.commit_working_shape(id));
        assert!(project.container.layer(LayerKind::Working).is_empty());
        assert!(project.container.layer(LayerKind::Current).contains(id));
    }

    #[test]
    fn test_undo_redo_events() {
        let mut project = Project::new();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        project.subscribe(move |event: &EditorEvent| {
            if let EditorEvent::HistoryChanged { can_undo, can_redo } = event {
                sink.borrow_mut().push((*can_undo, *can_redo));
            }
        });

        let p = project.points.create(1.0, 1.0);
        let next = Command::Move {
            target: MoveTarget::points(vec![p]),
            dx: 2.0,
            dy: 3.0,
        };
        next.execute(&mut project).unwrap();
        project.snapshot(next.inverse(), next);

        project.undo().unwrap();
        assert_eq!(project.points.position(p), kurbo::Point::new(1.0, 1.0));
        project.redo().unwrap();
        assert_eq!(project.points.position(p), kurbo::Point::new(3.0, 4.0));
        assert_eq!(project.redo(), Err(CommandError::NothingToRedo));

        assert_eq!(
            *events.borrow(),
            vec![(true, false), (false, true), (true, false)]
        );
    }
}
