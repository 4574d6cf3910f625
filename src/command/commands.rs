use std::collections::HashSet;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{CommandError, CommandResult};
use crate::geometry::PointId;
use crate::project::Project;
use crate::shape::{Movable, ShapeId};

/// The exact set of points and shapes a move applies to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoveTarget {
    /// Shapes moved through their own move, honoring connector ownership
    pub shapes: Vec<ShapeId>,
    /// Points translated directly
    pub points: Vec<PointId>,
}

impl MoveTarget {
    pub fn points(points: Vec<PointId>) -> Self {
        Self {
            shapes: Vec::new(),
            points,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty() && self.points.is_empty()
    }

    /// Translate the target by (dx, dy)
    ///
    /// Shapes move first and share one moved set, so a point shared by
    /// several targets is displaced once. Listed points not yet moved by a
    /// shape are translated directly.
    pub fn apply(&self, project: &mut Project, dx: f64, dy: f64) -> CommandResult {
        let Project {
            points, container, ..
        } = project;

        let mut moved = HashSet::new();
        for &id in &self.shapes {
            let shape = container
                .find_shape_mut(id)
                .ok_or(CommandError::ShapeNotFound(id))?;
            shape.move_by(points, &mut moved, dx, dy);
        }
        for &p in &self.points {
            if moved.insert(p) {
                points.translate(p, dx, dy);
                container.touch_point(p);
            }
        }
        Ok(())
    }
}

/// State variants recorded in the history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Translate a set of points and shapes by a delta
    Move { target: MoveTarget, dx: f64, dy: f64 },
}

impl Command {
    /// Apply this state variant to the project
    pub fn execute(&self, project: &mut Project) -> CommandResult {
        match self {
            Command::Move { target, dx, dy } => {
                debug!(
                    "move {} shapes and {} points by ({dx}, {dy})",
                    target.shapes.len(),
                    target.points.len()
                );
                target.apply(project, *dx, *dy)
            }
        }
    }

    /// The command that undoes this one
    pub fn inverse(&self) -> Command {
        match self {
            Command::Move { target, dx, dy } => Command::Move {
                target: target.clone(),
                dx: -dx,
                dy: -dy,
            },
        }
    }
}
