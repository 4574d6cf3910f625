use serde::{Deserialize, Serialize};

use super::{Connectable, HasPoints, Shape, ShapeId};
use crate::geometry::{PointId, PointStore, ShapeState};

/// Ordered collection of shapes plus extra connector points
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupShape {
    pub shapes: Vec<Shape>,
    pub connectors: Vec<PointId>,
}

impl GroupShape {
    /// Make `point` a connector owned by `group`, flagged as input or output
    pub fn add_connector(
        &mut self,
        store: &mut PointStore,
        group: ShapeId,
        point: PointId,
        direction: ShapeState,
    ) {
        let p = &mut store[point];
        let direction = direction & (ShapeState::INPUT | ShapeState::OUTPUT);
        p.state.insert(ShapeState::CONNECTOR | direction);
        p.owner = Some(group);
        if !self.connectors.contains(&point) {
            self.connectors.push(point);
        }
    }
}

impl HasPoints for GroupShape {
    fn points(&self) -> Box<dyn Iterator<Item = PointId> + '_> {
        Box::new(
            self.shapes
                .iter()
                .flat_map(|s| s.kind.points())
                .chain(self.connectors.iter().copied()),
        )
    }

    fn point_refs_mut(&mut self) -> Vec<&mut PointId> {
        let mut refs: Vec<&mut PointId> = self
            .shapes
            .iter_mut()
            .flat_map(|s| s.kind.point_refs_mut())
            .collect();
        refs.extend(self.connectors.iter_mut());
        refs
    }
}

impl Connectable for GroupShape {}

/// Sub-container of shapes forming one figure of a composite outline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FigureShape {
    pub shapes: Vec<Shape>,
    pub is_filled: bool,
    pub is_closed: bool,
}

impl HasPoints for FigureShape {
    fn points(&self) -> Box<dyn Iterator<Item = PointId> + '_> {
        Box::new(self.shapes.iter().flat_map(|s| s.kind.points()))
    }

    fn point_refs_mut(&mut self) -> Vec<&mut PointId> {
        self.shapes
            .iter_mut()
            .flat_map(|s| s.kind.point_refs_mut())
            .collect()
    }
}

impl Connectable for FigureShape {}
