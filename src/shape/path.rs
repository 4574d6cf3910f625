use serde::{Deserialize, Serialize};

use super::{Connectable, HasPoints};
use crate::geometry::PointId;
use crate::path::PathGeometry;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathShape {
    pub geometry: PathGeometry,
}

impl PathShape {
    pub fn new(geometry: PathGeometry) -> Self {
        Self { geometry }
    }
}

impl HasPoints for PathShape {
    fn points(&self) -> Box<dyn Iterator<Item = PointId> + '_> {
        Box::new(self.geometry.points())
    }

    fn point_refs_mut(&mut self) -> Vec<&mut PointId> {
        self.geometry.point_refs_mut()
    }
}

impl Connectable for PathShape {}
