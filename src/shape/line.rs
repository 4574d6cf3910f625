use serde::{Deserialize, Serialize};

use super::{Connectable, HasPoints};
use crate::geometry::PointId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineShape {
    pub start: PointId,
    pub end: PointId,
}

impl LineShape {
    pub fn new(start: PointId, end: PointId) -> Self {
        Self { start, end }
    }
}

impl HasPoints for LineShape {
    fn points(&self) -> Box<dyn Iterator<Item = PointId> + '_> {
        Box::new([self.start, self.end].into_iter())
    }

    fn point_refs_mut(&mut self) -> Vec<&mut PointId> {
        vec![&mut self.start, &mut self.end]
    }
}

impl Connectable for LineShape {
    fn can_connect(&self, point: PointId) -> bool {
        point != self.start && point != self.end
    }
}
