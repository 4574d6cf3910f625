use kurbo::Rect;
use serde::{Deserialize, Serialize};

use super::{Connectable, HasPoints};
use crate::geometry::{PointId, PointStore};

/// Two-corner bounds shared by rectangles, ellipses, text and images
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxShape {
    pub top_left: PointId,
    pub bottom_right: PointId,
}

impl BoxShape {
    pub fn new(top_left: PointId, bottom_right: PointId) -> Self {
        Self {
            top_left,
            bottom_right,
        }
    }

    /// Normalized rectangle spanned by the two corners
    pub fn rect(&self, store: &PointStore) -> Rect {
        Rect::from_points(store.position(self.top_left), store.position(self.bottom_right))
    }
}

impl HasPoints for BoxShape {
    fn points(&self) -> Box<dyn Iterator<Item = PointId> + '_> {
        Box::new([self.top_left, self.bottom_right].into_iter())
    }

    fn point_refs_mut(&mut self) -> Vec<&mut PointId> {
        vec![&mut self.top_left, &mut self.bottom_right]
    }
}

impl Connectable for BoxShape {
    fn can_connect(&self, point: PointId) -> bool {
        point != self.top_left && point != self.bottom_right
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextShape {
    pub bounds: BoxShape,
    /// Literal text, or `{key}` to bind to a data property
    pub text: String,
}

impl HasPoints for TextShape {
    fn points(&self) -> Box<dyn Iterator<Item = PointId> + '_> {
        self.bounds.points()
    }

    fn point_refs_mut(&mut self) -> Vec<&mut PointId> {
        self.bounds.point_refs_mut()
    }
}

impl Connectable for TextShape {
    fn can_connect(&self, point: PointId) -> bool {
        self.bounds.can_connect(point)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageShape {
    pub bounds: BoxShape,
    /// Key of the image asset, resolved by the renderer
    pub key: String,
}

impl HasPoints for ImageShape {
    fn points(&self) -> Box<dyn Iterator<Item = PointId> + '_> {
        self.bounds.points()
    }

    fn point_refs_mut(&mut self) -> Vec<&mut PointId> {
        self.bounds.point_refs_mut()
    }
}

impl Connectable for ImageShape {
    fn can_connect(&self, point: PointId) -> bool {
        self.bounds.can_connect(point)
    }
}
