use kurbo::{Arc, CubicBez, Point, QuadBez, Rect, Vec2};
use serde::{Deserialize, Serialize};

use super::{Connectable, HasPoints};
use crate::geometry::{PointId, PointStore};

/// Elliptical arc
///
/// `point1` and `point2` span the bounding box of the ellipse. The arc runs
/// from the ray through `point3` to the ray through `point4`, both measured
/// from the ellipse center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcShape {
    pub point1: PointId,
    pub point2: PointId,
    pub point3: PointId,
    pub point4: PointId,
}

impl ArcShape {
    pub fn bounds(&self, store: &PointStore) -> Rect {
        Rect::from_points(store.position(self.point1), store.position(self.point2))
    }

    /// The arc in kurbo terms, offset by (dx, dy)
    pub fn to_arc(&self, store: &PointStore, dx: f64, dy: f64) -> Arc {
        let rect = self.bounds(store);
        let center = rect.center();
        let angle_to = |id: PointId| {
            let v = store.position(id) - center;
            v.y.atan2(v.x)
        };
        let start_angle = angle_to(self.point3);
        let mut sweep_angle = angle_to(self.point4) - start_angle;
        if sweep_angle <= 0.0 {
            sweep_angle += std::f64::consts::TAU;
        }
        Arc {
            center: center + Vec2::new(dx, dy),
            radii: Vec2::new(rect.width() / 2.0, rect.height() / 2.0),
            start_angle,
            sweep_angle,
            x_rotation: 0.0,
        }
    }
}

impl HasPoints for ArcShape {
    fn points(&self) -> Box<dyn Iterator<Item = PointId> + '_> {
        Box::new([self.point1, self.point2, self.point3, self.point4].into_iter())
    }

    fn point_refs_mut(&mut self) -> Vec<&mut PointId> {
        vec![
            &mut self.point1,
            &mut self.point2,
            &mut self.point3,
            &mut self.point4,
        ]
    }
}

impl Connectable for ArcShape {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CubicBezierShape {
    pub point1: PointId,
    pub point2: PointId,
    pub point3: PointId,
    pub point4: PointId,
}

impl CubicBezierShape {
    pub fn to_cubic(&self, store: &PointStore, dx: f64, dy: f64) -> CubicBez {
        let at = |id: PointId| offset(store.position(id), dx, dy);
        CubicBez::new(at(self.point1), at(self.point2), at(self.point3), at(self.point4))
    }
}

impl HasPoints for CubicBezierShape {
    fn points(&self) -> Box<dyn Iterator<Item = PointId> + '_> {
        Box::new([self.point1, self.point2, self.point3, self.point4].into_iter())
    }

    fn point_refs_mut(&mut self) -> Vec<&mut PointId> {
        vec![
            &mut self.point1,
            &mut self.point2,
            &mut self.point3,
            &mut self.point4,
        ]
    }
}

impl Connectable for CubicBezierShape {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuadraticBezierShape {
    pub point1: PointId,
    pub point2: PointId,
    pub point3: PointId,
}

impl QuadraticBezierShape {
    pub fn to_quad(&self, store: &PointStore, dx: f64, dy: f64) -> QuadBez {
        let at = |id: PointId| offset(store.position(id), dx, dy);
        QuadBez::new(at(self.point1), at(self.point2), at(self.point3))
    }
}

impl HasPoints for QuadraticBezierShape {
    fn points(&self) -> Box<dyn Iterator<Item = PointId> + '_> {
        Box::new([self.point1, self.point2, self.point3].into_iter())
    }

    fn point_refs_mut(&mut self) -> Vec<&mut PointId> {
        vec![&mut self.point1, &mut self.point2, &mut self.point3]
    }
}

impl Connectable for QuadraticBezierShape {}

fn offset(p: Point, dx: f64, dy: f64) -> Point {
    Point::new(p.x + dx, p.y + dy)
}
