use kurbo::{Arc, BezPath, SvgArc, Vec2};

use super::geometry::{PathGeometry, PathSegment, SweepDirection};
use crate::geometry::{PointId, PointStore};

// Flattening tolerance for arcs converted to cubic curves
const ARC_TOLERANCE: f64 = 0.1;

impl PathGeometry {
    /// Convert to a kurbo path, offset by (dx, dy)
    pub fn to_bez_path(&self, points: &PointStore, dx: f64, dy: f64) -> BezPath {
        let offset = Vec2::new(dx, dy);
        let at = |id: PointId| points.position(id) + offset;

        let mut path = BezPath::new();
        for figure in &self.figures {
            let mut pen = at(figure.start_point);
            path.move_to(pen);

            for segment in &figure.segments {
                match segment {
                    PathSegment::Line(s) => {
                        pen = at(s.point);
                        path.line_to(pen);
                    }
                    PathSegment::Arc(s) => {
                        let to = at(s.point);
                        let svg = SvgArc {
                            from: pen,
                            to,
                            radii: Vec2::new(s.size.width, s.size.height),
                            x_rotation: s.rotation_angle.to_radians(),
                            large_arc: s.is_large_arc,
                            sweep: s.sweep_direction == SweepDirection::Clockwise,
                        };
                        append_arc(&mut path, &svg);
                        pen = to;
                    }
                    PathSegment::CubicBezier(s) => {
                        pen = at(s.point3);
                        path.curve_to(at(s.point1), at(s.point2), pen);
                    }
                    PathSegment::QuadraticBezier(s) => {
                        pen = at(s.point2);
                        path.quad_to(at(s.point1), pen);
                    }
                    PathSegment::PolyLine(s) => {
                        for &p in &s.points {
                            pen = at(p);
                            path.line_to(pen);
                        }
                    }
                    PathSegment::PolyCubicBezier(s) => {
                        // Trailing points that do not form a whole curve are skipped
                        for chunk in s.points.chunks_exact(3) {
                            pen = at(chunk[2]);
                            path.curve_to(at(chunk[0]), at(chunk[1]), pen);
                        }
                    }
                    PathSegment::PolyQuadraticBezier(s) => {
                        for chunk in s.points.chunks_exact(2) {
                            pen = at(chunk[1]);
                            path.quad_to(at(chunk[0]), pen);
                        }
                    }
                }
            }

            if figure.is_closed {
                path.close_path();
            }
        }
        path
    }
}

fn append_arc(path: &mut BezPath, svg: &SvgArc) {
    match Arc::from_svg_arc(svg) {
        Some(arc) => {
            for element in arc.append_iter(ARC_TOLERANCE) {
                path.push(element);
            }
        }
        // Degenerate arcs (zero radius or coincident ends) are drawn as lines
        None => path.line_to(svg.to),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::PathSize;
    use crate::path::GeometryContext;
    use kurbo::{ParamCurve, PathEl, Point, Shape};

    #[test]
    fn test_closed_line_figure() {
        let mut store = PointStore::new();
        let a = store.create(0.0, 0.0);
        let b = store.create(10.0, 0.0);
        let c = store.create(10.0, 10.0);
        let mut geometry = PathGeometry::default();
        let mut ctx = GeometryContext::new(&mut geometry);
        ctx.begin_figure(a, true, true);
        ctx.poly_line_to(vec![b, c], true, false).unwrap();

        let path = geometry.to_bez_path(&store, 5.0, 5.0);
        let elements = path.elements();
        assert_eq!(elements.len(), 4);
        assert_eq!(elements[0], PathEl::MoveTo(Point::new(5.0, 5.0)));
        assert_eq!(elements[2], PathEl::LineTo(Point::new(15.0, 15.0)));
        assert_eq!(elements[3], PathEl::ClosePath);
    }

    #[test]
    fn test_arc_segment_ends_at_its_point() {
        let mut store = PointStore::new();
        let a = store.create(0.0, 0.0);
        let b = store.create(20.0, 0.0);
        let mut geometry = PathGeometry::default();
        let mut ctx = GeometryContext::new(&mut geometry);
        ctx.begin_figure(a, false, false);
        ctx.arc_to(b, PathSize::new(10.0, 10.0), 0.0, false, SweepDirection::Clockwise, true, false)
            .unwrap();

        let path = geometry.to_bez_path(&store, 0.0, 0.0);
        let end = path.segments().last().unwrap().end();
        assert!((end - Point::new(20.0, 0.0)).hypot() < 1e-6);
        assert!(path.bounding_box().height() > 9.0);
    }

    #[test]
    fn test_degenerate_arc_becomes_line() {
        let mut store = PointStore::new();
        let a = store.create(0.0, 0.0);
        let b = store.create(20.0, 0.0);
        let mut geometry = PathGeometry::default();
        let mut ctx = GeometryContext::new(&mut geometry);
        ctx.begin_figure(a, false, false);
        ctx.arc_to(b, PathSize::new(0.0, 0.0), 0.0, false, SweepDirection::Clockwise, true, false)
            .unwrap();

        let path = geometry.to_bez_path(&store, 0.0, 0.0);
        assert_eq!(path.elements()[1], PathEl::LineTo(Point::new(20.0, 0.0)));
    }
}
