use log::trace;

use super::geometry::{
    ArcSegment, CubicBezierSegment, LineSegment, PathFigure, PathGeometry, PathSegment,
    PolyCubicBezierSegment, PolyLineSegment, PolyQuadraticBezierSegment, QuadraticBezierSegment,
    SegmentType, SweepDirection,
};
use crate::error::GeometryError;
use crate::geometry::{PathSize, PointId};

/// Cursor that appends figures and segments to a [`PathGeometry`]
///
/// The last figure is always the current figure. Segment calls fail with
/// [`GeometryError::NoCurrentFigure`] until [`GeometryContext::begin_figure`]
/// has been called once.
pub struct GeometryContext<'a> {
    geometry: &'a mut PathGeometry,
}

impl<'a> GeometryContext<'a> {
    pub fn new(geometry: &'a mut PathGeometry) -> Self {
        Self { geometry }
    }

    pub fn geometry(&self) -> &PathGeometry {
        &*self.geometry
    }

    pub fn begin_figure(&mut self, start_point: PointId, is_filled: bool, is_closed: bool) {
        trace!("begin figure at {start_point}");
        self.geometry
            .figures
            .push(PathFigure::new(start_point, is_filled, is_closed));
    }

    pub fn set_closed_state(&mut self, is_closed: bool) -> Result<(), GeometryError> {
        self.current_figure()?.is_closed = is_closed;
        Ok(())
    }

    pub fn line_to(
        &mut self,
        point: PointId,
        is_stroked: bool,
        is_smooth_join: bool,
    ) -> Result<(), GeometryError> {
        self.push(PathSegment::Line(LineSegment {
            point,
            is_stroked,
            is_smooth_join,
        }))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn arc_to(
        &mut self,
        point: PointId,
        size: PathSize,
        rotation_angle: f64,
        is_large_arc: bool,
        sweep_direction: SweepDirection,
        is_stroked: bool,
        is_smooth_join: bool,
    ) -> Result<(), GeometryError> {
        self.push(PathSegment::Arc(ArcSegment {
            point,
            size,
            rotation_angle,
            is_large_arc,
            sweep_direction,
            is_stroked,
            is_smooth_join,
        }))
    }

    pub fn cubic_bezier_to(
        &mut self,
        point1: PointId,
        point2: PointId,
        point3: PointId,
        is_stroked: bool,
        is_smooth_join: bool,
    ) -> Result<(), GeometryError> {
        self.push(PathSegment::CubicBezier(CubicBezierSegment {
            point1,
            point2,
            point3,
            is_stroked,
            is_smooth_join,
        }))
    }

    pub fn quadratic_bezier_to(
        &mut self,
        point1: PointId,
        point2: PointId,
        is_stroked: bool,
        is_smooth_join: bool,
    ) -> Result<(), GeometryError> {
        self.push(PathSegment::QuadraticBezier(QuadraticBezierSegment {
            point1,
            point2,
            is_stroked,
            is_smooth_join,
        }))
    }

    pub fn poly_line_to(
        &mut self,
        points: Vec<PointId>,
        is_stroked: bool,
        is_smooth_join: bool,
    ) -> Result<(), GeometryError> {
        self.push(PathSegment::PolyLine(PolyLineSegment {
            points,
            is_stroked,
            is_smooth_join,
        }))
    }

    pub fn poly_cubic_bezier_to(
        &mut self,
        points: Vec<PointId>,
        is_stroked: bool,
        is_smooth_join: bool,
    ) -> Result<(), GeometryError> {
        self.push(PathSegment::PolyCubicBezier(PolyCubicBezierSegment {
            points,
            is_stroked,
            is_smooth_join,
        }))
    }

    pub fn poly_quadratic_bezier_to(
        &mut self,
        points: Vec<PointId>,
        is_stroked: bool,
        is_smooth_join: bool,
    ) -> Result<(), GeometryError> {
        self.push(PathSegment::PolyQuadraticBezier(PolyQuadraticBezierSegment {
            points,
            is_stroked,
            is_smooth_join,
        }))
    }

    /// See [`PathGeometry::remove_last_segment`]
    pub fn remove_last_segment<T: SegmentType>(&mut self) -> Option<T> {
        self.geometry.remove_last_segment::<T>()
    }

    pub fn last_path_point(&self) -> Result<PointId, GeometryError> {
        self.geometry.last_path_point()
    }

    /// The last segment of the current figure, for editing in place
    pub fn last_segment_mut(&mut self) -> Option<&mut PathSegment> {
        self.geometry.figures.last_mut()?.segments.last_mut()
    }

    pub fn remove_empty_figures(&mut self) {
        self.geometry.remove_empty_figures();
    }

    fn current_figure(&mut self) -> Result<&mut PathFigure, GeometryError> {
        self.geometry
            .figures
            .last_mut()
            .ok_or(GeometryError::NoCurrentFigure)
    }

    fn push(&mut self, segment: PathSegment) -> Result<(), GeometryError> {
        let figure = self.current_figure()?;
        trace!("append {:?} segment", segment.kind());
        figure.segments.push(segment);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::PointStore;
    use crate::path::FillRule;

    #[test]
    fn test_segment_before_figure_fails() {
        let mut store = PointStore::new();
        let p = store.create(1.0, 1.0);
        let mut geometry = PathGeometry::new(FillRule::EvenOdd);
        let mut ctx = GeometryContext::new(&mut geometry);

        assert_eq!(ctx.line_to(p, true, false), Err(GeometryError::NoCurrentFigure));
        assert_eq!(ctx.set_closed_state(true), Err(GeometryError::NoCurrentFigure));
        assert_eq!(ctx.last_path_point(), Err(GeometryError::EmptyGeometry));
    }

    #[test]
    fn test_last_path_point_follows_segments() {
        let mut store = PointStore::new();
        let start = store.create(0.0, 0.0);
        let c1 = store.create(1.0, 0.0);
        let c2 = store.create(2.0, 1.0);
        let end = store.create(3.0, 3.0);
        let mut geometry = PathGeometry::default();
        let mut ctx = GeometryContext::new(&mut geometry);

        ctx.begin_figure(start, false, false);
        assert_eq!(ctx.last_path_point(), Ok(start));

        ctx.cubic_bezier_to(c1, c2, end, true, false).unwrap();
        assert_eq!(ctx.last_path_point(), Ok(end));

        ctx.set_closed_state(true).unwrap();
        assert!(geometry.figures[0].is_closed);
    }

    #[test]
    fn test_segments_go_to_newest_figure() {
        let mut store = PointStore::new();
        let a = store.create(0.0, 0.0);
        let b = store.create(10.0, 0.0);
        let c = store.create(20.0, 0.0);
        let d = store.create(30.0, 0.0);
        let mut geometry = PathGeometry::default();
        let mut ctx = GeometryContext::new(&mut geometry);

        ctx.begin_figure(a, true, false);
        ctx.line_to(b, true, false).unwrap();
        ctx.begin_figure(c, true, false);
        ctx.poly_line_to(vec![d], true, false).unwrap();

        assert_eq!(geometry.figures.len(), 2);
        assert_eq!(geometry.figures[0].segments.len(), 1);
        assert_eq!(geometry.figures[1].segments.len(), 1);
        assert_eq!(geometry.last_path_point(), Ok(d));
    }
}
