use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::geometry::{PathSize, PointId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FillRule {
    #[default]
    EvenOdd,
    Nonzero,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SweepDirection {
    #[default]
    Clockwise,
    Counterclockwise,
}

/// Runtime tag of a [`PathSegment`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentKind {
    Line,
    Arc,
    CubicBezier,
    QuadraticBezier,
    PolyLine,
    PolyCubicBezier,
    PolyQuadraticBezier,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub point: PointId,
    pub is_stroked: bool,
    pub is_smooth_join: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcSegment {
    pub point: PointId,
    pub size: PathSize,
    pub rotation_angle: f64,
    pub is_large_arc: bool,
    pub sweep_direction: SweepDirection,
    pub is_stroked: bool,
    pub is_smooth_join: bool,
}

/// Cubic curve; `point3` is the end point, the others are control points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CubicBezierSegment {
    pub point1: PointId,
    pub point2: PointId,
    pub point3: PointId,
    pub is_stroked: bool,
    pub is_smooth_join: bool,
}

/// Quadratic curve; `point2` is the end point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuadraticBezierSegment {
    pub point1: PointId,
    pub point2: PointId,
    pub is_stroked: bool,
    pub is_smooth_join: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolyLineSegment {
    pub points: Vec<PointId>,
    pub is_stroked: bool,
    pub is_smooth_join: bool,
}

/// Consecutive cubic curves, three points per curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolyCubicBezierSegment {
    pub points: Vec<PointId>,
    pub is_stroked: bool,
    pub is_smooth_join: bool,
}

/// Consecutive quadratic curves, two points per curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolyQuadraticBezierSegment {
    pub points: Vec<PointId>,
    pub is_stroked: bool,
    pub is_smooth_join: bool,
}

/// One drawing primitive within a figure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PathSegment {
    Line(LineSegment),
    Arc(ArcSegment),
    CubicBezier(CubicBezierSegment),
    QuadraticBezier(QuadraticBezierSegment),
    PolyLine(PolyLineSegment),
    PolyCubicBezier(PolyCubicBezierSegment),
    PolyQuadraticBezier(PolyQuadraticBezierSegment),
}

impl PathSegment {
    pub fn kind(&self) -> SegmentKind {
        match self {
            PathSegment::Line(_) => SegmentKind::Line,
            PathSegment::Arc(_) => SegmentKind::Arc,
            PathSegment::CubicBezier(_) => SegmentKind::CubicBezier,
            PathSegment::QuadraticBezier(_) => SegmentKind::QuadraticBezier,
            PathSegment::PolyLine(_) => SegmentKind::PolyLine,
            PathSegment::PolyCubicBezier(_) => SegmentKind::PolyCubicBezier,
            PathSegment::PolyQuadraticBezier(_) => SegmentKind::PolyQuadraticBezier,
        }
    }

    /// Points referenced by this segment, in drawing order
    pub fn points(&self) -> Vec<PointId> {
        match self {
            PathSegment::Line(s) => vec![s.point],
            PathSegment::Arc(s) => vec![s.point],
            PathSegment::CubicBezier(s) => vec![s.point1, s.point2, s.point3],
            PathSegment::QuadraticBezier(s) => vec![s.point1, s.point2],
            PathSegment::PolyLine(s) => s.points.clone(),
            PathSegment::PolyCubicBezier(s) => s.points.clone(),
            PathSegment::PolyQuadraticBezier(s) => s.points.clone(),
        }
    }

    pub(crate) fn point_refs_mut(&mut self) -> Vec<&mut PointId> {
        match self {
            PathSegment::Line(s) => vec![&mut s.point],
            PathSegment::Arc(s) => vec![&mut s.point],
            PathSegment::CubicBezier(s) => vec![&mut s.point1, &mut s.point2, &mut s.point3],
            PathSegment::QuadraticBezier(s) => vec![&mut s.point1, &mut s.point2],
            PathSegment::PolyLine(s) => s.points.iter_mut().collect(),
            PathSegment::PolyCubicBezier(s) => s.points.iter_mut().collect(),
            PathSegment::PolyQuadraticBezier(s) => s.points.iter_mut().collect(),
        }
    }

    /// Terminal point of the segment, where the pen ends up after drawing it
    pub fn last_point(&self) -> Option<PointId> {
        match self {
            PathSegment::Line(s) => Some(s.point),
            PathSegment::Arc(s) => Some(s.point),
            PathSegment::CubicBezier(s) => Some(s.point3),
            PathSegment::QuadraticBezier(s) => Some(s.point2),
            PathSegment::PolyLine(s) => s.points.last().copied(),
            PathSegment::PolyCubicBezier(s) => s.points.last().copied(),
            PathSegment::PolyQuadraticBezier(s) => s.points.last().copied(),
        }
    }

    pub fn is_stroked(&self) -> bool {
        match self {
            PathSegment::Line(s) => s.is_stroked,
            PathSegment::Arc(s) => s.is_stroked,
            PathSegment::CubicBezier(s) => s.is_stroked,
            PathSegment::QuadraticBezier(s) => s.is_stroked,
            PathSegment::PolyLine(s) => s.is_stroked,
            PathSegment::PolyCubicBezier(s) => s.is_stroked,
            PathSegment::PolyQuadraticBezier(s) => s.is_stroked,
        }
    }
}

/// Typed view over a [`PathSegment`] variant
///
/// Used for type-checked removal: a segment is only removed when its runtime
/// kind matches the requested type.
pub trait SegmentType: Sized {
    const KIND: SegmentKind;

    fn extract(segment: PathSegment) -> Option<Self>;
}

macro_rules! segment_type {
    ($ty:ident, $variant:ident) => {
        impl SegmentType for $ty {
            const KIND: SegmentKind = SegmentKind::$variant;

            fn extract(segment: PathSegment) -> Option<Self> {
                match segment {
                    PathSegment::$variant(s) => Some(s),
                    _ => None,
                }
            }
        }
    };
}

segment_type!(LineSegment, Line);
segment_type!(ArcSegment, Arc);
segment_type!(CubicBezierSegment, CubicBezier);
segment_type!(QuadraticBezierSegment, QuadraticBezier);
segment_type!(PolyLineSegment, PolyLine);
segment_type!(PolyCubicBezierSegment, PolyCubicBezier);
segment_type!(PolyQuadraticBezierSegment, PolyQuadraticBezier);

/// One continuous sub-path: a start point followed by segments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathFigure {
    pub start_point: PointId,
    pub segments: Vec<PathSegment>,
    pub is_filled: bool,
    pub is_closed: bool,
}

impl PathFigure {
    pub fn new(start_point: PointId, is_filled: bool, is_closed: bool) -> Self {
        Self {
            start_point,
            segments: Vec::new(),
            is_filled,
            is_closed,
        }
    }

    pub fn points(&self) -> impl Iterator<Item = PointId> + '_ {
        std::iter::once(self.start_point).chain(self.segments.iter().flat_map(|s| s.points()))
    }

    pub(crate) fn point_refs_mut(&mut self) -> Vec<&mut PointId> {
        let mut refs = vec![&mut self.start_point];
        for segment in &mut self.segments {
            refs.extend(segment.point_refs_mut());
        }
        refs
    }

    /// Pen position after the last segment, or the start point
    pub fn last_point(&self) -> PointId {
        self.segments
            .iter()
            .rev()
            .find_map(PathSegment::last_point)
            .unwrap_or(self.start_point)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathGeometry {
    pub figures: Vec<PathFigure>,
    pub fill_rule: FillRule,
}

impl PathGeometry {
    pub fn new(fill_rule: FillRule) -> Self {
        Self {
            figures: Vec::new(),
            fill_rule,
        }
    }

    pub fn points(&self) -> impl Iterator<Item = PointId> + '_ {
        self.figures.iter().flat_map(PathFigure::points)
    }

    pub(crate) fn point_refs_mut(&mut self) -> Vec<&mut PointId> {
        self.figures
            .iter_mut()
            .flat_map(PathFigure::point_refs_mut)
            .collect()
    }

    pub fn segment_count(&self) -> usize {
        self.figures.iter().map(|f| f.segments.len()).sum()
    }

    /// The current pen position
    pub fn last_path_point(&self) -> Result<PointId, GeometryError> {
        self.figures
            .last()
            .map(PathFigure::last_point)
            .ok_or(GeometryError::EmptyGeometry)
    }

    /// Remove the last segment of the last figure if it is a `T`
    ///
    /// Returns `None` and leaves the geometry untouched when the last segment
    /// has another kind or there is nothing to remove.
    pub fn remove_last_segment<T: SegmentType>(&mut self) -> Option<T> {
        let figure = self.figures.last_mut()?;
        if figure.segments.last()?.kind() != T::KIND {
            return None;
        }
        figure.segments.pop().and_then(T::extract)
    }

    /// Drop figures that have no segments
    pub fn remove_empty_figures(&mut self) {
        self.figures.retain(|f| !f.segments.is_empty());
    }
}
