//! Path geometry and the cursor used to build it incrementally.

mod context;
mod convert;
mod geometry;

pub use context::GeometryContext;
pub use geometry::{
    ArcSegment, CubicBezierSegment, FillRule, LineSegment, PathFigure, PathGeometry, PathSegment,
    PolyCubicBezierSegment, PolyLineSegment, PolyQuadraticBezierSegment, QuadraticBezierSegment,
    SegmentKind, SegmentType, SweepDirection,
};
