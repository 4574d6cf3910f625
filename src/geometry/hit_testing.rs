//! Bounds and hit-testing over shapes whose points live in a [`PointStore`].

use kurbo::{
    Ellipse, Line, ParamCurve, ParamCurveExtrema, ParamCurveNearest, PathSeg, Point, Rect,
    Shape as _,
};

use super::{PointId, PointStore};
use crate::shape::{HasPoints, Shape, ShapeId, ShapeKind};

/// Pick radius used when no option overrides it
pub const DEFAULT_HIT_THRESHOLD: f64 = 7.0;

// Accuracy passed to kurbo's nearest-point and flattening routines
const CURVE_ACCURACY: f64 = 0.1;

/// Distance from a point to a line segment
pub fn distance_to_line_segment(point: Point, line_start: Point, line_end: Point) -> f64 {
    let line_vec = line_end - line_start;
    let point_vec = point - line_start;

    let line_len = line_vec.hypot();
    if line_len == 0.0 {
        return point_vec.hypot();
    }

    let t = (point_vec.dot(line_vec) / line_len).clamp(0.0, line_len);
    let projection = line_start + line_vec * (t / line_len);
    (point - projection).hypot()
}

/// Bounding box of a set of points, grown by `padding`
pub fn calculate_bounds(points: &[Point], padding: f64) -> Option<Rect> {
    let (first, rest) = points.split_first()?;
    let rect = rest
        .iter()
        .fold(Rect::from_points(*first, *first), |rect, p| rect.union_pt(*p));
    Some(rect.inflate(padding, padding))
}

/// Axis-aligned bounds of a shape, `None` for an empty group or path
pub fn shape_bounds(shape: &Shape, store: &PointStore) -> Option<Rect> {
    match &shape.kind {
        ShapeKind::Point(p) => calculate_bounds(&[store.position(*p)], 0.0),
        ShapeKind::Line(line) => {
            calculate_bounds(&[store.position(line.start), store.position(line.end)], 0.0)
        }
        ShapeKind::Arc(arc) => Some(arc.to_arc(store, 0.0, 0.0).bounding_box()),
        ShapeKind::CubicBezier(cubic) => {
            let cubic = cubic.to_cubic(store, 0.0, 0.0);
            Some(ParamCurveExtrema::bounding_box(&cubic))
        }
        ShapeKind::QuadraticBezier(quad) => {
            let quad = quad.to_quad(store, 0.0, 0.0);
            Some(ParamCurveExtrema::bounding_box(&quad))
        }
        ShapeKind::Rectangle(b) | ShapeKind::Ellipse(b) => Some(b.rect(store)),
        ShapeKind::Text(t) => Some(t.bounds.rect(store)),
        ShapeKind::Image(i) => Some(i.bounds.rect(store)),
        ShapeKind::Path(path) => {
            if path.geometry.figures.is_empty() {
                return None;
            }
            Some(path.geometry.to_bez_path(store, 0.0, 0.0).bounding_box())
        }
        ShapeKind::Group(_) | ShapeKind::Figure(_) => shape
            .children()
            .iter()
            .filter_map(|child| shape_bounds(child, store))
            .reduce(|a, b| a.union(b)),
    }
}

fn near_segments(segments: impl Iterator<Item = PathSeg>, point: Point, threshold: f64) -> bool {
    let threshold_sq = threshold * threshold;
    segments
        .map(|seg| seg.nearest(point, CURVE_ACCURACY).distance_sq)
        .any(|distance_sq| distance_sq <= threshold_sq)
}

/// Whether `point` hits the shape within `threshold`
pub fn contains(shape: &Shape, store: &PointStore, point: Point, threshold: f64) -> bool {
    match &shape.kind {
        ShapeKind::Point(p) => store.position(*p).distance(point) <= threshold,
        ShapeKind::Line(line) => {
            distance_to_line_segment(point, store.position(line.start), store.position(line.end))
                <= threshold
        }
        ShapeKind::Arc(arc) => {
            let arc = arc.to_arc(store, 0.0, 0.0);
            near_segments(arc.path_segments(CURVE_ACCURACY), point, threshold)
        }
        ShapeKind::CubicBezier(cubic) => {
            let seg = PathSeg::Cubic(cubic.to_cubic(store, 0.0, 0.0));
            near_segments(std::iter::once(seg), point, threshold)
        }
        ShapeKind::QuadraticBezier(quad) => {
            let seg = PathSeg::Quad(quad.to_quad(store, 0.0, 0.0));
            near_segments(std::iter::once(seg), point, threshold)
        }
        ShapeKind::Rectangle(b) => b.rect(store).inflate(threshold, threshold).contains(point),
        ShapeKind::Text(t) => t.bounds.rect(store).inflate(threshold, threshold).contains(point),
        ShapeKind::Image(i) => i.bounds.rect(store).inflate(threshold, threshold).contains(point),
        ShapeKind::Ellipse(b) => {
            let rect = b.rect(store);
            let center = rect.center();
            let rx = rect.width() / 2.0 + threshold;
            let ry = rect.height() / 2.0 + threshold;
            if rx <= 0.0 || ry <= 0.0 {
                return false;
            }
            let nx = (point.x - center.x) / rx;
            let ny = (point.y - center.y) / ry;
            nx * nx + ny * ny <= 1.0
        }
        ShapeKind::Path(path) => {
            let bez = path.geometry.to_bez_path(store, 0.0, 0.0);
            near_segments(bez.segments(), point, threshold)
                || (shape.base.is_filled && bez.contains(point))
        }
        ShapeKind::Group(_) | ShapeKind::Figure(_) => shape
            .children()
            .iter()
            .any(|child| contains(child, store, point, threshold)),
    }
}

// Inclusive on every edge, so a zero-size rectangle still holds its corner
fn rect_holds(rect: Rect, point: Point) -> bool {
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

fn rect_edges(rect: Rect) -> impl Iterator<Item = Line> {
    let corners = [
        Point::new(rect.x0, rect.y0),
        Point::new(rect.x1, rect.y0),
        Point::new(rect.x1, rect.y1),
        Point::new(rect.x0, rect.y1),
    ];
    (0..4)
        .map(move |i| Line::new(corners[i], corners[(i + 1) % 4]))
        .filter(|edge| edge.p0 != edge.p1)
}

/// A segment touches `rect` when an end lies inside or it crosses an edge
fn segments_touch_rect(mut segments: impl Iterator<Item = PathSeg>, rect: Rect) -> bool {
    segments.any(|seg| {
        rect_holds(rect, seg.start())
            || rect_holds(rect, seg.end())
            || rect_edges(rect).any(|edge| !seg.intersect_line(edge).is_empty())
    })
}

/// Whether the shape's outline touches `rect`; filled shapes also count
/// when the rectangle sits inside them
pub fn intersects_rect(shape: &Shape, store: &PointStore, rect: Rect) -> bool {
    let rect = rect.abs();
    let Some(bounds) = shape_bounds(shape, store) else {
        return false;
    };
    let overlaps = bounds.x0 <= rect.x1
        && bounds.x1 >= rect.x0
        && bounds.y0 <= rect.y1
        && bounds.y1 >= rect.y0;
    if !overlaps {
        return false;
    }

    match &shape.kind {
        ShapeKind::Point(p) => rect_holds(rect, store.position(*p)),
        ShapeKind::Line(line) => {
            let (start, end) = (store.position(line.start), store.position(line.end));
            let seg = PathSeg::Line(Line::new(start, end));
            segments_touch_rect(std::iter::once(seg), rect)
        }
        ShapeKind::Arc(arc) => {
            let arc = arc.to_arc(store, 0.0, 0.0);
            segments_touch_rect(arc.path_segments(CURVE_ACCURACY), rect)
        }
        ShapeKind::CubicBezier(cubic) => {
            let seg = PathSeg::Cubic(cubic.to_cubic(store, 0.0, 0.0));
            segments_touch_rect(std::iter::once(seg), rect)
        }
        ShapeKind::QuadraticBezier(quad) => {
            let seg = PathSeg::Quad(quad.to_quad(store, 0.0, 0.0));
            segments_touch_rect(std::iter::once(seg), rect)
        }
        ShapeKind::Rectangle(_) | ShapeKind::Text(_) | ShapeKind::Image(_) => true,
        ShapeKind::Ellipse(b) => {
            let ellipse = Ellipse::from_rect(b.rect(store));
            segments_touch_rect(ellipse.path_segments(CURVE_ACCURACY), rect)
                || (shape.base.is_filled && ellipse.contains(rect.center()))
        }
        ShapeKind::Path(path) => {
            let bez = path.geometry.to_bez_path(store, 0.0, 0.0);
            segments_touch_rect(bez.segments(), rect)
                || (shape.base.is_filled && bez.contains(rect.center()))
        }
        ShapeKind::Group(_) | ShapeKind::Figure(_) => shape
            .children()
            .iter()
            .any(|child| intersects_rect(child, store, rect)),
    }
}

/// Topmost point of any visible shape within `threshold` of `point`
pub fn find_point(
    shapes: &[Shape],
    store: &PointStore,
    point: Point,
    threshold: f64,
) -> Option<PointId> {
    shapes
        .iter()
        .rev()
        .filter(|s| s.is_visible())
        .flat_map(|s| s.points())
        .find(|&p| store.position(p).distance(point) <= threshold)
}

/// Topmost visible shape hit by `point`
pub fn find_shape<'a>(
    shapes: &'a [Shape],
    store: &PointStore,
    point: Point,
    threshold: f64,
) -> Option<&'a Shape> {
    shapes
        .iter()
        .rev()
        .filter(|s| s.is_visible())
        .find(|s| contains(s, store, point, threshold))
}

/// Visible shapes touching `rect`, in drawing order
pub fn find_shapes_in_rect(shapes: &[Shape], store: &PointStore, rect: Rect) -> Vec<ShapeId> {
    shapes
        .iter()
        .filter(|s| s.is_visible() && intersects_rect(s, store, rect))
        .map(|s| s.id())
        .collect()
}
