//! Renderer-agnostic draw dispatch.
//!
//! Backends implement [`ShapeRenderer`]; [`Shape::draw`] walks a shape and
//! calls one method per primitive with positions already resolved from the
//! point store and offset by (dx, dy).

use std::collections::BTreeMap;

use kurbo::{Affine, Arc, BezPath, CubicBez, Point, QuadBez, Rect, Vec2};

use crate::geometry::{PointId, PointStore};
use crate::path::FillRule;
use crate::shape::{Shape, ShapeKind};
use crate::style::ShapeStyle;

pub trait ShapeRenderer {
    fn push_transform(&mut self, _transform: Affine) {}
    fn pop_transform(&mut self) {}

    fn draw_point(&mut self, position: Point, style: &ShapeStyle);
    fn draw_line(&mut self, start: Point, end: Point, style: &ShapeStyle, is_stroked: bool);
    fn draw_rectangle(&mut self, rect: Rect, style: &ShapeStyle, is_stroked: bool, is_filled: bool);
    fn draw_ellipse(&mut self, rect: Rect, style: &ShapeStyle, is_stroked: bool, is_filled: bool);
    fn draw_arc(&mut self, arc: Arc, style: &ShapeStyle, is_stroked: bool, is_filled: bool);
    fn draw_cubic_bezier(
        &mut self,
        curve: CubicBez,
        style: &ShapeStyle,
        is_stroked: bool,
        is_filled: bool,
    );
    fn draw_quadratic_bezier(
        &mut self,
        curve: QuadBez,
        style: &ShapeStyle,
        is_stroked: bool,
        is_filled: bool,
    );
    fn draw_text(&mut self, rect: Rect, text: &str, style: &ShapeStyle);
    fn draw_image(&mut self, rect: Rect, key: &str, style: &ShapeStyle);
    fn draw_path(
        &mut self,
        path: &BezPath,
        fill_rule: FillRule,
        style: &ShapeStyle,
        is_stroked: bool,
        is_filled: bool,
    );
}

/// Resolve `{key}` against the shape's own data, then the context
fn bind_text<'a>(
    text: &'a str,
    own: &'a BTreeMap<String, String>,
    context: Option<&'a BTreeMap<String, String>>,
) -> &'a str {
    let Some(key) = text.strip_prefix('{').and_then(|t| t.strip_suffix('}')) else {
        return text;
    };
    own.get(key)
        .or_else(|| context.and_then(|data| data.get(key)))
        .map_or(text, String::as_str)
}

fn draw_point_at(
    renderer: &mut dyn ShapeRenderer,
    points: &PointStore,
    id: PointId,
    dx: f64,
    dy: f64,
    fallback: &ShapeStyle,
) {
    let point = &points[id];
    match &point.template {
        // The template is drawn relative to the point's position
        Some(template) => template.draw(renderer, points, dx + point.x, dy + point.y, None),
        None => {
            let style = point.style.as_ref().unwrap_or(fallback);
            renderer.draw_point(point.position() + Vec2::new(dx, dy), style);
        }
    }
}

impl Shape {
    /// Draw this shape, offset by (dx, dy); hidden shapes draw nothing
    pub fn draw(
        &self,
        renderer: &mut dyn ShapeRenderer,
        points: &PointStore,
        dx: f64,
        dy: f64,
        data: Option<&BTreeMap<String, String>>,
    ) {
        if !self.is_visible() {
            return;
        }

        let transformed = !self.base.transform.is_identity();
        if transformed {
            renderer.push_transform(self.base.transform.to_affine());
        }

        let base = &self.base;
        let style = &base.style;
        let offset = Vec2::new(dx, dy);
        let at = |id: PointId| points.position(id) + offset;
        let rect = |top_left: PointId, bottom_right: PointId| {
            Rect::from_points(at(top_left), at(bottom_right))
        };

        match &self.kind {
            ShapeKind::Point(p) => draw_point_at(renderer, points, *p, dx, dy, style),
            ShapeKind::Line(line) => {
                renderer.draw_line(at(line.start), at(line.end), style, base.is_stroked)
            }
            ShapeKind::Arc(arc) => renderer.draw_arc(
                arc.to_arc(points, dx, dy),
                style,
                base.is_stroked,
                base.is_filled,
            ),
            ShapeKind::CubicBezier(cubic) => renderer.draw_cubic_bezier(
                cubic.to_cubic(points, dx, dy),
                style,
                base.is_stroked,
                base.is_filled,
            ),
            ShapeKind::QuadraticBezier(quad) => renderer.draw_quadratic_bezier(
                quad.to_quad(points, dx, dy),
                style,
                base.is_stroked,
                base.is_filled,
            ),
            ShapeKind::Rectangle(b) => renderer.draw_rectangle(
                rect(b.top_left, b.bottom_right),
                style,
                base.is_stroked,
                base.is_filled,
            ),
            ShapeKind::Ellipse(b) => renderer.draw_ellipse(
                rect(b.top_left, b.bottom_right),
                style,
                base.is_stroked,
                base.is_filled,
            ),
            ShapeKind::Text(t) => {
                let text = bind_text(&t.text, &base.data, data);
                renderer.draw_text(rect(t.bounds.top_left, t.bounds.bottom_right), text, style);
            }
            ShapeKind::Image(i) => {
                renderer.draw_image(rect(i.bounds.top_left, i.bounds.bottom_right), &i.key, style)
            }
            ShapeKind::Path(path) => {
                let bez = path.geometry.to_bez_path(points, dx, dy);
                renderer.draw_path(
                    &bez,
                    path.geometry.fill_rule,
                    style,
                    base.is_stroked,
                    base.is_filled,
                );
            }
            ShapeKind::Group(group) => {
                // Children see the group's data after their own
                let context = if base.data.is_empty() { data } else { Some(&base.data) };
                for child in &group.shapes {
                    child.draw(renderer, points, dx, dy, context);
                }
                for &p in &group.connectors {
                    draw_point_at(renderer, points, p, dx, dy, style);
                }
            }
            ShapeKind::Figure(figure) => {
                for child in &figure.shapes {
                    child.draw(renderer, points, dx, dy, data);
                }
            }
        }

        if transformed {
            renderer.pop_transform();
        }
    }
}
