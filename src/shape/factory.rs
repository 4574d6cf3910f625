//! Factory functions for creating shapes with the editor's default style.

use super::{
    ArcShape, BaseShape, BoxShape, CubicBezierShape, FigureShape, GroupShape, ImageShape,
    LineShape, PathShape, QuadraticBezierShape, Shape, ShapeKind, TextShape,
};
use crate::config::EditorOptions;
use crate::geometry::PointId;
use crate::path::PathGeometry;
use crate::style::ShapeStyle;

fn base(options: &EditorOptions, name: &str) -> BaseShape {
    BaseShape::new(
        name,
        options.shape_style.clone(),
        options.default_is_stroked,
        options.default_is_filled,
    )
}

/// Create a standalone point shape
pub fn create_point_shape(point: PointId) -> Shape {
    Shape::new(
        BaseShape::new("Point", ShapeStyle::default(), true, false),
        ShapeKind::Point(point),
    )
}

pub fn create_line(options: &EditorOptions, start: PointId, end: PointId) -> Shape {
    // Lines are never filled
    let mut base = base(options, "Line");
    base.is_filled = false;
    Shape::new(base, ShapeKind::Line(LineShape::new(start, end)))
}

pub fn create_rectangle(options: &EditorOptions, top_left: PointId, bottom_right: PointId) -> Shape {
    Shape::new(
        base(options, "Rectangle"),
        ShapeKind::Rectangle(BoxShape::new(top_left, bottom_right)),
    )
}

pub fn create_ellipse(options: &EditorOptions, top_left: PointId, bottom_right: PointId) -> Shape {
    Shape::new(
        base(options, "Ellipse"),
        ShapeKind::Ellipse(BoxShape::new(top_left, bottom_right)),
    )
}

pub fn create_text(
    options: &EditorOptions,
    top_left: PointId,
    bottom_right: PointId,
    text: &str,
) -> Shape {
    Shape::new(
        base(options, "Text"),
        ShapeKind::Text(TextShape {
            bounds: BoxShape::new(top_left, bottom_right),
            text: text.to_string(),
        }),
    )
}

pub fn create_image(
    options: &EditorOptions,
    top_left: PointId,
    bottom_right: PointId,
    key: &str,
) -> Shape {
    Shape::new(
        base(options, "Image"),
        ShapeKind::Image(ImageShape {
            bounds: BoxShape::new(top_left, bottom_right),
            key: key.to_string(),
        }),
    )
}

pub fn create_arc(
    options: &EditorOptions,
    point1: PointId,
    point2: PointId,
    point3: PointId,
    point4: PointId,
) -> Shape {
    Shape::new(
        base(options, "Arc"),
        ShapeKind::Arc(ArcShape {
            point1,
            point2,
            point3,
            point4,
        }),
    )
}

pub fn create_cubic_bezier(
    options: &EditorOptions,
    point1: PointId,
    point2: PointId,
    point3: PointId,
    point4: PointId,
) -> Shape {
    Shape::new(
        base(options, "CubicBezier"),
        ShapeKind::CubicBezier(CubicBezierShape {
            point1,
            point2,
            point3,
            point4,
        }),
    )
}

pub fn create_quadratic_bezier(
    options: &EditorOptions,
    point1: PointId,
    point2: PointId,
    point3: PointId,
) -> Shape {
    Shape::new(
        base(options, "QuadraticBezier"),
        ShapeKind::QuadraticBezier(QuadraticBezierShape {
            point1,
            point2,
            point3,
        }),
    )
}

pub fn create_path(options: &EditorOptions, geometry: PathGeometry) -> Shape {
    Shape::new(base(options, "Path"), ShapeKind::Path(PathShape::new(geometry)))
}

/// Create a group and take ownership of `shapes`
pub fn create_group(name: &str, shapes: Vec<Shape>) -> Shape {
    let mut group = Shape::new(
        BaseShape::new(name, ShapeStyle::default(), false, false),
        ShapeKind::Group(GroupShape::default()),
    );
    let id = group.id();
    if let Some(g) = group.as_group_mut() {
        g.shapes = shapes
            .into_iter()
            .map(|mut s| {
                s.base.owner = Some(id);
                s
            })
            .collect();
    }
    group
}

pub fn create_figure(shapes: Vec<Shape>, is_filled: bool, is_closed: bool) -> Shape {
    Shape::new(
        BaseShape::new("Figure", ShapeStyle::default(), true, is_filled),
        ShapeKind::Figure(FigureShape {
            shapes,
            is_filled,
            is_closed,
        }),
    )
}
