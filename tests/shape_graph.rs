use std::collections::HashSet;

use kurbo::Point;
use pretty_assertions::assert_eq;
use vector_paint::config::EditorOptions;
use vector_paint::geometry::{PathSize, PointStore};
use vector_paint::path::{
    ArcSegment, GeometryContext, LineSegment, PathGeometry, SweepDirection,
};
use vector_paint::shape::{factory, Connectable, HasPoints, Movable};
use vector_paint::Selection;

// Two lines joined at a shared middle point
fn joined_lines(store: &mut PointStore) -> (vector_paint::Shape, vector_paint::Shape) {
    let options = EditorOptions::default();
    let a = store.create(0.0, 0.0);
    let shared = store.create(10.0, 10.0);
    let c = store.create(20.0, 0.0);
    (
        factory::create_line(&options, a, shared),
        factory::create_line(&options, shared, c),
    )
}

#[test]
fn test_moving_shared_point_moves_both_shapes() {
    let mut store = PointStore::new();
    let (mut first, second) = joined_lines(&mut store);
    let shared = first.as_line().unwrap().end;
    assert_eq!(second.as_line().unwrap().start, shared);

    first.move_by(&mut store, &mut HashSet::new(), 5.0, -5.0);

    // Same handle, so the second line sees the new position
    let seen_by_second = store.position(second.as_line().unwrap().start);
    assert_eq!(seen_by_second, Point::new(15.0, 5.0));
    assert_eq!(store.position(second.as_line().unwrap().end), Point::new(20.0, 0.0));
}

#[test]
fn test_disconnect_breaks_aliasing() {
    let mut store = PointStore::new();
    let (mut first, mut second) = joined_lines(&mut store);
    let shared = first.as_line().unwrap().end;

    let copy = first.disconnect(shared, &mut store).unwrap();
    assert_ne!(copy, shared);
    assert_eq!(store.position(copy), store.position(shared));
    assert_eq!(first.as_line().unwrap().end, copy);
    assert_eq!(second.as_line().unwrap().start, shared);

    // Moving the original leaves the disconnected line alone
    second.move_by(&mut store, &mut HashSet::new(), 3.0, 4.0);
    assert_eq!(store.position(copy), Point::new(10.0, 10.0));
    assert_eq!(store.position(shared), Point::new(13.0, 14.0));

    // And moving the copy leaves the other line alone
    first.move_by(&mut store, &mut HashSet::new(), 1.0, 1.0);
    assert_eq!(store.position(copy), Point::new(11.0, 11.0));
    assert_eq!(store.position(shared), Point::new(13.0, 14.0));
}

#[test]
fn test_disconnect_unknown_point_is_none() {
    let mut store = PointStore::new();
    let (mut first, _) = joined_lines(&mut store);
    let stranger = store.create(50.0, 50.0);
    let before = store.len();

    assert_eq!(first.disconnect(stranger, &mut store), None);
    assert_eq!(store.len(), before);
}

#[test]
fn test_disconnect_all_copies_each_distinct_point() {
    let options = EditorOptions::default();
    let mut store = PointStore::new();
    let top_left = store.create(0.0, 0.0);
    let bottom_right = store.create(40.0, 20.0);
    let mut rect = factory::create_rectangle(&options, top_left, bottom_right);
    let line = factory::create_line(&options, top_left, bottom_right);

    assert!(rect.disconnect_all(&mut store));
    let points: Vec<_> = rect.points().collect();
    assert_eq!(points.len(), 2);
    assert!(!points.contains(&top_left));
    assert!(!points.contains(&bottom_right));
    assert!(line.contains_point(top_left));
    assert_eq!(store.position(points[1]), Point::new(40.0, 20.0));
}

#[test]
fn test_shared_point_moves_once_within_one_drag() {
    let mut store = PointStore::new();
    let (mut first, mut second) = joined_lines(&mut store);
    let shared = first.as_line().unwrap().end;

    let mut moved = HashSet::new();
    first.move_by(&mut store, &mut moved, 2.0, 0.0);
    second.move_by(&mut store, &mut moved, 2.0, 0.0);

    assert_eq!(store.position(shared), Point::new(12.0, 10.0));
    assert_eq!(moved.len(), 3);
}

#[test]
fn test_group_select_includes_children_and_points() {
    let mut store = PointStore::new();
    let (first, second) = joined_lines(&mut store);
    let (first_id, second_id) = (first.id(), second.id());
    let group = factory::create_group("Group", vec![first, second]);

    let mut selection = Selection::new();
    group.select(&mut selection);
    assert!(selection.contains_shape(group.id()));
    assert!(selection.contains_shape(first_id));
    assert!(selection.contains_shape(second_id));
    assert_eq!(selection.points.len(), 3);

    group.deselect(&mut selection);
    assert!(selection.is_empty());
}

#[test]
fn test_remove_last_segment_checks_kind() {
    let mut store = PointStore::new();
    let start = store.create(0.0, 0.0);
    let p1 = store.create(10.0, 0.0);
    let p2 = store.create(20.0, 10.0);
    let mut geometry = PathGeometry::default();
    let mut ctx = GeometryContext::new(&mut geometry);

    ctx.begin_figure(start, false, false);
    ctx.line_to(p1, true, false).unwrap();
    ctx.arc_to(
        p2,
        PathSize::new(10.0, 10.0),
        0.0,
        false,
        SweepDirection::Clockwise,
        true,
        false,
    )
    .unwrap();

    // Last segment is an arc, so asking for a line changes nothing
    assert!(ctx.remove_last_segment::<LineSegment>().is_none());
    assert_eq!(ctx.geometry().segment_count(), 2);

    let arc = ctx.remove_last_segment::<ArcSegment>().unwrap();
    assert_eq!(arc.point, p2);
    assert_eq!(ctx.geometry().segment_count(), 1);

    let line = ctx.remove_last_segment::<LineSegment>().unwrap();
    assert_eq!(line.point, p1);
    assert_eq!(ctx.geometry().segment_count(), 0);
    assert_eq!(geometry.figures.len(), 1);
    assert_eq!(geometry.figures[0].start_point, start);
}

#[test]
fn test_empty_geometry_has_no_pen() {
    let geometry = PathGeometry::default();
    assert!(geometry.last_path_point().is_err());
}
