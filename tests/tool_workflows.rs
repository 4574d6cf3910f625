use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Point;
use pretty_assertions::assert_eq;
use vector_paint::config::{EditorOptions, EllipseMode};
use vector_paint::editor::{EditorSession, ProjectEditor};
use vector_paint::layer::LayerKind;
use vector_paint::shape::{factory, ShapeKind};
use vector_paint::tools::{new_tool, InputArgs, Tool, ToolStatus, ToolType};
use vector_paint::EditorEvent;

fn session(options: EditorOptions) -> EditorSession {
    let _ = env_logger::builder().is_test(true).try_init();
    EditorSession::new(ProjectEditor::new(options))
}

fn free_hand() -> EditorOptions {
    EditorOptions {
        snap_to_grid: false,
        ..EditorOptions::default()
    }
}

fn layer_len(session: &EditorSession, kind: LayerKind) -> usize {
    session.editor.project.container.layer(kind).len()
}

#[test]
fn test_line_two_clicks_commit_one_line() {
    let mut session = session(EditorOptions::default());
    assert!(session.set_tool("Line"));

    let status = session.left_down(31.0, 29.0);
    assert!(matches!(status, ToolStatus::Cancelable));
    assert!(!session.is_tool_idle());
    assert!(session.cancel_available());
    assert_eq!(layer_len(&session, LayerKind::Working), 1);

    session.pointer_move(70.0, 50.0);
    let status = session.left_down(92.0, 61.0);
    assert!(status.is_idle());
    assert!(session.is_tool_idle());
    assert!(!session.cancel_available());

    let project = &session.editor.project;
    let shapes = project.container.layer(LayerKind::Current).shapes();
    assert_eq!(shapes.len(), 1);
    let line = shapes[0].as_line().unwrap();
    // Both clicks snap to the 15 unit grid
    assert_eq!(project.points.position(line.start), Point::new(30.0, 30.0));
    assert_eq!(project.points.position(line.end), Point::new(90.0, 60.0));
    assert_eq!(layer_len(&session, LayerKind::Working), 0);
    assert_eq!(layer_len(&session, LayerKind::Helper), 0);
}

#[test]
fn test_right_click_cancels_every_multi_click_tool() {
    let tools = [
        ("Line", "Start"),
        ("Arc", "Point1"),
        ("CubicBezier", "Point1"),
        ("QuadraticBezier", "Point1"),
        ("Rectangle", "TopLeft"),
        ("Ellipse", "TopLeft"),
        ("Text", "TopLeft"),
    ];
    for (name, initial) in tools {
        let mut session = session(EditorOptions::default());
        session.set_tool(name);

        session.left_down(30.0, 30.0);
        session.pointer_move(60.0, 75.0);
        assert!(session.cancel_available(), "{name} should be cancelable");

        let status = session.right_down(60.0, 75.0);
        assert!(status.is_idle(), "{name} should be idle after cancel");
        assert_eq!(layer_len(&session, LayerKind::Working), 0, "{name}");
        assert_eq!(layer_len(&session, LayerKind::Current), 0, "{name}");
        assert_eq!(layer_len(&session, LayerKind::Helper), 0, "{name}");
        assert_eq!(session.tool().current_state_name(), initial, "{name}");
    }
}

#[test]
fn test_right_click_cancels_image_box_after_pick() {
    let mut session = session(free_hand());
    session.set_tool("Image");
    let ToolStatus::Pending(pick) = session.left_down(10.0, 10.0) else {
        panic!("image tool should wait for a pick");
    };
    assert!(pick.resolve("logo.png"));
    session.poll();
    session.pointer_move(80.0, 50.0);
    assert_eq!(layer_len(&session, LayerKind::Working), 1);
    assert!(session.cancel_available());

    assert!(session.right_down(80.0, 50.0).is_idle());
    assert_eq!(layer_len(&session, LayerKind::Working), 0);
    assert_eq!(layer_len(&session, LayerKind::Current), 0);
    assert_eq!(layer_len(&session, LayerKind::Helper), 0);
    assert_eq!(session.tool().current_state_name(), "TopLeft");
}

#[test]
fn test_right_click_cancels_pending_image_pick() {
    let mut session = session(free_hand());
    session.set_tool("Image");
    let ToolStatus::Pending(pick) = session.left_down(10.0, 10.0) else {
        panic!("image tool should wait for a pick");
    };
    session.pointer_move(20.0, 20.0);
    assert!(session.cancel_available());

    assert!(session.right_down(20.0, 20.0).is_idle());
    assert!(!session.cancel_available());
    // The host answering late changes nothing
    assert!(!pick.resolve("late.png"));
    assert!(session.poll().is_idle());
    assert_eq!(layer_len(&session, LayerKind::Working), 0);
}

#[test]
fn test_terminal_click_ignores_vanished_shape() {
    for (name, initial) in [("Line", "Start"), ("Rectangle", "TopLeft")] {
        let mut editor = ProjectEditor::new(free_hand());
        let mut tool = new_tool(name).unwrap();

        let status = tool.left_down(&mut editor, InputArgs::new(10.0, 10.0)).unwrap();
        assert!(matches!(status, ToolStatus::Cancelable), "{name}");
        tool.pointer_move(&mut editor, InputArgs::new(40.0, 30.0)).unwrap();
        let id = editor.project.container.layer(LayerKind::Working).shapes()[0].id();
        assert!(editor.project.remove_shape(LayerKind::Working, id).is_some());

        let status = tool.left_down(&mut editor, InputArgs::new(50.0, 40.0));
        assert!(matches!(status, Ok(ToolStatus::Idle)), "{name}");
        let container = &editor.project.container;
        assert!(container.layer(LayerKind::Current).is_empty(), "{name}");
        assert!(container.layer(LayerKind::Working).is_empty(), "{name}");
        assert!(container.layer(LayerKind::Helper).is_empty(), "{name}");
        assert_eq!(tool.current_state_name(), initial, "{name}");
        assert!(tool.status().is_idle(), "{name}");
    }
}

#[test]
fn test_click_beside_diagonal_line_selects_nothing() {
    let mut session = session(free_hand());
    session.set_tool("Line");
    session.left_down(0.0, 0.0);
    session.left_down(100.0, 100.0);
    let line = session.editor.project.container.layer(LayerKind::Current).shapes()[0].id();

    session.set_tool("Selection");
    session.left_down(80.0, 20.0);
    session.left_up(80.0, 20.0);
    assert!(!session.editor.selection.contains_shape(line));
    assert_eq!(layer_len(&session, LayerKind::Helper), 0);

    // A band that crosses the line picks it up
    session.left_down(40.0, 60.0);
    session.pointer_move(60.0, 40.0);
    session.left_up(60.0, 40.0);
    assert!(session.editor.selection.contains_shape(line));
}

#[test]
fn test_ellipse_circle_mode_keeps_square_around_center() {
    let mut session = session(EditorOptions {
        ellipse_mode: EllipseMode::Circle,
        ..free_hand()
    });
    session.set_tool("Ellipse");

    session.left_down(100.0, 100.0);
    session.pointer_move(130.0, 115.0);

    let project = &session.editor.project;
    let working = project.container.layer(LayerKind::Working).shapes();
    let bounds = working[0].as_box().unwrap();
    assert_eq!(project.points.position(bounds.top_left), Point::new(70.0, 70.0));
    assert_eq!(project.points.position(bounds.bottom_right), Point::new(130.0, 130.0));

    session.left_down(130.0, 115.0);
    let project = &session.editor.project;
    let current = project.container.layer(LayerKind::Current).shapes();
    assert!(matches!(current[0].kind, ShapeKind::Ellipse(_)));
    let bounds = current[0].as_box().unwrap();
    assert_eq!(project.points.position(bounds.top_left), Point::new(70.0, 70.0));
    assert_eq!(project.points.position(bounds.bottom_right), Point::new(130.0, 130.0));
}

#[test]
fn test_second_line_connects_to_existing_end() {
    let mut session = session(EditorOptions::default());
    session.set_tool("Line");
    session.left_down(0.0, 0.0);
    session.left_down(60.0, 0.0);
    session.left_down(60.0, 0.0);
    session.left_down(60.0, 60.0);

    let shapes = session.editor.project.container.layer(LayerKind::Current).shapes();
    assert_eq!(shapes.len(), 2);
    assert_eq!(shapes[0].as_line().unwrap().end, shapes[1].as_line().unwrap().start);
}

#[test]
fn test_point_tool_splits_line() {
    let mut session = session(EditorOptions::default());
    session.set_tool("Line");
    session.left_down(0.0, 0.0);
    session.left_down(90.0, 0.0);

    session.set_tool("Point");
    session.left_down(45.0, 0.0);

    let project = &session.editor.project;
    let shapes = project.container.layer(LayerKind::Current).shapes();
    assert_eq!(shapes.len(), 2);
    let (head, tail) = (shapes[0].as_line().unwrap(), shapes[1].as_line().unwrap());
    assert_eq!(head.end, tail.start);
    assert_eq!(project.points.position(head.end), Point::new(45.0, 0.0));
    assert!(project.points[head.end].is_connector());

    // Away from any line a standalone point is added
    session.left_down(45.0, 90.0);
    let shapes = session.editor.project.container.layer(LayerKind::Current).shapes();
    assert_eq!(shapes.len(), 3);
    assert!(matches!(shapes[2].kind, ShapeKind::Point(_)));
}

#[test]
fn test_cubic_bezier_click_order() {
    let mut session = session(free_hand());
    session.set_tool("CubicBezier");
    session.left_down(0.0, 0.0);
    session.left_down(100.0, 0.0);
    session.left_down(20.0, 50.0);
    assert_eq!(session.tool().current_state_name(), "Point3");
    let status = session.left_down(80.0, 50.0);
    assert!(status.is_idle());

    let project = &session.editor.project;
    let shapes = project.container.layer(LayerKind::Current).shapes();
    let ShapeKind::CubicBezier(curve) = &shapes[0].kind else {
        panic!("expected a cubic bezier, got {}", shapes[0].kind_name());
    };
    assert_eq!(project.points.position(curve.point1), Point::new(0.0, 0.0));
    assert_eq!(project.points.position(curve.point2), Point::new(20.0, 50.0));
    assert_eq!(project.points.position(curve.point3), Point::new(80.0, 50.0));
    assert_eq!(project.points.position(curve.point4), Point::new(100.0, 0.0));
}

#[test]
fn test_image_pick_then_box() {
    let mut session = session(free_hand());
    session.set_tool("Image");

    let ToolStatus::Pending(pick) = session.left_down(10.0, 10.0) else {
        panic!("image tool should wait for a pick");
    };
    assert!(!session.is_tool_idle());
    assert!(session.cancel_available());
    // Clicks while waiting are ignored, and the pick stays cancelable
    assert!(matches!(session.left_down(40.0, 40.0), ToolStatus::Cancelable));
    assert!(matches!(session.poll(), ToolStatus::Cancelable));
    session.pointer_move(60.0, 60.0);
    assert!(session.cancel_available());
    assert_eq!(session.tool().current_state_name(), "Pick");

    assert!(pick.resolve("logo.png"));
    assert!(matches!(session.poll(), ToolStatus::Cancelable));
    session.pointer_move(110.0, 60.0);
    assert!(session.left_down(110.0, 60.0).is_idle());

    let project = &session.editor.project;
    let shapes = project.container.layer(LayerKind::Current).shapes();
    let ShapeKind::Image(image) = &shapes[0].kind else {
        panic!("expected an image");
    };
    assert_eq!(image.key, "logo.png");
    assert_eq!(project.points.position(image.bounds.top_left), Point::new(10.0, 10.0));
    assert_eq!(project.points.position(image.bounds.bottom_right), Point::new(110.0, 60.0));
}

#[test]
fn test_cancelled_image_pick_stays_initial() {
    let mut session = session(free_hand());
    session.set_tool("Image");

    let ToolStatus::Pending(pick) = session.left_down(10.0, 10.0) else {
        panic!("image tool should wait for a pick");
    };
    pick.cancel();
    assert!(session.poll().is_idle());
    assert!(session.is_tool_idle());
    assert_eq!(layer_len(&session, LayerKind::Working), 0);

    // The next click asks again
    assert!(matches!(session.left_down(10.0, 10.0), ToolStatus::Pending(_)));
}

#[test]
fn test_selection_drag_records_one_snapshot() {
    let mut session = session(EditorOptions::default());
    session.set_tool("Line");
    session.left_down(30.0, 30.0);
    session.left_down(90.0, 30.0);
    let line = session.editor.project.container.layer(LayerKind::Current).shapes()[0].clone();
    let (start, end) = (line.as_line().unwrap().start, line.as_line().unwrap().end);

    session.set_tool("Selection");
    assert!(matches!(session.left_down(60.0, 30.0), ToolStatus::Busy));
    assert!(session.editor.selection.contains_shape(line.id()));
    session.pointer_move(68.0, 38.0);
    session.pointer_move(75.0, 45.0);
    assert!(!session.editor.project.history.can_undo());
    assert!(session.left_up(75.0, 45.0).is_idle());

    let project = &mut session.editor.project;
    assert_eq!(project.points.position(start), Point::new(45.0, 45.0));
    assert_eq!(project.points.position(end), Point::new(105.0, 45.0));
    assert_eq!(project.history.undo_len(), 1);

    project.undo().unwrap();
    assert_eq!(project.points.position(start), Point::new(30.0, 30.0));
    assert_eq!(project.points.position(end), Point::new(90.0, 30.0));
    project.redo().unwrap();
    assert_eq!(project.points.position(start), Point::new(45.0, 45.0));
}

#[test]
fn test_selection_right_click_reverts_drag() {
    let mut session = session(EditorOptions::default());
    session.set_tool("Line");
    session.left_down(30.0, 30.0);
    session.left_down(90.0, 30.0);
    let start = session.editor.project.container.layer(LayerKind::Current).shapes()[0]
        .as_line()
        .unwrap()
        .start;

    session.set_tool("Selection");
    session.left_down(60.0, 30.0);
    session.pointer_move(60.0, 90.0);
    assert_eq!(session.editor.project.points.position(start), Point::new(30.0, 90.0));

    assert!(session.right_down(60.0, 90.0).is_idle());
    assert_eq!(session.editor.project.points.position(start), Point::new(30.0, 30.0));
    assert!(!session.editor.project.history.can_undo());
}

#[test]
fn test_rubber_band_selects_shapes_inside() {
    let mut session = session(EditorOptions::default());
    session.set_tool("Line");
    session.left_down(30.0, 30.0);
    session.left_down(90.0, 30.0);
    session.set_tool("Rectangle");
    session.left_down(30.0, 60.0);
    session.left_down(90.0, 120.0);
    session.set_tool("Line");
    session.left_down(300.0, 300.0);
    session.left_down(330.0, 330.0);

    session.set_tool("Selection");
    session.left_down(150.0, 150.0);
    assert_eq!(layer_len(&session, LayerKind::Helper), 1);
    session.pointer_move(0.0, 0.0);
    session.left_up(0.0, 0.0);

    assert_eq!(layer_len(&session, LayerKind::Helper), 0);
    let shapes = session.editor.project.container.layer(LayerKind::Current).shapes();
    let selection = &session.editor.selection;
    assert!(selection.contains_shape(shapes[0].id()));
    assert!(selection.contains_shape(shapes[1].id()));
    assert!(!selection.contains_shape(shapes[2].id()));
}

#[test]
fn test_tool_error_resets_tool() {
    let mut session = session(free_hand());
    session.set_tool("Path");
    session.left_down(0.0, 0.0);
    let path = match session.tool() {
        ToolType::Path(tool) => tool.shape().unwrap(),
        other => panic!("unexpected tool {}", other.name()),
    };

    // Pull the path out from under the tool
    session.editor.project.remove_shape(LayerKind::Working, path);
    let status = session.left_down(50.0, 0.0);

    assert!(status.is_idle());
    assert!(session.is_tool_idle());
    assert!(!session.cancel_available());
    assert_eq!(layer_len(&session, LayerKind::Helper), 0);
    assert_eq!(layer_len(&session, LayerKind::Current), 0);
    match session.tool() {
        ToolType::Path(tool) => assert_eq!(tool.shape(), None),
        other => panic!("unexpected tool {}", other.name()),
    }
}

#[test]
fn test_switching_tools_discards_work_in_progress() {
    let mut session = session(EditorOptions::default());
    session.set_tool("Arc");
    session.left_down(0.0, 0.0);
    session.left_down(60.0, 60.0);
    assert_eq!(layer_len(&session, LayerKind::Working), 1);

    assert!(session.set_tool("Selection"));
    assert!(!session.set_tool("Airbrush"));
    assert!(session.tool().is_selection_tool());
    assert_eq!(layer_len(&session, LayerKind::Working), 0);
    assert_eq!(layer_len(&session, LayerKind::Helper), 0);
}

#[test]
fn test_commit_emits_events() {
    let mut session = session(EditorOptions::default());
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    session.editor.project.subscribe(move |event: &EditorEvent| {
        sink.borrow_mut().push(event.clone());
    });

    session.set_tool("Rectangle");
    session.left_down(0.0, 0.0);
    session.left_down(30.0, 30.0);

    let id = session.editor.project.container.layer(LayerKind::Current).shapes()[0].id();
    let events = events.borrow();
    assert!(events.contains(&EditorEvent::ShapeCommitted { shape: id }));
    assert!(events.iter().any(|e| matches!(
        e,
        EditorEvent::LayerInvalidated {
            layer: LayerKind::Working,
            ..
        }
    )));
}

#[test]
fn test_new_point_reuses_existing_when_connecting() {
    let mut editor = ProjectEditor::new(free_hand());
    let a = editor.project.points.create(0.0, 0.0);
    let b = editor.project.points.create(50.0, 0.0);
    let line = factory::create_line(&editor.options, a, b);
    editor.project.add_shape(LayerKind::Current, line);

    let mut session = EditorSession::new(editor);
    session.set_tool("Line");
    session.left_down(2.0, 3.0);
    session.left_down(0.0, 80.0);

    let shapes = session.editor.project.container.layer(LayerKind::Current).shapes();
    assert_eq!(shapes[1].as_line().unwrap().start, a);
}
