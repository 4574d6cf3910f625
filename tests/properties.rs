use kurbo::Point;
use proptest::prelude::*;
use vector_paint::command::{Command, MoveTarget};
use vector_paint::project::Project;
use vector_paint::tools::circle_bounds;

proptest! {
    #[test]
    fn circle_bounds_depend_only_on_radius(
        cx in -1000i32..1000,
        cy in -1000i32..1000,
        r in 1i32..500,
        t in -499i32..500,
    ) {
        prop_assume!(t.abs() <= r);
        let (cx, cy, r, t) = (cx as f64, cy as f64, r as f64, t as f64);

        // Horizontal offset dominates in one sample, vertical in the other
        let wide = circle_bounds(cx, cy, cx + r, cy + t);
        let tall = circle_bounds(cx, cy, cx - t, cy - r);

        prop_assert_eq!(wide, tall);
        let ((x0, y0), (x1, y1)) = wide;
        prop_assert_eq!(x1 - x0, 2.0 * r);
        prop_assert_eq!(y1 - y0, 2.0 * r);
    }

    #[test]
    fn undoing_a_move_restores_points_exactly(
        coords in prop::collection::vec((-5000i32..5000, -5000i32..5000), 1..8),
        dx in -1000i32..1000,
        dy in -1000i32..1000,
    ) {
        let mut project = Project::new();
        let points: Vec<_> = coords
            .iter()
            .map(|&(x, y)| project.points.create(x as f64, y as f64))
            .collect();

        let next = Command::Move {
            target: MoveTarget::points(points.clone()),
            dx: dx as f64,
            dy: dy as f64,
        };
        next.execute(&mut project).unwrap();
        project.snapshot(next.inverse(), next);
        project.undo().unwrap();

        for (&p, &(x, y)) in points.iter().zip(&coords) {
            prop_assert_eq!(project.points.position(p), Point::new(x as f64, y as f64));
        }
        prop_assert!(project.history.can_redo());
    }
}
