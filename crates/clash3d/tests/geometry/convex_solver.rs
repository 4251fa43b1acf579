use clash3d::math::{Isometry, Point, Real, Transform, Vector};
use clash3d::query::{
    self, ClosestPair, CollisionSolver, ContactPair, DistanceSolver, GjkEpaSolver,
    PenetrationSolver,
};
use clash3d::shape::{Ball, Capsule, ConvexPolyhedron, Cuboid, Shape, TriMesh};
use core::cell::Cell;

#[test]
fn ball_ball_distance() {
    let ball1 = Ball::new(1.0);
    let ball2 = Ball::new(0.5);
    let pos1 = Transform::translation(1.0, 1.0, 1.0);
    let pos2 = Transform::translation(1.0, 5.0, 1.0);

    let pair = query::solve_distance(&pos1, &ball1, &pos2, &ball2, None, None).unwrap();
    assert_relative_eq!(pair.distance(), 2.5, epsilon = 1.0e-6);
    assert_relative_eq!(pair.point_a, Point::new(1.0, 2.0, 1.0), epsilon = 1.0e-6);
    assert_relative_eq!(pair.point_b, Point::new(1.0, 4.5, 1.0), epsilon = 1.0e-6);
}

#[test]
fn rotated_cuboid_distance() {
    let cuboid = Cuboid::new(Vector::new(1.0, 2.0, 0.5));
    let pos1 = Transform::from_isometry(&Isometry::new(
        Vector::zeros(),
        Vector::y() * core::f32::consts::FRAC_PI_2 as Real,
    ));
    // The half-extent along `z` is now along `x`.
    let pos2 = Transform::translation(4.0, 0.0, 0.0);

    let pair = query::solve_distance(&pos1, &cuboid, &pos2, &cuboid, None, None).unwrap();
    assert_relative_eq!(pair.distance(), 2.5, epsilon = 1.0e-3);
    assert_relative_eq!(pair.point_a.x, 0.5, epsilon = 1.0e-3);
    assert_relative_eq!(pair.point_b.x, 3.0, epsilon = 1.0e-3);
}

#[test]
fn cuboid_capsule_penetration_depth() {
    let cuboid = Cuboid::new(Vector::repeat(1.0));
    let capsule = Capsule::new_y(1.0, 0.5);
    let pos_capsule = Transform::translation(0.0, 2.0, 0.0);
    let mut contacts = vec![];

    assert!(query::solve_static(
        &Transform::identity(),
        &cuboid,
        &pos_capsule,
        &capsule,
        &mut |c| contacts.push(c),
        None,
        0.0,
        0.0,
    ));
    assert_eq!(contacts.len(), 1);
    assert_relative_eq!(contacts[0].depth(), 0.5, epsilon = 1.0e-2);
    assert_relative_eq!(contacts[0].point_a.y, 1.0, epsilon = 1.0e-2);
    assert_relative_eq!(contacts[0].point_b.y, 0.5, epsilon = 1.0e-2);
}

#[test]
fn polyhedron_penetration_with_margins() {
    let tetra = ConvexPolyhedron::from_points(vec![
        Point::new(0.0, 0.0, 0.0),
        Point::new(1.0, 0.0, 0.0),
        Point::new(0.0, 1.0, 0.0),
        Point::new(0.0, 0.0, 1.0),
    ])
    .unwrap();
    let cuboid = Cuboid::new(Vector::repeat(0.5));
    let pos_cuboid = Transform::translation(0.0, -0.6, 0.0);
    let identity = Transform::identity();

    for margins in [(0.0, 0.0), (0.05, 0.0), (0.0, 0.05)] {
        assert!(!query::solve_static(
            &identity,
            &tetra,
            &pos_cuboid,
            &cuboid,
            &mut |_| {},
            None,
            margins.0,
            margins.1
        ));
    }

    assert!(query::solve_static(
        &identity,
        &tetra,
        &pos_cuboid,
        &cuboid,
        &mut |_| {},
        None,
        0.1,
        0.1
    ));
}

#[test]
fn separating_axis_cache_is_updated() {
    let cuboid = Cuboid::new(Vector::repeat(1.0));
    let pos2 = Transform::translation(0.0, 0.0, -5.0);
    let mut sep_axis = Vector::x();

    let pair = query::solve_distance(
        &Transform::identity(),
        &cuboid,
        &pos2,
        &cuboid,
        None,
        Some(&mut sep_axis),
    )
    .unwrap();

    assert_relative_eq!(pair.distance(), 3.0, epsilon = 1.0e-3);
    assert_relative_eq!(sep_axis, -Vector::z(), epsilon = 1.0e-3);
}

#[test]
fn repeated_queries_are_identical() {
    let cuboid = Cuboid::new(Vector::new(1.0, 0.5, 2.0));
    let capsule = Capsule::new_x(1.0, 0.3);
    let pos1 = Transform::from_isometry(&Isometry::new(
        Vector::new(0.1, 0.2, 0.3),
        Vector::new(0.4, -0.2, 0.9),
    ));
    let pos2 = Transform::from_isometry(&Isometry::new(
        Vector::new(0.2, 0.3, 0.2),
        Vector::new(-0.3, 0.1, 0.2),
    ));

    let run = || {
        let mut contacts = vec![];
        let collided = query::solve_static(
            &pos1,
            &cuboid,
            &pos2,
            &capsule,
            &mut |c| contacts.push(c),
            None,
            0.0,
            0.0,
        );
        let far = pos2.with_origin(Vector::x() * 5.0);
        let dist = query::solve_distance(&pos1, &cuboid, &far, &capsule, None, None);
        (collided, contacts, dist)
    };

    let first = run();
    assert!(first.0);
    assert!(first.2.is_some());
    assert_eq!(first, run());
}

/// Counts the queries forwarded to the default solver.
#[derive(Default)]
struct CountingSolver {
    penetrations: Cell<usize>,
    distances: Cell<usize>,
}

impl PenetrationSolver for CountingSolver {
    fn penetration(
        &self,
        pos_a: &Transform,
        shape_a: &dyn Shape,
        pos_b: &Transform,
        shape_b: &dyn Shape,
        sink: &mut dyn FnMut(ContactPair),
        sep_axis: Option<&mut Vector<Real>>,
        margin_a: Real,
        margin_b: Real,
    ) -> bool {
        self.penetrations.set(self.penetrations.get() + 1);
        GjkEpaSolver.penetration(
            pos_a, shape_a, pos_b, shape_b, sink, sep_axis, margin_a, margin_b,
        )
    }
}

impl DistanceSolver for CountingSolver {
    fn closest_points(
        &self,
        pos_a: &Transform,
        shape_a: &dyn Shape,
        pos_b: &Transform,
        shape_b: &dyn Shape,
        sep_axis: Option<&mut Vector<Real>>,
    ) -> Option<ClosestPair> {
        self.distances.set(self.distances.get() + 1);
        GjkEpaSolver.closest_points(pos_a, shape_a, pos_b, shape_b, sep_axis)
    }
}

#[test]
fn custom_solver_resolves_every_convex_part() {
    let mesh = TriMesh::new(
        vec![
            Point::new(-1.0, 0.0, -1.0),
            Point::new(1.0, 0.0, -1.0),
            Point::new(1.0, 0.0, 1.0),
            Point::new(-1.0, 0.0, 1.0),
        ],
        vec![[0, 1, 2], [0, 2, 3]],
    )
    .unwrap();
    let ball = Ball::new(0.5);
    let dispatcher = CollisionSolver::new(CountingSolver::default());
    let identity = Transform::identity();

    assert!(dispatcher.solve_static(
        &identity,
        &mesh,
        &Transform::translation(0.0, 0.25, 0.0),
        &ball,
        &mut |_| {},
        None,
        0.0,
        0.0,
    ));
    assert_eq!(dispatcher.solver().penetrations.get(), 2);

    let hint = clash3d::bounding_volume::Aabb::new(
        Point::new(-2.0, -1.0, -2.0),
        Point::new(2.0, 3.0, 2.0),
    );
    assert!(dispatcher
        .solve_distance(
            &Transform::translation(0.0, 2.0, 0.0),
            &ball,
            &identity,
            &mesh,
            Some(&hint),
            None,
        )
        .is_some());
    assert_eq!(dispatcher.solver().distances.get(), 2);
}
