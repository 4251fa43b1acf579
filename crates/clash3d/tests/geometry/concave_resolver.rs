use clash3d::bounding_volume::Aabb;
use clash3d::math::{Point, Real, Transform, Vector};
use clash3d::query::{self, ContactPair};
use clash3d::shape::{Ball, Compound, Cuboid, Shape, SharedShape, TriMesh};
use std::sync::Arc;

/// Two triangles of the plane `y = 0`, ten units apart.
fn two_triangles() -> TriMesh {
    let vertices = vec![
        Point::new(-2.0, 0.0, -2.0),
        Point::new(2.0, 0.0, -2.0),
        Point::new(0.0, 0.0, 2.0),
        Point::new(8.0, 0.0, -2.0),
        Point::new(12.0, 0.0, -2.0),
        Point::new(10.0, 0.0, 2.0),
    ];
    TriMesh::new(vertices, vec![[0, 1, 2], [3, 4, 5]]).unwrap()
}

fn collect_contacts(
    pos_a: &Transform,
    shape_a: &dyn Shape,
    pos_b: &Transform,
    shape_b: &dyn Shape,
    margin_a: Real,
    margin_b: Real,
) -> Option<Vec<ContactPair>> {
    let mut contacts = vec![];
    let collided = query::solve_static(
        pos_a,
        shape_a,
        pos_b,
        shape_b,
        &mut |c| contacts.push(c),
        None,
        margin_a,
        margin_b,
    );
    assert_eq!(collided, !contacts.is_empty());
    collided.then_some(contacts)
}

#[test]
fn contacts_are_attributed_to_the_touched_triangle() {
    let mesh = two_triangles();
    let ball = Ball::new(1.0);
    let pos_ball = Transform::translation(10.0, 0.5, 0.0);
    let identity = Transform::identity();

    let contacts = collect_contacts(&pos_ball, &ball, &identity, &mesh, 0.0, 0.0).unwrap();
    assert!(contacts.iter().all(|c| c.index_a == 0 && c.index_b == 1));
    assert!(contacts.iter().all(|c| c.point_b.x >= 8.0 - 1.0e-4));

    let contacts = collect_contacts(&identity, &mesh, &pos_ball, &ball, 0.0, 0.0).unwrap();
    assert!(contacts.iter().all(|c| c.index_a == 1 && c.index_b == 0));
    assert!(contacts.iter().all(|c| c.point_a.y.abs() <= 1.0e-4));
}

#[test]
fn contacts_are_attributed_to_the_touched_compound_part() {
    let part: SharedShape = Arc::new(Cuboid::new(Vector::repeat(0.5)));
    let compound = Compound::new(vec![
        (Transform::translation(-3.0, 0.0, 0.0), part.clone()),
        (Transform::translation(3.0, 0.0, 0.0), part),
    ])
    .unwrap();
    let ball = Ball::new(1.0);
    let pos_ball = Transform::translation(3.0, 1.2, 0.0);

    let contacts =
        collect_contacts(&pos_ball, &ball, &Transform::identity(), &compound, 0.0, 0.0).unwrap();
    assert!(contacts.iter().all(|c| c.index_b == 1));
    assert!(contacts
        .iter()
        .all(|c| relative_eq!(c.point_b.y, 0.5, epsilon = 1.0e-3)));
}

#[test]
fn margins_follow_their_shape() {
    let mesh = two_triangles();
    let ball = Ball::new(1.0);
    let pos_ball = Transform::translation(0.0, 1.2, 0.0);
    let identity = Transform::identity();

    assert!(collect_contacts(&pos_ball, &ball, &identity, &mesh, 0.0, 0.0).is_none());
    assert!(collect_contacts(&pos_ball, &ball, &identity, &mesh, 0.5, 0.0).is_some());
    assert!(collect_contacts(&identity, &mesh, &pos_ball, &ball, 0.0, 0.5).is_some());
}

#[test]
fn scaled_mesh_is_culled_in_its_local_space() {
    let mesh = two_triangles();
    let ball = Ball::new(1.0);
    let pos_ball = Transform::translation(2.5, 0.5, 0.0);
    let identity = Transform::identity();
    let scaled = identity.scaled(&Vector::new(2.0, 1.0, 2.0));

    assert!(collect_contacts(&pos_ball, &ball, &identity, &mesh, 0.0, 0.0).is_none());

    let contacts = collect_contacts(&pos_ball, &ball, &scaled, &mesh, 0.0, 0.0).unwrap();
    assert!(contacts.iter().all(|c| c.index_b == 0));
}

#[test]
fn distance_to_the_nearest_triangle() {
    let mesh = two_triangles();
    let ball = Ball::new(1.0);
    let pos_ball = Transform::translation(0.0, 3.0, 0.0);
    let identity = Transform::identity();
    let everything = Aabb::new(Point::new(-20.0, -1.0, -5.0), Point::new(20.0, 4.0, 5.0));

    let pair =
        query::solve_distance(&pos_ball, &ball, &identity, &mesh, Some(&everything), None)
            .unwrap();
    assert_relative_eq!(pair.distance(), 2.0, epsilon = 1.0e-2);
    assert_relative_eq!(pair.point_a, Point::new(0.0, 2.0, 0.0), epsilon = 1.0e-2);

    // Reversed operands give the same pair, reversed.
    let flipped =
        query::solve_distance(&identity, &mesh, &pos_ball, &ball, Some(&everything), None)
            .unwrap();
    assert_eq!(flipped, pair.flipped());
}

#[test]
fn hint_restricts_the_candidate_triangles() {
    let mesh = two_triangles();
    let ball = Ball::new(1.0);
    let pos_ball = Transform::translation(0.0, 3.0, 0.0);
    let far_only = Aabb::new(Point::new(7.0, -1.0, -3.0), Point::new(13.0, 4.0, 3.0));

    let pair = query::solve_distance(
        &pos_ball,
        &ball,
        &Transform::identity(),
        &mesh,
        Some(&far_only),
        None,
    )
    .unwrap();

    assert!(pair.point_b.x >= 8.0 - 1.0e-3);
    assert_relative_eq!(pair.distance(), (77.0 as Real).sqrt() - 1.0, epsilon = 1.0e-2);
}

#[test]
fn distance_without_candidates() {
    let mesh = two_triangles();
    let ball = Ball::new(1.0);
    let pos_ball = Transform::translation(0.0, 3.0, 0.0);

    // The region swept by the ball contains no triangle.
    assert!(
        query::solve_distance(&pos_ball, &ball, &Transform::identity(), &mesh, None, None)
            .is_none()
    );
}

#[test]
fn overlapping_triangle_gives_no_distance() {
    let mesh = two_triangles();
    let ball = Ball::new(1.0);
    let pos_ball = Transform::translation(10.0, 0.5, 0.0);

    assert!(
        query::solve_distance(&pos_ball, &ball, &Transform::identity(), &mesh, None, None)
            .is_none()
    );
}

#[test]
fn compound_moved_away_from_every_part() {
    let part: SharedShape = Arc::new(Cuboid::new(Vector::repeat(0.5)));
    let compound = Compound::new(vec![
        (Transform::translation(-3.0, 0.0, 0.0), part.clone()),
        (Transform::translation(3.0, 0.0, 0.0), part),
    ])
    .unwrap();
    let ball = Ball::new(1.0);
    let identity = Transform::identity();

    for pos_compound in [
        Transform::translation(0.0, 10.0, 0.0),
        Transform::translation(20.0, 0.0, 0.0),
        Transform::translation(0.0, 0.0, 0.0),
    ] {
        assert!(collect_contacts(&identity, &ball, &pos_compound, &compound, 0.0, 0.0).is_none());
        assert!(collect_contacts(&pos_compound, &compound, &identity, &ball, 0.0, 0.0).is_none());
    }
}

#[test]
fn convex_shapes_overlapping_a_single_triangle() {
    let mesh = TriMesh::new(
        vec![
            Point::new(-1.0, 0.0, -1.0),
            Point::new(1.0, 0.0, -1.0),
            Point::new(0.0, 0.0, 1.0),
        ],
        vec![[0, 1, 2]],
    )
    .unwrap();
    let identity = Transform::identity();
    let ball = Ball::new(1.0);
    let cuboid = Cuboid::new(Vector::repeat(0.5));

    let cases: [(&dyn Shape, Transform); 3] = [
        (&ball, Transform::translation(0.0, 0.6, 0.0)),
        (&ball, Transform::translation(0.2, 0.5, -0.1)),
        (&cuboid, Transform::translation(0.0, 0.1, 0.0)),
    ];
    let expected_depths = [0.4, 0.5, 0.4];

    for ((shape, pos), expected) in cases.iter().zip(expected_depths) {
        let contacts = collect_contacts(pos, *shape, &identity, &mesh, 0.0, 0.0).unwrap();
        assert!(contacts.iter().all(|c| c.index_a == 0 && c.index_b == 0));
        let depth = contacts.iter().map(|c| c.depth()).fold(0.0, Real::max);
        assert_relative_eq!(depth, expected, epsilon = 1.0e-2);

        assert!(query::solve_distance(pos, *shape, &identity, &mesh, None, None).is_none());
    }
}

#[test]
fn ball_overlapping_a_large_flat_mesh() {
    let vertices = vec![
        Point::new(-10.0, 0.0, -10.0),
        Point::new(10.0, 0.0, -10.0),
        Point::new(10.0, 0.0, 10.0),
        Point::new(-10.0, 0.0, 10.0),
    ];
    let ground = TriMesh::new(vertices, vec![[0, 2, 1], [0, 3, 2]]).unwrap();
    let ball = Ball::new(1.0);
    let cuboid = Cuboid::new(Vector::repeat(0.5));
    let identity = Transform::identity();

    for center in [
        Vector::new(0.5, 0.5, 0.5),
        Vector::new(0.5, 0.9, 0.5),
        Vector::new(0.3, 0.7, -0.2),
    ] {
        let pos = Transform::translation(center.x, center.y, center.z);
        assert!(collect_contacts(&pos, &ball, &identity, &ground, 0.0, 0.0).is_some());
        assert!(collect_contacts(&identity, &ground, &pos, &ball, 0.0, 0.0).is_some());
        assert!(query::solve_distance(&pos, &ball, &identity, &ground, None, None).is_none());
    }

    let pos = Transform::translation(0.0, 0.1, 0.0);
    assert!(collect_contacts(&pos, &cuboid, &identity, &ground, 0.0, 0.0).is_some());
}
