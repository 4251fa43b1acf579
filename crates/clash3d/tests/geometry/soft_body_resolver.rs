use clash3d::bounding_volume::Aabb;
use clash3d::math::{Isometry, Point, Real, Transform, Vector};
use clash3d::query::{self, ContactPair, PairRoute};
use clash3d::shape::{
    Ball, Cuboid, Shape, ShapeType, SoftBody, SoftBodyShape, SupportMap, TriMesh,
};
use std::collections::BTreeSet;

/// Five nodes along the `x` axis, hovering just above the plane `y = 0`.
fn rope() -> SoftBodyShape {
    let nodes = (0..5)
        .map(|i| Point::new(i as Real * 2.0, 0.1, 0.0))
        .collect();
    SoftBodyShape::new(SoftBody::new(nodes, 0.25).unwrap())
}

fn floor() -> TriMesh {
    let vertices = vec![
        Point::new(-1.0, 0.0, -1.0),
        Point::new(9.0, 0.0, -1.0),
        Point::new(9.0, 0.0, 1.0),
        Point::new(-1.0, 0.0, 1.0),
    ];
    TriMesh::new(vertices, vec![[0, 1, 2], [0, 2, 3]]).unwrap()
}

fn contacts(
    pos_a: &Transform,
    shape_a: &dyn Shape,
    pos_b: &Transform,
    shape_b: &dyn Shape,
) -> Vec<ContactPair> {
    let mut contacts = vec![];
    let collided = query::solve_static(
        pos_a,
        shape_a,
        pos_b,
        shape_b,
        &mut |c| contacts.push(c),
        None,
        0.0,
        0.0,
    );
    assert_eq!(collided, !contacts.is_empty());
    contacts
}

#[test]
fn contacts_are_attributed_to_the_touched_node() {
    let body = rope();
    let cuboid = Cuboid::new(Vector::new(0.5, 0.5, 0.5));
    let pos_cuboid = Transform::translation(6.0, 0.75, 0.0);
    let identity = Transform::identity();

    let result = contacts(&pos_cuboid, &cuboid, &identity, &body);
    assert_eq!(result.len(), 1);
    assert_eq!((result[0].index_a, result[0].index_b), (0, 3));
    assert_relative_eq!(result[0].point_a.y, 0.25, epsilon = 1.0e-2);
    assert_relative_eq!(result[0].point_b.y, 0.35, epsilon = 1.0e-2);

    let result = contacts(&identity, &body, &pos_cuboid, &cuboid);
    assert_eq!(result.len(), 1);
    assert_eq!((result[0].index_a, result[0].index_b), (3, 0));
    assert_relative_eq!(result[0].point_a.y, 0.35, epsilon = 1.0e-2);
}

#[test]
fn concave_shape_parts_and_nodes_are_both_reported() {
    let body = rope();
    let mesh = floor();
    let identity = Transform::identity();

    let result = contacts(&identity, &mesh, &identity, &body);
    let nodes: BTreeSet<u32> = result.iter().map(|c| c.index_b).collect();
    assert_eq!(nodes, (0..5).collect());
    assert!(result.iter().all(|c| c.index_a < 2));
    assert!(result.iter().all(|c| c.point_a.y.abs() <= 1.0e-3));

    let result = contacts(&identity, &body, &identity, &mesh);
    let nodes: BTreeSet<u32> = result.iter().map(|c| c.index_a).collect();
    assert_eq!(nodes, (0..5).collect());
    assert!(result.iter().all(|c| c.index_b < 2));
}

#[test]
fn nodes_are_placed_by_both_transforms() {
    let mut body = rope();
    body.body_mut().set_pose(Isometry::translation(0.0, 5.0, 0.0));
    let cuboid = Cuboid::new(Vector::new(0.5, 0.5, 0.5));
    // Nodes are at `pos_body * pose⁻¹ * node`, i.e., shifted by (0, -5, 0) and then by (1, 0, 0).
    let pos_body = Transform::translation(1.0, 0.0, 0.0);
    let pos_cuboid = Transform::translation(1.0, -4.9, 0.0);

    let result = contacts(&pos_cuboid, &cuboid, &pos_body, &body);
    assert!(!result.is_empty());
    assert!(result.iter().all(|c| c.index_b == 0));

    let missed = Transform::translation(0.0, 0.1, 0.0);
    assert!(contacts(&missed, &cuboid, &pos_body, &body).is_empty());
}

#[test]
fn non_invertible_transform_never_collides() {
    let body = rope();
    let cuboid = Cuboid::new(Vector::repeat(10.0));
    let flat = Transform::identity().scaled(&Vector::new(1.0, 0.0, 1.0));

    assert!(contacts(&Transform::identity(), &cuboid, &flat, &body).is_empty());
}

#[test]
fn empty_soft_body_never_collides() {
    let body = SoftBodyShape::new(SoftBody::new(vec![], 0.25).unwrap());
    let cuboid = Cuboid::new(Vector::repeat(1.0));
    let identity = Transform::identity();

    assert!(contacts(&identity, &cuboid, &identity, &body).is_empty());
    assert!(contacts(&identity, &floor(), &identity, &body).is_empty());
    assert!(query::solve_distance(&identity, &cuboid, &identity, &body, None, None).is_none());
}

#[test]
fn distance_to_the_nearest_node() {
    let body = rope();
    let cuboid = Cuboid::new(Vector::new(0.5, 0.5, 0.5));
    let pos_cuboid = Transform::translation(3.0, 3.1, 0.0);
    let identity = Transform::identity();

    let pair = query::solve_distance(&pos_cuboid, &cuboid, &identity, &body, None, None).unwrap();
    // The nodes 1 and 2 are at the same distance from the cuboid.
    let expected = (0.5 * 0.5 + 2.5 * 2.5 as Real).sqrt() - 0.25;
    assert_relative_eq!(pair.distance(), expected, epsilon = 1.0e-2);

    // Only the last node is inside the hint.
    let hint = Aabb::new(Point::new(7.0, -1.0, -1.0), Point::new(9.0, 1.0, 1.0));
    let pair = query::solve_distance(&pos_cuboid, &cuboid, &identity, &body, Some(&hint), None)
        .unwrap();
    assert_relative_eq!(pair.point_b.x, 8.0, epsilon = 0.3);
    assert!(pair.distance() > 4.0);

    let overlapping = Transform::translation(4.0, 0.5, 0.0);
    assert!(query::solve_distance(&overlapping, &cuboid, &identity, &body, None, None).is_none());
}

/// A user-defined shape that behaves like a ball.
struct UserBall(Ball);

impl Shape for UserBall {
    fn compute_local_aabb(&self) -> Aabb {
        self.0.compute_local_aabb()
    }

    fn shape_type(&self) -> ShapeType {
        ShapeType::Custom
    }

    fn as_support_map(&self) -> Option<&dyn SupportMap> {
        Some(&self.0 as &dyn SupportMap)
    }
}

#[test]
fn custom_shape_against_soft_body() {
    let user = UserBall(Ball::new(1.0));
    let node = SoftBodyShape::new(SoftBody::new(vec![Point::new(0.0, 0.5, 0.0)], 0.1).unwrap());
    let identity = Transform::identity();

    assert_eq!(PairRoute::classify(&user, &node), (PairRoute::SoftBody, false));
    assert_eq!(PairRoute::classify(&node, &user), (PairRoute::SoftBody, true));

    let result = contacts(&identity, &user, &identity, &node);
    assert_eq!(result.len(), 1);
    assert_eq!((result[0].index_a, result[0].index_b), (0, 0));

    let result = contacts(&identity, &node, &identity, &user);
    assert_eq!(result.len(), 1);
    assert_eq!((result[0].index_a, result[0].index_b), (0, 0));

    assert!(query::solve_distance(&identity, &user, &identity, &node, None, None).is_none());

    let far = Transform::translation(0.0, 2.5, 0.0);
    let pair = query::solve_distance(&identity, &user, &far, &node, None, None).unwrap();
    assert_relative_eq!(pair.distance(), 1.9, epsilon = 1.0e-3);
    let pair = query::solve_distance(&far, &node, &identity, &user, None, None).unwrap();
    assert_relative_eq!(pair.distance(), 1.9, epsilon = 1.0e-3);
}
