use clash3d::math::{Point, Transform, Vector};
use clash3d::query;
use clash3d::shape::{Ball, Plane, Shape, SoftBody, SoftBodyShape, TriMesh};

fn flat_mesh() -> TriMesh {
    TriMesh::new(
        vec![
            Point::new(-1.0, 0.0, -1.0),
            Point::new(1.0, 0.0, -1.0),
            Point::new(0.0, 0.0, 1.0),
        ],
        vec![[0, 1, 2]],
    )
    .unwrap()
}

fn blob() -> SoftBodyShape {
    let nodes = vec![Point::origin(), Point::new(0.0, 0.5, 0.0)];
    SoftBodyShape::new(SoftBody::new(nodes, 1.0).unwrap())
}

fn assert_never_collide(shape_a: &dyn Shape, shape_b: &dyn Shape) {
    // Both shapes are placed at the same position, so any supported pair would collide.
    let pos = Transform::identity();

    for (g1, g2) in [(shape_a, shape_b), (shape_b, shape_a)] {
        assert!(!query::solve_static(
            &pos,
            g1,
            &pos,
            g2,
            &mut |_| panic!("unsupported pairs emit no contact"),
            None,
            0.0,
            0.0,
        ));
        assert!(query::solve_distance(&pos, g1, &pos, g2, None, None).is_none());
    }
}

#[test]
fn plane_plane() {
    let plane1 = Plane::new(Vector::y_axis());
    let plane2 = Plane::new(-Vector::y_axis());
    assert_never_collide(&plane1, &plane2);
}

#[test]
fn plane_soft_body() {
    assert_never_collide(&Plane::new(Vector::y_axis()), &blob());
}

#[test]
fn soft_body_soft_body() {
    assert_never_collide(&blob(), &blob());
}

#[test]
fn concave_concave() {
    assert_never_collide(&flat_mesh(), &flat_mesh());
}

#[test]
fn supported_pairs_do_collide() {
    let pos = Transform::identity();
    let ball = Ball::new(0.5);

    assert!(query::solve_static(
        &pos,
        &blob(),
        &pos,
        &flat_mesh(),
        &mut |_| {},
        None,
        0.0,
        0.0,
    ));
    assert!(query::solve_static(
        &pos,
        &flat_mesh(),
        &pos,
        &ball,
        &mut |_| {},
        None,
        0.0,
        0.0,
    ));
}
