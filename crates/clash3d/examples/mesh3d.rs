use clash3d::math::{Point, Transform};
use clash3d::query;
use clash3d::shape::{Ball, TriMesh};

fn main() {
    let points = vec![
        Point::new(0.0, 1.0, 0.0),
        Point::new(-1.0, -0.5, 0.0),
        Point::new(0.0, -0.5, -1.0),
        Point::new(1.0, -0.5, 0.0),
    ];

    let indices = vec![[0u32, 1, 2], [0, 2, 3], [0, 3, 1]];

    // Build the mesh.
    let mesh = TriMesh::new(points, indices).unwrap();
    assert_eq!(mesh.num_triangles(), 3);

    let ball = Ball::new(0.2);
    let ball_pos = Transform::translation(0.0, 1.1, 0.0);
    let mut parts = Vec::new();

    assert!(query::solve_static(
        &Transform::identity(),
        &mesh,
        &ball_pos,
        &ball,
        &mut |contact| parts.push(contact.index_a),
        None,
        0.0,
        0.0,
    ));
    // The apex is shared by every triangle.
    parts.sort();
    parts.dedup();
    assert_eq!(parts, vec![0, 1, 2]);
}
