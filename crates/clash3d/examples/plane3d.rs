use clash3d::math::{Isometry, Transform, Vector};
use clash3d::query;
use clash3d::shape::{Cylinder, Plane};

fn main() {
    let ground = Plane::new(Vector::y_axis());
    let cylinder = Cylinder::new(1.0, 0.5);

    // Tilted so that a single point of the rim sinks below the ground.
    let cylinder_pos = Transform::from_isometry(&Isometry::new(
        Vector::new(0.0, 1.0, 0.0),
        Vector::x() * 0.5,
    ));

    let mut contacts = Vec::new();
    let collided = query::solve_static(
        &cylinder_pos,
        &cylinder,
        &Transform::identity(),
        &ground,
        &mut |contact| contacts.push(contact),
        None,
        0.0,
        0.0,
    );

    assert!(collided);
    for contact in &contacts {
        // The first point is on the cylinder, below the ground.
        assert!(contact.point_a.y < 0.0);
        assert!(contact.point_b.y.abs() < 1.0e-5);
    }

    let raised = cylinder_pos.with_origin(Vector::new(0.0, 3.0, 0.0));
    let identity = Transform::identity();
    let pair = query::solve_distance(&raised, &cylinder, &identity, &ground, None, None);
    assert!(pair.unwrap().distance() > 1.0);
}
