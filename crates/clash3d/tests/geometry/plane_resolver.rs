use clash3d::bounding_volume::Aabb;
use clash3d::math::{Isometry, Point, Real, Transform, Vector};
use clash3d::query;
use clash3d::shape::{Ball, Capsule, Cylinder, FeatureType, Plane, Shape, ShapeType, Supports};

/// A flat disk of the xz plane, only described by its support features.
struct Disk {
    radius: Real,
    anchors: usize,
}

impl Shape for Disk {
    fn compute_local_aabb(&self) -> Aabb {
        Aabb::from_half_extents(Point::origin(), Vector::new(self.radius, 0.0, self.radius))
    }

    fn shape_type(&self) -> ShapeType {
        ShapeType::Custom
    }

    fn local_supports(&self, _: &Vector<Real>) -> Supports {
        let pts = [
            Point::origin(),
            Point::new(self.radius, 0.0, 0.0),
            Point::new(0.0, 0.0, self.radius),
            Point::new(-self.radius, 0.0, 0.0),
        ];
        Supports::from_slice(FeatureType::Circle, &pts[..self.anchors])
    }
}

#[test]
fn sphere_resting_on_plane() {
    let plane = Plane::new(Vector::y_axis());
    let ball = Ball::new(1.0);
    let pos_ball = Transform::translation(0.0, 0.8, 0.0);
    let mut contacts = vec![];

    assert!(query::solve_static(
        &Transform::identity(),
        &plane,
        &pos_ball,
        &ball,
        &mut |c| contacts.push(c),
        None,
        0.0,
        0.0,
    ));

    assert_eq!(contacts.len(), 1);
    assert_relative_eq!(contacts[0].point_a, Point::origin());
    assert_relative_eq!(contacts[0].point_b, Point::new(0.0, -0.2, 0.0), epsilon = 1.0e-6);
    assert_eq!((contacts[0].index_a, contacts[0].index_b), (0, 0));
}

#[test]
fn sphere_above_plane() {
    let plane = Plane::new(Vector::y_axis());
    let ball = Ball::new(1.0);
    let pos_ball = Transform::translation(2.0, 3.0, -1.0);

    assert!(!query::solve_static(
        &Transform::identity(),
        &plane,
        &pos_ball,
        &ball,
        &mut |_| panic!("no contact expected"),
        None,
        0.0,
        0.0,
    ));

    let pair = query::solve_distance(
        &Transform::identity(),
        &plane,
        &pos_ball,
        &ball,
        None,
        None,
    )
    .unwrap();
    assert_relative_eq!(pair.point_a, Point::new(2.0, 0.0, -1.0), epsilon = 1.0e-6);
    assert_relative_eq!(pair.point_b, Point::new(2.0, 2.0, -1.0), epsilon = 1.0e-6);
}

#[test]
fn rotated_plane_and_lying_capsule() {
    // The plane x = 0, seen through a quarter turn around z.
    let plane = Plane::new(Vector::x_axis());
    let pos_plane = Transform::from_isometry(&Isometry::rotation(
        Vector::z() * core::f32::consts::FRAC_PI_2 as Real,
    ));
    let capsule = Capsule::new_x(2.0, 0.5);
    let pos_capsule = Transform::translation(0.0, 0.25, 0.0);
    let mut contacts = vec![];

    assert!(query::solve_static(
        &pos_plane,
        &plane,
        &pos_capsule,
        &capsule,
        &mut |c| contacts.push(c),
        None,
        0.0,
        0.0,
    ));

    assert_eq!(contacts.len(), 2);
    for c in &contacts {
        assert_relative_eq!(c.point_a.y, 0.0, epsilon = 1.0e-5);
        assert_relative_eq!(c.point_b.y, -0.25, epsilon = 1.0e-5);
        assert_relative_eq!(c.point_b.x.abs(), 2.0, epsilon = 1.0e-5);
    }
}

#[test]
fn circle_feature_is_sampled_at_three_points() {
    let plane = Plane::new(Vector::y_axis());
    let disk = Disk {
        radius: 2.0,
        anchors: 3,
    };
    let pos_disk = Transform::translation(1.0, -0.1, 0.0);
    let mut contacts = vec![];

    assert!(query::solve_static(
        &pos_disk,
        &disk,
        &Transform::identity(),
        &plane,
        &mut |c| contacts.push(c),
        None,
        0.0,
        0.0,
    ));

    assert_eq!(contacts.len(), 3);
    for c in &contacts {
        // The disk is the first operand of the caller.
        assert_relative_eq!(c.point_a.y, -0.1, epsilon = 1.0e-6);
        assert_relative_eq!(c.point_b.y, 0.0, epsilon = 1.0e-6);
        assert_relative_eq!(
            na::distance(&c.point_a, &Point::new(1.0, -0.1, 0.0)),
            2.0,
            epsilon = 1.0e-5
        );
    }
}

#[test]
#[should_panic]
fn circle_feature_with_four_anchors() {
    let plane = Plane::new(Vector::y_axis());
    let disk = Disk {
        radius: 2.0,
        anchors: 4,
    };

    let _ = query::solve_static(
        &Transform::identity(),
        &plane,
        &Transform::identity(),
        &disk,
        &mut |_| {},
        None,
        0.0,
        0.0,
    );
}

#[test]
fn cylinder_spinning_about_its_axis() {
    let plane = Plane::new(Vector::y_axis());
    let cylinder = Cylinder::new(1.0, 0.5);
    let identity = Transform::identity();

    for i in 0..8 {
        let angle = i as Real * 0.7;
        let sinking =
            Transform::from_isometry(&Isometry::new(Vector::new(2.0, 0.9, -1.0), Vector::y() * angle));
        let hovering =
            Transform::from_isometry(&Isometry::new(Vector::new(2.0, 1.1, -1.0), Vector::y() * angle));
        let mut contacts = vec![];

        assert!(query::solve_static(
            &identity,
            &plane,
            &sinking,
            &cylinder,
            &mut |c| contacts.push(c),
            None,
            0.0,
            0.0,
        ));
        assert_eq!(contacts.len(), 3);
        for c in &contacts {
            assert_relative_eq!(c.point_b.y, -0.1, epsilon = 1.0e-5);
            assert_relative_eq!(c.depth(), 0.1, epsilon = 1.0e-5);
        }

        assert!(!query::solve_static(
            &identity,
            &plane,
            &hovering,
            &cylinder,
            &mut |_| panic!("unexpected contact"),
            None,
            0.0,
            0.0,
        ));
    }
}
