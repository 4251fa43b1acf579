#[macro_use]
extern crate approx; // for relative_eq!

use clash3d::math::{Transform, Vector};
use clash3d::query;
use clash3d::shape::{Ball, Cuboid};

fn main() {
    let cuboid = Cuboid::new(Vector::new(1.0, 1.0, 1.0));
    let ball = Ball::new(1.0);

    let cuboid_pos = Transform::identity();
    let ball_pos_intersecting = Transform::translation(0.0, 1.0, 0.0);
    let ball_pos_disjoint = Transform::translation(0.0, 3.0, 0.0);

    let pair_intersecting = query::solve_distance(
        &ball_pos_intersecting,
        &ball,
        &cuboid_pos,
        &cuboid,
        None,
        None,
    );
    let pair_disjoint =
        query::solve_distance(&ball_pos_disjoint, &ball, &cuboid_pos, &cuboid, None, None);

    assert_eq!(pair_intersecting, None);
    assert!(relative_eq!(
        pair_disjoint.unwrap().distance(),
        1.0,
        epsilon = 1.0e-4
    ));
}
