extern crate nalgebra as na;

use clash3d::math::Transform;
use clash3d::query;
use clash3d::shape::{Ball, Cuboid};
use na::Vector3;

fn main() {
    let cuboid = Cuboid::new(Vector3::new(1.0, 1.0, 1.0));
    let ball = Ball::new(1.0);
    let margin = 0.5;

    let cuboid_pos = Transform::identity();
    let ball_pos_penetrating = Transform::translation(0.0, 1.5, 0.0);
    let ball_pos_in_margin = Transform::translation(0.0, 2.25, 0.0);
    let ball_pos_too_far = Transform::translation(0.0, 3.0, 0.0);

    let mut contacts = Vec::new();
    let penetrating = query::solve_static(
        &ball_pos_penetrating,
        &ball,
        &cuboid_pos,
        &cuboid,
        &mut |contact| contacts.push(contact),
        None,
        0.0,
        0.0,
    );
    let in_margin = query::solve_static(
        &ball_pos_in_margin,
        &ball,
        &cuboid_pos,
        &cuboid,
        &mut |_| {},
        None,
        margin,
        0.0,
    );
    let too_far = query::solve_static(
        &ball_pos_too_far,
        &ball,
        &cuboid_pos,
        &cuboid,
        &mut |_| {},
        None,
        margin,
        0.0,
    );

    assert!(penetrating);
    assert!(contacts[0].point_a.y < contacts[0].point_b.y);
    assert!(in_margin);
    assert!(!too_far);
}
