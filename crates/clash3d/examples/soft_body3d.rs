use clash3d::math::{Point, Real, Transform, Vector};
use clash3d::query;
use clash3d::shape::{Cuboid, SoftBody, SoftBodyShape};

fn main() {
    let nodes = (0..10)
        .map(|i| Point::new(i as Real * 0.5, 0.0, 0.0))
        .collect();
    let rope = SoftBodyShape::new(SoftBody::new(nodes, 0.1).unwrap());
    let block = Cuboid::new(Vector::new(0.3, 0.5, 0.5));
    let block_pos = Transform::translation(2.0, 0.55, 0.0);

    let mut touched = Vec::new();
    let collided = query::solve_static(
        &block_pos,
        &block,
        &Transform::identity(),
        &rope,
        &mut |contact| touched.push(contact.index_b),
        None,
        0.0,
        0.0,
    );

    // Only the nodes located under the block are in contact.
    assert!(collided);
    touched.sort();
    touched.dedup();
    assert_eq!(touched, vec![4]);

    let far_pos = block_pos.with_origin(Vector::new(2.0, 2.0, 0.0));
    let pair = query::solve_distance(&far_pos, &block, &Transform::identity(), &rope, None, None);
    let dist = pair.unwrap().distance();
    assert!(dist > 1.3 && dist < 1.5);
}
