/*!
clash3d
========

**clash3d** is a 3-dimensional narrow-phase collision library written with
the rust programming language.

Given two shapes already known to be close (the broad-phase is not part of
this crate), it decides whether they intersect and reports either the
contact points between them or their closest points. Pairs involving an
infinite plane, a concave shape (triangle mesh, compound) or a soft body
are decomposed into convex sub-problems before being handed to a
penetration or distance solver.

```
# #[cfg(feature = "f64")] extern crate clash3d_f64 as clash3d;
use clash3d::math::Transform;
use clash3d::query;
use clash3d::shape::{Ball, Plane};
use clash3d::math::Vector;

let ground = Plane::new(Vector::y_axis());
let ball = Ball::new(1.0);
let ball_pos = Transform::translation(0.0, 0.5, 0.0);

let mut contacts = Vec::new();
let collided = query::solve_static(
    &Transform::identity(),
    &ground,
    &ball_pos,
    &ball,
    &mut |contact| contacts.push(contact),
    None,
    0.0,
    0.0,
);

assert!(collided);
assert_eq!(contacts.len(), 1);
```
*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::too_many_arguments)] // The solve functions mirror the collaborator contract.
#![allow(clippy::module_inception)]
#![allow(clippy::manual_range_contains)] // This usually makes it way more verbose that it could be.

extern crate alloc;
#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;
#[cfg_attr(test, macro_use)]
extern crate approx;
extern crate num_traits as num;

pub extern crate nalgebra as na;

pub mod bounding_volume;
pub mod math;
pub mod query;
pub mod shape;
pub mod utils;
