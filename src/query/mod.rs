//! Narrow-phase collision queries.
//!
//! # General cases
//! The most general functions provided by this module are:
//!
//! * [`solve_static()`] to compute the contact points between two shapes.
//! * [`solve_distance()`] to compute the closest points between two disjoint shapes.
//!
//! Both rely on the [`GjkEpaSolver`] for pairs of convex shapes. A [`CollisionSolver`] can be
//! built around any other implementation of [`PenetrationSolver`] and [`DistanceSolver`].
//!
//! # Specific cases
//! The functions exported by the `details` submodule resolve a single kind of shape pair, with
//! the operands in the order expected by the dispatcher. They have the form
//! `[operation]_[shape1]_[shape2]()` where `[operation]` is `contact` or `closest_points`.

pub use self::collision_solver::{solve_distance, solve_static, CollisionSolver, PairRoute};
pub use self::contact_pair::{ClosestPair, ContactPair};
pub use self::convex_solver::{DistanceSolver, PenetrationSolver};
pub use self::gjk_epa_solver::GjkEpaSolver;

mod collision_solver;
mod contact_pair;
mod convex_solver;
pub mod epa;
pub mod gjk;
mod gjk_epa_solver;

/// Queries dedicated to specific pairs of shapes.
pub mod details {
    pub use super::collision_solver::{
        closest_points_plane_shape, closest_points_shape_concave_shape,
        closest_points_shape_soft_body, contact_plane_shape, contact_shape_concave_shape,
        contact_shape_soft_body, feature_points, local_query_aabb, ConcaveQuery, SoftBodyQuery,
    };
}
