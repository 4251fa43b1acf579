//! Dispatch of collision queries between arbitrary pairs of shapes.

pub use self::collision_solver::{solve_distance, solve_static, CollisionSolver, PairRoute};
pub use self::solve_concave::{
    closest_points_shape_concave_shape, contact_shape_concave_shape, local_query_aabb,
    ConcaveQuery,
};
pub use self::solve_plane::{closest_points_plane_shape, contact_plane_shape, feature_points};
pub use self::solve_soft_body::{
    closest_points_shape_soft_body, contact_shape_soft_body, SoftBodyQuery,
};

mod collision_solver;
mod solve_concave;
mod solve_plane;
mod solve_soft_body;
