//! Shapes supported by clash3d.

pub use self::ball::Ball;
pub use self::capsule::Capsule;
pub use self::compound::{Compound, CompoundError};
pub use self::concave_shape::ConcaveShape;
pub use self::convex_polyhedron::{ConvexPolyhedron, ConvexPolyhedronError};
pub use self::cuboid::Cuboid;
pub use self::cylinder::Cylinder;
pub use self::plane::Plane;
#[doc(inline)]
pub use self::shape::{Shape, ShapeType};
pub use self::soft_body::{SoftBody, SoftBodyError, SoftBodyShape};
pub use self::support_features::{
    FeatureType, Supports, EDGE_SUPPORT_THRESHOLD, FACE_SUPPORT_THRESHOLD, MAX_SUPPORTS,
};
#[doc(inline)]
pub use self::support_map::SupportMap;
pub use self::triangle::Triangle;
pub use self::trimesh::{TriMesh, TriMeshBuilderError};

/// A shape that can be shared between several owners.
pub type SharedShape = alloc::sync::Arc<dyn Shape>;

mod ball;
mod capsule;
mod compound;
mod concave_shape;
mod convex_polyhedron;
mod cuboid;
mod cylinder;
mod plane;
#[doc(hidden)]
pub mod shape;
mod soft_body;
mod support_features;
#[doc(hidden)]
pub mod support_map;
mod triangle;
mod trimesh;
