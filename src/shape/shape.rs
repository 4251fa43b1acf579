use crate::bounding_volume::Aabb;
use crate::math::{Real, Transform, Vector};
use crate::shape::{
    Ball, Capsule, Compound, ConcaveShape, ConvexPolyhedron, Cuboid, Cylinder, Plane,
    SoftBodyShape, SupportMap, Supports, TriMesh, Triangle,
};
use downcast_rs::{impl_downcast, DowncastSync};

/// Enum representing the type of a shape.
///
/// The declaration order is meaningful: the collision dispatcher orders every pair of shapes
/// so that the operand with the smallest type comes first. Planes sort before everything else
/// and soft bodies sort after every other shape, user-defined ones included.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShapeType {
    /// An infinite plane.
    Plane = 0,
    /// A ball shape.
    Ball,
    /// A cuboid shape.
    Cuboid,
    /// A capsule shape.
    Capsule,
    /// A cylindrical shape.
    Cylinder,
    /// A convex polyhedron.
    ConvexPolyhedron,
    /// A triangle shape.
    Triangle,
    /// A triangle mesh shape.
    TriMesh,
    /// A Compound shape.
    Compound,
    /// A custom user-defined shape.
    Custom,
    /// A soft body approximated by its nodes.
    SoftBody,
}

/// Trait implemented by shapes usable by the collision dispatcher.
///
/// Shapes are immutable while a query runs and are only borrowed by it.
pub trait Shape: DowncastSync {
    /// Computes the AABB of this shape.
    fn compute_local_aabb(&self) -> Aabb;

    /// Computes the AABB of this shape with the given position.
    fn compute_aabb(&self, position: &Transform) -> Aabb {
        self.compute_local_aabb().transform_by(position)
    }

    /// Gets the type tag of this shape.
    fn shape_type(&self) -> ShapeType;

    /// Is this shape made of several convex parts that must be tested one by one?
    ///
    /// Concave shapes must also return `Some` from [`Shape::as_concave_shape`].
    fn is_concave(&self) -> bool {
        false
    }

    /// The support points of this shape along `dir`, in local-space, and the kind of feature
    /// they describe.
    ///
    /// Shapes without support mapping (planes, concave shapes, soft bodies) return no point.
    fn local_supports(&self, dir: &Vector<Real>) -> Supports {
        self.as_support_map()
            .map(|s| Supports::single(s.local_support_point(dir)))
            .unwrap_or_default()
    }

    /// Projects this shape, placed at `position`, on the line spanned by `axis`.
    ///
    /// Returns the interval `(min, max)` of the dot products between `axis` and the points of
    /// this shape.
    fn project_range(&self, axis: &Vector<Real>, position: &Transform) -> (Real, Real) {
        if let Some(s) = self.as_support_map() {
            let max = s.support_point(position, axis).coords.dot(axis);
            let min = s.support_point(position, &-axis).coords.dot(axis);
            (min, max)
        } else {
            self.compute_aabb(position).project_range(axis)
        }
    }

    /// Converts this shape into its support mapping, if it has one.
    fn as_support_map(&self) -> Option<&dyn SupportMap> {
        None
    }

    /// Converts this shape into a set of convex parts, if it is concave.
    fn as_concave_shape(&self) -> Option<&dyn ConcaveShape> {
        None
    }
}

impl_downcast!(sync Shape);

impl dyn Shape {
    /// Converts this abstract shape to the given shape, if it is one.
    pub fn as_shape<T: Shape>(&self) -> Option<&T> {
        self.downcast_ref()
    }

    /// Converts this abstract shape to a plane, if it is one.
    pub fn as_plane(&self) -> Option<&Plane> {
        self.downcast_ref()
    }

    /// Converts this abstract shape to a ball, if it is one.
    pub fn as_ball(&self) -> Option<&Ball> {
        self.downcast_ref()
    }

    /// Converts this abstract shape to a cuboid, if it is one.
    pub fn as_cuboid(&self) -> Option<&Cuboid> {
        self.downcast_ref()
    }

    /// Converts this abstract shape to a capsule, if it is one.
    pub fn as_capsule(&self) -> Option<&Capsule> {
        self.downcast_ref()
    }

    /// Converts this abstract shape to a cylinder, if it is one.
    pub fn as_cylinder(&self) -> Option<&Cylinder> {
        self.downcast_ref()
    }

    /// Converts this abstract shape to a convex polyhedron, if it is one.
    pub fn as_convex_polyhedron(&self) -> Option<&ConvexPolyhedron> {
        self.downcast_ref()
    }

    /// Converts this abstract shape to a triangle, if it is one.
    pub fn as_triangle(&self) -> Option<&Triangle> {
        self.downcast_ref()
    }

    /// Converts this abstract shape to a triangle mesh, if it is one.
    pub fn as_trimesh(&self) -> Option<&TriMesh> {
        self.downcast_ref()
    }

    /// Converts this abstract shape to a compound shape, if it is one.
    pub fn as_compound(&self) -> Option<&Compound> {
        self.downcast_ref()
    }

    /// Converts this abstract shape to a soft body, if it is one.
    pub fn as_soft_body(&self) -> Option<&SoftBodyShape> {
        self.downcast_ref()
    }
}

macro_rules! impl_shape_for_support_map(
    ($t: ident) => {
        impl Shape for $t {
            fn compute_local_aabb(&self) -> Aabb {
                crate::bounding_volume::details::support_map_aabb(&Transform::identity(), self)
            }

            fn compute_aabb(&self, position: &Transform) -> Aabb {
                crate::bounding_volume::details::support_map_aabb(position, self)
            }

            fn shape_type(&self) -> ShapeType {
                ShapeType::$t
            }

            fn local_supports(&self, dir: &Vector<Real>) -> Supports {
                self.support_features(dir)
            }

            fn as_support_map(&self) -> Option<&dyn SupportMap> {
                Some(self as &dyn SupportMap)
            }
        }
    }
);

impl_shape_for_support_map!(Ball);
impl_shape_for_support_map!(Cuboid);
impl_shape_for_support_map!(Capsule);
impl_shape_for_support_map!(Cylinder);
impl_shape_for_support_map!(ConvexPolyhedron);
impl_shape_for_support_map!(Triangle);

impl Shape for Plane {
    fn compute_local_aabb(&self) -> Aabb {
        self.local_aabb()
    }

    fn compute_aabb(&self, position: &Transform) -> Aabb {
        self.aabb(position)
    }

    fn shape_type(&self) -> ShapeType {
        ShapeType::Plane
    }
}

impl Shape for TriMesh {
    fn compute_local_aabb(&self) -> Aabb {
        *self.local_aabb()
    }

    fn shape_type(&self) -> ShapeType {
        ShapeType::TriMesh
    }

    fn is_concave(&self) -> bool {
        true
    }

    fn as_concave_shape(&self) -> Option<&dyn ConcaveShape> {
        Some(self as &dyn ConcaveShape)
    }
}

impl Shape for Compound {
    fn compute_local_aabb(&self) -> Aabb {
        *self.local_aabb()
    }

    fn shape_type(&self) -> ShapeType {
        ShapeType::Compound
    }

    fn is_concave(&self) -> bool {
        true
    }

    fn as_concave_shape(&self) -> Option<&dyn ConcaveShape> {
        Some(self as &dyn ConcaveShape)
    }
}

impl Shape for SoftBodyShape {
    fn compute_local_aabb(&self) -> Aabb {
        self.local_aabb()
    }

    fn shape_type(&self) -> ShapeType {
        ShapeType::SoftBody
    }
}
