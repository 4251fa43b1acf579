use crate::bounding_volume::details::local_point_cloud_aabb;
use crate::math::{Point, Real, Vector};
use crate::shape::{SupportMap, Supports};
use crate::utils;
use alloc::vec::Vec;

/// Relative tolerance, scaled by the size of the polyhedron, used to decide whether several
/// vertices are equally extremal.
const RELATIVE_FEATURE_TOLERANCE: Real = 1.0e-3;

/// Error raised when a convex polyhedron cannot be built.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConvexPolyhedronError {
    /// A convex polyhedron needs at least one vertex.
    #[error("A convex polyhedron must contain at least one vertex.")]
    NoVertices,
    /// A vertex has a NaN or infinite coordinate.
    #[error("The vertex {0} has a non-finite coordinate.")]
    NonFiniteVertex(usize),
}

/// A convex polyhedron given as the convex hull of a set of points.
///
/// The points are not required to be hull vertices: interior points never change the support
/// mapping of the polyhedron.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Clone)]
pub struct ConvexPolyhedron {
    points: Vec<Point<Real>>,
    feature_tolerance: Real,
}

impl ConvexPolyhedron {
    /// Creates the convex hull of the given set of points.
    pub fn from_points(points: Vec<Point<Real>>) -> Result<Self, ConvexPolyhedronError> {
        if points.is_empty() {
            return Err(ConvexPolyhedronError::NoVertices);
        }

        if let Some(i) = points.iter().position(|pt| !pt.iter().all(|x| x.is_finite())) {
            return Err(ConvexPolyhedronError::NonFiniteVertex(i));
        }

        let extents = local_point_cloud_aabb(&points).extents().norm();

        Ok(Self {
            points,
            feature_tolerance: RELATIVE_FEATURE_TOLERANCE * extents.max(1.0),
        })
    }

    /// The points this polyhedron was built from.
    #[inline]
    pub fn points(&self) -> &[Point<Real>] {
        &self.points[..]
    }

    /// Every vertex lying on the extremal plane orthogonal to `dir`.
    pub(crate) fn support_features(&self, dir: &Vector<Real>) -> Supports {
        utils::point_cloud_support_feature(dir, &self.points, self.feature_tolerance)
    }
}

impl SupportMap for ConvexPolyhedron {
    #[inline]
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        utils::point_cloud_support_point(dir, self.points())
    }
}
