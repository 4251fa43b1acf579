//! Traits for support mapping based shapes.

use crate::math::{Point, Real, Transform, Vector};
use na::Unit;

/// Traits of convex shapes representable by a support mapping function.
pub trait SupportMap {
    // Evaluates the support function of this shape.
    //
    // A support function is a function associating a vector to the shape point which maximizes
    // their dot product.
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real>;

    /// Same as `self.local_support_point` except that `dir` is normalized.
    fn local_support_point_toward(&self, dir: &Unit<Vector<Real>>) -> Point<Real> {
        self.local_support_point(dir.as_ref())
    }

    // Evaluates the support function of this shape transformed by `transform`.
    //
    // The world-space direction is brought back to local-space with the transposed basis, which
    // stays correct when `transform` carries a scaling.
    fn support_point(&self, transform: &Transform, dir: &Vector<Real>) -> Point<Real> {
        let local_dir = transform.transpose_transform_vector(dir);
        transform.transform_point(&self.local_support_point(&local_dir))
    }
}
