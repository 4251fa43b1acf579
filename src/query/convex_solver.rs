use crate::math::{Real, Transform, Vector};
use crate::query::{ClosestPair, ContactPair};
use crate::shape::Shape;

/// Computes the contacts between two convex shapes.
///
/// This is the seam used by the collision dispatcher for every pair that involves neither a
/// plane, a concave shape, nor a soft body, and for each convex sub-problem it extracts from
/// the pairs that do.
pub trait PenetrationSolver {
    /// Reports the contacts between two convex shapes, each dilated by its margin.
    ///
    /// Contacts are given to `sink` in world-space, with both indices set to `0`. Returns `true`
    /// if the shapes overlap.
    ///
    /// If `sep_axis` is given, it is used as a hint of the direction from the first shape to the
    /// second one, and overwritten with the separating direction found if the shapes are
    /// disjoint.
    fn penetration(
        &self,
        pos_a: &Transform,
        shape_a: &dyn Shape,
        pos_b: &Transform,
        shape_b: &dyn Shape,
        sink: &mut dyn FnMut(ContactPair),
        sep_axis: Option<&mut Vector<Real>>,
        margin_a: Real,
        margin_b: Real,
    ) -> bool;
}

/// Computes the closest points between two convex shapes.
pub trait DistanceSolver {
    /// Returns the closest points between two convex shapes, or `None` if they overlap or if
    /// the pair is not supported.
    fn closest_points(
        &self,
        pos_a: &Transform,
        shape_a: &dyn Shape,
        pos_b: &Transform,
        shape_b: &dyn Shape,
        sep_axis: Option<&mut Vector<Real>>,
    ) -> Option<ClosestPair>;
}
