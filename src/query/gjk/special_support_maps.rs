use na::Unit;

use crate::math::{Point, Real, Transform, Vector, DEFAULT_EPSILON};
use crate::shape::SupportMap;

/// The Minkowski sum of a shape and a ball.
///
/// The ball is added in world-space: a shape placed with a scaled transform is still dilated by
/// exactly `radius` in every direction.
pub struct DilatedShape<'a, S: ?Sized + SupportMap> {
    /// The shape involved in the Minkowski sum.
    pub shape: &'a S,
    /// The radius of the ball involved in the Minkoski sum.
    pub radius: Real,
}

impl<'a, S: ?Sized + SupportMap> DilatedShape<'a, S> {
    /// Dilates `shape` by `radius`.
    #[inline]
    pub fn new(shape: &'a S, radius: Real) -> Self {
        Self { shape, radius }
    }
}

impl<S: ?Sized + SupportMap> SupportMap for DilatedShape<'_, S> {
    #[inline]
    fn support_point(&self, m: &Transform, dir: &Vector<Real>) -> Point<Real> {
        let pt = self.shape.support_point(m, dir);

        match Unit::try_new(*dir, DEFAULT_EPSILON) {
            Some(dir) if self.radius != 0.0 => pt + *dir * self.radius,
            _ => pt,
        }
    }

    #[inline]
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        self.support_point(&Transform::identity(), dir)
    }
}
