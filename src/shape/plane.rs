//! An infinite plane.

use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Transform, UnitVector, Vector};

/// An infinite plane, given by its unit normal and its signed offset from the origin.
///
/// The plane is the set of points `x` such that `normal · x = bias`. Everything on the negative
/// side of the normal is considered to be inside the plane.
#[derive(PartialEq, Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(C)]
pub struct Plane {
    /// The outward normal of the plane.
    pub normal: UnitVector<Real>,
    /// The signed distance between the plane and the origin, along `normal`.
    pub bias: Real,
}

impl Plane {
    /// Builds a new plane passing through the origin.
    #[inline]
    pub fn new(normal: UnitVector<Real>) -> Plane {
        Plane { normal, bias: 0.0 }
    }

    /// Builds a new plane at the signed distance `bias` from the origin.
    #[inline]
    pub fn with_bias(normal: UnitVector<Real>, bias: Real) -> Plane {
        Plane { normal, bias }
    }

    /// The point of the plane closest to the origin.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        Point::from(*self.normal * self.bias)
    }

    /// The signed distance from `pt` to this plane, negative below it.
    #[inline]
    pub fn distance_to(&self, pt: &Point<Real>) -> Real {
        self.normal.dot(&pt.coords) - self.bias
    }

    /// The orthogonal projection of `pt` on this plane.
    #[inline]
    pub fn project_point(&self, pt: &Point<Real>) -> Point<Real> {
        pt - *self.normal * self.distance_to(pt)
    }

    /// This plane transformed by `m`.
    ///
    /// Returns `None` if the basis of `m` is degenerate.
    pub fn transformed(&self, m: &Transform) -> Option<Plane> {
        let normal = m.transform_normal(&self.normal)?;
        let center = m.transform_point(&self.center());
        Some(Plane::with_bias(normal, normal.dot(&center.coords)))
    }

    /// Computes the world-space AABB of this plane.
    #[inline]
    pub fn aabb(&self, _pos: &Transform) -> Aabb {
        self.local_aabb()
    }

    /// Computes the local-space AABB of this plane.
    #[inline]
    pub fn local_aabb(&self) -> Aabb {
        // Halved so that the box survives a few operations like loosening.
        let max = Vector::repeat(Real::MAX * 0.5);
        Aabb::new(Point::from(-max), Point::from(max))
    }
}
