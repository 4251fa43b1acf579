//! Support mapping based Cylinder shape.

use crate::math::{Point, Real, Vector, DEFAULT_EPSILON};
use crate::shape::{
    FeatureType, SupportMap, Supports, EDGE_SUPPORT_THRESHOLD, FACE_SUPPORT_THRESHOLD,
};
use na;
use num::Zero;

/// Cylinder shape with its principal axis aligned with the `y` axis.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Cylinder {
    /// The half-height of the cylinder.
    pub half_height: Real,
    /// The radius of the cylinder.
    pub radius: Real,
}

impl Cylinder {
    /// Creates a new cylinder.
    ///
    /// # Arguments:
    /// * `half_height` - the half length of the cylinder along the `y` axis.
    /// * `radius` - the length of the cylinder along all other axis.
    pub fn new(half_height: Real, radius: Real) -> Cylinder {
        assert!(half_height.is_sign_positive() && radius.is_sign_positive());

        Cylinder {
            half_height,
            radius,
        }
    }

    /// A cap of the cylinder, encoded as a circle, a side segment, or a point of the cap rims.
    pub(crate) fn support_features(&self, dir: &Vector<Real>) -> Supports {
        let Some(n) = dir.try_normalize(DEFAULT_EPSILON) else {
            return Supports::single(self.local_support_point(dir));
        };

        if n.y.abs() > FACE_SUPPORT_THRESHOLD {
            let center = Point::new(0.0, self.half_height.copysign(n.y), 0.0);
            Supports::from_slice(
                FeatureType::Circle,
                &[
                    center,
                    center + Vector::x() * self.radius,
                    center + Vector::z() * self.radius,
                ],
            )
        } else if n.y.abs() < EDGE_SUPPORT_THRESHOLD {
            let side = Vector::new(n.x, 0.0, n.z).normalize() * self.radius;
            Supports::from_slice(
                FeatureType::Edge,
                &[
                    Point::from(side - Vector::y() * self.half_height),
                    Point::from(side + Vector::y() * self.half_height),
                ],
            )
        } else {
            Supports::single(self.local_support_point(&n))
        }
    }
}

impl SupportMap for Cylinder {
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        let mut vres = *dir;

        vres[1] = 0.0;

        if vres.normalize_mut().is_zero() {
            vres = na::zero()
        } else {
            vres *= self.radius;
        }

        vres[1] = self.half_height.copysign(dir[1]);

        Point::from(vres)
    }
}
