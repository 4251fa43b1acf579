use na::Unit;

use crate::math::{Point, Real, Vector};
use crate::shape::{SupportMap, Supports};

/// A Ball shape.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Copy, Clone)]
#[repr(C)]
pub struct Ball {
    /// The radius of the ball.
    pub radius: Real,
}

impl Ball {
    /// Creates a new ball with the given radius.
    #[inline]
    pub fn new(radius: Real) -> Ball {
        Ball { radius }
    }

    /// A ball only ever touches with a single point.
    pub(crate) fn support_features(&self, dir: &Vector<Real>) -> Supports {
        Supports::single(self.local_support_point(dir))
    }
}

impl SupportMap for Ball {
    #[inline]
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        Unit::try_new(*dir, crate::math::DEFAULT_EPSILON)
            .map(|dir| self.local_support_point_toward(&dir))
            .unwrap_or_else(Point::origin)
    }

    #[inline]
    fn local_support_point_toward(&self, dir: &Unit<Vector<Real>>) -> Point<Real> {
        Point::from(**dir * self.radius)
    }
}
