use crate::math::{Point, Real, Vector, DEFAULT_EPSILON};
use crate::shape::{FeatureType, SupportMap, Supports, EDGE_SUPPORT_THRESHOLD};
use na::Unit;

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
/// A capsule shape defined as a round segment.
pub struct Capsule {
    /// The first endpoint of the capsule axis.
    pub a: Point<Real>,
    /// The second endpoint of the capsule axis.
    pub b: Point<Real>,
    /// The radius of the capsule.
    pub radius: Real,
}

impl Capsule {
    /// Creates a new capsule aligned with the `x` axis and with the given half-height an radius.
    pub fn new_x(half_height: Real, radius: Real) -> Self {
        let b = Point::from(Vector::x() * half_height);
        Self::new(-b, b, radius)
    }

    /// Creates a new capsule aligned with the `y` axis and with the given half-height an radius.
    pub fn new_y(half_height: Real, radius: Real) -> Self {
        let b = Point::from(Vector::y() * half_height);
        Self::new(-b, b, radius)
    }

    /// Creates a new capsule aligned with the `z` axis and with the given half-height an radius.
    pub fn new_z(half_height: Real, radius: Real) -> Self {
        let b = Point::from(Vector::z() * half_height);
        Self::new(-b, b, radius)
    }

    /// Creates a new capsule defined as the segment between `a` and `b` and with the given `radius`.
    pub fn new(a: Point<Real>, b: Point<Real>, radius: Real) -> Self {
        Self { a, b, radius }
    }

    /// The height of this capsule.
    pub fn height(&self) -> Real {
        (self.b - self.a).norm()
    }

    /// The half-height of this capsule.
    pub fn half_height(&self) -> Real {
        self.height() / 2.0
    }

    /// The center of this capsule.
    pub fn center(&self) -> Point<Real> {
        na::center(&self.a, &self.b)
    }

    /// The side segment of the capsule when `dir` is orthogonal to its axis, a single point
    /// otherwise.
    pub(crate) fn support_features(&self, dir: &Vector<Real>) -> Supports {
        let (Some(n), Some(axis)) = (
            Unit::try_new(*dir, DEFAULT_EPSILON),
            Unit::try_new(self.b - self.a, DEFAULT_EPSILON),
        ) else {
            return Supports::single(self.local_support_point(dir));
        };

        if n.dot(&axis).abs() < EDGE_SUPPORT_THRESHOLD {
            let shift = *n * self.radius;
            Supports::from_slice(FeatureType::Edge, &[self.a + shift, self.b + shift])
        } else {
            Supports::single(self.local_support_point_toward(&n))
        }
    }
}

impl SupportMap for Capsule {
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        let dir = Unit::try_new(*dir, DEFAULT_EPSILON).unwrap_or(Vector::y_axis());
        self.local_support_point_toward(&dir)
    }

    fn local_support_point_toward(&self, dir: &Unit<Vector<Real>>) -> Point<Real> {
        let end = if self.a.coords.dot(dir) > self.b.coords.dot(dir) {
            self.a
        } else {
            self.b
        };
        end + **dir * self.radius
    }
}
