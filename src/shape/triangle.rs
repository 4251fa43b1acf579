//! Definition of the triangle shape.

use crate::math::{Point, Real, Transform, Vector};
use crate::shape::{FeatureType, SupportMap, Supports, FACE_SUPPORT_THRESHOLD};
use crate::utils;

use na::Unit;

/// A triangle shape.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(C)]
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Triangle {
    /// The triangle first point.
    pub a: Point<Real>,
    /// The triangle second point.
    pub b: Point<Real>,
    /// The triangle third point.
    pub c: Point<Real>,
}

impl From<[Point<Real>; 3]> for Triangle {
    fn from(arr: [Point<Real>; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }
}

impl Triangle {
    /// Creates a triangle from three points.
    #[inline]
    pub fn new(a: Point<Real>, b: Point<Real>, c: Point<Real>) -> Triangle {
        Triangle { a, b, c }
    }

    /// The three vertices of this triangle.
    #[inline]
    pub fn vertices(&self) -> [Point<Real>; 3] {
        [self.a, self.b, self.c]
    }

    /// The normal of this triangle assuming it is oriented ccw.
    ///
    /// The normal points such that it is collinear to `AB × AC` (where `×` denotes the cross
    /// product).
    #[inline]
    pub fn normal(&self) -> Option<Unit<Vector<Real>>> {
        Unit::try_new(self.scaled_normal(), crate::math::DEFAULT_EPSILON)
    }

    /// A vector normal of this triangle.
    ///
    /// The vector points such that it is collinear to `AB × AC` (where `×` denotes the cross
    /// product).
    #[inline]
    pub fn scaled_normal(&self) -> Vector<Real> {
        let ab = self.b - self.a;
        let ac = self.c - self.a;
        ab.cross(&ac)
    }

    /// Returns a new triangle with vertices transformed by `m`.
    #[inline]
    pub fn transformed(&self, m: &Transform) -> Self {
        Triangle::new(m * &self.a, m * &self.b, m * &self.c)
    }

    /// The whole triangle if `dir` is nearly parallel to its normal, otherwise its extremal
    /// edge or vertex.
    pub(crate) fn support_features(&self, dir: &Vector<Real>) -> Supports {
        let vertices = self.vertices();

        if let (Some(n), Some(normal)) = (dir.try_normalize(0.0), self.normal()) {
            if n.dot(&normal).abs() > FACE_SUPPORT_THRESHOLD {
                return Supports::from_slice(FeatureType::Face, &vertices);
            }

            let size = (self.b - self.a)
                .norm()
                .max((self.c - self.a).norm())
                .max(1.0);
            return utils::point_cloud_support_feature(&n, &vertices, size * 1.0e-4);
        }

        Supports::single(self.local_support_point(dir))
    }
}

impl SupportMap for Triangle {
    #[inline]
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        let d1 = self.a.coords.dot(dir);
        let d2 = self.b.coords.dot(dir);
        let d3 = self.c.coords.dot(dir);

        if d1 > d2 {
            if d1 > d3 {
                self.a
            } else {
                self.c
            }
        } else if d2 > d3 {
            self.b
        } else {
            self.c
        }
    }
}
