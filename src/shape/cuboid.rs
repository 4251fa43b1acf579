//! Support mapping based Cuboid shape.

use crate::math::{Point, Real, Vector, DEFAULT_EPSILON, DIM};
use crate::shape::{
    FeatureType, SupportMap, Supports, EDGE_SUPPORT_THRESHOLD, FACE_SUPPORT_THRESHOLD,
};

/// Shape of a box.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Cuboid {
    /// The half-extents of the cuboid.
    pub half_extents: Vector<Real>,
}

impl Cuboid {
    /// Creates a new box from its half-extents. Half-extents are the box half-width along each
    /// axis. Each half-extent must be positive.
    #[inline]
    pub fn new(half_extents: Vector<Real>) -> Cuboid {
        Cuboid { half_extents }
    }

    /// The face, edge, or vertex of this cuboid that is the most extremal along `dir`.
    ///
    /// Faces are returned as a loop of four vertices.
    pub(crate) fn support_features(&self, dir: &Vector<Real>) -> Supports {
        let Some(n) = dir.try_normalize(DEFAULT_EPSILON) else {
            return Supports::single(self.local_support_point(dir));
        };

        for i in 0..DIM {
            if n[i].abs() > FACE_SUPPORT_THRESHOLD {
                let i1 = (i + 1) % DIM;
                let i2 = (i + 2) % DIM;
                let mut res = Supports::new(FeatureType::Face);

                for (s1, s2) in [(1.0, 1.0), (-1.0, 1.0), (-1.0, -1.0), (1.0, -1.0)] {
                    let mut pt = Point::origin();
                    pt[i] = self.half_extents[i].copysign(n[i]);
                    pt[i1] = self.half_extents[i1] * s1;
                    pt[i2] = self.half_extents[i2] * s2;
                    res.points.push(pt);
                }

                return res;
            }
        }

        for i in 0..DIM {
            if n[i].abs() < EDGE_SUPPORT_THRESHOLD {
                let mut a = self.local_support_point(&n);
                let mut b = a;
                a[i] = -self.half_extents[i];
                b[i] = self.half_extents[i];
                return Supports::from_slice(FeatureType::Edge, &[a, b]);
            }
        }

        Supports::single(self.local_support_point(&n))
    }
}

impl SupportMap for Cuboid {
    #[inline]
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        let mut res = self.half_extents;

        for i in 0..DIM {
            if dir[i] < 0.0 {
                res[i] = -res[i];
            }
        }

        Point::from(res)
    }
}
