use crate::math::{Point, Real};
use arrayvec::ArrayVec;

/// The maximum number of support points a shape may report for a single direction.
pub const MAX_SUPPORTS: usize = 16;

/// Minimum absolute cosine between a search direction and a face normal for the face to be
/// reported as a whole.
pub const FACE_SUPPORT_THRESHOLD: Real = 0.9998;

/// Maximum absolute cosine between a search direction and an edge direction for the edge to be
/// reported as a whole.
pub const EDGE_SUPPORT_THRESHOLD: Real = 0.0002;

/// The kind of geometric feature described by a set of support points.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum FeatureType {
    /// A single extremal point.
    #[default]
    Point,
    /// A segment, given by its two endpoints.
    Edge,
    /// A planar polygon, given by its vertices.
    Face,
    /// A planar disk, encoded by exactly three points: its center `c`, then `c + a1` and `c + a2`
    /// where `a1` and `a2` are orthogonal radius vectors.
    Circle,
}

/// The support points of a shape along some direction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Supports {
    /// The extremal points, at most [`MAX_SUPPORTS`] of them.
    pub points: ArrayVec<Point<Real>, MAX_SUPPORTS>,
    /// The feature these points describe.
    pub feature: FeatureType,
}

impl Supports {
    /// An empty set of support points describing a feature of the given type.
    pub fn new(feature: FeatureType) -> Self {
        Self {
            points: ArrayVec::new(),
            feature,
        }
    }

    /// A single extremal point.
    pub fn single(point: Point<Real>) -> Self {
        let mut points = ArrayVec::new();
        points.push(point);
        Self {
            points,
            feature: FeatureType::Point,
        }
    }

    /// Builds a feature from a slice of points.
    ///
    /// Points beyond [`MAX_SUPPORTS`] are ignored.
    pub fn from_slice(feature: FeatureType, pts: &[Point<Real>]) -> Self {
        Self {
            points: pts.iter().take(MAX_SUPPORTS).copied().collect(),
            feature,
        }
    }

    /// The number of support points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Is there no support point?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
