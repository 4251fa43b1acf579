use crate::math::{Point, Real};
use core::mem;

/// A pair of contact points between two shapes.
///
/// Both points are expressed in world-space. The indices identify the sub-part of each shape the
/// point belongs to: the part of a concave shape, the node of a soft body, or `0` for a convex
/// shape.
#[derive(Debug, PartialEq, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContactPair {
    /// The contact point on the first shape.
    pub point_a: Point<Real>,
    /// The sub-part of the first shape the contact belongs to.
    pub index_a: u32,
    /// The contact point on the second shape.
    pub point_b: Point<Real>,
    /// The sub-part of the second shape the contact belongs to.
    pub index_b: u32,
}

impl ContactPair {
    /// Creates a new contact pair.
    #[inline]
    pub fn new(point_a: Point<Real>, index_a: u32, point_b: Point<Real>, index_b: u32) -> Self {
        ContactPair {
            point_a,
            index_a,
            point_b,
            index_b,
        }
    }

    /// Swaps the points and indices of this contact pair.
    #[inline]
    pub fn flip(&mut self) {
        mem::swap(&mut self.point_a, &mut self.point_b);
        mem::swap(&mut self.index_a, &mut self.index_b);
    }

    /// Returns a new contact pair containing the swapped points and indices of `self`.
    #[inline]
    pub fn flipped(mut self) -> Self {
        self.flip();
        self
    }

    /// The distance between both contact points.
    #[inline]
    pub fn depth(&self) -> Real {
        na::distance(&self.point_a, &self.point_b)
    }
}

/// Closest points between two disjoint shapes.
#[derive(Debug, PartialEq, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClosestPair {
    /// The point of the first shape closest to the second shape.
    pub point_a: Point<Real>,
    /// The point of the second shape closest to the first shape.
    pub point_b: Point<Real>,
}

impl ClosestPair {
    /// Creates a new pair of closest points.
    #[inline]
    pub fn new(point_a: Point<Real>, point_b: Point<Real>) -> Self {
        ClosestPair { point_a, point_b }
    }

    /// The distance between both points.
    #[inline]
    pub fn distance(&self) -> Real {
        na::distance(&self.point_a, &self.point_b)
    }

    /// Returns a new pair with both points swapped.
    #[inline]
    pub fn flipped(self) -> Self {
        ClosestPair::new(self.point_b, self.point_a)
    }
}
