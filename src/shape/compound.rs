//!
//! Shape composed from the union of primitives.
//!

use crate::bounding_volume::{Aabb, BoundingVolume};
use crate::math::{Real, Transform};
use crate::shape::{ConcaveShape, Shape, SharedShape};
use alloc::vec::Vec;
use core::ops::ControlFlow;
use rstar::primitives::{GeomWithData, Rectangle};
use rstar::RTree;

type PartEnvelope = GeomWithData<Rectangle<[Real; 3]>, u32>;

/// Error raised when a compound shape cannot be built.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum CompoundError {
    /// A compound shape must contain at least one part.
    #[error("A compound shape must contain at least one part.")]
    Empty,
    /// The part at the given index has no support mapping (it is a plane, a concave shape, or a
    /// soft body).
    #[error("The part {0} of the compound shape is not convex.")]
    NonConvexPart(usize),
}

/// A compound shape with an aabb bounding volume.
///
/// A compound shape is a shape composed of the union of several simpler shape. This is
/// the main way of creating a concave shape from convex parts. Each parts can have its own
/// delta transformation to shift or rotate it with regard to the other shapes.
#[derive(Clone)]
pub struct Compound {
    shapes: Vec<(Transform, SharedShape)>,
    tree: RTree<PartEnvelope>,
    aabbs: Vec<Aabb>,
    aabb: Aabb,
}

impl Compound {
    /// Builds a new compound shape.
    ///
    /// Every part must be convex, i.e., must have a support mapping.
    pub fn new(shapes: Vec<(Transform, SharedShape)>) -> Result<Compound, CompoundError> {
        if shapes.is_empty() {
            return Err(CompoundError::Empty);
        }

        let mut aabbs = Vec::with_capacity(shapes.len());
        let mut envelopes = Vec::with_capacity(shapes.len());
        let mut aabb = Aabb::new_invalid();

        for (i, (delta, shape)) in shapes.iter().enumerate() {
            if shape.as_support_map().is_none() {
                return Err(CompoundError::NonConvexPart(i));
            }

            let part_aabb = shape.compute_aabb(delta);
            let envelope = part_aabb.to_envelope();
            aabb.merge(&part_aabb);
            aabbs.push(part_aabb);
            envelopes.push(GeomWithData::new(
                Rectangle::from_corners(envelope.lower(), envelope.upper()),
                i as u32,
            ));
        }

        Ok(Compound {
            shapes,
            tree: RTree::bulk_load(envelopes),
            aabbs,
            aabb,
        })
    }
}

impl Compound {
    /// The shapes of this compound shape.
    #[inline]
    pub fn shapes(&self) -> &[(Transform, SharedShape)] {
        &self.shapes[..]
    }

    /// The [`Aabb`] of this compound in its local-space.
    #[inline]
    pub fn local_aabb(&self) -> &Aabb {
        &self.aabb
    }

    /// The shapes Aabbs.
    #[inline]
    pub fn aabbs(&self) -> &[Aabb] {
        &self.aabbs[..]
    }
}

impl ConcaveShape for Compound {
    fn cull(
        &self,
        local_aabb: &Aabb,
        f: &mut dyn FnMut(u32, Option<&Transform>, &dyn Shape) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        for part in self
            .tree
            .locate_in_envelope_intersecting(&local_aabb.to_envelope())
        {
            let (delta, shape) = &self.shapes[part.data as usize];
            if f(part.data, Some(delta), &**shape).is_break() {
                return ControlFlow::Break(());
            }
        }

        ControlFlow::Continue(())
    }
}
