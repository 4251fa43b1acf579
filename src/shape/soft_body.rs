//! Soft bodies, approximated by a cloud of nodes each dilated by a collision margin.

use crate::bounding_volume::{details::local_point_cloud_aabb, Aabb, BoundingVolume};
use crate::math::{Isometry, Point, Real, Transform};
use alloc::vec::Vec;
use core::ops::ControlFlow;
use rstar::primitives::GeomWithData;
use rstar::RTree;

type NodeEntry = GeomWithData<[Real; 3], u32>;

/// Error raised when a soft body is given invalid parameters.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq)]
pub enum SoftBodyError {
    /// The collision margin must be finite and non-negative.
    #[error("the collision margin {0} must be finite and non-negative.")]
    InvalidMargin(Real),
    /// A node position has a NaN or infinite coordinate.
    #[error("the node {0} has a non-finite position.")]
    NonFiniteNode(usize),
}

/// The node cloud of a soft body.
///
/// Node positions live in their own space (usually the world-space of the simulation). The
/// reference pose of the body maps its local-space to node-space: a node at `p` is at
/// `pos_b * inv_transform() * p` once the soft body shape is placed at `pos_b`.
#[derive(Clone)]
pub struct SoftBody {
    nodes: Vec<Point<Real>>,
    tree: RTree<NodeEntry>,
    bounds: Aabb,
    pose: Isometry<Real>,
    inv_transform: Transform,
    collision_margin: Real,
}

impl SoftBody {
    /// Creates a soft body from its node positions and collision margin.
    ///
    /// The reference pose is the identity.
    pub fn new(nodes: Vec<Point<Real>>, collision_margin: Real) -> Result<Self, SoftBodyError> {
        let mut result = Self {
            nodes: Vec::new(),
            tree: RTree::new(),
            bounds: Aabb::new_invalid(),
            pose: Isometry::identity(),
            inv_transform: Transform::identity(),
            collision_margin: 0.0,
        };
        result.set_collision_margin(collision_margin)?;
        result.set_nodes(nodes)?;
        Ok(result)
    }

    /// Returns `self` with the given reference pose.
    #[must_use]
    pub fn with_pose(mut self, pose: Isometry<Real>) -> Self {
        self.set_pose(pose);
        self
    }

    /// Sets the reference pose of this soft body.
    pub fn set_pose(&mut self, pose: Isometry<Real>) {
        self.inv_transform = Transform::from_isometry(&pose.inverse());
        self.pose = pose;
    }

    /// The reference pose of this soft body.
    #[inline]
    pub fn pose(&self) -> &Isometry<Real> {
        &self.pose
    }

    /// The inverse of the reference pose.
    #[inline]
    pub fn inv_transform(&self) -> &Transform {
        &self.inv_transform
    }

    /// Replaces every node position, and rebuilds the node index.
    pub fn set_nodes(&mut self, nodes: Vec<Point<Real>>) -> Result<(), SoftBodyError> {
        if let Some(i) = nodes.iter().position(|pt| !pt.iter().all(|x| x.is_finite())) {
            return Err(SoftBodyError::NonFiniteNode(i));
        }

        let entries = nodes
            .iter()
            .enumerate()
            .map(|(i, pt)| GeomWithData::new((*pt).into(), i as u32))
            .collect();

        self.tree = RTree::bulk_load(entries);
        self.bounds = local_point_cloud_aabb(&nodes);
        self.nodes = nodes;
        Ok(())
    }

    /// The number of nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The positions of every node, in node-space.
    #[inline]
    pub fn nodes(&self) -> &[Point<Real>] {
        &self.nodes[..]
    }

    /// The position of the `i`-th node, in node-space.
    ///
    /// Panics if `i` is not a valid node index.
    #[inline]
    pub fn node_position(&self, i: u32) -> Point<Real> {
        self.nodes[i as usize]
    }

    /// The radius of the sphere centered at each node.
    #[inline]
    pub fn collision_margin(&self) -> Real {
        self.collision_margin
    }

    /// Sets the radius of the sphere centered at each node.
    pub fn set_collision_margin(&mut self, margin: Real) -> Result<(), SoftBodyError> {
        if !margin.is_finite() || margin < 0.0 {
            return Err(SoftBodyError::InvalidMargin(margin));
        }

        self.collision_margin = margin;
        Ok(())
    }

    /// The node-space [`Aabb`] of the node positions, not enlarged by the collision margin.
    ///
    /// This is invalid if the soft body has no node.
    #[inline]
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// Calls `f` with the index of each node located inside `aabb` (given in node-space).
    pub fn query_aabb(
        &self,
        aabb: &Aabb,
        f: &mut dyn FnMut(u32) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        for node in self.tree.locate_in_envelope_intersecting(&aabb.to_envelope()) {
            if f(node.data).is_break() {
                return ControlFlow::Break(());
            }
        }

        ControlFlow::Continue(())
    }
}

/// The shape of a soft body.
#[derive(Clone)]
pub struct SoftBodyShape {
    body: SoftBody,
}

impl SoftBodyShape {
    /// Wraps a soft body into a shape.
    pub fn new(body: SoftBody) -> Self {
        Self { body }
    }

    /// The soft body represented by this shape.
    #[inline]
    pub fn body(&self) -> &SoftBody {
        &self.body
    }

    /// The soft body represented by this shape.
    #[inline]
    pub fn body_mut(&mut self) -> &mut SoftBody {
        &mut self.body
    }

    /// The local-space [`Aabb`] of the node spheres.
    pub fn local_aabb(&self) -> Aabb {
        if !self.body.bounds.is_valid() {
            return self.body.bounds;
        }

        self.body
            .bounds
            .loosened(self.body.collision_margin)
            .transform_by(&self.body.inv_transform)
    }
}
