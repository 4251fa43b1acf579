use crate::bounding_volume::{details::local_point_cloud_aabb, Aabb};
use crate::math::{Point, Real, Transform, Vector};
use crate::shape::{ConcaveShape, Shape, Triangle};
use alloc::vec::Vec;
use core::ops::ControlFlow;
use rstar::primitives::{GeomWithData, Rectangle};
use rstar::RTree;

type TriangleEnvelope = GeomWithData<Rectangle<[Real; 3]>, u32>;

/// Indicated an inconsistency while building a triangle mesh.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum TriMeshBuilderError {
    /// A triangle mesh must contain at least one triangle.
    #[error("A triangle mesh must contain at least one triangle.")]
    EmptyIndices,
    /// A triangle references a vertex that does not exist.
    #[error("the triangle {triangle} references the vertex {vertex} which does not exist.")]
    IndexOutOfBounds {
        /// The faulty triangle.
        triangle: u32,
        /// The out-of-bounds vertex index.
        vertex: u32,
    },
}

/// A triangle mesh.
///
/// Each triangle is a part of this concave shape, identified by its index in the index buffer.
#[derive(Clone)]
pub struct TriMesh {
    tree: RTree<TriangleEnvelope>,
    vertices: Vec<Point<Real>>,
    indices: Vec<[u32; 3]>,
    aabb: Aabb,
}

impl TriMesh {
    /// Creates a new triangle mesh from a vertex buffer and an index buffer.
    pub fn new(
        vertices: Vec<Point<Real>>,
        indices: Vec<[u32; 3]>,
    ) -> Result<Self, TriMeshBuilderError> {
        if indices.is_empty() {
            return Err(TriMeshBuilderError::EmptyIndices);
        }

        for (i, idx) in indices.iter().enumerate() {
            if let Some(vertex) = idx.iter().find(|v| **v as usize >= vertices.len()) {
                return Err(TriMeshBuilderError::IndexOutOfBounds {
                    triangle: i as u32,
                    vertex: *vertex,
                });
            }
        }

        let envelopes = indices
            .iter()
            .enumerate()
            .map(|(i, idx)| {
                let envelope = local_point_cloud_aabb(idx.iter().map(|v| &vertices[*v as usize]))
                    .to_envelope();
                GeomWithData::new(
                    Rectangle::from_corners(envelope.lower(), envelope.upper()),
                    i as u32,
                )
            })
            .collect();

        Ok(Self {
            tree: RTree::bulk_load(envelopes),
            aabb: local_point_cloud_aabb(&vertices),
            vertices,
            indices,
        })
    }

    /// Returns a new triangle mesh with all its vertices scaled by `scale`.
    pub fn scaled(mut self, scale: &Vector<Real>) -> Result<Self, TriMeshBuilderError> {
        self.vertices
            .iter_mut()
            .for_each(|pt| pt.coords.component_mul_assign(scale));
        Self::new(self.vertices, self.indices)
    }

    /// The local-space [`Aabb`] of this triangle mesh.
    #[inline]
    pub fn local_aabb(&self) -> &Aabb {
        &self.aabb
    }

    /// The number of triangles forming this mesh.
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.indices.len()
    }

    /// Get the `i`-th triangle of this mesh.
    ///
    /// Panics if `i` is not a valid triangle index.
    #[inline]
    pub fn triangle(&self, i: u32) -> Triangle {
        let idx = self.indices[i as usize];
        Triangle::new(
            self.vertices[idx[0] as usize],
            self.vertices[idx[1] as usize],
            self.vertices[idx[2] as usize],
        )
    }

    /// The vertex buffer of this mesh.
    #[inline]
    pub fn vertices(&self) -> &[Point<Real>] {
        &self.vertices[..]
    }

    /// The index buffer of this mesh.
    #[inline]
    pub fn indices(&self) -> &[[u32; 3]] {
        &self.indices[..]
    }
}

impl ConcaveShape for TriMesh {
    fn cull(
        &self,
        local_aabb: &Aabb,
        f: &mut dyn FnMut(u32, Option<&Transform>, &dyn Shape) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        for part in self
            .tree
            .locate_in_envelope_intersecting(&local_aabb.to_envelope())
        {
            let tri = self.triangle(part.data);
            if f(part.data, None, &tri).is_break() {
                return ControlFlow::Break(());
            }
        }

        ControlFlow::Continue(())
    }
}
