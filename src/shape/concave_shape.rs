use crate::bounding_volume::Aabb;
use crate::math::Transform;
use crate::shape::Shape;
use core::ops::ControlFlow;

/// Trait implemented by shapes made of a collection of convex parts.
///
/// Collision queries against a concave shape are answered by visiting the parts whose bounding
/// box overlaps the region of interest and querying each of them separately.
pub trait ConcaveShape {
    /// Calls `f` with each part whose AABB, in the local-space of this shape, intersects
    /// `local_aabb`.
    ///
    /// The callback receives the part identifier, the part's position relative to this shape
    /// (`None` meaning identity), and the part itself. Returning [`ControlFlow::Break`] from the
    /// callback stops the traversal, and is then returned by this method.
    fn cull(
        &self,
        local_aabb: &Aabb,
        f: &mut dyn FnMut(u32, Option<&Transform>, &dyn Shape) -> ControlFlow<()>,
    ) -> ControlFlow<()>;
}
