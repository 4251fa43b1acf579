use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Transform, Vector, DEFAULT_EPSILON, DIM};
use crate::query::{ClosestPair, ContactPair, DistanceSolver, PenetrationSolver};
use crate::shape::{ConcaveShape, Shape};
use core::ops::ControlFlow;

/// Statistics gathered while testing the parts of a concave shape.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ConcaveQuery {
    /// The number of parts returned by the culling query.
    pub aabb_tests: usize,
    /// The number of parts found in contact.
    pub collisions: usize,
}

/// The region of the local-space of a concave shape that may interact with some object.
///
/// `range` gives the world-space extent of that object, relative to the origin of `pos_concave`,
/// along a unit axis. The extent is enlarged by `margin` on both sides. Returns `None` if the
/// basis of `pos_concave` has a zero axis.
///
/// The result is exact as long as the basis is orthogonal.
pub fn local_query_aabb(
    pos_concave: &Transform,
    margin: Real,
    mut range: impl FnMut(&Vector<Real>) -> (Real, Real),
) -> Option<Aabb> {
    let mut mins = Point::origin();
    let mut maxs = Point::origin();

    for i in 0..DIM {
        let axis = pos_concave.axis(i);
        let (axis, norm) = axis.try_normalize(DEFAULT_EPSILON).map(|n| (n, axis.norm()))?;
        let scale = 1.0 / norm;
        let (min, max) = range(&axis);

        mins[i] = (min - margin) * scale;
        maxs[i] = (max + margin) * scale;
    }

    Some(Aabb::new(mins, maxs))
}

/// The world-space position of a part of a concave shape.
#[inline]
pub(crate) fn part_position(pos_concave: &Transform, part_pos: Option<&Transform>) -> Transform {
    part_pos.map(|p| pos_concave * p).unwrap_or(*pos_concave)
}

/// `pos` with its origin expressed relative to `origin`.
fn relative_to(pos: &Transform, origin: &Vector<Real>) -> Transform {
    pos.with_origin(pos.origin - origin)
}

fn as_concave(shape: &dyn Shape) -> Option<&dyn ConcaveShape> {
    let concave = shape.as_concave_shape();
    if concave.is_none() {
        log::trace!(
            "The shape {:?} is concave, but is not a ConcaveShape.",
            shape.shape_type()
        );
    }
    concave
}

/// Contacts between a convex shape and each part of a concave shape.
///
/// Contacts are given to `sink` with their second index set to the identifier of the part they
/// belong to. Returns `true` if at least one part is in contact with `shape`.
pub fn contact_shape_concave_shape<S: ?Sized + PenetrationSolver>(
    solver: &S,
    pos_shape: &Transform,
    shape: &dyn Shape,
    pos_concave: &Transform,
    concave: &dyn Shape,
    sink: &mut dyn FnMut(ContactPair),
    margin_shape: Real,
    margin_concave: Real,
) -> bool {
    let Some(concave) = as_concave(concave) else {
        return false;
    };

    let rel_pos = relative_to(pos_shape, &pos_concave.origin);
    let Some(local_aabb) = local_query_aabb(pos_concave, margin_shape, |axis| {
        shape.project_range(axis, &rel_pos)
    }) else {
        log::debug!("Degenerate concave shape transform: ignoring the concave shape.");
        return false;
    };

    let mut query = ConcaveQuery::default();

    let _ = concave.cull(&local_aabb, &mut |part_id, part_pos, part| {
        query.aabb_tests += 1;

        let part_pos = part_position(pos_concave, part_pos);
        let collided = solver.penetration(
            pos_shape,
            shape,
            &part_pos,
            part,
            &mut |contact| {
                sink(ContactPair {
                    index_b: part_id,
                    ..contact
                })
            },
            None,
            margin_shape,
            margin_concave,
        );

        if collided {
            query.collisions += 1;
        }

        ControlFlow::Continue(())
    });

    log::trace!(
        "Concave contact query: {} parts tested, {} in contact.",
        query.aabb_tests,
        query.collisions
    );

    query.collisions > 0
}

/// The closest points between a convex shape and the parts of a concave shape.
///
/// Only the parts close to `shape` are tested, or the parts intersecting `hint` (given in
/// world-space) if it is provided. Returns `None` if any tested part overlaps `shape`, or if no
/// part was tested at all.
pub fn closest_points_shape_concave_shape<S: ?Sized + DistanceSolver>(
    solver: &S,
    pos_shape: &Transform,
    shape: &dyn Shape,
    pos_concave: &Transform,
    concave: &dyn Shape,
    hint: Option<&Aabb>,
) -> Option<ClosestPair> {
    let concave = as_concave(concave)?;

    let local_aabb = if let Some(hint) = hint {
        let rel_hint = hint.translated(&-pos_concave.origin);
        local_query_aabb(pos_concave, 0.0, |axis| rel_hint.project_range(axis))
    } else {
        let rel_pos = relative_to(pos_shape, &pos_concave.origin);
        local_query_aabb(pos_concave, 0.0, |axis| shape.project_range(axis, &rel_pos))
    };
    let Some(local_aabb) = local_aabb else {
        log::debug!("Degenerate concave shape transform: ignoring the concave shape.");
        return None;
    };

    let mut query = ConcaveQuery::default();
    let mut best: Option<ClosestPair> = None;

    let flow = concave.cull(&local_aabb, &mut |_, part_pos, part| {
        query.aabb_tests += 1;

        let part_pos = part_position(pos_concave, part_pos);
        let Some(pair) = solver.closest_points(pos_shape, shape, &part_pos, part, None) else {
            return ControlFlow::Break(());
        };

        query.collisions += 1;
        if best.map_or(true, |best| pair.distance() < best.distance()) {
            best = Some(pair);
        }

        ControlFlow::Continue(())
    });

    log::trace!(
        "Concave distance query: {} parts tested, {} disjoint.",
        query.aabb_tests,
        query.collisions
    );

    if flow.is_break() {
        None
    } else {
        best
    }
}
