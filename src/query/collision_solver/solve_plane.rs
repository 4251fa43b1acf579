use crate::math::{Point, Real, Transform, DEFAULT_EPSILON};
use crate::query::{ClosestPair, ContactPair};
use crate::shape::{FeatureType, Plane, Shape, ShapeType, Supports, MAX_SUPPORTS};
use arrayvec::ArrayVec;
use na::RealField;

/// The world-space support points of `shape` facing a world-space plane.
///
/// Returns `None` if either transform is degenerate.
fn supports_toward_plane(
    pos_plane: &Transform,
    plane: &Plane,
    pos_shape: &Transform,
    shape: &dyn Shape,
) -> Option<(Plane, ArrayVec<Point<Real>, MAX_SUPPORTS>)> {
    let Some(world_plane) = plane.transformed(pos_plane) else {
        log::debug!("Degenerate plane transform: ignoring the plane.");
        return None;
    };

    let local_dir = pos_shape
        .transpose_transform_vector(&-*world_plane.normal)
        .try_normalize(DEFAULT_EPSILON)?;
    let supports = shape.local_supports(&local_dir);
    let pts = feature_points(&supports)
        .into_iter()
        .map(|pt| pos_shape.transform_point(&pt))
        .collect();

    Some((world_plane, pts))
}

/// The points used to test a support feature against a plane.
///
/// A circle is replaced by three points evenly spaced on its boundary, every other feature is
/// used as-is.
///
/// # Panics
/// If a circle is not described by exactly three points.
pub fn feature_points(supports: &Supports) -> ArrayVec<Point<Real>, MAX_SUPPORTS> {
    if supports.feature != FeatureType::Circle {
        return supports.points.clone();
    }

    assert_eq!(
        supports.len(),
        3,
        "A circle feature must be given by its center and two radius vectors."
    );

    let center = supports.points[0];
    let axis1 = supports.points[1] - center;
    let axis2 = supports.points[2] - center;

    (0..3)
        .map(|i| {
            let angle = Real::two_pi() * i as Real / 3.0;
            center + axis1 * angle.cos() + axis2 * angle.sin()
        })
        .collect()
}

/// Contacts between a plane and any other shape.
///
/// Each support point of `shape` lying strictly below the plane is reported, paired with its
/// projection on the plane. Returns `true` if at least one contact was found.
///
/// A support point lying exactly on the plane is not a contact: a ball of radius `r` whose
/// center is at height `r` above the plane does not collide with it.
pub fn contact_plane_shape(
    pos_plane: &Transform,
    plane: &dyn Shape,
    pos_shape: &Transform,
    shape: &dyn Shape,
    sink: &mut dyn FnMut(ContactPair),
) -> bool {
    let Some(plane) = plane.as_plane() else {
        return false;
    };
    if shape.shape_type() == ShapeType::Plane {
        return false;
    }
    let Some((world_plane, supports)) = supports_toward_plane(pos_plane, plane, pos_shape, shape)
    else {
        return false;
    };

    let mut found = false;

    for pt in supports {
        if world_plane.distance_to(&pt) >= 0.0 {
            continue;
        }

        found = true;
        sink(ContactPair::new(world_plane.project_point(&pt), 0, pt, 0));
    }

    found
}

/// The support point of `shape` deepest below (or closest to) a plane, and its signed distance to
/// the plane.
///
/// The returned pair contains the projection of the support point on the plane, and the support
/// point itself. The shapes overlap if the signed distance is not positive. Returns `None` if the
/// pair is not supported or if `shape` has no support point.
pub fn closest_points_plane_shape(
    pos_plane: &Transform,
    plane: &dyn Shape,
    pos_shape: &Transform,
    shape: &dyn Shape,
) -> Option<(ClosestPair, Real)> {
    let plane = plane.as_plane()?;
    if shape.shape_type() == ShapeType::Plane {
        return None;
    }
    let (world_plane, supports) = supports_toward_plane(pos_plane, plane, pos_shape, shape)?;

    let (closest, dist) = supports
        .into_iter()
        .map(|pt| (pt, world_plane.distance_to(&pt)))
        .reduce(|best, curr| if curr.1 < best.1 { curr } else { best })?;

    Some((
        ClosestPair::new(world_plane.project_point(&closest), closest),
        dist,
    ))
}
