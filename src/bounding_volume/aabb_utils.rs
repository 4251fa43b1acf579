use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Transform, Vector, DIM};
use crate::shape::SupportMap;

/// Computes the [`Aabb`] of a support-mapped shape transformed by `m`.
///
/// Each bound is the support point along one of the six signed world axes.
pub fn support_map_aabb<G>(m: &Transform, i: &G) -> Aabb
where
    G: ?Sized + SupportMap,
{
    let mut min = Vector::zeros();
    let mut max = Vector::zeros();
    let mut basis = Vector::zeros();

    for d in 0..DIM {
        basis[d] = 1.0;
        max[d] = i.support_point(m, &basis)[d];

        basis[d] = -1.0;
        min[d] = i.support_point(m, &basis)[d];

        basis[d] = 0.0;
    }

    Aabb::new(Point::from(min), Point::from(max))
}

/// Computes the [`Aabb`] of a set of points, without transforming them.
///
/// Returns an invalid (empty) [`Aabb`] if the iterator is empty.
pub fn local_point_cloud_aabb<'a, I>(pts: I) -> Aabb
where
    I: IntoIterator<Item = &'a Point<Real>>,
{
    let mut aabb = Aabb::new_invalid();

    for pt in pts {
        aabb.take_point(*pt);
    }

    aabb
}
