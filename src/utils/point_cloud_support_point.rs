use crate::math::{Point, Real, Vector};
use crate::shape::{FeatureType, Supports, MAX_SUPPORTS};

/// Computes the index of the support point of a cloud of points.
///
/// The point cloud must not be empty.
#[inline]
pub fn point_cloud_support_point_id(dir: &Vector<Real>, points: &[Point<Real>]) -> usize {
    let mut best_pt = 0;
    let mut best_dot = points[0].coords.dot(dir);

    for i in 1..points.len() {
        let p = &points[i];
        let dot = p.coords.dot(dir);

        if dot > best_dot {
            best_dot = dot;
            best_pt = i;
        }
    }

    best_pt
}

/// Computes the support point of a cloud of points.
#[inline]
pub fn point_cloud_support_point(dir: &Vector<Real>, points: &[Point<Real>]) -> Point<Real> {
    points[point_cloud_support_point_id(dir, points)]
}

/// Collects every point of the cloud lying on the extremal plane orthogonal to `dir`.
///
/// Points are kept if their projection on `dir` is within `tolerance` of the largest one. At
/// most [`MAX_SUPPORTS`] points are returned. The feature is a point, an edge, or a face
/// depending on how many points were found.
pub fn point_cloud_support_feature(
    dir: &Vector<Real>,
    points: &[Point<Real>],
    tolerance: Real,
) -> Supports {
    if points.is_empty() {
        return Supports::default();
    }

    let best = point_cloud_support_point_id(dir, points);
    let best_dot = points[best].coords.dot(dir);
    let mut result = Supports::new(FeatureType::Point);

    for pt in points {
        if result.points.len() == MAX_SUPPORTS {
            break;
        }

        if best_dot - pt.coords.dot(dir) <= tolerance {
            result.points.push(*pt);
        }
    }

    result.feature = match result.points.len() {
        1 => FeatureType::Point,
        2 => FeatureType::Edge,
        _ => FeatureType::Face,
    };

    result
}
