//! The Gilbert-Johnson-Keerthi distance algorithm.

use na::{self, ComplexField, Unit};

use crate::math::{Point, Real, Transform, Vector, DIM};
use crate::query::gjk::{CSOPoint, VoronoiSimplex};
use crate::shape::SupportMap;

/// The maximum number of iterations of the GJK loop.
const MAX_ITERATIONS: usize = 100;

/// Results of the GJK algorithm.
///
/// Points and directions are expressed in world-space.
#[derive(Clone, Debug, PartialEq)]
pub enum GJKResult {
    /// The shapes are intersecting (overlapping).
    ///
    /// The simplex given to the algorithm contains the origin and may be used to initialize
    /// the EPA.
    Intersection,

    /// The closest points on both shapes were found.
    ///
    /// The unit vector is the separating direction, pointing from the first shape toward the
    /// second one.
    ClosestPoints(Point<Real>, Point<Real>, Unit<Vector<Real>>),
}

/// The absolute tolerance used by the GJK algorithm.
pub fn eps_tol() -> Real {
    let _eps = crate::math::DEFAULT_EPSILON;
    _eps * 10.0
}

/// Whether a simplex that stopped making progress should be considered to contain the origin.
///
/// This happens when the simplex is flat and passes through the origin up to rounding errors,
/// while the CSO still extends beyond the origin along the search direction.
fn origin_on_simplex(
    simplex: &VoronoiSimplex,
    max_bound: Real,
    min_bound: Real,
    eps_rel: Real,
) -> bool {
    let scale = simplex.max_sq_len().sqrt().max(1.0);
    min_bound < 0.0 && max_bound <= eps_rel * scale
}

/// Computes the closest points between two shapes using the GJK algorithm.
///
/// The search starts along `init_dir`, which should point from the first shape toward the
/// second one. The simplex is reset by this function, and left in its final state.
pub fn closest_points<G1, G2>(
    pos1: &Transform,
    g1: &G1,
    pos2: &Transform,
    g2: &G2,
    init_dir: &Vector<Real>,
    simplex: &mut VoronoiSimplex,
) -> GJKResult
where
    G1: ?Sized + SupportMap,
    G2: ?Sized + SupportMap,
{
    let _eps_tol: Real = eps_tol();
    let _eps_rel: Real = ComplexField::sqrt(_eps_tol);

    let init_dir = if init_dir.norm_squared() > _eps_tol * _eps_tol {
        *init_dir
    } else {
        Vector::x()
    };
    simplex.reset(CSOPoint::from_shapes(pos1, g1, pos2, g2, &init_dir));

    let mut proj = simplex.project_origin_and_reduce();

    let mut old_dir;

    if let Some(proj_dir) = Unit::try_new(proj.coords, 0.0) {
        old_dir = -proj_dir;
    } else {
        return GJKResult::Intersection;
    }

    let mut max_bound = Real::MAX;
    let mut min_bound = Real::MAX;
    let mut dir;
    let mut niter = 0;

    loop {
        let old_max_bound = max_bound;

        if let Some((new_dir, dist)) = Unit::try_new_and_get(-proj.coords, _eps_tol) {
            dir = new_dir;
            max_bound = dist;
        } else {
            // The origin is on the simplex.
            return GJKResult::Intersection;
        }

        if max_bound >= old_max_bound {
            // Upper bounds inconsistencies.
            if origin_on_simplex(simplex, max_bound, min_bound, _eps_rel) {
                return GJKResult::Intersection;
            }
            let (p1, p2) = simplex.closest_points();
            return GJKResult::ClosestPoints(p1, p2, old_dir);
        }

        let cso_point = CSOPoint::from_shapes(pos1, g1, pos2, g2, &dir);
        min_bound = -dir.dot(&cso_point.point.coords);

        if !min_bound.is_finite() {
            log::debug!("Non-finite support point found by GJK: {:?}", cso_point);
            return GJKResult::Intersection;
        }

        if max_bound - min_bound <= _eps_rel * max_bound {
            // The distance found has a good enough precision.
            let (p1, p2) = simplex.closest_points();
            return GJKResult::ClosestPoints(p1, p2, dir);
        }

        if !simplex.add_point(cso_point) {
            if origin_on_simplex(simplex, max_bound, min_bound, _eps_rel) {
                return GJKResult::Intersection;
            }
            let (p1, p2) = simplex.closest_points();
            return GJKResult::ClosestPoints(p1, p2, dir);
        }

        old_dir = dir;
        proj = simplex.project_origin_and_reduce();

        if simplex.dimension() == DIM {
            if min_bound >= _eps_tol {
                let (p1, p2) = simplex.closest_points();
                return GJKResult::ClosestPoints(p1, p2, old_dir);
            } else {
                // Point inside of the cso.
                return GJKResult::Intersection;
            }
        }

        niter += 1;

        if niter == MAX_ITERATIONS {
            log::debug!("GJK did not converge after {} iterations.", MAX_ITERATIONS);
            let (p1, p2) = simplex.closest_points();
            return GJKResult::ClosestPoints(p1, p2, old_dir);
        }
    }
}
