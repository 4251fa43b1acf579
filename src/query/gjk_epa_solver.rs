use crate::math::{Point, Real, Transform, Vector, DEFAULT_EPSILON};
use crate::query::epa::EPA;
use crate::query::gjk::{self, DilatedShape, GJKResult, VoronoiSimplex};
use crate::query::{ClosestPair, ContactPair, DistanceSolver, PenetrationSolver};
use crate::shape::{Ball, Shape};

/// The default convex solver, based on the GJK and EPA algorithms.
///
/// Pairs of balls placed by rigid (or uniformly scaled) transforms are solved in closed form.
/// Every other pair must be made of two support-mapped shapes; other pairs never collide.
#[derive(Copy, Clone, Debug, Default)]
pub struct GjkEpaSolver;

/// A ball placed in world-space.
struct WorldBall {
    center: Point<Real>,
    radius: Real,
}

fn world_ball(pos: &Transform, shape: &dyn Shape) -> Option<WorldBall> {
    let ball: &Ball = shape.as_ball()?;
    let scale = pos.uniform_scale()?;
    Some(WorldBall {
        center: pos.origin_point(),
        radius: ball.radius * scale,
    })
}

fn initial_direction(
    pos_a: &Transform,
    pos_b: &Transform,
    sep_axis: Option<&Vector<Real>>,
) -> Vector<Real> {
    match sep_axis {
        Some(axis) if axis.norm_squared() > DEFAULT_EPSILON => *axis,
        _ => pos_b.origin - pos_a.origin,
    }
}

impl PenetrationSolver for GjkEpaSolver {
    fn penetration(
        &self,
        pos_a: &Transform,
        shape_a: &dyn Shape,
        pos_b: &Transform,
        shape_b: &dyn Shape,
        sink: &mut dyn FnMut(ContactPair),
        sep_axis: Option<&mut Vector<Real>>,
        margin_a: Real,
        margin_b: Real,
    ) -> bool {
        if let (Some(b1), Some(b2)) = (world_ball(pos_a, shape_a), world_ball(pos_b, shape_b)) {
            let r1 = b1.radius + margin_a;
            let r2 = b2.radius + margin_b;
            let delta = b2.center - b1.center;
            let dist = delta.norm();

            if dist >= r1 + r2 {
                if let (Some(axis), Some(n)) = (sep_axis, delta.try_normalize(DEFAULT_EPSILON)) {
                    *axis = n;
                }
                return false;
            }

            let n = delta
                .try_normalize(DEFAULT_EPSILON)
                .unwrap_or_else(Vector::y);
            sink(ContactPair::new(b1.center + n * r1, 0, b2.center - n * r2, 0));
            return true;
        }

        let (Some(g1), Some(g2)) = (shape_a.as_support_map(), shape_b.as_support_map()) else {
            log::trace!(
                "No penetration solver for {:?} and {:?}.",
                shape_a.shape_type(),
                shape_b.shape_type()
            );
            return false;
        };

        let g1 = DilatedShape::new(g1, margin_a);
        let g2 = DilatedShape::new(g2, margin_b);
        let init_dir = initial_direction(pos_a, pos_b, sep_axis.as_deref());
        let mut simplex = VoronoiSimplex::new();

        match gjk::closest_points(pos_a, &g1, pos_b, &g2, &init_dir, &mut simplex) {
            GJKResult::ClosestPoints(_, _, dir) => {
                if let Some(axis) = sep_axis {
                    *axis = *dir;
                }
                false
            }
            GJKResult::Intersection => {
                let (p1, p2) = match EPA::new().closest_points(pos_a, &g1, pos_b, &g2, &simplex) {
                    Some((p1, p2, _)) => (p1, p2),
                    None => {
                        log::debug!("EPA failed: reporting a contact without penetration depth.");
                        simplex.closest_points()
                    }
                };

                sink(ContactPair::new(p1, 0, p2, 0));
                true
            }
        }
    }
}

impl DistanceSolver for GjkEpaSolver {
    fn closest_points(
        &self,
        pos_a: &Transform,
        shape_a: &dyn Shape,
        pos_b: &Transform,
        shape_b: &dyn Shape,
        sep_axis: Option<&mut Vector<Real>>,
    ) -> Option<ClosestPair> {
        if let (Some(b1), Some(b2)) = (world_ball(pos_a, shape_a), world_ball(pos_b, shape_b)) {
            let delta = b2.center - b1.center;
            let dist = delta.norm();

            if dist <= b1.radius + b2.radius {
                return None;
            }

            let n = delta / dist;
            if let Some(axis) = sep_axis {
                *axis = n;
            }

            return Some(ClosestPair::new(
                b1.center + n * b1.radius,
                b2.center - n * b2.radius,
            ));
        }

        let (Some(g1), Some(g2)) = (shape_a.as_support_map(), shape_b.as_support_map()) else {
            log::trace!(
                "No distance solver for {:?} and {:?}.",
                shape_a.shape_type(),
                shape_b.shape_type()
            );
            return None;
        };

        let init_dir = initial_direction(pos_a, pos_b, sep_axis.as_deref());
        let mut simplex = VoronoiSimplex::new();

        match gjk::closest_points(pos_a, g1, pos_b, g2, &init_dir, &mut simplex) {
            GJKResult::ClosestPoints(p1, p2, dir) => {
                if let Some(axis) = sep_axis {
                    *axis = *dir;
                }
                Some(ClosestPair::new(p1, p2))
            }
            GJKResult::Intersection => None,
        }
    }
}
