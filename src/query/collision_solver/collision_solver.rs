use crate::bounding_volume::Aabb;
use crate::math::{Real, Transform, Vector};
use crate::query::collision_solver::{
    closest_points_plane_shape, closest_points_shape_concave_shape,
    closest_points_shape_soft_body, contact_plane_shape, contact_shape_concave_shape,
    contact_shape_soft_body,
};
use crate::query::{ClosestPair, ContactPair, DistanceSolver, GjkEpaSolver, PenetrationSolver};
use crate::shape::{Shape, ShapeType};
use core::mem;

/// The resolver in charge of a pair of shapes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PairRoute {
    /// The pair never collides.
    Unsupported,
    /// A plane against any shape other than a plane or a soft body.
    Plane,
    /// A soft body against any shape other than a plane or a soft body.
    SoftBody,
    /// A convex shape against a concave shape.
    Concave,
    /// Two convex shapes.
    Convex,
}

impl PairRoute {
    /// Selects the resolver for the pair `(shape_a, shape_b)`.
    ///
    /// Also returns `true` if the resolver expects the operands in the reverse order, i.e., with
    /// `shape_b` first. Operands are ordered by increasing [`ShapeType`], so that a plane always
    /// comes first and a soft body always comes last. A concave shape is moved second when the
    /// other shape is convex. The order of the operands does not matter for [`PairRoute::Convex`].
    pub fn classify(shape_a: &dyn Shape, shape_b: &dyn Shape) -> (PairRoute, bool) {
        let mut type_a = shape_a.shape_type();
        let mut type_b = shape_b.shape_type();
        let mut concave_a = shape_a.is_concave();
        let mut concave_b = shape_b.is_concave();
        let mut swapped = false;

        if type_a > type_b {
            mem::swap(&mut type_a, &mut type_b);
            mem::swap(&mut concave_a, &mut concave_b);
            swapped = true;
        }

        if concave_a && !concave_b && type_b != ShapeType::SoftBody {
            mem::swap(&mut type_a, &mut type_b);
            mem::swap(&mut concave_a, &mut concave_b);
            swapped = !swapped;
        }

        let route = if type_a == ShapeType::Plane {
            match type_b {
                ShapeType::Plane | ShapeType::SoftBody => PairRoute::Unsupported,
                _ => PairRoute::Plane,
            }
        } else if type_b == ShapeType::SoftBody {
            if type_a == ShapeType::SoftBody {
                PairRoute::Unsupported
            } else {
                PairRoute::SoftBody
            }
        } else if concave_b {
            if concave_a {
                PairRoute::Unsupported
            } else {
                PairRoute::Concave
            }
        } else {
            PairRoute::Convex
        };

        (route, swapped)
    }
}

/// Wraps `sink` so that contacts computed with swapped operands are given back in the caller's
/// order.
fn oriented(sink: &mut dyn FnMut(ContactPair), swapped: bool) -> impl FnMut(ContactPair) + '_ {
    move |contact| {
        if swapped {
            sink(contact.flipped())
        } else {
            sink(contact)
        }
    }
}

/// A narrow-phase collision dispatcher.
///
/// It decomposes pairs involving a plane, a concave shape, or a soft body, into sub-problems
/// between convex shapes, and hands those to the convex solver `S`.
#[derive(Copy, Clone, Debug, Default)]
pub struct CollisionSolver<S = GjkEpaSolver> {
    solver: S,
}

impl<S> CollisionSolver<S> {
    /// Creates a dispatcher relying on the given convex solver.
    pub fn new(solver: S) -> Self {
        Self { solver }
    }

    /// The convex solver used by this dispatcher.
    pub fn solver(&self) -> &S {
        &self.solver
    }
}

impl<S> CollisionSolver<S>
where
    S: PenetrationSolver + DistanceSolver,
{
    /// Computes the contacts between two shapes.
    ///
    /// Each contact is given to `sink`, with its first point and index on `shape_a` and its second
    /// point and index on `shape_b`. Returns `true` if the shapes are in contact.
    ///
    /// The margins dilate the convex shapes and the convex parts of concave shapes. Planes and
    /// soft bodies ignore them. The separating axis cache is only used for pairs of convex shapes.
    /// Unsupported pairs are never in contact.
    ///
    /// # Panics
    /// If a shape describes a circular support feature with other than three points.
    pub fn solve_static(
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
        let (route, swapped) = PairRoute::classify(shape_a, shape_b);
        let (pos1, g1, pos2, g2) = if swapped {
            (pos_b, shape_b, pos_a, shape_a)
        } else {
            (pos_a, shape_a, pos_b, shape_b)
        };

        match route {
            PairRoute::Unsupported => {
                log::trace!(
                    "Unsupported contact query between {:?} and {:?}.",
                    shape_a.shape_type(),
                    shape_b.shape_type()
                );
                false
            }
            PairRoute::Plane => {
                contact_plane_shape(pos1, g1, pos2, g2, &mut oriented(sink, swapped))
            }
            PairRoute::SoftBody => {
                contact_shape_soft_body(self, pos1, g1, pos2, g2, &mut oriented(sink, swapped))
            }
            PairRoute::Concave => {
                let (margin1, margin2) = if swapped {
                    (margin_b, margin_a)
                } else {
                    (margin_a, margin_b)
                };
                contact_shape_concave_shape(
                    &self.solver,
                    pos1,
                    g1,
                    pos2,
                    g2,
                    &mut oriented(sink, swapped),
                    margin1,
                    margin2,
                )
            }
            PairRoute::Convex => self.solver.penetration(
                pos_a, shape_a, pos_b, shape_b, sink, sep_axis, margin_a, margin_b,
            ),
        }
    }

    /// Computes the closest points between two disjoint shapes.
    ///
    /// Returns `None` if the shapes overlap, or if the pair is not supported. The first point of
    /// the result is on `shape_a`, and the second on `shape_b`.
    ///
    /// If one of the shapes is concave or a soft body, the parts (or nodes) tested are the ones
    /// close to the other shape, or the ones inside `concave_hint` (given in world-space) if it
    /// is provided. The separating axis cache is only used for pairs of convex shapes.
    ///
    /// # Panics
    /// If a shape describes a circular support feature with other than three points.
    pub fn solve_distance(
        &self,
        pos_a: &Transform,
        shape_a: &dyn Shape,
        pos_b: &Transform,
        shape_b: &dyn Shape,
        concave_hint: Option<&Aabb>,
        sep_axis: Option<&mut Vector<Real>>,
    ) -> Option<ClosestPair> {
        let (route, swapped) = PairRoute::classify(shape_a, shape_b);
        let (pos1, g1, pos2, g2) = if swapped {
            (pos_b, shape_b, pos_a, shape_a)
        } else {
            (pos_a, shape_a, pos_b, shape_b)
        };

        let pair = match route {
            PairRoute::Unsupported => {
                log::trace!(
                    "Unsupported distance query between {:?} and {:?}.",
                    shape_a.shape_type(),
                    shape_b.shape_type()
                );
                None
            }
            PairRoute::Plane => closest_points_plane_shape(pos1, g1, pos2, g2)
                .filter(|(_, dist)| *dist > 0.0)
                .map(|(pair, _)| pair),
            PairRoute::SoftBody => {
                closest_points_shape_soft_body(self, pos1, g1, pos2, g2, concave_hint)
            }
            PairRoute::Concave => closest_points_shape_concave_shape(
                &self.solver,
                pos1,
                g1,
                pos2,
                g2,
                concave_hint,
            ),
            PairRoute::Convex => {
                return self
                    .solver
                    .closest_points(pos_a, shape_a, pos_b, shape_b, sep_axis)
            }
        };

        if swapped {
            pair.map(ClosestPair::flipped)
        } else {
            pair
        }
    }
}

/// Computes the contacts between two shapes with the default convex solver.
///
/// See [`CollisionSolver::solve_static`].
pub fn solve_static(
    pos_a: &Transform,
    shape_a: &dyn Shape,
    pos_b: &Transform,
    shape_b: &dyn Shape,
    sink: &mut dyn FnMut(ContactPair),
    sep_axis: Option<&mut Vector<Real>>,
    margin_a: Real,
    margin_b: Real,
) -> bool {
    CollisionSolver::<GjkEpaSolver>::default().solve_static(
        pos_a, shape_a, pos_b, shape_b, sink, sep_axis, margin_a, margin_b,
    )
}

/// Computes the closest points between two disjoint shapes with the default convex solver.
///
/// See [`CollisionSolver::solve_distance`].
pub fn solve_distance(
    pos_a: &Transform,
    shape_a: &dyn Shape,
    pos_b: &Transform,
    shape_b: &dyn Shape,
    concave_hint: Option<&Aabb>,
    sep_axis: Option<&mut Vector<Real>>,
) -> Option<ClosestPair> {
    CollisionSolver::<GjkEpaSolver>::default()
        .solve_distance(pos_a, shape_a, pos_b, shape_b, concave_hint, sep_axis)
}
