use crate::bounding_volume::{Aabb, BoundingVolume};
use crate::math::{Point, Transform, Vector, DIM};
use crate::query::collision_solver::solve_concave::part_position;
use crate::query::{ClosestPair, CollisionSolver, ContactPair, DistanceSolver, PenetrationSolver};
use crate::shape::{Ball, Shape, SoftBody};
use core::ops::ControlFlow;

/// State shared by the queries between a shape and the nodes of a soft body.
///
/// Each node is tested as a ball with a radius equal to the collision margin of the soft body.
pub struct SoftBodyQuery<'a, S> {
    dispatcher: &'a CollisionSolver<S>,
    body: &'a SoftBody,
    sphere: Ball,
    node_transform: Transform,
    world_to_node: Transform,
    /// The number of nodes tested.
    pub node_queries: usize,
    /// The number of convex parts tested against the soft body.
    pub convex_queries: usize,
    /// The number of contacts reported.
    pub contact_count: usize,
}

impl<'a, S> SoftBodyQuery<'a, S>
where
    S: PenetrationSolver + DistanceSolver,
{
    /// Initializes a query against `body`, placed at `pos_body`.
    ///
    /// Returns `None` if the transform mapping node-space to world-space is not invertible.
    pub fn new(
        dispatcher: &'a CollisionSolver<S>,
        pos_body: &Transform,
        body: &'a SoftBody,
    ) -> Option<Self> {
        let node_transform = pos_body * body.inv_transform();
        let Some(world_to_node) = node_transform.try_inverse() else {
            log::debug!("Non-invertible soft body transform: ignoring the soft body.");
            return None;
        };

        Some(Self {
            dispatcher,
            body,
            sphere: Ball::new(body.collision_margin()),
            node_transform,
            world_to_node,
            node_queries: 0,
            convex_queries: 0,
            contact_count: 0,
        })
    }

    /// The world-space position of the ball centered at the `i`-th node.
    pub fn node_position(&self, i: u32) -> Transform {
        Transform::from_point(&self.node_transform.transform_point(&self.body.node_position(i)))
    }

    /// The world-space bounds of every node ball.
    ///
    /// Returns `None` if the soft body has no node.
    pub fn world_bounds(&self) -> Option<Aabb> {
        let bounds = self.body.bounds();
        bounds.is_valid().then(|| {
            bounds
                .loosened(self.body.collision_margin())
                .transform_by(&self.node_transform)
        })
    }

    /// Reports the contacts between `shape` and every node ball intersecting `world_aabb`.
    ///
    /// `world_aabb` is enlarged by the collision margin before being mapped to node-space. The
    /// contacts have their first index replaced by `part_id` if it is given, and their second
    /// index set to the node identifier.
    pub fn contact_nodes(
        &mut self,
        part_id: Option<u32>,
        pos_shape: &Transform,
        shape: &dyn Shape,
        world_aabb: &Aabb,
        sink: &mut dyn FnMut(ContactPair),
    ) {
        let node_aabb = world_aabb
            .loosened(self.body.collision_margin())
            .transform_by(&self.world_to_node);
        let mut node_queries = 0;
        let mut contact_count = 0;

        let _ = self.body.query_aabb(&node_aabb, &mut |node| {
            node_queries += 1;

            let pos_node = self.node_position(node);
            let _ = self.dispatcher.solve_static(
                pos_shape,
                shape,
                &pos_node,
                &self.sphere,
                &mut |contact| {
                    contact_count += 1;
                    sink(ContactPair::new(
                        contact.point_a,
                        part_id.unwrap_or(contact.index_a),
                        contact.point_b,
                        node,
                    ))
                },
                None,
                0.0,
                0.0,
            );

            ControlFlow::Continue(())
        });

        self.convex_queries += 1;
        self.node_queries += node_queries;
        self.contact_count += contact_count;
    }

    /// Updates `best` with the closest points between `shape` and the node balls.
    ///
    /// Every node is tested, or only the nodes inside `node_aabb` (given in node-space) if it is
    /// provided. Breaks as soon as one node ball overlaps `shape`.
    pub fn closest_nodes(
        &mut self,
        pos_shape: &Transform,
        shape: &dyn Shape,
        node_aabb: Option<&Aabb>,
        best: &mut Option<ClosestPair>,
    ) -> ControlFlow<()> {
        let mut node_queries = 0;
        let mut test_node = |node: u32| {
            node_queries += 1;

            let pos_node = self.node_position(node);
            let pair = self.dispatcher.solve_distance(
                pos_shape,
                shape,
                &pos_node,
                &self.sphere,
                None,
                None,
            );

            match pair {
                Some(pair) => {
                    if best.map_or(true, |best| pair.distance() < best.distance()) {
                        *best = Some(pair);
                    }
                    ControlFlow::Continue(())
                }
                None => ControlFlow::Break(()),
            }
        };

        let flow = match node_aabb {
            Some(aabb) => self.body.query_aabb(aabb, &mut test_node),
            None => (0..self.body.node_count() as u32).try_for_each(&mut test_node),
        };

        self.convex_queries += 1;
        self.node_queries += node_queries;
        flow
    }

    fn log_counters(&self) {
        log::trace!(
            "Soft body query: {} convex parts, {} nodes tested, {} contacts.",
            self.convex_queries,
            self.node_queries,
            self.contact_count
        );
    }
}

/// The world-space AABB of `shape`, computed by projecting it on each coordinate axis.
fn projected_aabb(pos: &Transform, shape: &dyn Shape) -> Aabb {
    let mut mins = Point::origin();
    let mut maxs = Point::origin();

    for i in 0..DIM {
        let (min, max) = shape.project_range(&Vector::ith(i, 1.0), pos);
        mins[i] = min;
        maxs[i] = max;
    }

    Aabb::new(mins, maxs)
}

/// The region of the local-space of `pos` that contains `world_aabb`.
fn local_region(pos: &Transform, world_aabb: &Aabb) -> Option<Aabb> {
    let Some(inv) = pos.try_inverse() else {
        log::debug!("Non-invertible concave shape transform: ignoring the concave shape.");
        return None;
    };
    Some(world_aabb.transform_by(&inv))
}

/// Contacts between any shape other than a plane or a soft body, and the nodes of a soft body.
///
/// If `shape` is concave, each of its parts close to the soft body is tested separately, and the
/// first index of the contacts identifies the part. The second index of the contacts is always the
/// identifier of the node they belong to. Returns `true` if at least one contact was found.
pub fn contact_shape_soft_body<S>(
    dispatcher: &CollisionSolver<S>,
    pos_shape: &Transform,
    shape: &dyn Shape,
    pos_body: &Transform,
    body: &dyn Shape,
    sink: &mut dyn FnMut(ContactPair),
) -> bool
where
    S: PenetrationSolver + DistanceSolver,
{
    let Some(body) = body.as_soft_body() else {
        return false;
    };
    let Some(mut query) = SoftBodyQuery::new(dispatcher, pos_body, body.body()) else {
        return false;
    };

    if shape.is_concave() {
        let Some(concave) = shape.as_concave_shape() else {
            return false;
        };
        let Some(local_aabb) = query
            .world_bounds()
            .and_then(|bounds| local_region(pos_shape, &bounds))
        else {
            return false;
        };

        let _ = concave.cull(&local_aabb, &mut |part_id, part_pos, part| {
            let part_pos = part_position(pos_shape, part_pos);
            let part_aabb = projected_aabb(&part_pos, part);
            query.contact_nodes(Some(part_id), &part_pos, part, &part_aabb, sink);
            ControlFlow::Continue(())
        });
    } else {
        let shape_aabb = shape.compute_aabb(pos_shape);
        query.contact_nodes(None, pos_shape, shape, &shape_aabb, sink);
    }

    query.log_counters();
    query.contact_count > 0
}

/// The closest points between any shape other than a plane or a soft body, and the nodes of a
/// soft body.
///
/// Only the nodes inside `hint` (given in world-space) are tested if it is provided. If `shape` is
/// concave, only its parts intersecting `hint`, or the whole soft body, are tested. Returns `None`
/// if any node ball overlaps `shape`, or if nothing was tested.
pub fn closest_points_shape_soft_body<S>(
    dispatcher: &CollisionSolver<S>,
    pos_shape: &Transform,
    shape: &dyn Shape,
    pos_body: &Transform,
    body: &dyn Shape,
    hint: Option<&Aabb>,
) -> Option<ClosestPair>
where
    S: PenetrationSolver + DistanceSolver,
{
    let body = body.as_soft_body()?;
    let mut query = SoftBodyQuery::new(dispatcher, pos_body, body.body())?;
    let node_aabb = hint.map(|hint| hint.transform_by(&query.world_to_node));
    let mut best = None;

    let flow = if shape.is_concave() {
        let concave = shape.as_concave_shape()?;
        let region = match hint {
            Some(hint) => *hint,
            None => query.world_bounds()?,
        };
        let local_aabb = local_region(pos_shape, &region)?;

        concave.cull(&local_aabb, &mut |_, part_pos, part| {
            let part_pos = part_position(pos_shape, part_pos);
            query.closest_nodes(&part_pos, part, node_aabb.as_ref(), &mut best)
        })
    } else {
        query.closest_nodes(pos_shape, shape, node_aabb.as_ref(), &mut best)
    };

    query.log_counters();

    if flow.is_break() {
        None
    } else {
        best
    }
}
