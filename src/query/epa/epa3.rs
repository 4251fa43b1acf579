//! Three-dimensional penetration depth queries using the Expanding Polytope Algorithm.

use crate::math::{Point, Real, Transform, Vector};
use crate::query::gjk::{self, CSOPoint, VoronoiSimplex};
use crate::shape::SupportMap;
use alloc::vec::Vec;
use na::{self, ComplexField, RealField, Rotation3, Unit};
use smallvec::SmallVec;

/// The maximum number of expansions of the polytope.
const MAX_ITERATIONS: usize = 100;

#[derive(Clone, Debug)]
struct Face {
    pts: [usize; 3],
    normal: Vector<Real>,
    dist: Real,
    degenerate: bool,
    deleted: bool,
}

impl Face {
    fn new(vertices: &[CSOPoint], pts: [usize; 3]) -> Self {
        let a = vertices[pts[0]].point;
        let b = vertices[pts[1]].point;
        let c = vertices[pts[2]].point;

        match (b - a).cross(&(c - a)).try_normalize(gjk::eps_tol() * gjk::eps_tol()) {
            Some(normal) => Face {
                pts,
                normal,
                dist: normal.dot(&a.coords),
                degenerate: false,
                deleted: false,
            },
            None => Face {
                pts,
                normal: Vector::zeros(),
                dist: Real::MAX,
                degenerate: true,
                deleted: false,
            },
        }
    }

    fn can_be_seen_by(&self, vertices: &[CSOPoint], pt: &Point<Real>) -> bool {
        !self.degenerate
            && (pt - vertices[self.pts[0]].point).dot(&self.normal) > gjk::eps_tol()
    }

    fn closest_points(&self, vertices: &[CSOPoint]) -> Option<(Point<Real>, Point<Real>)> {
        let [a, b, c] = self.pts.map(|i| vertices[i]);
        let bcoords = barycentric_coordinates(
            &Point::from(self.normal * self.dist),
            &a.point,
            &b.point,
            &c.point,
        )?;

        Some((
            a.orig1 * bcoords[0] + b.orig1.coords * bcoords[1] + c.orig1.coords * bcoords[2],
            a.orig2 * bcoords[0] + b.orig2.coords * bcoords[1] + c.orig2.coords * bcoords[2],
        ))
    }
}

fn barycentric_coordinates(
    p: &Point<Real>,
    a: &Point<Real>,
    b: &Point<Real>,
    c: &Point<Real>,
) -> Option<[Real; 3]> {
    let v0 = b - a;
    let v1 = c - a;
    let v2 = p - a;
    let d00 = v0.dot(&v0);
    let d01 = v0.dot(&v1);
    let d11 = v1.dot(&v1);
    let d20 = v2.dot(&v0);
    let d21 = v2.dot(&v1);
    let denom = d00 * d11 - d01 * d01;

    if denom <= 0.0 {
        return None;
    }

    let v = (d11 * d20 - d01 * d21) / denom;
    let w = (d00 * d21 - d01 * d20) / denom;
    Some([1.0 - v - w, v, w])
}

/// The Expanding Polytope Algorithm in 3D.
#[derive(Default)]
pub struct EPA {
    vertices: Vec<CSOPoint>,
    faces: Vec<Face>,
    horizon: SmallVec<[(usize, usize); 32]>,
}

impl EPA {
    /// Creates a new instance of the 3D Expanding Polytope Algorithm.
    pub fn new() -> Self {
        Self::default()
    }

    fn reset(&mut self) {
        self.vertices.clear();
        self.faces.clear();
        self.horizon.clear();
    }

    /// Projects the origin on the boundary of the CSO of the two given shapes.
    ///
    /// The `simplex` must be the final simplex of a GJK run that reported an intersection.
    /// Returns the contact points on both shapes, and the unit penetration direction pointing
    /// from the first shape toward the second one. The penetration depth is the distance
    /// between both points.
    ///
    /// Returns `None` if the CSO is flat, or if the polytope became degenerate.
    pub fn closest_points<G1, G2>(
        &mut self,
        pos1: &Transform,
        g1: &G1,
        pos2: &Transform,
        g2: &G2,
        simplex: &VoronoiSimplex,
    ) -> Option<(Point<Real>, Point<Real>, Unit<Vector<Real>>)>
    where
        G1: ?Sized + SupportMap,
        G2: ?Sized + SupportMap,
    {
        let _eps_tol = gjk::eps_tol();
        let _eps_rel = ComplexField::sqrt(_eps_tol);
        let support = |dir: &Vector<Real>| CSOPoint::from_shapes(pos1, g1, pos2, g2, dir);

        self.reset();
        self.vertices.extend_from_slice(simplex.vertices());

        if !self.init_tetrahedron(&support) {
            return None;
        }

        let mut best = 0;

        for niter in 0.. {
            best = self.closest_face()?;
            let face = self.faces[best].clone();
            let w = support(&face.normal);
            let w_dist = face.normal.dot(&w.point.coords);

            if w_dist - face.dist <= _eps_rel * (1.0 + face.dist.abs()) || niter == MAX_ITERATIONS {
                if niter == MAX_ITERATIONS {
                    log::debug!("EPA did not converge after {} iterations.", MAX_ITERATIONS);
                }
                break;
            }

            let w_id = self.vertices.len();
            self.vertices.push(w);
            self.compute_horizon(&w.point);

            if self.horizon.is_empty() {
                break;
            }

            for k in 0..self.horizon.len() {
                let (a, b) = self.horizon[k];
                let face = Face::new(&self.vertices, [a, b, w_id]);
                self.faces.push(face);
            }
        }

        let face = &self.faces[best];
        let (p1, p2) = face.closest_points(&self.vertices)?;
        Some((p1, p2, Unit::new_unchecked(face.normal)))
    }

    /// Grows the initial simplex into a tetrahedron.
    fn init_tetrahedron(&mut self, support: &dyn Fn(&Vector<Real>) -> CSOPoint) -> bool {
        let eps = gjk::eps_tol();

        if self.vertices.len() == 1 {
            let axes = [Vector::x(), Vector::y(), Vector::z()];
            let origin = self.vertices[0].point;

            if let Some(pt) = axes
                .iter()
                .flat_map(|axis| [*axis, -*axis])
                .map(|dir| support(&dir))
                .find(|pt| na::distance(&pt.point, &origin) > eps)
            {
                self.vertices.push(pt);
            } else {
                return false;
            }
        }

        if self.vertices.len() == 2 {
            let a = self.vertices[0].point;
            let Some(d) = Unit::try_new(self.vertices[1].point - a, eps) else {
                return false;
            };
            let imin = d.iamin();
            let Some(mut dir) = d.cross(&Vector::ith(imin, 1.0)).try_normalize(0.0) else {
                return false;
            };
            let rot = Rotation3::from_axis_angle(&d, <Real as RealField>::frac_pi_3());
            let mut found = false;

            for _ in 0..6 {
                let pt = support(&dir);
                let offset = pt.point - a;

                if (offset - *d * offset.dot(&d)).norm() > eps {
                    self.vertices.push(pt);
                    found = true;
                    break;
                }

                dir = rot * dir;
            }

            if !found {
                return false;
            }
        }

        if self.vertices.len() == 3 {
            let a = self.vertices[0].point;
            let n = (self.vertices[1].point - a).cross(&(self.vertices[2].point - a));
            let Some(n) = n.try_normalize(eps * eps) else {
                return false;
            };
            let p = support(&n);
            let q = support(&-n);
            let dp = n.dot(&(p.point - a)).abs();
            let dq = n.dot(&(q.point - a)).abs();

            if dp.max(dq) <= eps {
                return false;
            }

            self.vertices.push(if dp >= dq { p } else { q });
        }

        let pts: [Point<Real>; 4] = [0, 1, 2, 3].map(|i| self.vertices[i].point);

        for (mut face, opp) in [([0, 1, 2], 3), ([0, 3, 1], 2), ([0, 2, 3], 1), ([1, 3, 2], 0)] {
            let n = (pts[face[1]] - pts[face[0]]).cross(&(pts[face[2]] - pts[face[0]]));

            if n.dot(&(pts[opp] - pts[face[0]])) > 0.0 {
                face.swap(1, 2);
            }

            self.faces.push(Face::new(&self.vertices, face));
        }

        // A flat tetrahedron cannot enclose the origin.
        !self.faces.iter().all(|f| f.degenerate)
    }

    fn closest_face(&self) -> Option<usize> {
        self.faces
            .iter()
            .enumerate()
            .filter(|(_, f)| !f.deleted && !f.degenerate)
            .min_by(|(_, f1), (_, f2)| f1.dist.total_cmp(&f2.dist))
            .map(|(i, _)| i)
    }

    /// Deletes every face visible from `pt`, and collects the boundary of the deleted region.
    fn compute_horizon(&mut self, pt: &Point<Real>) {
        self.horizon.clear();

        for face in self.faces.iter_mut() {
            if face.deleted || !face.can_be_seen_by(&self.vertices, pt) {
                continue;
            }

            face.deleted = true;

            for k in 0..3 {
                let edge = (face.pts[k], face.pts[(k + 1) % 3]);

                if let Some(twin) = self.horizon.iter().position(|e| *e == (edge.1, edge.0)) {
                    let _ = self.horizon.swap_remove(twin);
                } else {
                    self.horizon.push(edge);
                }
            }
        }
    }
}
