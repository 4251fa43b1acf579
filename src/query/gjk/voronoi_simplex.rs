use crate::math::{Point, Real, Vector};
use crate::query::gjk::{self, CSOPoint};
use arrayvec::ArrayVec;

/// The barycentric coordinates of the projection of the origin on a sub-simplex, given as
/// `(vertex index, weight)` pairs.
type Projection = ArrayVec<(usize, Real), 4>;

/// A simplex of dimension up to 3 using Voronoï regions for computing point projections.
#[derive(Clone, Debug)]
pub struct VoronoiSimplex {
    vertices: ArrayVec<CSOPoint, 4>,
    proj: ArrayVec<Real, 4>,
}

impl Default for VoronoiSimplex {
    fn default() -> Self {
        Self::new()
    }
}

impl VoronoiSimplex {
    /// Creates a new empty simplex.
    pub fn new() -> VoronoiSimplex {
        VoronoiSimplex {
            vertices: ArrayVec::new(),
            proj: ArrayVec::new(),
        }
    }

    /// Resets this simplex to a single point.
    pub fn reset(&mut self, pt: CSOPoint) {
        self.vertices.clear();
        self.proj.clear();
        self.vertices.push(pt);
        self.proj.push(1.0);
    }

    /// Add a point to this simplex.
    ///
    /// Returns `false` if the point is too close to a vertex already in the simplex, or if the
    /// simplex is already a tetrahedron.
    pub fn add_point(&mut self, pt: CSOPoint) -> bool {
        let eps = gjk::eps_tol();

        if self.vertices.is_full()
            || self
                .vertices
                .iter()
                .any(|v| (v.point - pt.point).norm_squared() < eps * eps)
        {
            return false;
        }

        self.vertices.push(pt);
        self.proj.push(0.0);
        true
    }

    /// The number of vertices of this simplex minus one.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }

    /// Retrieves the i-th point of this simplex.
    #[inline]
    pub fn point(&self, i: usize) -> &CSOPoint {
        &self.vertices[i]
    }

    /// The vertices of this simplex.
    #[inline]
    pub fn vertices(&self) -> &[CSOPoint] {
        &self.vertices[..]
    }

    /// The maximum squared length of the vertices of this simplex.
    pub fn max_sq_len(&self) -> Real {
        self.vertices
            .iter()
            .map(|v| v.point.coords.norm_squared())
            .fold(0.0, Real::max)
    }

    /// The barycentric coordinate of the projection of the origin on the i-th vertex.
    #[inline]
    pub fn proj_coord(&self, i: usize) -> Real {
        self.proj[i]
    }

    /// Computes the projection of the origin on this simplex, and removes the vertices that
    /// do not contribute to it.
    pub fn project_origin_and_reduce(&mut self) -> Point<Real> {
        let pts: ArrayVec<Point<Real>, 4> = self.vertices.iter().map(|v| v.point).collect();
        let proj = match pts.len() {
            1 => ArrayVec::from_iter([(0, 1.0)]),
            2 => project_on_segment(&pts, [0, 1]),
            3 => project_on_triangle(&pts, [0, 1, 2]),
            _ => project_on_tetrahedron(&pts),
        };

        let old = self.vertices.clone();
        self.vertices.clear();
        self.proj.clear();

        let mut res = Vector::zeros();
        for (i, w) in proj {
            self.vertices.push(old[i]);
            self.proj.push(w);
            res += old[i].point.coords * w;
        }

        Point::from(res)
    }

    /// The barycentric combination of the original points on both shapes.
    pub fn closest_points(&self) -> (Point<Real>, Point<Real>) {
        let mut p1 = Vector::zeros();
        let mut p2 = Vector::zeros();

        for (v, w) in self.vertices.iter().zip(self.proj.iter()) {
            p1 += v.orig1.coords * *w;
            p2 += v.orig2.coords * *w;
        }

        (Point::from(p1), Point::from(p2))
    }
}

fn project_on_segment(pts: &[Point<Real>], [ia, ib]: [usize; 2]) -> Projection {
    let ab = pts[ib] - pts[ia];
    let ab_ao = -pts[ia].coords.dot(&ab);
    let sqnab = ab.norm_squared();

    if ab_ao <= 0.0 || sqnab == 0.0 {
        ArrayVec::from_iter([(ia, 1.0)])
    } else if ab_ao >= sqnab {
        ArrayVec::from_iter([(ib, 1.0)])
    } else {
        let t = ab_ao / sqnab;
        ArrayVec::from_iter([(ia, 1.0 - t), (ib, t)])
    }
}

fn projection_sq_dist(pts: &[Point<Real>], proj: &Projection) -> Real {
    proj.iter()
        .fold(Vector::zeros(), |acc, (i, w)| acc + pts[*i].coords * *w)
        .norm_squared()
}

fn project_on_triangle(pts: &[Point<Real>], [ia, ib, ic]: [usize; 3]) -> Projection {
    let (a, b, c) = (pts[ia], pts[ib], pts[ic]);
    let ab = b - a;
    let ac = c - a;

    let d1 = -ab.dot(&a.coords);
    let d2 = -ac.dot(&a.coords);
    if d1 <= 0.0 && d2 <= 0.0 {
        return ArrayVec::from_iter([(ia, 1.0)]);
    }

    let d3 = -ab.dot(&b.coords);
    let d4 = -ac.dot(&b.coords);
    if d3 >= 0.0 && d4 <= d3 {
        return ArrayVec::from_iter([(ib, 1.0)]);
    }

    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        let v = d1 / (d1 - d3);
        return ArrayVec::from_iter([(ia, 1.0 - v), (ib, v)]);
    }

    let d5 = -ab.dot(&c.coords);
    let d6 = -ac.dot(&c.coords);
    if d6 >= 0.0 && d5 <= d6 {
        return ArrayVec::from_iter([(ic, 1.0)]);
    }

    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        let w = d2 / (d2 - d6);
        return ArrayVec::from_iter([(ia, 1.0 - w), (ic, w)]);
    }

    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
        let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
        return ArrayVec::from_iter([(ib, 1.0 - w), (ic, w)]);
    }

    let denom = va + vb + vc;
    if denom <= gjk::eps_tol() * gjk::eps_tol() {
        // Flat triangle: the closest point lies on one of its edges.
        return [[ia, ib], [ib, ic], [ic, ia]]
            .into_iter()
            .map(|edge| project_on_segment(pts, edge))
            .min_by(|p1, p2| projection_sq_dist(pts, p1).total_cmp(&projection_sq_dist(pts, p2)))
            .unwrap_or_default();
    }

    let v = vb / denom;
    let w = vc / denom;
    ArrayVec::from_iter([(ia, 1.0 - v - w), (ib, v), (ic, w)])
}

fn project_on_tetrahedron(pts: &[Point<Real>]) -> Projection {
    let eps = gjk::eps_tol();
    let mut best: Option<(Real, Projection)> = None;

    for (face, opp) in [([0, 1, 2], 3), ([0, 3, 1], 2), ([0, 2, 3], 1), ([1, 3, 2], 0)] {
        let a = pts[face[0]];
        let n = (pts[face[1]] - a).cross(&(pts[face[2]] - a));
        let origin_side = -n.dot(&a.coords);
        let opp_side = n.dot(&(pts[opp] - a));

        // The origin is outside of this face if it lies on the side opposite to the fourth
        // vertex. Flat tetrahedra have all their faces tested.
        if opp_side.abs() > eps * eps && origin_side * opp_side >= 0.0 {
            continue;
        }

        let proj = project_on_triangle(pts, face);
        let sq_dist = projection_sq_dist(pts, &proj);

        if best.as_ref().map(|b| sq_dist < b.0).unwrap_or(true) {
            best = Some((sq_dist, proj));
        }
    }

    best.map(|b| b.1)
        .unwrap_or_else(|| barycentric_tetrahedron_origin(pts))
}

fn barycentric_tetrahedron_origin(pts: &[Point<Real>]) -> Projection {
    // Ratios of signed volumes.
    let vol = |a: &Point<Real>, b: &Point<Real>, c: &Point<Real>, d: &Point<Real>| {
        (b - a).dot(&(c - a).cross(&(d - a)))
    };
    let o = Point::origin();
    let total = vol(&pts[0], &pts[1], &pts[2], &pts[3]);
    let w0 = vol(&o, &pts[1], &pts[2], &pts[3]) / total;
    let w1 = vol(&pts[0], &o, &pts[2], &pts[3]) / total;
    let w2 = vol(&pts[0], &pts[1], &o, &pts[3]) / total;
    let w3 = 1.0 - w0 - w1 - w2;

    ArrayVec::from_iter([(0, w0), (1, w1), (2, w2), (3, w3)])
}
