use crate::math::{Isometry, Matrix, Point, Real, UnitVector, Vector, DIM};
use core::ops::Mul;
use na::Unit;

/// An affine transformation made of a linear basis and a translation.
///
/// This is the pose type accepted by every query of this crate. It is usually a rigid motion
/// (see [`Transform::from_isometry`]), but the basis may also carry a non-uniform scaling. The
/// columns of `basis` are the images of the local `x`, `y` and `z` axes.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform {
    /// The linear part of this transform.
    pub basis: Matrix<Real>,
    /// The translational part of this transform.
    pub origin: Vector<Real>,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// Creates a transform from its basis and origin.
    #[inline]
    pub fn new(basis: Matrix<Real>, origin: Vector<Real>) -> Self {
        Self { basis, origin }
    }

    /// The identity transform.
    #[inline]
    pub fn identity() -> Self {
        Self::new(Matrix::identity(), Vector::zeros())
    }

    /// A pure translation.
    #[inline]
    pub fn translation(x: Real, y: Real, z: Real) -> Self {
        Self::new(Matrix::identity(), Vector::new(x, y, z))
    }

    /// A pure translation placing the local origin at `point`.
    #[inline]
    pub fn from_point(point: &Point<Real>) -> Self {
        Self::new(Matrix::identity(), point.coords)
    }

    /// Converts a rigid motion into a transform.
    #[inline]
    pub fn from_isometry(pos: &Isometry<Real>) -> Self {
        Self::new(
            pos.rotation.to_rotation_matrix().into_inner(),
            pos.translation.vector,
        )
    }

    /// Returns a copy of `self` with its basis scaled along each local axis.
    #[inline]
    #[must_use]
    pub fn scaled(mut self, scale: &Vector<Real>) -> Self {
        for i in 0..DIM {
            let mut column = self.basis.column_mut(i);
            column *= scale[i];
        }
        self
    }

    /// The image of the `i`-th local axis.
    #[inline]
    pub fn axis(&self, i: usize) -> Vector<Real> {
        self.basis.column(i).into_owned()
    }

    /// The image of the local origin.
    #[inline]
    pub fn origin_point(&self) -> Point<Real> {
        Point::from(self.origin)
    }

    /// Transforms a point.
    #[inline]
    pub fn transform_point(&self, pt: &Point<Real>) -> Point<Real> {
        Point::from(self.basis * pt.coords + self.origin)
    }

    /// Transforms a vector (the translation is ignored).
    #[inline]
    pub fn transform_vector(&self, v: &Vector<Real>) -> Vector<Real> {
        self.basis * v
    }

    /// Multiplies `v` by the transposed basis.
    ///
    /// This is the mapping of search directions from world-space to local-space: the support
    /// point of a transformed shape along `dir` is the image of the local support point along
    /// `basisᵀ · dir`. For rigid motions this is the inverse rotation.
    #[inline]
    pub fn transpose_transform_vector(&self, v: &Vector<Real>) -> Vector<Real> {
        self.basis.tr_mul(v)
    }

    /// Transforms a surface normal, i.e., multiplies it by the inverse-transpose of the basis.
    ///
    /// Returns `None` if the basis is degenerate.
    pub fn transform_normal(&self, n: &Vector<Real>) -> Option<UnitVector<Real>> {
        // The cofactor matrix is the inverse-transpose up to the determinant.
        let (c0, c1, c2) = (self.axis(0), self.axis(1), self.axis(2));
        let det = c0.dot(&c1.cross(&c2));
        if det.abs() <= crate::math::DEFAULT_EPSILON {
            return None;
        }
        let cof = c1.cross(&c2) * n.x + c2.cross(&c0) * n.y + c0.cross(&c1) * n.z;
        Unit::try_new(cof * det.signum(), crate::math::DEFAULT_EPSILON)
    }

    /// The scaling factor of the basis, if it is a rotation times a uniform scaling.
    pub fn uniform_scale(&self) -> Option<Real> {
        let gram = self.basis.tr_mul(&self.basis);
        let sq_scale = gram.trace() / DIM as Real;
        let tolerance = crate::math::DEFAULT_EPSILON.sqrt() * sq_scale;

        if sq_scale > 0.0 && (gram - Matrix::identity() * sq_scale).abs().max() <= tolerance {
            Some(sq_scale.sqrt())
        } else {
            None
        }
    }

    /// The inverse of this transform, if its basis is invertible.
    pub fn try_inverse(&self) -> Option<Self> {
        let inv_basis = self.basis.try_inverse()?;
        Some(Self::new(inv_basis, -(inv_basis * self.origin)))
    }

    /// Returns `self` with its origin replaced by `origin`.
    #[inline]
    #[must_use]
    pub fn with_origin(mut self, origin: Vector<Real>) -> Self {
        self.origin = origin;
        self
    }
}

impl From<Isometry<Real>> for Transform {
    #[inline]
    fn from(pos: Isometry<Real>) -> Self {
        Self::from_isometry(&pos)
    }
}

impl Mul<Transform> for Transform {
    type Output = Transform;

    #[inline]
    fn mul(self, rhs: Transform) -> Transform {
        Transform::new(self.basis * rhs.basis, self.basis * rhs.origin + self.origin)
    }
}

impl<'a> Mul<&'a Transform> for &'a Transform {
    type Output = Transform;

    #[inline]
    fn mul(self, rhs: &'a Transform) -> Transform {
        *self * *rhs
    }
}

impl Mul<Point<Real>> for Transform {
    type Output = Point<Real>;

    #[inline]
    fn mul(self, rhs: Point<Real>) -> Point<Real> {
        self.transform_point(&rhs)
    }
}

impl<'a> Mul<&'a Point<Real>> for &'a Transform {
    type Output = Point<Real>;

    #[inline]
    fn mul(self, rhs: &'a Point<Real>) -> Point<Real> {
        self.transform_point(rhs)
    }
}
