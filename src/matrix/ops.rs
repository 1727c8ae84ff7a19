//! # Matrix Arithmetic
//!
//! Shape-checked arithmetic and application of homogeneous matrices to points
//! and directions.

use super::Matrix;
use crate::config::EPSILON;
use crate::utils::math;
use crate::{MathResult, PandaMathError, Vec2, Vec3, Vec4};

impl Matrix {
    fn require_same_shape(&self, other: &Matrix, op: &str) -> MathResult<()> {
        if self.shape() == other.shape() {
            Ok(())
        } else {
            Err(PandaMathError::DimensionMismatch(format!(
                "cannot {} {}x{} and {}x{}",
                op,
                self.rows(),
                self.cols(),
                other.rows(),
                other.cols()
            )))
        }
    }

    fn zip_with(&self, other: &Matrix, f: impl Fn(f64, f64) -> f64) -> Matrix {
        let data = self
            .as_slice()
            .iter()
            .zip(other.as_slice())
            .map(|(a, b)| f(*a, *b))
            .collect();
        Matrix::from_parts(self.rows(), self.cols(), data)
    }

    fn map(&self, f: impl Fn(f64) -> f64) -> Matrix {
        let data = self.as_slice().iter().map(|v| f(*v)).collect();
        Matrix::from_parts(self.rows(), self.cols(), data)
    }

    /// Element-wise sum of two matrices of the same shape.
    pub fn try_add(&self, other: &Matrix) -> MathResult<Matrix> {
        self.require_same_shape(other, "add")?;
        Ok(self.zip_with(other, |a, b| a + b))
    }

    /// Element-wise difference of two matrices of the same shape.
    pub fn try_sub(&self, other: &Matrix) -> MathResult<Matrix> {
        self.require_same_shape(other, "subtract")?;
        Ok(self.zip_with(other, |a, b| a - b))
    }

    /// Element-wise (Hadamard) product.
    pub fn hadamard(&self, other: &Matrix) -> MathResult<Matrix> {
        self.require_same_shape(other, "multiply element-wise")?;
        Ok(self.zip_with(other, |a, b| a * b))
    }

    /// Matrix product `self * other`; `other` is applied first.
    ///
    /// # Examples
    ///
    /// ```
    /// use panda_math::Matrix;
    ///
    /// let a = Matrix::from_rows(&[vec![1.0, 2.0, 3.0]]).unwrap();
    /// let b = Matrix::from_rows(&[vec![1.0], vec![1.0], vec![1.0]]).unwrap();
    /// assert_eq!(a.try_mul(&b).unwrap().as_slice(), &[6.0]);
    /// assert!(a.try_mul(&a).is_err());
    /// ```
    pub fn try_mul(&self, other: &Matrix) -> MathResult<Matrix> {
        if self.cols() != other.rows() {
            return Err(PandaMathError::DimensionMismatch(format!(
                "cannot multiply {}x{} by {}x{}",
                self.rows(),
                self.cols(),
                other.rows(),
                other.cols()
            )));
        }
        Ok(self.product(other))
    }

    /// Matrix product for operands whose inner dimensions are known to agree.
    pub(crate) fn product(&self, other: &Matrix) -> Matrix {
        debug_assert_eq!(self.cols(), other.rows());
        let (n, inner, m) = (self.rows(), self.cols(), other.cols());
        let a = self.as_slice();
        let b = other.as_slice();
        let mut data = vec![0.0; n * m];
        for i in 0..n {
            for k in 0..inner {
                let aik = a[i * inner + k];
                if aik == 0.0 {
                    continue;
                }
                for j in 0..m {
                    data[i * m + j] += aik * b[k * m + j];
                }
            }
        }
        Matrix::from_parts(n, m, data)
    }

    /// Multiplies the matrix by a column vector.
    pub fn mul_vector(&self, vector: &[f64]) -> MathResult<Vec<f64>> {
        if vector.len() != self.cols() {
            return Err(PandaMathError::DimensionMismatch(format!(
                "cannot multiply {}x{} matrix by vector of length {}",
                self.rows(),
                self.cols(),
                vector.len()
            )));
        }
        Ok(self
            .as_slice()
            .chunks(self.cols())
            .map(|row| row.iter().zip(vector).map(|(a, b)| a * b).sum::<f64>())
            .collect())
    }

    /// Multiplies every element by `factor`.
    pub fn scale(&self, factor: f64) -> Matrix {
        self.map(|v| v * factor)
    }

    pub fn transpose(&self) -> Matrix {
        Matrix::from_fn(self.cols(), self.rows(), |r, c| self.as_slice()[c * self.cols() + r])
    }

    /// Sum of the main diagonal.
    pub fn trace(&self) -> MathResult<f64> {
        let n = self.require_square()?;
        Ok((0..n).map(|i| self.as_slice()[i * n + i]).sum())
    }

    /// Raises a square matrix to a non-negative integer power by repeated squaring.
    ///
    /// `pow(0)` is the identity.
    pub fn pow(&self, exponent: u32) -> MathResult<Matrix> {
        let n = self.require_square()?;
        let mut result = Matrix::identity(n);
        let mut base = self.clone();
        let mut e = exponent;
        while e > 0 {
            if e & 1 == 1 {
                result = result.try_mul(&base)?;
            }
            e >>= 1;
            if e > 0 {
                base = base.try_mul(&base)?;
            }
        }
        Ok(result)
    }

    /// Element-wise approximate equality. Matrices of different shapes are never equal.
    pub fn approx_eq(&self, other: &Matrix, eps: f64) -> bool {
        self.shape() == other.shape()
            && self
                .as_slice()
                .iter()
                .zip(other.as_slice())
                .all(|(a, b)| math::approx_eq(*a, *b, eps))
    }

    /// Applies a 3x3 homogeneous matrix to a 2D point (w = 1), dividing by the
    /// resulting w.
    pub fn transform_point2(&self, point: Vec2) -> MathResult<Vec2> {
        self.require_shape(3, 3, "2D point transform")?;
        let r = self.mul_vector(&[point.x, point.y, 1.0])?;
        let w = r[2];
        if w == 1.0 {
            return Ok(Vec2::new(r[0], r[1]));
        }
        if w.abs() < EPSILON {
            return Err(PandaMathError::InvalidArgument(format!(
                "{} maps to a point at infinity",
                point
            )));
        }
        Ok(Vec2::new(r[0] / w, r[1] / w))
    }

    /// Applies a 3x3 homogeneous matrix to a 2D direction (w = 0); translation
    /// has no effect.
    pub fn transform_vector2(&self, vector: Vec2) -> MathResult<Vec2> {
        self.require_shape(3, 3, "2D vector transform")?;
        let r = self.mul_vector(&[vector.x, vector.y, 0.0])?;
        Ok(Vec2::new(r[0], r[1]))
    }

    /// Applies a 4x4 homogeneous matrix to a 3D point (w = 1), dividing by the
    /// resulting w.
    ///
    /// # Examples
    ///
    /// ```
    /// use panda_math::{spatial, Vec3};
    ///
    /// let m = spatial::translation(Vec3::new(0.0, 0.0, -5.0));
    /// let p = m.transform_point3(Vec3::ONE).unwrap();
    /// assert_eq!(p, Vec3::new(1.0, 1.0, -4.0));
    /// ```
    pub fn transform_point3(&self, point: Vec3) -> MathResult<Vec3> {
        let r = self.mul_vec4(point.extend(1.0))?;
        if r.w == 1.0 {
            Ok(r.truncate())
        } else {
            r.to_cartesian()
        }
    }

    /// Applies a 4x4 homogeneous matrix to a 3D direction (w = 0).
    pub fn transform_vector3(&self, vector: Vec3) -> MathResult<Vec3> {
        Ok(self.mul_vec4(vector.extend(0.0))?.truncate())
    }

    /// Multiplies a 4x4 matrix by a 4-component column vector.
    pub fn mul_vec4(&self, vector: Vec4) -> MathResult<Vec4> {
        self.require_shape(4, 4, "Vec4 multiplication")?;
        let r = self.mul_vector(&vector.to_array())?;
        Ok(Vec4::new(r[0], r[1], r[2], r[3]))
    }
}

impl std::ops::Mul<f64> for Matrix {
    type Output = Matrix;

    fn mul(self, factor: f64) -> Matrix {
        self.scale(factor)
    }
}

impl std::ops::Mul<f64> for &Matrix {
    type Output = Matrix;

    fn mul(self, factor: f64) -> Matrix {
        self.scale(factor)
    }
}

impl std::ops::Neg for Matrix {
    type Output = Matrix;

    fn neg(self) -> Matrix {
        self.scale(-1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(rows: &[Vec<f64>]) -> Matrix {
        Matrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_add_sub() {
        let a = m(&[vec![1.0, 2.0], vec![3.0, 4.0]]);
        let b = m(&[vec![4.0, 3.0], vec![2.0, 1.0]]);
        assert_eq!(a.try_add(&b).unwrap(), Matrix::filled(2, 2, 5.0));
        assert_eq!(a.try_sub(&a).unwrap(), Matrix::zeros(2, 2));
        assert!(a.try_add(&Matrix::zeros(2, 3)).is_err());
    }

    #[test]
    fn test_matrix_product() {
        let a = m(&[vec![1.0, 2.0], vec![3.0, 4.0]]);
        let b = m(&[vec![0.0, 1.0], vec![1.0, 0.0]]);
        assert_eq!(a.try_mul(&b).unwrap(), m(&[vec![2.0, 1.0], vec![4.0, 3.0]]));
        assert_eq!(b.try_mul(&a).unwrap(), m(&[vec![3.0, 4.0], vec![1.0, 2.0]]));
        assert_eq!(a.try_mul(&Matrix::identity(2)).unwrap(), a);
    }

    #[test]
    fn test_product_shape_mismatch() {
        let a = Matrix::zeros(2, 3);
        let result = a.try_mul(&Matrix::zeros(2, 3));
        assert!(matches!(result, Err(PandaMathError::DimensionMismatch(_))));
        assert_eq!(a.try_mul(&Matrix::zeros(3, 4)).unwrap().shape(), (2, 4));
    }

    #[test]
    fn test_mul_vector() {
        let a = m(&[vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]);
        assert_eq!(a.mul_vector(&[1.0, -1.0]).unwrap(), vec![-1.0, -1.0, -1.0]);
        assert!(a.mul_vector(&[1.0]).is_err());
    }

    #[test]
    fn test_hadamard_and_scale() {
        let a = m(&[vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert_eq!(a.hadamard(&a).unwrap(), m(&[vec![1.0, 4.0], vec![9.0, 16.0]]));
        assert_eq!(&a * 2.0, m(&[vec![2.0, 4.0], vec![6.0, 8.0]]));
        assert_eq!(-a.clone(), a.scale(-1.0));
    }

    #[test]
    fn test_transpose() {
        let a = m(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        let t = a.transpose();
        assert_eq!(t.shape(), (3, 2));
        assert_eq!(t.row(0), Some(vec![1.0, 4.0]));
        assert_eq!(t.transpose(), a);
    }

    #[test]
    fn test_trace() {
        let a = m(&[vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert_eq!(a.trace().unwrap(), 5.0);
        assert!(matches!(
            Matrix::zeros(2, 3).trace(),
            Err(PandaMathError::NotSquare { rows: 2, cols: 3 })
        ));
    }

    #[test]
    fn test_pow() {
        let fib = m(&[vec![1.0, 1.0], vec![1.0, 0.0]]);
        assert_eq!(fib.pow(0).unwrap(), Matrix::identity(2));
        assert_eq!(fib.pow(1).unwrap(), fib);
        assert_eq!(fib.pow(10).unwrap()[(0, 1)], 55.0);
        assert!(Matrix::zeros(1, 2).pow(2).is_err());
    }

    #[test]
    fn test_approx_eq() {
        let a = Matrix::identity(2);
        let b = Matrix::identity(2).try_add(&Matrix::filled(2, 2, 1e-12)).unwrap();
        assert!(a.approx_eq(&b, 1e-9));
        assert!(!a.approx_eq(&Matrix::identity(3), 1e-9));
    }

    #[test]
    fn test_homogeneous_shape_checks() {
        let m3 = Matrix::identity(3);
        let m4 = Matrix::identity(4);
        assert!(m3.transform_point3(Vec3::ONE).is_err());
        assert!(m4.transform_point2(Vec2::ONE).is_err());
        assert_eq!(m3.transform_vector2(Vec2::new(1.0, 2.0)).unwrap(), Vec2::new(1.0, 2.0));
        assert_eq!(m4.transform_vector3(Vec3::Z).unwrap(), Vec3::Z);
    }

    #[test]
    fn test_projective_divide() {
        let mut m4 = Matrix::identity(4);
        m4[(3, 3)] = 2.0;
        assert_eq!(m4.transform_point3(Vec3::new(2.0, 4.0, 6.0)).unwrap(), Vec3::new(1.0, 2.0, 3.0));

        let mut m3 = Matrix::identity(3);
        m3[(2, 2)] = 0.0;
        assert!(m3.transform_point2(Vec2::ONE).is_err());
    }
}
