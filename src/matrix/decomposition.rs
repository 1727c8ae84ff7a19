//! # Matrix Decomposition
//!
//! LU factorization with partial pivoting and everything built on it:
//! determinants, inverses, linear solves, and rank.

use super::Matrix;
use crate::config::SINGULAR_EPSILON;
use crate::{MathResult, PandaMathError};
use serde::{Deserialize, Serialize};

/// Result of factoring a square matrix as `P * A = L * U`.
///
/// `L` (unit lower triangular) and `U` (upper triangular) share one packed
/// matrix; `permutation[i]` is the original row now at position `i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LuDecomposition {
    packed: Matrix,
    permutation: Vec<usize>,
    sign: f64,
}

impl LuDecomposition {
    /// Dimension of the factored matrix.
    pub fn size(&self) -> usize {
        self.packed.rows()
    }

    pub fn permutation(&self) -> &[usize] {
        &self.permutation
    }

    /// Unit lower-triangular factor.
    pub fn lower(&self) -> Matrix {
        let lu = self.packed.as_slice();
        let n = self.size();
        Matrix::from_fn(n, n, |r, c| match r.cmp(&c) {
            std::cmp::Ordering::Greater => lu[r * n + c],
            std::cmp::Ordering::Equal => 1.0,
            std::cmp::Ordering::Less => 0.0,
        })
    }

    /// Upper-triangular factor.
    pub fn upper(&self) -> Matrix {
        let lu = self.packed.as_slice();
        let n = self.size();
        Matrix::from_fn(n, n, |r, c| if r <= c { lu[r * n + c] } else { 0.0 })
    }

    pub fn determinant(&self) -> f64 {
        let n = self.size();
        let lu = self.packed.as_slice();
        (0..n).fold(self.sign, |acc, i| acc * lu[i * n + i])
    }

    /// Solves `A x = b` for `x`.
    pub fn solve(&self, b: &[f64]) -> MathResult<Vec<f64>> {
        let n = self.size();
        if b.len() != n {
            return Err(PandaMathError::DimensionMismatch(format!(
                "right-hand side has length {}, expected {}",
                b.len(),
                n
            )));
        }
        let lu = self.packed.as_slice();

        // Forward substitution with the permuted right-hand side.
        let mut x: Vec<f64> = self.permutation.iter().map(|&p| b[p]).collect();
        for i in 0..n {
            for k in 0..i {
                x[i] -= lu[i * n + k] * x[k];
            }
        }

        // Back substitution.
        for i in (0..n).rev() {
            for k in i + 1..n {
                x[i] -= lu[i * n + k] * x[k];
            }
            x[i] /= lu[i * n + i];
        }
        Ok(x)
    }
}

impl Matrix {
    /// Factors a square matrix with partial pivoting.
    ///
    /// Fails with `SingularMatrix` when a pivot falls below `SINGULAR_EPSILON`.
    pub fn lu(&self) -> MathResult<LuDecomposition> {
        let n = self.require_square()?;
        let mut a = self.as_slice().to_vec();
        let mut permutation: Vec<usize> = (0..n).collect();
        let mut sign = 1.0;

        for k in 0..n {
            let pivot_row = (k..n)
                .max_by(|&i, &j| a[i * n + k].abs().total_cmp(&a[j * n + k].abs()))
                .unwrap_or(k);
            let pivot = a[pivot_row * n + k];
            if pivot.abs() < SINGULAR_EPSILON {
                return Err(PandaMathError::SingularMatrix(format!(
                    "pivot {} in column {} is below {}",
                    pivot, k, SINGULAR_EPSILON
                )));
            }
            if pivot_row != k {
                for c in 0..n {
                    a.swap(k * n + c, pivot_row * n + c);
                }
                permutation.swap(k, pivot_row);
                sign = -sign;
            }
            for i in k + 1..n {
                let factor = a[i * n + k] / a[k * n + k];
                a[i * n + k] = factor;
                for j in k + 1..n {
                    a[i * n + j] -= factor * a[k * n + j];
                }
            }
        }

        Ok(LuDecomposition {
            packed: Matrix::from_parts(n, n, a),
            permutation,
            sign,
        })
    }

    /// Determinant of a square matrix.
    ///
    /// A matrix that `lu` rejects as singular has determinant 0 rather than an
    /// error, so `determinant` and `inverse` always agree. Otherwise sizes up to
    /// 3x3 use the closed-form expansion and larger ones the LU factors.
    pub fn determinant(&self) -> MathResult<f64> {
        let n = self.require_square()?;
        let lu = match self.lu() {
            Ok(lu) => lu,
            Err(PandaMathError::SingularMatrix(_)) => return Ok(0.0),
            Err(e) => return Err(e),
        };
        let m = self.as_slice();
        Ok(match n {
            1 => m[0],
            2 => m[0] * m[3] - m[1] * m[2],
            3 => {
                m[0] * (m[4] * m[8] - m[5] * m[7]) - m[1] * (m[3] * m[8] - m[5] * m[6])
                    + m[2] * (m[3] * m[7] - m[4] * m[6])
            }
            _ => lu.determinant(),
        })
    }

    /// Inverse of a square matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// use panda_math::Matrix;
    ///
    /// let m = Matrix::from_rows(&[vec![4.0, 7.0], vec![2.0, 6.0]]).unwrap();
    /// let product = m.try_mul(&m.inverse().unwrap()).unwrap();
    /// assert!(product.approx_eq(&Matrix::identity(2), 1e-12));
    ///
    /// let singular = Matrix::from_rows(&[vec![1.0, 2.0], vec![2.0, 4.0]]).unwrap();
    /// assert!(singular.inverse().is_err());
    /// ```
    pub fn inverse(&self) -> MathResult<Matrix> {
        let lu = self.lu()?;
        let n = lu.size();
        let mut data = vec![0.0; n * n];
        let mut unit = vec![0.0; n];
        for col in 0..n {
            unit.iter_mut().for_each(|v| *v = 0.0);
            unit[col] = 1.0;
            let x = lu.solve(&unit)?;
            for (row, value) in x.into_iter().enumerate() {
                data[row * n + col] = value;
            }
        }
        Ok(Matrix::from_parts(n, n, data))
    }

    /// Solves `self * x = b` for a square, non-singular matrix.
    pub fn solve(&self, b: &[f64]) -> MathResult<Vec<f64>> {
        self.lu()?.solve(b)
    }

    /// Number of linearly independent rows, by Gaussian elimination.
    ///
    /// Works for any shape. Pivots smaller than `SINGULAR_EPSILON` scaled by the
    /// largest element count as zero.
    pub fn rank(&self) -> usize {
        let (rows, cols) = self.shape();
        let mut a = self.as_slice().to_vec();
        let scale = a.iter().fold(0.0_f64, |acc, v| acc.max(v.abs())).max(1.0);
        let tolerance = SINGULAR_EPSILON * scale;

        let mut rank = 0;
        for col in 0..cols {
            if rank == rows {
                break;
            }
            let pivot_row = (rank..rows)
                .max_by(|&i, &j| a[i * cols + col].abs().total_cmp(&a[j * cols + col].abs()))
                .unwrap_or(rank);
            if a[pivot_row * cols + col].abs() <= tolerance {
                log::debug!("rank: column {} has no usable pivot", col);
                continue;
            }
            for c in 0..cols {
                a.swap(rank * cols + c, pivot_row * cols + c);
            }
            for r in rank + 1..rows {
                let factor = a[r * cols + col] / a[rank * cols + col];
                for c in col..cols {
                    a[r * cols + c] -= factor * a[rank * cols + c];
                }
            }
            rank += 1;
        }
        rank
    }

    /// The matrix with row `row` and column `col` removed.
    pub fn submatrix(&self, row: usize, col: usize) -> MathResult<Matrix> {
        let (rows, cols) = self.shape();
        if row >= rows || col >= cols {
            return Err(PandaMathError::IndexOutOfBounds(format!(
                "({}, {}) in a {}x{} matrix",
                row, col, rows, cols
            )));
        }
        if rows < 2 || cols < 2 {
            return Err(PandaMathError::DimensionMismatch(format!(
                "cannot remove a row and column from a {}x{} matrix",
                rows, cols
            )));
        }
        let data = self
            .as_slice()
            .chunks(cols)
            .enumerate()
            .filter(|(r, _)| *r != row)
            .flat_map(|(_, values)| {
                values
                    .iter()
                    .enumerate()
                    .filter(|(c, _)| *c != col)
                    .map(|(_, v)| *v)
            })
            .collect();
        Ok(Matrix::from_parts(rows - 1, cols - 1, data))
    }

    /// Determinant of the submatrix without `row` and `col`.
    pub fn minor(&self, row: usize, col: usize) -> MathResult<f64> {
        self.require_square()?;
        self.submatrix(row, col)?.determinant()
    }

    /// Signed minor: `(-1)^(row + col) * minor(row, col)`.
    pub fn cofactor(&self, row: usize, col: usize) -> MathResult<f64> {
        let minor = self.minor(row, col)?;
        Ok(if (row + col) % 2 == 0 { minor } else { -minor })
    }
}
