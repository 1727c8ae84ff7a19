//! # Matrix Module
//!
//! A dense, row-major `f64` matrix of arbitrary shape.
//!
//! This module contains the core `Matrix` type and its constructors:
//! - Shape-validated construction and element access
//! - Arithmetic and homogeneous point/vector application (`ops`)
//! - LU decomposition, determinant, inverse, and rank (`decomposition`)
//!
//! Operations that can fail on shape return `MathResult`; only the `Index`
//! operators panic, matching slice indexing.

pub mod decomposition;
pub mod ops;

pub use decomposition::*;

use crate::{MathResult, PandaMathError, Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// A dense matrix stored in row-major order.
///
/// Always holds `rows * cols` elements with at least one row and one column.
///
/// # Examples
///
/// ```
/// use panda_math::Matrix;
///
/// let m = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
/// assert_eq!(m.shape(), (2, 2));
/// assert_eq!(m[(1, 0)], 3.0);
/// assert_eq!(m.determinant().unwrap(), -2.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MatrixData", into = "MatrixData")]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

/// Serialized form of [`Matrix`]; validated on the way in.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MatrixData {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl TryFrom<MatrixData> for Matrix {
    type Error = PandaMathError;

    fn try_from(raw: MatrixData) -> MathResult<Self> {
        Matrix::new(raw.rows, raw.cols, raw.data)
    }
}

impl From<Matrix> for MatrixData {
    fn from(matrix: Matrix) -> Self {
        Self {
            rows: matrix.rows,
            cols: matrix.cols,
            data: matrix.data,
        }
    }
}

fn assert_non_empty(rows: usize, cols: usize) {
    assert!(
        rows > 0 && cols > 0,
        "matrix must have at least one row and column, got {}x{}",
        rows,
        cols
    );
}

impl Matrix {
    /// Creates a matrix from row-major data.
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> MathResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(PandaMathError::DimensionMismatch(format!(
                "matrix must have at least one row and column, got {}x{}",
                rows, cols
            )));
        }
        if data.len() != rows * cols {
            return Err(PandaMathError::DimensionMismatch(format!(
                "{}x{} matrix needs {} elements, got {}",
                rows,
                cols,
                rows * cols,
                data.len()
            )));
        }
        Ok(Self { rows, cols, data })
    }

    /// Internal constructor for shapes already known to be valid.
    pub(crate) fn from_parts(rows: usize, cols: usize, data: Vec<f64>) -> Self {
        debug_assert!(rows > 0 && cols > 0 && data.len() == rows * cols);
        Self { rows, cols, data }
    }

    /// Creates a matrix filled with `value`.
    ///
    /// # Panics
    ///
    /// Panics if `rows` or `cols` is zero. Use [`Matrix::new`] for shapes that
    /// come from input.
    pub fn filled(rows: usize, cols: usize, value: f64) -> Self {
        assert_non_empty(rows, cols);
        Self::from_parts(rows, cols, vec![value; rows * cols])
    }

    /// # Panics
    ///
    /// Panics if `rows` or `cols` is zero.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, 0.0)
    }

    /// The `n x n` identity matrix.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..m.rows {
            m.data[i * m.cols + i] = 1.0;
        }
        m
    }

    /// Creates a matrix from a slice of rows.
    ///
    /// Fails if there are no rows, the rows are empty, or the rows differ in length.
    pub fn from_rows(rows: &[Vec<f64>]) -> MathResult<Self> {
        let cols = rows.first().map(|r| r.len()).unwrap_or(0);
        if let Some((index, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(PandaMathError::DimensionMismatch(format!(
                "row {} has {} columns, expected {}",
                index,
                row.len(),
                cols
            )));
        }
        let data: Vec<f64> = rows.iter().flatten().copied().collect();
        Self::new(rows.len(), cols, data)
    }

    /// Creates a matrix whose element at `(r, c)` is `f(r, c)`.
    ///
    /// # Panics
    ///
    /// Panics if `rows` or `cols` is zero.
    pub fn from_fn(rows: usize, cols: usize, f: impl Fn(usize, usize) -> f64) -> Self {
        assert_non_empty(rows, cols);
        let data = (0..rows)
            .flat_map(|r| (0..cols).map(move |c| (r, c)))
            .map(|(r, c)| f(r, c))
            .collect();
        Self::from_parts(rows, cols, data)
    }

    /// Square matrix with `diagonal` on the main diagonal.
    pub fn from_diagonal(diagonal: &[f64]) -> MathResult<Self> {
        if diagonal.is_empty() {
            return Err(PandaMathError::DimensionMismatch(
                "diagonal must not be empty".to_string(),
            ));
        }
        let n = diagonal.len();
        Ok(Self::from_fn(n, n, |r, c| if r == c { diagonal[r] } else { 0.0 }))
    }

    /// 3x3 matrix whose columns are the given basis vectors.
    pub fn from_columns_vec3(x: Vec3, y: Vec3, z: Vec3) -> Self {
        Self::from_parts(
            3,
            3,
            vec![x.x, y.x, z.x, x.y, y.y, z.y, x.z, y.z, z.z],
        )
    }

    /// 4x4 matrix whose columns are the given vectors.
    pub fn from_columns_vec4(x: Vec4, y: Vec4, z: Vec4, w: Vec4) -> Self {
        let columns = [x, y, z, w];
        Self::from_fn(4, 4, |r, c| columns[c][r])
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Returns the element at `(row, col)`, or None if out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    /// Sets the element at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> MathResult<()> {
        if row >= self.rows || col >= self.cols {
            return Err(PandaMathError::IndexOutOfBounds(format!(
                "({}, {}) in a {}x{} matrix",
                row, col, self.rows, self.cols
            )));
        }
        self.data[row * self.cols + col] = value;
        Ok(())
    }

    /// Copy of row `index`, or None if out of range.
    pub fn row(&self, index: usize) -> Option<Vec<f64>> {
        (index < self.rows).then(|| self.data[index * self.cols..(index + 1) * self.cols].to_vec())
    }

    /// Copy of column `index`, or None if out of range.
    pub fn column(&self, index: usize) -> Option<Vec<f64>> {
        (index < self.cols).then(|| (0..self.rows).map(|r| self.data[r * self.cols + index]).collect())
    }

    /// Row-major element storage.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data.chunks(self.cols).map(|row| row.to_vec()).collect()
    }

    /// Fails with `NotSquare` unless the matrix is square.
    pub(crate) fn require_square(&self) -> MathResult<usize> {
        if self.is_square() {
            Ok(self.rows)
        } else {
            Err(PandaMathError::NotSquare {
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Fails with `DimensionMismatch` unless the matrix has the given shape.
    pub(crate) fn require_shape(&self, rows: usize, cols: usize, what: &str) -> MathResult<()> {
        if self.shape() == (rows, cols) {
            Ok(())
        } else {
            Err(PandaMathError::DimensionMismatch(format!(
                "{} needs a {}x{} matrix, got {}x{}",
                what, rows, cols, self.rows, self.cols
            )))
        }
    }
}

/// Panics if the index is out of range.
impl std::ops::Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        assert!(
            row < self.rows && col < self.cols,
            "index ({}, {}) out of range for {}x{} matrix",
            row,
            col,
            self.rows,
            self.cols
        );
        &self.data[row * self.cols + col]
    }
}

impl std::ops::IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        assert!(
            row < self.rows && col < self.cols,
            "index ({}, {}) out of range for {}x{} matrix",
            row,
            col,
            self.rows,
            self.cols
        );
        &mut self.data[row * self.cols + col]
    }
}

impl std::fmt::Display for Matrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, row) in self.data.chunks(self.cols).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let parts: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            write!(f, "[{}]", parts.join(", "))?;
        }
        Ok(())
    }
}
