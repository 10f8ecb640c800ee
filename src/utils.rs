//! Shared `ndarray` ↔ `nalgebra` bridging helpers.
//!
//! Panel and residual storage lives in `ndarray` containers; the dense
//! linear algebra (normal-equation solves, eigenvalues, Cholesky) runs on
//! `nalgebra` matrices. These helpers perform the copies at that seam so
//! the estimation modules stay free of layout bookkeeping.

use nalgebra::DMatrix;
use ndarray::{Array2, ArrayView2};

/// Copy a row-major `ndarray` view into an owned `nalgebra` matrix.
#[inline]
pub fn to_dmatrix(view: ArrayView2<'_, f64>) -> DMatrix<f64> {
    let (rows, cols) = view.dim();
    DMatrix::from_fn(rows, cols, |i, j| view[(i, j)])
}

/// Copy a `nalgebra` matrix into an owned row-major `ndarray` array.
#[inline]
pub fn to_array2(mat: &DMatrix<f64>) -> Array2<f64> {
    Array2::from_shape_fn((mat.nrows(), mat.ncols()), |(i, j)| mat[(i, j)])
}
