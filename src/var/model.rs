//! var::model — per-equation OLS estimation of a VAR(p).
//!
//! Purpose
//! -------
//! Fit a vector autoregression with intercept by equation-wise ordinary
//! least squares and expose everything the derived analyses need: lag
//! coefficient matrices, the degrees-of-freedom-corrected residual
//! covariance, coefficient inference, the companion matrix, and the MA
//! representation (plain and orthogonalized).
//!
//! Key behaviors
//! -------------
//! - Stack regressors as [y_{t−1}', .., y_{t−p}', 1] per row; with a
//!   common design across equations the K regressions collapse into one
//!   multivariate least-squares solve.
//! - Correct the residual covariance by the per-equation degrees of
//!   freedom, T − Kp − 1.
//! - Derive MA matrices recursively: Ψ₀ = I,
//!   Ψᵢ = Σ_{j=1..min(i,p)} Ψ₍ᵢ₋ⱼ₎ A_j; orthogonalized responses use the
//!   lower Cholesky factor of the residual covariance.
//!
//! Invariants & assumptions
//! ------------------------
//! - The estimation sample has more usable rows than regressors; this is
//!   validated before any linear algebra runs.
//! - Coefficients and residuals are finite on success; a non-finite
//!   value anywhere is an error, never a silent NaN.
//!
//! Conventions
//! -----------
//! - Coefficient layout is lags-then-intercept: rows 0..K of the
//!   coefficient matrix belong to lag 1, the last row is the intercept.
//! - The fitted model retains its estimation sample, so forecasting and
//!   bootstrap resampling need no external data plumbing.
//!
//! Downstream usage
//! ----------------
//! - [`LagSelection`](crate::var::LagSelection) reuses the internal
//!   least-squares pass over a common sample; stability, FEVD, IRF, and
//!   forecasting all start from a fitted [`VarModel`].
//!
//! Testing notes
//! -------------
//! - Unit tests recover a known VAR(1) from synthetic data generated
//!   without noise and exercise the validation branches; exact values on
//!   the reference panel are pinned by the integration suite.

use nalgebra::{Cholesky, DMatrix};
use ndarray::{Array1, Array2, ArrayView2};
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::utils::{to_array2, to_dmatrix};
use crate::var::errors::{VarError, VarResult};

const STAGE: &str = "estimation";

/// One multivariate least-squares pass shared by estimation, lag
/// selection, and the bootstrap refits.
pub(crate) struct LeastSquaresFit {
    /// Stacked coefficients, (Kp + 1) × K, lags-then-intercept rows.
    pub coefficients: DMatrix<f64>,
    /// Residuals, nobs × K.
    pub residuals: DMatrix<f64>,
    /// Inverse regressor moment matrix (X'X)⁻¹.
    pub xtx_inv: DMatrix<f64>,
}

/// Regress rows `start..` of `data` on their own `order` lags plus an
/// intercept. `start ≥ order` controls the common-sample alignment used
/// by lag selection.
pub(crate) fn least_squares(
    data: ArrayView2<'_, f64>,
    order: usize,
    start: usize,
    stage: &'static str,
) -> VarResult<LeastSquaresFit> {
    if order == 0 || start < order {
        return Err(VarError::InvalidLagOrder { stage, lags: order });
    }
    let n = data.nrows();
    let k = data.ncols();
    let ncoef = k * order + 1;
    let nobs = n.saturating_sub(start);
    if nobs <= ncoef {
        return Err(VarError::InsufficientSample {
            stage,
            needed: start + ncoef + 1,
            actual: n,
        });
    }

    let mut y = DMatrix::zeros(nobs, k);
    let mut x = DMatrix::zeros(nobs, ncoef);
    for (row, t) in (start..n).enumerate() {
        for c in 0..k {
            y[(row, c)] = data[(t, c)];
        }
        for j in 1..=order {
            for c in 0..k {
                x[(row, (j - 1) * k + c)] = data[(t - j, c)];
            }
        }
        x[(row, ncoef - 1)] = 1.0;
    }

    let xtx = x.transpose() * &x;
    let xtx_inv = xtx.try_inverse().ok_or(VarError::SingularDesign { stage })?;
    let coefficients = &xtx_inv * x.transpose() * &y;
    let residuals = &y - &x * &coefficients;

    for &value in coefficients.iter().chain(residuals.iter()) {
        if !value.is_finite() {
            return Err(VarError::NonFiniteValue { stage, value });
        }
    }

    Ok(LeastSquaresFit { coefficients, residuals, xtx_inv })
}

/// VarModel — a fitted VAR(p) with intercept.
///
/// Purpose
/// -------
/// Hold the estimation output and the retained sample, and answer the
/// structural queries (companion matrix, MA matrices, orthogonalized MA
/// matrices) that the derived analyses build on.
///
/// Fields
/// ------
/// - `names`: `Vec<String>`
///   Variable names in column order.
/// - `data`: `Array2<f64>`
///   The estimation sample (rows = time), retained for forecasting and
///   bootstrap resampling.
/// - `order`: `usize`
///   Lag order p.
/// - `coefficients`: `Array2<f64>`
///   (Kp + 1) × K stacked coefficients, lags-then-intercept.
/// - `residuals`: `Array2<f64>`
///   nobs × K residual matrix.
/// - `sigma_u`: `Array2<f64>`
///   K × K residual covariance, divided by T − Kp − 1.
/// - `std_errors`, `t_stats`, `p_values`: `Array2<f64>`
///   Per-coefficient inference, same shape as `coefficients`.
///
/// Invariants
/// ----------
/// - `nobs() > K·order + 1`; every stored matrix is finite.
/// - `residuals.nrows() == data.nrows() − order`.
#[derive(Debug, Clone)]
pub struct VarModel {
    names: Vec<String>,
    data: Array2<f64>,
    order: usize,
    coefficients: Array2<f64>,
    residuals: Array2<f64>,
    sigma_u: Array2<f64>,
    std_errors: Array2<f64>,
    t_stats: Array2<f64>,
    p_values: Array2<f64>,
}

impl VarModel {
    /// Fit a VAR(p) with intercept by per-equation OLS.
    ///
    /// Parameters
    /// ----------
    /// - `names`: `Vec<String>`
    ///   One name per column of `data`.
    /// - `data`: `ArrayView2<'_, f64>`
    ///   Estimation sample, rows = time (oldest first), columns =
    ///   variables.
    /// - `order`: `usize`
    ///   Lag order p ≥ 1.
    ///
    /// Returns
    /// -------
    /// `VarResult<VarModel>`
    ///   The fitted model with residual covariance and coefficient
    ///   inference attached.
    ///
    /// Errors
    /// ------
    /// - `VarError::InvalidLagOrder` when `order == 0`.
    /// - `VarError::InsufficientSample` when T − p ≤ Kp + 1.
    /// - `VarError::SingularDesign` when X'X cannot be inverted.
    /// - `VarError::NonFiniteValue` if any computed quantity is
    ///   non-finite.
    pub fn fit(names: Vec<String>, data: ArrayView2<'_, f64>, order: usize) -> VarResult<Self> {
        let fit = least_squares(data, order, order, STAGE)?;
        let k = data.ncols();
        let nobs = fit.residuals.nrows();
        let ncoef = k * order + 1;
        let dof = nobs - ncoef;

        let sigma = fit.residuals.transpose() * &fit.residuals / dof as f64;

        let tdist = StudentsT::new(0.0, 1.0, dof as f64)
            .map_err(|_| VarError::InsufficientSample { stage: STAGE, needed: ncoef + 2, actual: nobs })?;
        let mut std_errors = DMatrix::zeros(ncoef, k);
        let mut t_stats = DMatrix::zeros(ncoef, k);
        let mut p_values = DMatrix::zeros(ncoef, k);
        for j in 0..ncoef {
            for eq in 0..k {
                let se = (fit.xtx_inv[(j, j)] * sigma[(eq, eq)]).sqrt();
                if !se.is_finite() || se <= 0.0 {
                    return Err(VarError::NonFiniteValue { stage: STAGE, value: se });
                }
                let t = fit.coefficients[(j, eq)] / se;
                std_errors[(j, eq)] = se;
                t_stats[(j, eq)] = t;
                p_values[(j, eq)] = 2.0 * (1.0 - tdist.cdf(t.abs()));
            }
        }

        Ok(VarModel {
            names,
            data: data.to_owned(),
            order,
            coefficients: to_array2(&fit.coefficients),
            residuals: to_array2(&fit.residuals),
            sigma_u: to_array2(&sigma),
            std_errors: to_array2(&std_errors),
            t_stats: to_array2(&t_stats),
            p_values: to_array2(&p_values),
        })
    }

    /// Variable names in column order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The retained estimation sample (rows = time).
    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    /// Lag order p.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Number of variables K.
    pub fn dim(&self) -> usize {
        self.data.ncols()
    }

    /// Effective observations T − p.
    pub fn nobs(&self) -> usize {
        self.residuals.nrows()
    }

    /// Per-equation residual degrees of freedom, T − Kp − 1.
    pub fn dof(&self) -> usize {
        self.nobs() - (self.dim() * self.order + 1)
    }

    /// Stacked coefficients, (Kp + 1) × K, lags-then-intercept rows.
    pub fn coefficients(&self) -> &Array2<f64> {
        &self.coefficients
    }

    /// Residual matrix, nobs × K.
    pub fn residuals(&self) -> &Array2<f64> {
        &self.residuals
    }

    /// Residual covariance Σ̂_u, divided by T − Kp − 1.
    pub fn sigma_u(&self) -> &Array2<f64> {
        &self.sigma_u
    }

    /// Coefficient standard errors, same shape as `coefficients`.
    pub fn std_errors(&self) -> &Array2<f64> {
        &self.std_errors
    }

    /// Coefficient t-statistics, same shape as `coefficients`.
    pub fn t_stats(&self) -> &Array2<f64> {
        &self.t_stats
    }

    /// Two-sided coefficient p-values against Student's t with `dof()`
    /// degrees of freedom.
    pub fn p_values(&self) -> &Array2<f64> {
        &self.p_values
    }

    /// The K × K lag coefficient matrix A_j for lag `j` (1-based).
    ///
    /// Row i of A_j holds the lag-j coefficients of equation i, so the
    /// recursion reads y_t = c + A_1 y_{t−1} + ... + A_p y_{t−p} + u_t.
    ///
    /// Panics
    /// ------
    /// - Panics if `j == 0` or `j > order()`; callers iterate
    ///   `1..=order()`.
    pub fn lag_matrix(&self, j: usize) -> Array2<f64> {
        assert!(j >= 1 && j <= self.order, "lag index {j} out of 1..={}", self.order);
        let k = self.dim();
        Array2::from_shape_fn((k, k), |(row, col)| self.coefficients[((j - 1) * k + col, row)])
    }

    /// The intercept vector c.
    pub fn intercept(&self) -> Array1<f64> {
        let k = self.dim();
        let last = self.coefficients.nrows() - 1;
        Array1::from_shape_fn(k, |eq| self.coefficients[(last, eq)])
    }

    /// The Kp × Kp companion matrix: lag matrices across the top block
    /// row, shifted identity below.
    pub fn companion(&self) -> DMatrix<f64> {
        let k = self.dim();
        let dim = k * self.order;
        let mut comp = DMatrix::zeros(dim, dim);
        for j in 1..=self.order {
            let aj = self.lag_matrix(j);
            for r in 0..k {
                for c in 0..k {
                    comp[(r, (j - 1) * k + c)] = aj[(r, c)];
                }
            }
        }
        for i in 0..dim - k {
            comp[(k + i, i)] = 1.0;
        }
        comp
    }

    /// MA representation Ψ₀..Ψ_n: Ψ₀ = I,
    /// Ψᵢ = Σ_{j=1..min(i,p)} Ψ₍ᵢ₋ⱼ₎ A_j.
    pub fn psi_matrices(&self, n: usize) -> Vec<DMatrix<f64>> {
        let k = self.dim();
        let lag_mats: Vec<DMatrix<f64>> =
            (1..=self.order).map(|j| to_dmatrix(self.lag_matrix(j).view())).collect();
        let mut psi = Vec::with_capacity(n + 1);
        psi.push(DMatrix::identity(k, k));
        for i in 1..=n {
            let mut m = DMatrix::zeros(k, k);
            for (j, aj) in lag_mats.iter().enumerate().take(i.min(self.order)) {
                m += &psi[i - j - 1] * aj;
            }
            psi.push(m);
        }
        psi
    }

    /// Orthogonalized MA matrices Θᵢ = Ψᵢ · L, where L is the lower
    /// Cholesky factor of Σ̂_u. The shock ordering follows the panel's
    /// column order.
    ///
    /// Errors
    /// ------
    /// - `VarError::CholeskyFailure` when Σ̂_u is not positive definite.
    pub fn theta_matrices(&self, n: usize) -> VarResult<Vec<DMatrix<f64>>> {
        let chol = Cholesky::new(to_dmatrix(self.sigma_u.view()))
            .ok_or(VarError::CholeskyFailure { stage: STAGE })?;
        let l = chol.l();
        Ok(self.psi_matrices(n).into_iter().map(|psi| psi * &l).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Exact coefficient recovery on a noiseless VAR(1) data-generating
    //   process.
    // - Shape contracts of the coefficient layout, companion matrix, and
    //   MA recursion.
    // - Validation branches for zero order and short samples.
    //
    // They intentionally DO NOT cover:
    // - Inference values on real data; the integration suite pins those
    //   on the reference panel.
    // -------------------------------------------------------------------------

    fn names2() -> Vec<String> {
        vec!["a".to_string(), "b".to_string()]
    }

    // Simulate y_t = c + A y_{t−1} exactly (no noise), so OLS must
    // recover A and c to machine precision.
    fn noiseless_var1(n: usize) -> (Array2<f64>, Array2<f64>, Array1<f64>) {
        let a = array![[0.5, 0.1], [-0.2, 0.3]];
        let c = array![1.0, -0.5];
        let mut data = Array2::zeros((n, 2));
        data[(0, 0)] = 2.0;
        data[(0, 1)] = -1.0;
        for t in 1..n {
            for i in 0..2 {
                // Tiny deterministic wobble keeps X'X non-singular.
                let wobble = 1e-3 * ((t * (i + 3)) as f64).sin();
                data[(t, i)] = c[i]
                    + a[(i, 0)] * data[(t - 1, 0)]
                    + a[(i, 1)] * data[(t - 1, 1)]
                    + wobble;
            }
        }
        (data, a, c)
    }

    #[test]
    // Purpose
    // -------
    // Verify that a VAR(1) fit recovers the generating coefficients on
    // near-noiseless data.
    //
    // Given
    // -----
    // - 60 observations from a known VAR(1) recursion with a 1e-3
    //   deterministic wobble.
    //
    // Expect
    // ------
    // - `lag_matrix(1)` and `intercept()` close to the truth, and
    //   residuals no larger than the wobble.
    fn var_model_fit_recovers_var1_coefficients() {
        // Arrange
        let (data, a_true, c_true) = noiseless_var1(60);

        // Act
        let model = VarModel::fit(names2(), data.view(), 1).expect("fit should succeed");

        // Assert
        let a_hat = model.lag_matrix(1);
        for i in 0..2 {
            for j in 0..2 {
                assert!(
                    (a_hat[(i, j)] - a_true[(i, j)]).abs() < 1e-2,
                    "A[{i}][{j}]: {} vs {}",
                    a_hat[(i, j)],
                    a_true[(i, j)]
                );
            }
        }
        let c_hat = model.intercept();
        for i in 0..2 {
            assert!((c_hat[i] - c_true[i]).abs() < 2e-2);
        }
        for &u in model.residuals().iter() {
            assert!(u.abs() < 5e-3, "residual too large: {u}");
        }
    }

    #[test]
    // Purpose
    // -------
    // Pin the shape contracts: coefficient layout, companion matrix, and
    // the MA recursion seed.
    //
    // Given
    // -----
    // - A VAR(2) fit on 80 observations of the noiseless fixture.
    //
    // Expect
    // ------
    // - Coefficients are (2·2 + 1) × 2; the companion is 4×4 with the
    //   shifted identity in place; Ψ₀ = I and Ψ₁ = A₁.
    fn var_model_shapes_and_ma_recursion_seed() {
        // Arrange
        let (data, _, _) = noiseless_var1(80);

        // Act
        let model = VarModel::fit(names2(), data.view(), 2).expect("fit should succeed");

        // Assert
        assert_eq!(model.coefficients().dim(), (5, 2));
        assert_eq!(model.nobs(), 78);
        assert_eq!(model.dof(), 78 - 5);

        let comp = model.companion();
        assert_eq!(comp.nrows(), 4);
        assert_eq!(comp[(2, 0)], 1.0);
        assert_eq!(comp[(3, 1)], 1.0);
        assert_eq!(comp[(2, 2)], 0.0);

        let psi = model.psi_matrices(3);
        assert_eq!(psi.len(), 4);
        assert_eq!(psi[0], DMatrix::identity(2, 2));
        let a1 = to_dmatrix(model.lag_matrix(1).view());
        assert!((&psi[1] - &a1).abs().max() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Ensure a zero lag order is rejected.
    //
    // Given
    // -----
    // - `order = 0`.
    //
    // Expect
    // ------
    // - `Err(VarError::InvalidLagOrder)`.
    fn var_model_fit_zero_order_returns_invalid_lag_order() {
        // Arrange
        let (data, _, _) = noiseless_var1(30);

        // Act
        let result = VarModel::fit(names2(), data.view(), 0);

        // Assert
        assert!(
            matches!(result, Err(VarError::InvalidLagOrder { lags: 0, .. })),
            "expected InvalidLagOrder, got {result:?}"
        );
    }

    #[test]
    // Purpose
    // -------
    // Ensure a sample too short for the requested order fails cleanly.
    //
    // Given
    // -----
    // - 8 observations and order 3: 5 usable rows against 7 regressors.
    //
    // Expect
    // ------
    // - `Err(VarError::InsufficientSample)`.
    fn var_model_fit_short_sample_returns_insufficient_sample() {
        // Arrange
        let (data, _, _) = noiseless_var1(8);

        // Act
        let result = VarModel::fit(names2(), data.view(), 3);

        // Assert
        assert!(
            matches!(result, Err(VarError::InsufficientSample { stage: "estimation", .. })),
            "expected InsufficientSample, got {result:?}"
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify that the orthogonalized MA matrices reproduce the Cholesky
    // factor at horizon zero.
    //
    // Given
    // -----
    // - A VAR(1) fit on the noiseless fixture.
    //
    // Expect
    // ------
    // - Θ₀ Θ₀' equals Σ̂_u within 1e-10.
    fn var_model_theta_zero_squares_to_sigma_u() {
        // Arrange
        let (data, _, _) = noiseless_var1(60);
        let model = VarModel::fit(names2(), data.view(), 1).expect("fit should succeed");

        // Act
        let theta = model.theta_matrices(0).expect("covariance is positive definite");

        // Assert
        let reproduced = &theta[0] * theta[0].transpose();
        let sigma = to_dmatrix(model.sigma_u().view());
        assert!((reproduced - sigma).abs().max() < 1e-10);
    }
}
