//! statistical_tests::arch — multivariate ARCH-LM test on VAR residuals.
//!
//! Purpose
//! -------
//! Implement the multivariate ARCH Lagrange-multiplier test for
//! conditional heteroskedasticity in VAR residuals. The null hypothesis
//! is that the vectorized outer products vech(u_t u_t') are serially
//! unpredictable from their own lags.
//!
//! Key behaviors
//! -------------
//! - Regress vech(u_t u_t') on a constant and q of its own lags, equation
//!   by equation in one multivariate OLS pass.
//! - Form the multivariate R² measure
//!   R²_m = 1 − (2 / (K(K+1))) · tr(Ω Ω₀⁻¹), where Ω is the residual
//!   covariance of the auxiliary regression and Ω₀ the covariance of the
//!   dependent block, then refer ½·T·K(K+1)·R²_m to χ² with
//!   q·K²(K+1)²/4 degrees of freedom.
//!
//! Invariants & assumptions
//! ------------------------
//! - The auxiliary regression needs more observations than regressors;
//!   with m = K(K+1)/2 dependent series the design has 1 + q·m columns.
//!
//! Conventions
//! -----------
//! - Like the portmanteau test, the outcome is informational only; the
//!   pipeline reports it and continues regardless of rejection.
//!
//! Downstream usage
//! ----------------
//! - The pipeline runs this once on the final VAR residuals with 5 lags.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the degrees-of-freedom formula, the p-value range,
//!   and the guard branches.

use nalgebra::DMatrix;
use ndarray::ArrayView2;
use statrs::distribution::{ChiSquared, ContinuousCDF};

use crate::statistical_tests::errors::{TestError, TestResult};

const TEST_NAME: &str = "arch";

/// ArchOutcome — outcome of the multivariate ARCH-LM test.
///
/// Fields
/// ------
/// - `stat`: `f64`
///   The LM statistic ½·T·K(K+1)·R²_m.
/// - `p_value`: `f64`
///   Upper-tail χ² probability of `stat` at `df` degrees of freedom.
/// - `lags`: `usize`
///   Number of lags q of vech(u u') in the auxiliary regression.
/// - `df`: `usize`
///   Degrees of freedom, q·K²(K+1)²/4.
///
/// Invariants
/// ----------
/// - `p_value ∈ [0, 1]`, `df ≥ 1`.
#[derive(Debug, Copy, Clone)]
pub struct ArchOutcome {
    stat: f64,
    p_value: f64,
    lags: usize,
    df: usize,
}

impl ArchOutcome {
    /// Run the multivariate ARCH-LM test on VAR residuals.
    ///
    /// Parameters
    /// ----------
    /// - `residuals`: `ArrayView2<'_, f64>`
    ///   Residual matrix, rows = time, columns = equations (T×K).
    /// - `lags`: `usize`
    ///   Number of lags q in the auxiliary regression; must be ≥ 1.
    ///
    /// Returns
    /// -------
    /// `TestResult<ArchOutcome>`
    ///   Statistic, χ² p-value, and degrees of freedom.
    ///
    /// Errors
    /// ------
    /// - `TestError::InvalidLagCount` when `lags == 0`.
    /// - `TestError::InsufficientData` when the auxiliary regression has
    ///   no spare observations.
    /// - `TestError::NonFiniteValue` for non-finite residual entries.
    /// - `TestError::SingularMoment` when an auxiliary moment matrix
    ///   cannot be inverted.
    pub fn multivariate(residuals: ArrayView2<'_, f64>, lags: usize) -> TestResult<Self> {
        if lags == 0 {
            return Err(TestError::InvalidLagCount { test: TEST_NAME, lags });
        }
        let n = residuals.nrows();
        let k = residuals.ncols();
        if k == 0 {
            return Err(TestError::InsufficientData { test: TEST_NAME, needed: 1, actual: 0 });
        }
        for &value in residuals.iter() {
            if !value.is_finite() {
                return Err(TestError::NonFiniteValue { test: TEST_NAME, value });
            }
        }
        let m = k * (k + 1) / 2;
        let ncoef = 1 + lags * m;
        let nv = n.saturating_sub(lags);
        if nv <= ncoef {
            return Err(TestError::InsufficientData {
                test: TEST_NAME,
                needed: lags + ncoef + 1,
                actual: n,
            });
        }

        // vech(u_t u_t') rows, one per time step.
        let mut vech = DMatrix::zeros(n, m);
        for t in 0..n {
            let mut slot = 0;
            for i in 0..k {
                for j in i..k {
                    vech[(t, slot)] = residuals[(t, i)] * residuals[(t, j)];
                    slot += 1;
                }
            }
        }

        // Auxiliary regression: vech_t on [1, vech_{t-1}, .., vech_{t-q}].
        let mut y = DMatrix::zeros(nv, m);
        let mut x = DMatrix::zeros(nv, ncoef);
        for (row, t) in (lags..n).enumerate() {
            for c in 0..m {
                y[(row, c)] = vech[(t, c)];
            }
            x[(row, 0)] = 1.0;
            for l in 1..=lags {
                for c in 0..m {
                    x[(row, 1 + (l - 1) * m + c)] = vech[(t - l, c)];
                }
            }
        }

        let xtx = x.transpose() * &x;
        let xtx_inv = xtx
            .try_inverse()
            .ok_or(TestError::SingularMoment { test: TEST_NAME })?;
        let b = &xtx_inv * x.transpose() * &y;
        let e = &y - &x * &b;
        let omega = e.transpose() * &e / nv as f64;

        let mut centered = y.clone();
        for c in 0..m {
            let mean = y.column(c).sum() / nv as f64;
            for r in 0..nv {
                centered[(r, c)] -= mean;
            }
        }
        let omega0 = centered.transpose() * &centered / nv as f64;
        let omega0_inv = omega0
            .try_inverse()
            .ok_or(TestError::SingularMoment { test: TEST_NAME })?;

        let kk = k as f64;
        let r2m = 1.0 - (2.0 / (kk * (kk + 1.0))) * (omega * omega0_inv).trace();
        let stat = 0.5 * nv as f64 * kk * (kk + 1.0) * r2m;

        let df = lags * k * k * (k + 1) * (k + 1) / 4;
        let chi2 = ChiSquared::new(df as f64)
            .map_err(|_| TestError::SingularMoment { test: TEST_NAME })?;
        let p_value = 1.0 - chi2.cdf(stat);

        Ok(ArchOutcome { stat, p_value, lags, df })
    }

    /// The LM statistic.
    pub fn stat(&self) -> f64 {
        self.stat
    }

    /// Upper-tail χ² p-value.
    pub fn p_value(&self) -> f64 {
        self.p_value
    }

    /// Number of lags in the auxiliary regression.
    pub fn lags(&self) -> usize {
        self.lags
    }

    /// Degrees of freedom of the reference χ² distribution.
    pub fn df(&self) -> usize {
        self.df
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The degrees-of-freedom formula and the p-value range contract.
    // - The guard branches for zero lags and short samples.
    //
    // They intentionally DO NOT cover:
    // - Power against genuine ARCH effects; the statistic's value on real
    //   residuals is pinned by the integration suite.
    // -------------------------------------------------------------------------

    fn noise_matrix(n: usize, k: usize) -> Array2<f64> {
        Array2::from_shape_fn((n, k), |(t, c)| {
            let x = (t * 53 + c * 97 + 7) as f64;
            (x.sin() * 43_758.547).rem_euclid(1.0) - 0.5
        })
    }

    #[test]
    // Purpose
    // -------
    // Verify the degrees-of-freedom contract df = q·K²(K+1)²/4 and the
    // p-value range.
    //
    // Given
    // -----
    // - A 200×2 residual matrix with q = 2.
    //
    // Expect
    // ------
    // - `df() == 2 * 4 * 9 / 4 == 18` and p-value in [0, 1].
    fn arch_degrees_of_freedom_follow_contract() {
        // Arrange
        let residuals = noise_matrix(200, 2);

        // Act
        let outcome = ArchOutcome::multivariate(residuals.view(), 2).expect("test should run");

        // Assert
        assert_eq!(outcome.df(), 18);
        assert_eq!(outcome.lags(), 2);
        assert!((0.0..=1.0).contains(&outcome.p_value()));
        assert!(outcome.stat().is_finite());
    }

    #[test]
    // Purpose
    // -------
    // Ensure a zero lag count is rejected.
    //
    // Given
    // -----
    // - q = 0.
    //
    // Expect
    // ------
    // - `Err(TestError::InvalidLagCount)`.
    fn arch_zero_lags_returns_invalid_lag_count() {
        // Arrange
        let residuals = noise_matrix(50, 2);

        // Act
        let result = ArchOutcome::multivariate(residuals.view(), 0);

        // Assert
        assert!(
            matches!(result, Err(TestError::InvalidLagCount { test: "arch", lags: 0 })),
            "expected InvalidLagCount, got {result:?}"
        );
    }

    #[test]
    // Purpose
    // -------
    // Ensure a sample too short for the auxiliary regression fails
    // cleanly.
    //
    // Given
    // -----
    // - A 12×3 residual matrix with q = 5: the design would have
    //   1 + 5·6 = 31 columns against at most 7 rows.
    //
    // Expect
    // ------
    // - `Err(TestError::InsufficientData)`.
    fn arch_short_sample_returns_insufficient_data() {
        // Arrange
        let residuals = noise_matrix(12, 3);

        // Act
        let result = ArchOutcome::multivariate(residuals.view(), 5);

        // Assert
        assert!(
            matches!(result, Err(TestError::InsufficientData { test: "arch", .. })),
            "expected InsufficientData, got {result:?}"
        );
    }
}
