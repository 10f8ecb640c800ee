//! statistical_tests::adf — augmented Dickey–Fuller unit-root test.
//!
//! Purpose
//! -------
//! Implement the augmented Dickey–Fuller (ADF) test with constant and
//! linear trend for a single real-valued series. The null hypothesis is
//! non-stationarity (presence of a unit root); the reported p-value is
//! interpolated from the Dickey–Fuller τ distribution table for the
//! constant-plus-trend case.
//!
//! Key behaviors
//! -------------
//! - Regress Δyₜ on a constant, a linear trend, the lagged level y₍ₜ₋₁₎,
//!   and `lags` lagged differences; the test statistic is the t-ratio of
//!   the lagged-level coefficient.
//! - Default the augmentation order to ⌊(n−1)^(1/3)⌋, the conventional
//!   sample-size rule for this test.
//! - Interpolate the p-value bilinearly in the τ_ct table over sample
//!   size and tail probability, clamping to [0.01, 0.99] outside the
//!   tabulated range.
//!
//! Invariants & assumptions
//! ------------------------
//! - Input must be finite; non-finite values are surfaced as
//!   `TestError::NonFiniteValue` before any regression is attempted.
//! - The effective regression must have more observations than
//!   regressors; otherwise `TestError::InsufficientData` is returned.
//!
//! Conventions
//! -----------
//! - Decision policy belongs to the caller: the pipeline flags a series
//!   non-stationary when `p_value > significance` (0.05 by default).
//!   This module only reports the statistic and p-value.
//! - The returned p-value lies in [0.01, 0.99] by construction; the
//!   clamp matches the tabulated range of the τ distribution.
//!
//! Downstream usage
//! ----------------
//! - The pipeline runs [`AdfOutcome::augmented_dickey_fuller`] once per
//!   panel column and differences the whole panel when any column's
//!   p-value exceeds the significance level.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the default lag rule, the p-value range contract,
//!   rejection behavior on white noise vs a random walk, and the error
//!   branches for short and non-finite input.

use nalgebra::{DMatrix, DVector};

use crate::statistical_tests::errors::{TestError, TestResult};

const TEST_NAME: &str = "adf";

// Dickey–Fuller τ_ct critical values (constant + trend), tabulated by
// sample size (rows) and cumulative probability (columns).
const TABLE_T: [f64; 6] = [25.0, 50.0, 100.0, 250.0, 500.0, 100_000.0];
const TABLE_P: [f64; 8] = [0.01, 0.025, 0.05, 0.10, 0.90, 0.95, 0.975, 0.99];
const TABLE: [[f64; 8]; 6] = [
    [-4.38, -3.95, -3.60, -3.24, -1.14, -0.80, -0.50, -0.15],
    [-4.15, -3.80, -3.50, -3.18, -1.19, -0.87, -0.58, -0.24],
    [-4.04, -3.73, -3.45, -3.15, -1.22, -0.90, -0.62, -0.28],
    [-3.99, -3.69, -3.43, -3.13, -1.23, -0.92, -0.64, -0.31],
    [-3.98, -3.68, -3.42, -3.13, -1.24, -0.93, -0.65, -0.32],
    [-3.96, -3.66, -3.41, -3.12, -1.25, -0.94, -0.66, -0.33],
];

/// AdfOutcome — outcome of one augmented Dickey–Fuller test.
///
/// Purpose
/// -------
/// Hold the τ statistic, its interpolated p-value, and the regression
/// configuration actually used, as a cheap copyable value object.
///
/// Fields
/// ------
/// - `stat`: `f64`
///   The t-ratio of the lagged-level coefficient (the ADF τ statistic).
/// - `p_value`: `f64`
///   Interpolated tail probability under the unit-root null, clamped to
///   [0.01, 0.99].
/// - `lags`: `usize`
///   Augmentation order (number of lagged differences) used.
/// - `nobs`: `usize`
///   Number of observations entering the test regression.
///
/// Invariants
/// ----------
/// - `p_value ∈ [0.01, 0.99] ⊂ [0, 1]`.
/// - `stat` is finite whenever construction succeeds.
#[derive(Debug, Copy, Clone)]
pub struct AdfOutcome {
    stat: f64,
    p_value: f64,
    lags: usize,
    nobs: usize,
}

impl AdfOutcome {
    /// Run the ADF test with the default augmentation order ⌊(n−1)^(1/3)⌋.
    ///
    /// Parameters
    /// ----------
    /// - `data`: `&[f64]`
    ///   Level series, oldest observation first, all finite, length ≥ 2.
    ///
    /// Returns
    /// -------
    /// `TestResult<AdfOutcome>`
    ///   The τ statistic, interpolated p-value, and regression sizes.
    ///
    /// Errors
    /// ------
    /// - `TestError::NonFiniteValue` for NaN/±∞ input.
    /// - `TestError::InsufficientData` when the regression would have no
    ///   spare degrees of freedom.
    pub fn augmented_dickey_fuller(data: &[f64]) -> TestResult<Self> {
        let lags = ((data.len().saturating_sub(1)) as f64).cbrt() as usize;
        Self::with_lag_order(data, lags)
    }

    /// Run the ADF test with an explicit augmentation order.
    ///
    /// Parameters
    /// ----------
    /// - `data`: `&[f64]`
    ///   Level series, oldest observation first, all finite.
    /// - `lags`: `usize`
    ///   Number of lagged differences to include (may be 0).
    ///
    /// Returns
    /// -------
    /// `TestResult<AdfOutcome>` as for
    /// [`augmented_dickey_fuller`](Self::augmented_dickey_fuller).
    pub fn with_lag_order(data: &[f64], lags: usize) -> TestResult<Self> {
        for &value in data {
            if !value.is_finite() {
                return Err(TestError::NonFiniteValue { test: TEST_NAME, value });
            }
        }
        let n = data.len();
        let ncoef = 3 + lags;
        // Effective sample after differencing and lagging.
        let nobs = n.saturating_sub(1).saturating_sub(lags);
        if nobs <= ncoef {
            return Err(TestError::InsufficientData {
                test: TEST_NAME,
                needed: ncoef + 1,
                actual: nobs,
            });
        }

        let dy: Vec<f64> = data.windows(2).map(|w| w[1] - w[0]).collect();
        let n_dy = dy.len();

        let mut lhs = Vec::with_capacity(nobs);
        let mut design = Vec::with_capacity(nobs * ncoef);
        for t in lags..n_dy {
            lhs.push(dy[t]);
            design.push(1.0);
            design.push((t + 1) as f64);
            design.push(data[t]);
            for i in 1..=lags {
                design.push(dy[t - i]);
            }
        }

        let x = DMatrix::from_row_slice(nobs, ncoef, &design);
        let y = DVector::from_row_slice(&lhs);
        let xtx = x.transpose() * &x;
        let xtx_inv = xtx
            .try_inverse()
            .ok_or(TestError::SingularMoment { test: TEST_NAME })?;
        let beta = &xtx_inv * x.transpose() * &y;
        let resid = &y - &x * &beta;
        let sse: f64 = resid.iter().map(|u| u * u).sum();
        let sigma2 = sse / (nobs - ncoef) as f64;

        let se_gamma = (xtx_inv[(2, 2)] * sigma2).sqrt();
        if se_gamma <= 0.0 || !se_gamma.is_finite() {
            return Err(TestError::SingularMoment { test: TEST_NAME });
        }
        let stat = beta[2] / se_gamma;

        Ok(AdfOutcome { stat, p_value: tau_p_value(stat, nobs), lags, nobs })
    }

    /// The ADF τ statistic (t-ratio of the lagged-level coefficient).
    pub fn stat(&self) -> f64 {
        self.stat
    }

    /// Interpolated p-value under the unit-root null, in [0.01, 0.99].
    pub fn p_value(&self) -> f64 {
        self.p_value
    }

    /// Augmentation order actually used.
    pub fn lags(&self) -> usize {
        self.lags
    }

    /// Observations entering the test regression.
    pub fn nobs(&self) -> usize {
        self.nobs
    }
}

//
// ---------- Private helpers (compact docs) ----------
//

/// Piecewise-linear interpolation of `ys` over `xs` at `x`, clamped to
/// the endpoints outside the tabulated range. `xs` must be increasing.
fn interpolate(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    if x <= xs[0] {
        return ys[0];
    }
    if x >= xs[xs.len() - 1] {
        return ys[ys.len() - 1];
    }
    for i in 0..xs.len() - 1 {
        if x <= xs[i + 1] {
            let w = (x - xs[i]) / (xs[i + 1] - xs[i]);
            return ys[i] + w * (ys[i + 1] - ys[i]);
        }
    }
    ys[ys.len() - 1]
}

/// Interpolate the τ_ct table at the given statistic and sample size:
/// first each probability column at `nobs`, then the probability at
/// `stat` along the interpolated critical values. Clamped to
/// [0.01, 0.99], the tabulated range.
fn tau_p_value(stat: f64, nobs: usize) -> f64 {
    let mut crit = [0.0_f64; 8];
    for (col, slot) in crit.iter_mut().enumerate() {
        let column: Vec<f64> = TABLE.iter().map(|row| row[col]).collect();
        *slot = interpolate(&TABLE_T, &column, nobs as f64);
    }
    interpolate(&crit, &TABLE_P, stat).clamp(0.01, 0.99)
}
