//! var::forecast — recursive multi-step forecasts with intervals.
//!
//! Purpose
//! -------
//! Produce h-step-ahead point forecasts by iterating the fitted VAR
//! recursion forward from the end of the sample, with Gaussian interval
//! bounds built from the accumulated MA forecast-error covariance.
//!
//! Key behaviors
//! -------------
//! - Each step feeds previous forecasts back in as regressors, so the
//!   recursion needs only the fitted coefficients and the final p rows
//!   of the sample.
//! - The forecast MSE at step h is Σ_{i<h} Ψᵢ Σ̂_u Ψᵢ'; its diagonal
//!   drives the half-widths, which therefore widen (weakly) with the
//!   horizon.
//! - Interval bounds are point ± z·√MSE with z the standard normal
//!   quantile at (1 + coverage)/2.
//!
//! Conventions
//! -----------
//! - Forecasts are on the scale of the estimation sample; when the
//!   pipeline differenced the panel, they are forecasts of differences.
//!
//! Downstream usage
//! ----------------
//! - The pipeline forecasts 8 steps ahead at 95% coverage and renders
//!   the per-variable paths in the report.
//!
//! Testing notes
//! -------------
//! - Unit tests check the one-step forecast against a hand-rolled
//!   recursion step, interval ordering and monotone widening, and the
//!   guard branches.

use ndarray::Array2;
use statrs::distribution::{ContinuousCDF, Normal};

use crate::utils::to_dmatrix;
use crate::var::errors::{VarError, VarResult};
use crate::var::model::VarModel;

const STAGE: &str = "forecast";

/// Forecast — point forecasts and interval bounds per step and variable.
///
/// Fields
/// ------
/// - `point`: `Array2<f64>`
///   H × K point forecasts; row h−1 is the h-step forecast.
/// - `lower`, `upper`: `Array2<f64>`
///   Interval bounds, same shape as `point`.
///
/// Invariants
/// ----------
/// - `lower ≤ point ≤ upper` elementwise.
/// - Half-widths are non-decreasing down each column.
#[derive(Debug, Clone)]
pub struct Forecast {
    point: Array2<f64>,
    lower: Array2<f64>,
    upper: Array2<f64>,
}

impl Forecast {
    /// Forecast `horizon` steps ahead from the end of the estimation
    /// sample.
    ///
    /// Parameters
    /// ----------
    /// - `model`: `&VarModel`
    ///   The fitted VAR.
    /// - `horizon`: `usize`
    ///   Number of steps H ≥ 1.
    /// - `coverage`: `f64`
    ///   Interval coverage in (0, 1); 0.95 gives ±1.96·√MSE.
    ///
    /// Returns
    /// -------
    /// `VarResult<Forecast>`
    ///   Point forecasts and interval bounds for steps 1..=H.
    ///
    /// Errors
    /// ------
    /// - `VarError::InvalidHorizon` when `horizon == 0`.
    /// - `VarError::InvalidCoverage` when `coverage` is outside (0, 1).
    /// - `VarError::NonFiniteValue` if the recursion or the MSE
    ///   accumulation degenerates.
    pub fn recursive(model: &VarModel, horizon: usize, coverage: f64) -> VarResult<Self> {
        if horizon == 0 {
            return Err(VarError::InvalidHorizon { stage: STAGE, horizon });
        }
        if coverage <= 0.0 || coverage >= 1.0 {
            return Err(VarError::InvalidCoverage { stage: STAGE, coverage });
        }
        let k = model.dim();
        let p = model.order();
        let intercept = model.intercept();
        let lag_mats: Vec<Array2<f64>> = (1..=p).map(|j| model.lag_matrix(j)).collect();

        // Rolling window of the p most recent rows, oldest first.
        let data = model.data();
        let n = data.nrows();
        let mut window: Vec<Vec<f64>> =
            (n - p..n).map(|t| (0..k).map(|c| data[(t, c)]).collect()).collect();

        let mut point = Array2::zeros((horizon, k));
        for h in 0..horizon {
            let mut row = vec![0.0_f64; k];
            for i in 0..k {
                let mut value = intercept[i];
                for (j, aj) in lag_mats.iter().enumerate() {
                    let prev = &window[window.len() - 1 - j];
                    for c in 0..k {
                        value += aj[(i, c)] * prev[c];
                    }
                }
                if !value.is_finite() {
                    return Err(VarError::NonFiniteValue { stage: STAGE, value });
                }
                point[(h, i)] = value;
                row[i] = value;
            }
            window.push(row);
            window.remove(0);
        }

        // Standard normal quantile at (1 + coverage) / 2.
        let normal = Normal::new(0.0, 1.0)
            .map_err(|_| VarError::InvalidCoverage { stage: STAGE, coverage })?;
        let z = normal.inverse_cdf(0.5 + coverage / 2.0);

        let psi = model.psi_matrices(horizon - 1);
        let sigma = to_dmatrix(model.sigma_u().view());
        let mut mse = nalgebra::DMatrix::zeros(k, k);
        let mut lower = Array2::zeros((horizon, k));
        let mut upper = Array2::zeros((horizon, k));
        for h in 0..horizon {
            mse += &psi[h] * &sigma * psi[h].transpose();
            for i in 0..k {
                let half = z * mse[(i, i)].sqrt();
                if !half.is_finite() {
                    return Err(VarError::NonFiniteValue { stage: STAGE, value: half });
                }
                lower[(h, i)] = point[(h, i)] - half;
                upper[(h, i)] = point[(h, i)] + half;
            }
        }

        Ok(Forecast { point, lower, upper })
    }

    /// Number of forecast steps H.
    pub fn horizon(&self) -> usize {
        self.point.nrows()
    }

    /// Point forecasts, H × K.
    pub fn point(&self) -> &Array2<f64> {
        &self.point
    }

    /// Lower interval bounds, H × K.
    pub fn lower(&self) -> &Array2<f64> {
        &self.lower
    }

    /// Upper interval bounds, H × K.
    pub fn upper(&self) -> &Array2<f64> {
        &self.upper
    }
}
