//! var::lag_selection — AIC-based choice of the VAR lag order.
//!
//! Purpose
//! -------
//! Scan candidate lag orders 1..=max and pick the one minimizing the
//! Akaike information criterion, with every candidate evaluated on the
//! same effective sample so the criteria are comparable.
//!
//! Key behaviors
//! -------------
//! - Align all candidate fits to start at row `max_lag`, regardless of
//!   each candidate's own order; criteria computed on different samples
//!   would not be comparable.
//! - Score AIC(p) = ln det(Û'Û / T*) + 2pK²/T*, where T* is the common
//!   effective sample size and the covariance is the maximum-likelihood
//!   (uncorrected) estimate.
//! - Break ties toward the smaller order: a later candidate replaces the
//!   incumbent only on a strictly smaller criterion.
//!
//! Conventions
//! -----------
//! - The full AIC profile is retained so the report can show the scores
//!   alongside the selected order.
//!
//! Downstream usage
//! ----------------
//! - The pipeline selects the order here, then refits
//!   [`VarModel`](crate::var::VarModel) on the full sample at that order.
//!
//! Testing notes
//! -------------
//! - Unit tests verify the profile length, the tie-break direction, and
//!   that a genuine VAR(1) process selects order 1.

use nalgebra::DMatrix;
use ndarray::ArrayView2;

use crate::var::errors::{VarError, VarResult};
use crate::var::model::least_squares;

const STAGE: &str = "lag_selection";

/// LagSelection — the selected order and the full AIC profile.
///
/// Fields
/// ------
/// - `order`: `usize`
///   The AIC-minimizing lag order, in 1..=max_lag.
/// - `aic`: `Vec<f64>`
///   AIC scores indexed by candidate order minus one.
///
/// Invariants
/// ----------
/// - `aic.len() == max_lag`, every score finite, and
///   `aic[order − 1]` is the minimum (first minimum on ties).
#[derive(Debug, Clone)]
pub struct LagSelection {
    order: usize,
    aic: Vec<f64>,
}

impl LagSelection {
    /// Select the VAR lag order by AIC over a common effective sample.
    ///
    /// Parameters
    /// ----------
    /// - `data`: `ArrayView2<'_, f64>`
    ///   Estimation sample, rows = time (oldest first).
    /// - `max_lag`: `usize`
    ///   Largest candidate order; every candidate fit starts at this row.
    ///
    /// Returns
    /// -------
    /// `VarResult<LagSelection>`
    ///   The minimizing order and the full score profile.
    ///
    /// Errors
    /// ------
    /// - `VarError::InvalidLagOrder` when `max_lag == 0`.
    /// - `VarError::InsufficientSample` when even the largest candidate
    ///   cannot be fitted on the common sample.
    /// - `VarError::SingularDesign` / `VarError::NonFiniteValue` from a
    ///   degenerate candidate fit or a non-positive covariance
    ///   determinant.
    pub fn by_aic(data: ArrayView2<'_, f64>, max_lag: usize) -> VarResult<Self> {
        if max_lag == 0 {
            return Err(VarError::InvalidLagOrder { stage: STAGE, lags: 0 });
        }
        let k = data.ncols();
        let mut aic = Vec::with_capacity(max_lag);
        let mut best = (1, f64::INFINITY);
        for p in 1..=max_lag {
            let fit = least_squares(data, p, max_lag, STAGE)?;
            let nobs = fit.residuals.nrows() as f64;
            let sigma_ml: DMatrix<f64> = fit.residuals.transpose() * &fit.residuals / nobs;
            let det = sigma_ml.determinant();
            if det <= 0.0 || !det.is_finite() {
                return Err(VarError::NonFiniteValue { stage: STAGE, value: det });
            }
            let score = det.ln() + 2.0 * (p * k * k) as f64 / nobs;
            if !score.is_finite() {
                return Err(VarError::NonFiniteValue { stage: STAGE, value: score });
            }
            if score < best.1 {
                best = (p, score);
            }
            aic.push(score);
        }
        Ok(LagSelection { order: best.0, aic })
    }

    /// The AIC-minimizing lag order.
    pub fn order(&self) -> usize {
        self.order
    }

    /// AIC scores, indexed by candidate order minus one.
    pub fn aic(&self) -> &[f64] {
        &self.aic
    }
}
