//! var::fevd — forecast error variance decomposition.
//!
//! Purpose
//! -------
//! Attribute the h-step forecast error variance of each variable to the
//! K orthogonalized shocks, for every horizon 1..=H.
//!
//! Key behaviors
//! -------------
//! - Shares at horizon h are cumulative squared orthogonalized MA
//!   weights: share(h, k, j) ∝ Σ_{i<h} Θᵢ[k, j]², normalized across
//!   shocks j.
//! - Each variable's shares sum to 1 at every horizon by construction;
//!   the normalization makes this exact up to rounding.
//!
//! Conventions
//! -----------
//! - Shock ordering is the panel's column order, inherited from the
//!   Cholesky factorization in
//!   [`VarModel::theta_matrices`](crate::var::VarModel::theta_matrices).
//!
//! Downstream usage
//! ----------------
//! - The pipeline decomposes at horizon 8 and renders the final-horizon
//!   table in the report.
//!
//! Testing notes
//! -------------
//! - Unit tests verify the sum-to-one property and the horizon-1
//!   degenerate case for the first shock ordering position.

use ndarray::Array2;

use crate::var::errors::{VarError, VarResult};
use crate::var::model::VarModel;

const STAGE: &str = "fevd";

/// Fevd — variance shares by horizon, variable, and shock.
///
/// Fields
/// ------
/// - `shares`: `Vec<Array2<f64>>`
///   One K×K matrix per horizon (index h−1); rows index the variable
///   whose forecast error is decomposed, columns index the shock.
///
/// Invariants
/// ----------
/// - Every row of every matrix sums to 1 within 1e-6.
/// - `shares.len()` equals the requested horizon.
#[derive(Debug, Clone)]
pub struct Fevd {
    shares: Vec<Array2<f64>>,
}

impl Fevd {
    /// Decompose the forecast error variance of a fitted model up to the
    /// given horizon.
    ///
    /// Parameters
    /// ----------
    /// - `model`: `&VarModel`
    ///   The fitted VAR.
    /// - `horizon`: `usize`
    ///   Largest horizon H ≥ 1; shares are computed for every h in
    ///   1..=H.
    ///
    /// Returns
    /// -------
    /// `VarResult<Fevd>`
    ///   Normalized shares per horizon.
    ///
    /// Errors
    /// ------
    /// - `VarError::InvalidHorizon` when `horizon == 0`.
    /// - `VarError::CholeskyFailure` when the residual covariance is not
    ///   positive definite.
    /// - `VarError::NonFiniteValue` if a variance total degenerates.
    pub fn decompose(model: &VarModel, horizon: usize) -> VarResult<Self> {
        if horizon == 0 {
            return Err(VarError::InvalidHorizon { stage: STAGE, horizon });
        }
        let k = model.dim();
        let theta = model.theta_matrices(horizon - 1)?;

        let mut shares = Vec::with_capacity(horizon);
        for h in 1..=horizon {
            let mut table = Array2::zeros((k, k));
            for var in 0..k {
                let mut contrib = vec![0.0_f64; k];
                for theta_i in theta.iter().take(h) {
                    for (shock, slot) in contrib.iter_mut().enumerate() {
                        *slot += theta_i[(var, shock)].powi(2);
                    }
                }
                let total: f64 = contrib.iter().sum();
                if total <= 0.0 || !total.is_finite() {
                    return Err(VarError::NonFiniteValue { stage: STAGE, value: total });
                }
                for shock in 0..k {
                    table[(var, shock)] = contrib[shock] / total;
                }
            }
            shares.push(table);
        }
        Ok(Fevd { shares })
    }

    /// Largest horizon H.
    pub fn horizon(&self) -> usize {
        self.shares.len()
    }

    /// The K×K share table at horizon `h` (1-based): rows = variables,
    /// columns = shocks.
    ///
    /// Panics
    /// ------
    /// - Panics if `h == 0` or `h > horizon()`.
    pub fn shares(&self, h: usize) -> &Array2<f64> {
        &self.shares[h - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The sum-to-one property across variables and horizons.
    // - The horizon-1 structure implied by the lower-triangular shock
    //   ordering: the first variable's one-step error is entirely its
    //   own shock.
    // - The zero-horizon guard.
    //
    // They intentionally DO NOT cover:
    // - Exact share values on the reference panel; the integration suite
    //   pins those.
    // -------------------------------------------------------------------------

    fn names2() -> Vec<String> {
        vec!["a".to_string(), "b".to_string()]
    }

    fn fitted_var1() -> VarModel {
        let mut data = Array2::zeros((150, 2));
        data[(0, 0)] = 0.5;
        data[(0, 1)] = -0.5;
        for t in 1..150 {
            let e0 = 0.4 * (((t * 41 + 7) as f64).sin() * 43_758.547).rem_euclid(1.0) - 0.2;
            let e1 = 0.4 * (((t * 83 + 19) as f64).sin() * 43_758.547).rem_euclid(1.0) - 0.2;
            data[(t, 0)] = 0.5 * data[(t - 1, 0)] + 0.2 * data[(t - 1, 1)] + e0;
            data[(t, 1)] = -0.1 * data[(t - 1, 0)] + 0.4 * data[(t - 1, 1)] + e1;
        }
        VarModel::fit(names2(), data.view(), 1).expect("fit should succeed")
    }

    #[test]
    // Purpose
    // -------
    // Verify that every variable's shares sum to one at every horizon.
    //
    // Given
    // -----
    // - A fitted VAR(1) decomposed to horizon 8.
    //
    // Expect
    // ------
    // - Row sums within 1e-6 of 1 for all 8 horizons, shares in [0, 1].
    fn fevd_shares_sum_to_one_at_every_horizon() {
        // Arrange
        let model = fitted_var1();

        // Act
        let fevd = Fevd::decompose(&model, 8).expect("decomposition should run");

        // Assert
        assert_eq!(fevd.horizon(), 8);
        for h in 1..=8 {
            let table = fevd.shares(h);
            for var in 0..2 {
                let sum: f64 = (0..2).map(|s| table[(var, s)]).sum();
                assert!((sum - 1.0).abs() < 1e-6, "h={h} var={var} sum={sum}");
                for s in 0..2 {
                    assert!((0.0..=1.0 + 1e-12).contains(&table[(var, s)]));
                }
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify the one-step degenerate case for the first-ordered
    // variable: with a lower-triangular impact matrix its entire
    // one-step error is its own shock.
    //
    // Given
    // -----
    // - The fitted VAR(1) at horizon 1.
    //
    // Expect
    // ------
    // - share(1, 0, 0) == 1 and share(1, 0, 1) == 0 within 1e-12.
    fn fevd_first_variable_owns_its_one_step_error() {
        // Arrange
        let model = fitted_var1();

        // Act
        let fevd = Fevd::decompose(&model, 1).expect("decomposition should run");

        // Assert
        let table = fevd.shares(1);
        assert!((table[(0, 0)] - 1.0).abs() < 1e-12);
        assert!(table[(0, 1)].abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Ensure a zero horizon is rejected.
    //
    // Given
    // -----
    // - `horizon = 0`.
    //
    // Expect
    // ------
    // - `Err(VarError::InvalidHorizon)`.
    fn fevd_zero_horizon_returns_invalid_horizon() {
        // Arrange
        let model = fitted_var1();

        // Act
        let result = Fevd::decompose(&model, 0);

        // Assert
        assert!(
            matches!(result, Err(VarError::InvalidHorizon { stage: "fevd", horizon: 0 })),
            "expected InvalidHorizon, got {result:?}"
        );
    }
}
