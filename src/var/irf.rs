//! var::irf — orthogonalized impulse responses with bootstrap bands.
//!
//! Purpose
//! -------
//! Trace the response of every variable to a one-unit orthogonalized
//! shock in a chosen impulse variable, and attach percentile confidence
//! bands from a seeded residual bootstrap.
//!
//! Key behaviors
//! -------------
//! - The point response at step i is the impulse column of Θᵢ, the
//!   orthogonalized MA matrix; step 0 is the impact response.
//! - The bootstrap rebuilds the sample recursively from the fitted
//!   coefficients: the first p original rows seed the recursion, every
//!   later row adds a residual drawn with replacement, the model is
//!   refitted at the same order, and the refitted Θ path is recorded.
//! - Bands are pointwise empirical quantiles of the bootstrap paths at
//!   the configured coverage, computed with linear interpolation
//!   between order statistics.
//!
//! Invariants & assumptions
//! ------------------------
//! - The generator is seeded explicitly, so a given options struct
//!   always reproduces the same bands.
//! - A bootstrap refit that degenerates (singular design, indefinite
//!   covariance) is an error; the data that produced the original fit
//!   makes this effectively unreachable.
//!
//! Conventions
//! -----------
//! - Shock ordering is the panel's column order, as in
//!   [`Fevd`](crate::var::Fevd).
//!
//! Downstream usage
//! ----------------
//! - The pipeline computes one IRF for the first panel variable at 20
//!   steps ahead and renders selected steps in the report.
//!
//! Testing notes
//! -------------
//! - Unit tests pin the impact response to the Cholesky column, check
//!   band ordering and shapes, and verify seed determinism.

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::var::errors::{VarError, VarResult};
use crate::var::model::VarModel;

const STAGE: &str = "irf_bootstrap";

/// IrfOptions — configuration for the impulse-response computation.
///
/// Fields
/// ------
/// - `n_ahead`: `usize`
///   Number of steps beyond impact; responses cover 0..=n_ahead.
/// - `runs`: `usize`
///   Bootstrap replications behind the bands.
/// - `ci`: `f64`
///   Band coverage in (0, 1); 0.95 gives the 2.5%/97.5% quantiles.
/// - `seed`: `u64`
///   Seed for the bootstrap generator; identical options reproduce
///   identical bands.
/// - `bootstrap`: `bool`
///   When false, only the point responses are computed.
#[derive(Debug, Copy, Clone)]
pub struct IrfOptions {
    pub n_ahead: usize,
    pub runs: usize,
    pub ci: f64,
    pub seed: u64,
    pub bootstrap: bool,
}

impl Default for IrfOptions {
    fn default() -> Self {
        IrfOptions { n_ahead: 20, runs: 100, ci: 0.95, seed: 42, bootstrap: true }
    }
}

/// Irf — responses to one orthogonalized shock, with optional bands.
///
/// Fields
/// ------
/// - `impulse`: `String`
///   Name of the shocked variable.
/// - `responses`: `Array2<f64>`
///   (n_ahead + 1) × K point responses; row i is step i, columns follow
///   the panel's variable order.
/// - `lower`, `upper`: `Option<Array2<f64>>`
///   Pointwise bootstrap bands, same shape as `responses`; `None` when
///   the bootstrap was disabled.
///
/// Invariants
/// ----------
/// - When present, `lower ≤ upper` elementwise.
#[derive(Debug, Clone)]
pub struct Irf {
    impulse: String,
    responses: Array2<f64>,
    lower: Option<Array2<f64>>,
    upper: Option<Array2<f64>>,
}

impl Irf {
    /// Compute the orthogonalized impulse responses to a shock in the
    /// named variable.
    ///
    /// Parameters
    /// ----------
    /// - `model`: `&VarModel`
    ///   The fitted VAR.
    /// - `impulse`: `&str`
    ///   Name of the shocked variable; must match a panel column.
    /// - `options`: `&IrfOptions`
    ///   Horizon, replication count, coverage, seed, and the bootstrap
    ///   switch.
    ///
    /// Returns
    /// -------
    /// `VarResult<Irf>`
    ///   Point responses and, when enabled, percentile bands.
    ///
    /// Errors
    /// ------
    /// - `VarError::UnknownVariable` when `impulse` matches no column.
    /// - `VarError::InsufficientSample` when the bootstrap is enabled
    ///   with zero replications.
    /// - `VarError::CholeskyFailure` when the residual covariance is not
    ///   positive definite.
    /// - Any estimation error surfaced by a degenerate bootstrap refit.
    pub fn orthogonalized(
        model: &VarModel,
        impulse: &str,
        options: &IrfOptions,
    ) -> VarResult<Self> {
        if options.ci <= 0.0 || options.ci >= 1.0 {
            return Err(VarError::InvalidCoverage { stage: STAGE, coverage: options.ci });
        }
        if options.bootstrap && options.runs == 0 {
            return Err(VarError::InsufficientSample { stage: STAGE, needed: 1, actual: 0 });
        }
        let shock = model
            .names()
            .iter()
            .position(|name| name == impulse)
            .ok_or_else(|| VarError::UnknownVariable { name: impulse.to_string() })?;

        let responses = theta_column(model, shock, options.n_ahead)?;
        if !options.bootstrap {
            return Ok(Irf { impulse: impulse.to_string(), responses, lower: None, upper: None });
        }

        let k = model.dim();
        let steps = options.n_ahead + 1;
        let mut rng = StdRng::seed_from_u64(options.seed);
        // paths[run] is one replication's (steps × K) response surface.
        let mut paths = Vec::with_capacity(options.runs);
        for _ in 0..options.runs {
            let synthetic = resample(model, &mut rng);
            let refit = VarModel::fit(model.names().to_vec(), synthetic.view(), model.order())?;
            paths.push(theta_column(&refit, shock, options.n_ahead)?);
        }

        let alpha = (1.0 - options.ci) / 2.0;
        let mut lower = Array2::zeros((steps, k));
        let mut upper = Array2::zeros((steps, k));
        let mut draws = vec![0.0_f64; options.runs];
        for step in 0..steps {
            for var in 0..k {
                for (run, path) in paths.iter().enumerate() {
                    draws[run] = path[(step, var)];
                }
                draws.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
                lower[(step, var)] = quantile(&draws, alpha);
                upper[(step, var)] = quantile(&draws, 1.0 - alpha);
            }
        }

        Ok(Irf {
            impulse: impulse.to_string(),
            responses,
            lower: Some(lower),
            upper: Some(upper),
        })
    }

    /// Name of the shocked variable.
    pub fn impulse(&self) -> &str {
        &self.impulse
    }

    /// Point responses, (n_ahead + 1) × K.
    pub fn responses(&self) -> &Array2<f64> {
        &self.responses
    }

    /// Lower percentile band, if the bootstrap ran.
    pub fn lower(&self) -> Option<&Array2<f64>> {
        self.lower.as_ref()
    }

    /// Upper percentile band, if the bootstrap ran.
    pub fn upper(&self) -> Option<&Array2<f64>> {
        self.upper.as_ref()
    }
}

//
// ---------- Private helpers (compact docs) ----------
//

/// The `shock` column of Θ₀..Θ_n as a (n + 1) × K response surface.
fn theta_column(model: &VarModel, shock: usize, n_ahead: usize) -> VarResult<Array2<f64>> {
    let theta = model.theta_matrices(n_ahead)?;
    let k = model.dim();
    let mut out = Array2::zeros((n_ahead + 1, k));
    for (step, theta_i) in theta.iter().enumerate() {
        for var in 0..k {
            out[(step, var)] = theta_i[(var, shock)];
        }
    }
    Ok(out)
}

/// One recursive-design bootstrap sample: the first p original rows,
/// then the fitted recursion driven by residual rows drawn with
/// replacement.
fn resample(model: &VarModel, rng: &mut StdRng) -> Array2<f64> {
    let data = model.data();
    let residuals = model.residuals();
    let p = model.order();
    let k = model.dim();
    let n = data.nrows();
    let nobs = residuals.nrows();
    let intercept = model.intercept();
    let lag_mats: Vec<Array2<f64>> = (1..=p).map(|j| model.lag_matrix(j)).collect();

    let mut synthetic = Array2::zeros((n, k));
    for t in 0..p {
        for c in 0..k {
            synthetic[(t, c)] = data[(t, c)];
        }
    }
    for t in p..n {
        let draw = rng.gen_range(0..nobs);
        for i in 0..k {
            let mut value = intercept[i] + residuals[(draw, i)];
            for (j, aj) in lag_mats.iter().enumerate() {
                for c in 0..k {
                    value += aj[(i, c)] * synthetic[(t - j - 1, c)];
                }
            }
            synthetic[(t, i)] = value;
        }
    }
    synthetic
}

/// Empirical quantile with linear interpolation between order
/// statistics; `sorted` must be ascending and non-empty.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}
