//! pipeline — the end-to-end VAR analysis chain and its report.
//!
//! Purpose
//! -------
//! Drive the full analysis in the canonical order: unit-root screening,
//! the differencing decision, lag selection, estimation, stability,
//! variance decomposition, residual diagnostics, impulse responses, and
//! forecasting; then bundle every stage's outcome into one value object
//! with a readable `Display` rendering.
//!
//! Key behaviors
//! -------------
//! - The differencing decision is all-or-nothing: when any column's ADF
//!   p-value exceeds the significance level, the entire panel is
//!   differenced exactly once, and every later stage works on
//!   differences.
//! - Any stage failure aborts the run with an error naming that stage;
//!   there are no partial results.
//! - Residual diagnostics are informational: a rejection is reported,
//!   never acted on.
//!
//! Conventions
//! -----------
//! - The numeric core performs no I/O and no logging; the rendered
//!   report is the single output surface, and callers decide where it
//!   goes.
//!
//! Downstream usage
//! ----------------
//! - `VarAnalysis::standard()` runs the whole chain on the built-in
//!   reference panel with default options; `VarAnalysis::run` accepts
//!   any panel and options.
//!
//! Testing notes
//! -------------
//! - The integration suite pins every stage's outcome on the reference
//!   panel; unit tests here cover option defaults, error conversion,
//!   and the report rendering.

use std::fmt;

use crate::panel::{macro_panel, Panel, PanelError};
use crate::statistical_tests::{
    AdfOutcome, ArchOutcome, PortmanteauOutcome, TestError,
};
use crate::var::{
    Fevd, Forecast, Irf, IrfOptions, LagSelection, StabilityReport, VarError, VarModel,
};

pub type PipelineResult<T> = Result<T, PipelineError>;

/// PipelineError — any stage failure, preserving the source error.
///
/// Variants
/// --------
/// - `Panel(PanelError)` from data validation or differencing.
/// - `Test(TestError)` from the unit-root test or a residual diagnostic.
/// - `Var(VarError)` from lag selection, estimation, or a derived
///   analysis.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineError {
    Panel(PanelError),
    Test(TestError),
    Var(VarError),
}

impl From<PanelError> for PipelineError {
    fn from(err: PanelError) -> Self {
        PipelineError::Panel(err)
    }
}

impl From<TestError> for PipelineError {
    fn from(err: TestError) -> Self {
        PipelineError::Test(err)
    }
}

impl From<VarError> for PipelineError {
    fn from(err: VarError) -> Self {
        PipelineError::Var(err)
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::Panel(err) => Some(err),
            PipelineError::Test(err) => Some(err),
            PipelineError::Var(err) => Some(err),
        }
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Panel(err) => write!(f, "panel stage failed: {err}"),
            PipelineError::Test(err) => write!(f, "test stage failed: {err}"),
            PipelineError::Var(err) => write!(f, "analysis stage failed: {err}"),
        }
    }
}

/// PipelineOptions — every knob of the analysis chain.
///
/// Fields
/// ------
/// - `significance`: `f64`
///   ADF decision threshold; a p-value above it flags non-stationarity.
/// - `max_lag`: `usize`
///   Largest candidate order for AIC lag selection.
/// - `fevd_horizon`: `usize`
///   Largest FEVD horizon.
/// - `forecast_horizon`: `usize`
///   Number of forecast steps.
/// - `forecast_coverage`: `f64`
///   Forecast interval coverage in (0, 1).
/// - `portmanteau_lags`: `usize`
///   Autocovariance lags for the portmanteau diagnostic.
/// - `arch_lags`: `usize`
///   Lags for the multivariate ARCH-LM diagnostic.
/// - `irf`: `IrfOptions`
///   Impulse-response horizon, bootstrap replications, coverage, and
///   seed.
///
/// Notes
/// -----
/// - The defaults reproduce the standard analysis of the reference
///   panel: significance 0.05, lags up to 10, horizons 8, portmanteau
///   10, ARCH 5, IRF 20 steps with 100 bootstrap runs.
#[derive(Debug, Copy, Clone)]
pub struct PipelineOptions {
    pub significance: f64,
    pub max_lag: usize,
    pub fevd_horizon: usize,
    pub forecast_horizon: usize,
    pub forecast_coverage: f64,
    pub portmanteau_lags: usize,
    pub arch_lags: usize,
    pub irf: IrfOptions,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        PipelineOptions {
            significance: 0.05,
            max_lag: 10,
            fevd_horizon: 8,
            forecast_horizon: 8,
            forecast_coverage: 0.95,
            portmanteau_lags: 10,
            arch_lags: 5,
            irf: IrfOptions::default(),
        }
    }
}

/// VarAnalysis — every stage outcome of one pipeline run.
///
/// Purpose
/// -------
/// Bundle the per-stage outcomes so callers can query any of them, and
/// render the whole analysis as a plain-text report via `Display`.
///
/// Invariants
/// ----------
/// - All outcomes refer to the same estimation sample: the original
///   panel when no column was flagged non-stationary, the once-
///   differenced panel otherwise.
#[derive(Debug, Clone)]
pub struct VarAnalysis {
    adf: Vec<AdfOutcome>,
    differenced: bool,
    lag_selection: LagSelection,
    model: VarModel,
    stability: StabilityReport,
    fevd: Fevd,
    portmanteau: PortmanteauOutcome,
    arch: ArchOutcome,
    irf: Irf,
    forecast: Forecast,
}

impl VarAnalysis {
    /// Run the standard analysis: the built-in reference panel with
    /// default options.
    pub fn standard() -> PipelineResult<Self> {
        Self::run(macro_panel(), &PipelineOptions::default())
    }

    /// Run the full analysis chain on a panel.
    ///
    /// Parameters
    /// ----------
    /// - `panel`: `Panel`
    ///   Validated input panel, levels.
    /// - `options`: `&PipelineOptions`
    ///   Thresholds, horizons, and bootstrap configuration.
    ///
    /// Returns
    /// -------
    /// `PipelineResult<VarAnalysis>`
    ///   Every stage outcome, or the first stage failure.
    ///
    /// Errors
    /// ------
    /// - Any `PanelError`, `TestError`, or `VarError` raised by a stage,
    ///   wrapped with the stage family that produced it.
    pub fn run(panel: Panel, options: &PipelineOptions) -> PipelineResult<Self> {
        // Stage 1: unit-root screening, one test per column.
        let mut adf = Vec::with_capacity(panel.ncols());
        for index in 0..panel.ncols() {
            let column: Vec<f64> = panel.column(index).iter().copied().collect();
            adf.push(AdfOutcome::augmented_dickey_fuller(&column)?);
        }

        // Stage 2: all-or-nothing differencing.
        let differenced = adf.iter().any(|outcome| outcome.p_value() > options.significance);
        let sample = if differenced { panel.first_difference()? } else { panel };

        // Stage 3: lag selection on a common sample, then the full-sample
        // refit at the chosen order.
        let lag_selection = LagSelection::by_aic(sample.values().view(), options.max_lag)?;
        let model = VarModel::fit(
            sample.names().to_vec(),
            sample.values().view(),
            lag_selection.order(),
        )?;

        // Stage 4: structure and diagnostics.
        let stability = StabilityReport::of(&model)?;
        let fevd = Fevd::decompose(&model, options.fevd_horizon)?;
        let portmanteau = PortmanteauOutcome::multivariate(
            model.residuals().view(),
            options.portmanteau_lags,
            model.order(),
        )?;
        let arch = ArchOutcome::multivariate(model.residuals().view(), options.arch_lags)?;

        // Stage 5: impulse responses (shock to the first variable) and
        // forecasts.
        let impulse = model.names()[0].clone();
        let irf = Irf::orthogonalized(&model, &impulse, &options.irf)?;
        let forecast =
            Forecast::recursive(&model, options.forecast_horizon, options.forecast_coverage)?;

        Ok(VarAnalysis {
            adf,
            differenced,
            lag_selection,
            model,
            stability,
            fevd,
            portmanteau,
            arch,
            irf,
            forecast,
        })
    }

    /// ADF outcomes, one per panel column in column order.
    pub fn adf(&self) -> &[AdfOutcome] {
        &self.adf
    }

    /// True when the panel was differenced before estimation.
    pub fn differenced(&self) -> bool {
        self.differenced
    }

    /// The AIC lag-selection outcome.
    pub fn lag_selection(&self) -> &LagSelection {
        &self.lag_selection
    }

    /// The fitted VAR.
    pub fn model(&self) -> &VarModel {
        &self.model
    }

    /// The companion-eigenvalue stability report.
    pub fn stability(&self) -> &StabilityReport {
        &self.stability
    }

    /// The forecast error variance decomposition.
    pub fn fevd(&self) -> &Fevd {
        &self.fevd
    }

    /// The portmanteau residual diagnostic.
    pub fn portmanteau(&self) -> &PortmanteauOutcome {
        &self.portmanteau
    }

    /// The multivariate ARCH-LM residual diagnostic.
    pub fn arch(&self) -> &ArchOutcome {
        &self.arch
    }

    /// The impulse responses to a shock in the first variable.
    pub fn irf(&self) -> &Irf {
        &self.irf
    }

    /// The recursive multi-step forecast.
    pub fn forecast(&self) -> &Forecast {
        &self.forecast
    }
}

/// Significance stars for a coefficient p-value, R-style.
fn stars(p: f64) -> &'static str {
    if p < 0.01 {
        "***"
    } else if p < 0.05 {
        "**"
    } else if p < 0.1 {
        "*"
    } else {
        ""
    }
}

impl fmt::Display for VarAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self.model.names();
        let k = self.model.dim();

        writeln!(f, "VAR analysis")?;
        writeln!(f, "============")?;

        writeln!(f, "\nUnit-root screening (ADF, constant + trend)")?;
        for (name, outcome) in names.iter().zip(&self.adf) {
            writeln!(
                f,
                "  {name:<14} stat {:>8.4}  p {:>6.4}  lags {}",
                outcome.stat(),
                outcome.p_value(),
                outcome.lags()
            )?;
        }
        writeln!(
            f,
            "  decision: {}",
            if self.differenced {
                "at least one unit root; panel differenced once"
            } else {
                "all columns stationary; levels retained"
            }
        )?;

        writeln!(f, "\nLag selection (AIC, common sample)")?;
        for (index, score) in self.lag_selection.aic().iter().enumerate() {
            let marker = if index + 1 == self.lag_selection.order() { "  <-" } else { "" };
            writeln!(f, "  p = {:<2} AIC {score:>12.6}{marker}", index + 1)?;
        }

        writeln!(
            f,
            "\nEstimation: VAR({}) with intercept, T = {}, dof = {}",
            self.model.order(),
            self.model.nobs(),
            self.model.dof()
        )?;
        let coef = self.model.coefficients();
        let p_values = self.model.p_values();
        let std_errors = self.model.std_errors();
        for eq in 0..k {
            writeln!(f, "  equation {}:", names[eq])?;
            for j in 0..coef.nrows() {
                let label = if j + 1 == coef.nrows() {
                    "const".to_string()
                } else {
                    format!("{}.l{}", names[j % k], j / k + 1)
                };
                writeln!(
                    f,
                    "    {label:<18} {:>10.5}  (se {:>8.5}) {}",
                    coef[(j, eq)],
                    std_errors[(j, eq)],
                    stars(p_values[(j, eq)])
                )?;
            }
        }

        writeln!(
            f,
            "\nStability: {} (companion roots, moduli descending)",
            if self.stability.is_stable() { "stable" } else { "NOT stable" }
        )?;
        let roots: Vec<String> =
            self.stability.moduli().iter().map(|m| format!("{m:.4}")).collect();
        writeln!(f, "  {}", roots.join("  "))?;

        writeln!(f, "\nFEVD at horizon {} (rows: variable, cols: shock)", self.fevd.horizon())?;
        let table = self.fevd.shares(self.fevd.horizon());
        for var in 0..k {
            let row: Vec<String> =
                (0..k).map(|shock| format!("{:>7.4}", table[(var, shock)])).collect();
            writeln!(f, "  {:<14} {}", names[var], row.join(" "))?;
        }

        writeln!(f, "\nResidual diagnostics (informational)")?;
        writeln!(
            f,
            "  portmanteau({:>2}): stat {:>10.4}  p {:>6.4}  df {}",
            self.portmanteau.lags(),
            self.portmanteau.stat(),
            self.portmanteau.p_value(),
            self.portmanteau.df()
        )?;
        writeln!(
            f,
            "  arch-lm({:>2}):     stat {:>10.4}  p {:>6.4}  df {}",
            self.arch.lags(),
            self.arch.stat(),
            self.arch.p_value(),
            self.arch.df()
        )?;

        let responses = self.irf.responses();
        writeln!(
            f,
            "\nOrthogonalized IRF: shock to {}, steps 0..{}",
            self.irf.impulse(),
            responses.nrows() - 1
        )?;
        // Selected steps only, clamped to the horizon and deduplicated
        // so short horizons render each available row once.
        let last = responses.nrows() - 1;
        let mut shown = 0;
        for step in [0, 1, 4, last] {
            if step > last || step < shown {
                continue;
            }
            let row: Vec<String> =
                (0..k).map(|var| format!("{:>8.4}", responses[(step, var)])).collect();
            writeln!(f, "  step {step:<3} {}", row.join(" "))?;
            shown = step + 1;
        }

        writeln!(f, "\nForecast, {} steps ahead (point [lower, upper])", self.forecast.horizon())?;
        for h in 0..self.forecast.horizon() {
            let row: Vec<String> = (0..k)
                .map(|i| {
                    format!(
                        "{:>7.3} [{:>7.3}, {:>7.3}]",
                        self.forecast.point()[(h, i)],
                        self.forecast.lower()[(h, i)],
                        self.forecast.upper()[(h, i)]
                    )
                })
                .collect();
            writeln!(f, "  h = {:<2} {}", h + 1, row.join("  "))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Option defaults.
    // - Error conversion into `PipelineError` with the source preserved.
    // - Significance-star thresholds for the report.
    //
    // They intentionally DO NOT cover:
    // - The full chain on the reference panel; the integration suite
    //   owns that.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Pin the default options of the standard analysis.
    //
    // Given
    // -----
    // - `PipelineOptions::default()`.
    //
    // Expect
    // ------
    // - The documented defaults: 0.05 / 10 / 8 / 8 / 0.95 / 10 / 5, IRF
    //   at 20 steps with 100 runs.
    fn pipeline_options_defaults_match_standard_analysis() {
        // Arrange & Act
        let options = PipelineOptions::default();

        // Assert
        assert_eq!(options.significance, 0.05);
        assert_eq!(options.max_lag, 10);
        assert_eq!(options.fevd_horizon, 8);
        assert_eq!(options.forecast_horizon, 8);
        assert_eq!(options.forecast_coverage, 0.95);
        assert_eq!(options.portmanteau_lags, 10);
        assert_eq!(options.arch_lags, 5);
        assert_eq!(options.irf.n_ahead, 20);
        assert_eq!(options.irf.runs, 100);
        assert_eq!(options.irf.ci, 0.95);
        assert!(options.irf.bootstrap);
    }

    #[test]
    // Purpose
    // -------
    // Verify that stage errors convert into `PipelineError` and keep
    // their message.
    //
    // Given
    // -----
    // - A `VarError::SingularDesign` from the estimation stage.
    //
    // Expect
    // ------
    // - `PipelineError::Var` whose message names the stage.
    fn pipeline_error_wraps_stage_errors() {
        // Arrange
        let source = VarError::SingularDesign { stage: "estimation" };

        // Act
        let wrapped: PipelineError = source.into();

        // Assert
        assert!(matches!(wrapped, PipelineError::Var(_)));
        assert!(wrapped.to_string().contains("estimation"), "message: {wrapped}");
    }

    #[test]
    // Purpose
    // -------
    // Pin the significance-star thresholds used in the coefficient
    // table.
    //
    // Given
    // -----
    // - p-values around each threshold.
    //
    // Expect
    // ------
    // - "***" below 0.01, "**" below 0.05, "*" below 0.1, nothing above.
    fn stars_follow_conventional_thresholds() {
        // Arrange & Act & Assert
        assert_eq!(stars(0.005), "***");
        assert_eq!(stars(0.02), "**");
        assert_eq!(stars(0.07), "*");
        assert_eq!(stars(0.5), "");
    }
}
