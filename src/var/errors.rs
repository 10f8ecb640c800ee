//! var::errors — shared error types for the VAR estimation subtree.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias for everything downstream of
//! the panel: lag selection, estimation, stability analysis, FEVD,
//! impulse responses, and forecasting.
//!
//! Conventions
//! -----------
//! - Every variant carries a `stage` string naming where the failure
//!   arose ("lag_selection", "estimation", "irf_bootstrap", ...), so a
//!   single pipeline-level error message identifies the offending stage.
//! - Non-finite intermediate values are fatal and surfaced as errors;
//!   the numeric code never lets NaN propagate into an outcome object.

pub type VarResult<T> = Result<T, VarError>;

/// VarError — error conditions for VAR estimation and its derived
/// analyses.
///
/// Variants
/// --------
/// - `InvalidLagOrder { stage, lags }`
///   The lag order is inadmissible: zero, or larger than the sample can
///   support.
/// - `InvalidHorizon { stage, horizon }`
///   A horizon argument of zero was passed to a multi-step analysis.
/// - `InvalidCoverage { stage, coverage }`
///   An interval coverage outside the open interval (0, 1).
/// - `InsufficientSample { stage, needed, actual }`
///   The effective sample is too short for the requested configuration.
/// - `SingularDesign { stage }`
///   The regressor moment matrix X'X could not be inverted.
/// - `CholeskyFailure { stage }`
///   The residual covariance is not positive definite, so orthogonalized
///   shocks are undefined.
/// - `NonFiniteValue { stage, value }`
///   A non-finite value appeared in a computed quantity.
/// - `UnknownVariable { name }`
///   A variable name does not match any panel column.
#[derive(Debug, Clone, PartialEq)]
pub enum VarError {
    InvalidLagOrder { stage: &'static str, lags: usize },
    InvalidHorizon { stage: &'static str, horizon: usize },
    InvalidCoverage { stage: &'static str, coverage: f64 },
    InsufficientSample { stage: &'static str, needed: usize, actual: usize },
    SingularDesign { stage: &'static str },
    CholeskyFailure { stage: &'static str },
    NonFiniteValue { stage: &'static str, value: f64 },
    UnknownVariable { name: String },
}

impl std::error::Error for VarError {}

impl std::fmt::Display for VarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VarError::InvalidLagOrder { stage, lags } => {
                write!(f, "{stage}: lag order {lags} is inadmissible for this sample.")
            }
            VarError::InvalidHorizon { stage, horizon } => {
                write!(f, "{stage}: horizon {horizon} is inadmissible; it must be at least 1.")
            }
            VarError::InvalidCoverage { stage, coverage } => {
                write!(f, "{stage}: interval coverage {coverage} must lie strictly in (0, 1).")
            }
            VarError::InsufficientSample { stage, needed, actual } => {
                write!(f, "{stage}: need at least {needed} usable observations, got {actual}.")
            }
            VarError::SingularDesign { stage } => {
                write!(f, "{stage}: singular regressor moment matrix; coefficients are undefined.")
            }
            VarError::CholeskyFailure { stage } => {
                write!(
                    f,
                    "{stage}: residual covariance is not positive definite; \
                     orthogonalized shocks are undefined."
                )
            }
            VarError::NonFiniteValue { stage, value } => {
                write!(f, "{stage}: computation produced non-finite value {value}.")
            }
            VarError::UnknownVariable { name } => {
                write!(f, "no panel column is named '{name}'.")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Payload embedding in `Display` messages, in particular the stage
    //   name that identifies where a failure arose.
    //
    // They intentionally DO NOT cover:
    // - The code paths that produce these errors; those live with each
    //   estimation module.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that `InsufficientSample` embeds the stage name and both
    // counts.
    //
    // Given
    // -----
    // - An `InsufficientSample` error from "estimation" with needed = 42,
    //   actual = 17.
    //
    // Expect
    // ------
    // - The message contains "estimation", "42", and "17".
    fn var_error_insufficient_sample_names_stage_and_counts() {
        // Arrange
        let err = VarError::InsufficientSample { stage: "estimation", needed: 42, actual: 17 };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains("estimation"), "missing stage: {msg}");
        assert!(msg.contains("42") && msg.contains("17"), "missing counts: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Verify that `UnknownVariable` embeds the offending name.
    //
    // Given
    // -----
    // - An `UnknownVariable` error for "inflation".
    //
    // Expect
    // ------
    // - The message contains "inflation".
    fn var_error_unknown_variable_names_column() {
        // Arrange
        let err = VarError::UnknownVariable { name: "inflation".to_string() };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains("inflation"), "missing variable name: {msg}");
    }
}
