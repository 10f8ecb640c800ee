//! statistical_tests::errors — shared error types for hypothesis tests.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias used by every test routine in
//! this subtree (unit-root, portmanteau, ARCH), keeping validation and
//! runtime failures localized with messages phrased as domain constraints.
//!
//! Conventions
//! -----------
//! - Every variant names the test that failed, so a pipeline error log
//!   identifies the offending stage without extra context.
//! - Degenerate numerical situations (singular moment matrices) are
//!   reported as errors, never as NaN statistics.

pub type TestResult<T> = Result<T, TestError>;

/// TestError — error conditions for the statistical test routines.
///
/// Variants
/// --------
/// - `InsufficientData { test, needed, actual }`
///   The series (or residual matrix) is too short for the requested test
///   configuration once lags and regressors are accounted for.
/// - `InvalidLagCount { test, lags }`
///   The lag argument is inadmissible for the test — zero, or (for the
///   portmanteau) not exceeding the fitted VAR order, which would produce
///   non-positive degrees of freedom.
/// - `NonFiniteValue { test, value }`
///   A non-finite input value reached the test; surfaced as a
///   data-quality error rather than silently continuing.
/// - `SingularMoment { test }`
///   A moment matrix the statistic depends on could not be inverted.
#[derive(Debug, Clone, PartialEq)]
pub enum TestError {
    InsufficientData { test: &'static str, needed: usize, actual: usize },
    InvalidLagCount { test: &'static str, lags: usize },
    NonFiniteValue { test: &'static str, value: f64 },
    SingularMoment { test: &'static str },
}

impl std::error::Error for TestError {}

impl std::fmt::Display for TestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TestError::InsufficientData { test, needed, actual } => {
                write!(f, "{test}: need at least {needed} usable observations, got {actual}.")
            }
            TestError::InvalidLagCount { test, lags } => {
                write!(f, "{test}: lag count {lags} is inadmissible for this configuration.")
            }
            TestError::NonFiniteValue { test, value } => {
                write!(f, "{test}: non-finite input value {value}.")
            }
            TestError::SingularMoment { test } => {
                write!(f, "{test}: singular moment matrix; statistic is undefined.")
            }
        }
    }
}
