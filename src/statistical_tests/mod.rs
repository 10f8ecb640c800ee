//! statistical_tests — hypothesis tests used around the VAR fit.
//!
//! Purpose
//! -------
//! Collect the three hypothesis tests the analysis chain relies on: the
//! augmented Dickey–Fuller unit-root test that drives the differencing
//! decision, and the two residual diagnostics (multivariate portmanteau
//! and multivariate ARCH-LM) reported after estimation.
//!
//! Key behaviors
//! -------------
//! - Each test is a self-contained outcome object with a constructor that
//!   validates, computes, and returns statistic + p-value together.
//! - Decision policy stays out of this subtree: the ADF test reports a
//!   p-value and the pipeline compares it to the significance level; the
//!   residual diagnostics are purely informational.
//!
//! Conventions
//! -----------
//! - Errors flow through [`TestError`] / [`TestResult`]; every variant
//!   names the test so pipeline errors identify the offending stage.
//! - Outcome objects expose accessors only; fields are private.
//!
//! Downstream usage
//! ----------------
//! - The pipeline calls [`AdfOutcome::augmented_dickey_fuller`] per panel
//!   column before estimation and [`PortmanteauOutcome::multivariate`] /
//!   [`ArchOutcome::multivariate`] on the final residuals.
//!
//! Testing notes
//! -------------
//! - Each test module carries its own unit tests; exact values on the
//!   reference panel are pinned by the integration suite.

pub mod adf;
pub mod arch;
pub mod errors;
pub mod portmanteau;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::adf::AdfOutcome;
pub use self::arch::ArchOutcome;
pub use self::errors::{TestError, TestResult};
pub use self::portmanteau::PortmanteauOutcome;
