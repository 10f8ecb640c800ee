//! macrovar — VAR-based macroeconometric analysis for a fixed macro panel.
//!
//! Purpose
//! -------
//! Provide the full linear-econometrics chain for a small multivariate
//! macroeconomic panel: unit-root testing, conditional differencing, lag
//! order selection, VAR estimation, stability analysis, forecast error
//! variance decomposition (FEVD), residual diagnostics, orthogonalized
//! impulse responses with bootstrap bands, and recursive interval
//! forecasts.
//!
//! Key behaviors
//! -------------
//! - Expose the core subtrees ([`panel`], [`statistical_tests`], [`var`])
//!   and the sequential orchestration layer ([`pipeline`]) as the public
//!   crate surface.
//! - Keep every stage a pure function of the previous stage's complete
//!   output; the only randomness is the impulse-response bootstrap, which
//!   takes an explicit seed.
//! - Surface all user-facing failures as per-subtree error enums
//!   (`PanelError`, `TestError`, `VarError`) wrapped by
//!   [`pipeline::PipelineError`] at the orchestration boundary.
//!
//! Invariants & assumptions
//! ------------------------
//! - Panels are validated at construction: non-empty, rectangular, finite.
//!   Non-finite values at any later stage are treated as data-quality
//!   errors and abort the run rather than propagating silently.
//! - The lag order is chosen once and shared by every downstream stage.
//! - Fitted coefficients are read-only after estimation; derived objects
//!   (roots, FEVD, IRF, forecasts) never mutate the model.
//!
//! Conventions
//! -----------
//! - Rows index time (oldest first), columns index variables, everywhere.
//! - `ndarray` carries panel and residual storage; `nalgebra` is used
//!   internally for dense solves, eigenvalues, and Cholesky factors;
//!   `statrs` supplies distribution functions.
//! - Diagnostics (portmanteau, ARCH) are informational: they are reported
//!   but never alter pipeline control flow.
//!
//! Downstream usage
//! ----------------
//! - Most callers run the whole chain through
//!   [`pipeline::VarAnalysis::run`] on [`panel::macro_panel`] and render
//!   the report via `Display`.
//! - Individual stages are public for callers that need a single piece:
//!   e.g. [`statistical_tests::AdfOutcome`] on one series, or
//!   [`var::VarModel::fit`] on an already-differenced panel.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each module; the end-to-end scenario against
//!   the fixed reference panel lives in `tests/integration_var_pipeline.rs`.

pub mod panel;
pub mod pipeline;
pub mod statistical_tests;
pub mod utils;
pub mod var;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use macrovar::prelude::*;
//
// to import the main analysis surface in a single line.

pub mod prelude {
    pub use crate::panel::{macro_panel, Panel, PanelError, PanelResult};
    pub use crate::pipeline::{PipelineError, PipelineOptions, PipelineResult, VarAnalysis};
    pub use crate::statistical_tests::{AdfOutcome, ArchOutcome, PortmanteauOutcome};
    pub use crate::var::{
        Fevd, Forecast, Irf, IrfOptions, LagSelection, StabilityReport, VarError, VarModel,
        VarResult,
    };
}
