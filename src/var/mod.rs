//! var — VAR estimation and its derived analyses.
//!
//! Purpose
//! -------
//! Everything downstream of the prepared panel lives here: AIC lag
//! selection, per-equation OLS estimation of the VAR(p), the
//! companion-eigenvalue stability check, forecast error variance
//! decomposition, bootstrap orthogonalized impulse responses, and
//! recursive multi-step forecasting.
//!
//! Key behaviors
//! -------------
//! - [`LagSelection`] scans candidate orders on a common sample, then
//!   [`VarModel::fit`] refits the chosen order on the full sample.
//! - Structural analyses ([`Fevd`], [`Irf`]) share the model's MA
//!   machinery and the Cholesky shock ordering, so their outputs are
//!   mutually consistent by construction.
//!
//! Conventions
//! -----------
//! - Coefficient layout is lags-then-intercept throughout.
//! - Errors flow through [`VarError`] / [`VarResult`]; every variant
//!   names the stage that failed.
//!
//! Downstream usage
//! ----------------
//! - The pipeline drives these modules in order and assembles their
//!   outcomes into one report.
//!
//! Testing notes
//! -------------
//! - Each module carries unit tests on synthetic processes; exact
//!   values on the reference panel are pinned by the integration suite.

pub mod errors;
pub mod fevd;
pub mod forecast;
pub mod irf;
pub mod lag_selection;
pub mod model;
pub mod stability;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{VarError, VarResult};
pub use self::fevd::Fevd;
pub use self::forecast::Forecast;
pub use self::irf::{Irf, IrfOptions};
pub use self::lag_selection::LagSelection;
pub use self::model::VarModel;
pub use self::stability::StabilityReport;
