//! panel — validated panel data, differencing, and the reference dataset.
//!
//! Purpose
//! -------
//! Collect everything about the raw data side of the analysis: the
//! validated [`Panel`] container, the single-pass all-columns differencing
//! transform, the fixed in-memory reference dataset, and the panel-layer
//! error surface.
//!
//! Key behaviors
//! -------------
//! - Validate once at construction ([`Panel::new`]): non-empty,
//!   rectangular, finite, names matching columns. Downstream numeric code
//!   assumes a well-formed panel.
//! - Difference the whole panel exactly once when asked
//!   ([`Panel::first_difference`]); the panel layer never decides
//!   *whether* to difference — that policy lives in the pipeline.
//! - Supply the reference macro panel via [`macro_panel`], the crate's
//!   only data source.
//!
//! Conventions
//! -----------
//! - Rows index time with the oldest observation first; columns index
//!   variables; column names travel with the data.
//! - Errors are reported through [`PanelError`] / [`PanelResult`]; the
//!   panel layer never panics on user-facing invalid input.
//!
//! Downstream usage
//! ----------------
//! - The pipeline obtains the dataset, tests each column for a unit root,
//!   differences on demand, and passes `values()` into the VAR estimator.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`data`] cover validation branches and differencing
//!   arithmetic; [`dataset`] pins the reference panel's shape.

pub mod data;
pub mod dataset;
pub mod errors;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::data::Panel;
pub use self::dataset::{macro_panel, PANEL_COLS, PANEL_ROWS};
pub use self::errors::{PanelError, PanelResult};
