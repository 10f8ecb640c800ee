//! panel::data — validated multivariate time-series container.
//!
//! Purpose
//! -------
//! Represent an ordered, fixed-width multivariate time series (rows = time,
//! columns = named variables) with validation performed once at
//! construction, plus the single panel transform the analysis chain needs:
//! one-pass first differencing of every column.
//!
//! Key behaviors
//! -------------
//! - Validate shape, name count, and finiteness in [`Panel::new`]; all
//!   later stages may assume a well-formed panel.
//! - Difference the whole panel at once in [`Panel::first_difference`] —
//!   an all-or-nothing transform, never per-column.
//!
//! Invariants & assumptions
//! ------------------------
//! - `values.nrows() ≥ 1`, `values.ncols() ≥ 1`, `names.len() == ncols`,
//!   every entry finite.
//! - The row count is fixed for the life of a `Panel`; transforms return
//!   new panels rather than mutating in place.
//!
//! Conventions
//! -----------
//! - Row 0 is the oldest observation; differencing drops the first row, so
//!   a T-row panel differences to T−1 rows.
//! - Column names are carried through every transform unchanged.
//!
//! Downstream usage
//! ----------------
//! - The pipeline tests each column via
//!   [`AdfOutcome`](crate::statistical_tests::AdfOutcome), differences via
//!   [`Panel::first_difference`] when any column is flagged
//!   non-stationary, and hands `values` to
//!   [`VarModel::fit`](crate::var::VarModel::fit).
//!
//! Testing notes
//! -------------
//! - Unit tests cover each validation branch and the exact arithmetic of
//!   first differencing, including the row-count contract.

use ndarray::{Array2, ArrayView1};

use crate::panel::errors::{PanelError, PanelResult};

/// Panel — ordered multivariate time series with named columns.
///
/// Purpose
/// -------
/// Own the observation matrix and column names for one panel dataset and
/// guarantee, by construction, that every downstream consumer sees finite,
/// rectangular data.
///
/// Fields
/// ------
/// - `names`: `Vec<String>`
///   Column names, one per variable, in column order.
/// - `values`: `Array2<f64>`
///   Observations; rows index time (oldest first), columns index
///   variables.
///
/// Invariants
/// ----------
/// - `names.len() == values.ncols()`.
/// - `values` is non-empty and contains only finite entries.
///
/// Notes
/// -----
/// - `Panel` is a plain value object; it performs no I/O and holds no
///   derived statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    names: Vec<String>,
    values: Array2<f64>,
}

impl Panel {
    /// Build a validated panel from column names and an observation matrix.
    ///
    /// Parameters
    /// ----------
    /// - `names`: `Vec<String>`
    ///   One name per column, in column order.
    /// - `values`: `Array2<f64>`
    ///   Observation matrix, rows = time, columns = variables.
    ///
    /// Returns
    /// -------
    /// `PanelResult<Panel>`
    ///   - `Ok(panel)` when the matrix is non-empty, the name count matches
    ///     the column count, and every entry is finite.
    ///   - `Err(PanelError)` otherwise.
    ///
    /// Errors
    /// ------
    /// - `PanelError::EmptyPanel` for a zero-row or zero-column matrix.
    /// - `PanelError::NameCountMismatch` when `names.len() != ncols`.
    /// - `PanelError::NonFiniteValue` for the first NaN/±∞ entry found,
    ///   with its column name and row index.
    pub fn new(names: Vec<String>, values: Array2<f64>) -> PanelResult<Self> {
        if values.nrows() == 0 || values.ncols() == 0 {
            return Err(PanelError::EmptyPanel);
        }
        if names.len() != values.ncols() {
            return Err(PanelError::NameCountMismatch {
                names: names.len(),
                columns: values.ncols(),
            });
        }
        for ((row, col), &value) in values.indexed_iter() {
            if !value.is_finite() {
                return Err(PanelError::NonFiniteValue {
                    column: names[col].clone(),
                    row,
                    value,
                });
            }
        }
        Ok(Panel { names, values })
    }

    /// Column names in column order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The observation matrix (rows = time, columns = variables).
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Number of time steps T.
    pub fn nrows(&self) -> usize {
        self.values.nrows()
    }

    /// Number of variables K.
    pub fn ncols(&self) -> usize {
        self.values.ncols()
    }

    /// View of one column by index.
    ///
    /// Panics
    /// ------
    /// - Panics if `index >= ncols()`; callers resolve names to indices
    ///   before entering numeric code.
    pub fn column(&self, index: usize) -> ArrayView1<'_, f64> {
        self.values.column(index)
    }

    /// First-difference every column once, dropping the first row.
    ///
    /// The transform is deliberately all-or-nothing: when the caller has
    /// decided to difference (because at least one column was flagged
    /// non-stationary), every column is differenced, flagged or not. The
    /// output has exactly T−1 rows.
    ///
    /// Returns
    /// -------
    /// `PanelResult<Panel>`
    ///   - `Ok(panel)` with `Δy_t = y_{t+1} − y_t` in every column.
    ///   - `Err(PanelError::InsufficientRows)` when T < 2.
    pub fn first_difference(&self) -> PanelResult<Panel> {
        let rows = self.values.nrows();
        if rows < 2 {
            return Err(PanelError::InsufficientRows { rows, needed: 2 });
        }
        let cols = self.values.ncols();
        let mut diffed = Array2::zeros((rows - 1, cols));
        for t in 0..rows - 1 {
            for c in 0..cols {
                diffed[(t, c)] = self.values[(t + 1, c)] - self.values[(t, c)];
            }
        }
        // Differences of finite values are finite, so re-validation cannot fail.
        Panel::new(self.names.clone(), diffed)
    }
}
