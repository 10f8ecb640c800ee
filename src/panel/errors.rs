//! panel::errors — error types for panel construction and transforms.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias for panel validation and the
//! differencing transform, keeping data-quality failures localized to the
//! panel layer with human-readable messages.
//!
//! Conventions
//! -----------
//! - Error messages are phrased in terms of domain constraints
//!   ("panel must contain at least 2 rows") rather than low-level details.
//! - Non-finite values carry the offending column name and row index so
//!   that data problems can be located without re-running validation.

pub type PanelResult<T> = Result<T, PanelError>;

/// PanelError — error conditions for panel construction and differencing.
///
/// Variants
/// --------
/// - `EmptyPanel`
///   The panel has no rows or no columns.
/// - `InsufficientRows { rows, needed }`
///   The panel is too short for the requested transform (e.g. first
///   differencing needs at least 2 rows).
/// - `NameCountMismatch { names, columns }`
///   The number of column names does not match the number of columns.
/// - `NonFiniteValue { column, row, value }`
///   An observation is NaN or ±∞; the panel layer treats this as a fatal
///   data-quality error.
///
/// Invariants
/// ----------
/// - Each variant carries just enough payload to locate the problem;
///   no large data structures are embedded.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelError {
    EmptyPanel,
    InsufficientRows { rows: usize, needed: usize },
    NameCountMismatch { names: usize, columns: usize },
    NonFiniteValue { column: String, row: usize, value: f64 },
}

impl std::error::Error for PanelError {}

impl std::fmt::Display for PanelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PanelError::EmptyPanel => {
                write!(f, "Panel must contain at least one row and one column.")
            }
            PanelError::InsufficientRows { rows, needed } => {
                write!(f, "Panel has {rows} rows; the requested transform needs at least {needed}.")
            }
            PanelError::NameCountMismatch { names, columns } => {
                write!(f, "Got {names} column names for {columns} columns.")
            }
            PanelError::NonFiniteValue { column, row, value } => {
                write!(f, "Non-finite value {value} in column '{column}' at row {row}.")
            }
        }
    }
}
