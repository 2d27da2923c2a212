//! Error types for continuous change detection
//!
//! Provides a unified error type for all ccd crates. Running out of
//! observations is not an error: detection simply yields fewer segments.
//! Model fitting failures are fatal and carried as [`FitError`].

use thiserror::Error;

/// Failure raised by a regression fitter
///
/// A fit failure aborts the detection call that triggered it; the
/// algorithm never retries a failed fit.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FitError {
    /// No rows to fit
    #[error("cannot fit an empty window")]
    EmptyWindow,

    /// Design rows and observed values disagree in length
    #[error("design has {rows} rows but {values} values were supplied")]
    LengthMismatch { rows: usize, values: usize },

    /// Prediction design does not match the fitted coefficients
    #[error("design has {actual} columns, model expects {expected}")]
    DesignMismatch { expected: usize, actual: usize },

    /// Design or values contain NaN or infinite entries
    #[error("design or values contain NaN or infinite entries")]
    NonFinite,

    /// Normal equations are singular
    #[error("singular design: rank {rank} with {columns} columns")]
    Singular { rank: usize, columns: usize },

    /// The numerical solver itself failed
    #[error("solver failed: {0}")]
    SolverFailed(String),
}

/// Core error type for change detection operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Arrays that must share an axis have different lengths
    #[error("Dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },

    /// Regression fit failed
    #[error("Fit error: {0}")]
    Fit(#[from] FitError),

    /// CSV decoding error
    #[error("CSV error: {0}")]
    Csv(String),

    /// IO error (for file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for size mismatch
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::DimensionMismatch {
            context: context.to_string(),
            expected,
            actual,
        }
    }

    /// Create an error for NaN/Inf values
    pub fn non_finite(context: &str) -> Self {
        Self::InvalidInput(format!("{context} contains NaN or infinite values"))
    }

    /// Whether this error came from a regression fit
    pub fn is_fit_error(&self) -> bool {
        matches!(self, Self::Fit(_))
    }
}
