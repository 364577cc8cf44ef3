//! Error types for surface fitting
//!
//! This module defines the failure modes of the fit → predict → report pipeline,
//! along with a convenient `Result` alias.
//!
//! A rank-deficient design is **not** an error; see [`crate::Degeneracy`].

/// Errors that can occur while configuring, fitting, or reporting a surface.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The configuration is invalid: degree of 0, bad variable symbols, or an unreadable config.
    ///
    /// Raised before any data is touched.
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// There are fewer rows than model parameters (intercept + one coefficient per feature).
    #[error(
        "Not enough data to fit: {rows} usable rows for {parameters} parameters (need at least as many rows as parameters)"
    )]
    InsufficientData {
        /// Number of rows supplied
        rows: usize,
        /// Number of parameters in the model, including the intercept
        parameters: usize,
    },

    /// An input row is missing a column, is not numeric, or is not finite.
    #[error("Malformed input at row {row}: {reason}")]
    MalformedInput {
        /// 1-based data row (the header is not counted)
        row: usize,
        /// What was wrong with the row
        reason: String,
    },

    /// The number of coefficients does not match the basis.
    #[error("Basis has {expected} features but {got} coefficients were given")]
    InvalidNumberOfParameters {
        /// Number of features in the basis
        expected: usize,
        /// Number of coefficients supplied
        got: usize,
    },

    /// Predictions and observations must be paired one to one.
    #[error("Cannot pair {predictions} predictions with {observed} observations")]
    LengthMismatch {
        /// Number of predicted values
        predictions: usize,
        /// Number of observed values
        observed: usize,
    },

    /// Failed to solve the algebraic system during fitting.
    ///
    /// Contains a static string describing the solver error.
    #[error("Failed to solve: {0}")]
    Algebra(&'static str),

    /// A numeric value could not be cast to the target type.
    #[error("Failed to cast value to target type")]
    CastFailed,

    /// Reading or writing a file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The CSV layer failed outside of a specific row.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// A JSON config or diagnostics document could not be read or written.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type for surface fitting
pub type Result<T> = std::result::Result<T, Error>;
