//! Functions and tools for evaluating surface fits
//!
//! This module provides the error statistics reported for a fit, and a few
//! goodness-of-fit measures used in its diagnostics.
//!
//! # Residuals
//! - [`residuals`]: Pairs predictions with observations and builds a [`ResidualReport`].
//! - A residual is `predicted - observed`; statistics are computed over its absolute value.
//!
//! # Error Metrics
//! - [`max_absolute_error`]: Largest absolute residual. Lower is better.
//! - [`mean_absolute_error`]: Average absolute residual. Lower is better.
//! - [`median_absolute_error`]: Middle absolute residual. Lower is better, and insensitive to a few bad rows.
//! - [`root_mean_squared_error`]: Square root of the mean squared residual, in the units of the observations.
//!
//! # Model Fit
//! - [`r_squared`]: Proportion of variance explained by the model. Higher is better (0 to 1).
//!
//! # Examples
//!
//! ```rust
//! use rootfit::statistics::residuals;
//!
//! let observed = [1.0, 2.0, 3.0];
//! let predicted = [1.5, 2.0, 2.0];
//!
//! let report = residuals(&predicted, &observed).unwrap();
//! assert_eq!(report.errors, vec![0.5, 0.0, -1.0]);
//! assert_eq!(report.max_abs_error, 1.0);
//! assert_eq!(report.mean_abs_error, 0.5);
//! assert_eq!(report.median_abs_error, 0.5);
//! ```
use crate::{
    error::{Error, Result},
    value::Value,
};

/// Predictions, signed residuals, and the absolute-error statistics derived from them.
///
/// Built by [`residuals`]; all statistics are in the units of the observed values.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ResidualReport<T: Value = f64> {
    /// One prediction per observation
    pub predictions: Vec<T>,

    /// `predictions[k] - observed[k]`
    pub errors: Vec<T>,

    /// `max |errors[k]|`
    pub max_abs_error: T,

    /// `(1/n) Σ |errors[k]|`
    pub mean_abs_error: T,

    /// Middle value of the sorted `|errors[k]|`, averaging the two middle values for even `n`
    pub median_abs_error: T,
}
impl<T: Value> ResidualReport<T> {
    /// Number of residuals in the report
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// True if the report has no residuals
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Iterates over the absolute residuals
    pub fn abs_errors(&self) -> impl Iterator<Item = T> + '_ {
        self.errors.iter().map(|e| Value::abs(*e))
    }
}

/// Computes signed residuals and their statistics.
///
/// The statistics of an empty set of residuals are all zero.
///
/// # Errors
/// Returns [`Error::LengthMismatch`] if the two slices differ in length.
pub fn residuals<T: Value>(predictions: &[T], observed: &[T]) -> Result<ResidualReport<T>> {
    if predictions.len() != observed.len() {
        return Err(Error::LengthMismatch {
            predictions: predictions.len(),
            observed: observed.len(),
        });
    }

    Ok(build_report(predictions.to_vec(), observed.iter().copied()))
}

/// Pairs owned predictions with observations that are known to have the same length.
pub(crate) fn build_report<T: Value>(
    predictions: Vec<T>,
    observed: impl Iterator<Item = T>,
) -> ResidualReport<T> {
    let errors: Vec<T> = predictions
        .iter()
        .zip(observed)
        .map(|(&y_fit, y)| y_fit - y)
        .collect();

    ResidualReport {
        max_abs_error: max_absolute_error(errors.iter().copied()),
        mean_abs_error: mean_absolute_error(errors.iter().copied()),
        median_abs_error: median_absolute_error(errors.iter().copied()),
        predictions,
        errors,
    }
}

/// Computes the largest absolute value of a set of residuals.
///
/// Returns zero if there are no residuals. A NaN residual makes the result NaN.
///
/// # Example
/// ```rust
/// # use rootfit::statistics::max_absolute_error;
/// assert_eq!(max_absolute_error([0.5, -2.0, 1.0].into_iter()), 2.0);
/// ```
pub fn max_absolute_error<T: Value>(errors: impl Iterator<Item = T>) -> T {
    let mut max = T::zero();
    for e in errors {
        let e = Value::abs(e);
        if e.is_nan() {
            return e;
        }
        if e > max {
            max = e;
        }
    }
    max
}

/// Computes the mean of the absolute values of a set of residuals.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// MAE = (Σ |e_i|) / N
/// ```
/// </div>
///
/// Returns zero if there are no residuals.
///
/// # Example
/// ```rust
/// # use rootfit::statistics::mean_absolute_error;
/// assert_eq!(mean_absolute_error([1.0, -3.0].into_iter()), 2.0);
/// ```
pub fn mean_absolute_error<T: Value>(errors: impl Iterator<Item = T>) -> T {
    let mut total = T::zero();
    let mut n = 0usize;
    for e in errors {
        total += Value::abs(e);
        n += 1;
    }

    if n == 0 {
        return T::zero();
    }
    total / T::from_positive_int(n)
}

/// Computes the median of the absolute values of a set of residuals.
///
/// For an even number of residuals the two middle values are averaged.
/// Returns zero if there are no residuals.
///
/// # Example
/// ```rust
/// # use rootfit::statistics::median_absolute_error;
/// assert_eq!(median_absolute_error([4.0, -1.0, 2.0].into_iter()), 2.0);
/// assert_eq!(median_absolute_error([4.0, -1.0, 2.0, -3.0].into_iter()), 2.5);
/// ```
pub fn median_absolute_error<T: Value>(errors: impl Iterator<Item = T>) -> T {
    let mut sorted: Vec<T> = errors.map(Value::abs).collect();
    if sorted.is_empty() {
        return T::zero();
    }

    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let midpoint = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[midpoint]
    } else {
        (sorted[midpoint - 1] + sorted[midpoint]) / T::two()
    }
}

/// Computes the root mean squared error (RMSE) between two sets of values.
///
/// RMSE is the square root of the mean squared error, giving the error
/// in the same units as the observed values. Lower values indicate a better fit.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// RMSE = √( (Σ (y_i - y_fit_i)²) / N )
/// ```
/// </div>
///
/// Returns zero if there are no values.
pub fn root_mean_squared_error<T: Value>(
    y: impl Iterator<Item = T>,
    y_fit: impl Iterator<Item = T>,
) -> T {
    let mut total = T::zero();
    let mut n = 0usize;
    for (y, y_fit) in y.zip(y_fit) {
        total += Value::powi(y - y_fit, 2);
        n += 1;
    }

    if n == 0 {
        return T::zero();
    }
    (total / T::from_positive_int(n)).sqrt()
}

/// Calculate the R-squared value for a set of data.
///
/// R-squared is a number between 0 and 1 that tells you how well the model explains the data:
/// - `0` means the model explains none of the variation.
/// - `1` means the model explains all the variation.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// R² = 1 - (SS_res / SS_tot)
/// where
///   SS_res = Σ (y_i - y_fit_i)²
///   SS_tot = Σ (y_i - y_mean)²
/// ```
/// </div>
///
/// If every observation is identical, `SS_tot` is zero and the result is not finite.
///
/// # Example
/// ```rust
/// # use rootfit::statistics::r_squared;
/// let y = vec![1.0, 2.0, 3.0];
/// let y_fit = vec![1.1, 1.9, 3.05];
/// let r2 = r_squared(y.into_iter(), y_fit.into_iter());
/// assert!(r2 > 0.98);
/// ```
pub fn r_squared<T: Value>(y: impl Iterator<Item = T>, y_fit: impl Iterator<Item = T>) -> T {
    let y: Vec<T> = y.collect();
    let y_mean = mean(y.iter().copied());

    let mut ss_total = T::zero();
    let mut ss_residual = T::zero();
    for (y, y_fit) in y.into_iter().zip(y_fit) {
        ss_total += Value::powi(y - y_mean, 2);
        ss_residual += Value::powi(y - y_fit, 2);
    }

    T::one() - (ss_residual / ss_total)
}

/// Computes the arithmetic mean of a sequence of values.
///
/// Returns NaN if the iterator yields no elements.
///
/// # Examples
/// ```rust
/// let values = vec![1.0, 2.0, 3.0];
/// let m = rootfit::statistics::mean(values.into_iter());
/// assert_eq!(m, 2.0);
/// ```
pub fn mean<T: Value>(data: impl Iterator<Item = T>) -> T {
    let mut sum = T::zero();
    let mut count = T::zero();
    for value in data {
        sum += value;
        count += T::one();
    }
    sum / count
}
