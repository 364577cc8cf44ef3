//! The equation report written at the end of a run.
//!
//! An [`EquationDocument`] is a plain UTF-8 text artifact:
//! ```text
//! Polynomial degree 8
//!
//! Errors (°):
//! Max: 0.41
//! Mean: 0.08
//! Median: 0.05
//!
//! y = 12.5 + -0.25*d_i_s_t_a_n_c_e + …
//! ```
//! Error statistics are in the units of the observed root. The equation line follows the rules in
//! [`crate::display`].
use std::{
    fmt::Display,
    fs,
    path::{Path, PathBuf},
};

use crate::{
    basis::Basis,
    display::{PolynomialDisplay, Variables},
    error::{Error, Result},
    polynomial::SurfacePolynomial,
    statistics::ResidualReport,
    value::Value,
};

/// The formatted result of a fit: degree, error summary and equation text.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct EquationDocument<T: Value = f64> {
    degree: usize,
    max_abs_error: T,
    mean_abs_error: T,
    median_abs_error: T,
    equation: String,
}
impl<T: Value> EquationDocument<T> {
    /// Degree of the surface the document describes
    #[must_use]
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Largest absolute residual
    #[must_use]
    pub fn max_abs_error(&self) -> T {
        self.max_abs_error
    }

    /// Mean absolute residual
    #[must_use]
    pub fn mean_abs_error(&self) -> T {
        self.mean_abs_error
    }

    /// Median absolute residual
    #[must_use]
    pub fn median_abs_error(&self) -> T {
        self.median_abs_error
    }

    /// The `y = …` line
    #[must_use]
    pub fn equation(&self) -> &str {
        &self.equation
    }

    /// Writes the document to `path`, creating missing parent directories.
    ///
    /// An existing file is replaced.
    ///
    /// # Errors
    /// Returns [`Error::Io`] if the directory or file cannot be written.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.to_string())?;
        log::info!("Equation written to {}", path.display());
        Ok(path.to_path_buf())
    }
}

impl<T: Value> Display for EquationDocument<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Polynomial degree {}", self.degree)?;
        writeln!(f)?;
        writeln!(f, "Errors (°):")?;
        writeln!(f, "Max: {}", self.max_abs_error)?;
        writeln!(f, "Mean: {}", self.mean_abs_error)?;
        writeln!(f, "Median: {}", self.median_abs_error)?;
        writeln!(f)?;
        writeln!(f, "{}", self.equation)
    }
}

/// Formats a fitted surface and its residuals into an [`EquationDocument`].
///
/// `degree` is the degree the caller asked for. It must be the degree the surface was fitted
/// with, so the document can never describe a different model than the one it prints.
///
/// # Errors
/// Returns [`Error::Configuration`] if `degree` does not match the surface.
///
/// # Example
/// ```
/// # use rootfit::{MonomialSurfaceFit, display::Variables, report::format_equation, test::grid};
/// let data = grid(&[0.0, 1.0, 2.0], &[0.0, 1.0, 2.0], |d, v| 1.0 + d - 2.0 * v);
/// let fit = MonomialSurfaceFit::new(&data, 1).unwrap();
/// let vars = Variables::new("d", "v").unwrap();
/// let doc = format_equation(fit.as_polynomial(), &fit.residual_report(), 1, &vars).unwrap();
/// assert!(doc.to_string().starts_with("Polynomial degree 1\n"));
/// ```
pub fn format_equation<B, T: Value>(
    model: &SurfacePolynomial<'_, B, T>,
    report: &ResidualReport<T>,
    degree: usize,
    variables: &Variables,
) -> Result<EquationDocument<T>>
where
    B: Basis<T>,
    B: PolynomialDisplay<T>,
{
    if degree != model.degree() {
        return Err(Error::Configuration(format!(
            "report requested for degree {degree}, but the surface has degree {}",
            model.degree()
        )));
    }

    Ok(EquationDocument {
        degree,
        max_abs_error: report.max_abs_error,
        mean_abs_error: report.mean_abs_error,
        median_abs_error: report.median_abs_error,
        equation: model.equation(variables),
    })
}
