use std::borrow::Cow;

use crate::{
    basis::{Basis, MonomialBasis},
    data::Measurement,
    display::{PolynomialDisplay, Variables},
    error::{Error, Result},
    value::Value,
};

/// A surface in the standard monomial basis
pub type MonomialSurface<'a, T = f64> = SurfacePolynomial<'a, MonomialBasis<T>, T>;

/// Represents a bivariate polynomial surface in a given basis.
///
/// ```math
/// y(d, v) = intercept + Σ (c_j * B_j(d, v))
/// ```
///
/// Unlike [`crate::SurfaceFit`], this struct is **not tied to any dataset**; it is the fitted
/// model on its own, and evaluates any `(distance, velocity)` pair the same way the fit did.
///
/// # Type Parameters
/// - `'a`: Lifetime for borrowed coefficients, if used.
/// - `B`: The basis (e.g., [`crate::basis::MonomialBasis`]).
/// - `T`: Numeric type for the coefficients, default is `f64`.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfacePolynomial<'a, B, T: Value = f64>
where
    B: Basis<T>,
    B: PolynomialDisplay<T>,
{
    basis: B,
    intercept: T,
    coefficients: Cow<'a, [T]>,
}
impl<'a, B, T: Value> SurfacePolynomial<'a, B, T>
where
    B: Basis<T>,
    B: PolynomialDisplay<T>,
{
    /// Creates a surface without checking that the coefficients match the basis.
    ///
    /// The length of coefficients must be equal to `Basis::feature_count`
    pub(crate) fn from_raw(basis: B, intercept: T, coefficients: Cow<'a, [T]>) -> Self {
        Self {
            basis,
            intercept,
            coefficients,
        }
    }

    /// Creates a new surface from a basis, an intercept, and one coefficient per feature.
    ///
    /// # Errors
    /// Returns [`Error::InvalidNumberOfParameters`] if the number of coefficients does not
    /// equal the basis' feature count.
    ///
    /// # Example
    /// ```
    /// # use rootfit::{basis::{Basis, MonomialBasis}, SurfacePolynomial};
    /// let basis = MonomialBasis::new(1).unwrap();
    /// let plane = SurfacePolynomial::from_basis(basis, 1.0, vec![2.0, 3.0]).unwrap();
    /// assert_eq!(plane.y(1.0, 1.0), 6.0);
    /// ```
    pub fn from_basis(basis: B, intercept: T, coefficients: impl Into<Cow<'a, [T]>>) -> Result<Self> {
        let coefficients = coefficients.into();
        let expected = basis.feature_count();
        if coefficients.len() != expected {
            return Err(Error::InvalidNumberOfParameters {
                expected,
                got: coefficients.len(),
            });
        }

        Ok(Self::from_raw(basis, intercept, coefficients))
    }

    /// Converts the surface into an owned version.
    #[must_use]
    pub fn into_owned(self) -> SurfacePolynomial<'static, B, T> {
        SurfacePolynomial {
            basis: self.basis,
            intercept: self.intercept,
            coefficients: Cow::Owned(self.coefficients.into_owned()),
        }
    }

    /// Returns a reference to the surface's basis.
    #[must_use]
    pub fn basis(&self) -> &B {
        &self.basis
    }

    /// Returns the degree of the surface.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.basis.degree()
    }

    /// Returns the constant term.
    #[must_use]
    pub fn intercept(&self) -> T {
        self.intercept
    }

    /// Returns the coefficients, index-aligned with the basis' features.
    #[must_use]
    pub fn coefficients(&self) -> &[T] {
        &self.coefficients
    }

    /// Labels for each coefficient, using the given variable symbols.
    #[must_use]
    pub fn feature_names(&self, variables: &Variables) -> Vec<String> {
        self.basis.feature_names(variables)
    }

    /// Evaluates the surface at a single point.
    ///
    /// Non-finite inputs propagate into the result.
    #[must_use]
    pub fn y(&self, distance: T, velocity: T) -> T {
        let mut y = self.intercept;
        for (j, &coef) in self.coefficients.iter().enumerate() {
            y += coef * self.basis.solve_function(j, distance, velocity);
        }
        y
    }

    /// Evaluates the surface at every row, in input order.
    ///
    /// The `root` of each row is ignored.
    #[must_use]
    pub fn predict(&self, rows: &[Measurement<T>]) -> Vec<T> {
        rows.iter().map(|m| self.y(m.distance, m.velocity)).collect()
    }

    /// Returns the surface as equation text.
    ///
    /// See [`crate::display`] for the exact form.
    #[expect(clippy::missing_panics_doc, reason = "Infallible operation")]
    #[must_use]
    pub fn equation(&self, variables: &Variables) -> String {
        let mut output = String::new();
        self.basis
            .format_polynomial(&mut output, self.intercept, &self.coefficients, variables)
            .expect("String should be infallible");
        output
    }
}
