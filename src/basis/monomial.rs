use nalgebra::MatrixViewMut;

use crate::{
    basis::{Basis, Monomial},
    display::{self, PolynomialDisplay, Variables},
    error::{Error, Result},
    value::Value,
};

/// Standard (non-normalized) bivariate monomial basis.
///
/// Represents surfaces using every product of powers of the two inputs up to a total degree:
///
/// ```text
/// d, v, d², d·v, v², d³, d²·v, d·v², v³, …
/// ```
///
/// The constant term is not part of the basis; it is fitted as the intercept.
///
/// This basis is **not normalized**, which means it can suffer from numerical instability
/// at high degrees when the inputs are far from 1. The fitting routine tolerates the resulting
/// ill-conditioning (see [`crate::SurfaceFit`]) but does not correct for it.
#[derive(Debug, Clone, PartialEq)]
pub struct MonomialBasis<T: Value = f64> {
    degree: usize,
    terms: Vec<Monomial>,
    _marker: std::marker::PhantomData<T>,
}
impl<T: Value> MonomialBasis<T> {
    /// Returns the features of this basis in canonical order.
    #[must_use]
    pub fn terms(&self) -> &[Monomial] {
        &self.terms
    }

    /// Expands a single `(distance, velocity)` pair into its features.
    ///
    /// Each entry pairs the exponents of a monomial with its value at the given point.
    ///
    /// # Example
    /// ```
    /// # use rootfit::basis::{Basis, MonomialBasis, Monomial};
    /// let basis = MonomialBasis::<f64>::new(2).unwrap();
    /// let features = basis.expand(2.0, 3.0);
    /// assert_eq!(features[3], (Monomial::new(1, 1), 6.0));
    /// ```
    #[must_use]
    pub fn expand(&self, distance: T, velocity: T) -> Vec<(Monomial, T)> {
        self.terms
            .iter()
            .map(|term| (*term, term.evaluate(distance, velocity)))
            .collect()
    }
}
impl<T: Value> Basis<T> for MonomialBasis<T> {
    fn new(degree: usize) -> Result<Self> {
        if degree == 0 {
            return Err(Error::Configuration(
                "polynomial degree must be at least 1; a degree 0 surface has no features".into(),
            ));
        }

        let too_large = || Error::Configuration(format!("polynomial degree {degree} is too large"));
        let max = i32::try_from(degree).map_err(|_| too_large())?;
        let k = Self::parameter_count(degree).ok_or_else(too_large)?;

        let mut terms = Vec::with_capacity(k - 1);
        for total in 1..=max {
            for i in (0..=total).rev() {
                terms.push(Monomial::new(i, total - i));
            }
        }

        Ok(Self {
            degree,
            terms,
            _marker: std::marker::PhantomData,
        })
    }

    fn degree(&self) -> usize {
        self.degree
    }

    #[inline(always)]
    fn k(&self) -> usize {
        self.terms.len() + 1
    }

    #[inline(always)]
    fn fill_matrix_row<R: nalgebra::Dim, C: nalgebra::Dim, RS: nalgebra::Dim, CS: nalgebra::Dim>(
        &self,
        distance: T,
        velocity: T,
        mut row: MatrixViewMut<T, R, C, RS, CS>,
    ) {
        for (j, term) in self.terms.iter().enumerate() {
            row[j] = term.evaluate(distance, velocity);
        }
    }

    #[inline(always)]
    fn solve_function(&self, j: usize, distance: T, velocity: T) -> T {
        self.terms[j].evaluate(distance, velocity)
    }
}
impl<T: Value> PolynomialDisplay<T> for MonomialBasis<T> {
    fn format_feature(&self, j: usize, variables: &Variables) -> String {
        let term = self.terms[j];
        let distance = display::format_variable(variables.distance(), term.distance);
        let velocity = display::format_variable(variables.velocity(), term.velocity);

        match (distance.is_empty(), velocity.is_empty()) {
            (false, false) => format!("{distance} {velocity}"),
            (true, _) => velocity,
            (false, true) => distance,
        }
    }
}
