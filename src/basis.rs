//! Polynomial basis functions for surface fitting
//!
//! This module defines the [`Basis`] trait, which abstracts the set of functions a surface
//! is built from, and the [`Monomial`] exponent pair used to label each of them.
//!
//! # Provided Bases
//! - [`MonomialBasis`]: every `distanceⁱ·velocityʲ` with `1 ≤ i + j ≤ degree`.
//!
//! # The constant term
//! The constant monomial `(0, 0)` is never part of a basis. It is fitted separately as the
//! intercept, so column `j` of a design matrix, coefficient `j` of a fit, and feature name `j`
//! always refer to the same monomial.
//!
//! # Rolling Your Own
//! To implement a custom basis:
//! 1. Implement the `Basis<T>` trait for your type.
//! 2. Define how to populate a row of the design matrix in `fill_matrix_row`.
//! 3. Implement `solve_function` to evaluate a single feature.
//!
//! This allows `SurfaceFit` and `SurfacePolynomial` to use your custom basis seamlessly.
use nalgebra::MatrixViewMut;

use crate::{error::Result, value::Value};

pub(crate) mod monomial;
pub use monomial::MonomialBasis;

/// Exponents of a single bivariate monomial, `distance^distance · velocity^velocity`.
///
/// Ordered by total degree first, then by *descending* distance exponent, which is the
/// canonical order every basis in this crate enumerates its features in:
///
/// ```
/// # use rootfit::basis::Monomial;
/// let mut terms = vec![Monomial::new(0, 2), Monomial::new(1, 0), Monomial::new(1, 1), Monomial::new(2, 0)];
/// terms.sort();
/// assert_eq!(terms, vec![Monomial::new(1, 0), Monomial::new(2, 0), Monomial::new(1, 1), Monomial::new(0, 2)]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Monomial {
    /// Exponent of the distance variable
    pub distance: i32,

    /// Exponent of the velocity variable
    pub velocity: i32,
}
impl Monomial {
    /// Creates a new exponent pair.
    #[must_use]
    pub const fn new(distance: i32, velocity: i32) -> Self {
        Self { distance, velocity }
    }

    /// Total degree of the monomial, `i + j`.
    #[must_use]
    pub const fn degree(&self) -> i32 {
        self.distance + self.velocity
    }

    /// True for the constant monomial `(0, 0)`.
    #[must_use]
    pub const fn is_constant(&self) -> bool {
        self.distance == 0 && self.velocity == 0
    }

    /// Evaluates `distanceⁱ · velocityʲ`.
    ///
    /// Non-finite inputs propagate into the result.
    #[inline(always)]
    pub fn evaluate<T: Value>(&self, distance: T, velocity: T) -> T {
        power(distance, self.distance) * power(velocity, self.velocity)
    }
}
impl PartialOrd for Monomial {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Monomial {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.degree()
            .cmp(&other.degree())
            .then_with(|| other.distance.cmp(&self.distance))
    }
}

#[inline(always)]
fn power<T: Value>(x: T, n: i32) -> T {
    match n {
        0 => T::one(),
        1 => x,
        _ => Value::powi(x, n),
    }
}

/// Expands `(distance, velocity)` into every non-constant monomial of total degree `1..=degree`.
///
/// This is [`MonomialBasis::expand`] for a one-off degree. The constant term is fitted as the
/// intercept and never appears, so entry `j` lines up with column `j` of a design matrix.
///
/// # Errors
/// Returns [`crate::error::Error::Configuration`] if `degree` is 0.
///
/// # Example
/// ```
/// # use rootfit::basis::{expand, Monomial};
/// let terms = expand(2.0, 3.0, 1).unwrap();
/// assert_eq!(terms, vec![(Monomial::new(1, 0), 2.0), (Monomial::new(0, 1), 3.0)]);
/// ```
pub fn expand<T: Value>(distance: T, velocity: T, degree: usize) -> Result<Vec<(Monomial, T)>> {
    Ok(MonomialBasis::<T>::new(degree)?.expand(distance, velocity))
}

/// A trait representing a bivariate polynomial basis.
///
/// Most of the time, you want to use the built-in [`MonomialBasis`].
///
/// A basis defines the set of features a surface is expressed in, and the order they appear in.
/// While you can implement this for custom bases, it is not meant to be used on its own, but
/// through `SurfacePolynomial` or `SurfaceFit`, which are generic over basis.
///
/// # Type Parameters
/// - `T`: The numeric type used for coefficients and evaluation (e.g., `f64`).
pub trait Basis<T: Value>: Sized + Clone + std::fmt::Debug + Send + Sync {
    /// Creates the basis for a polynomial of the given degree.
    ///
    /// # Errors
    /// Returns [`crate::error::Error::Configuration`] if the degree cannot produce any features.
    fn new(degree: usize) -> Result<Self>;

    /// The degree this basis was created for.
    fn degree(&self) -> usize;

    /// Returns the number of basis functions for this degree, **including** the constant term.
    ///
    /// For two variables this is `(degree + 1)(degree + 2) / 2`.
    fn k(&self) -> usize;

    /// Number of parameters a fit of `degree` needs, counting the intercept, without building
    /// the basis.
    ///
    /// This equals [`Basis::k`] for that degree: `(degree + 1)(degree + 2) / 2` for two
    /// variables. Returns `None` if the count does not fit in a `usize`.
    #[must_use]
    fn parameter_count(degree: usize) -> Option<usize> {
        let a = degree.checked_add(1)?;
        let b = degree.checked_add(2)?;
        let (a, b) = if a % 2 == 0 { (a / 2, b) } else { (a, b / 2) };
        a.checked_mul(b)
    }

    /// Returns the number of non-constant features, one per fitted coefficient.
    #[inline(always)]
    fn feature_count(&self) -> usize {
        self.k() - 1
    }

    /// Populates a row of the design matrix with this basis evaluated at `(distance, velocity)`.
    ///
    /// Exactly [`Basis::feature_count`] values are written, in canonical order.
    fn fill_matrix_row<R: nalgebra::Dim, C: nalgebra::Dim, RS: nalgebra::Dim, CS: nalgebra::Dim>(
        &self,
        distance: T,
        velocity: T,
        row: MatrixViewMut<T, R, C, RS, CS>,
    );

    /// Evaluates the jth feature of this basis at `(distance, velocity)`.
    fn solve_function(&self, j: usize, distance: T, velocity: T) -> T;
}
