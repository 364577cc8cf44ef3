//! Numeric types for surface fits.
//!
//! This module defines the [`Value`] trait, which abstracts the numeric
//! types that can be used in fitting and evaluation, ensuring
//! compatibility with nalgebra, floating-point operations, and formatting.
//!
//! - A canonical `two()` constant.
//! - `try_cast` for safe type conversion with error handling.
//! - `powi` for integer exponentiation.
//!
//! Measurements are `f64` in practice; `f32` works for everything but CSV loading.
use crate::error::Error;

/// Numeric type for surfaces
pub trait Value:
    nalgebra::Scalar
    + nalgebra::ComplexField<RealField = Self>
    + nalgebra::RealField
    + num_traits::float::FloatCore
    + std::fmt::LowerExp
    + std::fmt::Display
{
    /// Returns the value 2.0
    #[must_use]
    fn two() -> Self {
        Self::one() + Self::one()
    }

    /// Tries to cast a value to the target type
    ///
    /// # Errors
    /// Returns an error if the cast fails
    fn try_cast<U: num_traits::NumCast>(n: U) -> Result<Self, Error> {
        num_traits::cast(n).ok_or(Error::CastFailed)
    }

    /// Raises the value to the power of an integer
    #[must_use]
    fn powi(self, n: i32) -> Self {
        nalgebra::ComplexField::powi(self, n)
    }

    /// Get the absolute value for a numeric type
    #[must_use]
    fn abs(self) -> Self {
        nalgebra::ComplexField::abs(self)
    }

    /// Returns true if the value is neither NaN nor infinite
    fn is_finite_value(&self) -> bool {
        num_traits::float::FloatCore::is_finite(*self)
    }

    /// Converts a `usize` to the target numeric type.
    ///
    /// Results in `infinity` if the value is out of range.
    #[must_use]
    fn from_positive_int(n: usize) -> Self {
        Self::try_cast(n).unwrap_or(<Self as num_traits::float::FloatCore>::infinity())
    }
}

impl<T> Value for T where
    T: nalgebra::Scalar
        + nalgebra::ComplexField<RealField = Self>
        + nalgebra::RealField
        + num_traits::float::FloatCore
        + std::fmt::LowerExp
        + std::fmt::Display
{
}
