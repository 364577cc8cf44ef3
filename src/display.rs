//! Utilities for displaying and formatting fitted surfaces
//!
//! This module turns fitted coefficients into equation text that a symbolic-equation
//! renderer can parse: plain ASCII, no scientific notation, and variable symbols made only
//! of letters, digits and underscores.
//!
//! # Key Concepts
//! - **[`PolynomialDisplay`]**: Trait to define how a basis names its features.
//! - **[`Variables`]**: The pair of symbols substituted for distance and velocity.
//!
//! # Output form
//! ```text
//! y = <intercept> + <c1>*<feature1> + <c2>*<feature2> + …
//! ```
//! Every coefficient is written, including zeros, and a negative coefficient is written as
//! `+ -1.5*…`. Terms appear in the basis' canonical order.
//!
//! # Helpers
//! - [`format_coefficient`]: Formats a number as exact fixed-point decimal text.
//! - [`format_variable`]: Formats `symbol^exponent`.

use crate::{
    error::{Error, Result},
    value::Value,
};

/// Number of fractional digits rendered before trailing zeros are stripped.
///
/// Large enough to print any `f64` of measurement magnitude exactly.
pub const FIXED_PRECISION: usize = 128;

/// Default symbol for the distance variable.
///
/// Letters separated by underscores render as a single multi-letter name.
pub const DEFAULT_DISTANCE_SYMBOL: &str = "d_i_s_t_a_n_c_e";

/// Default symbol for the velocity variable.
pub const DEFAULT_VELOCITY_SYMBOL: &str = "v_e_l_o_c_i_t_y";

/// The pair of symbols used for the two inputs when writing equations.
///
/// Symbols must be non-empty and contain only ASCII letters, digits, and underscores.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Variables {
    distance: String,
    velocity: String,
}
impl Variables {
    /// Creates a validated pair of variable symbols.
    ///
    /// # Errors
    /// Returns [`Error::Configuration`] if either symbol is empty or contains anything
    /// other than `[A-Za-z0-9_]`.
    ///
    /// # Example
    /// ```
    /// # use rootfit::display::Variables;
    /// assert!(Variables::new("d", "v").is_ok());
    /// assert!(Variables::new("d(x)", "v").is_err());
    /// ```
    pub fn new(distance: impl Into<String>, velocity: impl Into<String>) -> Result<Self> {
        let distance = distance.into();
        let velocity = velocity.into();
        validate_symbol(&distance)?;
        validate_symbol(&velocity)?;
        if distance == velocity {
            return Err(Error::Configuration(format!(
                "variable symbols must differ, both are `{distance}`"
            )));
        }

        Ok(Self { distance, velocity })
    }

    /// Creates the pair from a list, which must have exactly two entries.
    ///
    /// # Errors
    /// Returns [`Error::Configuration`] if the list does not have exactly two valid symbols.
    pub fn from_slice(symbols: &[String]) -> Result<Self> {
        match symbols {
            [distance, velocity] => Self::new(distance.as_str(), velocity.as_str()),
            _ => Err(Error::Configuration(format!(
                "expected exactly 2 variable symbols, got {}",
                symbols.len()
            ))),
        }
    }

    /// Symbol for the distance variable
    #[must_use]
    pub fn distance(&self) -> &str {
        &self.distance
    }

    /// Symbol for the velocity variable
    #[must_use]
    pub fn velocity(&self) -> &str {
        &self.velocity
    }
}
impl Default for Variables {
    fn default() -> Self {
        Self {
            distance: DEFAULT_DISTANCE_SYMBOL.to_string(),
            velocity: DEFAULT_VELOCITY_SYMBOL.to_string(),
        }
    }
}

fn validate_symbol(symbol: &str) -> Result<()> {
    if symbol.is_empty() {
        return Err(Error::Configuration("variable symbol is empty".into()));
    }

    if let Some(c) = symbol
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_'))
    {
        return Err(Error::Configuration(format!(
            "variable symbol `{symbol}` contains unsupported character `{c}`"
        )));
    }

    Ok(())
}

/// Trait for naming the features of a basis and writing full equations.
///
/// # Provided behavior
/// - [`PolynomialDisplay::format_feature`] is required: names the jth feature.
/// - [`PolynomialDisplay::feature_names`] and [`PolynomialDisplay::format_polynomial`]
///   are provided on top of it.
pub trait PolynomialDisplay<T: Value>: crate::basis::Basis<T> {
    /// Formats the label of the jth feature, e.g. `d^2 v`.
    fn format_feature(&self, j: usize, variables: &Variables) -> String;

    /// Labels for every feature, in the same order as the fitted coefficients.
    fn feature_names(&self, variables: &Variables) -> Vec<String> {
        (0..self.feature_count())
            .map(|j| self.format_feature(j, variables))
            .collect()
    }

    /// Writes the full equation into the provided buffer.
    ///
    /// The output is `y = <intercept>` followed by ` + <coef>*<feature>` for every coefficient.
    /// Nothing is skipped or reordered.
    ///
    /// # Errors
    /// Returns an error if writing to `buffer` fails.
    fn format_polynomial<B: std::fmt::Write>(
        &self,
        buffer: &mut B,
        intercept: T,
        coefficients: &[T],
        variables: &Variables,
    ) -> std::fmt::Result {
        write!(buffer, "y = {}", format_coefficient(intercept))?;
        for (j, &coef) in coefficients.iter().enumerate() {
            let coef = format_coefficient(coef);
            let feature = self.format_feature(j, variables);
            write!(buffer, " + {coef}*{feature}")?;
        }

        Ok(())
    }
}

/// Formats a number as fixed-point decimal text.
///
/// The value is rendered with [`FIXED_PRECISION`] fractional digits, then trailing zeros and
/// a trailing decimal point are stripped. The result never uses scientific notation, and for
/// `f64` it is the exact decimal value of the float.
///
/// # Example
/// ```
/// # use rootfit::display::format_coefficient;
/// assert_eq!(format_coefficient(2.5), "2.5");
/// assert_eq!(format_coefficient(-3.0), "-3");
/// assert_eq!(format_coefficient(1e20), "100000000000000000000");
/// assert_eq!(format_coefficient(0.1), "0.1000000000000000055511151231257827021181583404541015625");
/// ```
pub fn format_coefficient<T: Value>(coef: T) -> String {
    let precision = FIXED_PRECISION;
    let fixed = format!("{coef:.precision$}");

    // NaN and infinity have no decimal point to trim back to
    if !fixed.contains('.') {
        return fixed;
    }

    fixed
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Formats one factor of a feature label.
///
/// # Behavior
/// - If `exp == 0`, returns an empty string (`""`).
/// - If `exp == 1`, returns the symbol unchanged.
/// - Otherwise, returns `symbol^exp`.
///
/// # Examples
/// ```
/// # use rootfit::display::format_variable;
/// assert_eq!(format_variable("x", 0), "");
/// assert_eq!(format_variable("x", 1), "x");
/// assert_eq!(format_variable("x", 3), "x^3");
/// ```
#[must_use]
pub fn format_variable(symbol: &str, exp: i32) -> String {
    match exp {
        0 => String::new(),
        1 => symbol.to_string(),
        _ => format!("{symbol}^{exp}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basis::{Basis, MonomialBasis};

    #[test]
    fn test_format_coefficient_integers() {
        assert_eq!(format_coefficient(0.0), "0");
        assert_eq!(format_coefficient(10.0), "10");
        assert_eq!(format_coefficient(-100.0), "-100");
        assert_eq!(format_coefficient(-0.0), "-0");
    }

    #[test]
    fn test_format_coefficient_exact_decimal() {
        assert_eq!(format_coefficient(0.5), "0.5");
        assert_eq!(format_coefficient(-0.25), "-0.25");
        assert_eq!(
            format_coefficient(0.1),
            "0.1000000000000000055511151231257827021181583404541015625"
        );
    }

    #[test]
    fn test_format_coefficient_no_scientific() {
        let values = [
            1e-7,
            -3.2e-12,
            1.234_567_890_123e15,
            6.02e23,
            -9.81,
            f64::EPSILON,
            1.0 / 3.0,
            123_456.789,
        ];
        for value in values {
            let text = format_coefficient(value);
            assert!(!text.contains(['e', 'E']), "{value} rendered as {text}");
            assert!(!text.ends_with('.'), "{value} rendered as {text}");
            if text.contains('.') {
                assert!(!text.ends_with('0'), "{value} rendered as {text}");
            }
            assert_eq!(text.parse::<f64>().unwrap(), value, "{text} does not round-trip");
        }
    }

    #[test]
    fn test_format_coefficient_small() {
        let text = format_coefficient(1e-7);
        assert!(text.starts_with("0.0000000999999999999999"), "{text}");
    }

    #[test]
    fn test_format_coefficient_non_finite() {
        assert_eq!(format_coefficient(f64::NAN), "NaN");
        assert_eq!(format_coefficient(f64::INFINITY), "inf");
    }

    #[test]
    fn test_format_variable() {
        assert_eq!(format_variable("x", 0), "");
        assert_eq!(format_variable("x", 1), "x");
        assert_eq!(format_variable("x_1", 8), "x_1^8");
    }

    #[test]
    fn test_variables() {
        let vars = Variables::new("d_i_s_t", "v2").unwrap();
        assert_eq!(vars.distance(), "d_i_s_t");
        assert_eq!(vars.velocity(), "v2");

        assert!(matches!(Variables::new("", "v"), Err(Error::Configuration(_))));
        assert!(matches!(Variables::new("d", "v^2"), Err(Error::Configuration(_))));
        assert!(matches!(Variables::new("d", "d"), Err(Error::Configuration(_))));
        assert!(matches!(Variables::new("dist ance", "v"), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_variables_from_slice() {
        let ok = Variables::from_slice(&["a".to_string(), "b".to_string()]).unwrap();
        assert_eq!(ok, Variables::new("a", "b").unwrap());

        let too_few = Variables::from_slice(&["a".to_string()]);
        assert!(matches!(too_few, Err(Error::Configuration(_))));

        let too_many = Variables::from_slice(&["a".into(), "b".into(), "c".into()]);
        assert!(matches!(too_many, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_default_variables() {
        let vars = Variables::default();
        assert_eq!(vars.distance(), DEFAULT_DISTANCE_SYMBOL);
        assert_eq!(vars.velocity(), DEFAULT_VELOCITY_SYMBOL);
        assert!(Variables::new(vars.distance(), vars.velocity()).is_ok());
    }

    #[test]
    fn test_format_polynomial() {
        let basis = MonomialBasis::<f64>::new(2).unwrap();
        let vars = Variables::new("d", "v").unwrap();
        let mut buf = String::new();
        basis
            .format_polynomial(&mut buf, 1.5, &[2.0, 0.0, -0.25, 1.0, 3.0], &vars)
            .unwrap();
        assert_eq!(
            buf,
            "y = 1.5 + 2*d + 0*v + -0.25*d^2 + 1*d v + 3*v^2"
        );
    }
}
