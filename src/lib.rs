//! # Rootfit
//! ## Turn measured launch angles into one equation
//!
//! Given a table of `(distance, velocity) → root` measurements, this crate fits a bivariate
//! polynomial surface by least squares and writes it out as a single equation that a symbolic
//! equation renderer can plot directly: fixed-point coefficients, no scientific notation, and
//! renderer-safe variable names.
//!
//! ```rust
//! # use rootfit::{MonomialSurfaceFit, display::Variables, test::{grid, steps}};
//! let data = grid(&steps(0.0, 8.0, 9), &steps(7.5, 12.5, 6), |d, v| 45.0 - 2.0 * d + 0.1 * d * v);
//! let fit = MonomialSurfaceFit::new(&data, 2).expect("Failed to create fit");
//!
//! let report = fit.residual_report();
//! assert!(report.max_abs_error < 1e-9);
//!
//! let equation = fit.equation(&Variables::default());
//! assert!(equation.starts_with("y = "));
//! ```
//!
//! # Core Concepts
//! - A [`basis::MonomialBasis`] expands a point into every monomial `d^i v^j` with
//!   `1 <= i + j <= degree`, in a fixed canonical order. The constant term is the intercept.
//! - A [`SurfaceFit`] is the least-squares fit of a surface to a dataset.
//!     - It keeps the data so it can report residuals against it.
//!     - Rank-deficient data still fits, and is flagged with a [`Degeneracy`].
//! - A [`SurfacePolynomial`] is the fitted surface on its own: evaluate it with
//!   [`SurfacePolynomial::y`] or [`SurfacePolynomial::predict`].
//! - A [`statistics::ResidualReport`] holds predictions, signed residuals, and the max, mean and
//!   median absolute error.
//! - A [`report::EquationDocument`] is the text artifact: degree, errors and the equation.
//! - A [`pipeline::Pipeline`] runs all of the above once per dataset, configured by
//!   [`config::FitConfig`].
//!
//! # Implementation Details
//!
//! Linear algebra is done with `nalgebra`: the design matrix is mean-centered and solved with an
//! SVD, which gives the minimum-norm solution when the data does not determine every
//! coefficient. Logging goes through the `log` facade; install any logger to see it.
//!
//! # Testing utilities
//!
//! Assertion macros and synthetic-data helpers for testing fits live in [`test`].
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::needless_range_loop)] // The worst clippy lint
#![allow(clippy::cast_precision_loss)] // I don't care about this one
#![allow(clippy::similar_names)] //       Clippy does not get to decide what names are similar


pub mod basis;
pub mod config;
pub mod data;
pub mod display;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod statistics;
pub mod value;

mod fit;
mod polynomial;

pub use error::{Error, Result};
pub use fit::*;
pub use polynomial::{MonomialSurface, SurfacePolynomial};

pub use nalgebra;
