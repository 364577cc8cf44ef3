use std::borrow::Cow;

use nalgebra::{DMatrix, DVector, SVD};

use crate::{
    basis::{Basis, MonomialBasis},
    data::{Measurement, MeasurementExt},
    display::{PolynomialDisplay, Variables},
    error::{Error, Result},
    polynomial::SurfacePolynomial,
    statistics::{self, ResidualReport},
    value::Value,
};

/// Non-normalized bivariate monomial surface fit
///
/// Uses the features `d, v, d², d·v, v², …` up to the given total degree.
pub type MonomialSurfaceFit<'data, T = f64> = SurfaceFit<'data, MonomialBasis<T>, T>;

/// Marks a fit whose design matrix is rank deficient.
///
/// Duplicated measurements, collinear inputs, or a column that never changes (every distance
/// the same, for example) leave some combination of coefficients undetermined. The fit still
/// succeeds and reports the minimum-norm solution; this records that it had to.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Degeneracy<T: Value = f64> {
    /// Numerical rank of the centered, column-scaled design matrix
    pub rank: usize,

    /// Number of features (columns) in the design matrix
    pub features: usize,

    /// Singular values at or below this were treated as zero
    pub tolerance: T,
}
impl<T: Value> std::fmt::Display for Degeneracy<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Design matrix is rank deficient (rank {} of {} features, tolerance {:e}); coefficients are the minimum-norm least-squares solution",
            self.rank, self.features, self.tolerance
        )
    }
}

/// Result of the least-squares solve on the centered system.
struct Solution<T: Value> {
    coefficients: Vec<T>,
    rank: usize,
    tolerance: T,
}

/// Represents a polynomial surface fit for a set of measurements.
///
/// `SurfaceFit` finds the intercept and coefficients minimizing `Σ (predicted - root)²` over the
/// dataset, and keeps the data it was fitted to so it can report its own residuals.
///
/// # How it works
/// - Builds a **design matrix** with shape `[rows, features]`, one row per measurement,
///   filled by [`Basis::fill_matrix_row`]. The constant term is not a column.
/// - Centers every column and the `root` vector on their means, so the intercept drops out.
/// - Scales every centered column to unit length. Monomials of raw measurements differ in
///   magnitude by many orders (`d` against `v⁸`), and the rank decision has to ignore that.
/// - Solves the scaled system with the **SVD** of the design matrix. Singular values at or
///   below `ε · max(rows, features) · σ_max` are treated as zero.
/// - Divides each solved coefficient by its column's scale, then recovers the intercept as
///   `mean(root) - Σ mean(feature_j) · c_j`.
///
/// # Rank-deficient data
/// Zeroing small singular values makes the solve a pseudo-inverse: of all coefficient vectors
/// that minimize the squared error, it returns the one with the smallest Euclidean norm in the
/// scaled columns, i.e. minimizing `Σ (‖x_j - mean_j‖ · c_j)²`. A column that never changes
/// gets a coefficient of zero. The intercept is not part of that norm. When this happens
/// [`SurfaceFit::degeneracy`] is set and a warning is logged.
///
/// # Type parameters
/// - `B`: The basis type, implementing [`Basis<T>`].
/// - `T`: Numeric type (default `f64`) implementing [`Value`].
///
/// # Example
/// ```
/// # use rootfit::{MonomialSurfaceFit, data::Measurement};
/// let data = vec![
///     Measurement::new(0.0, 0.0, 0.0),
///     Measurement::new(1.0, 0.0, 10.0),
///     Measurement::new(0.0, 1.0, 20.0),
/// ];
/// let fit = MonomialSurfaceFit::new(&data, 1).unwrap();
/// println!("Coefficients: {:?}", fit.coefficients());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceFit<'data, B, T: Value = f64>
where
    B: Basis<T>,
    B: PolynomialDisplay<T>,
{
    data: Cow<'data, [Measurement<T>]>,
    function: SurfacePolynomial<'static, B, T>,
    rank: usize,
    degeneracy: Option<Degeneracy<T>>,
}
impl<'data, T: Value, B> SurfaceFit<'data, B, T>
where
    B: Basis<T>,
    B: PolynomialDisplay<T>,
{
    /// Turns a dataset into a design matrix and root vector.
    fn create_matrix(data: &[Measurement<T>], basis: &B) -> (DMatrix<T>, DVector<T>) {
        let mut bigx = DMatrix::zeros(data.len(), basis.feature_count());
        let b = DVector::from_iterator(data.len(), data.root_iter());

        for (row, m) in bigx.row_iter_mut().zip(data.iter()) {
            basis.fill_matrix_row(m.distance, m.velocity, row);
        }

        (bigx, b)
    }

    /// Centers each column of the matrix, and the root vector, on its mean, then scales each
    /// column to unit length.
    ///
    /// Returns the column means, the column scales and the root mean.
    /// A column that is zero after centering keeps a scale of 1.
    fn standardize(matrix: &mut DMatrix<T>, b: &mut DVector<T>) -> (Vec<T>, Vec<T>, T) {
        let mut means = Vec::with_capacity(matrix.ncols());
        let mut scales = Vec::with_capacity(matrix.ncols());
        for mut column in matrix.column_iter_mut() {
            let mean = column.mean();
            column.add_scalar_mut(-mean);

            let norm = column.norm();
            let scale = if norm > T::zero() { norm } else { T::one() };
            column /= scale;

            means.push(mean);
            scales.push(scale);
        }

        let b_mean = b.mean();
        b.add_scalar_mut(-b_mean);

        (means, scales, b_mean)
    }

    /// Solves the linear system using SVD.
    fn solve_matrix(matrix: DMatrix<T>, b: &DVector<T>) -> Result<Solution<T>> {
        if matrix.iter().any(|v| !v.is_finite_value()) {
            return Err(Error::Algebra(
                "Design matrix is not finite; inputs are too large for this degree",
            ));
        }

        let size = matrix.shape();

        // Calculate the singular value decomposition of the matrix
        let decomp = SVD::new(matrix, true, true);

        // Calculate epsilon value
        // ~= machine_epsilon * max(size) * max_singular
        let machine_epsilon = T::epsilon();
        let max_size = size.0.max(size.1);
        let sigma_max = decomp.singular_values.max();
        let epsilon = machine_epsilon * T::try_cast(max_size)? * sigma_max;
        if !epsilon.is_finite_value() {
            return Err(Error::Algebra("Singular values are not finite"));
        }

        // Solve for X in `SVD * X = b`
        let rank = decomp.rank(epsilon);
        let big_x = decomp.solve(b, epsilon).map_err(Error::Algebra)?;
        let coefficients: Vec<_> = big_x.data.into();

        // Make sure the coefficients are valid
        if coefficients.iter().any(|c| c.is_nan()) {
            return Err(Error::Algebra("NaN in coefficients"));
        }

        Ok(Solution {
            coefficients,
            rank,
            tolerance: epsilon,
        })
    }

    /// Returns an owned version of this fit, with a full copy of the data.
    #[must_use]
    pub fn to_owned(&self) -> SurfaceFit<'static, B, T> {
        SurfaceFit {
            data: Cow::Owned(self.data.to_vec()),
            function: self.function.clone(),
            rank: self.rank,
            degeneracy: self.degeneracy,
        }
    }

    /// Fits a polynomial surface of the given degree to the measurements.
    ///
    /// # Parameters
    /// - `data`: The measurements to fit.
    /// - `degree`: Maximum total degree of the surface's monomials.
    ///
    /// # Errors
    /// Returns an [`Error`] in the following cases:
    /// - `Error::Configuration`: the basis cannot be built for `degree` (e.g. `degree == 0`, or a
    ///   degree whose parameter count does not fit in a `usize`).
    /// - `Error::InsufficientData`: fewer rows than parameters (features + intercept).
    /// - `Error::MalformedInput`: a row holds a NaN or infinite value.
    /// - `Error::Algebra`: the features overflowed, or the linear system could not be solved.
    ///
    /// A rank-deficient design is not an error; see [`SurfaceFit::degeneracy`].
    ///
    /// # Example
    /// ```
    /// # use rootfit::{MonomialSurfaceFit, test::grid};
    /// let data = grid::<f64>(&[0.0, 1.0, 2.0, 3.0], &[7.5, 10.0, 12.5], |d, v| 5.0 + d * v);
    /// let fit = MonomialSurfaceFit::new(&data, 2).unwrap();
    /// assert!((fit.y(1.5, 8.0) - 17.0).abs() < 1e-9);
    /// ```
    pub fn new(data: impl Into<Cow<'data, [Measurement<T>]>>, degree: usize) -> Result<Self> {
        let data: Cow<_> = data.into();
        let parameters = B::parameter_count(degree).ok_or_else(|| {
            Error::Configuration(format!("polynomial degree {degree} is too large"))
        })?;
        if data.len() < parameters {
            return Err(Error::InsufficientData {
                rows: data.len(),
                parameters,
            });
        }

        let basis = B::new(degree)?;
        let k = basis.feature_count();

        if let Some(i) = data.first_non_finite() {
            return Err(Error::MalformedInput {
                row: i + 1,
                reason: "value is not finite".into(),
            });
        }

        let (mut m, mut b) = Self::create_matrix(&data, &basis);
        let (means, scales, b_mean) = Self::standardize(&mut m, &mut b);
        log::debug!(
            "Fitting degree {degree} surface: {} rows x {k} features",
            data.len()
        );

        let mut solution = Self::solve_matrix(m, &b)?;
        for (coef, &scale) in solution.coefficients.iter_mut().zip(&scales) {
            *coef /= scale;
        }

        let intercept = means
            .iter()
            .zip(&solution.coefficients)
            .fold(b_mean, |acc, (&mean, &coef)| acc - mean * coef);

        let degeneracy = if solution.rank < k {
            let degeneracy = Degeneracy {
                rank: solution.rank,
                features: k,
                tolerance: solution.tolerance,
            };
            log::warn!("{degeneracy}");
            Some(degeneracy)
        } else {
            None
        };

        let function =
            SurfacePolynomial::from_raw(basis, intercept, Cow::Owned(solution.coefficients));
        Ok(Self {
            data,
            function,
            rank: solution.rank,
            degeneracy,
        })
    }

    /// Returns the measurements the surface was fitted to.
    #[must_use]
    pub fn data(&self) -> &[Measurement<T>] {
        &self.data
    }

    /// Returns a reference to the fitted surface.
    #[must_use]
    pub fn as_polynomial(&self) -> &SurfacePolynomial<'static, B, T> {
        &self.function
    }

    /// Consumes the fit and returns the fitted surface.
    #[must_use]
    pub fn into_polynomial(self) -> SurfacePolynomial<'static, B, T> {
        self.function
    }

    /// Returns the basis the surface is expressed in.
    #[must_use]
    pub fn basis(&self) -> &B {
        self.function.basis()
    }

    /// Returns the degree of the fitted surface.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.function.degree()
    }

    /// Returns the fitted constant term.
    #[must_use]
    pub fn intercept(&self) -> T {
        self.function.intercept()
    }

    /// Returns the fitted coefficients, one per feature, in the basis' canonical order.
    #[must_use]
    pub fn coefficients(&self) -> &[T] {
        self.function.coefficients()
    }

    /// Number of model parameters, including the intercept.
    #[must_use]
    pub fn parameters(&self) -> usize {
        self.coefficients().len() + 1
    }

    /// Numerical rank of the centered, column-scaled design matrix.
    #[must_use]
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Returns the rank-deficiency warning, if the design matrix was rank deficient.
    #[must_use]
    pub fn degeneracy(&self) -> Option<&Degeneracy<T>> {
        self.degeneracy.as_ref()
    }

    /// True if the fit had to fall back to the minimum-norm solution.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.degeneracy.is_some()
    }

    /// Evaluates the fitted surface at a single point.
    #[must_use]
    pub fn y(&self, distance: T, velocity: T) -> T {
        self.function.y(distance, velocity)
    }

    /// Evaluates the fitted surface at every row, in input order.
    ///
    /// Uses the same basis, and therefore the same feature order, as the fit.
    #[must_use]
    pub fn predict(&self, rows: &[Measurement<T>]) -> Vec<T> {
        self.function.predict(rows)
    }

    /// Returns the fitted value for every measurement in the source data.
    #[must_use]
    pub fn solution(&self) -> Vec<T> {
        self.predict(&self.data)
    }

    /// Computes the residuals of the fit against its own data.
    #[must_use]
    pub fn residual_report(&self) -> ResidualReport<T> {
        statistics::build_report(self.solution(), self.data.root_iter())
    }

    /// Labels for each coefficient, using the given variable symbols.
    #[must_use]
    pub fn feature_names(&self, variables: &Variables) -> Vec<String> {
        self.function.feature_names(variables)
    }

    /// Returns the fitted surface as equation text.
    ///
    /// See [`crate::display`] for the exact form.
    #[must_use]
    pub fn equation(&self, variables: &Variables) -> String {
        self.function.equation(variables)
    }

    /// Calculates the R-squared value of the fit against its own data.
    ///
    /// See [`statistics::r_squared`].
    #[must_use]
    pub fn r_squared(&self) -> T {
        statistics::r_squared(self.data.root_iter(), self.solution().into_iter())
    }

    /// Calculates the root mean squared error of the fit against its own data.
    ///
    /// See [`statistics::root_mean_squared_error`].
    #[must_use]
    pub fn root_mean_squared_error(&self) -> T {
        statistics::root_mean_squared_error(self.data.root_iter(), self.solution().into_iter())
    }

    /// Returns the properties of the fit.
    ///
    /// This is a comprehensive summary of the fit's characteristics.
    #[must_use]
    pub fn properties(&self) -> FitProperties<T> {
        FitProperties {
            degree: self.degree(),
            data_points: self.data.len(),
            parameters: self.parameters(),
            rank: self.rank,
            degenerate: self.is_degenerate(),
            intercept: self.intercept(),
            coefficients: self.coefficients().to_vec(),
            rmse: self.root_mean_squared_error(),
            r_squared: self.r_squared(),
        }
    }
}

impl<B, T: Value> AsRef<SurfacePolynomial<'static, B, T>> for SurfaceFit<'_, B, T>
where
    B: Basis<T>,
    B: PolynomialDisplay<T>,
{
    fn as_ref(&self) -> &SurfacePolynomial<'static, B, T> {
        &self.function
    }
}

/// A set of diagnostic properties for a surface fit.
///
/// Can be serialized to JSON or other formats.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct FitProperties<T: Value> {
    /// The degree of the fitted surface.
    pub degree: usize,

    /// The number of measurements used in the fit.
    pub data_points: usize,

    /// Number of fitted parameters, including the intercept.
    pub parameters: usize,

    /// Numerical rank of the centered, column-scaled design matrix.
    pub rank: usize,

    /// True if the design matrix was rank deficient.
    pub degenerate: bool,

    /// The fitted constant term.
    pub intercept: T,

    /// The fitted coefficients, in canonical feature order.
    pub coefficients: Vec<T>,

    /// The root mean squared error of the fit.
    pub rmse: T,

    /// The R² value of the fit.
    pub r_squared: T,
}

#[cfg(test)]
mod tests {
    use rand::{rngs::SmallRng, SeedableRng};
    use rand_distr::{Distribution, Normal};

    use super::*;
    use crate::{
        assert_all_close, assert_close, assert_max_residual,
        test::{grid, steps},
    };

    fn plane_rows() -> Vec<Measurement> {
        vec![
            Measurement::new(0.0, 0.0, 0.0),
            Measurement::new(1.0, 0.0, 10.0),
            Measurement::new(0.0, 1.0, 20.0),
        ]
    }

    #[test]
    fn test_plane_through_three_points() {
        let rows = plane_rows();
        let fit = MonomialSurfaceFit::new(&rows, 1).unwrap();

        assert_eq!(fit.parameters(), 3);
        assert_close!(fit.intercept(), 0.0, tolerance = 1e-9);
        assert_all_close!(fit.coefficients(), [10.0, 20.0], tolerance = 1e-9);
        assert!(!fit.is_degenerate());

        let report = fit.residual_report();
        assert_all_close!(report.errors, [0.0, 0.0, 0.0], tolerance = 1e-9);
        assert_close!(report.max_abs_error, 0.0, tolerance = 1e-9);
        assert_max_residual!(fit, 1e-9);
    }

    #[test]
    fn test_degree_zero_is_configuration_error() {
        let rows = plane_rows();
        let err = MonomialSurfaceFit::new(&rows, 0).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)), "{err}");
    }

    #[test]
    fn test_insufficient_data() {
        let rows = vec![
            Measurement::new(1.0, 7.5, 30.0),
            Measurement::new(2.0, 8.0, 35.0),
        ];
        let err = MonomialSurfaceFit::new(&rows, 8).unwrap_err();
        assert!(
            matches!(
                err,
                Error::InsufficientData {
                    rows: 2,
                    parameters: 45
                }
            ),
            "{err}"
        );

        // Degree 2 needs 6 rows
        let rows = grid(&[0.0, 1.0], &[0.0, 1.0, 2.0], |d, v| d + v);
        assert!(MonomialSurfaceFit::new(&rows, 2).is_ok());
        let err = MonomialSurfaceFit::new(&rows[..5], 2).unwrap_err();
        assert!(matches!(err, Error::InsufficientData { rows: 5, parameters: 6 }));

        let err = MonomialSurfaceFit::new(Vec::<Measurement>::new(), 1).unwrap_err();
        assert!(matches!(err, Error::InsufficientData { rows: 0, .. }));
    }

    #[test]
    fn test_huge_degree_is_rejected_before_allocating() {
        let rows = plane_rows();

        let err = MonomialSurfaceFit::new(&rows, 2_000_000_000).unwrap_err();
        assert!(
            matches!(
                err,
                Error::InsufficientData {
                    rows: 3,
                    parameters: 2_000_000_003_000_000_001
                }
            ),
            "{err}"
        );

        let err = MonomialSurfaceFit::new(&rows, usize::MAX).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)), "{err}");
    }

    #[test]
    fn test_non_finite_row_rejected() {
        let mut rows = plane_rows();
        rows.push(Measurement::new(1.0, f64::NAN, 3.0));
        let err = MonomialSurfaceFit::new(&rows, 1).unwrap_err();
        assert!(matches!(err, Error::MalformedInput { row: 4, .. }), "{err}");
    }

    #[test]
    fn test_duplicate_points_are_degenerate() {
        // Same (distance, velocity), different roots; distance == velocity everywhere
        let rows: Vec<Measurement> = vec![
            Measurement::new(1.0, 1.0, 10.0),
            Measurement::new(1.0, 1.0, 12.0),
            Measurement::new(2.0, 2.0, 20.0),
            Measurement::new(2.0, 2.0, 22.0),
        ];
        let fit = MonomialSurfaceFit::new(&rows, 1).unwrap();

        let degeneracy = fit.degeneracy().expect("fit should be flagged rank deficient");
        assert_eq!(degeneracy.rank, 1);
        assert_eq!(degeneracy.features, 2);
        assert_eq!(fit.rank(), 1);

        // Minimum-norm split of the slope between the two identical columns
        assert_all_close!(fit.coefficients(), [5.0, 5.0], tolerance = 1e-9);
        assert_close!(fit.intercept(), 1.0, tolerance = 1e-9);

        let predictions = fit.predict(&rows);
        assert!(predictions.iter().all(|p| p.is_finite()));
        assert_all_close!(predictions, [11.0, 11.0, 21.0, 21.0], tolerance = 1e-9);

        let report = fit.residual_report();
        assert_close!(report.max_abs_error, 1.0, tolerance = 1e-9);
        assert_close!(report.mean_abs_error, 1.0, tolerance = 1e-9);
        assert_close!(report.median_abs_error, 1.0, tolerance = 1e-9);
    }

    #[test]
    fn test_constant_column_gets_zero_coefficient() {
        let rows = grid(&[3.0], &[1.0, 2.0, 3.0, 4.0], |_, v| 2.0 + 5.0 * v);
        let fit = MonomialSurfaceFit::new(&rows, 1).unwrap();

        assert!(fit.is_degenerate());
        assert_close!(fit.coefficients()[0], 0.0, tolerance = 1e-9);
        assert_close!(fit.coefficients()[1], 5.0, tolerance = 1e-9);
        assert_close!(fit.intercept(), 2.0, tolerance = 1e-9);
        assert_max_residual!(fit, 1e-9);
    }

    #[test]
    fn test_recovers_cubic_exactly() {
        let f = |d: f64, v: f64| {
            3.0 - 2.0 * d + 0.5 * v + d * d - 0.25 * d * v + 0.125 * v * v + 0.01 * d * d * d
        };
        let rows = grid(&steps(-2.0, 2.0, 7), &steps(-1.0, 3.0, 7), f);
        let fit = MonomialSurfaceFit::new(&rows, 3).unwrap();

        assert!(!fit.is_degenerate());
        assert_eq!(fit.rank(), 9);
        assert_close!(fit.intercept(), 3.0, tolerance = 1e-9);
        assert_all_close!(
            fit.coefficients(),
            [-2.0, 0.5, 1.0, -0.25, 0.125, 0.01, 0.0, 0.0, 0.0],
            tolerance = 1e-9
        );
        assert_close!(fit.y(0.5, 0.5), f(0.5, 0.5), tolerance = 1e-9);
    }

    #[test]
    fn test_fit_is_deterministic() {
        let rows: Vec<Measurement> = grid(&steps(0.0, 8.0, 9), &steps(7.5, 12.5, 6), |d, v| {
            (d / v).atan().to_degrees() + 0.1 * d * d
        });
        let a = MonomialSurfaceFit::new(&rows, 3).unwrap();
        let b = MonomialSurfaceFit::new(&rows, 3).unwrap();
        assert_eq!(a.intercept().to_bits(), b.intercept().to_bits());
        assert_eq!(a.coefficients(), b.coefficients());
        assert_eq!(a.solution(), b.solution());
    }

    #[test]
    fn test_prediction_count_matches_rows() {
        let rows = grid(&steps(0.0, 8.0, 5), &steps(7.5, 12.5, 5), |d, v| d * 2.0 - v);
        for degree in 1..=3 {
            let fit = MonomialSurfaceFit::new(&rows, degree).unwrap();
            assert_eq!(fit.predict(&rows).len(), rows.len());
            assert_eq!(fit.residual_report().len(), rows.len());
            assert_eq!(fit.coefficients().len(), fit.basis().feature_count());
        }
    }

    #[test]
    fn test_noisy_quadratic() {
        let f = |d: f64, v: f64| {
            20.0 + 1.5 * d - 0.3 * v + 0.05 * d * d + 0.1 * d * v - 0.02 * v * v
        };
        let mut rng = SmallRng::seed_from_u64(42);
        let noise = Normal::new(0.0, 0.01).unwrap();
        let rows: Vec<_> = grid(&steps(0.0, 8.0, 11), &steps(7.5, 12.5, 11), f)
            .into_iter()
            .map(|mut m| {
                m.root += noise.sample(&mut rng);
                m
            })
            .collect();

        let fit = MonomialSurfaceFit::new(&rows, 2).unwrap();
        assert!(fit.r_squared() > 0.999, "r² = {}", fit.r_squared());
        assert!(fit.root_mean_squared_error() < 0.02);
        assert_max_residual!(fit, 0.06);
    }

    #[test]
    fn test_high_degree_on_measurement_grid() {
        // Same shape of grid, and the same degree, as the production measurements
        let rows: Vec<Measurement> = grid(&steps(0.0, 8.0, 41), &steps(7.5, 12.5, 41), |d, v| {
            10.0 + 2.0 * d + 0.5 * v + 0.1 * d * v
        });
        let fit = MonomialSurfaceFit::new(&rows, 8).unwrap();
        assert_eq!(fit.coefficients().len(), 44);
        assert!(fit.coefficients().iter().all(|c| c.is_finite()));

        // 1681 distinct points determine every monomial up to degree 8
        assert!(!fit.is_degenerate(), "{:?}", fit.degeneracy());
        assert_eq!(fit.rank(), 44);
        assert!(!fit.properties().degenerate);
        assert_max_residual!(fit, 0.01);
    }

    #[test]
    fn test_properties() {
        let rows = plane_rows();
        let fit = MonomialSurfaceFit::new(&rows, 1).unwrap();
        let props = fit.properties();
        assert_eq!(props.degree, 1);
        assert_eq!(props.data_points, 3);
        assert_eq!(props.parameters, 3);
        assert_eq!(props.rank, 2);
        assert!(!props.degenerate);
        assert_eq!(props.coefficients.len(), 2);
        assert!(props.rmse < 1e-9);
        assert_close!(props.r_squared, 1.0, tolerance = 1e-9);
    }

    #[test]
    fn test_to_owned_and_into_polynomial() {
        let rows = plane_rows();
        let fit = MonomialSurfaceFit::new(&rows, 1).unwrap();
        let owned = fit.to_owned();
        assert_eq!(owned, fit);

        let surface = owned.into_polynomial();
        assert_eq!(surface.coefficients(), fit.coefficients());
        assert_eq!(fit.as_ref().intercept(), fit.intercept());
    }

    #[test]
    fn test_equation_uses_fit_order() {
        let rows = plane_rows();
        let fit = MonomialSurfaceFit::new(&rows, 1).unwrap();
        let vars = Variables::new("d", "v").unwrap();
        assert_eq!(fit.feature_names(&vars), vec!["d", "v"]);

        let equation = fit.equation(&vars);
        assert!(equation.starts_with("y = "), "{equation}");
        assert!(equation.ends_with("*v"), "{equation}");
        assert!(!equation.contains(['e', 'E']), "{equation}");
    }
}
