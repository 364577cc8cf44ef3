//! One fitting run, end to end.
//!
//! [`Pipeline::run`] fits the surface once, computes residuals from that fit, and formats the
//! equation report. The resulting [`PipelineOutput`] feeds both the report writer and any
//! [`SurfaceSink`], so nothing downstream refits or re-derives the degree.
//!
//! ```
//! # use rootfit::{pipeline::{Pipeline, SurfacePoint}, display::Variables, test::grid};
//! let rows = grid(&[0.0, 1.0, 2.0], &[7.5, 10.0, 12.5], |d, v| 30.0 - d + 0.1 * v);
//! let pipeline = Pipeline::new(1, Variables::new("d", "v").unwrap()).unwrap();
//! let output = pipeline.run(&rows).unwrap();
//!
//! let mut points: Vec<SurfacePoint> = Vec::new();
//! output.send_to(&mut points).unwrap();
//! assert_eq!(points.len(), rows.len());
//! ```
use std::{fs::File, io::Write, path::Path};

use crate::{
    config::FitConfig,
    data::Measurement,
    display::Variables,
    error::{Error, Result},
    fit::MonomialSurfaceFit,
    report::{format_equation, EquationDocument},
    statistics::ResidualReport,
    value::Value,
};

/// Fit, residual, and report settings for a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    degree: usize,
    variables: Variables,
}
impl Pipeline {
    /// Creates a pipeline for the given degree and symbols.
    ///
    /// # Errors
    /// Returns [`Error::Configuration`] if `degree` is 0.
    pub fn new(degree: usize, variables: Variables) -> Result<Self> {
        if degree == 0 {
            return Err(Error::Configuration("degree must be at least 1".into()));
        }

        Ok(Self { degree, variables })
    }

    /// Creates a pipeline from a validated config.
    ///
    /// # Errors
    /// Returns [`Error::Configuration`] if the config is not valid.
    pub fn from_config(config: &FitConfig) -> Result<Self> {
        config.validate()?;
        Self::new(config.degree, config.variables()?)
    }

    /// Degree of the surfaces this pipeline fits
    #[must_use]
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Symbols used in the equation text
    #[must_use]
    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    /// Fits the rows, computes residuals, and formats the report.
    ///
    /// # Errors
    /// Returns any error from [`crate::SurfaceFit::new`] or [`format_equation`].
    pub fn run<'data, T: Value>(
        &self,
        rows: &'data [Measurement<T>],
    ) -> Result<PipelineOutput<'data, T>> {
        let fit = MonomialSurfaceFit::new(rows, self.degree)?;
        let report = fit.residual_report();
        let document = format_equation(fit.as_polynomial(), &report, self.degree, &self.variables)?;

        log::info!(
            "Fitted degree {} surface to {} rows (max error {}, mean error {})",
            self.degree,
            rows.len(),
            report.max_abs_error,
            report.mean_abs_error
        );

        Ok(PipelineOutput {
            fit,
            report,
            document,
        })
    }
}

/// Everything produced by one [`Pipeline::run`].
#[derive(Debug, Clone)]
pub struct PipelineOutput<'data, T: Value = f64> {
    fit: MonomialSurfaceFit<'data, T>,
    report: ResidualReport<T>,
    document: EquationDocument<T>,
}
impl<T: Value> PipelineOutput<'_, T> {
    /// The fitted surface, with its data
    #[must_use]
    pub fn fit(&self) -> &MonomialSurfaceFit<'_, T> {
        &self.fit
    }

    /// Predictions and residuals for every input row
    #[must_use]
    pub fn report(&self) -> &ResidualReport<T> {
        &self.report
    }

    /// The formatted equation report
    #[must_use]
    pub fn document(&self) -> &EquationDocument<T> {
        &self.document
    }

    /// Degree of the fitted surface
    #[must_use]
    pub fn degree(&self) -> usize {
        self.fit.degree()
    }

    /// Pairs every input row with its prediction and residual, in input order.
    #[must_use]
    pub fn surface_points(&self) -> Vec<SurfacePoint<T>> {
        self.fit
            .data()
            .iter()
            .zip(&self.report.predictions)
            .zip(&self.report.errors)
            .map(|((m, &predicted), &error)| SurfacePoint {
                distance: m.distance,
                velocity: m.velocity,
                observed: m.root,
                predicted,
                error,
            })
            .collect()
    }

    /// Hands the surface points to a sink, along with the fitted degree.
    ///
    /// # Errors
    /// Returns any error raised by the sink.
    pub fn send_to<S: SurfaceSink<T> + ?Sized>(&self, sink: &mut S) -> Result<()> {
        sink.consume(self.degree(), &self.surface_points())
    }
}

/// One row of the observed, predicted, and error surfaces.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SurfacePoint<T: Value = f64> {
    /// Distance of the input row
    pub distance: T,

    /// Velocity of the input row
    pub velocity: T,

    /// Observed root
    pub observed: T,

    /// Fitted root
    pub predicted: T,

    /// `predicted - observed`
    pub error: T,
}

/// Consumer of fitted surfaces, such as a plotter or an export file.
pub trait SurfaceSink<T: Value> {
    /// Receives every point of one fit.
    ///
    /// # Errors
    /// Returns an error if the points cannot be stored.
    fn consume(&mut self, degree: usize, points: &[SurfacePoint<T>]) -> Result<()>;
}

/// Collects points in memory, ignoring the degree.
impl<T: Value> SurfaceSink<T> for Vec<SurfacePoint<T>> {
    fn consume(&mut self, _degree: usize, points: &[SurfacePoint<T>]) -> Result<()> {
        self.extend_from_slice(points);
        Ok(())
    }
}

#[derive(serde::Serialize)]
struct SurfaceRecord<T> {
    degree: usize,
    distance: T,
    velocity: T,
    observed: T,
    predicted: T,
    error: T,
}

/// Writes surface points as CSV, one row per point.
///
/// Columns are `degree, distance, velocity, observed, predicted, error`.
pub struct CsvSurfaceSink<W: Write> {
    writer: csv::Writer<W>,
}
impl<W: Write> CsvSurfaceSink<W> {
    /// Wraps any writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(writer),
        }
    }

    /// Flushes and returns the underlying writer.
    ///
    /// # Errors
    /// Returns [`Error::Io`] if flushing fails.
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| Error::Io(e.into_error()))
    }
}
impl CsvSurfaceSink<File> {
    /// Creates (or truncates) a CSV file, creating missing parent directories.
    ///
    /// # Errors
    /// Returns [`Error::Io`] if the file cannot be created.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        log::debug!("Writing surface to {}", path.display());
        Ok(Self::new(File::create(path)?))
    }
}
impl<W: Write, T: Value + serde::Serialize> SurfaceSink<T> for CsvSurfaceSink<W> {
    fn consume(&mut self, degree: usize, points: &[SurfacePoint<T>]) -> Result<()> {
        for p in points {
            self.writer.serialize(SurfaceRecord {
                degree,
                distance: p.distance,
                velocity: p.velocity,
                observed: p.observed,
                predicted: p.predicted,
                error: p.error,
            })?;
        }

        self.writer.flush()?;
        Ok(())
    }
}
