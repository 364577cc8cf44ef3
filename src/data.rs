//! Measurements and the tabular input they are read from.
//!
//! A [`Measurement`] is one `(distance, velocity) → root` observation. Datasets are plain
//! slices of them; [`MeasurementExt`] adds column-wise iteration on top.
//!
//! # CSV input
//! [`read_csv`] and [`from_reader`] accept any CSV with a header row containing the columns
//! `distance`, `velocity` and `root`. Column order does not matter and extra columns are ignored.
//! Every value must parse as a finite number.
use std::{io::Read, path::Path};

use crate::{
    error::{Error, Result},
    value::Value,
};

/// The columns every input dataset must provide.
pub const REQUIRED_COLUMNS: [&str; 3] = ["distance", "velocity", "root"];

/// One experimental observation.
///
/// `root` is the observed angle, in degrees, for the given distance and velocity.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Measurement<T: Value = f64> {
    /// Distance to the target
    pub distance: T,

    /// Launch velocity
    pub velocity: T,

    /// Observed angle, in degrees
    pub root: T,
}
impl<T: Value> Measurement<T> {
    /// Creates a new measurement.
    pub const fn new(distance: T, velocity: T, root: T) -> Self {
        Self {
            distance,
            velocity,
            root,
        }
    }

    /// Returns true if all three values are finite.
    pub fn is_finite(&self) -> bool {
        self.distance.is_finite_value()
            && self.velocity.is_finite_value()
            && self.root.is_finite_value()
    }
}
impl<T: Value> From<(T, T, T)> for Measurement<T> {
    fn from((distance, velocity, root): (T, T, T)) -> Self {
        Self::new(distance, velocity, root)
    }
}

/// Extension trait for column-wise access to a dataset.
pub trait MeasurementExt<T: Value> {
    /// Iterates over the distance column
    fn distance_iter(&self) -> impl Iterator<Item = T>;

    /// Iterates over the velocity column
    fn velocity_iter(&self) -> impl Iterator<Item = T>;

    /// Iterates over the root column
    fn root_iter(&self) -> impl Iterator<Item = T>;

    /// Collects the root column
    fn roots(&self) -> Vec<T> {
        self.root_iter().collect()
    }

    /// Index of the first row holding a non-finite value, if any
    fn first_non_finite(&self) -> Option<usize>;
}
impl<T: Value> MeasurementExt<T> for [Measurement<T>] {
    fn distance_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|m| m.distance)
    }

    fn velocity_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|m| m.velocity)
    }

    fn root_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|m| m.root)
    }

    fn first_non_finite(&self) -> Option<usize> {
        self.iter().position(|m| !m.is_finite())
    }
}

/// Reads a dataset from a CSV file.
///
/// # Errors
/// - [`Error::Io`] if the file cannot be opened.
/// - [`Error::MalformedInput`] for a missing column or a bad value; see [`from_reader`].
pub fn read_csv(path: impl AsRef<Path>) -> Result<Vec<Measurement<f64>>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let data = from_reader(std::io::BufReader::new(file))?;
    log::debug!("Read {} measurements from {}", data.len(), path.display());
    Ok(data)
}

/// Reads a dataset from any CSV source with a header row.
///
/// # Errors
/// Returns [`Error::MalformedInput`] if:
/// - A required column is missing from the header (reported as row 0).
/// - A cell is empty or not a number (reported with its 1-based data row).
/// - A value is NaN or infinite.
///
/// # Example
/// ```
/// let csv = "distance,velocity,root\n1.0,7.5,12.25\n1.1,7.5,13.5\n";
/// let data = rootfit::data::from_reader(csv.as_bytes()).unwrap();
/// assert_eq!(data.len(), 2);
/// assert_eq!(data[1].root, 13.5);
/// ```
pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Measurement<f64>>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(Error::MalformedInput {
                row: 0,
                reason: format!("missing required column `{column}`"),
            });
        }
    }

    let mut data = Vec::new();
    for (i, record) in rdr.deserialize::<Measurement<f64>>().enumerate() {
        let row = i + 1;
        let measurement = record.map_err(|e| Error::MalformedInput {
            row,
            reason: e.to_string(),
        })?;

        if !measurement.is_finite() {
            return Err(Error::MalformedInput {
                row,
                reason: "value is not finite".into(),
            });
        }

        data.push(measurement);
    }

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_columns_in_any_order() {
        let csv = "root,velocity,distance,extra\n10,2,1,x\n20,4,3,y\n";
        let data = from_reader(csv.as_bytes()).unwrap();
        assert_eq!(
            data,
            vec![Measurement::new(1.0, 2.0, 10.0), Measurement::new(3.0, 4.0, 20.0)]
        );
    }

    #[test]
    fn test_trims_whitespace() {
        let csv = "distance, velocity, root\n 0.5 , 7.5 , 41.25\n";
        let data = from_reader(csv.as_bytes()).unwrap();
        assert_eq!(data[0], Measurement::new(0.5, 7.5, 41.25));
    }

    #[test]
    fn test_missing_column() {
        let csv = "distance,velocity\n1,2\n";
        let err = from_reader(csv.as_bytes()).unwrap_err();
        assert!(
            matches!(err, Error::MalformedInput { row: 0, ref reason } if reason.contains("root")),
            "{err}"
        );
    }

    #[test]
    fn test_non_numeric_value() {
        let csv = "distance,velocity,root\n1,2,3\n1,fast,3\n";
        let err = from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::MalformedInput { row: 2, .. }), "{err}");
    }

    #[test]
    fn test_non_finite_value() {
        let csv = "distance,velocity,root\n1,2,NaN\n";
        let err = from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::MalformedInput { row: 1, .. }), "{err}");
    }

    #[test]
    fn test_empty_dataset() {
        let csv = "distance,velocity,root\n";
        let data = from_reader(csv.as_bytes()).unwrap();
        assert!(data.is_empty());
    }

    #[test]
    fn test_measurement_ext() {
        let data = vec![
            Measurement::new(1.0, 2.0, 3.0),
            Measurement::new(4.0, 5.0, 6.0),
            Measurement::new(7.0, f64::INFINITY, 9.0),
        ];
        assert_eq!(data.distance_iter().collect::<Vec<_>>(), vec![1.0, 4.0, 7.0]);
        assert_eq!(data.velocity_iter().take(2).collect::<Vec<_>>(), vec![2.0, 5.0]);
        assert_eq!(data.roots(), vec![3.0, 6.0, 9.0]);
        assert_eq!(data.first_non_finite(), Some(2));
        assert_eq!(data[..2].first_non_finite(), None);
    }

    #[test]
    fn test_read_csv_missing_file() {
        let err = read_csv("does/not/exist.csv").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
