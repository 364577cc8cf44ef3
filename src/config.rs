//! Run configuration.
//!
//! A [`FitConfig`] is the one place the degree and the variable symbols are chosen. It is read
//! from an optional JSON file and then overridden by `key=value` arguments:
//!
//! | Key | Field | Default |
//! |---|---|---|
//! | `degree` | [`FitConfig::degree`] | `8` |
//! | `variables` | [`FitConfig::variables`], as `distance,velocity` | `d_i_s_t_a_n_c_e,v_e_l_o_c_i_t_y` |
//! | `input` | [`FitConfig::input`] | `results/results.csv` |
//! | `output` | [`FitConfig::output_dir`] | `results` |
//! | `equation` | [`FitConfig::equation_file`] | `equation.txt` |
//! | `surface` | [`FitConfig::surface_file`], `none` to disable | `surface.csv` |
//!
//! ```
//! # use rootfit::config::FitConfig;
//! let mut config = FitConfig::from_json_str(r#"{ "degree": 3 }"#).unwrap();
//! config.apply_arg("variables=x,y").unwrap();
//! config.validate().unwrap();
//! assert_eq!(config.degree, 3);
//! assert_eq!(config.variables().unwrap().distance(), "x");
//! ```
use std::path::{Path, PathBuf};

use crate::{
    display::{Variables, DEFAULT_DISTANCE_SYMBOL, DEFAULT_VELOCITY_SYMBOL},
    error::{Error, Result},
};

/// Degree used when none is configured.
pub const DEFAULT_DEGREE: usize = 8;

/// Settings for one fitting run.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FitConfig {
    /// Maximum total degree of the fitted surface
    pub degree: usize,

    /// Symbols for distance and velocity, in that order
    pub variables: Vec<String>,

    /// Measurements CSV
    pub input: PathBuf,

    /// Directory the artifacts are written to
    pub output_dir: PathBuf,

    /// File name of the equation report, inside `output_dir`
    pub equation_file: String,

    /// File name of the surface export, inside `output_dir`
    pub surface_file: Option<String>,
}
impl Default for FitConfig {
    fn default() -> Self {
        Self {
            degree: DEFAULT_DEGREE,
            variables: vec![
                DEFAULT_DISTANCE_SYMBOL.to_string(),
                DEFAULT_VELOCITY_SYMBOL.to_string(),
            ],
            input: PathBuf::from("results/results.csv"),
            output_dir: PathBuf::from("results"),
            equation_file: "equation.txt".to_string(),
            surface_file: Some("surface.csv".to_string()),
        }
    }
}
impl FitConfig {
    /// Parses a JSON config. Missing fields take their defaults.
    ///
    /// # Errors
    /// Returns [`Error::Configuration`] if the JSON is invalid, has unknown fields, or holds a
    /// value of the wrong type (a negative degree, for example).
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::Configuration(format!("invalid config: {e}")))
    }

    /// Reads and parses a JSON config file.
    ///
    /// # Errors
    /// Returns [`Error::Configuration`] if the file cannot be read or parsed.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            Error::Configuration(format!("cannot read config {}: {e}", path.display()))
        })?;

        log::debug!("Loaded config from {}", path.display());
        Self::from_json_str(&json)
    }

    /// Applies a single `key=value` override.
    ///
    /// Returns `Ok(false)` if the key is not a config key, leaving the caller to handle it.
    ///
    /// # Errors
    /// Returns [`Error::Configuration`] if the key is known but its value is not valid.
    pub fn apply_arg(&mut self, arg: &str) -> Result<bool> {
        let Some((key, value)) = arg.split_once('=') else {
            return Ok(false);
        };

        match key {
            "degree" => {
                self.degree = value.parse().map_err(|_| {
                    Error::Configuration(format!("degree must be a positive integer, got `{value}`"))
                })?;
            }
            "variables" => {
                self.variables = value.split(',').map(|s| s.trim().to_string()).collect();
            }
            "input" => self.input = PathBuf::from(value),
            "output" => self.output_dir = PathBuf::from(value),
            "equation" => self.equation_file = value.to_string(),
            "surface" => {
                self.surface_file = match value {
                    "" | "none" => None,
                    file => Some(file.to_string()),
                };
            }
            _ => return Ok(false),
        }

        Ok(true)
    }

    /// Checks the config before any data is read.
    ///
    /// # Errors
    /// Returns [`Error::Configuration`] if the degree is 0, the variables are not a valid pair,
    /// or the equation file name is empty.
    pub fn validate(&self) -> Result<()> {
        if self.degree == 0 {
            return Err(Error::Configuration("degree must be at least 1".into()));
        }

        if self.equation_file.is_empty() {
            return Err(Error::Configuration("equation file name is empty".into()));
        }

        self.variables().map(|_| ())
    }

    /// The validated variable symbols.
    ///
    /// # Errors
    /// Returns [`Error::Configuration`] if there are not exactly two valid symbols.
    pub fn variables(&self) -> Result<Variables> {
        Variables::from_slice(&self.variables)
    }

    /// Where the equation report is written
    #[must_use]
    pub fn equation_path(&self) -> PathBuf {
        self.output_dir.join(&self.equation_file)
    }

    /// Where the surface export is written, if enabled
    #[must_use]
    pub fn surface_path(&self) -> Option<PathBuf> {
        self.surface_file.as_ref().map(|f| self.output_dir.join(f))
    }
}
