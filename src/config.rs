use std::{
    error::Error,
    fmt::{self, Display},
    fs, io,
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::data::DatasetSchema;

const DEFAULT_EPOCHS: NonZeroUsize = NonZeroUsize::new(500).unwrap();
const DEFAULT_WORKERS: NonZeroUsize = NonZeroUsize::new(8).unwrap();

/// Settings of a training session. Every key is optional in the JSON form.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub learning_rate: f64,
    pub epochs: NonZeroUsize,
    pub workers: NonZeroUsize,
    pub train_ratio: f64,
    pub dataset_path: PathBuf,
    pub report_path: PathBuf,
    pub schema: DatasetSchema,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            learning_rate: 0.01,
            epochs: DEFAULT_EPOCHS,
            workers: DEFAULT_WORKERS,
            train_ratio: 0.8,
            dataset_path: PathBuf::from("Cifer-Fraud-Detection-Dataset-AF-part-1-14.csv"),
            report_path: PathBuf::from("output.txt"),
            schema: DatasetSchema::default(),
        }
    }
}

impl Config {
    /// Loads a `Config` from a JSON file, missing keys take their default value.
    ///
    /// # Errors
    /// `ConfigErr` if the file can't be read, isn't valid JSON or holds invalid values.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigErr> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigErr> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the values serde can't check by itself.
    pub fn validate(&self) -> Result<(), ConfigErr> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.) {
            return Err(ConfigErr::Invalid("learning_rate must be a positive number"));
        }
        if !(self.train_ratio > 0. && self.train_ratio < 1.) {
            return Err(ConfigErr::Invalid("train_ratio must lie strictly between 0 and 1"));
        }
        if self.schema.features.is_empty() {
            return Err(ConfigErr::Invalid("schema.features must not be empty"));
        }

        Ok(())
    }
}

/// Failures while loading a `Config`.
#[derive(Debug)]
pub enum ConfigErr {
    Io(io::Error),
    Json(serde_json::Error),
    Invalid(&'static str),
}

impl Display for ConfigErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigErr::Io(e) => write!(f, "cannot read config: {e}"),
            ConfigErr::Json(e) => write!(f, "invalid JSON: {e}"),
            ConfigErr::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl Error for ConfigErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigErr::Io(e) => Some(e),
            ConfigErr::Json(e) => Some(e),
            ConfigErr::Invalid(_) => None,
        }
    }
}

impl From<io::Error> for ConfigErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ConfigErr {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Boundary conversion for the binary.
impl From<ConfigErr> for io::Error {
    fn from(value: ConfigErr) -> Self {
        match value {
            ConfigErr::Io(e) => e,
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        }
    }
}
