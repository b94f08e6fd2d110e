use std::{
    error::Error,
    fmt::{self, Display},
};

use ndarray::ShapeError;
use rayon::ThreadPoolBuildError;

/// The result type used across the training core.
pub type Result<T> = std::result::Result<T, MlErr>;

/// Reasons a caller-provided input is rejected before any training or scoring happens.
#[derive(Debug, Clone, PartialEq)]
pub enum InputErr {
    EmptyDataset,
    EmptyRow,
    RaggedRow {
        row: usize,
        got: usize,
        expected: usize,
    },
    LabelCountMismatch {
        got: usize,
        expected: usize,
    },
    InvalidLabel {
        row: usize,
        value: f64,
    },
    Untrained,
    InvalidLearningRate(f64),
}

impl Display for InputErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputErr::EmptyDataset => f.write_str("the dataset has no rows"),
            InputErr::EmptyRow => f.write_str("rows must have at least one feature"),
            InputErr::RaggedRow { row, got, expected } => {
                write!(f, "row {row} has {got} features, expected {expected}")
            }
            InputErr::LabelCountMismatch { got, expected } => {
                write!(f, "got {got} labels for {expected} rows")
            }
            InputErr::InvalidLabel { row, value } => {
                write!(f, "label {value} at row {row} is not 0 or 1")
            }
            InputErr::Untrained => f.write_str("the model has not been trained"),
            InputErr::InvalidLearningRate(lr) => {
                write!(f, "learning rate must be a positive finite number, got {lr}")
            }
        }
    }
}

/// The training core's error type.
#[derive(Debug)]
pub enum MlErr {
    InvalidInput(InputErr),
    SizeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    Shape(ShapeError),
    ThreadPool(ThreadPoolBuildError),
}

impl MlErr {
    /// Returns `true` if this error was caused by the caller's input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, MlErr::InvalidInput(_))
    }
}

impl Display for MlErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MlErr::InvalidInput(e) => write!(f, "invalid input: {e}"),
            MlErr::SizeMismatch {
                what,
                got,
                expected,
            } => write!(f, "size mismatch for {what}: got {got}, expected {expected}"),
            MlErr::Shape(e) => write!(f, "shape error: {e}"),
            MlErr::ThreadPool(e) => write!(f, "failed to build the worker pool: {e}"),
        }
    }
}

impl Error for MlErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MlErr::Shape(e) => Some(e),
            MlErr::ThreadPool(e) => Some(e),
            _ => None,
        }
    }
}

impl From<InputErr> for MlErr {
    fn from(value: InputErr) -> Self {
        Self::InvalidInput(value)
    }
}

impl From<ShapeError> for MlErr {
    fn from(value: ShapeError) -> Self {
        Self::Shape(value)
    }
}

impl From<ThreadPoolBuildError> for MlErr {
    fn from(value: ThreadPoolBuildError) -> Self {
        Self::ThreadPool(value)
    }
}
