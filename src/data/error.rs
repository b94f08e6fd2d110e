use std::{
    error::Error,
    fmt::{self, Display},
    io,
};

use crate::error::{InputErr, MlErr};

/// Failures while loading or slicing a dataset.
#[derive(Debug)]
pub enum DatasetErr {
    Io(io::Error),
    Csv(csv::Error),
    MissingHeader,
    MissingColumn(String),
    ShortRow { line: usize, got: usize, needed: usize },
    ParseTarget { line: usize, value: String },
    InvalidRatio(f64),
    Invalid(MlErr),
}

impl Display for DatasetErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetErr::Io(e) => write!(f, "io error: {e}"),
            DatasetErr::Csv(e) => write!(f, "malformed csv: {e}"),
            DatasetErr::MissingHeader => f.write_str("the dataset has no header line"),
            DatasetErr::MissingColumn(col) => write!(f, "missing required column: {col}"),
            DatasetErr::ShortRow { line, got, needed } => {
                write!(f, "line {line} has {got} cells, at least {needed} are needed")
            }
            DatasetErr::ParseTarget { line, value } => {
                write!(f, "line {line}: cannot parse target '{value}'")
            }
            DatasetErr::InvalidRatio(ratio) => {
                write!(f, "split ratio must lie strictly between 0 and 1, got {ratio}")
            }
            DatasetErr::Invalid(e) => write!(f, "{e}"),
        }
    }
}

impl Error for DatasetErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DatasetErr::Io(e) => Some(e),
            DatasetErr::Csv(e) => Some(e),
            DatasetErr::Invalid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for DatasetErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for DatasetErr {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<MlErr> for DatasetErr {
    fn from(value: MlErr) -> Self {
        Self::Invalid(value)
    }
}

impl From<InputErr> for DatasetErr {
    fn from(value: InputErr) -> Self {
        Self::Invalid(value.into())
    }
}
