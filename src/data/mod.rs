mod dataset;
mod error;
mod partition;

pub use dataset::{Dataset, DatasetSchema, DatasetView, validate};
pub(crate) use dataset::check_labels;
pub use error::DatasetErr;
pub use partition::partition;
