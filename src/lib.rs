//! Binary logistic regression trained with parallel full-batch gradient descent.
//!
//! Each epoch the training rows are partitioned across worker threads, every
//! worker computes a local gradient against the same frozen parameters, the
//! local gradients are merged under a lock and, once all workers are done, a
//! single gradient descent step is applied.

pub mod activation;
pub mod config;
pub mod data;
pub mod error;
pub mod execution;
pub mod metrics;
pub mod model;
pub mod optimization;
pub mod parameters;
pub mod report;
pub mod session;
pub mod training;

pub use config::{Config, ConfigErr};
pub use data::{Dataset, DatasetErr, DatasetSchema, DatasetView, partition};
pub use error::{InputErr, MlErr, Result};
pub use model::LogisticRegression;
pub use session::{Session, SessionErr};
