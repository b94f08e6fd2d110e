use ndarray::ArrayView1;

use crate::error::{InputErr, MlErr, Result};

/// The fraction of predictions that exactly match their label.
///
/// # Errors
/// `MlErr::SizeMismatch` if both inputs differ in length and
/// `InputErr::EmptyDataset` if they're empty.
pub fn accuracy(predictions: ArrayView1<f64>, labels: ArrayView1<f64>) -> Result<f64> {
    if predictions.len() != labels.len() {
        return Err(MlErr::SizeMismatch {
            what: "predictions",
            got: predictions.len(),
            expected: labels.len(),
        });
    }
    if labels.is_empty() {
        return Err(InputErr::EmptyDataset.into());
    }

    let correct = predictions
        .iter()
        .zip(labels)
        .filter(|(p, y)| p == y)
        .count();

    Ok(correct as f64 / labels.len() as f64)
}
