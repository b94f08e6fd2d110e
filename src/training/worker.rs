use std::ops::Range;

use ndarray::{Array1, s};

use crate::{
    activation::sigmoid,
    data::DatasetView,
    error::Result,
    parameters::{Gradient, Params},
};

/// Abstraction over the local computation executed by a gradient worker.
///
/// Implementations map a frozen parameter snapshot and a range of rows to a
/// local gradient. They get shared access only, which is what lets the trainer
/// run them in parallel without locking.
pub trait GradientStep: Sync {
    /// The amount of rows available, ranges passed to `gradient` lie in `[0, samples)`.
    fn samples(&self) -> usize;

    /// The amount of features per row.
    fn dim(&self) -> usize;

    /// Computes the gradient contribution of the rows in `range`.
    ///
    /// # Arguments
    /// * `params` - Read-only snapshot of the current parameters.
    /// * `range` - The rows assigned to this worker.
    ///
    /// # Errors
    /// Any error is fatal for the whole training call.
    fn gradient(&self, params: &Params, range: Range<usize>) -> Result<Gradient>;
}

/// Gradient of the log loss of a logistic regression over a borrowed dataset.
#[derive(Debug, Clone, Copy)]
pub struct LogisticGradient<'a> {
    data: DatasetView<'a>,
}

impl<'a> LogisticGradient<'a> {
    pub fn new(data: DatasetView<'a>) -> Self {
        Self { data }
    }
}

impl GradientStep for LogisticGradient<'_> {
    fn samples(&self) -> usize {
        self.data.len()
    }

    fn dim(&self) -> usize {
        self.data.dim()
    }

    /// For every row: `error = sigmoid(dot(w, x) + b) - y`, then
    /// `grad_w += error * x` and `grad_b += error`, all in a local buffer.
    fn gradient(&self, params: &Params, range: Range<usize>) -> Result<Gradient> {
        let x = self.data.features().slice_move(s![range.clone(), ..]);
        let y = self.data.labels().slice_move(s![range]);

        let errors: Array1<f64> = params.logits(x)?.mapv_into(sigmoid) - &y;
        Ok(Gradient::new(x.t().dot(&errors), errors.sum()))
    }
}
