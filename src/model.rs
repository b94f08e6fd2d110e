use std::num::NonZeroUsize;

use ndarray::{ArrayView1, ArrayView2};

use crate::{
    activation::{classify, sigmoid},
    data::{Dataset, DatasetView, check_labels},
    error::{InputErr, MlErr, Result},
    optimization::GradientDescent,
    parameters::Params,
    training::{LogisticGradient, Trainer},
};

/// A binary logistic regression classifier trained with parallel full-batch gradient descent.
///
/// The weight count is inferred from the first training call. Training takes
/// `&mut self` and prediction `&self`, so a model can't be scored while it's
/// being updated.
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    optimizer: GradientDescent,
    epochs: NonZeroUsize,
    params: Option<Params>,
}

impl LogisticRegression {
    /// Creates a new untrained model.
    ///
    /// # Arguments
    /// * `learning_rate` - The gradient descent step, must be positive and finite.
    /// * `epochs` - The exact amount of passes over the training rows.
    pub fn new(learning_rate: f64, epochs: NonZeroUsize) -> Result<Self> {
        Ok(Self {
            optimizer: GradientDescent::new(learning_rate)?,
            epochs,
            params: None,
        })
    }

    pub fn learning_rate(&self) -> f64 {
        self.optimizer.learning_rate()
    }

    pub fn epochs(&self) -> NonZeroUsize {
        self.epochs
    }

    pub fn is_trained(&self) -> bool {
        self.params.is_some()
    }

    /// The trained weights, `None` before the first successful training call.
    pub fn weights(&self) -> Option<&[f64]> {
        self.params.as_ref().and_then(|p| p.weights().to_slice())
    }

    /// The trained bias, `0.0` before the first successful training call.
    pub fn bias(&self) -> f64 {
        self.params.as_ref().map_or(0., Params::bias)
    }

    pub fn params(&self) -> Option<&Params> {
        self.params.as_ref()
    }

    /// Trains the model from scratch on borrowed rows.
    ///
    /// # Arguments
    /// * `x` - `n` rows of `d` features each.
    /// * `y` - `n` labels, each `0` or `1`.
    /// * `num_workers` - The amount of parallel gradient workers.
    ///
    /// # Errors
    /// `MlErr::InvalidInput` if `x` is empty or ragged, if `y` has a different length
    /// or holds a label outside `{0, 1}`. Nothing is trained in that case and the
    /// model keeps its previous state.
    pub fn train(&mut self, x: &[Vec<f64>], y: &[f64], num_workers: NonZeroUsize) -> Result<()> {
        let data = Dataset::from_rows(x, y)?;
        self.fit(data.view(), num_workers)
    }

    /// Trains the model from scratch on a dataset view.
    ///
    /// Weights and bias start at zero. On any failure the model keeps the
    /// parameters it had before the call.
    pub fn fit(&mut self, data: DatasetView<'_>, num_workers: NonZeroUsize) -> Result<()> {
        if data.is_empty() {
            return Err(InputErr::EmptyDataset.into());
        }
        if data.dim() == 0 {
            return Err(InputErr::EmptyRow.into());
        }
        check_labels(data.labels().iter().copied())?;

        let mut params = Params::zeros(data.dim());
        let mut trainer = Trainer::new(self.optimizer, self.epochs, num_workers);
        trainer.train(&LogisticGradient::new(data), &mut params)?;

        self.params = Some(params);
        Ok(())
    }

    /// The probability of the positive class for a single row.
    ///
    /// # Errors
    /// `MlErr::InvalidInput` if the model is untrained or `x` doesn't have one value per weight.
    pub fn predict_proba(&self, x: &[f64]) -> Result<f64> {
        let params = self.trained()?;
        check_width(params, 0, x.len())?;
        params.probability(ArrayView1::from(x))
    }

    /// Classifies a single row, `1.0` if its probability is at least `0.5` and `0.0` otherwise.
    pub fn predict_one(&self, x: &[f64]) -> Result<f64> {
        self.predict_proba(x).map(classify)
    }

    /// Classifies every row of `x`, in order. Either every row is scored or none.
    pub fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<f64>> {
        let params = self.trained()?;

        for (row, xi) in x.iter().enumerate() {
            check_width(params, row, xi.len())?;
        }

        x.iter().map(|xi| self.predict_one(xi)).collect()
    }

    /// Classifies every row of a feature matrix, in order.
    pub fn predict_rows(&self, x: ArrayView2<f64>) -> Result<Vec<f64>> {
        let params = self.trained()?;
        check_width(params, 0, x.ncols())?;

        Ok(params
            .logits(x)?
            .mapv_into(sigmoid)
            .mapv_into(classify)
            .to_vec())
    }

    fn trained(&self) -> Result<&Params> {
        self.params.as_ref().ok_or(MlErr::InvalidInput(InputErr::Untrained))
    }
}

fn check_width(params: &Params, row: usize, got: usize) -> Result<()> {
    if got != params.dim() {
        return Err(InputErr::RaggedRow {
            row,
            got,
            expected: params.dim(),
        }
        .into());
    }

    Ok(())
}
