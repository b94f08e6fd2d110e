use ndarray::{Array1, ArrayView1, ArrayView2};

use crate::{
    activation::sigmoid,
    error::{MlErr, Result},
};

/// The trainable state of a logistic regression: one weight per feature and a bias.
#[derive(Debug, Clone, PartialEq)]
pub struct Params {
    weights: Array1<f64>,
    bias: f64,
}

impl Params {
    /// Creates a new `Params` with every weight and the bias set to zero.
    ///
    /// # Arguments
    /// * `dim` - The amount of features, fixed for the lifetime of the instance.
    pub fn zeros(dim: usize) -> Self {
        Self {
            weights: Array1::zeros(dim),
            bias: 0.,
        }
    }

    /// Creates a new `Params` from explicit values.
    pub fn new(weights: Vec<f64>, bias: f64) -> Self {
        Self {
            weights: Array1::from(weights),
            bias,
        }
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.weights.len()
    }

    #[inline]
    pub fn weights(&self) -> ArrayView1<'_, f64> {
        self.weights.view()
    }

    #[inline]
    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Mutable access for optimizers. The weight count can't change through it.
    pub(crate) fn parts_mut(&mut self) -> (&mut Array1<f64>, &mut f64) {
        (&mut self.weights, &mut self.bias)
    }

    /// Computes `dot(weights, x) + bias`.
    ///
    /// # Returns
    /// A `MlErr::SizeMismatch` if `x` doesn't have one value per weight.
    pub fn logit(&self, x: ArrayView1<f64>) -> Result<f64> {
        self.check_dim("row", x.len())?;
        Ok(self.weights.dot(&x) + self.bias)
    }

    /// The probability of the positive class for a single row.
    pub fn probability(&self, x: ArrayView1<f64>) -> Result<f64> {
        self.logit(x).map(sigmoid)
    }

    /// Logits for every row of `x`.
    pub fn logits(&self, x: ArrayView2<f64>) -> Result<Array1<f64>> {
        self.check_dim("rows", x.ncols())?;
        Ok(x.dot(&self.weights) + self.bias)
    }

    pub(crate) fn check_dim(&self, what: &'static str, got: usize) -> Result<()> {
        if got != self.dim() {
            return Err(MlErr::SizeMismatch {
                what,
                got,
                expected: self.dim(),
            });
        }

        Ok(())
    }
}
