use super::Optimizer;
use crate::{
    error::{InputErr, Result},
    parameters::{Gradient, Params},
};

/// Plain full-batch gradient descent with a fixed learning rate.
#[derive(Debug, Clone, Copy)]
pub struct GradientDescent {
    learning_rate: f64,
}

impl GradientDescent {
    /// Creates a new `GradientDescent` optimizer.
    ///
    /// # Arguments
    /// * `learning_rate` - The small coefficient that modulates the amount of training per update.
    ///
    /// # Returns
    /// A new `GradientDescent` instance or `InputErr::InvalidLearningRate`
    /// if `learning_rate` isn't a positive finite number.
    pub fn new(learning_rate: f64) -> Result<Self> {
        if !(learning_rate.is_finite() && learning_rate > 0.) {
            return Err(InputErr::InvalidLearningRate(learning_rate).into());
        }

        Ok(Self { learning_rate })
    }

    #[inline]
    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }
}

impl Optimizer for GradientDescent {
    fn update_params(&mut self, grad: &Gradient, params: &mut Params, samples: usize) -> Result<()> {
        params.check_dim("gradient", grad.dim())?;

        let (lr, n) = (self.learning_rate, samples.max(1) as f64);
        let (weights, bias) = params.parts_mut();

        weights.zip_mut_with(&grad.weights(), |w, &g| *w -= lr * g / n);
        *bias -= lr * grad.bias() / n;
        Ok(())
    }
}
