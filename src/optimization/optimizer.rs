use crate::{
    error::Result,
    parameters::{Gradient, Params},
};

/// Defines the strategy for updating model parameters based on an epoch's accumulated gradient.
pub trait Optimizer {
    /// Applies one update step to `params`.
    ///
    /// # Arguments
    /// * `grad` - The gradient summed over every training row of the epoch.
    /// * `params` - The parameters to update.
    /// * `samples` - The amount of rows `grad` was summed over.
    ///
    /// # Returns
    /// An error if there's a mismatch in the sizes of `grad` and `params`.
    fn update_params(&mut self, grad: &Gradient, params: &mut Params, samples: usize) -> Result<()>;
}
