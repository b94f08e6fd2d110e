use std::num::NonZeroUsize;

use log::{debug, trace};

use super::GradientStep;
use crate::{
    error::Result,
    execution::ParallelReduce,
    optimization::Optimizer,
    parameters::{GradientAccumulator, Params},
};

/// Drives full-batch training: one fork/join cycle and one parameter update per epoch.
///
/// The trainer always performs exactly `epochs` passes, there's no convergence
/// check and no early exit.
#[derive(Debug)]
pub struct Trainer<O: Optimizer> {
    optimizer: O,
    epochs: NonZeroUsize,
    workers: NonZeroUsize,
}

impl<O: Optimizer> Trainer<O> {
    /// Creates a new `Trainer`.
    ///
    /// # Arguments
    /// * `optimizer` - Applies the averaged gradient once per epoch.
    /// * `epochs` - The exact amount of passes over the data.
    /// * `workers` - The amount of parallel gradient workers.
    pub fn new(optimizer: O, epochs: NonZeroUsize, workers: NonZeroUsize) -> Self {
        Self {
            optimizer,
            epochs,
            workers,
        }
    }

    /// Trains `params` in place.
    ///
    /// Within an epoch every worker reads the same frozen `params`; the update
    /// only happens once all of them have merged their local gradient, so the
    /// update of one epoch is what every worker of the next one observes.
    ///
    /// # Arguments
    /// * `step` - The gradient computation, run once per partition range per epoch.
    /// * `params` - The parameters to train, must have `step.dim()` weights.
    ///
    /// # Errors
    /// The first failure of any worker, of the merge or of the optimizer aborts
    /// the whole call. `params` may hold the updates of the epochs completed so far.
    pub fn train<S: GradientStep>(&mut self, step: &S, params: &mut Params) -> Result<()> {
        params.check_dim("params", step.dim())?;

        let samples = step.samples();
        let reduce = ParallelReduce::new(samples, self.workers)?;

        debug!(
            samples = samples,
            workers = reduce.ranges().len(),
            epochs = self.epochs.get();
            "starting training"
        );

        for epoch in 0..self.epochs.get() {
            let acc = GradientAccumulator::new(params.dim());
            let snapshot: &Params = params;

            reduce.run(
                |range| step.gradient(snapshot, range),
                |local| acc.accumulate(&local),
            )?;

            self.optimizer
                .update_params(&acc.into_gradient(), params, samples)?;

            trace!(epoch = epoch, bias = params.bias(); "epoch finished");
        }

        debug!("training finished");
        Ok(())
    }
}
