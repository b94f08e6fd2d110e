use parking_lot::Mutex;

use super::Gradient;
use crate::error::Result;

/// The per-epoch gradient shared by every worker.
///
/// Workers never write into it directly, they hand over a finished local
/// gradient which is merged while holding the lock, so merges from different
/// workers never interleave on the same cell.
#[derive(Debug)]
pub struct GradientAccumulator {
    grad: Mutex<Gradient>,
}

impl GradientAccumulator {
    /// Creates a new zeroed `GradientAccumulator`.
    ///
    /// # Arguments
    /// * `dim` - The amount of weights of the model.
    pub fn new(dim: usize) -> Self {
        Self {
            grad: Mutex::new(Gradient::zeros(dim)),
        }
    }

    /// Merges a worker's local gradient into the accumulated one.
    ///
    /// # Arguments
    /// * `local` - The gradient computed by a single worker.
    ///
    /// # Returns
    /// A `MlErr::SizeMismatch` if `local` isn't the same size as the accumulator.
    pub fn accumulate(&self, local: &Gradient) -> Result<()> {
        self.grad.lock().merge(local)
    }

    /// Consumes the accumulator, there can be no merges in flight past this point.
    pub fn into_gradient(self) -> Gradient {
        self.grad.into_inner()
    }
}
