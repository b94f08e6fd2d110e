use ndarray::{Array1, ArrayView1};

use crate::error::{MlErr, Result};

/// A (partial or full) gradient of the log loss: one entry per weight plus the bias term.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    weights: Array1<f64>,
    bias: f64,
}

impl Gradient {
    /// Creates a new zeroed `Gradient` of `dim` weights.
    pub fn zeros(dim: usize) -> Self {
        Self {
            weights: Array1::zeros(dim),
            bias: 0.,
        }
    }

    pub fn new(weights: Array1<f64>, bias: f64) -> Self {
        Self { weights, bias }
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

    /// Adds `other` into this gradient, element-wise.
    ///
    /// # Returns
    /// A `MlErr::SizeMismatch` if both gradients don't have the same amount of weights.
    pub fn merge(&mut self, other: &Gradient) -> Result<()> {
        if other.dim() != self.dim() {
            return Err(MlErr::SizeMismatch {
                what: "gradient",
                got: other.dim(),
                expected: self.dim(),
            });
        }

        self.weights += &other.weights;
        self.bias += other.bias;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn merge_adds_elementwise() {
        let mut acc = Gradient::zeros(2);
        acc.merge(&Gradient::new(array![1., 2.], 0.5)).unwrap();
        acc.merge(&Gradient::new(array![1., 1.], 0.5)).unwrap();

        assert_eq!(acc.weights().to_vec(), [2., 3.]);
        assert_eq!(acc.bias(), 1.);
    }

    #[test]
    fn merge_rejects_size_mismatch() {
        let mut acc = Gradient::zeros(2);
        let err = acc.merge(&Gradient::zeros(3)).unwrap_err();
        assert!(matches!(err, MlErr::SizeMismatch { got: 3, expected: 2, .. }));
        assert_eq!(acc, Gradient::zeros(2));
    }
}
