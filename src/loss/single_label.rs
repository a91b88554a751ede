//! Adapter for the common one-prediction, one-label case

use super::{LossFn, MultiLoss};
use crate::tensor::Tensor;

/// Wraps a pair-form loss so callers can pass sequences of exactly one
/// prediction and one label tensor
///
/// # Example
///
/// ```
/// use adiestrar::loss::{MultiLoss, PowerLoss, SingleLabelLoss};
/// use adiestrar::Tensor;
///
/// let loss = SingleLabelLoss::new(PowerLoss::new(2.0));
/// let t = Tensor::from_shape_vec(&[2, 1], vec![1.0, 2.0]).unwrap();
/// let per_example = loss.forward(&[t.clone()], &[t]);
/// assert!(per_example.data().iter().all(|&v| v == 0.0));
/// ```
pub struct SingleLabelLoss<L: LossFn> {
    base: L,
}

impl<L: LossFn> SingleLabelLoss<L> {
    pub fn new(base: L) -> Self {
        Self { base }
    }
}

impl<L: LossFn> MultiLoss for SingleLabelLoss<L> {
    fn forward(&self, predicted: &[Tensor], labels: &[Tensor]) -> Tensor {
        assert_eq!(predicted.len(), 1, "expected exactly one prediction tensor");
        assert_eq!(labels.len(), 1, "expected exactly one label tensor");
        self.base.forward(&predicted[0], &labels[0])
    }

    fn backward(&self, predicted: &[Tensor], labels: &[Tensor]) -> Vec<Tensor> {
        assert_eq!(predicted.len(), 1, "expected exactly one prediction tensor");
        assert_eq!(labels.len(), 1, "expected exactly one label tensor");
        vec![self.base.backward(&predicted[0], &labels[0])]
    }

    fn name(&self) -> &str {
        self.base.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loss::PowerLoss;

    #[test]
    fn test_equal_tensors_give_zero_loss() {
        let loss = SingleLabelLoss::new(PowerLoss::new(2.0));
        let t = Tensor::from_shape_vec(&[3, 1], vec![1.0, 2.0, 3.0]).unwrap();
        let per_example = loss.forward(&[t.clone()], &[t]);
        assert_eq!(per_example.shape(), &[3]);
        assert!(per_example.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    #[should_panic(expected = "exactly one prediction")]
    fn test_two_predictions_panics() {
        let loss = SingleLabelLoss::new(PowerLoss::new(2.0));
        let t = Tensor::zeros(&[1, 1]);
        loss.forward(&[t.clone(), t.clone()], &[t]);
    }

    #[test]
    #[should_panic(expected = "exactly one label")]
    fn test_two_labels_panics() {
        let loss = SingleLabelLoss::new(PowerLoss::new(2.0));
        let t = Tensor::zeros(&[1, 1]);
        loss.forward(&[t.clone()], &[t.clone(), t]);
    }

    #[test]
    fn test_backward_wraps_base_gradient() {
        let loss = SingleLabelLoss::new(PowerLoss::new(2.0));
        let predicted = Tensor::from_shape_vec(&[1, 1], vec![2.0]).unwrap();
        let labels = Tensor::from_shape_vec(&[1, 1], vec![0.0]).unwrap();
        let grads = loss.backward(&[predicted], &[labels]);
        assert_eq!(grads.len(), 1);
        assert_eq!(grads[0].data()[[0, 0]], 4.0);
    }
}
