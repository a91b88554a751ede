//! Elementwise power-distance loss

use super::LossFn;
use crate::tensor::Tensor;
use ndarray::Axis;

/// Per-example loss `mean over non-batch dims of |predicted − labels|^p`
///
/// Reduction runs innermost-dimension-first (last axis down to axis 1).
/// Since each reduction is a mean the order only affects floating-point
/// associativity, not the result up to rounding.
///
/// # Example
///
/// ```
/// use adiestrar::loss::{LossFn, PowerLoss};
/// use adiestrar::Tensor;
///
/// let loss = PowerLoss::new(2.0);
/// let predicted = Tensor::from_shape_vec(&[1, 1], vec![5.0]).unwrap();
/// let labels = Tensor::from_shape_vec(&[1, 1], vec![3.0]).unwrap();
/// let per_example = loss.forward(&predicted, &labels);
/// assert_eq!(per_example.data()[[0]], 4.0);
/// ```
pub struct PowerLoss {
    p: f32,
}

impl PowerLoss {
    pub fn new(p: f32) -> Self {
        Self { p }
    }
}

impl LossFn for PowerLoss {
    fn forward(&self, predicted: &Tensor, labels: &Tensor) -> Tensor {
        assert_eq!(
            predicted.shape(),
            labels.shape(),
            "predictions and labels must have identical shapes"
        );
        let diff = predicted.data() - labels.data();
        let p = self.p;
        let mut per_example = diff.mapv(|d| d.abs().powf(p));
        for axis in (1..per_example.ndim()).rev() {
            per_example = per_example
                .mean_axis(Axis(axis))
                .expect("loss reduction over an empty axis");
        }
        Tensor::from_array(per_example).to_device(predicted.device())
    }

    fn backward(&self, predicted: &Tensor, labels: &Tensor) -> Tensor {
        assert_eq!(
            predicted.shape(),
            labels.shape(),
            "predictions and labels must have identical shapes"
        );
        let diff = predicted.data() - labels.data();
        let p = self.p;
        // mean over batch of mean over features: every element is scaled by
        // 1 / total element count
        let n = diff.len().max(1) as f32;
        let grad = diff.mapv(|d| p * d.abs().powf(p - 1.0) * d.signum() / n);
        Tensor::from_array(grad).to_device(predicted.device())
    }

    fn name(&self) -> &str {
        "power"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_identical_tensors_give_zero_loss() {
        let t = Tensor::from_shape_vec(&[2, 3], vec![1.0, -2.0, 3.0, 4.0, 5.0, -6.0]).unwrap();
        for p in [1.0, 2.0, 4.0] {
            let per_example = PowerLoss::new(p).forward(&t, &t);
            assert_eq!(per_example.shape(), &[2]);
            assert!(per_example.data().iter().all(|&v| v == 0.0));
        }
    }

    #[test]
    fn test_single_example_single_feature() {
        let predicted = Tensor::from_shape_vec(&[1, 1], vec![5.0]).unwrap();
        let labels = Tensor::from_shape_vec(&[1, 1], vec![3.0]).unwrap();
        let per_example = PowerLoss::new(2.0).forward(&predicted, &labels);
        assert_abs_diff_eq!(per_example.data()[[0]], 4.0, epsilon = 1e-6);
    }

    #[test]
    fn test_reduces_over_all_non_batch_dims() {
        // 2 examples of shape [2, 2]; absolute error 1 everywhere, p = 1
        let predicted = Tensor::zeros(&[2, 2, 2]);
        let labels = Tensor::from_shape_vec(&[2, 2, 2], vec![1.0; 8]).unwrap();
        let per_example = PowerLoss::new(1.0).forward(&predicted, &labels);
        assert_eq!(per_example.shape(), &[2]);
        assert_abs_diff_eq!(per_example.data()[[0]], 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(per_example.data()[[1]], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_backward_matches_mse_gradient_for_p2() {
        // For p = 2 the gradient of the mean loss is 2 * diff / n
        let predicted = Tensor::from_shape_vec(&[2, 2], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let labels = Tensor::from_shape_vec(&[2, 2], vec![0.0, 0.0, 0.0, 0.0]).unwrap();
        let grad = PowerLoss::new(2.0).backward(&predicted, &labels);
        for (g, d) in grad.data().iter().zip(predicted.data().iter()) {
            assert_abs_diff_eq!(*g, 2.0 * d / 4.0, epsilon = 1e-6);
        }
    }

    #[test]
    #[should_panic(expected = "identical shapes")]
    fn test_shape_mismatch_panics() {
        let a = Tensor::zeros(&[2, 2]);
        let b = Tensor::zeros(&[2, 3]);
        PowerLoss::new(2.0).forward(&a, &b);
    }
}
