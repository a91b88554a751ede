//! Loss functions and adapters
//!
//! Two trait shapes exist. [`LossFn`] is the pair form: one prediction
//! tensor against one label tensor, producing the per-example loss vector
//! and the gradient of the *mean* loss with respect to predictions.
//! [`MultiLoss`] is the sequence form the training driver consumes, scoring
//! ordered sequences of outputs against ordered sequences of labels.
//! [`SingleLabelLoss`] bridges the two for the common one-output case.

mod power;
mod single_label;

pub use power::PowerLoss;
pub use single_label::SingleLabelLoss;

use crate::tensor::Tensor;

/// A loss over a single prediction/label tensor pair
pub trait LossFn {
    /// Per-example loss: one scalar per batch row
    fn forward(&self, predicted: &Tensor, labels: &Tensor) -> Tensor;

    /// Gradient of the mean loss with respect to `predicted`
    fn backward(&self, predicted: &Tensor, labels: &Tensor) -> Tensor;

    /// Name of the loss function
    fn name(&self) -> &str;
}

/// A loss over ordered sequences of prediction and label tensors
pub trait MultiLoss {
    /// Per-example loss: one scalar per batch row
    fn forward(&self, predicted: &[Tensor], labels: &[Tensor]) -> Tensor;

    /// Gradient of the mean loss with respect to each prediction tensor
    fn backward(&self, predicted: &[Tensor], labels: &[Tensor]) -> Vec<Tensor>;

    /// Name of the loss function
    fn name(&self) -> &str;
}
