//! Raw batch splitting

use crate::device::Device;
use crate::tensor::Tensor;

/// Split a raw batch into input and label tensors
///
/// The batch must contain exactly `num_inputs + num_labels` tensors: the
/// first `num_inputs` become inputs, the rest labels. Every tensor is
/// placed on `device` and detached, since batch data is leaf data rather
/// than parameters.
pub fn split_batch(
    batch: Vec<Tensor>,
    num_inputs: usize,
    num_labels: usize,
    device: Device,
) -> (Vec<Tensor>, Vec<Tensor>) {
    assert_eq!(
        batch.len(),
        num_inputs + num_labels,
        "raw batch must contain exactly num_inputs + num_labels tensors"
    );
    let mut inputs: Vec<Tensor> = batch
        .into_iter()
        .map(|t| t.to_device(device).detach())
        .collect();
    let labels = inputs.split_off(num_inputs);
    (inputs, labels)
}
