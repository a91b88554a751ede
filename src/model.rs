//! The model seam and a concrete linear regressor
//!
//! `Model` is the narrow capability set the training driver needs from a
//! network: forward compute, gradient accumulation for a given output
//! gradient, declared input/label arity, a train/eval mode toggle, device
//! moves, and named parameter state for checkpointing. Any engine exposing
//! these capabilities can be driven; `LinearModel` is the in-tree
//! implementation with hand-derived gradients.

use crate::device::Device;
use crate::error::{Error, Result};
use crate::tensor::{Parameter, Tensor};
use ndarray::{Axis, Ix1, Ix2};

/// A trainable network as seen by the training driver
pub trait Model {
    /// Compute outputs from the ordered input tensors
    fn forward(&mut self, inputs: &[Tensor]) -> Vec<Tensor>;

    /// Accumulate parameter gradients given the gradient of the scalar loss
    /// with respect to each output of the last `forward` call
    fn backward(&mut self, output_grads: &[Tensor]);

    /// Mutable access to every trainable parameter, in a stable order
    fn parameters_mut(&mut self) -> Vec<&mut Parameter>;

    /// Ordered names of the input tensors this model consumes
    fn input_names(&self) -> &[String];

    /// Ordered names of the label tensors this model is scored against
    fn label_names(&self) -> &[String];

    /// Toggle between training and evaluation mode
    fn set_training(&mut self, training: bool);

    /// Current device residency
    fn device(&self) -> Device;

    /// Move the model (and its parameters) to `device`
    fn to_device(&mut self, device: Device);

    /// Named parameter state for persistence; values only, no optimizer state
    fn state_dict(&self) -> Vec<(String, Tensor)>;

    /// Replace parameter values from a named state dict
    fn load_state(&mut self, state: &[(String, Tensor)]) -> Result<()>;
}

/// A single dense layer: `y = x Wᵀ + b`
///
/// Inputs are `[batch, in_features]`, outputs `[batch, out_features]`.
/// Weights initialize to zero, which keeps runs deterministic; callers that
/// want a different starting point can write into `parameters_mut()`.
pub struct LinearModel {
    weight: Parameter,
    bias: Parameter,
    input_names: Vec<String>,
    label_names: Vec<String>,
    device: Device,
    training: bool,
    last_input: Option<Tensor>,
}

impl LinearModel {
    pub fn new(in_features: usize, out_features: usize) -> Self {
        Self {
            weight: Parameter::new(Tensor::zeros(&[out_features, in_features])),
            bias: Parameter::new(Tensor::zeros(&[out_features])),
            input_names: vec!["features".to_string()],
            label_names: vec!["target".to_string()],
            device: Device::Cpu,
            training: true,
            last_input: None,
        }
    }

    pub fn is_training(&self) -> bool {
        self.training
    }
}

impl Model for LinearModel {
    fn forward(&mut self, inputs: &[Tensor]) -> Vec<Tensor> {
        assert_eq!(inputs.len(), 1, "LinearModel takes exactly one input tensor");
        let x = inputs[0]
            .data()
            .view()
            .into_dimensionality::<Ix2>()
            .expect("LinearModel input must be [batch, in_features]");
        let w = self
            .weight
            .value()
            .data()
            .view()
            .into_dimensionality::<Ix2>()
            .expect("weight is 2-D");
        let b = self
            .bias
            .value()
            .data()
            .view()
            .into_dimensionality::<Ix1>()
            .expect("bias is 1-D");

        let y = x.dot(&w.t()) + &b;
        self.last_input = Some(inputs[0].clone());
        vec![Tensor::from_array(y.into_dyn()).to_device(self.device)]
    }

    fn backward(&mut self, output_grads: &[Tensor]) {
        assert_eq!(output_grads.len(), 1, "LinearModel produces one output");
        let cached = self
            .last_input
            .as_ref()
            .expect("backward called before forward");
        let x = cached
            .data()
            .view()
            .into_dimensionality::<Ix2>()
            .expect("cached input is 2-D");
        let dy = output_grads[0]
            .data()
            .view()
            .into_dimensionality::<Ix2>()
            .expect("output gradient must be [batch, out_features]");

        let dw = dy.t().dot(&x);
        let db = dy.sum_axis(Axis(0));
        self.weight.accumulate_grad(&dw.into_dyn());
        self.bias.accumulate_grad(&db.into_dyn());
    }

    fn parameters_mut(&mut self) -> Vec<&mut Parameter> {
        vec![&mut self.weight, &mut self.bias]
    }

    fn input_names(&self) -> &[String] {
        &self.input_names
    }

    fn label_names(&self) -> &[String] {
        &self.label_names
    }

    fn set_training(&mut self, training: bool) {
        self.training = training;
    }

    fn device(&self) -> Device {
        self.device
    }

    fn to_device(&mut self, device: Device) {
        self.device = device;
        let value = self.weight.value().clone().to_device(device);
        *self.weight.value_mut() = value;
        let value = self.bias.value().clone().to_device(device);
        *self.bias.value_mut() = value;
    }

    fn state_dict(&self) -> Vec<(String, Tensor)> {
        vec![
            ("weight".to_string(), self.weight.value().clone()),
            ("bias".to_string(), self.bias.value().clone()),
        ]
    }

    fn load_state(&mut self, state: &[(String, Tensor)]) -> Result<()> {
        for (name, tensor) in state {
            let param = match name.as_str() {
                "weight" => &mut self.weight,
                "bias" => &mut self.bias,
                other => return Err(Error::State(format!("unknown parameter '{other}'"))),
            };
            if param.value().shape() != tensor.shape() {
                return Err(Error::State(format!(
                    "shape mismatch for '{name}': expected {:?}, got {:?}",
                    param.value().shape(),
                    tensor.shape()
                )));
            }
            *param.value_mut() = tensor.clone().to_device(self.device).requiring_grad();
        }
        Ok(())
    }
}
