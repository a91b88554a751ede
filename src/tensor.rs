//! Tensor and parameter value types
//!
//! `Tensor` is a plain n-dimensional value with a device tag and a
//! gradient-tracking flag. Gradient computation itself lives behind the
//! [`Model`](crate::model::Model) seam; here a parameter is just its value
//! plus an optional accumulated gradient buffer for the optimizer to apply.

use crate::device::Device;
use crate::error::{Error, Result};
use ndarray::{ArrayD, IxDyn};

/// An n-dimensional array of `f32` with device residency and gradient flags
#[derive(Clone, Debug, PartialEq)]
pub struct Tensor {
    data: ArrayD<f32>,
    device: Device,
    requires_grad: bool,
}

impl Tensor {
    /// Create a tensor from an owned array, on the CPU, without gradient tracking
    pub fn from_array(data: ArrayD<f32>) -> Self {
        Self {
            data,
            device: Device::Cpu,
            requires_grad: false,
        }
    }

    /// Create a 1-D tensor from a vector
    pub fn from_vec(data: Vec<f32>) -> Self {
        Self::from_array(ndarray::Array1::from_vec(data).into_dyn())
    }

    /// Create a tensor with the given shape from a flat vector
    pub fn from_shape_vec(shape: &[usize], data: Vec<f32>) -> Result<Self> {
        let array = ArrayD::from_shape_vec(IxDyn(shape), data)
            .map_err(|e| Error::Shape(e.to_string()))?;
        Ok(Self::from_array(array))
    }

    /// Create an all-zero tensor with the given shape
    pub fn zeros(shape: &[usize]) -> Self {
        Self::from_array(ArrayD::zeros(IxDyn(shape)))
    }

    pub fn data(&self) -> &ArrayD<f32> {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut ArrayD<f32> {
        &mut self.data
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Size of the leading (batch) dimension, zero for a 0-dimensional tensor
    pub fn batch_size(&self) -> usize {
        self.data.shape().first().copied().unwrap_or(0)
    }

    /// Total number of elements
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn device(&self) -> Device {
        self.device
    }

    pub fn requires_grad(&self) -> bool {
        self.requires_grad
    }

    /// Retag the tensor as resident on `device`
    pub fn to_device(mut self, device: Device) -> Self {
        self.device = device;
        self
    }

    /// Mark the tensor as leaf data that does not track gradients
    pub fn detach(mut self) -> Self {
        self.requires_grad = false;
        self
    }

    /// Mark the tensor as requiring gradient tracking
    pub fn requiring_grad(mut self) -> Self {
        self.requires_grad = true;
        self
    }
}

/// A trainable value: the current tensor plus its accumulated gradient
#[derive(Clone, Debug)]
pub struct Parameter {
    value: Tensor,
    grad: Option<ArrayD<f32>>,
}

impl Parameter {
    pub fn new(value: Tensor) -> Self {
        Self {
            value: value.requiring_grad(),
            grad: None,
        }
    }

    pub fn value(&self) -> &Tensor {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut Tensor {
        &mut self.value
    }

    pub fn grad(&self) -> Option<&ArrayD<f32>> {
        self.grad.as_ref()
    }

    /// Add `grad` into the accumulated gradient buffer
    pub fn accumulate_grad(&mut self, grad: &ArrayD<f32>) {
        match &mut self.grad {
            Some(existing) => *existing += grad,
            None => self.grad = Some(grad.clone()),
        }
    }

    /// Clear the accumulated gradient
    pub fn zero_grad(&mut self) {
        self.grad = None;
    }
}
