//! Optimizers and learning-rate schedulers

mod adam;
mod scheduler;
mod sgd;

pub use adam::Adam;
pub use scheduler::{LrScheduler, ReduceLrOnPlateau};
pub use sgd::SGD;

use crate::tensor::Parameter;

/// An update rule applied to parameters borrowed from a model
pub trait Optimizer {
    /// Apply one update step using each parameter's accumulated gradient
    fn step(&mut self, params: &mut [&mut Parameter]);

    /// Clear accumulated gradients
    fn zero_grad(&mut self, params: &mut [&mut Parameter]) {
        for param in params.iter_mut() {
            param.zero_grad();
        }
    }

    /// Current learning rate
    fn lr(&self) -> f32;

    /// Set the learning rate
    fn set_lr(&mut self, lr: f32);
}
