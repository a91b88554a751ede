//! Stochastic Gradient Descent optimizer

use super::Optimizer;
use crate::tensor::Parameter;
use ndarray::ArrayD;

/// SGD with optional momentum
pub struct SGD {
    lr: f32,
    momentum: f32,
    velocities: Vec<Option<ArrayD<f32>>>,
}

impl SGD {
    pub fn new(lr: f32, momentum: f32) -> Self {
        Self {
            lr,
            momentum,
            velocities: Vec::new(),
        }
    }

    fn ensure_velocities(&mut self, len: usize) {
        if self.velocities.len() != len {
            self.velocities = vec![None; len];
        }
    }
}

impl Optimizer for SGD {
    fn step(&mut self, params: &mut [&mut Parameter]) {
        self.ensure_velocities(params.len());

        for (i, param) in params.iter_mut().enumerate() {
            let update = if self.momentum > 0.0 {
                // v = momentum * v - lr * grad;  param += v
                let velocity = match (param.grad(), self.velocities[i].take()) {
                    (Some(grad), Some(v)) => v * self.momentum - &(grad * self.lr),
                    (Some(grad), None) => grad * (-self.lr),
                    (None, v) => {
                        self.velocities[i] = v;
                        continue;
                    }
                };
                self.velocities[i] = Some(velocity.clone());
                velocity
            } else {
                // param -= lr * grad
                match param.grad() {
                    Some(grad) => grad * (-self.lr),
                    None => continue,
                }
            };
            *param.value_mut().data_mut() += &update;
        }
    }

    fn lr(&self) -> f32 {
        self.lr
    }

    fn set_lr(&mut self, lr: f32) {
        self.lr = lr;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tensor::Tensor;
    use approx::assert_abs_diff_eq;
    use ndarray::IxDyn;

    fn param_with_grad(value: Vec<f32>, grad: Vec<f32>) -> Parameter {
        let mut p = Parameter::new(Tensor::from_vec(value));
        let len = grad.len();
        p.accumulate_grad(&ArrayD::from_shape_vec(IxDyn(&[len]), grad).unwrap());
        p
    }

    #[test]
    fn test_step_moves_against_gradient() {
        let mut p = param_with_grad(vec![1.0, 2.0], vec![0.5, -0.5]);
        let mut sgd = SGD::new(0.1, 0.0);
        sgd.step(&mut [&mut p]);
        let data = p.value().data().as_slice().unwrap();
        assert_abs_diff_eq!(data[0], 0.95, epsilon = 1e-6);
        assert_abs_diff_eq!(data[1], 2.05, epsilon = 1e-6);
    }

    #[test]
    fn test_momentum_accumulates() {
        let mut p = param_with_grad(vec![0.0], vec![1.0]);
        let mut sgd = SGD::new(0.1, 0.9);
        sgd.step(&mut [&mut p]);
        // First step: v = -0.1, param = -0.1
        assert_abs_diff_eq!(p.value().data()[[0]], -0.1, epsilon = 1e-6);

        p.zero_grad();
        p.accumulate_grad(&ArrayD::from_shape_vec(IxDyn(&[1]), vec![1.0]).unwrap());
        sgd.step(&mut [&mut p]);
        // Second step: v = 0.9 * -0.1 - 0.1 = -0.19, param = -0.29
        assert_abs_diff_eq!(p.value().data()[[0]], -0.29, epsilon = 1e-6);
    }

    #[test]
    fn test_step_without_grad_is_noop() {
        let mut p = Parameter::new(Tensor::from_vec(vec![1.0]));
        let mut sgd = SGD::new(0.1, 0.9);
        sgd.step(&mut [&mut p]);
        assert_eq!(p.value().data()[[0]], 1.0);
    }

    #[test]
    fn test_set_lr() {
        let mut sgd = SGD::new(0.1, 0.0);
        assert_eq!(sgd.lr(), 0.1);
        sgd.set_lr(0.01);
        assert_eq!(sgd.lr(), 0.01);
    }
}
