//! Adam optimizer

use super::Optimizer;
use crate::tensor::Parameter;
use ndarray::ArrayD;

/// Adam with bias-corrected first and second moment estimates
pub struct Adam {
    lr: f32,
    beta1: f32,
    beta2: f32,
    eps: f32,
    t: i32,
    first_moments: Vec<Option<ArrayD<f32>>>,
    second_moments: Vec<Option<ArrayD<f32>>>,
}

impl Adam {
    pub fn new(lr: f32, beta1: f32, beta2: f32, eps: f32) -> Self {
        Self {
            lr,
            beta1,
            beta2,
            eps,
            t: 0,
            first_moments: Vec::new(),
            second_moments: Vec::new(),
        }
    }

    fn ensure_moments(&mut self, len: usize) {
        if self.first_moments.len() != len {
            self.first_moments = vec![None; len];
            self.second_moments = vec![None; len];
        }
    }
}

impl Optimizer for Adam {
    fn step(&mut self, params: &mut [&mut Parameter]) {
        self.ensure_moments(params.len());
        self.t += 1;
        let bias1 = 1.0 - self.beta1.powi(self.t);
        let bias2 = 1.0 - self.beta2.powi(self.t);

        for (i, param) in params.iter_mut().enumerate() {
            let update = match param.grad() {
                Some(grad) => {
                    let m = match self.first_moments[i].take() {
                        Some(m) => m * self.beta1 + &(grad * (1.0 - self.beta1)),
                        None => grad * (1.0 - self.beta1),
                    };
                    let v = match self.second_moments[i].take() {
                        Some(v) => v * self.beta2 + &(grad.mapv(|g| g * g) * (1.0 - self.beta2)),
                        None => grad.mapv(|g| g * g) * (1.0 - self.beta2),
                    };

                    let mut update = ArrayD::zeros(m.raw_dim());
                    for ((u, &mi), &vi) in update.iter_mut().zip(m.iter()).zip(v.iter()) {
                        let m_hat = mi / bias1;
                        let v_hat = vi / bias2;
                        *u = -self.lr * m_hat / (v_hat.sqrt() + self.eps);
                    }
                    self.first_moments[i] = Some(m);
                    self.second_moments[i] = Some(v);
                    update
                }
                None => continue,
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
