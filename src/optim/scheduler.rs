//! Metric-driven learning rate schedulers

/// A scheduler stepped once per epoch with a monitored metric
///
/// The driver feeds each learner's validation average loss and then applies
/// `lr()` back onto the learner's optimizer.
pub trait LrScheduler {
    /// Observe one epoch's monitored metric
    fn step(&mut self, metric: f32);

    /// Learning rate after the most recent step
    fn lr(&self) -> f32;
}

/// Multiply the learning rate by `factor` after `patience` consecutive
/// epochs without improvement of the monitored metric
pub struct ReduceLrOnPlateau {
    lr: f32,
    factor: f32,
    patience: usize,
    min_lr: f32,
    best: f32,
    bad_epochs: usize,
}

impl ReduceLrOnPlateau {
    pub fn new(initial_lr: f32, factor: f32, patience: usize) -> Self {
        Self {
            lr: initial_lr,
            factor,
            patience,
            min_lr: 0.0,
            best: f32::INFINITY,
            bad_epochs: 0,
        }
    }

    /// Floor below which the rate is never reduced
    pub fn with_min_lr(mut self, min_lr: f32) -> Self {
        self.min_lr = min_lr;
        self
    }
}

impl LrScheduler for ReduceLrOnPlateau {
    fn step(&mut self, metric: f32) {
        if metric < self.best {
            self.best = metric;
            self.bad_epochs = 0;
        } else {
            self.bad_epochs += 1;
            if self.bad_epochs > self.patience {
                self.lr = (self.lr * self.factor).max(self.min_lr);
                self.bad_epochs = 0;
            }
        }
    }

    fn lr(&self) -> f32 {
        self.lr
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_improving_metric_keeps_lr() {
        let mut sched = ReduceLrOnPlateau::new(0.1, 0.5, 1);
        for metric in [3.0, 2.0, 1.0, 0.5] {
            sched.step(metric);
        }
        assert_eq!(sched.lr(), 0.1);
    }

    #[test]
    fn test_plateau_decays_after_patience() {
        let mut sched = ReduceLrOnPlateau::new(0.1, 0.5, 1);
        sched.step(1.0);
        sched.step(1.0); // first bad epoch, within patience
        assert_eq!(sched.lr(), 0.1);
        sched.step(1.0); // second bad epoch, decay
        assert_abs_diff_eq!(sched.lr(), 0.05, epsilon = 1e-7);
    }

    #[test]
    fn test_min_lr_floor() {
        let mut sched = ReduceLrOnPlateau::new(0.1, 0.1, 0).with_min_lr(0.05);
        sched.step(1.0);
        sched.step(1.0);
        sched.step(1.0);
        assert_eq!(sched.lr(), 0.05);
    }

    #[test]
    fn test_improvement_resets_bad_streak() {
        let mut sched = ReduceLrOnPlateau::new(0.1, 0.5, 1);
        sched.step(1.0);
        sched.step(1.0); // bad
        sched.step(0.5); // improvement resets the streak
        sched.step(0.6); // bad again, still within patience
        assert_eq!(sched.lr(), 0.1);
    }
}
