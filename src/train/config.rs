//! Run configuration for the training driver

use std::path::PathBuf;

use crate::device::Device;

/// Where checkpoints go, which device trains, and how noisy the run is
#[derive(Clone, Debug)]
pub struct TrainConfig {
    /// Directory for best/last checkpoints
    pub out_dir: PathBuf,
    /// Device batches and models train on
    pub device: Device,
    /// Probability that a given learner trains on a given batch; drawn
    /// independently per (learner, batch) pair
    pub batch_use_prob: f64,
    /// Print one metrics line per epoch
    pub print_log: bool,
    /// Directory for scalar telemetry; `None` disables it
    pub log_dir: Option<PathBuf>,
}

impl TrainConfig {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            device: Device::Cpu,
            batch_use_prob: 1.0,
            print_log: true,
            log_dir: None,
        }
    }

    pub fn with_device(mut self, device: Device) -> Self {
        self.device = device;
        self
    }

    pub fn with_batch_use_prob(mut self, prob: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&prob),
            "batch_use_prob must be within [0, 1]"
        );
        self.batch_use_prob = prob;
        self
    }

    pub fn with_print_log(mut self, print_log: bool) -> Self {
        self.print_log = print_log;
        self
    }

    pub fn with_log_dir(mut self, log_dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(log_dir.into());
        self
    }
}
