//! The multi-learner training and evaluation loop
//!
//! This module provides:
//! - Batch splitting into input and label tensors ([`split_batch`])
//! - Per-epoch metric records and loss averaging ([`EpochMetrics`],
//!   [`average_losses`], [`pooled_average`])
//! - The learner bundle and run configuration ([`Learner`],
//!   [`TrainSettings`], [`TrainConfig`])
//! - The epoch driver itself ([`train_models`])

mod batch;
mod config;
mod driver;
mod learner;
mod metrics;

pub use batch::split_batch;
pub use config::TrainConfig;
pub use driver::train_models;
pub use learner::{Learner, TrainSettings};
pub use metrics::{
    average_losses, pooled_average, EpochMetrics, TrainLog, TRAIN_LOSS, VAL_LOSS,
};
