//! The learner bundle and training settings

use crate::loss::MultiLoss;
use crate::model::Model;
use crate::optim::{LrScheduler, Optimizer};

/// What to optimize and for how long
pub struct TrainSettings {
    /// Maps (predictions, labels) to a per-example loss vector
    pub loss: Box<dyn MultiLoss>,
    /// Number of epochs to run
    pub epochs: usize,
}

impl TrainSettings {
    pub fn new(loss: Box<dyn MultiLoss>, epochs: usize) -> Self {
        Self { loss, epochs }
    }
}

/// One trainable model with its optimizer and optional LR scheduler
///
/// Each learner exclusively owns its parameters, optimizer, and scheduler
/// state; learners only share the (read-only) batches.
pub struct Learner {
    pub net: Box<dyn Model>,
    pub optimizer: Box<dyn Optimizer>,
    pub lr_scheduler: Option<Box<dyn LrScheduler>>,
}

impl Learner {
    pub fn new(net: Box<dyn Model>, optimizer: Box<dyn Optimizer>) -> Self {
        Self {
            net,
            optimizer,
            lr_scheduler: None,
        }
    }

    pub fn with_scheduler(mut self, scheduler: Box<dyn LrScheduler>) -> Self {
        self.lr_scheduler = Some(scheduler);
        self
    }
}
