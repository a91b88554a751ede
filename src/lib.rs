//! adiestrar — a multi-model supervised training loop
//!
//! One or more parallel learners (a network, its optimizer, and an optional
//! learning-rate scheduler) iterate epochs over a training set and a
//! validation set. The driver computes losses, performs gradient updates,
//! tracks per-learner best-validation checkpoints, and emits progress
//! metrics. The numerical differentiation engine is an external
//! collaborator behind the [`model::Model`] seam; [`model::LinearModel`]
//! is the in-tree implementation.
//!
//! # Example
//!
//! ```no_run
//! use adiestrar::loss::{PowerLoss, SingleLabelLoss};
//! use adiestrar::model::LinearModel;
//! use adiestrar::optim::{ReduceLrOnPlateau, SGD};
//! use adiestrar::sample::SeededUniform;
//! use adiestrar::train::{train_models, Learner, TrainConfig, TrainSettings};
//! use adiestrar::{Result, Tensor};
//!
//! fn main() -> Result<()> {
//!     let mut learners = vec![Learner::new(
//!         Box::new(LinearModel::new(4, 1)),
//!         Box::new(SGD::new(0.05, 0.9)),
//!     )
//!     .with_scheduler(Box::new(ReduceLrOnPlateau::new(0.05, 0.5, 3)))];
//!
//!     let settings = TrainSettings::new(
//!         Box::new(SingleLabelLoss::new(PowerLoss::new(2.0))),
//!         20,
//!     );
//!     let config = TrainConfig::new("runs/out").with_log_dir("runs/logs");
//!     let mut rng = SeededUniform::seed_from_u64(7);
//!
//!     let batches = || -> Vec<Vec<Tensor>> { unimplemented!("wire a data loader") };
//!     let log = train_models(&mut learners, batches, batches, &settings, &config, &mut rng)?;
//!     println!("final val loss: {}", log.last().map_or(f64::INFINITY, |e| e.val_loss));
//!     Ok(())
//! }
//! ```

pub mod checkpoint;
pub mod device;
pub mod error;
pub mod loss;
pub mod model;
pub mod optim;
pub mod sample;
pub mod telemetry;
pub mod tensor;
pub mod train;

pub use device::Device;
pub use error::{Error, Result};
pub use tensor::{Parameter, Tensor};
