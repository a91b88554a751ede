//! Compute device residency tags
//!
//! The crate does not move bytes between devices itself; transfer mechanics
//! belong to the numeric engine behind the [`Model`](crate::model::Model)
//! trait. The tag exists so placement bookkeeping (batches land on the
//! training device, checkpointing round-trips models through the CPU) is
//! explicit and testable.

use std::fmt;

/// A compute device identifier
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Device {
    /// Host memory
    #[default]
    Cpu,
    /// CUDA device by ordinal
    Cuda(usize),
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Cpu => write!(f, "cpu"),
            Device::Cuda(id) => write!(f, "cuda:{id}"),
        }
    }
}
