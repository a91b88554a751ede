//! Slot-keyed parameter checkpoints
//!
//! Each learner gets two artifacts under the output directory: a `best`
//! file, overwritten whenever that learner's validation average improves,
//! and a `last` file written at the end of the run. Only parameter values
//! are persisted; optimizer and scheduler state are not, so a resumed run
//! cannot recover optimizer momentum.
//!
//! Saving moves the model to the CPU, writes, and moves it back. The
//! move-back happens whether or not the write succeeded, so a failed save
//! never leaves a model stranded off its training device.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::device::Device;
use crate::error::Result;
use crate::model::Model;
use crate::tensor::Tensor;

/// Checkpoint slot for a learner
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    /// Best validation loss seen so far for this learner
    Best,
    /// End-of-run state
    Last,
}

impl Slot {
    pub fn as_str(self) -> &'static str {
        match self {
            Slot::Best => "best",
            Slot::Last => "last",
        }
    }
}

/// Checkpoint path for learner `net_idx` in the given slot
///
/// # Example
///
/// ```
/// use adiestrar::checkpoint::{model_file_name, Slot};
/// use std::path::{Path, PathBuf};
///
/// let path = model_file_name(Path::new("/tmp/run"), 2, Slot::Best);
/// assert_eq!(path, PathBuf::from("/tmp/run/net_2.best.json"));
/// ```
pub fn model_file_name(out_dir: &Path, net_idx: usize, slot: Slot) -> PathBuf {
    out_dir.join(format!("net_{net_idx}.{}.json", slot.as_str()))
}

#[derive(Serialize, Deserialize)]
struct ParamRecord {
    name: String,
    shape: Vec<usize>,
    data: Vec<f32>,
}

#[derive(Serialize, Deserialize)]
struct NetState {
    params: Vec<ParamRecord>,
}

/// Persist a model's parameters to the given slot
///
/// The model is moved to the CPU for the write and returned to its original
/// device afterwards, on both the success and the error path.
pub fn save_parameters(
    net: &mut dyn Model,
    out_dir: &Path,
    net_idx: usize,
    slot: Slot,
) -> Result<()> {
    let home = net.device();
    net.to_device(Device::Cpu);
    let result = write_state(net, &model_file_name(out_dir, net_idx, slot));
    net.to_device(home);
    result
}

fn write_state(net: &dyn Model, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let params = net
        .state_dict()
        .into_iter()
        .map(|(name, tensor)| ParamRecord {
            name,
            shape: tensor.shape().to_vec(),
            data: tensor.data().iter().copied().collect(),
        })
        .collect();
    let json = serde_json::to_string(&NetState { params })?;
    fs::write(path, json)?;
    Ok(())
}

/// Load parameter values from a checkpoint file into a model
pub fn load_parameters(net: &mut dyn Model, path: &Path) -> Result<()> {
    let json = fs::read_to_string(path)?;
    let state: NetState = serde_json::from_str(&json)?;
    let mut tensors = Vec::with_capacity(state.params.len());
    for record in state.params {
        let ParamRecord { name, shape, data } = record;
        tensors.push((name, Tensor::from_shape_vec(&shape, data)?));
    }
    net.load_state(&tensors)
}
