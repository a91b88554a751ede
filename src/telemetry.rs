//! Buffered scalar telemetry
//!
//! `ScalarLogger` collects named scalar series indexed by epoch and
//! periodically writes each series to `<name>.json` in the log directory.
//! Entries buffer in memory between flushes; a flush rewrites the full
//! series file. The logger flushes on drop so short runs lose nothing.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A single scalar data point
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricEntry {
    pub value: f64,
    pub step: u64,
}

/// Buffered writer for named scalar series
pub struct ScalarLogger {
    dir: PathBuf,
    series: BTreeMap<String, Vec<MetricEntry>>,
    flush_interval: Duration,
    last_flush: Instant,
    dirty: bool,
}

impl ScalarLogger {
    /// Create a logger writing under `dir`, creating the directory if needed
    pub fn create(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            series: BTreeMap::new(),
            flush_interval: Duration::from_secs(5),
            last_flush: Instant::now(),
            dirty: false,
        })
    }

    /// Change how often buffered values reach disk
    pub fn with_flush_interval(mut self, interval: Duration) -> Self {
        self.flush_interval = interval;
        self
    }

    /// Record one scalar for `name` at `step`, flushing if the interval
    /// has elapsed
    pub fn log_value(&mut self, name: &str, value: f64, step: u64) -> Result<()> {
        self.series
            .entry(name.to_string())
            .or_default()
            .push(MetricEntry { value, step });
        self.dirty = true;
        if self.last_flush.elapsed() >= self.flush_interval {
            self.flush()?;
        }
        Ok(())
    }

    /// Write every buffered series to disk
    pub fn flush(&mut self) -> Result<()> {
        if self.dirty {
            for (name, entries) in &self.series {
                let path = self.dir.join(format!("{name}.json"));
                fs::write(path, serde_json::to_string(entries)?)?;
            }
            self.dirty = false;
        }
        self.last_flush = Instant::now();
        Ok(())
    }
}

impl Drop for ScalarLogger {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
