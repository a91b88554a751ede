//! Per-epoch metrics and loss averaging

use std::fmt;

/// Scalar series name for the pooled training loss
pub const TRAIN_LOSS: &str = "train_loss";
/// Scalar series name for the pooled validation loss
pub const VAL_LOSS: &str = "val_loss";

/// Metrics recorded once per epoch
///
/// `train_loss` and `val_loss` are pooled across all learners: total loss
/// sums divided by total example counts, not a mean of per-learner means.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EpochMetrics {
    pub train_loss: f64,
    pub val_loss: f64,
    pub epoch_duration_sec: f64,
    pub examples_per_sec: f64,
}

impl fmt::Display for EpochMetrics {
    /// One human-readable line per epoch
    ///
    /// Losses use the shortest float form; the two rate fields are fixed to
    /// two decimals.
    ///
    /// ```
    /// use adiestrar::train::EpochMetrics;
    ///
    /// let event = EpochMetrics {
    ///     train_loss: 1.5,
    ///     val_loss: 2.25,
    ///     epoch_duration_sec: 3.004,
    ///     examples_per_sec: 120.0,
    /// };
    /// assert_eq!(
    ///     event.to_string(),
    ///     "loss 1.5;  val loss: 2.25;  3.00 sec/epoch; 120.00 examples/sec"
    /// );
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "loss {};  val loss: {};  {:.2} sec/epoch; {:.2} examples/sec",
            self.train_loss, self.val_loss, self.epoch_duration_sec, self.examples_per_sec
        )
    }
}

/// Ordered, append-only record of a run: one entry per epoch
pub type TrainLog = Vec<EpochMetrics>;

/// Elementwise average loss: `totals[i] / counts[i]`, `+inf` where the
/// count is zero
///
/// ```
/// use adiestrar::train::average_losses;
///
/// let avgs = average_losses(&[10.0, 0.0], &[5, 0]);
/// assert_eq!(avgs[0], 2.0);
/// assert!(avgs[1].is_infinite());
/// ```
pub fn average_losses(totals: &[f64], counts: &[usize]) -> Vec<f64> {
    assert_eq!(totals.len(), counts.len(), "totals and counts must pair up");
    totals
        .iter()
        .zip(counts)
        .map(|(&total, &count)| {
            if count > 0 {
                total / count as f64
            } else {
                f64::INFINITY
            }
        })
        .collect()
}

/// Average pooled over every learner: summed totals over summed counts,
/// `+inf` when no examples were seen
pub fn pooled_average(totals: &[f64], counts: &[usize]) -> f64 {
    let examples: usize = counts.iter().sum();
    if examples > 0 {
        totals.iter().sum::<f64>() / examples as f64
    } else {
        f64::INFINITY
    }
}
