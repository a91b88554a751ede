//! The multi-epoch training and evaluation driver

use std::time::Instant;

use crate::checkpoint::{save_parameters, Slot};
use crate::error::Result;
use crate::sample::UniformSource;
use crate::telemetry::ScalarLogger;
use crate::tensor::Tensor;

use super::batch::split_batch;
use super::config::TrainConfig;
use super::learner::{Learner, TrainSettings};
use super::metrics::{
    average_losses, pooled_average, EpochMetrics, TrainLog, TRAIN_LOSS, VAL_LOSS,
};

/// Mean of a per-example loss vector; zero for an empty batch, which then
/// contributes nothing to the accumulated statistics
fn batch_mean(per_example: &Tensor) -> f64 {
    f64::from(per_example.data().mean().unwrap_or(0.0))
}

/// Train every learner over the training loader for `settings.epochs`
/// epochs, evaluating on the validation loader after each one
///
/// `train_batches` and `val_batches` restart their loaders: each call
/// yields one full pass of raw batches, every batch an ordered sequence of
/// exactly `num_inputs + num_labels` tensors (arity taken from the first
/// learner; all learners slice batches identically).
///
/// Per training batch, each learner independently participates with
/// probability `config.batch_use_prob` (one fresh draw per (learner,
/// batch) pair). Validation always runs every learner on every batch and
/// applies no gradients.
///
/// Per epoch the driver appends one [`EpochMetrics`] record with pooled
/// train/validation losses, steps each plateau scheduler with its own
/// learner's validation average, and overwrites a learner's `best`
/// checkpoint whenever that learner's validation average strictly improves
/// on its own minimum. After the final epoch every learner's parameters go
/// to its `last` checkpoint slot.
///
/// Returns the complete train log, one entry per epoch.
pub fn train_models<BT, BV, IT, IV>(
    learners: &mut [Learner],
    train_batches: BT,
    val_batches: BV,
    settings: &TrainSettings,
    config: &TrainConfig,
    rng: &mut dyn UniformSource,
) -> Result<TrainLog>
where
    BT: Fn() -> IT,
    IT: IntoIterator<Item = Vec<Tensor>>,
    BV: Fn() -> IV,
    IV: IntoIterator<Item = Vec<Tensor>>,
{
    assert!(!learners.is_empty(), "at least one learner is required");

    let mut logger = match &config.log_dir {
        Some(dir) => Some(ScalarLogger::create(dir)?),
        None => None,
    };

    let mut train_log = TrainLog::new();
    let mut min_validation_losses = vec![f64::INFINITY; learners.len()];
    let mut min_validation_loss = f64::INFINITY;
    let num_inputs = learners[0].net.input_names().len();
    let num_labels = learners[0].net.label_names().len();

    for epoch in 0..settings.epochs {
        let mut running_losses = vec![0.0f64; learners.len()];
        let mut train_examples = vec![0usize; learners.len()];
        for learner in learners.iter_mut() {
            let Learner { net, optimizer, .. } = learner;
            optimizer.zero_grad(&mut net.parameters_mut());
        }

        let epoch_start = Instant::now();
        for raw_batch in train_batches() {
            let (input_vars, label_vars) =
                split_batch(raw_batch, num_inputs, num_labels, config.device);

            for (net_idx, learner) in learners.iter_mut().enumerate() {
                if rng.next_uniform() >= config.batch_use_prob {
                    continue;
                }
                let Learner { net, optimizer, .. } = learner;

                // forward + backward + optimize
                let outputs = net.forward(&input_vars);
                let loss_per_example = settings.loss.forward(&outputs, &label_vars);
                let loss_value = batch_mean(&loss_per_example);
                let output_grads = settings.loss.backward(&outputs, &label_vars);
                net.backward(&output_grads);
                let mut params = net.parameters_mut();
                optimizer.step(&mut params);
                optimizer.zero_grad(&mut params);

                // TODO weight future example sampling by loss_per_example.

                let batch_size = input_vars[0].batch_size();
                train_examples[net_idx] += batch_size;
                running_losses[net_idx] += loss_value * batch_size as f64;
            }
        }
        let epoch_duration = epoch_start.elapsed().as_secs_f64();

        let total_train_examples: usize = train_examples.iter().sum();
        let examples_per_sec = total_train_examples as f64 / epoch_duration;
        let avg_loss = pooled_average(&running_losses, &train_examples);

        // Evaluation pass: every learner, every batch, no gradients
        let mut validation_total_losses = vec![0.0f64; learners.len()];
        let mut validation_examples = vec![0usize; learners.len()];
        for learner in learners.iter_mut() {
            learner.net.set_training(false);
        }
        for raw_batch in val_batches() {
            let (input_vars, label_vars) =
                split_batch(raw_batch, num_inputs, num_labels, config.device);

            for (net_idx, learner) in learners.iter_mut().enumerate() {
                let outputs = learner.net.forward(&input_vars);
                let loss_per_example = settings.loss.forward(&outputs, &label_vars);
                let loss_value = batch_mean(&loss_per_example);

                let batch_size = input_vars[0].batch_size();
                validation_examples[net_idx] += batch_size;
                validation_total_losses[net_idx] += loss_value * batch_size as f64;
            }
        }
        for learner in learners.iter_mut() {
            learner.net.set_training(true);
        }

        let validation_avg_losses =
            average_losses(&validation_total_losses, &validation_examples);
        let validation_avg_loss =
            pooled_average(&validation_total_losses, &validation_examples);

        let event = EpochMetrics {
            train_loss: avg_loss,
            val_loss: validation_avg_loss,
            epoch_duration_sec: epoch_duration,
            examples_per_sec,
        };
        train_log.push(event);

        let val_improved_marker = if validation_avg_loss < min_validation_loss {
            min_validation_loss = validation_avg_loss;
            " ***"
        } else if validation_avg_loss * 0.9 < min_validation_loss {
            // Highlight epochs with validation loss almost as good as the
            // current best.
            " *"
        } else {
            ""
        };

        for (net_idx, learner) in learners.iter_mut().enumerate() {
            let Learner {
                net,
                optimizer,
                lr_scheduler,
            } = learner;
            if let Some(scheduler) = lr_scheduler {
                scheduler.step(validation_avg_losses[net_idx] as f32);
                optimizer.set_lr(scheduler.lr());
            }
            if validation_avg_losses[net_idx] < min_validation_losses[net_idx] {
                save_parameters(net.as_mut(), &config.out_dir, net_idx, Slot::Best)?;
                min_validation_losses[net_idx] = validation_avg_losses[net_idx];
            }
        }

        if config.print_log {
            println!("Epoch {epoch};  {event}{val_improved_marker}");
        }
        if let Some(logger) = logger.as_mut() {
            logger.log_value(TRAIN_LOSS, avg_loss, epoch as u64)?;
            logger.log_value(VAL_LOSS, validation_avg_loss, epoch as u64)?;
        }
    }

    for (net_idx, learner) in learners.iter_mut().enumerate() {
        save_parameters(learner.net.as_mut(), &config.out_dir, net_idx, Slot::Last)?;
    }
    if let Some(logger) = logger.as_mut() {
        logger.flush()?;
    }

    Ok(train_log)
}
