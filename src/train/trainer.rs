use log::{debug, info, warn};
use rand::seq::SliceRandom;

use crate::data::example::Example;
use crate::error::Result;
use crate::network::network::Network;
use crate::optim::sgd::Sgd;
use crate::train::train_stats::TrainStats;

impl Network {
    /// Stochastic gradient descent with explicit backpropagation.
    ///
    /// Shuffles `batch`, splits it into `batch_size` minibatches (a trailing
    /// partial one is dropped) and, for each minibatch in turn, computes the
    /// output error, walks the remaining layers output-to-input, updates every
    /// weighted-sum neuron and decays the step size.
    ///
    /// Not transactional: if a minibatch fails, updates from earlier
    /// minibatches stay applied.
    pub fn train(&mut self, batch: &[Example]) -> Result<TrainStats> {
        self.config.validate()?;
        self.check_examples(batch)?;

        let mut shuffled = batch.to_vec();
        shuffled.shuffle(&mut self.rng);

        let batch_size = self.config.batch_size;
        let minibatches = shuffled.chunks_exact(batch_size);
        let examples_dropped = minibatches.remainder().len();
        if shuffled.len() < batch_size {
            warn!("{} examples do not fill one minibatch of {batch_size}; nothing to train on", shuffled.len());
        }

        let mut optimizer = Sgd::new(self.config.step_size, self.config.decay);
        let mut count = 0;
        for (index, minibatch) in minibatches.enumerate() {
            let output_error = self.backpropagate(minibatch)?;
            debug!("minibatch {index}: output error {output_error:?}, step size {:.6}", optimizer.step_size);
            optimizer.step(&mut self.layers);
            optimizer.decay();
            count += 1;
        }

        info!(
            "trained on {count} minibatches ({examples_dropped} examples dropped), final step size {:.6}",
            optimizer.step_size
        );
        Ok(TrainStats {
            minibatches: count,
            examples_used: count * batch_size,
            examples_dropped,
            final_step_size: optimizer.step_size,
        })
    }

    /// Fills every neuron's error for one minibatch: the output layer from the
    /// targets, then each earlier layer from the one after it.
    fn backpropagate(&mut self, minibatch: &[Example]) -> Result<Vec<f64>> {
        let last = self.layers.len() - 1;
        let (upstream, output) = self.layers.split_at_mut(last);
        let output_error = output[0].output_error_for_batch(upstream, minibatch)?;

        for k in (0..last).rev() {
            let (head, tail) = self.layers.split_at_mut(k + 1);
            let (upstream, current) = head.split_at_mut(k);
            current[0].propagate_error(upstream, &tail[0])?;
        }
        Ok(output_error)
    }
}
