use std::fmt;

use rand::Rng;

use crate::activation::activation::{distance, logistic_derivative};
use crate::data::example::Example;
use crate::error::{NetworkError, Result};
use crate::neuron::{ConstantNeuron, Neuron, NeuronId, WeightedSumNeuron};

/// An ordered group of neurons. Position in `neurons` is meaningful: it is
/// the index used by downstream weight vectors and by label components.
///
/// Methods that need predecessor outputs take `upstream`, the layers before
/// this one (`&layers[..self.index()]`).
#[derive(Debug, Clone)]
pub struct Layer {
    index: usize,
    neurons: Vec<Neuron>,
}

impl Layer {
    /// Input layer: `size` constant neurons all holding `amount`.
    pub fn constants(size: usize, amount: f64) -> Layer {
        let neurons = (0..size)
            .map(|i| Neuron::Constant(ConstantNeuron::new(NeuronId::new(0, i), amount)))
            .collect();
        Layer { index: 0, neurons }
    }

    /// A layer of `size` weighted-sum neurons, each fully connected to `previous`.
    pub fn weighted_sum<R: Rng + ?Sized>(size: usize, previous: &mut Layer, rng: &mut R) -> Layer {
        let index = previous.index + 1;
        let neurons = (0..size)
            .map(|i| Neuron::WeightedSum(WeightedSumNeuron::link_from(NeuronId::new(index, i), previous, rng)))
            .collect();
        Layer { index, neurons }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.neurons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neurons.is_empty()
    }

    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    pub(crate) fn neurons_mut(&mut self) -> &mut [Neuron] {
        &mut self.neurons
    }

    /// The neuron `id` points at, if it lives in this layer.
    pub fn neuron_at(&self, id: NeuronId) -> Option<&Neuron> {
        if id.layer != self.index {
            return None;
        }
        self.neurons.get(id.index)
    }

    /// Clears the cached output of every neuron in this layer only.
    pub fn clear_caches(&self) {
        for neuron in &self.neurons {
            neuron.clear_cache();
        }
    }

    /// Clears this layer and every layer feeding it, each exactly once.
    pub fn reset(&self, upstream: &[Layer]) {
        for layer in upstream {
            layer.clear_caches();
        }
        self.clear_caches();
    }

    /// Writes `input` into this layer's constant neurons.
    pub fn feed(&mut self, input: &[f64]) -> Result<()> {
        if input.len() != self.neurons.len() {
            return Err(NetworkError::InputShapeMismatch {
                expected: self.neurons.len(),
                got: input.len(),
            });
        }
        for (neuron, &value) in self.neurons.iter_mut().zip(input) {
            neuron.set_amount(value)?;
        }
        Ok(())
    }

    /// Raw (un-normalized) neuron outputs, using whatever is cached.
    pub fn outputs(&self, upstream: &[Layer]) -> Vec<f64> {
        self.neurons.iter().map(|n| n.output(upstream)).collect()
    }

    /// Softmax over the neuron outputs. Resets first so no stale cache leaks in.
    pub fn normalized_output(&self, upstream: &[Layer]) -> Vec<f64> {
        self.reset(upstream);
        let exps: Vec<f64> = self.neurons.iter()
            .map(|n| n.output(upstream).exp())
            .collect();
        let total: f64 = exps.iter().sum();
        exps.into_iter().map(|e| e / total).collect()
    }

    /// Hidden-layer error step. `downstream` must already hold fresh errors.
    ///
    /// `error_n = σ'(sum_n) * Σ_linked weight_of(n) * error_linked`
    pub fn propagate_error(&mut self, upstream: &[Layer], downstream: &Layer) -> Result<Vec<f64>> {
        let errors = self.neurons.iter()
            .map(|neuron| {
                let mut carried = 0.0;
                for &id in neuron.linked_neurons() {
                    let linked = downstream.neuron_at(id).ok_or(NetworkError::NotLinked)?;
                    carried += linked.weight_of(neuron)? * linked.error();
                }
                Ok(logistic_derivative(neuron.sum(upstream)) * carried)
            })
            .collect::<Result<Vec<f64>>>()?;

        for (neuron, &error) in self.neurons.iter_mut().zip(&errors) {
            neuron.set_error(error);
        }
        Ok(errors)
    }

    /// Output-layer error for one example whose input is already fed.
    ///
    /// Every neuron shares the same distance term between the softmax output
    /// and the target, scaled by its own `σ'(sum)`.
    pub fn output_error_for(&mut self, upstream: &[Layer], example: &Example) -> Result<Vec<f64>> {
        if example.target.len() != self.neurons.len() {
            return Err(NetworkError::TargetShapeMismatch {
                expected: self.neurons.len(),
                got: example.target.len(),
            });
        }
        let gap = distance(&self.normalized_output(upstream), &example.target);
        let errors: Vec<f64> = self.neurons.iter()
            .map(|n| gap * logistic_derivative(n.sum(upstream)))
            .collect();

        for (neuron, &error) in self.neurons.iter_mut().zip(&errors) {
            neuron.set_error(error);
        }
        Ok(errors)
    }

    /// Feeds each example through `upstream[0]`, computes its output error,
    /// and leaves the component-wise mean on the neurons.
    pub fn output_error_for_batch(&mut self, upstream: &mut [Layer], examples: &[Example]) -> Result<Vec<f64>> {
        if examples.is_empty() {
            return Err(NetworkError::EmptyBatch);
        }
        let mut totals = vec![0.0; self.neurons.len()];
        for example in examples {
            let input_layer = upstream.first_mut()
                .ok_or_else(|| NetworkError::InvalidTopology("output layer has no input layer".into()))?;
            input_layer.feed(&example.input)?;
            let errors = self.output_error_for(upstream, example)?;
            for (total, error) in totals.iter_mut().zip(errors) {
                *total += error;
            }
        }

        let count = examples.len() as f64;
        let averaged: Vec<f64> = totals.into_iter().map(|t| t / count).collect();
        for (neuron, &error) in self.neurons.iter_mut().zip(&averaged) {
            neuron.set_error(error);
        }
        Ok(averaged)
    }

    /// Applies one update to every weighted-sum neuron from its stored error.
    pub fn apply_gradients(&mut self, upstream: &[Layer], step_size: f64) {
        for neuron in &mut self.neurons {
            if let Some(n) = neuron.as_weighted_sum_mut() {
                n.apply_update(upstream, step_size);
            }
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Layer with {} neurons.", self.neurons.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn two_layers(inputs: usize, outputs: usize) -> Vec<Layer> {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut first = Layer::constants(inputs, 0.0);
        let second = Layer::weighted_sum(outputs, &mut first, &mut rng);
        vec![first, second]
    }

    #[test]
    fn builders_number_layers_and_neurons() {
        let layers = two_layers(3, 2);
        assert_eq!(layers[0].index(), 0);
        assert_eq!(layers[1].index(), 1);
        assert_eq!(layers[1].neurons()[1].id(), NeuronId::new(1, 1));
        assert!(layers[0].neurons().iter().all(Neuron::is_constant));
        for n in layers[1].neurons() {
            assert_eq!(n.as_weighted_sum().unwrap().inputs().len(), 3);
        }
    }

    #[test]
    fn feed_checks_length() {
        let mut layer = Layer::constants(4, 0.0);
        assert!(matches!(
            layer.feed(&[1.0, 2.0]),
            Err(NetworkError::InputShapeMismatch { expected: 4, got: 2 })
        ));
        layer.feed(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(layer.outputs(&[]), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn normalized_output_is_a_distribution() {
        let mut layers = two_layers(3, 2);
        layers[0].feed(&[1.0, 0.0, 1.0]).unwrap();
        let (upstream, rest) = layers.split_at(1);
        let out = rest[0].normalized_output(upstream);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|&p| p > 0.0 && p < 1.0));
        assert!((out.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn normalized_output_sees_new_input() {
        let mut layers = two_layers(2, 2);
        let before = {
            let (upstream, rest) = layers.split_at(1);
            rest[0].normalized_output(upstream)
        };
        layers[0].feed(&[5.0, -3.0]).unwrap();
        let (upstream, rest) = layers.split_at(1);
        assert_ne!(rest[0].normalized_output(upstream), before);
    }

    #[test]
    fn output_error_uses_shared_distance() {
        let mut layers = two_layers(2, 2);
        layers[0].feed(&[0.0, 0.0]).unwrap();
        let (upstream, rest) = layers.split_at_mut(1);
        let example = Example::new(vec![0.0, 0.0], vec![1.0, 0.0]);
        let errors = rest[0].output_error_for(upstream, &example).unwrap();

        // zero input: every sum is 0, both outputs 0.5, softmax [0.5, 0.5]
        let expected = 0.5f64.sqrt() * 0.25;
        assert!((errors[0] - expected).abs() < 1e-12);
        assert!((errors[1] - expected).abs() < 1e-12);
        assert_eq!(rest[0].neurons()[0].error(), errors[0]);
    }

    #[test]
    fn output_error_rejects_wrong_target() {
        let mut layers = two_layers(2, 2);
        let (upstream, rest) = layers.split_at_mut(1);
        let example = Example::new(vec![0.0, 0.0], vec![1.0, 0.0, 0.0]);
        assert!(matches!(
            rest[0].output_error_for(upstream, &example),
            Err(NetworkError::TargetShapeMismatch { expected: 2, got: 3 })
        ));
    }

    #[test]
    fn batch_error_is_the_mean_of_single_errors() {
        let mut layers = two_layers(2, 2);
        let batch = vec![
            Example::new(vec![1.0, 0.0], vec![1.0, 0.0]),
            Example::new(vec![0.0, 1.0], vec![0.0, 1.0]),
        ];

        let mut singles = Vec::new();
        for example in &batch {
            layers[0].feed(&example.input).unwrap();
            let (upstream, rest) = layers.split_at_mut(1);
            singles.push(rest[0].output_error_for(upstream, example).unwrap());
        }

        let (upstream, rest) = layers.split_at_mut(1);
        let averaged = rest[0].output_error_for_batch(upstream, &batch).unwrap();
        for i in 0..2 {
            let mean = (singles[0][i] + singles[1][i]) / 2.0;
            assert!((averaged[i] - mean).abs() < 1e-12);
            assert_eq!(rest[0].neurons()[i].error(), averaged[i]);
        }
        assert!(matches!(rest[0].output_error_for_batch(upstream, &[]), Err(NetworkError::EmptyBatch)));
    }

    #[test]
    fn propagate_error_walks_forward_links() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut first = Layer::constants(2, 0.0);
        let mut hidden = Layer::weighted_sum(2, &mut first, &mut rng);
        let mut last = Layer::weighted_sum(2, &mut hidden, &mut rng);
        first.feed(&[1.0, 0.0]).unwrap();
        last.neurons_mut()[0].set_error(0.3);
        last.neurons_mut()[1].set_error(-0.1);

        let upstream = [first];
        let errors = hidden.propagate_error(&upstream, &last).unwrap();

        for (i, neuron) in hidden.neurons().iter().enumerate() {
            let carried: f64 = last.neurons().iter()
                .map(|l| l.weight_of(neuron).unwrap() * l.error())
                .sum();
            let expected = logistic_derivative(neuron.sum(&upstream)) * carried;
            assert!((errors[i] - expected).abs() < 1e-12);
            assert_eq!(neuron.error(), errors[i]);
        }
    }

    #[test]
    fn propagate_error_reports_missing_downstream_neuron() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let mut first = Layer::constants(2, 0.0);
        let mut hidden = Layer::weighted_sum(2, &mut first, &mut rng);
        let _last = Layer::weighted_sum(2, &mut hidden, &mut rng);
        // a one-neuron layer 2 lacks 2:1, which every hidden neuron links to
        let short = Layer::weighted_sum(1, &mut hidden.clone(), &mut rng);

        let upstream = [first];
        assert!(matches!(
            hidden.propagate_error(&upstream, &short),
            Err(NetworkError::NotLinked)
        ));
        assert!(hidden.neurons().iter().all(|n| n.error() == 0.0));
    }

    #[test]
    fn propagate_error_on_inputs_is_zero() {
        let mut layers = two_layers(3, 2);
        let (head, tail) = layers.split_at_mut(1);
        let errors = head[0].propagate_error(&[], &tail[0]).unwrap();
        assert_eq!(errors, vec![0.0; 3]);
    }

    #[test]
    fn display_counts_neurons() {
        assert_eq!(Layer::constants(8, 0.0).to_string(), "Layer with 8 neurons.");
    }
}
