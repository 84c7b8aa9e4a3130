use std::cell::Cell;

use rand::Rng;

use crate::activation::activation::logistic;
use crate::error::{NetworkError, Result};
use crate::layers::dense::Layer;
use super::neuron::{resolve, Neuron, NeuronId};

/// One incoming edge: the predecessor it reads from and the weight on it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Synapse {
    pub source: NeuronId,
    pub weight: f64,
}

impl Synapse {
    pub fn new(source: NeuronId, weight: f64) -> Synapse {
        Synapse { source, weight }
    }
}

/// Logistic neuron over a weighted sum of its predecessors' outputs.
///
/// `output()` is memoized in a `Cell` so a forward pass costs one activation
/// per neuron no matter how many consumers read it. The cache stays valid
/// until `reset`/`clear_cache`, or until this neuron's own weights or bias change.
#[derive(Debug, Clone)]
pub struct WeightedSumNeuron {
    id: NeuronId,
    inputs: Vec<Synapse>,
    bias: f64,
    pub error: f64,
    linked: Vec<NeuronId>,
    cached_output: Cell<Option<f64>>,
}

impl WeightedSumNeuron {
    pub fn new(id: NeuronId, inputs: Vec<Synapse>, bias: f64) -> WeightedSumNeuron {
        WeightedSumNeuron {
            id,
            inputs,
            bias,
            error: 0.0,
            linked: Vec::new(),
            cached_output: Cell::new(None),
        }
    }

    /// Connects a new neuron to every neuron of `previous` with weights drawn
    /// from `[0, 1)` and a zero bias, and registers it on each predecessor's
    /// link list.
    pub fn link_from<R: Rng + ?Sized>(id: NeuronId, previous: &mut Layer, rng: &mut R) -> WeightedSumNeuron {
        let inputs = previous.neurons().iter()
            .map(|n| Synapse::new(n.id(), rng.gen::<f64>()))
            .collect();
        for n in previous.neurons_mut() {
            n.add_link(id);
        }
        WeightedSumNeuron::new(id, inputs, 0.0)
    }

    pub fn id(&self) -> NeuronId {
        self.id
    }

    pub fn inputs(&self) -> &[Synapse] {
        &self.inputs
    }

    pub fn weights(&self) -> Vec<f64> {
        self.inputs.iter().map(|s| s.weight).collect()
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    pub fn set_bias(&mut self, bias: f64) {
        self.bias = bias;
        self.clear_cache();
    }

    /// Overwrites the weight on the `index`-th incoming edge.
    pub fn set_weight(&mut self, index: usize, weight: f64) -> Result<()> {
        let synapse = self.inputs.get_mut(index).ok_or(NetworkError::NotLinked)?;
        synapse.weight = weight;
        self.clear_cache();
        Ok(())
    }

    pub fn linked_neurons(&self) -> &[NeuronId] {
        &self.linked
    }

    pub(crate) fn add_link(&mut self, downstream: NeuronId) {
        self.linked.push(downstream);
    }

    /// `Σ w_i * out_i - bias`
    pub fn sum(&self, upstream: &[Layer]) -> f64 {
        let weighted: f64 = self.inputs.iter()
            .map(|s| {
                let (source, source_upstream) = resolve(upstream, s.source);
                s.weight * source.output(source_upstream)
            })
            .sum();
        weighted - self.bias
    }

    pub fn output(&self, upstream: &[Layer]) -> f64 {
        if let Some(cached) = self.cached_output.get() {
            return cached;
        }
        let out = logistic(self.sum(upstream));
        self.cached_output.set(Some(out));
        out
    }

    pub fn clear_cache(&self) {
        self.cached_output.set(None);
    }

    /// Invalidates this neuron and, in one sweep, every layer feeding it.
    pub fn reset(&self, upstream: &[Layer]) {
        for layer in upstream {
            layer.clear_caches();
        }
        self.clear_cache();
    }

    pub fn weight_of(&self, candidate: &Neuron) -> Result<f64> {
        let candidate = candidate.as_weighted_sum().ok_or(NetworkError::NeuronKindMismatch)?;
        self.inputs.iter()
            .find(|s| s.source == candidate.id)
            .map(|s| s.weight)
            .ok_or(NetworkError::NotLinked)
    }

    /// One gradient step on this neuron's parameters using its current error:
    /// `bias -= step * error`, `w_i -= step * out_i * error`.
    pub fn apply_update(&mut self, upstream: &[Layer], step_size: f64) {
        let error = self.error;
        self.bias -= step_size * error;
        for s in &mut self.inputs {
            let (source, source_upstream) = resolve(upstream, s.source);
            s.weight -= step_size * source.output(source_upstream) * error;
        }
        self.clear_cache();
    }
}
