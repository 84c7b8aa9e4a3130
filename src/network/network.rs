use std::fmt;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::data::example::Example;
use crate::error::{NetworkError, Result};
use crate::layers::dense::Layer;
use crate::loss::quadratic::QuadraticCost;
use crate::neuron::{NeuronId, WeightedSumNeuron};
use crate::train::train_config::TrainConfig;

/// Number of output classes the cost and output-error steps support.
pub const OUTPUT_WIDTH: usize = 2;

/// Result of evaluating a labeled batch.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub outputs: Vec<Vec<f64>>,
    pub cost: f64,
}

/// A strictly layered graph of neurons: layer 0 holds constants that receive
/// the input, every later layer holds weighted-sum neurons fed only by the
/// layer right before it, and the last layer has `OUTPUT_WIDTH` neurons.
///
/// Not meant to be shared: evaluation and training both mutate the graph in
/// place, so one owner drives it at a time.
pub struct Network {
    pub(crate) layers: Vec<Layer>,
    last_evaluation_set: Option<Vec<Example>>,
    pub(crate) config: TrainConfig,
    pub(crate) rng: ChaCha8Rng,
}

impl Network {
    /// Wraps already-linked layers, checking the layering invariants.
    pub fn new(layers: Vec<Layer>) -> Result<Network> {
        validate(&layers)?;
        Ok(Network {
            layers,
            last_evaluation_set: None,
            config: TrainConfig::default(),
            rng: ChaCha8Rng::from_entropy(),
        })
    }

    /// Replaces the training configuration; a configured seed reseeds the
    /// shuffling RNG.
    pub fn with_config(mut self, config: TrainConfig) -> Network {
        if let Some(seed) = config.seed {
            self.rng = ChaCha8Rng::seed_from_u64(seed);
        }
        self.config = config;
        self
    }

    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn first_layer(&self) -> &Layer {
        &self.layers[0]
    }

    pub fn last_layer(&self) -> &Layer {
        &self.layers[self.layers.len() - 1]
    }

    /// Parameter access to one weighted-sum neuron, e.g. for hand-set weights.
    ///
    /// Only weights and bias can change through it; the wiring checked by
    /// `Network::new` stays as it is.
    pub fn weighted_sum_mut(&mut self, layer: usize, index: usize) -> Option<&mut WeightedSumNeuron> {
        self.layers.get_mut(layer)?
            .neurons_mut()
            .get_mut(index)?
            .as_weighted_sum_mut()
    }

    /// Loads `input` into the input layer without evaluating.
    ///
    /// Cached outputs are left alone until the next `reset` or `evaluate`.
    pub fn feed(&mut self, input: &[f64]) -> Result<()> {
        self.layers[0].feed(input)
    }

    /// Clears every cached output in the network, one layer at a time.
    pub fn reset(&self) {
        for layer in &self.layers {
            layer.clear_caches();
        }
    }

    /// Raw activations of the output layer for whatever input is loaded.
    pub fn raw_output(&self) -> Vec<f64> {
        let (upstream, last) = self.layers.split_at(self.layers.len() - 1);
        last[0].outputs(upstream)
    }

    /// Runs one input through the network and returns the output distribution.
    pub fn evaluate(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        self.layers[0].feed(input)?;
        let (upstream, last) = self.layers.split_at(self.layers.len() - 1);
        Ok(last[0].normalized_output(upstream))
    }

    /// Evaluates every example and remembers the batch so `cost` can be asked later.
    pub fn evaluate_batch(&mut self, batch: &[Example]) -> Result<Evaluation> {
        self.check_examples(batch)?;
        if batch.is_empty() {
            return Err(NetworkError::EmptyBatch);
        }
        self.last_evaluation_set = Some(batch.to_vec());
        let outputs = batch.iter()
            .map(|example| self.evaluate(&example.input))
            .collect::<Result<Vec<_>>>()?;
        let cost = self.cost()?;
        Ok(Evaluation { outputs, cost })
    }

    /// Halved mean squared error over the last evaluated batch, against the
    /// current parameters.
    pub fn cost(&mut self) -> Result<f64> {
        let examples = self.last_evaluation_set.clone().ok_or(NetworkError::NoEvaluationYet)?;
        let mut predicted = Vec::with_capacity(examples.len());
        for example in &examples {
            predicted.push(self.evaluate(&example.input)?);
        }
        let expected: Vec<Vec<f64>> = examples.into_iter().map(|e| e.target).collect();
        Ok(QuadraticCost::cost(&predicted, &expected))
    }

    pub(crate) fn check_examples(&self, batch: &[Example]) -> Result<()> {
        let inputs = self.first_layer().len();
        let outputs = self.last_layer().len();
        for example in batch {
            if example.input.len() != inputs {
                return Err(NetworkError::InputShapeMismatch { expected: inputs, got: example.input.len() });
            }
            if example.target.len() != outputs {
                return Err(NetworkError::TargetShapeMismatch { expected: outputs, got: example.target.len() });
            }
        }
        Ok(())
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sizes: Vec<String> = self.layers.iter().map(|l| l.len().to_string()).collect();
        write!(f, "Network with {} layers: {}", self.layers.len(), sizes.join(" "))
    }
}

fn validate(layers: &[Layer]) -> Result<()> {
    let invalid = |msg: String| Err(NetworkError::InvalidTopology(msg));

    if layers.len() < 2 {
        return invalid(format!("need at least 2 layers, got {}", layers.len()));
    }
    let width = layers[layers.len() - 1].len();
    if width != OUTPUT_WIDTH {
        return invalid(format!("output layer must have {OUTPUT_WIDTH} neurons, got {width}"));
    }

    for (k, layer) in layers.iter().enumerate() {
        if layer.index() != k {
            return invalid(format!("layer at position {k} is numbered {}", layer.index()));
        }
        if layer.is_empty() {
            return invalid(format!("layer {k} is empty"));
        }
        for (i, neuron) in layer.neurons().iter().enumerate() {
            if neuron.id() != NeuronId::new(k, i) {
                return invalid(format!("neuron {} sits at {k}:{i}", neuron.id()));
            }
            match (k, neuron.as_weighted_sum()) {
                (0, None) => {}
                (0, Some(_)) => return invalid("input layer may only hold constants".into()),
                (_, None) => return invalid(format!("layer {k} may only hold weighted-sum neurons")),
                (_, Some(n)) => {
                    let previous = &layers[k - 1];
                    if let Some(s) = n.inputs().iter().find(|s| previous.neuron_at(s.source).is_none()) {
                        return invalid(format!("neuron {} reads {} outside layer {}", n.id(), s.source, k - 1));
                    }
                }
            }
        }
    }

    // every neuron past the input layer lists exactly the neurons that read it
    for (k, layer) in layers.iter().enumerate().skip(1) {
        for neuron in layer.neurons() {
            let mut readers: Vec<NeuronId> = match layers.get(k + 1) {
                Some(next) => next.neurons().iter()
                    .filter(|n| {
                        n.as_weighted_sum()
                            .map_or(false, |w| w.inputs().iter().any(|s| s.source == neuron.id()))
                    })
                    .map(|n| n.id())
                    .collect(),
                None => Vec::new(),
            };
            let mut linked = neuron.linked_neurons().to_vec();
            readers.sort();
            linked.sort();
            if linked != readers {
                return invalid(format!(
                    "neuron {} links to {:?} but is read by {:?}",
                    neuron.id(), linked, readers
                ));
            }
        }
    }
    Ok(())
}
