use std::fmt;

use crate::error::{NetworkError, Result};
use crate::layers::dense::Layer;
use super::constant::ConstantNeuron;
use super::weighted_sum::WeightedSumNeuron;

/// Position of a neuron inside a network: layer index plus index within the layer.
///
/// Neurons refer to each other only through these handles, never by owning
/// or borrowing one another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NeuronId {
    pub layer: usize,
    pub index: usize,
}

impl NeuronId {
    pub fn new(layer: usize, index: usize) -> NeuronId {
        NeuronId { layer, index }
    }
}

impl fmt::Display for NeuronId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.layer, self.index)
    }
}

/// Looks up `id` among `upstream` and returns it together with the layers
/// that feed it.
pub(crate) fn resolve(upstream: &[Layer], id: NeuronId) -> (&Neuron, &[Layer]) {
    (&upstream[id.layer].neurons()[id.index], &upstream[..id.layer])
}

/// One computational unit of the graph.
///
/// Every operation takes `upstream`, the layers that come before this
/// neuron's own layer (`&layers[..id.layer]`), because predecessors are
/// addressed by `NeuronId`.
#[derive(Debug, Clone)]
pub enum Neuron {
    Constant(ConstantNeuron),
    WeightedSum(WeightedSumNeuron),
}

impl Neuron {
    pub fn id(&self) -> NeuronId {
        match self {
            Neuron::Constant(n) => n.id(),
            Neuron::WeightedSum(n) => n.id(),
        }
    }

    pub fn output(&self, upstream: &[Layer]) -> f64 {
        match self {
            Neuron::Constant(n) => n.output(),
            Neuron::WeightedSum(n) => n.output(upstream),
        }
    }

    pub fn sum(&self, upstream: &[Layer]) -> f64 {
        match self {
            Neuron::Constant(n) => n.sum(),
            Neuron::WeightedSum(n) => n.sum(upstream),
        }
    }

    /// Drops this neuron's cached output and every cache it depends on.
    pub fn reset(&self, upstream: &[Layer]) {
        match self {
            Neuron::Constant(_) => {}
            Neuron::WeightedSum(n) => n.reset(upstream),
        }
    }

    /// Drops this neuron's own cached output only.
    pub fn clear_cache(&self) {
        if let Neuron::WeightedSum(n) = self {
            n.clear_cache();
        }
    }

    pub fn error(&self) -> f64 {
        match self {
            Neuron::Constant(_) => 0.0,
            Neuron::WeightedSum(n) => n.error,
        }
    }

    /// Constants ignore the write; their error is always 0.
    pub fn set_error(&mut self, error: f64) {
        if let Neuron::WeightedSum(n) = self {
            n.error = error;
        }
    }

    /// Neurons in the next layer that read this neuron's output.
    pub fn linked_neurons(&self) -> &[NeuronId] {
        match self {
            Neuron::Constant(_) => &[],
            Neuron::WeightedSum(n) => n.linked_neurons(),
        }
    }

    pub(crate) fn add_link(&mut self, downstream: NeuronId) {
        if let Neuron::WeightedSum(n) = self {
            n.add_link(downstream);
        }
    }

    /// Weight this neuron gives to `candidate`. Constants have no weights and answer 0.
    pub fn weight_of(&self, candidate: &Neuron) -> Result<f64> {
        match self {
            Neuron::Constant(_) => Ok(0.0),
            Neuron::WeightedSum(n) => n.weight_of(candidate),
        }
    }

    pub fn set_amount(&mut self, amount: f64) -> Result<()> {
        match self {
            Neuron::Constant(n) => {
                n.amount = amount;
                Ok(())
            }
            Neuron::WeightedSum(_) => Err(NetworkError::NeuronKindMismatch),
        }
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, Neuron::Constant(_))
    }

    pub fn as_weighted_sum(&self) -> Option<&WeightedSumNeuron> {
        match self {
            Neuron::WeightedSum(n) => Some(n),
            Neuron::Constant(_) => None,
        }
    }

    pub fn as_weighted_sum_mut(&mut self) -> Option<&mut WeightedSumNeuron> {
        match self {
            Neuron::WeightedSum(n) => Some(n),
            Neuron::Constant(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neuron::weighted_sum::Synapse;

    fn constant(index: usize, amount: f64) -> Neuron {
        Neuron::Constant(ConstantNeuron::new(NeuronId::new(0, index), amount))
    }

    #[test]
    fn constant_ignores_error_and_links() {
        let mut n = constant(0, 1.5);
        n.set_error(3.0);
        n.add_link(NeuronId::new(1, 0));
        assert_eq!(n.error(), 0.0);
        assert!(n.linked_neurons().is_empty());
        assert_eq!(n.output(&[]), 1.5);
        assert_eq!(n.sum(&[]), 1.5);
    }

    #[test]
    fn constant_weight_of_is_zero() {
        let n = constant(0, 1.0);
        let other = constant(1, 2.0);
        assert_eq!(n.weight_of(&other).unwrap(), 0.0);
    }

    #[test]
    fn weight_of_rejects_constant_candidate() {
        let sink = Neuron::WeightedSum(WeightedSumNeuron::new(
            NeuronId::new(1, 0),
            vec![Synapse::new(NeuronId::new(0, 0), 0.5)],
            0.0,
        ));
        let source = constant(0, 1.0);
        assert!(matches!(sink.weight_of(&source), Err(NetworkError::NeuronKindMismatch)));
    }

    #[test]
    fn weight_of_finds_linked_weighted_sum() {
        let hidden = Neuron::WeightedSum(WeightedSumNeuron::new(NeuronId::new(1, 1), vec![], 0.0));
        let stranger = Neuron::WeightedSum(WeightedSumNeuron::new(NeuronId::new(1, 2), vec![], 0.0));
        let sink = Neuron::WeightedSum(WeightedSumNeuron::new(
            NeuronId::new(2, 0),
            vec![
                Synapse::new(NeuronId::new(1, 0), 0.1),
                Synapse::new(NeuronId::new(1, 1), -0.7),
            ],
            0.0,
        ));
        assert_eq!(sink.weight_of(&hidden).unwrap(), -0.7);
        assert!(matches!(sink.weight_of(&stranger), Err(NetworkError::NotLinked)));
    }

    #[test]
    fn set_amount_only_on_constants() {
        let mut c = constant(0, 0.0);
        c.set_amount(4.0).unwrap();
        assert_eq!(c.output(&[]), 4.0);

        let mut w = Neuron::WeightedSum(WeightedSumNeuron::new(NeuronId::new(1, 0), vec![], 0.0));
        assert!(matches!(w.set_amount(1.0), Err(NetworkError::NeuronKindMismatch)));
    }
}
