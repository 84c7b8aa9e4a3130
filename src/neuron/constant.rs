use super::neuron::NeuronId;

/// A neuron whose output is set from outside; used to inject input data.
///
/// It has no upstream dependencies, so it never caches, never carries an
/// error and never records which neurons read from it.
#[derive(Debug, Clone)]
pub struct ConstantNeuron {
    id: NeuronId,
    pub amount: f64,
}

impl ConstantNeuron {
    pub fn new(id: NeuronId, amount: f64) -> ConstantNeuron {
        ConstantNeuron { id, amount }
    }

    pub fn id(&self) -> NeuronId {
        self.id
    }

    pub fn output(&self) -> f64 {
        self.amount
    }

    pub fn sum(&self) -> f64 {
        self.amount
    }
}
