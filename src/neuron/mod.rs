pub mod constant;
pub mod neuron;
pub mod weighted_sum;

pub use constant::ConstantNeuron;
pub use neuron::{Neuron, NeuronId};
pub use weighted_sum::{Synapse, WeightedSumNeuron};
