pub mod activation;
pub mod data;
pub mod error;
pub mod layers;
pub mod loss;
pub mod network;
pub mod neuron;
pub mod optim;
pub mod train;

// Convenience re-exports
pub use activation::activation::{distance, logistic, logistic_derivative};
pub use data::example::Example;
pub use error::{NetworkError, Result};
pub use layers::dense::Layer;
pub use network::network::{Evaluation, Network, OUTPUT_WIDTH};
pub use network::topology::Topology;
pub use neuron::{Neuron, NeuronId};
pub use optim::sgd::Sgd;
pub use train::{TrainConfig, TrainStats};
