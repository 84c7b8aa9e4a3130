pub mod network;
pub mod presets;
pub mod topology;

pub use network::{Evaluation, Network, OUTPUT_WIDTH};
pub use topology::Topology;
