use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{NetworkError, Result};
use crate::layers::dense::Layer;
use crate::network::network::Network;

/// Layer sizes of a network to build, input layer first.
///
/// The first entry becomes a layer of constant neurons holding
/// `default_input`; every later entry becomes a layer of weighted-sum
/// neurons fully connected to the one before it. Only the shape is stored,
/// never trained parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topology {
    /// Human-readable label, only used in logs.
    #[serde(default = "default_name")]
    pub name: String,
    pub layers: Vec<usize>,
    #[serde(default)]
    pub default_input: f64,
}

fn default_name() -> String {
    "parity".to_string()
}

impl Default for Topology {
    fn default() -> Topology {
        Topology {
            name: default_name(),
            layers: vec![8, 2],
            default_input: 0.0,
        }
    }
}

impl Topology {
    /// Builds and links every layer. Weights start uniform in `[0, 1)`,
    /// biases at zero.
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Network> {
        let (&inputs, hidden_and_output) = self.layers.split_first()
            .ok_or_else(|| NetworkError::InvalidTopology("no layers given".into()))?;

        let mut layers = vec![Layer::constants(inputs, self.default_input)];
        for &size in hidden_and_output {
            let previous = layers.last_mut()
                .ok_or_else(|| NetworkError::InvalidTopology("no layers given".into()))?;
            let layer = Layer::weighted_sum(size, previous, rng);
            layers.push(layer);
        }
        log::debug!("built topology '{}' with layers {:?}", self.name, self.layers);
        Network::new(layers)
    }

    /// Serializes the topology to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a `Topology` from a JSON file.
    pub fn load_json(path: &str) -> Result<Topology> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}
