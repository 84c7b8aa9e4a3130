use serde::{Deserialize, Serialize};

use crate::error::{NetworkError, Result};

/// Hyperparameters for `Network::train`.
///
/// # Fields
/// - `step_size`  — learning rate at the start of every `train` call
/// - `decay`      — multiplier applied to the step size after each minibatch
/// - `batch_size` — examples per minibatch
/// - `iterations` — how many `train` calls a driver (the CLI) makes
/// - `seed`       — fixes the shuffling RNG when set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub step_size: f64,
    pub decay: f64,
    pub batch_size: usize,
    pub iterations: usize,
    pub seed: Option<u64>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            step_size: 0.1,
            decay: 0.95,
            batch_size: 10,
            iterations: 25,
            seed: None,
        }
    }
}

impl TrainConfig {
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(NetworkError::InvalidConfig("batch_size must be at least 1".into()));
        }
        if !(self.step_size.is_finite() && self.step_size > 0.0) {
            return Err(NetworkError::InvalidConfig(format!("step_size must be positive, got {}", self.step_size)));
        }
        if !(self.decay > 0.0 && self.decay <= 1.0) {
            return Err(NetworkError::InvalidConfig(format!("decay must be in (0, 1], got {}", self.decay)));
        }
        Ok(())
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a `TrainConfig` from a JSON file; missing fields take defaults.
    pub fn load_json(path: &str) -> Result<TrainConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: TrainConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }
}
