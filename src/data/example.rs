use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One labeled sample: what goes into the input layer and what the output
/// layer should produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub input: Vec<f64>,
    pub target: Vec<f64>,
}

impl Example {
    pub fn new(input: Vec<f64>, target: Vec<f64>) -> Example {
        Example { input, target }
    }

    /// Writes a dataset as a pretty-printed JSON array.
    pub fn save_all(examples: &[Example], path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, examples)?;
        Ok(())
    }

    /// Reads a dataset written by `save_all` (or by hand).
    pub fn load_all(path: &str) -> Result<Vec<Example>> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}
