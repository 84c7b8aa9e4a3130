use serde::{Deserialize, Serialize};

/// Summary of one `Network::train` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainStats {
    /// Minibatches that produced a parameter update.
    pub minibatches: usize,
    /// Examples that ended up in one of those minibatches.
    pub examples_used: usize,
    /// Trailing examples that did not fill a whole minibatch after shuffling.
    pub examples_dropped: usize,
    /// Step size after the last decay; the next `train` call starts fresh.
    pub final_step_size: f64,
}
