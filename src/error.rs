use thiserror::Error;

/// Result type for this library.
pub type Result<T> = std::result::Result<T, NetworkError>;

/// Everything that can go wrong while building, evaluating or training a network.
///
/// All of these are contract violations (wrong-shaped data or a malformed
/// topology), so none of them is worth retrying.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("input has {got} values but the input layer has {expected} neurons")]
    InputShapeMismatch { expected: usize, got: usize },

    #[error("target has {got} values but the output layer has {expected} neurons")]
    TargetShapeMismatch { expected: usize, got: usize },

    #[error("cost requested before any batch was evaluated")]
    NoEvaluationYet,

    #[error("neuron is not of the kind this operation needs")]
    NeuronKindMismatch,

    #[error("neuron is not linked to the queried neuron")]
    NotLinked,

    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    #[error("invalid training configuration: {0}")]
    InvalidConfig(String),

    #[error("batch is empty")]
    EmptyBatch,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
