pub mod activation;

pub use activation::{distance, logistic, logistic_derivative};
