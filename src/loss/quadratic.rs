pub struct QuadraticCost;

impl QuadraticCost {
    /// Squared Euclidean distance between one prediction and its target.
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        predicted.iter().zip(expected.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum()
    }

    /// `Σ ||y - a||² / 2n` over matching prediction/target pairs.
    pub fn cost(predicted: &[Vec<f64>], expected: &[Vec<f64>]) -> f64 {
        let n = predicted.len() as f64;
        predicted.iter().zip(expected.iter())
            .map(|(a, b)| QuadraticCost::loss(a, b))
            .sum::<f64>() / (2.0 * n)
    }
}
