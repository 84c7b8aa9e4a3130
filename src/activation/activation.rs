use std::f64::consts::E;

/// Logistic squashing function, `1 / (1 + e^-x)`.
pub fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + E.powf(-x))
}

/// First derivative of `logistic`, written as `e^x / (e^x + 1)^2`.
///
/// Very large inputs saturate to NaN or 0 under plain float rules; callers
/// get whatever IEEE arithmetic gives them.
pub fn logistic_derivative(x: f64) -> f64 {
    let ex = E.powf(x);
    ex / (ex + 1.0).powi(2)
}

/// Euclidean distance between two equal-length vectors.
pub fn distance(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}
