use std::fmt;

use super::example::Example;

/// Input width of a parity example: one value per bit of a `u8`.
pub const INPUT_BITS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    Odd,
    Even,
}

impl Parity {
    pub fn of(n: u8) -> Parity {
        if n % 2 == 0 { Parity::Even } else { Parity::Odd }
    }

    /// One-hot target: index 0 is odd, index 1 is even.
    pub fn target(self) -> Vec<f64> {
        match self {
            Parity::Odd => vec![1.0, 0.0],
            Parity::Even => vec![0.0, 1.0],
        }
    }

    /// Reads a two-class distribution the same way `target` writes it.
    pub fn from_output(output: &[f64]) -> Parity {
        match output {
            [odd, even] if even > odd => Parity::Even,
            _ => Parity::Odd,
        }
    }
}

impl fmt::Display for Parity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parity::Odd => write!(f, "odd"),
            Parity::Even => write!(f, "even"),
        }
    }
}

/// Bits of `n`, most significant first, labeled with its parity.
pub fn encode(n: u8) -> Example {
    let input = (0..INPUT_BITS)
        .rev()
        .map(|shift| f64::from((n >> shift) & 1))
        .collect();
    Example::new(input, Parity::of(n).target())
}

/// Every `u8`, encoded.
pub fn dataset() -> Vec<Example> {
    (0..=u8::MAX).map(encode).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_msb_first() {
        let two = encode(2);
        assert_eq!(two.input, vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
        assert_eq!(two.target, vec![0.0, 1.0]);

        let odd = encode(129);
        assert_eq!(odd.input, vec![1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0]);
        assert_eq!(odd.target, vec![1.0, 0.0]);
    }

    #[test]
    fn dataset_covers_every_byte() {
        let data = dataset();
        assert_eq!(data.len(), 256);
        let evens = data.iter().filter(|e| e.target == Parity::Even.target()).count();
        assert_eq!(evens, 128);
    }

    #[test]
    fn reads_back_outputs() {
        assert_eq!(Parity::from_output(&[0.2, 0.8]), Parity::Even);
        assert_eq!(Parity::from_output(&[0.7, 0.3]), Parity::Odd);
        assert_eq!(Parity::Even.to_string(), "even");
    }
}
