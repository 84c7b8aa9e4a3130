//! Ready-made networks for the 8-bit parity task.

use rand::Rng;

use crate::error::Result;
use crate::network::network::Network;
use crate::network::topology::Topology;

/// `[8, 2]`: eight input constants feeding two logistic outputs.
pub fn default_network<R: Rng + ?Sized>(rng: &mut R) -> Result<Network> {
    Topology::default().build(rng)
}

/// The default network with hand-set output weights that only look at the
/// two lowest bits (input indices 6 and 7). Output 0 (odd) gets -1 on index 6
/// and +1 on index 7, output 1 (even) the mirror image; every other weight
/// and both biases are zero.
pub fn parity_detector<R: Rng + ?Sized>(rng: &mut R) -> Result<Network> {
    let mut network = default_network(rng)?;
    let wiring = [(-1.0, 1.0), (1.0, -1.0)];
    for (index, (second_lowest, lowest)) in wiring.into_iter().enumerate() {
        if let Some(n) = network.weighted_sum_mut(1, index) {
            for i in 0..n.inputs().len() {
                n.set_weight(i, 0.0)?;
            }
            n.set_weight(6, second_lowest)?;
            n.set_weight(7, lowest)?;
            n.set_bias(0.0);
        }
    }
    Ok(network)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::parity::{encode, Parity};

    #[test]
    fn detector_is_wired_as_documented() {
        let network = parity_detector(&mut rand::thread_rng()).unwrap();
        let odd = network.last_layer().neurons()[0].as_weighted_sum().unwrap();
        assert_eq!(odd.weights(), vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -1.0, 1.0]);
        let even = network.last_layer().neurons()[1].as_weighted_sum().unwrap();
        assert_eq!(even.weights(), vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, -1.0]);
    }

    #[test]
    fn detector_reads_low_bits() {
        let mut network = parity_detector(&mut rand::thread_rng()).unwrap();
        for n in [2u8, 6, 62] {
            let out = network.evaluate(&encode(n).input).unwrap();
            assert_eq!(Parity::from_output(&out), Parity::Even, "{n}");
        }
        for n in [1u8, 63, 65] {
            let out = network.evaluate(&encode(n).input).unwrap();
            assert_eq!(Parity::from_output(&out), Parity::Odd, "{n}");
        }
    }
}
