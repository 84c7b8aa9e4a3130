use crate::layers::dense::Layer;

/// Plain gradient descent with a step size that shrinks after every minibatch.
pub struct Sgd {
    pub step_size: f64,
    pub decay: f64,
}

impl Sgd {
    pub fn new(step_size: f64, decay: f64) -> Sgd {
        Sgd { step_size, decay }
    }

    /// Updates every weighted-sum neuron from its stored error, input side first.
    pub fn step(&self, layers: &mut [Layer]) {
        for k in 0..layers.len() {
            let (upstream, rest) = layers.split_at_mut(k);
            rest[0].apply_gradients(upstream, self.step_size);
        }
    }

    pub fn decay(&mut self) {
        self.step_size *= self.decay;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decay_is_geometric() {
        let mut sgd = Sgd::new(0.1, 0.5);
        sgd.decay();
        sgd.decay();
        assert!((sgd.step_size - 0.025).abs() < 1e-15);
    }
}
