use crate::StrError;
use russell_tensor::Tensor2;

/// In-plane symmetric components updated by the average (xx, yy, zz, xy)
const COMPONENTS: [(usize, usize); 4] = [(0, 0), (1, 1), (2, 2), (0, 1)];

/// Implements an exponential moving average of per-atom stress tensors
///
/// Smooths the fluctuating instantaneous stresses of a dynamical trajectory
/// before fitting. The first sample seeds the average; subsequent samples are
/// blended with weight `1 - e^(-λ)` where λ is the decay rate per sample.
pub struct ExponentialAverage {
    decay: f64,
    data: Vec<Tensor2>,
}

impl ExponentialAverage {
    /// Allocates a new instance
    ///
    /// `decay` is the decay rate per sample and must be positive.
    pub fn new(decay: f64) -> Result<Self, StrError> {
        if decay <= 0.0 {
            return Err("decay must be > 0.0");
        }
        Ok(ExponentialAverage { decay, data: Vec::new() })
    }

    /// Blends a new set of per-atom stresses into the average
    pub fn update(&mut self, stresses: &[Tensor2]) -> Result<(), StrError> {
        if self.data.is_empty() {
            self.data = stresses.to_vec();
            return Ok(());
        }
        if stresses.len() != self.data.len() {
            return Err("number of stress tensors must match the previous samples");
        }
        let keep = f64::exp(-self.decay);
        let blend = 1.0 - keep;
        for (avg, sigma) in self.data.iter_mut().zip(stresses) {
            for &(i, j) in &COMPONENTS {
                let value = avg.get(i, j) * keep + sigma.get(i, j) * blend;
                avg.sym_set(i, j, value);
            }
        }
        Ok(())
    }

    /// Returns the averaged stresses (empty before the first update)
    pub fn get(&self) -> &[Tensor2] {
        &self.data
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::ExponentialAverage;
    use russell_lab::approx_eq;
    use russell_tensor::{Mandel, Tensor2};

    fn uniform(value: f64) -> Vec<Tensor2> {
        let tt = Tensor2::from_matrix(
            &[[value, 0.5 * value, 0.0], [0.5 * value, value, 0.0], [0.0, 0.0, 0.0]],
            Mandel::Symmetric2D,
        )
        .unwrap();
        vec![tt.clone(), tt]
    }

    #[test]
    fn new_captures_bad_decay() {
        assert_eq!(ExponentialAverage::new(0.0).err(), Some("decay must be > 0.0"));
    }

    #[test]
    fn first_update_seeds_the_average() {
        let mut avg = ExponentialAverage::new(0.1).unwrap();
        assert!(avg.get().is_empty());
        avg.update(&uniform(3.0)).unwrap();
        assert_eq!(avg.get().len(), 2);
        approx_eq(avg.get()[0].get(0, 0), 3.0, 1e-15);
        approx_eq(avg.get()[0].get(0, 1), 1.5, 1e-15);
    }

    #[test]
    fn update_blends_with_exponential_weights() {
        let mut avg = ExponentialAverage::new(0.5).unwrap();
        avg.update(&uniform(1.0)).unwrap();
        avg.update(&uniform(2.0)).unwrap();
        let keep = f64::exp(-0.5);
        let expected = 1.0 * keep + 2.0 * (1.0 - keep);
        approx_eq(avg.get()[0].get(0, 0), expected, 1e-14);
        approx_eq(avg.get()[1].get(1, 1), expected, 1e-14);
        approx_eq(avg.get()[0].get(0, 1), 0.5 * expected, 1e-14);
    }

    #[test]
    fn converges_to_a_constant_signal() {
        let mut avg = ExponentialAverage::new(1.0).unwrap();
        avg.update(&uniform(0.0)).unwrap();
        for _ in 0..60 {
            avg.update(&uniform(5.0)).unwrap();
        }
        approx_eq(avg.get()[0].get(0, 0), 5.0, 1e-10);
    }

    #[test]
    fn update_captures_length_mismatch() {
        let mut avg = ExponentialAverage::new(0.1).unwrap();
        avg.update(&uniform(1.0)).unwrap();
        let short = vec![uniform(1.0)[0].clone()];
        assert_eq!(
            avg.update(&short).err(),
            Some("number of stress tensors must match the previous samples")
        );
    }
}
