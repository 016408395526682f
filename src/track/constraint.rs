use crate::StrError;

/// Implements a constant strain rate driver for dynamical loading
///
/// Each application rescales the vertical positions so that the strip strain
/// grows by a fixed increment per step. An optional mask restricts the
/// rescaling to a subset of atoms (e.g., only the clamped boundary layers).
pub struct ConstantStrainRate {
    orig_height: f64,
    delta_strain: f64,
    mask: Option<Vec<bool>>,
}

impl ConstantStrainRate {
    /// Allocates a driver acting on all atoms
    pub fn new(orig_height: f64, delta_strain: f64) -> Result<Self, StrError> {
        if orig_height <= 0.0 {
            return Err("strip height must be > 0.0");
        }
        Ok(ConstantStrainRate {
            orig_height,
            delta_strain,
            mask: None,
        })
    }

    /// Allocates a driver acting on the masked atoms only
    pub fn new_masked(orig_height: f64, delta_strain: f64, mask: Vec<bool>) -> Result<Self, StrError> {
        let mut driver = ConstantStrainRate::new(orig_height, delta_strain)?;
        driver.mask = Some(mask);
        Ok(driver)
    }

    /// Returns the strain increment per application
    pub fn delta_strain(&self) -> f64 {
        self.delta_strain
    }

    /// Rescales the vertical positions to increment the strain
    ///
    /// The scale factor follows from the current strain measured on the full
    /// array, so repeated applications advance the strain linearly even when
    /// only a subset of atoms moves.
    pub fn adjust_positions(&self, y: &mut [f64]) -> Result<(), StrError> {
        if y.is_empty() {
            return Err("there must be at least one atom to strain");
        }
        if let Some(mask) = &self.mask {
            if mask.len() != y.len() {
                return Err("mask must have the same length as the positions");
            }
        }
        let mut min = y[0];
        let mut max = y[0];
        for v in y.iter() {
            min = f64::min(min, *v);
            max = f64::max(max, *v);
        }
        let current = (max - min) / self.orig_height - 1.0;
        let alpha = (1.0 + current + self.delta_strain) / (1.0 + current);
        match &self.mask {
            Some(mask) => {
                for i in 0..y.len() {
                    if mask[i] {
                        y[i] *= alpha;
                    }
                }
            }
            None => {
                for v in y.iter_mut() {
                    *v *= alpha;
                }
            }
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
