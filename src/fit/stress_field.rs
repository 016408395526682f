use super::FitParams;
use crate::crack::CubicCrystalCrack;
use crate::StrError;
use russell_tensor::{Mandel, Tensor2};

/// Evaluates the parameterized near-tip stress field
///
/// Combines the singular crack solution, positioned at the tip given by the
/// parameters, with homogeneous far-field stress offsets.
pub struct CrackTipField<'a> {
    /// Crack model supplying the singular field
    pub crack: &'a CubicCrystalCrack,

    /// Position, loading, and far-field offsets
    pub params: FitParams,
}

impl<'a> CrackTipField<'a> {
    /// Allocates a new instance
    pub fn new(crack: &'a CubicCrystalCrack, params: FitParams) -> Self {
        CrackTipField { crack, params }
    }

    /// Computes the stress components `(σxx, σyy, σxy)` at one point
    pub fn stress_components(&self, x: f64, y: f64) -> (f64, f64, f64) {
        let p = &self.params;
        let (sxx, syy, sxy) = self.crack.stresses_from_cartesian_coordinates(x - p.x0, y - p.y0, p.k);
        (sxx + p.sxx0, syy + p.syy0, sxy + p.sxy0)
    }

    /// Computes the stress tensors at a list of points
    pub fn stresses(&self, x: &[f64], y: &[f64]) -> Result<Vec<Tensor2>, StrError> {
        if x.len() != y.len() {
            return Err("x and y arrays must have the same length");
        }
        let mut all = Vec::with_capacity(x.len());
        for i in 0..x.len() {
            let (sxx, syy, sxy) = self.stress_components(x[i], y[i]);
            let tt = Tensor2::from_matrix(
                &[[sxx, sxy, 0.0], [sxy, syy, 0.0], [0.0, 0.0, 0.0]],
                Mandel::Symmetric2D,
            )?;
            all.push(tt);
        }
        Ok(all)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
