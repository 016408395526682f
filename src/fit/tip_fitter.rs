use super::{CrackTipField, FitParams, LeastSquares, ParamId, ParamSet};
use crate::crack::CubicCrystalCrack;
use crate::StrError;
use russell_lab::Vector;
use russell_tensor::Tensor2;
use serde::{Deserialize, Serialize};

/// Selects the atoms inside an annulus centered on the crack tip
///
/// Both bounds are strict, so atoms sitting exactly on `r_min` or `r_max`
/// are excluded. The inner bound removes the nonlinear core region and the
/// outer bound removes boundary-affected material.
pub fn annulus_mask(x: &[f64], y: &[f64], x0: f64, y0: f64, r_min: f64, r_max: f64) -> Result<Vec<bool>, StrError> {
    if x.len() != y.len() {
        return Err("x and y arrays must have the same length");
    }
    Ok((0..x.len())
        .map(|i| {
            let r = f64::sqrt((x[i] - x0) * (x[i] - x0) + (y[i] - y0) * (y[i] - y0));
            r > r_min && r < r_max
        })
        .collect())
}

/// Holds the results of one stress-field fit
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FitRecord {
    /// Fitted parameters
    pub params: FitParams,

    /// Standard errors of the fitted parameters (zero for fixed ones)
    pub errors: FitParams,

    /// Number of atoms that entered the fit
    pub n_atoms: usize,

    /// Final sum of squared residuals
    pub cost: f64,
}

/// Fits the near-tip field parameters to per-atom data
///
/// Two fitting modes are available: fitting the singular stress field to
/// per-atom virial stresses, and fitting the tip position to per-atom
/// displacements at a known stress intensity factor.
pub struct TipFitter<'a> {
    /// Crack model supplying the singular field
    pub crack: &'a CubicCrystalCrack,

    /// Annulus (r_min, r_max) around the tip guess restricting the fit region
    pub r_range: Option<(f64, f64)>,

    /// Nonlinear solver settings
    pub solver: LeastSquares,

    /// Prints fit summaries
    pub verbose: bool,
}

impl<'a> TipFitter<'a> {
    /// Allocates a new instance
    pub fn new(crack: &'a CubicCrystalCrack) -> Self {
        TipFitter {
            crack,
            r_range: None,
            solver: LeastSquares::new(),
            verbose: false,
        }
    }

    /// Fits the field parameters to per-atom stress tensors
    ///
    /// `initial` supplies the starting values of every parameter; parameters in
    /// `fixed` keep their initial value. The fit region is the annulus around
    /// the initial tip guess (all atoms if no annulus is configured).
    pub fn fit_stress_field(
        &self,
        x: &[f64],
        y: &[f64],
        sigma: &[Tensor2],
        initial: &FitParams,
        fixed: &ParamSet,
    ) -> Result<FitRecord, StrError> {
        if x.len() != y.len() || x.len() != sigma.len() {
            return Err("positions and stresses must have the same length");
        }
        if fixed.len() == 6 {
            return Err("at least one parameter must be free");
        }
        let selected = self.select(x, y, initial.x0, initial.y0)?;
        let n_atoms = selected.len();

        // observed in-plane components of the selected atoms
        let oxx: Vec<f64> = selected.iter().map(|&i| sigma[i].get(0, 0)).collect();
        let oyy: Vec<f64> = selected.iter().map(|&i| sigma[i].get(1, 1)).collect();
        let oxy: Vec<f64> = selected.iter().map(|&i| sigma[i].get(0, 1)).collect();

        let base = *initial;
        let crack = self.crack;
        let output = self.solver.solve(&initial.to_vector(fixed), 3 * n_atoms, |res, p| {
            let mut params = base;
            params.update_from_vector(fixed, p);
            let field = CrackTipField::new(crack, params);
            for (a, &i) in selected.iter().enumerate() {
                let (sxx, syy, sxy) = field.stress_components(x[i], y[i]);
                res[3 * a] = oxx[a] - sxx;
                res[3 * a + 1] = oyy[a] - syy;
                res[3 * a + 2] = oxy[a] - sxy;
            }
            Ok(())
        })?;

        let mut params = base;
        params.update_from_vector(fixed, &output.params);

        // standard errors from the scaled covariance diagonal
        let mut errors = FitParams::new(0.0, 0.0, 0.0);
        let n_free = 6 - fixed.len();
        if let Some(cov) = &output.covariance {
            if output.n_residuals > n_free {
                let factor = output.cost / ((output.n_residuals - n_free) as f64);
                let mut pos = 0;
                for id in &ParamId::ALL {
                    if !fixed.contains(*id) {
                        errors.set(*id, f64::sqrt(f64::abs(cov.get(pos, pos)) * factor));
                        pos += 1;
                    }
                }
            }
        }

        if self.verbose {
            println!(
                "tip fit: {} atoms, cost = {:e}, K = {}, tip = ({}, {})",
                n_atoms, output.cost, params.k, params.x0, params.y0
            );
        }
        Ok(FitRecord {
            params,
            errors,
            n_atoms,
            cost: output.cost,
        })
    }

    /// Fits the tip position to per-atom displacements at a fixed K
    ///
    /// Minimizes the difference between the actual displacements (relative to
    /// the reference crystal) and the ideal near-tip field. An optional mask
    /// restricts which atoms participate in addition to the configured annulus.
    pub fn fit_tip_position(
        &self,
        x: &[f64],
        y: &[f64],
        ref_x: &[f64],
        ref_y: &[f64],
        x0: f64,
        y0: f64,
        k: f64,
        mask: Option<&[bool]>,
    ) -> Result<(f64, f64), StrError> {
        let out = self.solve_tip(x, y, ref_x, ref_y, x0, y0, k, mask, false)?;
        Ok((out[0], out[1]))
    }

    /// Fits the vertical tip position only, keeping x0 at its given value
    pub fn fit_tip_position_y(
        &self,
        x: &[f64],
        y: &[f64],
        ref_x: &[f64],
        ref_y: &[f64],
        x0: f64,
        y0: f64,
        k: f64,
        mask: Option<&[bool]>,
    ) -> Result<f64, StrError> {
        let out = self.solve_tip(x, y, ref_x, ref_y, x0, y0, k, mask, true)?;
        Ok(out[0])
    }

    /// Runs the displacement-based tip-position fit
    #[allow(clippy::too_many_arguments)]
    fn solve_tip(
        &self,
        x: &[f64],
        y: &[f64],
        ref_x: &[f64],
        ref_y: &[f64],
        x0: f64,
        y0: f64,
        k: f64,
        mask: Option<&[bool]>,
        only_y: bool,
    ) -> Result<Vector, StrError> {
        if x.len() != y.len() || x.len() != ref_x.len() || x.len() != ref_y.len() {
            return Err("positions and reference positions must have the same length");
        }
        if let Some(m) = mask {
            if m.len() != x.len() {
                return Err("mask must have the same length as the positions");
            }
        }
        let mut selected = self.select(x, y, x0, y0)?;
        if let Some(m) = mask {
            selected.retain(|&i| m[i]);
            if selected.is_empty() {
                return Err("no atoms inside the fit annulus");
            }
        }

        let crack = self.crack;
        let initial = if only_y { Vector::from(&[y0]) } else { Vector::from(&[x0, y0]) };
        let output = self.solver.solve(&initial, 2 * selected.len(), |res, p| {
            let (tx, ty) = if only_y { (x0, p[0]) } else { (p[0], p[1]) };
            for (a, &i) in selected.iter().enumerate() {
                let (ux, uy) = crack.displacements_from_cartesian_coordinates(ref_x[i] - tx, ref_y[i] - ty, k);
                res[2 * a] = x[i] - ref_x[i] - ux;
                res[2 * a + 1] = y[i] - ref_y[i] - uy;
            }
            Ok(())
        })?;
        if self.verbose {
            println!("tip position fit: {} atoms, cost = {:e}", selected.len(), output.cost);
        }
        Ok(output.params)
    }

    /// Returns the indices of the atoms inside the configured annulus
    fn select(&self, x: &[f64], y: &[f64], x0: f64, y0: f64) -> Result<Vec<usize>, StrError> {
        let selected: Vec<usize> = match self.r_range {
            Some((r_min, r_max)) => {
                let mask = annulus_mask(x, y, x0, y0, r_min, r_max)?;
                (0..x.len()).filter(|&i| mask[i]).collect()
            }
            None => (0..x.len()).collect(),
        };
        if selected.is_empty() {
            return Err("no atoms inside the fit annulus");
        }
        Ok(selected)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
