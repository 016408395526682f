use super::AnisotropicCrackSolution;
use crate::elasticity::{CubicElasticConstants, Orientation, PlaneReduction, StiffnessTensor, StressState};
use crate::StrError;

/// Models a mode-I crack in a cubic crystal
///
/// The crack frame is:
///
/// * x -- direction in which the crack is running
/// * y -- normal of the free surface that forms due to the crack
/// * z -- direction of the crack front
///
/// The stiffness tensor is rotated into this frame, inverted to compliance, reduced
/// to the in-plane coefficients, and the near-tip solution is configured once at
/// construction time; instances are immutable afterwards.
pub struct CubicCrystalCrack {
    orientation: Orientation,
    stiffness: StiffnessTensor,
    stress_state: StressState,
    solution: AnisotropicCrackSolution,
}

impl CubicCrystalCrack {
    /// Allocates a crack model for a given crystallography
    ///
    /// * `crack_surface` -- direction normal to the cleavage plane (need not be normalized)
    /// * `crack_front` -- direction of the crack front, perpendicular to `crack_surface`
    pub fn new(
        constants: CubicElasticConstants,
        crack_surface: [f64; 3],
        crack_front: [f64; 3],
        stress_state: StressState,
    ) -> Result<Self, StrError> {
        let orientation = Orientation::from_crack_system(crack_surface, crack_front)?;
        let stiffness = StiffnessTensor::new(constants);
        let compliance = stiffness.compliance(&orientation)?;
        let reduction = PlaneReduction::new(&compliance, stress_state)?;
        let solution = AnisotropicCrackSolution::new(&reduction)?;
        Ok(CubicCrystalCrack {
            orientation,
            stiffness,
            stress_state,
            solution,
        })
    }

    /// Returns the crack frame
    pub fn orientation(&self) -> &Orientation {
        &self.orientation
    }

    /// Returns the stiffness tensor
    pub fn stiffness(&self) -> &StiffnessTensor {
        &self.stiffness
    }

    /// Returns the 2D idealization
    pub fn stress_state(&self) -> StressState {
        self.stress_state
    }

    /// Returns the configured near-tip solution
    pub fn solution(&self) -> &AnisotropicCrackSolution {
        &self.solution
    }

    /// Computes the Griffith critical stress intensity factor in mode I
    pub fn k1g(&self, surface_energy: f64) -> Result<f64, StrError> {
        self.solution.k1g(surface_energy)
    }

    /// Computes the displacement field from cylindrical coordinates around the tip
    pub fn displacements_from_cylinder_coordinates(&self, r: f64, theta: f64, k: f64) -> (f64, f64) {
        self.solution.displacements(r, theta, k)
    }

    /// Computes the displacement field from cartesian offsets to the tip
    pub fn displacements_from_cartesian_coordinates(&self, dx: f64, dy: f64, k: f64) -> (f64, f64) {
        let r = f64::sqrt(dx * dx + dy * dy);
        let theta = f64::atan2(dy, dx);
        self.solution.displacements(r, theta, k)
    }

    /// Computes the displacement field for a list of reference positions
    ///
    /// `(ref_x, ref_y)` are the positions of the unrelaxed reference crystal and
    /// `(x0, y0)` is the crack tip position.
    pub fn displacements(
        &self,
        ref_x: &[f64],
        ref_y: &[f64],
        x0: f64,
        y0: f64,
        k: f64,
    ) -> Result<(Vec<f64>, Vec<f64>), StrError> {
        if ref_x.len() != ref_y.len() {
            return Err("x and y arrays must have the same length");
        }
        let mut ux = Vec::with_capacity(ref_x.len());
        let mut uy = Vec::with_capacity(ref_y.len());
        for i in 0..ref_x.len() {
            let (u, v) = self.displacements_from_cartesian_coordinates(ref_x[i] - x0, ref_y[i] - y0, k);
            ux.push(u);
            uy.push(v);
        }
        Ok((ux, uy))
    }

    /// Computes the actual displacement field minus the ideal near-tip field
    #[allow(clippy::too_many_arguments)]
    pub fn displacement_residuals(
        &self,
        x: &[f64],
        y: &[f64],
        ref_x: &[f64],
        ref_y: &[f64],
        x0: f64,
        y0: f64,
        k: f64,
    ) -> Result<(Vec<f64>, Vec<f64>), StrError> {
        if x.len() != y.len() || x.len() != ref_x.len() || x.len() != ref_y.len() {
            return Err("positions and reference positions must have the same length");
        }
        let (ux, uy) = self.displacements(ref_x, ref_y, x0, y0, k)?;
        let dux = (0..x.len()).map(|i| x[i] - ref_x[i] - ux[i]).collect();
        let duy = (0..y.len()).map(|i| y[i] - ref_y[i] - uy[i]).collect();
        Ok((dux, duy))
    }

    /// Computes the singular stress field from cartesian offsets to the tip
    pub fn stresses_from_cartesian_coordinates(&self, dx: f64, dy: f64, k: f64) -> (f64, f64, f64) {
        let r = f64::sqrt(dx * dx + dy * dy);
        let theta = f64::atan2(dy, dx);
        self.solution.stresses(r, theta, k)
    }

    /// Computes the singular stress field for a list of positions
    ///
    /// Returns the per-atom components `(σxx, σyy, σxy)`.
    #[allow(clippy::type_complexity)]
    pub fn stresses(
        &self,
        x: &[f64],
        y: &[f64],
        x0: f64,
        y0: f64,
        k: f64,
    ) -> Result<(Vec<f64>, Vec<f64>, Vec<f64>), StrError> {
        if x.len() != y.len() {
            return Err("x and y arrays must have the same length");
        }
        let mut sxx = Vec::with_capacity(x.len());
        let mut syy = Vec::with_capacity(x.len());
        let mut sxy = Vec::with_capacity(x.len());
        for i in 0..x.len() {
            let (a, b, c) = self.stresses_from_cartesian_coordinates(x[i] - x0, y[i] - y0, k);
            sxx.push(a);
            syy.push(b);
            sxy.push(c);
        }
        Ok((sxx, syy, sxy))
    }

    /// Rescales atomic positions from one stress intensity factor to another
    ///
    /// The displacement away from the reference crystal scales linearly with K;
    /// this extrapolates relaxed positions between two loading levels to seed a
    /// subsequent relaxation without recomputing the field.
    pub fn scale_displacements(
        &self,
        x: &[f64],
        y: &[f64],
        ref_x: &[f64],
        ref_y: &[f64],
        old_k: f64,
        new_k: f64,
    ) -> Result<(Vec<f64>, Vec<f64>), StrError> {
        if old_k == 0.0 {
            return Err("current stress intensity factor must be nonzero");
        }
        if x.len() != y.len() || x.len() != ref_x.len() || x.len() != ref_y.len() {
            return Err("positions and reference positions must have the same length");
        }
        let ratio = new_k / old_k;
        let sx = (0..x.len()).map(|i| ref_x[i] + ratio * (x[i] - ref_x[i])).collect();
        let sy = (0..y.len()).map(|i| ref_y[i] + ratio * (y[i] - ref_y[i])).collect();
        Ok((sx, sy))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
