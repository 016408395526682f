use crate::StrError;
use serde::{Deserialize, Serialize};

/// Holds the three independent elastic constants of a cubic crystal
///
/// The constants must be given in consistent units of stress (e.g., GPa or eV/Å³).
/// Mechanical stability requires C11 > C12 and C44 > 0; these conditions are assumed
/// but not enforced, since slightly unstable constants are still useful for testing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CubicElasticConstants {
    /// Longitudinal constant C11
    pub c11: f64,

    /// Transverse constant C12
    pub c12: f64,

    /// Shear constant C44
    pub c44: f64,
}

impl CubicElasticConstants {
    /// Allocates a new instance
    pub fn new(c11: f64, c12: f64, c44: f64) -> Result<Self, StrError> {
        if c11 < 0.0 {
            return Err("C11 must be ≥ 0.0");
        }
        Ok(CubicElasticConstants { c11, c12, c44 })
    }

    /// Returns the Lamé constant λ = C12
    pub fn lambda(&self) -> f64 {
        self.c12
    }

    /// Returns the shear modulus μ = C44
    pub fn mu(&self) -> f64 {
        self.c44
    }

    /// Returns the cubic anisotropy parameter α = C11 - C12 - 2 C44
    ///
    /// α vanishes for an isotropic medium; it is the only correction needed to
    /// rotate the stiffness tensor of a cubic crystal in closed form.
    pub fn alpha(&self) -> f64 {
        self.c11 - self.c12 - 2.0 * self.c44
    }

    /// Returns the Young's modulus for uniaxial loading along a cube axis
    ///
    /// ```text
    ///        (C11 - C12) (C11 + 2 C12)
    /// E    = -------------------------
    ///  100         C11 + C12
    /// ```
    pub fn youngs_modulus(&self) -> f64 {
        (self.c11 - self.c12) * (self.c11 + 2.0 * self.c12) / (self.c11 + self.c12)
    }

    /// Returns the Poisson ratio for loading along a cube axis
    ///
    /// ```text
    ///             C12
    /// ν    = -----------
    ///  100    C11 + C12
    /// ```
    pub fn poisson_ratio(&self) -> f64 {
        self.c12 / (self.c11 + self.c12)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
