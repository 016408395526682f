use crate::StrError;
use russell_lab::Matrix;
use serde::{Deserialize, Serialize};

/// Defines the 2D idealization of the elasticity problem
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum StressState {
    /// Vanishing out-of-plane stress (thin bodies)
    PlaneStress,

    /// Vanishing out-of-plane strain (thick bodies; the usual choice for crack slabs)
    PlaneStrain,
}

/// Holds the reduced in-plane compliance coefficients of the crack problem
///
/// The coefficients multiply the in-plane stresses in the reduced constitutive
/// relation; they are the inputs of the characteristic quartic of the anisotropic
/// near-tip solution. The reduction mode is fixed at construction time.
#[derive(Clone, Copy, Debug)]
pub struct PlaneReduction {
    pub a11: f64,
    pub a22: f64,
    pub a12: f64,
    pub a16: f64,
    pub a26: f64,
    pub a66: f64,
}

impl PlaneReduction {
    /// Extracts the reduced coefficients from a 6×6 engineering compliance matrix
    ///
    /// For plane stress the relevant entries are read directly; for plane strain the
    /// out-of-plane strain is eliminated through the 3-3 compliance block:
    ///
    /// ```text
    /// aᵢⱼ = bᵢⱼ - bᵢ₃ b₃ⱼ / b₃₃
    /// ```
    pub fn new(compliance: &Matrix, state: StressState) -> Result<Self, StrError> {
        let (nrow, ncol) = compliance.dims();
        if nrow != 6 || ncol != 6 {
            return Err("compliance matrix must be 6×6");
        }
        let ss = compliance;
        match state {
            StressState::PlaneStress => Ok(PlaneReduction {
                a11: ss.get(0, 0),
                a22: ss.get(1, 1),
                a12: ss.get(0, 1),
                a16: ss.get(0, 5),
                a26: ss.get(1, 5),
                a66: ss.get(5, 5),
            }),
            StressState::PlaneStrain => {
                let b33 = ss.get(2, 2);
                if b33 <= 0.0 {
                    return Err("out-of-plane compliance must be positive");
                }
                let (b13, b23, b36) = (ss.get(0, 2), ss.get(1, 2), ss.get(2, 5));
                Ok(PlaneReduction {
                    a11: ss.get(0, 0) - b13 * b13 / b33,
                    a22: ss.get(1, 1) - b23 * b23 / b33,
                    a12: ss.get(0, 1) - b13 * b23 / b33,
                    a16: ss.get(0, 5) - b13 * b36 / b33,
                    a26: ss.get(1, 5) - b23 * b36 / b33,
                    a66: ss.get(5, 5),
                })
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
