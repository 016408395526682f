use super::{CubicElasticConstants, Orientation};
use crate::StrError;
use russell_lab::{mat_inverse, Matrix};

/// Maps Voigt indices to tensor index pairs (11, 22, 33, 23, 13, 12)
pub(crate) const VOIGT: [(usize, usize); 6] = [(0, 0), (1, 1), (2, 2), (1, 2), (0, 2), (0, 1)];

/// The nine tensor slots of orthotropic interest (C11-like, C12-like, C44-like)
const SLOTS: [(usize, usize, usize, usize); 9] = [
    (0, 0, 0, 0),
    (1, 1, 1, 1),
    (2, 2, 2, 2),
    (1, 1, 2, 2),
    (0, 0, 2, 2),
    (0, 0, 1, 1),
    (1, 2, 1, 2),
    (0, 2, 0, 2),
    (0, 1, 0, 1),
];

/// Holds the rotated engineering constants of a cubic crystal
///
/// Each array holds one value per coordinate permutation; e.g. `c44[0]` is the
/// 2323 shear constant, `c44[1]` the 1313 one, and `c44[2]` the 1212 one.
#[derive(Clone, Copy, Debug)]
pub struct RotatedStiffness {
    /// Diagonal normal constants (1111, 2222, 3333)
    pub c11: [f64; 3],

    /// Off-diagonal normal constants (2233, 1133, 1122)
    pub c12: [f64; 3],

    /// Shear constants (2323, 1313, 1212)
    pub c44: [f64; 3],
}

/// Implements the stiffness tensor of a cubic crystal in an arbitrary frame
///
/// The stiffness of a cubic crystal decomposes into an isotropic part (λ = C12,
/// μ = C44) plus a single anisotropic correction α = C11 - C12 - 2 C44 along the
/// cube axes. Rotation therefore reduces to a closed-form contraction per slot;
/// the explicit fourth-rank transform is kept as a cross-validation reference.
#[derive(Clone, Copy, Debug)]
pub struct StiffnessTensor {
    constants: CubicElasticConstants,
}

impl StiffnessTensor {
    /// Allocates a new instance
    pub fn new(constants: CubicElasticConstants) -> Self {
        StiffnessTensor { constants }
    }

    /// Returns the elastic constants
    pub fn constants(&self) -> &CubicElasticConstants {
        &self.constants
    }

    /// Computes the rotated engineering constants in closed form
    pub fn rotate(&self, frame: &Orientation) -> RotatedStiffness {
        let la = self.constants.lambda();
        let mu = self.constants.mu();
        let al = self.constants.alpha();
        let mut c = [0.0; 9];
        for (slot, &(i, j, k, m)) in SLOTS.iter().enumerate() {
            let mut h = 0.0;
            if i == j && k == m {
                h += la;
            }
            if i == k && j == m {
                h += mu;
            }
            if i == m && j == k {
                h += mu;
            }
            let mut s = 0.0;
            for q in 0..3 {
                s += frame.get(i, q) * frame.get(j, q) * frame.get(k, q) * frame.get(m, q);
            }
            c[slot] = h + al * s;
        }
        RotatedStiffness {
            c11: [c[0], c[1], c[2]],
            c12: [c[3], c[4], c[5]],
            c44: [c[6], c[7], c[8]],
        }
    }

    /// Computes the rotated engineering constants by the explicit tensor transform
    ///
    /// Reference path for cross-validation of [StiffnessTensor::rotate]; the two
    /// must agree to within 1e-6.
    pub fn rotate_explicit(&self, frame: &Orientation) -> RotatedStiffness {
        let cc = self.rotated_tensor(frame);
        let mut c = [0.0; 9];
        for (slot, &(i, j, k, m)) in SLOTS.iter().enumerate() {
            c[slot] = cc[i][j][k][m];
        }
        RotatedStiffness {
            c11: [c[0], c[1], c[2]],
            c12: [c[3], c[4], c[5]],
            c44: [c[6], c[7], c[8]],
        }
    }

    /// Computes the rotated 6×6 engineering stiffness matrix (Voigt ordering)
    pub fn rotated_matrix(&self, frame: &Orientation) -> Matrix {
        let cc = self.rotated_tensor(frame);
        let mut c6 = Matrix::new(6, 6);
        for a in 0..6 {
            for b in 0..6 {
                let (i, j) = VOIGT[a];
                let (k, m) = VOIGT[b];
                c6.set(a, b, cc[i][j][k][m]);
            }
        }
        c6
    }

    /// Computes the rotated 6×6 engineering compliance matrix
    ///
    /// Returns a configuration error if the stiffness matrix is singular
    /// (e.g., degenerate constants such as C44 = 0).
    pub fn compliance(&self, frame: &Orientation) -> Result<Matrix, StrError> {
        let c6 = self.rotated_matrix(frame);
        let mut s6 = Matrix::new(6, 6);
        mat_inverse(&mut s6, &c6).map_err(|_| "rotated stiffness matrix is singular")?;
        Ok(s6)
    }

    /// Builds the full fourth-rank stiffness tensor and rotates it into the frame
    fn rotated_tensor(&self, frame: &Orientation) -> [[[[f64; 3]; 3]; 3]; 3] {
        let la = self.constants.lambda();
        let mu = self.constants.mu();
        let al = self.constants.alpha();

        // unrotated tensor in the cubic basis
        let mut c0 = [[[[0.0; 3]; 3]; 3]; 3];
        for i in 0..3 {
            for j in 0..3 {
                for k in 0..3 {
                    for m in 0..3 {
                        let mut h = 0.0;
                        if i == j && k == m {
                            h += la;
                        }
                        if i == k && j == m {
                            h += mu;
                        }
                        if i == m && j == k {
                            h += mu;
                        }
                        if i == j && j == k && k == m {
                            h += al;
                        }
                        c0[i][j][k][m] = h;
                    }
                }
            }
        }

        // contract with four copies of the frame matrix
        let mut cc = [[[[0.0; 3]; 3]; 3]; 3];
        for i in 0..3 {
            for j in 0..3 {
                for k in 0..3 {
                    for m in 0..3 {
                        let mut sum = 0.0;
                        for p in 0..3 {
                            for q in 0..3 {
                                for r in 0..3 {
                                    for s in 0..3 {
                                        sum += frame.get(i, p)
                                            * frame.get(j, q)
                                            * frame.get(k, r)
                                            * frame.get(m, s)
                                            * c0[p][q][r][s];
                                    }
                                }
                            }
                        }
                        cc[i][j][k][m] = sum;
                    }
                }
            }
        }
        cc
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{RotatedStiffness, StiffnessTensor};
    use crate::elasticity::{CubicElasticConstants, Orientation};
    use russell_lab::{approx_eq, array_approx_eq};

    fn silicon() -> StiffnessTensor {
        StiffnessTensor::new(CubicElasticConstants::new(166.0, 65.0, 77.0).unwrap())
    }

    /// Four distinct orientations, including two non-trivial ones
    fn sample_orientations() -> Vec<Orientation> {
        let s = 1.0 / f64::sqrt(2.0);
        let t = 1.0 / f64::sqrt(3.0);
        let u = 1.0 / f64::sqrt(6.0);
        vec![
            Orientation::identity(),
            Orientation::new([[s, s, 0.0], [0.0, 0.0, 1.0], [s, -s, 0.0]]).unwrap(),
            Orientation::new([[0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]]).unwrap(),
            Orientation::new([[t, t, t], [-u, -u, 2.0 * u], [s, -s, 0.0]]).unwrap(),
        ]
    }

    fn assert_close(a: &RotatedStiffness, b: &RotatedStiffness, tol: f64) {
        array_approx_eq(&a.c11, &b.c11, tol);
        array_approx_eq(&a.c12, &b.c12, tol);
        array_approx_eq(&a.c44, &b.c44, tol);
    }

    #[test]
    fn rotate_identity_works() {
        let tensor = silicon();
        let rotated = tensor.rotate(&Orientation::identity());
        // the aligned frame must return the unrotated constants exactly
        assert_eq!(rotated.c11, [166.0, 166.0, 166.0]);
        assert_eq!(rotated.c12, [65.0, 65.0, 65.0]);
        assert_eq!(rotated.c44, [77.0, 77.0, 77.0]);
    }

    #[test]
    fn rotate_agrees_with_explicit_transform() {
        let tensor = silicon();
        for frame in &sample_orientations() {
            let fast = tensor.rotate(frame);
            let full = tensor.rotate_explicit(frame);
            assert_close(&fast, &full, 1e-6);
        }
    }

    #[test]
    fn rotate_110_frame_works() {
        // pulling along [110] stiffens a crystal with negative α
        let tensor = silicon();
        let s = 1.0 / f64::sqrt(2.0);
        let frame = Orientation::new([[s, s, 0.0], [0.0, 0.0, 1.0], [s, -s, 0.0]]).unwrap();
        let rotated = tensor.rotate(&frame);
        // C'1111 = λ + 2μ + α/2
        let constants = tensor.constants();
        let expected = constants.lambda() + 2.0 * constants.mu() + constants.alpha() / 2.0;
        approx_eq(rotated.c11[0], expected, 1e-13);
        // the [001] axis keeps the cube-axis value
        approx_eq(rotated.c11[1], 166.0, 1e-13);
    }

    #[test]
    fn compliance_works() {
        let tensor = silicon();
        let s6 = tensor.compliance(&Orientation::identity()).unwrap();
        // analytic cubic compliances in the aligned frame
        let (c11, c12, c44) = (166.0, 65.0, 77.0);
        let den = (c11 - c12) * (c11 + 2.0 * c12);
        approx_eq(s6.get(0, 0), (c11 + c12) / den, 1e-12);
        approx_eq(s6.get(0, 1), -c12 / den, 1e-12);
        approx_eq(s6.get(3, 3), 1.0 / c44, 1e-12);
        approx_eq(s6.get(0, 5), 0.0, 1e-12);
    }

    #[test]
    fn compliance_captures_singular_stiffness() {
        let tensor = StiffnessTensor::new(CubicElasticConstants::new(166.0, 65.0, 0.0).unwrap());
        assert_eq!(
            tensor.compliance(&Orientation::identity()).err(),
            Some("rotated stiffness matrix is singular")
        );
    }
}
