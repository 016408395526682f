use crate::StrError;
use russell_tensor::Tensor2;

/// Estimates the energy release rate from the J-integral over a domain
///
/// The contour integral is converted to a domain integral over the annulus
/// r1 < r < r2 around the tip, with the linear ramp q(r) = (r - r1)/(r2 - r1)
/// as domain function; see Li, Shih and Needleman, Eng. Fract. Mech. 21, 405
/// (1985). Per-atom inputs:
///
/// * `deformation_gradient` -- deformation gradient of each atomic environment
/// * `virial` -- per-atom virial (stress times atomic volume)
/// * `epot` -- per-atom potential energy; `e0` is the bulk cohesive energy per
///   atom, so `epot - e0` is the stored energy density
///
/// `depth` is the cell extent along the crack front, which normalizes the
/// integral to a release rate per unit front length.
#[allow(clippy::too_many_arguments)]
pub fn j_integral(
    x: &[f64],
    y: &[f64],
    deformation_gradient: &[Tensor2],
    virial: &[Tensor2],
    epot: &[f64],
    e0: f64,
    tip_x: f64,
    tip_y: f64,
    r1: f64,
    r2: f64,
    depth: f64,
) -> Result<f64, StrError> {
    if x.len() != y.len()
        || x.len() != deformation_gradient.len()
        || x.len() != virial.len()
        || x.len() != epot.len()
    {
        return Err("per-atom arrays must have the same length");
    }
    if r1 < 0.0 || r2 <= r1 {
        return Err("the integration annulus must satisfy 0 ≤ r1 < r2");
    }
    if depth <= 0.0 {
        return Err("cell depth must be > 0.0");
    }
    let width = r2 - r1;
    let mut epot_term = 0.0;
    let mut estrain = 0.0;
    for i in 0..x.len() {
        let dx = x[i] - tip_x;
        let dy = y[i] - tip_y;
        let r = f64::sqrt(dx * dx + dy * dy);
        if r <= r1 || r >= r2 {
            continue;
        }
        // in-plane gradient of the ramp domain function
        let qx = dx / (width * r);
        let qy = dy / (width * r);
        epot_term += (epot[i] - e0) * qx;
        for p in 0..3 {
            estrain += deformation_gradient[i].get(0, p) * (virial[i].get(p, 0) * qx + virial[i].get(p, 1) * qy);
        }
    }
    Ok((epot_term - estrain) / depth)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::j_integral;
    use russell_lab::approx_eq;
    use russell_tensor::{Mandel, Tensor2};

    fn identity_gradient() -> Tensor2 {
        Tensor2::from_matrix(&[[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]], Mandel::General).unwrap()
    }

    #[test]
    fn j_integral_captures_bad_input() {
        assert_eq!(
            j_integral(&[0.0], &[], &[], &[], &[], 0.0, 0.0, 0.0, 1.0, 9.0, 1.0).err(),
            Some("per-atom arrays must have the same length")
        );
        assert_eq!(
            j_integral(&[], &[], &[], &[], &[], 0.0, 0.0, 0.0, 9.0, 1.0, 1.0).err(),
            Some("the integration annulus must satisfy 0 ≤ r1 < r2")
        );
        assert_eq!(
            j_integral(&[], &[], &[], &[], &[], 0.0, 0.0, 0.0, 1.0, 9.0, 0.0).err(),
            Some("cell depth must be > 0.0")
        );
    }

    #[test]
    fn j_integral_works_for_one_atom() {
        // atom at r = 5 in the annulus (1, 9): ∇q = (3, 4)/40
        let virial = Tensor2::from_matrix(&[[2.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 0.0]], Mandel::Symmetric).unwrap();
        let jj = j_integral(
            &[3.0],
            &[4.0],
            &[identity_gradient()],
            &[virial],
            &[2.0],
            0.5,
            0.0,
            0.0,
            1.0,
            9.0,
            2.0,
        )
        .unwrap();
        // ((2 - 0.5)·3/40 - (2·3/40 + 1·4/40)) / 2
        approx_eq(jj, (1.5 * 0.075 - (2.0 * 0.075 + 0.1)) / 2.0, 1e-15);
    }

    #[test]
    fn j_integral_ignores_atoms_outside_the_annulus() {
        let virial = Tensor2::from_matrix(&[[2.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 0.0]], Mandel::Symmetric).unwrap();
        let huge = Tensor2::from_matrix(&[[1e6, 1e6, 0.0], [1e6, 1e6, 0.0], [0.0, 0.0, 0.0]], Mandel::Symmetric).unwrap();
        let gradients = vec![identity_gradient(), identity_gradient(), identity_gradient()];
        // the second atom sits exactly on r2 and the third far outside
        let jj = j_integral(
            &[3.0, 9.0, 100.0],
            &[4.0, 0.0, 0.0],
            &gradients,
            &[virial.clone(), huge.clone(), huge],
            &[2.0, 1e6, 1e6],
            0.5,
            0.0,
            0.0,
            1.0,
            9.0,
            2.0,
        )
        .unwrap();
        let reference = j_integral(
            &[3.0],
            &[4.0],
            &[identity_gradient()],
            &[virial],
            &[2.0],
            0.5,
            0.0,
            0.0,
            1.0,
            9.0,
            2.0,
        )
        .unwrap();
        approx_eq(jj, reference, 1e-15);
    }

    #[test]
    fn j_integral_vanishes_for_an_unstrained_crystal() {
        let zero = Tensor2::new(Mandel::Symmetric);
        let jj = j_integral(
            &[3.0, -2.0],
            &[4.0, 4.0],
            &[identity_gradient(), identity_gradient()],
            &[zero.clone(), zero],
            &[0.5, 0.5],
            0.5,
            0.0,
            0.0,
            1.0,
            9.0,
            2.0,
        )
        .unwrap();
        assert_eq!(jj, 0.0);
    }
}
