use crate::elasticity::PlaneReduction;
use crate::StrError;
use russell_lab::math::PI;
use russell_lab::{cpx, mat_eigen, Complex64, Matrix, Vector};

/// Defines the relative tolerance to classify the characteristic roots
const ROOT_TOL: f64 = 1e-8;

/// Implements the near-tip field solution for a crack in a rectilinear anisotropic medium
///
/// The mode-I singular field follows the complex-variable solution of
/// Sih, Paris and Irwin, Int. J. Frac. Mech. 1, 189 (1965). The two roots μ1, μ2 of
/// the characteristic quartic (those with positive imaginary part) parameterize the
/// displacement and stress fields; for a stable anisotropic medium the four roots
/// must occur in two complex-conjugate pairs.
pub struct AnisotropicCrackSolution {
    /// Transverse compliance coefficient (needed by the Griffith criterion)
    a22: f64,

    /// First characteristic root (positive imaginary part)
    mu1: Complex64,

    /// Second characteristic root (positive imaginary part)
    mu2: Complex64,

    /// Horizontal displacement factors pⱼ = a11 μⱼ² + a12 - a16 μⱼ
    p1: Complex64,
    p2: Complex64,

    /// Vertical displacement factors qⱼ = a12 μⱼ + a22/μⱼ - a26
    q1: Complex64,
    q2: Complex64,
}

impl AnisotropicCrackSolution {
    /// Configures the near-tip solution from the reduced compliance coefficients
    ///
    /// Finds the four roots of
    ///
    /// ```text
    /// a11 μ⁴ - 2 a16 μ³ + (2 a12 + a66) μ² - 2 a26 μ + a22 = 0
    /// ```
    ///
    /// and keeps one root of each complex-conjugate pair. A configuration error is
    /// returned if the pairing does not hold; the elastic constants or crack frame
    /// are then degenerate for this solver.
    pub fn new(reduction: &PlaneReduction) -> Result<Self, StrError> {
        let (a11, a22, a12) = (reduction.a11, reduction.a22, reduction.a12);
        let (a16, a26, a66) = (reduction.a16, reduction.a26, reduction.a66);
        if f64::abs(a11) < f64::EPSILON {
            return Err("leading coefficient of the characteristic quartic is zero");
        }

        // companion matrix of the monic quartic
        let mut companion = Matrix::new(4, 4);
        companion.set(0, 0, 2.0 * a16 / a11);
        companion.set(0, 1, -(2.0 * a12 + a66) / a11);
        companion.set(0, 2, 2.0 * a26 / a11);
        companion.set(0, 3, -a22 / a11);
        companion.set(1, 0, 1.0);
        companion.set(2, 1, 1.0);
        companion.set(3, 2, 1.0);

        let mut l_real = Vector::new(4);
        let mut l_imag = Vector::new(4);
        let mut v_real = Matrix::new(4, 4);
        let mut v_imag = Matrix::new(4, 4);
        mat_eigen(&mut l_real, &mut l_imag, &mut v_real, &mut v_imag, &mut companion)?;

        let roots: Vec<Complex64> = (0..4).map(|i| cpx!(l_real[i], l_imag[i])).collect();
        let scale = roots.iter().fold(1.0, |acc, z| f64::max(acc, z.norm()));
        let tol = ROOT_TOL * scale;

        let mut upper: Vec<Complex64> = roots.iter().copied().filter(|z| z.im > tol).collect();
        let lower: Vec<Complex64> = roots.iter().copied().filter(|z| z.im < -tol).collect();
        if upper.len() != 2 || lower.len() != 2 {
            return Err("characteristic roots do not occur in complex-conjugate pairs");
        }
        for z in &upper {
            if !lower.iter().any(|w| (w.conj() - z).norm() < tol) {
                return Err("characteristic roots do not occur in complex-conjugate pairs");
            }
        }
        upper.sort_by(|a, b| a.re.partial_cmp(&b.re).unwrap_or(std::cmp::Ordering::Equal));
        let (mu1, mu2) = (upper[0], upper[1]);

        Ok(AnisotropicCrackSolution {
            a22,
            mu1,
            mu2,
            p1: mu1 * mu1 * a11 + a12 - mu1 * a16,
            p2: mu2 * mu2 * a11 + a12 - mu2 * a16,
            q1: mu1 * a12 + cpx!(a22, 0.0) / mu1 - a26,
            q2: mu2 * a12 + cpx!(a22, 0.0) / mu2 - a26,
        })
    }

    /// Returns the selected characteristic roots (μ1, μ2)
    pub fn roots(&self) -> (Complex64, Complex64) {
        (self.mu1, self.mu2)
    }

    /// Computes the mode-I displacement field at polar coordinates from the tip
    ///
    /// Returns `(u, v)`, the displacements along the propagation and opening
    /// directions, for stress intensity factor `k`. The complex square root is
    /// taken on the principal branch, which keeps the field continuous as θ
    /// sweeps (-π, π].
    pub fn displacements(&self, r: f64, theta: f64, k: f64) -> (f64, f64) {
        let f = k * f64::sqrt(2.0 * r / PI);
        let (sin_t, cos_t) = f64::sin_cos(theta);
        let w1 = (self.mu2 * sin_t + cos_t).sqrt();
        let w2 = (self.mu1 * sin_t + cos_t).sqrt();
        let den = self.mu1 - self.mu2;
        let u = f * ((self.mu1 * self.p2 * w1 - self.mu2 * self.p1 * w2) / den).re;
        let v = f * ((self.mu1 * self.q2 * w1 - self.mu2 * self.q1 * w2) / den).re;
        (u, v)
    }

    /// Computes the singular mode-I stress field at polar coordinates from the tip
    ///
    /// Returns the in-plane components `(σxx, σyy, σxy)`.
    pub fn stresses(&self, r: f64, theta: f64, k: f64) -> (f64, f64, f64) {
        let f = k / f64::sqrt(2.0 * PI * r);
        let (sin_t, cos_t) = f64::sin_cos(theta);
        let w1 = (self.mu2 * sin_t + cos_t).sqrt();
        let w2 = (self.mu1 * sin_t + cos_t).sqrt();
        let den = self.mu1 - self.mu2;
        let prod = self.mu1 * self.mu2 / den;
        let sxx = f * (prod * (self.mu2 / w1 - self.mu1 / w2)).re;
        let syy = f * ((self.mu1 / w1 - self.mu2 / w2) / den).re;
        let sxy = f * (prod * (cpx!(1.0, 0.0) / w2 - cpx!(1.0, 0.0) / w1)).re;
        (sxx, syy, sxy)
    }

    /// Computes the Griffith critical stress intensity factor in mode I
    ///
    /// ```text
    ///         ┌──────────────────────────────────┐
    /// K₁G = \ │ -4 γ / (a22 Im[(μ1+μ2)/(μ1 μ2)])
    ///        \│
    /// ```
    ///
    /// where γ is the surface energy of the cleavage plane. A configuration error
    /// signals an unphysical surface-energy/compliance combination.
    pub fn k1g(&self, surface_energy: f64) -> Result<f64, StrError> {
        let radicand = -4.0 * surface_energy / (self.a22 * ((self.mu1 + self.mu2) / (self.mu1 * self.mu2)).im);
        if radicand < 0.0 {
            return Err("Griffith criterion yields a negative radicand");
        }
        Ok(f64::sqrt(radicand))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
