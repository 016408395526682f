use crate::StrError;

/// Models the elastic loading of a thin strip with a semi-infinite crack
///
/// The strip is clamped along its top and bottom edges and stretched vertically.
/// Far ahead of the tip the material carries the full homogeneous strain; far
/// behind it is fully relaxed. This geometry fixes the energy release rate
/// independently of the crack length, which makes it the standard setup for
/// steady-state fracture studies.
#[derive(Clone, Copy, Debug)]
pub struct ThinStrip {
    young: f64,
    poisson: f64,
    orig_height: f64,
}

impl ThinStrip {
    /// Allocates a new instance
    ///
    /// * `young` -- Young's modulus of the (isotropic or effective) material
    /// * `poisson` -- Poisson's ratio
    /// * `orig_height` -- height of the unstrained strip
    pub fn new(young: f64, poisson: f64, orig_height: f64) -> Result<Self, StrError> {
        if young <= 0.0 {
            return Err("Young's modulus must be > 0.0");
        }
        if poisson <= -1.0 || poisson >= 0.5 {
            return Err("Poisson's ratio must be in (-1.0, 0.5)");
        }
        if orig_height <= 0.0 {
            return Err("strip height must be > 0.0");
        }
        Ok(ThinStrip {
            young,
            poisson,
            orig_height,
        })
    }

    /// Returns Young's modulus
    pub fn young(&self) -> f64 {
        self.young
    }

    /// Returns Poisson's ratio
    pub fn poisson(&self) -> f64 {
        self.poisson
    }

    /// Returns the unstrained height
    pub fn orig_height(&self) -> f64 {
        self.orig_height
    }

    /// Returns the plane-strain effective modulus E / (1 - ν²)
    pub fn effective_modulus(&self) -> f64 {
        self.young / (1.0 - self.poisson * self.poisson)
    }

    /// Measures the current strain from the vertical atom positions
    pub fn strain(&self, y: &[f64]) -> Result<f64, StrError> {
        if y.is_empty() {
            return Err("there must be at least one atom to measure the strain");
        }
        let mut min = y[0];
        let mut max = y[0];
        for v in y {
            min = f64::min(min, *v);
            max = f64::max(max, *v);
        }
        Ok((max - min) / self.orig_height - 1.0)
    }

    /// Computes the energy release rate of the strip at a given strain
    ///
    /// ```text
    /// G = E' ε² h₀ / 2
    /// ```
    pub fn energy_release_rate(&self, strain: f64) -> f64 {
        0.5 * self.effective_modulus() * strain * strain * self.orig_height
    }

    /// Computes the strain that produces a given energy release rate
    pub fn strain_from_energy_release_rate(&self, gg: f64) -> f64 {
        f64::sqrt(2.0 * gg / (self.effective_modulus() * self.orig_height))
    }

    /// Converts an energy release rate to a stress intensity factor
    pub fn stress_intensity_factor(&self, gg: f64) -> f64 {
        f64::sqrt(gg * self.effective_modulus())
    }

    /// Computes the vertical displacement ramp that opens the crack
    ///
    /// Behind `a` the faces are fully opened to the clamped edge displacement;
    /// ahead of `b` the material is homogeneously strained; in between the two
    /// regimes are joined linearly.
    pub fn displacement_ramp(&self, x: &[f64], y: &[f64], strain: f64, a: f64, b: f64) -> Result<Vec<f64>, StrError> {
        if x.len() != y.len() {
            return Err("x and y arrays must have the same length");
        }
        if b <= a {
            return Err("the ramp must end after it starts");
        }
        let mut uy = Vec::with_capacity(x.len());
        for i in 0..x.len() {
            let opened = f64::signum(y[i]) * strain * self.orig_height / 2.0;
            let strained = strain * y[i];
            let u = if x[i] < a {
                opened
            } else if x[i] > b {
                strained
            } else {
                let t = (x[i] - a) / (b - a);
                opened + t * (strained - opened)
            };
            uy.push(u);
        }
        Ok(uy)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::ThinStrip;
    use russell_lab::approx_eq;

    #[test]
    fn new_captures_errors() {
        assert_eq!(ThinStrip::new(0.0, 0.25, 10.0).err(), Some("Young's modulus must be > 0.0"));
        assert_eq!(
            ThinStrip::new(80.0, 0.5, 10.0).err(),
            Some("Poisson's ratio must be in (-1.0, 0.5)")
        );
        assert_eq!(ThinStrip::new(80.0, 0.25, 0.0).err(), Some("strip height must be > 0.0"));
    }

    #[test]
    fn energy_release_rate_roundtrip_works() {
        let strip = ThinStrip::new(80.0, 0.25, 20.0).unwrap();
        let strain = 0.01;
        let gg = strip.energy_release_rate(strain);
        approx_eq(gg, 0.5 * (80.0 / (1.0 - 0.0625)) * 1e-4 * 20.0, 1e-15);
        approx_eq(strip.strain_from_energy_release_rate(gg), strain, 1e-15);
        approx_eq(
            strip.stress_intensity_factor(gg),
            f64::sqrt(gg * strip.effective_modulus()),
            1e-15,
        );
    }

    #[test]
    fn strain_works() {
        let strip = ThinStrip::new(80.0, 0.25, 20.0).unwrap();
        let y = vec![-10.2, 0.0, 3.0, 10.2];
        approx_eq(strip.strain(&y).unwrap(), 0.02, 1e-14);
        assert_eq!(
            strip.strain(&[]).err(),
            Some("there must be at least one atom to measure the strain")
        );
    }

    #[test]
    fn displacement_ramp_works() {
        let strip = ThinStrip::new(80.0, 0.25, 20.0).unwrap();
        let strain = 0.01;
        let x = vec![-5.0, 20.0, 7.5];
        let y = vec![3.0, 3.0, 3.0];
        let uy = strip.displacement_ramp(&x, &y, strain, 5.0, 10.0).unwrap();
        // fully opened behind the ramp
        approx_eq(uy[0], 0.1, 1e-15);
        // homogeneous strain ahead of it
        approx_eq(uy[1], 0.03, 1e-15);
        // halfway through the ramp
        approx_eq(uy[2], 0.5 * (0.1 + 0.03), 1e-15);
        // opening is antisymmetric across the crack plane
        let uy = strip.displacement_ramp(&[-5.0], &[-3.0], strain, 5.0, 10.0).unwrap();
        approx_eq(uy[0], -0.1, 1e-15);
    }

    #[test]
    fn displacement_ramp_captures_bad_interval() {
        let strip = ThinStrip::new(80.0, 0.25, 20.0).unwrap();
        assert_eq!(
            strip.displacement_ramp(&[0.0], &[0.0], 0.01, 10.0, 5.0).err(),
            Some("the ramp must end after it starts")
        );
    }
}
