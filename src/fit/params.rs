use crate::track::ThinStrip;
use russell_lab::Vector;
use serde::{Deserialize, Serialize};

/// Identifies one of the adjustable parameters of the near-tip stress field
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum ParamId {
    /// Stress intensity factor
    K,

    /// Horizontal tip position
    X0,

    /// Vertical tip position
    Y0,

    /// Far-field xx stress offset
    Sxx0,

    /// Far-field yy stress offset
    Syy0,

    /// Far-field xy stress offset
    Sxy0,
}

impl ParamId {
    /// All parameters in canonical order
    pub const ALL: [ParamId; 6] = [
        ParamId::K,
        ParamId::X0,
        ParamId::Y0,
        ParamId::Sxx0,
        ParamId::Syy0,
        ParamId::Sxy0,
    ];

    /// Returns the canonical index of this parameter
    pub fn index(&self) -> usize {
        match self {
            ParamId::K => 0,
            ParamId::X0 => 1,
            ParamId::Y0 => 2,
            ParamId::Sxx0 => 3,
            ParamId::Syy0 => 4,
            ParamId::Sxy0 => 5,
        }
    }
}

/// Holds a selection of adjustable parameters
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ParamSet {
    flags: [bool; 6],
}

impl ParamSet {
    /// Allocates an empty selection
    pub fn new() -> Self {
        ParamSet { flags: [false; 6] }
    }

    /// Allocates a selection containing every parameter
    pub fn all() -> Self {
        ParamSet { flags: [true; 6] }
    }

    /// Tells whether a parameter belongs to the selection
    pub fn contains(&self, id: ParamId) -> bool {
        self.flags[id.index()]
    }

    /// Adds a parameter to the selection
    pub fn add(&mut self, id: ParamId) {
        self.flags[id.index()] = true;
    }

    /// Builder-style variant of [ParamSet::add]
    pub fn with(mut self, id: ParamId) -> Self {
        self.add(id);
        self
    }

    /// Returns the number of selected parameters
    pub fn len(&self) -> usize {
        self.flags.iter().filter(|f| **f).count()
    }

    /// Tells whether the selection is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Holds the parameters of the near-tip stress field
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FitParams {
    /// Stress intensity factor
    pub k: f64,

    /// Horizontal tip position
    pub x0: f64,

    /// Vertical tip position
    pub y0: f64,

    /// Far-field xx stress offset
    pub sxx0: f64,

    /// Far-field yy stress offset
    pub syy0: f64,

    /// Far-field xy stress offset
    pub sxy0: f64,
}

impl FitParams {
    /// Allocates a parameter set with zero far-field offsets
    pub fn new(k: f64, x0: f64, y0: f64) -> Self {
        FitParams {
            k,
            x0,
            y0,
            sxx0: 0.0,
            syy0: 0.0,
            sxy0: 0.0,
        }
    }

    /// Estimates initial parameters from the loading of a thin strip
    ///
    /// The strip geometry fixes the energy release rate at a given strain, which
    /// converts to a stress intensity factor; the far-field offsets follow from
    /// the homogeneous strain of the unbroken strip.
    pub fn from_strip(strip: &ThinStrip, strain: f64, x0: f64, y0: f64) -> Self {
        let gg = strip.energy_release_rate(strain);
        let ee = strip.effective_modulus();
        let syy0 = ee * strain;
        FitParams {
            k: f64::sqrt(gg * ee),
            x0,
            y0,
            sxx0: strip.poisson() * syy0,
            syy0,
            sxy0: 0.0,
        }
    }

    /// Returns the value of one parameter
    pub fn get(&self, id: ParamId) -> f64 {
        match id {
            ParamId::K => self.k,
            ParamId::X0 => self.x0,
            ParamId::Y0 => self.y0,
            ParamId::Sxx0 => self.sxx0,
            ParamId::Syy0 => self.syy0,
            ParamId::Sxy0 => self.sxy0,
        }
    }

    /// Sets the value of one parameter
    pub fn set(&mut self, id: ParamId, value: f64) {
        match id {
            ParamId::K => self.k = value,
            ParamId::X0 => self.x0 = value,
            ParamId::Y0 => self.y0 = value,
            ParamId::Sxx0 => self.sxx0 = value,
            ParamId::Syy0 => self.syy0 = value,
            ParamId::Sxy0 => self.sxy0 = value,
        }
    }

    /// Packs the free parameters into a vector in canonical order
    pub fn to_vector(&self, fixed: &ParamSet) -> Vector {
        let free: Vec<f64> = ParamId::ALL
            .iter()
            .filter(|id| !fixed.contains(**id))
            .map(|id| self.get(*id))
            .collect();
        Vector::from(&free)
    }

    /// Unpacks the free parameters from a vector in canonical order
    pub fn update_from_vector(&mut self, fixed: &ParamSet, values: &Vector) {
        let mut pos = 0;
        for id in &ParamId::ALL {
            if !fixed.contains(*id) {
                self.set(*id, values[pos]);
                pos += 1;
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{FitParams, ParamId, ParamSet};
    use crate::track::ThinStrip;
    use russell_lab::approx_eq;

    #[test]
    fn param_set_works() {
        let mut set = ParamSet::new();
        assert!(set.is_empty());
        set.add(ParamId::Y0);
        let set = set.with(ParamId::Sxy0);
        assert_eq!(set.len(), 2);
        assert!(set.contains(ParamId::Y0));
        assert!(set.contains(ParamId::Sxy0));
        assert!(!set.contains(ParamId::K));
        assert_eq!(ParamSet::all().len(), 6);
    }

    #[test]
    fn vector_roundtrip_works() {
        let params = FitParams {
            k: 1.5,
            x0: 10.0,
            y0: -0.5,
            sxx0: 0.1,
            syy0: 0.2,
            sxy0: 0.3,
        };
        let fixed = ParamSet::new().with(ParamId::Y0).with(ParamId::Sxx0);
        let vec = params.to_vector(&fixed);
        assert_eq!(vec.as_data(), &[1.5, 10.0, 0.2, 0.3]);
        let mut other = FitParams::new(0.0, 0.0, 0.0);
        other.y0 = params.y0;
        other.sxx0 = params.sxx0;
        other.update_from_vector(&fixed, &vec);
        assert_eq!(other, params);
    }

    #[test]
    fn from_strip_works() {
        let strip = ThinStrip::new(80.0, 0.25, 20.0).unwrap();
        let strain = 0.01;
        let params = FitParams::from_strip(&strip, strain, 5.0, 0.0);
        let ee = 80.0 / (1.0 - 0.25 * 0.25);
        let gg = 0.5 * ee * strain * strain * 20.0;
        approx_eq(params.k, f64::sqrt(gg * ee), 1e-14);
        approx_eq(params.syy0, ee * strain, 1e-14);
        approx_eq(params.sxx0, 0.25 * ee * strain, 1e-14);
        assert_eq!(params.sxy0, 0.0);
        assert_eq!(params.x0, 5.0);
    }
}
