//! Implements the least-squares machinery that fits the near-tip field to atomistic data

mod averaging;
mod least_squares;
mod params;
mod stress_field;
mod tip_fitter;
pub use crate::fit::averaging::*;
pub use crate::fit::least_squares::*;
pub use crate::fit::params::*;
pub use crate::fit::stress_field::*;
pub use crate::fit::tip_fitter::*;
