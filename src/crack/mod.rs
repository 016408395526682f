//! Implements the anisotropic near-tip field solution and the crystal crack model

mod crystal;
mod solution;
pub use crate::crack::crystal::*;
pub use crate::crack::solution::*;
