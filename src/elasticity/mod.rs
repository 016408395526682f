//! Implements cubic elasticity, crystallographic frames, and stiffness rotation

mod cubic_constants;
mod orientation;
mod plane_reduction;
mod stiffness;
pub use crate::elasticity::cubic_constants::*;
pub use crate::elasticity::orientation::*;
pub use crate::elasticity::plane_reduction::*;
pub use crate::elasticity::stiffness::*;
