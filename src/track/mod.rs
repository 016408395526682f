//! Implements crack-tip tracking and strain-driven loading of thin strips

mod constraint;
mod coordination;
mod energy_release;
mod strain;
pub use crate::track::constraint::*;
pub use crate::track::coordination::*;
pub use crate::track::energy_release::*;
pub use crate::track::strain::*;
