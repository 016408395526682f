//! Cracksim models brittle fracture in crystalline solids
//!
//! Given the elastic constants of a cubic crystal and a chosen crack-plane/crack-front
//! crystallography, this crate derives the continuum near-tip displacement and stress
//! fields predicted by anisotropic linear elasticity, locates the actual crack tip in an
//! evolving atomic configuration by fitting that continuum solution to atomic data, and
//! supplies the strain bookkeeping used to drive a thin-strip fracture simulation.
//!
//! The functionality is organized in the following modules:
//!
//! * [crate::elasticity] -- cubic elastic constants, crystallographic frames, and rotation
//!   of the stiffness tensor, including the reduction to in-plane compliance coefficients
//! * [crate::crack] -- the Sih-Paris-Irwin near-tip field solution for a rectilinear
//!   anisotropic medium and its composition with a cubic crystal's crack crystallography
//! * [crate::fit] -- nonlinear least-squares fitting of the stress intensity factor, tip
//!   position, and far-field stress offsets to per-atom stresses or displacements
//! * [crate::track] -- coordination-based tip localization, thin-strip strain and energy
//!   release rate bookkeeping, and the constant-strain-rate loading constraint

/// Defines a type alias for the error type as a static string
pub type StrError = &'static str;

pub mod crack;
pub mod elasticity;
pub mod fit;
pub mod track;
