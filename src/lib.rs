//! Closed-form pressure-transient (well-test) response models in Laplace
//! space, their analytic parameter sensitivities, and Stehfest numerical
//! inversion back to the time domain.
//!
//! The crate serves a well-test interpretation application that fits
//! measured pressure/rate data by nonlinear regression: the physical-space
//! wrappers produce the residual curve, the sensitivity functions its
//! Jacobian columns. Two reservoir configurations are covered:
//!
//! - [`bounded_radial`]: homogeneous circular reservoir with a no-flow
//!   outer boundary, wellbore storage and skin, plus sensitivities to the
//!   storage coefficient, skin, external radius and permeability.
//! - [`dual_porosity`]: double-porosity reservoir with transient
//!   interporosity flow from slab matrix blocks, plus the storage
//!   sensitivity.
//!
//! All functions are pure and reentrant; a [`ModelParameters`] snapshot is
//! read-only during evaluation, so evaluations parallelize freely across
//! parameter sets and times. Degenerate evaluations surface as typed
//! [`WellTestError`] values, never as plausible-looking finite numbers.

pub mod bounded_radial;
pub mod dual_porosity;
pub mod error;
pub mod parameters;
mod special;
pub mod stehfest;
pub mod storage;

#[cfg(feature = "python")]
mod python;

pub use error::WellTestError;
pub use parameters::{ModelParameters, OILFIELD_C1, OILFIELD_C2, OILFIELD_C3};
