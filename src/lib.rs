//! Eclipse and light-curve computation kernel for binary-star and transit simulators.
//!
//! Given the orbital elements and physical properties of a two-body system, the crate
//! determines whether, when, and how deeply each body eclipses the other over one orbital
//! period, and produces a normalized, plot-ready brightness curve as a function of orbital
//! phase. [`controller::CurveController`] is the host-facing entry point; the lower modules
//! are usable on their own.

pub mod constants;
pub mod controller;
pub mod diagnostics;
pub mod eclipse;
pub mod errors;
pub mod kepler;
pub mod params;
pub mod photometry;
mod root_finding;
pub mod sampler;
pub mod star;
