//! # Constants and type definitions for the light-curve kernel
//!
//! This module centralizes the **physical constants**, **conversion factors**, and **common type
//! definitions** used throughout the `lightcurve` library.
//!
//! ## Overview
//!
//! - Photometric constants tying blackbody surface flux to visual flux and magnitude
//! - Angle conversions (degrees ↔ radians)
//! - Core scalar type aliases used across the crate
//!
//! These definitions are used by the Kepler solver, the eclipse event solver, the photometric
//! model and the curve sampler.

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Newtonian gravitational constant in m³ kg⁻¹ s⁻², as used by the system-period formula
pub const GRAVITATIONAL_CONSTANT: f64 = 6.67300e-11;

/// Stefan–Boltzmann constant divided by π·(10 parsecs in meters)².
///
/// Multiplying by T⁴ and the bolometric-correction factor 10^(BC/2.5) yields the visual-band
/// surface flux of a blackbody as seen from 10 pc, per unit of projected disk area.
pub const VIS_FLUX_CONSTANT: f64 = 1.89553328524593e-43;

/// Visual-magnitude zero point: 4.83 + 2.5·log10(solar visual flux in W/m² at 10 parsecs).
///
/// `vis_mag = VIS_MAG_ZERO_POINT − (2.5/ln 10)·ln(vis_flux)`.
pub const VIS_MAG_ZERO_POINT: f64 = -18.9669559998301;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Temperature in Kelvin
pub type Kelvin = f64;
/// Fraction of one orbital period elapsed, in `[0, 1)`
pub type Phase = f64;
