//! Kepler's-equation conversions between orbital phase and true anomaly.
//!
//! The forward direction (true anomaly → phase) is closed-form; the inverse goes through a
//! Newton iteration on `MA = EA − e·sin(EA)` with a hard iteration cap. The two functions are
//! near-inverses: round-trip phase error stays below 1e-6 for eccentricities up to 0.9.

use crate::constants::{Phase, Radian, DPI};
use crate::diagnostics::{Diagnostic, Diagnostics};

/// Newton stopping tolerance on the eccentric-anomaly step.
const NEWTON_TOLERANCE: f64 = 1e-3;
/// Hard cap on Newton iterations; hitting it is non-fatal.
const NEWTON_MAX_ITERATIONS: usize = 100;

/// Principal value of an angle, in `[0, 2π)`.
pub(crate) fn principal_angle(a: Radian) -> Radian {
    a.rem_euclid(DPI)
}

/// Convert a true anomaly to an orbital phase.
///
/// True anomaly → eccentric anomaly via `EA = 2·atan(tan(TA/2)/√((1+e)/(1−e)))`, then mean
/// anomaly `MA = EA − e·sin(EA)`, then `phase = (MA/2π) mod 1`.
pub fn phase_from_true_anomaly(true_anomaly: Radian, eccentricity: f64) -> Phase {
    let c1 = ((1. + eccentricity) / (1. - eccentricity)).sqrt();
    let ecc_anomaly = 2. * ((0.5 * true_anomaly).tan() / c1).atan();
    let mean_anomaly = ecc_anomaly - eccentricity * ecc_anomaly.sin();
    (mean_anomaly / DPI).rem_euclid(1.)
}

/// Convert an orbital phase to a true anomaly by inverting Kepler's equation.
///
/// Newton iteration starting from `EA₀ = MA`, stepping
/// `EA ← EA + (MA + e·sin(EA) − EA)/(1 − e·cos(EA))` until the step drops below the tolerance.
/// Reaching the iteration cap records a diagnostic and keeps the last iterate.
pub fn true_anomaly_from_phase(
    phase: Phase,
    eccentricity: f64,
    diagnostics: &mut Diagnostics,
) -> Radian {
    let mean_anomaly = phase * DPI;
    let mut ea1 = mean_anomaly;
    let mut counter = 0;

    loop {
        let ea0 = ea1;
        ea1 = ea0 + (mean_anomaly + eccentricity * ea0.sin() - ea0) / (1. - eccentricity * ea0.cos());
        counter += 1;
        if (ea1 - ea0).abs() <= NEWTON_TOLERANCE || counter >= NEWTON_MAX_ITERATIONS {
            break;
        }
    }

    if counter >= NEWTON_MAX_ITERATIONS {
        diagnostics.push(Diagnostic::IterationLimitReached {
            context: "kepler inversion",
            iterations: counter,
        });
    }

    let c1 = ((1. + eccentricity) / (1. - eccentricity)).sqrt();
    2. * (c1 * (0.5 * ea1).tan()).atan()
}
