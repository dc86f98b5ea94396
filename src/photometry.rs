//! Visual flux and magnitude of the system at an arbitrary phase.
//!
//! Each body contributes `π·r²·H` to the out-of-eclipse flux, where
//! `H = VIS_FLUX_CONSTANT · T⁴ · 10^(BC/2.5)` is its visual-band surface flux and `BC` the
//! temperature-dependent bolometric correction. Inside an eclipse the occluded circle–circle
//! overlap area of the eclipsed body is subtracted at that body's surface flux.

use serde::{Deserialize, Serialize};

use crate::constants::{Kelvin, Phase, VIS_FLUX_CONSTANT, VIS_MAG_ZERO_POINT};
use crate::diagnostics::Diagnostics;
use crate::eclipse::EclipseEvents;
use crate::kepler::true_anomaly_from_phase;
use crate::params::OrbitalParameters;

/// Which eclipse, if any, a phase falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EclipseRegion {
    None,
    OfBody1,
    OfBody2,
}

/// A sampled point of the light curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub phase: Phase,
    pub vis_flux: f64,
    pub vis_mag: f64,
}

/// Bolometric correction in magnitudes for a blackbody of the given temperature.
///
/// Piecewise polynomial fit in `log10(T)` with three regimes split at `log10(T) = 3.7` and
/// `3.9` (Flower 1996). The coefficients are a fitted table and are reproduced exactly; the
/// fits meet at the regime boundaries only to a few millimagnitudes.
pub fn bolometric_correction(temperature: Kelvin) -> f64 {
    let lt = temperature.log10();
    if lt > 3.9 {
        -0.118115450538963E+06
            + lt * (0.137145973583929E+06
                + lt * (-0.636233812100225E+05
                    + lt * (0.147412923562646E+05
                        + lt * (-0.170587278406872E+04 + lt * 0.788731721804990E+02))))
    } else if lt < 3.7 {
        -0.190537291496456E+05
            + lt * (0.155144866764412E+05
                + lt * (-0.421278819301717E+04 + lt * 0.381476328422343E+03))
    } else {
        -0.370510203809015E+05
            + lt * (0.385672629965804E+05
                + lt * (-0.150651486316025E+05
                    + lt * (0.261724637119416E+04 + lt * -0.170623810323864E+03)))
    }
}

/// Precomputed photometric state for one parameter set and its eclipse events.
///
/// All fields derive from the orbit geometry, the radii and the temperatures; construction is
/// cheap and the struct is immutable, so it is rebuilt wholesale on every parameter change.
#[derive(Debug, Clone, Copy)]
pub struct PhotometricModel {
    max_vis_flux: f64,
    min_vis_mag: f64,
    /// Visual surface flux of each body.
    h1: f64,
    h2: f64,
    r1_sq: f64,
    r2_sq: f64,
    /// Half-angle coefficients of the circle–circle overlap (`ca = Z0·d + Z1/d`, …).
    z0: f64,
    z1: f64,
    z2: f64,
    z3: f64,
    /// Projected-separation coefficients (`d² = (J1·cos²(w+v)+J2)/(1+J3·cos v+J4·cos²v)`).
    j1: f64,
    j2: f64,
    j3: f64,
    j4: f64,
    e: f64,
    w: f64,
    eclipse1: Option<(Phase, Phase)>,
    eclipse2: Option<(Phase, Phase)>,
}

impl PhotometricModel {
    pub fn new(params: &OrbitalParameters, events: &EclipseEvents) -> Self {
        let a = params.separation;
        let e = params.eccentricity;
        let i = params.inclination;
        let w = params.argument_of_periapsis;
        let (r1, r2) = (params.radius1, params.radius2);
        let (t1, t2) = (params.temperature1, params.temperature2);

        let j0 = a * (1. - e * e);
        let cos2_i = i.cos() * i.cos();
        let j1 = j0 * j0 * (1. - cos2_i);
        let j2 = j0 * j0 * cos2_i;
        let j3 = 2. * e;
        let j4 = e * e;

        let r1_sq = r1 * r1;
        let r2_sq = r2 * r2;
        let z0 = 1. / (2. * r2);
        let z1 = (r2_sq - r1_sq) * z0;
        let z2 = 1. / (2. * r1);
        let z3 = (r1_sq - r2_sq) * z2;

        let bc1 = bolometric_correction(t1);
        let bc2 = bolometric_correction(t2);
        let h1 = VIS_FLUX_CONSTANT * t1.powi(4) * 10_f64.powf(bc1 / 2.5);
        let h2 = VIS_FLUX_CONSTANT * t2.powi(4) * 10_f64.powf(bc2 / 2.5);

        let max_vis_flux = (r1_sq * h1 + r2_sq * h2) * std::f64::consts::PI;
        let min_vis_mag = vis_mag_from_flux(max_vis_flux);

        Self {
            max_vis_flux,
            min_vis_mag,
            h1,
            h2,
            r1_sq,
            r2_sq,
            z0,
            z1,
            z2,
            z3,
            j1,
            j2,
            j3,
            j4,
            e,
            w,
            eclipse1: events.of_body1.map(|ev| (ev.start.phase, ev.end.phase)),
            eclipse2: events.of_body2.map(|ev| (ev.start.phase, ev.end.phase)),
        }
    }

    /// Out-of-eclipse visual flux of the system.
    pub fn max_vis_flux(&self) -> f64 {
        self.max_vis_flux
    }

    /// Out-of-eclipse visual magnitude of the system.
    pub fn min_vis_mag(&self) -> f64 {
        self.min_vis_mag
    }

    /// Which eclipse interval, if any, the phase falls into. Intervals wrapping the phase
    /// origin (`end < start`) are handled.
    pub fn region_at(&self, phase: Phase) -> EclipseRegion {
        if let Some((start, end)) = self.eclipse1 {
            if phase_in_interval(phase, start, end) {
                return EclipseRegion::OfBody1;
            }
        }
        if let Some((start, end)) = self.eclipse2 {
            if phase_in_interval(phase, start, end) {
                return EclipseRegion::OfBody2;
            }
        }
        EclipseRegion::None
    }

    /// Visual flux and magnitude at the given phase.
    pub fn flux_at(&self, phase: Phase, diagnostics: &mut Diagnostics) -> CurvePoint {
        let region = self.region_at(phase);
        if region == EclipseRegion::None {
            return CurvePoint {
                phase,
                vis_flux: self.max_vis_flux,
                vis_mag: self.min_vis_mag,
            };
        }

        let v = true_anomaly_from_phase(phase, self.e, diagnostics);

        let cvw = (self.w + v).cos();
        let cv = v.cos();
        let mut d = ((self.j1 * cvw * cvw + self.j2) / (1. + self.j3 * cv + self.j4 * cv * cv))
            .sqrt();
        if d == 0. {
            d = 1e-8;
        }

        let ca = (self.z0 * d + self.z1 / d).clamp(-1., 1.);
        let cb = (self.z2 * d + self.z3 / d).clamp(-1., 1.);
        let alpha = ca.acos();
        let beta = cb.acos();
        let overlap =
            self.r2_sq * (alpha - ca * alpha.sin()) + self.r1_sq * (beta - cb * beta.sin());

        let occluded_surface_flux = match region {
            EclipseRegion::OfBody1 => self.h1,
            _ => self.h2,
        };
        let vis_flux = self.max_vis_flux - occluded_surface_flux * overlap;

        CurvePoint {
            phase,
            vis_flux,
            vis_mag: vis_mag_from_flux(vis_flux),
        }
    }
}

/// `VIS_MAG_ZERO_POINT − (2.5/ln 10)·ln(flux)`.
fn vis_mag_from_flux(vis_flux: f64) -> f64 {
    VIS_MAG_ZERO_POINT - (2.5 / std::f64::consts::LN_10) * vis_flux.ln()
}

/// Open-interval membership with wraparound when `end < start`.
fn phase_in_interval(phase: Phase, start: Phase, end: Phase) -> bool {
    if end < start {
        phase < end || phase > start
    } else {
        phase > start && phase < end
    }
}
