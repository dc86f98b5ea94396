//! Eclipse occurrence and timing in true-anomaly space.
//!
//! For a given orbit geometry this module determines whether each body's disk crosses the
//! other's and, if so, the start, end and maximum-depth true anomalies of the eclipse.
//!
//! The projected-separation-equals-sum-of-radii condition is encoded as a trigonometric
//! *occlusion-depth* function of the true anomaly `v` (negative where the disks overlap at the
//! candidate point) whose zero crossings are the eclipse boundaries. Minima candidates come
//! from a sign-change scan of the depth function's derivative; all root refinement goes through
//! the shared safeguarded finder in [`crate::root_finding`].

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::constants::{Phase, Radian, DPI};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::errors::LightcurveError;
use crate::kepler::{phase_from_true_anomaly, principal_angle};
use crate::params::OrbitalParameters;
use crate::root_finding::refine_root;

/// Number of equal steps of the occurrence scan over one full turn.
const SCAN_STEPS: usize = 100;
/// Residual tolerance of the safeguarded root refinements.
const ROOT_TOLERANCE: f64 = 5e-15;
/// Hard cap of the safeguarded root refinements.
const ROOT_MAX_ITERATIONS: usize = 200;
/// Step of the outward max-depth bracket search (π/100).
const BRACKET_STEP: Radian = PI / 100.;
/// Step budget per side of the max-depth bracket search.
const BRACKET_MAX_STEPS: usize = 50;

/// An orbital position expressed both as a true anomaly and as a phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitPoint {
    pub true_anomaly: Radian,
    pub phase: Phase,
}

/// Extent of an eclipse, as a true-anomaly span and a phase span (both wrapped, ≥ 0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitSpan {
    pub true_anomaly: Radian,
    pub phase: Phase,
}

/// Timing of one body's eclipse. Absent (`None` in [`EclipseEvents`]) when it does not occur.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EclipseEvent {
    pub start: OrbitPoint,
    pub end: OrbitPoint,
    pub max_depth: OrbitPoint,
    pub duration: OrbitSpan,
}

/// The two per-system eclipse slots. A minimum of the occurrence function with
/// `(v + w) mod 2π < π` belongs to body 1, otherwise to body 2 — the `−w` and `π−w` points
/// coincide with the z = 0 plane crossings, which frame each eclipse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EclipseEvents {
    pub of_body1: Option<EclipseEvent>,
    pub of_body2: Option<EclipseEvent>,
}

impl EclipseEvents {
    pub fn of_body(&self, body: Body) -> Option<&EclipseEvent> {
        match body {
            Body::Body1 => self.of_body1.as_ref(),
            Body::Body2 => self.of_body2.as_ref(),
        }
    }
}

/// Identifies which body is being eclipsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Body {
    Body1,
    Body2,
}

/// Trigonometric encoding of the occlusion condition for one orbit geometry.
///
/// With `R = (r1+r2)/a`, `S1 = sin²i`, `S2 = cos²i`:
/// `K1 = (1−e²)²S1`, `K2 = −e²R²`, `K3 = −2eR²`, `K4 = (1−e²)²S2 − R²`, and
/// `L1 = −K1`, `L2 = 2K2`, `L3 = K3`. The depth function
/// `K1·cos²(v+w) + K2·cos²v + K3·cos v + K4` is negative exactly where the projected
/// separation falls below `r1 + r2`.
struct OcclusionGeometry {
    k1: f64,
    k2: f64,
    k3: f64,
    k4: f64,
    l1: f64,
    l2: f64,
    l3: f64,
    s1: f64,
    s2: f64,
    e: f64,
    w: Radian,
}

impl OcclusionGeometry {
    fn new(params: &OrbitalParameters) -> Self {
        let e = params.eccentricity;
        let w = params.argument_of_periapsis;
        let r = (params.radius1 + params.radius2) / params.separation;

        let s2 = params.inclination.cos() * params.inclination.cos();
        let s1 = 1. - s2;
        let one_minus_e2 = 1. - e * e;
        let k1 = one_minus_e2 * one_minus_e2 * s1;
        let k2 = -e * e * r * r;
        let k3 = -2. * e * r * r;
        let k4 = one_minus_e2 * one_minus_e2 * s2 - r * r;

        Self {
            k1,
            k2,
            k3,
            k4,
            l1: -k1,
            l2: 2. * k2,
            l3: k3,
            s1,
            s2,
            e,
            w,
        }
    }

    /// Derivative-like occurrence function whose sign changes locate depth extrema.
    fn occurrence(&self, v: Radian) -> f64 {
        self.l1 * (2. * (v + self.w)).sin() - v.sin() * (self.l2 * v.cos() + self.l3)
    }

    /// Occlusion depth; negative where the disks overlap.
    fn depth(&self, v: Radian) -> f64 {
        let cvw = (v + self.w).cos();
        let cv = v.cos();
        self.k1 * cvw * cvw + self.k2 * cv * cv + self.k3 * cv + self.k4
    }

    /// Derivative of the projected-distance function; its zero inside an eclipse marks the
    /// true maximum depth (not generally the same point as the occurrence-function minimum).
    fn distance_derivative(&self, v: Radian) -> f64 {
        let s3 = (v + self.w).cos();
        let s4 = 1. + self.e * v.cos();
        (((self.s1 * s3 * s3 + self.s2) * self.e * v.sin() / s4)
            - self.s1 * s3 * (v + self.w).sin())
            / (s4 * s4)
    }
}

/// Find, for the given parameters, whether and when each body eclipses the other.
///
/// Returns `Err(OvercontactSystem)` for overcontact configurations, where the overlap
/// geometry is undefined. Numerical non-convergence and a scan finding more than two minima
/// are recorded in `diagnostics` while computation proceeds with the best estimates.
pub fn find_eclipse_events(
    params: &OrbitalParameters,
    diagnostics: &mut Diagnostics,
) -> Result<EclipseEvents, LightcurveError> {
    if params.is_overcontact() {
        return Err(LightcurveError::OvercontactSystem);
    }

    let geom = OcclusionGeometry::new(params);
    let w = geom.w;
    let e = geom.e;

    // Scan the occurrence function for sign changes; each refined root with negative
    // occlusion depth is an eclipse minimum candidate.
    let step = DPI / SCAN_STEPS as f64;
    let mut minima: Vec<Radian> = Vec::new();
    let mut v_last = -step;
    let mut neg_last = geom.occurrence(v_last) < 0.;

    for j in 0..SCAN_STEPS {
        let v = j as f64 * step;
        let neg = geom.occurrence(v) < 0.;
        if neg != neg_last {
            let root = refine_root(
                |x| geom.occurrence(x),
                v_last,
                v,
                ROOT_TOLERANCE,
                ROOT_MAX_ITERATIONS,
            );
            if !root.converged {
                diagnostics.push(Diagnostic::IterationLimitReached {
                    context: "eclipse occurrence refinement",
                    iterations: root.iterations,
                });
            }
            if geom.depth(root.value) < 0. {
                // Normalized so that min + w lands in [0, 2π)
                minima.push(principal_angle(root.value + w) - w);
            }
        }
        neg_last = neg;
        v_last = v;
    }

    if minima.len() > 2 {
        // Two-body geometry admits at most one minimum per body; report the
        // inconsistency and keep going with what the scan found.
        diagnostics.push(Diagnostic::TooManyEclipseMinima {
            count: minima.len(),
        });
    }

    let mut events = EclipseEvents::default();

    for minimum in minima {
        // The z = 0 plane crossings at −w and π−w frame every eclipse; the boundary roots of
        // the depth function are searched between the minimum and the bracketing crossings.
        let ends: [Radian; 2] = if minimum + w < PI {
            [-w, PI - w]
        } else {
            [PI - w, DPI - w]
        };

        let mut boundaries = [0.0_f64; 2];
        for (slot, end) in boundaries.iter_mut().zip(ends) {
            let root = refine_root(
                |x| geom.depth(x),
                minimum,
                end,
                ROOT_TOLERANCE,
                ROOT_MAX_ITERATIONS,
            );
            if !root.converged {
                diagnostics.push(Diagnostic::IterationLimitReached {
                    context: "eclipse boundary refinement",
                    iterations: root.iterations,
                });
            }
            *slot = principal_angle(root.value + w) - w;
        }

        let start_ta = boundaries[0];
        let end_ta = boundaries[1];
        let start = OrbitPoint {
            true_anomaly: start_ta,
            phase: phase_from_true_anomaly(start_ta, e),
        };
        let end = OrbitPoint {
            true_anomaly: end_ta,
            phase: phase_from_true_anomaly(end_ta, e),
        };
        let duration = OrbitSpan {
            true_anomaly: (end_ta - start_ta).rem_euclid(DPI),
            phase: (end.phase - start.phase).rem_euclid(1.),
        };

        let max_depth_ta = locate_max_depth(&geom, start_ta, duration.true_anomaly, diagnostics);
        let max_depth = OrbitPoint {
            true_anomaly: max_depth_ta,
            phase: phase_from_true_anomaly(max_depth_ta, e),
        };

        let event = EclipseEvent {
            start,
            end,
            max_depth,
            duration,
        };
        if minimum + w < PI {
            events.of_body1 = Some(event);
        } else {
            events.of_body2 = Some(event);
        }
    }

    Ok(events)
}

/// Locate the true anomaly of maximum eclipse depth.
///
/// The projected-distance derivative is bracketed by stepping outward from the eclipse
/// midpoint until it changes sign on each side, then refined with the shared root finder.
fn locate_max_depth(
    geom: &OcclusionGeometry,
    start_ta: Radian,
    duration_ta: Radian,
    diagnostics: &mut Diagnostics,
) -> Radian {
    let v_mid = start_ta + duration_ta / 2.;

    let mut v = v_mid;
    let mut counter = 0;
    let v_left = loop {
        v -= BRACKET_STEP;
        counter += 1;
        if geom.distance_derivative(v) < 0. {
            break v;
        }
        if counter > BRACKET_MAX_STEPS {
            diagnostics.push(Diagnostic::BracketingFailed {
                context: "max-depth search (left)",
            });
            break v;
        }
    };

    let mut v = v_mid;
    let mut counter = 0;
    let v_right = loop {
        v += BRACKET_STEP;
        counter += 1;
        if geom.distance_derivative(v) > 0. {
            break v;
        }
        if counter > BRACKET_MAX_STEPS {
            diagnostics.push(Diagnostic::BracketingFailed {
                context: "max-depth search (right)",
            });
            break v;
        }
    };

    let root = refine_root(
        |x| geom.distance_derivative(x),
        v_left,
        v_right,
        ROOT_TOLERANCE,
        ROOT_MAX_ITERATIONS,
    );
    if !root.converged {
        diagnostics.push(Diagnostic::IterationLimitReached {
            context: "max-depth refinement",
            iterations: root.iterations,
        });
    }
    principal_angle(root.value + geom.w) - geom.w
}
