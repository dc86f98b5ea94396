//! Orbital and stellar parameters of the two-body system.
//!
//! [`OrbitalParameters`] is the immutable, validated value object the solvers consume.
//! [`ParameterUpdate`] is the flat, all-optional record the host UI feeds into
//! [`CurveController::set_parameters`](crate::controller::CurveController::set_parameters);
//! angles arrive in degrees there and are converted on merge.

use serde::{Deserialize, Serialize};

use crate::constants::{Degree, Kelvin, Radian, DPI, GRAVITATIONAL_CONSTANT, RADEG};
use crate::errors::LightcurveError;

/// Orbital elements and physical properties of a two-body system.
///
/// Units:
/// * `separation`: length (meters when period output is wanted)
/// * `eccentricity`: unitless, in `[0, 1)`
/// * `argument_of_periapsis`: radians
/// * `inclination`: radians (π/2 is edge-on)
/// * `mass1`, `mass2`: kg, optional — only gate period and duration-in-time outputs
/// * `radius1`, `radius2`: same length unit as `separation`
/// * `temperature1`, `temperature2`: Kelvin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitalParameters {
    pub separation: f64,
    pub eccentricity: f64,
    pub argument_of_periapsis: Radian,
    pub inclination: Radian,
    pub mass1: Option<f64>,
    pub mass2: Option<f64>,
    pub radius1: f64,
    pub radius2: f64,
    pub temperature1: Kelvin,
    pub temperature2: Kelvin,
}

impl OrbitalParameters {
    /// Build a validated parameter set.
    ///
    /// Returns `InvalidParameter` when a value is outside the documented domain
    /// (`separation`, radii, temperatures and masses strictly positive, eccentricity in
    /// `[0, 1)`). Angles are unconstrained.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        separation: f64,
        eccentricity: f64,
        argument_of_periapsis: Radian,
        inclination: Radian,
        mass1: Option<f64>,
        mass2: Option<f64>,
        radius1: f64,
        radius2: f64,
        temperature1: Kelvin,
        temperature2: Kelvin,
    ) -> Result<Self, LightcurveError> {
        let positive = [
            ("separation", separation),
            ("radius1", radius1),
            ("radius2", radius2),
            ("temperature1", temperature1),
            ("temperature2", temperature2),
        ];
        for (name, value) in positive {
            if !(value > 0.) || !value.is_finite() {
                return Err(LightcurveError::InvalidParameter { name, value });
            }
        }
        if !(0. ..1.).contains(&eccentricity) {
            return Err(LightcurveError::InvalidParameter {
                name: "eccentricity",
                value: eccentricity,
            });
        }
        for (name, value) in [("mass1", mass1), ("mass2", mass2)] {
            if let Some(value) = value {
                if !(value > 0.) || !value.is_finite() {
                    return Err(LightcurveError::InvalidParameter { name, value });
                }
            }
        }

        Ok(Self {
            separation,
            eccentricity,
            argument_of_periapsis,
            inclination,
            mass1,
            mass2,
            radius1,
            radius2,
            temperature1,
            temperature2,
        })
    }

    /// True when the bodies' radii sum exceeds their minimum separation,
    /// `(r1 + r2)/(1 − e) >= a`. Overlap physics is undefined in that configuration and the
    /// eclipse and photometric solvers must not be invoked.
    pub fn is_overcontact(&self) -> bool {
        let min_separation = (self.radius1 + self.radius2) / (1. - self.eccentricity);
        self.separation <= min_separation
    }

    /// Orbital period in seconds from Kepler's third law, `P = √(4π²a³/(G(m1+m2)))`.
    ///
    /// `None` when either mass is missing.
    pub fn system_period(&self) -> Option<f64> {
        let (m1, m2) = (self.mass1?, self.mass2?);
        let a = self.separation;
        Some((DPI * DPI * a * a * a / (GRAVITATIONAL_CONSTANT * (m1 + m2))).sqrt())
    }
}

/// Flat, all-optional parameter record merged by the controller.
///
/// `longitude` and `inclination` are in **degrees** (host-UI units). The merge converts
/// `longitude` to the argument of periapsis as `(90 − longitude)` degrees wrapped to
/// `[0, 360)` (the host measures longitude from the plane of the sky, the kernel measures
/// the argument from the line of sight), and `inclination` directly to radians.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterUpdate {
    pub separation: Option<f64>,
    pub eccentricity: Option<f64>,
    pub longitude: Option<Degree>,
    pub inclination: Option<Degree>,
    pub mass1: Option<f64>,
    pub mass2: Option<f64>,
    pub radius1: Option<f64>,
    pub radius2: Option<f64>,
    pub temperature1: Option<Kelvin>,
    pub temperature2: Option<Kelvin>,
}

/// Accumulating parameter state held by the controller; fields stay `None` until the host has
/// supplied them.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct PartialParameters {
    pub separation: Option<f64>,
    pub eccentricity: Option<f64>,
    pub argument_of_periapsis: Option<Radian>,
    pub inclination: Option<Radian>,
    pub mass1: Option<f64>,
    pub mass2: Option<f64>,
    pub radius1: Option<f64>,
    pub radius2: Option<f64>,
    pub temperature1: Option<Kelvin>,
    pub temperature2: Option<Kelvin>,
}

impl PartialParameters {
    /// Merge the fields present in `update`, converting degree-valued angles to radians
    /// (`longitude` via the `(90 − longitude)` host convention).
    pub fn apply(&mut self, update: &ParameterUpdate) {
        if let Some(v) = update.separation {
            self.separation = Some(v);
        }
        if let Some(v) = update.eccentricity {
            self.eccentricity = Some(v);
        }
        if let Some(v) = update.longitude {
            self.argument_of_periapsis = Some((90. - v).rem_euclid(360.) * RADEG);
        }
        if let Some(v) = update.inclination {
            self.inclination = Some(v * RADEG);
        }
        if let Some(v) = update.mass1 {
            self.mass1 = Some(v);
        }
        if let Some(v) = update.mass2 {
            self.mass2 = Some(v);
        }
        if let Some(v) = update.radius1 {
            self.radius1 = Some(v);
        }
        if let Some(v) = update.radius2 {
            self.radius2 = Some(v);
        }
        if let Some(v) = update.temperature1 {
            self.temperature1 = Some(v);
        }
        if let Some(v) = update.temperature2 {
            self.temperature2 = Some(v);
        }
    }

    /// The fully-defined parameter set, if temperature, radius, separation, eccentricity,
    /// argument and inclination are all present and valid. Masses stay optional.
    pub fn resolve(&self) -> Option<OrbitalParameters> {
        OrbitalParameters::new(
            self.separation?,
            self.eccentricity?,
            self.argument_of_periapsis?,
            self.inclination?,
            self.mass1,
            self.mass2,
            self.radius1?,
            self.radius2?,
            self.temperature1?,
            self.temperature2?,
        )
        .ok()
    }

    /// Overcontact check on the partial state; `false` while the geometry fields are missing.
    pub fn is_overcontact(&self) -> bool {
        match (
            self.separation,
            self.eccentricity,
            self.radius1,
            self.radius2,
        ) {
            (Some(a), Some(e), Some(r1), Some(r2)) => a <= (r1 + r2) / (1. - e),
            _ => false,
        }
    }
}

#[cfg(test)]
mod params_test {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn detached() -> OrbitalParameters {
        OrbitalParameters::new(10., 0., 0., PI / 2., None, None, 1., 1., 6000., 6000.).unwrap()
    }

    #[test]
    fn test_validation_rejects_out_of_domain() {
        let bad_e = OrbitalParameters::new(10., 1., 0., 0., None, None, 1., 1., 6000., 6000.);
        assert_eq!(
            bad_e,
            Err(LightcurveError::InvalidParameter {
                name: "eccentricity",
                value: 1.
            })
        );

        let bad_r = OrbitalParameters::new(10., 0., 0., 0., None, None, -1., 1., 6000., 6000.);
        assert_eq!(
            bad_r,
            Err(LightcurveError::InvalidParameter {
                name: "radius1",
                value: -1.
            })
        );
    }

    #[test]
    fn test_overcontact_flag() {
        assert!(!detached().is_overcontact());

        // (3 + 3)/(1 − 0.5) = 12 >= 10
        let over =
            OrbitalParameters::new(10., 0.5, 0., PI / 2., None, None, 3., 3., 6000., 6000.)
                .unwrap();
        assert!(over.is_overcontact());
    }

    #[test]
    fn test_system_period_requires_masses() {
        assert_eq!(detached().system_period(), None);

        let mut p = detached();
        p.mass1 = Some(2.0e30);
        p.mass2 = Some(2.0e30);
        let period = p.system_period().unwrap();
        let expected = (4. * PI * PI * 1000. / (GRAVITATIONAL_CONSTANT * 4.0e30)).sqrt();
        assert_relative_eq!(period, expected, max_relative = 1e-12);
    }

    #[test]
    fn test_longitude_maps_to_argument_of_periapsis() {
        // The host measures longitude from the plane of the sky: w = (90 − longitude)°,
        // wrapped to [0, 360).
        for (longitude, expected) in [
            (90., 0.),
            (0., PI / 2.),
            (180., 3. * PI / 2.),
            (450., 0.),
            (-270., 0.),
        ] {
            let mut partial = PartialParameters::default();
            partial.apply(&ParameterUpdate {
                longitude: Some(longitude),
                ..Default::default()
            });
            let w = partial.argument_of_periapsis.unwrap();
            assert_relative_eq!(w, expected, max_relative = 1e-12, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_partial_merge_and_resolve() {
        let mut partial = PartialParameters::default();
        partial.apply(&ParameterUpdate {
            separation: Some(10.),
            eccentricity: Some(0.),
            longitude: Some(90.),
            inclination: Some(90.),
            ..Default::default()
        });
        // Radii and temperatures still missing.
        assert_eq!(partial.resolve(), None);

        partial.apply(&ParameterUpdate {
            radius1: Some(1.),
            radius2: Some(1.),
            temperature1: Some(6000.),
            temperature2: Some(6000.),
            ..Default::default()
        });
        let resolved = partial.resolve().unwrap();
        assert_relative_eq!(resolved.inclination, PI / 2., max_relative = 1e-12);
        assert_eq!(resolved.argument_of_periapsis, 0.);
        assert_eq!(resolved.mass1, None);
    }

    #[test]
    fn test_partial_overcontact() {
        let mut partial = PartialParameters::default();
        assert!(!partial.is_overcontact());
        partial.apply(&ParameterUpdate {
            separation: Some(10.),
            eccentricity: Some(0.5),
            radius1: Some(3.),
            radius2: Some(3.),
            ..Default::default()
        });
        assert!(partial.is_overcontact());
    }
}
