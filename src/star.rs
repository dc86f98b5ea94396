//! Main-sequence star relations used to build simulator presets.
//!
//! Fitted conversions between mass, luminosity, temperature and radius, in solar units unless
//! stated otherwise. The mass–luminosity law follows the approximation in Zeilik (p. 239); the
//! piecewise `log L → log T` fit is the inverse of [`luminosity_from_temperature_and_class`]
//! for class V. All coefficients are a fitted table and are reproduced exactly.
//!
//! These are helpers for the host simulators; the eclipse/photometric kernel does not depend
//! on them.

use crate::constants::Kelvin;

/// Effective solar temperature used consistently across the radius/luminosity relations.
const SOLAR_EFFECTIVE_TEMPERATURE: Kelvin = 5808.27928315314;

/// Luminosity class selecting the temperature→luminosity fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LuminosityClass {
    I,
    II,
    III,
    IV,
    V,
}

/// Main-sequence luminosity (solar units) of a star of the given mass (solar units).
pub fn luminosity_from_mass(mass: f64) -> f64 {
    if mass < 0.43 {
        0.232220431737728 * mass.powf(2.26)
    } else {
        mass.powf(3.99)
    }
}

/// Main-sequence mass (solar units) of a star of the given luminosity (solar units).
pub fn mass_from_luminosity(luminosity: f64) -> f64 {
    if luminosity < 0.0344777675857638 {
        (luminosity / 0.232220431737728).powf(1. / 2.26)
    } else {
        luminosity.powf(1. / 3.99)
    }
}

/// Main-sequence temperature (K) of a star of the given luminosity (solar units).
///
/// Inverse of [`luminosity_from_temperature_and_class`] for class V: the ratio
/// `L / L(T(L), V)` stays within 1e-6 of 1 for luminosities between 10^−4.5 and 10^5.9
/// (2100 K to 49500 K).
pub fn temperature_from_luminosity(luminosity: f64) -> Kelvin {
    let log_l = luminosity.log10();

    let k: [f64; 7] = if log_l < -1.61 {
        [
            3.764248474913030E+00,
            1.403164363373530E-01,
            1.397096488347830E-02,
            1.462579521663530E-03,
            1.142039910577920E-04,
            5.340095201939730E-06,
            1.008975018735050E-07,
        ]
    } else if log_l < 0.22 {
        [
            3.764047490649370E+00,
            1.397208360516620E-01,
            1.319494711074820E-02,
            8.780162179209580E-04,
            -1.608767853404600E-04,
            -7.189237786420370E-05,
            -9.843092175989100E-06,
        ]
    } else if log_l < 1.48 {
        [
            3.764049359999160E+00,
            1.397005055143710E-01,
            1.328345123920250E-02,
            6.811486841687640E-04,
            5.156479540298310E-05,
            -2.309315279008070E-04,
            1.344297768709770E-05,
        ]
    } else if log_l < 2.61 {
        [
            3.762086821782850E+00,
            1.454166837534800E-01,
            6.845847579637430E-03,
            3.960765438353460E-03,
            -4.646552016102080E-04,
            -3.810074383330720E-04,
            6.235862541187450E-05,
        ]
    } else if log_l < 3.62 {
        [
            3.778550743814600E+00,
            1.298970959402520E-01,
            1.428107077288620E-03,
            1.670453994945310E-02,
            -6.932502291820940E-03,
            1.038456655083010E-03,
            -5.599205585786900E-05,
        ]
    } else if log_l < 5.43 {
        [
            3.949431460366080E+00,
            -1.542812513214520E-01,
            1.979230342627000E-01,
            -5.559610061930400E-02,
            7.995396102079130E-03,
            -6.008467485100630E-04,
            1.877705306970320E-05,
        ]
    } else {
        [
            4.367970995185480E+00,
            -3.148711784564640E-01,
            1.433999680976210E-01,
            -1.307401291373810E-02,
            -1.592553698503740E-03,
            3.579732273982070E-04,
            -1.780455698059300E-05,
        ]
    };

    let log_t = k[0]
        + log_l
            * (k[1] + log_l * (k[2] + log_l * (k[3] + log_l * (k[4] + log_l * (k[5] + log_l * k[6])))));
    10_f64.powf(log_t)
}

/// Radius (solar units) from temperature (K) and luminosity (solar units).
pub fn radius_from_temperature_and_luminosity(temperature: Kelvin, luminosity: f64) -> f64 {
    33736108.2311059 * luminosity.sqrt() / (temperature * temperature)
}

/// Luminosity (solar units) from radius (solar units) and temperature (K).
pub fn luminosity_from_radius_and_temperature(radius: f64, temperature: Kelvin) -> f64 {
    radius * radius * (temperature / SOLAR_EFFECTIVE_TEMPERATURE).powi(4)
}

/// Temperature (K) from luminosity and radius (both solar units).
pub fn temperature_from_luminosity_and_radius(luminosity: f64, radius: f64) -> Kelvin {
    SOLAR_EFFECTIVE_TEMPERATURE * (luminosity / (radius * radius)).powf(0.25)
}

/// Luminosity (solar units) of a star of the given temperature and luminosity class.
///
/// Classes I through IV use crude cubic approximations; class V is fitted against the
/// "Grids of stellar models" articles.
pub fn luminosity_from_temperature_and_class(
    temperature: Kelvin,
    class: LuminosityClass,
) -> f64 {
    let (a, b, c, d) = match class {
        LuminosityClass::V => (-321.9678859, 224.0898712, -52.79524902, 4.246993586),
        LuminosityClass::IV => (202.4459125, -153.2705238, 37.56424001, -2.951305086),
        LuminosityClass::III => (167.6481445, -111.1947972, 23.58216279, -1.538933688),
        LuminosityClass::II => (-108.7715394, 99.03111768, -28.98591327, 2.794351267),
        LuminosityClass::I => (1.363482439, 3.68952674, -1.52632182, 0.189588611),
    };
    let log_t = temperature.log10();
    let log_l = a + log_t * (b + log_t * (c + log_t * d));
    10_f64.powf(log_l)
}

/// Main-sequence temperature (K) from radius (solar units).
///
/// Valid for radii between 0.035 and 16.3 solar radii (2000 K to 55000 K); outside this range
/// the fit behaves badly.
pub fn temperature_from_radius(radius: f64) -> Kelvin {
    let k: [f64; 9] = if radius < 0.1 {
        [
            1.352167675303220E+03,
            3.359910475409220E+04,
            -7.841980110848950E+05,
            1.608437913538310E+07,
            -2.335465020889280E+08,
            2.298017687048810E+09,
            -1.455278853460670E+10,
            5.347656769974200E+10,
            -8.661772802892960E+10,
        ]
    } else if radius < 0.25 {
        [
            1.525161328287710E+03,
            1.833388724521620E+04,
            -1.705303603098400E+05,
            1.453772446494210E+06,
            -8.738576748895840E+06,
            3.551400119504610E+07,
            -9.268267416353600E+07,
            1.400731632124590E+08,
            -9.314742958565310E+07,
        ]
    } else if radius < 0.5 {
        [
            1.905043475208740E+03,
            6.714562049156160E+03,
            -1.775754147288060E+03,
            -6.118276193202280E+04,
            3.285397184949330E+05,
            -8.667711585986540E+05,
            1.306672555602760E+06,
            -1.075768596060730E+06,
            3.767573532429320E+05,
        ]
    } else if radius < 1. {
        [
            2.068117524825800E+03,
            5.563862156874740E+03,
            -4.852076407317620E+03,
            3.656262613625360E+03,
            2.735878265712290E+03,
            -8.446103667751200E+03,
            8.146783882748110E+03,
            -3.772888315875210E+03,
            7.084430070267550E+02,
        ]
    } else if radius < 1.5 {
        [
            2.391700450196890E+03,
            3.732078193208790E+03,
            -9.207325061264240E+02,
            8.337197622713310E+02,
            -6.978692420200440E+02,
            9.007965048663700E+02,
            -6.299251546228450E+02,
            2.333471670598840E+02,
            -3.483618154648830E+01,
        ]
    } else if radius < 2. {
        [
            4.141930224948910E+03,
            -9.707717257046770E+02,
            3.494675279709460E+03,
            -7.094945897782700E+02,
            -2.366741381565990E+02,
            -1.711813027298520E+01,
            1.693821363405700E+02,
            -4.906402710231200E+01,
            1.606690252467780E+00,
        ]
    } else if radius < 2.5 {
        [
            1.812823450827590E+03,
            -6.513017099155030E+03,
            1.939158041180000E+04,
            -8.882337002622440E+03,
            -4.895020183759620E+03,
            6.184021623896910E+03,
            -2.175410979657530E+03,
            2.991466833783430E+02,
            -1.088715599463440E+01,
        ]
    } else if radius < 3. {
        [
            2.584483464473080E+04,
            -2.043523950295710E+04,
            3.334179583069220E+03,
            7.408036863488060E+02,
            1.806764903314900E+03,
            -6.614503224708120E+02,
            -1.503753749805980E+02,
            8.828159374463800E+01,
            -9.711614742002040E+00,
        ]
    } else if radius < 4. {
        [
            1.502686256433260E+04,
            -2.093063831305350E+04,
            9.871332671376230E+03,
            2.324058435953190E+03,
            -1.682033711296490E+03,
            7.811434674292740E+01,
            9.729096917985110E+01,
            -2.130752285037850E+01,
            1.372521411555170E+00,
        ]
    } else if radius < 8. {
        [
            -3.498216465247100E+04,
            3.503553066540010E+04,
            -8.355506195235950E+03,
            1.051424694678840E+03,
            -1.008873086585710E+01,
            -1.685581514926510E+01,
            2.456753596167820E+00,
            -1.526639035170680E-01,
            3.710443648404950E-03,
        ]
    } else {
        [
            -8.589586311322640E+03,
            1.447346090401260E+04,
            -1.960433900218230E+03,
            1.784977622754930E+02,
            -9.862272685878200E+00,
            2.742539859816470E-01,
            -6.690161821084530E-05,
            -1.985956324720600E-04,
            3.636436670319290E-06,
        ]
    };

    let r = radius;
    k[0] + r * (k[1]
        + r * (k[2]
            + r * (k[3] + r * (k[4] + r * (k[5] + r * (k[6] + r * (k[7] + r * k[8])))))))
}

#[cfg(test)]
mod star_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mass_luminosity_round_trip() {
        for mass in [0.1, 0.3, 0.43, 1.0, 2.5, 10.0] {
            let lum = luminosity_from_mass(mass);
            assert_relative_eq!(mass_from_luminosity(lum), mass, max_relative = 1e-10);
        }
    }

    #[test]
    fn test_solar_values() {
        assert_relative_eq!(luminosity_from_mass(1.0), 1.0, max_relative = 1e-12);
        // The fitted inverse puts the 1 L☉ main-sequence star near the effective solar
        // temperature the radius relations assume.
        let t = temperature_from_luminosity(1.0);
        assert_relative_eq!(t, SOLAR_EFFECTIVE_TEMPERATURE, max_relative = 2e-3);
        let r = radius_from_temperature_and_luminosity(t, 1.0);
        assert_relative_eq!(r, 1.0, max_relative = 5e-3);
    }

    #[test]
    fn test_temperature_luminosity_inverse_consistency() {
        // L / L(T(L), V) within 1e-4 across the documented luminosity range.
        for log_l in [-4.0, -2.0, -1.0, 0.0, 1.0, 2.0, 3.0, 4.0, 5.0] {
            let lum = 10_f64.powf(log_l);
            let t = temperature_from_luminosity(lum);
            let back = luminosity_from_temperature_and_class(t, LuminosityClass::V);
            assert_relative_eq!(back, lum, max_relative = 1e-4);
        }
    }

    #[test]
    fn test_radius_temperature_luminosity_closure() {
        let lum = luminosity_from_radius_and_temperature(2.0, 7000.);
        assert_relative_eq!(
            temperature_from_luminosity_and_radius(lum, 2.0),
            7000.,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_temperature_from_radius_is_monotone_on_main_sequence() {
        let mut last = 0.0;
        for radius in [0.05, 0.2, 0.4, 0.8, 1.2, 1.8, 2.2, 2.8, 3.5, 6.0, 12.0] {
            let t = temperature_from_radius(radius);
            assert!(t > last, "radius {radius} gave non-increasing T {t}");
            last = t;
        }
    }
}
