//! Curve sampling and plot-space projection.
//!
//! [`sample_curve`] turns a parameter set and its eclipse events into a plot-ready [`Curve`]:
//! it picks the phase window for the requested view, samples the photometric model densely
//! inside eclipses and sparsely elsewhere, and projects the samples into pixel space with the
//! vertical-scaling policy described on [`SamplerConfig`].

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::constants::{Phase, DPI};
use crate::diagnostics::Diagnostics;
use crate::eclipse::EclipseEvents;
use crate::kepler::phase_from_true_anomaly;
use crate::params::OrbitalParameters;
use crate::photometry::{CurvePoint, PhotometricModel};

/// Ratio of magnitudes to natural log of flux, `2.5/ln 10`.
const MAG_PER_LN_FLUX: f64 = 2.5 / std::f64::consts::LN_10;

/// Half-width in phase of the fallback window shown around a non-occurring eclipse.
const FALLBACK_HALF_WIDTH: Phase = 0.001;

/// Sparse samples are this many dense steps apart.
const SPARSE_FACTOR: f64 = 16.;

/// Which portion of the orbit the curve covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurveView {
    /// One full period, phase `[0, 1)`.
    #[default]
    Full,
    /// Zoomed on the eclipse of body 1 (fallback window if it does not occur).
    EclipseOfBody1,
    /// Zoomed on the eclipse of body 2 (fallback window if it does not occur).
    EclipseOfBody2,
}

/// Which quantity the vertical axis plots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataMode {
    #[default]
    Flux,
    Magnitude,
}

/// Plot geometry and sampling/scaling policy.
///
/// Vertical scaling is a sequential clamp: the data band is scaled to fill the plot height
/// minus `vertical_margin_px` on each side, then shrunk so a noise band of
/// `min_flux_margin_px` stays visible on each side, then capped so a relative flux difference
/// smaller than `min_flux_difference` never spans the whole plot, and finally the band is
/// centered. Both data modes apply the same cascade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplerConfig {
    /// Plot width in pixels.
    pub plot_width: f64,
    /// Plot height in pixels.
    pub plot_height: f64,
    /// Horizontal margin around a zoomed eclipse, as a fraction of the plot width.
    pub horizontal_margin: f64,
    /// Fixed vertical margin in pixels.
    pub vertical_margin_px: f64,
    /// Pixel allowance kept visible for measurement noise above and below the band.
    pub min_flux_margin_px: f64,
    /// Smallest relative flux difference allowed to span the full plot height.
    pub min_flux_difference: f64,
    /// Pixels per dense sample.
    pub resolution: f64,
    pub view: CurveView,
    pub data_mode: DataMode,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            plot_width: 460.,
            plot_height: 280.,
            horizontal_margin: 0.05,
            vertical_margin_px: 20.,
            min_flux_margin_px: 4.,
            min_flux_difference: 1e-4,
            resolution: 2.,
            view: CurveView::Full,
            data_mode: DataMode::Flux,
        }
    }
}

/// A pixel-space sample, y growing downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
}

/// A sampled light curve with its plot projection.
///
/// `points` are ordered by increasing offset from `min_phase` (so by increasing `phase` in the
/// full view); `coords` are the same samples in pixel space. The last sample closes the plot
/// at the window end, so its `phase` wraps back past the origin: in the full view it repeats
/// phase 0 while its coordinate sits at `x = plot_width`. The curve is replaced wholesale on
/// every recomputation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    pub points: Vec<CurvePoint>,
    pub coords: Vec<PlotPoint>,
    /// Window start, absolute phase.
    pub min_phase: Phase,
    /// Window end, absolute phase (may be < `min_phase` when the window wraps).
    pub max_phase: Phase,
    /// Pixels per unit phase.
    pub x_scale: f64,
    /// Pixels per unit of the plotted quantity (flux or magnitude).
    pub y_scale: f64,
    /// Flux drop from maximum to the deepest sampled point, in flux units.
    pub plotted_vis_flux_depth: f64,
}

impl Curve {
    /// Width of the phase window.
    pub fn phase_span(&self) -> Phase {
        let span = (self.max_phase - self.min_phase).rem_euclid(1.);
        if span == 0. {
            1.
        } else {
            span
        }
    }
}

/// Phase window of a view: `(min_phase, span, x_scale)`.
fn view_window(
    params: &OrbitalParameters,
    events: &EclipseEvents,
    config: &SamplerConfig,
) -> (Phase, Phase, f64) {
    let eclipse = match config.view {
        CurveView::Full => return (0., 1., config.plot_width),
        CurveView::EclipseOfBody1 => events.of_body1.as_ref(),
        CurveView::EclipseOfBody2 => events.of_body2.as_ref(),
    };

    if let Some(eclipse) = eclipse {
        let x_scale =
            config.plot_width * (1. - 2. * config.horizontal_margin) / eclipse.duration.phase;
        let span = config.plot_width / x_scale;
        let min_phase = (eclipse.start.phase - config.horizontal_margin * span).rem_euclid(1.);
        (min_phase, span, x_scale)
    } else {
        // The eclipse does not occur; show a narrow flat window centered on the phase where
        // it would happen (the conjunction the other eclipse can never reach).
        let true_anomaly = match config.view {
            CurveView::EclipseOfBody1 => {
                std::f64::consts::FRAC_PI_2 - params.argument_of_periapsis
            }
            _ => 0.75 * DPI - params.argument_of_periapsis,
        };
        let center = phase_from_true_anomaly(true_anomaly, params.eccentricity);
        let span = 2. * FALLBACK_HALF_WIDTH;
        let min_phase = (center - FALLBACK_HALF_WIDTH).rem_euclid(1.);
        (min_phase, span, config.plot_width / span)
    }
}

/// Sample offsets (phase relative to the window start) covering `[0, span]`: a sparse pass
/// over the whole window, a dense walk over each eclipse interval, and each eclipse's
/// start/end/max-depth phase as an explicit sample when it falls in the window.
fn sample_offsets(
    events: &EclipseEvents,
    config: &SamplerConfig,
    min_phase: Phase,
    span: Phase,
) -> Vec<Phase> {
    let dense = config.resolution * span / config.plot_width;
    let sparse = SPARSE_FACTOR * dense;

    let mut offsets = Vec::with_capacity((config.plot_width / config.resolution) as usize);
    let mut offset = 0.;
    while offset < span {
        offsets.push(offset);
        offset += sparse;
    }
    offsets.push(span);

    for eclipse in [&events.of_body1, &events.of_body2].into_iter().flatten() {
        let mut along = 0.;
        while along < eclipse.duration.phase {
            let offset = (eclipse.start.phase + along - min_phase).rem_euclid(1.);
            if offset <= span {
                offsets.push(offset);
            }
            along += dense;
        }
        for phase in [
            eclipse.start.phase,
            eclipse.max_depth.phase,
            eclipse.end.phase,
        ] {
            let offset = (phase - min_phase).rem_euclid(1.);
            if offset <= span {
                offsets.push(offset);
            }
        }
    }

    offsets
        .into_iter()
        .sorted_by(f64::total_cmp)
        .dedup_by(|a, b| (a - b).abs() < 1e-12)
        .collect()
}

/// Vertical scale and band center for the sampled points under the clamping cascade.
///
/// Returns `(y_scale, band_center)` in the plotted quantity's units.
fn vertical_scale(
    points: &[CurvePoint],
    model: &PhotometricModel,
    config: &SamplerConfig,
) -> (f64, f64) {
    let usable =
        config.plot_height - 2. * config.vertical_margin_px - 2. * config.min_flux_margin_px;

    match config.data_mode {
        DataMode::Flux => {
            let min_flux = points
                .iter()
                .map(|p| p.vis_flux)
                .fold(f64::INFINITY, f64::min);
            let depth = model.max_vis_flux() - min_flux;
            let floor = config.min_flux_difference * model.max_vis_flux();
            let effective = depth.max(floor);
            (usable / effective, model.max_vis_flux() - depth / 2.)
        }
        DataMode::Magnitude => {
            let max_mag = points
                .iter()
                .map(|p| p.vis_mag)
                .fold(f64::NEG_INFINITY, f64::max);
            let depth = max_mag - model.min_vis_mag();
            // Magnitude equivalent of the minimum flux difference.
            let floor = -MAG_PER_LN_FLUX * (1. - config.min_flux_difference).ln();
            let effective = depth.max(floor);
            (usable / effective, model.min_vis_mag() + depth / 2.)
        }
    }
}

/// Sample the light curve of `params`/`events` and project it into pixel space.
pub fn sample_curve(
    params: &OrbitalParameters,
    events: &EclipseEvents,
    config: &SamplerConfig,
    diagnostics: &mut Diagnostics,
) -> Curve {
    let model = PhotometricModel::new(params, events);
    let (min_phase, span, x_scale) = view_window(params, events, config);
    let offsets = sample_offsets(events, config, min_phase, span);

    let points: Vec<CurvePoint> = offsets
        .iter()
        .map(|&offset| model.flux_at((min_phase + offset).rem_euclid(1.), diagnostics))
        .collect();

    let min_flux = points
        .iter()
        .map(|p| p.vis_flux)
        .fold(f64::INFINITY, f64::min);
    let plotted_vis_flux_depth = model.max_vis_flux() - min_flux;

    let (y_scale, band_center) = vertical_scale(&points, &model, config);
    let mid = config.plot_height / 2.;
    let coords = offsets
        .iter()
        .zip(&points)
        .map(|(&offset, point)| {
            // Brighter is higher on the plot in both modes.
            let y = match config.data_mode {
                DataMode::Flux => mid - (point.vis_flux - band_center) * y_scale,
                DataMode::Magnitude => mid + (point.vis_mag - band_center) * y_scale,
            };
            PlotPoint {
                x: offset * x_scale,
                y,
            }
        })
        .collect();

    Curve {
        points,
        coords,
        min_phase,
        max_phase: (min_phase + span).rem_euclid(1.),
        x_scale,
        y_scale,
        plotted_vis_flux_depth,
    }
}

#[cfg(test)]
mod sampler_test {
    use super::*;
    use crate::eclipse::find_eclipse_events;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::PI;

    fn edge_on_binary() -> OrbitalParameters {
        OrbitalParameters::new(10., 0., 0., PI / 2., None, None, 1., 1., 6000., 6000.).unwrap()
    }

    fn face_on_binary() -> OrbitalParameters {
        OrbitalParameters::new(10., 0., 0., 0., None, None, 1., 1., 6000., 6000.).unwrap()
    }

    fn curve_for(params: &OrbitalParameters, config: &SamplerConfig) -> Curve {
        let mut diagnostics = Diagnostics::new();
        let events = find_eclipse_events(params, &mut diagnostics).unwrap();
        let curve = sample_curve(params, &events, config, &mut diagnostics);
        assert!(diagnostics.is_empty());
        curve
    }

    #[test]
    fn test_full_view_phase_is_monotone() {
        let params = edge_on_binary();
        let curve = curve_for(&params, &SamplerConfig::default());

        assert_eq!(curve.min_phase, 0.);
        assert!(curve.points.len() > 10);
        // Non-decreasing phase, allowing only the closing sample to wrap back to 0.
        let last = curve.points.len() - 1;
        for pair in curve.points[..last].windows(2) {
            assert!(
                pair[1].phase >= pair[0].phase,
                "phase went backwards: {} -> {}",
                pair[0].phase,
                pair[1].phase
            );
        }
        assert_eq!(curve.points[last].phase, 0.);
        for pair in curve.coords.windows(2) {
            assert!(pair[1].x > pair[0].x);
        }
        assert_relative_eq!(curve.coords.last().unwrap().x, 460., max_relative = 1e-12);
    }

    #[test]
    fn test_event_phases_are_explicit_samples() {
        let params = edge_on_binary();
        let mut diagnostics = Diagnostics::new();
        let events = find_eclipse_events(&params, &mut diagnostics).unwrap();
        let curve = sample_curve(
            &params,
            &events,
            &SamplerConfig::default(),
            &mut diagnostics,
        );

        for eclipse in [&events.of_body1, &events.of_body2].into_iter().flatten() {
            for phase in [
                eclipse.start.phase,
                eclipse.max_depth.phase,
                eclipse.end.phase,
            ] {
                assert!(
                    curve
                        .points
                        .iter()
                        .any(|p| (p.phase - phase).abs() < 1e-9),
                    "missing explicit sample at phase {phase}"
                );
            }
        }
    }

    #[test]
    fn test_zoomed_window_brackets_the_eclipse() {
        let params = edge_on_binary();
        let config = SamplerConfig {
            view: CurveView::EclipseOfBody1,
            ..Default::default()
        };
        let mut diagnostics = Diagnostics::new();
        let events = find_eclipse_events(&params, &mut diagnostics).unwrap();
        let eclipse = events.of_body1.as_ref().unwrap();
        let curve = sample_curve(&params, &events, &config, &mut diagnostics);

        let expected_span = eclipse.duration.phase / (1. - 2. * config.horizontal_margin);
        assert_relative_eq!(curve.phase_span(), expected_span, max_relative = 1e-12);
        assert_relative_eq!(
            curve.x_scale,
            config.plot_width / expected_span,
            max_relative = 1e-12
        );
        // Margin fraction of the window sits before the eclipse start.
        let lead = (eclipse.start.phase - curve.min_phase).rem_euclid(1.);
        assert_relative_eq!(
            lead,
            config.horizontal_margin * expected_span,
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_non_occurring_eclipse_gets_fallback_window() {
        let params = face_on_binary();
        let config = SamplerConfig {
            view: CurveView::EclipseOfBody1,
            ..Default::default()
        };
        let curve = curve_for(&params, &config);

        assert_relative_eq!(curve.phase_span(), 0.002, max_relative = 1e-12);
        // w = 0, e = 0: the conjunction of body 1 sits at TA = π/2, phase 0.25.
        assert_relative_eq!(curve.min_phase, 0.25 - 0.001, max_relative = 1e-12);
        // Flat curve at maximum brightness.
        for point in &curve.points {
            assert_eq!(point.vis_flux, curve.points[0].vis_flux);
        }
        assert_eq!(curve.plotted_vis_flux_depth, 0.);
    }

    #[test]
    fn scaling_cascade_applies_in_both_modes() {
        let deep = edge_on_binary();
        let flat = face_on_binary();
        let config = SamplerConfig::default();
        let usable =
            config.plot_height - 2. * config.vertical_margin_px - 2. * config.min_flux_margin_px;
        let mid = config.plot_height / 2.;

        for data_mode in [DataMode::Flux, DataMode::Magnitude] {
            let config = SamplerConfig {
                data_mode,
                ..config
            };

            // Deep eclipse: the band fills the usable span, centered.
            let curve = curve_for(&deep, &config);
            let min_y = curve.coords.iter().map(|c| c.y).fold(f64::INFINITY, f64::min);
            let max_y = curve
                .coords
                .iter()
                .map(|c| c.y)
                .fold(f64::NEG_INFINITY, f64::max);
            assert_abs_diff_eq!(max_y - min_y, usable, epsilon = 1e-9);
            assert_abs_diff_eq!((min_y + max_y) / 2., mid, epsilon = 1e-9);

            // Flat curve: the minimum-flux-difference floor keeps the scale finite and the
            // line sits on the centerline.
            let curve = curve_for(&flat, &config);
            assert!(curve.y_scale.is_finite() && curve.y_scale > 0.);
            for coord in &curve.coords {
                assert_abs_diff_eq!(coord.y, mid, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_dense_sampling_inside_eclipse() {
        let params = edge_on_binary();
        let curve = curve_for(&params, &SamplerConfig::default());
        let mut diagnostics = Diagnostics::new();
        let events = find_eclipse_events(&params, &mut diagnostics).unwrap();
        let eclipse = events.of_body1.as_ref().unwrap();

        let inside: Vec<f64> = curve
            .points
            .iter()
            .map(|p| p.phase)
            .filter(|&p| p > eclipse.start.phase && p < eclipse.end.phase)
            .collect();
        // Dense step is resolution/plot_width = 2/460 in phase; the eclipse spans
        // asin(0.2)/π ≈ 0.064, so there are dozens of interior samples.
        assert!(
            inside.len() > 10,
            "only {} samples inside the eclipse",
            inside.len()
        );
    }
}
