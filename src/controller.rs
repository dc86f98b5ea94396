//! The stateful front of the kernel.
//!
//! [`CurveController`] owns the host-facing session state: the accumulated parameter record,
//! the view configuration and the cursor. Everything else (eclipse events, the sampled curve)
//! is derived, cached, and replaced wholesale when a parameter changes. The host UI feeds
//! [`ParameterUpdate`]s in and reads the curve and scalar summaries out; an underspecified or
//! overcontact system yields `None` everywhere, never an error.

use crate::constants::Phase;
use crate::diagnostics::Diagnostics;
use crate::eclipse::{find_eclipse_events, Body, EclipseEvents};
use crate::params::{OrbitalParameters, ParameterUpdate, PartialParameters};
use crate::sampler::{sample_curve, Curve, CurveView, DataMode, SamplerConfig};

/// Session state: current parameters, view, cursor, and the cached derived results.
#[derive(Debug, Clone, Default)]
pub struct CurveController {
    partial: PartialParameters,
    config: SamplerConfig,
    cursor_phase: Phase,
    params: Option<OrbitalParameters>,
    events: Option<EclipseEvents>,
    curve: Option<Curve>,
    dirty: bool,
    diagnostics: Diagnostics,
}

impl CurveController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SamplerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Merge a parameter update and recompute the derived state.
    ///
    /// Eclipse events are recomputed right away when the system is fully defined and not in
    /// overcontact; otherwise they are cleared. The cached curve is invalidated either way,
    /// and the diagnostics collector restarts for the new parameter set.
    pub fn set_parameters(&mut self, update: &ParameterUpdate) {
        self.diagnostics.clear();
        self.partial.apply(update);
        self.params = self.partial.resolve();
        self.events = match &self.params {
            Some(params) if !params.is_overcontact() => {
                find_eclipse_events(params, &mut self.diagnostics).ok()
            }
            _ => None,
        };
        self.invalidate();
    }

    pub fn set_view(&mut self, view: CurveView) {
        if self.config.view != view {
            self.config.view = view;
            self.invalidate();
        }
    }

    pub fn set_data_mode(&mut self, data_mode: DataMode) {
        if self.config.data_mode != data_mode {
            self.config.data_mode = data_mode;
            self.invalidate();
        }
    }

    pub fn set_plot_size(&mut self, width: f64, height: f64) {
        if self.config.plot_width != width || self.config.plot_height != height {
            self.config.plot_width = width;
            self.config.plot_height = height;
            self.invalidate();
        }
    }

    fn invalidate(&mut self) {
        self.curve = None;
        self.dirty = true;
    }

    /// True when every geometric parameter has been supplied and validated (masses stay
    /// optional).
    pub fn system_is_defined(&self) -> bool {
        self.params.is_some()
    }

    /// Overcontact check on the current parameter record; `false` while underspecified.
    pub fn is_overcontact(&self) -> bool {
        self.partial.is_overcontact()
    }

    /// Orbital period in seconds; `None` without both masses.
    pub fn system_period(&self) -> Option<f64> {
        self.params.as_ref()?.system_period()
    }

    /// Duration of body 1's eclipse in seconds; `Some(0.0)` when the system and masses are
    /// defined but the eclipse does not occur, `None` when the period is unknown.
    pub fn eclipse_of_body1_duration(&self) -> Option<f64> {
        self.eclipse_duration(Body::Body1)
    }

    /// Duration of body 2's eclipse in seconds, same convention as body 1's.
    pub fn eclipse_of_body2_duration(&self) -> Option<f64> {
        self.eclipse_duration(Body::Body2)
    }

    fn eclipse_duration(&self, body: Body) -> Option<f64> {
        let period = self.system_period()?;
        let events = self.events.as_ref()?;
        Some(match events.of_body(body) {
            Some(eclipse) => period * eclipse.duration.phase,
            None => 0.,
        })
    }

    /// Flux drop of the most recently sampled curve; `None` before the first `update`.
    pub fn plotted_vis_flux_depth(&self) -> Option<f64> {
        self.curve.as_ref().map(|c| c.plotted_vis_flux_depth)
    }

    /// Set the cursor, in absolute phase.
    pub fn set_cursor_phase(&mut self, phase: Phase) {
        self.cursor_phase = phase.rem_euclid(1.);
    }

    /// The cursor, in absolute phase.
    pub fn cursor_phase(&self) -> Phase {
        self.cursor_phase
    }

    /// Set the cursor from a window-relative position in `[0, 1]` of the current curve's
    /// phase window. Without a sampled curve the window is the full period.
    pub fn set_window_cursor_phase(&mut self, relative: f64) {
        let (min_phase, span) = self.window();
        self.cursor_phase = (min_phase + relative * span).rem_euclid(1.);
    }

    /// The cursor as a window-relative position in the current curve's phase window.
    pub fn window_cursor_phase(&self) -> f64 {
        let (min_phase, span) = self.window();
        (self.cursor_phase - min_phase).rem_euclid(1.) / span
    }

    fn window(&self) -> (Phase, Phase) {
        match &self.curve {
            Some(curve) => (curve.min_phase, curve.phase_span()),
            None => (0., 1.),
        }
    }

    /// Sample (or return the cached) curve for the current parameters and view.
    ///
    /// Idempotent: absent intervening parameter or view changes, repeated calls return the
    /// identical cached curve. `None` while the system is underspecified or in overcontact.
    pub fn update(&mut self) -> Option<&Curve> {
        if self.dirty {
            if let (Some(params), Some(events)) = (&self.params, &self.events) {
                self.curve = Some(sample_curve(
                    params,
                    events,
                    &self.config,
                    &mut self.diagnostics,
                ));
            }
            self.dirty = false;
        }
        self.curve.as_ref()
    }

    /// Non-fatal diagnostics for the current parameter set; the collector restarts on every
    /// [`set_parameters`](Self::set_parameters) call, so entries never go stale.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Hand over and clear the current diagnostics.
    pub fn take_diagnostics(&mut self) -> Diagnostics {
        std::mem::take(&mut self.diagnostics)
    }
}
