use thiserror::Error;

/// Errors produced when validating inputs at the kernel boundary.
///
/// Numerical non-convergence is deliberately *not* an error: root-finding and Kepler-inversion
/// iteration caps are recoverable conditions reported through
/// [`Diagnostics`](crate::diagnostics::Diagnostics) while computation proceeds with the best
/// available estimate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LightcurveError {
    #[error("parameter `{name}` is out of domain: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("system is in overcontact: (radius1 + radius2)/(1 - eccentricity) >= separation")]
    OvercontactSystem,
}
