//! Safeguarded scalar root refinement.
//!
//! One routine serves the three eclipse-solver call sites (occurrence-function roots, eclipse
//! boundary crossings, maximum-depth derivative zero): inverse-quadratic interpolation with a
//! secant step when two ordinates coincide, guarded by a bisection fallback whenever the
//! interpolated point leaves the current bracket.

/// Outcome of a root refinement.
///
/// `value` is the best estimate found; when `converged` is false the iteration cap was reached
/// and the caller is expected to record a diagnostic and continue with `value`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootResult {
    pub value: f64,
    pub converged: bool,
    pub iterations: usize,
}

/// Refine a root of `f` starting from the points `a` and `b`.
///
/// `a` and `b` should straddle (or closely frame) a sign change of `f`. Iteration stops once
/// `|f(x)| <= tol` or after `max_iter` iterations.
///
/// Arguments
/// ---------------
/// * `f`: the function whose root is sought
/// * `a`, `b`: the initial bracket, `b` being the more recent/better estimate
/// * `tol`: residual tolerance on `|f|`
/// * `max_iter`: hard iteration cap
///
/// Return
/// ----------
/// * A [`RootResult`] holding the estimate, the convergence flag and the iteration count.
pub fn refine_root<F>(f: F, a: f64, b: f64, tol: f64, max_iter: usize) -> RootResult
where
    F: Fn(f64) -> f64,
{
    let mut a = a;
    let mut b = b;
    let mut c = a;
    let mut d = b;

    for iteration in 1..=max_iter {
        let fa = f(a);
        let fb = f(b);
        let fc = f(c);

        d = if fa != fc && fb != fc {
            // Inverse quadratic interpolation through (a, fa), (b, fb), (c, fc)
            (a * fb * fc) / ((fa - fb) * (fa - fc))
                + (b * fa * fc) / ((fb - fa) * (fb - fc))
                + (c * fa * fb) / ((fc - fa) * (fc - fb))
        } else if fb != fa {
            b - fb * ((b - a) / (fb - fa))
        } else {
            f64::NAN
        };

        // Bisection safeguard: reject steps that leave the interval between the midpoint and b
        let m = (a + b) / 2.;
        if !d.is_finite() || (m < b && (d > b || d < m)) || (m > b && (d < b || d > m)) {
            d = m;
        }

        let fd = f(d);
        if fb * fd < 0. {
            a = b;
        }
        c = b;
        b = d;

        if fd.abs() <= tol {
            return RootResult {
                value: d,
                converged: true,
                iterations: iteration,
            };
        }
    }

    RootResult {
        value: d,
        converged: false,
        iterations: max_iter,
    }
}
