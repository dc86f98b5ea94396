//! Non-fatal diagnostic channel for the numerical routines.
//!
//! Every iterative loop in the kernel carries a hard iteration cap. Hitting a cap is a
//! recoverable condition: the best available estimate is kept and a [`Diagnostic`] is recorded.
//! Diagnostics are collected in a [`Diagnostics`] list owned by the caller and mirrored to the
//! `log` facade, so the kernel stays pure and testable without capturing stdout.

use std::fmt;

use smallvec::SmallVec;

/// A single non-fatal condition encountered during a computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
    /// An iterative method stopped at its iteration cap before meeting its tolerance.
    IterationLimitReached {
        context: &'static str,
        iterations: usize,
    },
    /// The outward stepping search for a derivative sign change exhausted its step budget.
    BracketingFailed { context: &'static str },
    /// The occurrence-function scan found more minima than the two-body geometry allows.
    TooManyEclipseMinima { count: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::IterationLimitReached {
                context,
                iterations,
            } => write!(f, "iteration limit reached in {context} ({iterations} iterations)"),
            Diagnostic::BracketingFailed { context } => {
                write!(f, "failed to bracket a sign change in {context}")
            }
            Diagnostic::TooManyEclipseMinima { count } => {
                write!(f, "more than two minima of the occurrence function found ({count})")
            }
        }
    }
}

/// Collector for the diagnostics emitted during one computation.
///
/// Lists are almost always empty or hold one or two entries, hence the inline storage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    entries: SmallVec<[Diagnostic; 4]>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic and mirror it to the `log` facade.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        log::warn!("{diagnostic}");
        self.entries.push(diagnostic);
    }

    /// Append all entries of `other` to this collector.
    pub fn merge(&mut self, other: Diagnostics) {
        self.entries.extend(other.entries);
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
