//! Parameter-space scoring between two shells.
//!
//! [`distance`] is an unweighted Euclidean score over the nine shape parameters.
//! [`is_similar`] is the win condition of the guessing game: a conjunction of
//! per-parameter absolute tolerances.

use serde::Serialize;

use super::parameters::{ShellParameter, ShellParameters};

/// Euclidean distance over `(A, alpha, beta, a, b, mu, omega, phi, theta)`.
#[must_use]
pub fn distance(p: &ShellParameters, q: &ShellParameters) -> f64 {
    p.to_vector()
        .iter()
        .zip(q.to_vector())
        .map(|(a, b)| (a - b) * (a - b))
        .sum::<f64>()
        .sqrt()
}

/// Ordered per-parameter tolerances. Checked in order, inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityThresholds<'a> {
    pub entries: &'a [(ShellParameter, f64)],
}

impl SimilarityThresholds<'static> {
    /// Tolerances used to decide a game round.
    pub const GAME: Self = Self {
        entries: &[
            (ShellParameter::BigA, 1.5),
            (ShellParameter::Alpha, 1.5),
            (ShellParameter::Beta, 8.0),
            (ShellParameter::A, 1.0),
            (ShellParameter::B, 3.0),
            (ShellParameter::Theta, 0.25),
        ],
    };
}

impl<'a> SimilarityThresholds<'a> {
    #[must_use]
    pub const fn new(entries: &'a [(ShellParameter, f64)]) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn threshold(&self, param: ShellParameter) -> Option<f64> {
        self.entries
            .iter()
            .find_map(|&(p, t)| (p == param).then_some(t))
    }
}

impl Default for SimilarityThresholds<'static> {
    fn default() -> Self {
        Self::GAME
    }
}

/// The first parameter that exceeded its tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Mismatch {
    pub parameter: ShellParameter,
    /// Absolute difference between the two sets.
    pub difference: f64,
    pub threshold: f64,
}

/// First failing entry of `thresholds`, or `None` when every check passes.
///
/// A NaN difference counts as a failure.
#[must_use]
pub fn first_mismatch(
    p: &ShellParameters,
    q: &ShellParameters,
    thresholds: &SimilarityThresholds<'_>,
) -> Option<Mismatch> {
    thresholds.entries.iter().find_map(|&(parameter, threshold)| {
        let difference = (p.get(parameter) - q.get(parameter)).abs();
        if difference <= threshold {
            None
        } else {
            Some(Mismatch {
                parameter,
                difference,
                threshold,
            })
        }
    })
}

/// `true` when every `|p.f - q.f| <= threshold`. Stops at the first failure.
#[must_use]
pub fn is_similar(
    p: &ShellParameters,
    q: &ShellParameters,
    thresholds: &SimilarityThresholds<'_>,
) -> bool {
    first_mismatch(p, q, thresholds).is_none()
}
