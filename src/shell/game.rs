//! One round of the shell guessing game.
//!
//! The player sees a random target shell and tunes a guess until it falls within
//! [`SimilarityThresholds::GAME`] of the target. Aperture orientation, `b` and the
//! whorl count are copied from the target and cannot be changed.

use rand::Rng;

use super::parameters::{ParameterError, ParameterRanges, ShellParameter, ShellParameters};
use super::similarity::{Mismatch, SimilarityThresholds, distance, first_mismatch, is_similar};

#[derive(Debug, Clone, PartialEq)]
pub struct GameRound {
    target: ShellParameters,
    guess: ShellParameters,
}

impl GameRound {
    /// Parameters the guess inherits from the target.
    pub const FIXED: [ShellParameter; 5] = [
        ShellParameter::Mu,
        ShellParameter::Phi,
        ShellParameter::Omega,
        ShellParameter::B,
        ShellParameter::Theta,
    ];

    #[must_use]
    pub fn new() -> Self {
        Self::new_with(&mut rand::rng())
    }

    pub fn new_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::with_target(ShellParameters::random_with(rng))
    }

    /// Starts a round against a known target. The guess begins at the range minimums.
    #[must_use]
    pub fn with_target(target: ShellParameters) -> Self {
        let mut guess = ShellParameters::new();
        guess.copy_from(&target, &Self::FIXED);
        log::debug!("new game round, target {target}");
        Self { target, guess }
    }

    #[must_use]
    pub fn is_fixed(param: ShellParameter) -> bool {
        Self::FIXED.contains(&param)
    }

    #[must_use]
    pub const fn target(&self) -> &ShellParameters {
        &self.target
    }

    #[must_use]
    pub const fn guess(&self) -> &ShellParameters {
        &self.guess
    }

    /// Moves one guess parameter, clamped into [`ParameterRanges::DEFAULT`].
    ///
    /// Returns the value that was stored.
    pub fn set_guess(&mut self, param: ShellParameter, value: f64) -> Result<f64, ParameterError> {
        if Self::is_fixed(param) {
            return Err(ParameterError::FixedParameter(param));
        }
        if !value.is_finite() {
            return Err(ParameterError::NonFiniteValue(param));
        }
        let clamped = ParameterRanges::DEFAULT.range(param).clamp(value);
        self.guess.set(param, clamped)?;
        Ok(clamped)
    }

    #[must_use]
    pub fn is_won(&self) -> bool {
        is_similar(&self.guess, &self.target, &SimilarityThresholds::GAME)
    }

    /// Euclidean distance between guess and target.
    #[must_use]
    pub fn distance(&self) -> f64 {
        distance(&self.guess, &self.target)
    }

    #[must_use]
    pub fn mismatch(&self) -> Option<Mismatch> {
        first_mismatch(&self.guess, &self.target, &SimilarityThresholds::GAME)
    }
}

impl Default for GameRound {
    fn default() -> Self {
        Self::new()
    }
}
