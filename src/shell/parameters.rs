//! Shape parameters of the seashell surface family.
//!
//! A [`ShellParameters`] value is plain data: nine shape parameters plus the
//! handedness constant `d`. The allowed interval of each field lives in a single
//! table, [`ParameterRanges::DEFAULT`], shared by default construction, clamping
//! and random sampling.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParameterError {
    #[error("unknown shell parameter `{0}`")]
    UnknownParameter(String),
    #[error("unknown shell preset `{0}` (expected shell1..shell4)")]
    UnknownPreset(String),
    #[error("value for `{0}` must be finite")]
    NonFiniteValue(ShellParameter),
    #[error("handedness `d` must be finite")]
    NonFiniteHandedness,
    #[error("`{0}` is fixed by the target shell in this round")]
    FixedParameter(ShellParameter),
}

/// One of the nine adjustable shape parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShellParameter {
    #[serde(rename = "A")]
    BigA,
    #[serde(rename = "alpha")]
    Alpha,
    #[serde(rename = "beta")]
    Beta,
    #[serde(rename = "a")]
    A,
    #[serde(rename = "b")]
    B,
    #[serde(rename = "mu")]
    Mu,
    #[serde(rename = "omega")]
    Omega,
    #[serde(rename = "phi")]
    Phi,
    #[serde(rename = "theta")]
    Theta,
}

impl ShellParameter {
    /// All parameters in parameter-vector order.
    pub const ALL: [Self; 9] = [
        Self::BigA,
        Self::Alpha,
        Self::Beta,
        Self::A,
        Self::B,
        Self::Mu,
        Self::Omega,
        Self::Phi,
        Self::Theta,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::BigA => "A",
            Self::Alpha => "alpha",
            Self::Beta => "beta",
            Self::A => "a",
            Self::B => "b",
            Self::Mu => "mu",
            Self::Omega => "omega",
            Self::Phi => "phi",
            Self::Theta => "theta",
        }
    }
}

impl fmt::Display for ShellParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShellParameter {
    type Err = ParameterError;

    // `A` and `a` are different parameters, so names are case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.name() == name)
            .ok_or_else(|| ParameterError::UnknownParameter(name.to_string()))
    }
}

/// Closed interval `[min, max]` for one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterRange {
    pub min: f64,
    pub max: f64,
}

impl ParameterRange {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn clamp(self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Uniform sample in `[min, max]`.
    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> f64 {
        rng.random_range(self.min..=self.max)
    }
}

/// Range table for every shape parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterRanges {
    #[serde(rename = "A")]
    pub big_a: ParameterRange,
    pub alpha: ParameterRange,
    pub beta: ParameterRange,
    pub a: ParameterRange,
    pub b: ParameterRange,
    pub mu: ParameterRange,
    pub omega: ParameterRange,
    pub phi: ParameterRange,
    pub theta: ParameterRange,
}

impl ParameterRanges {
    pub const DEFAULT: Self = Self {
        big_a: ParameterRange::new(5.0, 13.0),
        alpha: ParameterRange::new(80.0, 90.0),
        beta: ParameterRange::new(0.0, 85.0),
        a: ParameterRange::new(1.0, 6.0),
        b: ParameterRange::new(1.0, 6.0),
        mu: ParameterRange::new(0.0, 45.0),
        omega: ParameterRange::new(-10.0, 10.0),
        phi: ParameterRange::new(20.0, 80.0),
        theta: ParameterRange::new(2.0, 16.0),
    };

    #[must_use]
    pub const fn range(&self, param: ShellParameter) -> ParameterRange {
        match param {
            ShellParameter::BigA => self.big_a,
            ShellParameter::Alpha => self.alpha,
            ShellParameter::Beta => self.beta,
            ShellParameter::A => self.a,
            ShellParameter::B => self.b,
            ShellParameter::Mu => self.mu,
            ShellParameter::Omega => self.omega,
            ShellParameter::Phi => self.phi,
            ShellParameter::Theta => self.theta,
        }
    }

    /// Returns a copy of `params` with every field clamped into its range. `d` is untouched.
    #[must_use]
    pub fn clamp(&self, params: &ShellParameters) -> ShellParameters {
        let mut out = *params;
        for param in ShellParameter::ALL {
            out.set_unchecked(param, self.range(param).clamp(params.get(param)));
        }
        out
    }

    #[must_use]
    pub fn contains(&self, params: &ShellParameters) -> bool {
        ShellParameter::ALL
            .into_iter()
            .all(|param| self.range(param).contains(params.get(param)))
    }
}

impl Default for ParameterRanges {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Named shells from the sandbox menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShellPreset {
    Shell1,
    Shell2,
    Shell3,
    Shell4,
}

impl ShellPreset {
    pub const ALL: [Self; 4] = [Self::Shell1, Self::Shell2, Self::Shell3, Self::Shell4];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Shell1 => "shell1",
            Self::Shell2 => "shell2",
            Self::Shell3 => "shell3",
            Self::Shell4 => "shell4",
        }
    }
}

impl fmt::Display for ShellPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShellPreset {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.name() == name)
            .ok_or_else(|| ParameterError::UnknownPreset(s.trim().to_string()))
    }
}

/// Shape parameters of one shell. Angles are in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShellParameters {
    /// Handedness multiplier applied to `x`.
    pub d: f64,
    /// Spire expansion rate.
    #[serde(rename = "A")]
    pub big_a: f64,
    /// Whorl expansion angle.
    pub alpha: f64,
    /// Spire angle.
    pub beta: f64,
    /// Aperture ellipse semi-axis along `cos(s)`.
    pub a: f64,
    /// Aperture ellipse semi-axis along `sin(s)`.
    pub b: f64,
    /// Aperture tilt.
    pub mu: f64,
    /// Aperture rotation.
    pub omega: f64,
    /// Aperture phase.
    pub phi: f64,
    /// Number of whorls, in units of π radians.
    pub theta: f64,
}

impl ShellParameters {
    /// Every field at the minimum of [`ParameterRanges::DEFAULT`], `d = 1`.
    #[must_use]
    pub const fn new() -> Self {
        let r = ParameterRanges::DEFAULT;
        Self {
            d: 1.0,
            big_a: r.big_a.min,
            alpha: r.alpha.min,
            beta: r.beta.min,
            a: r.a.min,
            b: r.b.min,
            mu: r.mu.min,
            omega: r.omega.min,
            phi: r.phi.min,
            theta: r.theta.min,
        }
    }

    #[must_use]
    pub const fn preset(preset: ShellPreset) -> Self {
        let (big_a, alpha, beta, a, b, mu, omega, phi, theta) = match preset {
            ShellPreset::Shell1 => (12.2, 87.9, 4.0, 1.3, 1.5, 1.0, -2.0, 55.0, 8.0),
            ShellPreset::Shell2 => (7.0, 88.0, 12.0, 6.0, 1.5, 0.0, 0.0, 78.0, 2.0),
            ShellPreset::Shell3 => (5.0, 84.0, 85.0, 2.5, 4.5, 1.0, 5.0, 20.0, 2.0),
            ShellPreset::Shell4 => (4.5, 5.0, 90.0, 6.0, 6.0, 0.0, -50.0, 0.0, 2.0),
        };
        Self {
            d: 1.0,
            big_a,
            alpha,
            beta,
            a,
            b,
            mu,
            omega,
            phi,
            theta,
        }
    }

    /// Uniformly random parameters drawn with the thread-local generator.
    #[must_use]
    pub fn random() -> Self {
        Self::random_with(&mut rand::rng())
    }

    /// Uniformly random parameters within [`ParameterRanges::DEFAULT`].
    pub fn random_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::random_in(&ParameterRanges::DEFAULT, rng)
    }

    /// Draws every field independently and uniformly from its range in `ranges`.
    pub fn random_in<R: Rng + ?Sized>(ranges: &ParameterRanges, rng: &mut R) -> Self {
        let mut params = Self::new();
        for param in ShellParameter::ALL {
            params.set_unchecked(param, ranges.range(param).sample(rng));
        }
        params
    }

    #[must_use]
    pub const fn get(&self, param: ShellParameter) -> f64 {
        match param {
            ShellParameter::BigA => self.big_a,
            ShellParameter::Alpha => self.alpha,
            ShellParameter::Beta => self.beta,
            ShellParameter::A => self.a,
            ShellParameter::B => self.b,
            ShellParameter::Mu => self.mu,
            ShellParameter::Omega => self.omega,
            ShellParameter::Phi => self.phi,
            ShellParameter::Theta => self.theta,
        }
    }

    /// Overwrites one field. Range is not checked; non-finite values are rejected.
    pub fn set(&mut self, param: ShellParameter, value: f64) -> Result<(), ParameterError> {
        if !value.is_finite() {
            return Err(ParameterError::NonFiniteValue(param));
        }
        self.set_unchecked(param, value);
        Ok(())
    }

    /// Rejects NaN or infinite values in `d` or any shape field. Ranges are not checked.
    pub fn validate(&self) -> Result<(), ParameterError> {
        if !self.d.is_finite() {
            return Err(ParameterError::NonFiniteHandedness);
        }
        match ShellParameter::ALL.into_iter().find(|&p| !self.get(p).is_finite()) {
            Some(param) => Err(ParameterError::NonFiniteValue(param)),
            None => Ok(()),
        }
    }

    /// Copies `fields` from `source` into `self`.
    pub fn copy_from(&mut self, source: &Self, fields: &[ShellParameter]) {
        for &param in fields {
            self.set_unchecked(param, source.get(param));
        }
    }

    fn set_unchecked(&mut self, param: ShellParameter, value: f64) {
        let slot = match param {
            ShellParameter::BigA => &mut self.big_a,
            ShellParameter::Alpha => &mut self.alpha,
            ShellParameter::Beta => &mut self.beta,
            ShellParameter::A => &mut self.a,
            ShellParameter::B => &mut self.b,
            ShellParameter::Mu => &mut self.mu,
            ShellParameter::Omega => &mut self.omega,
            ShellParameter::Phi => &mut self.phi,
            ShellParameter::Theta => &mut self.theta,
        };
        *slot = value;
    }

    /// `(A, alpha, beta, a, b, mu, omega, phi, theta)`.
    #[must_use]
    pub const fn to_vector(&self) -> [f64; 9] {
        [
            self.big_a, self.alpha, self.beta, self.a, self.b, self.mu, self.omega, self.phi,
            self.theta,
        ]
    }
}

impl Default for ShellParameters {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ShellPreset> for ShellParameters {
    fn from(preset: ShellPreset) -> Self {
        Self::preset(preset)
    }
}

impl fmt::Display for ShellParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for param in ShellParameter::ALL {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            write!(f, "{param}={}", self.get(param))?;
        }
        Ok(())
    }
}
