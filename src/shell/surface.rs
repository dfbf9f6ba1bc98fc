//! The closed-form seashell surface.
//!
//! A logarithmic spiral carries an elliptical aperture curve. `theta` sets the
//! whorl count and `alpha` the spire taper. `A` and `beta` give the spire radius
//! and tilt, `a` and `b` the aperture ellipse, and `mu`, `omega` and `phi` orient
//! the aperture.

use std::f64::consts::PI;

use crate::geom::{Point3, Surface};

use super::parameters::ShellParameters;

/// A [`ShellParameters`] set with its angles converted to radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShellSurface {
    params: ShellParameters,
    alpha: f64,
    beta: f64,
    mu: f64,
    omega: f64,
    phi: f64,
}

impl ShellSurface {
    #[must_use]
    pub fn new(params: ShellParameters) -> Self {
        Self {
            params,
            alpha: params.alpha.to_radians(),
            beta: params.beta.to_radians(),
            mu: params.mu.to_radians(),
            omega: params.omega.to_radians(),
            phi: params.phi.to_radians(),
        }
    }

    #[must_use]
    pub const fn parameters(&self) -> &ShellParameters {
        &self.params
    }

    /// Evaluates the surface at normalised coordinates `(theta0, s0)` in `[0, 1]²`.
    ///
    /// `theta0` runs along the spiral (`theta · π` radians in total) and `s0` around
    /// the aperture (two full loops). Returns `None` when any coordinate is NaN or
    /// infinite, which happens when `tan(alpha)` is zero or the ellipse has a zero
    /// semi-axis.
    #[must_use]
    pub fn evaluate(&self, theta0: f64, s0: f64) -> Option<Point3> {
        let p = &self.params;
        let theta = theta0 * p.theta * PI;
        let s = s0 * 4.0 * PI;

        let (sin_s, cos_s) = s.sin_cos();
        let re = 1.0 / ((cos_s / p.a).powi(2) + (sin_s / p.b).powi(2)).sqrt();
        let ecot = (theta / self.alpha.tan()).exp();

        let (sin_t, cos_t) = theta.sin_cos();
        let (sin_to, cos_to) = (theta + self.omega).sin_cos();
        let (sin_sp, cos_sp) = (s + self.phi).sin_cos();
        let (sin_mu, cos_mu) = self.mu.sin_cos();
        let (sin_beta, cos_beta) = self.beta.sin_cos();
        let spire = p.big_a * sin_beta;

        let x = p.d
            * (spire * cos_t + re * cos_sp * cos_to - re * sin_mu * sin_sp * sin_to)
            * ecot;
        let y = (spire * sin_t + re * cos_sp * sin_to + re * sin_mu * sin_sp * cos_to) * ecot;
        let z = (-p.big_a * cos_beta + re * sin_sp * cos_mu) * ecot;

        let point = Point3::new(x, y, z);
        point.is_finite().then_some(point)
    }
}

impl Surface for ShellSurface {
    fn try_point_at(&self, u: f64, v: f64) -> Option<Point3> {
        self.evaluate(u, v)
    }
}
