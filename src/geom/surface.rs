use super::core::{Point3, Vec3};

/// A parametric surface sampled over a rectangular `(u, v)` domain.
///
/// `Sync` is required so grid sampling can be spread over a rayon pool when the
/// `parallel` feature is enabled.
pub trait Surface: Sync {
    /// Evaluates the surface, substituting a fallback for degenerate samples.
    fn point_at(&self, u: f64, v: f64) -> Point3 {
        self.try_point_at(u, v)
            .filter(|p| p.is_finite())
            .unwrap_or(Point3::ORIGIN)
    }

    /// Evaluates the surface, returning `None` when the sample is not a finite point.
    fn try_point_at(&self, u: f64, v: f64) -> Option<Point3>;

    #[must_use]
    fn domain_u(&self) -> (f64, f64) {
        (0.0, 1.0)
    }

    #[must_use]
    fn domain_v(&self) -> (f64, f64) {
        (0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneSurface {
    pub origin: Point3,
    pub u_axis: Vec3,
    pub v_axis: Vec3,
}

impl PlaneSurface {
    #[must_use]
    pub const fn new(origin: Point3, u_axis: Vec3, v_axis: Vec3) -> Self {
        Self {
            origin,
            u_axis,
            v_axis,
        }
    }
}

impl Surface for PlaneSurface {
    fn try_point_at(&self, u: f64, v: f64) -> Option<Point3> {
        let p = self
            .origin
            .add_vec(self.u_axis.mul_scalar(u))
            .add_vec(self.v_axis.mul_scalar(v));
        p.is_finite().then_some(p)
    }
}

/// Points sampled on a regular `u_count x v_count` grid, row-major in `v`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SurfaceGrid {
    pub points: Vec<Point3>,
    pub u_count: usize,
    pub v_count: usize,
    /// Samples that evaluated to a non-finite point and were replaced by the origin.
    pub degenerate_count: usize,
}

/// Samples `surface` on an open grid including both domain ends.
///
/// Counts are raised to at least 2 so every grid has at least one quad.
#[must_use]
pub fn tessellate_surface_grid(surface: &impl Surface, u_count: usize, v_count: usize) -> SurfaceGrid {
    let u_count = u_count.max(2);
    let v_count = v_count.max(2);

    let u_params = grid_params(surface.domain_u(), u_count);
    let v_params = grid_params(surface.domain_v(), v_count);

    let rows = sample_rows(surface, &u_params, &v_params);

    let mut points = Vec::with_capacity(u_count * v_count);
    let mut degenerate_count = 0usize;
    for sample in rows.into_iter().flatten() {
        match sample {
            Some(p) => points.push(p),
            None => {
                degenerate_count += 1;
                points.push(Point3::ORIGIN);
            }
        }
    }

    SurfaceGrid {
        points,
        u_count,
        v_count,
        degenerate_count,
    }
}

fn grid_params((start, end): (f64, f64), count: usize) -> Vec<f64> {
    let span = end - start;
    let denom = (count - 1) as f64;
    (0..count)
        .map(|i| {
            if span.is_finite() && span != 0.0 {
                start + span * (i as f64 / denom)
            } else {
                start
            }
        })
        .collect()
}

fn sample_row(surface: &impl Surface, u_params: &[f64], v: f64) -> Vec<Option<Point3>> {
    u_params
        .iter()
        .map(|&u| surface.try_point_at(u, v).filter(|p| p.is_finite()))
        .collect()
}

#[cfg(feature = "parallel")]
fn sample_rows(surface: &impl Surface, u_params: &[f64], v_params: &[f64]) -> Vec<Vec<Option<Point3>>> {
    use rayon::prelude::*;

    v_params
        .par_iter()
        .map(|&v| sample_row(surface, u_params, v))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn sample_rows(surface: &impl Surface, u_params: &[f64], v_params: &[f64]) -> Vec<Vec<Option<Point3>>> {
    v_params
        .iter()
        .map(|&v| sample_row(surface, u_params, v))
        .collect()
}

/// UV coordinates matching [`tessellate_surface_grid`] point order, normalised to `[0, 1]`.
#[must_use]
pub fn grid_uvs(u_count: usize, v_count: usize) -> Vec<[f64; 2]> {
    let u_count = u_count.max(2);
    let v_count = v_count.max(2);
    let u_denom = (u_count - 1) as f64;
    let v_denom = (v_count - 1) as f64;

    let mut uvs = Vec::with_capacity(u_count * v_count);
    for v in 0..v_count {
        let vv = v as f64 / v_denom;
        for u in 0..u_count {
            uvs.push([u as f64 / u_denom, vv]);
        }
    }
    uvs
}
