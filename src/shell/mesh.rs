//! Shell tessellation: samples the shell surface on an `(n + 1)²` grid, centres and
//! scales it into the unit box, then attaches the cached grid wireframe.
//!
//! Degenerate samples and skipped scaling are logged and recorded in the returned
//! [`GeomMeshDiagnostics`].

use serde::{Deserialize, Serialize};

use crate::geom::{
    GeomContext, GeomMesh, GeomMeshDiagnostics, ScaleRule, TimingBucket,
    grid_wireframe_with_context, mesh_surface_with_context,
};

use super::parameters::ShellParameters;
use super::surface::ShellSurface;

/// Tessellation settings for [`shell_mesh`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellMeshOptions {
    /// Grid subdivisions per axis. A value of `n` yields `(n + 1)²` vertices.
    pub divisions: usize,
    pub scale_rule: ScaleRule,
}

impl ShellMeshOptions {
    pub const DEFAULT_DIVISIONS: usize = 100;

    #[must_use]
    pub const fn new(divisions: usize) -> Self {
        Self {
            divisions,
            scale_rule: ScaleRule::LargestAxis,
        }
    }

    #[must_use]
    pub const fn with_scale_rule(mut self, scale_rule: ScaleRule) -> Self {
        self.scale_rule = scale_rule;
        self
    }

    /// Divisions actually used, never less than 1.
    #[must_use]
    pub const fn effective_divisions(&self) -> usize {
        if self.divisions == 0 { 1 } else { self.divisions }
    }

    /// Vertices per grid side.
    #[must_use]
    pub const fn grid_size(&self) -> usize {
        self.effective_divisions() + 1
    }
}

impl Default for ShellMeshOptions {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DIVISIONS)
    }
}

/// A normalised shell mesh and its wireframe.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ShellMesh {
    pub surface: GeomMesh,
    /// Line-segment vertex pairs, one per unique triangle edge.
    pub wireframe: Vec<u32>,
}

impl ShellMesh {
    #[must_use]
    pub fn wireframe_edge_count(&self) -> usize {
        self.wireframe.len() / 2
    }
}

#[must_use]
pub fn shell_mesh(
    params: &ShellParameters,
    options: &ShellMeshOptions,
) -> (ShellMesh, GeomMeshDiagnostics) {
    let mut ctx = GeomContext::new();
    shell_mesh_with_context(params, options, &mut ctx)
}

/// Tessellates, centres and scales the shell described by `params`.
///
/// The grid triangulation and wireframe come from `ctx.cache`, so reusing one
/// context across regenerations at the same density skips that work.
#[must_use]
pub fn shell_mesh_with_context(
    params: &ShellParameters,
    options: &ShellMeshOptions,
    ctx: &mut GeomContext,
) -> (ShellMesh, GeomMeshDiagnostics) {
    ctx.metrics.begin();

    let grid = options.grid_size();
    let surface = ShellSurface::new(*params);
    let (mut mesh, mut diagnostics) = mesh_surface_with_context(&surface, grid, grid, ctx);

    if diagnostics.degenerate_point_count > 0 {
        log::warn!(
            "shell surface produced {} degenerate samples ({params})",
            diagnostics.degenerate_point_count
        );
    }

    let tolerance = ctx.tolerance;
    let normalization = ctx.metrics.time(TimingBucket::Normalization, || {
        mesh.normalize_to_unit_box(options.scale_rule, tolerance)
    });
    diagnostics.applied_scale = normalization.scale;
    if normalization.scale.is_none() {
        log::debug!("normalisation skipped scaling: {:?}", normalization.source_bounds);
        diagnostics.add_warning("mesh has zero extent; scaling skipped");
    }

    let wireframe = grid_wireframe_with_context(&mesh, grid, grid, ctx);
    diagnostics.wireframe_edge_count = wireframe.len() / 2;
    diagnostics.timing = ctx.metrics.end();

    log::debug!("shell mesh n={}: {}", options.effective_divisions(), diagnostics.summary());

    (
        ShellMesh {
            surface: mesh,
            wireframe,
        },
        diagnostics,
    )
}
