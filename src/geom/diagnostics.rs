//! Mesh diagnostics for the geometry engine.
//!
//! Diagnostics are collected while a mesh is generated and returned next to it.
//! Use them to check a mesh before handing it to a renderer, or to log what the
//! generator had to work around.
//!
//! # Example
//!
//! ```ignore
//! use shell_engine::shell::{ShellMeshOptions, ShellParameters, shell_mesh};
//!
//! let (mesh, diagnostics) = shell_mesh(&ShellParameters::new(), &ShellMeshOptions::default());
//! if diagnostics.degenerate_point_count > 0 {
//!     eprintln!("{} samples were replaced by the origin", diagnostics.degenerate_point_count);
//! }
//! log::debug!("{}", diagnostics.summary());
//! ```

use std::fmt;

/// Diagnostics for a generated mesh.
///
/// # Topology
///
/// - `open_edge_count`: edges with a single adjacent triangle. An unclosed parametric
///   sheet always has some.
/// - `non_manifold_edge_count`: edges shared by more than two triangles
///
/// # Sampling
///
/// - `degenerate_point_count`: samples that evaluated to NaN or infinity and were
///   replaced by the origin
///
/// # Normalisation
///
/// - `applied_scale`: the uniform factor used to fit the mesh into the unit box,
///   `None` when scaling was skipped
#[derive(Debug, Default, Clone, PartialEq)]
pub struct GeomMeshDiagnostics {
    /// Total number of vertices in the final mesh.
    pub vertex_count: usize,

    /// Total number of triangles in the final mesh.
    pub triangle_count: usize,

    /// Number of line segments in the derived wireframe.
    pub wireframe_edge_count: usize,

    /// Number of surface samples substituted by the origin.
    pub degenerate_point_count: usize,

    /// Number of open (boundary) edges in the mesh.
    pub open_edge_count: usize,

    /// Number of edges with more than two adjacent triangles.
    pub non_manifold_edge_count: usize,

    /// Uniform scale factor applied during normalisation.
    pub applied_scale: Option<f64>,

    /// Optional timing breakdown, populated with the `mesh_metrics` feature on native targets.
    pub timing: Option<super::metrics::GeomTimingReport>,

    /// Human-readable warnings, e.g.
    /// - "12 degenerate samples replaced by the origin"
    /// - "mesh has zero extent; scaling skipped"
    pub warnings: Vec<String>,
}

impl GeomMeshDiagnostics {
    #[must_use]
    pub fn is_manifold(&self) -> bool {
        self.non_manifold_edge_count == 0
    }

    /// Returns `true` when no samples were degenerate, the mesh was scaled, and
    /// nothing was worth a warning.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.degenerate_point_count == 0
            && self.is_manifold()
            && self.applied_scale.is_some()
            && self.warnings.is_empty()
    }

    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Returns a one-line summary suitable for logging.
    ///
    /// Format: `"V:{vertices} T:{triangles} E:{wire edges} [issues...]"`
    #[must_use]
    pub fn summary(&self) -> String {
        let mut parts = vec![format!(
            "V:{} T:{} E:{}",
            self.vertex_count, self.triangle_count, self.wireframe_edge_count
        )];

        if self.degenerate_point_count > 0 {
            parts.push(format!("degenerate:{}", self.degenerate_point_count));
        }
        if self.non_manifold_edge_count > 0 {
            parts.push(format!("non-manifold:{}", self.non_manifold_edge_count));
        }
        match self.applied_scale {
            Some(scale) => parts.push(format!("scale:{scale:.6e}")),
            None => parts.push("unscaled".to_string()),
        }

        parts.join(" ")
    }
}

impl fmt::Display for GeomMeshDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mesh Diagnostics:")?;
        writeln!(f, "  Vertices: {}", self.vertex_count)?;
        writeln!(f, "  Triangles: {}", self.triangle_count)?;
        writeln!(f, "  Wireframe edges: {}", self.wireframe_edge_count)?;
        writeln!(f, "  Open edges: {}", self.open_edge_count)?;

        if self.non_manifold_edge_count > 0 {
            writeln!(f, "  Non-manifold edges: {}", self.non_manifold_edge_count)?;
        }
        if self.degenerate_point_count > 0 {
            writeln!(f, "  Degenerate samples: {}", self.degenerate_point_count)?;
        }
        if let Some(scale) = self.applied_scale {
            writeln!(f, "  Scale: {scale}")?;
        }
        if let Some(timing) = &self.timing {
            writeln!(f, "  Time: {:.3} ms", timing.total_ms())?;
        }

        if !self.warnings.is_empty() {
            writeln!(f, "  Warnings:")?;
            for warning in &self.warnings {
                writeln!(f, "    - {warning}")?;
            }
        }

        Ok(())
    }
}
