use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::cache::GeomCache;
use super::diagnostics::GeomMeshDiagnostics;
use super::metrics::{GeomMetrics, TimingBucket};
use super::surface::{Surface, grid_uvs, tessellate_surface_grid};
use super::triangulation::{triangulate_grid, wireframe_edges};
use super::{BBox, Point3, Tolerance, Transform, Vec3};

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GeomMesh {
    pub positions: Vec<[f64; 3]>,
    pub indices: Vec<u32>,
    pub uvs: Option<Vec<[f64; 2]>>,
    pub normals: Option<Vec<[f64; 3]>>,
}

impl GeomMesh {
    /// Create a new mesh with positions and indices only.
    #[must_use]
    pub fn new(positions: Vec<[f64; 3]>, indices: Vec<u32>) -> Self {
        Self {
            positions,
            indices,
            uvs: None,
            normals: None,
        }
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if any vertex position contains NaN or Inf values.
    #[must_use]
    pub fn has_invalid_vertices(&self) -> bool {
        self.positions
            .iter()
            .any(|p| !p[0].is_finite() || !p[1].is_finite() || !p[2].is_finite())
    }

    /// Returns true if all vertex indices are within bounds.
    #[must_use]
    pub fn has_valid_indices(&self) -> bool {
        let n = self.positions.len();
        self.indices.iter().all(|&i| (i as usize) < n)
    }

    #[must_use]
    pub fn has_triangle_indices(&self) -> bool {
        self.indices.len() % 3 == 0
    }

    /// Returns true if all optional vertex attribute buffers match `positions.len()`.
    #[must_use]
    pub fn has_valid_attribute_lengths(&self) -> bool {
        let n = self.positions.len();
        self.uvs.as_ref().is_none_or(|uvs| uvs.len() == n)
            && self.normals.as_ref().is_none_or(|normals| normals.len() == n)
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.has_triangle_indices() {
            return Err("mesh indices are not a triangle list (len % 3 != 0)".to_string());
        }
        if self.has_invalid_vertices() {
            return Err("mesh has invalid vertex coordinates (NaN/Inf)".to_string());
        }
        if !self.has_valid_indices() {
            return Err("mesh has out-of-bounds vertex indices".to_string());
        }
        if !self.has_valid_attribute_lengths() {
            return Err("mesh attribute buffers do not match vertex count".to_string());
        }
        Ok(())
    }

    /// Position buffer as `[x0, y0, z0, x1, ...]`, for JS typed-array adapters.
    #[must_use]
    pub fn positions_flat(&self) -> &[f64] {
        self.positions.as_flattened()
    }

    #[must_use]
    pub fn uvs_flat(&self) -> Option<&[f64]> {
        self.uvs.as_deref().map(<[[f64; 2]]>::as_flattened)
    }

    #[must_use]
    pub fn normals_flat(&self) -> Option<&[f64]> {
        self.normals.as_deref().map(<[[f64; 3]]>::as_flattened)
    }

    #[must_use]
    pub fn bounding_box(&self) -> Option<BBox> {
        BBox::from_positions(&self.positions)
    }

    /// Applies `transform` to every position. Normals are transformed and renormalised.
    pub fn transform(&mut self, transform: Transform) {
        for p in &mut self.positions {
            *p = transform.apply_point(Point3::from_array(*p)).to_array();
        }
        if let Some(normals) = self.normals.as_mut() {
            for n in normals.iter_mut() {
                let v = transform.apply_vec(Vec3::new(n[0], n[1], n[2]));
                if let Some(unit) = v.normalized() {
                    *n = unit.to_array();
                }
            }
        }
    }

    /// Centres the mesh on the origin and scales it uniformly into the unit box.
    ///
    /// Axes whose extent is non-finite or within `tolerance` of zero are ignored
    /// when choosing the factor. When no axis qualifies the mesh is only centred.
    pub fn normalize_to_unit_box(
        &mut self,
        rule: ScaleRule,
        tolerance: Tolerance,
    ) -> Normalization {
        let Some(bbox) = self.bounding_box() else {
            return Normalization::default();
        };

        let center = bbox.center();
        if !center.is_finite() {
            return Normalization::default();
        }
        let offset = Point3::ORIGIN.sub_point(center);
        let scale = rule.scale_factor(bbox.size(), tolerance);

        let transform = match scale {
            Some(s) => Transform::uniform_scale(s) * Transform::translate(offset),
            None => Transform::translate(offset),
        };
        self.transform(transform);

        Normalization {
            offset,
            scale,
            source_bounds: Some(bbox),
        }
    }
}

/// How the uniform normalisation factor is derived from the bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleRule {
    /// Minimum of the per-axis factors `1 / extent`: the largest side becomes 1.
    #[default]
    LargestAxis,
    /// `1 / z-extent`: the height becomes 1 regardless of the other axes.
    ZAxis,
}

impl ScaleRule {
    #[must_use]
    pub fn scale_factor(self, size: Vec3, tolerance: Tolerance) -> Option<f64> {
        let factor = |extent: f64| {
            (extent.is_finite() && !tolerance.is_zero_length(extent))
                .then(|| 1.0 / extent)
                .filter(|f| f.is_finite())
        };

        match self {
            Self::LargestAxis => [size.x, size.y, size.z]
                .into_iter()
                .filter_map(factor)
                .reduce(f64::min),
            Self::ZAxis => factor(size.z),
        }
    }
}

impl std::str::FromStr for ScaleRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "largest" | "largest_axis" => Ok(Self::LargestAxis),
            "z" | "z_axis" => Ok(Self::ZAxis),
            other => Err(format!("unknown scale rule `{other}` (expected `largest` or `z`)")),
        }
    }
}

/// What [`GeomMesh::normalize_to_unit_box`] did.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Normalization {
    /// Translation applied before scaling.
    pub offset: Vec3,
    /// Uniform scale applied after centering, `None` when skipped.
    pub scale: Option<f64>,
    /// Bounds before normalisation.
    pub source_bounds: Option<BBox>,
}

#[derive(Debug)]
pub struct GeomContext {
    pub tolerance: Tolerance,
    pub cache: GeomCache,
    pub metrics: GeomMetrics,
}

impl GeomContext {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tolerance: Tolerance::default_geom(),
            cache: GeomCache::default(),
            metrics: GeomMetrics::default(),
        }
    }
}

impl Default for GeomContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Samples `surface` on a `u_count x v_count` vertex grid and triangulates it.
///
/// Non-finite samples become the origin and are counted in the diagnostics.
/// The caller is responsible for `ctx.metrics.begin()`/`end()`.
#[must_use]
pub fn mesh_surface_with_context(
    surface: &impl Surface,
    u_count: usize,
    v_count: usize,
    ctx: &mut GeomContext,
) -> (GeomMesh, GeomMeshDiagnostics) {
    let u_count = u_count.max(2);
    let v_count = v_count.max(2);

    let grid = ctx.metrics.time(TimingBucket::SurfaceTessellation, || {
        tessellate_surface_grid(surface, u_count, v_count)
    });

    let indices = ctx.metrics.time(TimingBucket::Triangulation, || {
        ctx.cache.get_or_insert_triangulated_grid(u_count, v_count, || {
            triangulate_grid(u_count, v_count)
        })
    });

    let normals = ctx.metrics.time(TimingBucket::Normals, || {
        compute_smooth_normals(&grid.points, &indices)
    });

    let (open_edge_count, non_manifold_edge_count) = ctx
        .metrics
        .time(TimingBucket::Diagnostics, || count_edge_topology(&indices));

    let mesh = GeomMesh {
        positions: grid.points.iter().map(|p| p.to_array()).collect(),
        indices: indices.as_ref().clone(),
        uvs: Some(grid_uvs(u_count, v_count)),
        normals: Some(normals),
    };

    let mut diagnostics = GeomMeshDiagnostics {
        vertex_count: mesh.vertex_count(),
        triangle_count: mesh.triangle_count(),
        degenerate_point_count: grid.degenerate_count,
        open_edge_count,
        non_manifold_edge_count,
        ..GeomMeshDiagnostics::default()
    };
    if grid.degenerate_count > 0 {
        diagnostics.add_warning(format!(
            "{} degenerate samples replaced by the origin",
            grid.degenerate_count
        ));
    }

    (mesh, diagnostics)
}

/// Wireframe line indices for a grid mesh, cached by grid size.
#[must_use]
pub fn grid_wireframe_with_context(
    mesh: &GeomMesh,
    u_count: usize,
    v_count: usize,
    ctx: &mut GeomContext,
) -> Vec<u32> {
    let lines = ctx.metrics.time(TimingBucket::Wireframe, || {
        ctx.cache.get_or_insert_grid_wireframe(u_count.max(2), v_count.max(2), || {
            wireframe_edges(&mesh.indices)
        })
    });
    lines.as_ref().clone()
}

fn count_edge_topology(indices: &[u32]) -> (usize, usize) {
    let mut edge_counts: HashMap<(u32, u32), u32> = HashMap::new();

    for tri in indices.chunks_exact(3) {
        let (i0, i1, i2) = (tri[0], tri[1], tri[2]);
        if i0 == i1 || i1 == i2 || i0 == i2 {
            continue;
        }
        for (ea, eb) in [(i0, i1), (i1, i2), (i2, i0)] {
            let key = if ea <= eb { (ea, eb) } else { (eb, ea) };
            *edge_counts.entry(key).or_insert(0) += 1;
        }
    }

    let open_edge_count = edge_counts.values().filter(|&&c| c == 1).count();
    let non_manifold_edge_count = edge_counts.values().filter(|&&c| c > 2).count();
    (open_edge_count, non_manifold_edge_count)
}

fn compute_smooth_normals(points: &[Point3], indices: &[u32]) -> Vec<[f64; 3]> {
    let mut accum = vec![Vec3::ZERO; points.len()];

    for tri in indices.chunks_exact(3) {
        let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let (Some(a), Some(b), Some(c)) = (points.get(i0), points.get(i1), points.get(i2)) else {
            continue;
        };

        let n = b.sub_point(*a).cross(c.sub_point(*a));
        if !n.is_finite() {
            continue;
        }
        accum[i0] = accum[i0] + n;
        accum[i1] = accum[i1] + n;
        accum[i2] = accum[i2] + n;
    }

    accum
        .into_iter()
        .map(|n| n.normalized().unwrap_or(Vec3::Z).to_array())
        .collect()
}
