mod cache;
mod core;
mod diagnostics;
mod mesh;
mod metrics;
mod surface;
mod triangulation;

pub use cache::{GeomCache, GeomCacheStats};
pub use core::{BBox, Point3, Tolerance, Transform, Vec3};
pub use diagnostics::GeomMeshDiagnostics;
pub use mesh::{
    GeomContext, GeomMesh, Normalization, ScaleRule, grid_wireframe_with_context,
    mesh_surface_with_context,
};
pub use metrics::{GeomMetrics, GeomTimingReport, TimingBucket};
pub use surface::{PlaneSurface, Surface, SurfaceGrid, grid_uvs, tessellate_surface_grid};
pub use triangulation::{triangulate_grid, wireframe_edges};

#[cfg(test)]
mod tests;
