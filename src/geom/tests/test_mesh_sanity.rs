use crate::geom::{
    GeomContext, GeomMesh, PlaneSurface, Point3, Vec3, grid_wireframe_with_context,
    mesh_surface_with_context,
};

#[test]
fn mesh_surface_has_finite_vertices_and_valid_indices() {
    let plane = PlaneSurface::new(Point3::new(0.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0), Vec3::new(0.0, 3.0, 0.0));
    let mut ctx = GeomContext::new();
    let (mesh, diag) = mesh_surface_with_context(&plane, 8, 6, &mut ctx);

    mesh.validate().expect("mesh validate");
    assert_eq!(mesh.positions_flat().len(), mesh.positions.len() * 3);
    assert_eq!(mesh.uvs_flat().unwrap().len(), mesh.positions.len() * 2);
    assert_eq!(mesh.normals_flat().unwrap().len(), mesh.positions.len() * 3);

    assert_eq!(mesh.positions.len(), 8 * 6);
    assert_eq!(diag.vertex_count, mesh.positions.len());
    assert_eq!(diag.triangle_count, 7 * 5 * 2);
    assert_eq!(diag.degenerate_point_count, 0);
    assert!(diag.open_edge_count > 0);
    assert_eq!(diag.non_manifold_edge_count, 0);
    assert!(diag.warnings.is_empty());

    assert_eq!(ctx.cache.stats().grid_triangulation_entries, 1);
    let _ = mesh_surface_with_context(&plane, 8, 6, &mut ctx);
    assert_eq!(ctx.cache.stats().grid_triangulation_entries, 1);
    assert_eq!(ctx.cache.stats().grid_triangulation_hits, 1);

    let normals = mesh.normals.as_ref().unwrap();
    for n in normals {
        assert!((n[2] - 1.0).abs() < 1e-12);
    }

    let uvs = mesh.uvs.as_ref().unwrap();
    assert_eq!(uvs[0], [0.0, 0.0]);
    assert_eq!(*uvs.last().unwrap(), [1.0, 1.0]);
}

#[test]
fn grid_wireframe_is_cached_by_size() {
    let plane = PlaneSurface::new(Point3::ORIGIN, Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
    let mut ctx = GeomContext::new();
    let (mesh, _) = mesh_surface_with_context(&plane, 3, 3, &mut ctx);

    let first = grid_wireframe_with_context(&mesh, 3, 3, &mut ctx);
    let second = grid_wireframe_with_context(&mesh, 3, 3, &mut ctx);
    assert_eq!(first, second);
    assert_eq!(first.len(), (2 * 2 * 3 + 2 * 2) * 2);

    let stats = ctx.cache.stats();
    assert_eq!(stats.grid_wireframe_entries, 1);
    assert_eq!(stats.grid_wireframe_hits, 1);
    assert_eq!(stats.grid_wireframe_misses, 1);
    assert!(stats.estimated_memory_bytes > 0);

    ctx.cache.clear();
    assert_eq!(ctx.cache.stats().total_entries(), 0);
}

#[test]
fn geom_mesh_validate_rejects_bad_buffers() {
    let mesh = GeomMesh::new(vec![[0.0, 0.0, 0.0]], vec![0]);
    assert!(mesh.validate().is_err());

    let mesh = GeomMesh::new(vec![[0.0, 0.0, 0.0]], vec![0, 1, 0]);
    assert!(mesh.validate().is_err());

    let mesh = GeomMesh::new(vec![[f64::NAN, 0.0, 0.0]], vec![0, 0, 0]);
    assert!(mesh.validate().is_err());

    let mut mesh = GeomMesh::new(vec![[0.0, 0.0, 0.0]], vec![0, 0, 0]);
    mesh.normals = Some(vec![]);
    assert!(mesh.validate().is_err());
}
