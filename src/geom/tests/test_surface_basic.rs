use crate::geom::{PlaneSurface, Point3, Surface, Vec3, grid_uvs, tessellate_surface_grid};

struct PoleSurface;

impl Surface for PoleSurface {
    // 1/u blows up on the u = 0 edge.
    fn try_point_at(&self, u: f64, v: f64) -> Option<Point3> {
        Some(Point3::new(1.0 / u, v, 0.0 / u))
    }
}

#[test]
fn tessellate_plane_grid_sizes() {
    let plane = PlaneSurface::new(Point3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
    let grid = tessellate_surface_grid(&plane, 4, 3);
    assert_eq!(grid.points.len(), 12);
    assert_eq!((grid.u_count, grid.v_count), (4, 3));
    assert_eq!(grid.degenerate_count, 0);
    assert_eq!(grid.points[0], Point3::new(0.0, 0.0, 0.0));
    assert_eq!(grid.points[3], Point3::new(1.0, 0.0, 0.0));
    assert_eq!(grid.points[8], Point3::new(0.0, 1.0, 0.0));
    assert_eq!(grid.points[11], Point3::new(1.0, 1.0, 0.0));
}

#[test]
fn non_finite_samples_become_origin_and_are_counted() {
    let grid = tessellate_surface_grid(&PoleSurface, 3, 4);

    assert_eq!(grid.degenerate_count, 4);
    for v in 0..4 {
        assert_eq!(grid.points[v * 3], Point3::ORIGIN);
    }
    assert!(grid.points.iter().all(|p| p.is_finite()));
    assert_eq!(PoleSurface.point_at(0.0, 0.5), Point3::ORIGIN);
    assert_eq!(PoleSurface.point_at(0.5, 0.5), Point3::new(2.0, 0.5, 0.0));
}

#[test]
fn grid_uvs_match_point_order() {
    let uvs = grid_uvs(3, 2);
    assert_eq!(
        uvs,
        vec![[0.0, 0.0], [0.5, 0.0], [1.0, 0.0], [0.0, 1.0], [0.5, 1.0], [1.0, 1.0]]
    );
}
