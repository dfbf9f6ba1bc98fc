mod test_mesh_sanity;
mod test_surface_basic;
