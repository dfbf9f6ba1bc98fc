use std::collections::HashSet;

/// Triangle indices for an open `u_count x v_count` vertex grid laid out row-major in `v`.
///
/// Each grid cell becomes two triangles, so the result holds
/// `(u_count - 1) * (v_count - 1) * 2` triangles.
#[must_use]
pub fn triangulate_grid(u_count: usize, v_count: usize) -> Vec<u32> {
    let u_count = u_count.max(2);
    let v_count = v_count.max(2);

    let quad_u = u_count - 1;
    let quad_v = v_count - 1;
    let mut indices = Vec::with_capacity(quad_u * quad_v * 6);

    let stride = u_count;
    for v in 0..quad_v {
        for u in 0..quad_u {
            let i0 = (v * stride + u) as u32;
            let i1 = (v * stride + u + 1) as u32;
            let i2 = ((v + 1) * stride + u) as u32;
            let i3 = ((v + 1) * stride + u + 1) as u32;

            indices.extend_from_slice(&[i0, i1, i2]);
            indices.extend_from_slice(&[i2, i1, i3]);
        }
    }

    indices
}

/// Line-segment index pairs for every distinct undirected edge of a triangle list.
///
/// Edges keep the order in which they are first met. Collapsed edges (both ends
/// on the same vertex) are skipped.
#[must_use]
pub fn wireframe_edges(indices: &[u32]) -> Vec<u32> {
    let mut seen: HashSet<(u32, u32)> = HashSet::with_capacity(indices.len());
    let mut lines = Vec::with_capacity(indices.len() * 2);

    for tri in indices.chunks_exact(3) {
        for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
            if a == b {
                continue;
            }
            let key = if a <= b { (a, b) } else { (b, a) };
            if seen.insert(key) {
                lines.push(a);
                lines.push(b);
            }
        }
    }

    lines
}
