//! Index-buffer caching for the geom mesh engine.
//!
//! Grid triangulation and wireframe extraction depend only on the grid
//! dimensions, not on the surface being sampled. Interactive callers regenerate
//! the same grid size on every parameter change, so both buffers are cached and
//! shared.
//!
//! # Example
//! ```ignore
//! let mut cache = GeomCache::default();
//! let indices = cache.get_or_insert_triangulated_grid(101, 101, || triangulate_grid(101, 101));
//! let stats = cache.stats();
//! println!("entries: {}, hits: {}", stats.grid_triangulation_entries, stats.grid_triangulation_hits);
//! ```

use std::collections::HashMap;
use std::sync::Arc;

/// Cache key for grid-derived index buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct GridKey {
    u_count: usize,
    v_count: usize,
}

/// Shared buffer for cached index data (avoids cloning on every access).
type SharedIndices = Arc<Vec<u32>>;

#[derive(Debug, Default)]
pub struct GeomCache {
    grid_triangulation: HashMap<GridKey, SharedIndices>,
    grid_wireframe: HashMap<GridKey, SharedIndices>,

    grid_triangulation_hits: usize,
    grid_triangulation_misses: usize,
    grid_wireframe_hits: usize,
    grid_wireframe_misses: usize,
}

/// Cache statistics for diagnostics and monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GeomCacheStats {
    pub grid_triangulation_entries: usize,
    pub grid_wireframe_entries: usize,
    pub grid_triangulation_hits: usize,
    pub grid_triangulation_misses: usize,
    pub grid_wireframe_hits: usize,
    pub grid_wireframe_misses: usize,
    /// Estimated memory usage in bytes.
    pub estimated_memory_bytes: usize,
}

impl GeomCacheStats {
    #[must_use]
    pub const fn total_entries(&self) -> usize {
        self.grid_triangulation_entries + self.grid_wireframe_entries
    }
}

impl GeomCache {
    /// Returns the triangle indices for a grid, computing them on the first request.
    pub fn get_or_insert_triangulated_grid(
        &mut self,
        u_count: usize,
        v_count: usize,
        compute: impl FnOnce() -> Vec<u32>,
    ) -> SharedIndices {
        let key = GridKey { u_count, v_count };
        lookup_or_insert(
            &mut self.grid_triangulation,
            key,
            &mut self.grid_triangulation_hits,
            &mut self.grid_triangulation_misses,
            compute,
        )
    }

    /// Returns the wireframe line indices for a grid, computing them on the first request.
    pub fn get_or_insert_grid_wireframe(
        &mut self,
        u_count: usize,
        v_count: usize,
        compute: impl FnOnce() -> Vec<u32>,
    ) -> SharedIndices {
        let key = GridKey { u_count, v_count };
        lookup_or_insert(
            &mut self.grid_wireframe,
            key,
            &mut self.grid_wireframe_hits,
            &mut self.grid_wireframe_misses,
            compute,
        )
    }

    #[must_use]
    pub fn stats(&self) -> GeomCacheStats {
        let bytes = self
            .grid_triangulation
            .values()
            .chain(self.grid_wireframe.values())
            .map(|buf| buf.len() * std::mem::size_of::<u32>())
            .sum();

        GeomCacheStats {
            grid_triangulation_entries: self.grid_triangulation.len(),
            grid_wireframe_entries: self.grid_wireframe.len(),
            grid_triangulation_hits: self.grid_triangulation_hits,
            grid_triangulation_misses: self.grid_triangulation_misses,
            grid_wireframe_hits: self.grid_wireframe_hits,
            grid_wireframe_misses: self.grid_wireframe_misses,
            estimated_memory_bytes: bytes,
        }
    }

    /// Drops every cached buffer. Hit/miss counters are kept.
    pub fn clear(&mut self) {
        self.grid_triangulation.clear();
        self.grid_wireframe.clear();
    }
}

fn lookup_or_insert(
    map: &mut HashMap<GridKey, SharedIndices>,
    key: GridKey,
    hits: &mut usize,
    misses: &mut usize,
    compute: impl FnOnce() -> Vec<u32>,
) -> SharedIndices {
    if let Some(existing) = map.get(&key) {
        *hits += 1;
        return Arc::clone(existing);
    }
    *misses += 1;
    let value = Arc::new(compute());
    map.insert(key, Arc::clone(&value));
    value
}
