//! Opt-in timing hooks for the mesh pipeline.
//!
//! Timing is only collected when the `mesh_metrics` feature is enabled and the
//! target is not WASM (`std::time::Instant` is unavailable there). Otherwise
//! every call is a plain passthrough.
//!
//! ```ignore
//! let mut metrics = GeomMetrics::default();
//! metrics.begin();
//! let grid = metrics.time(TimingBucket::SurfaceTessellation, || tessellate_surface_grid(&s, 101, 101));
//! if let Some(report) = metrics.end() {
//!     println!("tessellation: {} ns", report.surface_tessellation_ns);
//! }
//! ```

/// Phases of mesh generation that are timed separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimingBucket {
    /// Surface grid sampling.
    SurfaceTessellation,
    /// Grid triangulation (including cache lookups).
    Triangulation,
    /// Wireframe edge extraction.
    Wireframe,
    /// Smooth normal accumulation.
    Normals,
    /// Bounding box, centering and scaling.
    Normalization,
    /// Edge topology counts.
    Diagnostics,
}

/// Cumulative nanoseconds per [`TimingBucket`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GeomTimingReport {
    pub surface_tessellation_ns: u64,
    pub triangulation_ns: u64,
    pub wireframe_ns: u64,
    pub normals_ns: u64,
    pub normalization_ns: u64,
    pub diagnostics_ns: u64,
}

impl GeomTimingReport {
    #[must_use]
    pub fn total_ns(&self) -> u64 {
        self.surface_tessellation_ns
            .saturating_add(self.triangulation_ns)
            .saturating_add(self.wireframe_ns)
            .saturating_add(self.normals_ns)
            .saturating_add(self.normalization_ns)
            .saturating_add(self.diagnostics_ns)
    }

    #[must_use]
    pub fn total_ms(&self) -> f64 {
        self.total_ns() as f64 / 1_000_000.0
    }
}

/// Accumulator for timing mesh operations.
///
/// Call [`begin`](Self::begin) to reset, wrap work with [`time`](Self::time),
/// and read the report with [`end`](Self::end).
#[derive(Debug, Default)]
pub struct GeomMetrics {
    #[cfg(all(feature = "mesh_metrics", not(target_arch = "wasm32")))]
    report: GeomTimingReport,
}

impl GeomMetrics {
    pub fn begin(&mut self) {
        #[cfg(all(feature = "mesh_metrics", not(target_arch = "wasm32")))]
        {
            self.report = GeomTimingReport::default();
        }
    }

    /// Returns the accumulated report, or `None` when metrics are compiled out.
    #[must_use]
    pub fn end(&self) -> Option<GeomTimingReport> {
        #[cfg(all(feature = "mesh_metrics", not(target_arch = "wasm32")))]
        {
            Some(self.report.clone())
        }
        #[cfg(not(all(feature = "mesh_metrics", not(target_arch = "wasm32"))))]
        {
            None
        }
    }

    /// Runs `f`, adding its wall time to `bucket` when metrics are enabled.
    pub fn time<R>(&mut self, bucket: TimingBucket, f: impl FnOnce() -> R) -> R {
        #[cfg(all(feature = "mesh_metrics", not(target_arch = "wasm32")))]
        {
            let start = std::time::Instant::now();
            let result = f();
            let nanos = start.elapsed().as_nanos().min(u128::from(u64::MAX)) as u64;
            self.add_to_bucket(bucket, nanos);
            result
        }

        #[cfg(not(all(feature = "mesh_metrics", not(target_arch = "wasm32"))))]
        {
            let _ = bucket;
            f()
        }
    }

    #[cfg(all(feature = "mesh_metrics", not(target_arch = "wasm32")))]
    fn add_to_bucket(&mut self, bucket: TimingBucket, nanos: u64) {
        let slot = match bucket {
            TimingBucket::SurfaceTessellation => &mut self.report.surface_tessellation_ns,
            TimingBucket::Triangulation => &mut self.report.triangulation_ns,
            TimingBucket::Wireframe => &mut self.report.wireframe_ns,
            TimingBucket::Normals => &mut self.report.normals_ns,
            TimingBucket::Normalization => &mut self.report.normalization_ns,
            TimingBucket::Diagnostics => &mut self.report.diagnostics_ns,
        };
        *slot = slot.saturating_add(nanos);
    }
}
