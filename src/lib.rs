#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod annotations;
pub mod depth;
pub mod diagnostics;
pub mod exporter;
pub mod types;

// Stage modules – public for tools and tests, considered internals.
pub mod config;
pub mod normalize;
pub mod project;
pub mod roi;
pub mod sampling;

// --- High-level re-exports -------------------------------------------------

// Main entry points: exporter + results.
pub use crate::exporter::{CloudExporter, ExportInput, ExportParams};
pub use crate::types::{CloudResult, KeypointResult, PathResult};

// High-level diagnostics returned alongside the cloud.
pub use crate::diagnostics::{ExportReport, PipelineTrace};

/// Small prelude for quick experiments.
///
/// ```no_run
/// use depth_cloud::prelude::*;
///
/// # fn main() -> Result<(), String> {
/// let mut map = DepthMap::new(640, 480);
/// map.set(240, 320, DepthCell::Valid([0.0, 0.0, 700.0]));
/// map.set(240, 321, DepthCell::Valid([2.5, 0.0, 701.0]));
///
/// let exporter = CloudExporter::new(ExportParams::default());
/// let report = exporter.process(ExportInput {
///     map: &map,
///     mesh_paths: &[],
///     keypoints: &[],
///     measurements: serde_json::Value::Null,
/// })?;
/// println!("points={} scale={:.3}", report.cloud.point_count, report.cloud.scale);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::depth::{DepthCell, DepthMap};
    pub use crate::{CloudExporter, CloudResult, ExportInput, ExportParams};
}
