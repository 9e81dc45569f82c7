//! Output data model consumed by the web viewer.
//!
//! Field names are a wire contract: the viewer reads `points`, `pointCount`,
//! `measurements`, `paths[].path3d`, `keypoints[].pos`, `center`, `scale`
//! and `zSpanMm` from `pointcloud.json`.

use serde::Serialize;

/// A measurement path projected into the normalized 3D frame.
///
/// `path3d` holds only the sampled pixels that resolved to valid depth; it
/// may be shorter than the pixel polyline, or empty.
#[derive(Clone, Debug, Serialize)]
pub struct PathResult {
    pub name: String,
    pub path3d: Vec<[f64; 3]>,
}

/// A keypoint resolved to a normalized 3D position.
#[derive(Clone, Debug, Serialize)]
pub struct KeypointResult {
    pub id: String,
    pub pos: [f64; 3],
}

/// The complete export: normalized cloud, co-registered annotation geometry,
/// and the statistics the viewer needs for depth coloring.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudResult {
    /// Flat normalized coordinates, `3 * point_count` values, point-major.
    pub points: Vec<f64>,
    pub point_count: usize,
    /// Measurement metadata passed through untouched.
    pub measurements: serde_json::Value,
    pub paths: Vec<PathResult>,
    pub keypoints: Vec<KeypointResult>,
    /// Per-axis mean of the exported set, real-world units.
    pub center: [f64; 3],
    /// Maximum absolute deviation from `center`, real-world units.
    pub scale: f64,
    /// Real-world Z range of the cropped set, before normalization.
    pub z_span_mm: f64,
}

/// Round a normalized coordinate to 5 decimals for serialization.
///
/// Applied to every coordinate emitted in `points`, `path3d` and `pos`;
/// keeps `pointcloud.json` compact without visible quantization at viewer
/// precision.
#[inline]
pub(crate) fn round5(v: f64) -> f64 {
    (v * 1e5).round() / 1e5
}

/// Round all three components of a normalized point.
#[inline]
pub(crate) fn round5_point(p: [f64; 3]) -> [f64; 3] {
    [round5(p[0]), round5(p[1]), round5(p[2])]
}
