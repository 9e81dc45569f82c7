use serde::Serialize;

use crate::diagnostics::TimingBreakdown;
use crate::roi::CropBounds;
use crate::types::CloudResult;

/// Result produced by [`CloudExporter::process`](crate::CloudExporter):
/// the viewer-facing cloud plus a structured trace of the run.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportReport {
    pub cloud: CloudResult,
    pub trace: PipelineTrace,
}

/// End-to-end trace describing what each stage saw and produced.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineTrace {
    pub input: InputDescriptor,
    pub timings: TimingBreakdown,
    pub roi: RoiStage,
    pub sampling: SamplingStage,
    pub normalization: NormalizationStage,
    pub projection: ProjectionStage,
}

/// Shape of the inputs fed into the pipeline.
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub path_count: usize,
    pub keypoint_count: usize,
}

/// Validity filtering and crop outcome.
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiStage {
    pub valid_pixels: usize,
    pub bounds: CropBounds,
    pub cropped_pixels: usize,
}

/// Downsampling outcome.
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplingStage {
    pub target_points: usize,
    pub seed: u64,
    /// False when the stage passed the set through unchanged.
    pub applied: bool,
    pub selected_points: usize,
}

/// Fitted normalization and the pre-normalization Z statistics.
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizationStage {
    pub center: [f64; 3],
    pub scale: f64,
    pub z_span_mm: f64,
}

/// Per-path resolution counts and the keypoint tally.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionStage {
    pub paths: Vec<PathProjection>,
    pub keypoints_resolved: usize,
    pub keypoints_total: usize,
}

/// How many of a path's sampled pixels resolved to valid depth.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathProjection {
    pub name: String,
    pub pixels_sampled: usize,
    pub points_resolved: usize,
}
