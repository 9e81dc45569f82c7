//! Export pipeline orchestrating depth-map-to-cloud conversion.
//!
//! The [`CloudExporter`] exposes a single entry point: feed a depth map and
//! its annotations, get back the normalized cloud plus a structured trace.
//! Internally it coordinates validity filtering, proportional cropping,
//! seeded downsampling, normalization fitting, annotation projection, and
//! final assembly. Any fatal precondition (no valid pixels, empty crop,
//! degenerate point set) aborts the run before assembly; no partial result
//! is ever produced.
//!
//! Typical usage:
//! ```no_run
//! use depth_cloud::depth::DepthMap;
//! use depth_cloud::{CloudExporter, ExportInput, ExportParams};
//!
//! # fn example(map: DepthMap) -> Result<(), String> {
//! let exporter = CloudExporter::new(ExportParams::default());
//! let report = exporter.process(ExportInput {
//!     map: &map,
//!     mesh_paths: &[],
//!     keypoints: &[],
//!     measurements: serde_json::Value::Null,
//! })?;
//! println!("{} points", report.cloud.point_count);
//! # Ok(())
//! # }
//! ```

mod options;

pub use options::ExportParams;

use std::time::Instant;

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::annotations::{Keypoint, MeasurementPath};
use crate::depth::DepthMap;
use crate::diagnostics::{
    ExportReport, InputDescriptor, NormalizationStage, PathProjection, PipelineTrace,
    ProjectionStage, RoiStage, SamplingStage, TimingBreakdown,
};
use crate::normalize::{z_span, NormalizationParams};
use crate::types::{round5, CloudResult};
use crate::{project, roi, sampling};

/// Everything one export run consumes.
///
/// `measurements` is opaque metadata copied into the output untouched;
/// pass `Value::Null` when there is none.
pub struct ExportInput<'a> {
    pub map: &'a DepthMap,
    pub mesh_paths: &'a [MeasurementPath],
    pub keypoints: &'a [Keypoint],
    pub measurements: serde_json::Value,
}

/// Pipeline driver converting a depth map and annotations into a
/// normalized, viewer-ready point cloud.
pub struct CloudExporter {
    params: ExportParams,
}

impl CloudExporter {
    /// Create an exporter with the supplied parameters.
    pub fn new(params: ExportParams) -> Self {
        Self { params }
    }

    /// The active parameter set.
    pub fn params(&self) -> &ExportParams {
        &self.params
    }

    /// Run the full pipeline.
    ///
    /// Fails on invalid parameters and on the fatal preconditions: a depth
    /// map with zero valid pixels, an empty crop region, or a degenerate
    /// (zero-scale) point set.
    pub fn process(&self, input: ExportInput<'_>) -> Result<ExportReport, String> {
        self.params.validate()?;
        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();

        // Validity filter + crop.
        let roi_start = Instant::now();
        let valid = roi::collect_valid_pixels(input.map)?;
        let bounds = roi::crop_bounds(&valid, &self.params.crop);
        let cropped = roi::apply_crop(&valid, &bounds)?;
        timings.push("roi", elapsed_ms(roi_start));
        info!(
            "valid pixels: {}, crop bounds rows [{}, {}] cols [{}, {}], kept {}",
            valid.len(),
            bounds.row_lo,
            bounds.row_hi,
            bounds.col_lo,
            bounds.col_hi,
            cropped.len()
        );
        let roi_stage = RoiStage {
            valid_pixels: valid.len(),
            bounds,
            cropped_pixels: cropped.len(),
        };

        // Z statistics come from the cropped set, before any downsampling
        // and before normalization.
        let z_span_mm = z_span(&cropped.xyz);

        // Seeded downsampling with a locally scoped generator.
        let sampling_start = Instant::now();
        let cropped_count = cropped.len();
        let mut rng = StdRng::seed_from_u64(self.params.seed);
        let selected = sampling::downsample(cropped, self.params.target_points, &mut rng);
        timings.push("sampling", elapsed_ms(sampling_start));
        let sampling_stage = SamplingStage {
            target_points: self.params.target_points,
            seed: self.params.seed,
            applied: selected.len() < cropped_count,
            selected_points: selected.len(),
        };
        info!("after downsample: {} points", selected.len());

        // Normalization.
        let normalize_start = Instant::now();
        let norm = NormalizationParams::fit(&selected.xyz)?;
        timings.push("normalize", elapsed_ms(normalize_start));
        info!(
            "center [{:.3}, {:.3}, {:.3}], scale {:.3}, z span {:.1} mm",
            norm.center[0], norm.center[1], norm.center[2], norm.scale, z_span_mm
        );
        let normalization_stage = NormalizationStage {
            center: [norm.center[0], norm.center[1], norm.center[2]],
            scale: norm.scale,
            z_span_mm,
        };

        // Annotation projection in the same frame.
        let project_start = Instant::now();
        let paths = project::project_paths(
            input.map,
            &norm,
            input.mesh_paths,
            self.params.path_stride,
        );
        let keypoints = project::project_keypoints(
            input.map,
            &norm,
            input.keypoints,
            self.params.keypoint_search_radius,
        );
        timings.push("project", elapsed_ms(project_start));
        info!(
            "projected {} paths, {} / {} keypoints",
            paths.len(),
            keypoints.len(),
            input.keypoints.len()
        );
        let projection_stage = ProjectionStage {
            paths: input
                .mesh_paths
                .iter()
                .zip(&paths)
                .map(|(src, out)| PathProjection {
                    name: src.name.clone(),
                    pixels_sampled: src.path_pixels.len().div_ceil(self.params.path_stride),
                    points_resolved: out.path3d.len(),
                })
                .collect(),
            keypoints_resolved: keypoints.len(),
            keypoints_total: input.keypoints.len(),
        };

        // Assembly.
        let assemble_start = Instant::now();
        let mut points = Vec::with_capacity(selected.len() * 3);
        for p in &selected.xyz {
            let n = norm.apply(*p);
            points.push(round5(n[0]));
            points.push(round5(n[1]));
            points.push(round5(n[2]));
        }
        let cloud = CloudResult {
            point_count: selected.len(),
            points,
            measurements: input.measurements,
            paths,
            keypoints,
            center: [norm.center[0], norm.center[1], norm.center[2]],
            scale: norm.scale,
            z_span_mm,
        };
        timings.push("assemble", elapsed_ms(assemble_start));
        timings.total_ms = elapsed_ms(total_start);

        Ok(ExportReport {
            cloud,
            trace: PipelineTrace {
                input: InputDescriptor {
                    width: input.map.w,
                    height: input.map.h,
                    path_count: input.mesh_paths.len(),
                    keypoint_count: input.keypoints.len(),
                },
                timings,
                roi: roi_stage,
                sampling: sampling_stage,
                normalization: normalization_stage,
                projection: projection_stage,
            },
        })
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
