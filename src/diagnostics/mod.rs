//! Structured diagnostics emitted alongside the exported cloud.
//!
//! [`ExportReport`] bundles the viewer-facing [`CloudResult`](crate::types::CloudResult)
//! with a [`PipelineTrace`] describing every stage: input shape, per-stage
//! timings, crop bounds, sampling outcome, normalization statistics, and
//! annotation resolution counts.

pub mod report;
pub mod timing;

pub use report::{
    ExportReport, InputDescriptor, NormalizationStage, PathProjection, PipelineTrace,
    ProjectionStage, RoiStage, SamplingStage,
};
pub use timing::{StageTiming, TimingBreakdown};
