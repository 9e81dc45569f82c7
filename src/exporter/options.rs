//! Parameter types configuring the export pipeline.
//!
//! One flat knob set: crop fractions, downsampling target, path subsample
//! stride, RNG seed, and the keypoint search radius. Defaults are neutral
//! (no crop, no downsampling); tool configs typically tighten the crop.

use serde::Deserialize;

use crate::roi::CropFractions;

/// Pipeline-wide parameters.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct ExportParams {
    /// Fraction of the valid span removed from each image edge.
    pub crop: CropFractions,
    /// Random downsampling target; 0 keeps every cropped point.
    pub target_points: usize,
    /// Keep every Nth pixel of each measurement path (>= 1).
    pub path_stride: usize,
    /// Seed for the downsampling generator; same seed, same selection.
    pub seed: u64,
    /// Half-width of the square window searched around a keypoint whose
    /// pixel has no valid depth.
    pub keypoint_search_radius: i64,
}

impl Default for ExportParams {
    fn default() -> Self {
        Self {
            crop: CropFractions::default(),
            target_points: 0,
            path_stride: 2,
            seed: 42,
            keypoint_search_radius: 5,
        }
    }
}

impl ExportParams {
    /// Reject parameter combinations the pipeline does not define behavior
    /// for (crop fractions outside [0, 1), a zero path stride, a negative
    /// search radius).
    pub fn validate(&self) -> Result<(), String> {
        self.crop.validate()?;
        if self.path_stride == 0 {
            return Err("path_stride must be >= 1".to_string());
        }
        if self.keypoint_search_radius < 0 {
            return Err(format!(
                "keypoint_search_radius must be >= 0, got {}",
                self.keypoint_search_radius
            ));
        }
        Ok(())
    }
}
