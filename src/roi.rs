//! Valid-pixel extraction and proportional region-of-interest cropping.
//!
//! The scan walks the depth map row-major and keeps (row, col, xyz) for
//! every valid cell; the crop shrinks the valid bounding box by a fraction
//! of its span on each side and filters the scan result, preserving order.

use serde::{Deserialize, Serialize};

use crate::depth::DepthMap;

/// Valid depth cells in row-major scan order, as parallel arrays.
#[derive(Clone, Debug, Default)]
pub struct ValidPixels {
    /// Row index per point.
    pub rows: Vec<usize>,
    /// Column index per point.
    pub cols: Vec<usize>,
    /// Real-world coordinate per point.
    pub xyz: Vec<[f64; 3]>,
}

impl ValidPixels {
    /// Number of points.
    pub fn len(&self) -> usize {
        self.xyz.len()
    }

    /// True when no valid cell was found.
    pub fn is_empty(&self) -> bool {
        self.xyz.is_empty()
    }
}

/// Collect every valid cell of the map in row-major scan order.
///
/// A map with zero valid cells has no bounding box to crop, so it is a
/// fatal condition here rather than downstream.
pub fn collect_valid_pixels(map: &DepthMap) -> Result<ValidPixels, String> {
    let mut pixels = ValidPixels::default();
    for row in 0..map.h {
        for col in 0..map.w {
            if let Some(p) = map.get(row, col).xyz() {
                pixels.rows.push(row);
                pixels.cols.push(col);
                pixels.xyz.push(p);
            }
        }
    }
    if pixels.is_empty() {
        return Err("no valid pixels in depth map".to_string());
    }
    Ok(pixels)
}

/// Fraction of the valid span to remove from each image edge, each in [0, 1).
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CropFractions {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl CropFractions {
    /// Reject fractions outside [0, 1).
    pub fn validate(&self) -> Result<(), String> {
        for (label, v) in [
            ("top", self.top),
            ("bottom", self.bottom),
            ("left", self.left),
            ("right", self.right),
        ] {
            if !(0.0..1.0).contains(&v) {
                return Err(format!("crop fraction {label} = {v} outside [0, 1)"));
            }
        }
        Ok(())
    }
}

/// Inclusive pixel bounds of the cropped region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CropBounds {
    pub row_lo: usize,
    pub row_hi: usize,
    pub col_lo: usize,
    pub col_hi: usize,
}

impl CropBounds {
    /// True when (row, col) lies inside the bounds, all sides inclusive.
    #[inline]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.row_lo && row <= self.row_hi && col >= self.col_lo && col <= self.col_hi
    }

    /// True when the fractions left no rows or no columns.
    pub fn is_degenerate(&self) -> bool {
        self.row_lo > self.row_hi || self.col_lo > self.col_hi
    }
}

/// Bounding box of the valid pixels, shrunk by the crop fractions.
///
/// The inset on each side is `floor(span * fraction)` pixels of the valid
/// span on that axis. Fractions summing to >= 1 on an axis produce
/// degenerate bounds; [`apply_crop`] surfaces that as an error.
pub fn crop_bounds(pixels: &ValidPixels, fractions: &CropFractions) -> CropBounds {
    let row_min = *pixels.rows.iter().min().unwrap_or(&0);
    let row_max = *pixels.rows.iter().max().unwrap_or(&0);
    let col_min = *pixels.cols.iter().min().unwrap_or(&0);
    let col_max = *pixels.cols.iter().max().unwrap_or(&0);

    let row_span = (row_max - row_min) as f64;
    let col_span = (col_max - col_min) as f64;

    CropBounds {
        row_lo: row_min + (row_span * fractions.top) as usize,
        row_hi: row_max - (row_span * fractions.bottom) as usize,
        col_lo: col_min + (col_span * fractions.left) as usize,
        col_hi: col_max - (col_span * fractions.right) as usize,
    }
}

/// Filter the scan result to points inside `bounds`, preserving order.
pub fn apply_crop(pixels: &ValidPixels, bounds: &CropBounds) -> Result<ValidPixels, String> {
    if bounds.is_degenerate() {
        return Err(format!(
            "empty crop region: rows [{}, {}], cols [{}, {}]",
            bounds.row_lo, bounds.row_hi, bounds.col_lo, bounds.col_hi
        ));
    }
    let mut cropped = ValidPixels::default();
    for i in 0..pixels.len() {
        if bounds.contains(pixels.rows[i], pixels.cols[i]) {
            cropped.rows.push(pixels.rows[i]);
            cropped.cols.push(pixels.cols[i]);
            cropped.xyz.push(pixels.xyz[i]);
        }
    }
    if cropped.is_empty() {
        return Err(format!(
            "empty crop region: no valid pixels inside rows [{}, {}], cols [{}, {}]",
            bounds.row_lo, bounds.row_hi, bounds.col_lo, bounds.col_hi
        ));
    }
    Ok(cropped)
}
