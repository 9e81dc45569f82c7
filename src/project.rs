//! Projection of pixel-space annotations into the normalized cloud frame.
//!
//! Paths are subsampled and looked up pixel-by-pixel; samples without valid
//! depth are dropped silently. Keypoints get a bounded square-window search
//! around their rounded location: offsets are scanned row-major (dy outer,
//! dx inner, each from -radius to +radius) and the first in-bounds valid
//! cell wins. First-found, not nearest-by-distance — the scan order is part
//! of the observed behavior and must stay deterministic.

use log::debug;

use crate::annotations::{Keypoint, MeasurementPath};
use crate::depth::DepthMap;
use crate::normalize::NormalizationParams;
use crate::types::{round5_point, KeypointResult, PathResult};

/// Project every measurement path, keeping every `stride`-th pixel.
///
/// Every input path yields an output entry; a path whose sampled pixels all
/// miss valid depth yields an empty `path3d`. `stride` must be >= 1.
pub fn project_paths(
    map: &DepthMap,
    norm: &NormalizationParams,
    paths: &[MeasurementPath],
    stride: usize,
) -> Vec<PathResult> {
    paths
        .iter()
        .map(|path| {
            let path3d: Vec<[f64; 3]> = path
                .path_pixels
                .iter()
                .step_by(stride)
                .filter_map(|&[x, y]| map.get_checked(y, x))
                .map(|p| round5_point(norm.apply(p)))
                .collect();
            debug!(
                "path '{}': {} / {} sampled pixels resolved",
                path.name,
                path3d.len(),
                path.path_pixels.len().div_ceil(stride)
            );
            PathResult {
                name: path.name.clone(),
                path3d,
            }
        })
        .collect()
}

/// Project keypoints, dropping those whose whole search window is invalid.
pub fn project_keypoints(
    map: &DepthMap,
    norm: &NormalizationParams,
    keypoints: &[Keypoint],
    radius: i64,
) -> Vec<KeypointResult> {
    keypoints
        .iter()
        .filter_map(|kp| {
            let (row, col) = kp.pixel();
            match find_valid_near(map, row, col, radius) {
                Some(p) => Some(KeypointResult {
                    id: kp.id.clone(),
                    pos: round5_point(norm.apply(p)),
                }),
                None => {
                    debug!(
                        "keypoint '{}' at ({row}, {col}): no valid depth within radius {radius}",
                        kp.id
                    );
                    None
                }
            }
        })
        .collect()
}

/// First valid cell in the square window around (row, col), scan order
/// dy-major then dx, both ascending from -radius.
fn find_valid_near(map: &DepthMap, row: i64, col: i64, radius: i64) -> Option<[f64; 3]> {
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if let Some(p) = map.get_checked(row + dy, col + dx) {
                return Some(p);
            }
        }
    }
    None
}
