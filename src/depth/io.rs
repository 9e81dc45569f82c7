//! I/O helpers for depth maps, annotation JSON, and result JSON.
//!
//! - `load_depth_npy`: read an `xyz.npy` (H×W×3, f64 or f32) into a [`DepthMap`].
//! - `load_mesh_paths` / `load_keypoints` / `load_measurements`: annotation JSON.
//! - `write_json_file`: pretty-print a serializable value to disk (traces, debug).
//! - `write_json_compact`: compact serialization for the large cloud output.

use std::fs;
use std::path::Path;

use ndarray::Array3;
use ndarray_npy::ReadNpyExt;
use serde::Serialize;

use super::{DepthCell, DepthMap};
use crate::annotations::{Keypoint, MeasurementPath};

/// Load an `xyz.npy` depth export from disk.
///
/// Accepts f64 or f32 element type; any pixel with a NaN channel becomes
/// [`DepthCell::Invalid`].
pub fn load_depth_npy(path: &Path) -> Result<DepthMap, String> {
    let file =
        fs::File::open(path).map_err(|e| format!("Failed to open {}: {e}", path.display()))?;
    let xyz = match Array3::<f64>::read_npy(file) {
        Ok(a) => a,
        Err(_) => {
            // Not f64; retry as f32 before giving up.
            let file = fs::File::open(path)
                .map_err(|e| format!("Failed to open {}: {e}", path.display()))?;
            Array3::<f32>::read_npy(file)
                .map_err(|e| format!("Failed to parse npy {}: {e}", path.display()))?
                .mapv(f64::from)
        }
    };
    depth_map_from_xyz(&xyz)
}

/// Convert an H×W×3 coordinate array into a [`DepthMap`].
pub fn depth_map_from_xyz(xyz: &Array3<f64>) -> Result<DepthMap, String> {
    let (h, w, channels) = xyz.dim();
    if channels != 3 {
        return Err(format!(
            "Expected an H x W x 3 depth array, got {h} x {w} x {channels}"
        ));
    }
    let mut cells = Vec::with_capacity(h * w);
    for row in 0..h {
        for col in 0..w {
            let p = [xyz[[row, col, 0]], xyz[[row, col, 1]], xyz[[row, col, 2]]];
            if p.iter().any(|v| v.is_nan()) {
                cells.push(DepthCell::Invalid);
            } else {
                cells.push(DepthCell::Valid(p));
            }
        }
    }
    DepthMap::from_cells(w, h, cells)
}

/// Load measurement path polylines from the annotation tooling's JSON.
pub fn load_mesh_paths(path: &Path) -> Result<Vec<MeasurementPath>, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    serde_json::from_str(&data).map_err(|e| format!("Failed to parse {}: {e}", path.display()))
}

/// Load keypoints from the annotation tooling's JSON.
pub fn load_keypoints(path: &Path) -> Result<Vec<Keypoint>, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    serde_json::from_str(&data).map_err(|e| format!("Failed to parse {}: {e}", path.display()))
}

/// Load measurement metadata as an opaque JSON value.
pub fn load_measurements(path: &Path) -> Result<serde_json::Value, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    serde_json::from_str(&data).map_err(|e| format!("Failed to parse {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

/// Serialize a value as compact JSON to `path`, creating parent directories.
///
/// The flat point array dominates the output size; pretty-printing it would
/// triple the file.
pub fn write_json_compact<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray_npy::WriteNpyExt;

    #[test]
    fn nan_pixels_become_invalid_cells() {
        let mut xyz = Array3::<f64>::zeros((2, 3, 3));
        xyz[[0, 0, 0]] = 1.0;
        xyz[[0, 0, 1]] = 2.0;
        xyz[[0, 0, 2]] = 3.0;
        xyz[[1, 2, 1]] = f64::NAN; // one NaN channel invalidates the pixel
        let map = depth_map_from_xyz(&xyz).unwrap();
        assert_eq!(map.w, 3);
        assert_eq!(map.h, 2);
        assert_eq!(map.get(0, 0).xyz(), Some([1.0, 2.0, 3.0]));
        assert!(map.get(0, 1).is_valid()); // all-zero is a real coordinate
        assert!(!map.get(1, 2).is_valid());
    }

    #[test]
    fn rejects_wrong_channel_count() {
        let xyz = Array3::<f64>::zeros((2, 2, 4));
        assert!(depth_map_from_xyz(&xyz).is_err());
    }

    #[test]
    fn npy_round_trip_f64_and_f32() {
        let dir = tempfile::tempdir().unwrap();

        let mut xyz = Array3::<f64>::zeros((2, 2, 3));
        xyz[[1, 1, 2]] = 750.5;
        xyz[[0, 1, 0]] = f64::NAN;
        let path64 = dir.path().join("xyz64.npy");
        xyz.write_npy(fs::File::create(&path64).unwrap()).unwrap();
        let map = load_depth_npy(&path64).unwrap();
        assert_eq!(map.get(1, 1).xyz(), Some([0.0, 0.0, 750.5]));
        assert!(!map.get(0, 1).is_valid());

        let xyz32 = xyz.mapv(|v| v as f32);
        let path32 = dir.path().join("xyz32.npy");
        xyz32.write_npy(fs::File::create(&path32).unwrap()).unwrap();
        let map32 = load_depth_npy(&path32).unwrap();
        assert_eq!(map32.get(1, 1).xyz(), Some([0.0, 0.0, 750.5]));
        assert!(!map32.get(0, 1).is_valid());
    }

    #[test]
    fn annotation_loaders_parse_tooling_json() {
        let dir = tempfile::tempdir().unwrap();

        let paths_file = dir.path().join("mesh_paths.json");
        fs::write(
            &paths_file,
            r#"[{"name": "chest", "path_pixels": [[5, 6], [7, 8]]}]"#,
        )
        .unwrap();
        let paths = load_mesh_paths(&paths_file).unwrap();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].path_pixels[1], [7, 8]);

        let kp_file = dir.path().join("keypoints.json");
        fs::write(
            &kp_file,
            r#"[{"id": "collar", "finetuned_x": 1.5, "finetuned_y": 2.5}]"#,
        )
        .unwrap();
        let kps = load_keypoints(&kp_file).unwrap();
        assert_eq!(kps[0].id, "collar");

        let meas_file = dir.path().join("measurements.json");
        fs::write(&meas_file, r#"[{"name": "chest", "value_mm": 520}]"#).unwrap();
        let meas = load_measurements(&meas_file).unwrap();
        assert_eq!(meas[0]["value_mm"], 520);
    }
}
