//! Synthetic depth maps for integration tests.

use depth_cloud::depth::{DepthCell, DepthMap};

/// Fully valid map: xyz = (col * spacing, row * spacing, z_base + row + col).
pub fn plane_map(w: usize, h: usize, spacing: f64, z_base: f64) -> DepthMap {
    let mut map = DepthMap::new(w, h);
    for row in 0..h {
        for col in 0..w {
            map.set(
                row,
                col,
                DepthCell::Valid([
                    col as f64 * spacing,
                    row as f64 * spacing,
                    z_base + (row + col) as f64,
                ]),
            );
        }
    }
    map
}

/// Striped 4x4 map: rows 0 and 3 all-invalid, rows 1-2 valid integer
/// coordinates (x = col, y = row, z = row + col).
pub fn striped_4x4() -> DepthMap {
    let mut map = DepthMap::new(4, 4);
    for row in 1..=2usize {
        for col in 0..4usize {
            map.set(
                row,
                col,
                DepthCell::Valid([col as f64, row as f64, (row + col) as f64]),
            );
        }
    }
    map
}
