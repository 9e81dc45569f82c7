//! Pixel-space annotation inputs: measurement paths and keypoints.
//!
//! Both are defined on the depth image, not in 3D; the projector maps them
//! into the normalized cloud frame via depth-map lookups. Pixel pairs follow
//! the annotation tooling's `[x, y]` convention, i.e. `(column, row)`.

use serde::Deserialize;

/// A measurement polyline drawn on the depth image.
#[derive(Clone, Debug, Deserialize)]
pub struct MeasurementPath {
    /// Measurement identifier (e.g. `"chest_width"`).
    pub name: String,
    /// Ordered `[x, y]` pixel pairs tracing the polyline.
    pub path_pixels: Vec<[i64; 2]>,
}

/// A named landmark with a fractional pixel location.
///
/// Locations come from a sub-pixel refinement step, hence the fractional
/// coordinates; they are rounded to the nearest integer pixel before the
/// depth lookup.
#[derive(Clone, Debug, Deserialize)]
pub struct Keypoint {
    /// Landmark identifier (e.g. `"collar_left"`).
    pub id: String,
    /// Refined x (column) coordinate in pixels.
    pub finetuned_x: f64,
    /// Refined y (row) coordinate in pixels.
    pub finetuned_y: f64,
}

impl Keypoint {
    /// Nearest integer (row, col) pixel for the depth lookup.
    pub fn pixel(&self) -> (i64, i64) {
        (
            self.finetuned_y.round() as i64,
            self.finetuned_x.round() as i64,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keypoint_rounds_to_nearest_pixel() {
        let kp = Keypoint {
            id: "collar_left".to_string(),
            finetuned_x: 10.6,
            finetuned_y: 3.2,
        };
        assert_eq!(kp.pixel(), (3, 11));
    }

    #[test]
    fn deserializes_tooling_json() {
        let json = r#"{"name": "waist", "path_pixels": [[10, 20], [12, 21]]}"#;
        let path: MeasurementPath = serde_json::from_str(json).unwrap();
        assert_eq!(path.name, "waist");
        assert_eq!(path.path_pixels, vec![[10, 20], [12, 21]]);

        let json = r#"{"id": "hem_right", "finetuned_x": 101.25, "finetuned_y": 340.75, "score": 0.9}"#;
        let kp: Keypoint = serde_json::from_str(json).unwrap();
        assert_eq!(kp.id, "hem_right");
        assert_eq!(kp.pixel(), (341, 101));
    }
}
