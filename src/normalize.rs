//! Centering and uniform scaling of the exported point set.
//!
//! The fitted transform maps every coordinate into [-1, 1]: subtract the
//! per-axis mean, divide by the maximum absolute deviation across all points
//! and all three axes. The same transform is reused verbatim for every
//! annotation projection so the whole export shares one frame.

use nalgebra::Vector3;

/// Fitted normalization transform.
#[derive(Clone, Copy, Debug)]
pub struct NormalizationParams {
    /// Per-axis arithmetic mean of the fitted set, real-world units.
    pub center: Vector3<f64>,
    /// Maximum absolute deviation from `center`, real-world units. Always > 0.
    pub scale: f64,
}

impl NormalizationParams {
    /// Fit center and scale to a point set.
    ///
    /// Fails on an empty set and on a degenerate one (all points identical,
    /// which would make the scale zero).
    pub fn fit(xyz: &[[f64; 3]]) -> Result<Self, String> {
        if xyz.is_empty() {
            return Err("cannot normalize an empty point set".to_string());
        }
        let mut sum = Vector3::zeros();
        for p in xyz {
            sum += Vector3::new(p[0], p[1], p[2]);
        }
        let center = sum / xyz.len() as f64;

        let mut scale = 0.0f64;
        for p in xyz {
            for axis in 0..3 {
                scale = scale.max((p[axis] - center[axis]).abs());
            }
        }
        if scale <= 0.0 {
            return Err(format!(
                "degenerate point set: all {} points identical, scale would be zero",
                xyz.len()
            ));
        }
        Ok(Self { center, scale })
    }

    /// Map a real-world point into the normalized frame.
    #[inline]
    pub fn apply(&self, p: [f64; 3]) -> [f64; 3] {
        [
            (p[0] - self.center[0]) / self.scale,
            (p[1] - self.center[1]) / self.scale,
            (p[2] - self.center[2]) / self.scale,
        ]
    }
}

/// Real-world Z range (max - min) of a point set.
///
/// Computed on the cropped set before normalization; the viewer uses it to
/// map depth colors back to physical millimetres.
pub fn z_span(xyz: &[[f64; 3]]) -> f64 {
    let mut z_min = f64::INFINITY;
    let mut z_max = f64::NEG_INFINITY;
    for p in xyz {
        z_min = z_min.min(p[2]);
        z_max = z_max.max(p[2]);
    }
    if z_min.is_finite() && z_max.is_finite() {
        z_max - z_min
    } else {
        0.0
    }
}
