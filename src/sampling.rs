//! Order-preserving random subsampling of the cropped point set.
//!
//! Selection is uniform without replacement; the chosen indices are sorted
//! back into ascending order so the output is a subsequence of the input.
//! The generator is constructed by the caller, so identical seeds reproduce
//! identical selections with no process-wide state.

use rand::Rng;

use crate::roi::ValidPixels;

/// Draw `target` indices from `0..len` uniformly without replacement and
/// return them sorted ascending. Returns `None` when no reduction applies
/// (`target` is zero, or the set already fits).
pub fn sample_sorted_indices<R: Rng>(
    len: usize,
    target: usize,
    rng: &mut R,
) -> Option<Vec<usize>> {
    if target == 0 || len <= target {
        return None;
    }
    let mut indices = rand::seq::index::sample(rng, len, target).into_vec();
    indices.sort_unstable();
    Some(indices)
}

/// Subsample `pixels` down to `target` points, preserving scan order.
///
/// Pass-through when `target` is zero or the set is already small enough.
pub fn downsample<R: Rng>(pixels: ValidPixels, target: usize, rng: &mut R) -> ValidPixels {
    match sample_sorted_indices(pixels.len(), target, rng) {
        None => pixels,
        Some(indices) => ValidPixels {
            rows: indices.iter().map(|&i| pixels.rows[i]).collect(),
            cols: indices.iter().map(|&i| pixels.cols[i]).collect(),
            xyz: indices.iter().map(|&i| pixels.xyz[i]).collect(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn line_pixels(n: usize) -> ValidPixels {
        ValidPixels {
            rows: (0..n).collect(),
            cols: vec![0; n],
            xyz: (0..n).map(|i| [i as f64, 0.0, 0.0]).collect(),
        }
    }

    #[test]
    fn target_zero_keeps_everything() {
        let mut rng = StdRng::seed_from_u64(42);
        let out = downsample(line_pixels(10), 0, &mut rng);
        assert_eq!(out.len(), 10);
        assert_eq!(out.rows, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn target_at_least_len_keeps_everything() {
        let mut rng = StdRng::seed_from_u64(42);
        let out = downsample(line_pixels(10), 25, &mut rng);
        assert_eq!(out.len(), 10);
    }

    #[test]
    fn selects_exactly_target_in_ascending_order() {
        let mut rng = StdRng::seed_from_u64(7);
        let indices = sample_sorted_indices(100, 20, &mut rng).unwrap();
        assert_eq!(indices.len(), 20);
        assert!(indices.windows(2).all(|w| w[0] < w[1]));
        assert!(indices.iter().all(|&i| i < 100));
    }

    #[test]
    fn output_is_a_subsequence_of_the_input() {
        let mut rng = StdRng::seed_from_u64(9);
        let out = downsample(line_pixels(50), 12, &mut rng);
        assert_eq!(out.len(), 12);
        assert!(out.rows.windows(2).all(|w| w[0] < w[1]));
        for (i, &row) in out.rows.iter().enumerate() {
            assert_eq!(out.xyz[i][0], row as f64);
        }
    }

    #[test]
    fn same_seed_reproduces_the_selection() {
        let a = sample_sorted_indices(1000, 100, &mut StdRng::seed_from_u64(42));
        let b = sample_sorted_indices(1000, 100, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
        let c = sample_sorted_indices(1000, 100, &mut StdRng::seed_from_u64(43));
        assert_ne!(a, c);
    }
}
