//! Synthetic order point generation.

use crate::config::{BandConfig, TestConfig};
use crate::payload::GeoPoint;
use rand::prelude::*;

/// Generates banded random point clouds around the configured center.
///
/// No clustering is applied: bands only bound the uniform draw range, so
/// the inner bands end up denser simply because they pack more points
/// into a smaller square.
pub struct PointGenerator {
    config: TestConfig,
    rng: StdRng,
}

impl PointGenerator {
    /// Create a new point generator.
    pub fn new(config: TestConfig) -> Self {
        // Use seed if provided for reproducible runs, otherwise use entropy
        let rng = if let Some(seed) = config.seed {
            StdRng::seed_from_u64(seed)
        } else {
            StdRng::from_entropy()
        };

        Self { config, rng }
    }

    /// Generate the configured number of points, band by band, innermost
    /// band first. Point order is preserved in the payload.
    pub fn generate(&mut self) -> Vec<GeoPoint> {
        let counts = band_counts(self.config.total_points, &self.config.bands);
        let center = self.config.center;

        let mut points = Vec::with_capacity(self.config.total_points);
        for (band, count) in self.config.bands.iter().zip(counts) {
            let w = band.half_width_deg;
            for _ in 0..count {
                let lon = center.lon + self.rng.gen_range(-w..=w);
                let lat = center.lat + self.rng.gen_range(-w..=w);
                points.push(GeoPoint(lon, lat));
            }
        }
        points
    }
}

/// Partition a total point count across bands.
///
/// Each band except the last receives `floor(total * weight / total_weight)`;
/// the last band takes the remainder, so the counts always sum to `total`.
/// For the reference configuration (2000 points, weights 60/25/15) this
/// yields 1200 / 500 / 300.
pub fn band_counts(total: usize, bands: &[BandConfig]) -> Vec<usize> {
    if bands.is_empty() {
        return Vec::new();
    }

    let total_weight: f64 = bands.iter().map(|b| b.weight).sum();
    let mut counts = Vec::with_capacity(bands.len());
    let mut assigned = 0usize;
    for band in &bands[..bands.len() - 1] {
        let count = (total as f64 * band.weight / total_weight).floor() as usize;
        counts.push(count);
        assigned += count;
    }
    counts.push(total - assigned);
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Center;

    fn seeded_config(total_points: usize, seed: u64) -> TestConfig {
        TestConfig {
            total_points,
            seed: Some(seed),
            ..Default::default()
        }
    }

    #[test]
    fn test_reference_partition() {
        let config = TestConfig::default();
        assert_eq!(band_counts(2000, &config.bands), vec![1200, 500, 300]);
    }

    #[test]
    fn test_partition_sums_to_total() {
        let config = TestConfig::default();
        for total in [1, 2, 3, 7, 99, 100, 1234, 2000, 2001] {
            let counts = band_counts(total, &config.bands);
            assert_eq!(counts.iter().sum::<usize>(), total, "total {}", total);
        }
    }

    #[test]
    fn test_partition_is_deterministic() {
        let config = TestConfig::default();
        assert_eq!(band_counts(7, &config.bands), band_counts(7, &config.bands));
        // floor(7 * 0.60) = 4, floor(7 * 0.25) = 1, remainder 2
        assert_eq!(band_counts(7, &config.bands), vec![4, 1, 2]);
    }

    #[test]
    fn test_single_band_takes_everything() {
        let bands = [BandConfig {
            weight: 1.0,
            half_width_deg: 0.010,
        }];
        assert_eq!(band_counts(500, &bands), vec![500]);
    }

    #[test]
    fn test_generates_exact_count() {
        for total in [1, 17, 500, 2000] {
            let mut generator = PointGenerator::new(seeded_config(total, 7));
            assert_eq!(generator.generate().len(), total);
        }
    }

    #[test]
    fn test_points_stay_within_widest_band() {
        let config = seeded_config(2000, 99);
        let center = config.center;
        let max_width = config.max_half_width();

        let mut generator = PointGenerator::new(config);
        for point in generator.generate() {
            assert!((point.lon() - center.lon).abs() <= max_width);
            assert!((point.lat() - center.lat).abs() <= max_width);
        }
    }

    #[test]
    fn test_inner_band_points_stay_within_inner_width() {
        // The first 1200 points of the reference run come from the 0.010 band.
        let config = seeded_config(2000, 99);
        let center = config.center;
        let inner_width = config.bands[0].half_width_deg;

        let mut generator = PointGenerator::new(config);
        let points = generator.generate();
        for point in &points[..1200] {
            assert!((point.lon() - center.lon).abs() <= inner_width);
            assert!((point.lat() - center.lat).abs() <= inner_width);
        }
    }

    #[test]
    fn test_same_seed_reproduces_sequence() {
        let a = PointGenerator::new(seeded_config(300, 1234)).generate();
        let b = PointGenerator::new(seeded_config(300, 1234)).generate();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds_diverge() {
        let a = PointGenerator::new(seeded_config(300, 1)).generate();
        let b = PointGenerator::new(seeded_config(300, 2)).generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_custom_center() {
        let config = TestConfig {
            center: Center { lon: 2.17, lat: 41.38 },
            total_points: 100,
            seed: Some(5),
            ..Default::default()
        };
        let max_width = config.max_half_width();
        let center = config.center;

        let mut generator = PointGenerator::new(config);
        for point in generator.generate() {
            assert!((point.lon() - center.lon).abs() <= max_width);
            assert!((point.lat() - center.lat).abs() <= max_width);
        }
    }
}
