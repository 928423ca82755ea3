//! Intensity histogram and Otsu threshold selection.
//!
//! Binarization picks its global threshold from the 256-bin histogram of
//! the luma plane using Otsu's method: the threshold that maximizes the
//! between-class variance of the two pixel populations it separates.

/// 256-bin histogram of 8-bit intensities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntensityHistogram {
    /// Pixel count for each intensity value.
    pub bins: [u32; 256],
}

impl Default for IntensityHistogram {
    fn default() -> Self {
        Self { bins: [0; 256] }
    }
}

impl IntensityHistogram {
    /// Create a new empty histogram
    pub fn new() -> Self {
        Self::default()
    }

    /// Histogram of a single-channel plane.
    pub fn from_plane(plane: &[u8]) -> Self {
        let mut hist = Self::new();
        for &v in plane {
            hist.bins[v as usize] += 1;
        }
        hist
    }

    /// Total number of samples.
    pub fn total(&self) -> u64 {
        self.bins.iter().map(|&c| c as u64).sum()
    }

    /// Select the Otsu threshold.
    ///
    /// Class 0 is every value `<= t`, class 1 every value `> t`. Ties keep the
    /// lowest threshold. An empty or single-valued histogram has no
    /// separating threshold and yields 0.
    pub fn otsu_threshold(&self) -> u8 {
        let total = self.total();
        if total == 0 {
            return 0;
        }

        let total_sum: f64 = self
            .bins
            .iter()
            .enumerate()
            .map(|(i, &c)| i as f64 * c as f64)
            .sum();

        let mut weight_bg: u64 = 0;
        let mut sum_bg = 0.0f64;
        let mut best_variance = 0.0f64;
        let mut best_threshold = 0u8;

        for (t, &count) in self.bins.iter().enumerate() {
            weight_bg += count as u64;
            sum_bg += t as f64 * count as f64;

            let weight_fg = total - weight_bg;
            if weight_bg == 0 || weight_fg == 0 {
                continue;
            }

            let mean_bg = sum_bg / weight_bg as f64;
            let mean_fg = (total_sum - sum_bg) / weight_fg as f64;
            let diff = mean_bg - mean_fg;
            let variance = weight_bg as f64 * weight_fg as f64 * diff * diff;

            if variance > best_variance {
                best_variance = variance;
                best_threshold = t as u8;
            }
        }

        best_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_histogram() {
        let hist = IntensityHistogram::new();
        assert_eq!(hist.total(), 0);
        assert_eq!(hist.otsu_threshold(), 0);
    }

    #[test]
    fn test_from_plane_counts() {
        let hist = IntensityHistogram::from_plane(&[0, 0, 128, 255]);
        assert_eq!(hist.bins[0], 2);
        assert_eq!(hist.bins[128], 1);
        assert_eq!(hist.bins[255], 1);
        assert_eq!(hist.total(), 4);
    }

    #[test]
    fn test_uniform_plane_has_no_threshold() {
        let hist = IntensityHistogram::from_plane(&[90; 64]);
        assert_eq!(hist.otsu_threshold(), 0);
    }

    #[test]
    fn test_bimodal_threshold_separates_modes() {
        let mut plane = vec![20u8; 500];
        plane.extend(vec![220u8; 500]);
        let t = IntensityHistogram::from_plane(&plane).otsu_threshold();
        // Every threshold in [20, 220) separates the modes equally well;
        // the first one wins.
        assert_eq!(t, 20);
    }

    #[test]
    fn test_noisy_bimodal_threshold_between_modes() {
        let mut plane = Vec::new();
        for v in 30u8..50 {
            plane.extend(std::iter::repeat(v).take(40));
        }
        for v in 180u8..210 {
            plane.extend(std::iter::repeat(v).take(25));
        }
        let t = IntensityHistogram::from_plane(&plane).otsu_threshold();
        assert!((49..180).contains(&t), "threshold {} should split the modes", t);
    }
}
