//! Feature smoothing window
//!
//! The classifier reads means over the last few chunks rather than raw
//! per-chunk values, with pitch spread (standard deviation) standing in for
//! agitation. The window is caller-held: extraction itself stays stateless.

use std::collections::VecDeque;

use attune_core::{AudioFeatures, SmoothedFeatures};

use crate::extract::{PITCH_BASELINE_HZ, TEMPO_BASELINE};

/// Number of chunks the smoothing window retains.
pub const SMOOTHING_WINDOW: usize = 10;

/// Sliding buffer of recent [`AudioFeatures`].
#[derive(Clone, Debug)]
pub struct FeatureWindow {
    features: VecDeque<AudioFeatures>,
    capacity: usize,
}

impl Default for FeatureWindow {
    fn default() -> Self {
        FeatureWindow::with_capacity(SMOOTHING_WINDOW)
    }
}

impl FeatureWindow {
    pub fn new() -> Self {
        FeatureWindow::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        FeatureWindow {
            features: VecDeque::with_capacity(capacity.max(1)),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, features: AudioFeatures) {
        self.features.push_back(features);
        while self.features.len() > self.capacity {
            self.features.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn reset(&mut self) {
        self.features.clear();
    }

    /// Windowed aggregate: means for all three features, population standard
    /// deviation of pitch as `pitch_variance`. An empty window smooths to the
    /// baseline triple.
    pub fn smoothed(&self) -> SmoothedFeatures {
        if self.features.is_empty() {
            return SmoothedFeatures {
                pitch_mean: PITCH_BASELINE_HZ,
                pitch_variance: 0.0,
                energy_mean: 0.0,
                tempo_mean: TEMPO_BASELINE,
            };
        }

        let n = self.features.len() as f64;
        let mut pitch_sum = 0.0f64;
        let mut energy_sum = 0.0f64;
        let mut tempo_sum = 0.0f64;
        for f in &self.features {
            pitch_sum += f.pitch as f64;
            energy_sum += f.energy as f64;
            tempo_sum += f.tempo as f64;
        }
        let pitch_mean = pitch_sum / n;

        let pitch_sq_dev: f64 = self
            .features
            .iter()
            .map(|f| {
                let d = f.pitch as f64 - pitch_mean;
                d * d
            })
            .sum();

        SmoothedFeatures {
            pitch_mean: pitch_mean as f32,
            pitch_variance: (pitch_sq_dev / n).sqrt() as f32,
            energy_mean: (energy_sum / n) as f32,
            tempo_mean: (tempo_sum / n) as f32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(pitch: f32, energy: f32, tempo: f32) -> AudioFeatures {
        AudioFeatures {
            pitch,
            energy,
            tempo,
        }
    }

    #[test]
    fn test_empty_window_smooths_to_baselines() {
        let window = FeatureWindow::new();
        let smoothed = window.smoothed();
        assert_eq!(smoothed.pitch_mean, PITCH_BASELINE_HZ);
        assert_eq!(smoothed.pitch_variance, 0.0);
        assert_eq!(smoothed.energy_mean, 0.0);
        assert_eq!(smoothed.tempo_mean, TEMPO_BASELINE);
    }

    #[test]
    fn test_means_over_window() {
        let mut window = FeatureWindow::new();
        window.push(features(100.0, 0.2, 0.8));
        window.push(features(200.0, 0.4, 1.2));

        let smoothed = window.smoothed();
        assert!((smoothed.pitch_mean - 150.0).abs() < 1e-3);
        assert!((smoothed.energy_mean - 0.3).abs() < 1e-6);
        assert!((smoothed.tempo_mean - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_pitch_variance_is_population_std_dev() {
        let mut window = FeatureWindow::new();
        window.push(features(140.0, 0.5, 1.0));
        window.push(features(160.0, 0.5, 1.0));

        // mean 150, deviations ±10, population std dev 10
        let smoothed = window.smoothed();
        assert!((smoothed.pitch_variance - 10.0).abs() < 1e-3);

        let mut steady = FeatureWindow::new();
        for _ in 0..5 {
            steady.push(features(150.0, 0.5, 1.0));
        }
        assert_eq!(steady.smoothed().pitch_variance, 0.0);
    }

    #[test]
    fn test_window_evicts_oldest_beyond_capacity() {
        let mut window = FeatureWindow::new();
        window.push(features(999.0, 1.0, 2.0));
        for _ in 0..SMOOTHING_WINDOW {
            window.push(features(100.0, 0.1, 1.0));
        }

        assert_eq!(window.len(), SMOOTHING_WINDOW);
        // The 999 Hz outlier fell out, so the mean reflects only the rest
        assert!((window.smoothed().pitch_mean - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_reset_clears_window() {
        let mut window = FeatureWindow::new();
        window.push(features(120.0, 0.3, 1.0));
        window.reset();
        assert!(window.is_empty());
        assert_eq!(window.smoothed().pitch_mean, PITCH_BASELINE_HZ);
    }
}
