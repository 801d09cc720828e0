//! Energy-based feature extraction.

use serde::{Deserialize, Serialize};

/// Default frame size: 160 samples = 10ms at 16kHz.
pub const DEFAULT_FRAME_SIZE: usize = 160;

/// Configures energy feature extraction.
///
/// The frame size was chosen empirically; treat it as tunable
/// configuration rather than a fixed property of the algorithm. Both
/// enrollment and authentication must run with the same configuration or
/// the resulting vectors will not be comparable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Samples per analysis frame (default: 160 = 10ms @ 16kHz).
    pub frame_size: usize,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            frame_size: DEFAULT_FRAME_SIZE,
        }
    }
}

/// Extracts a normalized energy vector from PCM16 mono samples.
///
/// The input is partitioned into consecutive non-overlapping frames of
/// `cfg.frame_size` samples; a trailing partial frame is dropped, so the
/// output length is `len / frame_size` (integer division). Each element is
/// the frame's energy (sum of squared samples) scaled by the vector's own
/// maximum.
///
/// An all-silent input yields an all-zero vector: the normalization step
/// is skipped when the maximum is 0. Zero-length input (or a zero frame
/// size) yields an empty vector.
pub fn extract_features(samples: &[i16], cfg: &FeatureConfig) -> Vec<f32> {
    if cfg.frame_size == 0 || samples.is_empty() {
        return Vec::new();
    }

    let mut features: Vec<f32> = samples
        .chunks_exact(cfg.frame_size)
        .map(|frame| {
            let energy: f64 = frame
                .iter()
                .map(|&s| {
                    let v = s as f64;
                    v * v
                })
                .sum();
            energy as f32
        })
        .collect();

    // Energies are non-negative, so 0 is a safe fold seed.
    let max = features.iter().copied().fold(0.0f32, f32::max);
    if max > 0.0 {
        for v in &mut features {
            *v /= max;
        }
    }
    features
}
