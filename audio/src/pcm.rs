//! PCM audio format definitions and sample conversion.

use std::time::Duration;

/// Describes a PCM audio format.
/// Samples are always 16-bit signed little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Format {
    /// Sample rate in Hz (e.g., 16000, 48000).
    pub sample_rate: u32,
    /// True for stereo (2 channels), false for mono (1 channel).
    pub stereo: bool,
}

impl Format {
    /// Creates a new format with the given sample rate and mono audio.
    pub const fn mono(sample_rate: u32) -> Self {
        Self { sample_rate, stereo: false }
    }

    /// Creates a new format with the given sample rate and stereo audio.
    pub const fn stereo(sample_rate: u32) -> Self {
        Self { sample_rate, stereo: true }
    }

    /// Returns the number of channels (1 for mono, 2 for stereo).
    pub fn channels(&self) -> u32 {
        if self.stereo { 2 } else { 1 }
    }

    /// Returns the number of bytes per sample frame.
    /// For 16-bit audio: 2 bytes for mono, 4 bytes for stereo.
    pub fn sample_bytes(&self) -> usize {
        if self.stereo { 4 } else { 2 }
    }

    /// Returns the number of bytes produced per second.
    pub fn bytes_rate(&self) -> usize {
        self.sample_rate as usize * self.sample_bytes()
    }

    /// Returns the number of sample frames covering the given duration.
    pub fn samples_in_duration(&self, duration: Duration) -> usize {
        (duration.as_secs_f64() * self.sample_rate as f64) as usize
    }

    /// Returns the number of bytes covering the given duration.
    pub fn bytes_in_duration(&self, duration: Duration) -> usize {
        self.samples_in_duration(duration) * self.sample_bytes()
    }

    /// Returns the duration covered by the given number of bytes.
    pub fn duration(&self, bytes: usize) -> Duration {
        Duration::from_secs_f64(bytes as f64 / self.bytes_rate() as f64)
    }

    /// Returns the number of sample frames in the given number of bytes.
    pub fn samples(&self, bytes: usize) -> usize {
        bytes / self.sample_bytes()
    }
}

// Common format presets
impl Format {
    /// 16kHz mono (voice capture and recognition)
    pub const MONO_16K: Format = Format::mono(16000);
    /// 48kHz mono
    pub const MONO_48K: Format = Format::mono(48000);
}

/// Encodes i16 samples as little-endian bytes.
pub fn samples_to_bytes(samples: &[i16]) -> Vec<u8> {
    let mut data = Vec::with_capacity(samples.len() * 2);
    for sample in samples {
        data.extend_from_slice(&sample.to_le_bytes());
    }
    data
}

/// Decodes little-endian bytes into i16 samples.
/// A trailing odd byte is dropped.
pub fn bytes_to_samples(bytes: &[u8]) -> Vec<i16> {
    bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect()
}
