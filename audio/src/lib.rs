//! Audio primitives for voice capture and processing.
//!
//! This crate provides the audio-facing pieces of the pipeline:
//!
//! - `pcm`: PCM format descriptions and sample/byte conversion
//! - `capture`: the capture seam ([`capture::CaptureSource`]) that supplies
//!   live or pre-recorded 16-bit mono samples to consumers
//! - `synth`: deterministic test signals (sine tones, silence)
//!
//! # Example
//!
//! ```rust
//! use voicegate_audio::pcm::{self, Format};
//! use std::time::Duration;
//!
//! let format = Format::MONO_16K;
//!
//! // One second of 16kHz mono 16-bit audio is 32000 bytes.
//! assert_eq!(format.bytes_in_duration(Duration::from_secs(1)), 32000);
//!
//! let samples = voicegate_audio::synth::sine(440.0, 1600, format.sample_rate);
//! let bytes = pcm::samples_to_bytes(&samples);
//! assert_eq!(pcm::bytes_to_samples(&bytes), samples);
//! ```

pub mod capture;
pub mod pcm;
pub mod synth;

pub use capture::{BufferSource, CaptureError, CaptureSource};
pub use pcm::Format;
