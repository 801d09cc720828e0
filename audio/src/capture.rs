//! The capture seam between audio hardware and consumers.
//!
//! A [`CaptureSource`] incrementally produces finite chunks of 16-bit mono
//! samples. Real microphones, network streams, and pre-recorded buffers all
//! sit behind the same trait so consumers stay device-agnostic and testable.

use async_trait::async_trait;
use thiserror::Error;

use crate::pcm::Format;

/// Chunk size used when none is configured: 100ms at 16kHz.
const DEFAULT_CHUNK_SAMPLES: usize = 1600;

/// Errors raised by a capture source.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("audio device unavailable")]
    DeviceUnavailable,

    #[error("audio capture failed: {0}")]
    Failed(String),

    #[error("capture source is closed")]
    Closed,
}

/// An incremental producer of 16-bit mono PCM samples.
///
/// `read_chunk` returns `Ok(Some(chunk))` while samples are available,
/// `Ok(None)` once the stream ends, and `Err` on device failure. Chunk
/// sizes are chosen by the implementation; callers must not assume any
/// particular length.
#[async_trait]
pub trait CaptureSource: Send {
    /// Format of the produced samples.
    fn format(&self) -> Format;

    /// Reads the next chunk of samples.
    async fn read_chunk(&mut self) -> Result<Option<Vec<i16>>, CaptureError>;
}

/// A [`CaptureSource`] over a pre-captured sample buffer.
///
/// Yields the buffer in fixed-size chunks, then ends the stream. Used by
/// tests and by file-driven tools that replay recorded audio.
pub struct BufferSource {
    samples: Vec<i16>,
    pos: usize,
    chunk_size: usize,
    format: Format,
}

impl BufferSource {
    /// Creates a source over the given samples with the default chunk size
    /// (100ms at 16kHz) and the [`Format::MONO_16K`] format.
    pub fn new(samples: Vec<i16>) -> Self {
        Self::with_chunk_size(samples, DEFAULT_CHUNK_SAMPLES)
    }

    /// Creates a source yielding chunks of the given sample count.
    pub fn with_chunk_size(samples: Vec<i16>, chunk_size: usize) -> Self {
        let chunk_size = if chunk_size > 0 {
            chunk_size
        } else {
            DEFAULT_CHUNK_SAMPLES
        };
        Self {
            samples,
            pos: 0,
            chunk_size,
            format: Format::MONO_16K,
        }
    }
}

#[async_trait]
impl CaptureSource for BufferSource {
    fn format(&self) -> Format {
        self.format
    }

    async fn read_chunk(&mut self) -> Result<Option<Vec<i16>>, CaptureError> {
        if self.pos >= self.samples.len() {
            return Ok(None);
        }
        let end = (self.pos + self.chunk_size).min(self.samples.len());
        let chunk = self.samples[self.pos..end].to_vec();
        self.pos = end;
        Ok(Some(chunk))
    }
}
