use thiserror::Error;

/// Errors returned by voiceprint decoding.
#[derive(Debug, Error)]
pub enum VoiceprintError {
    #[error("voiceprint blob has an unrecognized header")]
    BadMagic,

    #[error("unsupported voiceprint version: {0}")]
    UnsupportedVersion(u8),

    #[error("voiceprint blob size mismatch: expected {expected} bytes, got {got}")]
    SizeMismatch { expected: usize, got: usize },
}
