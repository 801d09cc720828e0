use thiserror::Error;

use voicegate_audio::CaptureError;
use voicegate_store::StoreError;
use voicegate_voiceprint::VoiceprintError;

/// Errors returned by enrollment and authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("another voice session is in flight")]
    Busy,

    #[error("no voiceprint enrolled")]
    NotEnrolled,

    #[error("capture produced no usable audio")]
    EmptyCapture,

    #[error("enrollment cancelled")]
    Cancelled,

    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Voiceprint(#[from] VoiceprintError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_errors_keep_their_message() {
        let err = AuthError::from(CaptureError::DeviceUnavailable);
        assert!(err.to_string().contains("unavailable"));

        let err = AuthError::from(StoreError::Storage("disk full".to_string()));
        assert!(err.to_string().contains("disk full"));
    }
}
