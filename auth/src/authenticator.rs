//! The enrollment/authentication orchestrator.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use voicegate_audio::CaptureSource;
use voicegate_store::BlobStore;
use voicegate_voiceprint::{
    decode_voiceprint, encode_voiceprint, extract_features, FeatureConfig, MatchDecision,
    MatchPolicy,
};

use crate::{AuthError, EnrollmentState};

/// Configuration for [`VoiceAuthenticator`].
///
/// Enrollment and authentication must run with the same configuration or
/// stored voiceprints will not be comparable to live utterances.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Feature extraction parameters.
    pub features: FeatureConfig,
    /// Accept/reject policy.
    pub policy: MatchPolicy,
}

/// A running enrollment attempt.
///
/// State transitions arrive on `updates`; the channel closes once the
/// attempt reaches a terminal state. Dropping the handle does not cancel
/// the attempt; call [`EnrollmentHandle::cancel`] for that.
pub struct EnrollmentHandle {
    /// Receives state transitions for this attempt.
    pub updates: mpsc::Receiver<EnrollmentState>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl EnrollmentHandle {
    /// Cancels the attempt. Partial audio is discarded and nothing is
    /// persisted; the attempt ends with a terminal `Error` state.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Waits for the enrollment task to finish.
    pub async fn finished(self) {
        let _ = self.task.await;
    }
}

/// Drives voice enrollment and authentication over injected collaborators.
///
/// At most one operation runs at a time: the enrollment task holds a
/// session lock for its entire run, and `enroll`, [`Self::try_authenticate`]
/// and [`Self::clear_enrollment`] reject with [`AuthError::Busy`] rather
/// than queue behind it.
pub struct VoiceAuthenticator {
    store: Arc<dyn BlobStore>,
    cfg: AuthConfig,
    session: Arc<Mutex<()>>,
}

impl VoiceAuthenticator {
    /// Creates an authenticator over the given voiceprint store.
    pub fn new(store: Arc<dyn BlobStore>, cfg: AuthConfig) -> Self {
        Self {
            store,
            cfg,
            session: Arc::new(Mutex::new(())),
        }
    }

    /// Starts an enrollment attempt capturing `duration` of audio from
    /// `source`.
    ///
    /// The attempt runs as a background task and reports progress through
    /// the returned handle. If the source ends before `duration` is
    /// reached, the captured prefix is used; a capture too short to fill
    /// a single analysis frame fails the attempt and persists nothing.
    pub fn enroll(
        &self,
        source: Box<dyn CaptureSource>,
        duration: Duration,
    ) -> Result<EnrollmentHandle, AuthError> {
        let permit = self
            .session
            .clone()
            .try_lock_owned()
            .map_err(|_| AuthError::Busy)?;

        let (tx, rx) = mpsc::channel(32);
        let cancel = CancellationToken::new();
        let task = tokio::spawn(run_enrollment(
            source,
            duration,
            self.cfg.clone(),
            self.store.clone(),
            tx,
            cancel.clone(),
            permit,
        ));

        Ok(EnrollmentHandle {
            updates: rx,
            cancel,
            task,
        })
    }

    /// Compares an utterance against the enrolled voiceprint.
    pub fn try_authenticate(&self, samples: &[i16]) -> Result<MatchDecision, AuthError> {
        let _permit = self
            .session
            .clone()
            .try_lock_owned()
            .map_err(|_| AuthError::Busy)?;

        let blob = self.store.load()?.ok_or(AuthError::NotEnrolled)?;
        let enrolled = decode_voiceprint(&blob)?;
        let candidate = extract_features(samples, &self.cfg.features);
        Ok(self.cfg.policy.compare(&candidate, &enrolled))
    }

    /// Fail-closed authentication: any internal error answers `false`.
    pub fn authenticate(&self, samples: &[i16]) -> bool {
        match self.try_authenticate(samples) {
            Ok(decision) => {
                debug!(
                    similarity = decision.similarity,
                    matched = decision.matched,
                    "voiceprint comparison"
                );
                decision.matched
            }
            Err(AuthError::NotEnrolled) => false,
            Err(e) => {
                warn!(error = %e, "authentication failed closed");
                false
            }
        }
    }

    /// Returns whether a voiceprint is enrolled. Storage errors answer
    /// `false`.
    pub fn is_enrolled(&self) -> bool {
        self.store.exists().unwrap_or(false)
    }

    /// Deletes the enrolled voiceprint. Subsequent authentication fails
    /// until re-enrollment.
    pub fn clear_enrollment(&self) -> Result<(), AuthError> {
        let _permit = self
            .session
            .clone()
            .try_lock_owned()
            .map_err(|_| AuthError::Busy)?;
        self.store.delete()?;
        Ok(())
    }
}

/// The enrollment task. Holds the session permit for its whole run.
async fn run_enrollment(
    mut source: Box<dyn CaptureSource>,
    duration: Duration,
    cfg: AuthConfig,
    store: Arc<dyn BlobStore>,
    tx: mpsc::Sender<EnrollmentState>,
    cancel: CancellationToken,
    _permit: OwnedMutexGuard<()>,
) {
    let _ = tx.send(EnrollmentState::Started).await;

    let result = async {
        let samples = capture_samples(source.as_mut(), duration, &cancel, &tx).await?;
        let features = extract_features(&samples, &cfg.features);
        if features.is_empty() {
            return Err(AuthError::EmptyCapture);
        }
        store.save(&encode_voiceprint(&features))?;
        Ok::<_, AuthError>(features.len())
    }
    .await;

    match result {
        Ok(frames) => {
            debug!(frames, "enrollment completed");
            let _ = tx.send(EnrollmentState::Completed).await;
        }
        Err(e) => {
            warn!(error = %e, "enrollment failed");
            let _ = tx.send(EnrollmentState::Error(e.to_string())).await;
        }
    }
}

/// Reads chunks from the source until the target duration is captured,
/// the source ends, or the attempt is cancelled.
async fn capture_samples(
    source: &mut dyn CaptureSource,
    duration: Duration,
    cancel: &CancellationToken,
    tx: &mpsc::Sender<EnrollmentState>,
) -> Result<Vec<i16>, AuthError> {
    let target = source.format().samples_in_duration(duration);
    if target == 0 {
        return Err(AuthError::EmptyCapture);
    }

    let _ = tx.send(EnrollmentState::Recording).await;
    let mut samples: Vec<i16> = Vec::with_capacity(target);

    while samples.len() < target {
        let chunk = tokio::select! {
            _ = cancel.cancelled() => return Err(AuthError::Cancelled),
            chunk = source.read_chunk() => chunk?,
        };
        let Some(mut chunk) = chunk else {
            // Source ended early; keep the captured prefix.
            debug!(captured = samples.len(), target, "capture ended early");
            break;
        };

        chunk.truncate(target - samples.len());
        samples.extend_from_slice(&chunk);
        let pct = samples.len() as f32 / target as f32 * 100.0;
        let _ = tx.send(EnrollmentState::Progress(pct)).await;
    }

    Ok(samples)
}
