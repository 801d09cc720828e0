//! The voice-gated command pipeline.
//!
//! Every voice-originated command carries the utterance audio it was
//! transcribed from. The gate authenticates that audio before the command
//! reaches the rest of the assistant; rejected speakers hear a spoken
//! rejection message instead.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::VoiceAuthenticator;

/// Errors raised by gate collaborators.
#[derive(Debug, Error)]
pub enum GateError {
    #[error("speaker error: {0}")]
    Speaker(String),

    #[error("dispatch error: {0}")]
    Dispatch(String),
}

/// Interface for spoken feedback (TTS).
#[async_trait]
pub trait Speaker: Send + Sync {
    /// Speaks the given text.
    async fn speak(&self, text: &str) -> Result<(), GateError>;
}

/// Receives commands that passed authentication.
#[async_trait]
pub trait CommandSink: Send + Sync {
    /// Forwards a command to the assistant pipeline.
    async fn dispatch(&self, command: &str) -> Result<(), GateError>;
}

/// Configuration for [`CommandGate`].
#[derive(Debug, Clone)]
pub struct GateConfig {
    /// Messages spoken to a rejected speaker, used round-robin.
    pub rejection_messages: Vec<String>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            rejection_messages: vec![
                "Sorry, I don't recognize your voice.".to_string(),
                "Voice verification failed. Please try again.".to_string(),
                "I only take commands from my enrolled user.".to_string(),
            ],
        }
    }
}

/// Outcome of gating a single command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// The speaker was verified and the command was dispatched.
    Forwarded,
    /// The speaker was rejected; a rejection message was spoken instead.
    Rejected,
}

/// Gates voice commands behind speaker verification.
pub struct CommandGate {
    auth: Arc<VoiceAuthenticator>,
    speaker: Arc<dyn Speaker>,
    sink: Arc<dyn CommandSink>,
    cfg: GateConfig,
    next_rejection: AtomicUsize,
}

impl CommandGate {
    /// Creates a gate with the default configuration.
    pub fn new(
        auth: Arc<VoiceAuthenticator>,
        speaker: Arc<dyn Speaker>,
        sink: Arc<dyn CommandSink>,
    ) -> Self {
        Self::with_config(auth, speaker, sink, GateConfig::default())
    }

    /// Creates a gate with the given configuration. An empty rejection
    /// message list falls back to the defaults.
    pub fn with_config(
        auth: Arc<VoiceAuthenticator>,
        speaker: Arc<dyn Speaker>,
        sink: Arc<dyn CommandSink>,
        cfg: GateConfig,
    ) -> Self {
        let cfg = if cfg.rejection_messages.is_empty() {
            GateConfig::default()
        } else {
            cfg
        };
        Self {
            auth,
            speaker,
            sink,
            cfg,
            next_rejection: AtomicUsize::new(0),
        }
    }

    /// Gates one voice command: the utterance audio must authenticate
    /// before the command is dispatched.
    ///
    /// On rejection, the next rejection message is spoken; a speaker
    /// failure is logged and never turns a rejection into a forward.
    pub async fn handle(&self, command: &str, audio: &[i16]) -> Result<GateOutcome, GateError> {
        if self.auth.authenticate(audio) {
            self.sink.dispatch(command).await?;
            debug!(command, "voice command forwarded");
            return Ok(GateOutcome::Forwarded);
        }

        info!(command, "voice command rejected");
        let message = self.next_rejection_message();
        if let Err(e) = self.speaker.speak(&message).await {
            warn!(error = %e, "failed to speak rejection message");
        }
        Ok(GateOutcome::Rejected)
    }

    fn next_rejection_message(&self) -> String {
        let idx = self.next_rejection.fetch_add(1, Ordering::Relaxed);
        self.cfg.rejection_messages[idx % self.cfg.rejection_messages.len()].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;
    use voicegate_audio::{synth, BufferSource};
    use voicegate_store::MemoryStore;
    use crate::AuthConfig;

    #[derive(Default)]
    struct Recorder {
        lines: Mutex<Vec<String>>,
    }

    impl Recorder {
        fn lines(&self) -> Vec<String> {
            self.lines.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Speaker for Recorder {
        async fn speak(&self, text: &str) -> Result<(), GateError> {
            self.lines.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    #[async_trait]
    impl CommandSink for Recorder {
        async fn dispatch(&self, command: &str) -> Result<(), GateError> {
            self.lines.lock().unwrap().push(command.to_string());
            Ok(())
        }
    }

    struct MuteSpeaker;

    #[async_trait]
    impl Speaker for MuteSpeaker {
        async fn speak(&self, _text: &str) -> Result<(), GateError> {
            Err(GateError::Speaker("tts offline".to_string()))
        }
    }

    async fn enrolled_authenticator(voice: &[i16]) -> Arc<VoiceAuthenticator> {
        let auth = Arc::new(VoiceAuthenticator::new(
            Arc::new(MemoryStore::new()),
            AuthConfig::default(),
        ));
        let mut handle = auth
            .enroll(
                Box::new(BufferSource::new(voice.to_vec())),
                Duration::from_secs(1),
            )
            .unwrap();
        while handle.updates.recv().await.is_some() {}
        handle.finished().await;
        auth
    }

    #[tokio::test]
    async fn verified_command_is_forwarded() {
        let voice = synth::sine(440.0, 16000, 16000);
        let auth = enrolled_authenticator(&voice).await;
        let speaker = Arc::new(Recorder::default());
        let sink = Arc::new(Recorder::default());
        let gate = CommandGate::new(auth, speaker.clone(), sink.clone());

        let outcome = gate.handle("turn on the lights", &voice).await.unwrap();

        assert_eq!(outcome, GateOutcome::Forwarded);
        assert_eq!(sink.lines(), vec!["turn on the lights".to_string()]);
        assert!(speaker.lines().is_empty());
    }

    #[tokio::test]
    async fn rejected_command_is_spoken_away_not_forwarded() {
        let voice = synth::sine(440.0, 16000, 16000);
        let auth = enrolled_authenticator(&voice).await;
        let speaker = Arc::new(Recorder::default());
        let sink = Arc::new(Recorder::default());
        let gate = CommandGate::new(auth, speaker.clone(), sink.clone());

        let intruder = synth::silence(voice.len());
        let outcome = gate.handle("unlock the door", &intruder).await.unwrap();

        assert_eq!(outcome, GateOutcome::Rejected);
        assert!(sink.lines().is_empty());
        assert_eq!(speaker.lines().len(), 1);
    }

    #[tokio::test]
    async fn rejection_messages_rotate() {
        let voice = synth::sine(440.0, 16000, 16000);
        let auth = enrolled_authenticator(&voice).await;
        let speaker = Arc::new(Recorder::default());
        let sink = Arc::new(Recorder::default());
        let gate = CommandGate::with_config(
            auth,
            speaker.clone(),
            sink.clone(),
            GateConfig {
                rejection_messages: vec!["no".to_string(), "still no".to_string()],
            },
        );

        let intruder = synth::silence(voice.len());
        for _ in 0..3 {
            gate.handle("open sesame", &intruder).await.unwrap();
        }

        assert_eq!(
            speaker.lines(),
            vec!["no".to_string(), "still no".to_string(), "no".to_string()]
        );
    }

    #[tokio::test]
    async fn speaker_failure_keeps_the_rejection() {
        let voice = synth::sine(440.0, 16000, 16000);
        let auth = enrolled_authenticator(&voice).await;
        let sink = Arc::new(Recorder::default());
        let gate = CommandGate::new(auth, Arc::new(MuteSpeaker), sink.clone());

        let intruder = synth::silence(voice.len());
        let outcome = gate.handle("unlock the door", &intruder).await.unwrap();

        assert_eq!(outcome, GateOutcome::Rejected);
        assert!(sink.lines().is_empty());
    }

    #[tokio::test]
    async fn unenrolled_gate_rejects_everything() {
        let auth = Arc::new(VoiceAuthenticator::new(
            Arc::new(MemoryStore::new()),
            AuthConfig::default(),
        ));
        let speaker = Arc::new(Recorder::default());
        let sink = Arc::new(Recorder::default());
        let gate = CommandGate::new(auth, speaker.clone(), sink.clone());

        let voice = synth::sine(440.0, 16000, 16000);
        let outcome = gate.handle("hello", &voice).await.unwrap();

        assert_eq!(outcome, GateOutcome::Rejected);
        assert!(sink.lines().is_empty());
    }

    #[test]
    fn empty_rejection_list_falls_back_to_defaults() {
        let cfg = GateConfig {
            rejection_messages: Vec::new(),
        };
        let auth = Arc::new(VoiceAuthenticator::new(
            Arc::new(MemoryStore::new()),
            AuthConfig::default(),
        ));
        let gate = CommandGate::with_config(
            auth,
            Arc::new(MuteSpeaker),
            Arc::new(NullSink),
            cfg,
        );
        assert!(!gate.cfg.rejection_messages.is_empty());
    }

    struct NullSink;

    #[async_trait]
    impl CommandSink for NullSink {
        async fn dispatch(&self, _command: &str) -> Result<(), GateError> {
            Ok(())
        }
    }
}
