//! Voice enrollment and authentication orchestration.
//!
//! # Flow
//!
//! Enrollment captures a few seconds of audio, extracts a voiceprint, and
//! persists it; authentication extracts a voiceprint from a command
//! utterance and compares it against the enrolled one:
//!
//! ```text
//! enroll:       capture -> extract -> encode -> save
//! authenticate: buffer  -> extract -> compare -> accept/reject
//! ```
//!
//! [`VoiceAuthenticator`] drives both flows over explicitly injected
//! collaborators (a capture source and a blob store); nothing in this
//! crate holds global state. Enrollment runs as a cancellable background
//! task that reports [`EnrollmentState`] transitions over a channel.
//!
//! At most one operation is in flight at a time: a second `enroll`,
//! `try_authenticate`, or `clear_enrollment` while one is running is
//! rejected with [`AuthError::Busy`]. Authentication fails closed: any
//! internal error answers "not authenticated".
//!
//! [`CommandGate`] sits in front of the assistant's command pipeline and
//! only forwards voice commands whose utterance audio passes
//! authentication, speaking a rejection message otherwise.

mod authenticator;
mod error;
mod gate;
mod state;

pub use authenticator::{AuthConfig, EnrollmentHandle, VoiceAuthenticator};
pub use error::AuthError;
pub use gate::{CommandGate, CommandSink, GateConfig, GateError, GateOutcome, Speaker};
pub use state::EnrollmentState;
