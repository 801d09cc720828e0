use std::fmt;

/// State of an enrollment attempt.
///
/// Transitions: `Started -> Recording -> Progress* -> Completed`, with any
/// state able to jump to `Error`. Both `Completed` and `Error` are
/// terminal for the attempt; a failed attempt is retried by calling
/// `enroll` again.
#[derive(Debug, Clone, PartialEq)]
pub enum EnrollmentState {
    /// The attempt was accepted and is about to open the capture source.
    Started,
    /// The capture source is live.
    Recording,
    /// Capture progress as a percentage in [0, 100].
    Progress(f32),
    /// The voiceprint was extracted and persisted.
    Completed,
    /// The attempt failed; nothing was persisted.
    Error(String),
}

impl fmt::Display for EnrollmentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Started => write!(f, "started"),
            Self::Recording => write!(f, "recording"),
            Self::Progress(pct) => write!(f, "progress {pct:.0}%"),
            Self::Completed => write!(f, "completed"),
            Self::Error(msg) => write!(f, "error: {msg}"),
        }
    }
}

impl EnrollmentState {
    /// Returns whether this state ends the attempt.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Error(_))
    }
}
