//! Speaker verification via energy-based voiceprints.
//!
//! # Architecture
//!
//! The pipeline processes audio in three stages:
//!
//! 1. [`extract_features`]: PCM16 16kHz mono samples -> normalized energy vector
//! 2. [`MatchPolicy::compare`]: candidate vector vs. enrolled vector -> accept/reject
//! 3. [`encode_voiceprint`] / [`decode_voiceprint`]: feature vector <-> versioned blob
//!
//! # Feature Extraction
//!
//! Samples are partitioned into consecutive non-overlapping frames
//! (default 160 samples = 10ms at 16kHz). Each frame contributes its
//! energy (sum of squared samples), and the resulting vector is scaled by
//! its own maximum so every element lands in `[0, 1]`.
//!
//! # Matching
//!
//! Two feature vectors match when their cosine similarity exceeds the
//! configured threshold (default 0.85). Vectors of different lengths come
//! from recordings of different durations and never match; zero-norm
//! vectors (silence) never match either.

mod codec;
mod compare;
mod error;
mod features;

pub use codec::{decode_voiceprint, encode_voiceprint};
pub use compare::{cosine_similarity, MatchDecision, MatchPolicy, DEFAULT_THRESHOLD};
pub use error::VoiceprintError;
pub use features::{extract_features, FeatureConfig, DEFAULT_FRAME_SIZE};
