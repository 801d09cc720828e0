//! Voiceprint comparison via cosine similarity.

use serde::{Deserialize, Serialize};

/// Default acceptance threshold for cosine similarity.
pub const DEFAULT_THRESHOLD: f32 = 0.85;

/// Configures the accept/reject decision.
///
/// The threshold was chosen empirically; expose it as configuration so
/// deployments can tune the false-accept/false-reject trade-off.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchPolicy {
    /// Minimum cosine similarity, exclusive (default: 0.85).
    pub threshold: f32,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Outcome of comparing a candidate vector against an enrolled one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchDecision {
    /// True when the similarity cleared the threshold.
    pub matched: bool,
    /// Cosine similarity in [-1, 1]; 0 when undefined (length mismatch
    /// or zero-norm input).
    pub similarity: f32,
}

/// Computes the cosine similarity of two vectors with f64 intermediates.
///
/// Returns `None` when the vectors differ in length or either has zero
/// norm, the cases where the quotient is undefined. Callers that need a
/// decision rather than a score should use [`MatchPolicy::compare`].
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Option<f32> {
    if a.len() != b.len() {
        return None;
    }

    let mut dot: f64 = 0.0;
    let mut norm_a: f64 = 0.0;
    let mut norm_b: f64 = 0.0;
    for (&x, &y) in a.iter().zip(b.iter()) {
        let (x, y) = (x as f64, y as f64);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return None;
    }
    Some((dot / (norm_a.sqrt() * norm_b.sqrt())) as f32)
}

impl MatchPolicy {
    /// Decides whether a candidate feature vector matches the enrolled one.
    ///
    /// Vectors of different lengths come from recordings of different
    /// durations and are structurally incompatible: the result is "no
    /// match" without computing similarity. Zero-norm vectors never match.
    pub fn compare(&self, candidate: &[f32], enrolled: &[f32]) -> MatchDecision {
        match cosine_similarity(candidate, enrolled) {
            Some(similarity) => MatchDecision {
                matched: similarity > self.threshold,
                similarity,
            },
            None => MatchDecision {
                matched: false,
                similarity: 0.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_policy_default() {
        let policy = MatchPolicy::default();
        assert_eq!(policy.threshold, 0.85);
    }

    #[test]
    fn identical_vectors_match() {
        let policy = MatchPolicy::default();
        let v = vec![0.2f32, 0.9, 0.4, 1.0];
        let decision = policy.compare(&v, &v);
        assert!(decision.matched);
        assert!((decision.similarity - 1.0).abs() < 1e-6);
    }

    #[test]
    fn length_mismatch_never_matches() {
        let policy = MatchPolicy::default();
        let decision = policy.compare(&[1.0, 1.0], &[1.0, 1.0, 1.0]);
        assert!(!decision.matched);
        assert_eq!(decision.similarity, 0.0);
    }

    #[test]
    fn zero_vectors_never_match() {
        let policy = MatchPolicy::default();
        let zero = vec![0.0f32; 8];
        let decision = policy.compare(&zero, &zero);
        assert!(!decision.matched);
        assert!(!decision.similarity.is_nan());
        assert_eq!(decision.similarity, 0.0);
    }

    #[test]
    fn empty_vectors_never_match() {
        let policy = MatchPolicy::default();
        let decision = policy.compare(&[], &[]);
        assert!(!decision.matched);
    }

    #[test]
    fn orthogonal_vectors_rejected() {
        let policy = MatchPolicy::default();
        let decision = policy.compare(&[1.0, 0.0], &[0.0, 1.0]);
        assert!(!decision.matched);
        assert!(decision.similarity.abs() < 1e-6);
    }

    #[test]
    fn threshold_is_exclusive() {
        let policy = MatchPolicy { threshold: 1.0 };
        // Similarity of a vector with itself is exactly 1.0, which does
        // not clear a threshold of 1.0.
        let v = vec![1.0f32, 2.0];
        assert!(!policy.compare(&v, &v).matched);
    }

    #[test]
    fn cosine_similarity_undefined_cases() {
        assert!(cosine_similarity(&[1.0], &[1.0, 2.0]).is_none());
        assert!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]).is_none());
        assert!(cosine_similarity(&[], &[]).is_none());
    }

    #[test]
    fn cosine_similarity_opposite_vectors() {
        let sim = cosine_similarity(&[1.0, 1.0], &[-1.0, -1.0]).unwrap();
        assert!((sim + 1.0).abs() < 1e-6);
    }
}
