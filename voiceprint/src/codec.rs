//! Versioned binary encoding for persisted voiceprints.
//!
//! Layout: 4-byte magic `VGVP`, a 1-byte format version, a u32-LE element
//! count, then one f32-LE per element. The explicit header replaces
//! platform-dependent float-array dumps so stored voiceprints stay
//! readable across versions and architectures.

use crate::VoiceprintError;

const MAGIC: [u8; 4] = *b"VGVP";
const VERSION: u8 = 1;
const HEADER_LEN: usize = 9;

/// Encodes a feature vector as a versioned blob.
pub fn encode_voiceprint(features: &[f32]) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_LEN + features.len() * 4);
    out.extend_from_slice(&MAGIC);
    out.push(VERSION);
    out.extend_from_slice(&(features.len() as u32).to_le_bytes());
    for &f in features {
        out.extend_from_slice(&f.to_le_bytes());
    }
    out
}

/// Decodes a blob produced by [`encode_voiceprint`].
pub fn decode_voiceprint(bytes: &[u8]) -> Result<Vec<f32>, VoiceprintError> {
    if bytes.len() < HEADER_LEN {
        return Err(VoiceprintError::SizeMismatch {
            expected: HEADER_LEN,
            got: bytes.len(),
        });
    }
    if bytes[..4] != MAGIC {
        return Err(VoiceprintError::BadMagic);
    }
    if bytes[4] != VERSION {
        return Err(VoiceprintError::UnsupportedVersion(bytes[4]));
    }

    let count = u32::from_le_bytes([bytes[5], bytes[6], bytes[7], bytes[8]]) as usize;
    let expected = HEADER_LEN + count * 4;
    if bytes.len() != expected {
        return Err(VoiceprintError::SizeMismatch {
            expected,
            got: bytes.len(),
        });
    }

    let features = bytes[HEADER_LEN..]
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect();
    Ok(features)
}
