//! UCS-2 (in practice UTF-16BE) payload codec.
//!
//! Characters outside the Basic Multilingual Plane travel as surrogate
//! pairs, i.e. two 16-bit units and four wire bytes. Length accounting for
//! splitting therefore counts 16-bit units, never decoded characters.

use crate::codec::{PduError, Result};

/// Decode big-endian 16-bit units into text.
///
/// An odd byte count is a structural fault; an unpaired surrogate inside an
/// otherwise valid stream is recovered as U+FFFD so one bad unit does not
/// discard the message.
pub fn decode(bytes: &[u8]) -> Result<String> {
    if bytes.len() % 2 != 0 {
        return Err(PduError::DecodeError(format!(
            "odd number of UCS-2 payload bytes ({})",
            bytes.len()
        )));
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect();
    Ok(String::from_utf16_lossy(&units))
}

/// Encode text as big-endian 16-bit units.
pub fn encode(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() * 2);
    for unit in text.encode_utf16() {
        out.extend_from_slice(&unit.to_be_bytes());
    }
    out
}

/// Wire cost of one character in 16-bit units (2 for supplementary-plane
/// characters).
pub fn char_cost(c: char) -> usize {
    c.len_utf16()
}

/// Total length of a string in 16-bit units.
pub fn unit_len(text: &str) -> usize {
    text.chars().map(char_cost).sum()
}
