// 3GPP TS 23.040 wire plumbing - separates byte-level access from the domain codecs
//
// Every length-prefixed read in this crate goes through the checked helpers
// below, so truncated input surfaces as a typed error before any slice access.
// The hex helpers implement the boundary format exchanged with the modem
// transport layer (two hex digits per octet, no separators).

use bytes::{Buf, BytesMut};
use std::io::Cursor;
use thiserror::Error;

/// Codec errors with enough context to tell a corrupt PDU from a caller bug.
#[derive(Debug, Error)]
pub enum PduError {
    #[error("insufficient data reading {field}: need {needed} byte(s), have {available}")]
    InsufficientData {
        field: &'static str,
        needed: usize,
        available: usize,
    },

    #[error("malformed PDU: {0}")]
    MalformedPdu(String),

    #[error("malformed address: {0}")]
    MalformedAddress(String),

    #[error("decode error: {0}")]
    DecodeError(String),

    #[error("encoding error: {0}")]
    EncodingError(String),
}

/// A specialized `Result` for PDU codec operations.
pub type Result<T> = std::result::Result<T, PduError>;

/// Trait for fixed-shape wire fields that encode themselves into a buffer.
pub trait Encodable {
    fn encode(&self, buf: &mut BytesMut) -> Result<()>;
}

/// Trait for fixed-shape wire fields that decode themselves from a cursor.
pub trait Decodable: Sized {
    fn decode(buf: &mut Cursor<&[u8]>) -> Result<Self>;
}

/// Read a single octet, failing before the cursor runs dry.
pub(crate) fn read_u8(buf: &mut Cursor<&[u8]>, field: &'static str) -> Result<u8> {
    if buf.remaining() < 1 {
        return Err(PduError::InsufficientData {
            field,
            needed: 1,
            available: 0,
        });
    }
    Ok(buf.get_u8())
}

/// Read exactly `len` octets, failing before the cursor runs dry.
pub(crate) fn read_bytes(
    buf: &mut Cursor<&[u8]>,
    len: usize,
    field: &'static str,
) -> Result<Vec<u8>> {
    if buf.remaining() < len {
        return Err(PduError::InsufficientData {
            field,
            needed: len,
            available: buf.remaining(),
        });
    }
    let mut out = vec![0u8; len];
    buf.copy_to_slice(&mut out);
    Ok(out)
}

/// Convert the transport-layer hex string into octets.
///
/// Accepts either case; whitespace around the string is tolerated, separators
/// within it are not.
pub fn hex_to_bytes(hex: &str) -> Result<Vec<u8>> {
    let hex = hex.trim();
    if hex.len() % 2 != 0 {
        return Err(PduError::MalformedPdu(format!(
            "odd-length hex string ({} digits)",
            hex.len()
        )));
    }
    hex.as_bytes()
        .chunks_exact(2)
        .map(|pair| Ok(hex_nibble(pair[0])? << 4 | hex_nibble(pair[1])?))
        .collect()
}

fn hex_nibble(digit: u8) -> Result<u8> {
    match digit {
        b'0'..=b'9' => Ok(digit - b'0'),
        b'a'..=b'f' => Ok(digit - b'a' + 10),
        b'A'..=b'F' => Ok(digit - b'A' + 10),
        _ => Err(PduError::MalformedPdu(format!(
            "invalid hex digit {:?}",
            digit as char
        ))),
    }
}

/// Convert octets back into the lowercase hex form the transport layer expects.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    const DIGITS: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        out.push(DIGITS[(b >> 4) as usize] as char);
        out.push(DIGITS[(b & 0x0f) as usize] as char);
    }
    out
}
