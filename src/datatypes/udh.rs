//! User-data-header codec: the optional (tag, length, value) information
//! element block prefixed to the payload when the UDHI bit is set.
//!
//! Only the concatenation elements are interpreted; everything else is
//! carried through by length and otherwise ignored.

use crate::codec::{Encodable, PduError, Result, read_bytes, read_u8};
use bytes::{BufMut, BytesMut};
use std::io::Cursor;
use tracing::{debug, warn};

/// Concatenated short message, 8-bit reference (length 3).
pub const IE_CONCAT_8BIT: u8 = 0x00;
/// Concatenated short message, 16-bit reference (length 4).
pub const IE_CONCAT_16BIT: u8 = 0x08;

/// One raw information element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InformationElement {
    pub tag: u8,
    pub data: Vec<u8>,
}

/// Concatenation metadata extracted from a header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConcatInfo {
    pub reference: u16,
    pub max: u8,
    pub sequence: u8,
}

/// A parsed user data header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDataHeader {
    pub elements: Vec<InformationElement>,
}

impl UserDataHeader {
    /// Parse a header from the start of the user data, returning it together
    /// with the number of payload bytes it consumed (length octet included).
    pub fn decode(buf: &mut Cursor<&[u8]>) -> Result<(Self, usize)> {
        let header_len = read_u8(buf, "UDH length")? as usize;
        let block = read_bytes(buf, header_len, "UDH elements")?;

        let mut elements = Vec::new();
        let mut inner = Cursor::new(block.as_slice());
        while inner.position() < header_len as u64 {
            let tag = read_u8(&mut inner, "UDH element tag")?;
            let len = read_u8(&mut inner, "UDH element length")? as usize;
            let data = read_bytes(&mut inner, len, "UDH element value")?;
            elements.push(InformationElement { tag, data });
        }

        Ok((Self { elements }, header_len + 1))
    }

    /// Build the header for one part of a concatenated message. The 8-bit
    /// reference element is used unless the reference needs 16 bits.
    pub fn for_concat(reference: u16, max: u8, sequence: u8) -> Self {
        let element = if reference <= 0xff {
            InformationElement {
                tag: IE_CONCAT_8BIT,
                data: vec![reference as u8, max, sequence],
            }
        } else {
            let r = reference.to_be_bytes();
            InformationElement {
                tag: IE_CONCAT_16BIT,
                data: vec![r[0], r[1], max, sequence],
            }
        };
        Self {
            elements: vec![element],
        }
    }

    /// Extract concatenation metadata, if any element carries it.
    pub fn concat(&self) -> Option<ConcatInfo> {
        for element in &self.elements {
            match (element.tag, element.data.as_slice()) {
                (IE_CONCAT_8BIT, &[reference, max, sequence]) => {
                    return Some(ConcatInfo {
                        reference: u16::from(reference),
                        max,
                        sequence,
                    });
                }
                (IE_CONCAT_16BIT, &[hi, lo, max, sequence]) => {
                    return Some(ConcatInfo {
                        reference: u16::from_be_bytes([hi, lo]),
                        max,
                        sequence,
                    });
                }
                (IE_CONCAT_8BIT | IE_CONCAT_16BIT, data) => {
                    warn!(tag = element.tag, len = data.len(), "concatenation element with unexpected length");
                }
                (tag, data) => {
                    debug!(tag, len = data.len(), "skipping unrecognized UDH element");
                }
            }
        }
        None
    }

    /// Total wire size, length octet included.
    pub fn encoded_len(&self) -> usize {
        1 + self
            .elements
            .iter()
            .map(|e| 2 + e.data.len())
            .sum::<usize>()
    }
}

impl Encodable for UserDataHeader {
    fn encode(&self, buf: &mut BytesMut) -> Result<()> {
        let body_len = self.encoded_len() - 1;
        if body_len > 0xff {
            return Err(PduError::EncodingError(
                "user data header exceeds 255 bytes".into(),
            ));
        }
        buf.put_u8(body_len as u8);
        for element in &self.elements {
            buf.put_u8(element.tag);
            buf.put_u8(element.data.len() as u8);
            buf.put_slice(&element.data);
        }
        Ok(())
    }
}
