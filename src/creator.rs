//! PDU creator: one populated [`SmsPart`] in, one SUBMIT octet stream out.
//!
//! The inverse of the parser for the write path. Multipart senders build one
//! part per splitter chunk, set the concatenation fields, and encode each
//! part separately; the returned offset locates the TPDU inside the buffer
//! so the transport layer can derive the length the modem expects.

use crate::codec::{Encodable, PduError, Result, bytes_to_hex};
use crate::datatypes::gsm7;
use crate::datatypes::ucs2;
use crate::datatypes::{
    DataCodingScheme, PduType, SmsEncoding, SmsPart, UserDataHeader, encode_address,
    relative_validity_to_octet,
};
use bytes::{BufMut, BytesMut};

/// Largest user-data-length value for a 7-bit payload, in septets.
const MAX_GSM7_SEPTETS: usize = 160;
/// Largest user-data-length value for UCS-2 and 8-bit payloads, in bytes.
const MAX_PAYLOAD_BYTES: usize = 140;

/// A finished SUBMIT PDU plus the offsets the transport layer needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedSubmit {
    /// The full octet stream, SMSC block included.
    pub bytes: Vec<u8>,
    /// Zero-based offset of the first TPDU octet: 1 when no SMSC is
    /// embedded (a lone zero-length octet precedes it), more otherwise.
    pub message_start: usize,
}

impl EncodedSubmit {
    /// Octet count of the TPDU alone, which is what `AT+CMGS` wants.
    pub fn tpdu_len(&self) -> usize {
        self.bytes.len() - self.message_start
    }

    /// The transport-layer hex form.
    pub fn to_hex(&self) -> String {
        bytes_to_hex(&self.bytes)
    }
}

/// Encode a SUBMIT part into the exact octet stream a modem transmits.
pub fn create_submit_pdu(part: &SmsPart) -> Result<EncodedSubmit> {
    if part.pdu_type != PduType::Submit {
        return Err(PduError::EncodingError(format!(
            "only SUBMIT parts can be encoded, got {:?}",
            part.pdu_type
        )));
    }

    let mut buf = BytesMut::new();
    match &part.smsc {
        Some(smsc) => encode_address(smsc, true, &mut buf)?,
        None => buf.put_u8(0x00),
    }
    let message_start = buf.len();

    let encoding = effective_encoding(part)?;
    let validity = part.validity_relative.unwrap_or(0);

    let mut first_octet = 0x01u8;
    if validity > 0 {
        first_octet |= 0x10; // TP-VPF: relative
    }
    if part.delivery_report_request {
        first_octet |= 0x20; // TP-SRR
    }
    if part.is_multipart() {
        first_octet |= 0x40; // TP-UDHI
    }
    buf.put_u8(first_octet);
    buf.put_u8(0x00); // TP-MR; the modem assigns the real reference
    encode_address(&part.number, false, &mut buf)?;
    buf.put_u8(0x00); // TP-PID
    buf.put_u8(
        DataCodingScheme {
            encoding,
            class: part.class,
        }
        .to_byte()?,
    );
    if validity > 0 {
        buf.put_u8(relative_validity_to_octet(validity));
    }

    let udh = part.is_multipart().then(|| {
        UserDataHeader::for_concat(part.concat_reference, part.concat_max, part.concat_sequence)
    });
    write_user_data(&mut buf, part, encoding, udh)?;

    Ok(EncodedSubmit {
        bytes: buf.to_vec(),
        message_start,
    })
}

/// Resolve an unset encoding the way the splitter would: the narrowest
/// alphabet that holds the text losslessly, or 8-bit for raw payloads.
fn effective_encoding(part: &SmsPart) -> Result<SmsEncoding> {
    match part.encoding {
        SmsEncoding::Unknown => {
            if let Some(text) = &part.text {
                Ok(if gsm7::is_compatible(text) {
                    SmsEncoding::Gsm7
                } else {
                    SmsEncoding::Ucs2
                })
            } else if part.data.is_some() {
                Ok(SmsEncoding::EightBit)
            } else {
                Err(PduError::EncodingError(
                    "part carries neither text nor data".into(),
                ))
            }
        }
        encoding => Ok(encoding),
    }
}

fn write_user_data(
    buf: &mut BytesMut,
    part: &SmsPart,
    encoding: SmsEncoding,
    udh: Option<UserDataHeader>,
) -> Result<()> {
    match encoding {
        SmsEncoding::Gsm7 => {
            let text = part.text.as_deref().unwrap_or("");
            let septets = gsm7::encode_to_septets(text).ok_or_else(|| {
                PduError::EncodingError("text not representable in GSM 7-bit".into())
            })?;

            let (header_bytes, fill_bits) = match &udh {
                Some(header) => {
                    let mut hb = BytesMut::new();
                    header.encode(&mut hb)?;
                    let fill_bits = (7 - (hb.len() * 8) % 7) % 7;
                    (Some(hb), fill_bits)
                }
                None => (None, 0),
            };
            let header_septets = header_bytes
                .as_ref()
                .map_or(0, |hb| (hb.len() * 8 + fill_bits) / 7);

            let udl = header_septets + septets.len();
            if udl > MAX_GSM7_SEPTETS {
                return Err(PduError::EncodingError(format!(
                    "{udl} septets exceed the {MAX_GSM7_SEPTETS}-septet PDU ceiling"
                )));
            }
            buf.put_u8(udl as u8);
            if let Some(hb) = header_bytes {
                buf.put_slice(&hb);
            }
            buf.put_slice(&gsm7::pack_septets(&septets, fill_bits));
        }

        SmsEncoding::Ucs2 | SmsEncoding::EightBit => {
            let payload = match encoding {
                SmsEncoding::Ucs2 => ucs2::encode(part.text.as_deref().unwrap_or("")),
                _ => part.data.clone().ok_or_else(|| {
                    PduError::EncodingError("8-bit part carries no data payload".into())
                })?,
            };
            let header_len = udh.as_ref().map_or(0, UserDataHeader::encoded_len);
            let udl = header_len + payload.len();
            if udl > MAX_PAYLOAD_BYTES {
                return Err(PduError::EncodingError(format!(
                    "{udl} payload bytes exceed the {MAX_PAYLOAD_BYTES}-byte PDU ceiling"
                )));
            }
            buf.put_u8(udl as u8);
            if let Some(header) = &udh {
                header.encode(buf)?;
            }
            buf.put_slice(&payload);
        }

        SmsEncoding::Unknown => {
            return Err(PduError::EncodingError(
                "part encoding was not resolved".into(),
            ));
        }
    }
    Ok(())
}
