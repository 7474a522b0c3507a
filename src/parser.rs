//! PDU parser: one raw octet stream in, one [`SmsPart`] out.
//!
//! The first octet after the SMSC block carries the discriminant bits; the
//! three known shapes (DELIVER, SUBMIT, STATUS-REPORT) are then parsed by
//! dedicated functions instead of branching field by field. Parsing is
//! all-or-nothing: every length-prefixed read is bounds-checked up front,
//! and no partial part is ever returned.

use crate::codec::{Decodable, PduError, Result, hex_to_bytes, read_bytes, read_u8};
use crate::datatypes::gsm7;
use crate::datatypes::ucs2;
use crate::datatypes::{
    DataCodingScheme, DeliveryState, PduType, ScTimestamp, SmsEncoding, SmsPart, UserDataHeader,
    decode_address, decode_smsc_address, octet_to_relative_validity,
};
use num_enum::TryFromPrimitive;
use std::io::Cursor;
use tracing::warn;

/// TP-UDHI: a user data header precedes the payload.
const UDHI_FLAG: u8 = 0x40;
/// TP-SRI on DELIVER / TP-SRR on SUBMIT: a status report was asked for.
const STATUS_REPORT_FLAG: u8 = 0x20;

/// TP-MTI discriminant in the two lowest header bits; the fourth pattern is
/// reserved and rejected outright.
#[derive(TryFromPrimitive, Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
enum MessageTypeIndicator {
    Deliver = 0,
    Submit = 1,
    StatusReport = 2,
}

/// TP-VPF on SUBMIT: which validity-period field follows, if any.
#[derive(TryFromPrimitive, Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
enum ValidityFormat {
    Absent = 0,
    Enhanced = 1,
    Relative = 2,
    Absolute = 3,
}

/// Parse a PDU from its transport-layer hex form. `index` is the storage
/// slot the transport read it from, threaded through unchanged.
pub fn parse_pdu(index: u32, hexpdu: &str) -> Result<SmsPart> {
    parse_pdu_bytes(index, &hex_to_bytes(hexpdu)?)
}

/// Parse a PDU from raw octets.
pub fn parse_pdu_bytes(index: u32, pdu: &[u8]) -> Result<SmsPart> {
    let mut buf = Cursor::new(pdu);
    let smsc = decode_smsc_address(&mut buf)?;
    let first_octet = read_u8(&mut buf, "message type octet")?;
    let mti = MessageTypeIndicator::try_from(first_octet & 0x03).map_err(|_| {
        PduError::MalformedPdu(format!(
            "reserved message type in header octet 0x{first_octet:02x}"
        ))
    })?;

    let mut part = match mti {
        MessageTypeIndicator::Deliver => parse_deliver(first_octet, &mut buf)?,
        MessageTypeIndicator::Submit => parse_submit(first_octet, &mut buf)?,
        MessageTypeIndicator::StatusReport => parse_status_report(first_octet, &mut buf)?,
    };
    part.index = index;
    part.smsc = smsc;
    Ok(part)
}

fn parse_deliver(first_octet: u8, buf: &mut Cursor<&[u8]>) -> Result<SmsPart> {
    let mut part = SmsPart::new(0, PduType::Deliver);
    // Bit 2 is TP-MMS (more messages waiting at the service centre); nothing
    // downstream consumes it, so it is read with the octet and dropped.
    part.delivery_report_request = first_octet & STATUS_REPORT_FLAG != 0;

    part.number = decode_address(buf)?;
    part.protocol_id = read_u8(buf, "protocol identifier")?;
    let dcs = DataCodingScheme::from_byte(read_u8(buf, "data coding scheme")?);
    part.class = dcs.class;
    part.timestamp = Some(ScTimestamp::decode(buf)?.to_string());

    read_user_data(&mut part, buf, first_octet & UDHI_FLAG != 0, dcs.encoding)?;
    Ok(part)
}

fn parse_submit(first_octet: u8, buf: &mut Cursor<&[u8]>) -> Result<SmsPart> {
    let mut part = SmsPart::new(0, PduType::Submit);
    part.delivery_report_request = first_octet & STATUS_REPORT_FLAG != 0;
    let vpf = ValidityFormat::try_from((first_octet >> 3) & 0x03)
        .expect("two-bit validity format is exhaustive");

    part.message_reference = read_u8(buf, "message reference")?;
    part.number = decode_address(buf)?;
    part.protocol_id = read_u8(buf, "protocol identifier")?;
    let dcs = DataCodingScheme::from_byte(read_u8(buf, "data coding scheme")?);
    part.class = dcs.class;

    match vpf {
        ValidityFormat::Absent => {}
        ValidityFormat::Relative => {
            let octet = read_u8(buf, "validity period")?;
            part.validity_relative = Some(octet_to_relative_validity(octet));
        }
        // Absolute and enhanced formats occupy seven octets; they are read
        // past but the validity field stays unset.
        ValidityFormat::Absolute | ValidityFormat::Enhanced => {
            read_bytes(buf, 7, "validity period")?;
        }
    }

    read_user_data(&mut part, buf, first_octet & UDHI_FLAG != 0, dcs.encoding)?;
    Ok(part)
}

fn parse_status_report(_first_octet: u8, buf: &mut Cursor<&[u8]>) -> Result<SmsPart> {
    let mut part = SmsPart::new(0, PduType::StatusReport);
    part.message_reference = read_u8(buf, "message reference")?;
    part.number = decode_address(buf)?;
    part.timestamp = Some(ScTimestamp::decode(buf)?.to_string());
    part.discharge_timestamp = Some(ScTimestamp::decode(buf)?.to_string());
    part.delivery_state = Some(DeliveryState(read_u8(buf, "delivery status")?));
    Ok(part)
}

/// Decode the user data block: length octet, optional header, then the
/// payload in whichever alphabet the DCS selected.
fn read_user_data(
    part: &mut SmsPart,
    buf: &mut Cursor<&[u8]>,
    has_header: bool,
    encoding: SmsEncoding,
) -> Result<()> {
    let udl = read_u8(buf, "user data length")? as usize;

    match encoding {
        SmsEncoding::Gsm7 => {
            // The length field counts septets; the byte count follows from
            // the 7:8 packing ratio.
            let bytes = read_bytes(buf, (udl * 7).div_ceil(8), "user data")?;
            let (skip_bytes, fill_bits, text_septets) = if has_header {
                let mut inner = Cursor::new(bytes.as_slice());
                let (udh, consumed) = UserDataHeader::decode(&mut inner)?;
                apply_concat(part, Some(&udh));
                // Padding realigns the first character to a septet boundary;
                // the header's septet equivalent comes off the declared count.
                let fill_bits = (7 - (consumed * 8) % 7) % 7;
                let header_septets = (consumed * 8 + fill_bits) / 7;
                let text_septets = udl.checked_sub(header_septets).ok_or_else(|| {
                    PduError::MalformedPdu(
                        "user data header longer than the declared user data".into(),
                    )
                })?;
                (consumed, fill_bits, text_septets)
            } else {
                (0, 0, udl)
            };
            let septets = gsm7::unpack_septets(&bytes[skip_bytes..], text_septets, fill_bits)?;
            part.set_text(gsm7::decode_septets(&septets), SmsEncoding::Gsm7);
        }

        SmsEncoding::Ucs2 => {
            let bytes = read_bytes(buf, udl, "user data")?;
            let payload = strip_header(part, &bytes, has_header)?;
            let text = ucs2::decode(payload)?;
            part.set_text(text, SmsEncoding::Ucs2);
        }

        SmsEncoding::EightBit | SmsEncoding::Unknown => {
            if encoding == SmsEncoding::Unknown {
                warn!("undecodable data coding scheme, keeping payload as 8-bit data");
            }
            let bytes = read_bytes(buf, udl, "user data")?;
            let payload = strip_header(part, &bytes, has_header)?;
            part.set_data(payload.to_vec());
        }
    }
    Ok(())
}

fn strip_header<'a>(part: &mut SmsPart, bytes: &'a [u8], has_header: bool) -> Result<&'a [u8]> {
    if !has_header {
        return Ok(bytes);
    }
    let mut inner = Cursor::new(bytes);
    let (udh, consumed) = UserDataHeader::decode(&mut inner)?;
    apply_concat(part, Some(&udh));
    Ok(&bytes[consumed..])
}

fn apply_concat(part: &mut SmsPart, udh: Option<&UserDataHeader>) {
    if let Some(info) = udh.and_then(|h| h.concat()) {
        part.set_concat(info.reference, info.max, info.sequence);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_message_type_rejected() {
        // First octet 0x03 is the reserved TP-MTI pattern.
        let err = parse_pdu_bytes(0, &[0x00, 0x03]).unwrap_err();
        assert!(matches!(err, PduError::MalformedPdu(_)));
    }

    #[test]
    fn test_empty_pdu_rejected() {
        assert!(matches!(
            parse_pdu_bytes(0, &[]),
            Err(PduError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_missing_header_octet() {
        assert!(matches!(
            parse_pdu_bytes(0, &[0x00]),
            Err(PduError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_index_is_threaded_through() {
        // Minimal DELIVER: no SMSC, 1-digit sender, GSM7, empty user data.
        let pdu = [
            0x00, 0x04, 0x01, 0x81, 0x5f, 0x00, 0x00, 0x11, 0x10, 0x10, 0x21, 0x43, 0x65, 0x00,
            0x00,
        ];
        let part = parse_pdu_bytes(42, &pdu).unwrap();
        assert_eq!(part.index, 42);
        assert_eq!(part.pdu_type, PduType::Deliver);
        assert_eq!(part.number, "5");
        assert_eq!(part.text.as_deref(), Some(""));
    }

    #[test]
    fn test_submit_relative_validity_decoded() {
        // SUBMIT with VPF=relative and validity octet 0x0b (one hour).
        let pdu = [
            0x00, 0x11, 0x00, 0x01, 0x81, 0x5f, 0x00, 0x00, 0x0b, 0x00,
        ];
        let part = parse_pdu_bytes(0, &pdu).unwrap();
        assert_eq!(part.pdu_type, PduType::Submit);
        assert_eq!(part.validity_relative, Some(60));
        assert!(part.timestamp.is_none());
    }

    #[test]
    fn test_submit_absolute_validity_skipped() {
        // VPF=absolute: seven timestamp octets read past, validity unset.
        let pdu = [
            0x00, 0x19, 0x00, 0x01, 0x81, 0x5f, 0x00, 0x00, 0x11, 0x10, 0x10, 0x21, 0x43, 0x65,
            0x00, 0x00,
        ];
        let part = parse_pdu_bytes(0, &pdu).unwrap();
        assert_eq!(part.validity_relative, None);
        assert_eq!(part.text.as_deref(), Some(""));
    }
}
