// ABOUTME: TP-DCS (data coding scheme) octet codec covering the coding groups
// ABOUTME: Maps group bits to alphabet plus optional message class and back

use crate::datatypes::part::SmsEncoding;
use tracing::warn;

/// A decoded data-coding-scheme octet: which alphabet the payload uses and
/// the message class (-1 when the octet carries none).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataCodingScheme {
    pub encoding: SmsEncoding,
    pub class: i32,
}

impl DataCodingScheme {
    /// Decode the octet by coding group. The group nibble decides how the
    /// low bits are read; the "group F" layout multiplexes alphabet and
    /// class through different positions than the default group.
    pub fn from_byte(dcs: u8) -> Self {
        match dcs >> 4 {
            // General data coding (0x00-0x7F, the 0x40 range adds
            // auto-deletion which does not change the bit layout).
            0x0..=0x7 => {
                if dcs & 0x20 != 0 {
                    warn!(dcs, "compressed user data not supported");
                    return Self {
                        encoding: SmsEncoding::Unknown,
                        class: -1,
                    };
                }
                let encoding = match (dcs >> 2) & 0x03 {
                    0 => SmsEncoding::Gsm7,
                    1 => SmsEncoding::EightBit,
                    2 => SmsEncoding::Ucs2,
                    _ => {
                        warn!(dcs, "reserved alphabet bits in data coding scheme");
                        SmsEncoding::Unknown
                    }
                };
                // Bit 4 says whether the class bits carry meaning.
                let class = if dcs & 0x10 != 0 {
                    i32::from(dcs & 0x03)
                } else {
                    -1
                };
                Self { encoding, class }
            }

            // Message-waiting groups: discard (0xC) and store (0xD) carry
            // GSM7 text, store-UCS2 (0xE) carries UCS2.
            0xc | 0xd => Self {
                encoding: SmsEncoding::Gsm7,
                class: -1,
            },
            0xe => Self {
                encoding: SmsEncoding::Ucs2,
                class: -1,
            },

            // Group F: bit 2 selects the alphabet, class is always present.
            0xf => Self {
                encoding: if dcs & 0x04 != 0 {
                    SmsEncoding::EightBit
                } else {
                    SmsEncoding::Gsm7
                },
                class: i32::from(dcs & 0x03),
            },

            _ => {
                warn!(dcs, "reserved data coding group");
                Self {
                    encoding: SmsEncoding::Unknown,
                    class: -1,
                }
            }
        }
    }

    /// Encode for a SUBMIT: the default group, with the class-meaningful bit
    /// set only when a class was requested.
    pub fn to_byte(&self) -> crate::codec::Result<u8> {
        let mut dcs = match self.encoding {
            SmsEncoding::Gsm7 => 0x00,
            SmsEncoding::EightBit => 0x04,
            SmsEncoding::Ucs2 => 0x08,
            SmsEncoding::Unknown => {
                return Err(crate::codec::PduError::EncodingError(
                    "cannot emit a data coding scheme for an unknown encoding".into(),
                ));
            }
        };
        match self.class {
            -1 => {}
            0..=3 => dcs |= 0x10 | self.class as u8,
            other => {
                return Err(crate::codec::PduError::EncodingError(format!(
                    "message class {other} out of range"
                )));
            }
        }
        Ok(dcs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_group() {
        assert_eq!(
            DataCodingScheme::from_byte(0x00),
            DataCodingScheme {
                encoding: SmsEncoding::Gsm7,
                class: -1
            }
        );
        assert_eq!(
            DataCodingScheme::from_byte(0x04),
            DataCodingScheme {
                encoding: SmsEncoding::EightBit,
                class: -1
            }
        );
        assert_eq!(
            DataCodingScheme::from_byte(0x08),
            DataCodingScheme {
                encoding: SmsEncoding::Ucs2,
                class: -1
            }
        );
    }

    #[test]
    fn test_default_group_with_class() {
        let dcs = DataCodingScheme::from_byte(0x11);
        assert_eq!(dcs.encoding, SmsEncoding::Gsm7);
        assert_eq!(dcs.class, 1);
    }

    #[test]
    fn test_group_f_gsm7() {
        let dcs = DataCodingScheme::from_byte(0xf1);
        assert_eq!(dcs.encoding, SmsEncoding::Gsm7);
        assert_eq!(dcs.class, 1);
    }

    #[test]
    fn test_group_f_eight_bit() {
        let dcs = DataCodingScheme::from_byte(0xf4);
        assert_eq!(dcs.encoding, SmsEncoding::EightBit);
        assert_eq!(dcs.class, 0);
    }

    #[test]
    fn test_message_waiting_groups() {
        assert_eq!(DataCodingScheme::from_byte(0xc8).encoding, SmsEncoding::Gsm7);
        assert_eq!(DataCodingScheme::from_byte(0xd9).encoding, SmsEncoding::Gsm7);
        assert_eq!(DataCodingScheme::from_byte(0xe0).encoding, SmsEncoding::Ucs2);
    }

    #[test]
    fn test_reserved_group_is_unknown() {
        assert_eq!(
            DataCodingScheme::from_byte(0x80).encoding,
            SmsEncoding::Unknown
        );
    }

    #[test]
    fn test_compressed_is_unknown() {
        assert_eq!(
            DataCodingScheme::from_byte(0x21).encoding,
            SmsEncoding::Unknown
        );
    }

    #[test]
    fn test_encode_no_class() {
        let dcs = DataCodingScheme {
            encoding: SmsEncoding::Ucs2,
            class: -1,
        };
        assert_eq!(dcs.to_byte().unwrap(), 0x08);
    }

    #[test]
    fn test_encode_with_class() {
        let dcs = DataCodingScheme {
            encoding: SmsEncoding::Gsm7,
            class: 2,
        };
        let byte = dcs.to_byte().unwrap();
        assert_eq!(byte, 0x12);
        // What the creator writes, the parser reads back.
        assert_eq!(DataCodingScheme::from_byte(byte), dcs);
    }

    #[test]
    fn test_encode_unknown_fails() {
        let dcs = DataCodingScheme {
            encoding: SmsEncoding::Unknown,
            class: -1,
        };
        assert!(dcs.to_byte().is_err());
    }
}
