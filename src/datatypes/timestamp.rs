//! Service-centre timestamp codec: 7 swapped-BCD octets with a quarter-hour
//! timezone, exposed as ISO-8601 with an explicit numeric offset.

use crate::codec::{Decodable, Encodable, PduError, Result, read_bytes};
use bytes::{BufMut, BytesMut};
use std::fmt;
use std::io::Cursor;

/// A decoded TP-SCTS / TP-DT field. Two-digit years are taken as 2000+.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScTimestamp {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    /// Offset from UTC in minutes, already signed.
    pub offset_minutes: i32,
}

fn swapped_bcd(b: u8) -> u8 {
    (b & 0x0f) * 10 + (b >> 4)
}

fn to_swapped_bcd(v: u8) -> u8 {
    (v % 10) << 4 | (v / 10)
}

impl Decodable for ScTimestamp {
    fn decode(buf: &mut Cursor<&[u8]>) -> Result<Self> {
        let b = read_bytes(buf, 7, "timestamp")?;
        // Bit 3 of the timezone's first semi-octet is the sign; the rest is
        // the offset magnitude in quarter hours.
        let quarters = i32::from((b[6] & 0x07) * 10 + (b[6] >> 4));
        let sign = if b[6] & 0x08 != 0 { -1 } else { 1 };
        Ok(ScTimestamp {
            year: 2000 + u16::from(swapped_bcd(b[0])),
            month: swapped_bcd(b[1]),
            day: swapped_bcd(b[2]),
            hour: swapped_bcd(b[3]),
            minute: swapped_bcd(b[4]),
            second: swapped_bcd(b[5]),
            offset_minutes: sign * quarters * 15,
        })
    }
}

impl Encodable for ScTimestamp {
    fn encode(&self, buf: &mut BytesMut) -> Result<()> {
        let quarters = (self.offset_minutes.unsigned_abs() / 15) as u8;
        let mut tz = (quarters % 10) << 4 | (quarters / 10);
        if self.offset_minutes < 0 {
            tz |= 0x08;
        }
        buf.put_u8(to_swapped_bcd((self.year % 100) as u8));
        buf.put_u8(to_swapped_bcd(self.month));
        buf.put_u8(to_swapped_bcd(self.day));
        buf.put_u8(to_swapped_bcd(self.hour));
        buf.put_u8(to_swapped_bcd(self.minute));
        buf.put_u8(to_swapped_bcd(self.second));
        buf.put_u8(tz);
        Ok(())
    }
}

impl ScTimestamp {
    /// Parse an ISO-8601 string of the exact shape this codec emits
    /// (`2011-02-28T11:50:50-05:00`); `Z` is accepted for a zero offset.
    pub fn from_iso8601(s: &str) -> Result<Self> {
        let fail = || PduError::EncodingError(format!("timestamp {s:?} is not ISO-8601"));
        let bytes = s.as_bytes();
        if bytes.len() < 20
            || bytes[4] != b'-'
            || bytes[7] != b'-'
            || bytes[10] != b'T'
            || bytes[13] != b':'
            || bytes[16] != b':'
        {
            return Err(fail());
        }
        let num =
            |range: std::ops::Range<usize>| s[range].parse::<u16>().map_err(|_| fail());

        let offset_minutes = match bytes[19] {
            b'Z' => 0,
            sign @ (b'+' | b'-') => {
                if bytes.len() != 25 || bytes[22] != b':' {
                    return Err(fail());
                }
                let magnitude = i32::from(num(20..22)?) * 60 + i32::from(num(23..25)?);
                if sign == b'-' { -magnitude } else { magnitude }
            }
            _ => return Err(fail()),
        };

        Ok(ScTimestamp {
            year: num(0..4)?,
            month: num(5..7)? as u8,
            day: num(8..10)? as u8,
            hour: num(11..13)? as u8,
            minute: num(14..16)? as u8,
            second: num(17..19)? as u8,
            offset_minutes,
        })
    }
}

impl fmt::Display for ScTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.offset_minutes < 0 { '-' } else { '+' };
        let offset = self.offset_minutes.unsigned_abs();
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}{}{:02}:{:02}",
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
            sign,
            offset / 60,
            offset % 60
        )
    }
}
