//! Text splitter: pick the narrowest lossless alphabet and partition text
//! into chunks that respect the per-PDU ceilings.
//!
//! Lengths are measured in alphabet-native units: septets for GSM7 (escaped
//! extension characters cost two) and 16-bit units for UCS-2 (surrogate
//! pairs cost two). A character never straddles a chunk boundary.

use crate::datatypes::SmsEncoding;
use crate::datatypes::gsm7;
use crate::datatypes::ucs2;

/// Septets that fit a single-part 7-bit message.
pub const GSM7_SINGLE_LIMIT: usize = 160;
/// Septets per part once a concatenation header claims its seven.
pub const GSM7_MULTIPART_LIMIT: usize = 153;
/// 16-bit units that fit a single-part UCS-2 message (140 bytes).
pub const UCS2_SINGLE_LIMIT: usize = 70;
/// 16-bit units per part once a concatenation header claims six bytes.
pub const UCS2_MULTIPART_LIMIT: usize = 67;

/// Choose an alphabet for `text` and cut it into sendable chunks, in order.
///
/// GSM7 is preferred whenever it is lossless; anything else goes UCS-2.
/// Joining the returned chunks reproduces the input exactly.
pub fn split_text(text: &str) -> (Vec<String>, SmsEncoding) {
    if let Some(total) = gsm7::septet_len(text) {
        let chunks = if total <= GSM7_SINGLE_LIMIT {
            vec![text.to_owned()]
        } else {
            chunk_by(text, GSM7_MULTIPART_LIMIT, |c| {
                gsm7::char_cost(c).unwrap_or(2)
            })
        };
        return (chunks, SmsEncoding::Gsm7);
    }

    let chunks = if ucs2::unit_len(text) <= UCS2_SINGLE_LIMIT {
        vec![text.to_owned()]
    } else {
        chunk_by(text, UCS2_MULTIPART_LIMIT, ucs2::char_cost)
    };
    (chunks, SmsEncoding::Ucs2)
}

fn chunk_by(text: &str, limit: usize, cost: impl Fn(char) -> usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut used = 0;
    for c in text.chars() {
        let n = cost(c);
        // Escape pairs and surrogate pairs are priced as whole characters,
        // so a split can never land inside one; the character that would
        // cross the ceiling opens the next chunk instead.
        if used + n > limit {
            chunks.push(std::mem::take(&mut current));
            used = 0;
        }
        current.push(c);
        used += n;
    }
    chunks.push(current);
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits(n: usize) -> String {
        "0123456789".chars().cycle().take(n).collect()
    }

    #[test]
    fn test_short_text_single_gsm7_chunk() {
        let (chunks, encoding) = split_text("Hello");
        assert_eq!(chunks, vec!["Hello"]);
        assert_eq!(encoding, SmsEncoding::Gsm7);
    }

    #[test]
    fn test_short_text_single_ucs2_chunk() {
        let (chunks, encoding) = split_text("你好");
        assert_eq!(chunks, vec!["你好"]);
        assert_eq!(encoding, SmsEncoding::Ucs2);
    }

    #[test]
    fn test_gsm7_boundary_one_part() {
        let (chunks, encoding) = split_text(&digits(160));
        assert_eq!(chunks.len(), 1);
        assert_eq!(encoding, SmsEncoding::Gsm7);
    }

    #[test]
    fn test_gsm7_boundary_two_parts() {
        let text = digits(161);
        let (chunks, encoding) = split_text(&text);
        assert_eq!(encoding, SmsEncoding::Gsm7);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0], digits(153));
        assert_eq!(chunks[1], &text[153..]);
    }

    #[test]
    fn test_ucs2_boundary_one_part() {
        let text: String = std::iter::repeat('好').take(70).collect();
        let (chunks, encoding) = split_text(&text);
        assert_eq!(encoding, SmsEncoding::Ucs2);
        assert_eq!(chunks.len(), 1);
    }

    #[test]
    fn test_ucs2_boundary_two_parts() {
        let text: String = std::iter::repeat('好').take(71).collect();
        let (chunks, encoding) = split_text(&text);
        assert_eq!(encoding, SmsEncoding::Ucs2);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].chars().count(), 67);
        assert_eq!(chunks[1].chars().count(), 4);
    }

    #[test]
    fn test_chunks_rejoin_to_original() {
        let text = format!("{}€[{}]{}", digits(100), digits(100), digits(100));
        let (chunks, _) = split_text(&text);
        assert!(chunks.len() > 1);
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn test_escape_pair_never_straddles_boundary() {
        // 152 plain septets, then a two-septet '[' that would end on 154.
        let text = format!("{}[tail that fills the rest of the message body", digits(152));
        let (chunks, encoding) = split_text(&text);
        assert_eq!(encoding, SmsEncoding::Gsm7);
        assert_eq!(chunks[0], digits(152));
        assert!(chunks[1].starts_with('['));
    }

    #[test]
    fn test_surrogate_pair_never_straddles_boundary() {
        // 66 BMP units then an astral character costing two units.
        let text: String = std::iter::repeat('好')
            .take(66)
            .chain(['😉', 'a'])
            .chain(std::iter::repeat('好').take(10))
            .collect();
        let (chunks, encoding) = split_text(&text);
        assert_eq!(encoding, SmsEncoding::Ucs2);
        assert_eq!(chunks[0].chars().count(), 66);
        assert!(chunks[1].starts_with('😉'));
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn test_astral_text_uses_ucs2_units() {
        // 35 four-byte characters are 70 units: exactly one part.
        let text: String = std::iter::repeat('𑰀').take(35).collect();
        let (chunks, encoding) = split_text(&text);
        assert_eq!(encoding, SmsEncoding::Ucs2);
        assert_eq!(chunks.len(), 1);

        // One more unit forces a split: 33 characters fit under 67 units.
        let longer = format!("{text}a");
        let (chunks, _) = split_text(&longer);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].chars().count(), 33);
        assert_eq!(chunks[1], format!("{}a", "𑰀".repeat(2)));
    }

    #[test]
    fn test_extension_chars_count_double_for_the_limit() {
        // 80 extension characters are 160 septets: still one part.
        let braces = "{}".repeat(40);
        let (chunks, encoding) = split_text(&braces);
        assert_eq!(encoding, SmsEncoding::Gsm7);
        assert_eq!(chunks.len(), 1);

        // 81 are 162 septets: two parts, the first at 152 septets (76 chars).
        let braces = format!("{}{{", "{}".repeat(40));
        let (chunks, _) = split_text(&braces);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].chars().count(), 76);
    }
}
