//! Bidirectional codec for 3GPP TS 23.040 short-message PDUs.
//!
//! The read path decodes the raw octet stream a modem hands over (as a hex
//! string) into one logical [`SmsPart`]; the write path encodes a part back
//! into the exact octets a modem must transmit. The companion splitter picks
//! the narrowest sufficient alphabet for arbitrary text and partitions it
//! into bodies that respect the per-PDU ceilings.
//!
//! Everything here is a pure, synchronous transformation: no I/O, no state,
//! no retries. The modem command layer, multipart reassembly and storage all
//! live with the callers.
//!
//! # Reading a PDU
//!
//! ```
//! use sms_pdu::{parse_pdu, PduType};
//!
//! let hexpdu = "0001000b915155551532f4000005ce3af95c06";
//! let part = parse_pdu(0, hexpdu)?;
//! assert_eq!(part.pdu_type, PduType::Submit);
//! assert_eq!(part.number, "+15555551234");
//! assert_eq!(part.text.as_deref(), Some("Nudge"));
//! # Ok::<(), sms_pdu::PduError>(())
//! ```
//!
//! # Building a PDU
//!
//! ```
//! use sms_pdu::{create_submit_pdu, split_text, PduType, SmsPart};
//!
//! let (chunks, encoding) = split_text("Nudge");
//! let mut part = SmsPart::new(0, PduType::Submit);
//! part.number = "+15555551234".to_string();
//! part.set_text(chunks.into_iter().next().unwrap(), encoding);
//!
//! let encoded = create_submit_pdu(&part)?;
//! assert_eq!(encoded.message_start, 1);
//! # Ok::<(), sms_pdu::PduError>(())
//! ```

pub mod codec;
pub mod creator;
pub mod datatypes;
pub mod parser;
pub mod splitter;


pub use codec::{PduError, Result, bytes_to_hex, hex_to_bytes};
pub use creator::{EncodedSubmit, create_submit_pdu};
pub use datatypes::{DeliveryState, PduType, SmsEncoding, SmsPart};
pub use parser::{parse_pdu, parse_pdu_bytes};
pub use splitter::split_text;
