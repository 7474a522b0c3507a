// ABOUTME: The logical SMS message record - one PDU's worth of information
// ABOUTME: Produced whole by the parser or built up by a caller for the creator

use std::fmt;

/// Which of the three supported PDU shapes a part carries. The shape decides
/// which optional fields are meaningful and how the header octet is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PduType {
    Deliver,
    Submit,
    StatusReport,
}

/// Alphabet of the user data payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SmsEncoding {
    #[default]
    Unknown,
    Gsm7,
    Ucs2,
    EightBit,
}

/// Raw TP-Status octet from a STATUS-REPORT, with the standard band
/// predicates. Values are carried through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryState(pub u8);

impl DeliveryState {
    /// Transaction completed; no further report will arrive.
    pub fn is_completed(self) -> bool {
        self.0 <= 0x1f
    }

    /// Temporary error, service centre still trying.
    pub fn is_temporary_error(self) -> bool {
        (0x20..=0x3f).contains(&self.0)
    }

    /// Permanent or gave-up temporary error; delivery will not happen.
    pub fn is_permanent_error(self) -> bool {
        (0x40..=0x7f).contains(&self.0)
    }
}

impl fmt::Display for DeliveryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let band = if self.is_completed() {
            "completed"
        } else if self.is_temporary_error() {
            "temporary-error"
        } else if self.is_permanent_error() {
            "permanent-error"
        } else {
            "reserved"
        };
        write!(f, "{band} (0x{:02x})", self.0)
    }
}

/// One SMS part: the decoded form of a single PDU, independent of direction.
///
/// A part is either produced whole by [`crate::parser::parse_pdu`] and read
/// from there on, or filled in by the caller and handed to
/// [`crate::creator::create_submit_pdu`]. Exactly one of `text`/`data` is
/// populated once user data exists, and the concatenation fields are
/// all-or-nothing: zero means the part is not one of a concatenated set.
#[derive(Debug, Clone, PartialEq)]
pub struct SmsPart {
    /// Storage-slot index supplied by the transport layer, carried through
    /// unchanged.
    pub index: u32,
    pub pdu_type: PduType,
    pub smsc: Option<String>,
    /// Sender (DELIVER) or destination (SUBMIT/STATUS-REPORT) address in
    /// human-readable form; a leading `+` marks the international type.
    pub number: String,
    /// Service-centre timestamp, ISO-8601 with offset. DELIVER and
    /// STATUS-REPORT only.
    pub timestamp: Option<String>,
    /// When the message was delivered or failed. STATUS-REPORT only.
    pub discharge_timestamp: Option<String>,
    /// Relative validity period in minutes. SUBMIT only.
    pub validity_relative: Option<u32>,
    /// Message class 0-3, or -1 when the data coding scheme carries none.
    pub class: i32,
    pub encoding: SmsEncoding,
    pub text: Option<String>,
    pub data: Option<Vec<u8>>,
    pub delivery_report_request: bool,
    pub concat_reference: u16,
    pub concat_max: u8,
    pub concat_sequence: u8,
    pub message_reference: u8,
    /// TP-Status from a STATUS-REPORT.
    pub delivery_state: Option<DeliveryState>,
    /// TP-PID octet, not interpreted beyond pass-through.
    pub protocol_id: u8,
}

impl SmsPart {
    pub fn new(index: u32, pdu_type: PduType) -> Self {
        Self {
            index,
            pdu_type,
            smsc: None,
            number: String::new(),
            timestamp: None,
            discharge_timestamp: None,
            validity_relative: None,
            class: -1,
            encoding: SmsEncoding::Unknown,
            text: None,
            data: None,
            delivery_report_request: false,
            concat_reference: 0,
            concat_max: 0,
            concat_sequence: 0,
            message_reference: 0,
            delivery_state: None,
            protocol_id: 0,
        }
    }

    /// Attach decoded text, clearing any raw payload.
    pub fn set_text(&mut self, text: impl Into<String>, encoding: SmsEncoding) {
        self.text = Some(text.into());
        self.data = None;
        self.encoding = encoding;
    }

    /// Attach a raw 8-bit payload, clearing any decoded text.
    pub fn set_data(&mut self, data: Vec<u8>) {
        self.data = Some(data);
        self.text = None;
        self.encoding = SmsEncoding::EightBit;
    }

    /// Record concatenation metadata for one part of a multipart set.
    pub fn set_concat(&mut self, reference: u16, max: u8, sequence: u8) {
        self.concat_reference = reference;
        self.concat_max = max;
        self.concat_sequence = sequence;
    }

    /// Whether this part belongs to a concatenated set (assembly itself is
    /// the caller's job; only the metadata lives here).
    pub fn is_multipart(&self) -> bool {
        self.concat_max > 0
    }
}
