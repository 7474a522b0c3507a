mod address;
mod dcs;
pub mod gsm7;
mod part;
mod timestamp;
pub mod ucs2;
mod udh;
mod validity;

pub use address::{
    MAX_ADDRESS_DIGITS, TypeOfNumber, decode_address, decode_address_bytes, decode_smsc_address,
    encode_address,
};
pub use dcs::DataCodingScheme;
pub use part::{DeliveryState, PduType, SmsEncoding, SmsPart};
pub use timestamp::ScTimestamp;
pub use udh::{ConcatInfo, InformationElement, UserDataHeader};
pub use validity::{octet_to_relative_validity, relative_validity_to_octet};
