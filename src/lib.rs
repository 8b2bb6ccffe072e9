//! The `sms-pdu-decoder` library decodes raw GSM 03.40 SMS PDUs - the hex
//! blobs a USB 3G/HSDPA/UMTS modem hands you over its AT interface - into
//! structured message records: sender, timestamp, encoding, and the actual
//! text.
//!
//! The quickest way in is [`DecodedMessage::from_hex`]:
//!
//! ```
//! use sms_pdu_decoder::DecodedMessage;
//!
//! let msg = DecodedMessage::from_hex(
//!     "00040B915155214365F70000127011518394230731D98C56B3DD00").unwrap();
//! assert_eq!(format!("{}", msg.address), "+15551234567");
//! assert_eq!(msg.text, "1234567");
//! ```
//!
//! Decoding is pure and synchronous: one borrowed input buffer in, one
//! owned [`DecodedMessage`] out, no state kept anywhere, so you can call it
//! from as many threads as you like. Malformed input comes back as a single
//! [`DecodeError`](errors::DecodeError); the one transport mangling that
//! *can* be papered over (a UCS-2 message cut short) comes back as a
//! successful decode with a `warning` attached instead.

#[macro_use] extern crate log;
#[macro_use] extern crate failure_derive;
#[macro_use] extern crate num_derive;

pub mod errors;
pub mod reader;
pub mod bcd;
pub mod hex;
pub mod gsm_encoding;
pub mod ucs2;
pub mod dcs;
pub mod address;
pub mod pdu;

pub use crate::errors::{DecodeError, DecodeResult};
pub use crate::pdu::DecodedMessage;
