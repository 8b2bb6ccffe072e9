//! Error types for PDU decoding.
//!
//! Everything here is fatal: if you get one of these back, the PDU was not
//! decodable, and you get nothing. The one *recoverable* condition (a UCS-2
//! message cut short in transit) deliberately isn't in this list; it comes
//! back as a `warning` on an otherwise successful `DecodedMessage`.

/// The ways decoding a PDU can fail.
#[derive(Fail, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The PDU ended before a required field could be read.
    #[fail(display = "unexpected end of data at offset {}: wanted {} byte(s), {} available", offset, wanted, available)]
    UnexpectedEndOfData {
        /// Offset the read started at.
        offset: usize,
        /// How many bytes the field needed.
        wanted: usize,
        /// How many bytes were actually left.
        available: usize
    },
    /// A semi-octet nibble was not a decimal digit.
    #[fail(display = "invalid BCD nibble {:#x} at offset {}", nibble, offset)]
    InvalidDigit {
        nibble: u8,
        offset: usize
    },
    /// The fill nibble of an odd-length semi-octet run was not `0xF`.
    #[fail(display = "invalid padding nibble {:#x} at offset {} (expected 0xF fill)", nibble, offset)]
    InvalidPadding {
        nibble: u8,
        offset: usize
    },
    /// An address declared more payload bytes than the PDU has left.
    #[fail(display = "address needs {} byte(s), but only {} available", needed, available)]
    InvalidAddressLength {
        needed: usize,
        available: usize
    },
    /// Not enough bits for the declared GSM 7-bit septet count.
    ///
    /// Unlike UCS-2, a septet stream cut mid-character can't be recovered
    /// unambiguously, so this one is fatal.
    #[fail(display = "truncated GSM 7-bit data: {} septet(s) declared, {} bit(s) available", septets, bits_available)]
    TruncatedAlphabetData {
        septets: usize,
        bits_available: usize
    },
    /// Zero-length user data where text was expected.
    #[fail(display = "empty user data")]
    EmptyUserData,
    /// TP-MTI selected a message type this crate doesn't decode
    /// (SMS-COMMAND/SMS-STATUS-REPORT, or the reserved value).
    #[fail(display = "unsupported message type indicator {:#04b}", mti)]
    UnsupportedMessageType {
        mti: u8
    },
    /// The input hex string wasn't valid hex, or had odd length.
    #[fail(display = "invalid hex string")]
    InvalidHex
}

pub type DecodeResult<T> = Result<T, DecodeError>;
