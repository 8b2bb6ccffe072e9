//! The TP-DCS (Data Coding Scheme) octet.
//!
//! One byte that crams together the text alphabet, an optional message
//! class, and a compression flag, with several overlapping bit layouts
//! depending on the top bits. Real-world senders routinely put reserved or
//! plain nonsensical values in here, so interpreting a DCS never fails:
//! anything unrecognized falls back to the uncompressed GSM 7-bit default.

use num_traits::FromPrimitive;

/// Which alphabet the user data is in.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, FromPrimitive)]
pub enum MessageEncoding {
    /// GSM packed 7-bit encoding.
    Gsm7Bit = 0b00,
    /// Binary 8-bit data.
    EightBit = 0b01,
    /// UCS-2 (i.e. big-endian UTF-16, minus the astral planes).
    Ucs2 = 0b10
}

/// Class of message (class 0 "flash" up to class 3).
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, FromPrimitive)]
pub enum MessageClass {
    /// Class 0: display immediately, don't store.
    Silent = 0b00,
    /// Class 1: store to the ME.
    StoreToMe = 0b01,
    /// Class 2: store to the SIM.
    StoreToSim = 0b10,
    /// Class 3: store to the TE.
    StoreToTe = 0b11
}

/// A decoded TP-DCS octet.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DataCodingScheme {
    pub encoding: MessageEncoding,
    pub class: Option<MessageClass>,
    pub compressed: bool
}

impl Default for DataCodingScheme {
    fn default() -> Self {
        DataCodingScheme {
            encoding: MessageEncoding::Gsm7Bit,
            class: None,
            compressed: false
        }
    }
}

fn encoding_from_bits(bits: u8) -> MessageEncoding {
    // 0b11 is reserved; decode it as the default alphabet
    MessageEncoding::from_u8(bits).unwrap_or(MessageEncoding::Gsm7Bit)
}

impl From<u8> for DataCodingScheme {
    fn from(b: u8) -> Self {
        if (b & 0b1100_0000) == 0b0000_0000 {
            // general data coding group
            let compressed = (b & 0b0010_0000) > 0;
            let class = if (b & 0b0001_0000) > 0 {
                MessageClass::from_u8(b & 0b0000_0011)
            }
            else {
                None
            };
            let encoding = encoding_from_bits((b & 0b0000_1100) >> 2);
            DataCodingScheme { encoding, class, compressed }
        }
        else if (b & 0b1111_0000) == 0b1111_0000 {
            // data coding/message class group: class always present,
            // alphabet from bit 2 only
            let class = MessageClass::from_u8(b & 0b0000_0011);
            let encoding = if (b & 0b0000_0100) > 0 {
                MessageEncoding::EightBit
            }
            else {
                MessageEncoding::Gsm7Bit
            };
            DataCodingScheme { encoding, class, compressed: false }
        }
        else if (b & 0b1100_0000) == 0b0100_0000 {
            // reserved coding groups
            DataCodingScheme::default()
        }
        else {
            // message-waiting groups and the rest: the alphabet bits are
            // still where the general group keeps them
            DataCodingScheme {
                encoding: encoding_from_bits((b & 0b0000_1100) >> 2),
                class: None,
                compressed: false
            }
        }
    }
}
