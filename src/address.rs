//! Addresses: phone numbers, and the occasional alphanumeric sender ID.
//!
//! An address on the wire is a length, a type-of-address octet, and then a
//! run of semi-octet digits - unless the type-of-address says
//! "alphanumeric", in which case the same bytes are packed GSM 7-bit text
//! instead (banks and parcel couriers love this). To add to the fun, the
//! SMSC address at the front of a PDU counts its length in octets, while
//! every other address counts digits.

use std::fmt;
use num_traits::FromPrimitive;
use crate::bcd;
use crate::errors::*;
use crate::gsm_encoding;
use crate::reader::ByteReader;

/// Type of number - whether the address is international, national,
/// alphanumeric, etc.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, FromPrimitive)]
pub enum TypeOfNumber {
    /// Unknown number type ('let the network figure it out').
    Unknown = 0b0_000_0000,
    /// International (i.e. starting with +).
    International = 0b0_001_0000,
    /// National number - no prefix or suffix added.
    National = 0b0_010_0000,
    /// Network-specific number.
    Special = 0b0_011_0000,
    /// Subscriber number.
    Subscriber = 0b0_100_0000,
    /// Not a phone number at all: packed GSM 7-bit text naming the sender.
    Alphanumeric = 0b0_101_0000,
    /// Abbreviated (short) number.
    Short = 0b0_110_0000,
    /// Reserved for future use.
    Reserved = 0b0_111_0000
}

/// Numbering plan identification. Mostly vestigial; nearly everything real
/// is `IsdnTelephone`.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, FromPrimitive)]
pub enum NumberingPlanIdentification {
    NetworkDetermined = 0b0_000_0000,
    IsdnTelephone = 0b0_000_0001,
    Data = 0b0_000_0011,
    Telex = 0b0_000_0100,
    National = 0b0_000_1000,
    Private = 0b0_000_1001,
    Ermes = 0b0_000_1010
}

/// The type-of-address octet, split into its two halves.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AddressType {
    pub type_of_number: TypeOfNumber,
    pub numbering_plan_identification: NumberingPlanIdentification
}
impl From<u8> for AddressType {
    fn from(b: u8) -> Self {
        let ton = TypeOfNumber::from_u8(b & 0b0_111_0000)
            .expect("TypeOfNumber covers all 3-bit values");
        // senders put all sorts of junk in the NPI bits; don't fail over it
        let npi = NumberingPlanIdentification::from_u8(b & 0b0_000_1111)
            .unwrap_or(NumberingPlanIdentification::NetworkDetermined);
        AddressType {
            type_of_number: ton,
            numbering_plan_identification: npi
        }
    }
}

/// A decoded address: type, declared digit count, and the number (or
/// alphanumeric sender ID) as a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PduAddress {
    pub type_addr: AddressType,
    /// The digit count as declared on the wire, before the fill nibble (if
    /// any) is dropped. For alphanumeric addresses this is still a
    /// semi-octet count, not a character count.
    pub digits: u8,
    pub value: String
}

impl fmt::Display for PduAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let prefix = match self.type_addr.type_of_number {
            TypeOfNumber::International => "+",
            _ => ""
        };
        write!(f, "{}{}", prefix, self.value)
    }
}

impl PduAddress {
    /// Decode a sender/recipient address: digit-count octet, TOA octet,
    /// then `ceil(digits / 2)` payload octets.
    pub fn decode(rd: &mut ByteReader) -> DecodeResult<Self> {
        let digits = rd.read_u8()?;
        let type_addr = AddressType::from(rd.read_u8()?);
        let octets = (digits as usize + 1) / 2;
        if octets > rd.remaining() {
            return Err(DecodeError::InvalidAddressLength {
                needed: octets,
                available: rd.remaining()
            });
        }
        let start = rd.offset();
        let payload = rd.read_bytes(octets)?;
        let value = if type_addr.type_of_number == TypeOfNumber::Alphanumeric {
            // the "digit" count doubles as a bit-length proxy here: each
            // semi-octet is 4 bits, and 7 of those bits make a character
            let septets = digits as usize * 4 / 7;
            gsm_encoding::decode_gsm7(payload, septets, 0)?
        }
        else {
            bcd::decode_semi_octets(payload, digits as usize, start)?
        };
        Ok(PduAddress { type_addr, digits, value })
    }

    /// Decode the SMSC field at the front of a PDU. Its length octet counts
    /// the TOA octet plus payload octets (not digits), and zero means no
    /// SMSC address is present.
    pub fn decode_smsc(rd: &mut ByteReader) -> DecodeResult<Option<Self>> {
        let len = rd.read_u8()? as usize;
        if len == 0 {
            return Ok(None);
        }
        let type_addr = AddressType::from(rd.read_u8()?);
        let payload_octets = len - 1;
        if payload_octets > rd.remaining() {
            return Err(DecodeError::InvalidAddressLength {
                needed: payload_octets,
                available: rd.remaining()
            });
        }
        let start = rd.offset();
        let payload = rd.read_bytes(payload_octets)?;
        let (digits, value) = if type_addr.type_of_number == TypeOfNumber::Alphanumeric {
            let septets = payload_octets * 8 / 7;
            ((payload_octets * 2) as u8, gsm_encoding::decode_gsm7(payload, septets, 0)?)
        }
        else {
            let mut digits = payload_octets * 2;
            if digits > 0 && payload[payload_octets - 1] >> 4 == 0xF {
                digits -= 1;
            }
            (digits as u8, bcd::decode_semi_octets(payload, digits, start)?)
        };
        Ok(Some(PduAddress { type_addr, digits, value }))
    }
}
