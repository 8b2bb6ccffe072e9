//! Decoding whole GSM 03.40 Protocol Data Units (PDUs).
//!
//! See [this Wikipedia article](https://en.wikipedia.org/wiki/GSM_03.40)
//! for general information on the format.
//!
//! A PDU is a flat byte run where almost every field's position depends on
//! the value of an earlier one, so decoding is a strict left-to-right walk:
//! SMSC field, first octet, then the SMS-DELIVER or SMS-SUBMIT field
//! layout depending on the message type bits, and finally the user data,
//! which goes through whichever text decoder the DCS picked. Out of the
//! six message types the standard defines, the two you'll actually see on
//! a modem (SMS-DELIVER and SMS-SUBMIT) are supported; the others are
//! refused outright.

use std::convert::TryFrom;
use num_traits::FromPrimitive;
use crate::address::PduAddress;
use crate::bcd;
use crate::dcs::{DataCodingScheme, MessageEncoding};
use crate::errors::*;
use crate::gsm_encoding;
use crate::gsm_encoding::udh::UserDataHeader;
use crate::hex::HexData;
use crate::reader::ByteReader;
use crate::ucs2;

/// Which kind of message a PDU turned out to be.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MessageType {
    /// SMS-DELIVER: a message coming from the service centre to us.
    Deliver,
    /// SMS-SUBMIT: a message we (or someone) handed to the service centre.
    Submit
}

/// Validity and format of the TP-VP field (SMS-SUBMIT only).
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, FromPrimitive)]
pub enum VpFieldValidity {
    /// No validity period present.
    Invalid = 0b00,
    /// Present, in enhanced format.
    Enhanced = 0b01,
    /// Present, in relative format.
    Relative = 0b10,
    /// Present, in absolute format.
    Absolute = 0b11
}

/// The first octet of an SMS-DELIVER PDU, minus the message type bits.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DeliverFirstOctet {
    /// More messages waiting at the service centre.
    pub mms: bool,
    /// Loop prevention.
    pub lp: bool,
    /// A status report will be returned to the sender.
    pub sri: bool,
    /// Does the user data start with a header?
    pub udhi: bool,
    /// Reply path.
    pub rp: bool
}
impl From<u8> for DeliverFirstOctet {
    fn from(b: u8) -> Self {
        DeliverFirstOctet {
            mms: (b & 0b0000_0100) > 0,
            lp: (b & 0b0000_1000) > 0,
            sri: (b & 0b0010_0000) > 0,
            udhi: (b & 0b0100_0000) > 0,
            rp: (b & 0b1000_0000) > 0
        }
    }
}

/// The first octet of an SMS-SUBMIT PDU, minus the message type bits.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SubmitFirstOctet {
    /// Reject duplicates.
    pub rd: bool,
    /// Validity and format of the TP-VP field.
    pub vpf: VpFieldValidity,
    /// A status report was requested.
    pub srr: bool,
    /// Does the user data start with a header?
    pub udhi: bool,
    /// Reply path.
    pub rp: bool
}
impl From<u8> for SubmitFirstOctet {
    fn from(b: u8) -> Self {
        let vpf = VpFieldValidity::from_u8((b & 0b0001_1000) >> 3)
            .expect("VpFieldValidity covers all 2-bit values");
        SubmitFirstOctet {
            rd: (b & 0b0000_0100) > 0,
            vpf,
            srr: (b & 0b0010_0000) > 0,
            udhi: (b & 0b0100_0000) > 0,
            rp: (b & 0b1000_0000) > 0
        }
    }
}

/// Service centre timestamp: seven semi-octet pairs, one per field.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SmscTimestamp {
    pub year: u8,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    /// Offset from GMT in quarter-hours, sign included.
    pub timezone_quarter_hours: i8
}
impl SmscTimestamp {
    pub fn decode(rd: &mut ByteReader) -> DecodeResult<Self> {
        let start = rd.offset();
        let b = rd.read_bytes(7)?;
        Ok(SmscTimestamp {
            year: bcd::decode_swapped_byte(b[0], start)?,
            month: bcd::decode_swapped_byte(b[1], start + 1)?,
            day: bcd::decode_swapped_byte(b[2], start + 2)?,
            hour: bcd::decode_swapped_byte(b[3], start + 3)?,
            minute: bcd::decode_swapped_byte(b[4], start + 4)?,
            second: bcd::decode_swapped_byte(b[5], start + 5)?,
            timezone_quarter_hours: decode_timezone(b[6], start + 6)?
        })
    }
}

// The timezone semi-octet hides a sign in bit 3 of the tens digit.
fn decode_timezone(b: u8, offset: usize) -> DecodeResult<i8> {
    let negative = (b & 0b0000_1000) > 0;
    let tens = b & 0b0000_0111;
    let units = b >> 4;
    if units > 9 {
        return Err(DecodeError::InvalidDigit { nibble: units, offset });
    }
    let quarters = (tens * 10 + units) as i8;
    Ok(if negative { -quarters } else { quarters })
}

/// The TP-VP field of an SMS-SUBMIT PDU.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ValidityPeriod {
    /// Relative format: one coded byte, see [`ValidityPeriod::minutes`].
    Relative(u8),
    /// Absolute format: expires at this timestamp.
    Absolute(SmscTimestamp),
    /// Enhanced format, stored raw: nobody has produced one of these in
    /// the wild to test against yet.
    Enhanced([u8; 7])
}
impl ValidityPeriod {
    /// The validity period in minutes, for the relative format.
    pub fn minutes(&self) -> Option<u32> {
        match *self {
            ValidityPeriod::Relative(vp) => {
                let vp = vp as u32;
                Some(if vp <= 143 {
                    vp * 5
                }
                else if vp <= 167 {
                    (12 + (vp - 143) / 2) * 60
                }
                else if vp <= 196 {
                    (vp - 166) * 24 * 60
                }
                else {
                    (vp - 192) * 7 * 24 * 60
                })
            },
            _ => None
        }
    }
}

/// A fully decoded SMS PDU. This is what you get back, and it borrows
/// nothing: plain data, safe to keep around after the input buffer is gone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedMessage {
    pub message_type: MessageType,
    /// Service centre address, if the PDU carried one.
    pub smsc: Option<PduAddress>,
    /// The sender (SMS-DELIVER) or recipient (SMS-SUBMIT).
    pub address: PduAddress,
    /// TP-MR (SMS-SUBMIT only).
    pub message_reference: Option<u8>,
    /// TP-PID, passed through undecoded.
    pub protocol_identifier: u8,
    pub dcs: DataCodingScheme,
    /// Service centre timestamp (SMS-DELIVER only).
    pub timestamp: Option<SmscTimestamp>,
    /// Validity period (SMS-SUBMIT only, and only if the first octet says
    /// one is present).
    pub validity: Option<ValidityPeriod>,
    pub user_data_header: Option<UserDataHeader>,
    /// The decoded message text. Empty for 8-bit binary payloads; see
    /// `user_data` for those.
    pub text: String,
    /// The raw user data payload (after the header, if any).
    pub user_data: Vec<u8>,
    /// Set iff UCS-2 truncation recovery kicked in, in which case `text`
    /// ends with `…`.
    pub warning: Option<String>
}

impl DecodedMessage {
    /// Decode a PDU from its hex representation, as read off a modem's AT
    /// interface. Input case doesn't matter.
    pub fn from_hex(data: &str) -> DecodeResult<Self> {
        let bytes = HexData::decode(data.trim())?;
        Self::try_from(&bytes as &[u8])
    }
}

impl<'a> TryFrom<&'a [u8]> for DecodedMessage {
    type Error = DecodeError;
    fn try_from(b: &[u8]) -> DecodeResult<Self> {
        let mut rd = ByteReader::new(b);
        let smsc = PduAddress::decode_smsc(&mut rd)?;
        let first_octet = rd.read_u8()?;
        match first_octet & 0b0000_0011 {
            0b00 => decode_deliver(&mut rd, smsc, DeliverFirstOctet::from(first_octet)),
            0b01 => decode_submit(&mut rd, smsc, SubmitFirstOctet::from(first_octet)),
            mti => Err(DecodeError::UnsupportedMessageType { mti })
        }
    }
}

fn decode_deliver(rd: &mut ByteReader, smsc: Option<PduAddress>, fo: DeliverFirstOctet) -> DecodeResult<DecodedMessage> {
    debug!("decoding SMS-DELIVER, first octet {:?}", fo);
    let address = PduAddress::decode(rd)?;
    let protocol_identifier = rd.read_u8()?;
    let dcs = DataCodingScheme::from(rd.read_u8()?);
    let timestamp = SmscTimestamp::decode(rd)?;
    let ud = decode_user_data(rd, fo.udhi, &dcs)?;
    Ok(DecodedMessage {
        message_type: MessageType::Deliver,
        smsc,
        address,
        message_reference: None,
        protocol_identifier,
        dcs,
        timestamp: Some(timestamp),
        validity: None,
        user_data_header: ud.header,
        text: ud.text,
        user_data: ud.raw,
        warning: ud.warning
    })
}

fn decode_submit(rd: &mut ByteReader, smsc: Option<PduAddress>, fo: SubmitFirstOctet) -> DecodeResult<DecodedMessage> {
    debug!("decoding SMS-SUBMIT, first octet {:?}", fo);
    let message_reference = rd.read_u8()?;
    let address = PduAddress::decode(rd)?;
    let protocol_identifier = rd.read_u8()?;
    let dcs = DataCodingScheme::from(rd.read_u8()?);
    let validity = match fo.vpf {
        VpFieldValidity::Invalid => None,
        VpFieldValidity::Relative => Some(ValidityPeriod::Relative(rd.read_u8()?)),
        VpFieldValidity::Absolute => Some(ValidityPeriod::Absolute(SmscTimestamp::decode(rd)?)),
        VpFieldValidity::Enhanced => {
            let mut raw = [0; 7];
            raw.copy_from_slice(rd.read_bytes(7)?);
            Some(ValidityPeriod::Enhanced(raw))
        }
    };
    let ud = decode_user_data(rd, fo.udhi, &dcs)?;
    Ok(DecodedMessage {
        message_type: MessageType::Submit,
        smsc,
        address,
        message_reference: Some(message_reference),
        protocol_identifier,
        dcs,
        timestamp: None,
        validity,
        user_data_header: ud.header,
        text: ud.text,
        user_data: ud.raw,
        warning: ud.warning
    })
}

struct UserData {
    header: Option<UserDataHeader>,
    text: String,
    raw: Vec<u8>,
    warning: Option<String>
}

fn decode_user_data(rd: &mut ByteReader, udhi: bool, dcs: &DataCodingScheme) -> DecodeResult<UserData> {
    let udl = rd.read_u8()? as usize;
    let (header, udh_octets) = if udhi {
        let udhl = rd.read_u8()? as usize;
        let bytes = rd.read_bytes(udhl)?;
        (Some(UserDataHeader::decode(bytes)?), udhl + 1)
    }
    else {
        (None, 0)
    };
    match dcs.encoding {
        MessageEncoding::Gsm7Bit => {
            // the UDL counts septets here, header included, and the header
            // occupies whole septets with filler bits up to the next
            // septet boundary
            let udh_septets = (udh_octets * 8 + 6) / 7;
            let pad_bits = (7 - (udh_octets * 8) % 7) % 7;
            let septets = udl.saturating_sub(udh_septets);
            let total_octets = (udl * 7 + 7) / 8;
            let payload = rd.take_up_to(total_octets.saturating_sub(udh_octets));
            let text = gsm_encoding::decode_gsm7(payload, septets, pad_bits)?;
            Ok(UserData { header, text, raw: payload.to_vec(), warning: None })
        },
        MessageEncoding::EightBit => {
            let payload = rd.read_bytes(udl.saturating_sub(udh_octets))?;
            Ok(UserData { header, text: String::new(), raw: payload.to_vec(), warning: None })
        },
        MessageEncoding::Ucs2 => {
            let expected = udl.saturating_sub(udh_octets);
            let payload = rd.take_up_to(expected);
            let decoded = ucs2::decode_ucs2(payload, expected)?;
            Ok(UserData { header, text: decoded.text, raw: payload.to_vec(), warning: decoded.warning })
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::address::TypeOfNumber;
    use crate::gsm_encoding::{pack_septets, try_encode_str};

    #[test]
    fn deliver_gsm7() {
        let msg = DecodedMessage::from_hex(
            "00040B915155214365F70000127011518394230731D98C56B3DD00").unwrap();
        assert_eq!(msg.message_type, MessageType::Deliver);
        assert_eq!(msg.smsc, None);
        assert_eq!(msg.address.value, "15551234567");
        assert_eq!(msg.address.type_addr.type_of_number, TypeOfNumber::International);
        assert_eq!(msg.dcs.encoding, MessageEncoding::Gsm7Bit);
        assert_eq!(msg.text, "1234567");
        assert_eq!(msg.message_reference, None);
        assert_eq!(msg.validity, None);
        assert_eq!(msg.warning, None);
        let scts = msg.timestamp.unwrap();
        assert_eq!((scts.year, scts.month, scts.day), (21, 7, 11));
        assert_eq!((scts.hour, scts.minute, scts.second), (15, 38, 49));
        assert_eq!(scts.timezone_quarter_hours, 32);
    }
    #[test]
    fn submit_without_validity_period() {
        let msg = DecodedMessage::from_hex(
            "00012A0B915155214365F700000AE8329BFD4697D9EC37").unwrap();
        assert_eq!(msg.message_type, MessageType::Submit);
        assert_eq!(msg.message_reference, Some(0x2A));
        assert_eq!(msg.address.value, "15551234567");
        assert_eq!(msg.text, "hellohello");
        assert_eq!(msg.validity, None);
        assert_eq!(msg.timestamp, None);
    }
    #[test]
    fn submit_with_relative_validity_period() {
        let msg = DecodedMessage::from_hex(
            "0011000B915155214365F70000AA0AE8329BFD4697D9EC37").unwrap();
        assert_eq!(msg.message_type, MessageType::Submit);
        assert_eq!(msg.validity, Some(ValidityPeriod::Relative(0xAA)));
        assert_eq!(msg.validity.unwrap().minutes(), Some(4 * 24 * 60));
        assert_eq!(msg.text, "hellohello");
    }
    #[test]
    fn relative_validity_table() {
        assert_eq!(ValidityPeriod::Relative(11).minutes(), Some(55));
        assert_eq!(ValidityPeriod::Relative(143).minutes(), Some(715));
        assert_eq!(ValidityPeriod::Relative(167).minutes(), Some(24 * 60));
        assert_eq!(ValidityPeriod::Relative(196).minutes(), Some(30 * 24 * 60));
        assert_eq!(ValidityPeriod::Relative(255).minutes(), Some(63 * 7 * 24 * 60));
        assert_eq!(ValidityPeriod::Enhanced([0; 7]).minutes(), None);
    }
    #[test]
    fn truncated_ucs2_deliver_recovers() {
        // a real PDU whose user data stops 51 octets early, mid-character
        let msg = DecodedMessage::from_hex(
            "0891683110304105F1240D91683167414052F70008127011518394234459\
             7D70E6597D70E651CF80A551CF80A55C").unwrap();
        assert_eq!(msg.message_type, MessageType::Deliver);
        assert_eq!(msg.smsc.as_ref().unwrap().value, "8613010314501");
        assert_eq!(msg.address.value, "8613671404257");
        assert_eq!(msg.dcs.encoding, MessageEncoding::Ucs2);
        assert_eq!(msg.text, "好烦好烦减肥减肥…");
        assert!(msg.warning.is_some());
        assert_eq!(msg.timestamp.unwrap().timezone_quarter_hours, 32);
    }
    #[test]
    fn hex_case_does_not_matter() {
        let pdu = "0891683110304105F1240D91683167414052F700081270115183942344597D70E6";
        assert_eq!(DecodedMessage::from_hex(&pdu.to_lowercase()).unwrap(),
                   DecodedMessage::from_hex(&pdu.to_uppercase()).unwrap());
    }
    #[test]
    fn user_data_header_shares_the_septet_stream() {
        let mut pdu = HexData::decode("00440B915155214365F7000012701151839423").unwrap();
        pdu.push(12); // 7 septets of header, 5 of text
        pdu.extend(&[0x05, 0x00, 0x03, 0xAB, 0x02, 0x01]);
        pdu.extend(pack_septets(&try_encode_str("hello").unwrap(), 1));
        let msg = DecodedMessage::try_from(&pdu as &[u8]).unwrap();
        assert_eq!(msg.text, "hello");
        let udh = msg.user_data_header.unwrap();
        let concat = udh.get_concatenated_sms_data().unwrap();
        assert_eq!((concat.reference, concat.parts, concat.sequence), (0xAB, 2, 1));
    }
    #[test]
    fn eight_bit_payload_is_raw() {
        let msg = DecodedMessage::from_hex(
            "00040B915155214365F700041270115183942303C0FFEE").unwrap();
        assert_eq!(msg.dcs.encoding, MessageEncoding::EightBit);
        assert_eq!(msg.text, "");
        assert_eq!(msg.user_data, vec![0xC0, 0xFF, 0xEE]);
    }
    #[test]
    fn unsupported_message_types_are_refused() {
        assert_eq!(DecodedMessage::from_hex("0002"),
                   Err(DecodeError::UnsupportedMessageType { mti: 0b10 }));
        assert_eq!(DecodedMessage::from_hex("0003"),
                   Err(DecodeError::UnsupportedMessageType { mti: 0b11 }));
    }
    #[test]
    fn overlong_address_fails_cleanly() {
        assert_eq!(DecodedMessage::from_hex("0004FF915155214365F7"),
                   Err(DecodeError::InvalidAddressLength { needed: 128, available: 6 }));
    }
    #[test]
    fn truncated_gsm7_is_fatal() {
        let res = DecodedMessage::from_hex(
            "00040B915155214365F70000127011518394230731D9");
        assert_eq!(res, Err(DecodeError::TruncatedAlphabetData {
            septets: 7,
            bits_available: 16
        }));
    }
    #[test]
    fn empty_ucs2_user_data_is_fatal() {
        assert_eq!(DecodedMessage::from_hex("00040B915155214365F700081270115183942304"),
                   Err(DecodeError::EmptyUserData));
    }
    #[test]
    fn invalid_timestamp_nibble_is_fatal() {
        assert_eq!(DecodedMessage::from_hex(
                       "00040B915155214365F700001A7011518394230731D98C56B3DD00"),
                   Err(DecodeError::InvalidDigit { nibble: 0xA, offset: 12 }));
    }
    #[test]
    fn negative_timezone() {
        let msg = DecodedMessage::from_hex(
            "00040B915155214365F70000127011518394880731D98C56B3DD00").unwrap();
        assert_eq!(msg.timestamp.unwrap().timezone_quarter_hours, -8);
    }
    #[test]
    fn missing_user_data_length_is_end_of_data() {
        assert_eq!(DecodedMessage::from_hex("00040B915155214365F7000012701151839423"),
                   Err(DecodeError::UnexpectedEndOfData { offset: 19, wanted: 1, available: 0 }));
    }
}
