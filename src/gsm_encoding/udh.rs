//! User Data Headers: the optional structured prefix inside the user data,
//! flagged by TP-UDHI.
//!
//! A UDH is a list of information elements (id, length, data). The one
//! you'll actually meet in the wild is the concatenation element, which is
//! how long messages get split across PDUs. This crate decodes one PDU at a
//! time and does *not* stitch parts back together; it just hands you the
//! part numbers via [`UserDataHeader::get_concatenated_sms_data`].

use crate::errors::*;
use crate::reader::ByteReader;

/// One information element of a User Data Header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UdhComponent {
    /// Information element identifier.
    pub id: u8,
    /// Information element data.
    pub data: Vec<u8>
}

/// A decoded User Data Header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDataHeader {
    pub components: Vec<UdhComponent>
}

/// Concatenation info from a UDH, if the message is part of a series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcatenatedSmsData {
    /// Identifies which multi-part message this PDU belongs to.
    pub reference: u16,
    /// How many parts the full message has.
    pub parts: u8,
    /// Which part this one is (1-based).
    pub sequence: u8
}

impl UserDataHeader {
    /// Decode a UDH from its payload bytes (everything *after* the UDHL
    /// octet, which the dispatcher has already consumed).
    pub fn decode(b: &[u8]) -> DecodeResult<Self> {
        let mut rd = ByteReader::new(b);
        let mut components = vec![];
        while rd.remaining() > 0 {
            let id = rd.read_u8()?;
            let len = rd.read_u8()?;
            let data = rd.read_bytes(len as usize)?.to_vec();
            components.push(UdhComponent { id, data });
        }
        Ok(UserDataHeader { components })
    }
    /// If a concatenation element is present, return its contents.
    ///
    /// Element 0x00 carries an 8-bit message reference, element 0x08 a
    /// 16-bit one; both say "part m of n".
    pub fn get_concatenated_sms_data(&self) -> Option<ConcatenatedSmsData> {
        for comp in self.components.iter() {
            if comp.id == 0x00 && comp.data.len() == 3 {
                return Some(ConcatenatedSmsData {
                    reference: comp.data[0] as u16,
                    parts: comp.data[1],
                    sequence: comp.data[2]
                });
            }
            if comp.id == 0x08 && comp.data.len() == 4 {
                let reference = ((comp.data[0] as u16) << 8) | (comp.data[1] as u16);
                return Some(ConcatenatedSmsData {
                    reference,
                    parts: comp.data[2],
                    sequence: comp.data[3]
                });
            }
        }
        None
    }
}
