//! UCS-2 user data, with recovery for PDUs that arrive cut short.
//!
//! UCS-2 is a fixed-width big-endian 16-bit encoding, which makes a
//! transport-level truncation unambiguous: either the last code unit is
//! whole or it isn't. That's why a short UCS-2 payload is *recovered* here
//! (decode what's there, tack on an `…`, warn) while a short GSM 7-bit
//! payload is a hard error - there's no telling where a septet stream was
//! meant to end.
//!
//! Code points outside the basic plane would arrive as surrogate pairs;
//! those aren't a thing in real SMS traffic and a lone surrogate simply
//! decodes to the replacement character.

use encoding::{Encoding, DecoderTrap, EncoderTrap};
use encoding::all::UTF_16BE;
use crate::errors::*;

/// Outcome of decoding a UCS-2 payload: the text, plus a warning iff
/// truncation recovery fired (in which case the text ends in `…`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ucs2Text {
    pub text: String,
    pub warning: Option<String>
}

/// Decode a UCS-2 payload of `expected_octets` declared length.
///
/// `data` may be shorter than declared when the PDU itself was truncated;
/// that (or an odd byte count, which is the same thing mid-character) is
/// the recovered path.
pub fn decode_ucs2(data: &[u8], expected_octets: usize) -> DecodeResult<Ucs2Text> {
    if data.is_empty() {
        if expected_octets > 0 {
            return Err(DecodeError::EmptyUserData);
        }
        return Ok(Ucs2Text { text: String::new(), warning: None });
    }
    let truncated = data.len() < expected_octets || data.len() % 2 != 0;
    let whole = data.len() - data.len() % 2;
    let mut text = UTF_16BE.decode(&data[..whole], DecoderTrap::Replace).unwrap();
    let warning = if truncated {
        text.push('…');
        let warning = format!("truncated UCS-2 user data: expected {} octet(s), got {}",
                              expected_octets, data.len());
        warn!("{}", warning);
        Some(warning)
    }
    else {
        None
    };
    Ok(Ucs2Text { text, warning })
}

/// Encode a string as UCS-2, for round-trip validation.
pub fn encode_ucs2(input: &str) -> Vec<u8> {
    UTF_16BE.encode(input, EncoderTrap::Replace).unwrap()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::hex::HexData;
    #[test]
    fn known_vector() {
        let bytes = HexData::decode("004C006F00720065006D00200049007000730075006D").unwrap();
        let decoded = decode_ucs2(&bytes, bytes.len()).unwrap();
        assert_eq!(decoded.text, "Lorem Ipsum");
        assert_eq!(decoded.warning, None);
    }
    #[test]
    fn round_trip() {
        for s in &["Je pompe donc je suis.", "好烦好烦", "数字 and ascii"] {
            let bytes = encode_ucs2(s);
            let decoded = decode_ucs2(&bytes, bytes.len()).unwrap();
            assert_eq!(&decoded.text, s);
            assert!(decoded.warning.is_none());
        }
    }
    #[test]
    fn orphaned_half_pair_recovers() {
        let bytes = HexData::decode("597D70E65C").unwrap();
        let decoded = decode_ucs2(&bytes, 5).unwrap();
        assert_eq!(decoded.text, "好烦…");
        assert!(decoded.warning.is_some());
    }
    #[test]
    fn short_but_even_payload_recovers() {
        let bytes = HexData::decode("597D70E6").unwrap();
        let decoded = decode_ucs2(&bytes, 8).unwrap();
        assert_eq!(decoded.text, "好烦…");
        assert!(decoded.warning.is_some());
    }
    #[test]
    fn empty_when_text_expected() {
        assert_eq!(decode_ucs2(&[], 4), Err(DecodeError::EmptyUserData));
        assert_eq!(decode_ucs2(&[], 0).unwrap(),
                   Ucs2Text { text: String::new(), warning: None });
    }
}
