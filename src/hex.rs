//! Hex in, hex out.
//!
//! A modem's AT interface hands you PDUs as hex strings, so the boundary of
//! this crate is exactly one hex conversion each way. Input case doesn't
//! matter; `from_str_radix` takes both.

use std::fmt;
use crate::errors::*;

/// Wrapper that `Display`s a byte slice as uppercase hex.
#[derive(Debug)]
pub struct HexData<'a>(pub &'a [u8]);
impl<'a> fmt::Display for HexData<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for b in self.0.iter() {
            write!(f, "{:02X}", b)?;
        }
        Ok(())
    }
}
impl<'a> HexData<'a> {
    /// Decode a hex string into bytes.
    pub fn decode(data: &str) -> DecodeResult<Vec<u8>> {
        if data.len() % 2 != 0 {
            return Err(DecodeError::InvalidHex);
        }
        data.as_bytes()
            .chunks(2)
            .map(::std::str::from_utf8)
            .map(|x| {
                match x {
                    Ok(x) => u8::from_str_radix(x, 16)
                        .map_err(|_| DecodeError::InvalidHex),
                    Err(_) => Err(DecodeError::InvalidHex)
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn round_trip() {
        let bytes = HexData::decode("07912299976758F2").unwrap();
        assert_eq!(format!("{}", HexData(&bytes)), "07912299976758F2");
    }
    #[test]
    fn case_insensitive() {
        assert_eq!(HexData::decode("c8f71d14").unwrap(),
                   HexData::decode("C8F71D14").unwrap());
    }
    #[test]
    fn rejects_junk() {
        assert_eq!(HexData::decode("0B9"), Err(DecodeError::InvalidHex));
        assert_eq!(HexData::decode("zz"), Err(DecodeError::InvalidHex));
    }
}
