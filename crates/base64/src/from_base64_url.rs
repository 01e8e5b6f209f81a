//! Strict URL-safe base64 decoding function.

use crate::constants::{DECODE_TABLE, PAD};
use crate::Base64Error;

/// Decodes a URL-safe base64 string to bytes.
///
/// The input is read in windows of 4 characters. Padding (`=`) is optional,
/// but when present it must trail its window, and only the final window may
/// be short. A short window must leave its unused low bits zeroed, so only
/// strings a canonical encoder could have produced are accepted.
///
/// # Errors
///
/// * [`Base64Error::InvalidCharacter`] for any character outside the
///   alphabet that is not `=`.
/// * [`Base64Error::InvalidPadding`] for padding followed by data, a window
///   carrying fewer than 12 bits, a short window that is not the last one, or
///   non-zero trailing bits.
///
/// # Example
///
/// ```
/// use remote_arg_base64::{from_base64_url, Base64Error};
///
/// assert_eq!(from_base64_url("aGVsbG8gd29ybGQ").unwrap(), b"hello world");
/// assert_eq!(from_base64_url("Zg==").unwrap(), b"f");
/// assert_eq!(from_base64_url("AB=D"), Err(Base64Error::InvalidPadding(0)));
/// ```
pub fn from_base64_url(encoded: &str) -> Result<Vec<u8>, Base64Error> {
    let bytes = encoded.as_bytes();
    let length = bytes.len();
    let mut buf = Vec::with_capacity(length.div_ceil(4) * 3);

    let mut i = 0;
    while i < length {
        let mut chunk: u32 = 0;
        let mut bits_read = 0;
        let mut ended = false;

        for j in 0..4 {
            let c = match bytes.get(i + j) {
                None | Some(&PAD) => {
                    ended = true;
                    continue;
                }
                Some(&c) => c,
            };
            if ended {
                return Err(Base64Error::InvalidPadding(i));
            }
            let sextet = DECODE_TABLE[c as usize];
            if sextet < 0 {
                return Err(Base64Error::InvalidCharacter(i + j));
            }
            chunk |= (sextet as u32) << ((3 - j) * 6);
            bits_read += 6;
        }

        if bits_read < 24 {
            let unused = match bits_read {
                12 => chunk & 0xffff,
                18 => chunk & 0xff,
                _ => return Err(Base64Error::InvalidPadding(i)),
            };
            if unused != 0 || i + 4 < length {
                return Err(Base64Error::InvalidPadding(i));
            }
        }

        for k in 0..bits_read / 8 {
            buf.push((chunk >> (16 - k * 8)) as u8);
        }
        i += 4;
    }

    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert_eq!(from_base64_url("").unwrap(), b"");
    }

    #[test]
    fn test_unpadded_tails() {
        assert_eq!(from_base64_url("Zg").unwrap(), b"f");
        assert_eq!(from_base64_url("Zm8").unwrap(), b"fo");
        assert_eq!(from_base64_url("Zm9vYmFy").unwrap(), b"foobar");
    }

    #[test]
    fn test_padded_tails() {
        assert_eq!(from_base64_url("Zg==").unwrap(), b"f");
        assert_eq!(from_base64_url("Zg=").unwrap(), b"f");
        assert_eq!(from_base64_url("Zm8=").unwrap(), b"fo");
    }

    #[test]
    fn test_error_offsets() {
        assert_eq!(
            from_base64_url("Zm9v Zm9v"),
            Err(Base64Error::InvalidCharacter(4))
        );
        assert_eq!(
            from_base64_url("Zm9vA=AA"),
            Err(Base64Error::InvalidPadding(4))
        );
    }

    #[test]
    fn test_lonely_symbol() {
        // 6 bits cannot hold a byte
        assert_eq!(from_base64_url("Zm9vZ"), Err(Base64Error::InvalidPadding(4)));
        assert_eq!(from_base64_url("===="), Err(Base64Error::InvalidPadding(0)));
    }

    #[test]
    fn test_padding_only_in_last_window() {
        assert_eq!(
            from_base64_url("Zg==Zm9v"),
            Err(Base64Error::InvalidPadding(0))
        );
    }

    #[test]
    fn test_non_canonical_trailing_bits() {
        // "Zh" carries 0b011001_100001: low 4 bits are 0001
        assert_eq!(from_base64_url("Zh"), Err(Base64Error::InvalidPadding(0)));
        // "Zm8" is canonical for "fo", "Zm-" sets the low 2 bits
        assert_eq!(from_base64_url("Zm-"), Err(Base64Error::InvalidPadding(0)));
    }

    #[test]
    fn test_non_ascii_input() {
        assert_eq!(from_base64_url("Zé"), Err(Base64Error::InvalidCharacter(1)));
    }
}
