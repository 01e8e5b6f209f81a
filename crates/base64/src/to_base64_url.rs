//! URL-safe base64 encoding function.

#[cfg(not(feature = "accelerated"))]
use crate::constants::{ALPHABET_BYTES, TABLE2};

/// Encodes a byte slice to a URL-safe base64 string.
///
/// This uses the URL-safe alphabet (`-` and `_` instead of `+` and `/`)
/// and never adds padding: a trailing 1-byte chunk becomes 2 symbols and a
/// trailing 2-byte chunk becomes 3 symbols, with the unused low bits zeroed.
///
/// # Example
///
/// ```
/// use remote_arg_base64::to_base64_url;
///
/// assert_eq!(to_base64_url(b"hello world"), "aGVsbG8gd29ybGQ");
/// ```
#[cfg(not(feature = "accelerated"))]
pub fn to_base64_url(uint8: &[u8]) -> String {
    let length = uint8.len();
    let mut out = String::with_capacity((length * 4).div_ceil(3));

    let extra_length = length % 3;
    let base_length = length - extra_length;

    let mut i = 0;
    while i < base_length {
        let o1 = uint8[i];
        let o2 = uint8[i + 1];
        let o3 = uint8[i + 2];
        let v1 = ((o1 as usize) << 4) | ((o2 as usize) >> 4);
        let v2 = (((o2 & 0b1111) as usize) << 8) | (o3 as usize);

        out.push(TABLE2[v1][0] as char);
        out.push(TABLE2[v1][1] as char);
        out.push(TABLE2[v2][0] as char);
        out.push(TABLE2[v2][1] as char);
        i += 3;
    }

    if extra_length == 1 {
        let v1 = (uint8[base_length] as usize) << 4;
        out.push(TABLE2[v1][0] as char);
        out.push(TABLE2[v1][1] as char);
    } else if extra_length == 2 {
        let o1 = uint8[base_length];
        let o2 = uint8[base_length + 1];
        let v1 = ((o1 as usize) << 4) | ((o2 as usize) >> 4);
        let v2 = ((o2 & 0b1111) as usize) << 2;

        out.push(TABLE2[v1][0] as char);
        out.push(TABLE2[v1][1] as char);
        out.push(ALPHABET_BYTES[v2] as char);
    }

    out
}

/// Encodes a byte slice to a URL-safe base64 string.
///
/// Built with the `accelerated` feature: delegates to the `base64` crate's
/// unpadded URL-safe engine. Output is identical to the portable encoder.
///
/// # Example
///
/// ```
/// use remote_arg_base64::to_base64_url;
///
/// assert_eq!(to_base64_url(b"hello world"), "aGVsbG8gd29ybGQ");
/// ```
#[cfg(feature = "accelerated")]
pub fn to_base64_url(uint8: &[u8]) -> String {
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine as _;

    URL_SAFE_NO_PAD.encode(uint8)
}
