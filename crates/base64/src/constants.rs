/// URL-safe base64 alphabet (uses - and _ instead of + and /).
pub const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// URL-safe base64 alphabet as a byte array (used for byte-level operations and const evaluation).
pub const ALPHABET_BYTES: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Padding character. Never emitted, tolerated at the end of the final window on decode.
pub const PAD: u8 = b'=';

/// Reverse lookup: byte -> sextet, or `-1` for bytes outside the alphabet.
pub(crate) static DECODE_TABLE: [i8; 256] = {
    let mut table = [-1i8; 256];
    let mut i = 0;
    while i < 64 {
        table[ALPHABET_BYTES[i] as usize] = i as i8;
        i += 1;
    }
    table
};

/// Pre-computed two-character lookup table for encoding.
/// Entry `i * 64 + j` holds the symbols for sextets `i` and `j`.
#[cfg_attr(feature = "accelerated", allow(dead_code))]
pub(crate) static TABLE2: [[u8; 2]; 4096] = {
    let mut table = [[0u8; 2]; 4096];
    let mut i = 0;
    while i < 64 {
        let mut j = 0;
        while j < 64 {
            let idx = i * 64 + j;
            table[idx][0] = ALPHABET_BYTES[i];
            table[idx][1] = ALPHABET_BYTES[j];
            j += 1;
        }
        i += 1;
    }
    table
};
