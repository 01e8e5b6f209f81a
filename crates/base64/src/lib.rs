//! Strict URL-safe base64 codec.
//!
//! This crate provides the unpadded URL-safe base64 variant used for remote
//! function arguments:
//! - Encoding never emits padding
//! - Decoding accepts optional trailing `=` padding but rejects anything a
//!   canonical encoder could not have produced
//!
//! The output alphabet (`A-Z a-z 0-9 - _`) is safe both as a URL path segment
//! and as a file name.
//!
//! # Example
//!
//! ```
//! use remote_arg_base64::{from_base64_url, to_base64_url};
//!
//! let data = b"hello world";
//! let encoded = to_base64_url(data);
//! let decoded = from_base64_url(&encoded).unwrap();
//! assert_eq!(decoded.as_slice(), data);
//! ```

mod constants;
mod from_base64_url;
mod to_base64_url;

pub use constants::{ALPHABET, ALPHABET_BYTES, PAD};
pub use from_base64_url::from_base64_url;
pub use to_base64_url::to_base64_url;

pub use from_base64_url::from_base64_url as decode;
pub use to_base64_url::to_base64_url as encode;

/// Error type for base64 decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Base64Error {
    /// The input contains a character that is neither in the alphabet nor `=`.
    /// Carries the byte offset of the character.
    InvalidCharacter(usize),
    /// Padding is not trailing, a window is too short, or trailing bits are
    /// not zero. Carries the byte offset of the offending 4-character window.
    InvalidPadding(usize),
}

impl std::fmt::Display for Base64Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Base64Error::InvalidCharacter(at) => write!(f, "Invalid character at {at}"),
            Base64Error::InvalidPadding(at) => write!(f, "Invalid padding at {at}"),
        }
    }
}

impl std::error::Error for Base64Error {}
