//! Property tests for the codec laws.

use proptest::prelude::*;
use remote_arg_base64::{from_base64_url, to_base64_url, Base64Error};

proptest! {
    #[test]
    fn round_trips(blob in proptest::collection::vec(any::<u8>(), 0..256)) {
        let encoded = to_base64_url(&blob);
        prop_assert_eq!(from_base64_url(&encoded).unwrap(), blob);
    }

    #[test]
    fn output_matches_safe_class(blob in proptest::collection::vec(any::<u8>(), 0..256)) {
        let encoded = to_base64_url(&blob);
        prop_assert_eq!(encoded.len(), (blob.len() * 4).div_ceil(3));
        prop_assert!(encoded
            .bytes()
            .all(|c| c.is_ascii_alphanumeric() || c == b'-' || c == b'_'));
    }

    #[test]
    fn decode_never_panics(input in "[A-Za-z0-9_=+/! -]{0,64}") {
        match from_base64_url(&input) {
            Ok(bytes) => prop_assert_eq!(to_base64_url(&bytes), input.trim_end_matches('=')),
            Err(Base64Error::InvalidCharacter(at)) | Err(Base64Error::InvalidPadding(at)) => {
                prop_assert!(at < input.len());
            }
        }
    }
}
