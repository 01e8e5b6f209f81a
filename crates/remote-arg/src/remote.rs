//! Remote function arguments as opaque strings.
//!
//! An argument is stringified with the structured serializer and then
//! base64url-encoded, so the result is valid both as a URL segment and as a
//! file name (prerendered responses are stored under it). The empty string
//! is reserved for "no argument".

use remote_arg_base64::{from_base64_url, to_base64_url};
use remote_arg_devalue::Value;

use crate::{parse, stringify, RemoteArgError, Transport};

/// Stringifies the argument (if any) of a remote function call.
///
/// [`Value::Undefined`] yields `""`. Anything else yields a non-empty string
/// over `A-Z a-z 0-9 - _`.
///
/// # Errors
///
/// Serializer errors, such as a custom value with no matching transport
/// entry, are returned as [`RemoteArgError::Devalue`].
///
/// # Example
///
/// ```
/// use remote_arg::{stringify_remote_arg, Transport, Value};
///
/// let transport = Transport::new();
/// assert_eq!(stringify_remote_arg(&Value::Undefined, &transport).unwrap(), "");
/// assert_eq!(stringify_remote_arg(&Value::from(1), &transport).unwrap(), "WzFd");
/// ```
pub fn stringify_remote_arg(arg: &Value, transport: &Transport) -> Result<String, RemoteArgError> {
    if arg.is_undefined() {
        return Ok(String::new());
    }

    let json_string = stringify(arg, transport)?;
    let encoded = to_base64_url(json_string.as_bytes());
    tracing::trace!(
        json_len = json_string.len(),
        encoded_len = encoded.len(),
        "stringified remote argument"
    );
    Ok(encoded)
}

/// Parses the argument (if any) of a remote function call.
///
/// `""` yields [`Value::Undefined`].
///
/// # Errors
///
/// A string that is not canonical base64url, does not decode to UTF-8, or is
/// not valid serializer output is rejected. Callers typically answer such a
/// request with a client error.
pub fn parse_remote_args(stringified_arg: &str, transport: &Transport) -> Result<Value, RemoteArgError> {
    if stringified_arg.is_empty() {
        return Ok(Value::Undefined);
    }

    let result = decode_arg(stringified_arg, transport);
    match &result {
        Ok(_) => tracing::trace!(encoded_len = stringified_arg.len(), "parsed remote argument"),
        Err(e) => tracing::debug!(
            encoded_len = stringified_arg.len(),
            error = %e,
            "rejected remote argument"
        ),
    }
    result
}

fn decode_arg(stringified_arg: &str, transport: &Transport) -> Result<Value, RemoteArgError> {
    let bytes = from_base64_url(stringified_arg)?;
    let json_string = String::from_utf8(bytes)?;
    Ok(parse(&json_string, transport)?)
}
