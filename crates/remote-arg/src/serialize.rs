//! Structured serializer adapter: runs the devalue serializer with the
//! encoders or decoders of a [`Transport`].

use remote_arg_devalue::{DevalueError, Value};

use crate::Transport;

/// Stringifies `data` using the encoders registered in `transport`.
///
/// # Example
///
/// ```
/// use remote_arg::{stringify, Transport, Value};
///
/// let text = stringify(&Value::from("hi"), &Transport::new()).unwrap();
/// assert_eq!(text, r#"["hi"]"#);
/// ```
pub fn stringify(data: &Value, transport: &Transport) -> Result<String, DevalueError> {
    let encoders = transport.encoders();
    remote_arg_devalue::stringify(data, &encoders)
}

/// Parses text produced by [`stringify`] using the decoders registered in
/// `transport`.
pub fn parse(serialized: &str, transport: &Transport) -> Result<Value, DevalueError> {
    let decoders = transport.decoders();
    remote_arg_devalue::parse(serialized, &decoders)
}
