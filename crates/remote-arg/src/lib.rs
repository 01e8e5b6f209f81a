//! remote-arg - serialization of remote function arguments
//!
//! Remote function arguments travel inside URLs and name prerendered files,
//! so they have to be strings that are safe in both places. This crate:
//! - stringifies arbitrary [`Value`] graphs with the structured serializer,
//!   extended by a caller-supplied [`Transport`] of custom types
//! - wraps the result in strict, unpadded base64url
//! - builds `"<id>|<arg>"` cache keys from the result
//!
//! # Example
//!
//! ```
//! use remote_arg::{create_remote_cache_key, parse_remote_args, stringify_remote_arg, Transport, Value};
//!
//! let transport = Transport::new();
//! let arg = Value::object([("page", Value::from(2))]);
//!
//! let encoded = stringify_remote_arg(&arg, &transport).unwrap();
//! assert!(encoded.bytes().all(|c| c.is_ascii_alphanumeric() || c == b'-' || c == b'_'));
//! assert_eq!(parse_remote_args(&encoded, &transport).unwrap(), arg);
//!
//! let key = create_remote_cache_key("getPosts", &encoded);
//! assert!(key.starts_with("getPosts|"));
//! ```

mod cache_key;
pub mod cli;
mod error;
mod remote;
mod serialize;
mod transport;

pub use cache_key::{create_remote_cache_key, split_remote_cache_key};
pub use error::RemoteArgError;
pub use remote::{parse_remote_args, stringify_remote_arg};
pub use serialize::{parse, stringify};
pub use transport::{DecodeFn, EncodeFn, Transport, Transporter};

pub use remote_arg_devalue::{DevalueError, Value};
