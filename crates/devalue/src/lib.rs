//! remote-arg-devalue - structured-value serializer
//!
//! Serializes a [`Value`] graph into a flat JSON array in which every
//! distinct value occupies one slot and refers to its children by index.
//! This keeps shared references shared, lets cycles round-trip, and
//! represents values plain JSON cannot: `undefined`, `NaN`, the infinities,
//! `-0`, bigints, dates, regexps, maps and sets.
//!
//! Caller types are handled through reducers (on the way out) and revivers
//! (on the way in), keyed by a type name.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use remote_arg_devalue::{parse, stringify, Value};
//!
//! let shared = Value::array([Value::from(1)]);
//! let value = Value::object([("a", shared.clone()), ("b", shared)]);
//!
//! let text = stringify(&value, &[]).unwrap();
//! assert_eq!(text, r#"[{"a":1,"b":1},[2],1]"#);
//!
//! let back = parse(&text, &HashMap::new()).unwrap();
//! assert!(back.get("a").unwrap().ptr_eq(&back.get("b").unwrap()));
//! ```

pub mod constants;
mod date;
mod error;
mod escape;
mod parse;
mod stringify;
mod value;

pub use error::DevalueError;
pub use escape::stringify_string;
pub use parse::{parse, unflatten, Reviver};
pub use stringify::{stringify, Reducer};
pub use value::{ArrayRef, CustomValue, MapRef, ObjectRef, SetRef, Value};
