//! [`Transport`] — caller-supplied registry of custom types.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use remote_arg_devalue::{DevalueError, Reducer, Reviver, Value};

/// Turns a value of the registered type into plain data; `None` for values of
/// any other type.
pub type EncodeFn = dyn Fn(&Value) -> Option<Value> + Send + Sync;

/// Rebuilds a value of the registered type from its plain data.
pub type DecodeFn = dyn Fn(Value) -> Result<Value, DevalueError> + Send + Sync;

/// One registered type.
#[derive(Clone)]
pub struct Transporter {
    pub encode: Arc<EncodeFn>,
    pub decode: Arc<DecodeFn>,
}

/// Insertion-ordered mapping from type name to its [`Transporter`].
///
/// Encoders are tried in insertion order. The registry is only ever read by
/// this crate; each call re-projects it into scoped encoder/decoder views.
///
/// # Example
///
/// ```
/// use remote_arg::{Transport, Value};
///
/// let transport = Transport::new().with(
///     "Upper",
///     |v| v.as_str().filter(|s| s.starts_with('!')).map(|s| Value::from(&s[1..])),
///     |v| Ok(Value::from(format!("!{}", v.as_str().unwrap_or_default()))),
/// );
/// assert_eq!(transport.len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct Transport {
    entries: IndexMap<String, Transporter>,
}

impl Transport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Transport::insert`].
    pub fn with<E, D>(mut self, name: impl Into<String>, encode: E, decode: D) -> Self
    where
        E: Fn(&Value) -> Option<Value> + Send + Sync + 'static,
        D: Fn(Value) -> Result<Value, DevalueError> + Send + Sync + 'static,
    {
        self.insert(name, encode, decode);
        self
    }

    /// Registers a type. Re-registering a name replaces the functions but
    /// keeps the original position.
    pub fn insert<E, D>(&mut self, name: impl Into<String>, encode: E, decode: D)
    where
        E: Fn(&Value) -> Option<Value> + Send + Sync + 'static,
        D: Fn(Value) -> Result<Value, DevalueError> + Send + Sync + 'static,
    {
        self.entries.insert(
            name.into(),
            Transporter {
                encode: Arc::new(encode),
                decode: Arc::new(decode),
            },
        );
    }

    pub fn get(&self, name: &str) -> Option<&Transporter> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Ordered `(name, encode)` view for [`remote_arg_devalue::stringify`].
    pub fn encoders(&self) -> Vec<(&str, &Reducer)> {
        self.entries
            .iter()
            .map(|(name, t)| (name.as_str(), &*t.encode as &Reducer))
            .collect()
    }

    /// `name -> decode` view for [`remote_arg_devalue::parse`].
    pub fn decoders(&self) -> HashMap<&str, &Reviver> {
        self.entries
            .iter()
            .map(|(name, t)| (name.as_str(), &*t.decode as &Reviver))
            .collect()
    }
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.keys()).finish()
    }
}
