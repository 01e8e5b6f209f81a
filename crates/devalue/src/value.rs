//! [`Value`] — the in-memory value graph handled by [`crate::stringify`] and
//! [`crate::parse`].
//!
//! Containers are reference counted so a graph can share nodes and form
//! cycles. Sharing survives a round trip: two slots pointing at the same
//! `Rc` before stringify point at the same `Rc` after parse.

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use crate::date::format_date;

pub type ArrayRef = Rc<RefCell<Vec<Value>>>;
pub type ObjectRef = Rc<RefCell<IndexMap<String, Value>>>;
pub type MapRef = Rc<RefCell<Vec<(Value, Value)>>>;
pub type SetRef = Rc<RefCell<Vec<Value>>>;

/// A caller-defined type carried through the graph as [`Value::Custom`].
///
/// Implemented for every `Any + Debug + PartialEq` type; it only exists so
/// custom values can be compared and downcast behind a trait object.
pub trait CustomValue: Any + fmt::Debug {
    fn as_any(&self) -> &dyn Any;
    fn eq_custom(&self, other: &dyn CustomValue) -> bool;
}

impl<T: Any + fmt::Debug + PartialEq> CustomValue for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_custom(&self, other: &dyn CustomValue) -> bool {
        other.as_any().downcast_ref::<T>() == Some(self)
    }
}

/// Universal value type for the structured serializer.
///
/// `Debug` and `==` walk the graph; on a cyclic graph they only terminate
/// when the cycle is reached through the same `Rc` on both sides.
#[derive(Debug, Clone)]
pub enum Value {
    /// The "no value" sentinel.
    Undefined,
    Null,
    Bool(bool),
    /// Any double, including NaN, the infinities and negative zero.
    Number(f64),
    /// Limited to the `i128` range; wider decimals fail to parse.
    BigInt(i128),
    String(String),
    Date(DateTime<Utc>),
    RegExp { source: String, flags: String },
    Array(ArrayRef),
    /// Insertion-ordered string-keyed record.
    Object(ObjectRef),
    /// Insertion-ordered key/value pairs with arbitrary keys.
    Map(MapRef),
    Set(SetRef),
    /// Only serializable through a registered reducer.
    Custom(Rc<dyn CustomValue>),
}

impl Value {
    pub fn array(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Array(Rc::new(RefCell::new(items.into_iter().collect())))
    }

    pub fn object<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::Object(Rc::new(RefCell::new(
            entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        )))
    }

    pub fn map(entries: impl IntoIterator<Item = (Value, Value)>) -> Self {
        Value::Map(Rc::new(RefCell::new(entries.into_iter().collect())))
    }

    pub fn set(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Set(Rc::new(RefCell::new(items.into_iter().collect())))
    }

    pub fn regexp(source: impl Into<String>, flags: impl Into<String>) -> Self {
        Value::RegExp {
            source: source.into(),
            flags: flags.into(),
        }
    }

    pub fn custom<T: CustomValue>(value: T) -> Self {
        Value::Custom(Rc::new(value))
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Looks up `key` when this is an object.
    pub fn get(&self, key: &str) -> Option<Value> {
        match self {
            Value::Object(obj) => obj.borrow().get(key).cloned(),
            _ => None,
        }
    }

    /// Returns the custom payload if it is a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Value::Custom(c) => (**c).as_any().downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Identity comparison for reference-counted variants.
    pub fn ptr_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            (Value::Map(a), Value::Map(b)) => Rc::ptr_eq(a, b),
            (Value::Set(a), Value::Set(b)) => Rc::ptr_eq(a, b),
            (Value::Custom(a), Value::Custom(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Address of the shared allocation, for reference-counted variants.
    pub(crate) fn identity(&self) -> Option<usize> {
        match self {
            Value::Array(a) => Some(Rc::as_ptr(a) as *const () as usize),
            Value::Object(o) => Some(Rc::as_ptr(o) as *const () as usize),
            Value::Map(m) => Some(Rc::as_ptr(m) as *const () as usize),
            Value::Set(s) => Some(Rc::as_ptr(s) as *const () as usize),
            Value::Custom(c) => Some(Rc::as_ptr(c) as *const () as usize),
            _ => None,
        }
    }

    /// Lossy conversion to plain JSON.
    ///
    /// `undefined`, non-finite numbers and unregistered custom values become
    /// `null`; dates become ISO strings, bigints decimal strings, regexps
    /// `/source/flags`, sets arrays and maps arrays of `[key, value]` pairs.
    /// A back-reference to a container that is still being converted becomes
    /// `null`.
    pub fn to_json(&self) -> serde_json::Value {
        let mut visiting = HashSet::new();
        self.to_json_inner(&mut visiting)
    }

    fn to_json_inner(&self, visiting: &mut HashSet<usize>) -> serde_json::Value {
        use serde_json::Value as Json;

        let id = self.identity();
        if let Some(id) = id {
            if !visiting.insert(id) {
                return Json::Null;
            }
        }
        let json = match self {
            Value::Undefined | Value::Null | Value::Custom(_) => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Number(n) => number_to_json(*n),
            Value::BigInt(i) => Json::String(i.to_string()),
            Value::String(s) => Json::String(s.clone()),
            Value::Date(d) => Json::String(format_date(d)),
            Value::RegExp { source, flags } => Json::String(format!("/{source}/{flags}")),
            Value::Array(arr) | Value::Set(arr) => Json::Array(
                arr.borrow()
                    .iter()
                    .map(|v| v.to_json_inner(visiting))
                    .collect(),
            ),
            Value::Object(obj) => Json::Object(
                obj.borrow()
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json_inner(visiting)))
                    .collect(),
            ),
            Value::Map(map) => Json::Array(
                map.borrow()
                    .iter()
                    .map(|(k, v)| {
                        Json::Array(vec![k.to_json_inner(visiting), v.to_json_inner(visiting)])
                    })
                    .collect(),
            ),
        };
        if let Some(id) = id {
            visiting.remove(&id);
        }
        json
    }
}

fn number_to_json(n: f64) -> serde_json::Value {
    if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        return serde_json::Value::from(n as i64);
    }
    serde_json::Number::from_f64(n)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => {
                a.to_bits() == b.to_bits() || (a.is_nan() && b.is_nan())
            }
            (Value::BigInt(a), Value::BigInt(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (
                Value::RegExp { source: s1, flags: f1 },
                Value::RegExp { source: s2, flags: f2 },
            ) => s1 == s2 && f1 == f2,
            (Value::Array(a), Value::Array(b)) => *a.borrow() == *b.borrow(),
            (Value::Object(a), Value::Object(b)) => {
                let (a, b) = (a.borrow(), b.borrow());
                // key order is part of the value
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x == y)
            }
            (Value::Map(a), Value::Map(b)) => *a.borrow() == *b.borrow(),
            (Value::Set(a), Value::Set(b)) => *a.borrow() == *b.borrow(),
            (Value::Custom(a), Value::Custom(b)) => a.eq_custom(&**b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(d: DateTime<Utc>) -> Self {
        Value::Date(d)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(0.0)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(arr) => Value::array(arr.into_iter().map(Value::from)),
            serde_json::Value::Object(obj) => {
                Value::object(obj.into_iter().map(|(k, v)| (k, Value::from(v))))
            }
        }
    }
}
