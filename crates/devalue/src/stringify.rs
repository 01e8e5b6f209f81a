//! Flattening stringifier.
//!
//! Every distinct value gets one slot in a JSON array and refers to its
//! children by slot index, so shared nodes are written once and cycles
//! terminate.

use std::collections::HashMap;

use crate::constants::{
    MAX_DEPTH, NAN, NEGATIVE_INFINITY, NEGATIVE_ZERO, POSITIVE_INFINITY, UNDEFINED,
};
use crate::date::format_date;
use crate::escape::stringify_string;
use crate::{DevalueError, Value};

/// Turns a value of a custom type into plain data, or returns `None` when the
/// value is not of that type.
pub type Reducer = dyn Fn(&Value) -> Option<Value>;

/// Dedupe key: containers by allocation, primitives by value.
#[derive(Debug, PartialEq, Eq, Hash)]
enum Key {
    Ref(usize),
    Str(String),
    Num(u64),
    Bool(bool),
    Null,
    BigInt(i128),
}

fn key_of(value: &Value) -> Option<Key> {
    if let Some(id) = value.identity() {
        return Some(Key::Ref(id));
    }
    match value {
        Value::String(s) => Some(Key::Str(s.clone())),
        Value::Number(n) => Some(Key::Num(n.to_bits())),
        Value::Bool(b) => Some(Key::Bool(*b)),
        Value::Null => Some(Key::Null),
        Value::BigInt(i) => Some(Key::BigInt(*i)),
        _ => None,
    }
}

/// Serializes `value` to the flattened format.
///
/// `reducers` are tried in order on every value before the built-in
/// handling; the first one returning `Some` wins and the value is written as
/// `["<name>", <index of the plain data>]`.
///
/// # Errors
///
/// [`DevalueError::Unserializable`] when a [`Value::Custom`] is not claimed by
/// any reducer, and [`DevalueError::TooDeep`] when the value nests more than
/// [`MAX_DEPTH`] levels, which `parse` would refuse.
///
/// # Example
///
/// ```
/// use remote_arg_devalue::{stringify, Value};
///
/// let value = Value::object([("a", Value::from(1)), ("b", Value::from("x"))]);
/// assert_eq!(stringify(&value, &[]).unwrap(), r#"[{"a":1,"b":2},1,"x"]"#);
/// assert_eq!(stringify(&Value::Undefined, &[]).unwrap(), "-1");
/// ```
pub fn stringify(value: &Value, reducers: &[(&str, &Reducer)]) -> Result<String, DevalueError> {
    let mut flattener = Flattener {
        reducers,
        stringified: Vec::new(),
        indexes: HashMap::new(),
        keys: Vec::new(),
        retained: Vec::new(),
        depth: 0,
    };
    let index = flattener.flatten(value)?;
    if index < 0 {
        return Ok(index.to_string());
    }
    Ok(format!("[{}]", flattener.stringified.join(",")))
}

struct Flattener<'a> {
    reducers: &'a [(&'a str, &'a Reducer)],
    stringified: Vec<String>,
    indexes: HashMap<Key, i64>,
    /// Path to the value being flattened, for error messages.
    keys: Vec<String>,
    /// Reducer output must outlive the call so its allocations are not reused
    /// by later reducer output with the same address.
    retained: Vec<Value>,
    depth: usize,
}

impl Flattener<'_> {
    fn flatten(&mut self, value: &Value) -> Result<i64, DevalueError> {
        let key = key_of(value);
        if let Some(index) = key.as_ref().and_then(|k| self.indexes.get(k)) {
            return Ok(*index);
        }

        match value {
            Value::Undefined => return Ok(UNDEFINED),
            Value::Number(n) if n.is_nan() => return Ok(NAN),
            Value::Number(n) if *n == f64::INFINITY => return Ok(POSITIVE_INFINITY),
            Value::Number(n) if *n == f64::NEG_INFINITY => return Ok(NEGATIVE_INFINITY),
            Value::Number(n) if *n == 0.0 && n.is_sign_negative() => return Ok(NEGATIVE_ZERO),
            _ => {}
        }

        if self.depth >= MAX_DEPTH {
            return Err(DevalueError::TooDeep(MAX_DEPTH));
        }
        let index = self.stringified.len() as i64;
        self.stringified.push(String::new());
        if let Some(key) = key {
            self.indexes.insert(key, index);
        }

        self.depth += 1;
        let result = self.flatten_into(value, index);
        self.depth -= 1;
        result
    }

    /// Fills the freshly allocated slot `index` with `value`.
    fn flatten_into(&mut self, value: &Value, index: i64) -> Result<i64, DevalueError> {
        let reducers = self.reducers;
        for &(name, reducer) in reducers {
            if let Some(plain) = reducer(value) {
                self.retained.push(plain.clone());
                let inner = self.flatten(&plain)?;
                self.stringified[index as usize] = format!("[{},{}]", stringify_string(name), inner);
                return Ok(index);
            }
        }

        let str = match value {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => format_number(*n),
            Value::String(s) => stringify_string(s),
            Value::BigInt(i) => format!("[\"BigInt\",\"{i}\"]"),
            Value::Date(d) => format!("[\"Date\",\"{}\"]", format_date(d)),
            Value::RegExp { source, flags } => {
                if flags.is_empty() {
                    format!("[\"RegExp\",{}]", stringify_string(source))
                } else {
                    format!(
                        "[\"RegExp\",{},{}]",
                        stringify_string(source),
                        stringify_string(flags)
                    )
                }
            }
            Value::Array(arr) => {
                let mut str = String::from("[");
                for (i, item) in arr.borrow().iter().enumerate() {
                    if i > 0 {
                        str.push(',');
                    }
                    self.keys.push(format!("[{i}]"));
                    str.push_str(&self.flatten(item)?.to_string());
                    self.keys.pop();
                }
                str.push(']');
                str
            }
            Value::Object(obj) => {
                let mut str = String::from("{");
                for (i, (key, item)) in obj.borrow().iter().enumerate() {
                    if i > 0 {
                        str.push(',');
                    }
                    self.keys.push(path_segment(key));
                    str.push_str(&stringify_string(key));
                    str.push(':');
                    str.push_str(&self.flatten(item)?.to_string());
                    self.keys.pop();
                }
                str.push('}');
                str
            }
            Value::Set(set) => {
                let mut str = String::from("[\"Set\"");
                for item in set.borrow().iter() {
                    self.keys.push(format!(".has({})", describe_key(item)));
                    str.push(',');
                    str.push_str(&self.flatten(item)?.to_string());
                    self.keys.pop();
                }
                str.push(']');
                str
            }
            Value::Map(map) => {
                let mut str = String::from("[\"Map\"");
                for (key, item) in map.borrow().iter() {
                    self.keys.push(format!(".get({})", describe_key(key)));
                    str.push(',');
                    str.push_str(&self.flatten(key)?.to_string());
                    str.push(',');
                    str.push_str(&self.flatten(item)?.to_string());
                    self.keys.pop();
                }
                str.push(']');
                str
            }
            Value::Custom(_) => {
                return Err(DevalueError::Unserializable {
                    path: format!("${}", self.keys.join("")),
                })
            }
            Value::Undefined => unreachable!("handled before slot allocation"),
        };

        self.stringified[index as usize] = str;
        Ok(index)
    }
}

/// Formats a finite number the way JavaScript's `Number.prototype.toString`
/// does: shortest round-trip digits, positional between `1e-7` and `1e21`,
/// exponential with an explicit exponent sign outside that range.
fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return "null".to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    // `{:e}` yields the shortest digits that round-trip, e.g. `1.5e-7`.
    let sci = format!("{:e}", n.abs());
    let Some((mantissa, exponent)) = sci.split_once('e') else {
        return sci;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return sci;
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let len = digits.len() as i32;
    // Position of the decimal point relative to the first digit.
    let point = exponent + 1;

    let body = if len <= point && point <= 21 {
        format!("{digits}{}", "0".repeat((point - len) as usize))
    } else if 0 < point && point <= 21 {
        let (int, frac) = digits.split_at(point as usize);
        format!("{int}.{frac}")
    } else if -6 < point && point <= 0 {
        format!("0.{}{digits}", "0".repeat(point.unsigned_abs() as usize))
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{first}e{sign}{}", exponent.unsigned_abs())
        } else {
            format!("{first}.{rest}e{sign}{}", exponent.unsigned_abs())
        }
    };
    if n < 0.0 {
        format!("-{body}")
    } else {
        body
    }
}

fn path_segment(key: &str) -> String {
    let mut chars = key.chars();
    let is_identifier = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if is_identifier {
        format!(".{key}")
    } else {
        format!("[{}]", stringify_string(key))
    }
}

fn describe_key(key: &Value) -> String {
    match key {
        Value::String(s) => stringify_string(s),
        Value::Number(n) if n.is_finite() => format_number(*n),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => "...".to_string(),
    }
}
