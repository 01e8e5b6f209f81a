//! Parser for the flattened format produced by [`crate::stringify`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use indexmap::IndexMap;
use serde_json::Value as Json;

use crate::constants::{
    HOLE, MAX_DEPTH, NAN, NEGATIVE_INFINITY, NEGATIVE_ZERO, POSITIVE_INFINITY, UNDEFINED,
};
use crate::date::parse_date;
use crate::{DevalueError, Value};

/// Rebuilds a custom value from the plain data its reducer produced.
pub type Reviver = dyn Fn(Value) -> Result<Value, DevalueError>;

/// Parses a string produced by [`crate::stringify`].
///
/// Revivers are looked up by type name before the built-in types, so a
/// caller can take over a built-in name such as `"Date"`.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use remote_arg_devalue::{parse, Value};
///
/// let value = parse(r#"[[1,1],"x"]"#, &HashMap::new()).unwrap();
/// assert_eq!(value, Value::array([Value::from("x"), Value::from("x")]));
/// ```
pub fn parse(serialized: &str, revivers: &HashMap<&str, &Reviver>) -> Result<Value, DevalueError> {
    let parsed: Json = serde_json::from_str(serialized)?;
    unflatten(&parsed, revivers)
}

/// Rebuilds a value from an already parsed JSON document.
pub fn unflatten(parsed: &Json, revivers: &HashMap<&str, &Reviver>) -> Result<Value, DevalueError> {
    match parsed {
        Json::Number(n) => n
            .as_i64()
            .and_then(special)
            .ok_or(DevalueError::InvalidInput),
        Json::Array(values) if !values.is_empty() => {
            let mut hydrator = Hydrator {
                values,
                hydrated: vec![Slot::Empty; values.len()],
                revivers,
                depth: 0,
            };
            hydrator.hydrate(0)
        }
        _ => Err(DevalueError::InvalidInput),
    }
}

fn special(index: i64) -> Option<Value> {
    match index {
        UNDEFINED => Some(Value::Undefined),
        NAN => Some(Value::Number(f64::NAN)),
        POSITIVE_INFINITY => Some(Value::Number(f64::INFINITY)),
        NEGATIVE_INFINITY => Some(Value::Number(f64::NEG_INFINITY)),
        NEGATIVE_ZERO => Some(Value::Number(-0.0)),
        _ => None,
    }
}

fn as_index(raw: &Json) -> Result<i64, DevalueError> {
    raw.as_i64().ok_or(DevalueError::InvalidInput)
}

#[derive(Clone)]
enum Slot {
    Empty,
    /// A reviver is rebuilding this slot from its payload.
    Reviving,
    Done(Value),
}

struct Hydrator<'a> {
    values: &'a [Json],
    hydrated: Vec<Slot>,
    revivers: &'a HashMap<&'a str, &'a Reviver>,
    depth: usize,
}

impl Hydrator<'_> {
    fn hydrate(&mut self, index: i64) -> Result<Value, DevalueError> {
        if let Some(value) = special(index) {
            return Ok(value);
        }
        if index < 0 || index as usize >= self.values.len() {
            return Err(DevalueError::InvalidIndex(index));
        }
        let i = index as usize;
        match &self.hydrated[i] {
            Slot::Done(value) => return Ok(value.clone()),
            // A typed value cannot contain itself: its reviver has not run yet.
            Slot::Reviving => return Err(DevalueError::InvalidInput),
            Slot::Empty => {}
        }

        if self.depth >= MAX_DEPTH {
            return Err(DevalueError::TooDeep(MAX_DEPTH));
        }
        self.depth += 1;
        let result = self.hydrate_slot(i);
        self.depth -= 1;
        result
    }

    fn hydrate_slot(&mut self, i: usize) -> Result<Value, DevalueError> {
        let values = self.values;
        let value = match &values[i] {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(*b),
            Json::Number(n) => Value::Number(n.as_f64().ok_or(DevalueError::InvalidInput)?),
            Json::String(s) => Value::String(s.clone()),
            Json::Array(items) => {
                if let Some(Json::String(type_name)) = items.first() {
                    return self.hydrate_typed(i, type_name, &items[1..]);
                }
                let arr = Rc::new(RefCell::new(Vec::with_capacity(items.len())));
                self.hydrated[i] = Slot::Done(Value::Array(arr.clone()));
                for item in items {
                    let index = as_index(item)?;
                    let child = if index == HOLE {
                        Value::Undefined
                    } else {
                        self.hydrate(index)?
                    };
                    arr.borrow_mut().push(child);
                }
                return Ok(Value::Array(arr));
            }
            Json::Object(entries) => {
                let obj = Rc::new(RefCell::new(IndexMap::with_capacity(entries.len())));
                self.hydrated[i] = Slot::Done(Value::Object(obj.clone()));
                for (key, item) in entries {
                    let child = self.hydrate(as_index(item)?)?;
                    obj.borrow_mut().insert(key.clone(), child);
                }
                return Ok(Value::Object(obj));
            }
        };

        self.hydrated[i] = Slot::Done(value.clone());
        Ok(value)
    }

    /// Hydrates `["<type_name>", ...args]` stored at slot `i`.
    fn hydrate_typed(&mut self, i: usize, type_name: &str, args: &[Json]) -> Result<Value, DevalueError> {
        let revivers = self.revivers;
        if let Some(&reviver) = revivers.get(type_name) {
            self.hydrated[i] = Slot::Reviving;
            let plain = self.hydrate(as_index(args.first().ok_or(DevalueError::InvalidInput)?)?)?;
            let value = reviver(plain)?;
            self.hydrated[i] = Slot::Done(value.clone());
            return Ok(value);
        }

        let value = match type_name {
            "Date" => {
                let text = args.first().and_then(Json::as_str).ok_or(DevalueError::InvalidInput)?;
                let date =
                    parse_date(text).ok_or_else(|| DevalueError::InvalidDate(text.to_string()))?;
                Value::Date(date)
            }
            "RegExp" => {
                let source = args.first().and_then(Json::as_str).ok_or(DevalueError::InvalidInput)?;
                let flags = args.get(1).and_then(Json::as_str).unwrap_or("");
                Value::regexp(source, flags)
            }
            "BigInt" => {
                let text = args.first().and_then(Json::as_str).ok_or(DevalueError::InvalidInput)?;
                let n = text
                    .parse::<i128>()
                    .map_err(|_| DevalueError::InvalidBigInt(text.to_string()))?;
                Value::BigInt(n)
            }
            // Boxed primitive: the argument is the literal itself.
            "Object" => match args.first() {
                Some(Json::Bool(b)) => Value::Bool(*b),
                Some(Json::Number(n)) => Value::Number(n.as_f64().ok_or(DevalueError::InvalidInput)?),
                Some(Json::String(s)) => Value::String(s.clone()),
                _ => return Err(DevalueError::InvalidInput),
            },
            "Set" => {
                let set = Rc::new(RefCell::new(Vec::with_capacity(args.len())));
                self.hydrated[i] = Slot::Done(Value::Set(set.clone()));
                for arg in args {
                    let item = self.hydrate(as_index(arg)?)?;
                    set.borrow_mut().push(item);
                }
                return Ok(Value::Set(set));
            }
            "Map" => {
                if args.len() % 2 != 0 {
                    return Err(DevalueError::InvalidInput);
                }
                let map = Rc::new(RefCell::new(Vec::with_capacity(args.len() / 2)));
                self.hydrated[i] = Slot::Done(Value::Map(map.clone()));
                for pair in args.chunks(2) {
                    let key = self.hydrate(as_index(&pair[0])?)?;
                    let item = self.hydrate(as_index(&pair[1])?)?;
                    map.borrow_mut().push((key, item));
                }
                return Ok(Value::Map(map));
            }
            // Object without prototype: alternating key literals and indices.
            "null" => {
                if args.len() % 2 != 0 {
                    return Err(DevalueError::InvalidInput);
                }
                let obj = Rc::new(RefCell::new(IndexMap::with_capacity(args.len() / 2)));
                self.hydrated[i] = Slot::Done(Value::Object(obj.clone()));
                for pair in args.chunks(2) {
                    let key = pair[0].as_str().ok_or(DevalueError::InvalidInput)?;
                    let item = self.hydrate(as_index(&pair[1])?)?;
                    obj.borrow_mut().insert(key.to_string(), item);
                }
                return Ok(Value::Object(obj));
            }
            other => return Err(DevalueError::UnknownType(other.to_string())),
        };

        self.hydrated[i] = Slot::Done(value.clone());
        Ok(value)
    }
}
