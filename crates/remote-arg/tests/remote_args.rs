//! End-to-end tests for remote argument serialization.

use std::sync::Arc;
use std::thread;

use chrono::{TimeZone, Utc};
use rand::Rng;
use remote_arg_base64::to_base64_url;
use remote_arg::{
    create_remote_cache_key, parse_remote_args, split_remote_cache_key, stringify_remote_arg,
    DevalueError, RemoteArgError, Transport, Value,
};

#[derive(Debug, PartialEq)]
struct Vector {
    x: f64,
    y: f64,
}

fn vector_transport() -> Transport {
    Transport::new().with(
        "Vector",
        |value| {
            let v = value.downcast_ref::<Vector>()?;
            Some(Value::array([Value::from(v.x), Value::from(v.y)]))
        },
        |value| {
            let Value::Array(items) = value else {
                return Err(DevalueError::custom("Vector expects an array"));
            };
            let items = items.borrow();
            match (items.first().and_then(Value::as_f64), items.get(1).and_then(Value::as_f64)) {
                (Some(x), Some(y)) => Ok(Value::custom(Vector { x, y })),
                _ => Err(DevalueError::custom("Vector expects two numbers")),
            }
        },
    )
}

fn is_url_and_file_safe(s: &str) -> bool {
    s.bytes()
        .all(|c| c.is_ascii_alphanumeric() || c == b'-' || c == b'_')
}

fn random_value(rng: &mut impl Rng, depth: u32) -> Value {
    let pick = if depth == 0 { rng.gen_range(0..6) } else { rng.gen_range(0..9) };
    match pick {
        0 => Value::Null,
        1 => Value::from(rng.gen::<bool>()),
        2 => Value::from(rng.gen_range(-1000..1000)),
        3 => Value::from(rng.gen::<f64>() * 1e6),
        4 => {
            let len = rng.gen_range(0..12);
            Value::from((0..len).map(|_| rng.gen::<char>()).collect::<String>())
        }
        5 => Value::custom(Vector {
            x: rng.gen_range(-5..5) as f64,
            y: rng.gen::<f64>(),
        }),
        6 => {
            let len = rng.gen_range(0..4);
            Value::array((0..len).map(|_| random_value(rng, depth - 1)).collect::<Vec<_>>())
        }
        7 => {
            let len = rng.gen_range(0..4);
            Value::object(
                (0..len)
                    .map(|i| (format!("k{i}"), random_value(rng, depth - 1)))
                    .collect::<Vec<_>>(),
            )
        }
        _ => {
            let len = rng.gen_range(0..3);
            Value::map(
                (0..len)
                    .map(|_| (random_value(rng, depth - 1), random_value(rng, depth - 1)))
                    .collect::<Vec<_>>(),
            )
        }
    }
}

#[test]
fn round_trips_registered_types() {
    let transport = vector_transport();
    let arg = Value::object([
        ("origin", Value::custom(Vector { x: 0.0, y: 0.0 })),
        (
            "path",
            Value::array([
                Value::custom(Vector { x: 1.5, y: -2.0 }),
                Value::custom(Vector { x: 3.0, y: 4.25 }),
            ]),
        ),
        ("label", Value::from("route <a> → b")),
    ]);

    let encoded = stringify_remote_arg(&arg, &transport).unwrap();
    assert!(is_url_and_file_safe(&encoded), "{encoded}");
    assert_eq!(parse_remote_args(&encoded, &transport).unwrap(), arg);
}

#[test]
fn round_trips_random_values() {
    let transport = vector_transport();
    let mut rng = rand::thread_rng();
    for _ in 0..200 {
        let arg = random_value(&mut rng, 3);
        let encoded = stringify_remote_arg(&arg, &transport).unwrap();
        assert!(!encoded.is_empty());
        assert!(is_url_and_file_safe(&encoded), "{encoded}");
        assert_eq!(parse_remote_args(&encoded, &transport).unwrap(), arg);
    }
}

#[test]
fn round_trips_built_in_types() {
    let transport = Transport::new();
    let arg = Value::array([
        Value::from(Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()),
        Value::BigInt(1 << 100),
        Value::Number(f64::NAN),
        Value::Undefined,
        Value::set([Value::from("a")]),
    ]);
    let encoded = stringify_remote_arg(&arg, &transport).unwrap();
    assert_eq!(parse_remote_args(&encoded, &transport).unwrap(), arg);
}

#[test]
fn preserves_shared_references() {
    let transport = Transport::new();
    let shared = Value::object([("n", Value::from(1))]);
    let arg = Value::array([shared.clone(), shared]);

    let back = parse_remote_args(&stringify_remote_arg(&arg, &transport).unwrap(), &transport).unwrap();
    let Value::Array(items) = back else {
        panic!("expected an array");
    };
    let items = items.borrow();
    assert!(items[0].ptr_eq(&items[1]));
}

#[test]
fn absent_argument_sentinel() {
    let transport = vector_transport();
    assert_eq!(stringify_remote_arg(&Value::Undefined, &transport).unwrap(), "");
    assert_eq!(parse_remote_args("", &transport).unwrap(), Value::Undefined);

    for arg in [Value::Null, Value::from(""), Value::array([]), Value::object::<String>([])] {
        assert_ne!(stringify_remote_arg(&arg, &transport).unwrap(), "", "{arg:?}");
    }
}

#[test]
fn unregistered_type_fails_unchanged() {
    let arg = Value::array([Value::custom(Vector { x: 1.0, y: 1.0 })]);
    match stringify_remote_arg(&arg, &Transport::new()) {
        Err(RemoteArgError::Devalue(DevalueError::Unserializable { path })) => {
            assert_eq!(path, "$[0]")
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn decoding_needs_the_same_transport() {
    let arg = Value::custom(Vector { x: 1.0, y: 2.0 });
    let encoded = stringify_remote_arg(&arg, &vector_transport()).unwrap();
    assert!(matches!(
        parse_remote_args(&encoded, &Transport::new()),
        Err(RemoteArgError::Devalue(DevalueError::UnknownType(_)))
    ));
}

#[test]
fn accepts_padded_arguments() {
    let transport = Transport::new();
    // `["abc"]` is 7 bytes, so the last window is short
    let arg = Value::from("abc");
    let encoded = stringify_remote_arg(&arg, &transport).unwrap();
    assert_eq!(encoded.len() % 4, 2);
    let padded = match encoded.len() % 4 {
        2 => format!("{encoded}=="),
        3 => format!("{encoded}="),
        _ => encoded.clone(),
    };
    assert_eq!(parse_remote_args(&padded, &transport).unwrap(), arg);
}

#[test]
fn rejects_tampered_arguments() {
    let transport = Transport::new();
    let encoded = stringify_remote_arg(&Value::from("payload"), &transport).unwrap();
    for tampered in [
        format!("{encoded}+"),
        format!("{encoded}/"),
        format!("{encoded} "),
        format!("=={encoded}"),
    ] {
        assert!(
            matches!(
                parse_remote_args(&tampered, &transport),
                Err(RemoteArgError::Base64(_))
            ),
            "{tampered}"
        );
    }
}

#[test]
fn rejects_hostile_payloads() {
    let transport = Transport::new().with("T", |_| None, |v| Ok(v));

    // a custom value whose payload is the custom value itself
    let encoded = to_base64_url(br#"[["T",0]]"#);
    assert!(matches!(
        parse_remote_args(&encoded, &transport),
        Err(RemoteArgError::Devalue(DevalueError::InvalidInput))
    ));

    // a valid but very long linked list: [[1],[2],...,[999],[]]
    let mut slots: Vec<String> = (1..1000).map(|i| format!("[{i}]")).collect();
    slots.push("[]".to_string());
    let encoded = to_base64_url(format!("[{}]", slots.join(",")).as_bytes());
    assert!(matches!(
        parse_remote_args(&encoded, &transport),
        Err(RemoteArgError::Devalue(DevalueError::TooDeep(_)))
    ));
}

#[test]
fn round_trips_far_dates() {
    let transport = Transport::new();
    for year in [-1, 10000] {
        let arg = Value::from(Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap());
        let encoded = stringify_remote_arg(&arg, &transport).unwrap();
        assert_eq!(parse_remote_args(&encoded, &transport).unwrap(), arg, "{year}");
    }
}

#[test]
fn cache_keys() {
    let transport = Transport::new();
    let a = stringify_remote_arg(&Value::from(1), &transport).unwrap();
    let b = stringify_remote_arg(&Value::from(2), &transport).unwrap();

    assert_eq!(create_remote_cache_key("fn1", "abc"), "fn1|abc");
    assert_eq!(create_remote_cache_key("fn1", &a), create_remote_cache_key("fn1", &a));
    assert_ne!(create_remote_cache_key("fn1", &a), create_remote_cache_key("fn1", &b));
    assert_eq!(create_remote_cache_key("fn1", ""), "fn1|");

    let key = create_remote_cache_key("mod|fn", &a);
    assert_eq!(split_remote_cache_key(&key), Some(("mod|fn", a.as_str())));
}

#[test]
fn transport_is_shared_across_threads() {
    let transport = Arc::new(vector_transport());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let transport = Arc::clone(&transport);
            thread::spawn(move || {
                let arg = Value::custom(Vector { x: i as f64, y: 0.5 });
                let encoded = stringify_remote_arg(&arg, &transport).unwrap();
                assert_eq!(parse_remote_args(&encoded, &transport).unwrap(), arg);
                encoded
            })
        })
        .collect();

    let encoded: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(transport.len(), 1);
    assert_eq!(encoded.len(), 4);
    assert_ne!(encoded[0], encoded[1]);
}
