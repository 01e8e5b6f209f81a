//! `remote-arg-decode` — print the JSON form of a remote argument.
//!
//! Usage:
//!   remote-arg-decode '<arg>'
//!   remote-arg-decode --key '<id>|<arg>'

use remote_arg::cli::{decode_arg, decode_cache_key};
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let result = match (args.get(1).map(String::as_str), args.get(2)) {
        (Some("--key"), Some(key)) => {
            decode_cache_key(key).map(|(id, json)| format!("id: {id}\narg: {json}"))
        }
        (Some("--key"), None) => {
            eprintln!("--key needs a cache key argument.");
            std::process::exit(1);
        }
        (Some(arg), _) => decode_arg(arg),
        (None, _) => decode_arg(""),
    };

    match result {
        Ok(out) => {
            io::stdout().write_all(out.as_bytes()).unwrap();
            io::stdout().write_all(b"\n").unwrap();
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
