//! `remote-arg-encode` — encode a JSON argument (stdin) as a remote argument.
//!
//! Usage:
//!   remote-arg-encode [--id <id>]
//!
//! With `--id`, prints the cache key `<id>|<arg>` instead of the bare
//! argument. Empty input encodes "no argument".

use remote_arg::cli::encode_json_arg;
use std::io::{self, Read, Write};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut id = None;
    let mut i = 1;
    while i < args.len() {
        if args[i] == "--id" {
            i += 1;
            id = args.get(i).cloned();
        }
        i += 1;
    }

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match encode_json_arg(&buf, id.as_deref()) {
        Ok(encoded) => {
            io::stdout().write_all(encoded.as_bytes()).unwrap();
            io::stdout().write_all(b"\n").unwrap();
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
