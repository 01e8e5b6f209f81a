//! Core logic of the `remote-arg-encode` / `remote-arg-decode` binaries.
//!
//! Both work with plain JSON and an empty transport, which is enough to
//! produce or inspect prerendered file names and cache keys by hand.

use remote_arg_devalue::Value;

use crate::{
    create_remote_cache_key, parse_remote_args, split_remote_cache_key, stringify_remote_arg,
    RemoteArgError, Transport,
};

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum CliError {
    Json(serde_json::Error),
    RemoteArg(RemoteArgError),
    MissingSeparator,
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Json(e) => write!(f, "{e}"),
            CliError::RemoteArg(e) => write!(f, "{e}"),
            CliError::MissingSeparator => write!(f, "Cache key has no '|' separator"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

impl From<RemoteArgError> for CliError {
    fn from(e: RemoteArgError) -> Self {
        CliError::RemoteArg(e)
    }
}

// ── remote-arg-encode ─────────────────────────────────────────────────────

/// Encode a JSON document as a remote argument. Blank input means "no
/// argument". With `id`, the cache key is returned instead.
pub fn encode_json_arg(json: &str, id: Option<&str>) -> Result<String, CliError> {
    let arg = if json.trim().is_empty() {
        Value::Undefined
    } else {
        Value::from(serde_json::from_str::<serde_json::Value>(json)?)
    };
    let encoded = stringify_remote_arg(&arg, &Transport::new())?;
    Ok(match id {
        Some(id) => create_remote_cache_key(id, &encoded),
        None => encoded,
    })
}

// ── remote-arg-decode ─────────────────────────────────────────────────────

/// Decode a remote argument to pretty-printed JSON, or `undefined` for the
/// absent argument.
pub fn decode_arg(stringified_arg: &str) -> Result<String, CliError> {
    let value = parse_remote_args(stringified_arg, &Transport::new())?;
    if value.is_undefined() {
        return Ok("undefined".to_string());
    }
    Ok(serde_json::to_string_pretty(&value.to_json())?)
}

/// Decode a cache key to its id and the pretty-printed argument.
pub fn decode_cache_key(key: &str) -> Result<(String, String), CliError> {
    let (id, arg) = split_remote_cache_key(key).ok_or(CliError::MissingSeparator)?;
    Ok((id.to_string(), decode_arg(arg)?))
}
