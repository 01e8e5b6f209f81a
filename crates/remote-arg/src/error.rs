use std::string::FromUtf8Error;

use remote_arg_base64::Base64Error;
use remote_arg_devalue::DevalueError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RemoteArgError {
    #[error("malformed remote argument: {0}")]
    Base64(#[from] Base64Error),
    #[error("remote argument is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
    /// Passed through from the structured serializer untouched.
    #[error(transparent)]
    Devalue(#[from] DevalueError),
}
