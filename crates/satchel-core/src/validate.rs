//! Argument checks that turn absent values into [`SatchelError::MissingArgument`]

use crate::strings::StrExt;
use crate::{Result, SatchelError};

/// Unwrap a required value
pub fn require<T>(value: Option<T>, param: &str) -> Result<T> {
    value.ok_or_else(|| SatchelError::missing_argument(param))
}

/// Require text that is present and not only whitespace
pub fn require_non_blank<'a>(value: Option<&'a str>, param: &str) -> Result<&'a str> {
    match value {
        Some(text) if !text.is_blank() => Ok(text),
        _ => Err(SatchelError::missing_argument(param)),
    }
}
