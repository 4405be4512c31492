//! Route responders and their axum handlers

pub mod assets;
pub mod chat;
pub mod index;
pub mod reset;

use crate::error::BodyError;
use crate::reply::Reply;
use serde::de::DeserializeOwned;

/// Parse a raw JSON request body.
///
/// A missing or empty body is an error, not an empty object. Bytes that are
/// not UTF-8 are reported like any other unparseable body.
pub(crate) fn parse_body<T: DeserializeOwned>(body: Option<&[u8]>) -> Result<T, BodyError> {
    let body = body.filter(|b| !b.is_empty()).ok_or(BodyError::Missing)?;
    let text = std::str::from_utf8(body)?;
    Ok(serde_json::from_str(text)?)
}

/// Fallback for every unmatched path or method
pub async fn not_found_handler() -> Reply {
    Reply::not_found()
}
