//! Serverless function entry point
//!
//! Accepts a Netlify/Lambda style event, routes it, and returns the
//! `{statusCode, headers, body}` object the platform expects.

use crate::reply::Reply;
use crate::router::{dispatch, Route};
use crate::ServerConfig;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Path prefix under which the platform mounts functions
pub const FUNCTION_PREFIX: &str = "/.netlify/functions/";

/// Incoming invocation event
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionEvent {
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub http_method: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub query_string_parameters: Option<BTreeMap<String, String>>,
}

impl FunctionEvent {
    pub fn new(http_method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            http_method: http_method.into(),
            ..Default::default()
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Invocation result
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResponse {
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl From<Reply> for FunctionResponse {
    fn from(reply: Reply) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), reply.content_type.to_string());
        Self {
            status_code: reply.status.as_u16(),
            headers,
            body: reply.body,
        }
    }
}

impl IntoResponse for FunctionResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, self.body).into_response();
        for (name, value) in &self.headers {
            let Ok(name) = header::HeaderName::from_bytes(name.as_bytes()) else {
                continue;
            };
            if let Ok(value) = HeaderValue::from_str(value) {
                response.headers_mut().insert(name, value);
            }
        }
        response
    }
}

/// Remove a leading `/.netlify/functions/<name>` segment.
///
/// An empty remainder maps to `/`. Paths without the prefix, or with an
/// empty function name, are returned as is.
pub fn strip_function_prefix(path: &str) -> &str {
    let Some(rest) = path.strip_prefix(FUNCTION_PREFIX) else {
        return path;
    };

    let (name, remainder) = match rest.find('/') {
        Some(idx) => rest.split_at(idx),
        None => (rest, ""),
    };
    if name.is_empty() {
        return path;
    }

    if remainder.is_empty() {
        "/"
    } else {
        remainder
    }
}

/// Handle one invocation
pub fn handle(event: &FunctionEvent, config: &ServerConfig) -> FunctionResponse {
    handle_request(
        &event.http_method,
        &event.path,
        event.body.as_deref().map(str::as_bytes),
        config,
    )
}

/// Route and answer a request given as method, path and raw body
pub fn handle_request(
    method: &str,
    path: &str,
    body: Option<&[u8]>,
    config: &ServerConfig,
) -> FunctionResponse {
    let path = strip_function_prefix(path);
    let route = Route::resolve(path, method);
    let reply = dispatch(&route, body, config);

    tracing::info!(
        method = %method,
        path = %path,
        status = reply.status.as_u16(),
        "Handled function invocation"
    );

    reply.into()
}

/// Forward requests under [`FUNCTION_PREFIX`] through [`handle_request`], so
/// the local server answers the same URLs the deployed page uses.
pub async fn function_handler(
    State(config): State<Arc<ServerConfig>>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> FunctionResponse {
    handle_request(method.as_str(), uri.path(), Some(&body[..]), &config)
}
