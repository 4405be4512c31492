//! Transport-neutral response value
//!
//! Every responder produces a [`Reply`]. The axum adapter turns it into an
//! HTTP response; the serverless entry point turns it into a
//! [`FunctionResponse`](crate::function::FunctionResponse).

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use echobot_core::ErrorBody;
use serde::Serialize;

pub const CONTENT_TYPE_HTML: &str = "text/html";
pub const CONTENT_TYPE_JSON: &str = "application/json";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub status: StatusCode,
    pub content_type: &'static str,
    pub body: String,
}

impl Reply {
    pub fn new(status: StatusCode, content_type: &'static str, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type,
            body: body.into(),
        }
    }

    pub fn html(body: impl Into<String>) -> Self {
        Self::new(StatusCode::OK, CONTENT_TYPE_HTML, body)
    }

    /// Serialize `value` as a JSON reply
    pub fn json<T: Serialize>(status: StatusCode, value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(body) => Self::new(status, CONTENT_TYPE_JSON, body),
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize reply body");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    CONTENT_TYPE_JSON,
                    r#"{"error":"Failed to serialize response"}"#,
                )
            }
        }
    }

    pub fn error(status: StatusCode, body: ErrorBody) -> Self {
        Self::json(status, &body)
    }

    /// The catch-all 404
    pub fn not_found() -> Self {
        Self::error(StatusCode::NOT_FOUND, ErrorBody::new("Not found"))
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        let mut response = (self.status, self.body).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(self.content_type),
        );
        response
    }
}
