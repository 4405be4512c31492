//! `POST /reset` - acknowledge a reset without touching any state

use super::parse_body;
use crate::reply::Reply;
use axum::{body::Bytes, http::StatusCode};
use echobot_core::{ErrorBody, ResetRequest, ResetResponse};

pub fn respond(body: Option<&[u8]>) -> Reply {
    match parse_body::<ResetRequest>(body) {
        Ok(request) => {
            let session_id = request.session_or_default();
            tracing::debug!(session_id, "Acknowledging reset");
            Reply::json(StatusCode::OK, &ResetResponse::acknowledge(session_id))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Rejected reset request");
            Reply::error(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::new("Failed to reset conversation").with_details(e),
            )
        }
    }
}

pub async fn reset_handler(body: Bytes) -> Reply {
    respond(Some(&body[..]))
}
