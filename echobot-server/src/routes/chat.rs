//! `POST /chat` - canned echo of the user's message

use super::parse_body;
use crate::reply::Reply;
use axum::{body::Bytes, http::StatusCode};
use echobot_core::{ChatRequest, ChatResponse, ErrorBody};

pub fn respond(body: Option<&[u8]>) -> Reply {
    match parse_body::<ChatRequest>(body) {
        Ok(request) => {
            let session_id = request.session_or_default();
            tracing::debug!(session_id, "Echoing chat message");
            Reply::json(
                StatusCode::OK,
                &ChatResponse::echo(request.message_or_empty(), session_id),
            )
        }
        Err(e) => {
            tracing::warn!(error = %e, "Rejected chat request");
            Reply::error(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::new("Failed to process chat request").with_details(e),
            )
        }
    }
}

pub async fn chat_handler(body: Bytes) -> Reply {
    respond(Some(&body[..]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn body_json(reply: &Reply) -> Value {
        serde_json::from_str(&reply.body).unwrap()
    }

    #[test]
    fn test_echoes_message_and_session() {
        let reply = respond(Some(r#"{"message":"hello","session_id":"abc"}"#.as_bytes()));
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.content_type, "application/json");

        let json = body_json(&reply);
        assert_eq!(json["session_id"], "abc");
        assert!(json["response"]
            .as_str()
            .unwrap()
            .starts_with("You said: \"hello\"."));
    }

    #[test]
    fn test_defaults_when_fields_absent() {
        let json = body_json(&respond(Some("{}".as_bytes())));
        assert_eq!(json["session_id"], "default-session");
        assert!(json["response"].as_str().unwrap().starts_with("You said: \"\"."));
    }

    #[test]
    fn test_malformed_body_is_500() {
        let reply = respond(Some("{not json".as_bytes()));
        assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(&reply);
        assert_eq!(json["error"], "Failed to process chat request");
        assert!(json["details"].is_string());
    }

    #[test]
    fn test_missing_body_is_500() {
        let reply = respond(None);
        assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(&reply)["details"], "request body is missing");
    }
}
